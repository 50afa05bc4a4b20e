mod common;

use common::{create_vue_workspace, expect_location, file_uri, goto, open_document, write_file};
use tower_lsp::LanguageServer;
use tower_lsp::lsp_types::*;

const COMPONENT: &str = "<template><button><slot/></button></template>\n";

const TSCONFIG_WITH_COMMENTS: &str = r#"{
    // generated by create-vue
    "compilerOptions": {
        "baseUrl": ".",
        /* aliases */
        "paths": {
            "@/*": ["src/*"],
        },
    },
}"#;

/// `src/App.vue`, with `<my-button>` on line 2 (tag name at column 5).
const APP: &str = concat!(
    "<template>\n",
    "  <div>\n",
    "    <my-button @click=\"go\">Go</my-button>\n",
    "    <span>my-button</span>\n",
    "  </div>\n",
    "</template>\n",
    "\n",
    "<script>\n",
    "import MyButton from \"@/components/MyButton\"\n",
    "export default { components: { MyButton } }\n",
    "</script>\n",
);

// ─── Alias Resolution ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_goto_component_through_alias() {
    let (backend, dir) = create_vue_workspace(&[
        ("tsconfig.json", TSCONFIG_WITH_COMMENTS),
        ("src/components/MyButton.vue", COMPONENT),
    ]);
    let uri = file_uri(dir.path(), "src/App.vue");
    open_document(&backend, &uri, APP).await;

    let location = expect_location(goto(&backend, &uri, 2, 8).await);
    assert_eq!(location.uri, file_uri(dir.path(), "src/components/MyButton.vue"));
    assert_eq!(location.range.start, Position::new(0, 0));
    assert_eq!(location.range.end, Position::new(0, 0));
}

#[tokio::test]
async fn test_goto_with_base_url_src() {
    let tsconfig = r#"{ "compilerOptions": { "baseUrl": "src", "paths": { "@/*": ["src/*"] } } }"#;
    let (backend, dir) = create_vue_workspace(&[
        ("tsconfig.json", tsconfig),
        ("src/components/MyButton.vue", COMPONENT),
    ]);
    let uri = file_uri(dir.path(), "src/App.vue");
    open_document(&backend, &uri, APP).await;

    let location = expect_location(goto(&backend, &uri, 2, 6).await);
    assert_eq!(location.uri, file_uri(dir.path(), "src/components/MyButton.vue"));
}

#[tokio::test]
async fn test_goto_from_script_binding() {
    let (backend, dir) = create_vue_workspace(&[
        ("tsconfig.json", TSCONFIG_WITH_COMMENTS),
        ("src/components/MyButton.vue", COMPONENT),
    ]);
    let uri = file_uri(dir.path(), "src/App.vue");
    open_document(&backend, &uri, APP).await;

    // "MyButton" inside `components: { MyButton }` on line 9
    let location = expect_location(goto(&backend, &uri, 9, 33).await);
    assert_eq!(location.uri, file_uri(dir.path(), "src/components/MyButton.vue"));
}

#[tokio::test]
async fn test_alias_target_missing_returns_none() {
    let (backend, dir) = create_vue_workspace(&[("tsconfig.json", TSCONFIG_WITH_COMMENTS)]);
    let uri = file_uri(dir.path(), "src/App.vue");
    open_document(&backend, &uri, APP).await;

    assert!(goto(&backend, &uri, 2, 8).await.is_none());
}

#[tokio::test]
async fn test_fallback_jsconfig_fills_missing_paths() {
    let (backend, dir) = create_vue_workspace(&[
        ("tsconfig.json", r#"{ "compilerOptions": { "baseUrl": "src" } }"#),
        (
            "jsconfig.json",
            r#"{ "compilerOptions": { "baseUrl": "lib", "paths": { "@/*": ["src/*"] } } }"#,
        ),
        ("src/components/MyButton.vue", COMPONENT),
    ]);
    let uri = file_uri(dir.path(), "src/App.vue");
    open_document(&backend, &uri, APP).await;

    let location = expect_location(goto(&backend, &uri, 2, 8).await);
    assert_eq!(location.uri, file_uri(dir.path(), "src/components/MyButton.vue"));
}

#[tokio::test]
async fn test_open_tsconfig_buffer_wins_over_disk() {
    let (backend, dir) = create_vue_workspace(&[
        ("tsconfig.json", r#"{ "compilerOptions": { "paths": { "@/*": ["lib/*"] } } }"#),
        ("src/components/MyButton.vue", COMPONENT),
    ]);
    let uri = file_uri(dir.path(), "src/App.vue");
    open_document(&backend, &uri, APP).await;

    assert!(goto(&backend, &uri, 2, 8).await.is_none());

    // Unsaved edit in the editor fixes the alias.
    let tsconfig_uri = file_uri(dir.path(), "tsconfig.json");
    open_document(&backend, &tsconfig_uri, TSCONFIG_WITH_COMMENTS).await;

    let location = expect_location(goto(&backend, &uri, 2, 8).await);
    assert_eq!(location.uri, file_uri(dir.path(), "src/components/MyButton.vue"));
}

#[tokio::test]
async fn test_malformed_tsconfig_degrades_to_defaults() {
    let (backend, dir) = create_vue_workspace(&[
        ("tsconfig.json", "{ \"compilerOptions\": { \"paths\": "),
        ("src/components/Card.vue", COMPONENT),
    ]);
    let uri = file_uri(dir.path(), "src/App.vue");
    let text = concat!(
        "<template>\n",
        "  <div>\n",
        "    <Card />\n",
        "  </div>\n",
        "</template>\n",
        "<script>\n",
        "import Card from 'src/components/Card'\n",
        "</script>\n",
    );
    open_document(&backend, &uri, text).await;

    // Without aliases the specifier is tried relative to baseUrl ".".
    let location = expect_location(goto(&backend, &uri, 2, 6).await);
    assert_eq!(location.uri, file_uri(dir.path(), "src/components/Card.vue"));
}

// ─── Relative and Absolute Specifiers ───────────────────────────────────────

#[tokio::test]
async fn test_relative_specifier_with_index_fallback() {
    let (backend, dir) = create_vue_workspace(&[("src/components/Card/index.vue", COMPONENT)]);
    let uri = file_uri(dir.path(), "src/views/Home.vue");
    let text = concat!(
        "<template>\n",
        "  <section>\n",
        "    <card title=\"x\" />\n",
        "  </section>\n",
        "</template>\n",
        "<script setup lang=\"ts\">\n",
        "import Card from '../components/Card'\n",
        "</script>\n",
    );
    open_document(&backend, &uri, text).await;

    let location = expect_location(goto(&backend, &uri, 2, 7).await);
    assert_eq!(location.uri, file_uri(dir.path(), "src/components/Card/index.vue"));
}

#[tokio::test]
async fn test_absolute_specifier_is_project_relative() {
    let (backend, dir) = create_vue_workspace(&[("src/widgets/DataTable.vue", COMPONENT)]);
    let uri = file_uri(dir.path(), "src/App.vue");
    let text = concat!(
        "<template>\n",
        "  <main>\n",
        "    <data-table />\n",
        "  </main>\n",
        "</template>\n",
        "<script>\n",
        "import { default as DataTable } from '/src/widgets/DataTable'\n",
        "</script>\n",
    );
    open_document(&backend, &uri, text).await;

    let location = expect_location(goto(&backend, &uri, 2, 10).await);
    assert_eq!(location.uri, file_uri(dir.path(), "src/widgets/DataTable.vue"));
}

#[tokio::test]
async fn test_already_suffixed_specifier_defers() {
    let (backend, dir) = create_vue_workspace(&[("src/Card.vue", COMPONENT)]);
    let uri = file_uri(dir.path(), "src/App.vue");
    let text = concat!(
        "<template>\n",
        "  <div>\n",
        "    <Card />\n",
        "  </div>\n",
        "</template>\n",
        "<script>\n",
        "import Card from './Card.vue'\n",
        "</script>\n",
    );
    open_document(&backend, &uri, text).await;

    assert!(goto(&backend, &uri, 2, 6).await.is_none());
}

// ─── Gates ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_text_inside_template_is_not_a_tag() {
    let (backend, dir) = create_vue_workspace(&[
        ("tsconfig.json", TSCONFIG_WITH_COMMENTS),
        ("src/components/MyButton.vue", COMPONENT),
    ]);
    let uri = file_uri(dir.path(), "src/App.vue");
    open_document(&backend, &uri, APP).await;

    // "my-button" as plain text on line 3
    assert!(goto(&backend, &uri, 3, 12).await.is_none());
    // Closing tag `</my-button>` on line 2
    assert!(goto(&backend, &uri, 2, 33).await.is_none());
}

#[tokio::test]
async fn test_unbound_identifier_returns_none() {
    let (backend, dir) = create_vue_workspace(&[
        ("tsconfig.json", TSCONFIG_WITH_COMMENTS),
        ("src/components/MyButton.vue", COMPONENT),
    ]);
    let uri = file_uri(dir.path(), "src/App.vue");
    let text = concat!(
        "<template>\n",
        "  <div>\n",
        "    <router-view />\n",
        "  </div>\n",
        "</template>\n",
        "<script>\n",
        "import MyButton from '@/components/MyButton'\n",
        "</script>\n",
    );
    open_document(&backend, &uri, text).await;

    assert!(goto(&backend, &uri, 2, 8).await.is_none());
}

#[tokio::test]
async fn test_missing_script_block_returns_none() {
    let (backend, dir) = create_vue_workspace(&[("src/components/MyButton.vue", COMPONENT)]);
    let uri = file_uri(dir.path(), "src/App.vue");
    let text = "<template>\n  <div>\n    <my-button />\n  </div>\n</template>\n";
    open_document(&backend, &uri, text).await;

    assert!(goto(&backend, &uri, 2, 8).await.is_none());
}

#[tokio::test]
async fn test_non_vue_document_is_ignored() {
    let (backend, dir) = create_vue_workspace(&[("src/components/MyButton.vue", COMPONENT)]);
    let uri = file_uri(dir.path(), "src/main.ts");
    open_document(&backend, &uri, "import MyButton from './components/MyButton'\n").await;

    assert!(goto(&backend, &uri, 0, 9).await.is_none());
}

#[tokio::test]
async fn test_no_workspace_root_returns_none() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    write_file(dir.path(), "src/Card.vue", COMPONENT);
    let backend = common::create_test_backend();

    let uri = file_uri(dir.path(), "src/App.vue");
    let text = "<script>\nimport Card from './Card'\n</script>\n";
    open_document(&backend, &uri, text).await;

    assert!(goto(&backend, &uri, 1, 8).await.is_none());
}

// ─── Document Access ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unopened_document_is_read_from_disk() {
    let (backend, dir) = create_vue_workspace(&[
        ("tsconfig.json", TSCONFIG_WITH_COMMENTS),
        ("src/components/MyButton.vue", COMPONENT),
        ("src/App.vue", APP),
    ]);
    let uri = file_uri(dir.path(), "src/App.vue");

    let location = expect_location(goto(&backend, &uri, 2, 8).await);
    assert_eq!(location.uri, file_uri(dir.path(), "src/components/MyButton.vue"));
}

#[tokio::test]
async fn test_custom_template_extension_from_initialization_options() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    write_file(dir.path(), "pages/Card.nvue", COMPONENT);
    let backend = common::create_test_backend();
    backend
        .initialize(InitializeParams {
            root_uri: Some(Url::from_file_path(dir.path()).unwrap()),
            initialization_options: Some(serde_json::json!({ "templateExtension": "nvue" })),
            ..InitializeParams::default()
        })
        .await
        .unwrap();

    let uri = file_uri(dir.path(), "pages/Index.nvue");
    let text = concat!(
        "<template>\n",
        "  <view>\n",
        "    <card />\n",
        "  </view>\n",
        "</template>\n",
        "<script>\n",
        "import Card from './Card'\n",
        "</script>\n",
    );
    open_document(&backend, &uri, text).await;

    let location = expect_location(goto(&backend, &uri, 2, 6).await);
    assert_eq!(location.uri, file_uri(dir.path(), "pages/Card.nvue"));
}

#[tokio::test]
async fn test_goto_falls_through_to_less_specific_alias() {
    let tsconfig = r#"{
        "compilerOptions": {
            "baseUrl": ".",
            "paths": { "@/*": ["src/*"], "@/components/*": ["lib/ui/*"] }
        }
    }"#;
    let (backend, dir) = create_vue_workspace(&[
        ("tsconfig.json", tsconfig),
        ("src/components/MyButton.vue", COMPONENT),
    ]);
    let uri = file_uri(dir.path(), "src/App.vue");
    open_document(&backend, &uri, APP).await;

    let location = expect_location(goto(&backend, &uri, 2, 8).await);
    assert_eq!(location.uri, file_uri(dir.path(), "src/components/MyButton.vue"));
}

#[tokio::test]
async fn test_goto_with_script_like_component_in_template() {
    let (backend, dir) = create_vue_workspace(&[("src/ScriptEditor.vue", COMPONENT)]);
    let uri = file_uri(dir.path(), "src/App.vue");
    let text = concat!(
        "<template>\n",
        "  <div>\n",
        "    <script-editor />\n",
        "  </div>\n",
        "</template>\n",
        "<script>\n",
        "import ScriptEditor from './ScriptEditor'\n",
        "</script>\n",
    );
    open_document(&backend, &uri, text).await;

    let location = expect_location(goto(&backend, &uri, 2, 8).await);
    assert_eq!(location.uri, file_uri(dir.path(), "src/ScriptEditor.vue"));
}

#[tokio::test]
async fn test_goto_after_astral_characters_on_the_line() {
    let (backend, dir) = create_vue_workspace(&[("src/Card.vue", COMPONENT)]);
    let uri = file_uri(dir.path(), "src/App.vue");
    let text = concat!(
        "<template>\n",
        "  <div>\n",
        "    <p>\u{1F600}\u{1F600}</p><card />\n",
        "  </div>\n",
        "</template>\n",
        "<script>\n",
        "import Card from './Card'\n",
        "</script>\n",
    );
    open_document(&backend, &uri, text).await;

    // Each emoji is two UTF-16 units; `card` spans UTF-16 columns 16..20.
    let location = expect_location(goto(&backend, &uri, 2, 19).await);
    assert_eq!(location.uri, file_uri(dir.path(), "src/Card.vue"));
}
