#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tower_lsp::LanguageServer;
use tower_lsp::lsp_types::*;
use vue_jumper_lsp::Backend;

pub fn create_test_backend() -> Backend {
    Backend::new_test()
}

/// Helper: create a temp workspace with the given files, then return a
/// Backend whose workspace root is that directory.
pub fn create_vue_workspace(files: &[(&str, &str)]) -> (Backend, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    for (rel_path, content) in files {
        write_file(dir.path(), rel_path, content);
    }
    let backend = Backend::new_test_with_workspace(dir.path().to_path_buf());
    (backend, dir)
}

pub fn write_file(root: &Path, rel_path: &str, content: &str) {
    let full = root.join(rel_path);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).expect("failed to create dirs");
    }
    fs::write(&full, content).expect("failed to write file");
}

pub fn file_uri(root: &Path, rel_path: &str) -> Url {
    Url::from_file_path(root.join(rel_path)).expect("absolute path")
}

pub async fn open_document(backend: &Backend, uri: &Url, text: &str) {
    backend
        .did_open(DidOpenTextDocumentParams {
            text_document: TextDocumentItem {
                uri: uri.clone(),
                language_id: "vue".to_string(),
                version: 1,
                text: text.to_string(),
            },
        })
        .await;
}

pub async fn goto(
    backend: &Backend,
    uri: &Url,
    line: u32,
    character: u32,
) -> Option<GotoDefinitionResponse> {
    let params = GotoDefinitionParams {
        text_document_position_params: TextDocumentPositionParams {
            text_document: TextDocumentIdentifier { uri: uri.clone() },
            position: Position { line, character },
        },
        work_done_progress_params: WorkDoneProgressParams::default(),
        partial_result_params: PartialResultParams::default(),
    };
    backend.goto_definition(params).await.unwrap()
}

/// Unwrap a scalar definition response into its location.
pub fn expect_location(response: Option<GotoDefinitionResponse>) -> Location {
    match response.expect("expected a definition") {
        GotoDefinitionResponse::Scalar(location) => location,
        other => panic!("expected a scalar location, got {:?}", other),
    }
}
