/// Goto-definition for component references.
///
/// A request runs through these steps, stopping with no result at the
/// first one that fails:
///
///   1. **Normalize**: take the word under the cursor and convert it to
///      its PascalCase component name.
///   2. **Template gate**: inside `<template>`, the word must directly
///      follow `<`.
///   3. **Locate import**: find the first `import` in the `<script>` block
///      that binds the name.  The alias configuration is loaded at the
///      same time.
///   4. **Defer**: a specifier that already ends with the template
///      extension (`./Card.vue`) is left to the editor's own navigation.
///   5. **Resolve**: map the specifier to an existing file and return a
///      `Location` at its first line.
///
/// None of these failures is an error.  They all mean "no opinion" and the
/// handler returns `Ok(None)`.
use std::path::Path;

use tower_lsp::lsp_types::*;
use tracing::debug;

use crate::Backend;
use crate::imports;
use crate::naming::normalize_component_name;
use crate::resolution;
use crate::settings::ServerSettings;
use crate::template;
use crate::tsconfig::{self, AliasConfig, CompilerPathOptions};
use crate::types::TextPosition;
use crate::util::{project_relative_path, to_text_position};

/// Return the normalised component name under `position`, or `None` when
/// there is no word or the template trigger rule rejects it.
pub fn component_identifier_at(content: &str, position: TextPosition) -> Option<String> {
    let word = template::word_at_position(content, position)?;
    if !template::passes_trigger_gate(content, position, &word) {
        debug!(word = %word.text, "word in template is not an opening tag name");
        return None;
    }
    Some(normalize_component_name(&word.text))
}

impl Backend {
    /// Handle a "go to definition" request for `uri`.
    pub(crate) async fn resolve_definition(
        &self,
        uri: &Url,
        content: &str,
        position: Position,
    ) -> Option<Location> {
        let settings = self.settings();
        let extension = settings.template_extension.as_str();

        let document_path = uri.to_file_path().ok()?;
        if !document_path.to_string_lossy().ends_with(extension) {
            return None;
        }

        let Some(workspace_root) = self.workspace_root() else {
            debug!("no workspace root; cannot resolve {}", uri);
            return None;
        };

        let identifier = component_identifier_at(content, to_text_position(content, position))?;

        let Some(script) = template::extract_script_content(content) else {
            debug!("no <script> block in {}", uri);
            return None;
        };

        let (specifier, alias_config) = tokio::join!(
            async { imports::locate_import(script, &identifier) },
            self.load_alias_config(&workspace_root, &settings),
        );

        let Some(specifier) = specifier else {
            debug!(%identifier, "no import binds this name");
            return None;
        };

        if specifier.value.ends_with(extension) {
            debug!(specifier = %specifier.value, "already a template file; deferring to the editor");
            return None;
        }

        let document_relative = project_relative_path(&workspace_root, &document_path)?;
        let Some(resolved) = resolution::resolve_specifier(
            &specifier,
            &document_relative,
            &alias_config,
            &workspace_root,
            extension,
        ) else {
            debug!(specifier = %specifier.value, kind = ?specifier.kind, "no file found");
            return None;
        };

        debug!(%identifier, %resolved, "resolved component");

        let target = workspace_root.join(resolved.trim_start_matches('/'));
        let target_uri = Url::from_file_path(&target).ok()?;
        Some(Location {
            uri: target_uri,
            range: Range::default(),
        })
    }

    /// Load the alias configuration for this request.  Files open in the
    /// editor are read from their buffers so unsaved edits apply.
    pub async fn load_alias_config(
        &self,
        workspace_root: &Path,
        settings: &ServerSettings,
    ) -> AliasConfig {
        let (primary, fallback) = tokio::join!(
            self.read_compiler_path_options(workspace_root, settings.primary_config_file()),
            self.read_compiler_path_options(workspace_root, settings.fallback_config_file()),
        );
        AliasConfig::merge(primary, fallback)
    }

    async fn read_compiler_path_options(
        &self,
        workspace_root: &Path,
        file_name: Option<&str>,
    ) -> CompilerPathOptions {
        let Some(file_name) = file_name else {
            return CompilerPathOptions::default();
        };
        match self.read_document_text(&workspace_root.join(file_name)).await {
            Some(content) => tsconfig::parse_compiler_path_options(&content),
            None => CompilerPathOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = concat!(
        "<template>\n",
        "  <div>\n",
        "    <my-button></my-button>\n",
        "    <span> my-button </span>\n",
        "  </div>\n",
        "</template>\n",
        "<script>\n",
        "import MyButton from '@/components/MyButton'\n",
        "</script>\n",
    );

    #[test]
    fn identifier_from_opening_tag() {
        assert_eq!(
            component_identifier_at(DOC, TextPosition::new(2, 8)).as_deref(),
            Some("MyButton")
        );
    }

    #[test]
    fn closing_tag_is_rejected() {
        assert!(component_identifier_at(DOC, TextPosition::new(2, 20)).is_none());
    }

    #[test]
    fn plain_text_in_template_is_rejected() {
        assert!(component_identifier_at(DOC, TextPosition::new(3, 12)).is_none());
    }

    #[test]
    fn script_identifier_is_accepted() {
        assert_eq!(
            component_identifier_at(DOC, TextPosition::new(7, 10)).as_deref(),
            Some("MyButton")
        );
    }
}
