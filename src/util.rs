/// Helpers shared by the LSP handlers: client logging, document text
/// access and path conversion.
use std::path::{Component, Path};

use tower_lsp::lsp_types::*;

use crate::Backend;
use crate::types::TextPosition;

impl Backend {
    pub(crate) async fn log(&self, typ: MessageType, message: String) {
        if let Some(client) = &self.client {
            client.log_message(typ, message).await;
        }
    }

    /// Get a document's text the way an editor would: the open buffer if
    /// the client has the file open, otherwise the file on disk.
    pub(crate) async fn read_document_text(&self, path: &Path) -> Option<String> {
        if let Ok(uri) = Url::from_file_path(path)
            && let Some(text) = self.open_document_text(uri.as_str())
        {
            return Some(text);
        }
        tokio::fs::read_to_string(path).await.ok()
    }
}

/// Convert an LSP position to a plain [`TextPosition`].
///
/// LSP counts `character` in UTF-16 code units; [`TextPosition::column`]
/// counts chars on the line.  A column past the end of the line clamps to
/// the line length.
pub(crate) fn to_text_position(content: &str, position: Position) -> TextPosition {
    let line = position.line as usize;
    let target = position.character as usize;

    let mut units = 0;
    let mut column = 0;
    if let Some(text) = content.lines().nth(line) {
        for ch in text.chars() {
            if units >= target {
                break;
            }
            units += ch.len_utf16();
            column += 1;
        }
    }
    TextPosition::new(line, column)
}

/// Express `file` relative to `root` as a rooted `/`-separated path
/// (`<root>/src/App.vue` → `/src/App.vue`).  `None` when `file` is not
/// inside `root`.
pub(crate) fn project_relative_path(root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?;
    let mut out = String::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                out.push('/');
                out.push_str(part.to_str()?);
            }
            _ => return None,
        }
    }
    if out.is_empty() { None } else { Some(out) }
}
