/// LSP server trait implementation.
///
/// This module contains the `impl LanguageServer for Backend` block,
/// which handles the LSP protocol messages (initialize, didOpen,
/// didChange, didClose, definition).
use tower_lsp::LanguageServer;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::{debug, info};

use crate::Backend;
use crate::settings::ServerSettings;

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        // Only a single root folder is supported; prefer `root_uri` and fall
        // back to the first workspace folder.
        let workspace_root = params
            .root_uri
            .as_ref()
            .and_then(|uri| uri.to_file_path().ok())
            .or_else(|| {
                params
                    .workspace_folders
                    .as_ref()
                    .and_then(|folders| folders.first())
                    .and_then(|folder| folder.uri.to_file_path().ok())
            });

        if let Some(root) = workspace_root {
            info!("workspace root: {}", root.display());
            *self.workspace_root.lock() = Some(root);
        }

        *self.settings.lock() =
            ServerSettings::from_initialization_options(params.initialization_options);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                definition_provider: Some(OneOf::Left(true)),
                ..ServerCapabilities::default()
            },
            server_info: Some(ServerInfo {
                name: self.name.clone(),
                version: Some(self.version.clone()),
            }),
            offset_encoding: None,
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        let settings = self.settings();
        let message = match self.workspace_root() {
            Some(root) => format!(
                "VueJumperLSP initialized for {} ({} files, aliases from {})",
                root.display(),
                settings.template_extension,
                settings.config_files.join(", ")
            ),
            None => "VueJumperLSP initialized without a workspace root".to_string(),
        };
        info!("{message}");
        self.log(MessageType::INFO, message).await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        debug!("opened {}", doc.uri);
        self.open_files.lock().insert(doc.uri.to_string(), doc.text);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.to_string();

        // FULL sync: the last change carries the whole document.
        if let Some(change) = params.content_changes.into_iter().last() {
            self.open_files.lock().insert(uri, change.text);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        debug!("closed {}", uri);
        self.open_files.lock().remove(uri.as_str());
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let content = match self.open_document_text(uri.as_str()) {
            Some(content) => Some(content),
            None => match uri.to_file_path() {
                Ok(path) => self.read_document_text(&path).await,
                Err(_) => None,
            },
        };

        if let Some(content) = content
            && let Some(location) = self.resolve_definition(&uri, &content, position).await
        {
            return Ok(Some(GotoDefinitionResponse::Scalar(location)));
        }

        Ok(None)
    }
}
