//! VueJumperLSP: go-to-definition for Vue single-file components.
//!
//! Given a component tag in a template (`<my-button>`) or a binding in the
//! script block, the server finds the `import` that binds the component,
//! resolves its module specifier (honouring `tsconfig.json` /
//! `jsconfig.json` path aliases) and jumps to the component file.
//!
//! - [`naming`]: kebab-case → PascalCase component name normalisation.
//! - [`template`]: template/script region detection and word lookup.
//! - [`imports`]: import declaration scanning and binding lookup.
//! - [`tsconfig`]: alias configuration loading and merging.
//! - [`resolution`]: specifier → existing file resolution.
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tower_lsp::Client;

mod definition;
pub mod imports;
pub mod logging;
pub mod naming;
pub mod resolution;
mod server;
pub mod settings;
pub mod template;
pub mod tsconfig;
pub mod types;
mod util;

pub use definition::component_identifier_at;
pub use settings::ServerSettings;
pub use types::{
    ImportBinding, ImportDeclaration, ModuleSpecifier, NamedBinding, SpecifierKind, TextPosition,
};

pub struct Backend {
    name: String,
    version: String,
    /// Text of documents the client has open, keyed by URI string.
    open_files: Arc<Mutex<HashMap<String, String>>>,
    workspace_root: Arc<Mutex<Option<PathBuf>>>,
    settings: Arc<Mutex<ServerSettings>>,
    client: Option<Client>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self {
            client: Some(client),
            ..Self::new_test()
        }
    }

    /// A backend without a client, for tests.
    pub fn new_test() -> Self {
        Self {
            name: "VueJumperLSP".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            open_files: Arc::new(Mutex::new(HashMap::new())),
            workspace_root: Arc::new(Mutex::new(None)),
            settings: Arc::new(Mutex::new(ServerSettings::default())),
            client: None,
        }
    }

    /// A client-less backend with the workspace root already set.
    pub fn new_test_with_workspace(workspace_root: PathBuf) -> Self {
        let backend = Self::new_test();
        *backend.workspace_root.lock() = Some(workspace_root);
        backend
    }

    pub fn workspace_root(&self) -> Option<PathBuf> {
        self.workspace_root.lock().clone()
    }

    pub fn settings(&self) -> ServerSettings {
        self.settings.lock().clone()
    }

    /// Text of an open document, if the client has it open.
    pub fn open_document_text(&self, uri: &str) -> Option<String> {
        self.open_files.lock().get(uri).cloned()
    }
}
