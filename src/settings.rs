/// Server settings supplied by the client.
///
/// Settings arrive once, in `initializationOptions` of the `initialize`
/// request.  Every field is optional; anything missing or malformed falls
/// back to its default.
use serde::Deserialize;

use crate::tsconfig::{FALLBACK_CONFIG_FILE, PRIMARY_CONFIG_FILE};

/// Extension of the template files this server navigates between.
pub const DEFAULT_TEMPLATE_EXTENSION: &str = ".vue";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// File extension of component files, including the leading dot.
    pub template_extension: String,
    /// Alias configuration files, primary first, then fallback.
    pub config_files: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            template_extension: DEFAULT_TEMPLATE_EXTENSION.to_string(),
            config_files: vec![
                PRIMARY_CONFIG_FILE.to_string(),
                FALLBACK_CONFIG_FILE.to_string(),
            ],
        }
    }
}

impl ServerSettings {
    /// Build settings from the raw `initializationOptions` value.
    pub fn from_initialization_options(options: Option<serde_json::Value>) -> Self {
        let Some(value) = options.filter(|v| !v.is_null()) else {
            return Self::default();
        };

        match serde_json::from_value::<ServerSettings>(value) {
            Ok(settings) => settings.normalised(),
            Err(err) => {
                tracing::warn!("ignoring malformed initializationOptions: {err}");
                Self::default()
            }
        }
    }

    fn normalised(mut self) -> Self {
        let ext = self.template_extension.trim();
        self.template_extension = if ext.is_empty() || ext == "." {
            DEFAULT_TEMPLATE_EXTENSION.to_string()
        } else if ext.starts_with('.') {
            ext.to_string()
        } else {
            format!(".{ext}")
        };

        self.config_files.retain(|name| !name.trim().is_empty());
        if self.config_files.is_empty() {
            self.config_files = Self::default().config_files;
        }
        self
    }

    pub fn primary_config_file(&self) -> Option<&str> {
        self.config_files.first().map(String::as_str)
    }

    pub fn fallback_config_file(&self) -> Option<&str> {
        self.config_files.get(1).map(String::as_str)
    }
}
