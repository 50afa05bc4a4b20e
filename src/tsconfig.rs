/// Compiler path-alias configuration.
///
/// This module parses `compilerOptions.baseUrl` and `compilerOptions.paths`
/// from the project's `tsconfig.json` (primary) and `jsconfig.json`
/// (fallback) and merges them into an [`AliasConfig`].
///
/// Both files are JSON with comments and trailing commas allowed, so they
/// are parsed with `json5`.  A missing or unparsable file is treated the
/// same as a file that defines nothing: loading never fails.
///
/// # Merge rule
///
/// `baseUrl` and `paths` are merged independently: the primary file's
/// value wins, the fallback fills in fields the primary leaves undefined,
/// and `baseUrl` defaults to `"."`.
///
/// # Pattern matching
///
/// A `paths` key may contain a single `*`.  Given `"@/*": ["src/*"]` the
/// specifier `@/components/Foo` captures `components/Foo`, which is then
/// substituted into each target (`src/components/Foo`).
use std::collections::BTreeMap;

/// Primary configuration file name, relative to the workspace root.
pub const PRIMARY_CONFIG_FILE: &str = "tsconfig.json";

/// Fallback configuration file name, relative to the workspace root.
pub const FALLBACK_CONFIG_FILE: &str = "jsconfig.json";

/// Base directory used when no configuration file declares `baseUrl`.
pub const DEFAULT_BASE_DIRECTORY: &str = ".";

/// The alias-related fields of a single configuration file.
///
/// `None` means the file did not define the field (or could not be read).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilerPathOptions {
    pub base_url: Option<String>,
    pub paths: Option<BTreeMap<String, Vec<String>>>,
}

/// A single `paths` entry, pre-split around its wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMapping {
    /// The alias pattern as written, e.g. `"@/*"`.
    pub pattern: String,
    /// Text before the wildcard (the whole pattern when there is none).
    pub prefix: String,
    /// Text after the wildcard.
    pub suffix: String,
    /// Target patterns, in the order they are tried.
    pub targets: Vec<String>,
}

impl PathMapping {
    /// Match `specifier` against this pattern and return the text captured
    /// by the wildcard (empty for a wildcard-free exact match).
    pub fn match_specifier(&self, specifier: &str) -> Option<String> {
        if !self.pattern.contains('*') {
            return (self.pattern == specifier).then(String::new);
        }

        if !specifier.starts_with(&self.prefix) || !specifier.ends_with(&self.suffix) {
            return None;
        }

        let start = self.prefix.len();
        let end = specifier.len().saturating_sub(self.suffix.len());
        if end < start {
            return None;
        }

        Some(specifier[start..end].to_string())
    }

    /// Number of literal characters in the pattern.  More literal text
    /// means a more specific pattern.
    pub fn specificity(&self) -> usize {
        self.prefix.len() + self.suffix.len()
    }

    /// Substitute the captured wildcard text into every target.
    pub fn expand(&self, wildcard: &str) -> Vec<String> {
        self.targets
            .iter()
            .map(|target| {
                if target.contains('*') {
                    target.replacen('*', wildcard, 1)
                } else {
                    target.clone()
                }
            })
            .collect()
    }
}

/// Alias configuration after merging the primary and fallback files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasConfig {
    /// `compilerOptions.baseUrl`, project-root relative.
    pub base_directory: String,
    /// Mappings sorted most specific first.
    pub path_map: Vec<PathMapping>,
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self {
            base_directory: DEFAULT_BASE_DIRECTORY.to_string(),
            path_map: Vec::new(),
        }
    }
}

impl AliasConfig {
    /// Merge two configuration sources field by field.  `primary` wins
    /// wherever it defines a field.
    pub fn merge(primary: CompilerPathOptions, fallback: CompilerPathOptions) -> Self {
        let base_directory = primary
            .base_url
            .or(fallback.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_DIRECTORY.to_string());
        let paths = primary.paths.or(fallback.paths).unwrap_or_default();

        Self {
            base_directory,
            path_map: build_path_mappings(&paths),
        }
    }

    /// Every mapping whose pattern matches `specifier`, most specific first,
    /// each with its wildcard capture.
    pub fn matching_mappings(&self, specifier: &str) -> Vec<(&PathMapping, String)> {
        self.path_map
            .iter()
            .filter_map(|mapping| Some((mapping, mapping.match_specifier(specifier)?)))
            .collect()
    }
}

/// Parse configuration text and extract the alias fields.
///
/// Returns an empty [`CompilerPathOptions`] when the text is not valid
/// JSON5 or `compilerOptions` is absent.
pub fn parse_compiler_path_options(content: &str) -> CompilerPathOptions {
    let json: serde_json::Value = match json5::from_str(content) {
        Ok(v) => v,
        Err(_) => return CompilerPathOptions::default(),
    };

    let Some(compiler_options) = json.get("compilerOptions") else {
        return CompilerPathOptions::default();
    };

    let base_url = compiler_options
        .get("baseUrl")
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(normalise_pattern);

    let paths = compiler_options
        .get("paths")
        .and_then(|v| v.as_object())
        .map(|obj| {
            let mut paths = BTreeMap::new();
            for (pattern, targets) in obj {
                let targets = extract_targets(targets);
                if !targets.is_empty() {
                    paths.insert(normalise_pattern(pattern), targets);
                }
            }
            paths
        })
        .filter(|paths| !paths.is_empty());

    CompilerPathOptions { base_url, paths }
}

/// Extract target patterns from a `paths` value.
///
/// The value is normally an array of strings, but a bare string is
/// accepted as a one-element list.  Non-string entries are skipped.
fn extract_targets(value: &serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::String(target) => vec![normalise_pattern(target)],
        serde_json::Value::Array(arr) => arr
            .iter()
            .filter_map(|entry| entry.as_str())
            .map(normalise_pattern)
            .collect(),
        _ => Vec::new(),
    }
}

fn normalise_pattern(value: &str) -> String {
    value.trim().replace('\\', "/")
}

fn split_pattern(pattern: &str) -> (String, String) {
    match pattern.find('*') {
        Some(star) => (pattern[..star].to_string(), pattern[star + 1..].to_string()),
        None => (pattern.to_string(), String::new()),
    }
}

/// Build mappings sorted most specific first: more literal characters,
/// then longer pattern, then lexical order.
fn build_path_mappings(paths: &BTreeMap<String, Vec<String>>) -> Vec<PathMapping> {
    let mut mappings: Vec<PathMapping> = paths
        .iter()
        .filter(|(_, targets)| !targets.is_empty())
        .map(|(pattern, targets)| {
            let (prefix, suffix) = split_pattern(pattern);
            PathMapping {
                pattern: pattern.clone(),
                prefix,
                suffix,
                targets: targets.clone(),
            }
        })
        .collect();

    mappings.sort_by(|left, right| {
        right
            .specificity()
            .cmp(&left.specificity())
            .then_with(|| right.pattern.len().cmp(&left.pattern.len()))
            .then_with(|| left.pattern.cmp(&right.pattern))
    });
    mappings
}

// ─── Tests ──────────────────────────────────────────────────────────────────
