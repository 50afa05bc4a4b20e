/// Module specifier resolution.
///
/// Turns a [`ModuleSpecifier`] into a project-relative path of an existing
/// template file (e.g. `/src/components/MyButton.vue`).  Paths handled
/// here are plain `/`-separated strings rooted at the project root; they
/// only touch the filesystem when probing for existence.
///
/// # Resolution by kind
///
///   - **Package** (`@/components/Foo`, `ui-lib`): every matching `paths`
///     pattern is expanded, most specific first, and each target is tried,
///     first relative to `baseUrl`, then relative to the project root.  A
///     specifier no pattern matches is tried relative to `baseUrl` as-is.
///   - **Relative** (`../components/Card`): joined onto the directory of
///     the requesting document.
///   - **Absolute** (`/src/components/Card`): taken as project-root relative.
///
/// Every candidate goes through suffix probing: `<path><ext>`, then
/// `<path>/index<ext>`.  Nothing further is tried.
use std::path::Path;

use crate::tsconfig::AliasConfig;
use crate::types::{ModuleSpecifier, SpecifierKind};

/// Resolve `specifier` to a project-relative path of an existing file.
///
/// `document_path` is the requesting document's project-relative path
/// (e.g. `/src/views/Home.vue`).  `extension` is the template file
/// extension including its dot.  Returns `None` when no candidate exists.
pub fn resolve_specifier(
    specifier: &ModuleSpecifier,
    document_path: &str,
    config: &AliasConfig,
    project_root: &Path,
    extension: &str,
) -> Option<String> {
    match specifier.kind {
        SpecifierKind::Package => {
            resolve_package_specifier(&specifier.value, config, project_root, extension)
        }
        SpecifierKind::Relative => {
            let joined = join_paths(parent_directory(document_path), &specifier.value);
            probe_template_file(project_root, &joined, extension)
        }
        SpecifierKind::Absolute => {
            probe_template_file(project_root, &normalize_path(&specifier.value), extension)
        }
    }
}

fn resolve_package_specifier(
    specifier: &str,
    config: &AliasConfig,
    project_root: &Path,
    extension: &str,
) -> Option<String> {
    let base = normalize_path(&config.base_directory);

    let matches = config.matching_mappings(specifier);
    if matches.is_empty() {
        return probe_template_file(project_root, &join_paths(&base, specifier), extension);
    }

    let mut candidates: Vec<String> = Vec::new();
    for (mapping, wildcard) in matches {
        for target in mapping.expand(&wildcard) {
            for candidate in [join_paths(&base, &target), join_paths("/", &target)] {
                if !candidates.contains(&candidate) {
                    candidates.push(candidate);
                }
            }
        }
    }

    candidates
        .iter()
        .find_map(|candidate| probe_template_file(project_root, candidate, extension))
}

/// Try `<path><ext>`, then `<path>/index<ext>`.  Returns the first one that
/// is an existing file.
pub fn probe_template_file(project_root: &Path, path: &str, extension: &str) -> Option<String> {
    let path = path.trim_end_matches('/');
    let direct = format!("{}{}", path, extension);
    let index = format!("{}/index{}", path, extension);

    [direct, index]
        .into_iter()
        .find(|candidate| file_exists(project_root, candidate))
}

/// Existence probe.  Any I/O error counts as "does not exist".
fn file_exists(project_root: &Path, project_path: &str) -> bool {
    let relative = project_path.trim_start_matches('/');
    !relative.is_empty() && project_root.join(relative).is_file()
}

/// Directory part of a project-relative path (`/src/views/Home.vue` →
/// `/src/views`).
fn parent_directory(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &path[..idx],
    }
}

/// Join `path` onto `base` and normalise the result.  A `path` starting
/// with `/` replaces `base`.
pub fn join_paths(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        normalize_path(path)
    } else {
        normalize_path(&format!("{}/{}", base, path))
    }
}

/// Normalise a `/`-separated path into project-relative form: always
/// rooted, `.` segments dropped, `..` segments applied.  `..` never climbs
/// above the project root.
pub fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }
    format!("/{}", segments.join("/"))
}
