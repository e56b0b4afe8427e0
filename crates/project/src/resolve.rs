use std::fmt;

use thiserror::Error;

use crate::project::Project;
use crate::record::FileRecord;

/// Where an import specifier points.
/// 匯入路徑解析後的目標。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// A source file inside the project.
    Local(&'a FileRecord),
    /// A URL: either an absolute `http(s)` import or a bare package served by the configured CDN.
    Remote(String),
}

impl fmt::Display for Resolution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Local(file) => write!(f, "local:{}", file.name()),
            Resolution::Remote(url) => write!(f, "remote:{url}"),
        }
    }
}

/// Failures at the bundler boundary.
/// 打包器邊界的解析錯誤。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("importer {0} is not part of the project")]
    UnknownImporter(String),
    #[error("cannot resolve {specifier:?} imported from {importer}")]
    UnresolvedImport { importer: String, specifier: String },
}

/// Resolves import specifiers against the files of a project.
/// 依專案檔案解析匯入路徑。
///
/// Relative specifiers name a sibling source file, with or without its extension.
/// Absolute `http(s)` URLs pass through unchanged; any other scheme (`node:fs`) fails.
/// Bare specifiers go to `cdnUrl` when one is configured.
#[derive(Debug, Clone, Copy)]
pub struct ModuleResolver<'a> {
    project: &'a Project,
}

impl<'a> ModuleResolver<'a> {
    /// Borrows the project to resolve against.
    /// 借用要解析的專案。
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    /// Resolves `specifier` as written in `importer`.
    /// 解析 `importer` 中的匯入路徑 `specifier`。
    pub fn resolve(&self, importer: &str, specifier: &str) -> Result<Resolution<'a>, ResolveError> {
        if !self.project.contains(importer) {
            return Err(ResolveError::UnknownImporter(importer.to_string()));
        }
        let unresolved = || ResolveError::UnresolvedImport {
            importer: importer.to_string(),
            specifier: specifier.to_string(),
        };

        if let Some(local) = specifier.strip_prefix("./") {
            let found = self.find_local(local);
            log::trace!("{importer}: {specifier} -> {:?}", found.map(FileRecord::name));
            return found.map(Resolution::Local).ok_or_else(unresolved);
        }
        if specifier.is_empty() || specifier.starts_with('.') || specifier.starts_with('/') {
            return Err(unresolved());
        }
        if let Some(scheme) = url_scheme(specifier) {
            log::trace!("{importer}: {specifier} has scheme {scheme}");
            return match scheme.to_ascii_lowercase().as_str() {
                "http" | "https" => Ok(Resolution::Remote(specifier.to_string())),
                _ => Err(unresolved()),
            };
        }

        match self.project.configuration().cdn_base() {
            Some(base) => {
                let url = format!("{base}/{specifier}");
                log::trace!("{importer}: {specifier} -> {url}");
                Ok(Resolution::Remote(url))
            }
            None => Err(unresolved()),
        }
    }

    /// An exact module name wins; otherwise the best-ranked module sharing the stem.
    fn find_local(&self, name: &str) -> Option<&'a FileRecord> {
        if name.is_empty() || name.contains('/') {
            return None;
        }
        if let Some(exact) = self.project.get(name).filter(|file| file.kind().is_module()) {
            return Some(exact);
        }
        self.project
            .files()
            .iter()
            .filter(|file| file.stem() == name)
            .filter_map(|file| file.kind().resolution_rank().map(|rank| (rank, file)))
            .min_by_key(|(rank, _)| *rank)
            .map(|(_, file)| file)
    }
}

/// The scheme of `specifier` when a `:` comes before any `/`.
fn url_scheme(specifier: &str) -> Option<&str> {
    let (scheme, _) = specifier.split_once(':')?;
    let valid = !scheme.is_empty()
        && !scheme.contains('/')
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}
