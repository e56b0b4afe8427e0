//! Bundler configuration schema and file classification for Bundlepad projects.
//! Bundlepad 專案的打包設定結構與檔案分類。

pub mod associations;
pub mod bundler;

pub use associations::{classify, FileKind};
pub use bundler::{BundlerConfig, ConfigError, JsxMode, OutputFormat, CONFIG_FILE_NAME};
