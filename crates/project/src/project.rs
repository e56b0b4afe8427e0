use bundlepad_settings::{BundlerConfig, CONFIG_FILE_NAME};
use serde::Serialize;

use crate::record::FileRecord;

/// Committed, read-only view of the current project.
/// 目前專案已提交狀態的唯讀檢視。
///
/// Files keep their insertion order; the configuration file is always present and
/// its parsed form is cached in `config`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    revision: u64,
    files: Vec<FileRecord>,
    #[serde(skip)]
    config: BundlerConfig,
}

impl Project {
    pub(crate) fn from_parts(files: Vec<FileRecord>, config: BundlerConfig) -> Self {
        Self {
            revision: 0,
            files,
            config,
        }
    }

    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::from_parts(Vec::new(), BundlerConfig::default())
    }

    /// Revision counter, bumped by every committed mutation.
    /// 每次提交變更後遞增的版本號。
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// All files in insertion order.
    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    /// File names in insertion order.
    /// 依插入順序排列的檔名。
    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(FileRecord::name).collect()
    }

    /// Looks up a file by exact name.
    /// 依完整名稱查詢檔案。
    pub fn get(&self, name: &str) -> Option<&FileRecord> {
        self.files.iter().find(|file| file.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Parsed configuration file content.
    /// 已解析的設定檔內容。
    pub fn configuration(&self) -> &BundlerConfig {
        &self.config
    }

    /// Every file other than the configuration file, in insertion order.
    /// 除設定檔外的所有來源檔。
    pub fn source_files(&self) -> impl Iterator<Item = &FileRecord> + '_ {
        self.files
            .iter()
            .filter(|file| file.name() != CONFIG_FILE_NAME)
    }

    /// Default bundler entry point: the first source file.
    /// 預設進入點：第一個來源檔。
    pub fn entry_point(&self) -> Option<&FileRecord> {
        self.source_files().next()
    }

    /// Ordered copy of the records, e.g. for handing to a persistence layer.
    pub fn snapshot(&self) -> Vec<FileRecord> {
        self.files.clone()
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.files.iter().position(|file| file.name() == name)
    }

    pub(crate) fn file_mut(&mut self, index: usize) -> &mut FileRecord {
        &mut self.files[index]
    }

    pub(crate) fn push(&mut self, record: FileRecord) {
        self.files.push(record);
    }

    pub(crate) fn remove(&mut self, index: usize) -> FileRecord {
        self.files.remove(index)
    }

    pub(crate) fn set_config(&mut self, config: BundlerConfig) {
        self.config = config;
    }

    pub(crate) fn replace_with(&mut self, other: Project) {
        let revision = self.revision;
        *self = other;
        self.revision = revision;
    }

    pub(crate) fn bump_revision(&mut self) -> u64 {
        self.revision = self.revision.wrapping_add(1);
        self.revision
    }
}
