use bundlepad_settings::{classify, FileKind};
use serde::{Deserialize, Serialize};

use crate::store::ProjectError;

/// A named unit of text content inside a project.
/// 專案中具名的文字內容單位。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    name: String,
    content: String,
}

impl FileRecord {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Content semantics implied by the file name.
    /// 由檔名推斷的內容類型。
    pub fn kind(&self) -> FileKind {
        classify(&self.name)
    }

    /// Name without its final extension, as used by extension-less imports.
    /// 去除最後副檔名的名稱，供無副檔名匯入比對。
    pub fn stem(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.name,
        }
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.content = content;
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// Rejects names that cannot be a flat file name.
/// 拒絕無法作為單一檔名的名稱。
pub(crate) fn validate_name(name: &str) -> Result<(), ProjectError> {
    let invalid = name.trim().is_empty()
        || name != name.trim()
        || name.contains(['/', '\\'])
        || name == "."
        || name == "..";
    if invalid {
        Err(ProjectError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}
