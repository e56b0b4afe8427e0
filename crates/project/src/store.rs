use std::collections::HashSet;

use bundlepad_settings::{BundlerConfig, ConfigError, CONFIG_FILE_NAME};
use thiserror::Error;

use crate::events::{ChangeEvent, ChangeKind, ObserverRegistry, SubscriptionId};
use crate::project::Project;
use crate::record::{validate_name, FileRecord};
use crate::template::ProjectTemplate;

/// Errors returned by [`ProjectStore`] operations. The store is unchanged after any of them.
/// [`ProjectStore`] 操作的錯誤；發生錯誤時狀態不會改變。
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("file {0} not found")]
    NotFound(String),
    #[error("file {0} already exists")]
    AlreadyExists(String),
    #[error("invalid bundler configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("{0} is the reserved configuration file and cannot be renamed or deleted")]
    ReservedNameViolation(String),
    #[error("{0:?} is not a valid file name")]
    InvalidName(String),
}

/// Sole owner of the current project; mediates every read and write.
/// 目前專案的唯一擁有者，所有讀寫皆經由此處。
///
/// Each successful mutation is applied completely, bumps the revision, and then
/// synchronously notifies observers in subscription order.
#[derive(Debug)]
pub struct ProjectStore {
    project: Project,
    template: ProjectTemplate,
    observers: ObserverRegistry,
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectStore {
    /// Store seeded with the default playground template.
    /// 以預設樣板建立儲存器。
    pub fn new() -> Self {
        Self::with_template(ProjectTemplate::default())
    }

    /// Store seeded with `template`, which [`ProjectStore::reset_to_default`] later restores.
    /// 以指定樣板建立儲存器；重設時亦還原為此樣板。
    pub fn with_template(template: ProjectTemplate) -> Self {
        Self {
            project: template.instantiate(),
            template,
            observers: ObserverRegistry::default(),
        }
    }

    /// Rebuilds a store from previously captured records.
    /// 由先前保存的檔案紀錄還原儲存器。
    ///
    /// `template` is what [`ProjectStore::reset_to_default`] will later restore.
    pub fn restore(
        files: Vec<FileRecord>,
        template: ProjectTemplate,
    ) -> Result<Self, ProjectError> {
        let mut seen = HashSet::new();
        let mut config = None;
        for file in &files {
            validate_name(file.name())?;
            if !seen.insert(file.name()) {
                return Err(ProjectError::AlreadyExists(file.name().to_string()));
            }
            if file.name() == CONFIG_FILE_NAME {
                config = Some(BundlerConfig::parse(file.content())?);
            }
        }
        let config = config.ok_or_else(|| ProjectError::NotFound(CONFIG_FILE_NAME.to_string()))?;
        log::debug!("restored project with {} files", files.len());
        Ok(Self {
            project: Project::from_parts(files, config),
            template,
            observers: ObserverRegistry::default(),
        })
    }

    /// Read-only view of the committed project.
    /// 已提交專案的唯讀檢視。
    pub fn project(&self) -> &Project {
        &self.project
    }

    /// File names in insertion order.
    /// 依插入順序列出檔名。
    pub fn list_files(&self) -> Vec<&str> {
        self.project.names()
    }

    /// Looks up a file by name.
    /// 依名稱查詢檔案。
    pub fn get_file(&self, name: &str) -> Result<&FileRecord, ProjectError> {
        self.project
            .get(name)
            .ok_or_else(|| ProjectError::NotFound(name.to_string()))
    }

    /// Parsed form of the configuration file.
    /// 設定檔的解析結果。
    pub fn configuration(&self) -> &BundlerConfig {
        self.project.configuration()
    }

    /// Appends a new file at the end of the project.
    /// 在專案尾端新增檔案。
    pub fn create_file(
        &mut self,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), ProjectError> {
        let name = name.into();
        validate_name(&name)?;
        if self.project.contains(&name) {
            return Err(ProjectError::AlreadyExists(name));
        }
        self.project.push(FileRecord::new(name.clone(), content));
        self.commit(name, ChangeKind::Created);
        Ok(())
    }

    /// Replaces a file's content in place. Configuration writes are validated first.
    /// 就地取代檔案內容；寫入設定檔前會先驗證。
    pub fn update_file(
        &mut self,
        name: &str,
        content: impl Into<String>,
    ) -> Result<(), ProjectError> {
        let index = self
            .project
            .position(name)
            .ok_or_else(|| ProjectError::NotFound(name.to_string()))?;
        let content = content.into();
        if name == CONFIG_FILE_NAME {
            let config = BundlerConfig::parse(&content).map_err(|err| {
                log::warn!("rejected write to {name}: {err}");
                ProjectError::InvalidConfiguration(err)
            })?;
            self.project.set_config(config);
        }
        self.project.file_mut(index).set_content(content);
        self.commit(name.to_string(), ChangeKind::Updated);
        Ok(())
    }

    /// Renames a file, keeping its content and position.
    /// 重新命名檔案，內容與位置保持不變。
    pub fn rename_file(
        &mut self,
        old_name: &str,
        new_name: impl Into<String>,
    ) -> Result<(), ProjectError> {
        let new_name = new_name.into();
        let index = self
            .project
            .position(old_name)
            .ok_or_else(|| ProjectError::NotFound(old_name.to_string()))?;
        if old_name == CONFIG_FILE_NAME {
            return Err(ProjectError::ReservedNameViolation(old_name.to_string()));
        }
        if old_name == new_name {
            return Ok(());
        }
        validate_name(&new_name)?;
        if self.project.contains(&new_name) {
            return Err(ProjectError::AlreadyExists(new_name));
        }
        self.project.file_mut(index).set_name(new_name.clone());
        self.commit(
            new_name,
            ChangeKind::Renamed {
                from: old_name.to_string(),
            },
        );
        Ok(())
    }

    /// Removes a file and returns its last record.
    /// 刪除檔案並回傳其最後內容。
    pub fn delete_file(&mut self, name: &str) -> Result<FileRecord, ProjectError> {
        let index = self
            .project
            .position(name)
            .ok_or_else(|| ProjectError::NotFound(name.to_string()))?;
        if name == CONFIG_FILE_NAME {
            return Err(ProjectError::ReservedNameViolation(name.to_string()));
        }
        let removed = self.project.remove(index);
        self.commit(name.to_string(), ChangeKind::Deleted);
        Ok(removed)
    }

    /// Replaces the whole project with the bootstrapping template.
    /// 以初始樣板取代整個專案。
    pub fn reset_to_default(&mut self) {
        self.project.replace_with(self.template.instantiate());
        self.commit(CONFIG_FILE_NAME.to_string(), ChangeKind::Reset);
    }

    /// Registers an observer called after every committed mutation.
    /// 註冊於每次提交後呼叫的觀察者。
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&ChangeEvent, &Project) + 'static,
    {
        self.observers.subscribe(Box::new(observer))
    }

    /// Removes an observer; returns `false` when the id was not subscribed.
    /// 移除觀察者；未註冊的 id 回傳 `false`。
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Number of registered observers.
    /// 已註冊的觀察者數量。
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn commit(&mut self, name: String, kind: ChangeKind) {
        let revision = self.project.bump_revision();
        let is_configuration = name == CONFIG_FILE_NAME;
        log::debug!("revision {revision}: {kind:?} {name}");
        let event = ChangeEvent {
            revision,
            name,
            kind,
            is_configuration,
        };
        self.observers.notify(&event, &self.project);
    }
}
