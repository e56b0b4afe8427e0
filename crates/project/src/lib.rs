//! In-memory project model for the Bundlepad playground.
//! Bundlepad 遊樂場的記憶體內專案模型。

mod events;
mod record;

pub mod project;
pub mod resolve;
pub mod store;
pub mod template;

pub use bundlepad_settings::{BundlerConfig, ConfigError, FileKind, CONFIG_FILE_NAME};
pub use events::{ChangeEvent, ChangeKind, SubscriptionId};
pub use project::Project;
pub use record::FileRecord;
pub use resolve::{ModuleResolver, Resolution, ResolveError};
pub use store::{ProjectError, ProjectStore};
pub use template::{ProjectTemplate, TemplatePreset};
