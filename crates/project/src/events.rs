use std::fmt;

use crate::project::Project;

/// Handle returned by [`crate::ProjectStore::subscribe`].
/// 訂閱變更通知後取得的識別碼。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// What a committed mutation did to the named file.
/// 已提交變更的種類。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Updated,
    Renamed { from: String },
    Deleted,
    /// The whole project was replaced by its bootstrapping template.
    Reset,
}

/// Notification pushed to observers after each committed mutation.
/// 每次變更提交後推送給觀察者的通知。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Project revision produced by this mutation.
    pub revision: u64,
    /// File the change applies to; the configuration file for `Reset`.
    pub name: String,
    pub kind: ChangeKind,
    pub is_configuration: bool,
}

impl ChangeEvent {
    /// Bundler options must be re-read before the next bundle.
    /// 下次打包前必須重新讀取設定。
    pub fn needs_reconfigure(&self) -> bool {
        self.is_configuration
    }
}

pub(crate) type Observer = Box<dyn FnMut(&ChangeEvent, &Project)>;

/// Observers in subscription order.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_id: u64,
    entries: Vec<(SubscriptionId, Observer)>,
}

impl ObserverRegistry {
    pub(crate) fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, event: &ChangeEvent, project: &Project) {
        for (_, observer) in self.entries.iter_mut() {
            observer(event, project);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.entries.len())
            .finish()
    }
}
