//! Change subscriptions
//!
//! Subscribers are called synchronously after a write, with the new value
//! first and the old value second.

use serde_json::{Map, Value};
use superstore_core::key_path;

/// Called with `(new, old)` for one key; `None` means absent
pub type ChangeCallback = Box<dyn Fn(Option<&Value>, Option<&Value>) + Send + Sync>;

/// Called with `(new, old)` whole documents
pub type AnyChangeCallback = Box<dyn Fn(&Map<String, Value>, &Map<String, Value>) + Send + Sync>;

/// Handle returned by a subscription, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

enum Watch {
    Key {
        segments: Vec<String>,
        callback: ChangeCallback,
    },
    Any(AnyChangeCallback),
}

struct Subscriber {
    id: SubscriptionId,
    watch: Watch,
}

/// Registry of change subscribers for one store
#[derive(Default)]
pub struct Subscribers {
    next_id: u64,
    entries: Vec<Subscriber>,
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.len())
            .finish()
    }
}

impl Subscribers {
    /// Watch the value at a key path
    pub fn add_key(&mut self, segments: Vec<String>, callback: ChangeCallback) -> SubscriptionId {
        self.push(Watch::Key { segments, callback })
    }

    /// Watch the whole document
    pub fn add_any(&mut self, callback: AnyChangeCallback) -> SubscriptionId {
        self.push(Watch::Any(callback))
    }

    /// Remove a subscriber, returning whether it existed
    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|s| s.id != id);
        self.entries.len() != before
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Call every subscriber whose watched value differs between documents
    pub fn notify(&self, old: &Map<String, Value>, new: &Map<String, Value>) {
        if old == new {
            return;
        }

        for subscriber in &self.entries {
            match &subscriber.watch {
                Watch::Key { segments, callback } => {
                    let old_value = key_path::get(old, segments);
                    let new_value = key_path::get(new, segments);
                    if old_value != new_value {
                        callback(new_value, old_value);
                    }
                }
                Watch::Any(callback) => callback(new, old),
            }
        }
    }

    fn push(&mut self, watch: Watch) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push(Subscriber { id, watch });
        id
    }
}
