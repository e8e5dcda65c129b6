//! Notification system for user-visible feedback
//!
//! Launch outcomes and rescans land here and are shown as an overlay by
//! `ui::notifications`. Background monitors report from worker threads, so
//! the manager is shared behind a mutex through `SharedNotifications`.

use script_bar_sdk::{NotificationLevel, Notifier};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const HISTORY_LIMIT: usize = 50;
const TRANSIENT_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: usize,
    pub created: Instant,
    pub level: NotificationLevel,
    /// Task name, or the action that produced it
    pub title: String,
    pub message: String,
    /// `None` for errors, which stay until dismissed
    pub lifetime: Option<Duration>,
}

impl Notification {
    fn is_live(&self, now: Instant) -> bool {
        self.lifetime
            .map_or(true, |lifetime| now.duration_since(self.created) < lifetime)
    }
}

/// Bounded, oldest-first list of launch and rescan outcomes
#[derive(Debug, Default)]
pub struct NotificationManager {
    entries: VecDeque<Notification>,
    issued: usize,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, title: impl Into<String>, message: impl Into<String>) -> usize {
        self.push(NotificationLevel::Info, title.into(), message.into())
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) -> usize {
        self.push(NotificationLevel::Error, title.into(), message.into())
    }

    pub fn push(&mut self, level: NotificationLevel, title: String, message: String) -> usize {
        let id = self.issued;
        self.issued += 1;

        let lifetime = match level {
            NotificationLevel::Error => None,
            NotificationLevel::Info | NotificationLevel::Warning => Some(TRANSIENT_LIFETIME),
        };
        self.entries.push_back(Notification {
            id,
            created: Instant::now(),
            level,
            title,
            message,
            lifetime,
        });

        while self.entries.len() > HISTORY_LIMIT {
            self.entries.pop_front();
        }
        id
    }

    pub fn dismiss(&mut self, id: usize) {
        self.entries.retain(|entry| entry.id != id);
    }

    /// Dismiss every notification, including sticky errors
    pub fn dismiss_all(&mut self) {
        self.entries.clear();
    }

    /// Notifications still on screen, newest last
    pub fn get_active(&self) -> Vec<&Notification> {
        let now = Instant::now();
        self.entries.iter().filter(|entry| entry.is_live(now)).collect()
    }

    pub fn cleanup_expired(&mut self) {
        let now = Instant::now();
        self.entries.retain(|entry| entry.is_live(now));
    }
}

/// `Notifier` handle onto a shared `NotificationManager`
#[derive(Clone, Default)]
pub struct SharedNotifications(Arc<Mutex<NotificationManager>>);

impl SharedNotifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with the manager locked. A poisoned lock is recovered, since
    /// the manager holds no invariants a panic could break.
    pub fn with<R>(&self, f: impl FnOnce(&mut NotificationManager) -> R) -> R {
        let mut guard = self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl Notifier for SharedNotifications {
    fn notify(&self, level: NotificationLevel, task: &str, message: &str) {
        self.with(|manager| manager.push(level, task.to_string(), message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_are_sticky() {
        let mut manager = NotificationManager::new();
        manager.error("dev", "Failed to run \"dev\": not found");
        manager.info("build", "done");

        let active = manager.get_active();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].lifetime, None);
        assert_eq!(active[1].lifetime, Some(TRANSIENT_LIFETIME));
    }

    #[test]
    fn test_bounded_history() {
        let mut manager = NotificationManager::new();
        for i in 0..60 {
            manager.push(NotificationLevel::Warning, format!("t{}", i), "exit".to_string());
        }
        let active = manager.get_active();
        assert_eq!(active.len(), 50);
        assert_eq!(active[0].title, "t10");
    }

    #[test]
    fn test_shared_notifier_records() {
        let shared = SharedNotifications::new();
        let notifier: Arc<dyn Notifier> = Arc::new(shared.clone());
        notifier.warn("dev", "Script \"dev\" exited with code 1.");

        shared.with(|manager| {
            let active = manager.get_active();
            assert_eq!(active.len(), 1);
            assert_eq!(active[0].level, NotificationLevel::Warning);
            assert_eq!(active[0].title, "dev");
        });

        let id = shared.with(|m| m.get_active()[0].id);
        shared.with(|m| m.dismiss(id));
        assert!(shared.with(|m| m.get_active().is_empty()));
    }
}
