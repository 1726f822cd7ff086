pub mod desktop;

pub use desktop::DesktopNotifier;

use crate::config::NotifyConfig;
use anyhow::Result;

/// A target that can be told a run has finished.
pub trait Notifier: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    /// Deliver a notification.
    fn notify(&self, title: &str, message: &str) -> Result<()>;
}

/// Manages all notification targets
#[derive(Default)]
pub struct NotificationManager {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotificationManager {
    pub fn new(config: &NotifyConfig) -> Self {
        let mut manager = Self::default();
        if config.enabled {
            manager.add(Box::new(DesktopNotifier::new()));
        }
        manager
    }

    /// Register an additional target.
    pub fn add(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Notify all configured targets.
    /// This method is fire-and-forget - errors are logged but not propagated.
    pub fn notify_all(&self, title: &str, message: &str) {
        for notifier in &self.notifiers {
            match notifier.notify(title, message) {
                Ok(()) => tracing::debug!("Notification sent via '{}'", notifier.name()),
                Err(e) => tracing::warn!("Failed to notify via '{}': {}", notifier.name(), e),
            }
        }
    }

    /// Check if there are any enabled notification targets
    pub fn has_targets(&self) -> bool {
        !self.notifiers.is_empty()
    }
}
