//! Notifier that writes notifications to the log.

use tracing::{error, info};

use crate::board::ports::{Notification, Notifier, Severity};

/// Forwards notifications to `tracing` events.
///
/// Suitable for headless hosts that have no toast surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let Notification {
            title,
            description,
            severity,
        } = notification;
        match severity {
            Severity::Info => info!(%title, %description, "notification"),
            Severity::Error => error!(%title, %description, "notification"),
        }
    }
}
