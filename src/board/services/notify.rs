//! Notification helpers shared by the board services.

use super::BoardConfig;
use crate::board::ports::{Notification, Notifier};
use std::fmt::Display;

/// Sends a success notification unless the configuration silences them.
pub(super) fn announce(notifier: &impl Notifier, config: BoardConfig, title: &str, description: &str) {
    if config.announce_success {
        notifier.notify(Notification::info(title, description));
    }
}

/// Sends an error notification describing `err`.
pub(super) fn report_failure(notifier: &impl Notifier, title: &str, err: &impl Display) {
    notifier.notify(Notification::error(title, err.to_string()));
}
