//! Behaviour switches shared by the board controller and the edit session.

/// Notification behaviour for board services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Whether successful writes send an informational notification.
    pub announce_success: bool,
    /// Whether validation failures are sent to the notifier in addition to
    /// being returned.
    pub notify_validation_errors: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            announce_success: true,
            notify_validation_errors: true,
        }
    }
}

impl BoardConfig {
    /// Creates a configuration that only reports failed service calls.
    ///
    /// Useful for embedding the board where the host shows its own
    /// confirmations and inline validation.
    #[must_use]
    pub const fn quiet() -> Self {
        Self {
            announce_success: false,
            notify_validation_errors: false,
        }
    }
}
