//! Notifier that writes through `tracing`.

use crate::domain::notify::{NotificationLevel, NotificationOptions};
use crate::ports::outbound::Notifier;
use tracing::{error, info, warn};

/// Emits every notification as a log event.
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, level: NotificationLevel, text: &str, options: &NotificationOptions) {
        let position = options.position.to_string();
        let auto_close_ms = options.auto_close.map(|d| d.as_millis() as u64);

        match level {
            NotificationLevel::Success | NotificationLevel::Info => {
                info!(%position, ?auto_close_ms, ?level, "{text}")
            }
            NotificationLevel::Warning => warn!(%position, ?auto_close_ms, "{text}"),
            NotificationLevel::Error => error!(%position, ?auto_close_ms, "{text}"),
        }
    }
}
