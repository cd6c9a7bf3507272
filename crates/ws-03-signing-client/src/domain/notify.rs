//! Notification options.
//!
//! Defaults are a plain value handed to whoever shows notifications; each call
//! may override individual fields.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Screen corner or edge where notifications appear.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    #[default]
    TopRight,
    TopCenter,
    BottomLeft,
    BottomRight,
    BottomCenter,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Position::TopLeft => "top-left",
            Position::TopRight => "top-right",
            Position::TopCenter => "top-center",
            Position::BottomLeft => "bottom-left",
            Position::BottomRight => "bottom-right",
            Position::BottomCenter => "bottom-center",
        };
        f.write_str(name)
    }
}

/// Severity of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// How a notification is shown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationOptions {
    pub position: Position,
    /// `None` keeps the notification until dismissed
    pub auto_close: Option<Duration>,
    pub hide_progress_bar: bool,
    pub close_on_click: bool,
    pub pause_on_hover: bool,
    pub draggable: bool,
}

impl Default for NotificationOptions {
    fn default() -> Self {
        Self {
            position: Position::TopRight,
            auto_close: Some(Duration::from_millis(2000)),
            hide_progress_bar: false,
            close_on_click: true,
            pause_on_hover: true,
            draggable: true,
        }
    }
}

impl NotificationOptions {
    /// These options with `overrides` applied on top.
    pub fn merged(&self, overrides: &NotificationOverrides) -> Self {
        Self {
            position: overrides.position.unwrap_or(self.position),
            auto_close: overrides.auto_close.unwrap_or(self.auto_close),
            hide_progress_bar: overrides
                .hide_progress_bar
                .unwrap_or(self.hide_progress_bar),
            close_on_click: overrides.close_on_click.unwrap_or(self.close_on_click),
            pause_on_hover: overrides.pause_on_hover.unwrap_or(self.pause_on_hover),
            draggable: overrides.draggable.unwrap_or(self.draggable),
        }
    }
}

/// Per-call overrides. Unset fields keep the defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationOverrides {
    pub position: Option<Position>,
    /// `Some(None)` disables auto-close for this call
    pub auto_close: Option<Option<Duration>>,
    pub hide_progress_bar: Option<bool>,
    pub close_on_click: Option<bool>,
    pub pause_on_hover: Option<bool>,
    pub draggable: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = NotificationOptions::default();
        assert_eq!(options.position, Position::TopRight);
        assert_eq!(options.auto_close, Some(Duration::from_millis(2000)));
        assert!(!options.hide_progress_bar);
        assert!(options.close_on_click);
        assert!(options.pause_on_hover);
        assert!(options.draggable);
    }

    #[test]
    fn test_empty_overrides_keep_defaults() {
        let defaults = NotificationOptions::default();
        assert_eq!(defaults.merged(&NotificationOverrides::default()), defaults);
    }

    #[test]
    fn test_overrides_win_field_by_field() {
        let overrides = NotificationOverrides {
            position: Some(Position::BottomCenter),
            auto_close: Some(None),
            draggable: Some(false),
            ..Default::default()
        };

        let merged = NotificationOptions::default().merged(&overrides);
        assert_eq!(merged.position, Position::BottomCenter);
        assert_eq!(merged.auto_close, None);
        assert!(!merged.draggable);
        assert!(merged.close_on_click);
    }

    #[test]
    fn test_position_names() {
        assert_eq!(Position::TopRight.to_string(), "top-right");
        assert_eq!(
            serde_json::to_value(Position::BottomLeft).unwrap(),
            "bottom-left"
        );
    }
}
