//! Toast notifications and their per-theme styling.

use serde::{Deserialize, Serialize};

use crate::preferences::Theme;

/// Auto-dismiss delay when a toast does not set its own.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Closed set of toast categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
    Comment,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
            ToastKind::Comment => "comment",
        }
    }

    /// Unknown names fall back to `Info`.
    pub fn parse_lenient(name: &str) -> Self {
        match name {
            "success" | "notice" => ToastKind::Success,
            "error" | "alert" => ToastKind::Error,
            "warning" => ToastKind::Warning,
            "comment" => ToastKind::Comment,
            _ => ToastKind::Info,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "✅",
            ToastKind::Error => "⛔",
            ToastKind::Warning => "⚠️",
            ToastKind::Info => "ℹ️",
            ToastKind::Comment => "💬",
        }
    }

    fn palette(&self) -> (&'static str, &'static str, &'static str) {
        // (light border, dark border, icon colour)
        match self {
            ToastKind::Success => ("border-green-200", "border-green-700", "text-green-400"),
            ToastKind::Error => ("border-red-200", "border-red-700", "text-red-400"),
            ToastKind::Warning => ("border-yellow-200", "border-yellow-700", "text-yellow-400"),
            ToastKind::Info => ("border-blue-200", "border-blue-700", "text-blue-400"),
            ToastKind::Comment => ("border-indigo-200", "border-indigo-700", "text-indigo-400"),
        }
    }
}

/// Resolved presentation of a toast for one theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastStyle {
    pub panel: &'static str,
    pub border: &'static str,
    pub icon: &'static str,
    pub icon_color: &'static str,
    pub title_color: &'static str,
    pub text_color: &'static str,
}

/// A notification to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: Option<String>,
    pub message: String,
    /// Overrides [`DEFAULT_TIMEOUT_MS`].
    pub duration_ms: Option<u64>,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: None,
            message: message.into(),
            duration_ms: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn style(&self, theme: Theme) -> ToastStyle {
        let (light_border, dark_border, icon_color) = self.kind.palette();
        ToastStyle {
            panel: theme.pick("bg-white", "bg-gray-800"),
            border: theme.pick(light_border, dark_border),
            icon: self.kind.icon(),
            icon_color,
            title_color: theme.pick("text-gray-900", "text-white"),
            text_color: theme.pick("text-gray-700", "text-gray-300"),
        }
    }
}
