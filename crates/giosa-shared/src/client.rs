//! Settings handed to the browser widgets.
//!
//! The page renders these as `data-*` attributes on `<body>`; the widget
//! script reads them back instead of hard-coding its own timings.

use crate::notification::DEFAULT_TIMEOUT_MS;

/// Quiet period after the last keystroke before a search goes out.
pub const DEBOUNCE_MS: u64 = 300;

/// How long a failed like keeps its error styling.
pub const LIKE_ERROR_MS: u64 = 1_000;

/// Frame swapped with each search response.
pub const RESULTS_FRAME: &str = "posts_list";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSettings {
    pub debounce_ms: u64,
    pub like_error_ms: u64,
    pub toast_timeout_ms: u64,
    pub results_frame: &'static str,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            like_error_ms: LIKE_ERROR_MS,
            toast_timeout_ms: DEFAULT_TIMEOUT_MS,
            results_frame: RESULTS_FRAME,
        }
    }
}

impl ClientSettings {
    /// `(attribute, value)` pairs in the order they are rendered.
    pub fn data_attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("data-debounce-ms", self.debounce_ms.to_string()),
            ("data-like-error-ms", self.like_error_ms.to_string()),
            ("data-toast-timeout-ms", self.toast_timeout_ms.to_string()),
            ("data-results-frame", self.results_frame.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_widget_timings() {
        let settings = ClientSettings::default();
        assert_eq!(settings.debounce_ms, 300);
        assert_eq!(settings.like_error_ms, 1_000);
        assert_eq!(settings.toast_timeout_ms, 5_000);
        assert_eq!(settings.results_frame, "posts_list");
    }

    #[test]
    fn test_data_attributes() {
        let attrs = ClientSettings::default().data_attributes();
        assert_eq!(attrs[0], ("data-debounce-ms", "300".to_string()));
        assert!(attrs.contains(&("data-results-frame", "posts_list".to_string())));
    }
}
