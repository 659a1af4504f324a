//! Targeted page updates: each fragment tells the client which element
//! to touch and with what markup.

use serde::{Deserialize, Serialize};

/// Media type of a response made only of stream fragments.
pub const STREAM_CONTENT_TYPE: &str = "text/vnd.turbo-stream.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamAction {
    Append,
    Prepend,
    /// Swap the target element itself.
    Replace,
    /// Swap the target's children.
    Update,
    Remove,
}

impl StreamAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamAction::Append => "append",
            StreamAction::Prepend => "prepend",
            StreamAction::Replace => "replace",
            StreamAction::Update => "update",
            StreamAction::Remove => "remove",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamFragment {
    pub action: StreamAction,
    pub target: String,
    pub html: Option<String>,
}

impl StreamFragment {
    pub fn new(action: StreamAction, target: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            action,
            target: target.into(),
            html: Some(html.into()),
        }
    }

    pub fn append(target: impl Into<String>, html: impl Into<String>) -> Self {
        Self::new(StreamAction::Append, target, html)
    }

    pub fn replace(target: impl Into<String>, html: impl Into<String>) -> Self {
        Self::new(StreamAction::Replace, target, html)
    }

    pub fn update(target: impl Into<String>, html: impl Into<String>) -> Self {
        Self::new(StreamAction::Update, target, html)
    }

    pub fn remove(target: impl Into<String>) -> Self {
        Self {
            action: StreamAction::Remove,
            target: target.into(),
            html: None,
        }
    }

    /// `html` is trusted markup; only the target is escaped.
    pub fn render(&self) -> String {
        let target = escape_attr(&self.target);
        match &self.html {
            Some(html) if self.action != StreamAction::Remove => format!(
                r#"<turbo-stream action="{}" target="{}"><template>{}</template></turbo-stream>"#,
                self.action.as_str(),
                target,
                html
            ),
            _ => format!(
                r#"<turbo-stream action="{}" target="{}"></turbo-stream>"#,
                self.action.as_str(),
                target
            ),
        }
    }
}

/// Concatenate fragments into one response body.
pub fn render_all(fragments: &[StreamFragment]) -> String {
    fragments
        .iter()
        .map(StreamFragment::render)
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
