//! # Giosa Shared
//!
//! Types shared by the server and the settings it hands to the browser
//! widgets.

pub mod client;
pub mod dto;
pub mod notification;
pub mod preferences;
pub mod response;
pub mod stream;

pub use client::ClientSettings;
pub use notification::{Toast, ToastKind};
pub use preferences::{Locale, Theme};
pub use response::ErrorResponse;
pub use stream::{StreamAction, StreamFragment};
