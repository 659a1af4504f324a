//! Cookie session keys and accessors.

use actix_session::{Session, SessionInsertError};
use giosa_shared::{Locale, Theme, Toast};

const DARK_THEME: &str = "dark_theme";
const LOCALE: &str = "locale";
const FLASH: &str = "flash";

pub fn theme(session: &Session) -> Theme {
    Theme::from_dark_flag(session.get::<bool>(DARK_THEME).ok().flatten())
}

pub fn locale(session: &Session) -> Locale {
    let code = session.get::<String>(LOCALE).ok().flatten();
    Locale::from_code(code.as_deref())
}

/// Flip the stored theme flag and return the new theme.
pub fn toggle_theme(session: &Session) -> Result<Theme, SessionInsertError> {
    let dark = session.get::<bool>(DARK_THEME).ok().flatten();
    let next = !dark.unwrap_or(false);
    session.insert(DARK_THEME, next)?;
    Ok(Theme::from_dark_flag(Some(next)))
}

/// English goes back to Spanish; anything else, including no
/// stored locale, becomes English.
pub fn toggle_locale(session: &Session) -> Result<Locale, SessionInsertError> {
    let stored = session.get::<String>(LOCALE).ok().flatten();
    let next = if stored.as_deref() == Some(Locale::En.code()) {
        Locale::Es
    } else {
        Locale::En
    };
    session.insert(LOCALE, next.code())?;
    Ok(next)
}

pub fn set_locale(session: &Session, locale: Locale) -> Result<(), SessionInsertError> {
    session.insert(LOCALE, locale.code())
}

/// Store a toast for the next rendered page.
pub fn flash(session: &Session, toast: &Toast) -> Result<(), SessionInsertError> {
    session.insert(FLASH, toast)
}

/// Remove and return the pending flash, if any.
pub fn take_flash(session: &Session) -> Option<Toast> {
    match session.remove_as::<Toast>(FLASH)? {
        Ok(toast) => Some(toast),
        Err(raw) => {
            tracing::warn!(raw = %raw, "Discarding unreadable flash");
            None
        }
    }
}
