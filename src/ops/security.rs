//! PIN management and theme selection.

use crate::auth;
use crate::db::settings::Theme;
use crate::errors::{AppError, AppResult, AuthError};
use crate::journal::Journal;
use std::io::Write;
use zeroize::Zeroizing;

/// Stores `new_pin` as the journal PIN.
pub fn set_pin<W: Write>(journal: &Journal, new_pin: Zeroizing<String>, out: &mut W) -> AppResult<()> {
    auth::set_pin(journal.database(), &new_pin)?;
    writeln!(out, "PIN set.")?;
    Ok(())
}

/// Removes the journal PIN.
pub fn clear_pin<W: Write>(journal: &Journal, out: &mut W) -> AppResult<()> {
    auth::clear_pin(journal.database())?;
    writeln!(out, "PIN cleared.")?;
    Ok(())
}

/// Reports whether a PIN is configured.
pub fn show_pin_status<W: Write>(journal: &Journal, out: &mut W) -> AppResult<bool> {
    let has_pin = auth::has_pin(journal.database())?;
    writeln!(out, "PIN is {}.", if has_pin { "set" } else { "not set" })?;
    Ok(has_pin)
}

/// Reads a PIN with `read_pin`, checks it and reports the result.
///
/// `read_pin` is only called when a PIN is configured.
///
/// # Errors
///
/// Returns `AuthError::NoPinSet` when there is nothing to check against and
/// `AuthError::InvalidPin` when the PIN does not match, so the process exits
/// non-zero.
pub fn verify_pin<W, F>(journal: &Journal, read_pin: F, out: &mut W) -> AppResult<()>
where
    W: Write,
    F: FnOnce() -> AppResult<Zeroizing<String>>,
{
    if !auth::has_pin(journal.database())? {
        return Err(AuthError::NoPinSet.into());
    }

    let pin = read_pin()?;
    if auth::verify_pin(journal.database(), &pin)? {
        writeln!(out, "PIN is correct.")?;
        Ok(())
    } else {
        Err(AuthError::InvalidPin.into())
    }
}

/// Prints the current theme, or switches to `name` when given.
///
/// # Errors
///
/// Returns `AppError::Config` for an unknown theme name, for custom data that
/// is not valid JSON, and for custom data given with a theme other than
/// `custom`.
pub fn show_or_set_theme<W: Write>(
    journal: &Journal,
    name: Option<&str>,
    custom_data: Option<String>,
    out: &mut W,
) -> AppResult<Theme> {
    let Some(name) = name else {
        let theme = journal.theme();
        writeln!(out, "{}", theme)?;
        return Ok(theme);
    };

    let theme = Theme::parse(name).ok_or_else(|| {
        AppError::Config(format!(
            "Unknown theme '{}': expected light, dark or custom",
            name
        ))
    })?;

    if let Some(data) = &custom_data {
        if theme != Theme::Custom {
            return Err(AppError::Config(format!(
                "Custom theme data only applies to the custom theme, not '{}'",
                theme
            )));
        }
        serde_json::from_str::<serde_json::Value>(data)
            .map_err(|e| AppError::Config(format!("Custom theme data is not valid JSON: {}", e)))?;
    }

    journal.set_theme(theme, custom_data)?;
    writeln!(out, "Theme set to {}.", theme)?;
    Ok(theme)
}
