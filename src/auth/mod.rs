//! PIN protection for the journal.
//!
//! A PIN is optional. When one is set, its one-way digest is kept in the
//! settings row and a [`Session`] has to be unlocked before journal content
//! is shown or changed. The session is a plain value owned by the caller; it
//! lives as long as the process and is never persisted.
//!
//! PINs read from the terminal or environment are held in
//! [`zeroize::Zeroizing`] buffers so they are wiped once dropped.

use crate::constants;
use crate::db::settings;
use crate::db::Database;
use crate::errors::{AppResult, AuthError};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

/// One-way digest of a PIN, hex encoded.
///
/// # Examples
///
/// ```
/// use jupdate::auth::hash_pin;
///
/// let digest = hash_pin("1234");
/// assert_eq!(digest.len(), 64);
/// assert_eq!(digest, hash_pin("1234"));
/// assert_ne!(digest, hash_pin("4321"));
/// ```
pub fn hash_pin(pin: &str) -> String {
    blake3::hash(pin.as_bytes()).to_hex().to_string()
}

/// Whether a PIN is configured.
pub fn has_pin(db: &Database) -> AppResult<bool> {
    let conn = db.get_conn()?;
    let current = settings::get_settings(&conn)?;
    Ok(current.pin_hash.is_some_and(|hash| !hash.is_empty()))
}

/// Stores the digest of `pin`, keeping the other settings.
///
/// # Errors
///
/// Returns `AuthError::EmptyPin` for an empty PIN.
pub fn set_pin(db: &Database, pin: &str) -> AppResult<()> {
    if pin.is_empty() {
        return Err(AuthError::EmptyPin.into());
    }

    let conn = db.get_conn()?;
    let mut current = settings::get_settings(&conn)?;
    current.pin_hash = Some(hash_pin(pin));
    settings::save_settings(&conn, &current)?;

    info!("PIN set");
    Ok(())
}

/// Checks `pin` against the stored digest. Always false when no PIN is set.
pub fn verify_pin(db: &Database, pin: &str) -> AppResult<bool> {
    let conn = db.get_conn()?;
    let current = settings::get_settings(&conn)?;

    match current.pin_hash.as_deref() {
        Some(stored) if !stored.is_empty() => Ok(hash_pin(pin) == stored),
        _ => Ok(false),
    }
}

/// Removes the PIN.
pub fn clear_pin(db: &Database) -> AppResult<()> {
    let conn = db.get_conn()?;
    settings::clear_pin(&conn)?;
    info!("PIN cleared");
    Ok(())
}

/// Reads a PIN from `JUPDATE_PIN`, or from the terminal when it is unset.
fn read_pin(prompt: &str) -> AppResult<Zeroizing<String>> {
    if let Ok(pin) = std::env::var(constants::ENV_VAR_JUPDATE_PIN) {
        debug!("Using {} for non-interactive unlock", constants::ENV_VAR_JUPDATE_PIN);
        return Ok(Zeroizing::new(pin));
    }

    let pin = rpassword::prompt_password(prompt).map_err(|e| AuthError::PinPrompt(e.to_string()))?;
    Ok(Zeroizing::new(pin))
}

/// Reads the current PIN from `JUPDATE_PIN` or the terminal.
pub fn prompt_for_pin() -> AppResult<Zeroizing<String>> {
    read_pin("PIN: ")
}

/// Reads a new PIN, asking twice when prompting interactively.
///
/// # Errors
///
/// Returns `AuthError::PinMismatch` if the confirmation differs and
/// `AuthError::EmptyPin` for an empty PIN.
pub fn prompt_for_new_pin() -> AppResult<Zeroizing<String>> {
    let pin = if std::env::var(constants::ENV_VAR_JUPDATE_PIN).is_ok() {
        read_pin("")?
    } else {
        let pin = read_pin("New PIN: ")?;
        let confirmation = read_pin("Confirm PIN: ")?;
        if *pin != *confirmation {
            return Err(AuthError::PinMismatch.into());
        }
        pin
    };

    if pin.is_empty() {
        return Err(AuthError::EmptyPin.into());
    }
    Ok(pin)
}

/// Whether this process has proven knowledge of the PIN.
///
/// # Example
///
/// ```no_run
/// use jupdate::auth::Session;
/// use jupdate::db::Database;
/// use std::path::Path;
///
/// let db = Database::open(Path::new("/tmp/journal.db"))?;
/// db.initialize_schema()?;
///
/// let mut session = Session::new();
/// session.unlock_or_prompt(&db)?;
/// session.require_access(&db)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct Session {
    authenticated: bool,
}

impl Session {
    /// A locked session.
    pub fn new() -> Self {
        Session::default()
    }

    /// Verifies `pin` and unlocks the session if it matches.
    ///
    /// Returns whether the session is now unlocked. A wrong PIN leaves the
    /// session as it was.
    pub fn unlock(&mut self, db: &Database, pin: &str) -> AppResult<bool> {
        if verify_pin(db, pin)? {
            self.authenticated = true;
            debug!("Session unlocked");
        } else {
            warn!("PIN verification failed");
        }
        Ok(self.authenticated)
    }

    pub fn lock(&mut self) {
        self.authenticated = false;
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Succeeds when no PIN is configured or the session is unlocked.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Locked` otherwise.
    pub fn require_access(&self, db: &Database) -> AppResult<()> {
        if self.authenticated || !has_pin(db)? {
            Ok(())
        } else {
            Err(AuthError::Locked.into())
        }
    }

    /// Unlocks the session, reading the PIN if one is configured.
    ///
    /// The PIN comes from `JUPDATE_PIN` when set, otherwise from a terminal
    /// prompt.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidPin` when the PIN does not match, or
    /// `AuthError::PinPrompt` when the terminal cannot be read.
    pub fn unlock_or_prompt(&mut self, db: &Database) -> AppResult<()> {
        if self.authenticated || !has_pin(db)? {
            return Ok(());
        }

        let pin = prompt_for_pin()?;
        if self.unlock(db, &pin)? {
            Ok(())
        } else {
            Err(AuthError::InvalidPin.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use serial_test::serial;
    use tempfile::TempDir;

    fn setup_db() -> (TempDir, Database) {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::open(&temp_dir.path().join("auth.db")).unwrap();
        db.initialize_schema().unwrap();
        (temp_dir, db)
    }

    #[test]
    fn test_hash_pin_is_deterministic_hex() {
        let digest = hash_pin("2468");
        assert_eq!(digest, hash_pin("2468"));
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(digest, "2468");
    }

    #[test]
    fn test_no_pin_by_default() {
        let (_dir, db) = setup_db();
        assert!(!has_pin(&db).unwrap());
        assert!(!verify_pin(&db, "").unwrap());
        assert!(!verify_pin(&db, "1234").unwrap());
    }

    #[test]
    fn test_set_and_verify_pin() {
        let (_dir, db) = setup_db();
        set_pin(&db, "1234").unwrap();

        assert!(has_pin(&db).unwrap());
        assert!(verify_pin(&db, "1234").unwrap());
        assert!(!verify_pin(&db, "12345").unwrap());
    }

    #[test]
    fn test_set_pin_rejects_empty() {
        let (_dir, db) = setup_db();
        assert!(matches!(
            set_pin(&db, ""),
            Err(AppError::Auth(AuthError::EmptyPin))
        ));
        assert!(!has_pin(&db).unwrap());
    }

    #[test]
    fn test_set_pin_keeps_theme() {
        let (_dir, db) = setup_db();
        {
            let conn = db.get_conn().unwrap();
            let mut current = settings::get_settings(&conn).unwrap();
            current.theme = settings::Theme::Dark;
            settings::save_settings(&conn, &current).unwrap();
        }

        set_pin(&db, "1234").unwrap();

        let conn = db.get_conn().unwrap();
        assert_eq!(settings::get_settings(&conn).unwrap().theme, settings::Theme::Dark);
    }

    #[test]
    fn test_clear_pin() {
        let (_dir, db) = setup_db();
        set_pin(&db, "1234").unwrap();
        clear_pin(&db).unwrap();

        assert!(!has_pin(&db).unwrap());
        assert!(!verify_pin(&db, "1234").unwrap());
    }

    #[test]
    fn test_session_without_pin_has_access() {
        let (_dir, db) = setup_db();
        let session = Session::new();

        assert!(!session.is_authenticated());
        assert!(session.require_access(&db).is_ok());
    }

    #[test]
    fn test_session_unlock_and_lock() {
        let (_dir, db) = setup_db();
        set_pin(&db, "1234").unwrap();
        let mut session = Session::new();

        assert!(matches!(
            session.require_access(&db),
            Err(AppError::Auth(AuthError::Locked))
        ));

        assert!(!session.unlock(&db, "0000").unwrap());
        assert!(!session.is_authenticated());

        assert!(session.unlock(&db, "1234").unwrap());
        assert!(session.require_access(&db).is_ok());

        session.lock();
        assert!(session.require_access(&db).is_err());
    }

    #[test]
    #[serial]
    fn test_unlock_or_prompt_uses_env_pin() {
        let (_dir, db) = setup_db();
        set_pin(&db, "1234").unwrap();

        std::env::set_var("JUPDATE_PIN", "1234");
        let mut session = Session::new();
        let unlocked = session.unlock_or_prompt(&db);

        std::env::set_var("JUPDATE_PIN", "9999");
        let mut wrong = Session::new();
        let rejected = wrong.unlock_or_prompt(&db);
        std::env::remove_var("JUPDATE_PIN");

        assert!(unlocked.is_ok());
        assert!(session.is_authenticated());
        assert!(matches!(rejected, Err(AppError::Auth(AuthError::InvalidPin))));
    }

    #[test]
    #[serial]
    fn test_prompt_for_new_pin_from_env() {
        std::env::set_var("JUPDATE_PIN", "5678");
        let pin = prompt_for_new_pin();
        std::env::set_var("JUPDATE_PIN", "");
        let empty = prompt_for_new_pin();
        std::env::remove_var("JUPDATE_PIN");

        assert_eq!(pin.unwrap().as_str(), "5678");
        assert!(matches!(empty, Err(AppError::Auth(AuthError::EmptyPin))));
    }
}
