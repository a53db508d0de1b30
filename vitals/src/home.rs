use std::fs;
use std::path::{Path, PathBuf};

use crate::session::Session;

const SESSION_FILE: &str = "session.toml";

/// Creates `~/.vitals/` if it doesn't exist, returns its path.
pub fn ensure_home_dir() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or("could not determine home directory")?;
    let vitals_home = home.join(".vitals");
    if !vitals_home.exists() {
        fs::create_dir_all(&vitals_home)
            .map_err(|e| format!("failed to create ~/.vitals: {e}"))?;
    }
    Ok(vitals_home)
}

pub fn session_path(home: &Path) -> PathBuf {
    home.join(SESSION_FILE)
}

/// Reads the current user, if one was set.
pub fn load_session(home: &Path) -> Result<Option<Session>, String> {
    let path = session_path(home);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    toml::from_str(&content)
        .map(Some)
        .map_err(|e| format!("corrupt session file {}: {e}", path.display()))
}

/// Persists the current user, replacing any previous one.
pub fn save_session(home: &Path, session: &Session) -> Result<PathBuf, String> {
    let path = session_path(home);
    let text = toml::to_string(session).map_err(|e| format!("failed to encode session: {e}"))?;
    fs::write(&path, text).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    Ok(path)
}

/// Forgets the current user. Returns whether there was one.
pub fn clear_session(home: &Path) -> Result<bool, String> {
    let path = session_path(home);
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(&path).map_err(|e| format!("failed to remove {}: {e}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_roundtrip_and_clear() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(load_session(tmp.path()).unwrap(), None);

        let s = Session::new("Juan Dela Cruz", 41, "Male").unwrap();
        save_session(tmp.path(), &s).unwrap();
        assert_eq!(load_session(tmp.path()).unwrap(), Some(s));

        assert!(clear_session(tmp.path()).unwrap());
        assert!(!clear_session(tmp.path()).unwrap());
        assert_eq!(load_session(tmp.path()).unwrap(), None);
    }

    #[test]
    fn corrupt_session_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(session_path(tmp.path()), "name = 3").unwrap();
        assert!(load_session(tmp.path()).is_err());
    }
}
