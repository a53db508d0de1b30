use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_SERVER: &str = "http://localhost:3000";

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct ConfigFile {
    pub default: Option<Profile>,
    pub profiles: Option<HashMap<String, Profile>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Profile {
    /// Postgres connection string used by `init`, `ping` and `serve`.
    pub connection: Option<String>,
    /// Base URL of a running `vitals serve`.
    pub server: Option<String>,
}

impl Profile {
    /// Merge another profile into this one (other takes priority for set fields).
    pub fn merge(&mut self, other: &Profile) {
        if other.connection.is_some() {
            self.connection = other.connection.clone();
        }
        if other.server.is_some() {
            self.server = other.server.clone();
        }
    }

    /// `--server` wins, then the profile, then localhost.
    pub fn server_url(&self, server_override: Option<&str>) -> String {
        server_override
            .or(self.server.as_deref())
            .unwrap_or(DEFAULT_SERVER)
            .to_string()
    }
}

impl ConfigFile {
    /// Apply `[default]`, then `[profiles.<name>]` unless the name is "default".
    fn apply(&self, profile_name: &str, result: &mut Profile) {
        if let Some(default) = &self.default {
            result.merge(default);
        }
        if profile_name != "default" {
            if let Some(named) = self.profiles.as_ref().and_then(|p| p.get(profile_name)) {
                result.merge(named);
            }
        }
    }
}

/// Walk up from `start` looking for `.vitals/config.toml`.
pub fn find_project_config_from(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(".vitals").join("config.toml");
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Walk up from the current directory looking for `.vitals/config.toml`.
pub fn find_project_config() -> Option<PathBuf> {
    find_project_config_from(&std::env::current_dir().ok()?)
}

/// Global config path: `~/.config/vitals/config.toml`.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("vitals").join("config.toml"))
}

fn load_file(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!("Warning: ignoring {}: {e}", path.display());
            None
        }
    }
}

/// Resolve a profile from explicit files; later files take priority.
pub fn resolve(profile_name: &str, files: &[PathBuf]) -> Profile {
    let mut result = Profile::default();
    for path in files {
        if let Some(cfg) = load_file(path) {
            cfg.apply(profile_name, &mut result);
        }
    }
    result
}

/// Resolve a profile by name, merging global defaults → project defaults → named profile.
pub fn load_config(profile_name: &str) -> Profile {
    let files: Vec<PathBuf> = [global_config_path(), find_project_config()]
        .into_iter()
        .flatten()
        .collect();
    resolve(profile_name, &files)
}

/// Set the `[default] connection` key in a config file, creating it if needed.
pub fn save_default_connection(path: &Path, connection: &str) -> Result<(), String> {
    let mut cfg = if path.exists() {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        toml::from_str::<ConfigFile>(&content)
            .map_err(|e| format!("failed to parse {}: {e}", path.display()))?
    } else {
        ConfigFile::default()
    };

    cfg.default.get_or_insert_with(Profile::default).connection = Some(connection.to_string());

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
    }
    let text = toml::to_string(&cfg).map_err(|e| format!("failed to encode config: {e}"))?;
    std::fs::write(path, text).map_err(|e| format!("failed to write {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, rel: &str, body: &str) -> PathBuf {
        let path = dir.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn project_overrides_global() {
        let tmp = tempfile::tempdir().unwrap();
        let global = write(
            tmp.path(),
            "global.toml",
            "[default]\nconnection = \"postgres://global/vitals\"\nserver = \"http://global:3000\"\n",
        );
        let project = write(
            tmp.path(),
            "project.toml",
            "[default]\nconnection = \"postgres://project/vitals\"\n",
        );

        let p = resolve("default", &[global, project]);
        assert_eq!(p.connection.as_deref(), Some("postgres://project/vitals"));
        assert_eq!(p.server.as_deref(), Some("http://global:3000"));
    }

    #[test]
    fn named_profile_applies_over_default() {
        let tmp = tempfile::tempdir().unwrap();
        let file = write(
            tmp.path(),
            "c.toml",
            "[default]\nserver = \"http://a\"\n\n[profiles.staging]\nserver = \"http://b\"\n",
        );
        assert_eq!(
            resolve("staging", std::slice::from_ref(&file)).server.as_deref(),
            Some("http://b")
        );
        assert_eq!(resolve("default", &[file]).server.as_deref(), Some("http://a"));
    }

    #[test]
    fn server_url_precedence() {
        let p = Profile {
            connection: None,
            server: Some("http://profile:1".into()),
        };
        assert_eq!(p.server_url(Some("http://flag:2")), "http://flag:2");
        assert_eq!(p.server_url(None), "http://profile:1");
        assert_eq!(Profile::default().server_url(None), DEFAULT_SERVER);
    }

    #[test]
    fn finds_config_in_parent_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = write(tmp.path(), ".vitals/config.toml", "");
        let nested = tmp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_project_config_from(&nested), Some(cfg));
    }

    #[test]
    fn save_connection_preserves_other_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let file = write(
            tmp.path(),
            "cfg/config.toml",
            "[default]\nserver = \"http://keep\"\n",
        );
        save_default_connection(&file, "postgres://new/vitals").unwrap();
        let p = resolve("default", &[file]);
        assert_eq!(p.connection.as_deref(), Some("postgres://new/vitals"));
        assert_eq!(p.server.as_deref(), Some("http://keep"));
    }
}
