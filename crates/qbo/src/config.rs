//! Token/credential configuration backed by a `key=value` file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SyncError, SyncResult};

/// OAuth token endpoint; the same host serves sandbox and production.
pub const TOKEN_URL: &str = "https://oauth.platform.intuit.com/oauth2/v1/tokens/bearer";

const SANDBOX_BASE_URL: &str = "https://sandbox-quickbooks.api.intuit.com";
const PRODUCTION_BASE_URL: &str = "https://quickbooks.api.intuit.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QboEnvironment {
    Sandbox,
    Production,
}

impl QboEnvironment {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" => Self::Production,
            _ => Self::Sandbox,
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_BASE_URL,
            Self::Production => PRODUCTION_BASE_URL,
        }
    }
}

/// The `.env`-style file holding tokens and credentials.
///
/// Updates are read-modify-write over the whole file: only lines whose key
/// matches are replaced, everything else (other keys, comments, blank lines)
/// is written back untouched. Keys not present yet are appended.
#[derive(Debug, Clone)]
pub struct EnvStore {
    path: PathBuf,
}

impl EnvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the file into a key/value map. Comments and malformed lines are
    /// skipped, not errors.
    pub fn load(&self) -> SyncResult<HashMap<String, String>> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            SyncError::config(format!("cannot read {}: {e}", self.path.display()))
        })?;

        let mut vars = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                vars.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
        Ok(vars)
    }

    /// Replace the values of the given keys, preserving every other line.
    pub fn update(&self, vars: &[(&str, &str)]) -> SyncResult<()> {
        let text = fs::read_to_string(&self.path).map_err(|e| {
            SyncError::config(format!("cannot read {}: {e}", self.path.display()))
        })?;

        let mut seen = vec![false; vars.len()];
        let mut lines: Vec<String> = text
            .lines()
            .map(|line| {
                for (i, (key, value)) in vars.iter().enumerate() {
                    if line.starts_with(&format!("{key}=")) {
                        seen[i] = true;
                        return format!("{key}={value}");
                    }
                }
                line.to_string()
            })
            .collect();

        for (i, (key, value)) in vars.iter().enumerate() {
            if !seen[i] {
                lines.push(format!("{key}={value}"));
            }
        }

        let mut out = lines.join("\n");
        out.push('\n');

        // Write the whole file to a sibling temp path and rename it over the
        // original, so a crash mid-write cannot leave a truncated file.
        let tmp = {
            let mut name = self.path.as_os_str().to_os_string();
            name.push(".tmp");
            PathBuf::from(name)
        };
        fs::write(&tmp, out).map_err(|e| {
            SyncError::config(format!("cannot write {}: {e}", tmp.display()))
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            SyncError::config(format!("cannot replace {}: {e}", self.path.display()))
        })
    }
}

/// A loaded credential set.
#[derive(Debug, Clone)]
pub struct QboConfig {
    pub access_token: String,
    pub refresh_token: String,
    pub client_id: String,
    pub client_secret: String,
    pub realm_id: String,
    pub environment: QboEnvironment,
}

impl QboConfig {
    pub fn load(store: &EnvStore) -> SyncResult<Self> {
        let vars = store.load()?;
        let get = |key: &str| {
            vars.get(key)
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or_else(|| SyncError::config(format!("missing {key} in {}", store.path().display())))
        };

        Ok(Self {
            access_token: get("ACCESS_TOKEN")?,
            refresh_token: get("REFRESH_TOKEN")?,
            client_id: get("CLIENT_ID")?,
            client_secret: get("CLIENT_SECRET")?,
            realm_id: get("REALM_ID")?,
            environment: QboEnvironment::parse(
                vars.get("QBO_ENV").map(String::as_str).unwrap_or("sandbox"),
            ),
        })
    }

    pub fn base_url(&self) -> &'static str {
        self.environment.base_url()
    }
}
