//! Bearer token persistence
//!
//! The token lives in `{config_dir}/rapidbuild/credentials.toml`:
//!
//! ```toml
//! token = "..."
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use rbdash_core::prelude::*;

const CREDENTIALS_FILENAME: &str = "credentials.toml";

#[derive(Debug, Serialize, Deserialize)]
struct CredentialsFile {
    token: String,
}

/// File-backed credential store
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store inside the given rapidbuild config directory
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(CREDENTIALS_FILENAME))
    }

    /// `{config_dir}/rapidbuild/credentials.toml`
    pub fn default_location() -> Result<Self> {
        let dir = dirs::config_dir()
            .ok_or_else(|| Error::credentials("could not determine config directory"))?;
        Ok(Self::in_dir(&dir.join("rapidbuild")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored token, `None` when there is no file or the token is blank
    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let file: CredentialsFile = toml::from_str(&content).map_err(|e| {
            Error::credentials(format!("failed to parse {}: {e}", self.path.display()))
        })?;

        let token = file.token.trim().to_string();
        Ok((!token.is_empty()).then_some(token))
    }

    pub fn save(&self, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::credentials("token must not be empty"));
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string(&CredentialsFile {
            token: token.to_string(),
        })
        .map_err(|e| Error::credentials(format!("failed to serialize credentials: {e}")))?;

        write_owner_only(&self.path, content.as_bytes())?;

        debug!("Stored credentials at {}", self.path.display());
        Ok(())
    }

    /// Remove the stored token; a missing file is not an error
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed credentials at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// The file is 0600 before any token byte reaches it, including when an
/// older file with wider permissions is being replaced.
#[cfg(unix)]
fn write_owner_only(path: &Path, content: &[u8]) -> Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(content)?;
    file.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn write_owner_only(path: &Path, content: &[u8]) -> Result<()> {
    std::fs::write(path, content)?;
    Ok(())
}
