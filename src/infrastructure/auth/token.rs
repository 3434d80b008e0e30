//! Token generation and the on-disk token file.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

/// Host that keeps the API local-only and therefore open by default.
const LOOPBACK_HOST: &str = "127.0.0.1";

/// Whether requests must carry the bearer token.
///
/// An explicit `configured` value wins; otherwise auth is on for any bind
/// address other than loopback, unless `no_auth` was passed.
pub fn auth_required(host: &str, no_auth: bool, configured: Option<bool>) -> bool {
    configured.unwrap_or(host != LOOPBACK_HOST && !no_auth)
}

/// A fresh random token (64 hex characters).
pub fn generate_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// Read the token stored at `path`, creating one when the file is missing
/// or blank. New files are written with owner-only permissions.
pub fn ensure_token(path: &Path) -> Result<String> {
    if path.is_file() {
        let existing = fs::read_to_string(path)
            .with_context(|| format!("Failed to read token file {}", path.display()))?;
        let existing = existing.trim();
        if !existing.is_empty() {
            return Ok(existing.to_string());
        }
    }

    let token = generate_token();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, format!("{token}\n"))
        .with_context(|| format!("Failed to write token file {}", path.display()))?;
    restrict_permissions(path)?;

    info!(path = %path.display(), "generated auth token");
    Ok(token)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .with_context(|| format!("Failed to restrict permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
