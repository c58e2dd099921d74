//! Reads the Storm Glass API key from a local file.

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("could not read API key file `{path}`: {source}")]
    Unreadable {
        path: String,
        source: std::io::Error,
    },

    #[error("API key file `{path}` is empty")]
    Empty { path: String },
}

/// Read and trim the API key. Missing or empty files are fatal: no request
/// may be attempted without a credential.
pub fn read_api_key(path: &Path) -> Result<String, CredentialError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CredentialError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;

    let key = contents.trim().to_string();
    if key.is_empty() {
        return Err(CredentialError::Empty {
            path: path.display().to_string(),
        });
    }

    Ok(key)
}

// -- Tests -------------------------------------------------------------------
