//! Validation of container and namespace identifiers.
//!
//! Identifiers end up as file names under the state root, so they are checked
//! before any path is built from them.

use crate::error::{Error, Result};

/// Maximum allowed length for identifiers.
pub const MAX_ID_LENGTH: usize = 76;

/// Validates an identifier.
///
/// An identifier is one or more alphanumeric runs joined by single `.`, `_`
/// or `-` separators, at most [`MAX_ID_LENGTH`] characters long.
///
/// # Examples
///
/// ```
/// use ctr_checkpoint::validation::validate_id;
///
/// assert!(validate_id("redis-7").is_ok());
/// assert!(validate_id("k8s.io").is_ok());
/// assert!(validate_id("").is_err());
/// assert!(validate_id("../etc/passwd").is_err());
/// ```
pub fn validate_id(id: &str) -> Result<()> {
    let invalid = |reason: String| Error::InvalidId {
        id: id.to_string(),
        reason,
    };

    if id.is_empty() {
        return Err(invalid("identifier must not be empty".into()));
    }

    if id.len() > MAX_ID_LENGTH {
        return Err(invalid(format!(
            "identifier too long: {} characters (max {MAX_ID_LENGTH})",
            id.len()
        )));
    }

    let well_formed = id
        .split(['.', '_', '-'])
        .all(|run| !run.is_empty() && run.chars().all(|c| c.is_ascii_alphanumeric()));
    if !well_formed {
        return Err(invalid(
            "use alphanumeric characters separated by single '.', '_' or '-'".into(),
        ));
    }

    Ok(())
}

/// Clap value parser for identifier arguments.
pub fn clap_id_validator(s: &str) -> Result<String, String> {
    validate_id(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}
