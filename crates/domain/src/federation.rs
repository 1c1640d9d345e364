//! Parsing of the `name=domain` federation list.

use std::collections::HashMap;
use thiserror::Error;

use crate::validators::{is_dns1123_label, is_dns1123_subdomain};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FederationError {
    #[error("invalid format for federation {0:?}, expected <name>=<domain>")]
    InvalidFormat(String),

    #[error("{name:?} not a valid federation name: {reasons}")]
    InvalidName { name: String, reasons: String },

    #[error("{domain:?} not a valid domain name: {reasons}")]
    InvalidDomain { domain: String, reasons: String },

    #[error("duplicated name {0:?} in federations")]
    DuplicateName(String),
}

/// Parses a comma separated list of `name=domain` pairs into `federations`.
///
/// Entries are inserted as they are validated, so on error the entries
/// preceding the failing one stay in the map. A name that is already
/// present, whether from this call or an earlier one, is rejected.
pub fn parse_federations_flag(
    raw: &str,
    federations: &mut HashMap<String, String>,
) -> Result<(), FederationError> {
    if raw.trim().is_empty() {
        return Ok(());
    }

    for entry in raw.split(',') {
        let Some((name, domain)) = entry.trim().split_once('=') else {
            return Err(FederationError::InvalidFormat(entry.to_string()));
        };
        let name = name.trim();
        let domain = domain.trim();

        validate_name(name)?;
        validate_domain(domain)?;

        if federations.contains_key(name) {
            return Err(FederationError::DuplicateName(name.to_string()));
        }
        federations.insert(name.to_string(), domain.to_string());
    }

    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), FederationError> {
    let errs = is_dns1123_label(name);
    if !errs.is_empty() {
        return Err(FederationError::InvalidName {
            name: name.to_string(),
            reasons: errs.join("; "),
        });
    }
    Ok(())
}

pub fn validate_domain(domain: &str) -> Result<(), FederationError> {
    let errs = is_dns1123_subdomain(domain);
    if !errs.is_empty() {
        return Err(FederationError::InvalidDomain {
            domain: domain.to_string(),
            reasons: errs.join("; "),
        });
    }
    Ok(())
}
