use thiserror::Error;

use crate::federation::FederationError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Not a valid DNS label {label:?}: {reasons}")]
    InvalidDomainLabel { label: String, reasons: String },

    #[error("failed to parse control-plane URL")]
    UrlParseFailure,

    #[error("invalid control-plane URL specified")]
    UrlIncomplete,

    #[error(transparent)]
    Federation(#[from] FederationError),

    #[error("Invalid nameserver {addr:?}: {reason}")]
    InvalidNameServer { addr: String, reason: String },

    #[error("unknown flag: --{0}")]
    UnknownFlag(String),

    #[error("{0}")]
    InvalidValue(String),

    #[error("invalid argument {value:?} for \"--{flag}\" flag: {source}")]
    InvalidArgument {
        flag: String,
        value: String,
        #[source]
        source: Box<ConfigError>,
    },
}
