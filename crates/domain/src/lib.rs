//! Cluster DNS Domain Layer
pub mod config;
pub mod env;
pub mod federation;
pub mod validators;

pub use config::{
    ClusterDomainValue, ConfigError, ControlPlaneUrlValue, FederationsValue, FlagSet, FlagValue,
    ResolverConfig,
};
pub use federation::{parse_federations_flag, FederationError};
