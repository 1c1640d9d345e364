//! Configuration module for the cluster DNS resolver
//!
//! - `resolver`: the runtime configuration record and its flag bindings
//! - `flags`: flag registry and scalar flag values
//! - `values`: validating values for domain, control-plane URL and federations
//! - `errors`: configuration errors

pub mod errors;
pub mod flags;
pub mod resolver;
pub mod values;

pub use errors::ConfigError;
pub use flags::{BoolValue, DurationValue, Flag, FlagSet, FlagValue, IntValue, StringValue};
pub use resolver::{ResolverConfig, DEFAULT_DNS_PORT, NAMESPACE_SYSTEM};
pub use values::{ClusterDomainValue, ControlPlaneUrlValue, FederationsValue};
