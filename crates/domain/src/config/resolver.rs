use serde::Serialize;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use super::errors::ConfigError;
use super::flags::FlagSet;
use super::values::{ClusterDomainValue, ControlPlaneUrlValue, FederationsValue};

/// Namespace holding cluster system components.
pub const NAMESPACE_SYSTEM: &str = "kube-system";

pub const DEFAULT_DNS_PORT: u16 = 53;

/// Runtime configuration of the cluster DNS resolver.
///
/// Built with defaults at startup and filled in from command-line flags via
/// [`ResolverConfig::add_flags`]; read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ResolverConfig {
    /// Always ends with a `.`.
    pub cluster_domain: String,
    pub control_plane_config_file: String,
    /// Unexpanded; may contain `$VAR` references.
    pub control_plane_url: String,
    #[serde(with = "humantime_serde")]
    pub initial_sync_timeout: Duration,

    pub healthz_port: i32,
    pub dns_bind_address: String,
    pub dns_port: i32,

    /// Cannot be combined with `config_map` or `config_dir`.
    pub federations: HashMap<String, String>,

    pub config_map_namespace: String,
    /// Empty means the config-map source is not used.
    pub config_map: String,

    pub config_dir: String,
    #[serde(with = "humantime_serde")]
    pub config_period: Duration,

    /// Comma separated `ip[:port]` list, see [`ResolverConfig::name_server_addrs`].
    pub name_servers: String,
    pub profiling: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cluster_domain: "cluster.local.".to_string(),
            control_plane_config_file: String::new(),
            control_plane_url: String::new(),
            initial_sync_timeout: Duration::from_secs(60),
            healthz_port: 8081,
            dns_bind_address: "0.0.0.0".to_string(),
            dns_port: DEFAULT_DNS_PORT as i32,
            federations: HashMap::new(),
            config_map_namespace: NAMESPACE_SYSTEM.to_string(),
            config_map: String::new(),
            config_dir: String::new(),
            config_period: Duration::from_secs(10),
            name_servers: String::new(),
            profiling: false,
        }
    }
}

impl ResolverConfig {
    pub fn add_flags<'a>(&'a mut self, fs: &mut FlagSet<'a>) {
        fs.var(
            ClusterDomainValue(&mut self.cluster_domain),
            "domain",
            "domain under which to create names",
        );

        fs.string_var(
            &mut self.name_servers,
            "nameservers",
            "List of ip:port, separated by commas of nameservers to forward queries to. \
             If set, overrides upstream servers taken from the nameserver option in /etc/resolv.conf. \
             Example: 8.8.8.8:53,8.8.4.4 (default port is 53)",
        );

        fs.string_var(
            &mut self.control_plane_config_file,
            "kubecfg-file",
            "Location of kubecfg file for access to kubernetes master service; \
             --kube-master-url overrides the URL part of this; if this is not \
             provided, defaults to service account tokens",
        );
        fs.var(
            ControlPlaneUrlValue(&mut self.control_plane_url),
            "kube-master-url",
            "URL to reach kubernetes master. Env variables in this flag will be expanded.",
        );

        fs.int_var(
            &mut self.healthz_port,
            "healthz-port",
            "port on which to serve a kube-dns HTTP readiness probe.",
        );
        fs.string_var(
            &mut self.dns_bind_address,
            "dns-bind-address",
            "address on which to serve DNS requests.",
        );
        fs.int_var(
            &mut self.dns_port,
            "dns-port",
            "port on which to serve DNS requests.",
        );

        fs.deprecated_var(
            FederationsValue(&mut self.federations),
            "federations",
            "a comma separated list of the federation names and their corresponding \
             domain names to which this cluster belongs. Example: \
             \"myfederation1=example.com,myfederation2=example2.com,myfederation3=example.com\". \
             It is an error to set both the federations and config-map or config-dir flags.",
            "use config-dir instead. Will be removed in future version",
        );

        fs.string_var(
            &mut self.config_map_namespace,
            "config-map-namespace",
            "namespace for the config-map",
        );
        fs.string_var(
            &mut self.config_map,
            "config-map",
            "config-map name. If empty, then the config-map will not used. Cannot be \
             used in conjunction with federations or config-dir flag. config-map contains \
             dynamically adjustable configuration.",
        );
        fs.duration_var(
            &mut self.initial_sync_timeout,
            "initial-sync-timeout",
            "Timeout for initial resource sync.",
        );

        fs.string_var(
            &mut self.config_dir,
            "config-dir",
            "directory to read config values from. Cannot be \
             used in conjunction with federations or config-map flag.",
        );
        fs.duration_var(
            &mut self.config_period,
            "config-period",
            "period at which to check for updates in config-dir.",
        );
        fs.bool_var(
            &mut self.profiling,
            "profiling",
            "specifies whether to enable profiling",
        );
    }

    /// True when more than one of federations, config-map and config-dir is
    /// set. Only reported, never rejected here.
    pub fn config_sources_conflict(&self) -> bool {
        let sources = [
            !self.federations.is_empty(),
            !self.config_map.is_empty(),
            !self.config_dir.is_empty(),
        ];
        sources.iter().filter(|set| **set).count() > 1
    }

    /// Parses `name_servers` into socket addresses.
    ///
    /// Accepted forms per entry:
    ///   "8.8.8.8"        -- IPv4, default port 53
    ///   "8.8.8.8:5353"   -- IPv4 with port
    ///   "2001:db8::1"    -- bare IPv6, default port 53
    ///   "[2001:db8::1]:53" -- bracketed IPv6 with port
    pub fn name_server_addrs(&self) -> Result<Vec<SocketAddr>, ConfigError> {
        self.name_servers
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(parse_name_server)
            .collect()
    }
}

fn parse_name_server(entry: &str) -> Result<SocketAddr, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidNameServer {
        addr: entry.to_string(),
        reason,
    };

    if entry.starts_with('[') || entry.matches(':').count() == 1 {
        return entry.parse().map_err(|e| invalid(format!("{e}")));
    }

    let ip: IpAddr = entry.parse().map_err(|e| invalid(format!("{e}")))?;
    Ok(SocketAddr::new(ip, DEFAULT_DNS_PORT))
}
