use clap::ArgMatches;
use cluster_dns_domain::{FlagSet, ResolverConfig};
use tracing::{info, warn};

use crate::cli::{apply_matches, APP_NAME};

pub fn load_config(matches: &ArgMatches) -> anyhow::Result<ResolverConfig> {
    let mut config = ResolverConfig::default();
    {
        let mut flags = FlagSet::new(APP_NAME);
        config.add_flags(&mut flags);
        apply_matches(&mut flags, matches)?;
    }

    let name_servers = config.name_server_addrs()?;

    if config.config_sources_conflict() {
        warn!(
            federations = config.federations.len(),
            config_map = %config.config_map,
            config_dir = %config.config_dir,
            "More than one configuration source is set; federations, config-map and config-dir are mutually exclusive"
        );
    }

    info!(
        domain = %config.cluster_domain,
        dns_bind = %config.dns_bind_address,
        dns_port = config.dns_port,
        healthz_port = config.healthz_port,
        kube_master_url = %config.control_plane_url,
        name_servers = name_servers.len(),
        "Configuration loaded"
    );

    Ok(config)
}
