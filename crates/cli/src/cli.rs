use clap::{Arg, ArgAction, ArgMatches, Command, CommandFactory, FromArgMatches, Parser};
use cluster_dns_domain::{ConfigError, FlagSet, ResolverConfig};
use std::ffi::OsString;

pub const APP_NAME: &str = "cluster-dns";

#[derive(Parser, Debug)]
#[command(name = APP_NAME)]
#[command(version)]
#[command(about = "Cluster-local DNS resolver")]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print the effective configuration as JSON
    #[arg(long)]
    pub dump_config: bool,
}

/// Builds the command line from the registered resolver flags.
pub fn command(flags: &FlagSet<'_>) -> Command {
    flags.iter().fold(Cli::command(), |cmd, flag| {
        let value = flag.value();
        let help = if flag.default.is_empty() {
            flag.usage.to_string()
        } else {
            format!("{} [default: {}]", flag.usage, flag.default)
        };

        let mut arg = Arg::new(flag.name)
            .long(flag.name)
            .help(help)
            .value_name(value.type_name())
            .action(ArgAction::Append)
            .hide(flag.deprecated.is_some());

        if value.is_bool_flag() {
            arg = arg
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true");
        }

        cmd.arg(arg)
    })
}

/// Parses `args` into the binary's own options plus the raw resolver flag
/// matches, which are applied later by [`apply_matches`].
pub fn parse_args<I, T>(args: I) -> Result<(Cli, ArgMatches), clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut defaults = ResolverConfig::default();
    let mut flags = FlagSet::new(APP_NAME);
    defaults.add_flags(&mut flags);

    let matches = command(&flags).try_get_matches_from(args)?;
    let cli = Cli::from_arg_matches(&matches)?;
    Ok((cli, matches))
}

/// Feeds every matched flag value into `flags`, in command-line order.
pub fn apply_matches(flags: &mut FlagSet<'_>, matches: &ArgMatches) -> Result<(), ConfigError> {
    let names: Vec<&'static str> = flags.iter().map(|f| f.name).collect();

    let mut occurrences = Vec::new();
    for name in names {
        let (Some(values), Some(indices)) =
            (matches.get_many::<String>(name), matches.indices_of(name))
        else {
            continue;
        };
        occurrences.extend(indices.zip(values).map(|(idx, value)| (idx, name, value.as_str())));
    }
    occurrences.sort_by_key(|(idx, _, _)| *idx);

    for (_, name, value) in occurrences {
        flags.set(name, value)?;
    }
    Ok(())
}
