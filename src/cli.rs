//! Command line surface.

use crate::config::{DEFAULT_CATALOG_FILE, DnsServers, Settings};
use clap::Parser;
use std::path::PathBuf;

/// Set DNS servers for a network interface.
#[derive(Debug, Parser)]
#[command(name = "dns-switcher", version)]
pub struct Cli {
    /// Name of the network interface (default: Wi-Fi)
    pub interface: Option<String>,

    /// List available network interfaces and exit
    #[arg(long)]
    pub list: bool,

    /// Set the primary and secondary DNS server addresses for the interface
    #[arg(long, num_args = 2, value_names = ["PRIMARY_DNS", "SECONDARY_DNS"])]
    pub dns: Option<Vec<String>>,

    /// Add a DNS server to the available list
    #[arg(long, num_args = 3, value_names = ["NAME", "PRIMARY_DNS", "SECONDARY_DNS"])]
    pub add: Option<Vec<String>>,

    /// Provider catalog file
    #[arg(long, env = "DNS_SWITCHER_CATALOG", default_value = DEFAULT_CATALOG_FILE)]
    pub catalog: PathBuf,

    /// Log level (trace, debug, info, warn, error); `RUST_LOG` takes precedence
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// The mode selected by the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the available interfaces.
    List,
    /// Store a provider in the catalog.
    Add {
        /// Catalog key; an existing entry is replaced.
        name: String,
        servers: DnsServers,
    },
    /// Configure an interface, from explicit servers or an interactively
    /// chosen provider.
    Apply {
        /// Target interface; `None` uses the configured default.
        interface: Option<String>,
        /// Explicit servers; `None` prompts for a catalog provider.
        servers: Option<DnsServers>,
    },
}

impl Cli {
    /// Resolves the flags into a single [`Command`].
    ///
    /// `--list` wins over `--add`, which wins over apply mode.
    #[must_use]
    pub fn mode(&self) -> Command {
        if self.list {
            return Command::List;
        }

        if let Some([name, primary, secondary]) = self.add.as_deref() {
            return Command::Add {
                name: name.clone(),
                servers: DnsServers::new(primary.as_str(), secondary.as_str()),
            };
        }

        let servers = match self.dns.as_deref() {
            Some([primary, secondary]) => {
                Some(DnsServers::new(primary.as_str(), secondary.as_str()))
            }
            _ => None,
        };
        Command::Apply {
            interface: self.interface.clone(),
            servers,
        }
    }

    /// Builds runtime settings from the flags.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings::new().with_catalog_path(&self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("dns-switcher").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn bare_invocation_is_interactive_apply() {
        assert_eq!(
            parse(&[]).mode(),
            Command::Apply {
                interface: None,
                servers: None
            }
        );
    }

    #[test]
    fn explicit_dns() {
        assert_eq!(
            parse(&["Ethernet", "--dns", "8.8.8.8", "8.8.4.4"]).mode(),
            Command::Apply {
                interface: Some("Ethernet".into()),
                servers: Some(DnsServers::new("8.8.8.8", "8.8.4.4")),
            }
        );
    }

    #[test]
    fn list_takes_precedence() {
        let cli = parse(&["--add", "x", "1.1.1.1", "2.2.2.2", "--list", "--dns", "a", "b"]);
        assert_eq!(cli.mode(), Command::List);
    }

    #[test]
    fn add_beats_apply() {
        let cli = parse(&["Ethernet", "--dns", "a", "b", "--add", "x", "1.1.1.1", "2.2.2.2"]);
        assert_eq!(
            cli.mode(),
            Command::Add {
                name: "x".into(),
                servers: DnsServers::new("1.1.1.1", "2.2.2.2"),
            }
        );
    }

    #[test]
    fn dns_requires_two_values() {
        assert!(Cli::try_parse_from(["dns-switcher", "--dns", "8.8.8.8"]).is_err());
    }

    #[test]
    fn add_requires_three_values() {
        assert!(Cli::try_parse_from(["dns-switcher", "--add", "x", "1.1.1.1"]).is_err());
    }

    #[test]
    fn catalog_flag_sets_path() {
        let cli = parse(&["--catalog", "/tmp/other.json", "--list"]);
        assert_eq!(
            cli.settings().catalog_path,
            PathBuf::from("/tmp/other.json")
        );
    }

    #[test]
    fn clap_definition_is_valid() {
        use clap::CommandFactory;
        <Cli as CommandFactory>::command().debug_assert();
    }
}
