//! Routes a parsed [`Command`] to the store and system capabilities.
//!
//! All user-facing text goes to the supplied writer; diagnostics go through
//! `tracing`.

use crate::cli::Command;
use crate::config::{DnsServers, Settings};
use crate::error::{Result, SwitcherError};
use crate::privilege::is_elevated;
use crate::store::{Catalog, ProviderStore};
use crate::system::{ApplyReport, DnsApplier, InterfaceLister};
use std::io::{BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

/// What a [`Dispatcher::run`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Interfaces were printed.
    Listed(Vec<String>),
    /// A provider was stored.
    Added,
    /// The requested interface does not exist; nothing was applied.
    InvalidInterface { interface: String },
    /// DNS servers were applied (best effort, see the report).
    Applied {
        interface: String,
        servers: DnsServers,
        report: ApplyReport,
    },
}

/// Runs one command against a provider store and the system capabilities.
///
/// Stateless between calls: the interface list and the catalog are read
/// fresh every time.
pub struct Dispatcher<L, A> {
    settings: Settings,
    store: ProviderStore,
    lister: L,
    applier: A,
}

impl<L: InterfaceLister, A: DnsApplier> Dispatcher<L, A> {
    /// Creates a dispatcher whose store reads `settings.catalog_path`.
    #[must_use]
    pub fn new(settings: Settings, lister: L, applier: A) -> Self {
        let store = ProviderStore::with_path(&settings.catalog_path);
        Self {
            settings,
            store,
            lister,
            applier,
        }
    }

    /// Returns the provider store in use.
    #[must_use]
    pub const fn store(&self) -> &ProviderStore {
        &self.store
    }

    /// Executes `command`, reading the interactive provider choice from
    /// `input` and writing user-facing text to `out`.
    ///
    /// # Errors
    ///
    /// - [`SwitcherError::SystemQuery`] if interfaces cannot be listed.
    /// - [`SwitcherError::CorruptStore`] or [`SwitcherError::Io`] from the
    ///   provider store or the reader/writer.
    /// - [`SwitcherError::UnknownProvider`] if the chosen provider is not in
    ///   the catalog. The DNS settings are left untouched in that case.
    pub fn run<R: BufRead, W: Write>(
        &self,
        command: &Command,
        input: &mut R,
        out: &mut W,
    ) -> Result<Outcome> {
        match command {
            Command::List => self.list(out),
            Command::Add { name, servers } => self.add(name, servers, out),
            Command::Apply { interface, servers } => {
                let interface = interface
                    .as_deref()
                    .unwrap_or(&self.settings.default_interface);
                self.apply(interface, servers.as_ref(), input, out)
            }
        }
    }

    fn list<W: Write>(&self, out: &mut W) -> Result<Outcome> {
        let interfaces = self.lister.list()?;
        writeln!(out, "Available network interfaces:")?;
        write_interfaces(out, &interfaces)?;
        Ok(Outcome::Listed(interfaces))
    }

    fn add<W: Write>(&self, name: &str, servers: &DnsServers, out: &mut W) -> Result<Outcome> {
        self.store.add(name, &servers.primary, &servers.secondary)?;
        writeln!(out, "{name} has been added to available DNS servers")?;
        Ok(Outcome::Added)
    }

    fn apply<R: BufRead, W: Write>(
        &self,
        interface: &str,
        servers: Option<&DnsServers>,
        input: &mut R,
        out: &mut W,
    ) -> Result<Outcome> {
        let interfaces = self.lister.list()?;
        if !interfaces.iter().any(|candidate| candidate == interface) {
            tracing::debug!(interface = %interface, "Requested interface not found");
            writeln!(
                out,
                "{interface} is not a valid interface. Available network interfaces:"
            )?;
            write_interfaces(out, &interfaces)?;
            return Ok(Outcome::InvalidInterface {
                interface: interface.to_string(),
            });
        }

        let servers = match servers {
            Some(servers) => servers.clone(),
            None => self.select_provider(input, out)?,
        };

        if is_elevated() == Some(false) {
            tracing::warn!("Not running with administrative rights; DNS changes may not apply");
        }

        let report = self
            .applier
            .apply(interface, &servers.primary, &servers.secondary);
        for failure in report.failures() {
            tracing::warn!(
                command = %failure.command,
                diagnostic = %failure.diagnostic,
                "DNS configuration step failed"
            );
        }

        writeln!(
            out,
            "DNS server settings for {interface} have been set to primary: {}, secondary: {}",
            servers.primary, servers.secondary
        )?;
        Ok(Outcome::Applied {
            interface: interface.to_string(),
            servers,
            report,
        })
    }

    fn select_provider<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        out: &mut W,
    ) -> Result<DnsServers> {
        let mut catalog = self.store.load()?;
        write_catalog(out, &catalog)?;
        write!(out, "Select a DNS server: ")?;
        out.flush()?;

        let mut line = String::new();
        input.read_line(&mut line)?;
        let name = line.trim_end_matches(['\n', '\r']);

        catalog
            .swap_remove(name)
            .ok_or_else(|| SwitcherError::UnknownProvider {
                name: name.to_string(),
            })
    }
}

/// Maps the result of [`Dispatcher::run`] to the process exit code,
/// writing a one-line `error: ...` to `err` on failure.
///
/// Every outcome, including [`Outcome::InvalidInterface`], exits
/// successfully. `catalog` is named in the hint for permission errors.
pub fn report<W: Write>(result: &Result<Outcome>, catalog: &Path, err: &mut W) -> ExitCode {
    match result {
        Ok(outcome) => {
            if let Outcome::Applied { report, .. } = outcome {
                tracing::info!(success = report.is_success(), "Apply finished");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            // Nothing useful to do if stderr itself is gone.
            let _ = writeln!(err, "error: {e}");
            if e.is_permission_denied() {
                let _ = writeln!(err, "hint: check write access to {}", catalog.display());
            }
            ExitCode::FAILURE
        }
    }
}

fn write_interfaces<W: Write>(out: &mut W, interfaces: &[String]) -> std::io::Result<()> {
    for interface in interfaces {
        writeln!(out, " - {interface}")?;
    }
    Ok(())
}

fn write_catalog<W: Write>(out: &mut W, catalog: &Catalog) -> std::io::Result<()> {
    writeln!(out, "Available DNS servers:")?;
    for (name, servers) in catalog {
        writeln!(
            out,
            " - {name}: primary={}, secondary={}",
            servers.primary, servers.secondary
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_listing_format() {
        let mut catalog = Catalog::new();
        catalog.insert("google".into(), DnsServers::new("8.8.8.8", "8.8.4.4"));
        catalog.insert("quad9".into(), DnsServers::new("9.9.9.9", "149.112.112.112"));

        let mut out = Vec::new();
        write_catalog(&mut out, &catalog).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Available DNS servers:\n \
             - google: primary=8.8.8.8, secondary=8.8.4.4\n \
             - quad9: primary=9.9.9.9, secondary=149.112.112.112\n"
        );
    }

    fn reported(result: &Result<Outcome>) -> (ExitCode, String) {
        let mut err = Vec::new();
        let code = report(result, Path::new("dns_servers.json"), &mut err);
        (code, String::from_utf8(err).unwrap())
    }

    #[test]
    fn invalid_interface_exits_successfully() {
        let (code, err) = reported(&Ok(Outcome::InvalidInterface {
            interface: "Bluetooth".into(),
        }));
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(err.is_empty());
    }

    #[test]
    fn applied_exits_successfully_even_if_steps_failed() {
        let report = ApplyReport {
            steps: vec![crate::system::CommandOutcome {
                command: "netsh".into(),
                success: false,
                diagnostic: "denied".into(),
            }],
        };
        let (code, err) = reported(&Ok(Outcome::Applied {
            interface: "Wi-Fi".into(),
            servers: DnsServers::new("1.1.1.1", "1.0.0.1"),
            report,
        }));
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(err.is_empty());
    }

    #[test]
    fn unknown_provider_exits_with_failure() {
        let (code, err) = reported(&Err(SwitcherError::UnknownProvider {
            name: "nope".into(),
        }));
        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(err, "error: unknown DNS provider: \"nope\"\n");
    }

    #[test]
    fn system_query_exits_with_failure() {
        let (code, err) = reported(&Err(SwitcherError::SystemQuery("netsh missing".into())));
        assert_eq!(code, ExitCode::FAILURE);
        assert!(err.starts_with("error: failed to query network interfaces"));
    }

    #[test]
    fn permission_denied_adds_hint() {
        let (code, err) = reported(&Err(SwitcherError::from(std::io::Error::from(
            std::io::ErrorKind::PermissionDenied,
        ))));
        assert_eq!(code, ExitCode::FAILURE);
        assert!(err.starts_with("error: I/O error"));
        assert!(err.ends_with("hint: check write access to dns_servers.json\n"));
    }

    #[test]
    fn interface_listing_format() {
        let mut out = Vec::new();
        write_interfaces(&mut out, &["Ethernet".to_string(), "Wi-Fi".to_string()]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), " - Ethernet\n - Wi-Fi\n");
    }
}
