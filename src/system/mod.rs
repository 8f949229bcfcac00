//! Operating-system capabilities: listing interfaces and applying DNS
//! servers to one of them.
//!
//! The dispatcher only sees the [`InterfaceLister`] and [`DnsApplier`]
//! traits. [`Netsh`] is the Windows adapter backing both.

pub mod command;
pub mod netsh;

pub use netsh::{Netsh, parse_interface_table};

use crate::error::Result;

/// Enumerates the host's network interfaces.
pub trait InterfaceLister {
    /// Returns the current interface names, queried fresh on every call.
    ///
    /// # Errors
    ///
    /// Returns [`SwitcherError::SystemQuery`](crate::SwitcherError::SystemQuery)
    /// if the OS facility cannot be run or its output cannot be parsed.
    fn list(&self) -> Result<Vec<String>>;
}

/// Sets the DNS servers of an interface.
pub trait DnsApplier {
    /// Sets `primary` as the static primary server of `interface` and adds
    /// `secondary` at index 2.
    ///
    /// Best effort: failures are reported in the returned [`ApplyReport`],
    /// never as an error, and nothing verifies the settings took effect.
    fn apply(&self, interface: &str, primary: &str, secondary: &str) -> ApplyReport;
}

impl<T: InterfaceLister + ?Sized> InterfaceLister for &T {
    fn list(&self) -> Result<Vec<String>> {
        (**self).list()
    }
}

impl<T: DnsApplier + ?Sized> DnsApplier for &T {
    fn apply(&self, interface: &str, primary: &str, secondary: &str) -> ApplyReport {
        (**self).apply(interface, primary, secondary)
    }
}

/// Result of one OS mutation command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// The command line that was run, for diagnostics.
    pub command: String,
    /// Whether the command ran and exited successfully.
    pub success: bool,
    /// Trimmed stderr, or stdout if stderr was empty, or the spawn error.
    pub diagnostic: String,
}

/// Outcomes of the mutation commands issued by [`DnsApplier::apply`], in
/// the order they ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// One entry per command, in execution order.
    pub steps: Vec<CommandOutcome>,
}

impl ApplyReport {
    /// Returns `true` if every step succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.steps.iter().all(|step| step.success)
    }

    /// Iterates over the steps that failed.
    pub fn failures(&self) -> impl Iterator<Item = &CommandOutcome> {
        self.steps.iter().filter(|step| !step.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(success: bool) -> CommandOutcome {
        CommandOutcome {
            command: "netsh".into(),
            success,
            diagnostic: String::new(),
        }
    }

    #[test]
    fn empty_report_is_success() {
        assert!(ApplyReport::default().is_success());
    }

    #[test]
    fn failures_are_filtered() {
        let report = ApplyReport {
            steps: vec![outcome(true), outcome(false)],
        };
        assert!(!report.is_success());
        assert_eq!(report.failures().count(), 1);
    }
}
