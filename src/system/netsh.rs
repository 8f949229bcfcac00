//! `netsh`-backed interface enumeration and DNS configuration.

use super::command::run_command;
use super::{ApplyReport, CommandOutcome, DnsApplier, InterfaceLister};
use crate::error::{Result, SwitcherError};
use std::process::Output;

const NETSH_COMMAND: &str = "netsh";

/// Lines before the first row of `netsh interface show interface`: a blank
/// line, the column titles and the dashed rule.
const TABLE_HEADER_LINES: usize = 3;

/// Index given to the secondary server by `netsh interface ip add dns`.
const SECONDARY_DNS_INDEX: u8 = 2;

/// Talks to the Windows `netsh` utility.
#[derive(Debug, Clone, Copy, Default)]
pub struct Netsh;

impl Netsh {
    /// Creates the adapter; it holds no state.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InterfaceLister for Netsh {
    fn list(&self) -> Result<Vec<String>> {
        let output = run_command(NETSH_COMMAND, ["interface", "show", "interface"])
            .map_err(|e| SwitcherError::SystemQuery(format!("failed to execute netsh: {e}")))?;

        if !output.status.success() {
            return Err(SwitcherError::SystemQuery(format!(
                "netsh exited with {}: {}",
                output.status,
                diagnostic(&output)
            )));
        }

        parse_interface_table(&String::from_utf8_lossy(&output.stdout))
    }
}

impl DnsApplier for Netsh {
    fn apply(&self, interface: &str, primary: &str, secondary: &str) -> ApplyReport {
        let name = format!("name={interface}");
        let set_primary = [
            "interface",
            "ip",
            "set",
            "dns",
            name.as_str(),
            "static",
            primary,
            "primary",
        ];
        let addr = format!("addr={secondary}");
        let index = format!("index={SECONDARY_DNS_INDEX}");
        let add_secondary = [
            "interface",
            "ip",
            "add",
            "dns",
            name.as_str(),
            addr.as_str(),
            index.as_str(),
        ];

        ApplyReport {
            steps: vec![run_step(&set_primary), run_step(&add_secondary)],
        }
    }
}

/// Extracts interface names from `netsh interface show interface` output.
///
/// Skips the fixed header and the trailing line, ignores blank rows, and
/// takes the first whitespace-delimited token of each remaining row.
///
/// On current Windows builds the first column is "Admin State", so rows
/// yield `Enabled`/`Disabled` rather than the adapter name. The first-token
/// rule is kept as the tool has always applied it; interface validation in
/// apply mode compares against exactly these tokens.
///
/// # Errors
///
/// Returns [`SwitcherError::SystemQuery`] if the output is shorter than the
/// header.
pub fn parse_interface_table(output: &str) -> Result<Vec<String>> {
    let lines: Vec<&str> = output.split('\n').collect();
    if lines.len() <= TABLE_HEADER_LINES {
        return Err(SwitcherError::SystemQuery(format!(
            "unexpected interface table: expected at least {} lines, got {}",
            TABLE_HEADER_LINES + 1,
            lines.len()
        )));
    }

    Ok(lines[TABLE_HEADER_LINES..lines.len() - 1]
        .iter()
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect())
}

fn run_step(args: &[&str]) -> CommandOutcome {
    let command = format!("{NETSH_COMMAND} {}", args.join(" "));

    let outcome = match run_command(NETSH_COMMAND, args) {
        Ok(output) => CommandOutcome {
            success: output.status.success(),
            diagnostic: diagnostic(&output),
            command,
        },
        Err(e) => CommandOutcome {
            success: false,
            diagnostic: format!("failed to execute command: {e}"),
            command,
        },
    };

    tracing::debug!(
        command = %outcome.command,
        success = outcome.success,
        "DNS mutation step finished"
    );
    outcome
}

fn diagnostic(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr.trim().to_string()
    }
}
