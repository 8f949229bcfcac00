//! Settings and provider address pairs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Catalog file used when no path is configured, relative to the working
/// directory.
pub const DEFAULT_CATALOG_FILE: &str = "dns_servers.json";

/// Interface targeted by apply mode when none is given.
pub const DEFAULT_INTERFACE: &str = "Wi-Fi";

/// Primary and secondary DNS addresses of one provider.
///
/// Stored on disk as a two-element array:
///
/// ```
/// use dns_switcher::DnsServers;
///
/// let servers = DnsServers::new("8.8.8.8", "8.8.4.4");
/// let json = serde_json::to_string(&servers).unwrap();
/// assert_eq!(json, r#"["8.8.8.8","8.8.4.4"]"#);
/// ```
///
/// Addresses are opaque strings; no syntax check is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct DnsServers {
    /// Address set as the static primary entry.
    pub primary: String,

    /// Address added at index 2.
    pub secondary: String,
}

impl DnsServers {
    /// Creates a pair from any string-like addresses.
    #[must_use]
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }
}

impl From<(String, String)> for DnsServers {
    fn from((primary, secondary): (String, String)) -> Self {
        Self { primary, secondary }
    }
}

impl From<DnsServers> for (String, String) {
    fn from(servers: DnsServers) -> Self {
        (servers.primary, servers.secondary)
    }
}

/// Runtime settings shared by the dispatcher and the binary.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Location of the provider catalog.
    pub catalog_path: PathBuf,

    /// Interface used by apply mode when none is named.
    pub default_interface: String,
}

impl Settings {
    /// Creates settings with the built-in defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_FILE),
            default_interface: DEFAULT_INTERFACE.to_string(),
        }
    }

    /// Overrides the catalog location.
    #[must_use]
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = path.into();
        self
    }

    /// Overrides the default interface.
    #[must_use]
    pub fn with_default_interface(mut self, interface: impl Into<String>) -> Self {
        self.default_interface = interface.into();
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}
