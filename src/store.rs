//! File-backed provider catalog.
//!
//! The catalog is a single JSON object mapping provider name to a
//! `[primary, secondary]` address pair. It is seeded with
//! [`default_catalog`] the first time it is read and is authoritative from
//! then on.

use crate::config::DnsServers;
use crate::error::{Result, SwitcherError};
use indexmap::IndexMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Provider name to address pair, in file order.
pub type Catalog = IndexMap<String, DnsServers>;

/// Built-in providers written to a fresh catalog.
const DEFAULT_PROVIDERS: [(&str, &str, &str); 17] = [
    ("google", "8.8.8.8", "8.8.4.4"),
    ("cloudfare", "1.1.1.1", "1.0.0.1"),
    ("opendns", "208.67.222.222", "208.67.220.220"),
    ("quad9", "9.9.9.9", "149.112.112.112"),
    ("comodo", "8.26.56.26", "8.20.247.20"),
    ("electro", "78.157.42.101", "78.157.42.100"),
    ("electrodns", "185.51.200.2", "185.51.200.3"),
    ("shecan", "178.22.122.100", "185.51.200.2"),
    ("bertina", "5.144.130.146", "5.144.130.147"),
    ("bamilo", "5.144.129.170", "5.144.129.171"),
    ("faradns", "5.144.129.190", "5.144.129.191"),
    ("dibaj", "31.7.62.66", "31.7.63.66"),
    ("fanava", "178.216.248.246", "185.55.225.25"),
    ("datak", "178.216.248.246", "178.22.123.155"),
    ("parsonline", "91.99.101.101", "91.99.99.99"),
    ("rasanegar", "79.175.176.2", "79.175.176.3"),
    ("shatel", "217.218.155.155", "217.218.147.147"),
];

/// Returns the built-in provider catalog.
#[must_use]
pub fn default_catalog() -> Catalog {
    DEFAULT_PROVIDERS
        .iter()
        .map(|(name, primary, secondary)| {
            ((*name).to_string(), DnsServers::new(*primary, *secondary))
        })
        .collect()
}

/// Reads and writes the provider catalog file.
///
/// # Concurrency
///
/// Writes replace the file atomically, but [`add`](Self::add) is an
/// unlocked read-modify-write: two processes adding at once can lose one
/// of the updates. This is accepted for a single-user tool.
///
/// # Example
///
/// ```rust,ignore
/// use dns_switcher::ProviderStore;
///
/// let store = ProviderStore::with_path("dns_servers.json");
/// store.add("mine", "10.0.0.1", "10.0.0.2")?;
/// let catalog = store.load()?;
/// ```
pub struct ProviderStore {
    path: PathBuf,
}

impl ProviderStore {
    /// Creates a store backed by `path`, usually
    /// [`Settings::catalog_path`](crate::Settings::catalog_path).
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the catalog file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the catalog, seeding the file with [`default_catalog`] if it
    /// does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`SwitcherError::CorruptStore`] if the file exists but is not
    /// a valid catalog, or [`SwitcherError::Io`] if it cannot be read or the
    /// seeded catalog cannot be written.
    pub fn load(&self) -> Result<Catalog> {
        if !self.path.exists() {
            let catalog = default_catalog();
            self.save(&catalog)?;
            tracing::info!(
                path = %self.path.display(),
                providers = catalog.len(),
                "Seeded provider catalog with defaults"
            );
            return Ok(catalog);
        }

        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|source| SwitcherError::CorruptStore {
            path: self.path.clone(),
            source,
        })
    }

    /// Inserts or replaces the provider `name` and persists the catalog.
    ///
    /// Last write wins; addresses are stored as given.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`load`](Self::load) or [`save`](Self::save).
    pub fn add(&self, name: &str, primary: &str, secondary: &str) -> Result<()> {
        let mut catalog = self.load()?;
        let previous = catalog.insert(name.to_string(), DnsServers::new(primary, secondary));
        self.save(&catalog)?;

        tracing::info!(
            provider = %name,
            primary = %primary,
            secondary = %secondary,
            replaced = previous.is_some(),
            "Stored DNS provider"
        );
        Ok(())
    }

    /// Writes the whole catalog, replacing the file via a temporary file in
    /// the same directory and a rename.
    ///
    /// # Errors
    ///
    /// Returns [`SwitcherError::Io`] if the directory cannot be created or
    /// the file cannot be written or renamed.
    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, catalog).map_err(std::io::Error::from)?;
        tmp.write_all(b"\n")?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(path = %self.path.display(), "Wrote provider catalog");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_all_builtins() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 17);
        assert_eq!(catalog["google"], DnsServers::new("8.8.8.8", "8.8.4.4"));
        assert_eq!(catalog.get_index(0).unwrap().0, "google");
        assert_eq!(catalog.get_index(16).unwrap().0, "shatel");
    }

    #[test]
    fn load_seeds_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dns_servers.json");
        let store = ProviderStore::with_path(&path);

        let catalog = store.load().unwrap();
        assert_eq!(catalog, default_catalog());
        assert!(path.exists());

        let on_disk: Catalog =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, catalog);
    }

    #[test]
    fn load_is_stable_after_seeding() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProviderStore::with_path(dir.path().join("c.json"));

        let first = store.load().unwrap();
        let second = store.load().unwrap();
        assert_eq!(first, second);
        assert!(first.keys().eq(second.keys()));
    }

    #[test]
    fn persisted_file_is_authoritative() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.json");
        std::fs::write(&path, r#"{"only": ["10.0.0.1", "10.0.0.2"]}"#).unwrap();

        let catalog = ProviderStore::with_path(&path).load().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog["only"], DnsServers::new("10.0.0.1", "10.0.0.2"));
    }

    #[test]
    fn corrupt_file_is_reported_and_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = ProviderStore::with_path(&path).load().unwrap_err();
        assert!(matches!(err, SwitcherError::CorruptStore { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{not json");
    }

    #[test]
    fn wrong_shape_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.json");
        std::fs::write(&path, r#"{"google": ["8.8.8.8"]}"#).unwrap();

        assert!(matches!(
            ProviderStore::with_path(&path).load(),
            Err(SwitcherError::CorruptStore { .. })
        ));
    }

    #[test]
    fn add_appends_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProviderStore::with_path(dir.path().join("c.json"));

        store.add("x", "1.1.1.1", "2.2.2.2").unwrap();
        let catalog = store.load().unwrap();

        assert_eq!(catalog.len(), 18);
        assert_eq!(catalog["x"], DnsServers::new("1.1.1.1", "2.2.2.2"));
        assert_eq!(catalog.get_index(17).unwrap().0, "x");
        for (name, servers) in default_catalog() {
            assert_eq!(catalog[&name], servers);
        }
    }

    #[test]
    fn add_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProviderStore::with_path(dir.path().join("c.json"));

        store.add("google", "9.9.9.9", "9.9.9.10").unwrap();
        let catalog = store.load().unwrap();

        assert_eq!(catalog.len(), 17);
        assert_eq!(catalog["google"], DnsServers::new("9.9.9.9", "9.9.9.10"));
        assert_eq!(catalog.get_index(0).unwrap().0, "google");
    }

    #[test]
    fn save_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("c.json");
        let store = ProviderStore::with_path(&path);

        store.save(&default_catalog()).unwrap();
        assert!(path.exists());
        assert_eq!(std::fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }
}
