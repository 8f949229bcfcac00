//! # dns-switcher
//!
//! Switch the DNS servers of a network interface, either to an explicit
//! pair of addresses or to a provider picked from a small named catalog.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use dns_switcher::{Command, Dispatcher, Netsh, Settings};
//!
//! let dispatcher = Dispatcher::new(Settings::new(), Netsh::new(), Netsh::new());
//! let mut stdin = std::io::stdin().lock();
//! let mut stdout = std::io::stdout().lock();
//!
//! dispatcher.run(&Command::List, &mut stdin, &mut stdout)?;
//! ```
//!
//! ## Provider catalog
//!
//! Providers live in `dns_servers.json` in the working directory (override
//! with `--catalog` or `DNS_SWITCHER_CATALOG`). The file is created with 17
//! well-known providers on first use and is never deleted:
//!
//! ```json
//! {
//!   "google": ["8.8.8.8", "8.8.4.4"],
//!   "cloudfare": ["1.1.1.1", "1.0.0.1"]
//! }
//! ```
//!
//! Concurrent `--add` invocations are not synchronized; one update can be
//! lost.
//!
//! ## Platform
//!
//! Interface listing and DNS changes go through `netsh` and therefore only
//! work on Windows, from an elevated prompt. Failed `netsh` calls during
//! apply are logged, not reported as errors.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod privilege;
pub mod store;
pub mod system;

pub use cli::{Cli, Command};
pub use config::{DnsServers, Settings};
pub use dispatch::{Dispatcher, Outcome};
pub use error::{Result, SwitcherError};
pub use store::{Catalog, ProviderStore, default_catalog};
pub use system::{ApplyReport, CommandOutcome, DnsApplier, InterfaceLister, Netsh};
