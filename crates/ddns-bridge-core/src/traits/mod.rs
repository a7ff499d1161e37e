//! Core traits for the DDNS bridge
//!
//! - [`DnsUpdater`]: Converge a DNS record at the provider to a target address

pub mod dns_updater;

pub use dns_updater::{DnsUpdater, UpdateResult};
