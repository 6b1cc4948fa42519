//! Toxiproxy fleet integration: wire records and the bulk-replace client.

mod client;
mod types;

pub use client::{ToxiproxyClient, DEFAULT_READY_TIMEOUT};
pub use types::{to_records, ProxyRecord};
