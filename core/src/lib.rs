//! Read-only network data source for the news backend.
//!
//! # Overview
//! Fetches topics and news resources, and the change lists that tell a
//! client which of them changed after a given version cursor.
//!
//! # Design
//! - `NewsApi` is stateless: it builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network (host-does-IO).
//! - `Transport` executes the round-trip; `ReqwestTransport` is the default.
//! - `HttpDataSource` composes the two behind the `NetworkDataSource` trait
//!   and is what applications hold on to.
//! - `ChangeBatch` turns a change list into refetch/delete sets and the next
//!   cursor. The crate itself never stores a cursor.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod changes;
pub mod client;
pub mod config;
pub mod data_source;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use changes::{latest_version, ChangeBatch};
pub use client::NewsApi;
pub use config::NetworkConfig;
pub use data_source::{HttpDataSource, NetworkDataSource};
pub use error::{ConfigError, NetworkError};
pub use http::{HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
pub use types::{ChangeKind, ChangeListItem, ChangeListVersion, NewsResource, ResponseEnvelope, Topic};
