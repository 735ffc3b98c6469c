//! Domain DTOs for the news API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates. Every field but
//! `id` is `#[serde(default)]` so a server that omits an optional field still
//! decodes, while a record without an identity is rejected as malformed.

use serde::{Deserialize, Serialize};

/// Monotonic position in a resource type's change list.
pub type ChangeListVersion = u64;

/// A content topic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub followed: bool,
}

/// A single content item (article, video, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewsResource {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub header_image_url: Option<String>,
    /// RFC 3339 timestamp, passed through as received.
    #[serde(default)]
    pub publish_date: String,
    #[serde(default, rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

/// One mutation event in a change list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeListItem {
    pub id: String,
    pub change_list_version: ChangeListVersion,
    pub is_delete: bool,
}

/// What a consumer should do with the resource a change-list entry names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Created or updated: refetch by id.
    Upsert,
    /// Deleted: remove by id.
    Tombstone,
}

impl ChangeListItem {
    pub fn kind(&self) -> ChangeKind {
        if self.is_delete {
            ChangeKind::Tombstone
        } else {
            ChangeKind::Upsert
        }
    }
}

/// `{ "data": T }` wrapper used by the resource endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub data: T,
}

impl<T> ResponseEnvelope<T> {
    pub fn into_inner(self) -> T {
        self.data
    }
}
