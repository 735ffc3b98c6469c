//! Stateless HTTP request builder and response parser for the news API.
//!
//! # Design
//! `NewsApi` holds only a `base_url` and carries no mutable state between
//! calls. Each fetch is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the request shape
//! and the envelope handling deterministic and free of I/O.

use serde::de::DeserializeOwned;

use crate::error::NetworkError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{ChangeListItem, ChangeListVersion, NewsResource, ResponseEnvelope, Topic};

/// Stateless request builder and response parser for the news API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct NewsApi {
    base_url: String,
}

impl NewsApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /topics`, one `id` parameter per requested id. `None` fetches all.
    pub fn build_topics(&self, ids: Option<&[String]>) -> HttpRequest {
        self.build_by_ids("topics", ids)
    }

    /// `GET /newsresources`, one `id` parameter per requested id. `None` fetches all.
    pub fn build_news_resources(&self, ids: Option<&[String]>) -> HttpRequest {
        self.build_by_ids("newsresources", ids)
    }

    /// `GET /changelists/topics`, with `after` only when a cursor is present.
    pub fn build_topic_change_list(&self, after: Option<ChangeListVersion>) -> HttpRequest {
        self.build_after("changelists/topics", after)
    }

    /// `GET /changelists/newsresources`, with `after` only when a cursor is present.
    pub fn build_news_resource_change_list(&self, after: Option<ChangeListVersion>) -> HttpRequest {
        self.build_after("changelists/newsresources", after)
    }

    pub fn parse_topics(&self, response: HttpResponse) -> Result<Vec<Topic>, NetworkError> {
        parse_enveloped(response)
    }

    pub fn parse_news_resources(&self, response: HttpResponse) -> Result<Vec<NewsResource>, NetworkError> {
        parse_enveloped(response)
    }

    /// Parses either change-list endpoint. The body is a bare array, kept in
    /// server order.
    pub fn parse_change_list(&self, response: HttpResponse) -> Result<Vec<ChangeListItem>, NetworkError> {
        check_status(&response)?;
        Ok(serde_json::from_str(&response.body)?)
    }

    fn build_by_ids(&self, resource: &str, ids: Option<&[String]>) -> HttpRequest {
        let request = HttpRequest::get(format!("{}/{resource}", self.base_url));
        ids.into_iter()
            .flatten()
            .fold(request, |request, id| request.with_query("id", id))
    }

    fn build_after(&self, resource: &str, after: Option<ChangeListVersion>) -> HttpRequest {
        let request = HttpRequest::get(format!("{}/{resource}", self.base_url));
        match after {
            Some(after) => request.with_query("after", after),
            None => request,
        }
    }
}

fn parse_enveloped<T: DeserializeOwned>(response: HttpResponse) -> Result<T, NetworkError> {
    check_status(&response)?;
    let envelope: ResponseEnvelope<T> = serde_json::from_str(&response.body)?;
    Ok(envelope.into_inner())
}

/// Map non-2xx status codes to `NetworkError::HttpStatus`.
fn check_status(response: &HttpResponse) -> Result<(), NetworkError> {
    if response.is_success() {
        return Ok(());
    }
    Err(NetworkError::HttpStatus {
        status: response.status,
        body: response.body.clone(),
    })
}
