//! The data source callers depend on.
//!
//! # Design
//! `NetworkDataSource` is the stable interface; `HttpDataSource` implements
//! it by pairing the sans-IO `NewsApi` with a `Transport`. Every operation is
//! one build, one round-trip, one parse. The facade holds no state beyond
//! its base URL and transport, so it can be shared across tasks and called
//! concurrently. Dropping a returned future cancels the request.

use std::future::Future;

use crate::client::NewsApi;
use crate::config::NetworkConfig;
use crate::error::NetworkError;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{ChangeListItem, ChangeListVersion, NewsResource, Topic};

/// Read-only access to the news backend.
pub trait NetworkDataSource: Send + Sync {
    /// Topics with the given ids, or every topic when `ids` is `None`.
    /// Unknown ids are simply absent from the result.
    fn get_topics(
        &self,
        ids: Option<&[String]>,
    ) -> impl Future<Output = Result<Vec<Topic>, NetworkError>> + Send;

    /// News resources with the given ids, or all of them when `ids` is `None`.
    fn get_news_resources(
        &self,
        ids: Option<&[String]>,
    ) -> impl Future<Output = Result<Vec<NewsResource>, NetworkError>> + Send;

    /// Topic changes with a version strictly greater than `after`, in version
    /// order. `None` returns the full history.
    fn get_topic_change_list(
        &self,
        after: Option<ChangeListVersion>,
    ) -> impl Future<Output = Result<Vec<ChangeListItem>, NetworkError>> + Send;

    /// News resource changes with a version strictly greater than `after`.
    fn get_news_resource_change_list(
        &self,
        after: Option<ChangeListVersion>,
    ) -> impl Future<Output = Result<Vec<ChangeListItem>, NetworkError>> + Send;
}

/// `NetworkDataSource` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDataSource<T = ReqwestTransport> {
    api: NewsApi,
    transport: T,
}

impl<T: Transport> HttpDataSource<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            api: NewsApi::new(base_url),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }
}

impl HttpDataSource<ReqwestTransport> {
    pub fn from_config(config: &NetworkConfig) -> Result<Self, NetworkError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(&config.base_url, transport))
    }
}

impl<T: Transport> NetworkDataSource for HttpDataSource<T> {
    async fn get_topics(&self, ids: Option<&[String]>) -> Result<Vec<Topic>, NetworkError> {
        let response = self.transport.execute(self.api.build_topics(ids)).await?;
        self.api.parse_topics(response)
    }

    async fn get_news_resources(&self, ids: Option<&[String]>) -> Result<Vec<NewsResource>, NetworkError> {
        let response = self.transport.execute(self.api.build_news_resources(ids)).await?;
        self.api.parse_news_resources(response)
    }

    async fn get_topic_change_list(
        &self,
        after: Option<ChangeListVersion>,
    ) -> Result<Vec<ChangeListItem>, NetworkError> {
        let response = self.transport.execute(self.api.build_topic_change_list(after)).await?;
        self.api.parse_change_list(response)
    }

    async fn get_news_resource_change_list(
        &self,
        after: Option<ChangeListVersion>,
    ) -> Result<Vec<ChangeListItem>, NetworkError> {
        let response = self
            .transport
            .execute(self.api.build_news_resource_change_list(after))
            .await?;
        self.api.parse_change_list(response)
    }
}
