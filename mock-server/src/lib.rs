use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub short_description: String,
    pub long_description: String,
    pub url: String,
    pub image_url: String,
    pub followed: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResource {
    pub id: String,
    pub title: String,
    pub content: String,
    pub url: String,
    pub header_image_url: Option<String>,
    pub publish_date: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub topics: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeListEntry {
    pub id: String,
    pub change_list_version: u64,
    pub is_delete: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Deserialize)]
pub struct ChangeListQuery {
    pub after: Option<u64>,
}

/// In-memory backend state.
///
/// Each change log holds at most one entry per id, the latest, so the log
/// stays sorted by version and a client starting from scratch replays only
/// what is current.
#[derive(Debug, Default)]
pub struct Catalog {
    topics: BTreeMap<String, Topic>,
    news_resources: BTreeMap<String, NewsResource>,
    topic_changes: Vec<ChangeListEntry>,
    news_resource_changes: Vec<ChangeListEntry>,
    version: u64,
}

impl Catalog {
    fn record(log: &mut Vec<ChangeListEntry>, version: &mut u64, id: &str, is_delete: bool) {
        *version += 1;
        log.retain(|entry| entry.id != id);
        log.push(ChangeListEntry {
            id: id.to_string(),
            change_list_version: *version,
            is_delete,
        });
    }
}

/// Shared handle to a `Catalog`. Mutations append to the change logs.
#[derive(Clone, Debug, Default)]
pub struct Store(Arc<RwLock<Catalog>>);

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// A small catalog for manual testing.
    pub async fn seeded() -> Self {
        let store = Self::new();
        for (id, name) in [("1", "Headlines"), ("2", "UI"), ("3", "Testing")] {
            store
                .upsert_topic(Topic {
                    id: id.to_string(),
                    name: name.to_string(),
                    short_description: format!("News about {name}"),
                    url: format!("https://news.example.com/topics/{id}"),
                    ..Default::default()
                })
                .await;
        }
        for (id, title, topics) in [
            ("101", "Layouts in depth", vec!["2"]),
            ("102", "Flaky test triage", vec!["3"]),
            ("103", "Release notes", vec!["1", "2"]),
        ] {
            store
                .upsert_news_resource(NewsResource {
                    id: id.to_string(),
                    title: title.to_string(),
                    content: format!("{title}."),
                    url: format!("https://news.example.com/articles/{id}"),
                    publish_date: "2024-05-01T09:00:00Z".to_string(),
                    resource_type: "Article".to_string(),
                    topics: topics.into_iter().map(String::from).collect(),
                    ..Default::default()
                })
                .await;
        }
        store
    }

    pub async fn upsert_topic(&self, topic: Topic) -> u64 {
        let mut catalog = self.0.write().await;
        let catalog = &mut *catalog;
        Catalog::record(&mut catalog.topic_changes, &mut catalog.version, &topic.id, false);
        catalog.topics.insert(topic.id.clone(), topic);
        catalog.version
    }

    pub async fn delete_topic(&self, id: &str) -> u64 {
        let mut catalog = self.0.write().await;
        let catalog = &mut *catalog;
        Catalog::record(&mut catalog.topic_changes, &mut catalog.version, id, true);
        catalog.topics.remove(id);
        catalog.version
    }

    pub async fn upsert_news_resource(&self, resource: NewsResource) -> u64 {
        let mut catalog = self.0.write().await;
        let catalog = &mut *catalog;
        Catalog::record(
            &mut catalog.news_resource_changes,
            &mut catalog.version,
            &resource.id,
            false,
        );
        catalog.news_resources.insert(resource.id.clone(), resource);
        catalog.version
    }

    pub async fn delete_news_resource(&self, id: &str) -> u64 {
        let mut catalog = self.0.write().await;
        let catalog = &mut *catalog;
        Catalog::record(&mut catalog.news_resource_changes, &mut catalog.version, id, true);
        catalog.news_resources.remove(id);
        catalog.version
    }
}

pub fn app() -> Router {
    app_with(Store::new())
}

pub fn app_with(store: Store) -> Router {
    Router::new()
        .route("/topics", get(list_topics))
        .route("/newsresources", get(list_news_resources))
        .route("/changelists/topics", get(topic_change_list))
        .route("/changelists/newsresources", get(news_resource_change_list))
        .with_state(store)
}

pub async fn serve(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(store)).await
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, Store::seeded().await).await
}

/// Collects repeated `id` parameters; `None` when there are none.
fn requested_ids(params: &[(String, String)]) -> Option<HashSet<&str>> {
    let ids: HashSet<&str> = params
        .iter()
        .filter(|(key, _)| key == "id")
        .map(|(_, value)| value.as_str())
        .collect();
    (!ids.is_empty()).then_some(ids)
}

fn select<T: Clone>(items: &BTreeMap<String, T>, params: &[(String, String)]) -> Vec<T> {
    match requested_ids(params) {
        Some(ids) => items
            .iter()
            .filter(|(id, _)| ids.contains(id.as_str()))
            .map(|(_, item)| item.clone())
            .collect(),
        None => items.values().cloned().collect(),
    }
}

fn changes_after(log: &[ChangeListEntry], after: Option<u64>) -> Vec<ChangeListEntry> {
    log.iter()
        .filter(|entry| after.map_or(true, |after| entry.change_list_version > after))
        .cloned()
        .collect()
}

async fn list_topics(
    State(store): State<Store>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<Envelope<Vec<Topic>>> {
    let catalog = store.0.read().await;
    let data = select(&catalog.topics, &params);
    debug!(requested = params.len(), returned = data.len(), "GET /topics");
    Json(Envelope { data })
}

async fn list_news_resources(
    State(store): State<Store>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<Envelope<Vec<NewsResource>>> {
    let catalog = store.0.read().await;
    let data = select(&catalog.news_resources, &params);
    debug!(requested = params.len(), returned = data.len(), "GET /newsresources");
    Json(Envelope { data })
}

async fn topic_change_list(
    State(store): State<Store>,
    Query(query): Query<ChangeListQuery>,
) -> Json<Vec<ChangeListEntry>> {
    let catalog = store.0.read().await;
    let changes = changes_after(&catalog.topic_changes, query.after);
    debug!(after = ?query.after, returned = changes.len(), "GET /changelists/topics");
    Json(changes)
}

async fn news_resource_change_list(
    State(store): State<Store>,
    Query(query): Query<ChangeListQuery>,
) -> Json<Vec<ChangeListEntry>> {
    let catalog = store.0.read().await;
    let changes = changes_after(&catalog.news_resource_changes, query.after);
    debug!(after = ?query.after, returned = changes.len(), "GET /changelists/newsresources");
    Json(changes)
}
