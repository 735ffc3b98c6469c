use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, ChangeListEntry, Envelope, NewsResource, Store, Topic};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn topic(id: &str, name: &str) -> Topic {
    Topic {
        id: id.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

fn resource(id: &str) -> NewsResource {
    NewsResource {
        id: id.to_string(),
        title: format!("Resource {id}"),
        ..Default::default()
    }
}

// --- resources ---

#[tokio::test]
async fn topics_empty_catalog_is_empty_envelope() {
    let resp = app().oneshot(get("/topics")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert_eq!(&bytes[..], br#"{"data":[]}"#);
}

#[tokio::test]
async fn topics_without_ids_returns_everything() {
    let store = Store::new();
    store.upsert_topic(topic("1", "Headlines")).await;
    store.upsert_topic(topic("2", "UI")).await;

    let resp = app_with(store).oneshot(get("/topics")).await.unwrap();

    let envelope: Envelope<Vec<Topic>> = body_json(resp).await;
    let ids: Vec<String> = envelope.data.into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[tokio::test]
async fn topics_filters_by_repeated_ids() {
    let store = Store::new();
    for id in ["1", "2", "3"] {
        store.upsert_topic(topic(id, id)).await;
    }

    let resp = app_with(store).oneshot(get("/topics?id=3&id=1")).await.unwrap();

    let envelope: Envelope<Vec<Topic>> = body_json(resp).await;
    let ids: Vec<String> = envelope.data.into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["1", "3"]);
}

#[tokio::test]
async fn unknown_ids_are_silently_absent() {
    let store = Store::new();
    store.upsert_news_resource(resource("a")).await;

    let resp = app_with(store)
        .oneshot(get("/newsresources?id=a&id=b"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: Envelope<Vec<NewsResource>> = body_json(resp).await;
    assert_eq!(envelope.data, vec![resource("a")]);
}

#[tokio::test]
async fn deleted_resource_is_not_listed() {
    let store = Store::new();
    store.upsert_news_resource(resource("a")).await;
    store.upsert_news_resource(resource("b")).await;
    store.delete_news_resource("a").await;

    let resp = app_with(store).oneshot(get("/newsresources")).await.unwrap();

    let envelope: Envelope<Vec<NewsResource>> = body_json(resp).await;
    assert_eq!(envelope.data, vec![resource("b")]);
}

// --- change lists ---

#[tokio::test]
async fn change_list_is_bare_array() {
    let store = Store::new();
    store.upsert_topic(topic("1", "Headlines")).await;

    let resp = app_with(store).oneshot(get("/changelists/topics")).await.unwrap();

    let value: serde_json::Value = body_json(resp).await;
    assert!(value.is_array());
    assert_eq!(value[0]["changeListVersion"], 1);
    assert_eq!(value[0]["isDelete"], false);
}

#[tokio::test]
async fn change_list_after_cursor_is_strictly_newer() {
    let store = Store::new();
    store.upsert_topic(topic("5", "Five")).await;
    let cursor = store.upsert_topic(topic("6", "Six")).await;
    store.upsert_topic(topic("7", "Seven")).await;
    store.delete_topic("5").await;

    let resp = app_with(store)
        .oneshot(get(&format!("/changelists/topics?after={cursor}")))
        .await
        .unwrap();

    let entries: Vec<ChangeListEntry> = body_json(resp).await;
    assert!(entries.iter().all(|e| e.change_list_version > cursor));
    let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["7", "5"]);
    assert!(entries[1].is_delete);
}

#[tokio::test]
async fn change_list_is_ordered_by_version() {
    let store = Store::new();
    store.upsert_news_resource(resource("a")).await;
    store.upsert_news_resource(resource("b")).await;
    store.upsert_news_resource(resource("a")).await;

    let resp = app_with(store)
        .oneshot(get("/changelists/newsresources"))
        .await
        .unwrap();

    let entries: Vec<ChangeListEntry> = body_json(resp).await;
    let versions: Vec<u64> = entries.iter().map(|e| e.change_list_version).collect();
    assert_eq!(versions, vec![2, 3]);
    assert_eq!(entries[1].id, "a");
}

#[tokio::test]
async fn change_list_past_head_is_empty() {
    let store = Store::new();
    let head = store.upsert_topic(topic("1", "Headlines")).await;

    let resp = app_with(store)
        .oneshot(get(&format!("/changelists/topics?after={head}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let entries: Vec<ChangeListEntry> = body_json(resp).await;
    assert!(entries.is_empty());
}

#[tokio::test]
async fn change_list_bad_cursor_returns_400() {
    let resp = app()
        .oneshot(get("/changelists/topics?after=yesterday"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn topic_and_news_logs_are_separate() {
    let store = Store::new();
    store.upsert_topic(topic("1", "Headlines")).await;
    store.upsert_news_resource(resource("a")).await;

    let app = app_with(store);
    let topics: Vec<ChangeListEntry> =
        body_json(app.clone().oneshot(get("/changelists/topics")).await.unwrap()).await;
    let news: Vec<ChangeListEntry> =
        body_json(app.oneshot(get("/changelists/newsresources")).await.unwrap()).await;

    assert_eq!(topics.len(), 1);
    assert_eq!(news.len(), 1);
    assert_eq!(topics[0].id, "1");
    assert_eq!(news[0].id, "a");
    assert!(news[0].change_list_version > topics[0].change_list_version);
}

#[tokio::test]
async fn seeded_store_has_content() {
    let app = app_with(Store::seeded().await);

    let topics: Envelope<Vec<Topic>> = body_json(app.clone().oneshot(get("/topics")).await.unwrap()).await;
    let news: Envelope<Vec<NewsResource>> =
        body_json(app.oneshot(get("/newsresources")).await.unwrap()).await;

    assert_eq!(topics.data.len(), 3);
    assert_eq!(news.data.len(), 3);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let resp = app().oneshot(get("/topics/1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
