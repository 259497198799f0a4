use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes::{self, ServerState};
use service::{localizations::LocalizationService, storage::memory::MemoryStore};

struct TestApp {
    base_url: String,
}

/// Serve the real router over an in-memory store on an ephemeral port.
async fn start_server() -> anyhow::Result<TestApp> {
    let state = ServerState {
        localizations: Arc::new(LocalizationService::new(Arc::new(MemoryStore::new()))),
    };
    let app: Router = routes::build_router(CorsLayer::very_permissive(), state);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn greeting_payload() -> Value {
    json!({
        "key": "_greeting_",
        "category": null,
        "description": null,
        "translations": {
            "en": {
                "value": "Hello",
                "updatedAt": "2025-06-08T15:42:10",
                "updatedBy": "abby@mail.com"
            },
            "fr": { "value": "Bonjour" }
        }
    })
}

async fn create_and_return_id(c: &reqwest::Client, base_url: &str) -> anyhow::Result<String> {
    let res = c
        .post(format!("{}/api/localizations", base_url))
        .json(&greeting_payload())
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Localization created successfully");
    Ok(body["data"][0]["id"].as_str().expect("assigned id").to_string())
}

#[tokio::test]
async fn health_ok() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn list_on_empty_store_is_404_not_empty_list() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/api/localizations", app.base_url)).await?;
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["detail"], "No localizations found");
    Ok(())
}

#[tokio::test]
async fn create_then_get_round_trips_the_record() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let id = create_and_return_id(&c, &app.base_url).await?;

    let res = c.get(format!("{}/api/localizations/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let row = res.json::<Value>().await?;
    assert_eq!(row["key"], "_greeting_");
    assert_eq!(row["category"], Value::Null);
    assert_eq!(row["translations"]["en"]["value"], "Hello");
    assert_eq!(row["translations"]["en"]["updatedBy"], "abby@mail.com");
    // timestamps are stored as ISO-8601 text
    assert_eq!(row["translations"]["en"]["updatedAt"], "2025-06-08T15:42:10+00:00");

    let res = c.get(format!("{}/api/localizations", app.base_url)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let rows = res.json::<Vec<Value>>().await?;
    assert_eq!(rows.len(), 1);
    Ok(())
}

#[tokio::test]
async fn get_unknown_id_is_404() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!(
        "{}/api/localizations/4f5953ca-3b1a-4ca9-bbdb-e71d8ffeedcc",
        app.base_url
    ))
    .await?;
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["detail"], "Localization not found");
    Ok(())
}

#[tokio::test]
async fn create_with_missing_required_field_is_a_client_error() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    // no `key`
    let res = c
        .post(format!("{}/api/localizations", app.base_url))
        .json(&json!({ "translations": {} }))
        .send()
        .await?;
    assert!(res.status().is_client_error());

    // no `translations`
    let res = c
        .post(format!("{}/api/localizations", app.base_url))
        .json(&json!({ "key": "_greeting_" }))
        .send()
        .await?;
    assert!(res.status().is_client_error());
    Ok(())
}

#[tokio::test]
async fn create_with_blank_key_is_rejected_by_validation() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let res = c
        .post(format!("{}/api/localizations", app.base_url))
        .json(&json!({ "key": "   ", "translations": {} }))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert!(body["detail"].as_str().unwrap().contains("key"));
    Ok(())
}

#[tokio::test]
async fn update_replaces_the_whole_translations_map() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let id = create_and_return_id(&c, &app.base_url).await?;

    // replacement payload carries only `en`; `fr` must be gone afterwards
    let res = c
        .put(format!("{}/api/localizations/{}", app.base_url, id))
        .json(&json!({
            "id": id,
            "key": "_greeting_",
            "translations": { "en": { "value": "Hi" } }
        }))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Localization updated successfully");

    let row = c
        .get(format!("{}/api/localizations/{}", app.base_url, id))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(row["translations"]["en"]["value"], "Hi");
    assert!(row["translations"].get("fr").is_none());
    Ok(())
}

#[tokio::test]
async fn update_of_unknown_id_still_reports_success_with_empty_data() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let ghost = "8288269e-da25-4c3c-939e-8b8ee0c9efbe";

    let res = c
        .put(format!("{}/api/localizations/{}", app.base_url, ghost))
        .json(&json!({ "id": ghost, "key": "_bye_", "translations": {} }))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn delete_then_get_is_404_and_repeat_delete_reports_empty_data() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let id = create_and_return_id(&c, &app.base_url).await?;

    let res = c.delete(format!("{}/api/localizations/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Localization deleted successfully");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let res = c.get(format!("{}/api/localizations/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);

    // deleting again surfaces storage's empty result, still a 200
    let res = c.delete(format!("{}/api/localizations/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn bulk_update_reports_per_entry_outcome_inline() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let id_a = create_and_return_id(&c, &app.base_url).await?;
    let id_b = create_and_return_id(&c, &app.base_url).await?;
    let ghost = "11111111-1111-4111-8111-111111111111";

    let entries = json!([
        { "id": id_a, "key": "_greeting_", "translations": { "en": { "value": "Hey" } } },
        { "id": ghost, "key": "_missing_", "translations": {} },
        { "id": id_b, "key": "_greeting_", "translations": { "fr": { "value": "Salut" } } }
    ]);

    let res = c
        .post(format!("{}/api/localizations/bulk-update", app.base_url))
        .json(&entries)
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["successCount"], 2);
    assert_eq!(body["failedIds"], json!([ghost]));

    // the successful entries were really applied
    let row = c
        .get(format!("{}/api/localizations/{}", app.base_url, id_a))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(row["translations"]["en"]["value"], "Hey");
    Ok(())
}

#[tokio::test]
async fn bulk_update_with_malformed_entry_id_rejects_the_whole_request() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let entries = json!([
        { "id": "not-a-uuid", "key": "_greeting_", "translations": {} }
    ]);
    let res = c
        .post(format!("{}/api/localizations/bulk-update", app.base_url))
        .json(&entries)
        .send()
        .await?;
    assert!(res.status().is_client_error());
    Ok(())
}
