use std::net::SocketAddr;
use std::path::PathBuf;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::records::DocRecordStore;
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    public_dir: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.public_dir);
    }
}

async fn start_server(mutate: impl FnOnce(&mut AppConfig)) -> anyhow::Result<TestApp> {
    // isolated static dir per test run
    let public_dir = std::env::temp_dir().join(format!("deed_public_{}", Uuid::new_v4()));
    tokio::fs::create_dir_all(public_dir.join("assets")).await?;
    tokio::fs::write(public_dir.join("index.html"), "<html>sale deeds</html>").await?;
    tokio::fs::write(public_dir.join("assets/app.js"), "console.log('deeds');").await?;

    let mut cfg = AppConfig::default();
    cfg.frontend.static_dir = public_dir.clone();
    mutate(&mut cfg);

    let app = server::build_app(&cfg, DocRecordStore::in_memory());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, public_dir })
}

async fn list(c: &reqwest::Client, app: &TestApp, query: &str) -> anyhow::Result<Vec<Value>> {
    let res = c.get(format!("{}/get-users{}", app.base_url, query)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(res.json::<Vec<Value>>().await?)
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server(|_| {}).await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_static_assets_and_index_fallback() -> anyhow::Result<()> {
    let app = start_server(|_| {}).await?;
    let c = reqwest::Client::new();

    let root = c.get(format!("{}/", app.base_url)).send().await?;
    assert_eq!(root.status(), HttpStatusCode::OK);
    assert_eq!(root.text().await?, "<html>sale deeds</html>");

    let asset = c.get(format!("{}/assets/app.js", app.base_url)).send().await?;
    assert_eq!(asset.status(), HttpStatusCode::OK);
    assert_eq!(asset.text().await?, "console.log('deeds');");

    let deep = c.get(format!("{}/deeds/42/edit", app.base_url)).send().await?;
    assert_eq!(deep.status(), HttpStatusCode::OK);
    assert_eq!(deep.text().await?, "<html>sale deeds</html>");
    Ok(())
}

#[tokio::test]
async fn e2e_sale_deed_lifecycle() -> anyhow::Result<()> {
    let app = start_server(|_| {}).await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{}/add-user", app.base_url))
        .json(&json!({
            "id": "A",
            "metaDocumentNumber": "DOC-7",
            "purchaserName": "Lakshmi",
            "purchaserAge": "41",
            "photoP": "data:image/png;base64,iVBORw0KGgo=",
            "thumbP": "not-a-data-uri",
        }))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["message"], "Document added successfully");

    let all = list(&c, &app, "").await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["id"], "A");
    assert_eq!(all[0]["metaDocumentNumber"], "DOC-7");
    assert_eq!(all[0]["photoP"], "data:image/png;base64,iVBORw0KGgo=");
    assert!(all[0].get("thumbP").is_none());

    let res = c.post(format!("{}/update-user", app.base_url))
        .json(&json!({"id": "A", "purchaserName": "Lakshmi R", "thumbP": "data:image/jpeg;base64,/9j/"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let all = list(&c, &app, "").await?;
    assert_eq!(all[0]["purchaserName"], "Lakshmi R");
    assert_eq!(all[0]["purchaserAge"], "41");
    assert_eq!(all[0]["thumbP"], "data:image/jpeg;base64,/9j/");

    let res = c.post(format!("{}/delete-user", app.base_url)).json(&json!({"id": "A"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["message"], "Document deleted successfully");
    assert!(list(&c, &app, "").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn e2e_not_found_and_missing_id() -> anyhow::Result<()> {
    let app = start_server(|_| {}).await?;
    let c = reqwest::Client::new();
    c.post(format!("{}/add-user", app.base_url)).json(&json!({"id": "A"})).send().await?;

    let res = c.post(format!("{}/delete-user", app.base_url)).json(&json!({"id": "Z"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["error"], "Not Found");

    let res = c.post(format!("{}/update-user", app.base_url)).json(&json!({"id": "Z", "sellerName": "S"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.post(format!("{}/delete-user", app.base_url)).json(&json!({})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    assert_eq!(list(&c, &app, "").await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn e2e_offset_limit_window() -> anyhow::Result<()> {
    let app = start_server(|_| {}).await?;
    let c = reqwest::Client::new();
    for id in [1, 2, 3] {
        c.post(format!("{}/add-user", app.base_url)).json(&json!({"id": id})).send().await?;
    }
    let page = list(&c, &app, "?offset=1&limit=1").await?;
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["id"], 2);

    assert_eq!(list(&c, &app, "?limit=0").await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn e2e_simple_schema_with_duplicate_rejection() -> anyhow::Result<()> {
    let app = start_server(|cfg| {
        cfg.storage.schema = configs::SchemaKind::Simple;
        cfg.storage.reject_duplicate_ids = true;
    })
    .await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{}/add-user", app.base_url)).json(&json!({"id": "A", "name": "N", "age": 30})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c.post(format!("{}/add-user", app.base_url)).json(&json!({"id": "A", "name": "Dup"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);

    c.post(format!("{}/update-user", app.base_url)).json(&json!({"id": "A", "name": "X"})).send().await?;
    let all = list(&c, &app, "").await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["name"], "X");
    assert_eq!(all[0]["age"], 30);
    assert_eq!(all[0]["occupation"], "");
    Ok(())
}
