use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{App, HttpResponse, HttpServer, web};
use tempfile::TempDir;

use crate::config::Budgets;
use crate::service::{AppState, configure};
use crate::store::QuotationStore;
use crate::upstream::UpstreamClient;

pub const SAMPLE_BODY: &str = r#"{"USDBRL":{"code":"USD","codein":"BRL","name":"Dollar/Real","high":"5.10","low":"5.00","varBid":"0.02","pctChange":"0.4","bid":"5.05","ask":"5.06","timestamp":"1234567890","create_date":"2024-01-01 00:00:00"}}"#;

/// Starts a fake quotation API on an ephemeral port and returns its URL.
pub fn spawn_upstream(body: impl Into<String>, delay: Duration) -> String {
    spawn_upstream_with_status(200, body, delay)
}

pub fn spawn_upstream_with_status(status: u16, body: impl Into<String>, delay: Duration) -> String {
    let body: String = body.into();
    let status = StatusCode::from_u16(status).unwrap();
    let server = HttpServer::new(move || {
        let body = body.clone();
        App::new().default_service(web::to(move || {
            let body = body.clone();
            async move {
                tokio::time::sleep(delay).await;
                HttpResponse::build(status)
                    .content_type(ContentType::json())
                    .body(body)
            }
        }))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{addr}/json/last/USD-BRL")
}

/// Starts the real `/cotacao` service in front of `upstream_url`.
pub fn spawn_service(upstream_url: String, store: QuotationStore, budgets: Budgets) -> String {
    let state = web::Data::new(AppState {
        upstream: UpstreamClient::new(upstream_url).unwrap(),
        store,
        budgets,
    });
    let server = HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{addr}/cotacao")
}

pub async fn temp_store() -> (TempDir, QuotationStore) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("quotations.db").display());
    let store = QuotationStore::connect(&url).await.unwrap();
    store.prepare().await.unwrap();
    (dir, store)
}

pub async fn row_bids(store: &QuotationStore) -> Vec<f64> {
    sqlx::query_scalar("SELECT bid FROM quotations")
        .fetch_all(&store.pool)
        .await
        .unwrap()
}
