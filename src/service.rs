use actix_web::http::header::ContentType;
use actix_web::middleware::Logger;
use actix_web::{App, HttpResponse, HttpServer, get, web};
use anyhow::Result;
use log::{error, info, warn};

use crate::config::{Budgets, ServerConfig};
use crate::store::QuotationStore;
use crate::upstream::UpstreamClient;

pub struct AppState {
    pub upstream: UpstreamClient,
    pub store: QuotationStore,
    pub budgets: Budgets,
}

#[get("/cotacao")]
pub async fn current_quotation(state: web::Data<AppState>) -> HttpResponse {
    let quotation = match state.upstream.fetch(state.budgets.fetch).await {
        Ok(quotation) => quotation,
        Err(e) => {
            error!("It was not possible to get the quotation: {e}");
            return HttpResponse::RequestTimeout()
                .content_type(ContentType::plaintext())
                .body("Request timeout");
        }
    };

    // Best effort: the quotation is still served when the row is lost.
    if let Err(e) = state.store.insert(&quotation, state.budgets.persist).await {
        warn!("It was not possible to persist the quotation: {e}");
    }

    HttpResponse::Ok().json(&quotation)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(current_quotation);
}

/// Runs the HTTP server until it is shut down. The store stays owned by the
/// caller, which closes it afterwards.
pub async fn serve(config: &ServerConfig, store: QuotationStore) -> Result<()> {
    if config.budgets.persist >= config.budgets.fetch {
        warn!(
            "persistence budget {:?} is not shorter than fetch budget {:?}",
            config.budgets.persist, config.budgets.fetch
        );
    }

    let upstream = UpstreamClient::new(config.upstream_url.clone())?;
    info!(
        "Listening on http://{}/cotacao, upstream {}",
        config.addr, config.upstream_url
    );

    let state = web::Data::new(AppState {
        upstream,
        store,
        budgets: config.budgets,
    });

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(config.addr)?
    .run()
    .await?;

    Ok(())
}
