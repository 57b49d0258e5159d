use crate::{
    api::{cities, nomina},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

// Helper to build per-scope limiter
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        // period and burst are both clamped to at least 1 above
        .expect("valid governor config");
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    let nomina_limiter = build_limiter(config.rate_nomina_per_min);
    let cities_limiter = build_limiter(config.rate_cities_per_min);

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/v1/nomina")
                    .wrap(nomina_limiter)
                    // /v1/nomina/defaults
                    .service(web::resource("/defaults").route(web::get().to(nomina::form_defaults)))
                    // /v1/nomina/calculations
                    .service(
                        web::resource("/calculations")
                            .route(web::post().to(nomina::live_calculations)),
                    )
                    // /v1/nomina/preview
                    .service(
                        web::resource("/preview").route(web::post().to(nomina::preview_voucher)),
                    )
                    // /v1/nomina/export?format=json|txt
                    .service(
                        web::resource("/export").route(web::post().to(nomina::export_voucher)),
                    ),
            )
            .service(
                web::scope("/v1/cities")
                    .wrap(cities_limiter)
                    // /v1/cities
                    .service(web::resource("").route(web::get().to(cities::list_cities)))
                    // /v1/cities/select?current=
                    .service(web::resource("/select").route(web::get().to(cities::city_select)))
                    // /v1/cities/reload
                    .service(web::resource("/reload").route(web::post().to(cities::city_reload)))
                    // /v1/cities/health
                    .service(
                        web::resource("/health").route(web::get().to(cities::city_api_health)),
                    ),
            ),
    );
}

// PAGE LOAD
//  └─ GET /v1/cities/select?current=<typed value>

// RELOAD BUTTON
//  └─ POST /v1/cities/reload with the current field; overlapping reloads are not serialised

// EVERY FIELD CHANGE (debounced by the page)
//  ├─ POST /v1/nomina/calculations
//  └─ POST /v1/nomina/preview
