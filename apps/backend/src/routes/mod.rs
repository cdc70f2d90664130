use actix_web::web;

pub mod battles;
pub mod cards;
pub mod health;
pub mod users;

/// Register every route on `cfg`. Used by `main.rs` and by route tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.configure(health::configure_routes);

    cfg.service(
        web::scope("/api")
            .configure(users::configure_routes)
            .configure(cards::configure_routes)
            .configure(battles::configure_routes),
    );
}
