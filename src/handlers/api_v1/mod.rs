pub mod points;
pub mod proposals;
pub mod responses;

use actix_web::web;

use crate::store::LedgerStore;

/// Configure API v1 routes against the store registered as `web::Data<S>`.
pub fn configure<S: LedgerStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/proposals")
            .route("", web::get().to(proposals::list::<S>))
            .route("/{id}", web::get().to(proposals::read::<S>)),
    );
    cfg.service(
        web::scope("/points")
            .route("/history", web::get().to(points::history::<S>)),
    );
}
