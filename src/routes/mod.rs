// Route exports
pub mod matches;
pub mod wellness;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(matches::configure)
        .configure(wellness::configure);
}
