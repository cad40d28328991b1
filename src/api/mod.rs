mod chain;
mod health;
mod mining;
pub mod models;
mod nodes;
mod tx;

use actix_web::web::ServiceConfig;

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(health::health_check)
        .service(tx::new_transaction)
        .service(mining::mine)
        .service(chain::get_chain)
        .service(nodes::register_nodes)
        .service(nodes::resolve);
}
