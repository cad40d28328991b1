mod api;
mod blockchain;
mod consensus;
mod peers;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use std::env;
use uuid::Uuid;

use api::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8080);

    // Process-lifetime identity: the recipient of this node's mining rewards.
    let node_id = Uuid::new_v4().simple().to_string();

    println!("⛓️ Ledger node {node_id} listening at http://{host}:{port}");

    let state = web::Data::new(AppState::new(node_id));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
