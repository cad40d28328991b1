use actix_web::{HttpResponse, Responder, get, post, web};
use log::info;

use super::models::{AppState, RegisterRequest, RegisterResponse, ResolveResponse};
use crate::consensus;

/// Register peer nodes by address. Addresses are normalized to
/// `host[:port]` and deduplicated; an unparseable address rejects the
/// whole request before any of it is applied.
#[post("/nodes/register")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> impl Responder {
    if body.nodes.is_empty() {
        return HttpResponse::BadRequest().body("please supply a non-empty list of nodes");
    }

    let mut peers = state.peers.lock().expect("mutex poisoned");
    if let Err(msg) = peers.register_all(&body.nodes) {
        return HttpResponse::BadRequest().body(msg);
    }

    let mut total_nodes: Vec<String> = peers.addresses().map(str::to_string).collect();
    total_nodes.sort_unstable();
    info!("peer set now holds {} node(s)", peers.len());

    HttpResponse::Created().json(RegisterResponse {
        message: "New nodes have been added",
        total_nodes,
    })
}

/// Run one round of longest-valid-chain consensus against every
/// registered peer. Unreachable or lying peers are skipped; the call
/// itself always succeeds and only differs in whether a replacement
/// happened.
#[get("/nodes/resolve")]
pub async fn resolve(state: web::Data<AppState>) -> impl Responder {
    // Same guard as mining: a replacement never interleaves with a seal.
    let _writer = state.write_guard.lock().await;

    let peers: Vec<String> = {
        let registry = state.peers.lock().expect("mutex poisoned");
        registry.addresses().map(str::to_string).collect()
    };
    let local_len = state.ledger.lock().expect("mutex poisoned").len();

    let winner = if peers.is_empty() {
        None
    } else {
        consensus::find_longer_chain(&state.http, peers.iter().map(String::as_str), local_len)
            .await
    };

    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    let replaced = match winner {
        Some(chain) => {
            info!(
                "replacing local chain ({} blocks) with peer chain ({} blocks)",
                ledger.len(),
                chain.len()
            );
            ledger.replace_chain(chain);
            true
        }
        None => false,
    };

    HttpResponse::Ok().json(ResolveResponse {
        message: if replaced {
            "Our chain was replaced"
        } else {
            "Our chain is authoritative"
        },
        replaced,
        chain: ledger.chain().to_vec(),
        length: ledger.len(),
    })
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};

    use super::super::{init_routes, models::AppState};

    #[actix_web::test]
    async fn registration_normalizes_and_deduplicates() {
        let state = web::Data::new(AppState::new("test-node".into()));
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/nodes/register")
            .set_json(serde_json::json!({
                "nodes": [
                    "http://192.168.0.5:5000",
                    "192.168.0.5:5000",
                    "http://192.168.0.6:5001",
                ],
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body["total_nodes"],
            serde_json::json!(["192.168.0.5:5000", "192.168.0.6:5001"])
        );
    }

    #[actix_web::test]
    async fn empty_node_list_is_a_client_error() {
        let state = web::Data::new(AppState::new("test-node".into()));
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/nodes/register")
            .set_json(serde_json::json!({ "nodes": [] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_client_error());
        assert!(state.peers.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn resolve_with_unreachable_peers_keeps_the_local_chain() {
        let state = web::Data::new(AppState::new("test-node".into()));
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/nodes/register")
            .set_json(serde_json::json!({ "nodes": ["127.0.0.1:1"] }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/nodes/resolve").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["replaced"], false);
        assert_eq!(body["length"], 1);
    }
}
