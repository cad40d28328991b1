use actix_web::{HttpResponse, Responder, get, web};
use log::info;

use super::models::{AppState, MineResponse};
use crate::blockchain::{REWARD_AMOUNT, REWARD_SENDER, pow};

/// Mine one block: search for a proof over the current tip, credit this
/// node with the reward transaction, then seal the pending pool.
///
/// The search runs on the blocking pool so HTTP workers stay responsive,
/// and `write_guard` keeps at most one mine→seal sequence in flight —
/// a consensus swap can never land between the search and its seal.
#[get("/mine")]
pub async fn mine(state: web::Data<AppState>) -> impl Responder {
    let _writer = state.write_guard.lock().await;

    let last_proof = {
        let ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.last_block().proof
    };

    let proof = match web::block(move || pow::proof_of_work(last_proof)).await {
        Ok(proof) => proof,
        Err(_) => return HttpResponse::InternalServerError().body("mining worker failed"),
    };

    let resp = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.submit_transaction(
            REWARD_SENDER.to_string(),
            state.node_id.clone(),
            REWARD_AMOUNT,
        );
        let block = ledger.seal_block(proof, None);
        MineResponse {
            message: "New Block forged",
            index: block.index,
            transactions: block.transactions.clone(),
            proof: block.proof,
            previous_hash: block.previous_hash.clone(),
        }
    };

    info!(
        "sealed block #{} (proof={}, txs={})",
        resp.index,
        resp.proof,
        resp.transactions.len()
    );
    HttpResponse::Ok().json(resp)
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};

    use super::super::{init_routes, models::AppState};
    use crate::blockchain::{GENESIS_PROOF, REWARD_SENDER, pow};

    #[actix_web::test]
    async fn mining_seals_pending_transactions_plus_the_reward() {
        let state = web::Data::new(AppState::new("miner-node".into()));
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/transactions/new")
            .set_json(serde_json::json!({
                "sender": "alice",
                "recipient": "bob",
                "amount": 5.0,
            }))
            .to_request();
        test::call_service(&app, req).await;

        let genesis_hash = state.ledger.lock().unwrap().last_block().compute_hash();

        let req = test::TestRequest::get().uri("/mine").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["index"], 2);
        assert_eq!(body["previous_hash"], genesis_hash);
        assert!(pow::valid_proof(GENESIS_PROOF, body["proof"].as_u64().unwrap()));

        let txs = body["transactions"].as_array().unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0]["sender"], "alice");
        assert_eq!(txs[1]["sender"], REWARD_SENDER);
        assert_eq!(txs[1]["recipient"], "miner-node");
        assert_eq!(txs[1]["amount"], 1.0);

        // The pool drained into the block: chain grew, nothing pending.
        let ledger = state.ledger.lock().unwrap();
        assert_eq!(ledger.len(), 2);
    }
}
