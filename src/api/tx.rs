use actix_web::{HttpResponse, Responder, post, web};
use log::debug;

use super::models::{AppState, NewTxRequest, NewTxResponse};

/// Submit a transaction into the pending pool. All three body fields are
/// required; the Json extractor rejects incomplete bodies with a 400
/// before any state is touched. Amounts are free-form, sign included.
#[post("/transactions/new")]
pub async fn new_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let NewTxRequest {
        sender,
        recipient,
        amount,
    } = body.into_inner();

    let index = {
        let mut ledger = state.ledger.lock().expect("mutex poisoned");
        ledger.submit_transaction(sender, recipient, amount)
    };
    debug!("transaction queued for block {index}");

    HttpResponse::Created().json(NewTxResponse {
        message: format!("Transaction will be added to Block {index}"),
        index,
    })
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};

    use super::super::{init_routes, models::AppState};

    #[actix_web::test]
    async fn accepted_transaction_reports_the_next_index() {
        let state = web::Data::new(AppState::new("test-node".into()));
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
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["index"], 2);

        // The pool now holds the transaction but the chain is untouched.
        assert_eq!(state.ledger.lock().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn missing_fields_are_a_client_error() {
        let state = web::Data::new(AppState::new("test-node".into()));
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/transactions/new")
            .set_json(serde_json::json!({ "sender": "alice", "amount": 5.0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_client_error());
    }
}
