use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, ChainResponse};

/// Return the full chain and its length. This is also the shape peers
/// fetch during consensus resolution.
#[get("/chain")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ChainResponse {
        chain: ledger.chain(),
        length: ledger.len(),
    })
}
