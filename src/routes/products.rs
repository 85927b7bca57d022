use axum::{routing::post, Router};

use crate::handlers::product::create_product;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/products", post(create_product))
}
