use axum::{routing::get, Router};

use crate::handlers::alert::get_low_stock_alerts;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/companies/{company_id}/alerts/low-stock",
        get(get_low_stock_alerts),
    )
}
