// src/handlers/alert.rs
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use crate::dtos::low_stock::{LowStockAlert, LowStockAlertsResponse, SupplierInfo};
use crate::error::AppError;
use crate::state::AppState;

/// Trailing window used both for the "recently sold" gate and the usage
/// rate.
pub const USAGE_WINDOW_DAYS: i64 = 30;

#[derive(Debug, FromRow)]
struct LowStockRow {
    inventory_id: i64,
    quantity: i32,
    product_id: i64,
    product_name: String,
    sku: String,
    reorder_threshold: i32,
    warehouse_id: i64,
    warehouse_name: String,
    supplier_id: Option<i64>,
    supplier_name: Option<String>,
    supplier_email: Option<String>,
}

// GET /companies/:company_id/alerts/low-stock
//
// Under-threshold inventory for the company, restricted to rows with at
// least one outflow in the trailing window. An unknown company simply
// yields an empty list.
pub async fn get_low_stock_alerts(
    State(AppState { db_pool }): State<AppState>,
    Path(company_id): Path<i64>,
) -> Result<Json<LowStockAlertsResponse>, AppError> {
    let since = Utc::now() - Duration::days(USAGE_WINDOW_DAYS);

    // If more than one supplier is flagged primary, the lateral join picks
    // an arbitrary one rather than failing.
    let rows = sqlx::query_as::<_, LowStockRow>(
        r#"SELECT i.id AS inventory_id,
                  i.quantity,
                  p.id AS product_id,
                  p.name AS product_name,
                  p.sku,
                  p.reorder_threshold,
                  w.id AS warehouse_id,
                  w.name AS warehouse_name,
                  s.id AS supplier_id,
                  s.name AS supplier_name,
                  s.contact_email AS supplier_email
           FROM inventories i
           JOIN products p ON p.id = i.product_id
           JOIN warehouses w ON w.id = i.warehouse_id
           LEFT JOIN LATERAL (
               SELECT sup.id, sup.name, sup.contact_email
               FROM product_suppliers ps
               JOIN suppliers sup ON sup.id = ps.supplier_id
               WHERE ps.product_id = p.id AND ps.is_primary
               LIMIT 1
           ) s ON TRUE
           WHERE w.company_id = $1
             AND i.quantity < p.reorder_threshold
             AND EXISTS (
                 SELECT 1 FROM inventory_history h
                 WHERE h.inventory_id = i.id
                   AND h.created_at >= $2
                   AND h.change_amount < 0
             )"#,
    )
    .bind(company_id)
    .bind(since)
    .fetch_all(&db_pool)
    .await?;

    let mut alerts = Vec::with_capacity(rows.len());
    for row in rows {
        let total_outflow = total_outflow_since(&db_pool, row.inventory_id, since).await?;

        let supplier = match (row.supplier_id, row.supplier_name) {
            (Some(id), Some(name)) => Some(SupplierInfo {
                id,
                name,
                contact_email: row.supplier_email,
            }),
            _ => None,
        };

        alerts.push(LowStockAlert {
            product_id: row.product_id,
            product_name: row.product_name,
            sku: row.sku,
            warehouse_id: row.warehouse_id,
            warehouse_name: row.warehouse_name,
            current_stock: row.quantity,
            threshold: row.reorder_threshold,
            days_until_stockout: days_until_stockout(row.quantity, total_outflow),
            supplier,
        });
    }

    let total_alerts = alerts.len();
    Ok(Json(LowStockAlertsResponse {
        alerts,
        total_alerts,
    }))
}

/// Total units consumed from one inventory row over the trailing window:
/// the sum of the magnitudes of its negative ledger entries.
async fn total_outflow_since(
    db_pool: &PgPool,
    inventory_id: i64,
    since: DateTime<Utc>,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(-change_amount), 0)
         FROM inventory_history
         WHERE inventory_id = $1
           AND created_at >= $2
           AND change_amount < 0",
    )
    .bind(inventory_id)
    .bind(since)
    .fetch_one(db_pool)
    .await
}

/// Whole days until the quantity reaches zero at the recent average daily
/// usage; None when there is no usable usage rate.
fn days_until_stockout(quantity: i32, total_outflow: i64) -> Option<i64> {
    if total_outflow <= 0 {
        return None;
    }
    let avg_daily_usage = Decimal::from(total_outflow) / Decimal::from(USAGE_WINDOW_DAYS);
    if avg_daily_usage <= Decimal::ZERO {
        return None;
    }
    (Decimal::from(quantity) / avg_daily_usage).floor().to_i64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_is_quantity_over_daily_rate() {
        // 60 units over 30 days -> 2/day; 50 on hand -> 25 days.
        assert_eq!(days_until_stockout(50, 60), Some(25));
    }

    #[test]
    fn projection_truncates_partial_days() {
        // 45 over 30 days -> 1.5/day; 8 on hand -> 5.33 -> 5.
        assert_eq!(days_until_stockout(8, 45), Some(5));
    }

    #[test]
    fn slow_movers_can_project_beyond_the_window() {
        // 3 over 30 days -> 0.1/day; 10 on hand -> 100 days.
        assert_eq!(days_until_stockout(10, 3), Some(100));
    }

    #[test]
    fn zero_outflow_yields_no_projection() {
        assert_eq!(days_until_stockout(50, 0), None);
    }
}
