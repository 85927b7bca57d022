// src/handlers/product.rs
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use http::StatusCode;
use sqlx::Error as SqlxError;
use tracing::{info, instrument};

use crate::dtos::product::{CreateProductRequest, CreateProductResponse};
use crate::error::AppError;
use crate::models::inventory::Inventory;
use crate::models::product::Product;
use crate::models::warehouse::Warehouse;
use crate::state::AppState;

const INITIAL_STOCK_REASON: &str = "Initial stock";

/// SKUs are compared and stored trimmed and upper-cased.
fn normalize_sku(sku: &str) -> String {
    sku.trim().to_uppercase()
}

fn map_unique_violation(err: SqlxError, message: &str) -> AppError {
    match err {
        SqlxError::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            AppError::conflict(message)
        }
        other => other.into(),
    }
}

// POST /products - Create product, optionally seeding stock in a warehouse
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateProductResponse>), AppError> {
    let Json(req) = payload.map_err(|_| AppError::validation("Invalid or missing JSON body"))?;

    let name = req.name.as_deref().map(str::trim).unwrap_or("");
    let sku_raw = req.sku.as_deref().map(str::trim).unwrap_or("");
    if name.is_empty() || sku_raw.is_empty() || req.price.is_none() {
        return Err(AppError::validation(
            "Fields name, sku and price are required",
        ));
    }

    let price = req
        .price
        .as_ref()
        .and_then(|p| p.to_price())
        .ok_or_else(|| AppError::validation("price must be a non-negative decimal value"))?;

    let quantity = match &req.initial_quantity {
        Some(raw) => raw.to_quantity().ok_or_else(|| {
            AppError::validation("initial_quantity must be a non-negative integer")
        })?,
        None => 0,
    };

    let sku = normalize_sku(sku_raw);

    // Pre-check only; the unique index on products.sku still catches a race
    // at insert time.
    let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM products WHERE sku = $1")
        .bind(&sku)
        .fetch_optional(&state.db_pool)
        .await?;
    if existing.is_some() {
        return Err(AppError::conflict("SKU already exists"));
    }

    if let Some(warehouse_id) = req.warehouse_id {
        sqlx::query_as::<_, Warehouse>("SELECT id, company_id, name FROM warehouses WHERE id = $1")
            .bind(warehouse_id)
            .fetch_optional(&state.db_pool)
            .await?
            .ok_or_else(|| AppError::validation("warehouse_id does not exist"))?;
    }

    // Product, inventory and initial-stock ledger row commit or roll back
    // together.
    let mut tx = state.db_pool.begin().await?;

    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (name, sku, price)
         VALUES ($1, $2, $3)
         RETURNING id, name, sku, price, reorder_threshold",
    )
    .bind(name)
    .bind(&sku)
    .bind(price)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| map_unique_violation(e, "SKU already exists"))?;

    if let Some(warehouse_id) = req.warehouse_id {
        let inventory = sqlx::query_as::<_, Inventory>(
            "INSERT INTO inventories (product_id, warehouse_id, quantity)
             VALUES ($1, $2, $3)
             RETURNING id, product_id, warehouse_id, quantity",
        )
        .bind(product.id)
        .bind(warehouse_id)
        .bind(quantity)
        .fetch_one(&mut *tx)
        .await?;

        if quantity > 0 {
            sqlx::query(
                "INSERT INTO inventory_history (inventory_id, change_amount, reason)
                 VALUES ($1, $2, $3)",
            )
            .bind(inventory.id)
            .bind(quantity)
            .bind(INITIAL_STOCK_REASON)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit()
        .await
        .map_err(|e| map_unique_violation(e, "SKU already exists"))?;

    info!(product_id = product.id, sku = %product.sku, "Product created");

    Ok((
        StatusCode::CREATED,
        Json(CreateProductResponse {
            message: "Product created".to_string(),
            product_id: product.id,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sku_is_trimmed_and_upper_cased() {
        assert_eq!(normalize_sku("  abc-001 "), "ABC-001");
        assert_eq!(normalize_sku("Wid-9"), "WID-9");
    }

    #[test]
    fn non_unique_errors_stay_opaque() {
        let err = map_unique_violation(SqlxError::PoolClosed, "SKU already exists");
        assert!(matches!(err, AppError::DatabaseError(_)));
    }
}
