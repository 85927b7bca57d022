use sqlx::FromRow;

/// Stock level of one product in one warehouse.
#[derive(Debug, FromRow)]
pub struct Inventory {
    pub id: i64,
    pub product_id: i64,
    pub warehouse_id: i64,
    pub quantity: i32,
}
