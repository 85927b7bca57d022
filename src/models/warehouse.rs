use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct Warehouse {
    pub id: i64,
    pub company_id: i64,
    pub name: String,
}
