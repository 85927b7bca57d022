// src/dtos/low_stock.rs
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LowStockAlertsResponse {
    pub alerts: Vec<LowStockAlert>,
    pub total_alerts: usize,
}

#[derive(Debug, Serialize)]
pub struct LowStockAlert {
    pub product_id: i64,
    pub product_name: String,
    pub sku: String,
    pub warehouse_id: i64,
    pub warehouse_name: String,
    pub current_stock: i32,
    pub threshold: i32,
    // Both stay in the payload as null when absent.
    pub days_until_stockout: Option<i64>,
    pub supplier: Option<SupplierInfo>,
}

#[derive(Debug, Serialize)]
pub struct SupplierInfo {
    pub id: i64,
    pub name: String,
    pub contact_email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_supplier_and_projection_serialize_as_null() {
        let alert = LowStockAlert {
            product_id: 1,
            product_name: "Widget".into(),
            sku: "WID-1".into(),
            warehouse_id: 2,
            warehouse_name: "Main".into(),
            current_stock: 4,
            threshold: 10,
            days_until_stockout: None,
            supplier: None,
        };

        let value = serde_json::to_value(&alert).unwrap();
        assert!(value.get("supplier").unwrap().is_null());
        assert!(value.get("days_until_stockout").unwrap().is_null());
    }

    #[test]
    fn supplier_info_carries_optional_email() {
        let supplier = SupplierInfo {
            id: 9,
            name: "Acme Supply".into(),
            contact_email: None,
        };

        let value = serde_json::to_value(&supplier).unwrap();
        assert_eq!(value["name"], "Acme Supply");
        assert!(value["contact_email"].is_null());
    }
}
