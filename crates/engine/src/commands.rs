//! Command structs for engine operations.
//!
//! These types group parameters for the item-based write operations
//! (sales and purchases), keeping call sites readable and avoiding long
//! argument lists.

/// Record a sale of `quantity` units of `item_name` at `unit_price` each.
#[derive(Clone, Debug)]
pub struct SaleCmd {
    pub item_name: String,
    pub quantity: u64,
    pub unit_price: f64,
    pub customer_name: Option<String>,
    pub user_id: String,
}

impl SaleCmd {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        item_name: impl Into<String>,
        quantity: u64,
        unit_price: f64,
    ) -> Self {
        Self {
            item_name: item_name.into(),
            quantity,
            unit_price,
            customer_name: None,
            user_id: user_id.into(),
        }
    }

    #[must_use]
    pub fn customer_name(mut self, customer_name: impl Into<String>) -> Self {
        self.customer_name = Some(customer_name.into());
        self
    }
}

/// Record a purchase of `quantity` units of `item_name` at `unit_cost` each.
#[derive(Clone, Debug)]
pub struct PurchaseCmd {
    pub item_name: String,
    pub quantity: u64,
    pub unit_cost: f64,
    pub supplier_name: Option<String>,
    pub user_id: String,
}

impl PurchaseCmd {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        item_name: impl Into<String>,
        quantity: u64,
        unit_cost: f64,
    ) -> Self {
        Self {
            item_name: item_name.into(),
            quantity,
            unit_cost,
            supplier_name: None,
            user_id: user_id.into(),
        }
    }

    #[must_use]
    pub fn supplier_name(mut self, supplier_name: impl Into<String>) -> Self {
        self.supplier_name = Some(supplier_name.into());
        self
    }
}
