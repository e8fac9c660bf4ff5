use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod daily {
    use super::*;

    /// Request body for `POST /income` and `POST /expense`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct DailyRecordNew {
        pub amount: f64,
        pub category: String,
        /// Blank or missing descriptions are stored as `"No description"`.
        #[serde(default)]
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DailyRecordView {
        pub date: DateTime<Utc>,
        pub category: String,
        pub description: String,
        pub amount: f64,
    }
}

pub mod sale {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SaleNew {
        pub item_name: String,
        pub quantity: u64,
        pub unit_price: f64,
        /// Absent and `""` are kept distinct.
        #[serde(default)]
        pub customer_name: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SaleView {
        pub date: DateTime<Utc>,
        pub item_name: String,
        pub quantity: u64,
        pub unit_price: f64,
        /// `quantity * unit_price`, computed when the sale was recorded.
        pub total_amount: f64,
        pub customer_name: Option<String>,
    }
}

pub mod purchase {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseNew {
        pub item_name: String,
        pub quantity: u64,
        pub unit_cost: f64,
        #[serde(default)]
        pub supplier_name: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseView {
        pub date: DateTime<Utc>,
        pub item_name: String,
        pub quantity: u64,
        pub unit_cost: f64,
        pub total_cost: f64,
        pub supplier_name: Option<String>,
    }
}

pub mod liability {
    use super::*;

    /// Request body for `POST /loans` and `POST /advances`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct LiabilityNew {
        pub amount: f64,
        pub supplier_name: String,
        /// Blank or missing purposes fall back to a per-kind default.
        #[serde(default)]
        pub purpose: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SupplierLoanView {
        pub date: DateTime<Utc>,
        pub supplier_name: String,
        pub amount: f64,
        pub purpose: String,
        pub repaid: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AdvancePaymentView {
        pub date: DateTime<Utc>,
        pub supplier_name: String,
        pub amount: f64,
        pub purpose: String,
        pub settled: bool,
    }

    /// Response body for the repay/settle endpoints.
    ///
    /// `false` means the index was out of range or the record was already
    /// settled; it is not an error.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettleResponse {
        pub settled: bool,
    }
}

pub mod role {
    use super::*;

    /// Role of a caller identity.
    ///
    /// The server treats roles as:
    /// - `admin`: can assign roles to other identities.
    /// - `user`: default role, full access to its own records.
    /// - `guest`: can only query its own role.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum UserRole {
        Admin,
        User,
        Guest,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RoleView {
        pub role: UserRole,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IsAdminView {
        pub is_admin: bool,
    }

    /// Request body for `PUT /role`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RoleAssign {
        pub identity: String,
        pub role: UserRole,
    }
}

pub mod profile {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserProfile {
        pub name: String,
    }
}
