//! Supplier loans: money lent to a supplier that is later repaid.
//!
//! `repaid` only ever flips from `false` to `true`.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupplierLoan {
    pub date: DateTime<Utc>,
    pub supplier_name: String,
    pub amount: f64,
    pub purpose: String,
    pub repaid: bool,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "supplier_loans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub owner: String,
    pub recorded_at: DateTimeUtc,
    pub supplier_name: String,
    pub amount: f64,
    pub purpose: String,
    pub repaid: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SupplierLoan {
    fn from(model: Model) -> Self {
        Self {
            date: model.recorded_at,
            supplier_name: model.supplier_name,
            amount: model.amount,
            purpose: model.purpose,
            repaid: model.repaid,
        }
    }
}
