//! Advance payments made to suppliers, settled once the goods arrive.
//!
//! `settled` only ever flips from `false` to `true`.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdvancePayment {
    pub date: DateTime<Utc>,
    pub supplier_name: String,
    pub amount: f64,
    pub purpose: String,
    pub settled: bool,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "advance_payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub owner: String,
    pub recorded_at: DateTimeUtc,
    pub supplier_name: String,
    pub amount: f64,
    pub purpose: String,
    pub settled: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AdvancePayment {
    fn from(model: Model) -> Self {
        Self {
            date: model.recorded_at,
            supplier_name: model.supplier_name,
            amount: model.amount,
            purpose: model.purpose,
            settled: model.settled,
        }
    }
}
