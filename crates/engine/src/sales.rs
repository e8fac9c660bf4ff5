//! Sales transactions.
//!
//! `total_amount` is computed once, at write time, as `quantity * unit_price`
//! and is never recomputed.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{EngineError, util::stored_quantity};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub date: DateTime<Utc>,
    pub item_name: String,
    pub quantity: u64,
    pub unit_price: f64,
    pub total_amount: f64,
    pub customer_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub owner: String,
    pub recorded_at: DateTimeUtc,
    pub item_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_amount: f64,
    pub customer_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Sale {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            date: model.recorded_at,
            item_name: model.item_name,
            quantity: stored_quantity(model.quantity)?,
            unit_price: model.unit_price,
            total_amount: model.total_amount,
            customer_name: model.customer_name,
        })
    }
}
