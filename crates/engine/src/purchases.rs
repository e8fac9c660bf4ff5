//! Purchase records.
//!
//! `total_cost` is computed once, at write time, as `quantity * unit_cost`.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{EngineError, util::stored_quantity};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub date: DateTime<Utc>,
    pub item_name: String,
    pub quantity: u64,
    pub unit_cost: f64,
    pub total_cost: f64,
    pub supplier_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "purchases")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub owner: String,
    pub recorded_at: DateTimeUtc,
    pub item_name: String,
    pub quantity: i64,
    pub unit_cost: f64,
    pub total_cost: f64,
    pub supplier_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Purchase {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            date: model.recorded_at,
            item_name: model.item_name,
            quantity: stored_quantity(model.quantity)?,
            unit_cost: model.unit_cost,
            total_cost: model.total_cost,
            supplier_name: model.supplier_name,
        })
    }
}
