//! Daily income and expense entries.
//!
//! Both kinds share the `daily_records` table; the `kind` column decides which
//! caller-facing collection a row belongs to.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Income,
    Expense,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Lenient parse used by the read path: unknown discriminators are `None`.
    pub fn parse(value: &str) -> Option<Self> {
        Self::try_from(value).ok()
    }
}

impl TryFrom<&str> for RecordKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidInput(format!(
                "invalid record kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: DateTime<Utc>,
    pub category: String,
    pub description: String,
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "daily_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub owner: String,
    pub kind: String,
    pub recorded_at: DateTimeUtc,
    pub category: String,
    pub description: String,
    pub amount: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for DailyRecord {
    fn from(model: Model) -> Self {
        Self {
            date: model.recorded_at,
            category: model.category,
            description: model.description,
            amount: model.amount,
        }
    }
}
