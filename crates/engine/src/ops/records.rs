use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    DailyRecord, Purchase, PurchaseCmd, RecordKind, ResultEngine, Sale, SaleCmd, daily_records,
    purchases, sales,
    util::{
        line_total, optional_text, positive_amount, quantity_column, required_text,
        text_or_default,
    },
};

use super::{Engine, access::require_member, with_tx};

const DEFAULT_DESCRIPTION: &str = "No description";

/// Generates an append method for one daily record kind.
macro_rules! impl_daily_record {
    ($(#[$meta:meta])* $fn_name:ident, $kind:expr) => {
        $(#[$meta])*
        pub async fn $fn_name(
            &self,
            amount: f64,
            category: &str,
            description: &str,
            user_id: &str,
        ) -> ResultEngine<DailyRecord> {
            self.add_daily_record($kind, amount, category, description, user_id)
                .await
        }
    };
}

impl Engine {
    impl_daily_record!(
        /// Append an income entry to the caller's income collection.
        add_income_record,
        RecordKind::Income
    );

    impl_daily_record!(
        /// Append an expense entry to the caller's expense collection.
        add_expense_record,
        RecordKind::Expense
    );

    async fn add_daily_record(
        &self,
        kind: RecordKind,
        amount: f64,
        category: &str,
        description: &str,
        user_id: &str,
    ) -> ResultEngine<DailyRecord> {
        let recorded_at = Utc::now();
        let lock = self.identity_lock(user_id);
        let _guard = lock.lock().await;
        with_tx!(self, |db_tx| {
            require_member(&db_tx, user_id).await?;
            let amount = positive_amount(amount, "amount")?;
            let category = required_text(category, "category")?;

            let model = daily_records::ActiveModel {
                owner: ActiveValue::Set(user_id.to_string()),
                kind: ActiveValue::Set(kind.as_str().to_string()),
                recorded_at: ActiveValue::Set(recorded_at),
                category: ActiveValue::Set(category),
                description: ActiveValue::Set(text_or_default(description, DEFAULT_DESCRIPTION)),
                amount: ActiveValue::Set(amount),
                ..Default::default()
            }
            .insert(&db_tx)
            .await?;

            tracing::info!(user_id, kind = kind.as_str(), amount, "daily record added");
            Ok(DailyRecord::from(model))
        })
    }

    /// Return the caller's daily records of `kind` in insertion order.
    ///
    /// `kind` is matched exactly against `"income"` and `"expense"`. Any other
    /// value yields an empty list rather than an error.
    pub async fn daily_records(
        &self,
        kind: &str,
        user_id: &str,
    ) -> ResultEngine<Vec<DailyRecord>> {
        require_member(&self.database, user_id).await?;
        let Some(kind) = RecordKind::parse(kind) else {
            tracing::debug!(user_id, kind, "unknown daily record kind");
            return Ok(Vec::new());
        };

        let models = daily_records::Entity::find()
            .filter(daily_records::Column::Owner.eq(user_id))
            .filter(daily_records::Column::Kind.eq(kind.as_str()))
            .order_by_asc(daily_records::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(DailyRecord::from).collect())
    }

    /// Remove every income and expense entry of the caller.
    ///
    /// Returns the number of removed rows.
    pub async fn delete_daily_records(&self, user_id: &str) -> ResultEngine<u64> {
        let lock = self.identity_lock(user_id);
        let _guard = lock.lock().await;
        with_tx!(self, |db_tx| {
            require_member(&db_tx, user_id).await?;
            let result = daily_records::Entity::delete_many()
                .filter(daily_records::Column::Owner.eq(user_id))
                .exec(&db_tx)
                .await?;
            tracing::info!(user_id, removed = result.rows_affected, "daily records cleared");
            Ok(result.rows_affected)
        })
    }

    /// Append a sale. The total is `quantity * unit_price`, fixed at write time.
    pub async fn add_sale(&self, cmd: SaleCmd) -> ResultEngine<Sale> {
        let recorded_at = Utc::now();
        let user_id = cmd.user_id.as_str();
        let lock = self.identity_lock(user_id);
        let _guard = lock.lock().await;
        with_tx!(self, |db_tx| {
            require_member(&db_tx, user_id).await?;
            let item_name = required_text(&cmd.item_name, "item name")?;
            let quantity = quantity_column(cmd.quantity)?;
            let unit_price = positive_amount(cmd.unit_price, "unit price")?;
            let total_amount = line_total(cmd.quantity, unit_price, "total amount")?;

            let model = sales::ActiveModel {
                owner: ActiveValue::Set(user_id.to_string()),
                recorded_at: ActiveValue::Set(recorded_at),
                item_name: ActiveValue::Set(item_name),
                quantity: ActiveValue::Set(quantity),
                unit_price: ActiveValue::Set(unit_price),
                total_amount: ActiveValue::Set(total_amount),
                customer_name: ActiveValue::Set(optional_text(cmd.customer_name.as_deref())),
                ..Default::default()
            }
            .insert(&db_tx)
            .await?;

            tracing::info!(user_id, quantity, total_amount, "sale added");
            Sale::try_from(model)
        })
    }

    /// Return the caller's sales in insertion order.
    pub async fn sales(&self, user_id: &str) -> ResultEngine<Vec<Sale>> {
        require_member(&self.database, user_id).await?;
        sales::Entity::find()
            .filter(sales::Column::Owner.eq(user_id))
            .order_by_asc(sales::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Sale::try_from)
            .collect()
    }

    /// Remove every sale of the caller and return how many were removed.
    pub async fn delete_sales(&self, user_id: &str) -> ResultEngine<u64> {
        let lock = self.identity_lock(user_id);
        let _guard = lock.lock().await;
        with_tx!(self, |db_tx| {
            require_member(&db_tx, user_id).await?;
            let result = sales::Entity::delete_many()
                .filter(sales::Column::Owner.eq(user_id))
                .exec(&db_tx)
                .await?;
            tracing::info!(user_id, removed = result.rows_affected, "sales cleared");
            Ok(result.rows_affected)
        })
    }

    /// Append a purchase. The total is `quantity * unit_cost`, fixed at write time.
    pub async fn add_purchase(&self, cmd: PurchaseCmd) -> ResultEngine<Purchase> {
        let recorded_at = Utc::now();
        let user_id = cmd.user_id.as_str();
        let lock = self.identity_lock(user_id);
        let _guard = lock.lock().await;
        with_tx!(self, |db_tx| {
            require_member(&db_tx, user_id).await?;
            let item_name = required_text(&cmd.item_name, "item name")?;
            let quantity = quantity_column(cmd.quantity)?;
            let unit_cost = positive_amount(cmd.unit_cost, "unit cost")?;
            let total_cost = line_total(cmd.quantity, unit_cost, "total cost")?;

            let model = purchases::ActiveModel {
                owner: ActiveValue::Set(user_id.to_string()),
                recorded_at: ActiveValue::Set(recorded_at),
                item_name: ActiveValue::Set(item_name),
                quantity: ActiveValue::Set(quantity),
                unit_cost: ActiveValue::Set(unit_cost),
                total_cost: ActiveValue::Set(total_cost),
                supplier_name: ActiveValue::Set(optional_text(cmd.supplier_name.as_deref())),
                ..Default::default()
            }
            .insert(&db_tx)
            .await?;

            tracing::info!(user_id, quantity, total_cost, "purchase added");
            Purchase::try_from(model)
        })
    }

    /// Return the caller's purchases in insertion order.
    pub async fn purchases(&self, user_id: &str) -> ResultEngine<Vec<Purchase>> {
        require_member(&self.database, user_id).await?;
        purchases::Entity::find()
            .filter(purchases::Column::Owner.eq(user_id))
            .order_by_asc(purchases::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Purchase::try_from)
            .collect()
    }

    /// Remove every purchase of the caller and return how many were removed.
    pub async fn delete_purchases(&self, user_id: &str) -> ResultEngine<u64> {
        let lock = self.identity_lock(user_id);
        let _guard = lock.lock().await;
        with_tx!(self, |db_tx| {
            require_member(&db_tx, user_id).await?;
            let result = purchases::Entity::delete_many()
                .filter(purchases::Column::Owner.eq(user_id))
                .exec(&db_tx)
                .await?;
            tracing::info!(user_id, removed = result.rows_affected, "purchases cleared");
            Ok(result.rows_affected)
        })
    }
}
