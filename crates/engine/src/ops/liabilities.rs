use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    AdvancePayment, ResultEngine, SupplierLoan, advance_payments, supplier_loans,
    util::{positive_amount, required_text, text_or_default},
};

use super::{Engine, access::require_member, with_tx};

const DEFAULT_LOAN_PURPOSE: &str = "Personal use";
const DEFAULT_ADVANCE_PURPOSE: &str = "Advance payment";

impl Engine {
    /// Record money lent to a supplier. New loans start unrepaid.
    ///
    /// A blank `purpose` is stored as `"Personal use"`.
    pub async fn add_supplier_loan(
        &self,
        amount: f64,
        supplier_name: &str,
        purpose: &str,
        user_id: &str,
    ) -> ResultEngine<SupplierLoan> {
        let recorded_at = Utc::now();
        let lock = self.identity_lock(user_id);
        let _guard = lock.lock().await;
        with_tx!(self, |db_tx| {
            require_member(&db_tx, user_id).await?;
            let amount = positive_amount(amount, "amount")?;
            let supplier_name = required_text(supplier_name, "supplier name")?;

            let model = supplier_loans::ActiveModel {
                owner: ActiveValue::Set(user_id.to_string()),
                recorded_at: ActiveValue::Set(recorded_at),
                supplier_name: ActiveValue::Set(supplier_name),
                amount: ActiveValue::Set(amount),
                purpose: ActiveValue::Set(text_or_default(purpose, DEFAULT_LOAN_PURPOSE)),
                repaid: ActiveValue::Set(false),
                ..Default::default()
            }
            .insert(&db_tx)
            .await?;

            tracing::info!(user_id, amount, "supplier loan added");
            Ok(SupplierLoan::from(model))
        })
    }

    /// Return the caller's supplier loans in insertion order, repaid ones included.
    pub async fn supplier_loans(&self, user_id: &str) -> ResultEngine<Vec<SupplierLoan>> {
        require_member(&self.database, user_id).await?;
        let models = supplier_loans::Entity::find()
            .filter(supplier_loans::Column::Owner.eq(user_id))
            .order_by_asc(supplier_loans::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(SupplierLoan::from).collect())
    }

    /// Remove every supplier loan of the caller and return how many were removed.
    ///
    /// Indices used by [`Engine::repay_supplier_loan`] restart from zero afterwards.
    pub async fn delete_supplier_loans(&self, user_id: &str) -> ResultEngine<u64> {
        let lock = self.identity_lock(user_id);
        let _guard = lock.lock().await;
        with_tx!(self, |db_tx| {
            require_member(&db_tx, user_id).await?;
            let result = supplier_loans::Entity::delete_many()
                .filter(supplier_loans::Column::Owner.eq(user_id))
                .exec(&db_tx)
                .await?;
            tracing::info!(user_id, removed = result.rows_affected, "supplier loans cleared");
            Ok(result.rows_affected)
        })
    }

    /// Record an advance paid to a supplier. New advances start unsettled.
    ///
    /// A blank `purpose` is stored as `"Advance payment"`.
    pub async fn add_advance_payment(
        &self,
        amount: f64,
        supplier_name: &str,
        purpose: &str,
        user_id: &str,
    ) -> ResultEngine<AdvancePayment> {
        let recorded_at = Utc::now();
        let lock = self.identity_lock(user_id);
        let _guard = lock.lock().await;
        with_tx!(self, |db_tx| {
            require_member(&db_tx, user_id).await?;
            let amount = positive_amount(amount, "amount")?;
            let supplier_name = required_text(supplier_name, "supplier name")?;

            let model = advance_payments::ActiveModel {
                owner: ActiveValue::Set(user_id.to_string()),
                recorded_at: ActiveValue::Set(recorded_at),
                supplier_name: ActiveValue::Set(supplier_name),
                amount: ActiveValue::Set(amount),
                purpose: ActiveValue::Set(text_or_default(purpose, DEFAULT_ADVANCE_PURPOSE)),
                settled: ActiveValue::Set(false),
                ..Default::default()
            }
            .insert(&db_tx)
            .await?;

            tracing::info!(user_id, amount, "advance payment added");
            Ok(AdvancePayment::from(model))
        })
    }

    /// Return the caller's advance payments in insertion order, settled ones included.
    pub async fn advance_payments(&self, user_id: &str) -> ResultEngine<Vec<AdvancePayment>> {
        require_member(&self.database, user_id).await?;
        let models = advance_payments::Entity::find()
            .filter(advance_payments::Column::Owner.eq(user_id))
            .order_by_asc(advance_payments::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(AdvancePayment::from).collect())
    }

    /// Remove every advance payment of the caller and return how many were removed.
    pub async fn delete_advance_payments(&self, user_id: &str) -> ResultEngine<u64> {
        let lock = self.identity_lock(user_id);
        let _guard = lock.lock().await;
        with_tx!(self, |db_tx| {
            require_member(&db_tx, user_id).await?;
            let result = advance_payments::Entity::delete_many()
                .filter(advance_payments::Column::Owner.eq(user_id))
                .exec(&db_tx)
                .await?;
            tracing::info!(user_id, removed = result.rows_affected, "advance payments cleared");
            Ok(result.rows_affected)
        })
    }
}
