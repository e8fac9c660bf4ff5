use sea_orm::{
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*, sea_query::Expr,
};

use crate::{ResultEngine, advance_payments, supplier_loans};

use super::{Engine, access::require_member, with_tx};

/// Generates an index-addressed settlement method.
///
/// `index` is the position in the caller's collection, ordered by insertion.
/// The flag is flipped with a conditional `UPDATE ... WHERE flag = false`, so
/// at most one attempt per record ever reports `true`. Out of range and
/// already-settled indices return `false` and write nothing.
macro_rules! impl_settle_by_index {
    ($(#[$meta:meta])* $fn_name:ident, $entity:ident, $flag:ident, $label:literal) => {
        $(#[$meta])*
        pub async fn $fn_name(&self, index: u64, user_id: &str) -> ResultEngine<bool> {
            let lock = self.identity_lock(user_id);
            let _guard = lock.lock().await;
            with_tx!(self, |db_tx| {
                require_member(&db_tx, user_id).await?;

                // SQLite offsets are signed 64-bit.
                let model = if i64::try_from(index).is_ok() {
                    $entity::Entity::find()
                        .filter($entity::Column::Owner.eq(user_id))
                        .order_by_asc($entity::Column::Id)
                        .offset(index)
                        .limit(1)
                        .one(&db_tx)
                        .await?
                } else {
                    None
                };

                let settled = match model {
                    None => {
                        tracing::debug!(
                            user_id,
                            index,
                            record = $label,
                            "settlement index out of range"
                        );
                        false
                    }
                    Some(model) => {
                        let result = $entity::Entity::update_many()
                            .col_expr($entity::Column::$flag, Expr::value(true))
                            .filter($entity::Column::Id.eq(model.id))
                            .filter($entity::Column::$flag.eq(false))
                            .exec(&db_tx)
                            .await?;
                        result.rows_affected == 1
                    }
                };
                if settled {
                    tracing::info!(user_id, index, record = $label, "record settled");
                }
                Ok(settled)
            })
        }
    };
}

impl Engine {
    impl_settle_by_index!(
        /// Mark the `index`-th supplier loan of the caller as repaid.
        ///
        /// Returns `false` when the index is out of range or the loan was
        /// already repaid.
        repay_supplier_loan,
        supplier_loans,
        Repaid,
        "supplier loan"
    );

    impl_settle_by_index!(
        /// Mark the `index`-th advance payment of the caller as settled.
        ///
        /// Returns `false` when the index is out of range or the payment was
        /// already settled.
        settle_advance_payment,
        advance_payments,
        Settled,
        "advance payment"
    );
}
