use sea_orm::{ConnectionTrait, TransactionTrait, prelude::*, sea_query::OnConflict};

use crate::{EngineError, ResultEngine, UserRole, roles, util::required_text};

use super::{Engine, with_tx};

/// Returns the stored role of `user_id`, assigning [`UserRole::User`] on first
/// contact.
///
/// The default is written with `ON CONFLICT DO NOTHING`, so concurrent first
/// observations of the same identity settle on a single row.
pub(super) async fn resolve_role<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
) -> ResultEngine<UserRole> {
    if user_id.trim().is_empty() {
        return Err(EngineError::Forbidden("anonymous caller".to_string()));
    }

    roles::Entity::insert(roles::ActiveModel::new(user_id, UserRole::default()))
        .on_conflict(
            OnConflict::column(roles::Column::Identity)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    let model = roles::Entity::find_by_id(user_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("role for {user_id}")))?;
    UserRole::try_from(model.role.as_str())
}

/// Resolves the caller and rejects guests.
pub(super) async fn require_member<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
) -> ResultEngine<UserRole> {
    let role = resolve_role(db, user_id).await?;
    if !role.is_member() {
        tracing::warn!(user_id, role = role.as_str(), "rejected non-member caller");
        return Err(EngineError::Forbidden(
            "caller is not an authenticated user".to_string(),
        ));
    }
    Ok(role)
}

async fn upsert_role<C: ConnectionTrait>(
    db: &C,
    identity: &str,
    role: UserRole,
) -> ResultEngine<()> {
    roles::Entity::insert(roles::ActiveModel::new(identity, role))
        .on_conflict(
            OnConflict::column(roles::Column::Identity)
                .update_column(roles::Column::Role)
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}

impl Engine {
    /// Returns the caller's role, persisting the default on first contact.
    pub async fn caller_role(&self, user_id: &str) -> ResultEngine<UserRole> {
        resolve_role(&self.database, user_id).await
    }

    pub async fn is_admin(&self, user_id: &str) -> ResultEngine<bool> {
        Ok(self.caller_role(user_id).await? == UserRole::Admin)
    }

    /// Overwrites the role of `target` (admin-only).
    pub async fn assign_role(
        &self,
        target: &str,
        role: UserRole,
        user_id: &str,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let caller_role = resolve_role(&db_tx, user_id).await?;
            if caller_role != UserRole::Admin {
                tracing::warn!(
                    user_id,
                    target_identity = target,
                    "rejected role assignment by non-admin"
                );
                return Err(EngineError::Forbidden(
                    "only admins can assign roles".to_string(),
                ));
            }
            let target = required_text(target, "target identity")?;
            upsert_role(&db_tx, &target, role).await?;
            tracing::info!(
                user_id,
                target_identity = %target,
                role = role.as_str(),
                "role assigned"
            );
            Ok(())
        })
    }

    /// Sets the role of `target` without any caller check.
    ///
    /// Operator entry point used to bootstrap the first admin; it is not
    /// reachable through the HTTP surface.
    pub async fn grant_role(&self, target: &str, role: UserRole) -> ResultEngine<()> {
        let target = required_text(target, "target identity")?;
        upsert_role(&self.database, &target, role).await?;
        tracing::info!(
            target_identity = %target,
            role = role.as_str(),
            "role granted by operator"
        );
        Ok(())
    }
}
