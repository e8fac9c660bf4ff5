use sea_orm::{ActiveValue, TransactionTrait, prelude::*, sea_query::OnConflict};

use crate::{ResultEngine, UserProfile, profiles, util::required_text};

use super::{Engine, access::require_member, with_tx};

impl Engine {
    /// Return the caller's own profile, if one was saved.
    pub async fn caller_profile(&self, user_id: &str) -> ResultEngine<Option<UserProfile>> {
        require_member(&self.database, user_id).await?;
        let model = profiles::Entity::find_by_id(user_id.to_string())
            .one(&self.database)
            .await?;
        Ok(model.map(UserProfile::from))
    }

    /// Create or replace the caller's profile.
    pub async fn save_profile(&self, name: &str, user_id: &str) -> ResultEngine<UserProfile> {
        let lock = self.identity_lock(user_id);
        let _guard = lock.lock().await;
        with_tx!(self, |db_tx| {
            require_member(&db_tx, user_id).await?;
            let name = required_text(name, "profile name")?;

            profiles::Entity::insert(profiles::ActiveModel {
                identity: ActiveValue::Set(user_id.to_string()),
                name: ActiveValue::Set(name.clone()),
            })
            .on_conflict(
                OnConflict::column(profiles::Column::Identity)
                    .update_column(profiles::Column::Name)
                    .to_owned(),
            )
            .exec_without_returning(&db_tx)
            .await?;

            tracing::info!(user_id, "profile saved");
            Ok(UserProfile { name })
        })
    }

    /// Return the profile stored for `identity`.
    ///
    /// Any member may read any profile.
    pub async fn user_profile(
        &self,
        identity: &str,
        user_id: &str,
    ) -> ResultEngine<Option<UserProfile>> {
        require_member(&self.database, user_id).await?;
        tracing::debug!(user_id, identity, "profile lookup");
        let model = profiles::Entity::find_by_id(identity.to_string())
            .one(&self.database)
            .await?;
        Ok(model.map(UserProfile::from))
    }
}
