use tracing::{info, instrument};
use uuid::Uuid;

use classhub_core::AppError;
use classhub_db::{Store, UserStore};
use classhub_models::{
    DeleteResult, InsertOutcome, InsertResponse, NewUser, RoleResponse, UpdateResult, User,
    UserRole,
};

pub struct UserService;

impl UserService {
    /// Registers a user. Registering an email twice is a no-op that
    /// reports `{"exists": true}`.
    #[instrument(skip(store, user), fields(user.email = %user.email))]
    pub async fn register(store: &dyn Store, user: NewUser) -> Result<InsertResponse, AppError> {
        let outcome = store.insert_user(user).await?;
        if let InsertOutcome::Inserted(id) = outcome {
            info!(user.id = %id, "User registered");
        }
        Ok(outcome.into())
    }

    /// Role of the user registered under `email`; `None` when unset or
    /// when nobody is registered under it.
    #[instrument(skip(store))]
    pub async fn get_role(store: &dyn Store, email: &str) -> Result<RoleResponse, AppError> {
        let user = store.find_user_by_email(email).await?;
        Ok(RoleResponse {
            role: user.and_then(|u| u.role),
        })
    }

    #[instrument(skip(store))]
    pub async fn list_users(
        store: &dyn Store,
        role: Option<UserRole>,
    ) -> Result<Vec<User>, AppError> {
        Ok(store.list_users(role).await?)
    }

    #[instrument(skip(store))]
    pub async fn update_role(
        store: &dyn Store,
        id: Uuid,
        role: Option<UserRole>,
    ) -> Result<UpdateResult, AppError> {
        let result = store.update_user_role(id, role).await?;
        info!(matched = result.matched_count, "User role updated");
        Ok(result)
    }

    #[instrument(skip(store))]
    pub async fn delete_user(store: &dyn Store, id: Uuid) -> Result<DeleteResult, AppError> {
        let result = store.delete_user(id).await?;
        info!(deleted = result.deleted_count, "User deleted");
        Ok(result)
    }
}
