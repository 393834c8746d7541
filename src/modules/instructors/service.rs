use anyhow::anyhow;
use tracing::instrument;
use uuid::Uuid;

use classhub_core::AppError;
use classhub_db::{Store, UserStore};
use classhub_models::{User, UserRole};

pub struct InstructorService;

impl InstructorService {
    #[instrument(skip(store))]
    pub async fn list(store: &dyn Store) -> Result<Vec<User>, AppError> {
        Ok(store.list_users(Some(UserRole::Instructor)).await?)
    }

    /// A user is only returned here while they hold the instructor role.
    #[instrument(skip(store))]
    pub async fn get(store: &dyn Store, id: Uuid) -> Result<User, AppError> {
        store
            .find_user_by_id(id)
            .await?
            .filter(|user| user.role == Some(UserRole::Instructor))
            .ok_or_else(|| AppError::not_found(anyhow!("Instructor not found")))
    }
}
