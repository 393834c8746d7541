use anyhow::anyhow;
use tracing::instrument;
use uuid::Uuid;

use classhub_core::AppError;
use classhub_db::{EnrollmentStore, Store};
use classhub_models::Enrollment;

pub struct EnrollmentService;

impl EnrollmentService {
    #[instrument(skip(store))]
    pub async fn get(store: &dyn Store, email: &str, class_id: Uuid) -> Result<Enrollment, AppError> {
        store
            .find_enrollment(email, class_id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Enrollment not found")))
    }

    #[instrument(skip(store))]
    pub async fn list(store: &dyn Store, email: &str) -> Result<Vec<Enrollment>, AppError> {
        Ok(store.list_enrollments(email).await?)
    }
}
