use anyhow::anyhow;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use classhub_core::AppError;
use classhub_db::{ClassStore, Store};
use classhub_models::{
    Class, ClassChanges, ClassFilter, ClassStatus, DeleteResult, InsertResult, NewClass,
    UpdateResult,
};

pub struct ClassService;

impl ClassService {
    /// Publicly listed classes: active ones, optionally of one difficulty.
    #[instrument(skip(store))]
    pub async fn list_active(
        store: &dyn Store,
        difficulty: Option<String>,
    ) -> Result<Vec<Class>, AppError> {
        let filter = ClassFilter {
            difficulty,
            ..ClassFilter::active()
        };
        Ok(store.list_classes(&filter).await?)
    }

    #[instrument(skip(store))]
    pub async fn get_class(store: &dyn Store, id: Uuid) -> Result<Class, AppError> {
        store
            .find_class(id)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Class not found")))
    }

    #[instrument(skip(store))]
    pub async fn popular(store: &dyn Store) -> Result<Vec<Class>, AppError> {
        Ok(store.popular_classes().await?)
    }

    /// Active classes taught by `email`.
    #[instrument(skip(store))]
    pub async fn list_by_instructor(
        store: &dyn Store,
        email: &str,
    ) -> Result<Vec<Class>, AppError> {
        let filter = ClassFilter {
            instructor_email: Some(email.to_string()),
            ..ClassFilter::active()
        };
        Ok(store.list_classes(&filter).await?)
    }

    /// Every class owned by `email`, whatever its status.
    #[instrument(skip(store))]
    pub async fn list_owned(store: &dyn Store, email: &str) -> Result<Vec<Class>, AppError> {
        let filter = ClassFilter {
            instructor_email: Some(email.to_string()),
            ..ClassFilter::default()
        };
        Ok(store.list_classes(&filter).await?)
    }

    #[instrument(skip(store, class), fields(instructor.email = %class.instructor_email))]
    pub async fn create(store: &dyn Store, class: NewClass) -> Result<InsertResult, AppError> {
        let id = store.insert_class(class).await?;
        info!(class.id = %id, "Class submitted for review");
        Ok(InsertResult::new(id))
    }

    /// Fetches a class and checks that `email` owns it.
    ///
    /// # Errors
    ///
    /// 404 if the class does not exist, 403 if someone else owns it.
    #[instrument(skip(store))]
    pub async fn get_owned(store: &dyn Store, id: Uuid, email: &str) -> Result<Class, AppError> {
        let class = Self::get_class(store, id).await?;
        if class.instructor_email != email {
            warn!(class.id = %id, "Instructor does not own class");
            return Err(AppError::forbidden("forbidden access"));
        }
        Ok(class)
    }

    #[instrument(skip(store, changes))]
    pub async fn update_owned(
        store: &dyn Store,
        id: Uuid,
        email: &str,
        changes: &ClassChanges,
    ) -> Result<UpdateResult, AppError> {
        Self::get_owned(store, id, email).await?;
        Ok(store.update_class(id, changes).await?)
    }

    #[instrument(skip(store))]
    pub async fn delete_owned(
        store: &dyn Store,
        id: Uuid,
        email: &str,
    ) -> Result<DeleteResult, AppError> {
        Self::get_owned(store, id, email).await?;
        let result = store.delete_class(id).await?;
        info!(class.id = %id, "Class deleted");
        Ok(result)
    }

    /// Admin listing, optionally restricted to one status.
    #[instrument(skip(store))]
    pub async fn list_all(
        store: &dyn Store,
        status: Option<ClassStatus>,
    ) -> Result<Vec<Class>, AppError> {
        let filter = ClassFilter {
            status,
            ..ClassFilter::default()
        };
        Ok(store.list_classes(&filter).await?)
    }

    #[instrument(skip(store, feedback))]
    pub async fn moderate(
        store: &dyn Store,
        id: Uuid,
        status: ClassStatus,
        feedback: Option<String>,
    ) -> Result<UpdateResult, AppError> {
        let feedback = feedback.unwrap_or_default();
        let result = store.moderate_class(id, status, &feedback).await?;
        info!(class.id = %id, %status, upserted = result.upserted_id.is_some(), "Class moderated");
        Ok(result)
    }
}
