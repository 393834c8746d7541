//! Storage traits.
//!
//! Each collection gets its own trait so call sites read naturally
//! (`store.find_class(id)`), and [`Store`] bundles them behind a single
//! `Arc<dyn Store>` in application state.

use async_trait::async_trait;
use uuid::Uuid;

use classhub_models::{
    CartItem, Class, ClassChanges, ClassFilter, ClassStatus, DeleteResult, Enrollment,
    InsertOutcome, NewCartItem, NewClass, NewUser, PaymentRecord, Purchase, PurchaseReceipt,
    UpdateResult, User, UserRole,
};

use crate::error::StoreResult;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Inserts a user unless one with the same email already exists.
    async fn insert_user(&self, user: NewUser) -> StoreResult<InsertOutcome>;

    /// Lists users in registration order, optionally restricted to one role.
    async fn list_users(&self, role: Option<UserRole>) -> StoreResult<Vec<User>>;

    /// Sets or clears the role of a user.
    async fn update_user_role(&self, id: Uuid, role: Option<UserRole>)
    -> StoreResult<UpdateResult>;

    async fn delete_user(&self, id: Uuid) -> StoreResult<DeleteResult>;
}

#[async_trait]
pub trait ClassStore: Send + Sync {
    /// Lists classes matching `filter` in creation order.
    async fn list_classes(&self, filter: &ClassFilter) -> StoreResult<Vec<Class>>;

    /// All classes, most enrolled first.
    async fn popular_classes(&self) -> StoreResult<Vec<Class>>;

    async fn find_class(&self, id: Uuid) -> StoreResult<Option<Class>>;

    /// Inserts a class in `pending` status with nobody enrolled.
    async fn insert_class(&self, class: NewClass) -> StoreResult<Uuid>;

    /// Applies the fields present in `changes` and leaves the rest untouched.
    async fn update_class(&self, id: Uuid, changes: &ClassChanges) -> StoreResult<UpdateResult>;

    async fn delete_class(&self, id: Uuid) -> StoreResult<DeleteResult>;

    /// Sets the moderation status and feedback of a class.
    ///
    /// When no class has this id, a placeholder record carrying only the
    /// id, status and feedback is created and its id is reported as
    /// `upserted_id`.
    async fn moderate_class(
        &self,
        id: Uuid,
        status: ClassStatus,
        feedback: &str,
    ) -> StoreResult<UpdateResult>;
}

#[async_trait]
pub trait CartStore: Send + Sync {
    /// Adds a class to a user's cart unless that user already has it there.
    async fn insert_cart_item(&self, item: NewCartItem) -> StoreResult<InsertOutcome>;

    /// Deletes a cart entry, but only if it belongs to `email`.
    async fn delete_cart_item(&self, id: Uuid, email: &str) -> StoreResult<DeleteResult>;

    async fn list_cart_items(&self, email: &str) -> StoreResult<Vec<CartItem>>;
}

#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    async fn find_enrollment(&self, email: &str, class_id: Uuid)
    -> StoreResult<Option<Enrollment>>;

    async fn list_enrollments(&self, email: &str) -> StoreResult<Vec<Enrollment>>;
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Payments made by `email`, newest first.
    async fn list_payments(&self, email: &str) -> StoreResult<Vec<PaymentRecord>>;

    /// Completes a purchase as one unit of work.
    ///
    /// Takes a seat from the class, removes the matching cart entry,
    /// records the enrollment and records the payment. Either all of it
    /// happens or none of it does.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`](crate::StoreError::NotFound) if the class does not exist
    /// - [`StoreError::NoSeatsAvailable`](crate::StoreError::NoSeatsAvailable) if the class is full
    /// - [`StoreError::AlreadyEnrolled`](crate::StoreError::AlreadyEnrolled) if the user is already enrolled
    async fn purchase(&self, purchase: Purchase) -> StoreResult<PurchaseReceipt>;
}

/// Everything the API needs from storage.
#[async_trait]
pub trait Store: UserStore + ClassStore + CartStore + EnrollmentStore + PaymentStore {
    /// Checks that the backing storage is reachable.
    async fn ping(&self) -> StoreResult<()>;
}
