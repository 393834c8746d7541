//! In-memory store.
//!
//! All tables live behind one [`RwLock`], so each operation, including a
//! purchase, observes and mutates a consistent snapshot. Nothing is
//! persisted.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use classhub_models::{
    CartItem, Class, ClassChanges, ClassFilter, ClassStatus, DeleteResult, Enrollment,
    InsertOutcome, NewCartItem, NewClass, NewUser, PaymentRecord, Purchase, PurchaseReceipt,
    UpdateResult, User, UserRole,
};

use crate::error::{StoreError, StoreResult};
use crate::store::{CartStore, ClassStore, EnrollmentStore, PaymentStore, Store, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    classes: Vec<Class>,
    carts: Vec<CartItem>,
    enrollments: Vec<Enrollment>,
    payments: Vec<PaymentRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fully-formed user, replacing any user with the same email.
    pub async fn seed_user(&self, user: User) {
        let mut tables = self.tables.write().await;
        tables.users.retain(|u| u.email != user.email);
        tables.users.push(user);
    }

    /// Inserts a fully-formed class, replacing any class with the same id.
    pub async fn seed_class(&self, class: Class) {
        let mut tables = self.tables.write().await;
        tables.classes.retain(|c| c.id != class.id);
        tables.classes.push(class);
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<InsertOutcome> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Ok(InsertOutcome::AlreadyExists);
        }

        let id = Uuid::new_v4();
        tables.users.push(User {
            id,
            email: user.email,
            name: user.name,
            photo_url: user.photo_url,
            role: None,
            profile: user.profile,
            created_at: Utc::now(),
        });
        Ok(InsertOutcome::Inserted(id))
    }

    async fn list_users(&self, role: Option<UserRole>) -> StoreResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .filter(|u| role.is_none() || u.role == role)
            .cloned()
            .collect())
    }

    async fn update_user_role(
        &self,
        id: Uuid,
        role: Option<UserRole>,
    ) -> StoreResult<UpdateResult> {
        let mut tables = self.tables.write().await;
        match tables.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.role = role;
                Ok(UpdateResult::matched(1))
            }
            None => Ok(UpdateResult::matched(0)),
        }
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<DeleteResult> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        Ok(DeleteResult::new((before - tables.users.len()) as u64))
    }
}

#[async_trait]
impl ClassStore for MemoryStore {
    async fn list_classes(&self, filter: &ClassFilter) -> StoreResult<Vec<Class>> {
        let tables = self.tables.read().await;
        Ok(tables
            .classes
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn popular_classes(&self) -> StoreResult<Vec<Class>> {
        let tables = self.tables.read().await;
        let mut classes = tables.classes.clone();
        // Stable sort keeps creation order among ties.
        classes.sort_by(|a, b| b.enrolled.cmp(&a.enrolled));
        Ok(classes)
    }

    async fn find_class(&self, id: Uuid) -> StoreResult<Option<Class>> {
        let tables = self.tables.read().await;
        Ok(tables.classes.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_class(&self, class: NewClass) -> StoreResult<Uuid> {
        let mut tables = self.tables.write().await;
        let id = Uuid::new_v4();
        tables.classes.push(Class {
            id,
            name: class.name,
            image: class.image,
            info: class.info,
            price: class.price,
            seats: class.seats,
            enrolled: 0,
            difficulty: class.difficulty,
            instructor_name: class.instructor_name,
            instructor_email: class.instructor_email,
            status: ClassStatus::Pending,
            feedback: String::new(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn update_class(&self, id: Uuid, changes: &ClassChanges) -> StoreResult<UpdateResult> {
        let mut tables = self.tables.write().await;
        let Some(class) = tables.classes.iter_mut().find(|c| c.id == id) else {
            return Ok(UpdateResult::matched(0));
        };

        if let Some(name) = &changes.name {
            class.name = name.clone();
        }
        if let Some(seats) = changes.seats {
            class.seats = seats;
        }
        if let Some(price) = changes.price {
            class.price = price;
        }
        if changes.difficulty.is_some() {
            class.difficulty = changes.difficulty.clone();
        }
        if changes.image.is_some() {
            class.image = changes.image.clone();
        }
        if changes.info.is_some() {
            class.info = changes.info.clone();
        }
        Ok(UpdateResult::matched(1))
    }

    async fn delete_class(&self, id: Uuid) -> StoreResult<DeleteResult> {
        let mut tables = self.tables.write().await;
        let before = tables.classes.len();
        tables.classes.retain(|c| c.id != id);
        Ok(DeleteResult::new((before - tables.classes.len()) as u64))
    }

    async fn moderate_class(
        &self,
        id: Uuid,
        status: ClassStatus,
        feedback: &str,
    ) -> StoreResult<UpdateResult> {
        let mut tables = self.tables.write().await;
        if let Some(class) = tables.classes.iter_mut().find(|c| c.id == id) {
            class.status = status;
            class.feedback = feedback.to_string();
            return Ok(UpdateResult::matched(1));
        }

        tables.classes.push(Class {
            id,
            name: String::new(),
            image: None,
            info: None,
            price: 0.0,
            seats: 0,
            enrolled: 0,
            difficulty: None,
            instructor_name: None,
            instructor_email: String::new(),
            status,
            feedback: feedback.to_string(),
            created_at: Utc::now(),
        });
        Ok(UpdateResult::upserted(id))
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn insert_cart_item(&self, item: NewCartItem) -> StoreResult<InsertOutcome> {
        let mut tables = self.tables.write().await;
        if tables
            .carts
            .iter()
            .any(|c| c.email == item.email && c.class_id == item.class_id)
        {
            return Ok(InsertOutcome::AlreadyExists);
        }

        let id = Uuid::new_v4();
        tables.carts.push(CartItem {
            id,
            email: item.email,
            class_id: item.class_id,
            name: item.name,
            image: item.image,
            price: item.price,
            instructor_name: item.instructor_name,
            created_at: Utc::now(),
        });
        Ok(InsertOutcome::Inserted(id))
    }

    async fn delete_cart_item(&self, id: Uuid, email: &str) -> StoreResult<DeleteResult> {
        let mut tables = self.tables.write().await;
        let before = tables.carts.len();
        tables.carts.retain(|c| !(c.id == id && c.email == email));
        Ok(DeleteResult::new((before - tables.carts.len()) as u64))
    }

    async fn list_cart_items(&self, email: &str) -> StoreResult<Vec<CartItem>> {
        let tables = self.tables.read().await;
        Ok(tables
            .carts
            .iter()
            .filter(|c| c.email == email)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl EnrollmentStore for MemoryStore {
    async fn find_enrollment(
        &self,
        email: &str,
        class_id: Uuid,
    ) -> StoreResult<Option<Enrollment>> {
        let tables = self.tables.read().await;
        Ok(tables
            .enrollments
            .iter()
            .find(|e| e.email == email && e.class_id == class_id)
            .cloned())
    }

    async fn list_enrollments(&self, email: &str) -> StoreResult<Vec<Enrollment>> {
        let tables = self.tables.read().await;
        Ok(tables
            .enrollments
            .iter()
            .filter(|e| e.email == email)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl PaymentStore for MemoryStore {
    async fn list_payments(&self, email: &str) -> StoreResult<Vec<PaymentRecord>> {
        let tables = self.tables.read().await;
        let mut payments: Vec<PaymentRecord> = tables
            .payments
            .iter()
            .filter(|p| p.email == email)
            .cloned()
            .collect();
        // Insertion order breaks date ties, newest first.
        payments.reverse();
        payments.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(payments)
    }

    async fn purchase(&self, purchase: Purchase) -> StoreResult<PurchaseReceipt> {
        let mut tables = self.tables.write().await;

        // Validate everything before mutating so a failure leaves no trace.
        let class_index = tables
            .classes
            .iter()
            .position(|c| c.id == purchase.class_id)
            .ok_or(StoreError::NotFound("Class"))?;
        if tables.classes[class_index].seats <= 0 {
            return Err(StoreError::NoSeatsAvailable);
        }
        if tables
            .enrollments
            .iter()
            .any(|e| e.email == purchase.email && e.class_id == purchase.class_id)
        {
            return Err(StoreError::AlreadyEnrolled);
        }

        let class = &mut tables.classes[class_index];
        class.seats -= 1;
        class.enrolled += 1;
        let price = purchase.price.unwrap_or(class.price);

        tables.carts.retain(|c| {
            !(c.email == purchase.email
                && (Some(c.id) == purchase.cart_id || c.class_id == purchase.class_id))
        });

        let now = Utc::now();
        let payment_id = Uuid::new_v4();
        let enrollment_id = Uuid::new_v4();

        tables.enrollments.push(Enrollment {
            id: enrollment_id,
            email: purchase.email.clone(),
            class_id: purchase.class_id,
            payment_id,
            details: purchase.details.clone(),
            created_at: now,
        });
        tables.payments.push(PaymentRecord {
            id: payment_id,
            email: purchase.email,
            class_id: purchase.class_id,
            cart_id: purchase.cart_id,
            price,
            transaction_id: purchase.transaction_id,
            date: now,
            details: purchase.details,
        });

        Ok(PurchaseReceipt {
            payment_id,
            enrollment_id,
        })
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
