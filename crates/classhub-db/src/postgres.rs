use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use classhub_models::{
    CartItem, Class, ClassChanges, ClassFilter, ClassStatus, DeleteResult, Enrollment,
    InsertOutcome, NewCartItem, NewClass, NewUser, PaymentRecord, Purchase, PurchaseReceipt,
    UpdateResult, User, UserRole,
};

use crate::error::{StoreError, StoreResult};
use crate::store::{CartStore, ClassStore, EnrollmentStore, PaymentStore, Store, UserStore};

const USER_COLUMNS: &str = "id, email, name, photo_url, role, profile, created_at";

const CLASS_COLUMNS: &str = "id, name, image, info, price, seats, enrolled, difficulty, \
     instructor_name, instructor_email, status, feedback, created_at";

const CART_COLUMNS: &str = "id, email, class_id, name, image, price, instructor_name, created_at";

const ENROLLMENT_COLUMNS: &str = "id, email, class_id, payment_id, details, created_at";

const PAYMENT_COLUMNS: &str =
    "id, email, class_id, cart_id, price, transaction_id, date, details";

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgStore {
    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "users"))]
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "users"))]
    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user)
    }

    #[instrument(skip(self, user), fields(db.operation = "INSERT", db.table = "users", user.email = %user.email))]
    async fn insert_user(&self, user: NewUser) -> StoreResult<InsertOutcome> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (email, name, photo_url, profile)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.photo_url)
        .bind(&user.profile)
        .fetch_optional(&self.pool)
        .await?;

        Ok(match id {
            Some(id) => InsertOutcome::Inserted(id),
            None => {
                debug!("User already registered");
                InsertOutcome::AlreadyExists
            }
        })
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "users"))]
    async fn list_users(&self, role: Option<UserRole>) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE ($1::text IS NULL OR role = $1) ORDER BY created_at, id"
        ))
        .bind(role)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    #[instrument(skip(self), fields(db.operation = "UPDATE", db.table = "users"))]
    async fn update_user_role(
        &self,
        id: Uuid,
        role: Option<UserRole>,
    ) -> StoreResult<UpdateResult> {
        let result = sqlx::query("UPDATE users SET role = $2 WHERE id = $1")
            .bind(id)
            .bind(role)
            .execute(&self.pool)
            .await?;

        Ok(UpdateResult::matched(result.rows_affected()))
    }

    #[instrument(skip(self), fields(db.operation = "DELETE", db.table = "users"))]
    async fn delete_user(&self, id: Uuid) -> StoreResult<DeleteResult> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(DeleteResult::new(result.rows_affected()))
    }
}

#[async_trait]
impl ClassStore for PgStore {
    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "classes"))]
    async fn list_classes(&self, filter: &ClassFilter) -> StoreResult<Vec<Class>> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {CLASS_COLUMNS} FROM classes WHERE TRUE"));

        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status);
        }
        if let Some(difficulty) = &filter.difficulty {
            query.push(" AND difficulty = ").push_bind(difficulty);
        }
        if let Some(email) = &filter.instructor_email {
            query.push(" AND instructor_email = ").push_bind(email);
        }
        query.push(" ORDER BY created_at, id");

        let classes = query
            .build_query_as::<Class>()
            .fetch_all(&self.pool)
            .await?;

        Ok(classes)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "classes"))]
    async fn popular_classes(&self) -> StoreResult<Vec<Class>> {
        let classes = sqlx::query_as::<_, Class>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes ORDER BY enrolled DESC, created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(classes)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "classes"))]
    async fn find_class(&self, id: Uuid) -> StoreResult<Option<Class>> {
        let class = sqlx::query_as::<_, Class>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(class)
    }

    #[instrument(skip(self, class), fields(db.operation = "INSERT", db.table = "classes"))]
    async fn insert_class(&self, class: NewClass) -> StoreResult<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO classes
                (name, image, info, price, seats, enrolled, difficulty,
                 instructor_name, instructor_email, status, feedback)
            VALUES ($1, $2, $3, $4, $5, 0, $6, $7, $8, 'pending', '')
            RETURNING id
            "#,
        )
        .bind(&class.name)
        .bind(&class.image)
        .bind(&class.info)
        .bind(class.price)
        .bind(class.seats)
        .bind(&class.difficulty)
        .bind(&class.instructor_name)
        .bind(&class.instructor_email)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    #[instrument(skip(self, changes), fields(db.operation = "UPDATE", db.table = "classes"))]
    async fn update_class(&self, id: Uuid, changes: &ClassChanges) -> StoreResult<UpdateResult> {
        let result = sqlx::query(
            r#"
            UPDATE classes SET
                name = COALESCE($2, name),
                seats = COALESCE($3, seats),
                price = COALESCE($4, price),
                difficulty = COALESCE($5, difficulty),
                image = COALESCE($6, image),
                info = COALESCE($7, info)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(changes.seats)
        .bind(changes.price)
        .bind(&changes.difficulty)
        .bind(&changes.image)
        .bind(&changes.info)
        .execute(&self.pool)
        .await?;

        Ok(UpdateResult::matched(result.rows_affected()))
    }

    #[instrument(skip(self), fields(db.operation = "DELETE", db.table = "classes"))]
    async fn delete_class(&self, id: Uuid) -> StoreResult<DeleteResult> {
        let result = sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(DeleteResult::new(result.rows_affected()))
    }

    #[instrument(skip(self, feedback), fields(db.operation = "UPDATE", db.table = "classes"))]
    async fn moderate_class(
        &self,
        id: Uuid,
        status: ClassStatus,
        feedback: &str,
    ) -> StoreResult<UpdateResult> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query("UPDATE classes SET status = $2, feedback = $3 WHERE id = $1")
            .bind(id)
            .bind(status)
            .bind(feedback)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() > 0 {
            tx.commit().await?;
            return Ok(UpdateResult::matched(updated.rows_affected()));
        }

        // Unknown id: record a placeholder carrying only the moderation fields.
        warn!(class.id = %id, "Moderating unknown class, creating placeholder");
        let inserted = sqlx::query(
            r#"
            INSERT INTO classes (id, status, feedback)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET status = EXCLUDED.status, feedback = EXCLUDED.feedback
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(feedback)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        debug!(rows = inserted.rows_affected(), "Placeholder class written");
        Ok(UpdateResult::upserted(id))
    }
}

#[async_trait]
impl CartStore for PgStore {
    #[instrument(skip(self, item), fields(db.operation = "INSERT", db.table = "carts", cart.class_id = %item.class_id))]
    async fn insert_cart_item(&self, item: NewCartItem) -> StoreResult<InsertOutcome> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO carts (email, class_id, name, image, price, instructor_name)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (email, class_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(&item.email)
        .bind(item.class_id)
        .bind(&item.name)
        .bind(&item.image)
        .bind(item.price)
        .bind(&item.instructor_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(id.map_or(InsertOutcome::AlreadyExists, InsertOutcome::Inserted))
    }

    #[instrument(skip(self), fields(db.operation = "DELETE", db.table = "carts"))]
    async fn delete_cart_item(&self, id: Uuid, email: &str) -> StoreResult<DeleteResult> {
        let result = sqlx::query("DELETE FROM carts WHERE id = $1 AND email = $2")
            .bind(id)
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(DeleteResult::new(result.rows_affected()))
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "carts"))]
    async fn list_cart_items(&self, email: &str) -> StoreResult<Vec<CartItem>> {
        let items = sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {CART_COLUMNS} FROM carts WHERE email = $1 ORDER BY created_at, id"
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

#[async_trait]
impl EnrollmentStore for PgStore {
    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "enrollments"))]
    async fn find_enrollment(
        &self,
        email: &str,
        class_id: Uuid,
    ) -> StoreResult<Option<Enrollment>> {
        let enrollment = sqlx::query_as::<_, Enrollment>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE email = $1 AND class_id = $2"
        ))
        .bind(email)
        .bind(class_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(enrollment)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "enrollments"))]
    async fn list_enrollments(&self, email: &str) -> StoreResult<Vec<Enrollment>> {
        let enrollments = sqlx::query_as::<_, Enrollment>(&format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE email = $1 ORDER BY created_at, id"
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(enrollments)
    }
}

#[async_trait]
impl PaymentStore for PgStore {
    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "payments"))]
    async fn list_payments(&self, email: &str) -> StoreResult<Vec<PaymentRecord>> {
        let payments = sqlx::query_as::<_, PaymentRecord>(&format!(
            "SELECT {PAYMENT_COLUMNS} FROM payments WHERE email = $1 ORDER BY date DESC, id"
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    #[instrument(
        skip(self, purchase),
        fields(db.operation = "TRANSACTION", class.id = %purchase.class_id, user.email = %purchase.email)
    )]
    async fn purchase(&self, purchase: Purchase) -> StoreResult<PurchaseReceipt> {
        let mut tx = self.pool.begin().await?;

        // Concurrent buyers serialize on the row lock; the seat check is
        // re-evaluated after the winner commits.
        let class_price = sqlx::query_scalar::<_, f64>(
            r#"
            UPDATE classes SET seats = seats - 1, enrolled = enrolled + 1
            WHERE id = $1 AND seats > 0
            RETURNING price
            "#,
        )
        .bind(purchase.class_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(class_price) = class_price else {
            let exists = sqlx::query_scalar::<_, Uuid>("SELECT id FROM classes WHERE id = $1")
                .bind(purchase.class_id)
                .fetch_optional(&mut *tx)
                .await?
                .is_some();

            return Err(if exists {
                StoreError::NoSeatsAvailable
            } else {
                StoreError::NotFound("Class")
            });
        };

        sqlx::query("DELETE FROM carts WHERE email = $1 AND (id = $2 OR class_id = $3)")
            .bind(&purchase.email)
            .bind(purchase.cart_id)
            .bind(purchase.class_id)
            .execute(&mut *tx)
            .await?;

        let payment_id = Uuid::new_v4();

        let enrollment_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO enrollments (email, class_id, payment_id, details)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email, class_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(&purchase.email)
        .bind(purchase.class_id)
        .bind(payment_id)
        .bind(&purchase.details)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::AlreadyEnrolled)?;

        sqlx::query(
            r#"
            INSERT INTO payments (id, email, class_id, cart_id, price, transaction_id, details)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(payment_id)
        .bind(&purchase.email)
        .bind(purchase.class_id)
        .bind(purchase.cart_id)
        .bind(purchase.price.unwrap_or(class_price))
        .bind(&purchase.transaction_id)
        .bind(&purchase.details)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(payment.id = %payment_id, "Purchase committed");
        Ok(PurchaseReceipt {
            payment_id,
            enrollment_id,
        })
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
