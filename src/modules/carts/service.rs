use tracing::{debug, instrument};
use uuid::Uuid;

use classhub_core::AppError;
use classhub_db::{CartStore, Store};
use classhub_models::{CartItem, DeleteResult, InsertResponse, NewCartItem};

pub struct CartService;

impl CartService {
    /// Adds a class to the caller's cart. A class already in their cart
    /// is reported as `{"exists": true}`.
    #[instrument(skip(store, item), fields(user.email = %item.email, class.id = %item.class_id))]
    pub async fn add(store: &dyn Store, item: NewCartItem) -> Result<InsertResponse, AppError> {
        let outcome = store.insert_cart_item(item).await?;
        debug!(?outcome, "Cart insert");
        Ok(outcome.into())
    }

    /// Removes a cart entry owned by `email`. Entries of other users are
    /// left alone and reported as zero deletions.
    #[instrument(skip(store))]
    pub async fn remove(store: &dyn Store, id: Uuid, email: &str) -> Result<DeleteResult, AppError> {
        Ok(store.delete_cart_item(id, email).await?)
    }

    #[instrument(skip(store))]
    pub async fn list(store: &dyn Store, email: &str) -> Result<Vec<CartItem>, AppError> {
        Ok(store.list_cart_items(email).await?)
    }
}
