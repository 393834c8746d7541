use tracing::{info, instrument};

use classhub_core::AppError;
use classhub_db::{PaymentStore, Store};
use classhub_models::{InsertResult, PaymentRecord, Purchase, PurchaseDto};
use classhub_payments::{PaymentError, PaymentGateway, to_minor_units};

pub struct PaymentService;

impl PaymentService {
    /// Creates a card payment intent for `price` and returns its client
    /// secret.
    #[instrument(skip(gateway))]
    pub async fn create_intent(
        gateway: &dyn PaymentGateway,
        price: f64,
        currency: &str,
    ) -> Result<String, AppError> {
        let amount = to_minor_units(price).ok_or(PaymentError::InvalidAmount)?;
        let intent = gateway.create_payment_intent(amount, currency).await?;
        info!(payment_intent.id = %intent.id, amount, "Payment intent created");
        Ok(intent.client_secret)
    }

    /// Records a completed checkout for `email`.
    ///
    /// Seat counts come from the stored class; the counters in the body
    /// only end up in the snapshot kept with the payment.
    #[instrument(skip(store, dto), fields(class.id = %dto.class_id))]
    pub async fn purchase(
        store: &dyn Store,
        email: &str,
        mut dto: PurchaseDto,
    ) -> Result<InsertResult, AppError> {
        dto.email = Some(email.to_string());
        let details = serde_json::to_value(&dto).map_err(AppError::internal)?;

        let purchase = Purchase {
            email: email.to_string(),
            class_id: dto.class_id,
            cart_id: dto.cart_id,
            price: dto.price,
            transaction_id: dto.transaction_id,
            details,
        };

        let receipt = store.purchase(purchase).await?;
        info!(
            payment.id = %receipt.payment_id,
            enrollment.id = %receipt.enrollment_id,
            "Purchase completed"
        );
        Ok(InsertResult::new(receipt.payment_id))
    }

    #[instrument(skip(store))]
    pub async fn history(store: &dyn Store, email: &str) -> Result<Vec<PaymentRecord>, AppError> {
        Ok(store.list_payments(email).await?)
    }
}
