//! Order operations against the platform backend.

use tracing::instrument;

use suriya_core::{Order, OrderId, ThaiPostTracking};

use super::{
    Ack, CancelOrderRequest, ConfirmPaymentRequest, OrderTransactionRecord, PlatformApiError,
    PlatformClient, UpdateOrderStatusRequest, UpdateTrackingRequest,
};

impl PlatformClient {
    /// List all orders visible to the back office.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload does not parse.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, PlatformApiError> {
        self.get("order/orders").await
    }

    /// Fetch a single order by ID.
    ///
    /// # Errors
    ///
    /// Returns `PlatformApiError::NotFound` if the backend does not know the
    /// order.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, PlatformApiError> {
        self.get(&format!("order/orders/{id}")).await
    }

    /// Update an order's status (used for mark-as-completed and similar).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the update.
    #[instrument(skip(self), fields(invoice_no = %request.invoice_no, order_status = %request.order_status))]
    pub async fn update_order_status(
        &self,
        request: &UpdateOrderStatusRequest,
    ) -> Result<(), PlatformApiError> {
        self.patch::<Ack, _>("order/updateStatus", request)
            .await?
            .into_result()
    }

    /// Assign a tracking number to an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the assignment.
    #[instrument(skip(self), fields(order_id = %id, tracking = %tracking))]
    pub async fn update_tracking(
        &self,
        id: OrderId,
        tracking: &ThaiPostTracking,
    ) -> Result<(), PlatformApiError> {
        let request = UpdateTrackingRequest {
            tracking_number: tracking.as_str().to_string(),
        };
        self.patch::<Ack, _>(&format!("order/{id}/tracking"), &request)
            .await?
            .into_result()
    }

    /// Cancel an order via the payment service's status endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the cancellation.
    #[instrument(skip(self), fields(invoice_no = %invoice_no))]
    pub async fn cancel_order(&self, invoice_no: &str) -> Result<(), PlatformApiError> {
        self.patch::<Ack, _>(
            &format!("payment/order/status/{invoice_no}"),
            &CancelOrderRequest::by_admin(),
        )
        .await?
        .into_result()
    }

    /// Confirm an order's payment.
    ///
    /// The backend flips `payment_confirmed` and emails the customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the confirmation.
    #[instrument(skip(self), fields(order_id = %request.order_id))]
    pub async fn confirm_payment(
        &self,
        request: &ConfirmPaymentRequest,
    ) -> Result<(), PlatformApiError> {
        self.post::<Ack, _>("order/confirmPayment", request)
            .await?
            .into_result()
    }

    /// Append an order-transaction audit record.
    ///
    /// Best effort: the mutation already happened, so a failed audit write is
    /// logged and swallowed rather than failing the admin action.
    #[instrument(skip(self, record), fields(order_id = %record.order.order_id))]
    pub async fn record_order_transaction(&self, record: &OrderTransactionRecord) {
        let result = self
            .post::<Ack, _>("order/orderTransaction", record)
            .await
            .and_then(Ack::into_result);
        if let Err(e) = result {
            tracing::warn!("Failed to record order transaction: {e}");
        }
    }

    /// Check backend reachability (readiness probe).
    ///
    /// # Errors
    ///
    /// Returns an error when the backend health endpoint is unreachable or
    /// unhealthy.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<(), PlatformApiError> {
        self.get::<serde_json::Value>("health").await.map(|_| ())
    }
}
