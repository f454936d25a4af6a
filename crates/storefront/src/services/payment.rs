//! Simulated payment gateway with a hosted checkout hand-off.

use std::time::Duration;

use async_trait::async_trait;
use murela_core::{PaymentMethod, PaymentRequest, PaymentResponse};
use rand::Rng;
use url::Url;

use super::{PaymentGateway, ServiceError, simulate_latency};
use crate::config::CheckoutSettings;

const CURRENCY: &str = "BRL";
const DESCRIPTION: &str = "Compra Murela Brands";
const REDIRECT_MESSAGE: &str = "Redirecting to the hosted checkout...";
const PIX_CODE: &str = "SIMULACAO_PIX_CODE_00001122334455667788";
const BOLETO_URL: &str = "https://exemplo.com/boleto";
const BOLETO_CODE: &str = "03399.63290 64000.000006 00125.201020 4 56140000017832";

/// Approves every payment and points the buyer at the hosted checkout page.
#[derive(Debug, Clone)]
pub struct MockPaymentGateway {
    checkout_url: Url,
    merchant_id: String,
    return_url: Url,
    delay: Duration,
}

impl MockPaymentGateway {
    #[must_use]
    pub fn new(settings: &CheckoutSettings) -> Self {
        Self {
            checkout_url: settings.checkout_url.clone(),
            merchant_id: settings.merchant_id.clone(),
            return_url: settings.return_url.clone(),
            delay: settings.latency.payment,
        }
    }

    /// Hosted checkout URL carrying the order summary as query parameters.
    #[must_use]
    pub fn checkout_url_for(&self, request: &PaymentRequest) -> Url {
        let mut url = self.checkout_url.clone();
        url.query_pairs_mut()
            .append_pair("merchant_id", &self.merchant_id)
            .append_pair("transaction_amount", &request.total.amount().to_string())
            .append_pair("currency", CURRENCY)
            .append_pair("description", DESCRIPTION)
            .append_pair("customer_name", &request.customer.name)
            .append_pair("customer_email", &request.customer.email)
            .append_pair("redirect_url", self.return_url.as_str());
        url
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    #[tracing::instrument(skip(self, request), fields(method = ?request.payment_method, total = %request.total))]
    async fn process(&self, request: &PaymentRequest) -> Result<PaymentResponse, ServiceError> {
        simulate_latency(self.delay).await;

        if request.items.is_empty() {
            return Err(ServiceError::InvalidRequest("payment has no items".to_string()));
        }

        let checkout_url = self.checkout_url_for(request);
        let number: u32 = rand::rng().random_range(0..1_000_000);
        let method = request.payment_method;

        let mut response = PaymentResponse {
            success: true,
            transaction_id: Some(format!("{}-{number}", method.transaction_prefix())),
            message: Some(REDIRECT_MESSAGE.to_string()),
            checkout_url: Some(checkout_url.into()),
            ..PaymentResponse::default()
        };
        match method {
            PaymentMethod::CreditCard => {}
            PaymentMethod::Pix => response.pix_code = Some(PIX_CODE.to_string()),
            PaymentMethod::Boleto => {
                response.boleto_url = Some(BOLETO_URL.to_string());
                response.boleto_code = Some(BOLETO_CODE.to_string());
            }
        }

        tracing::info!(transaction_id = ?response.transaction_id, "Payment accepted");
        Ok(response)
    }
}
