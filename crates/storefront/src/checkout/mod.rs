//! Four-step checkout: address, shipping, payment, confirmation.
//!
//! [`CheckoutFlow`] holds the in-progress checkout for the session. Steps only
//! move one at a time:
//!
//! | From     | To           | Requires                                            |
//! |----------|--------------|-----------------------------------------------------|
//! | Address  | Shipping     | CEP, street, number, city, state; a shipping quote  |
//! | Shipping | Payment      | a selected shipping option                          |
//! | Payment  | (stays)      | complete card details for card payments             |
//! | any      | Confirmation | a pending order, on return from the gateway         |
//!
//! Submitting the payment step does not advance: the buyer finishes paying on
//! the gateway's hosted page and comes back through [`CheckoutFlow::confirm_payment`].
//!
//! Every refused action leaves an error [`FlashMessage`] on the flow.

mod error;

pub use error::CheckoutError;

use chrono::Utc;
use murela_core::{
    Address, AddressLookupResult, Cart, CartItem, CheckoutStep, CreditCard, Customer,
    CustomerAddress, FlashMessage, PaymentItem, PaymentMethod, PaymentRequest, PaymentResponse,
    PendingOrder, PostalCode, Price, ShippingOption, ShippingRequest,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::services::Services;
use crate::storage::PendingOrderStore;

/// Name used for the payer when none was given.
const DEFAULT_CUSTOMER_NAME: &str = "Cliente Teste";
/// Email used for the payer when none was given.
const DEFAULT_CUSTOMER_EMAIL: &str = "cliente@teste.com";

/// Collaborators a checkout transition needs.
#[derive(Clone, Copy)]
pub struct CheckoutContext<'a> {
    pub services: &'a Services,
    pub origin_cep: &'a PostalCode,
    pub orders: &'a PendingOrderStore,
}

/// Payer contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Default for Contact {
    fn default() -> Self {
        Self {
            name: DEFAULT_CUSTOMER_NAME.to_string(),
            email: DEFAULT_CUSTOMER_EMAIL.to_string(),
            cpf: None,
            phone: None,
        }
    }
}

/// Checkout state for one buyer.
#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    address: Address,
    shipping_options: Vec<ShippingOption>,
    selected_shipping: Option<String>,
    payment_method: PaymentMethod,
    card: CreditCard,
    contact: Contact,
    message: Option<FlashMessage>,
    last_payment: Option<PaymentResponse>,
}

impl CheckoutFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    #[must_use]
    pub const fn address(&self) -> &Address {
        &self.address
    }

    #[must_use]
    pub fn shipping_options(&self) -> &[ShippingOption] {
        &self.shipping_options
    }

    #[must_use]
    pub const fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    #[must_use]
    pub const fn message(&self) -> Option<&FlashMessage> {
        self.message.as_ref()
    }

    #[must_use]
    pub const fn last_payment(&self) -> Option<&PaymentResponse> {
        self.last_payment.as_ref()
    }

    /// The chosen shipping option, if it is still among the quoted ones.
    #[must_use]
    pub fn selected_shipping(&self) -> Option<&ShippingOption> {
        let id = self.selected_shipping.as_deref()?;
        self.shipping_options.iter().find(|o| o.id == id)
    }

    /// Price of the selected shipping option, zero if none.
    #[must_use]
    pub fn shipping_price(&self) -> Price {
        self.selected_shipping().map_or(Price::ZERO, |o| o.price)
    }

    /// Cart subtotal plus the selected shipping.
    #[must_use]
    pub fn total(&self, cart: &Cart) -> Price {
        cart.total() + self.shipping_price()
    }

    /// Replace the address form.
    ///
    /// When the CEP changes to a valid 8-digit code, the street, neighborhood,
    /// city and state are filled in from a lookup. A failed lookup leaves the
    /// form as entered and only sets an error message.
    pub async fn update_address(&mut self, address: Address, ctx: CheckoutContext<'_>) {
        let cep_changed = address.cep != self.address.cep;
        self.address = address;

        if !cep_changed {
            return;
        }
        if let Ok(cep) = self.address.postal_code() {
            let _ = self.run_lookup(&cep, ctx).await;
        }
    }

    /// Look up the address for the CEP currently in the form.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidPostalCode` for a malformed CEP and
    /// `CheckoutError::AddressLookup` if the lookup service fails.
    #[instrument(skip_all, fields(cep = %self.address.cep))]
    pub async fn lookup_address(
        &mut self,
        ctx: CheckoutContext<'_>,
    ) -> Result<AddressLookupResult, CheckoutError> {
        let cep = match self.address.postal_code() {
            Ok(cep) => cep,
            Err(e) => return Err(self.fail(e.into())),
        };
        self.run_lookup(&cep, ctx).await
    }

    async fn run_lookup(
        &mut self,
        cep: &PostalCode,
        ctx: CheckoutContext<'_>,
    ) -> Result<AddressLookupResult, CheckoutError> {
        match ctx.services.address.lookup(cep).await {
            Ok(found) => {
                self.address.apply_lookup(found.clone());
                self.message = Some(FlashMessage::success("Address found!"));
                Ok(found)
            }
            Err(e) => Err(self.fail(CheckoutError::AddressLookup(e))),
        }
    }

    /// Choose one of the quoted shipping options.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::UnknownShippingOption` if `option_id` was not quoted.
    pub fn select_shipping(&mut self, option_id: &str) -> Result<&ShippingOption, CheckoutError> {
        if !self.shipping_options.iter().any(|o| o.id == option_id) {
            return Err(self.fail(CheckoutError::UnknownShippingOption(option_id.to_string())));
        }
        self.selected_shipping = Some(option_id.to_string());
        self.selected_shipping()
            .ok_or_else(|| CheckoutError::UnknownShippingOption(option_id.to_string()))
    }

    /// Set the payment method, and optionally the card and payer details.
    pub fn set_payment(
        &mut self,
        method: PaymentMethod,
        card: Option<CreditCard>,
        contact: Option<Contact>,
    ) {
        self.payment_method = method;
        if let Some(card) = card {
            self.card = card;
        }
        if let Some(contact) = contact {
            self.contact = contact;
        }
    }

    /// Try to advance from the current step.
    ///
    /// From the payment step this submits the payment and, on success, saves
    /// the pending order while staying on the payment step.
    ///
    /// # Errors
    ///
    /// Returns the `CheckoutError` explaining why the step was refused; the
    /// same error is left on the flow as its message.
    #[instrument(skip_all, fields(step = self.step.number()))]
    pub async fn next_step(
        &mut self,
        cart: &Cart,
        ctx: CheckoutContext<'_>,
    ) -> Result<CheckoutStep, CheckoutError> {
        let result = match self.step {
            CheckoutStep::Address => self.leave_address(cart, ctx).await,
            CheckoutStep::Shipping => self.leave_shipping(cart),
            CheckoutStep::Payment => self.submit_payment(cart, ctx).await,
            CheckoutStep::Confirmation => Err(CheckoutError::InvalidTransition(self.step)),
        };
        result.map_err(|e| self.fail(e))
    }

    /// Go back one step.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidTransition` on the first step.
    pub fn prev_step(&mut self) -> Result<CheckoutStep, CheckoutError> {
        let Some(previous) = self.step.previous() else {
            return Err(self.fail(CheckoutError::InvalidTransition(self.step)));
        };
        self.step = previous;
        self.message = None;
        Ok(previous)
    }

    /// Complete the checkout after the gateway sends the buyer back.
    ///
    /// Moves to the confirmation step and empties the cart. Returns the
    /// pending order being confirmed.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::NoPendingOrder` if no payment was submitted,
    /// or `CheckoutError::Storage` if the pending order cannot be read.
    #[instrument(skip_all)]
    pub fn confirm_payment(
        &mut self,
        cart: &mut Cart,
        orders: &PendingOrderStore,
    ) -> Result<PendingOrder, CheckoutError> {
        let order = match orders.load() {
            Ok(Some(order)) => order,
            Ok(None) => return Err(self.fail(CheckoutError::NoPendingOrder)),
            Err(e) => return Err(self.fail(e.into())),
        };

        self.step = CheckoutStep::Confirmation;
        self.message = Some(FlashMessage::success("Order confirmed!"));
        cart.clear();
        info!(transaction_id = ?order.transaction_id, total = %order.total, "Order confirmed");
        Ok(order)
    }

    /// Start over.
    pub fn finish(&mut self) {
        *self = Self::default();
    }

    async fn leave_address(
        &mut self,
        cart: &Cart,
        ctx: CheckoutContext<'_>,
    ) -> Result<CheckoutStep, CheckoutError> {
        ensure_items(cart)?;
        let missing = self.address.missing_required_fields();
        if !missing.is_empty() {
            return Err(CheckoutError::IncompleteAddress(missing));
        }
        let destination = self.address.postal_code()?;

        let request =
            ShippingRequest::standard_box(ctx.origin_cep.clone(), destination, cart.total_weight());
        let options = ctx
            .services
            .shipping
            .quote(&request)
            .await
            .map_err(CheckoutError::ShippingQuote)?;
        let first = options.first().ok_or(CheckoutError::NoShippingOptions)?;

        self.selected_shipping = Some(first.id.clone());
        self.shipping_options = options;
        self.step = CheckoutStep::Shipping;
        self.message = Some(FlashMessage::success("Shipping options calculated!"));
        Ok(self.step)
    }

    fn leave_shipping(&mut self, cart: &Cart) -> Result<CheckoutStep, CheckoutError> {
        ensure_items(cart)?;
        if self.selected_shipping().is_none() {
            return Err(CheckoutError::NoShippingSelected);
        }
        self.step = CheckoutStep::Payment;
        self.message = None;
        Ok(self.step)
    }

    async fn submit_payment(
        &mut self,
        cart: &Cart,
        ctx: CheckoutContext<'_>,
    ) -> Result<CheckoutStep, CheckoutError> {
        ensure_items(cart)?;
        let shipping = self
            .selected_shipping()
            .cloned()
            .ok_or(CheckoutError::NoShippingSelected)?;
        let is_card = self.payment_method == PaymentMethod::CreditCard;
        if is_card && !self.card.is_complete() {
            return Err(CheckoutError::IncompleteCard);
        }

        let total = cart.total() + shipping.price;
        let request = PaymentRequest {
            payment_method: self.payment_method,
            total,
            items: cart.items().iter().map(PaymentItem::from).collect(),
            customer: Customer {
                name: self.contact.name.clone(),
                email: self.contact.email.clone(),
                cpf: self.contact.cpf.clone(),
                phone: self.contact.phone.clone(),
                address: CustomerAddress::from(&self.address),
            },
            credit_card: is_card.then(|| self.card.clone()),
        };

        info!(method = ?request.payment_method, total = %total, "Submitting payment");
        let response = ctx
            .services
            .payment
            .process(&request)
            .await
            .map_err(CheckoutError::Payment)?;

        if !response.success {
            let reason = response
                .message
                .clone()
                .unwrap_or_else(|| "The payment was declined.".to_string());
            self.last_payment = Some(response);
            return Err(CheckoutError::PaymentDeclined(reason));
        }

        let order = PendingOrder {
            items: cart.items().to_vec(),
            total,
            shipping,
            address: self.address.clone(),
            payment_method: self.payment_method,
            transaction_id: response.transaction_id.clone(),
            created_at: Utc::now(),
        };
        ctx.orders.save(&order)?;

        let text = response
            .message
            .clone()
            .unwrap_or_else(|| "Redirecting to the hosted checkout...".to_string());
        // The order stays pending until the gateway sends the buyer back.
        self.message = Some(FlashMessage::info(text));
        self.last_payment = Some(response);
        Ok(self.step)
    }

    /// Record `error` as the flow's message and hand it back.
    fn fail(&mut self, error: CheckoutError) -> CheckoutError {
        self.message = Some(FlashMessage::error(error.user_message()));
        error
    }

    /// Serializable snapshot for the checkout page.
    #[must_use]
    pub fn view(&self, cart: &Cart) -> CheckoutView {
        CheckoutView {
            step: self.step,
            step_number: self.step.number(),
            items: cart.items().to_vec(),
            address: self.address.clone(),
            shipping_options: self.shipping_options.clone(),
            selected_shipping: self.selected_shipping().map(|o| o.id.clone()),
            payment_method: self.payment_method,
            card_complete: self.card.is_complete(),
            contact: self.contact.clone(),
            subtotal: cart.total(),
            shipping_price: self.shipping_price(),
            total: self.total(cart),
            message: self.message.clone(),
            payment: self.last_payment.clone(),
        }
    }
}

fn ensure_items(cart: &Cart) -> Result<(), CheckoutError> {
    if cart.is_empty() {
        Err(CheckoutError::EmptyCart)
    } else {
        Ok(())
    }
}

/// What the checkout page renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutView {
    pub step: CheckoutStep,
    pub step_number: u8,
    pub items: Vec<CartItem>,
    pub address: Address,
    pub shipping_options: Vec<ShippingOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_shipping: Option<String>,
    pub payment_method: PaymentMethod,
    pub card_complete: bool,
    pub contact: Contact,
    pub subtotal: Price,
    pub shipping_price: Price,
    pub total: Price,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<FlashMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentResponse>,
}
