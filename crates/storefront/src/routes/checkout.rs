//! Checkout route handlers.
//!
//! Handlers lock the session for the whole transition, service calls included,
//! so concurrent requests see each step complete.

use axum::{Json, extract::State};
use murela_core::{Address, CreditCard, PaymentMethod, PendingOrder};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::checkout::{CheckoutView, Contact};
use crate::error::{Result, add_breadcrumb};
use crate::state::{AppState, Session};

/// Shipping choice.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectShippingRequest {
    pub option_id: String,
}

/// Payment details.
#[derive(Debug, Deserialize)]
pub struct PaymentDetailsRequest {
    pub method: PaymentMethod,
    #[serde(default)]
    pub card: Option<CreditCard>,
    #[serde(default)]
    pub customer: Option<Contact>,
}

/// The confirmed order alongside the final checkout state.
#[derive(Debug, Serialize)]
pub struct ConfirmationView {
    pub order: PendingOrder,
    pub checkout: CheckoutView,
}

fn view(session: &Session) -> Json<CheckoutView> {
    Json(session.checkout.view(&session.cart))
}

/// Show the checkout state.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CheckoutView> {
    let session = state.session().await;
    view(&session)
}

/// Replace the address form, looking up a newly entered CEP.
#[instrument(skip(state, address), fields(cep = %address.cep))]
pub async fn update_address(
    State(state): State<AppState>,
    Json(address): Json<Address>,
) -> Json<CheckoutView> {
    let mut session = state.session().await;
    session
        .checkout
        .update_address(address, state.checkout_context())
        .await;
    view(&session)
}

/// Look up the CEP currently in the form.
#[instrument(skip(state))]
pub async fn lookup_address(State(state): State<AppState>) -> Result<Json<CheckoutView>> {
    let mut session = state.session().await;
    session
        .checkout
        .lookup_address(state.checkout_context())
        .await?;
    Ok(view(&session))
}

/// Choose a quoted shipping option.
#[instrument(skip(state))]
pub async fn select_shipping(
    State(state): State<AppState>,
    Json(request): Json<SelectShippingRequest>,
) -> Result<Json<CheckoutView>> {
    let mut session = state.session().await;
    session.checkout.select_shipping(&request.option_id)?;
    Ok(view(&session))
}

/// Set the payment method and optional card and payer details.
#[instrument(skip(state, request), fields(method = ?request.method))]
pub async fn set_payment(
    State(state): State<AppState>,
    Json(request): Json<PaymentDetailsRequest>,
) -> Json<CheckoutView> {
    let mut session = state.session().await;
    session
        .checkout
        .set_payment(request.method, request.card, request.customer);
    view(&session)
}

/// Advance one step, or submit the payment from the payment step.
#[instrument(skip(state))]
pub async fn next(State(state): State<AppState>) -> Result<Json<CheckoutView>> {
    let mut session = state.session().await;
    let Session { cart, checkout, .. } = &mut *session;
    let step = checkout.next_step(cart, state.checkout_context()).await?;
    add_breadcrumb("checkout", &format!("Reached step {}", step.number()));
    Ok(view(&session))
}

/// Go back one step.
#[instrument(skip(state))]
pub async fn back(State(state): State<AppState>) -> Result<Json<CheckoutView>> {
    let mut session = state.session().await;
    session.checkout.prev_step()?;
    Ok(view(&session))
}

/// Gateway return: confirm the pending order and empty the cart.
#[instrument(skip(state))]
pub async fn success(State(state): State<AppState>) -> Result<Json<ConfirmationView>> {
    let mut session = state.session().await;
    let Session { cart, checkout, .. } = &mut *session;
    let order = checkout.confirm_payment(cart, state.orders())?;
    state.save_cart(cart)?;

    Ok(Json(ConfirmationView {
        order,
        checkout: checkout.view(cart),
    }))
}

/// Reset the checkout.
#[instrument(skip(state))]
pub async fn finish(State(state): State<AppState>) -> Json<CheckoutView> {
    let mut session = state.session().await;
    session.checkout.finish();
    view(&session)
}
