//! Application state shared across handlers.

use std::sync::Arc;

use murela_core::{Cart, ProductFilter};
use tokio::sync::{Mutex, MutexGuard};

use crate::admin::AdminPanel;
use crate::checkout::{CheckoutContext, CheckoutFlow};
use crate::config::StorefrontConfig;
use crate::services::Services;
use crate::storage::{CartStore, KeyValueStore, PendingOrderStore, ProductStore, StorageError};

/// Per-buyer state: the cart, the catalog filter and the checkout in progress.
#[derive(Debug, Default)]
pub struct Session {
    pub cart: Cart,
    pub filter: ProductFilter,
    pub checkout: CheckoutFlow,
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The storefront serves a single buyer, so all
/// mutable state lives in one [`Session`] behind an async mutex.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    products: ProductStore,
    carts: CartStore,
    orders: PendingOrderStore,
    admin: AdminPanel,
    services: Services,
    session: Mutex<Session>,
}

impl AppState {
    /// Create application state over `store` with the simulated services.
    #[must_use]
    pub fn new(config: StorefrontConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let services = Services::mock(&config.checkout);
        Self::with_services(config, store, services)
    }

    /// Create application state with explicit service implementations.
    ///
    /// The cart is restored from the store.
    #[must_use]
    pub fn with_services(
        config: StorefrontConfig,
        store: Arc<dyn KeyValueStore>,
        services: Services,
    ) -> Self {
        let carts = CartStore::new(store.clone());
        let session = Session {
            cart: carts.load(),
            ..Session::default()
        };

        Self {
            inner: Arc::new(AppStateInner {
                products: ProductStore::new(store.clone()),
                orders: PendingOrderStore::new(store.clone()),
                admin: AdminPanel::new(store, config.admin.clone()),
                carts,
                services,
                session: Mutex::new(session),
                config,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn products(&self) -> &ProductStore {
        &self.inner.products
    }

    #[must_use]
    pub fn orders(&self) -> &PendingOrderStore {
        &self.inner.orders
    }

    #[must_use]
    pub fn admin(&self) -> &AdminPanel {
        &self.inner.admin
    }

    /// Lock the buyer session.
    pub async fn session(&self) -> MutexGuard<'_, Session> {
        self.inner.session.lock().await
    }

    /// Persist the cart after a mutation.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be written.
    pub fn save_cart(&self, cart: &Cart) -> Result<(), StorageError> {
        self.inner.carts.save(cart)
    }

    /// Collaborators for checkout transitions.
    #[must_use]
    pub fn checkout_context(&self) -> CheckoutContext<'_> {
        CheckoutContext {
            services: &self.inner.services,
            origin_cep: &self.inner.config.checkout.origin_cep,
            orders: &self.inner.orders,
        }
    }
}
