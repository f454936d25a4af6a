//! Catalog administration.
//!
//! A single admin account, configured through the environment, can log in and
//! manage the catalog. The login is remembered as a flag in the document store
//! under [`keys::ADMIN_AUTHENTICATED`]; every catalog operation checks it.

mod error;

pub use error::AdminError;

use std::sync::Arc;

use murela_core::catalog::BUNDLED_IMAGES;
use murela_core::{Product, ProductDraft, ProductId};
use tracing::{info, instrument, warn};

use crate::config::AdminCredentials;
use crate::storage::{KeyValueStore, ProductStore, keys};

const AUTHENTICATED: &str = "true";

/// Admin login state and catalog CRUD.
#[derive(Clone)]
pub struct AdminPanel {
    store: Arc<dyn KeyValueStore>,
    products: ProductStore,
    credentials: AdminCredentials,
}

impl AdminPanel {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, credentials: AdminCredentials) -> Self {
        Self {
            products: ProductStore::new(store.clone()),
            store,
            credentials,
        }
    }

    /// Check credentials and remember the login.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::InvalidCredentials` on mismatch, or
    /// `AdminError::Storage` if the flag cannot be written.
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> Result<(), AdminError> {
        if !self.credentials.matches(username, password) {
            warn!("Admin login failed");
            return Err(AdminError::InvalidCredentials);
        }
        self.store.set(keys::ADMIN_AUTHENTICATED, AUTHENTICATED)?;
        info!("Admin logged in");
        Ok(())
    }

    /// Forget the login.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Storage` if the flag cannot be removed.
    pub fn logout(&self) -> Result<(), AdminError> {
        self.store.remove(keys::ADMIN_AUTHENTICATED)?;
        info!("Admin logged out");
        Ok(())
    }

    /// Whether the login flag is set. An unreadable flag counts as logged out.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        match self.store.get(keys::ADMIN_AUTHENTICATED) {
            Ok(flag) => flag.as_deref() == Some(AUTHENTICATED),
            Err(e) => {
                warn!(error = %e, "Could not read admin login flag");
                false
            }
        }
    }

    fn require_login(&self) -> Result<(), AdminError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(AdminError::Unauthorized)
        }
    }

    /// All products.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Unauthorized` when logged out.
    pub fn list(&self) -> Result<Vec<Product>, AdminError> {
        self.require_login()?;
        Ok(self.products.load())
    }

    /// Add a product, assigning the next free id.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Unauthorized` when logged out,
    /// `AdminError::InvalidProduct` if the draft fails validation, or
    /// `AdminError::Storage` if the catalog cannot be saved.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub fn create(&self, draft: ProductDraft) -> Result<Product, AdminError> {
        self.require_login()?;
        let mut products = self.products.load();
        let id = next_id(&products);
        let product = draft.into_product(id)?;

        products.push(product.clone());
        self.products.save(&products)?;
        info!(id = %product.id, "Product created");
        Ok(product)
    }

    /// Replace the product with `id`.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Unauthorized` when logged out,
    /// `AdminError::NotFound` for an unknown id,
    /// `AdminError::InvalidProduct` if the draft fails validation, or
    /// `AdminError::Storage` if the catalog cannot be saved.
    #[instrument(skip(self, draft))]
    pub fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, AdminError> {
        self.require_login()?;
        let mut products = self.products.load();
        let slot = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AdminError::NotFound(id))?;
        let product = draft.into_product(id)?;
        *slot = product.clone();

        self.products.save(&products)?;
        info!("Product updated");
        Ok(product)
    }

    /// Remove the product with `id`. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Unauthorized` when logged out, or
    /// `AdminError::Storage` if the catalog cannot be saved.
    #[instrument(skip(self))]
    pub fn delete(&self, id: ProductId) -> Result<bool, AdminError> {
        self.require_login()?;
        let mut products = self.products.load();
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Ok(false);
        }

        self.products.save(&products)?;
        info!("Product deleted");
        Ok(true)
    }
}

/// One more than the highest id in use, or 1 for an empty catalog.
#[must_use]
pub fn next_id(products: &[Product]) -> ProductId {
    products
        .iter()
        .map(|p| p.id)
        .max()
        .map_or(ProductId::new(1), |id| id.next())
}

/// The image the picker shows after `current`.
///
/// A non-blank external URL always wins. Otherwise cycles through the bundled
/// images, starting from the first when `current` is not one of them.
#[must_use]
pub fn next_image(current: &str, image_url: Option<&str>) -> String {
    if let Some(url) = image_url.map(str::trim).filter(|u| !u.is_empty()) {
        return url.to_string();
    }
    let next = BUNDLED_IMAGES
        .iter()
        .position(|image| *image == current)
        .map_or(0, |index| (index + 1) % BUNDLED_IMAGES.len());
    BUNDLED_IMAGES
        .get(next)
        .map_or_else(String::new, |image| (*image).to_string())
}
