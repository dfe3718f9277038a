//! AR preview state.
//!
//! The viewer only tracks which product is being previewed and whether it
//! has been placed in the scene; rendering belongs to the host app.

use crate::cart::Cart;
use crate::catalog::{Catalog, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Selection and placement state of the AR viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct ArViewer {
    selected: Option<ProductId>,
    placed: bool,
}

impl ArViewer {
    /// Start on the first AR-capable product, falling back to the first product.
    pub fn new(catalog: &Catalog) -> Self {
        let selected = catalog
            .ar_products()
            .first()
            .map(|p| p.id.clone())
            .or_else(|| catalog.products().first().map(|p| p.id.clone()));

        Self {
            selected,
            placed: false,
        }
    }

    /// Preview another product. Clears any placement.
    pub fn select(&mut self, catalog: &Catalog, id: &ProductId) -> Result<(), CommerceError> {
        let product = catalog.get(id)?;
        self.selected = Some(product.id.clone());
        self.placed = false;
        Ok(())
    }

    /// Place the selected product in the scene. Returns false with nothing selected.
    pub fn place(&mut self) -> bool {
        self.placed = self.selected.is_some();
        self.placed
    }

    pub fn reset(&mut self) {
        self.placed = false;
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }

    pub fn selected_id(&self) -> Option<&ProductId> {
        self.selected.as_ref()
    }

    /// The product being previewed.
    pub fn selected<'c>(&self, catalog: &'c Catalog) -> Option<&'c Product> {
        self.selected.as_ref().and_then(|id| catalog.find(id))
    }

    /// Add one unit of the previewed product to `cart`.
    pub fn add_selected_to_cart(
        &self,
        catalog: &Catalog,
        cart: &mut Cart,
    ) -> Result<ProductId, CommerceError> {
        let id = self
            .selected
            .as_ref()
            .ok_or_else(|| CommerceError::ProductNotFound("no product selected".to_string()))?;
        let product = catalog.get(id)?;
        cart.add_to_cart(product);
        Ok(product.id.clone())
    }
}
