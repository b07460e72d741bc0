use std::sync::Arc;

use vendora_carts::InMemoryCartStore;
use vendora_catalog::InMemoryCatalog;
use vendora_checkout::Storefront;
use vendora_orders::InMemoryOrderStore;

/// Shared service state injected into every handler.
pub struct AppServices {
    pub storefront: Storefront,
}

/// Wire the in-memory stores behind the storefront orchestrator.
pub fn build_services() -> AppServices {
    let catalog = Arc::new(InMemoryCatalog::new());
    let carts = Arc::new(InMemoryCartStore::new());
    let orders = Arc::new(InMemoryOrderStore::new());

    // The catalog doubles as the stock ledger; both handles share one
    // product map so reservations and lookups agree.
    let storefront = Storefront::new(catalog.clone(), catalog, carts, orders);

    AppServices { storefront }
}
