//! The storefront service: every core-facing operation, behind the access
//! policy, with the placement saga and its compensation protocol.

use std::sync::Arc;

use vendora_auth::{
    authorize_admin, authorize_order, authorize_product, OrderAction, OrderResource, Principal,
    ProductAction, Role,
};
use vendora_carts::{Cart, CartStore, LineKey, NewCartLine};
use vendora_catalog::{Product, ProductCatalog, StockLedger};
use vendora_core::{CoreResult, Money, OrderId, ProductId, UserId};
use vendora_orders::{
    AdminOrderFilter, AdminOrderReport, NewOrder, Order, OrderLine, OrderStatus, OrderStore,
    VendorOrderView,
};

use crate::placement::PlacementRequest;

/// Bounded retry for clearing the cart after the order is durably created.
/// An order-confirmed-but-cart-intact state is the one inconsistency this
/// design must not silently expose.
const CART_CLEAR_ATTEMPTS: u32 = 5;

/// Orchestrator over the stock ledger, cart store, and order store.
///
/// Placement is a sequence of independent per-product atomic reservations,
/// not a cross-product transaction; consistency across products comes from
/// the compensation protocol. Two placements over disjoint product sets
/// proceed fully in parallel.
pub struct Storefront {
    catalog: Arc<dyn ProductCatalog>,
    ledger: Arc<dyn StockLedger>,
    carts: Arc<dyn CartStore>,
    orders: Arc<dyn OrderStore>,
}

impl Storefront {
    pub fn new(
        catalog: Arc<dyn ProductCatalog>,
        ledger: Arc<dyn StockLedger>,
        carts: Arc<dyn CartStore>,
        orders: Arc<dyn OrderStore>,
    ) -> Self {
        Self {
            catalog,
            ledger,
            carts,
            orders,
        }
    }

    // ── Placement saga ──────────────────────────────────────────────────

    /// Convert a cart snapshot into a durable order.
    ///
    /// Forward steps: reserve stock per line (in submission order, so
    /// repeated failures are reproducible), create the order from the
    /// reservation-time snapshots, clear the cart. The first reservation
    /// failure, or an order-store failure, releases every reservation
    /// already granted, in reverse order of acquisition, before the error
    /// surfaces: every returned error leaves stock and cart as they were
    /// before the call.
    pub fn place_order(
        &self,
        customer_id: UserId,
        request: PlacementRequest,
    ) -> CoreResult<Order> {
        request.validate()?;

        let mut reserved: Vec<(ProductId, u32)> = Vec::with_capacity(request.lines.len());
        let mut lines: Vec<OrderLine> = Vec::with_capacity(request.lines.len());

        for requested in &request.lines {
            match self.ledger.try_reserve(requested.product_id, requested.quantity) {
                Ok(snapshot) => {
                    reserved.push((requested.product_id, requested.quantity));
                    lines.push(OrderLine {
                        product_id: snapshot.product_id,
                        vendor_id: snapshot.vendor_id,
                        name: snapshot.name,
                        unit_price: snapshot.unit_price,
                        quantity: requested.quantity,
                    });
                }
                Err(err) => {
                    tracing::warn!(
                        customer_id = %customer_id,
                        product_id = %requested.product_id,
                        error = %err,
                        "placement aborted, compensating prior reservations"
                    );
                    self.release_reserved(&reserved);
                    return Err(err);
                }
            }
        }

        let order = match self.orders.create(NewOrder {
            customer_id,
            lines,
            shipping_address: request.shipping_address,
            payment_method: request.payment_method,
            totals: request.totals,
        }) {
            Ok(order) => order,
            Err(err) => {
                tracing::warn!(
                    customer_id = %customer_id,
                    error = %err,
                    "order creation failed after reservation, compensating"
                );
                self.release_reserved(&reserved);
                return Err(err);
            }
        };

        // The order and the stock decrement are now the source of truth;
        // a stubborn cart must not fail the placement.
        self.clear_cart_with_retry(customer_id, order.id);

        tracing::info!(order_id = %order.id, customer_id = %customer_id, "order placed");
        Ok(order)
    }

    /// Compensation: undo granted reservations in reverse order of
    /// acquisition. A release that itself fails is an orphaned reservation
    /// needing operator attention, logged distinctly; it never masks the
    /// original failure.
    fn release_reserved(&self, reserved: &[(ProductId, u32)]) {
        for (product_id, quantity) in reserved.iter().rev() {
            if let Err(err) = self.ledger.release(*product_id, *quantity) {
                tracing::error!(
                    product_id = %product_id,
                    quantity,
                    error = %err,
                    "orphaned reservation: compensation release failed"
                );
            }
        }
    }

    fn clear_cart_with_retry(&self, customer_id: UserId, order_id: OrderId) {
        for attempt in 1..=CART_CLEAR_ATTEMPTS {
            match self.carts.clear(customer_id) {
                Ok(()) => return,
                Err(err) if attempt < CART_CLEAR_ATTEMPTS => {
                    tracing::warn!(
                        customer_id = %customer_id,
                        attempt,
                        error = %err,
                        "cart clear failed, retrying"
                    );
                }
                Err(err) => {
                    tracing::error!(
                        customer_id = %customer_id,
                        order_id = %order_id,
                        error = %err,
                        "order placed but cart not cleared, needs reconciliation"
                    );
                }
            }
        }
    }

    // ── Cancellation ────────────────────────────────────────────────────

    /// Cancel an order and restore its stock.
    ///
    /// Releases happen only after the status transition succeeds, and the
    /// terminal-state guard makes repeated cancels fail before any second
    /// release, so stock is restored exactly once.
    pub fn cancel_order(
        &self,
        principal: &Principal,
        order_id: OrderId,
        reason: Option<String>,
    ) -> CoreResult<Order> {
        let order = self.orders.by_id(order_id)?;
        let vendor_ids = order.vendor_ids();
        authorize_order(
            principal,
            OrderAction::Cancel,
            &OrderResource {
                customer_id: order.customer_id,
                vendor_ids: &vendor_ids,
            },
        )?;

        let cancelled = self.orders.cancel(order_id, reason)?;

        for line in &cancelled.lines {
            if let Err(err) = self.ledger.release(line.product_id, line.quantity) {
                tracing::error!(
                    order_id = %order_id,
                    product_id = %line.product_id,
                    quantity = line.quantity,
                    error = %err,
                    "stock release failed after cancellation, needs reconciliation"
                );
            }
        }

        Ok(cancelled)
    }

    // ── Policy-guarded order reads and updates ──────────────────────────

    /// Fetch one order. Vendors get the order scoped to their own lines.
    pub fn get_order(&self, principal: &Principal, order_id: OrderId) -> CoreResult<Order> {
        let mut order = self.orders.by_id(order_id)?;
        let vendor_ids = order.vendor_ids();
        authorize_order(
            principal,
            OrderAction::Read,
            &OrderResource {
                customer_id: order.customer_id,
                vendor_ids: &vendor_ids,
            },
        )?;

        if principal.role == Role::Vendor {
            order.lines = order.lines_for_vendor(principal.user_id);
        }
        Ok(order)
    }

    pub fn update_order_status(
        &self,
        principal: &Principal,
        order_id: OrderId,
        status: OrderStatus,
        tracking_number: Option<String>,
    ) -> CoreResult<Order> {
        let order = self.orders.by_id(order_id)?;
        let vendor_ids = order.vendor_ids();
        authorize_order(
            principal,
            OrderAction::UpdateStatus,
            &OrderResource {
                customer_id: order.customer_id,
                vendor_ids: &vendor_ids,
            },
        )?;

        self.orders.update_status(order_id, status, tracking_number)
    }

    /// The calling customer's own orders, newest first.
    pub fn list_orders_for_customer(&self, principal: &Principal) -> CoreResult<Vec<Order>> {
        self.orders.by_customer(principal.user_id)
    }

    /// The calling vendor's sales, line lists scoped to them.
    pub fn list_orders_for_vendor(
        &self,
        principal: &Principal,
    ) -> CoreResult<Vec<VendorOrderView>> {
        if principal.role != Role::Vendor {
            authorize_admin(principal)?;
        }
        self.orders.by_vendor(principal.user_id)
    }

    pub fn admin_order_report(
        &self,
        principal: &Principal,
        filter: &AdminOrderFilter,
    ) -> CoreResult<AdminOrderReport> {
        authorize_admin(principal)?;
        self.orders.report(filter)
    }

    // ── Cart operations ─────────────────────────────────────────────────

    pub fn get_cart(&self, customer_id: UserId) -> CoreResult<Cart> {
        self.carts.get(customer_id)
    }

    /// Add a product to the cart, snapshotting its current price. Stock is
    /// deliberately not checked here, only at checkout.
    pub fn add_to_cart(
        &self,
        customer_id: UserId,
        product_id: ProductId,
        quantity: u32,
        selected_size: Option<String>,
        selected_color: Option<String>,
    ) -> CoreResult<Cart> {
        let product = self.catalog.get(product_id)?;
        if !product.can_be_sold() {
            return Err(vendora_core::CoreError::ProductInactive(product_id));
        }

        self.carts.add_or_merge(
            customer_id,
            NewCartLine {
                product_id,
                quantity,
                selected_size,
                selected_color,
                unit_price: product.price,
            },
        )
    }

    pub fn set_cart_quantity(
        &self,
        customer_id: UserId,
        key: &LineKey,
        quantity: u32,
    ) -> CoreResult<Cart> {
        self.carts.set_quantity(customer_id, key, quantity)
    }

    pub fn clear_cart(&self, customer_id: UserId) -> CoreResult<()> {
        self.carts.clear(customer_id)
    }

    // ── Catalog surface (the stock-mutation path's dependencies) ────────

    pub fn create_product(
        &self,
        principal: &Principal,
        name: String,
        price: Money,
        stock: u32,
    ) -> CoreResult<Product> {
        authorize_product(principal, ProductAction::Write, principal.user_id)?;
        let product = Product::new(principal.user_id, name, price, stock)?;
        self.catalog.insert(product.clone())?;
        Ok(product)
    }

    pub fn get_product(&self, product_id: ProductId) -> CoreResult<Product> {
        self.catalog.get(product_id)
    }
}
