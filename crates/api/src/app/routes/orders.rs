use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};

use vendora_checkout::{PlacementRequest, RequestedLine};
use vendora_core::OrderId;
use vendora_orders::AdminOrderFilter;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(place_order).get(list_my_orders))
        .route("/vendor/sales", get(vendor_sales))
        .route("/admin/all", get(admin_all_orders))
        .route("/:id", get(get_order))
        .route("/:id/status", put(update_order_status))
        .route("/:id/cancel", put(cancel_order))
}

pub async fn place_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Json(body): Json<dto::PlaceOrderRequest>,
) -> axum::response::Response {
    let request = PlacementRequest {
        lines: body
            .lines
            .iter()
            .map(|l| RequestedLine {
                product_id: l.product_id,
                quantity: l.quantity,
            })
            .collect(),
        shipping_address: body.shipping_address,
        payment_method: body.payment_method,
        totals: body.totals,
    };

    match services
        .storefront
        .place_order(ctx.principal().user_id, request)
    {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => errors::core_error_to_response(e),
    }
}

pub async fn list_my_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
) -> axum::response::Response {
    match services.storefront.list_orders_for_customer(ctx.principal()) {
        Ok(orders) => (StatusCode::OK, Json(orders)).into_response(),
        Err(e) => errors::core_error_to_response(e),
    }
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let order_id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id"),
    };

    match services.storefront.get_order(ctx.principal(), order_id) {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => errors::core_error_to_response(e),
    }
}

pub async fn update_order_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateOrderStatusRequest>,
) -> axum::response::Response {
    let order_id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id"),
    };

    match services.storefront.update_order_status(
        ctx.principal(),
        order_id,
        body.status,
        body.tracking_number,
    ) {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => errors::core_error_to_response(e),
    }
}

pub async fn cancel_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Option<Json<dto::CancelOrderRequest>>,
) -> axum::response::Response {
    let order_id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id"),
    };

    let reason = body.and_then(|Json(b)| b.reason);

    match services
        .storefront
        .cancel_order(ctx.principal(), order_id, reason)
    {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => errors::core_error_to_response(e),
    }
}

pub async fn vendor_sales(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
) -> axum::response::Response {
    match services.storefront.list_orders_for_vendor(ctx.principal()) {
        Ok(views) => (StatusCode::OK, Json(views)).into_response(),
        Err(e) => errors::core_error_to_response(e),
    }
}

pub async fn admin_all_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Query(query): Query<dto::AdminOrdersQuery>,
) -> axum::response::Response {
    let filter = AdminOrderFilter {
        status: query.status,
        start_date: query.start_date,
        end_date: query.end_date,
    };

    match services.storefront.admin_order_report(ctx.principal(), &filter) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => errors::core_error_to_response(e),
    }
}
