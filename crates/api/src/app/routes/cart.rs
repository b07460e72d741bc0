use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use vendora_carts::LineKey;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(get_cart).delete(clear_cart))
        .route("/items", post(add_item).put(update_item))
}

pub async fn get_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
) -> axum::response::Response {
    match services.storefront.get_cart(ctx.principal().user_id) {
        Ok(cart) => (StatusCode::OK, Json(cart)).into_response(),
        Err(e) => errors::core_error_to_response(e),
    }
}

pub async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Json(body): Json<dto::AddCartItemRequest>,
) -> axum::response::Response {
    match services.storefront.add_to_cart(
        ctx.principal().user_id,
        body.product_id,
        body.quantity,
        body.selected_size,
        body.selected_color,
    ) {
        Ok(cart) => (StatusCode::OK, Json(cart)).into_response(),
        Err(e) => errors::core_error_to_response(e),
    }
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Json(body): Json<dto::UpdateCartItemRequest>,
) -> axum::response::Response {
    let key = LineKey {
        product_id: body.product_id,
        selected_size: body.selected_size,
        selected_color: body.selected_color,
    };

    match services
        .storefront
        .set_cart_quantity(ctx.principal().user_id, &key, body.quantity)
    {
        Ok(cart) => (StatusCode::OK, Json(cart)).into_response(),
        Err(e) => errors::core_error_to_response(e),
    }
}

pub async fn clear_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
) -> axum::response::Response {
    match services.storefront.clear_cart(ctx.principal().user_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::core_error_to_response(e),
    }
}
