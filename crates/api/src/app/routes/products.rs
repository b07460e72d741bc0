use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use vendora_core::ProductId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product))
        .route("/:id", get(get_product))
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    match services
        .storefront
        .create_product(ctx.principal(), body.name, body.price, body.stock)
    {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => errors::core_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
        }
    };

    match services.storefront.get_product(product_id) {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::core_error_to_response(e),
    }
}
