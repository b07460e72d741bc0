use axum::{http::StatusCode, response::IntoResponse, Extension, Json};

use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(ctx): Extension<PrincipalContext>) -> impl IntoResponse {
    let principal = ctx.principal();
    Json(serde_json::json!({
        "user_id": principal.user_id.to_string(),
        "role": principal.role.as_str(),
    }))
}
