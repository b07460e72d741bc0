use axum::{
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use vendora_auth::{Principal, Role};
use vendora_core::UserId;

use crate::context::PrincipalContext;

/// Resolve the caller's identity from trusted gateway headers.
///
/// Identity issuance is an upstream collaborator; by the time a request
/// reaches this service, `x-user-id` and `x-user-role` have already been
/// verified. Missing or malformed headers are a 401.
pub async fn auth_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let principal = extract_principal(req.headers())?;

    req.extensions_mut().insert(PrincipalContext::new(principal));

    Ok(next.run(req).await)
}

fn extract_principal(headers: &HeaderMap) -> Result<Principal, StatusCode> {
    let user_id: UserId = header_str(headers, "x-user-id")?
        .parse()
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let role: Role = header_str(headers, "x-user-role")?
        .parse()
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    Ok(Principal::new(user_id, role))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, StatusCode> {
    headers
        .get(name)
        .ok_or(StatusCode::UNAUTHORIZED)?
        .to_str()
        .map_err(|_| StatusCode::UNAUTHORIZED)
}
