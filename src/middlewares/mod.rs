use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderMap, AUTHORIZATION},
    middleware::Next,
    web, Error, HttpMessage, HttpRequest,
};

use crate::{
    api::error,
    constants::AuthConfig,
    utils::{Claims, TypeClaims},
};

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Admits requests carrying a valid access token and stores its claims in
/// the request extensions for `get_claims`.
pub async fn authentication<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<B>, Error>
where
    B: MessageBody + 'static,
{
    let config = req.app_data::<web::Data<AuthConfig>>().ok_or_else(|| {
        log::error!("AuthConfig missing from app data");
        error::Error::internal_server_error()
    })?;

    let token = bearer_token(req.headers())
        .ok_or_else(|| error::Error::unauthorized("Missing bearer token"))?;

    let claims = Claims::decode(token, config.jwt_secret.as_bytes())
        .ok()
        .filter(|c| c.is(TypeClaims::AccessToken))
        .ok_or_else(|| error::Error::unauthorized("Token invalid or expired"))?;

    req.extensions_mut().insert(claims);

    next.call(req).await
}

pub fn get_claims(req: &HttpRequest) -> Result<Claims, error::Error> {
    req.extensions()
        .get::<Claims>()
        .cloned()
        .ok_or_else(|| error::Error::unauthorized("Unauthorized"))
}
