use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};
use crate::utils::jwt::{validate_token, Claims};

/// Request guard for bearer-authenticated routes.
///
/// Header presence and `Bearer ` prefix are checked before the token is even
/// looked at, so a missing or malformed header is rejected with 401 before
/// any payload validation can run.
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub claims: Claims,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = std::future::Ready<AppResult<Self>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        std::future::ready(extract_user(req))
    }
}

fn extract_user(req: &HttpRequest) -> AppResult<AuthenticatedUser> {
    let token = bearer_token(req)?;

    let auth_config = req
        .app_data::<web::Data<AuthConfig>>()
        .ok_or_else(|| AppError::InternalError(anyhow::anyhow!("missing AuthConfig app data")))?;

    let claims = validate_token(token, auth_config.get_ref())?;
    Ok(AuthenticatedUser {
        user_id: claims.sub,
        claims,
    })
}

fn bearer_token(req: &HttpRequest) -> AppResult<&str> {
    match req.headers().get(AUTHORIZATION) {
        Some(header) => match header.to_str() {
            Ok(value) => match value.strip_prefix("Bearer ") {
                Some(token) if !token.is_empty() => Ok(token),
                _ => Err(AppError::Unauthorized),
            },
            Err(_) => Err(AppError::Unauthorized),
        },
        None => Err(AppError::Unauthorized),
    }
}
