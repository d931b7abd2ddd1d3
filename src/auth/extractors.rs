use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;
use crate::models::Role;

/// The caller's identity, derived from validated token claims.
///
/// This extractor is intended for routes protected by `AuthMiddleware`, which
/// validates the bearer token and inserts the decoded `Claims` into request
/// extensions. The identity it yields is the only scoping key task operations
/// use; it can never come from the request body or query string, so a caller
/// cannot impersonate another user.
///
/// If no claims are present in the extensions (e.g. the middleware was not
/// applied), extraction fails with `AppError::Unauthorized`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The numeric user id from the token's subject claim.
    pub id: i32,
    /// The role carried by the token.
    pub role: Role,
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError; // AppError converts into ActixError via ResponseError
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthenticatedUser {
                id: claims.sub,
                role: claims.role,
            })),
            None => {
                // Only reachable if AuthMiddleware did not run for this
                // route. Unauthorized is the safe default.
                let err = AppError::Unauthorized(
                    "Authentication claims not found in request".to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::Payload;
    use actix_web::http::StatusCode;
    use actix_web::test;

    fn claims_for(user_id: i32, role: Role) -> Claims {
        Claims {
            sub: user_id,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            role,
            iss: "tasktrack".to_string(),
            aud: "tasktrack-clients".to_string(),
            exp: 4_102_444_800, // far future
        }
    }

    #[actix_rt::test]
    async fn test_authenticated_user_extractor_success() {
        let req = test::TestRequest::default().to_http_request();
        req.extensions_mut().insert(claims_for(123, Role::User));

        let mut payload = Payload::None;
        let extracted = AuthenticatedUser::from_request(&req, &mut payload).await;
        assert!(extracted.is_ok());
        let user = extracted.unwrap();
        assert_eq!(user.id, 123);
        assert_eq!(user.role, Role::User);
    }

    #[actix_rt::test]
    async fn test_authenticated_user_extractor_failure() {
        let req = test::TestRequest::default().to_http_request();
        // No claims inserted into extensions

        let mut payload = Payload::None;
        let result = AuthenticatedUser::from_request(&req, &mut payload).await;
        assert!(result.is_err());

        let err = result.unwrap_err();
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
