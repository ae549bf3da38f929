//! Admin credential handling.
//!
//! One HttpOnly cookie is the single source of truth: the same value gates
//! the admin routes and is forwarded as the Bearer credential on writes. The
//! gate checks presence only; the remote API is the actual validator.

use actix_web::body::{BoxBody, MessageBody};
use actix_web::cookie::Cookie;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Next;
use actix_web::{HttpRequest, HttpResponse};

pub const AUTH_COOKIE: &str = "auth_token";

/// The stored token, if any. Empty values count as absent.
pub fn auth_token(req: &HttpRequest) -> Option<String> {
    req.cookie(AUTH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

pub fn is_authenticated(req: &HttpRequest) -> bool {
    auth_token(req).is_some()
}

/// Cookie storing a freshly obtained token.
pub fn login_cookie(token: String) -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE, token)
        .path("/")
        .http_only(true)
        .finish()
}

/// Removal cookie that clears the credential.
pub fn logout_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(AUTH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// Route middleware for the admin scope. Evaluated on every request, so a
/// token obtained after startup unlocks immediately and a cleared one locks
/// again without a restart.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, actix_web::Error> {
    if is_authenticated(req.request()) {
        Ok(next.call(req).await?.map_into_boxed_body())
    } else {
        log::debug!("Unauthenticated request to {}, redirecting to login", req.path());
        let (req, _payload) = req.into_parts();
        let response = HttpResponse::Found()
            .insert_header((header::LOCATION, crate::router::LOGIN_PATH))
            .finish();
        Ok(ServiceResponse::new(req, response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn missing_cookie_is_unauthenticated() {
        let req = TestRequest::get().to_http_request();
        assert!(!is_authenticated(&req));
        assert_eq!(auth_token(&req), None);
    }

    #[test]
    fn empty_cookie_is_unauthenticated() {
        let req = TestRequest::get()
            .cookie(Cookie::new(AUTH_COOKIE, ""))
            .to_http_request();
        assert!(!is_authenticated(&req));
    }

    #[test]
    fn any_non_empty_value_authenticates() {
        let req = TestRequest::get()
            .cookie(Cookie::new(AUTH_COOKIE, "not-even-a-jwt"))
            .to_http_request();
        assert!(is_authenticated(&req));
        assert_eq!(auth_token(&req).as_deref(), Some("not-even-a-jwt"));
    }

    #[test]
    fn login_cookie_is_http_only() {
        let cookie = login_cookie("tok".to_string());
        assert_eq!(cookie.name(), AUTH_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }
}
