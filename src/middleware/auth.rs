/// Bearer-token authentication middleware
///
/// Validates the Authorization header and adds the authenticated identity
/// claim (email) to request extensions. Handlers receive it through the
/// `Identity` extractor and resolve the acting user from the database on
/// every call.
use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

use crate::security::jwt::JwtKeys;

/// Authenticated identity claim: the email the token was issued for.
#[derive(Debug, Clone)]
pub struct Identity(pub String);

/// Authentication middleware factory
pub struct JwtAuth {
    keys: JwtKeys,
}

impl JwtAuth {
    pub fn new(keys: JwtKeys) -> Self {
        Self { keys }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(JwtAuthService {
            service: Rc::new(service),
            keys: self.keys.clone(),
        }))
    }
}

/// Authentication middleware service
pub struct JwtAuthService<S> {
    service: Rc<S>,
    keys: JwtKeys,
}

impl<S, B> Service<ServiceRequest> for JwtAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let keys = self.keys.clone();

        Box::pin(async move {
            // Extract the header to an owned String before touching
            // extensions_mut, so no RefCell borrows are still active.
            let auth_header = match req.headers().get("Authorization") {
                Some(header) => match header.to_str() {
                    Ok(h) => h.to_string(),
                    Err(_) => {
                        return Err(ErrorUnauthorized("Invalid Authorization header"));
                    }
                },
                None => {
                    return Err(ErrorUnauthorized("Missing Authorization header"));
                }
            };

            let token = match auth_header.strip_prefix("Bearer ") {
                Some(t) => t,
                None => {
                    return Err(ErrorUnauthorized(
                        "Invalid Authorization scheme, expected Bearer",
                    ));
                }
            };

            let claims = match keys.validate_token(token) {
                Ok(claims) => claims,
                Err(e) => {
                    tracing::debug!("Token validation failed: {}", e);
                    return Err(ErrorUnauthorized("Invalid or expired token"));
                }
            };

            req.extensions_mut().insert(Identity(claims.sub));

            let res = service.call(req).await?;
            Ok(res)
        })
    }
}

impl FromRequest for Identity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<Identity>().cloned() {
            Some(identity) => ready(Ok(identity)),
            None => ready(Err(ErrorUnauthorized(
                "Identity missing in request extensions",
            ))),
        }
    }
}
