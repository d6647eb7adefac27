//! JWT authentication middleware for protecting API endpoints.
//!
//! Extracts the bearer token from the `Authorization` header, resolves it to a
//! stored identity and injects an [`AuthContext`] into the request. Requests
//! without a usable token are answered with a 401 before reaching the handler,
//! unless their path falls under one of the public prefixes.

use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use re_core::{
    domain::entities::identity::Identity,
    errors::DomainResult,
    repositories::UserRepository,
    services::AuthService,
};

use crate::handlers::{handle_domain_error, unauthorized_response};

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticated caller injected into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Token subject (e-mail address)
    pub username: String,
    /// Authorities of the stored identity
    pub authorities: Vec<String>,
}

impl AuthContext {
    pub fn from_identity(identity: &Identity) -> Self {
        Self {
            username: identity.username.clone(),
            authorities: identity.authority_list(),
        }
    }
}

/// Resolves a raw bearer token to the identity it was issued for
#[async_trait]
pub trait TokenAuthenticator: Send + Sync {
    async fn authenticate_token(&self, token: &str) -> DomainResult<Identity>;
}

#[async_trait]
impl<U> TokenAuthenticator for AuthService<U>
where
    U: UserRepository + 'static,
{
    async fn authenticate_token(&self, token: &str) -> DomainResult<Identity> {
        self.resolve(token).await
    }
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    authenticator: Arc<dyn TokenAuthenticator>,
    public_paths: Rc<[String]>,
}

impl JwtAuth {
    /// Guard every request
    pub fn new(authenticator: Arc<dyn TokenAuthenticator>) -> Self {
        Self {
            authenticator,
            public_paths: Rc::from(Vec::new()),
        }
    }

    /// Let requests under `prefix` through without a token
    ///
    /// Matches whole segments: `/health` covers `/health` and `/health/live`
    /// but not `/healthz`.
    pub fn public_path(mut self, prefix: impl Into<String>) -> Self {
        let mut paths = self.public_paths.to_vec();
        paths.push(prefix.into().trim_end_matches('/').to_string());
        self.public_paths = Rc::from(paths);
        self
    }
}

fn is_public(public_paths: &[String], path: &str) -> bool {
    public_paths.iter().any(|prefix| {
        path.strip_prefix(prefix.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            authenticator: Arc::clone(&self.authenticator),
            public_paths: Rc::clone(&self.public_paths),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    authenticator: Arc<dyn TokenAuthenticator>,
    public_paths: Rc<[String]>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let authenticator = Arc::clone(&self.authenticator);

        if is_public(&self.public_paths, req.path()) {
            return Box::pin(async move {
                service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body)
            });
        }

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    log::debug!("No bearer token on request to {}", req.path());
                    let response = unauthorized_response("Authentication required");
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            match authenticator.authenticate_token(&token).await {
                Ok(identity) => {
                    req.extensions_mut()
                        .insert(AuthContext::from_identity(&identity));
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(error) => {
                    log::info!("Rejected token on request to {}: {}", req.path(), error);
                    let response = handle_domain_error(error);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| {
                InternalError::from_response(
                    "Authentication required",
                    unauthorized_response("Authentication required"),
                )
                .into()
            });

        ready(result)
    }
}
