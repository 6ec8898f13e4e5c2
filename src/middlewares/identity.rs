use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::context::AuthorInfo;

/// Attaches a fixed author identity to every request. Stands in for real
/// authentication: a token-checking middleware would insert the same
/// `AuthorInfo` from the verified session instead.
pub(crate) struct Identity {
    author_id: String,
}

impl Identity {
    pub fn new(author_id: impl Into<String>) -> Self {
        Self { author_id: author_id.into() }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Identity
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Response = ServiceResponse<B>;
    type Transform = IdentityService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(IdentityService {
            author_id: self.author_id.clone(),
            next_service: service,
        }))
    }
}

pub struct IdentityService<S> {
    author_id: String,
    next_service: S,
}

impl<S, B> Service<ServiceRequest> for IdentityService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        self.next_service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        req.extensions_mut().insert(AuthorInfo { id: self.author_id.clone() });
        let res_fut = self.next_service.call(req);
        Box::pin(async move {
            let resp = res_fut.await?;
            Ok(resp)
        })
    }
}
