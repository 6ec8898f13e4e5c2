use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::Error;

/// The professor on whose behalf a request runs. Placed in the request
/// extensions by `middlewares::identity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorInfo {
    pub id: String,
}

impl FromRequest for AuthorInfo {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<Self>() {
            Some(author) => ready(Ok(author.clone())),
            None => ready(Err(Error::ServerError("no author identity on request, identity middleware not mounted".into()))),
        }
    }
}
