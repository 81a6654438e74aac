//! Authentication context types

use crate::core::models::{Account, AccountWithProfile, Profile, Role};
use crate::utils::error::{ApiError, AuthFailure};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use std::future::{Ready, ready};
use uuid::Uuid;

/// Identity attached to a request after successful authentication.
///
/// Built only from an account loaded from the store, never from token claims alone.
/// Handlers read it through the `FromRequest` impl; nothing mutates it after attachment.
#[derive(Debug, Clone)]
pub struct AuthenticatedContext {
    identity: AccountWithProfile,
}

impl AuthenticatedContext {
    pub fn new(identity: AccountWithProfile) -> Self {
        Self { identity }
    }

    pub fn account(&self) -> &Account {
        &self.identity.account
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.identity.profile.as_ref()
    }

    pub fn identity(&self) -> &AccountWithProfile {
        &self.identity
    }

    pub fn account_id(&self) -> Uuid {
        self.identity.account.id
    }

    pub fn role(&self) -> Role {
        self.identity.account.role
    }
}

impl FromRequest for AuthenticatedContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedContext>()
                .cloned()
                .ok_or(ApiError::unauthenticated(AuthFailure::NotAuthenticated)),
        )
    }
}
