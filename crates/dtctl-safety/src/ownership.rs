//! Ownership lookup seams.
//!
//! Resource handlers know where a resource records its owner and how to ask
//! the platform who the current user is. The checker only sees the traits.

use crate::types::Ownership;

/// A resource that may record the identity of its owner.
pub trait OwnedResource {
    /// The owner's user id, if the resource records one.
    fn owner_id(&self) -> Option<&str>;
}

/// Source of the current authenticated user's identity.
pub trait IdentityProvider {
    /// The current user id, or `None` when it cannot be determined.
    fn current_user_id(&self) -> Option<String>;
}

/// Identity taken from configuration rather than a platform lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticIdentity {
    user_id: Option<String>,
}

impl StaticIdentity {
    /// Creates an identity provider that always answers `user_id`.
    #[must_use]
    pub fn new(user_id: Option<impl Into<String>>) -> Self {
        Self {
            user_id: user_id.map(Into::into),
        }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user_id(&self) -> Option<String> {
        self.user_id.clone()
    }
}

/// A bare owner id, for callers that already extracted the owner field.
impl OwnedResource for str {
    fn owner_id(&self) -> Option<&str> {
        Some(self)
    }
}

impl<T: OwnedResource + ?Sized> OwnedResource for Option<&T> {
    fn owner_id(&self) -> Option<&str> {
        self.and_then(OwnedResource::owner_id)
    }
}

/// Classifies `resource` relative to the user reported by `identity`.
pub fn ownership_of<R, I>(resource: &R, identity: &I) -> Ownership
where
    R: OwnedResource + ?Sized,
    I: IdentityProvider + ?Sized,
{
    let current = identity.current_user_id();
    Ownership::determine(resource.owner_id(), current.as_deref())
}
