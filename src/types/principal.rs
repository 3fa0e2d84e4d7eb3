//! The two actors in every access decision.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ResourceId;

/// An authenticated end user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserRef {
    /// The user's identifier.
    pub id: ResourceId,
}

/// A client application acting on a user's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientRef {
    /// The client's identifier.
    pub id: ResourceId,
}

/// The `(user, client)` pair an access decision is made for.
///
/// The authentication collaborator resolves raw credentials into a
/// `Principal`; the core never sees credentials. Either side may be absent:
///
/// | user | client | meaning                                         |
/// |------|--------|-------------------------------------------------|
/// | ✗    | ✗      | [`Principal::unauthenticated`], no session      |
/// | ✗    | ✓      | client-only session (e.g. app creating a user)  |
/// | ✓    | ✓      | user session through a client                   |
/// | ✓    | ✗      | user session without client attribution         |
///
/// ## Example
///
/// ```rust
/// use resource_access::Principal;
///
/// let anonymous = Principal::unauthenticated();
/// assert!(!anonymous.has_session());
///
/// let app = Principal::client_only(1);
/// assert!(app.has_session());
/// assert_eq!(app.user_id(), None);
///
/// let alice = Principal::authenticated(7, 1);
/// assert_eq!(alice.user_id(), Some(7));
/// assert_eq!(alice.to_string(), "user:7/client:1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Principal {
    /// The authenticated user, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRef>,

    /// The client application, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientRef>,
}

impl Principal {
    /// The explicit "unauthenticated" marker.
    pub const fn unauthenticated() -> Self {
        Self { user: None, client: None }
    }

    /// A session established by a client application with no user.
    pub const fn client_only(client_id: ResourceId) -> Self {
        Self { user: None, client: Some(ClientRef { id: client_id }) }
    }

    /// A user session established through a client application.
    pub const fn authenticated(user_id: ResourceId, client_id: ResourceId) -> Self {
        Self { user: Some(UserRef { id: user_id }), client: Some(ClientRef { id: client_id }) }
    }

    /// A user session without client attribution.
    pub const fn user_only(user_id: ResourceId) -> Self {
        Self { user: Some(UserRef { id: user_id }), client: None }
    }

    /// Returns `true` if the principal carries an authenticated session.
    #[inline]
    pub fn has_session(&self) -> bool {
        self.user.is_some() || self.client.is_some()
    }

    /// Returns the user identifier, if a user is present.
    #[inline]
    pub fn user_id(&self) -> Option<ResourceId> {
        self.user.map(|user| user.id)
    }

    /// Returns the client identifier, if a client is present.
    #[inline]
    pub fn client_id(&self) -> Option<ResourceId> {
        self.client.map(|client| client.id)
    }

    /// Returns `true` if this principal acts as the given user.
    #[inline]
    pub fn is_user(&self, user_id: ResourceId) -> bool {
        self.user_id() == Some(user_id)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.user, self.client) {
            (None, None) => write!(f, "anonymous"),
            (Some(user), None) => write!(f, "user:{}", user.id),
            (None, Some(client)) => write!(f, "client:{}", client.id),
            (Some(user), Some(client)) => write!(f, "user:{}/client:{}", user.id, client.id),
        }
    }
}
