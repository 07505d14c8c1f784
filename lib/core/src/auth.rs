//! Authenticated-identity seam between the edge middleware and modules.
//!
//! The server binary validates the JWT and inserts a [`CurrentUser`] into
//! request extensions; module handlers extract it with
//! `Extension<CurrentUser>`. Modules never parse tokens themselves.

/// The authenticated user attached to a request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User id (document key in the `user` collection).
    pub id: String,
    /// Display name, for logging and denormalized responses.
    pub name: String,
    /// Session id behind the presented token.
    pub session: String,
}
