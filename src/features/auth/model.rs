use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The verified caller identity injected by the auth middleware.
///
/// `sub` is the opaque subject claim from the identity provider and is the
/// only identity the rest of the system ever sees; photos, comments, and
/// favorites are all keyed by it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub sub: String,
}
