use serde::{Deserialize, Serialize};

/// The authenticated administrator resolved by the identity gate.
///
/// Identity itself lives with an external provider; the engine only
/// cares whether a principal is present when a privileged operation is
/// invoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminPrincipal {
    pub subject: String,
}
