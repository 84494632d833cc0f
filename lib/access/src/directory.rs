//! Role-directory seam.

use async_trait::async_trait;

use crate::error::DirectoryError;
use crate::role::RoleRecord;

/// Read-only lookup of business roles by e-mail.
///
/// Implementations must only ever be handed the verified e-mail from
/// ID-token claims, never a user-supplied value, so a spoofed identifier
/// cannot acquire a role. Each login performs a fresh lookup; there is no
/// caching requirement.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Looks up the directory record for a verified e-mail.
    ///
    /// `Ok(None)` means the identity has no role mapping (and therefore no
    /// access); it is a normal outcome, not a failure.
    async fn lookup_role(&self, email: &str) -> Result<Option<RoleRecord>, DirectoryError>;
}
