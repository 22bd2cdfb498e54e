//! Ownership decision functions.
//!
//! Resource-scoped checks (tasks) are enforced at the query level in the
//! db crate, so a foreign resource is indistinguishable from a missing one.
//! The functions here cover the remaining cases: the raw id comparison and
//! the self-scoped account mutation check, which deliberately rejects with
//! `Unauthorized` rather than `NotFound`.

use crate::error::CoreError;
use crate::types::DbId;

/// A principal owns a resource iff its id equals the resource's owner id.
pub fn owns(principal_id: DbId, owner_id: DbId) -> bool {
    principal_id == owner_id
}

/// Require that the acting principal is the target account itself.
///
/// Account update/delete is only ever allowed on the caller's own row.
pub fn ensure_self(principal_id: DbId, target_id: DbId) -> Result<(), CoreError> {
    if owns(principal_id, target_id) {
        Ok(())
    } else {
        Err(CoreError::Unauthorized(
            "You may only modify your own account".into(),
        ))
    }
}
