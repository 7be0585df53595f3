//! Lookups shared by the domain services.

use crate::domain::ports::{UserRepository, VendorProfileRepository};
use crate::domain::{Error, User, UserId, VendorProfile};

/// Load the calling user, reporting a vanished account as unauthorised.
///
/// A session can outlive the account it names (for example after a delete
/// from another device), so a missing row means the session is stale.
pub(crate) async fn require_user(
    users: &dyn UserRepository,
    user_id: &UserId,
) -> Result<User, Error> {
    users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| Error::unauthorized("account no longer exists"))
}

/// Load the vendor profile owned by the calling user.
pub(crate) async fn require_vendor_profile(
    vendors: &dyn VendorProfileRepository,
    user_id: &UserId,
) -> Result<VendorProfile, Error> {
    vendors
        .find_by_user_id(user_id)
        .await?
        .ok_or_else(|| Error::not_found("vendor profile not found"))
}
