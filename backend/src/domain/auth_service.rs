//! Credential checking and session identity issuance.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{LoginService, OtpCommand, PasswordHasher, UserRepository};
use crate::domain::service_support::require_user;
use crate::domain::{Credentials, Error, SessionIdentity, UserId};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Service implementing [`LoginService`] for both credential kinds.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    otp: Arc<dyn OtpCommand>,
}

impl AuthService {
    /// Create a new service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        otp: Arc<dyn OtpCommand>,
    ) -> Self {
        Self { users, hasher, otp }
    }
}

#[async_trait]
impl LoginService for AuthService {
    async fn authenticate(&self, credentials: &Credentials) -> Result<SessionIdentity, Error> {
        let user = match credentials {
            Credentials::EmailPassword { email, password } => {
                let Some(user) = self.users.find_by_email(email).await? else {
                    warn!("login rejected: unknown email");
                    return Err(Error::unauthorized(INVALID_CREDENTIALS));
                };
                let Some(hash) = user.password_hash.as_ref() else {
                    warn!(user_id = %user.id, "login rejected: account has no password");
                    return Err(Error::unauthorized(INVALID_CREDENTIALS));
                };
                if !self.hasher.verify(password, hash).await? {
                    warn!(user_id = %user.id, "login rejected: wrong password");
                    return Err(Error::unauthorized(INVALID_CREDENTIALS));
                }
                user
            }
            Credentials::PhoneOtp { phone, code } => {
                // The code is consumed even when no account matches the phone.
                self.otp.verify(phone, code).await?;
                let Some(user) = self.users.find_by_phone(phone).await? else {
                    warn!("login rejected: phone verified but not registered");
                    return Err(Error::unauthorized("no account is registered for this phone"));
                };
                user
            }
        };
        info!(user_id = %user.id, role = %user.role, "user logged in");
        Ok(SessionIdentity::from(&user))
    }

    async fn refresh(&self, user_id: &UserId) -> Result<SessionIdentity, Error> {
        let user = require_user(self.users.as_ref(), user_id).await?;
        Ok(SessionIdentity::from(&user))
    }
}

#[cfg(test)]
mod tests;
