//! User settings and vendor settings services.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    SettingsRepository, UserRepository, UserSettingsService, VendorProfileRepository,
    VendorSettings, VendorSettingsService,
};
use crate::domain::service_support::{require_user, require_vendor_profile};
use crate::domain::{Error, UserId, UserSettings, UserSettingsChanges, VendorSettingsUpdate};

/// Service implementing [`UserSettingsService`] and [`VendorSettingsService`].
#[derive(Clone)]
pub struct SettingsService {
    settings: Arc<dyn SettingsRepository>,
    users: Arc<dyn UserRepository>,
    vendors: Arc<dyn VendorProfileRepository>,
    clock: Arc<dyn Clock>,
}

impl SettingsService {
    /// Create a new service.
    pub fn new(
        settings: Arc<dyn SettingsRepository>,
        users: Arc<dyn UserRepository>,
        vendors: Arc<dyn VendorProfileRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            settings,
            users,
            vendors,
            clock,
        }
    }

    async fn fetch_or_create_defaults(&self, user_id: &UserId) -> Result<UserSettings, Error> {
        if let Some(settings) = self.settings.find(user_id).await? {
            return Ok(settings);
        }
        let defaults = UserSettings::defaults(*user_id, self.clock.utc());
        self.settings.save(&defaults).await?;
        Ok(defaults)
    }
}

#[async_trait]
impl UserSettingsService for SettingsService {
    async fn fetch(&self, user_id: &UserId) -> Result<UserSettings, Error> {
        self.fetch_or_create_defaults(user_id).await
    }

    async fn update(
        &self,
        user_id: &UserId,
        changes: UserSettingsChanges,
    ) -> Result<UserSettings, Error> {
        let mut settings = self.fetch_or_create_defaults(user_id).await?;
        changes.apply_to(&mut settings, self.clock.utc());
        self.settings.save(&settings).await?;
        Ok(settings)
    }
}

#[async_trait]
impl VendorSettingsService for SettingsService {
    async fn fetch(&self, user_id: &UserId) -> Result<VendorSettings, Error> {
        let owner = require_user(self.users.as_ref(), user_id).await?;
        let profile = require_vendor_profile(self.vendors.as_ref(), user_id).await?;
        Ok(VendorSettings { owner, profile })
    }

    async fn update(
        &self,
        user_id: &UserId,
        update: VendorSettingsUpdate,
    ) -> Result<VendorSettings, Error> {
        let mut owner = require_user(self.users.as_ref(), user_id).await?;
        let mut profile = require_vendor_profile(self.vendors.as_ref(), user_id).await?;
        let now = self.clock.utc();
        if let Some(name) = update.owner_name {
            owner.name = name;
            owner.updated_at = now;
        }
        update.profile.apply_to(&mut profile, now);
        self.vendors.update_with_owner(&owner, &profile).await?;
        info!(user_id = %user_id, vendor_id = %profile.id, "vendor settings updated");
        Ok(VendorSettings { owner, profile })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{
        MockSettingsRepository, MockUserRepository, MockVendorProfileRepository,
        RepositoryError,
    };
    use crate::domain::text::limits;
    use crate::domain::{
        BoundedText, ErrorCode, NewVendorProfile, PersonName, PhoneNumber, Role, User,
        VendorProfileChanges,
    };
    use crate::test_support::MutableClock;
    use chrono::Utc;
    use rstest::rstest;

    fn owner() -> User {
        let now = Utc::now();
        User {
            id: UserId::random(),
            email: None,
            phone: Some(PhoneNumber::new("9876543210").expect("phone")),
            password_hash: None,
            name: PersonName::new("Asha Rao").expect("name"),
            gender: None,
            role: Role::Vendor,
            created_at: now,
            updated_at: now,
        }
    }

    fn service(
        settings: MockSettingsRepository,
        users: MockUserRepository,
        vendors: MockVendorProfileRepository,
    ) -> SettingsService {
        SettingsService::new(
            Arc::new(settings),
            Arc::new(users),
            Arc::new(vendors),
            Arc::new(MutableClock::new(Utc::now())),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn first_fetch_saves_defaults() {
        let mut settings = MockSettingsRepository::new();
        settings.expect_find().times(1).return_once(|_| Ok(None));
        settings.expect_save().times(1).return_once(|_| Ok(()));

        let fetched = UserSettingsService::fetch(
            &service(settings, MockUserRepository::new(), MockVendorProfileRepository::new()),
            &UserId::random(),
        )
        .await
        .expect("defaults");

        assert!(fetched.email_notifications);
        assert!(!fetched.marketing_emails);
    }

    #[rstest]
    #[tokio::test]
    async fn vendor_update_writes_owner_and_profile_together() {
        let owner = owner();
        let owner_id = owner.id;
        let text = |raw: &str| BoundedText::new(raw, limits::LINE).expect("text");
        let profile = NewVendorProfile {
            business_name: text("Lens & Light"),
            category: text("Photography"),
            city: text("Pune"),
        }
        .into_profile(owner_id, Utc::now());

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(owner)));
        let mut vendors = MockVendorProfileRepository::new();
        vendors
            .expect_find_by_user_id()
            .return_once(move |_| Ok(Some(profile)));
        vendors
            .expect_update_with_owner()
            .times(1)
            .withf(|owner, profile| {
                owner.name.as_ref() == "Asha Sharma" && profile.city.as_ref() == "Mumbai"
            })
            .return_once(|_, _| Ok(()));

        let update = VendorSettingsUpdate {
            owner_name: Some(PersonName::new("Asha Sharma").expect("name")),
            profile: VendorProfileChanges {
                city: Some(text("Mumbai")),
                ..VendorProfileChanges::default()
            },
        };
        let result = VendorSettingsService::update(
            &service(MockSettingsRepository::new(), users, vendors),
            &owner_id,
            update,
        )
        .await
        .expect("updated");

        assert_eq!(result.owner.name.as_ref(), "Asha Sharma");
        assert_eq!(result.profile.city.as_ref(), "Mumbai");
    }

    #[rstest]
    #[tokio::test]
    async fn vendor_update_failure_propagates() {
        let owner = owner();
        let owner_id = owner.id;
        let text = |raw: &str| BoundedText::new(raw, limits::LINE).expect("text");
        let profile = NewVendorProfile {
            business_name: text("Lens & Light"),
            category: text("Photography"),
            city: text("Pune"),
        }
        .into_profile(owner_id, Utc::now());
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(owner)));
        let mut vendors = MockVendorProfileRepository::new();
        vendors
            .expect_find_by_user_id()
            .return_once(move |_| Ok(Some(profile)));
        vendors
            .expect_update_with_owner()
            .return_once(|_, _| Err(RepositoryError::connection("pool closed")));

        let error = VendorSettingsService::update(
            &service(MockSettingsRepository::new(), users, vendors),
            &owner_id,
            VendorSettingsUpdate::default(),
        )
        .await
        .expect_err("write fails");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn non_vendor_has_no_vendor_settings() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(|_| Ok(Some(owner())));
        let mut vendors = MockVendorProfileRepository::new();
        vendors.expect_find_by_user_id().return_once(|_| Ok(None));

        let error = VendorSettingsService::fetch(
            &service(MockSettingsRepository::new(), users, vendors),
            &UserId::random(),
        )
        .await
        .expect_err("no profile");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
