//! Process-local storage used when no database is configured.
//!
//! Every repository port is implemented over one mutex-guarded set of
//! tables so cross-aggregate rules (unique contacts, cascading deletes,
//! booking joins) behave the same way the PostgreSQL schema enforces them.
//! Data is lost when the process exits.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    AccountRecord, BookingRepository, NotificationRepository, OtpRepository, PortfolioRepository,
    QuoteTemplateRepository, RepositoryError, SettingsRepository, UserRepository,
    VendorProfileRepository,
};
use crate::domain::{
    Booking, BookingId, BookingStatus, CustomerBooking, CustomerSummary, EmailAddress, Lead,
    Notification, NotificationId, OtpCode, OtpRecord, PasswordHash, PhoneNumber, PortfolioItem,
    PortfolioItemId, QuoteTemplate, QuoteTemplateId, User, UserId, UserSettings, VendorId,
    VendorProfile,
};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    vendors: HashMap<VendorId, VendorProfile>,
    otps: HashMap<String, OtpRecord>,
    bookings: HashMap<BookingId, Booking>,
    quotes: HashMap<QuoteTemplateId, QuoteTemplate>,
    portfolio: HashMap<PortfolioItemId, PortfolioItem>,
    settings: HashMap<UserId, UserSettings>,
    notifications: HashMap<NotificationId, Notification>,
}

impl Tables {
    /// Reject `user` when another account already holds its email or phone.
    fn ensure_unique_contacts(&self, user: &User) -> Result<(), RepositoryError> {
        for other in self.users.values().filter(|other| other.id != user.id) {
            if user.email.is_some() && other.email == user.email {
                return Err(RepositoryError::duplicate("email"));
            }
            if user.phone.is_some() && other.phone == user.phone {
                return Err(RepositoryError::duplicate("phone"));
            }
        }
        Ok(())
    }

    fn vendor_owned_by(&self, user_id: &UserId) -> Option<&VendorProfile> {
        self.vendors.values().find(|v| v.user_id == *user_id)
    }

    fn remove_vendor(&mut self, vendor_id: &VendorId) {
        self.vendors.remove(vendor_id);
        self.quotes.retain(|_, q| q.vendor_id != *vendor_id);
        self.portfolio.retain(|_, p| p.vendor_id != *vendor_id);
        self.bookings.retain(|_, b| b.vendor_id != *vendor_id);
    }

    fn customer_booking(&self, booking: &Booking) -> Option<CustomerBooking> {
        let vendor = self.vendors.get(&booking.vendor_id)?;
        Some(CustomerBooking {
            booking: booking.clone(),
            vendor_name: vendor.business_name.clone(),
            vendor_category: vendor.category.clone(),
        })
    }

    fn lead(&self, booking: &Booking) -> Option<Lead> {
        let customer = self.users.get(&booking.user_id)?;
        Some(Lead {
            booking: booking.clone(),
            customer: CustomerSummary {
                name: customer.name.clone(),
                phone: customer.phone.clone(),
                email: customer.email.clone(),
            },
        })
    }
}

/// In-memory implementation of every repository port.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::connection("in-memory store lock poisoned"))
    }
}

fn newest_first<T>(mut rows: Vec<T>, created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    rows.sort_by_key(|row| std::cmp::Reverse(created_at(row)));
    rows
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.tables()?.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .tables()?
            .users
            .values()
            .find(|u| u.email.as_ref() == Some(email))
            .cloned())
    }

    async fn find_by_phone(&self, phone: &PhoneNumber) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .tables()?
            .users
            .values()
            .find(|u| u.phone.as_ref() == Some(phone))
            .cloned())
    }

    async fn create_account(&self, account: &AccountRecord) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        if tables.users.contains_key(&account.user.id) {
            return Err(RepositoryError::duplicate("id"));
        }
        tables.ensure_unique_contacts(&account.user)?;
        if let Some(profile) = &account.vendor_profile
            && tables.vendor_owned_by(&profile.user_id).is_some()
        {
            return Err(RepositoryError::duplicate("user_id"));
        }
        tables.users.insert(account.user.id, account.user.clone());
        if let Some(profile) = &account.vendor_profile {
            tables.vendors.insert(profile.id, profile.clone());
        }
        Ok(())
    }

    async fn update_profile(&self, user: &User) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        tables.ensure_unique_contacts(user)?;
        match tables.users.get_mut(&user.id) {
            Some(stored) => {
                stored.name = user.name.clone();
                stored.gender = user.gender;
                stored.email = user.email.clone();
                stored.phone = user.phone.clone();
                stored.updated_at = user.updated_at;
                Ok(())
            }
            None => Err(RepositoryError::query("user not found")),
        }
    }

    async fn update_password_hash(
        &self,
        id: &UserId,
        hash: &PasswordHash,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        match tables.users.get_mut(id) {
            Some(stored) => {
                stored.password_hash = Some(hash.clone());
                stored.updated_at = updated_at;
                Ok(())
            }
            None => Err(RepositoryError::query("user not found")),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<bool, RepositoryError> {
        let mut tables = self.tables()?;
        if tables.users.remove(id).is_none() {
            return Ok(false);
        }
        if let Some(vendor_id) = tables.vendor_owned_by(id).map(|v| v.id) {
            tables.remove_vendor(&vendor_id);
        }
        tables.bookings.retain(|_, b| b.user_id != *id);
        tables.settings.remove(id);
        tables.notifications.retain(|_, n| n.user_id != *id);
        Ok(true)
    }
}

#[async_trait]
impl VendorProfileRepository for InMemoryStore {
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<VendorProfile>, RepositoryError> {
        Ok(self.tables()?.vendor_owned_by(user_id).cloned())
    }

    async fn find_by_id(&self, id: &VendorId) -> Result<Option<VendorProfile>, RepositoryError> {
        Ok(self.tables()?.vendors.get(id).cloned())
    }

    async fn update_with_owner(
        &self,
        owner: &User,
        profile: &VendorProfile,
    ) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        if !tables.users.contains_key(&owner.id) || !tables.vendors.contains_key(&profile.id) {
            return Err(RepositoryError::query("vendor profile not found"));
        }
        if let Some(stored) = tables.users.get_mut(&owner.id) {
            stored.name = owner.name.clone();
            stored.updated_at = owner.updated_at;
        }
        tables.vendors.insert(profile.id, profile.clone());
        Ok(())
    }
}

#[async_trait]
impl OtpRepository for InMemoryStore {
    async fn upsert(&self, record: &OtpRecord) -> Result<(), RepositoryError> {
        self.tables()?
            .otps
            .insert(record.phone.as_ref().to_owned(), record.clone());
        Ok(())
    }

    async fn find(&self, phone: &PhoneNumber) -> Result<Option<OtpRecord>, RepositoryError> {
        Ok(self.tables()?.otps.get(phone.as_ref()).cloned())
    }

    async fn delete_matching(
        &self,
        phone: &PhoneNumber,
        code: &OtpCode,
    ) -> Result<bool, RepositoryError> {
        let mut tables = self.tables()?;
        let holds_code = tables
            .otps
            .get(phone.as_ref())
            .is_some_and(|record| record.code == *code);
        if holds_code {
            tables.otps.remove(phone.as_ref());
        }
        Ok(holds_code)
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn insert(&self, booking: &Booking) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        if !tables.users.contains_key(&booking.user_id) {
            return Err(RepositoryError::query("booking references unknown user"));
        }
        if !tables.vendors.contains_key(&booking.vendor_id) {
            return Err(RepositoryError::query("booking references unknown vendor"));
        }
        tables.bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, RepositoryError> {
        Ok(self.tables()?.bookings.get(id).cloned())
    }

    async fn update(&self, booking: &Booking) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        match tables.bookings.get_mut(&booking.id) {
            Some(stored) => {
                stored.status = booking.status;
                stored.price = booking.price;
                stored.notes = booking.notes.clone();
                stored.updated_at = booking.updated_at;
                Ok(())
            }
            None => Err(RepositoryError::query("booking not found")),
        }
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CustomerBooking>, RepositoryError> {
        let tables = self.tables()?;
        let rows = tables
            .bookings
            .values()
            .filter(|b| b.user_id == *user_id)
            .filter_map(|b| tables.customer_booking(b))
            .collect();
        Ok(newest_first(rows, |row: &CustomerBooking| {
            row.booking.created_at
        }))
    }

    async fn list_for_vendor(
        &self,
        vendor_id: &VendorId,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Lead>, RepositoryError> {
        let tables = self.tables()?;
        let rows = tables
            .bookings
            .values()
            .filter(|b| b.vendor_id == *vendor_id)
            .filter(|b| status.is_none_or(|wanted| b.status == wanted))
            .filter_map(|b| tables.lead(b))
            .collect();
        Ok(newest_first(rows, |row: &Lead| row.booking.created_at))
    }
}

#[async_trait]
impl QuoteTemplateRepository for InMemoryStore {
    async fn list(&self, vendor_id: &VendorId) -> Result<Vec<QuoteTemplate>, RepositoryError> {
        let rows = self
            .tables()?
            .quotes
            .values()
            .filter(|q| q.vendor_id == *vendor_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |row: &QuoteTemplate| row.created_at))
    }

    async fn insert(&self, template: &QuoteTemplate) -> Result<(), RepositoryError> {
        self.tables()?.quotes.insert(template.id, template.clone());
        Ok(())
    }

    async fn delete(
        &self,
        vendor_id: &VendorId,
        id: &QuoteTemplateId,
    ) -> Result<bool, RepositoryError> {
        let mut tables = self.tables()?;
        let owned = tables
            .quotes
            .get(id)
            .is_some_and(|q| q.vendor_id == *vendor_id);
        Ok(owned && tables.quotes.remove(id).is_some())
    }

    async fn count(&self, vendor_id: &VendorId) -> Result<usize, RepositoryError> {
        Ok(self
            .tables()?
            .quotes
            .values()
            .filter(|q| q.vendor_id == *vendor_id)
            .count())
    }
}

#[async_trait]
impl PortfolioRepository for InMemoryStore {
    async fn list(&self, vendor_id: &VendorId) -> Result<Vec<PortfolioItem>, RepositoryError> {
        let rows = self
            .tables()?
            .portfolio
            .values()
            .filter(|p| p.vendor_id == *vendor_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |row: &PortfolioItem| row.created_at))
    }

    async fn insert(&self, item: &PortfolioItem) -> Result<(), RepositoryError> {
        self.tables()?.portfolio.insert(item.id, item.clone());
        Ok(())
    }

    async fn delete(
        &self,
        vendor_id: &VendorId,
        id: &PortfolioItemId,
    ) -> Result<bool, RepositoryError> {
        let mut tables = self.tables()?;
        let owned = tables
            .portfolio
            .get(id)
            .is_some_and(|p| p.vendor_id == *vendor_id);
        Ok(owned && tables.portfolio.remove(id).is_some())
    }

    async fn count(&self, vendor_id: &VendorId) -> Result<usize, RepositoryError> {
        Ok(self
            .tables()?
            .portfolio
            .values()
            .filter(|p| p.vendor_id == *vendor_id)
            .count())
    }
}

#[async_trait]
impl SettingsRepository for InMemoryStore {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserSettings>, RepositoryError> {
        Ok(self.tables()?.settings.get(user_id).cloned())
    }

    async fn save(&self, settings: &UserSettings) -> Result<(), RepositoryError> {
        self.tables()?
            .settings
            .insert(settings.user_id, settings.clone());
        Ok(())
    }
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn insert(&self, notification: &Notification) -> Result<(), RepositoryError> {
        self.tables()?
            .notifications
            .insert(notification.id, notification.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let rows = self
            .tables()?
            .notifications
            .values()
            .filter(|n| n.user_id == *user_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |row: &Notification| row.created_at))
    }

    async fn mark_read(
        &self,
        user_id: &UserId,
        id: &NotificationId,
    ) -> Result<Option<Notification>, RepositoryError> {
        let mut tables = self.tables()?;
        Ok(tables
            .notifications
            .get_mut(id)
            .filter(|n| n.user_id == *user_id)
            .map(|n| {
                n.is_read = true;
                n.clone()
            }))
    }

    async fn count_unread(&self, user_id: &UserId) -> Result<usize, RepositoryError> {
        Ok(self
            .tables()?
            .notifications
            .values()
            .filter(|n| n.user_id == *user_id && !n.is_read)
            .count())
    }
}
