//! PostgreSQL-backed `BookingRepository`.
//!
//! Customer listings join the vendor profile; vendor listings join the
//! customer account.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BookingRepository, RepositoryError};
use crate::domain::{
    Booking, BookingId, BookingStatus, BoundedText, CustomerBooking, CustomerSummary,
    EmailAddress, Lead, PersonName, PhoneNumber, UserId, VendorId,
};

use super::diesel_error_mapping::{invalid_row, map_diesel_error, map_pool_error};
use super::models::{BookingRow, BookingUpdate, CustomerRow, VendorSummaryRow};
use super::pool::DbPool;
use super::schema::{bookings, users, vendor_profiles};

/// Diesel-backed booking store.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn customer_booking(
    (booking, vendor): (BookingRow, VendorSummaryRow),
) -> Result<CustomerBooking, RepositoryError> {
    Ok(CustomerBooking {
        booking: Booking::try_from(booking)?,
        vendor_name: BoundedText::from_stored(vendor.business_name),
        vendor_category: BoundedText::from_stored(vendor.category),
    })
}

fn lead((booking, customer): (BookingRow, CustomerRow)) -> Result<Lead, RepositoryError> {
    let summary = CustomerSummary {
        name: PersonName::new(&customer.name).map_err(|err| invalid_row("users.name", err))?,
        phone: customer
            .phone
            .as_deref()
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|err| invalid_row("users.phone", err))?,
        email: customer
            .email
            .as_deref()
            .map(EmailAddress::new)
            .transpose()
            .map_err(|err| invalid_row("users.email", err))?,
    };
    Ok(Lead {
        booking: Booking::try_from(booking)?,
        customer: summary,
    })
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn insert(&self, booking: &Booking) -> Result<(), RepositoryError> {
        let row = BookingRow::try_from(booking)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(bookings::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<BookingRow> = bookings::table
            .find(*id.as_uuid())
            .select(BookingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Booking::try_from).transpose()
    }

    async fn update(&self, booking: &Booking) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(bookings::table.find(*booking.id.as_uuid()))
            .set(BookingUpdate::from(booking))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(RepositoryError::query("booking not found"));
        }
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CustomerBooking>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(BookingRow, VendorSummaryRow)> = bookings::table
            .inner_join(vendor_profiles::table)
            .filter(bookings::user_id.eq(user_id.as_uuid()))
            .order_by(bookings::created_at.desc())
            .select((BookingRow::as_select(), VendorSummaryRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(customer_booking).collect()
    }

    async fn list_for_vendor(
        &self,
        vendor_id: &VendorId,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Lead>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = bookings::table
            .inner_join(users::table)
            .filter(bookings::vendor_id.eq(*vendor_id.as_uuid()))
            .order_by(bookings::created_at.desc())
            .select((BookingRow::as_select(), CustomerRow::as_select()))
            .into_boxed();
        if let Some(status) = status {
            query = query.filter(bookings::status.eq(status.as_str()));
        }
        let rows: Vec<(BookingRow, CustomerRow)> = query
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(lead).collect()
    }
}
