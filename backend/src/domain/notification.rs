//! In-app notifications raised by booking activity.

use chrono::{DateTime, Utc};

use super::{BookingStatus, BoundedText, NotificationId, UserId, text::limits};

/// Notification shown in a user's inbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Identifier.
    pub id: NotificationId,
    /// Recipient.
    pub user_id: UserId,
    /// Short headline.
    pub title: BoundedText,
    /// Body text.
    pub message: BoundedText,
    /// Whether the recipient has opened it.
    pub is_read: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create an unread notification.
    #[must_use]
    pub fn new(
        user_id: UserId,
        title: BoundedText,
        message: BoundedText,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: NotificationId::random(),
            user_id,
            title,
            message,
            is_read: false,
            created_at: now,
        }
    }

    /// Notice sent to a vendor when a customer requests a booking.
    #[must_use]
    pub fn booking_requested(
        vendor_owner: UserId,
        customer_name: &str,
        event_type: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self::new(
            vendor_owner,
            generated_text("New booking request"),
            generated_text(&format!("{customer_name} requested a booking for {event_type}.")),
            now,
        )
    }

    /// Notice sent to a customer when a vendor changes a booking's status.
    #[must_use]
    pub fn booking_status_changed(
        customer: UserId,
        business_name: &str,
        status: BookingStatus,
        now: DateTime<Utc>,
    ) -> Self {
        Self::new(
            customer,
            generated_text("Booking updated"),
            generated_text(&format!("{business_name} marked your booking as {status}.")),
            now,
        )
    }
}

/// Build text for generated notifications, truncating overlong input.
fn generated_text(raw: &str) -> BoundedText {
    let truncated: String = raw.chars().take(limits::PARAGRAPH).collect();
    BoundedText::from_stored(truncated)
}

/// A user's notifications, newest first, with the unread count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationFeed {
    /// Notifications, newest first.
    pub items: Vec<Notification>,
    /// Number of unread notifications.
    pub unread: usize,
}

impl NotificationFeed {
    /// Build a feed from unordered notifications.
    #[must_use]
    pub fn from_items(mut items: Vec<Notification>) -> Self {
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let unread = items.iter().filter(|n| !n.is_read).count();
        Self { items, unread }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Duration;
    use rstest::rstest;

    #[rstest]
    fn feed_orders_newest_first_and_counts_unread() {
        let user = UserId::random();
        let now = Utc::now();
        let older = Notification::booking_requested(user, "Asha", "Wedding", now - Duration::hours(2));
        let mut newer = Notification::booking_status_changed(
            user,
            "Lens & Light",
            BookingStatus::Confirmed,
            now,
        );
        newer.is_read = true;

        let feed = NotificationFeed::from_items(vec![older.clone(), newer.clone()]);
        assert_eq!(feed.items, vec![newer, older]);
        assert_eq!(feed.unread, 1);
    }

    #[rstest]
    fn status_message_names_the_status() {
        let note = Notification::booking_status_changed(
            UserId::random(),
            "Lens & Light",
            BookingStatus::Cancelled,
            Utc::now(),
        );
        assert_eq!(
            note.message.as_ref(),
            "Lens & Light marked your booking as cancelled."
        );
    }
}
