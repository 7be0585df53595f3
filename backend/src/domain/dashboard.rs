//! Dashboard summaries computed from fetched bookings.
//!
//! Both reductions are pure: callers fetch rows through the repositories and
//! pass in today's date so the results are deterministic under test.

use chrono::NaiveDate;

use super::{BookingStatus, CustomerBooking, Lead};

/// Number of bookings shown in "recent" and "upcoming" lists.
pub const DASHBOARD_LIST_LEN: usize = 5;

/// Customer dashboard totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDashboard {
    /// All bookings.
    pub total_bookings: usize,
    /// Open bookings whose event date is today or later.
    pub upcoming_bookings: usize,
    /// Completed bookings.
    pub completed_bookings: usize,
    /// Cancelled bookings.
    pub cancelled_bookings: usize,
    /// Sum of prices over confirmed and completed bookings.
    pub total_spent: u64,
    /// Most recently created bookings.
    pub recent_bookings: Vec<CustomerBooking>,
    /// Unread notifications.
    pub unread_notifications: usize,
}

/// Count of leads in one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCount {
    /// Status.
    pub status: BookingStatus,
    /// Number of leads.
    pub count: usize,
}

/// Vendor dashboard totals.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorDashboard {
    /// All leads.
    pub total_leads: usize,
    /// Leads per status, in pipeline order.
    pub status_counts: Vec<StatusCount>,
    /// Leads still pending.
    pub new_leads: usize,
    /// Sum of prices over confirmed and completed leads.
    pub revenue: u64,
    /// Won leads over all leads, as a percentage with one decimal.
    pub conversion_rate: f64,
    /// Nearest confirmed events from today on.
    pub upcoming_events: Vec<Lead>,
    /// Most recently created leads.
    pub recent_leads: Vec<Lead>,
    /// Portfolio entries.
    pub portfolio_items: usize,
    /// Quote templates.
    pub quote_templates: usize,
}

/// Inputs for [`summarise_vendor`] besides the leads themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorCatalogueCounts {
    /// Portfolio entries.
    pub portfolio_items: usize,
    /// Quote templates.
    pub quote_templates: usize,
}

fn won_revenue<'a>(bookings: impl Iterator<Item = &'a super::Booking>) -> u64 {
    bookings
        .filter(|b| b.status.is_won())
        .filter_map(|b| b.price)
        .map(super::Price::amount)
        .fold(0_u64, u64::saturating_add)
}

/// Summarise a customer's bookings.
#[must_use]
pub fn summarise_user(
    bookings: &[CustomerBooking],
    unread_notifications: usize,
    today: NaiveDate,
) -> UserDashboard {
    let count = |status: BookingStatus| {
        bookings
            .iter()
            .filter(|b| b.booking.status == status)
            .count()
    };
    let upcoming_bookings = bookings
        .iter()
        .filter(|b| !b.booking.status.is_terminal() && b.booking.event_date >= today)
        .count();

    let mut recent_bookings = bookings.to_vec();
    recent_bookings.sort_by(|a, b| b.booking.created_at.cmp(&a.booking.created_at));
    recent_bookings.truncate(DASHBOARD_LIST_LEN);

    UserDashboard {
        total_bookings: bookings.len(),
        upcoming_bookings,
        completed_bookings: count(BookingStatus::Completed),
        cancelled_bookings: count(BookingStatus::Cancelled),
        total_spent: won_revenue(bookings.iter().map(|b| &b.booking)),
        recent_bookings,
        unread_notifications,
    }
}

/// Percentage of won leads, rounded to one decimal place.
#[must_use]
pub fn conversion_rate(won: usize, total: usize) -> f64 {
    let (Ok(won), Ok(total)) = (u32::try_from(won), u32::try_from(total)) else {
        return 0.0;
    };
    if total == 0 {
        return 0.0;
    }
    let ratio = f64::from(won) / f64::from(total);
    (ratio * 1000.0).round() / 10.0
}

/// Summarise a vendor's leads.
#[must_use]
pub fn summarise_vendor(
    leads: &[Lead],
    counts: VendorCatalogueCounts,
    today: NaiveDate,
) -> VendorDashboard {
    let status_counts: Vec<StatusCount> = BookingStatus::ALL
        .iter()
        .map(|&status| StatusCount {
            status,
            count: leads.iter().filter(|l| l.booking.status == status).count(),
        })
        .collect();
    let won = leads.iter().filter(|l| l.booking.status.is_won()).count();

    let mut upcoming_events: Vec<Lead> = leads
        .iter()
        .filter(|l| l.booking.status == BookingStatus::Confirmed && l.booking.event_date >= today)
        .cloned()
        .collect();
    upcoming_events.sort_by_key(|l| l.booking.event_date);
    upcoming_events.truncate(DASHBOARD_LIST_LEN);

    let mut recent_leads = leads.to_vec();
    recent_leads.sort_by(|a, b| b.booking.created_at.cmp(&a.booking.created_at));
    recent_leads.truncate(DASHBOARD_LIST_LEN);

    VendorDashboard {
        total_leads: leads.len(),
        new_leads: leads
            .iter()
            .filter(|l| l.booking.status == BookingStatus::Pending)
            .count(),
        status_counts,
        revenue: won_revenue(leads.iter().map(|l| &l.booking)),
        conversion_rate: conversion_rate(won, leads.len()),
        upcoming_events,
        recent_leads,
        portfolio_items: counts.portfolio_items,
        quote_templates: counts.quote_templates,
    }
}
