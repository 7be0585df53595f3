//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When the
//! migrations change, regenerate with `diesel print-schema` or update by hand.

diesel::table! {
    /// Registered accounts. `email` and `phone` are each unique when present.
    users (id) {
        id -> Uuid,
        email -> Nullable<Varchar>,
        phone -> Nullable<Varchar>,
        password_hash -> Nullable<Text>,
        name -> Varchar,
        gender -> Nullable<Varchar>,
        /// `user` or `vendor`.
        role -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Vendor business profiles; at most one per user.
    vendor_profiles (id) {
        id -> Uuid,
        user_id -> Uuid,
        business_name -> Varchar,
        category -> Varchar,
        city -> Varchar,
        description -> Nullable<Text>,
        pan_number -> Nullable<Varchar>,
        gst_number -> Nullable<Varchar>,
        kyc_status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Outstanding one-time codes keyed by normalised phone.
    otp_codes (phone) {
        phone -> Varchar,
        code -> Varchar,
        expires_at -> Timestamptz,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Bookings between customers and vendors.
    bookings (id) {
        id -> Uuid,
        user_id -> Uuid,
        vendor_id -> Uuid,
        event_type -> Varchar,
        event_date -> Date,
        location -> Varchar,
        guest_count -> Nullable<Int4>,
        price -> Nullable<Int8>,
        notes -> Nullable<Text>,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    portfolio_items (id) {
        id -> Uuid,
        vendor_id -> Uuid,
        title -> Varchar,
        media_url -> Text,
        media_type -> Varchar,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    quote_templates (id) {
        id -> Uuid,
        vendor_id -> Uuid,
        title -> Varchar,
        description -> Nullable<Text>,
        price -> Int8,
        inclusions -> Array<Text>,
        valid_days -> Nullable<Int4>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    notifications (id) {
        id -> Uuid,
        user_id -> Uuid,
        title -> Varchar,
        message -> Text,
        is_read -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user preferences, created lazily with defaults.
    user_settings (user_id) {
        user_id -> Uuid,
        email_notifications -> Bool,
        sms_notifications -> Bool,
        booking_reminders -> Bool,
        marketing_emails -> Bool,
        language -> Varchar,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(vendor_profiles -> users (user_id));
diesel::joinable!(bookings -> users (user_id));
diesel::joinable!(bookings -> vendor_profiles (vendor_id));
diesel::joinable!(portfolio_items -> vendor_profiles (vendor_id));
diesel::joinable!(quote_templates -> vendor_profiles (vendor_id));
diesel::joinable!(notifications -> users (user_id));
diesel::joinable!(user_settings -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    vendor_profiles,
    otp_codes,
    bookings,
    portfolio_items,
    quote_templates,
    notifications,
    user_settings,
);
