//! Vendor business profiles and their KYC details.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{BoundedText, PersonName, UserId, VendorId};

/// Validation errors for vendor KYC identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KycValidationError {
    /// PAN did not match `AAAAA9999A`.
    #[error("PAN must be 5 letters, 4 digits and a letter")]
    InvalidPan,
    /// GSTIN was not a 15 character registration number.
    #[error("GST number must be a 15 character GSTIN")]
    InvalidGst,
    /// KYC status was not a supported value.
    #[error("kyc status must be pending, submitted, verified or rejected")]
    InvalidStatus,
}

static PAN_RE: OnceLock<Regex> = OnceLock::new();
static GST_RE: OnceLock<Regex> = OnceLock::new();

fn pan_regex() -> &'static Regex {
    PAN_RE.get_or_init(|| {
        Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$")
            .unwrap_or_else(|error| panic!("PAN regex failed to compile: {error}"))
    })
}

fn gst_regex() -> &'static Regex {
    GST_RE.get_or_init(|| {
        Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$")
            .unwrap_or_else(|error| panic!("GST regex failed to compile: {error}"))
    })
}

/// Permanent account number, upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanNumber(String);

impl PanNumber {
    /// Validate a PAN; input is trimmed and upper-cased first.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, KycValidationError> {
        let value = raw.as_ref().trim().to_ascii_uppercase();
        if pan_regex().is_match(&value) {
            Ok(Self(value))
        } else {
            Err(KycValidationError::InvalidPan)
        }
    }
}

impl AsRef<str> for PanNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// GST identification number, upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GstNumber(String);

impl GstNumber {
    /// Validate a GSTIN; input is trimmed and upper-cased first.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, KycValidationError> {
        let value = raw.as_ref().trim().to_ascii_uppercase();
        if gst_regex().is_match(&value) {
            Ok(Self(value))
        } else {
            Err(KycValidationError::InvalidGst)
        }
    }
}

impl AsRef<str> for GstNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Progress of a vendor's KYC review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KycStatus {
    /// No documents supplied yet.
    #[default]
    Pending,
    /// Documents supplied, awaiting review.
    Submitted,
    /// Review passed.
    Verified,
    /// Review failed.
    Rejected,
}

impl KycStatus {
    /// Stable persisted representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Submitted => "submitted",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for KycStatus {
    type Err = KycValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "submitted" => Ok(Self::Submitted),
            "verified" => Ok(Self::Verified),
            "rejected" => Ok(Self::Rejected),
            _ => Err(KycValidationError::InvalidStatus),
        }
    }
}

impl fmt::Display for KycStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Business profile owned by a vendor account.
///
/// ## Invariants
/// - A user owns at most one profile (`user_id` is unique).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorProfile {
    /// Profile identifier referenced by bookings and catalogue entries.
    pub id: VendorId,
    /// Owning user.
    pub user_id: UserId,
    /// Trading name.
    pub business_name: BoundedText,
    /// Service category, e.g. "Photography".
    pub category: BoundedText,
    /// City of operation.
    pub city: BoundedText,
    /// Optional long description.
    pub description: Option<BoundedText>,
    /// Optional PAN.
    pub pan_number: Option<PanNumber>,
    /// Optional GSTIN.
    pub gst_number: Option<GstNumber>,
    /// KYC review status.
    pub kyc_status: KycStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Business details supplied when registering as a vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVendorProfile {
    /// Trading name.
    pub business_name: BoundedText,
    /// Service category.
    pub category: BoundedText,
    /// City of operation.
    pub city: BoundedText,
}

impl NewVendorProfile {
    /// Build the stored profile for `user_id`.
    #[must_use]
    pub fn into_profile(self, user_id: UserId, now: DateTime<Utc>) -> VendorProfile {
        VendorProfile {
            id: VendorId::random(),
            user_id,
            business_name: self.business_name,
            category: self.category,
            city: self.city,
            description: None,
            pan_number: None,
            gst_number: None,
            kyc_status: KycStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a vendor profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorProfileChanges {
    /// New trading name.
    pub business_name: Option<BoundedText>,
    /// New category.
    pub category: Option<BoundedText>,
    /// New city.
    pub city: Option<BoundedText>,
    /// New description.
    pub description: Option<BoundedText>,
    /// New PAN.
    pub pan_number: Option<PanNumber>,
    /// New GSTIN.
    pub gst_number: Option<GstNumber>,
}

impl VendorProfileChanges {
    /// Apply the changes in place.
    ///
    /// Supplying a PAN while KYC is still pending moves the profile to
    /// [`KycStatus::Submitted`].
    pub fn apply_to(&self, profile: &mut VendorProfile, now: DateTime<Utc>) {
        if let Some(value) = &self.business_name {
            profile.business_name = value.clone();
        }
        if let Some(value) = &self.category {
            profile.category = value.clone();
        }
        if let Some(value) = &self.city {
            profile.city = value.clone();
        }
        if let Some(value) = &self.description {
            profile.description = Some(value.clone());
        }
        if let Some(value) = &self.gst_number {
            profile.gst_number = Some(value.clone());
        }
        if let Some(value) = &self.pan_number {
            profile.pan_number = Some(value.clone());
            if profile.kyc_status == KycStatus::Pending {
                profile.kyc_status = KycStatus::Submitted;
            }
        }
        profile.updated_at = now;
    }
}

/// Vendor settings update: owner display name plus profile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorSettingsUpdate {
    /// New owner display name.
    pub owner_name: Option<PersonName>,
    /// Profile field changes.
    pub profile: VendorProfileChanges,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::text::limits;
    use rstest::rstest;

    fn text(raw: &str) -> BoundedText {
        BoundedText::new(raw, limits::LINE).expect("valid text")
    }

    fn profile() -> VendorProfile {
        NewVendorProfile {
            business_name: text("Lens & Light"),
            category: text("Photography"),
            city: text("Pune"),
        }
        .into_profile(UserId::random(), Utc::now())
    }

    #[rstest]
    #[case("abcde1234f", true)]
    #[case("ABCDE1234", false)]
    #[case("ABCD11234F", false)]
    fn pan_format(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(PanNumber::new(raw).is_ok(), ok);
    }

    #[rstest]
    #[case("27ABCDE1234F1Z5", true)]
    #[case("27ABCDE1234F1X5", false)]
    #[case("27ABCDE1234F1Z", false)]
    fn gst_format(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(GstNumber::new(raw).is_ok(), ok);
    }

    #[rstest]
    fn supplying_pan_submits_pending_kyc() {
        let mut profile = profile();
        let changes = VendorProfileChanges {
            pan_number: Some(PanNumber::new("ABCDE1234F").expect("pan")),
            ..VendorProfileChanges::default()
        };
        changes.apply_to(&mut profile, Utc::now());
        assert_eq!(profile.kyc_status, KycStatus::Submitted);
    }

    #[rstest]
    fn verified_kyc_is_not_downgraded() {
        let mut profile = profile();
        profile.kyc_status = KycStatus::Verified;
        let changes = VendorProfileChanges {
            pan_number: Some(PanNumber::new("ABCDE1234F").expect("pan")),
            city: Some(text("Mumbai")),
            ..VendorProfileChanges::default()
        };
        changes.apply_to(&mut profile, Utc::now());
        assert_eq!(profile.kyc_status, KycStatus::Verified);
        assert_eq!(profile.city.as_ref(), "Mumbai");
    }
}
