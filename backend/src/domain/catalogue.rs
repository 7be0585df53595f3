//! Vendor catalogue: quote templates and portfolio media.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{BoundedText, PortfolioItemId, Price, QuoteTemplateId, VendorId};

/// Kind of media shown in a portfolio entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Still image.
    #[default]
    Image,
    /// Video clip.
    Video,
}

/// Error raised for unknown media types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("media type must be image or video")]
pub struct InvalidMediaType;

impl MediaType {
    /// Stable persisted representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl FromStr for MediaType {
    type Err = InvalidMediaType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            _ => Err(InvalidMediaType),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when a media URL is not an absolute http(s) URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("media url must be an absolute http or https URL")]
pub struct InvalidMediaUrl;

/// Absolute http(s) URL pointing at hosted media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaUrl(String);

impl MediaUrl {
    /// Parse and validate a media URL.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, InvalidMediaUrl> {
        let url = Url::parse(raw.as_ref().trim()).map_err(|_| InvalidMediaUrl)?;
        match url.scheme() {
            "http" | "https" if url.host().is_some() => Ok(Self(url.into())),
            _ => Err(InvalidMediaUrl),
        }
    }
}

impl AsRef<str> for MediaUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Portfolio entry owned by a vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioItem {
    /// Identifier.
    pub id: PortfolioItemId,
    /// Owning vendor.
    pub vendor_id: VendorId,
    /// Caption.
    pub title: BoundedText,
    /// Hosted media location.
    pub media_url: MediaUrl,
    /// Image or video.
    pub media_type: MediaType,
    /// Optional description.
    pub description: Option<BoundedText>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when adding a portfolio entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPortfolioItem {
    /// Caption.
    pub title: BoundedText,
    /// Hosted media location.
    pub media_url: MediaUrl,
    /// Image or video.
    pub media_type: MediaType,
    /// Optional description.
    pub description: Option<BoundedText>,
}

impl NewPortfolioItem {
    /// Build the stored entry for `vendor_id`.
    #[must_use]
    pub fn into_item(self, vendor_id: VendorId, now: DateTime<Utc>) -> PortfolioItem {
        PortfolioItem {
            id: PortfolioItemId::random(),
            vendor_id,
            title: self.title,
            media_url: self.media_url,
            media_type: self.media_type,
            description: self.description,
            created_at: now,
        }
    }
}

/// Reusable quote offered by a vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteTemplate {
    /// Identifier.
    pub id: QuoteTemplateId,
    /// Owning vendor.
    pub vendor_id: VendorId,
    /// Package name.
    pub title: BoundedText,
    /// Optional description.
    pub description: Option<BoundedText>,
    /// Package price.
    pub price: Price,
    /// Items included in the package.
    pub inclusions: Vec<BoundedText>,
    /// How long the quote stays valid, in days.
    pub valid_days: Option<u16>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating a quote template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuoteTemplate {
    /// Package name.
    pub title: BoundedText,
    /// Optional description.
    pub description: Option<BoundedText>,
    /// Package price.
    pub price: Price,
    /// Items included in the package.
    pub inclusions: Vec<BoundedText>,
    /// Validity in days.
    pub valid_days: Option<u16>,
}

impl NewQuoteTemplate {
    /// Build the stored template for `vendor_id`.
    #[must_use]
    pub fn into_template(self, vendor_id: VendorId, now: DateTime<Utc>) -> QuoteTemplate {
        QuoteTemplate {
            id: QuoteTemplateId::random(),
            vendor_id,
            title: self.title,
            description: self.description,
            price: self.price,
            inclusions: self.inclusions,
            valid_days: self.valid_days,
            created_at: now,
        }
    }
}
