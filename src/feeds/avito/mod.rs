//! Schema A feed engine: business validation and XML generation for the
//! Avito marketplace.

mod mapping;
mod validator;
mod writer;

pub mod domain;
pub mod rules;

pub use validator::{validate, BusinessValidation};
pub use writer::{generate, generate_at, FeedWriteError};

use chrono::Local;
use tracing::{debug, info};

use crate::config::FeedConfig;
use domain::{FeedPurpose, GeneratedFeed, Listing};

#[derive(Debug, thiserror::Error)]
pub enum AvitoFeedError {
    /// The batch failed business validation; nothing was generated. The
    /// error list is the complete aggregate across all listings.
    #[error("feed validation failed: {}", .errors.join("; "))]
    Rejected { errors: Vec<String> },
    #[error(transparent)]
    Write(#[from] FeedWriteError),
}

/// Validates the batch and, on success, serializes it into a write-once
/// feed document. Persistence of the returned value is the caller's job.
pub fn build_feed(
    listings: &[Listing],
    purpose: FeedPurpose,
    config: &FeedConfig,
) -> Result<GeneratedFeed, AvitoFeedError> {
    let check = validator::validate(listings, purpose);
    if !check.valid {
        debug!(
            error_count = check.errors.len(),
            "listing batch rejected by business validation"
        );
        return Err(AvitoFeedError::Rejected {
            errors: check.errors,
        });
    }

    let now = Local::now().fixed_offset();
    let xml = writer::generate_at(listings, purpose, &config.public_base_url, now)?;
    info!(listing_count = listings.len(), "generated feed document");

    Ok(GeneratedFeed {
        xml,
        purpose,
        listing_ids: listings.iter().map(|listing| listing.id).collect(),
        created_at: now,
    })
}
