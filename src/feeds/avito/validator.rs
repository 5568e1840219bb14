//! Business-rule validation for listing batches ahead of feed generation.

use serde::Serialize;

use super::domain::{FeedPurpose, Listing};
use super::mapping;
use super::rules::{self, ObjectType};

/// Aggregated outcome of one validation pass. Every listing in the batch is
/// checked; the error list is complete, not first-failure.
#[derive(Debug, Clone, Serialize)]
pub struct BusinessValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl BusinessValidation {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Checks a listing batch against the requirement table for the given
/// purpose. The input is never mutated and the check never short-circuits.
pub fn validate(listings: &[Listing], purpose: FeedPurpose) -> BusinessValidation {
    let mut errors = Vec::new();

    if listings.is_empty() {
        errors.push("listing batch is empty".to_string());
    }

    for listing in listings {
        check_listing(listing, purpose, &mut errors);
    }

    BusinessValidation::from_errors(errors)
}

fn check_listing(listing: &Listing, purpose: FeedPurpose, errors: &mut Vec<String>) {
    let id = listing.id;
    // One classification per listing per pass; requirement checks and the
    // generator must see the same object type.
    let object_type = ObjectType::classify(listing.building_type);

    if is_blank(&listing.title) {
        errors.push(format!("{id}: Title is blank"));
    }
    if is_blank(&listing.description) {
        errors.push(format!("{id}: Description is blank"));
    }
    if is_blank(&listing.location) {
        errors.push(format!("{id}: Address is blank"));
    }
    if listing.area.is_none() {
        errors.push(format!("{id}: Square (area) is missing"));
    }

    match purpose {
        FeedPurpose::Sale => {
            if listing.price.is_none() {
                errors.push(format!("{id}: Price is missing for a sale feed"));
            }
        }
        FeedPurpose::Rent => {
            if listing.monthly_rent.is_none() {
                errors.push(format!("{id}: Price (monthly rent) is missing for a rent feed"));
            }
        }
    }

    // The shared mappers are total, so these three cannot fire; they guard
    // the derivability contract the generator relies on.
    if object_type.label().is_empty() {
        errors.push(format!("{id}: could not derive CommercialType"));
    }
    if mapping::property_rights(listing.ownership).is_empty() {
        errors.push(format!("{id}: could not derive PropertyRights"));
    }
    if mapping::building_type(listing.building_type).is_empty() {
        errors.push(format!("{id}: could not derive BuildingType"));
    }

    if rules::requires_floor(object_type) && listing.floor.is_none() {
        errors.push(format!(
            "{id}: Floor is required for {}",
            object_type.label()
        ));
    }
    if rules::requires_entrance(object_type) && listing.entrance.is_none() {
        errors.push(format!(
            "{id}: Entrance is required for {}",
            object_type.label()
        ));
    }
    // Layout is satisfied by the fixed open-plan payload whenever the
    // requirement table asks for it, so there is nothing to check on the
    // listing itself.
    if rules::requires_decoration(object_type) && listing.finishing.is_none() {
        errors.push(format!(
            "{id}: Decoration is required for {}",
            object_type.label()
        ));
    }
    if rules::requires_parking_type(object_type) && listing.parking.is_none() {
        errors.push(format!(
            "{id}: ParkingType is required for {}",
            object_type.label()
        ));
    }

    match purpose {
        FeedPurpose::Sale => {
            if mapping::transaction_type(listing.deal_type).is_empty() {
                errors.push(format!("{id}: TransactionType is required for a sale feed"));
            }
        }
        FeedPurpose::Rent => {
            if mapping::rental_type(listing.ownership).is_empty() {
                errors.push(format!("{id}: RentalType is required for a rent feed"));
            }
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
