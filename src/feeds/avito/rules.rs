//! Object-type classification and the conditional-requirement table.
//!
//! The validator and the generator both consult these functions; the rules
//! exist exactly once so the two can never disagree on what a listing must
//! carry.

use serde::Serialize;

use super::domain::{BuildingType, FeedPurpose};

/// Canonical marketplace category derived from a listing's building type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    Office,
    FreePurpose,
    Retail,
    Warehouse,
    Manufacturing,
    Catering,
    Hotel,
    AutoService,
    Coworking,
    Building,
}

impl ObjectType {
    /// Derives the object type from the raw building-type attribute.
    ///
    /// The match is a substring test over the lower-cased token so that new
    /// building-type variants land in a sensible bucket without touching
    /// this function. Unmatched values fall back to free-purpose space.
    pub fn classify(building_type: Option<BuildingType>) -> Self {
        let token = building_type.map(BuildingType::token).unwrap_or("");
        if token.contains("office") {
            Self::Office
        } else if token.contains("retail") || token.contains("shop") || token.contains("shopping") {
            Self::Retail
        } else {
            Self::FreePurpose
        }
    }

    /// Marketplace label emitted into the `CommercialType` element.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Office => "Офисное помещение",
            Self::FreePurpose => "Помещение свободного назначения",
            Self::Retail => "Торговое помещение",
            Self::Warehouse => "Складское помещение",
            Self::Manufacturing => "Производственное помещение",
            Self::Catering => "Помещение общественного питания",
            Self::Hotel => "Гостиница",
            Self::AutoService => "Автосервис",
            Self::Coworking => "Коворкинг",
            Self::Building => "Здание",
        }
    }
}

pub const fn requires_floor(object_type: ObjectType) -> bool {
    !matches!(object_type, ObjectType::Building)
}

pub const fn requires_entrance(object_type: ObjectType) -> bool {
    matches!(
        object_type,
        ObjectType::Retail | ObjectType::FreePurpose | ObjectType::Catering
    )
}

pub const fn requires_layout(object_type: ObjectType, purpose: FeedPurpose) -> bool {
    match object_type {
        ObjectType::Office => true,
        ObjectType::Coworking => matches!(purpose, FeedPurpose::Rent),
        _ => false,
    }
}

pub const fn requires_decoration(object_type: ObjectType) -> bool {
    matches!(
        object_type,
        ObjectType::Office
            | ObjectType::FreePurpose
            | ObjectType::Retail
            | ObjectType::Catering
            | ObjectType::Hotel
            | ObjectType::Building
    )
}

pub const fn requires_parking_type(object_type: ObjectType) -> bool {
    matches!(
        object_type,
        ObjectType::Office
            | ObjectType::FreePurpose
            | ObjectType::Retail
            | ObjectType::Catering
            | ObjectType::Hotel
            | ObjectType::Building
            | ObjectType::Coworking
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_buckets_office_tokens() {
        assert_eq!(
            ObjectType::classify(Some(BuildingType::OfficeCenter)),
            ObjectType::Office
        );
    }

    #[test]
    fn classify_buckets_retail_tokens() {
        assert_eq!(
            ObjectType::classify(Some(BuildingType::ShoppingCenter)),
            ObjectType::Retail
        );
        assert_eq!(
            ObjectType::classify(Some(BuildingType::StreetRetail)),
            ObjectType::Retail
        );
    }

    #[test]
    fn classify_falls_back_to_free_purpose() {
        assert_eq!(
            ObjectType::classify(Some(BuildingType::BusinessCenter)),
            ObjectType::FreePurpose
        );
        assert_eq!(ObjectType::classify(None), ObjectType::FreePurpose);
    }

    #[test]
    fn floor_required_everywhere_except_whole_buildings() {
        assert!(requires_floor(ObjectType::Office));
        assert!(requires_floor(ObjectType::Coworking));
        assert!(!requires_floor(ObjectType::Building));
    }

    #[test]
    fn layout_requirement_depends_on_purpose_for_coworking() {
        assert!(requires_layout(ObjectType::Office, FeedPurpose::Sale));
        assert!(requires_layout(ObjectType::Office, FeedPurpose::Rent));
        assert!(requires_layout(ObjectType::Coworking, FeedPurpose::Rent));
        assert!(!requires_layout(ObjectType::Coworking, FeedPurpose::Sale));
        assert!(!requires_layout(ObjectType::Retail, FeedPurpose::Rent));
    }

    #[test]
    fn parking_covers_decoration_set_plus_coworking() {
        for object_type in [
            ObjectType::Office,
            ObjectType::FreePurpose,
            ObjectType::Retail,
            ObjectType::Catering,
            ObjectType::Hotel,
            ObjectType::Building,
        ] {
            assert!(requires_decoration(object_type));
            assert!(requires_parking_type(object_type));
        }
        assert!(requires_parking_type(ObjectType::Coworking));
        assert!(!requires_decoration(ObjectType::Coworking));
        assert!(!requires_parking_type(ObjectType::Warehouse));
    }
}
