//! Translators from listing attributes to the marketplace vocabulary.
//!
//! Every mapper is total: an absent or unrecognized source value resolves to
//! the documented default token instead of failing. The tokens themselves
//! are the marketplace's wire format and must not be localized.

use super::domain::{DealType, Entrance, FeedPurpose, Finishing, Ownership, Parking};

/// Constant `Category` for every ad in the feed.
pub const CATEGORY: &str = "Коммерческая недвижимость";

/// Single layout option emitted for object types that demand one.
pub const LAYOUT_OPEN: &str = "Открытая";

/// `PriceType` marker accompanying a sale price.
pub const PRICE_TYPE_FIXED: &str = "FIXED";

/// `RentPeriod` marker accompanying a monthly rent.
pub const RENT_PERIOD_MONTHLY: &str = "месяц";

pub const fn operation_type(purpose: FeedPurpose) -> &'static str {
    match purpose {
        FeedPurpose::Sale => "Продажа",
        FeedPurpose::Rent => "Аренда",
    }
}

pub const fn property_rights(ownership: Option<Ownership>) -> &'static str {
    match ownership {
        Some(Ownership::Owner) => "Собственник",
        Some(Ownership::Intermediary) | None => "Посредник",
    }
}

pub const fn entrance(entrance: Option<Entrance>) -> &'static str {
    match entrance {
        Some(Entrance::Courtyard) => "Со двора",
        Some(Entrance::Street) | None => "С улицы",
    }
}

pub const fn decoration(finishing: Option<Finishing>) -> &'static str {
    match finishing {
        Some(Finishing::Clean) => "Чистовая",
        Some(Finishing::Office) => "Офисная",
        Some(Finishing::Shell) | None => "Без отделки",
    }
}

pub const fn building_type(building_type: Option<super::domain::BuildingType>) -> &'static str {
    use super::domain::BuildingType as Bt;
    match building_type {
        Some(Bt::BusinessCenter) => "Бизнес-центр",
        Some(Bt::ShoppingCenter) => "Торговый центр",
        Some(Bt::AdminBuilding) => "Административное здание",
        Some(Bt::ResidentialComplex) => "Жилой дом",
        _ => "Другой",
    }
}

pub const fn parking_type(parking: Option<Parking>) -> &'static str {
    match parking {
        Some(Parking::Street) => "На улице",
        Some(Parking::InBuilding) => "В здании",
        Some(Parking::None) | None => "Нет",
    }
}

/// Transaction type for sale feeds.
pub const fn transaction_type(deal_type: Option<DealType>) -> &'static str {
    match deal_type {
        Some(DealType::LeaseAssignment) => "Переуступка права аренды",
        Some(DealType::Sale) | None => "Продажа",
    }
}

/// Rental type for rent feeds, derived from the ownership attribute.
pub const fn rental_type(ownership: Option<Ownership>) -> &'static str {
    match ownership {
        Some(Ownership::Owner) | None => "Прямая",
        Some(Ownership::Intermediary) => "Субаренда",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::avito::domain::BuildingType as Bt;

    #[test]
    fn absent_attributes_resolve_to_defaults() {
        assert_eq!(property_rights(None), "Посредник");
        assert_eq!(entrance(None), "С улицы");
        assert_eq!(decoration(None), "Без отделки");
        assert_eq!(building_type(None), "Другой");
        assert_eq!(parking_type(None), "Нет");
        assert_eq!(transaction_type(None), "Продажа");
        assert_eq!(rental_type(None), "Прямая");
    }

    #[test]
    fn building_types_outside_the_named_set_map_to_other() {
        assert_eq!(building_type(Some(Bt::OfficeCenter)), "Другой");
        assert_eq!(building_type(Some(Bt::Warehouse)), "Другой");
        assert_eq!(building_type(Some(Bt::ShoppingCenter)), "Торговый центр");
    }

    #[test]
    fn rental_type_flips_on_intermediary() {
        assert_eq!(rental_type(Some(Ownership::Owner)), "Прямая");
        assert_eq!(rental_type(Some(Ownership::Intermediary)), "Субаренда");
    }
}
