use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Selects the price field and the mandatory-field sets for a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedPurpose {
    Sale,
    Rent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ownership {
    Owner,
    Intermediary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entrance {
    Street,
    Courtyard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Finishing {
    Shell,
    Clean,
    Office,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingType {
    OfficeCenter,
    BusinessCenter,
    ShoppingCenter,
    StreetRetail,
    AdminBuilding,
    ResidentialComplex,
    Warehouse,
    Other,
}

impl BuildingType {
    /// Lower-cased token the object-type classifier matches against.
    pub const fn token(self) -> &'static str {
        match self {
            Self::OfficeCenter => "office_center",
            Self::BusinessCenter => "business_center",
            Self::ShoppingCenter => "shopping_center",
            Self::StreetRetail => "street_retail",
            Self::AdminBuilding => "admin_building",
            Self::ResidentialComplex => "residential_complex",
            Self::Warehouse => "warehouse",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parking {
    None,
    Street,
    InBuilding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealType {
    Sale,
    LeaseAssignment,
}

/// Photo reference carried by a listing. Positions are unique per listing
/// and dense from 0; position 0 is the cover unless another photo carries
/// the explicit cover flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPhoto {
    pub id: Uuid,
    pub position: u32,
    #[serde(default)]
    pub cover: bool,
}

/// Snapshot of one inventory listing as handed over by the host
/// application. The feed engine treats it as immutable for the duration of
/// one validate-then-generate pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    /// Sale price in whole currency units.
    pub price: Option<u64>,
    /// Monthly rent in whole currency units.
    pub monthly_rent: Option<u64>,
    pub area: Option<f64>,
    pub ceiling_height: Option<f64>,
    pub floor: Option<i32>,
    pub ownership: Option<Ownership>,
    pub entrance: Option<Entrance>,
    pub finishing: Option<Finishing>,
    pub building_type: Option<BuildingType>,
    pub parking: Option<Parking>,
    pub deal_type: Option<DealType>,
    #[serde(default)]
    pub photos: Vec<ListingPhoto>,
}

impl Listing {
    /// The photo flagged as cover, falling back to position 0.
    pub fn cover_photo(&self) -> Option<&ListingPhoto> {
        self.photos
            .iter()
            .find(|photo| photo.cover)
            .or_else(|| self.photos.iter().find(|photo| photo.position == 0))
    }
}

/// Immutable result of one successful generation run. The document text is
/// written once; regenerating produces a new value.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedFeed {
    pub xml: String,
    pub purpose: FeedPurpose,
    pub listing_ids: Vec<Uuid>,
    pub created_at: DateTime<FixedOffset>,
}
