//! Serialization of a validated listing batch into the marketplace XML
//! vocabulary.

use chrono::{DateTime, Duration, FixedOffset, Local};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use uuid::Uuid;

use super::domain::{FeedPurpose, Listing, ListingPhoto};
use super::mapping;
use super::rules::{self, ObjectType};

const FORMAT_VERSION: &str = "3";
const TARGET: &str = "Avito.ru";
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";
const PUBLICATION_WINDOW_DAYS: i64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum FeedWriteError {
    #[error("failed to serialize feed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("generated feed is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    /// A value the business validator guarantees was absent anyway. The
    /// batch was handed over without a passing validation run.
    #[error("listing {listing} is missing {field}; validate the batch before generating")]
    MissingValue { listing: Uuid, field: &'static str },
}

/// Serializes the batch with the current instant as the start of the
/// publication window.
pub fn generate(
    listings: &[Listing],
    purpose: FeedPurpose,
    photo_base_url: &str,
) -> Result<String, FeedWriteError> {
    generate_at(listings, purpose, photo_base_url, Local::now().fixed_offset())
}

/// Serializes the batch with an explicit generation instant. Output is
/// deterministic for fixed inputs.
pub fn generate_at(
    listings: &[Listing],
    purpose: FeedPurpose,
    photo_base_url: &str,
    now: DateTime<FixedOffset>,
) -> Result<String, FeedWriteError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("Ads");
    root.push_attribute(("formatVersion", FORMAT_VERSION));
    root.push_attribute(("target", TARGET));
    writer.write_event(Event::Start(root))?;

    for listing in listings {
        write_ad(&mut writer, listing, purpose, photo_base_url, now)?;
    }

    writer.write_event(Event::End(BytesEnd::new("Ads")))?;

    let xml = String::from_utf8(writer.into_inner())?;
    Ok(xml)
}

fn write_ad(
    writer: &mut Writer<Vec<u8>>,
    listing: &Listing,
    purpose: FeedPurpose,
    photo_base_url: &str,
    now: DateTime<FixedOffset>,
) -> Result<(), FeedWriteError> {
    let object_type = ObjectType::classify(listing.building_type);

    writer.write_event(Event::Start(BytesStart::new("Ad")))?;

    text_element(writer, "Id", &listing.id.to_string())?;
    text_element(writer, "Category", mapping::CATEGORY)?;

    cdata_element(writer, "Title", required_text(listing, "Title", &listing.title)?)?;
    cdata_element(
        writer,
        "Description",
        required_text(listing, "Description", &listing.description)?,
    )?;
    cdata_element(
        writer,
        "Address",
        required_text(listing, "Address", &listing.location)?,
    )?;

    match purpose {
        FeedPurpose::Sale => {
            let price = listing.price.ok_or(FeedWriteError::MissingValue {
                listing: listing.id,
                field: "Price",
            })?;
            text_element(writer, "Price", &price.to_string())?;
            text_element(writer, "PriceType", mapping::PRICE_TYPE_FIXED)?;
        }
        FeedPurpose::Rent => {
            let rent = listing.monthly_rent.ok_or(FeedWriteError::MissingValue {
                listing: listing.id,
                field: "Price",
            })?;
            text_element(writer, "Price", &rent.to_string())?;
            text_element(writer, "RentPeriod", mapping::RENT_PERIOD_MONTHLY)?;
        }
    }

    text_element(writer, "OperationType", mapping::operation_type(purpose))?;
    text_element(writer, "CommercialType", object_type.label())?;
    text_element(
        writer,
        "PropertyRights",
        mapping::property_rights(listing.ownership),
    )?;

    if rules::requires_entrance(object_type) || listing.entrance.is_some() {
        text_element(writer, "Entrance", mapping::entrance(listing.entrance))?;
    }

    if rules::requires_floor(object_type) {
        if let Some(floor) = listing.floor {
            text_element(writer, "Floor", &floor.to_string())?;
        }
    }

    if rules::requires_layout(object_type, purpose) {
        text_element(writer, "Layout", mapping::LAYOUT_OPEN)?;
    }

    let area = listing.area.ok_or(FeedWriteError::MissingValue {
        listing: listing.id,
        field: "Square",
    })?;
    text_element(writer, "Square", &area.to_string())?;

    if let Some(ceiling_height) = listing.ceiling_height {
        text_element(writer, "CeilingHeight", &ceiling_height.to_string())?;
    }

    if rules::requires_decoration(object_type) || listing.finishing.is_some() {
        text_element(writer, "Decoration", mapping::decoration(listing.finishing))?;
    }

    text_element(
        writer,
        "BuildingType",
        mapping::building_type(listing.building_type),
    )?;

    if rules::requires_parking_type(object_type) || listing.parking.is_some() {
        text_element(writer, "ParkingType", mapping::parking_type(listing.parking))?;
    }

    match purpose {
        FeedPurpose::Sale => {
            text_element(
                writer,
                "TransactionType",
                mapping::transaction_type(listing.deal_type),
            )?;
        }
        FeedPurpose::Rent => {
            text_element(writer, "RentalType", mapping::rental_type(listing.ownership))?;
        }
    }

    write_images(writer, listing.id, &listing.photos, photo_base_url)?;

    let end = now + Duration::days(PUBLICATION_WINDOW_DAYS);
    text_element(writer, "DateBegin", &now.format(DATE_FORMAT).to_string())?;
    text_element(writer, "DateEnd", &end.format(DATE_FORMAT).to_string())?;

    writer.write_event(Event::End(BytesEnd::new("Ad")))?;
    Ok(())
}

fn write_images(
    writer: &mut Writer<Vec<u8>>,
    listing_id: Uuid,
    photos: &[ListingPhoto],
    photo_base_url: &str,
) -> Result<(), FeedWriteError> {
    if photos.is_empty() {
        return Ok(());
    }

    let mut sorted: Vec<&ListingPhoto> = photos.iter().collect();
    sorted.sort_by_key(|photo| photo.position);

    writer.write_event(Event::Start(BytesStart::new("Images")))?;
    for photo in sorted {
        let url = photo_url(photo_base_url, listing_id, photo.id);
        let mut image = BytesStart::new("Image");
        image.push_attribute(("url", url.as_str()));
        writer.write_event(Event::Empty(image))?;
    }
    writer.write_event(Event::End(BytesEnd::new("Images")))?;
    Ok(())
}

fn photo_url(base_url: &str, listing_id: Uuid, photo_id: Uuid) -> String {
    format!("{base_url}/listings/{listing_id}/photos/{photo_id}/raw")
}

fn required_text<'a>(
    listing: &Listing,
    field: &'static str,
    value: &'a str,
) -> Result<&'a str, FeedWriteError> {
    if value.trim().is_empty() {
        return Err(FeedWriteError::MissingValue {
            listing: listing.id,
            field,
        });
    }
    Ok(value)
}

fn text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    value: &str,
) -> Result<(), FeedWriteError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn cdata_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    value: &str,
) -> Result<(), FeedWriteError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::CData(BytesCData::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::avito::domain::{BuildingType, Entrance, Finishing, Ownership, Parking};
    use chrono::TimeZone;

    const BASE_URL: &str = "https://feeds.example.com";

    fn fixed_now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3 * 3600)
            .expect("valid offset")
            .with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
            .single()
            .expect("valid instant")
    }

    fn office_listing() -> Listing {
        Listing {
            id: Uuid::new_v4(),
            title: "Офис 120 м²".to_string(),
            description: "Open space с видом на реку & парк".to_string(),
            location: "Москва, Пресненская наб. 12".to_string(),
            price: Some(25_000_000),
            monthly_rent: Some(450_000),
            area: Some(120.5),
            ceiling_height: Some(3.2),
            floor: Some(4),
            ownership: Some(Ownership::Owner),
            entrance: Some(Entrance::Courtyard),
            finishing: Some(Finishing::Office),
            building_type: Some(BuildingType::OfficeCenter),
            parking: Some(Parking::InBuilding),
            deal_type: None,
            photos: Vec::new(),
        }
    }

    fn element_position(xml: &str, name: &str) -> usize {
        xml.find(&format!("<{name}>"))
            .unwrap_or_else(|| panic!("element {name} not found in {xml}"))
    }

    #[test]
    fn sale_feed_emits_elements_in_fixed_order() {
        let xml = generate_at(&[office_listing()], FeedPurpose::Sale, BASE_URL, fixed_now())
            .expect("generate");

        assert!(xml.contains(r#"<Ads formatVersion="3" target="Avito.ru">"#));
        let order = [
            "Id",
            "Category",
            "Title",
            "Description",
            "Address",
            "Price",
            "PriceType",
            "OperationType",
            "CommercialType",
            "PropertyRights",
            "Entrance",
            "Floor",
            "Layout",
            "Square",
            "CeilingHeight",
            "Decoration",
            "BuildingType",
            "ParkingType",
            "TransactionType",
            "DateBegin",
            "DateEnd",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|name| element_position(&xml, name))
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted, "elements out of order in {xml}");
    }

    #[test]
    fn free_text_is_wrapped_in_cdata_not_escaped() {
        let xml = generate_at(&[office_listing()], FeedPurpose::Sale, BASE_URL, fixed_now())
            .expect("generate");
        assert!(xml.contains("<Description><![CDATA[Open space с видом на реку & парк]]></Description>"));
    }

    #[test]
    fn rent_feed_uses_monthly_rent_and_rental_type() {
        let xml = generate_at(&[office_listing()], FeedPurpose::Rent, BASE_URL, fixed_now())
            .expect("generate");
        assert!(xml.contains("<Price>450000</Price>"));
        assert!(xml.contains("<RentPeriod>месяц</RentPeriod>"));
        assert!(xml.contains("<RentalType>Прямая</RentalType>"));
        assert!(!xml.contains("<PriceType>"));
        assert!(!xml.contains("<TransactionType>"));
    }

    #[test]
    fn publication_window_spans_thirty_days() {
        let now = fixed_now();
        let xml =
            generate_at(&[office_listing()], FeedPurpose::Sale, BASE_URL, now).expect("generate");
        assert!(xml.contains("<DateBegin>2025-06-01T12:00:00+03:00</DateBegin>"));
        assert!(xml.contains("<DateEnd>2025-07-01T12:00:00+03:00</DateEnd>"));
    }

    #[test]
    fn photos_are_sorted_by_position() {
        let mut listing = office_listing();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        listing.photos = vec![
            ListingPhoto {
                id: second,
                position: 1,
                cover: false,
            },
            ListingPhoto {
                id: first,
                position: 0,
                cover: true,
            },
        ];
        let listing_id = listing.id;

        let xml = generate_at(&[listing], FeedPurpose::Sale, BASE_URL, fixed_now())
            .expect("generate");
        let first_url = photo_url(BASE_URL, listing_id, first);
        let second_url = photo_url(BASE_URL, listing_id, second);
        let first_at = xml.find(&first_url).expect("first photo present");
        let second_at = xml.find(&second_url).expect("second photo present");
        assert!(first_at < second_at, "photos out of order in {xml}");
    }

    #[test]
    fn optional_elements_are_omitted_not_emitted_empty() {
        let mut listing = office_listing();
        listing.ceiling_height = None;
        listing.photos = Vec::new();

        let xml = generate_at(&[listing], FeedPurpose::Sale, BASE_URL, fixed_now())
            .expect("generate");
        assert!(!xml.contains("<CeilingHeight"));
        assert!(!xml.contains("<Images"));
    }

    #[test]
    fn required_entrance_falls_back_to_street_default() {
        // Free-purpose bucket requires an entrance; the mapper supplies the
        // documented default when the listing does not carry one.
        let mut listing = office_listing();
        listing.building_type = None;
        listing.entrance = None;

        let xml = generate_at(&[listing], FeedPurpose::Sale, BASE_URL, fixed_now())
            .expect("generate");
        assert!(xml.contains("<Entrance>С улицы</Entrance>"));
        assert!(!xml.contains("<Layout>"));
    }

    #[test]
    fn missing_price_is_a_contract_violation_not_a_partial_document() {
        let mut listing = office_listing();
        listing.price = None;
        let id = listing.id;

        let error = generate_at(&[listing], FeedPurpose::Sale, BASE_URL, fixed_now())
            .expect_err("generation must fail");
        match error {
            FeedWriteError::MissingValue { listing, field } => {
                assert_eq!(listing, id);
                assert_eq!(field, "Price");
            }
            other => panic!("expected missing value error, got {other:?}"),
        }
    }
}
