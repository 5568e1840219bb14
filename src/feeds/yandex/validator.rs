//! Single-pass streaming validation of externally supplied feed documents.
//!
//! The scan keeps a stack of open element names so that same-named elements
//! are only checked in their exact context; a `category` nested under an
//! unrelated sibling of the offer is ignored. No document tree is ever
//! materialized.

use std::collections::HashSet;

use chrono::DateTime;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use url::Url;

use super::report::{codes, Issue, ValidationReport};

const ALLOWED_TYPES: &[&str] = &["продажа", "аренда", "sale", "rent"];
const ALLOWED_CATEGORIES: &[&str] = &["коммерческая", "commercial"];
const ALLOWED_COMMERCIAL_TYPES: &[&str] = &[
    "auto repair",
    "business",
    "free purpose",
    "hotel",
    "land",
    "legal address",
    "manufacturing",
    "office",
    "public catering",
    "retail",
    "warehouse",
];
const COMMON_CURRENCIES: &[&str] = &["RUR", "RUB", "USD", "EUR"];

/// Validates a feed document in one forward pass over the bytes.
///
/// Content-level findings accumulate across the whole document; only
/// malformed XML aborts the scan, closing the report with a single parsing
/// error.
pub fn validate(document: &[u8]) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if let Err(err) = scan(document, &mut errors, &mut warnings) {
        errors.push(Issue::new(
            codes::XML_PARSING,
            format!("malformed XML: {err}"),
            "/",
        ));
    }

    ValidationReport::from_findings(errors, warnings)
}

/// Per-offer scan state, reset every time a new offer opens.
struct OfferState {
    id: Option<String>,
    has_type: bool,
    has_category: bool,
    has_location: bool,
    has_price: bool,
}

impl OfferState {
    fn new(id: Option<String>) -> Self {
        Self {
            id,
            has_type: false,
            has_category: false,
            has_location: false,
            has_price: false,
        }
    }

    fn note_closed(&mut self, name: &str) {
        if name == "price" {
            self.has_price = true;
        }
        if name == "location" {
            self.has_location = true;
        }
    }

    fn path(&self) -> String {
        offer_path(self.id.as_deref())
    }
}

fn scan(
    document: &[u8],
    errors: &mut Vec<Issue>,
    warnings: &mut Vec<Issue>,
) -> Result<(), quick_xml::Error> {
    let mut reader = Reader::from_reader(document);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut path: Vec<String> = Vec::new();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut offer: Option<OfferState> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Eof => break,
            Event::Start(start) => {
                let name = element_name(&start);
                if name == "offer" {
                    offer = Some(open_offer(&start, &mut seen_ids, errors)?);
                }
                path.push(name);
            }
            Event::Empty(start) => {
                let name = element_name(&start);
                if name == "offer" {
                    let state = open_offer(&start, &mut seen_ids, errors)?;
                    close_offer(state, errors);
                } else if let Some(state) = offer.as_mut() {
                    state.note_closed(&name);
                }
            }
            Event::Text(text) => {
                if let Some(state) = offer.as_mut() {
                    let value = text.unescape()?;
                    dispatch_text(state, &path, value.trim(), errors, warnings);
                }
            }
            Event::CData(cdata) => {
                if let Some(state) = offer.as_mut() {
                    let value = String::from_utf8_lossy(&cdata).into_owned();
                    dispatch_text(state, &path, value.trim(), errors, warnings);
                }
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.local_name().as_ref()).into_owned();
                if let Some(state) = offer.as_mut() {
                    state.note_closed(&name);
                }
                if name == "offer" {
                    if let Some(state) = offer.take() {
                        close_offer(state, errors);
                    }
                }
                while let Some(top) = path.pop() {
                    if top == name {
                        break;
                    }
                }
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn open_offer(
    start: &BytesStart<'_>,
    seen_ids: &mut HashSet<String>,
    errors: &mut Vec<Issue>,
) -> Result<OfferState, quick_xml::Error> {
    let id = match start.try_get_attribute("internal-id")? {
        Some(attribute) => {
            let value = attribute.unescape_value()?.trim().to_string();
            if value.is_empty() {
                None
            } else {
                Some(value)
            }
        }
        None => None,
    };

    match &id {
        None => errors.push(Issue::new(
            codes::INTERNAL_ID_MISSING,
            "offer is missing its internal-id attribute",
            "/offer",
        )),
        Some(value) => {
            if !seen_ids.insert(value.clone()) {
                errors.push(Issue::new(
                    codes::INTERNAL_ID_DUP,
                    format!("duplicate internal-id: {value}"),
                    offer_path(Some(value)),
                ));
            }
        }
    }

    Ok(OfferState::new(id))
}

fn dispatch_text(
    state: &mut OfferState,
    path: &[String],
    value: &str,
    errors: &mut Vec<Issue>,
    warnings: &mut Vec<Issue>,
) {
    if value.is_empty() {
        return;
    }
    let Some(current) = path.last() else {
        return;
    };
    let parent = path
        .len()
        .checked_sub(2)
        .and_then(|index| path.get(index))
        .map(String::as_str);

    match (current.as_str(), parent) {
        ("category", Some("offer")) => {
            state.has_category = true;
            if !ALLOWED_CATEGORIES.contains(&value) {
                errors.push(Issue::new(
                    codes::CATEGORY_INVALID,
                    format!("category must be one of: {}", ALLOWED_CATEGORIES.join(", ")),
                    format!("{}/category", state.path()),
                ));
            }
        }
        ("type", Some("offer")) => {
            state.has_type = true;
            if !ALLOWED_TYPES.contains(&value) {
                errors.push(Issue::new(
                    codes::TYPE_INVALID,
                    format!("unsupported type: {value}"),
                    format!("{}/type", state.path()),
                ));
            }
        }
        ("commercial-type", Some("offer")) => {
            if !ALLOWED_COMMERCIAL_TYPES.contains(&value) {
                errors.push(Issue::new(
                    codes::COMMERCIAL_TYPE_INVALID,
                    format!("unsupported commercial-type: {value}"),
                    format!("{}/commercial-type", state.path()),
                ));
            }
        }
        ("creation-date" | "last-update-date", Some("offer")) => {
            if DateTime::parse_from_rfc3339(value).is_err() {
                errors.push(Issue::new(
                    codes::DATE_FORMAT,
                    format!("{current} must be an ISO-8601 date-time with an offset"),
                    format!("{}/{current}", state.path()),
                ));
            }
        }
        ("url", Some("offer")) => {
            if Url::parse(value).is_err() {
                errors.push(Issue::new(
                    codes::URL_INVALID,
                    "url is not a well-formed absolute URL",
                    format!("{}/url", state.path()),
                ));
            }
        }
        ("currency", Some("price")) => {
            if !COMMON_CURRENCIES
                .iter()
                .any(|currency| currency.eq_ignore_ascii_case(value))
            {
                warnings.push(Issue::new(
                    codes::CURRENCY_UNCOMMON,
                    format!("uncommon currency: {value}"),
                    format!("{}/price/currency", state.path()),
                ));
            }
        }
        _ => {}
    }
}

fn close_offer(state: OfferState, errors: &mut Vec<Issue>) {
    let path = state.path();
    if !state.has_type {
        errors.push(Issue::new(codes::TYPE_REQUIRED, "<type> is required", path.clone()));
    }
    if !state.has_category {
        errors.push(Issue::new(
            codes::CATEGORY_REQUIRED,
            "<category> is required",
            path.clone(),
        ));
    }
    if !state.has_location {
        errors.push(Issue::new(
            codes::LOCATION_REQUIRED,
            "<location> is required",
            path.clone(),
        ));
    }
    if !state.has_price {
        errors.push(Issue::new(codes::PRICE_REQUIRED, "<price> is required", path));
    }
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

fn offer_path(id: Option<&str>) -> String {
    match id {
        Some(id) => format!("/offer[@internal-id='{id}']"),
        None => "/offer".to_string(),
    }
}
