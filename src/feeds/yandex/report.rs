use serde::Serialize;

/// Machine-readable issue codes surfaced by the streaming validator.
pub mod codes {
    pub const INTERNAL_ID_MISSING: &str = "INTERNAL_ID_MISSING";
    pub const INTERNAL_ID_DUP: &str = "INTERNAL_ID_DUP";
    pub const TYPE_INVALID: &str = "TYPE_INVALID";
    pub const CATEGORY_INVALID: &str = "CATEGORY_INVALID";
    pub const COMMERCIAL_TYPE_INVALID: &str = "COMMERCIAL_TYPE_INVALID";
    pub const DATE_FORMAT: &str = "DATE_FORMAT";
    pub const URL_INVALID: &str = "URL_INVALID";
    pub const CURRENCY_UNCOMMON: &str = "CURRENCY_UNCOMMON";
    pub const TYPE_REQUIRED: &str = "TYPE_REQUIRED";
    pub const CATEGORY_REQUIRED: &str = "CATEGORY_REQUIRED";
    pub const LOCATION_REQUIRED: &str = "LOCATION_REQUIRED";
    pub const PRICE_REQUIRED: &str = "PRICE_REQUIRED";
    pub const XML_PARSING: &str = "XML_PARSING";
}

/// One finding, addressed by an XPath-like pointer into the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub code: &'static str,
    pub message: String,
    pub path: String,
}

impl Issue {
    pub(crate) fn new(code: &'static str, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: path.into(),
        }
    }
}

/// Aggregated validation outcome. Errors flip `valid`; warnings never do.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl ValidationReport {
    pub(crate) fn from_findings(errors: Vec<Issue>, warnings: Vec<Issue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}
