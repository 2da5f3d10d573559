//! Domain types for the citysync pipeline.
//!
//! Raw spreadsheet cells and API payloads are converted into these types at
//! the boundary; everything past the boundary works with typed values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed prefix of a browsable spreadsheet URL. Written in front of the bare
/// key when a responses reference is stored back into the roster, stripped
/// again when the cell is read.
pub const SHEET_URL_PREFIX: &str = "https://docs.google.com/spreadsheets/d/";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A city name exactly as it appears in the roster (trimmed).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CityName(pub String);

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for CityName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CityName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Identifier of a spreadsheet document in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpreadsheetId(pub String);

impl fmt::Display for SpreadsheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for SpreadsheetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SpreadsheetId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Bare key of a per-city responses sheet, without any URL decoration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SheetKey(pub String);

impl fmt::Display for SheetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for SheetKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SheetKey {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl SheetKey {
    /// Parse a roster cell into a bare key.
    ///
    /// Cells hold either a bare key or the browsable URL a previous run wrote
    /// back; the URL prefix and any trailing path segments are stripped so the
    /// two forms compare equal. Blank cells yield `None`.
    pub fn from_cell(cell: &str) -> Option<Self> {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return None;
        }
        let key = match trimmed.strip_prefix(SHEET_URL_PREFIX) {
            Some(rest) => rest.split(['/', '?', '#']).next().unwrap_or(""),
            None => trimmed,
        };
        (!key.is_empty()).then(|| Self(key.to_owned()))
    }

    /// The browsable URL form of this key.
    pub fn to_url(&self) -> String {
        format!("{SHEET_URL_PREFIX}{}", self.0)
    }
}

/// URL of a city's to-do form, as returned by the copy executor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormUrl(pub String);

impl fmt::Display for FormUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for FormUrl {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FormUrl {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Opaque identifier of a messaging group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(pub String);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for GroupId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for GroupId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Platform-safe name of a messaging group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupName(pub String);

impl GroupName {
    /// The group name corresponding to a roster city, per
    /// [`crate::normalize::channel_name`].
    pub fn for_city(city: &CityName) -> Self {
        Self(crate::normalize::channel_name(&city.0))
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for GroupName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for GroupName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// One roster row, typed. Blank cells become `None` rather than empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityRecord {
    pub city: CityName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormUrl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responses: Option<SheetKey>,
}

impl CityRecord {
    /// Build a record from raw roster cells.
    pub fn from_cells(city: &str, form: &str, responses: &str) -> Self {
        Self {
            city: CityName::from(city.trim()),
            form: non_blank(form).map(FormUrl::from),
            responses: SheetKey::from_cell(responses),
        }
    }

    /// Whether both per-city resources already exist.
    pub fn is_complete(&self) -> bool {
        self.form.is_some() && self.responses.is_some()
    }
}

/// A messaging group as reported by a list call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub id: GroupId,
    pub name: String,
}

/// Full group metadata, including the current topic (empty string when unset).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInfo {
    pub id: GroupId,
    pub name: String,
    pub topic: String,
}

/// Desired topic text for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicAssignment {
    pub group: GroupId,
    pub topic: String,
}

fn non_blank(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newtype_display() {
        assert_eq!(CityName::from("Austin").to_string(), "Austin");
        assert_eq!(SheetKey::from("k-123").to_string(), "k-123");
        assert_eq!(GroupId::from("G042").to_string(), "G042");
    }

    #[test]
    fn newtype_equality() {
        let a = CityName::from("x");
        let b = CityName::from(String::from("x"));
        assert_eq!(a, b);
    }

    #[test]
    fn sheet_key_from_bare_cell() {
        assert_eq!(SheetKey::from_cell("abc123"), Some(SheetKey::from("abc123")));
        assert_eq!(SheetKey::from_cell("  abc123  "), Some(SheetKey::from("abc123")));
    }

    #[test]
    fn sheet_key_from_url_cell() {
        let cell = "https://docs.google.com/spreadsheets/d/abc123";
        assert_eq!(SheetKey::from_cell(cell), Some(SheetKey::from("abc123")));
    }

    #[test]
    fn sheet_key_from_url_with_trailing_path() {
        let cell = "https://docs.google.com/spreadsheets/d/abc123/edit#gid=0";
        assert_eq!(SheetKey::from_cell(cell), Some(SheetKey::from("abc123")));
    }

    #[test]
    fn sheet_key_from_blank_cell() {
        assert_eq!(SheetKey::from_cell(""), None);
        assert_eq!(SheetKey::from_cell("   "), None);
        assert_eq!(SheetKey::from_cell(SHEET_URL_PREFIX), None);
    }

    #[test]
    fn sheet_key_url_roundtrip() {
        let key = SheetKey::from("abc123");
        assert_eq!(SheetKey::from_cell(&key.to_url()), Some(key));
    }

    #[test]
    fn record_from_cells_maps_blank_to_none() {
        let record = CityRecord::from_cells("Austin", "", "  ");
        assert_eq!(record.city, CityName::from("Austin"));
        assert_eq!(record.form, None);
        assert_eq!(record.responses, None);
        assert!(!record.is_complete());
    }

    #[test]
    fn record_from_cells_complete_row() {
        let record = CityRecord::from_cells(
            " Austin ",
            "https://docs.google.com/forms/d/f-1",
            "https://docs.google.com/spreadsheets/d/k-1",
        );
        assert_eq!(record.city, CityName::from("Austin"));
        assert_eq!(record.form, Some(FormUrl::from("https://docs.google.com/forms/d/f-1")));
        assert_eq!(record.responses, Some(SheetKey::from("k-1")));
        assert!(record.is_complete());
    }

    #[test]
    fn group_name_for_city() {
        assert_eq!(GroupName::for_city(&CityName::from("New York")).0, "new_york");
    }

    #[test]
    fn record_serializes_without_blank_fields() {
        let record = CityRecord::from_cells("Austin", "", "");
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json, serde_json::json!({ "city": "Austin" }));

        let record = CityRecord::from_cells("Austin", "form-1", "key-1");
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({ "city": "Austin", "form": "form-1", "responses": "key-1" })
        );
    }
}
