use serde::{Deserialize, Serialize};

use super::validation::is_reading_text;

/// Number of readings in each dimension group.
pub const READINGS_PER_GROUP: usize = 4;

/// Addresses one of the four sections of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Free-text traceability code.
    TraceabilityCode,
    /// Free-text inspector name.
    InspectorName,
    /// First group of four dimensional readings.
    D1,
    /// Second group of four dimensional readings.
    D2,
}

/// A single measurement entry.
///
/// Readings are kept as entered text rather than parsed numbers: the QC
/// server receives exactly what the inspector typed, and partial entries
/// like `"1."` are legal while a field is being edited.
///
/// Serializes to the wire/snapshot shape
/// `{ "traceabilityCode", "inspectorName", "D1", "D2" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub traceability_code: String,
    pub inspector_name: String,
    #[serde(rename = "D1")]
    pub d1: [String; READINGS_PER_GROUP],
    #[serde(rename = "D2")]
    pub d2: [String; READINGS_PER_GROUP],
}

impl Default for Record {
    fn default() -> Self {
        Self::blank()
    }
}

impl Record {
    /// Creates an all-empty record.
    pub fn blank() -> Self {
        Self {
            traceability_code: String::new(),
            inspector_name: String::new(),
            d1: std::array::from_fn(|_| String::new()),
            d2: std::array::from_fn(|_| String::new()),
        }
    }

    /// Replaces one field of the record.
    ///
    /// Text sections replace unconditionally and ignore `index`. Reading
    /// sections replace the element at `index` only if `value` is empty or a
    /// valid reading (see [`is_reading_text`]); anything else is dropped
    /// silently. Returns `true` if the record was modified.
    ///
    /// An out-of-range `index` for a reading section is a no-op.
    pub fn set_field(&mut self, section: Section, index: usize, value: String) -> bool {
        match section {
            Section::TraceabilityCode => {
                self.traceability_code = value;
                true
            }
            Section::InspectorName => {
                self.inspector_name = value;
                true
            }
            Section::D1 | Section::D2 => {
                if !is_reading_text(&value) {
                    return false;
                }
                let group = match section {
                    Section::D1 => &mut self.d1,
                    _ => &mut self.d2,
                };
                match group.get_mut(index) {
                    Some(slot) => {
                        *slot = value;
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Returns the current text of one field.
    ///
    /// `index` is ignored for text sections; an out-of-range index for a
    /// reading section returns the empty string.
    pub fn field(&self, section: Section, index: usize) -> &str {
        match section {
            Section::TraceabilityCode => &self.traceability_code,
            Section::InspectorName => &self.inspector_name,
            Section::D1 => self.d1.get(index).map(String::as_str).unwrap_or(""),
            Section::D2 => self.d2.get(index).map(String::as_str).unwrap_or(""),
        }
    }

    /// Resets every field back to blank.
    pub fn reset(&mut self) {
        *self = Self::blank();
    }

    /// Returns `true` if every field is empty.
    pub fn is_blank(&self) -> bool {
        self.traceability_code.is_empty()
            && self.inspector_name.is_empty()
            && self.d1.iter().all(String::is_empty)
            && self.d2.iter().all(String::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    fn filled() -> Record {
        let mut r = Record::blank();
        r.set_field(Section::TraceabilityCode, 0, "TC-100".into());
        r.set_field(Section::InspectorName, 0, "Somsak".into());
        for (i, v) in ["1.5", "2.0", "3", "4.25"].iter().enumerate() {
            r.set_field(Section::D1, i, (*v).into());
        }
        r
    }

    #[test]
    fn blank_is_all_empty() {
        let r = Record::blank();
        assert!(r.is_blank());
        assert_eq!(r.d1.len(), READINGS_PER_GROUP);
        assert_eq!(r.d2.len(), READINGS_PER_GROUP);
    }

    #[test]
    fn text_sections_accept_anything() {
        let mut r = Record::blank();
        assert!(r.set_field(Section::TraceabilityCode, 0, "TC/100 rev.B".into()));
        assert!(r.set_field(Section::InspectorName, 0, "สมศักดิ์".into()));
        assert_eq!(r.traceability_code, "TC/100 rev.B");
        assert_eq!(r.inspector_name, "สมศักดิ์");
    }

    #[test]
    fn text_sections_ignore_index() {
        let mut r = Record::blank();
        assert!(r.set_field(Section::InspectorName, 99, "A".into()));
        assert_eq!(r.inspector_name, "A");
    }

    #[test]
    fn valid_reading_is_stored() {
        let mut r = Record::blank();
        for i in 0..READINGS_PER_GROUP {
            assert!(r.set_field(Section::D1, i, "1.5".into()));
            assert_eq!(r.field(Section::D1, i), "1.5");
        }
    }

    #[test]
    fn empty_reading_is_stored() {
        let mut r = Record::blank();
        r.set_field(Section::D2, 1, "3.2".into());
        assert!(r.set_field(Section::D2, 1, String::new()));
        assert_eq!(r.field(Section::D2, 1), "");
    }

    #[test]
    fn invalid_reading_leaves_field_unchanged() {
        let mut r = Record::blank();
        r.set_field(Section::D1, 2, "3.1".into());
        for bad in ["abc", "1.2.3", "-5", "3.1x", " 3.1"] {
            assert!(!r.set_field(Section::D1, 2, bad.into()), "{bad:?} accepted");
            assert_eq!(r.field(Section::D1, 2), "3.1");
        }
    }

    #[test]
    fn out_of_range_index_is_noop() {
        let mut r = Record::blank();
        assert!(!r.set_field(Section::D1, READINGS_PER_GROUP, "1".into()));
        assert!(r.is_blank());
        assert_eq!(r.field(Section::D2, 99), "");
    }

    #[test]
    fn reset_yields_blank_regardless_of_prior_state() {
        let mut r = filled();
        assert!(!r.is_blank());
        r.reset();
        assert_eq!(r, Record::blank());
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let json = serde_json::to_value(filled()).unwrap();
        assert_eq!(json["traceabilityCode"], "TC-100");
        assert_eq!(json["inspectorName"], "Somsak");
        assert_eq!(json["D1"][3], "4.25");
        assert_eq!(json["D2"][0], "");
        assert_eq!(json["D1"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn deserializes_wire_shape() {
        let json = r#"{
            "traceabilityCode": "TC-7",
            "inspectorName": "A",
            "D1": ["1", "2", "3", "4"],
            "D2": ["", "", "", ""]
        }"#;
        let r: Record = serde_json::from_str(json).unwrap();
        assert_eq!(r.traceability_code, "TC-7");
        assert_eq!(r.d1[3], "4");
    }

    #[quickcheck]
    fn accepted_reading_reads_back_exactly(whole: u32, frac: u32, index: usize) -> bool {
        let index = index % READINGS_PER_GROUP;
        let value = format!("{whole}.{frac}");
        let mut r = Record::blank();
        r.set_field(Section::D1, index, value.clone());
        r.field(Section::D1, index) == value
    }

    #[quickcheck]
    fn rejected_reading_never_mutates(s: String, index: usize) -> bool {
        let index = index % READINGS_PER_GROUP;
        let mut r = filled();
        let before = r.clone();
        if r.set_field(Section::D2, index, s.clone()) {
            r.field(Section::D2, index) == s
        } else {
            r == before
        }
    }
}
