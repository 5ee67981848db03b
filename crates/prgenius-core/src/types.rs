// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the press release editor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// ISO calendar date format used by the `date` field (`YYYY-MM-DD`).
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// One press release. Every field is free text; nothing is validated.
///
/// Records are never mutated in place: [`PressReleaseData::with_field`]
/// produces a new record, and the editor swaps the whole value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PressReleaseData {
    pub headline: String,
    pub subheadline: String,
    pub city: String,
    /// ISO calendar date (`YYYY-MM-DD`). May be empty or malformed.
    pub date: String,
    pub body: String,
    pub about_company: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub website: String,
}

impl PressReleaseData {
    /// Fresh record dated `today`, all other fields empty.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            headline: String::new(),
            subheadline: String::new(),
            city: String::new(),
            date: today.format(ISO_DATE_FORMAT).to_string(),
            body: String::new(),
            about_company: String::new(),
            contact_name: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
            website: String::new(),
        }
    }

    /// Fresh record dated with the local calendar date.
    pub fn today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    /// Borrow the value of a field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Headline => &self.headline,
            Field::Subheadline => &self.subheadline,
            Field::City => &self.city,
            Field::Date => &self.date,
            Field::Body => &self.body,
            Field::AboutCompany => &self.about_company,
            Field::ContactName => &self.contact_name,
            Field::ContactEmail => &self.contact_email,
            Field::ContactPhone => &self.contact_phone,
            Field::Website => &self.website,
        }
    }

    /// A new record equal to `self` except that `field` holds `value`.
    #[must_use]
    pub fn with_field(&self, field: Field, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match field {
            Field::Headline => &mut next.headline,
            Field::Subheadline => &mut next.subheadline,
            Field::City => &mut next.city,
            Field::Date => &mut next.date,
            Field::Body => &mut next.body,
            Field::AboutCompany => &mut next.about_company,
            Field::ContactName => &mut next.contact_name,
            Field::ContactEmail => &mut next.contact_email,
            Field::ContactPhone => &mut next.contact_phone,
            Field::Website => &mut next.website,
        };
        *slot = value.into();
        next
    }

    /// Parse the `date` field, if it holds a valid ISO date.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), ISO_DATE_FORMAT).ok()
    }
}

/// Names of the ten editable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Headline,
    Subheadline,
    City,
    Date,
    Body,
    AboutCompany,
    ContactName,
    ContactEmail,
    ContactPhone,
    Website,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Headline,
        Field::Subheadline,
        Field::City,
        Field::Date,
        Field::Body,
        Field::AboutCompany,
        Field::ContactName,
        Field::ContactEmail,
        Field::ContactPhone,
        Field::Website,
    ];

    /// Form label shown next to the input control.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Headline => "Überschrift",
            Self::Subheadline => "Untertitel (Optional)",
            Self::City => "Ort",
            Self::Date => "Datum",
            Self::Body => "Pressetext",
            Self::AboutCompany => "Über das Unternehmen",
            Self::ContactName => "Kontaktperson",
            Self::ContactEmail => "E-Mail",
            Self::ContactPhone => "Telefon",
            Self::Website => "Webseite",
        }
    }

    /// Input hint shown while the control is empty.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Headline => "Schlagkräftige Überschrift...",
            Self::Subheadline => "Ergänzende Informationen...",
            Self::City => "Berlin",
            Self::Date => "",
            Self::Body => "Schreiben Sie hier Ihren Pressetext...",
            Self::AboutCompany => "Kurzbeschreibung des Unternehmens...",
            Self::ContactName => "Max Mustermann",
            Self::ContactEmail => "presse@firma.de",
            Self::ContactPhone => "+49 ...",
            Self::Website => "www.firma.de",
        }
    }
}

/// The four AI-assist operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeneratorType {
    Headline,
    Body,
    About,
    Improve,
}

impl GeneratorType {
    /// The field a successful generation overwrites.
    pub fn target_field(&self) -> Field {
        match self {
            Self::Headline => Field::Headline,
            Self::Body | Self::Improve => Field::Body,
            Self::About => Field::AboutCompany,
        }
    }

    /// Whether the operation needs a free-text instruction from the user.
    /// `Improve` works on the current body instead.
    pub fn needs_instruction(&self) -> bool {
        !matches!(self, Self::Improve)
    }

    /// Placeholder for the instruction input of this operation.
    pub fn instruction_hint(&self) -> &'static str {
        match self {
            Self::Headline => "Thema der Pressemitteilung...",
            Self::Body => "Worum geht es in der Mitteilung?",
            Self::About => "Name und Branche des Unternehmens...",
            Self::Improve => "",
        }
    }
}

impl std::fmt::Display for GeneratorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Headline => "HEADLINE",
            Self::Body => "BODY",
            Self::About => "ABOUT",
            Self::Improve => "IMPROVE",
        };
        f.write_str(name)
    }
}

/// A single request to the text generator. Built per call, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiRequest {
    pub kind: GeneratorType,
    pub context: String,
    pub current_text: Option<String>,
}

impl AiRequest {
    pub fn new(kind: GeneratorType, context: impl Into<String>) -> Self {
        Self {
            kind,
            context: context.into(),
            current_text: None,
        }
    }

    pub fn with_current_text(mut self, text: impl Into<String>) -> Self {
        self.current_text = Some(text.into());
        self
    }
}

/// Standard paper sizes for the exported page width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    Letter,
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::Letter => (216, 279),
        }
    }

    pub fn width_mm(&self) -> f32 {
        self.dimensions_mm().0 as f32
    }

    pub fn height_mm(&self) -> f32 {
        self.dimensions_mm().1 as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn new_record_is_dated_and_empty() {
        let data = PressReleaseData::new(day());
        assert_eq!(data.date, "2026-10-18");
        for field in Field::ALL.into_iter().filter(|f| *f != Field::Date) {
            assert_eq!(data.get(field), "", "{field:?} should start empty");
        }
    }

    #[test]
    fn with_field_leaves_original_untouched() {
        let before = PressReleaseData::new(day());
        let after = before.with_field(Field::City, "Berlin");
        assert_eq!(before.city, "");
        assert_eq!(after.city, "Berlin");
        assert_eq!(after.with_field(Field::City, ""), before);
    }

    fn edits() -> impl Strategy<Value = Vec<(Field, String)>> {
        prop::collection::vec((prop::sample::select(Field::ALL.to_vec()), ".{0,16}"), 0..40)
    }

    proptest! {
        #[test]
        fn each_field_holds_its_last_edit(edits in edits()) {
            let start = PressReleaseData::new(day());
            let data = edits
                .iter()
                .fold(start.clone(), |data, (field, value)| data.with_field(*field, value.as_str()));

            for field in Field::ALL {
                let expected = edits
                    .iter()
                    .rev()
                    .find(|(f, _)| *f == field)
                    .map_or(start.get(field), |(_, v)| v.as_str());
                prop_assert_eq!(data.get(field), expected, "{:?}", field);
            }
        }
    }

    #[test]
    fn any_string_is_accepted() {
        let data = PressReleaseData::new(day())
            .with_field(Field::ContactEmail, "not an email")
            .with_field(Field::Date, "gestern");
        assert_eq!(data.contact_email, "not an email");
        assert_eq!(data.parsed_date(), None);
    }

    #[test]
    fn generator_targets() {
        assert_eq!(GeneratorType::Headline.target_field(), Field::Headline);
        assert_eq!(GeneratorType::Improve.target_field(), Field::Body);
        assert_eq!(GeneratorType::About.target_field(), Field::AboutCompany);
        assert!(!GeneratorType::Improve.needs_instruction());
    }

    #[test]
    fn serializes_with_camel_case_names() {
        let json = serde_json::to_value(PressReleaseData::new(day())).unwrap();
        assert!(json.get("aboutCompany").is_some());
        assert_eq!(
            serde_json::to_value(GeneratorType::Improve).unwrap(),
            serde_json::json!("IMPROVE")
        );
    }
}
