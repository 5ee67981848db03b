// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Preview projection — the press release as a printable document.
//
// `PreviewDocument::project` is a pure function of the record and the
// current date.  Both the on-screen preview and the rasterizer consume the
// same block list, so what gets exported is what the user sees.

use chrono::NaiveDate;
use prgenius_core::{PaperSize, PressReleaseData};

use crate::date::format_long_de;

/// Identifier of the capture region that export rasterizes.
pub const CAPTURE_REGION_ID: &str = "print-area";

pub const MASTHEAD: &str = "Pressemitteilung";
pub const HEADLINE_PLACEHOLDER: &str = "Hier steht Ihre Schlagzeile";
pub const CITY_PLACEHOLDER: &str = "ORT";
pub const BODY_PLACEHOLDER: &str = "Hier erscheint der Text Ihrer Pressemitteilung. Geben Sie links Ihre Inhalte ein oder nutzen Sie die KI-Funktionen, um einen Entwurf zu erstellen.";
pub const ABOUT_HEADING: &str = "Über das Unternehmen";
pub const CONTACT_HEADING: &str = "Pressekontakt";
pub const CONTACT_NAME_PLACEHOLDER: &str = "Ansprechpartner";
pub const CONTACT_EMAIL_PLACEHOLDER: &str = "email@beispiel.de";
pub const CONTACT_PHONE_PLACEHOLDER: &str = "+49 123 456789";
pub const WEBSITE_PLACEHOLDER: &str = "www.beispiel.de";
pub const END_MARK: &str = "###";

/// Physical page the preview is laid out on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f32,
    /// The page grows past this when content is longer.
    pub min_height_mm: f32,
    pub margin_mm: f32,
}

impl PageGeometry {
    pub const A4: Self = Self {
        width_mm: 210.0,
        min_height_mm: 297.0,
        margin_mm: 20.0,
    };

    /// Full-page geometry for `paper`, with the standard 20 mm margin.
    pub fn for_paper(paper: PaperSize) -> Self {
        Self {
            width_mm: paper.width_mm(),
            min_height_mm: paper.height_mm(),
            ..Self::A4
        }
    }
}

/// A piece of shown text, flagged when it is a stand-in for an empty field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shown {
    pub text: String,
    pub placeholder: bool,
}

impl Shown {
    fn or_placeholder(value: &str, placeholder: &str) -> Self {
        if value.is_empty() {
            Self {
                text: placeholder.to_string(),
                placeholder: true,
            }
        } else {
            Self {
                text: value.to_string(),
                placeholder: false,
            }
        }
    }
}

/// One visual section of the document, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Masthead(String),
    Headline(Shown),
    Subheadline(String),
    Dateline { city: Shown, date: String },
    /// Line breaks and spacing are significant.
    Body(Shown),
    About { heading: String, text: String },
    Contact {
        heading: String,
        name: Shown,
        email: Shown,
        phone: Shown,
        website: Shown,
    },
    EndMark(String),
}

/// The rendered press release.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewDocument {
    pub region_id: &'static str,
    pub page: PageGeometry,
    pub blocks: Vec<Block>,
}

impl PreviewDocument {
    /// Project `data` into document blocks.  `today` stands in for a
    /// missing or unreadable `date` field.
    pub fn project(data: &PressReleaseData, today: NaiveDate) -> Self {
        let mut blocks = Vec::with_capacity(8);

        blocks.push(Block::Masthead(MASTHEAD.to_string()));
        blocks.push(Block::Headline(Shown::or_placeholder(
            &data.headline,
            HEADLINE_PLACEHOLDER,
        )));
        if !data.subheadline.is_empty() {
            blocks.push(Block::Subheadline(data.subheadline.clone()));
        }

        let city = Shown::or_placeholder(&data.city.to_uppercase(), CITY_PLACEHOLDER);
        let date = format_long_de(data.parsed_date().unwrap_or(today));
        blocks.push(Block::Dateline { city, date });

        blocks.push(Block::Body(Shown::or_placeholder(&data.body, BODY_PLACEHOLDER)));

        if !data.about_company.is_empty() {
            blocks.push(Block::About {
                heading: ABOUT_HEADING.to_string(),
                text: data.about_company.clone(),
            });
        }

        blocks.push(Block::Contact {
            heading: CONTACT_HEADING.to_string(),
            name: Shown::or_placeholder(&data.contact_name, CONTACT_NAME_PLACEHOLDER),
            email: Shown::or_placeholder(&data.contact_email, CONTACT_EMAIL_PLACEHOLDER),
            phone: Shown::or_placeholder(&data.contact_phone, CONTACT_PHONE_PLACEHOLDER),
            website: Shown::or_placeholder(&data.website, WEBSITE_PLACEHOLDER),
        });
        blocks.push(Block::EndMark(END_MARK.to_string()));

        Self {
            region_id: CAPTURE_REGION_ID,
            page: PageGeometry::A4,
            blocks,
        }
    }

    /// The same document laid out on `paper`.
    #[must_use]
    pub fn on_paper(mut self, paper: PaperSize) -> Self {
        self.page = PageGeometry::for_paper(paper);
        self
    }

    /// Project using the local calendar date as fallback.
    pub fn project_today(data: &PressReleaseData) -> Self {
        Self::project(data, chrono::Local::now().date_naive())
    }

    /// The dateline as one string, e.g. `BERLIN, 18. Oktober 2026`.
    pub fn dateline(&self) -> Option<String> {
        self.blocks.iter().find_map(|b| match b {
            Block::Dateline { city, date } => Some(format!("{}, {date}", city.text)),
            _ => None,
        })
    }
}
