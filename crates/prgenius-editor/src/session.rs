// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Editor session — the one press release being edited plus the transient
// UI state around it.
//
// Every change goes through a method on `EditorSession`.  Async work is
// split into `begin_*` (checks the guard, snapshots what the task needs)
// and `finish_*` (merges the outcome back), so no borrow of the session
// lives across an await point.

use std::path::PathBuf;

use prgenius_core::error::Result;
use prgenius_core::human_errors::{Notice, notice_for};
use prgenius_core::{AiRequest, Field, GeneratorType, PressReleaseData};
use prgenius_document::preview::MASTHEAD;
use prgenius_document::{PreviewDocument, export_filename};
use tracing::{debug, error, info, warn};

use crate::request_state::RequestState;

/// Context sent with `Improve`; the body travels as the current text.
const IMPROVE_CONTEXT: &str = "improve";

/// Everything an export task needs, captured when the export starts.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportJob {
    pub preview: PreviewDocument,
    pub filename: String,
    /// PDF document title.
    pub title: String,
}

/// State of one editing session.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSession {
    document: PressReleaseData,
    assist: RequestState<GeneratorType>,
    export: RequestState<()>,
    instruction: String,
    open_panel: Option<GeneratorType>,
    capture_mounted: bool,
    notice: Option<Notice>,
    last_export: Option<PathBuf>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(PressReleaseData::today())
    }
}

impl EditorSession {
    pub fn new(document: PressReleaseData) -> Self {
        Self {
            document,
            assist: RequestState::Idle,
            export: RequestState::Idle,
            instruction: String::new(),
            open_panel: None,
            capture_mounted: false,
            notice: None,
            last_export: None,
        }
    }

    // -- Read access ---------------------------------------------------------

    pub fn document(&self) -> &PressReleaseData {
        &self.document
    }

    pub fn assist_state(&self) -> RequestState<GeneratorType> {
        self.assist
    }

    pub fn export_state(&self) -> RequestState<()> {
        self.export
    }

    pub fn is_exporting(&self) -> bool {
        self.export.is_busy()
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn open_panel_kind(&self) -> Option<GeneratorType> {
        self.open_panel
    }

    pub fn is_capture_mounted(&self) -> bool {
        self.capture_mounted
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn last_export(&self) -> Option<&PathBuf> {
        self.last_export.as_ref()
    }

    /// Whether the Improve action is available: a body to improve and no
    /// assist in flight.
    pub fn can_improve(&self) -> bool {
        !self.document.body.is_empty() && !self.assist.is_busy()
    }

    /// Whether the Generate button of `kind`'s panel is available.
    pub fn can_generate(&self, kind: GeneratorType) -> bool {
        !self.assist.is_pending(kind) && !self.instruction.trim().is_empty()
    }

    // -- Field edits ---------------------------------------------------------

    /// Replace the record with one that differs only in `field`.
    pub fn edit(&mut self, field: Field, value: impl Into<String>) {
        self.document = self.document.with_field(field, value);
    }

    // -- Instruction panels --------------------------------------------------

    /// Expand the instruction panel of `kind`, collapsing any other.
    pub fn open_panel(&mut self, kind: GeneratorType) {
        if kind.needs_instruction() {
            self.open_panel = Some(kind);
        }
    }

    /// Collapse the open panel.  The instruction text is kept.
    pub fn close_panel(&mut self) {
        self.open_panel = None;
    }

    pub fn set_instruction(&mut self, text: impl Into<String>) {
        self.instruction = text.into();
    }

    // -- AI assist -----------------------------------------------------------

    /// Start an assist of `kind`.
    ///
    /// Returns the request to send, or `None` when nothing should happen:
    /// another assist is in flight, the instruction is blank, or (for
    /// `Improve`) there is no body yet.
    pub fn begin_assist(&mut self, kind: GeneratorType) -> Option<AiRequest> {
        if let Some(pending) = self.assist.pending() {
            debug!(%kind, %pending, "assist ignored while another is in flight");
            return None;
        }

        let request = match kind {
            GeneratorType::Improve => {
                if self.document.body.is_empty() {
                    debug!("improve ignored, body is empty");
                    return None;
                }
                AiRequest::new(kind, IMPROVE_CONTEXT).with_current_text(self.document.body.clone())
            }
            _ => {
                if self.instruction.trim().is_empty() {
                    debug!(%kind, "assist ignored, instruction is blank");
                    return None;
                }
                AiRequest::new(kind, self.instruction.clone())
            }
        };

        self.assist = RequestState::Pending(kind);
        info!(%kind, "assist started");
        Some(request)
    }

    /// Merge the outcome of the assist of `kind` into the session.
    pub fn finish_assist(&mut self, kind: GeneratorType, outcome: Result<String>) {
        if !self.assist.is_pending(kind) {
            warn!(%kind, state = ?self.assist, "assist result without matching request dropped");
            return;
        }

        match outcome {
            Ok(text) => {
                let value = match kind {
                    GeneratorType::Headline => clean_headline(&text),
                    _ => text,
                };
                self.edit(kind.target_field(), value);
                self.instruction.clear();
                self.open_panel = None;
                self.assist.settle(true);
                info!(%kind, "assist applied");
            }
            Err(e) => {
                error!(%kind, error = %e, "assist failed");
                self.notice = Some(notice_for(&e));
                self.assist.settle(false);
            }
        }
    }

    // -- Export --------------------------------------------------------------

    /// The preview pane reports that the capture region is on screen.
    pub fn mount_capture(&mut self) {
        self.capture_mounted = true;
    }

    pub fn unmount_capture(&mut self) {
        self.capture_mounted = false;
    }

    /// Start an export.  `None` when the capture region is not mounted or an
    /// export is already running.
    pub fn begin_export(&mut self) -> Option<ExportJob> {
        if !self.capture_mounted {
            warn!("export ignored, capture region is not mounted");
            return None;
        }
        if self.export.is_busy() {
            debug!("export ignored while another is in flight");
            return None;
        }

        let title = if self.document.headline.is_empty() {
            MASTHEAD.to_string()
        } else {
            self.document.headline.clone()
        };
        let job = ExportJob {
            preview: PreviewDocument::project_today(&self.document),
            filename: export_filename(&self.document.headline),
            title,
        };

        self.export = RequestState::Pending(());
        info!(filename = %job.filename, "export started");
        Some(job)
    }

    /// Record how the export ended.  `Ok(None)` means the user cancelled the
    /// save dialog.
    pub fn finish_export(&mut self, outcome: Result<Option<PathBuf>>) {
        if !self.export.is_busy() {
            warn!("export result without a running export dropped");
            return;
        }

        match outcome {
            Ok(Some(path)) => {
                info!(path = %path.display(), "export saved");
                self.last_export = Some(path);
                self.export.settle(true);
            }
            Ok(None) => {
                info!("export cancelled at the save dialog");
                self.export.settle(true);
            }
            Err(e) => {
                error!(error = %e, "export failed");
                self.notice = Some(notice_for(&e));
                self.export.settle(false);
            }
        }
    }

    // -- Notices -------------------------------------------------------------

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

/// Reduce a generated headline to a single clean line.
///
/// Keeps the first line only, drops one leading `"`, `*` or `-` together
/// with the whitespace after it, and one trailing `"` or `*`.
pub fn clean_headline(raw: &str) -> String {
    let first = raw.split('\n').next().unwrap_or_default();
    let first = match first.strip_prefix(['"', '*', '-']) {
        Some(rest) => rest.trim_start(),
        None => first,
    };
    first.strip_suffix(['"', '*']).unwrap_or(first).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use prgenius_core::PrGeniusError;
    use prgenius_core::human_errors::NoticeKind;
    use proptest::prelude::*;

    fn session() -> EditorSession {
        EditorSession::new(PressReleaseData::new(
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
        ))
    }

    proptest! {
        #[test]
        fn edits_to_different_fields_never_interfere(
            edits in prop::collection::vec(
                (prop::sample::select(Field::ALL.to_vec()), "[a-zA-Zäöü@. ]{0,12}"),
                0..40,
            )
        ) {
            let mut s = session();
            let start = s.document().clone();
            for (field, value) in &edits {
                s.edit(*field, value.as_str());
            }

            for field in Field::ALL {
                let expected = edits
                    .iter()
                    .rev()
                    .find(|(f, _)| *f == field)
                    .map_or(start.get(field), |(_, v)| v.as_str());
                prop_assert_eq!(s.document().get(field), expected, "{:?}", field);
            }
            prop_assert!(!s.assist_state().is_busy());
        }
    }

    #[test]
    fn blank_instruction_sends_nothing() {
        let mut s = session();
        let before = s.clone();
        assert!(s.begin_assist(GeneratorType::Headline).is_none());
        s.set_instruction("   ");
        assert!(s.begin_assist(GeneratorType::Body).is_none());
        assert_eq!(s.document(), before.document());
        assert_eq!(s.assist_state(), RequestState::Idle);
    }

    #[test]
    fn improve_needs_a_body() {
        let mut s = session();
        assert!(!s.can_improve());
        assert!(s.begin_assist(GeneratorType::Improve).is_none());

        s.edit(Field::Body, "Entwurf");
        assert!(s.can_improve());
        let request = s.begin_assist(GeneratorType::Improve).unwrap();
        assert_eq!(request.context, "improve");
        assert_eq!(request.current_text.as_deref(), Some("Entwurf"));
    }

    #[test]
    fn pending_assist_blocks_every_trigger() {
        let mut s = session();
        s.edit(Field::Body, "Entwurf");
        s.set_instruction("Thema");
        assert!(s.begin_assist(GeneratorType::Headline).is_some());

        assert!(s.begin_assist(GeneratorType::Headline).is_none());
        assert!(s.begin_assist(GeneratorType::About).is_none());
        assert!(s.begin_assist(GeneratorType::Improve).is_none());
        assert!(!s.can_improve());
        assert_eq!(s.assist_state(), RequestState::Pending(GeneratorType::Headline));
    }

    #[test]
    fn headline_success_keeps_first_clean_line() {
        let mut s = session();
        s.open_panel(GeneratorType::Headline);
        s.set_instruction("Produktlaunch");
        s.begin_assist(GeneratorType::Headline).unwrap();
        s.finish_assist(GeneratorType::Headline, Ok("\"Big News!\nOther idea".into()));

        assert_eq!(s.document().headline, "Big News!");
        assert_eq!(s.instruction(), "");
        assert_eq!(s.open_panel_kind(), None);
        assert_eq!(s.assist_state(), RequestState::Succeeded(GeneratorType::Headline));
    }

    #[test]
    fn body_success_replaces_verbatim() {
        let mut s = session();
        s.edit(Field::Body, "alt");
        s.set_instruction("Neuer Standort");
        s.begin_assist(GeneratorType::Body).unwrap();
        let text = "  Absatz eins.\n\n* Absatz zwei *\n";
        s.finish_assist(GeneratorType::Body, Ok(text.into()));
        assert_eq!(s.document().body, text);
    }

    #[test]
    fn about_success_fills_company_text() {
        let mut s = session();
        s.set_instruction("Bäckerei Müller");
        s.begin_assist(GeneratorType::About).unwrap();
        s.finish_assist(GeneratorType::About, Ok("Seit 1950.".into()));
        assert_eq!(s.document().about_company, "Seit 1950.");
    }

    #[test]
    fn failure_leaves_field_and_instruction_untouched() {
        let mut s = session();
        s.edit(Field::Headline, "Bleibt so");
        s.open_panel(GeneratorType::Headline);
        s.set_instruction("Thema");
        s.begin_assist(GeneratorType::Headline).unwrap();
        s.finish_assist(
            GeneratorType::Headline,
            Err(PrGeniusError::Generation("HTTP 500".into())),
        );

        assert_eq!(s.document().headline, "Bleibt so");
        assert_eq!(s.instruction(), "Thema");
        assert_eq!(s.open_panel_kind(), Some(GeneratorType::Headline));
        assert_eq!(s.assist_state(), RequestState::Failed(GeneratorType::Headline));
        assert_eq!(s.notice().unwrap().kind, NoticeKind::Generation);

        // Not busy: the same request can go out again.
        assert!(s.begin_assist(GeneratorType::Headline).is_some());
    }

    #[test]
    fn stale_result_is_dropped() {
        let mut s = session();
        s.finish_assist(GeneratorType::Body, Ok("late".into()));
        assert_eq!(s.document().body, "");
        assert_eq!(s.assist_state(), RequestState::Idle);
    }

    #[test]
    fn one_panel_at_a_time() {
        let mut s = session();
        s.open_panel(GeneratorType::Headline);
        s.open_panel(GeneratorType::About);
        assert_eq!(s.open_panel_kind(), Some(GeneratorType::About));
        s.open_panel(GeneratorType::Improve);
        assert_eq!(s.open_panel_kind(), Some(GeneratorType::About));
        s.close_panel();
        assert_eq!(s.open_panel_kind(), None);
    }

    #[test]
    fn export_needs_mounted_capture_region() {
        let mut s = session();
        assert!(s.begin_export().is_none());
        assert!(!s.is_exporting());

        s.mount_capture();
        let job = s.begin_export().unwrap();
        assert_eq!(job.filename, "Pressemitteilung.pdf");
        assert_eq!(job.title, "Pressemitteilung");
        assert_eq!(job.preview.region_id, "print-area");
    }

    #[test]
    fn export_filename_follows_headline() {
        let mut s = session();
        s.mount_capture();
        s.edit(Field::Headline, "Neues Produkt!!");
        let job = s.begin_export().unwrap();
        assert!(job.filename.starts_with("PR-Genius_"));
        assert!(job.filename.contains("Neues_Produkt__"));
        assert_eq!(job.title, "Neues Produkt!!");
    }

    #[test]
    fn second_export_while_pending_is_ignored() {
        let mut s = session();
        s.mount_capture();
        assert!(s.begin_export().is_some());
        assert!(s.begin_export().is_none());

        s.finish_export(Ok(Some(PathBuf::from("/tmp/a.pdf"))));
        assert!(!s.is_exporting());
        assert_eq!(s.last_export(), Some(&PathBuf::from("/tmp/a.pdf")));
        assert!(s.begin_export().is_some());
    }

    #[test]
    fn export_failure_sets_notice_and_clears_flag() {
        let mut s = session();
        s.mount_capture();
        s.begin_export().unwrap();
        s.finish_export(Err(PrGeniusError::Rasterize("boom".into())));

        assert!(!s.is_exporting());
        assert_eq!(s.export_state(), RequestState::Failed(()));
        assert_eq!(s.notice().unwrap().message, "Fehler beim Erstellen der PDF.");
        s.dismiss_notice();
        assert!(s.notice().is_none());
    }

    #[test]
    fn cancelled_dialog_is_not_an_error() {
        let mut s = session();
        s.mount_capture();
        s.begin_export().unwrap();
        s.finish_export(Ok(None));
        assert!(s.notice().is_none());
        assert_eq!(s.last_export(), None);
        assert_eq!(s.export_state(), RequestState::Succeeded(()));
    }

    #[test]
    fn unmounting_blocks_export() {
        let mut s = session();
        s.mount_capture();
        s.unmount_capture();
        assert!(s.begin_export().is_none());
    }

    #[test]
    fn headline_cleanup_rules() {
        assert_eq!(clean_headline("Big News!\nOther idea"), "Big News!");
        assert_eq!(clean_headline("\"Big News!\""), "Big News!");
        assert_eq!(clean_headline("**Fett**"), "*Fett*");
        assert_eq!(clean_headline("-  Punkt"), "Punkt");
        assert_eq!(clean_headline("Ohne Zeichen"), "Ohne Zeichen");
        assert_eq!(clean_headline(""), "");
        // Trailing carriage return stays: only the listed marks are stripped.
        assert_eq!(clean_headline("Zeile\r\nzwei"), "Zeile\r");
    }
}
