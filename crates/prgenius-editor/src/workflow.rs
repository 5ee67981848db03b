// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Async workflows — run one assist or one export against a session.
//
// Both workflows touch the session exactly twice: once to begin (which may
// decline) and once to finish.  After a successful begin the request is held
// by a `Settle` guard; if the future is dropped or unwinds before finishing,
// the guard settles the request as failed so the busy flag is released.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use prgenius_ai::TextGenerator;
use prgenius_core::GeneratorType;
use prgenius_core::error::{PrGeniusError, Result};
use prgenius_document::ExportPipeline;
use tracing::{instrument, warn};

use crate::session::{EditorSession, ExportJob};
use crate::sink::DownloadSink;

/// Scoped mutable access to a session.
///
/// The closure must not await; implementations may hold a lock or a UI
/// signal borrow for its duration.
pub trait SessionAccess {
    fn with<R>(&self, f: impl FnOnce(&mut EditorSession) -> R) -> R;
}

impl SessionAccess for Arc<Mutex<EditorSession>> {
    fn with<R>(&self, f: impl FnOnce(&mut EditorSession) -> R) -> R {
        let mut guard = self.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut *guard)
    }
}

/// A request begun on the session and not yet finished.
#[derive(Debug, Clone, Copy)]
enum InFlight {
    Assist(GeneratorType),
    Export,
}

/// Settles an in-flight request as failed when dropped unfinished.
struct Settle<'a, S: SessionAccess> {
    session: &'a S,
    pending: Option<InFlight>,
}

impl<'a, S: SessionAccess> Settle<'a, S> {
    fn new(session: &'a S, pending: InFlight) -> Self {
        Self {
            session,
            pending: Some(pending),
        }
    }

    /// Finish the request with `f`; the guard is spent.
    fn finish<R>(mut self, f: impl FnOnce(&mut EditorSession) -> R) -> R {
        self.pending = None;
        self.session.with(f)
    }
}

impl<S: SessionAccess> Drop for Settle<'_, S> {
    fn drop(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        warn!(?pending, "workflow abandoned before finishing, releasing its guard");
        let abandoned = || PrGeniusError::TaskFailed("request abandoned".into());
        self.session.with(|s| match pending {
            InFlight::Assist(kind) => s.finish_assist(kind, Err(abandoned())),
            InFlight::Export => s.finish_export(Err(abandoned())),
        });
    }
}

/// How an assist attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistOutcome {
    /// Guard or missing input declined the request; nothing was sent.
    Skipped,
    Applied,
    Failed,
}

/// How an export attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Capture region missing or another export running.
    Skipped,
    Saved(PathBuf),
    /// The user closed the save dialog.
    Cancelled,
    Failed,
}

/// Run the assist of `kind` to completion.
#[instrument(skip(session, generator))]
pub async fn run_assist<S: SessionAccess>(
    session: &S,
    generator: &dyn TextGenerator,
    kind: GeneratorType,
) -> AssistOutcome {
    let Some(request) = session.with(|s| s.begin_assist(kind)) else {
        return AssistOutcome::Skipped;
    };
    let settle = Settle::new(session, InFlight::Assist(kind));

    let result = generator.generate(&request).await;
    let outcome = if result.is_ok() {
        AssistOutcome::Applied
    } else {
        AssistOutcome::Failed
    };
    settle.finish(|s| s.finish_assist(kind, result));
    outcome
}

/// Capture the preview, encode it and hand it to `sink`.
///
/// Rasterizing and PDF encoding are CPU-bound and run on the blocking pool.
#[instrument(skip_all)]
pub async fn run_export<S: SessionAccess>(
    session: &S,
    pipeline: &ExportPipeline,
    sink: &dyn DownloadSink,
) -> ExportOutcome {
    let Some(job) = session.with(|s| s.begin_export()) else {
        return ExportOutcome::Skipped;
    };
    let settle = Settle::new(session, InFlight::Export);

    let result = render_and_save(pipeline.clone(), job, sink).await;
    let outcome = match &result {
        Ok(Some(path)) => ExportOutcome::Saved(path.clone()),
        Ok(None) => ExportOutcome::Cancelled,
        Err(_) => ExportOutcome::Failed,
    };
    settle.finish(|s| s.finish_export(result));
    outcome
}

async fn render_and_save(
    pipeline: ExportPipeline,
    job: ExportJob,
    sink: &dyn DownloadSink,
) -> Result<Option<PathBuf>> {
    let ExportJob {
        preview,
        filename,
        title,
    } = job;

    let bytes = tokio::task::spawn_blocking(move || pipeline.render(&preview, &title))
        .await
        .map_err(|e| PrGeniusError::TaskFailed(e.to_string()))??;

    sink.save(&filename, bytes).await
}
