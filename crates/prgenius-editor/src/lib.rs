// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PR-Genius — Editor controller: the single session holding the press
// release, its request guards, and the async workflows driving them.

pub mod request_state;
pub mod session;
pub mod sink;
pub mod workflow;

pub use request_state::RequestState;
pub use session::{EditorSession, ExportJob, clean_headline};
pub use sink::{DirectorySink, DownloadSink};
pub use workflow::{AssistOutcome, ExportOutcome, SessionAccess, run_assist, run_export};
