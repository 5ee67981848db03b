// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Reactive session state for the Dioxus UI.
//
// The one `EditorSession` lives in a `Signal` provided at the root.  Both
// panes read it; every write notifies both.

use dioxus::prelude::*;
use prgenius_editor::{EditorSession, SessionAccess};

/// The session signal, usable by the async workflows.
#[derive(Clone, Copy)]
pub struct SessionSignal(pub Signal<EditorSession>);

impl SessionAccess for SessionSignal {
    fn with<R>(&self, f: impl FnOnce(&mut EditorSession) -> R) -> R {
        let mut signal = self.0;
        let mut session = signal.write();
        f(&mut *session)
    }
}
