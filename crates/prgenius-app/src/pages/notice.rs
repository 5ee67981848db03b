// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Blocking failure notice.

use dioxus::prelude::*;

use prgenius_editor::EditorSession;

/// Modal shown while the session holds a notice.  Covers both panes until
/// dismissed.
#[component]
pub fn NoticeModal() -> Element {
    let mut session = use_context::<Signal<EditorSession>>();
    let Some(notice) = session.read().notice().cloned() else {
        return rsx! {};
    };

    rsx! {
        div { style: "position: fixed; inset: 0; z-index: 50; display: flex; align-items: center; justify-content: center; background: rgba(0,0,0,0.4);",
            div {
                role: "alertdialog",
                style: "min-width: 280px; padding: 24px; border-radius: 8px; background: white; box-shadow: 0 20px 25px rgba(0,0,0,0.15);",
                p { style: "margin: 0 0 16px; font-size: 15px; color: #111827;", "{notice.message}" }
                div { style: "text-align: right;",
                    button {
                        style: "padding: 6px 16px; border: none; border-radius: 6px; background: #2563eb; color: white; cursor: pointer;",
                        onclick: move |_| session.write().dismiss_notice(),
                        "OK"
                    }
                }
            }
        }
    }
}
