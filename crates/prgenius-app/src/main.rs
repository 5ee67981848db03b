// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PR-Genius — press release editor with AI drafting and PDF export
//
// Entry point. Initialises logging, backend services and the editor session,
// and launches the Dioxus UI.

mod pages;
mod services;
mod state;

use dioxus::prelude::*;
use prgenius_editor::EditorSession;

use pages::editor::EditorForm;
use pages::notice::NoticeModal;
use pages::preview::PreviewPane;
use services::app_services::AppServices;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("PR-Genius starting");

    dioxus::launch(app);
}

/// Root component: editor on the left, preview on the right.
fn app() -> Element {
    let svc = use_hook(|| match AppServices::init() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "config could not be written, running on defaults");
            AppServices::fallback()
        }
    });

    use_context_provider(|| svc.clone());
    use_context_provider(|| Signal::new(EditorSession::default()));

    rsx! {
        div { style: "display: flex; height: 100vh; overflow: hidden; background: #f3f4f6; font-family: system-ui, -apple-system, sans-serif;",
            div { style: "width: 40%; min-width: 360px; height: 100%; box-shadow: 0 10px 15px rgba(0,0,0,0.1); position: relative; z-index: 10;",
                EditorForm {}
            }
            div { style: "flex: 1; height: 100%;",
                PreviewPane {}
            }
            NoticeModal {}
        }
    }
}
