// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Preview pane — the press release as it will be printed.
//
// Renders the same block list the rasterizer paints, inside the capture
// region.  Mounting the region enables export; dropping the pane disables
// it again.

use dioxus::prelude::*;

use prgenius_document::{Block, PreviewDocument};
use prgenius_editor::EditorSession;

use crate::services::app_services::AppServices;

const SERIF: &str = "font-family: Georgia, 'Times New Roman', serif;";
const SANS: &str = "font-family: system-ui, -apple-system, sans-serif;";

#[component]
pub fn PreviewPane() -> Element {
    let mut session = use_context::<Signal<EditorSession>>();
    let svc = use_context::<AppServices>();
    let doc = PreviewDocument::project_today(session.read().document())
        .on_paper(svc.pipeline().paper_size());

    use_drop(move || {
        if let Ok(mut s) = session.try_write() {
            s.unmount_capture();
        }
    });

    let page = format!(
        "width: {}mm; min-height: {}mm; padding: {}mm; box-sizing: border-box; background: white; box-shadow: 0 10px 15px rgba(0,0,0,0.1); display: flex; flex-direction: column;",
        doc.page.width_mm, doc.page.min_height_mm, doc.page.margin_mm
    );

    rsx! {
        div { style: "height: 100%; overflow-y: auto; display: flex; justify-content: center; padding: 16px; background: #f3f4f6;",
            div {
                id: doc.region_id,
                style: "{page}",
                onmounted: move |_| session.write().mount_capture(),
                {doc.blocks.iter().map(render_block)}
            }
        }
    }
}

fn render_block(block: &Block) -> Element {
    match block {
        Block::Masthead(text) => rsx! {
            h1 { style: "{SANS} margin: 0 0 8px; font-size: 14px; font-weight: 700; text-transform: uppercase; letter-spacing: 0.1em; color: #6b7280;",
                "{text}"
            }
        },
        Block::Headline(shown) => rsx! {
            h2 { style: "{SERIF} margin: 0 0 8px; font-size: 30px; font-weight: 700; line-height: 1.25; color: #111827;",
                "{shown.text}"
            }
        },
        Block::Subheadline(text) => rsx! {
            h3 { style: "{SERIF} margin: 0 0 8px; font-size: 20px; font-weight: 400; color: #4b5563;",
                "{text}"
            }
        },
        Block::Dateline { city, date } => rsx! {
            div { style: "{SANS} border-top: 4px solid black; padding-top: 24px; margin: 16px 0 24px; font-size: 14px; font-weight: 700; color: #374151;",
                "{city.text}, {date}"
            }
        },
        Block::Body(shown) => rsx! {
            div { style: "{SERIF} margin-bottom: 40px; font-size: 16px; line-height: 1.625; color: #1f2937; white-space: pre-wrap; text-align: justify;",
                "{shown.text}"
            }
        },
        Block::About { heading, text } => rsx! {
            div { style: "margin-bottom: 32px; padding: 24px; background: #f9fafb; border-radius: 6px;",
                h4 { style: "{SANS} margin: 0 0 8px; font-size: 14px; font-weight: 700; text-transform: uppercase; color: #111827;",
                    "{heading}"
                }
                p { style: "{SANS} margin: 0; font-size: 14px; line-height: 1.625; color: #374151; white-space: pre-wrap;",
                    "{text}"
                }
            }
        },
        Block::Contact {
            heading,
            name,
            email,
            phone,
            website,
        } => rsx! {
            div { style: "{SANS} margin-top: auto; padding-top: 24px; border-top: 1px solid #d1d5db;",
                h4 { style: "margin: 0 0 16px; font-size: 14px; font-weight: 700; text-transform: uppercase; color: #111827;",
                    "{heading}"
                }
                div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 16px; font-size: 14px; color: #374151;",
                    div {
                        p { style: "margin: 0; font-weight: 600;", "{name.text}" }
                        p { style: "margin: 0;", "{email.text}" }
                    }
                    div { style: "text-align: right;",
                        p { style: "margin: 0;", "{phone.text}" }
                        p { style: "margin: 0; color: #2563eb;", "{website.text}" }
                    }
                }
            }
        },
        Block::EndMark(mark) => rsx! {
            div { style: "{SANS} margin-top: 32px; text-align: center; font-weight: 700; color: #9ca3af; user-select: none;",
                "{mark}"
            }
        },
    }
}
