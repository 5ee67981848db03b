// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Editor pane — the form for all ten fields, the AI-assist panels and the
// PDF download button.

use dioxus::prelude::*;

use prgenius_core::{Field, GeneratorType};
use prgenius_editor::{EditorSession, run_assist, run_export};

use crate::services::app_services::AppServices;
use crate::state::SessionSignal;

const SECTION: &str = "display: flex; flex-direction: column; gap: 16px; padding-bottom: 24px; border-bottom: 1px solid #f3f4f6;";
const SECTION_TITLE: &str = "margin: 0; font-size: 13px; font-weight: 700; color: #9ca3af; text-transform: uppercase; letter-spacing: 0.05em;";
const LABEL: &str = "display: block; font-size: 14px; font-weight: 500; color: #374151; margin-bottom: 4px;";
const INPUT: &str = "width: 100%; box-sizing: border-box; padding: 8px; border: 1px solid #d1d5db; border-radius: 6px; font-size: 14px;";
const GRID: &str = "display: grid; grid-template-columns: 1fr 1fr; gap: 16px;";
const LINK_BUTTON: &str = "background: none; border: none; padding: 0; margin-top: 4px; font-size: 12px; font-weight: 500; color: #9333ea; cursor: pointer;";

#[component]
pub fn EditorForm() -> Element {
    let session = use_context::<Signal<EditorSession>>();
    let svc = use_context::<AppServices>();

    let exporting = session.read().is_exporting();
    let improving = session.read().assist_state().is_pending(GeneratorType::Improve);
    let can_improve = session.read().can_improve();
    let last_export = session
        .read()
        .last_export()
        .map(|p| p.display().to_string());

    rsx! {
        div { style: "height: 100%; display: flex; flex-direction: column; background: white; border-right: 1px solid #e5e7eb;",
            div { style: "flex: 1; overflow-y: auto; padding: 24px; display: flex; flex-direction: column; gap: 24px;",

                // Header with download
                div { style: "display: flex; justify-content: space-between; align-items: center;",
                    h2 { style: "margin: 0; font-size: 20px; color: #1f2937;", "Editor" }
                    button {
                        style: "padding: 8px 16px; border: none; border-radius: 8px; background: #2563eb; color: white; font-weight: 500; cursor: pointer;",
                        disabled: exporting,
                        onclick: {
                            let svc = svc.clone();
                            move |_| {
                                let svc = svc.clone();
                                spawn(async move {
                                    let sink = svc.sink();
                                    let outcome = run_export(&SessionSignal(session), &svc.pipeline(), sink.as_ref()).await;
                                    tracing::debug!(?outcome, "download finished");
                                });
                            }
                        },
                        if exporting { "Erstelle PDF..." } else { "PDF herunterladen" }
                    }
                }
                if let Some(path) = last_export {
                    p { style: "margin: -16px 0 0; font-size: 12px; color: #6b7280; text-align: right;",
                        "Gespeichert unter {path}"
                    }
                }

                // Kopfzeile
                section { style: SECTION,
                    h3 { style: SECTION_TITLE, "Kopfzeile" }
                    div {
                        FieldInput { field: Field::Headline, input_type: "text" }
                        AssistPanel { kind: GeneratorType::Headline }
                    }
                    FieldInput { field: Field::Subheadline, input_type: "text" }
                    div { style: GRID,
                        FieldInput { field: Field::City, input_type: "text" }
                        FieldInput { field: Field::Date, input_type: "date" }
                    }
                }

                // Inhalt
                section { style: SECTION,
                    div { style: "display: flex; justify-content: space-between; align-items: flex-end;",
                        h3 { style: SECTION_TITLE, "Inhalt" }
                        button {
                            style: "background: none; border: none; padding: 0; font-size: 12px; font-weight: 500; color: #2563eb; cursor: pointer;",
                            disabled: !can_improve,
                            onclick: {
                                let svc = svc.clone();
                                move |_| {
                                    let generator = svc.generator();
                                    spawn(async move {
                                        run_assist(&SessionSignal(session), generator.as_ref(), GeneratorType::Improve).await;
                                    });
                                }
                            },
                            if improving { "Verbessere..." } else { "Text verbessern" }
                        }
                    }
                    div {
                        FieldArea { field: Field::Body, rows: 12 }
                        AssistPanel { kind: GeneratorType::Body }
                    }
                }

                // Details & Kontakt
                section { style: "display: flex; flex-direction: column; gap: 16px;",
                    h3 { style: SECTION_TITLE, "Details & Kontakt" }
                    div {
                        FieldArea { field: Field::AboutCompany, rows: 4 }
                        AssistPanel { kind: GeneratorType::About }
                    }
                    div { style: GRID,
                        FieldInput { field: Field::ContactName, input_type: "text" }
                        FieldInput { field: Field::ContactEmail, input_type: "email" }
                        FieldInput { field: Field::ContactPhone, input_type: "tel" }
                        FieldInput { field: Field::Website, input_type: "text" }
                    }
                }
            }

            div { style: "padding: 16px; background: #f9fafb; border-top: 1px solid #e5e7eb; font-size: 12px; color: #6b7280; text-align: center;",
                "Powered by Gemini AI • PR-Genius"
            }
        }
    }
}

/// Single-line input bound to one field.
#[component]
fn FieldInput(field: Field, input_type: &'static str) -> Element {
    let mut session = use_context::<Signal<EditorSession>>();
    let value = session.read().document().get(field).to_string();

    rsx! {
        div {
            label { style: LABEL, "{field.label()}" }
            input {
                r#type: input_type,
                style: INPUT,
                placeholder: field.hint(),
                value: "{value}",
                oninput: move |evt| session.write().edit(field, evt.value()),
            }
        }
    }
}

/// Multi-line input bound to one field.
#[component]
fn FieldArea(field: Field, rows: u32) -> Element {
    let mut session = use_context::<Signal<EditorSession>>();
    let value = session.read().document().get(field).to_string();

    rsx! {
        div {
            label { style: LABEL, "{field.label()}" }
            textarea {
                style: "{INPUT} resize: vertical; font-family: inherit;",
                rows: "{rows}",
                placeholder: field.hint(),
                value: "{value}",
                oninput: move |evt| session.write().edit(field, evt.value()),
            }
        }
    }
}

/// Collapsible instruction panel for one assist operation.  Only one panel
/// is open at a time; the instruction text is shared between them.
#[component]
fn AssistPanel(kind: GeneratorType) -> Element {
    let mut session = use_context::<Signal<EditorSession>>();
    let svc = use_context::<AppServices>();

    let (open, instruction, can_generate, pending) = {
        let s = session.read();
        (
            s.open_panel_kind() == Some(kind),
            s.instruction().to_string(),
            s.can_generate(kind),
            s.assist_state().is_pending(kind),
        )
    };

    let generate = move || {
        let generator = svc.generator();
        spawn(async move {
            run_assist(&SessionSignal(session), generator.as_ref(), kind).await;
        });
    };

    if !open {
        return rsx! {
            button {
                style: LINK_BUTTON,
                onclick: move |_| session.write().open_panel(kind),
                "KI-Assistent nutzen"
            }
        };
    }

    rsx! {
        div { style: "margin-top: 8px; padding: 12px; background: #faf5ff; border: 1px solid #f3e8ff; border-radius: 8px;",
            label { style: "display: block; font-size: 12px; font-weight: 600; color: #6b21a8; margin-bottom: 4px;",
                "KI-Instruktion:"
            }
            div { style: "display: flex; gap: 8px;",
                input {
                    r#type: "text",
                    style: "flex: 1; padding: 4px 8px; border: 1px solid #e9d5ff; border-radius: 4px; font-size: 14px;",
                    placeholder: kind.instruction_hint(),
                    value: "{instruction}",
                    oninput: move |evt| session.write().set_instruction(evt.value()),
                    onkeydown: {
                        let generate = generate.clone();
                        move |evt: KeyboardEvent| {
                            if evt.key() == Key::Enter {
                                generate();
                            }
                        }
                    },
                }
                button {
                    style: "padding: 4px 12px; border: none; border-radius: 4px; background: #9333ea; color: white; font-size: 14px; font-weight: 500; cursor: pointer;",
                    disabled: !can_generate,
                    onclick: move |_| generate(),
                    if pending { "Generiere..." } else { "Generieren" }
                }
            }
            button {
                style: "background: none; border: none; padding: 0; margin-top: 8px; font-size: 12px; color: #9ca3af; text-decoration: underline; cursor: pointer;",
                onclick: move |_| session.write().close_panel(),
                "Abbrechen"
            }
        }
    }
}
