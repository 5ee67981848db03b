// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PR-Genius AI — the text generation collaborator.  Turns an `AiRequest` from
// `prgenius-core` into a prompt, sends it to the Gemini API, and hands back
// plain text.

pub mod gemini;
pub mod generator;
pub mod prompts;

pub use gemini::GeminiClient;
pub use generator::TextGenerator;
