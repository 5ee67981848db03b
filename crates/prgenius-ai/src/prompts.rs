// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixed German prompt templates, one per generator type.

use prgenius_core::types::{AiRequest, GeneratorType};

/// Persona sent as the system instruction with every request.
pub const SYSTEM_INSTRUCTION: &str =
    "Du bist ein erfahrener PR-Berater und Journalist. Du schreibst perfektes Deutsch.";

/// Build the user prompt for a request.
///
/// `Headline`, `Body` and `About` interpolate the instruction (`context`);
/// `Improve` interpolates the text to be reworked (`current_text`).
pub fn build_prompt(request: &AiRequest) -> String {
    let context = request.context.as_str();
    match request.kind {
        GeneratorType::Headline => format!(
            "Erstelle 3 knackige, professionelle Schlagzeilen für eine Pressemitteilung über folgendes Thema: \"{context}\". Gib nur die Schlagzeilen zurück, getrennt durch einen Zeilenumbruch, ohne Aufzählungszeichen."
        ),
        GeneratorType::Body => format!(
            "Schreibe den Haupttext einer professionellen Pressemitteilung über folgendes Thema: \"{context}\". Der Stil soll sachlich, journalistisch und informativ sein. Schreibe ca. 200-300 Wörter. Verwende Absätze."
        ),
        GeneratorType::About => format!(
            "Schreibe einen kurzen \"Über uns\" (Boilerplate) Text für ein Unternehmen basierend auf diesen Stichworten: \"{context}\"."
        ),
        GeneratorType::Improve => {
            let current = request.current_text.as_deref().unwrap_or_default();
            format!(
                "Verbessere den folgenden Text für eine Pressemitteilung. Mach ihn professioneller, korrigiere Grammatik und Ausdruck, aber behalte die Kernaussage bei:\n\n\"{current}\""
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headline_prompt_quotes_the_topic() {
        let prompt = build_prompt(&AiRequest::new(GeneratorType::Headline, "Neue Solaranlage"));
        assert!(prompt.contains("\"Neue Solaranlage\""));
        assert!(prompt.contains("3 knackige"));
    }

    #[test]
    fn improve_prompt_uses_current_text_not_context() {
        let request =
            AiRequest::new(GeneratorType::Improve, "improve").with_current_text("Wir sind toll.");
        let prompt = build_prompt(&request);
        assert!(prompt.ends_with("\n\n\"Wir sind toll.\""));
        assert!(!prompt.contains("improve"));
    }

    #[test]
    fn about_prompt_mentions_boilerplate() {
        let prompt = build_prompt(&AiRequest::new(GeneratorType::About, "Bäckerei, Hamburg"));
        assert!(prompt.contains("Boilerplate"));
        assert!(prompt.contains("Bäckerei, Hamburg"));
    }
}
