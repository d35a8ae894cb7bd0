//! Prompt Templating
//!
//! One fixed template per interview phase, plus the transcript evaluation
//! template. Templates are plain text with `{name}` placeholders and are
//! loaded from disk at startup; the library validates at construction that
//! every required template is present, so a missing file is a startup error
//! rather than a mid-interview surprise.

use std::collections::HashMap;

use crate::difficulty::Difficulty;
use crate::session::Exchange;

/// Template keys the library requires, matching the prompt file stems.
pub const REQUIRED_TEMPLATES: [&str; 5] = [
    "welcome",
    "communication",
    "topic_question",
    "conclusion",
    "evaluation",
];

/// Rendered in place of a prior question/answer when none exists yet, so
/// the model's missing-answer feedback variant applies.
const ABSENT: &str = "(none)";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("missing prompt template: '{0}'")]
    MissingTemplate(String),
}

/// Holds the five phase templates and renders them with session state.
#[derive(Debug, Clone)]
pub struct PromptLibrary {
    templates: HashMap<String, String>,
}

impl PromptLibrary {
    /// Builds a library from template texts keyed by name.
    ///
    /// Extra keys are tolerated; every key in [`REQUIRED_TEMPLATES`] must be
    /// present.
    pub fn new(templates: HashMap<String, String>) -> Result<Self, PromptError> {
        for key in REQUIRED_TEMPLATES {
            if !templates.contains_key(key) {
                return Err(PromptError::MissingTemplate(key.to_string()));
            }
        }
        Ok(Self { templates })
    }

    fn render(&self, key: &str, fields: &[(&str, &str)]) -> String {
        // Keys are validated in `new`, so the lookup cannot fail here.
        let mut text = self.templates[key].clone();
        for (name, value) in fields {
            text = text.replace(&format!("{{{}}}", name), value);
        }
        text
    }

    /// Welcome prompt: one open-ended background question, no prior context.
    pub fn welcome(&self, role: &str) -> String {
        self.render("welcome", &[("role", role)])
    }

    /// Communication-check prompt: feedback on the prior answer, then a
    /// rapport question.
    pub fn communication(&self, role: &str, prior: Option<&Exchange>) -> String {
        let (question, answer) = prior_fields(prior);
        self.render(
            "communication",
            &[
                ("role", role),
                ("prior_question", &question),
                ("prior_answer", &answer),
            ],
        )
    }

    /// Topic-question prompt at the requested difficulty.
    pub fn topic_question(
        &self,
        role: &str,
        topic: &str,
        difficulty: Difficulty,
        prior: Option<&Exchange>,
    ) -> String {
        let (question, answer) = prior_fields(prior);
        self.render(
            "topic_question",
            &[
                ("role", role),
                ("topic", topic),
                ("difficulty", &difficulty.to_string()),
                ("prior_question", &question),
                ("prior_answer", &answer),
            ],
        )
    }

    /// Conclusion prompt: closing performance summary, no further question.
    pub fn conclusion(&self, role: &str, topics: &[String], prior: Option<&Exchange>) -> String {
        let (question, answer) = prior_fields(prior);
        self.render(
            "conclusion",
            &[
                ("role", role),
                ("topics", &topics.join(", ")),
                ("prior_question", &question),
                ("prior_answer", &answer),
            ],
        )
    }

    /// Evaluation prompt over the complete parallel transcript.
    pub fn evaluation(
        &self,
        role: &str,
        topics: &[String],
        questions: &[String],
        answers: &[String],
    ) -> String {
        self.render(
            "evaluation",
            &[
                ("role", role),
                ("topics", &topics.join(", ")),
                ("questions", &numbered(questions)),
                ("answers", &numbered(answers)),
            ],
        )
    }
}

fn prior_fields(prior: Option<&Exchange>) -> (String, String) {
    match prior {
        Some(exchange) => (exchange.question.clone(), exchange.answer.clone()),
        None => (ABSENT.to_string(), ABSENT.to_string()),
    }
}

fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}
