//! Question answering over the corpus.
//!
//! An [`Assistant`] owns an immutable [`Corpus`] built before any question
//! arrives. Answering never mutates it, so one instance behind an `Arc` is
//! shared by every request.
//!
//! # Pipeline
//!
//! ```text
//! question ──▶ intent rules ──match──▶ canned reply
//!                   │
//!                   └─none──▶ rank paragraphs ──▶ top N joined │ fallback
//! ```

use std::sync::Arc;
use tracing::debug;

use crate::config::Config;
use crate::connector_fs::FilesystemSource;
use crate::corpus::{Corpus, PARAGRAPH_SEPARATOR};
use crate::intents::{self, Intent, Rule, DEFAULT_RULES};
use crate::models::{Answer, AnswerKind};
use crate::scoring::{rank, ScoringParams};
use crate::sources::DocumentSource;

/// Returned when no paragraph scores above zero.
pub const FALLBACK_RESPONSE: &str = "I couldn't find relevant content in the book for your question. Please try rephrasing or ask about a specific topic like ROS 2, Gazebo, Isaac, or Vision-Language-Action.";

pub struct Assistant {
    corpus: Arc<Corpus>,
    rules: &'static [Rule],
    params: ScoringParams,
}

impl Assistant {
    pub fn new(corpus: Arc<Corpus>, params: ScoringParams) -> Self {
        Self {
            corpus,
            rules: DEFAULT_RULES,
            params,
        }
    }

    /// Replace the small-talk rule table.
    pub fn with_rules(mut self, rules: &'static [Rule]) -> Self {
        self.rules = rules;
        self
    }

    /// Build the corpus from the configured filesystem source.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let sources: Vec<Box<dyn DocumentSource>> =
            vec![Box::new(FilesystemSource::new(config.corpus.clone()))];
        let corpus = Corpus::load(&sources).await?;
        Ok(Self::new(
            Arc::new(corpus),
            ScoringParams::from(&config.retrieval),
        ))
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Answer a question from the whole book.
    pub fn answer(&self, question: &str) -> String {
        self.respond(question).text
    }

    /// Like [`answer`](Self::answer), also reporting which path answered.
    pub fn respond(&self, question: &str) -> Answer {
        self.respond_from(question, &self.corpus)
    }

    /// Answer using only `selected_text` (the passage the reader highlighted)
    /// as the corpus.
    pub fn answer_within(&self, question: &str, selected_text: &str) -> Answer {
        let selection = Corpus::from_documents([selected_text]);
        self.respond_from(question, &selection)
    }

    fn respond_from(&self, question: &str, corpus: &Corpus) -> Answer {
        if let Some(rule) = intents::classify(self.rules, question) {
            debug!("Question matched {:?} rule", rule.intent);
            return Answer {
                text: rule.response.to_string(),
                kind: match rule.intent {
                    Intent::Greeting => AnswerKind::Greeting,
                    Intent::Help => AnswerKind::Help,
                    Intent::Thanks => AnswerKind::Thanks,
                },
            };
        }

        let top = rank(corpus, question, &self.params);
        if top.is_empty() {
            debug!("No paragraph matched; returning fallback");
            return Answer {
                text: FALLBACK_RESPONSE.to_string(),
                kind: AnswerKind::Fallback,
            };
        }

        debug!(
            "Returning {} paragraphs (best score {})",
            top.len(),
            top[0].score
        );
        let text = top
            .iter()
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join(PARAGRAPH_SEPARATOR);

        Answer {
            text,
            kind: AnswerKind::Content {
                paragraphs: top.len(),
            },
        }
    }
}
