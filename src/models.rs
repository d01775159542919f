//! Core data types.
//!
//! These are the documents that feed the corpus and the values produced
//! while answering a question.

/// A document discovered by a [`DocumentSource`](crate::sources::DocumentSource).
#[derive(Debug, Clone)]
pub struct SourceItem {
    /// Label of the source that produced this item (e.g. `"filesystem"`).
    pub source: String,
    /// Stable identifier within the source; for files, the relative path.
    pub source_id: String,
    pub source_url: Option<String>,
    pub title: Option<String>,
    pub body: String,
}

/// A paragraph together with its relevance score for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredParagraph<'a> {
    pub text: &'a str,
    pub score: u32,
    /// Index of the paragraph within the corpus.
    pub position: usize,
}

/// Which path produced an [`Answer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    Greeting,
    Help,
    Thanks,
    /// Paragraphs from the corpus; carries how many were returned.
    Content { paragraphs: usize },
    /// Nothing scored above zero.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub kind: AnswerKind,
}
