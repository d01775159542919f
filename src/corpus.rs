//! The book's full text as one immutable string.
//!
//! A [`Corpus`] is built once before the server accepts traffic and shared
//! read-only afterwards. Paragraphs are not stored; they are split out of
//! the string on every query.

use anyhow::Result;
use tracing::{debug, info};

use crate::sources::DocumentSource;

/// Separator between paragraphs (a blank line).
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    text: String,
    documents: usize,
}

impl Corpus {
    /// Concatenate documents in order, each followed by a newline.
    pub fn from_documents<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        let mut count = 0;
        for doc in documents {
            text.push_str(doc.as_ref());
            text.push('\n');
            count += 1;
        }
        Self {
            text,
            documents: count,
        }
    }

    /// Scan each source in turn and concatenate everything it returns.
    pub async fn load(sources: &[Box<dyn DocumentSource>]) -> Result<Self> {
        let mut bodies = Vec::new();
        for source in sources {
            let items = source.scan().await?;
            debug!("Source '{}' returned {} documents", source.name(), items.len());
            bodies.extend(items.into_iter().map(|item| item.body));
        }

        let corpus = Self::from_documents(bodies);
        info!(
            "Loaded {} characters of book content from {} documents",
            corpus.char_count(),
            corpus.document_count()
        );
        Ok(corpus)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn document_count(&self) -> usize {
        self.documents
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Split on blank lines. An empty corpus yields a single empty paragraph.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.text.split(PARAGRAPH_SEPARATOR)
    }
}
