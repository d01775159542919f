//! Document sources that feed the corpus.
//!
//! A [`DocumentSource`] produces the raw text of the book. The filesystem
//! implementation lives in [`connector_fs`](crate::connector_fs); a
//! [`StaticSource`] serves documents held in memory.

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Config;
use crate::connector_fs::FilesystemSource;
use crate::models::SourceItem;

/// Anything that can hand over an ordered list of documents.
///
/// A source that finds nothing returns an empty list rather than an error;
/// errors are reserved for conditions the operator has to fix.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Short label used in logs and `bookbot sources` output.
    fn name(&self) -> &str;

    /// Return every document in load order.
    async fn scan(&self) -> Result<Vec<SourceItem>>;
}

/// Documents supplied directly by the caller.
pub struct StaticSource {
    name: String,
    items: Vec<SourceItem>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Append a document. `source_id` must be unique within this source.
    pub fn with_document(mut self, source_id: impl Into<String>, body: impl Into<String>) -> Self {
        let source_id = source_id.into();
        self.items.push(SourceItem {
            source: self.name.clone(),
            title: Some(source_id.clone()),
            source_id,
            source_url: None,
            body: body.into(),
        });
        self
    }
}

#[async_trait]
impl DocumentSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn scan(&self) -> Result<Vec<SourceItem>> {
        Ok(self.items.clone())
    }
}

/// Print every document the configured sources would load.
pub async fn list_sources(config: &Config) -> Result<()> {
    let source = FilesystemSource::new(config.corpus.clone());
    let items = source.scan().await?;

    println!("{:<60} {:>10}", "DOCUMENT", "CHARS");
    let mut total = 0usize;
    for item in &items {
        let chars = item.body.chars().count();
        total += chars;
        println!("{:<60} {:>10}", item.source_id, chars);
    }
    println!(
        "{} documents, {} characters from {}",
        items.len(),
        total,
        config.corpus.root.display()
    );

    Ok(())
}
