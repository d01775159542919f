//! Filesystem document source.
//!
//! Walks `[corpus].root`, keeps files whose root-relative path matches the
//! include globs and none of the exclude globs, and returns them sorted by
//! path. Files named in `[corpus].lead_files` are moved to the front in the
//! order listed, so the book summary precedes the chapters.
//!
//! Globs are matched with a literal separator: `*` stays within one path
//! component, so the default `modules/*/*.mdx` only sees chapter pages one
//! directory below `modules/`.
//!
//! A missing root is not an error: the corpus is simply empty and every
//! content question falls through to the fallback reply.

use anyhow::Result;
use async_trait::async_trait;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::CorpusConfig;
use crate::models::SourceItem;
use crate::sources::DocumentSource;

pub struct FilesystemSource {
    config: CorpusConfig,
}

impl FilesystemSource {
    pub fn new(config: CorpusConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl DocumentSource for FilesystemSource {
    fn name(&self) -> &str {
        "filesystem"
    }

    async fn scan(&self) -> Result<Vec<SourceItem>> {
        let config = self.config.clone();
        tokio::task::spawn_blocking(move || scan_filesystem(&config)).await?
    }
}

pub fn scan_filesystem(config: &CorpusConfig) -> Result<Vec<SourceItem>> {
    let root = &config.root;
    if !root.is_dir() {
        warn!(
            "Corpus root does not exist or is not a directory: {}",
            root.display()
        );
        return Ok(Vec::new());
    }

    let include_set = build_globset(&config.include_globs)?;

    let mut default_excludes = vec![
        "**/.git/**".to_string(),
        "**/target/**".to_string(),
        "**/node_modules/**".to_string(),
    ];
    default_excludes.extend(config.exclude_globs.clone());
    let exclude_set = build_globset(&default_excludes)?;

    let mut items = Vec::new();

    let walker = WalkDir::new(root).follow_links(config.follow_symlinks);
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().replace('\\', "/");

        if exclude_set.is_match(&rel_str) {
            continue;
        }
        if !include_set.is_match(&rel_str) {
            continue;
        }

        if let Some(item) = file_to_source_item(path, &rel_str) {
            items.push(item);
        }
    }

    items.sort_by(|a, b| a.source_id.cmp(&b.source_id));
    move_lead_files_first(&mut items, &config.lead_files);

    debug!("Discovered {} documents under {}", items.len(), root.display());
    Ok(items)
}

fn move_lead_files_first(items: &mut Vec<SourceItem>, lead_files: &[String]) {
    let mut leads = Vec::new();
    for lead in lead_files {
        if let Some(pos) = items.iter().position(|i| &i.source_id == lead) {
            leads.push(items.remove(pos));
        }
    }
    leads.append(items);
    *items = leads;
}

fn file_to_source_item(path: &Path, relative_path: &str) -> Option<SourceItem> {
    // Invalid UTF-8 is replaced, not rejected: one stray byte must not drop a chapter.
    let body = match std::fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            warn!("Skipping {}: {}", path.display(), e);
            return None;
        }
    };

    let title = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Some(SourceItem {
        source: "filesystem".to_string(),
        source_id: relative_path.to_string(),
        source_url: Some(format!("file://{}", path.display())),
        title: Some(title),
        body,
    })
}

/// `*` stops at `/`; only `**` crosses directories.
fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(GlobBuilder::new(pattern).literal_separator(true).build()?);
    }
    Ok(builder.build()?)
}
