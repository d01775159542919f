//! Keyword-overlap relevance scoring.
//!
//! # Algorithm
//!
//! 1. Lowercase the question and split it on runs of non-word characters
//!    (anything outside `[A-Za-z0-9_]`); keep tokens of at least
//!    `min_token_len` characters.
//! 2. For each paragraph, count the tokens occurring anywhere in the
//!    lowercased paragraph. Matching is plain substring containment, so a
//!    token also counts inside a longer word.
//! 3. If the paragraph contains the heading marker `"# "`, multiply the
//!    count by `heading_boost`.
//! 4. Sort by score descending. The sort is stable: equal scores keep corpus
//!    order, so results are reproducible.
//! 5. Drop zero scores and keep the first `max_results`.

use crate::config::RetrievalConfig;
use crate::corpus::Corpus;
use crate::models::ScoredParagraph;

/// Literal marker that identifies a heading paragraph.
pub const HEADING_MARKER: &str = "# ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringParams {
    pub max_results: usize,
    pub min_token_len: usize,
    pub heading_boost: u32,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            max_results: 3,
            min_token_len: 3,
            heading_boost: 2,
        }
    }
}

impl From<&RetrievalConfig> for ScoringParams {
    fn from(cfg: &RetrievalConfig) -> Self {
        Self {
            max_results: cfg.max_results,
            min_token_len: cfg.min_token_len,
            heading_boost: cfg.heading_boost,
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split a question into lowercase match tokens. Duplicates are kept.
pub fn tokenize(question: &str, min_token_len: usize) -> Vec<String> {
    question
        .to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|t| t.chars().count() >= min_token_len)
        .map(str::to_string)
        .collect()
}

/// Score one paragraph against pre-computed tokens.
pub fn score_paragraph(paragraph: &str, tokens: &[String], heading_boost: u32) -> u32 {
    let lower = paragraph.to_lowercase();
    let hits = tokens.iter().filter(|t| lower.contains(t.as_str())).count() as u32;

    if lower.contains(HEADING_MARKER) {
        hits.saturating_mul(heading_boost)
    } else {
        hits
    }
}

/// Score every paragraph of `corpus` and return the best matches.
///
/// Only paragraphs with a positive score are returned, at most
/// `params.max_results` of them, best first.
pub fn rank<'a>(corpus: &'a Corpus, question: &str, params: &ScoringParams) -> Vec<ScoredParagraph<'a>> {
    let tokens = tokenize(question, params.min_token_len);

    let mut scored: Vec<ScoredParagraph<'a>> = corpus
        .paragraphs()
        .enumerate()
        .map(|(position, text)| ScoredParagraph {
            text,
            score: score_paragraph(text, &tokens, params.heading_boost),
            position,
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));

    scored
        .into_iter()
        .filter(|p| p.score > 0)
        .take(params.max_results)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ScoringParams {
        ScoringParams::default()
    }

    #[test]
    fn test_tokenize_drops_short_tokens_and_punctuation() {
        let tokens = tokenize("What is a ROS-2 topic, exactly?", 3);
        assert_eq!(tokens, vec!["what", "ros", "topic", "exactly"]);
    }

    #[test]
    fn test_tokenize_keeps_duplicates() {
        let tokens = tokenize("robot robot", 3);
        assert_eq!(tokens, vec!["robot", "robot"]);
    }

    #[test]
    fn test_tokenize_underscore_is_word_char() {
        let tokens = tokenize("cmd_vel topic", 3);
        assert_eq!(tokens, vec!["cmd_vel", "topic"]);
    }

    #[test]
    fn test_substring_match_counts() {
        let tokens = tokenize("sim", 3);
        assert_eq!(score_paragraph("Gazebo is a simulator.", &tokens, 2), 1);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let tokens = tokenize("gazebo", 3);
        assert_eq!(score_paragraph("GAZEBO worlds", &tokens, 2), 1);
    }

    #[test]
    fn test_heading_boost_doubles() {
        let tokens = tokenize("topics nodes", 3);
        let plain = score_paragraph("Topics connect nodes.", &tokens, 2);
        let heading = score_paragraph("# Topics connect nodes.", &tokens, 2);
        assert_eq!(plain, 2);
        assert_eq!(heading, 4);
    }

    #[test]
    fn test_heading_marker_needs_space() {
        let tokens = tokenize("topics", 3);
        assert_eq!(score_paragraph("#Topics", &tokens, 2), 1);
        assert_eq!(score_paragraph("## Topics", &tokens, 2), 2);
    }

    #[test]
    fn test_huge_boost_saturates() {
        let corpus = Corpus::from_documents(["# topics nodes"]);
        let p = ScoringParams {
            heading_boost: u32::MAX,
            ..params()
        };
        let ranked = rank(&corpus, "topics nodes", &p);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, u32::MAX);
    }

    #[test]
    fn test_boost_of_zero_hits_is_zero() {
        let tokens = tokenize("isaac", 3);
        assert_eq!(score_paragraph("# Gazebo", &tokens, 2), 0);
    }

    #[test]
    fn test_rank_orders_by_score() {
        let corpus = Corpus::from_documents([
            "Nodes exist.\n\nTopics and nodes and services.\n\nTopics only.",
        ]);
        let ranked = rank(&corpus, "topics nodes services", &params());
        let texts: Vec<&str> = ranked.iter().map(|p| p.text).collect();
        assert_eq!(
            texts,
            vec!["Topics and nodes and services.", "Nodes exist.", "Topics only.\n"]
        );
        assert_eq!(ranked[0].score, 3);
    }

    #[test]
    fn test_rank_ties_keep_corpus_order() {
        let corpus = Corpus::from_documents(["robot one\n\nrobot two\n\nrobot three\n\nrobot four"]);
        let ranked = rank(&corpus, "robot", &params());
        let positions: Vec<usize> = ranked.iter().map(|p| p.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_rank_respects_max_results() {
        let corpus = Corpus::from_documents(["robot a\n\nrobot b\n\nrobot c"]);
        let p = ScoringParams {
            max_results: 1,
            ..params()
        };
        assert_eq!(rank(&corpus, "robot", &p).len(), 1);
    }

    #[test]
    fn test_rank_empty_corpus() {
        let corpus = Corpus::default();
        assert!(rank(&corpus, "anything at all", &params()).is_empty());
    }

    #[test]
    fn test_rank_question_without_qualifying_tokens() {
        let corpus = Corpus::from_documents(["a is an ok"]);
        assert!(rank(&corpus, "a is ok", &params()).is_empty());
    }

    #[test]
    fn test_superset_match_ranks_above_subset() {
        let corpus = Corpus::from_documents([
            "Lidar sensors.\n\nLidar and camera sensors fused.",
        ]);
        let ranked = rank(&corpus, "lidar camera sensors", &params());
        assert_eq!(ranked[0].text, "Lidar and camera sensors fused.\n");
        assert!(ranked[0].score >= 3);
        assert!(ranked[0].score >= ranked[1].score);
    }

    #[test]
    fn test_params_from_config() {
        let cfg = RetrievalConfig {
            max_results: 7,
            min_token_len: 4,
            heading_boost: 3,
        };
        let p = ScoringParams::from(&cfg);
        assert_eq!(p.max_results, 7);
        assert_eq!(p.min_token_len, 4);
        assert_eq!(p.heading_boost, 3);
    }
}
