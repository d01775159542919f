//! # Book Assistant
//!
//! Answers free-text questions about a textbook by keyword overlap against
//! the book's source documents. It backs the "ask about this page" widget
//! on the book's documentation site.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────┐   ┌────────────┐   ┌──────────┐
//! │ Filesystem  │──▶│  Corpus   │──▶│ Assistant  │──▶│   HTTP   │
//! │ .md / .mdx  │   │ (one str) │   │ rules+score│   │ /api/chat│
//! └─────────────┘   └──────────┘   └────────────┘   └──────────┘
//! ```
//!
//! The corpus is built once at startup and shared read-only; every question
//! is answered by a pure function of (corpus, question).
//!
//! ## Quick Start
//!
//! ```bash
//! bookbot sources                   # list the documents that will be loaded
//! bookbot ask "What are topics?"    # answer one question
//! bookbot serve                     # start the HTTP API
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`sources`] | Document source trait and listing |
//! | [`connector_fs`] | Filesystem document source |
//! | [`corpus`] | Concatenated book text |
//! | [`scoring`] | Keyword-overlap relevance scoring |
//! | [`intents`] | Canned small-talk replies |
//! | [`assistant`] | Question answering pipeline |
//! | [`server`] | HTTP API |

pub mod assistant;
pub mod config;
pub mod connector_fs;
pub mod corpus;
pub mod intents;
pub mod models;
pub mod scoring;
pub mod server;
pub mod sources;
