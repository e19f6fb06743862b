//! Lodex: LOD dictionary dump extraction for flashcard generation
//!
//! This crate turns the hand-authored, deeply nested LOD XML dump into one normalized
//! record per word:
//!
//! 1. **Parse** -- Load the whole dump (optionally BZ2-compressed) into an element tree
//! 2. **First pass** -- Walk the articles in document order, classify every grammatical
//!    structure, extract typed details and meanings, and merge the fragments into a
//!    [`store::WordStore`] keyed by word id
//! 3. **Second pass** -- Resolve variant cross-references (which may point forward to
//!    articles seen later) into target word texts
//! 4. **Persist** -- Write one JSON document per word, in parallel
//!
//! # Error handling
//!
//! The classification tables are exhaustive. An unknown grammatical category, variant
//! relation or plural category fails only the article it appears in; the failure is
//! logged with the article key and the offending tag, and extraction carries on.
//!
//! # Key Modules
//!
//! - [`parser`] -- Element tree with named-error accessors
//! - [`article`] -- Article classification and dispatch
//! - [`extractor`] -- Shared detail and meaning extraction
//! - [`noun`], [`verb`], [`preposition`] -- Category-specific extras
//! - [`variant`] -- Variant relation normalization
//! - [`store`] -- Merge engine and cross-reference resolver
//! - [`extract`] -- The two-pass pipeline
//! - [`persist`] -- JSON output
//! - [`models`] -- Word data model
//! - [`id`] -- Word id generation
//! - [`stats`] -- Thread-safe atomic counters for extraction metrics
//! - [`config`] -- Constants for extraction and output
//!
//! # Example Usage
//!
//! ```bash
//! lodex extract -i lod-opendata.xml -o output/
//! lodex extract -i lod-opendata.xml.bz2 -o output/ --unresolved fail --pretty
//! ```

pub mod article;
pub mod config;
pub mod error;
pub mod extract;
pub mod extractor;
pub mod id;
pub mod models;
pub mod noun;
pub mod parser;
pub mod persist;
pub mod preposition;
pub mod stats;
pub mod store;
pub mod variant;
pub mod verb;
