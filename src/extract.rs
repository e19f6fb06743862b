use crate::article::{Article, ArticleExtraction};
use crate::config::PROGRESS_INTERVAL;
use crate::error::ExtractError;
use crate::parser::{load_document, Node};
use crate::persist::{persist_words, WordWriter};
use crate::stats::ExtractionStats;
use crate::store::{
    resolve, ArticleKeyIndex, ExtractedWords, MergeOutcome, UnresolvedPolicy,
    UnresolvedReference, WordStore,
};
use anyhow::Result;
use indicatif::ProgressBar;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct ExtractConfig {
    pub input: String,
    pub output: String,
    pub limit: Option<u64>,
    pub dry_run: bool,
    pub pretty: bool,
    pub unresolved: UnresolvedPolicy,
}

/// An article that could not be extracted. Nothing from it reached the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFailure {
    /// Position of the item in the dump.
    pub position: usize,
    pub article_key: Option<String>,
    pub error: ExtractError,
}

/// Result of the first pass over the dump.
pub struct FirstPass {
    pub extracted: ExtractedWords,
    pub index: ArticleKeyIndex,
    pub failures: Vec<ArticleFailure>,
}

fn extract_item(item: &Node) -> Result<(Article<'_>, ArticleExtraction), ExtractError> {
    let article = Article::from_item(item)?;
    let extraction = article.extract()?;
    Ok((article, extraction))
}

/// First pass: every item in document order, merged into a fresh store.
pub fn extract_all(root: &Node, limit: Option<u64>, stats: &ExtractionStats) -> FirstPass {
    let available = root.children_named("ITEM").count() as u64;
    let total = limit.map_or(available, |l| l.min(available));
    let pb = ProgressBar::new(total);

    let mut store = WordStore::new();
    let mut failures = Vec::new();

    for (position, item) in root.children_named("ITEM").take(total as usize).enumerate() {
        stats.inc_articles();

        match extract_item(item) {
            Ok((article, extraction)) => {
                if !article.has_audio {
                    debug!(article = %article.key, "Article has no audio file");
                }
                stats.add_fragments(extraction.fragments.len() as u64);
                stats.add_skipped(extraction.skipped as u64);
                for fragment in extraction.fragments {
                    if store.upsert(fragment, &article.word) == MergeOutcome::MergedMeanings {
                        stats.inc_merged();
                    }
                }
            }
            Err(error) => {
                let article_key = item
                    .child("META")
                    .and_then(|m| m.attr("ID"))
                    .map(|k| k.trim().to_string());
                warn!(
                    position,
                    article = article_key.as_deref().unwrap_or("<unknown>"),
                    error = %error,
                    "Skipping article"
                );
                stats.inc_failed();
                failures.push(ArticleFailure {
                    position,
                    article_key,
                    error,
                });
            }
        }

        if (position as u64 + 1) % PROGRESS_INTERVAL == 0 {
            pb.set_position(position as u64 + 1);
        }
    }

    pb.finish_and_clear();

    info!(
        articles = stats.articles(),
        failed = stats.failed(),
        words = store.len(),
        "First pass complete"
    );

    let (extracted, index) = store.finish();
    FirstPass {
        extracted,
        index,
        failures,
    }
}

#[derive(Debug)]
pub struct ExtractionReport {
    pub stats: ExtractionStats,
    pub words: usize,
    pub failures: Vec<ArticleFailure>,
    pub unresolved: Vec<UnresolvedReference>,
}

pub fn run_extraction(config: &ExtractConfig) -> Result<ExtractionReport> {
    let stats = ExtractionStats::new();

    let start_parsing = Instant::now();
    let root = load_document(&config.input)?;
    info!(
        duration_secs = start_parsing.elapsed().as_secs_f64(),
        "Parsing complete"
    );

    let start_extracting = Instant::now();
    let first_pass = extract_all(&root, config.limit, &stats);
    drop(root);

    let resolved = resolve(first_pass.extracted, &first_pass.index, config.unresolved)?;
    stats.add_unresolved(resolved.unresolved().len() as u64);
    info!(
        duration_secs = start_extracting.elapsed().as_secs_f64(),
        unresolved = stats.unresolved(),
        "Resolution complete"
    );

    if config.dry_run {
        info!("Dry run, skipping persistence");
    } else {
        let writer = WordWriter::new(&config.output, config.pretty)?;
        persist_words(resolved.words(), &writer, &stats)?;
    }

    Ok(ExtractionReport {
        words: resolved.words().len(),
        unresolved: resolved.unresolved().to_vec(),
        failures: first_pass.failures,
        stats,
    })
}
