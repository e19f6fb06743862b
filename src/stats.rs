use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics collected during the extraction process
#[derive(Debug, Default)]
pub struct ExtractionStats {
    pub articles_processed: AtomicU64,
    pub articles_failed: AtomicU64,
    pub fragments_extracted: AtomicU64,
    pub structures_skipped: AtomicU64,
    pub meanings_merged: AtomicU64,
    pub unresolved_references: AtomicU64,
    pub words_written: AtomicU64,
}

impl ExtractionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_articles(&self) {
        self.articles_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_failed(&self) {
        self.articles_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_fragments(&self, count: u64) {
        self.fragments_extracted.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_skipped(&self, count: u64) {
        self.structures_skipped.fetch_add(count, Ordering::Relaxed);
    }

    pub fn inc_merged(&self) {
        self.meanings_merged.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_unresolved(&self, count: u64) {
        self.unresolved_references
            .fetch_add(count, Ordering::Relaxed);
    }

    pub fn inc_written(&self) {
        self.words_written.fetch_add(1, Ordering::Relaxed);
    }

    pub fn articles(&self) -> u64 {
        self.articles_processed.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.articles_failed.load(Ordering::Relaxed)
    }

    pub fn fragments(&self) -> u64 {
        self.fragments_extracted.load(Ordering::Relaxed)
    }

    pub fn skipped(&self) -> u64 {
        self.structures_skipped.load(Ordering::Relaxed)
    }

    pub fn merged(&self) -> u64 {
        self.meanings_merged.load(Ordering::Relaxed)
    }

    pub fn unresolved(&self) -> u64 {
        self.unresolved_references.load(Ordering::Relaxed)
    }

    pub fn written(&self) -> u64 {
        self.words_written.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_zero() {
        let stats = ExtractionStats::new();
        assert_eq!(stats.articles(), 0);
        assert_eq!(stats.failed(), 0);
        assert_eq!(stats.fragments(), 0);
        assert_eq!(stats.skipped(), 0);
        assert_eq!(stats.merged(), 0);
        assert_eq!(stats.unresolved(), 0);
        assert_eq!(stats.written(), 0);
    }

    #[test]
    fn debug_output_shows_counter_values() {
        let stats = ExtractionStats::new();
        stats.inc_articles();
        stats.inc_articles();
        stats.add_unresolved(3);

        let rendered = format!("{:?}", stats);
        assert!(rendered.starts_with("ExtractionStats {"));
        assert!(rendered.contains("articles_processed: 2"));
        assert!(rendered.contains("unresolved_references: 3"));
    }

    #[test]
    fn mixed_operations() {
        let stats = ExtractionStats::new();
        stats.inc_articles();
        stats.add_fragments(2);
        stats.add_skipped(1);
        stats.inc_articles();
        stats.inc_failed();
        stats.add_fragments(3);
        stats.inc_merged();
        stats.add_unresolved(4);

        assert_eq!(stats.articles(), 2);
        assert_eq!(stats.failed(), 1);
        assert_eq!(stats.fragments(), 5);
        assert_eq!(stats.skipped(), 1);
        assert_eq!(stats.merged(), 1);
        assert_eq!(stats.unresolved(), 4);
    }

    #[test]
    fn counts_writes_across_threads() {
        let stats = ExtractionStats::new();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..25 {
                        stats.inc_written();
                    }
                });
            }
        });
        assert_eq!(stats.written(), 100);
    }
}
