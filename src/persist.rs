use crate::config::WORDS_FOLDER;
use crate::models::Word;
use crate::stats::ExtractionStats;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn words_dir(output_dir: &str) -> PathBuf {
    Path::new(output_dir).join(WORDS_FOLDER)
}

/// Writes one JSON document per word, named after the word id.
pub struct WordWriter {
    dir: PathBuf,
    pretty: bool,
}

impl WordWriter {
    pub fn new(output_dir: &str, pretty: bool) -> Result<Self> {
        let dir = words_dir(output_dir);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {:?}", dir))?;
        Ok(Self { dir, pretty })
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    pub fn serialize(&self, word: &Word) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(word)
        } else {
            serde_json::to_vec(word)
        };
        bytes.with_context(|| format!("Failed to serialize word: {}", word.word))
    }

    /// Writes atomically via rename so readers never see a half-written file.
    pub fn write(&self, id: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(id);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, bytes)
            .with_context(|| format!("Failed to write temp file: {:?}", tmp_path))?;
        fs::rename(&tmp_path, &path)
            .with_context(|| format!("Failed to rename temp file to: {:?}", path))?;
        Ok(())
    }

    pub fn write_word(&self, word: &Word) -> Result<()> {
        let bytes = self.serialize(word)?;
        self.write(&word.id, &bytes)
    }
}

/// Persists every word in parallel; each word targets its own file.
pub fn persist_words(words: &[Word], writer: &WordWriter, stats: &ExtractionStats) -> Result<()> {
    words.par_iter().try_for_each(|word| -> Result<()> {
        writer.write_word(word)?;
        stats.inc_written();
        Ok(())
    })?;

    info!(words = stats.written(), dir = ?writer.dir, "Words persisted");
    Ok(())
}

pub fn load_word(path: &Path) -> Result<Word> {
    let file = File::open(path).with_context(|| format!("Failed to open word file: {:?}", path))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse word file: {:?}", path))
}
