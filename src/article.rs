//! Article classification and dispatch.
//!
//! Each `ITEM` of the dump carries one article. Its `MICROSTRUCTURE` lists one element per
//! attested grammatical category; every element is either extracted as a part of speech or
//! deliberately skipped. Anything not in the table fails the article.

use crate::config::{ADDRESS_APOSTROPHE_TOKEN, ADDRESS_SPACE_TOKEN};
use crate::error::{ExtractError, Result};
use crate::extractor::extract_word_type;
use crate::models::{PartOfSpeech, WordType};
use crate::parser::Node;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    Extract(PartOfSpeech),
    Skip,
}

static STRUCTURE_TABLE: Lazy<FxHashMap<&'static str, StructureKind>> = Lazy::new(|| {
    use StructureKind::{Extract, Skip};
    [
        ("MS-TYPE-SUBST", Extract(PartOfSpeech::Noun)),
        ("MS-TYPE-VRB", Extract(PartOfSpeech::Verb)),
        ("MS-TYPE-ADJ", Extract(PartOfSpeech::Adjective)),
        ("MS-TYPE-ADV", Extract(PartOfSpeech::Adverb)),
        ("MS-TYPE-PREP", Extract(PartOfSpeech::Preposition)),
        ("MS-TYPE-CONJ", Extract(PartOfSpeech::Conjunction)),
        ("MS-TYPE-INTERJ", Skip),
        ("MS-TYPE-PRON", Skip),
        ("MS-TYPE-PART", Skip),
        ("MS-TYPE-ART", Skip),
        ("MS-TYPE-ELEM-COMP", Skip),
        ("MS-TYPE-PRONADV", Skip),
        ("MS-TYPE-INDEF", Skip),
        ("MS-TYPE-PREP-plus-ART", Skip),
        ("MS-TYPE-VRBPART", Skip),
    ]
    .into_iter()
    .collect()
});

pub fn classify(tag: &str) -> Result<StructureKind> {
    STRUCTURE_TABLE
        .get(tag)
        .copied()
        .ok_or_else(|| ExtractError::UnknownStructure {
            tag: tag.to_string(),
        })
}

/// Turns a raw headword into word text (`_` stands for a space, `#` for an apostrophe).
pub fn address_to_word(address: &str) -> String {
    address
        .replace(ADDRESS_SPACE_TOKEN, " ")
        .replace(ADDRESS_APOSTROPHE_TOKEN, "'")
}

/// One dump item, with the fields every extractor needs read up front.
#[derive(Debug)]
pub struct Article<'a> {
    pub key: String,
    pub word: String,
    pub has_audio: bool,
    body: &'a Node,
}

impl<'a> Article<'a> {
    pub fn from_item(item: &'a Node) -> Result<Self> {
        let key = item.require_child("META")?.require_attr("ID")?.trim().to_string();
        let body = item.require_child("ARTICLE")?;
        let word = address_to_word(body.require_child("ITEM-ADRESSE")?.text());
        Ok(Self {
            key,
            word,
            has_audio: item.child("AUDIO").is_some(),
            body,
        })
    }

    /// Audio file the (external) audio pipeline produces for this article.
    pub fn audio_file(&self) -> Option<String> {
        self.has_audio
            .then(|| format!("{}.m4a", self.key.to_lowercase()))
    }

    /// Extracts every supported structure. Nothing is returned unless all of them succeed.
    pub fn extract(&self) -> Result<ArticleExtraction> {
        let mut extraction = ArticleExtraction::default();
        let audio = self.audio_file();

        for microstructure in self.body.children_named("MICROSTRUCTURE") {
            for structure in &microstructure.children {
                match classify(&structure.tag)? {
                    StructureKind::Skip => {
                        trace!(article = %self.key, tag = %structure.tag, "Skipping structure");
                        extraction.skipped += 1;
                    }
                    StructureKind::Extract(pos) => {
                        let mut fragment = extract_word_type(pos, &self.key, &self.word, structure)?;
                        fragment.audio = audio.clone();
                        extraction.fragments.push(fragment);
                    }
                }
            }
        }

        Ok(extraction)
    }
}

#[derive(Debug, Default)]
pub struct ArticleExtraction {
    pub fragments: Vec<WordType>,
    pub skipped: usize,
}
