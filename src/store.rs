//! Word store (first pass) and cross-reference resolution (second pass).
//!
//! The phases are separated by types: [`WordStore::finish`] consumes the store and is the
//! only way to obtain an [`ArticleKeyIndex`], and [`resolve`] only accepts the
//! [`ExtractedWords`] produced alongside it.

use crate::id::word_id;
use crate::models::{PartOfSpeech, VariantRelation, Word, WordType};
use anyhow::{bail, Result};
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// First fragment for this word text.
    NewWord,
    /// Known word, first fragment of this part of speech.
    NewType,
    /// Meanings appended to an existing word type.
    MergedMeanings,
}

/// Accumulates article fragments into canonical words, keyed by word id.
#[derive(Debug, Default)]
pub struct WordStore {
    words: Vec<Word>,
    positions: FxHashMap<String, usize>,
    article_keys: FxHashMap<String, String>,
    dropped_variants: Vec<DroppedVariant>,
}

/// Variant relation of a fragment whose details were discarded by a same-type merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedVariant {
    pub word: String,
    pub part_of_speech: PartOfSpeech,
    /// Article the relation came from.
    pub article_key: String,
    /// Article whose word type absorbed the meanings.
    pub merged_into: String,
    pub variant: VariantRelation,
}

impl WordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&mut self, fragment: WordType, word_text: &str) -> MergeOutcome {
        self.article_keys
            .insert(fragment.article_key.clone(), word_text.to_string());

        let id = word_id(word_text);
        let Some(&position) = self.positions.get(&id) else {
            let mut word = Word::new(word_text);
            word.types.push(fragment);
            self.positions.insert(id, self.words.len());
            self.words.push(word);
            return MergeOutcome::NewWord;
        };

        let word = &mut self.words[position];
        let pos = fragment.part_of_speech();
        match word.types.iter_mut().find(|t| t.part_of_speech() == pos) {
            Some(existing) => {
                debug!(
                    word = %word.word,
                    part_of_speech = %pos,
                    from = %fragment.article_key,
                    into = %existing.article_key,
                    meanings = fragment.meanings.len(),
                    "Merging meanings"
                );
                if let Some(variant) = fragment.details.variant() {
                    if existing.details.variant() != Some(variant) {
                        warn!(
                            word = %word.word,
                            part_of_speech = %pos,
                            from = %fragment.article_key,
                            into = %existing.article_key,
                            target = %variant.target_article_key,
                            "Variant relation dropped by merge"
                        );
                        self.dropped_variants.push(DroppedVariant {
                            word: word.word.clone(),
                            part_of_speech: pos,
                            article_key: fragment.article_key.clone(),
                            merged_into: existing.article_key.clone(),
                            variant: variant.clone(),
                        });
                    }
                }
                existing.meanings.extend(fragment.meanings);
                MergeOutcome::MergedMeanings
            }
            None => {
                word.types.push(fragment);
                MergeOutcome::NewType
            }
        }
    }

    pub fn get(&self, word_text: &str) -> Option<&Word> {
        self.positions
            .get(&word_id(word_text))
            .map(|&i| &self.words[i])
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Variant relations lost because their word type merged into an earlier one.
    pub fn dropped_variants(&self) -> &[DroppedVariant] {
        &self.dropped_variants
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Ends the first pass.
    pub fn finish(self) -> (ExtractedWords, ArticleKeyIndex) {
        (
            ExtractedWords { words: self.words },
            ArticleKeyIndex {
                keys: self.article_keys,
            },
        )
    }
}

/// Article key to word text, complete once the first pass is over.
#[derive(Debug, Default)]
pub struct ArticleKeyIndex {
    keys: FxHashMap<String, String>,
}

impl ArticleKeyIndex {
    pub fn get(&self, article_key: &str) -> Option<&str> {
        self.keys.get(article_key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Words in first-encounter order, variant targets still unresolved.
#[derive(Debug)]
pub struct ExtractedWords {
    words: Vec<Word>,
}

impl ExtractedWords {
    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

/// What to do with variant targets that point at articles never seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum UnresolvedPolicy {
    /// Log each one and keep going.
    #[default]
    Warn,
    /// Log each one, then fail the run.
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub word: String,
    pub part_of_speech: PartOfSpeech,
    pub article_key: String,
    pub target_article_key: String,
}

#[derive(Debug)]
pub struct ResolvedWords {
    words: Vec<Word>,
    unresolved: Vec<UnresolvedReference>,
}

impl ResolvedWords {
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn into_words(self) -> Vec<Word> {
        self.words
    }

    pub fn unresolved(&self) -> &[UnresolvedReference] {
        &self.unresolved
    }
}

/// Second pass: fills every variant's target word text from the article key index.
pub fn resolve(
    extracted: ExtractedWords,
    index: &ArticleKeyIndex,
    policy: UnresolvedPolicy,
) -> Result<ResolvedWords> {
    let mut words = extracted.words;
    let mut unresolved = Vec::new();

    for word in &mut words {
        for word_type in &mut word.types {
            let pos = word_type.part_of_speech();
            let Some(variant) = word_type.details.variant_mut() else {
                continue;
            };
            if variant.target_word_text.is_some() {
                continue;
            }
            match index.get(&variant.target_article_key) {
                Some(target) => variant.target_word_text = Some(target.to_string()),
                None => {
                    warn!(
                        word = %word.word,
                        article = %word_type.article_key,
                        target = %variant.target_article_key,
                        "Unresolved variant reference"
                    );
                    unresolved.push(UnresolvedReference {
                        word: word.word.clone(),
                        part_of_speech: pos,
                        article_key: word_type.article_key.clone(),
                        target_article_key: variant.target_article_key.clone(),
                    });
                }
            }
        }
    }

    if policy == UnresolvedPolicy::Fail && !unresolved.is_empty() {
        bail!("{} variant reference(s) could not be resolved", unresolved.len());
    }

    Ok(ResolvedWords { words, unresolved })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BaseDetails, LanguageCode, Meaning, NounDetails, Translation, TypeDetails,
        VariantKind, VariantRelation, VerbDetails,
    };

    fn meaning(fr: &str) -> Meaning {
        let mut translations = LanguageCode::SUPPORTED.map(Translation::missing);
        translations[1].text = Some(fr.to_string());
        Meaning {
            translations,
            examples: vec![],
            synonyms: vec![],
            poly_lex: None,
            reflexive_pronoun: None,
            impersonal_usage: None,
            case: None,
        }
    }

    fn noun(key: &str, fr: &str) -> WordType {
        WordType {
            details: TypeDetails::Noun(NounDetails {
                gender: "NEUTRAL".to_string(),
                ..Default::default()
            }),
            article_key: key.to_string(),
            audio: None,
            meanings: vec![meaning(fr)],
        }
    }

    fn verb(key: &str, variant_of: Option<&str>) -> WordType {
        WordType {
            details: TypeDetails::Verb(VerbDetails {
                variant: variant_of.map(|target| VariantRelation {
                    target_article_key: target.to_string(),
                    target_word_text: None,
                    relation_kind: VariantKind::VariantOf,
                }),
                ..Default::default()
            }),
            article_key: key.to_string(),
            audio: None,
            meanings: vec![],
        }
    }

    #[test]
    fn new_word_then_new_type_then_merge() {
        let mut store = WordStore::new();
        assert_eq!(store.upsert(noun("ESSEN1", "repas"), "Iessen"), MergeOutcome::NewWord);
        assert_eq!(store.upsert(verb("ESSEN2", None), "Iessen"), MergeOutcome::NewType);
        assert_eq!(
            store.upsert(noun("ESSEN3", "nourriture"), "Iessen"),
            MergeOutcome::MergedMeanings
        );

        assert_eq!(store.len(), 1);
        let word = store.get("Iessen").unwrap();
        assert_eq!(word.id, word_id("Iessen"));
        assert_eq!(word.types.len(), 2);
        let noun_type = word.word_type(PartOfSpeech::Noun).unwrap();
        assert_eq!(noun_type.article_key, "ESSEN1");
        assert_eq!(noun_type.meanings.len(), 2);
    }

    #[test]
    fn repeated_fragment_concatenates_meanings() {
        let mut store = WordStore::new();
        store.upsert(noun("HAUS1", "maison"), "Haus");
        store.upsert(noun("HAUS1", "maison"), "Haus");

        let word = store.get("Haus").unwrap();
        assert_eq!(word.types.len(), 1);
        assert_eq!(word.types[0].meanings.len(), 2);
        assert_eq!(word.types[0].meanings[0], word.types[0].meanings[1]);
    }

    #[test]
    fn merge_records_dropped_variant() {
        let mut store = WordStore::new();
        store.upsert(verb("GOEN1", None), "goen");
        store.upsert(verb("GOEN2", Some("GEEN1")), "goen");
        store.upsert(verb("GOEN3", None), "goen");

        let word = store.get("goen").unwrap();
        assert_eq!(word.types[0].details.variant(), None);
        assert_eq!(
            store.dropped_variants(),
            &[DroppedVariant {
                word: "goen".to_string(),
                part_of_speech: PartOfSpeech::Verb,
                article_key: "GOEN2".to_string(),
                merged_into: "GOEN1".to_string(),
                variant: VariantRelation {
                    target_article_key: "GEEN1".to_string(),
                    target_word_text: None,
                    relation_kind: VariantKind::VariantOf,
                },
            }]
        );
    }

    #[test]
    fn merge_with_identical_variant_drops_nothing() {
        let mut store = WordStore::new();
        store.upsert(verb("GOEN1", Some("GEEN1")), "goen");
        store.upsert(verb("GOEN2", Some("GEEN1")), "goen");
        assert!(store.dropped_variants().is_empty());
    }

    #[test]
    fn preserves_first_encounter_order() {
        let mut store = WordStore::new();
        store.upsert(noun("B1", "b"), "b");
        store.upsert(noun("A1", "a"), "a");
        store.upsert(noun("B2", "b2"), "b");
        let order: Vec<_> = store.words().iter().map(|w| w.word.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn finish_hands_over_article_keys() {
        let mut store = WordStore::new();
        store.upsert(noun("HAUS1", "maison"), "Haus");
        let (extracted, index) = store.finish();
        assert_eq!(extracted.words().len(), 1);
        assert_eq!(index.get("HAUS1"), Some("Haus"));
        assert_eq!(index.get("HAUS2"), None);
    }

    #[test]
    fn resolves_forward_references() {
        let mut store = WordStore::new();
        store.upsert(verb("GOEN2", Some("GOEN1")), "goë");
        store.upsert(verb("GOEN1", None), "goen");

        let (extracted, index) = store.finish();
        let resolved = resolve(extracted, &index, UnresolvedPolicy::Warn).unwrap();
        assert!(resolved.unresolved().is_empty());

        let variant = resolved.words()[0].types[0].details.variant().unwrap();
        assert_eq!(variant.target_word_text.as_deref(), Some("goen"));
    }

    #[test]
    fn unknown_target_stays_unresolved_under_warn() {
        let mut store = WordStore::new();
        store.upsert(
            WordType {
                details: TypeDetails::Adjective(BaseDetails {
                    variant: Some(VariantRelation {
                        target_article_key: "MISSING1".to_string(),
                        target_word_text: None,
                        relation_kind: VariantKind::ShortFormOf,
                    }),
                }),
                article_key: "KUERZ1".to_string(),
                audio: None,
                meanings: vec![],
            },
            "kuerz",
        );

        let (extracted, index) = store.finish();
        let resolved = resolve(extracted, &index, UnresolvedPolicy::Warn).unwrap();
        assert_eq!(
            resolved.unresolved(),
            &[UnresolvedReference {
                word: "kuerz".to_string(),
                part_of_speech: PartOfSpeech::Adjective,
                article_key: "KUERZ1".to_string(),
                target_article_key: "MISSING1".to_string(),
            }]
        );
        let variant = resolved.words()[0].types[0].details.variant().unwrap();
        assert_eq!(variant.target_word_text, None);
    }

    #[test]
    fn unknown_target_fails_under_fail_policy() {
        let mut store = WordStore::new();
        store.upsert(verb("GOEN2", Some("GOEN1")), "goë");
        let (extracted, index) = store.finish();
        let err = resolve(extracted, &index, UnresolvedPolicy::Fail).unwrap_err();
        assert!(err.to_string().contains("1 variant reference"));
    }
}
