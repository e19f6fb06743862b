use crate::id::word_id;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grammatical categories the engine extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    Conjunction,
}

impl PartOfSpeech {
    /// Code the dump appends to category-specific tags (`RENVOI-SUBST`, `TRAITEMENT-LING-VRB`, ...).
    pub fn raw_code(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "SUBST",
            PartOfSpeech::Verb => "VRB",
            PartOfSpeech::Adjective => "ADJ",
            PartOfSpeech::Adverb => "ADV",
            PartOfSpeech::Preposition => "PREP",
            PartOfSpeech::Conjunction => "CONJ",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Preposition => "preposition",
            PartOfSpeech::Conjunction => "conjunction",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariantKind {
    VariantOf,
    FeminineFormOf,
    ShortFormOf,
    DiminutiveFormOf,
    MasculineFormOf,
}

/// Morphological cross-reference from one article to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRelation {
    pub target_article_key: String,
    /// Filled in by the resolver once every article has been seen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_word_text: Option<String>,
    pub relation_kind: VariantKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NounDetails {
    pub gender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Absent for mass nouns, plural-only nouns and complex plural situations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<VariantRelation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerbDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auxiliary_verb: Option<String>,
    #[serde(default)]
    pub past_participles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<VariantRelation>,
}

/// Details shared by prepositions, adjectives, adverbs and conjunctions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<VariantRelation>,
}

/// Part-of-speech specific details, serialized as `"type"` plus `"details"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details", rename_all = "lowercase")]
pub enum TypeDetails {
    Noun(NounDetails),
    Verb(VerbDetails),
    Adjective(BaseDetails),
    Adverb(BaseDetails),
    Preposition(BaseDetails),
    Conjunction(BaseDetails),
}

impl TypeDetails {
    pub fn part_of_speech(&self) -> PartOfSpeech {
        match self {
            TypeDetails::Noun(_) => PartOfSpeech::Noun,
            TypeDetails::Verb(_) => PartOfSpeech::Verb,
            TypeDetails::Adjective(_) => PartOfSpeech::Adjective,
            TypeDetails::Adverb(_) => PartOfSpeech::Adverb,
            TypeDetails::Preposition(_) => PartOfSpeech::Preposition,
            TypeDetails::Conjunction(_) => PartOfSpeech::Conjunction,
        }
    }

    pub fn variant(&self) -> Option<&VariantRelation> {
        match self {
            TypeDetails::Noun(d) => d.variant.as_ref(),
            TypeDetails::Verb(d) => d.variant.as_ref(),
            TypeDetails::Adjective(d)
            | TypeDetails::Adverb(d)
            | TypeDetails::Preposition(d)
            | TypeDetails::Conjunction(d) => d.variant.as_ref(),
        }
    }

    pub fn variant_mut(&mut self) -> Option<&mut VariantRelation> {
        match self {
            TypeDetails::Noun(d) => d.variant.as_mut(),
            TypeDetails::Verb(d) => d.variant.as_mut(),
            TypeDetails::Adjective(d)
            | TypeDetails::Adverb(d)
            | TypeDetails::Preposition(d)
            | TypeDetails::Conjunction(d) => d.variant.as_mut(),
        }
    }
}

/// Languages the dump translates into, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LanguageCode {
    All,
    Fr,
    Po,
    En,
}

impl LanguageCode {
    pub const SUPPORTED: [LanguageCode; 4] = [
        LanguageCode::All,
        LanguageCode::Fr,
        LanguageCode::Po,
        LanguageCode::En,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LanguageCode::All => "ALL",
            LanguageCode::Fr => "FR",
            LanguageCode::Po => "PO",
            LanguageCode::En => "EN",
        }
    }

    /// Initial used in the per-language text tags (`ETF-EXPLICITE`, `RS-ETF-PRESENTE`).
    pub fn initial(self) -> char {
        match self {
            LanguageCode::All => 'A',
            LanguageCode::Fr => 'F',
            LanguageCode::Po => 'P',
            LanguageCode::En => 'E',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub language_code: LanguageCode,
    /// `None` means the dictionary has no translation in this language for the meaning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
}

impl Translation {
    pub fn missing(language_code: LanguageCode) -> Self {
        Self {
            language_code,
            text: None,
            complement: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageExample {
    pub usage_tags: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub translations: [Translation; 4],
    #[serde(default)]
    pub examples: Vec<UsageExample>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    /// Set when the meaning belongs to a multi-word idiomatic unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poly_lex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflexive_pronoun: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impersonal_usage: Option<String>,
    /// Grammatical case governed by a preposition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case: Option<String>,
}

impl Meaning {
    pub fn translation(&self, language_code: LanguageCode) -> Option<&Translation> {
        self.translations
            .iter()
            .find(|t| t.language_code == language_code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordType {
    #[serde(flatten)]
    pub details: TypeDetails,
    pub article_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    pub meanings: Vec<Meaning>,
}

impl WordType {
    pub fn part_of_speech(&self) -> PartOfSpeech {
        self.details.part_of_speech()
    }
}

/// Canonical record for one distinct word text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: String,
    pub word: String,
    pub types: Vec<WordType>,
}

impl Word {
    pub fn new(word: &str) -> Self {
        Self {
            id: word_id(word),
            word: word.to_string(),
            types: Vec::new(),
        }
    }

    pub fn word_type(&self, part_of_speech: PartOfSpeech) -> Option<&WordType> {
        self.types
            .iter()
            .find(|t| t.part_of_speech() == part_of_speech)
    }
}
