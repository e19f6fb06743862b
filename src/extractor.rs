//! Grammatical detail extraction shared by every part of speech.
//!
//! [`extract_word_type`] is the single entry point. It matches on the part of speech and
//! delegates the category-specific extras to [`crate::noun`], [`crate::verb`] and
//! [`crate::preposition`]; everything else (variants, meanings, translations, examples)
//! is common code in this module.

use crate::error::Result;
use crate::models::{
    BaseDetails, LanguageCode, Meaning, PartOfSpeech, Translation, TypeDetails, UsageExample,
    WordType,
};
use crate::parser::Node;
use crate::variant::extract_variant;
use crate::{noun, preposition, verb};

/// Extracts one grammatical structure (e.g. a `MS-TYPE-SUBST` element) into a word type fragment.
pub fn extract_word_type(
    pos: PartOfSpeech,
    article_key: &str,
    word: &str,
    structure: &Node,
) -> Result<WordType> {
    Ok(WordType {
        details: extract_details(pos, structure)?,
        article_key: article_key.to_string(),
        audio: None,
        meanings: extract_meanings(pos, word, structure)?,
    })
}

pub fn extract_details(pos: PartOfSpeech, structure: &Node) -> Result<TypeDetails> {
    let variant = extract_variant(pos, structure)?;
    let details = match pos {
        PartOfSpeech::Noun => TypeDetails::Noun(noun::extract_details(structure, variant)?),
        PartOfSpeech::Verb => TypeDetails::Verb(verb::extract_details(structure, variant)),
        PartOfSpeech::Preposition => TypeDetails::Preposition(BaseDetails { variant }),
        PartOfSpeech::Adjective => TypeDetails::Adjective(BaseDetails { variant }),
        PartOfSpeech::Adverb => TypeDetails::Adverb(BaseDetails { variant }),
        PartOfSpeech::Conjunction => TypeDetails::Conjunction(BaseDetails { variant }),
    };
    Ok(details)
}

/// Properties of a linguistic treatment block that apply to every sense inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreatmentMarkers {
    pub reflexive_pronoun: Option<String>,
    pub impersonal_usage: Option<String>,
    pub case: Option<String>,
}

impl TreatmentMarkers {
    fn apply(&self, meaning: &mut Meaning) {
        meaning.reflexive_pronoun = self.reflexive_pronoun.clone();
        meaning.impersonal_usage = self.impersonal_usage.clone();
        meaning.case = self.case.clone();
    }
}

/// Reads `attribute` from the treatment block itself, or from its `marker` child.
pub fn treatment_attribute(treatment: &Node, marker: &str, attribute: &str) -> Option<String> {
    treatment
        .attr(attribute)
        .or_else(|| treatment.child(marker).and_then(|m| m.attr(attribute)))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn treatment_markers(pos: PartOfSpeech, treatment: &Node) -> TreatmentMarkers {
    match pos {
        PartOfSpeech::Verb => verb::treatment_markers(treatment),
        PartOfSpeech::Preposition => preposition::treatment_markers(treatment),
        _ => TreatmentMarkers::default(),
    }
}

/// One meaning per non-subordinate sense, across every treatment block and translation unit.
pub fn extract_meanings(pos: PartOfSpeech, word: &str, structure: &Node) -> Result<Vec<Meaning>> {
    let treatment_tag = format!("TRAITEMENT-LING-{}", pos.raw_code());
    let mut meanings = Vec::new();

    for treatment in structure.children_named(&treatment_tag) {
        let markers = treatment_markers(pos, treatment);
        for unit in treatment.children_named("UNITE-TRAD") {
            for block in unit.children_named("PAS-DE-TRAD-SUBORDONNANTE") {
                let sense = block.require_child("UNITE-DE-SENS")?;
                let mut meaning = extract_meaning(word, sense);
                markers.apply(&mut meaning);
                meanings.push(meaning);
            }
        }
    }

    Ok(meanings)
}

pub fn extract_meaning(word: &str, sense: &Node) -> Meaning {
    Meaning {
        translations: LanguageCode::SUPPORTED.map(|code| extract_translation(code, sense)),
        examples: extract_examples(word, sense),
        synonyms: extract_synonyms(sense),
        poly_lex: extract_poly_lex(sense),
        reflexive_pronoun: None,
        impersonal_usage: None,
        case: None,
    }
}

/// Rebuilds an example sentence around the headword: `"<prefix> <word><suffix>"`, trimmed.
pub fn splice_example(prefix: &str, word: &str, suffix: &str) -> String {
    format!("{} {}{}", prefix, word, suffix).trim().to_string()
}

pub fn extract_examples(word: &str, sense: &Node) -> Vec<UsageExample> {
    let Some(exemplification) = sense.child("EXEMPLIFICATION") else {
        return Vec::new();
    };

    exemplification
        .children_named("EXEMPLE")
        .map(|example| {
            let mut texts = example
                .child("TEXTE-EX")
                .into_iter()
                .flat_map(|t| t.children_named("TEXTE"))
                .map(Node::text);
            let prefix = texts.next().unwrap_or_default();
            let suffix = texts.next().unwrap_or_default();
            UsageExample {
                usage_tags: example.attr("MARQUE-USAGE").unwrap_or_default().to_string(),
                text: splice_example(prefix, word, suffix),
            }
        })
        .collect()
}

pub fn extract_synonyms(sense: &Node) -> Vec<String> {
    let Some(synonyms) = sense.child("SYNONYMES") else {
        return Vec::new();
    };

    synonyms
        .children_named("SYN-PRESENTS")
        .filter_map(|s| s.child("TERME-SYN"))
        .map(|t| t.text().trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn extract_poly_lex(sense: &Node) -> Option<String> {
    sense
        .child("UNITE-POLYLEX-LUX")
        .map(|n| n.text().trim().to_string())
}

/// Reads the `EQUIV-TRAD-<code>` block of a sense. A missing block is not an error.
pub fn extract_translation(language_code: LanguageCode, sense: &Node) -> Translation {
    let Some(equivalent) = sense.child(&format!("EQUIV-TRAD-{}", language_code.as_str())) else {
        return Translation::missing(language_code);
    };

    let initial = language_code.initial();
    let text = equivalent
        .child(&format!("ET{}-EXPLICITE", initial))
        .map(|n| n.text().trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    let complement = equivalent
        .child(&format!("RS-ET{}-PRESENTE", initial))
        .map(|n| n.text().trim().to_string());

    Translation {
        language_code,
        text,
        complement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;
    use crate::models::VariantKind;
    use crate::parser::parse_str;

    const SENSE: &str = r#"
        <UNITE-DE-SENS>
            <EXEMPLIFICATION>
                <EXEMPLE MARQUE-USAGE="FAM">
                    <TEXTE-EX><TEXTE>dat ass mäin</TEXTE><TEXTE>!</TEXTE></TEXTE-EX>
                </EXEMPLE>
                <EXEMPLE>
                    <TEXTE-EX><TEXTE>e groussen</TEXTE></TEXTE-EX>
                </EXEMPLE>
            </EXEMPLIFICATION>
            <SYNONYMES>
                <SYN-PRESENTS><TERME-SYN>Heem</TERME-SYN></SYN-PRESENTS>
                <SYN-PRESENTS><TERME-SYN> Wunneng </TERME-SYN></SYN-PRESENTS>
            </SYNONYMES>
            <EQUIV-TRAD-ALL><ETA-EXPLICITE GENRE="NEUTRAL">Haus</ETA-EXPLICITE></EQUIV-TRAD-ALL>
            <EQUIV-TRAD-FR>
                <ETF-EXPLICITE>maison</ETF-EXPLICITE>
                <RS-ETF-PRESENTE> familiale </RS-ETF-PRESENTE>
            </EQUIV-TRAD-FR>
            <EQUIV-TRAD-EN><ETE-EXPLICITE>house</ETE-EXPLICITE></EQUIV-TRAD-EN>
        </UNITE-DE-SENS>"#;

    #[test]
    fn splices_word_between_prefix_and_suffix() {
        assert_eq!(splice_example("dat ass mäin", "Haus", "!"), "dat ass mäin Haus!");
        assert_eq!(splice_example("e groussen", "Haus", ""), "e groussen Haus");
        assert_eq!(splice_example("", "Haus", " ass do"), "Haus ass do");
    }

    #[test]
    fn extracts_examples_with_usage_tags() {
        let sense = parse_str(SENSE).unwrap();
        let examples = extract_examples("Haus", &sense);
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].usage_tags, "FAM");
        assert_eq!(examples[0].text, "dat ass mäin Haus!");
        assert_eq!(examples[1].usage_tags, "");
        assert_eq!(examples[1].text, "e groussen Haus");
    }

    #[test]
    fn missing_exemplification_yields_no_examples() {
        let sense = parse_str("<UNITE-DE-SENS/>").unwrap();
        assert!(extract_examples("Haus", &sense).is_empty());
        assert!(extract_synonyms(&sense).is_empty());
        assert_eq!(extract_poly_lex(&sense), None);
    }

    #[test]
    fn extracts_synonyms() {
        let sense = parse_str(SENSE).unwrap();
        assert_eq!(extract_synonyms(&sense), vec!["Heem", "Wunneng"]);
    }

    #[test]
    fn builds_translations_for_all_four_languages_in_order() {
        let sense = parse_str(SENSE).unwrap();
        let meaning = extract_meaning("Haus", &sense);

        let codes: Vec<_> = meaning.translations.iter().map(|t| t.language_code).collect();
        assert_eq!(codes, LanguageCode::SUPPORTED.to_vec());

        assert_eq!(meaning.translations[0].text.as_deref(), Some("Haus"));
        assert_eq!(meaning.translations[1].text.as_deref(), Some("maison"));
        assert_eq!(meaning.translations[1].complement.as_deref(), Some("familiale"));
        assert_eq!(meaning.translations[2], Translation::missing(LanguageCode::Po));
        assert_eq!(meaning.translations[3].text.as_deref(), Some("house"));
        assert_eq!(meaning.translations[3].complement, None);
    }

    #[test]
    fn reads_poly_lex_marker() {
        let sense =
            parse_str("<UNITE-DE-SENS><UNITE-POLYLEX-LUX>an der Rei</UNITE-POLYLEX-LUX></UNITE-DE-SENS>")
                .unwrap();
        assert_eq!(extract_poly_lex(&sense).as_deref(), Some("an der Rei"));
    }

    #[test]
    fn one_meaning_per_sense_across_treatments_and_units() {
        let structure = parse_str(
            r#"<MS-TYPE-ADV>
                <TRAITEMENT-LING-ADV>
                    <UNITE-TRAD>
                        <PAS-DE-TRAD-SUBORDONNANTE><UNITE-DE-SENS/></PAS-DE-TRAD-SUBORDONNANTE>
                        <PAS-DE-TRAD-SUBORDONNANTE><UNITE-DE-SENS/></PAS-DE-TRAD-SUBORDONNANTE>
                    </UNITE-TRAD>
                    <UNITE-TRAD>
                        <PAS-DE-TRAD-SUBORDONNANTE><UNITE-DE-SENS/></PAS-DE-TRAD-SUBORDONNANTE>
                    </UNITE-TRAD>
                </TRAITEMENT-LING-ADV>
                <TRAITEMENT-LING-ADV>
                    <UNITE-TRAD>
                        <PAS-DE-TRAD-SUBORDONNANTE><UNITE-DE-SENS/></PAS-DE-TRAD-SUBORDONNANTE>
                    </UNITE-TRAD>
                </TRAITEMENT-LING-ADV>
            </MS-TYPE-ADV>"#,
        )
        .unwrap();
        let meanings = extract_meanings(PartOfSpeech::Adverb, "haut", &structure).unwrap();
        assert_eq!(meanings.len(), 4);
    }

    #[test]
    fn sense_block_without_sense_is_an_error() {
        let structure = parse_str(
            "<MS-TYPE-ADJ><TRAITEMENT-LING-ADJ><UNITE-TRAD><PAS-DE-TRAD-SUBORDONNANTE/></UNITE-TRAD></TRAITEMENT-LING-ADJ></MS-TYPE-ADJ>",
        )
        .unwrap();
        let err = extract_meanings(PartOfSpeech::Adjective, "grouss", &structure).unwrap_err();
        assert!(matches!(err, ExtractError::MissingChild { ref child, .. } if child == "UNITE-DE-SENS"));
    }

    #[test]
    fn base_details_carry_only_the_variant() {
        let structure = parse_str(
            r#"<MS-TYPE-CONJ><RENVOI-CONJ REF-ID-ITEM-ADRESSE="AWER1.01"><VARIANTE-LOCALE/></RENVOI-CONJ></MS-TYPE-CONJ>"#,
        )
        .unwrap();
        let details = extract_details(PartOfSpeech::Conjunction, &structure).unwrap();
        assert_eq!(details.part_of_speech(), PartOfSpeech::Conjunction);
        let variant = details.variant().unwrap();
        assert_eq!(variant.target_article_key, "AWER1");
        assert_eq!(variant.relation_kind, VariantKind::VariantOf);
    }

    #[test]
    fn treatment_attribute_prefers_block_then_marker() {
        let on_block = parse_str(r#"<T CAS=" DAT "><REGIME-CAS CAS="AKK"/></T>"#).unwrap();
        assert_eq!(
            treatment_attribute(&on_block, "REGIME-CAS", "CAS").as_deref(),
            Some("DAT")
        );
        let on_marker = parse_str(r#"<T><REGIME-CAS CAS="AKK"/></T>"#).unwrap();
        assert_eq!(
            treatment_attribute(&on_marker, "REGIME-CAS", "CAS").as_deref(),
            Some("AKK")
        );
        let absent = parse_str("<T/>").unwrap();
        assert_eq!(treatment_attribute(&absent, "REGIME-CAS", "CAS"), None);
    }

    #[test]
    fn adjective_meanings_have_no_treatment_markers() {
        let structure = parse_str(
            r#"<MS-TYPE-ADJ><TRAITEMENT-LING-ADJ CAS="DAT"><UNITE-TRAD><PAS-DE-TRAD-SUBORDONNANTE><UNITE-DE-SENS/></PAS-DE-TRAD-SUBORDONNANTE></UNITE-TRAD></TRAITEMENT-LING-ADJ></MS-TYPE-ADJ>"#,
        )
        .unwrap();
        let meanings = extract_meanings(PartOfSpeech::Adjective, "grouss", &structure).unwrap();
        assert_eq!(meanings[0].case, None);
    }
}
