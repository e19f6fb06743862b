use crate::config::REFERENCE_SUFFIX_LEN;
use crate::error::{ExtractError, Result};
use crate::models::{PartOfSpeech, VariantKind, VariantRelation};
use crate::parser::Node;

/// Maps the relation element nested in a `RENVOI-*` block to its kind.
pub fn variant_kind(tag: &str) -> Result<VariantKind> {
    match tag {
        "VARIANTE-HOMOSEME" | "VARIANTE-ORTHOGRAPHIQUE" | "VARIANTE-LOCALE" => {
            Ok(VariantKind::VariantOf)
        }
        "FORME-FEM" => Ok(VariantKind::FeminineFormOf),
        "FORME-ABREGEE" => Ok(VariantKind::ShortFormOf),
        "FORME-DIMINUTIVE" => Ok(VariantKind::DiminutiveFormOf),
        "FORME-MASC" => Ok(VariantKind::MasculineFormOf),
        other => Err(ExtractError::UnknownVariantRelation {
            tag: other.to_string(),
        }),
    }
}

/// Strips the disambiguating suffix from a raw reference, leaving the target article key.
pub fn target_article_key(reference: &str) -> Result<String> {
    let len = reference.chars().count();
    if len <= REFERENCE_SUFFIX_LEN {
        return Err(ExtractError::MalformedReference {
            reference: reference.to_string(),
        });
    }
    Ok(reference.chars().take(len - REFERENCE_SUFFIX_LEN).collect())
}

/// Reads the optional `RENVOI-<code>` cross-reference of a grammatical structure.
pub fn extract_variant(pos: PartOfSpeech, structure: &Node) -> Result<Option<VariantRelation>> {
    let tag = format!("RENVOI-{}", pos.raw_code());
    let Some(renvoi) = structure.child(&tag) else {
        return Ok(None);
    };

    let reference = renvoi.require_attr("REF-ID-ITEM-ADRESSE")?;
    let relation = renvoi
        .first_child()
        .ok_or_else(|| ExtractError::MissingChild {
            parent: renvoi.tag.clone(),
            child: "variant relation".to_string(),
        })?;

    Ok(Some(VariantRelation {
        target_article_key: target_article_key(reference)?,
        target_word_text: None,
        relation_kind: variant_kind(&relation.tag)?,
    }))
}
