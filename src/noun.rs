use crate::error::{ExtractError, Result};
use crate::models::{NounDetails, VariantRelation};
use crate::parser::Node;

pub fn extract_details(structure: &Node, variant: Option<VariantRelation>) -> Result<NounDetails> {
    Ok(NounDetails {
        gender: extract_gender(structure)?,
        category: extract_category(structure),
        plural: extract_plural(structure)?,
        variant,
    })
}

fn extract_gender(structure: &Node) -> Result<String> {
    let gender = structure.require_child("GENRE")?.require_attr("GEN")?;
    Ok(gender.trim().to_string())
}

/// Lexical subcategory, e.g. the proper-noun marker.
fn extract_category(structure: &Node) -> Option<String> {
    structure
        .child("CAT-GRAM-SUBST")
        .and_then(|c| c.attr("C-G-SUBST"))
        .map(|c| c.trim().to_string())
}

/// Resolves the plural from whichever category element sits inside `PLURIEL`.
pub fn extract_plural(structure: &Node) -> Result<Option<String>> {
    let Some(plural) = structure.child("PLURIEL") else {
        return Ok(None);
    };
    let category = plural
        .first_child()
        .ok_or_else(|| ExtractError::MissingChild {
            parent: plural.tag.clone(),
            child: "plural category".to_string(),
        })?;

    match category.tag.as_str() {
        "TJ-NOMBRABLE" | "ALT-MASSIF-NOMBRABLE" => {
            let form = category.require_child("FORME-PLURIEL")?;
            Ok(Some(form.text().trim().to_string()))
        }
        "PLURALE-TANTUM" | "TJ-MASSIF" | "SITUATION-PLURIEL-COMPLEXE" => Ok(None),
        other => Err(ExtractError::UnknownPluralCategory {
            tag: other.to_string(),
        }),
    }
}
