use crate::extractor::{treatment_attribute, TreatmentMarkers};
use crate::models::{VariantRelation, VerbDetails};
use crate::parser::Node;

pub fn extract_details(structure: &Node, variant: Option<VariantRelation>) -> VerbDetails {
    VerbDetails {
        auxiliary_verb: structure
            .child("VRB-AUXILIAIRE")
            .and_then(|a| a.attr("AUXIL"))
            .map(|a| a.trim().to_string()),
        past_participles: structure
            .children_named("PARTICIPE-PASSE")
            .map(|p| p.text().trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect(),
        variant,
    }
}

/// Reflexivity and impersonal usage belong to the treatment block, not to a single sense.
pub fn treatment_markers(treatment: &Node) -> TreatmentMarkers {
    TreatmentMarkers {
        reflexive_pronoun: treatment_attribute(treatment, "REFLEX-PRONOM", "REFPRON"),
        impersonal_usage: treatment_attribute(treatment, "EMPLOI-IMPERS", "EMPLOI-IMPERS"),
        case: None,
    }
}
