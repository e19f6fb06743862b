use crate::extractor::{treatment_attribute, TreatmentMarkers};
use crate::parser::Node;

/// The governed case is a property of the whole treatment block.
pub fn treatment_markers(treatment: &Node) -> TreatmentMarkers {
    TreatmentMarkers {
        case: treatment_attribute(treatment, "REGIME-CAS", "CAS"),
        ..Default::default()
    }
}
