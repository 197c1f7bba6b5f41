use serde_json::Value;

use super::{ObySection, SectionOutput};
use crate::mapping::domain::{FamilyTreeData, FamilyTreeMember};
use crate::mapping::inference::assess_continuous_lineage;

const CLAIM_BASIS: &str = "jus-sanguinis";

/// Generation of the Polish ancestor the descent claim rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimGeneration {
    Parent,
    Grandparent,
}

impl ClaimGeneration {
    pub fn as_str(self) -> &'static str {
        match self {
            ClaimGeneration::Parent => "parent",
            ClaimGeneration::Grandparent => "grandparent",
        }
    }
}

/// Side of the family the claim passes through. The first slot of each
/// generation is read as paternal, the second as maternal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AncestorLine {
    Paternal,
    Maternal,
}

impl AncestorLine {
    pub fn as_str(self) -> &'static str {
        match self {
            AncestorLine::Paternal => "paternal",
            AncestorLine::Maternal => "maternal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineageClaim {
    pub generation: ClaimGeneration,
    pub line: AncestorLine,
}

/// Finds the closest Polish-citizen ancestor; parents are checked before grandparents.
pub fn detect_claim(tree: &FamilyTreeData) -> Option<LineageClaim> {
    let citizen = |member: &Option<FamilyTreeMember>| {
        member
            .as_ref()
            .is_some_and(FamilyTreeMember::is_polish_citizen)
    };

    let generations = [
        (ClaimGeneration::Parent, &tree.parent1, &tree.parent2),
        (
            ClaimGeneration::Grandparent,
            &tree.grandparent1,
            &tree.grandparent2,
        ),
    ];

    generations.into_iter().find_map(|(generation, first, second)| {
        if citizen(first) {
            Some(LineageClaim {
                generation,
                line: AncestorLine::Paternal,
            })
        } else if citizen(second) {
            Some(LineageClaim {
                generation,
                line: AncestorLine::Maternal,
            })
        } else {
            None
        }
    })
}

pub fn map_lineage(tree: &FamilyTreeData) -> SectionOutput {
    let claim = detect_claim(tree);

    let mut fields = ObySection::new();
    fields.insert("OBY-L-CLAIM-BASIS".to_string(), Value::from(CLAIM_BASIS));
    fields.insert(
        "OBY-L-GENERATION".to_string(),
        Value::from(claim.map(|c| c.generation.as_str()).unwrap_or_default()),
    );
    fields.insert(
        "OBY-L-ANCESTOR-LINE".to_string(),
        Value::from(claim.map(|c| c.line.as_str()).unwrap_or_default()),
    );
    fields.insert(
        "OBY-L-CONTINUOUS-LINEAGE".to_string(),
        Value::Bool(assess_continuous_lineage(tree)),
    );
    // Assumed, not derived from ancestor data.
    fields.insert("OBY-L-POST-1920-CITIZENSHIP".to_string(), Value::Bool(true));

    let mut output = SectionOutput::new(fields);
    if claim.is_none() {
        output.warn("No Polish ancestor found in family tree");
    }
    output
}
