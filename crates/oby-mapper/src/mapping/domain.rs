use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Case progress row owned by case management; read-only during a mapping run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub case_id: String,
    pub user_id: String,
    #[serde(default)]
    pub current_phase: Option<String>,
    #[serde(default)]
    pub overall_progress: Option<u8>,
    #[serde(default)]
    pub documents_collected: Option<u32>,
    #[serde(default)]
    pub documents_required: Option<u32>,
    #[serde(default)]
    pub documents_verified: Option<u32>,
}

/// Personal and contact profile captured during client intake.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientDetails {
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub maiden_name: Option<String>,
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub nationality: Option<String>,
    pub passport_number: Option<String>,
    pub marital_status: Option<String>,
    pub occupation: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// Any person in the lineage: the applicant, a parent, or a grandparent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FamilyTreeMember {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub maiden_name: Option<String>,
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub death_date: Option<String>,
    pub death_place: Option<String>,
    pub nationality: Option<String>,
    pub relationship: Option<String>,
    pub polish_citizen: Option<bool>,
    pub citizenship_lost: Option<bool>,
    pub citizenship_lost_date: Option<String>,
    pub citizenship_lost_reason: Option<String>,
    pub emigration_date: Option<String>,
    pub emigration_destination: Option<String>,
    pub marriage_date: Option<String>,
    pub marriage_place: Option<String>,
    pub birth_cert_number: Option<String>,
    pub death_cert_number: Option<String>,
    pub marriage_cert_number: Option<String>,
    pub passport_number: Option<String>,
}

impl FamilyTreeMember {
    pub fn is_polish_citizen(&self) -> bool {
        self.polish_citizen.unwrap_or(false)
    }

    pub fn has_lost_citizenship(&self) -> bool {
        self.citizenship_lost.unwrap_or(false)
    }
}

/// The `treeData` payload: five fixed slots plus any further relatives the
/// family-tree editor stored alongside them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyTreeData {
    pub applicant: Option<FamilyTreeMember>,
    pub parent1: Option<FamilyTreeMember>,
    pub parent2: Option<FamilyTreeMember>,
    pub grandparent1: Option<FamilyTreeMember>,
    pub grandparent2: Option<FamilyTreeMember>,
    #[serde(flatten)]
    pub additional: BTreeMap<String, Value>,
}

impl FamilyTreeData {
    /// Ancestor slots in lineage order: parent1, parent2, grandparent1, grandparent2.
    pub fn ancestors(&self) -> [Option<&FamilyTreeMember>; 4] {
        [
            self.parent1.as_ref(),
            self.parent2.as_ref(),
            self.grandparent1.as_ref(),
            self.grandparent2.as_ref(),
        ]
    }
}

/// Stored family-tree row for a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyTreeRecord {
    pub user_id: String,
    #[serde(default)]
    pub tree_data: FamilyTreeData,
}
