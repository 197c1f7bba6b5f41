use super::{present, SectionBuilder, SectionOutput};
use crate::mapping::domain::FamilyTreeMember;
use crate::mapping::inference::{extract_country, normalize_relationship};

/// Fixed ancestor slots of the family tree and their OBY key prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AncestorSlot {
    Parent1,
    Parent2,
    Grandparent1,
    Grandparent2,
}

impl AncestorSlot {
    pub fn prefix(self) -> &'static str {
        match self {
            AncestorSlot::Parent1 => "P1",
            AncestorSlot::Parent2 => "P2",
            AncestorSlot::Grandparent1 => "GP1",
            AncestorSlot::Grandparent2 => "GP2",
        }
    }

    fn ordinal(self) -> &'static str {
        match self {
            AncestorSlot::Parent1 | AncestorSlot::Grandparent1 => "first",
            AncestorSlot::Parent2 | AncestorSlot::Grandparent2 => "second",
        }
    }

    fn role(self) -> &'static str {
        match self {
            AncestorSlot::Parent1 | AncestorSlot::Parent2 => "parent",
            AncestorSlot::Grandparent1 | AncestorSlot::Grandparent2 => "grandparent",
        }
    }

    fn missing_warning(self) -> String {
        format!("Missing {} {} data", self.ordinal(), self.role())
    }
}

/// Maps a parent slot. An absent parent yields one warning and a section whose
/// keys all hold their empty defaults; a present parent only warns about
/// missing names.
pub fn map_parent(member: Option<&FamilyTreeMember>, slot: AncestorSlot) -> SectionOutput {
    debug_assert!(matches!(slot, AncestorSlot::Parent1 | AncestorSlot::Parent2));

    let Some(parent) = member else {
        let mut output = SectionOutput::new(parent_fields(slot, &FamilyTreeMember::default()));
        output.warn(slot.missing_warning());
        return output;
    };

    let mut output = SectionOutput::new(parent_fields(slot, parent));
    if present(&parent.first_name).is_none() {
        output.warn(format!("Missing {} parent given names", slot.prefix()));
    }
    if present(&parent.last_name).is_none() {
        output.warn(format!("Missing {} parent surname", slot.prefix()));
    }
    output
}

/// Maps a grandparent slot with the same member-level all-or-nothing policy as
/// parents. The relationship is only inferred for a grandparent that exists.
pub fn map_grandparent(member: Option<&FamilyTreeMember>, slot: AncestorSlot) -> SectionOutput {
    debug_assert!(matches!(
        slot,
        AncestorSlot::Grandparent1 | AncestorSlot::Grandparent2
    ));

    match member {
        Some(grandparent) => {
            let relationship = normalize_relationship(present(&grandparent.relationship));
            SectionOutput::new(grandparent_fields(slot, grandparent, relationship))
        }
        None => {
            let mut output = SectionOutput::new(grandparent_fields(
                slot,
                &FamilyTreeMember::default(),
                "",
            ));
            output.warn(slot.missing_warning());
            output
        }
    }
}

fn parent_fields(slot: AncestorSlot, member: &FamilyTreeMember) -> super::ObySection {
    let mut builder = SectionBuilder::new(slot.prefix());
    builder
        .text("GN", present(&member.first_name))
        .text("SN", present(&member.last_name))
        .text("MAIDEN", present(&member.maiden_name))
        .text("DOB", present(&member.birth_date))
        .text("POB", present(&member.birth_place))
        .text(
            "POB-COUNTRY",
            Some(extract_country(present(&member.birth_place)).as_str()),
        )
        .text("DOD", present(&member.death_date))
        .text("POD", present(&member.death_place))
        .text("NATIONALITY", present(&member.nationality))
        .flag("POLISH-CITIZEN", member.is_polish_citizen())
        .flag("CITIZENSHIP-LOST", member.has_lost_citizenship())
        .text("CITIZENSHIP-LOST-DATE", present(&member.citizenship_lost_date))
        .text(
            "CITIZENSHIP-LOST-REASON",
            present(&member.citizenship_lost_reason),
        )
        .text("EMIGRATION-DATE", present(&member.emigration_date))
        .text(
            "EMIGRATION-DESTINATION",
            present(&member.emigration_destination),
        )
        .text("MARRIAGE-DATE", present(&member.marriage_date))
        .text("MARRIAGE-PLACE", present(&member.marriage_place))
        .text("BIRTH-CERT-NO", present(&member.birth_cert_number))
        .text("DEATH-CERT-NO", present(&member.death_cert_number))
        .text("MARRIAGE-CERT-NO", present(&member.marriage_cert_number))
        .text("PASSPORT-NO", present(&member.passport_number));
    builder.finish()
}

fn grandparent_fields(
    slot: AncestorSlot,
    member: &FamilyTreeMember,
    relationship: &str,
) -> super::ObySection {
    let mut builder = SectionBuilder::new(slot.prefix());
    builder
        .text("GN", present(&member.first_name))
        .text("SN", present(&member.last_name))
        .text("MAIDEN", present(&member.maiden_name))
        .text("DOB", present(&member.birth_date))
        .text("POB", present(&member.birth_place))
        .text(
            "POB-COUNTRY",
            Some(extract_country(present(&member.birth_place)).as_str()),
        )
        .text("DOD", present(&member.death_date))
        .text("POD", present(&member.death_place))
        .text("RELATIONSHIP", Some(relationship))
        .flag("POLISH-CITIZEN", member.is_polish_citizen())
        .flag("CITIZENSHIP-LOST", member.has_lost_citizenship())
        .text("CITIZENSHIP-LOST-DATE", present(&member.citizenship_lost_date))
        .text("EMIGRATION-DATE", present(&member.emigration_date))
        .text(
            "EMIGRATION-DESTINATION",
            present(&member.emigration_destination),
        )
        .text("BIRTH-CERT-NO", present(&member.birth_cert_number))
        .text("DEATH-CERT-NO", present(&member.death_cert_number));
    builder.finish()
}
