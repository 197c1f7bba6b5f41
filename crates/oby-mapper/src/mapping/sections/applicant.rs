use super::{present, SectionBuilder, SectionOutput};
use crate::mapping::domain::{ClientDetails, FamilyTreeMember};
use crate::mapping::inference::{extract_country, normalize_marital_status};

/// Applicant attributes gathered from the client profile and the family tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicantProfile {
    pub given_names: Option<String>,
    pub surname: Option<String>,
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub nationality: Option<String>,
    pub passport_number: Option<String>,
    pub marital_status: Option<String>,
    pub profession: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ApplicantProfile {
    pub fn from_client(client: &ClientDetails) -> Self {
        Self {
            given_names: owned(&client.first_name),
            surname: owned(&client.last_name),
            birth_date: owned(&client.birth_date),
            birth_place: owned(&client.birth_place),
            nationality: owned(&client.nationality),
            passport_number: owned(&client.passport_number),
            marital_status: owned(&client.marital_status),
            profession: owned(&client.occupation),
            email: owned(&client.email),
            phone: owned(&client.phone),
        }
    }

    /// Returns a profile where every non-empty family-tree value replaces the
    /// client-entered one.
    pub fn merge(self, overlay: &FamilyTreeMember) -> Self {
        Self {
            given_names: owned(&overlay.first_name).or(self.given_names),
            surname: owned(&overlay.last_name).or(self.surname),
            birth_date: owned(&overlay.birth_date).or(self.birth_date),
            birth_place: owned(&overlay.birth_place).or(self.birth_place),
            nationality: owned(&overlay.nationality).or(self.nationality),
            passport_number: owned(&overlay.passport_number).or(self.passport_number),
            ..self
        }
    }
}

fn owned(value: &Option<String>) -> Option<String> {
    present(value).map(str::to_string)
}

pub fn map_applicant(
    client: Option<&ClientDetails>,
    tree_applicant: Option<&FamilyTreeMember>,
) -> SectionOutput {
    let base = client.map(ApplicantProfile::from_client).unwrap_or_default();
    let profile = match tree_applicant {
        Some(member) => base.merge(member),
        None => base,
    };

    let mut builder = SectionBuilder::new("A");
    builder
        .text("GN", profile.given_names.as_deref())
        .text("SN", profile.surname.as_deref())
        .text("DOB", profile.birth_date.as_deref())
        .text("POB", profile.birth_place.as_deref())
        .text(
            "POB-COUNTRY",
            Some(extract_country(profile.birth_place.as_deref()).as_str()),
        )
        .text("NATIONALITY", profile.nationality.as_deref())
        .text("PASSPORT-NO", profile.passport_number.as_deref())
        .text(
            "MARITAL-STATUS",
            Some(normalize_marital_status(profile.marital_status.as_deref())),
        )
        .text("PROFESSION", profile.profession.as_deref())
        .text("EMAIL", profile.email.as_deref())
        .text("PHONE", profile.phone.as_deref());

    let mut output = SectionOutput::new(builder.finish());
    if profile.given_names.is_none() {
        output.warn("Missing applicant given names");
    }
    if profile.surname.is_none() {
        output.warn("Missing applicant surname");
    }
    if profile.birth_date.is_none() {
        output.warn("Missing applicant date of birth");
    }
    if profile.birth_place.is_none() {
        output.warn("Missing applicant place of birth");
    }
    output
}
