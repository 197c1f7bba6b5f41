//! Case-to-OBY mapping pipeline: loads a case with its client profile and family
//! tree, maps them onto the OBY sections, and gates the result on the schema.

pub mod document;
pub mod domain;
pub mod inference;
pub mod repository;
pub mod sections;
mod service;

#[cfg(test)]
mod tests;

pub use document::{MappingOutcome, MappingResult, ObyDocument, ObyMeta};
pub use domain::{CaseRecord, ClientDetails, FamilyTreeData, FamilyTreeMember, FamilyTreeRecord};
pub use repository::{CaseDataSource, RepositoryError};
pub use sections::{ObySection, SectionOutput};
pub use service::{assemble_document, ObyMapper};
