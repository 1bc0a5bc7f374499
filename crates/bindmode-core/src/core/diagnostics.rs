use crate::core::models::molecule::MoleculeRole;
use crate::core::models::residue::ResidueKey;
use serde::Serialize;
use thiserror::Error;

/// Why an atom record was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedReason {
    #[error("line is too short for an atom record ({length} characters)")]
    LineTooShort { length: usize },
    #[error("invalid integer in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("invalid coordinate in columns {columns} (value: '{value}')")]
    InvalidCoordinate { columns: String, value: String },
}

/// Non-fatal conditions encountered while loading a structure.
///
/// Warnings never abort an analysis; they are returned next to the report and
/// logged as they are produced.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    #[error("{role}: skipped malformed atom record on line {line}: {reason}")]
    MalformedAtom {
        role: MoleculeRole,
        line: usize,
        reason: MalformedReason,
    },
    #[error("{role}: residue {residue} is missing atom '{atom}'")]
    MissingAtom {
        role: MoleculeRole,
        residue: ResidueKey,
        atom: String,
    },
    #[error("{role}: only the first model was analyzed, {discarded_records} atom records discarded")]
    MultiModel {
        role: MoleculeRole,
        discarded_records: usize,
    },
}

impl Warning {
    pub fn role(&self) -> MoleculeRole {
        match self {
            Warning::MalformedAtom { role, .. }
            | Warning::MissingAtom { role, .. }
            | Warning::MultiModel { role, .. } => *role,
        }
    }
}
