//! Provides input functionality for molecular structure files.
//!
//! [`pdbqt::PdbqtFile`] tokenizes fixed-column PDB and PDBQT atom records through the
//! [`traits::StructureFile`] interface. [`load_molecule`] and [`load_molecule_from`]
//! turn those records into a fully perceived [`Molecule`], collecting every non-fatal
//! problem as a [`Warning`].

pub mod pdbqt;
pub mod traits;

use crate::core::chem::PerceptionParams;
use crate::core::diagnostics::Warning;
use crate::core::models::atom::Atom;
use crate::core::models::builder::MoleculeBuilder;
use crate::core::models::molecule::{Molecule, MoleculeRole};
use crate::core::topology::registry::TemplateRegistry;
use pdbqt::{ParseError, PdbqtFile, RawStructure};
use std::io::BufRead;
use std::path::Path;
use tracing::info;
use traits::StructureFile;

/// A molecule together with the warnings raised while loading it.
#[derive(Debug, Clone)]
pub struct LoadedMolecule {
    pub molecule: Molecule,
    pub warnings: Vec<Warning>,
}

/// Loads and perceives a structure file.
///
/// # Errors
///
/// Returns [`ParseError`] if the file cannot be read or holds no valid atom record.
pub fn load_molecule<P: AsRef<Path>>(
    path: P,
    role: MoleculeRole,
    registry: &TemplateRegistry,
    params: &PerceptionParams,
) -> Result<LoadedMolecule, ParseError> {
    let raw = PdbqtFile::read_from_path(path.as_ref())?;
    assemble(raw, role, registry, params)
}

/// Same as [`load_molecule`] for an already opened reader.
pub fn load_molecule_from(
    reader: &mut impl BufRead,
    role: MoleculeRole,
    registry: &TemplateRegistry,
    params: &PerceptionParams,
) -> Result<LoadedMolecule, ParseError> {
    let raw = PdbqtFile::read_from(reader)?;
    assemble(raw, role, registry, params)
}

fn assemble(
    raw: RawStructure,
    role: MoleculeRole,
    registry: &TemplateRegistry,
    params: &PerceptionParams,
) -> Result<LoadedMolecule, ParseError> {
    let mut warnings: Vec<Warning> = raw
        .malformed
        .into_iter()
        .map(|(line, reason)| Warning::MalformedAtom { role, line, reason })
        .collect();
    if raw.discarded_records > 0 {
        warnings.push(Warning::MultiModel {
            role,
            discarded_records: raw.discarded_records,
        });
    }

    let mut builder = MoleculeBuilder::new(role);
    let mut current_residue: Option<(char, isize, &str)> = None;
    for record in &raw.records {
        let key = (record.chain_id, record.residue_number, record.residue_name.as_str());
        if current_residue != Some(key) {
            builder.start_residue(record.chain_id, record.residue_number, &record.residue_name);
            current_residue = Some(key);
        }

        let mut atom = Atom::new(
            record.serial,
            &record.name,
            record.element,
            Default::default(),
            record.position,
        );
        atom.type_code = record.type_code.clone();
        atom.partial_charge = record.partial_charge;
        atom.occupancy = record.occupancy;
        atom.temperature_factor = record.temperature_factor;
        builder.add_atom(atom);
    }

    let (molecule, perception_warnings) = builder.build(registry, params)?;
    warnings.extend(perception_warnings);

    info!(
        %role,
        atoms = molecule.atom_count(),
        residues = molecule.residue_count(),
        warnings = warnings.len(),
        "Structure loaded."
    );

    Ok(LoadedMolecule { molecule, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ring::ChargeSign;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const ARG_FRAGMENT: &str = "\
ATOM      1  CD  ARG A  42       0.000   0.000   0.000  1.00  0.00           C
ATOM      2  NE  ARG A  42       1.460   0.000   0.000  1.00  0.00           N
ATOM      3  CZ  ARG A  42       2.120   1.150   0.000  1.00  0.00           C
ATOM      4  NH1 ARG A  42       1.460   2.300   0.000  1.00  0.00           N
ATOM      5  NH2 ARG A  42       3.450   1.150   0.000  1.00  0.00           N
ATOM      6  XX  ARG A  42       bad     1.150   0.000  1.00  0.00           N
END
ATOM      7  CA  GLY A  43       9.000   9.000   9.000  1.00  0.00           C
";

    #[test]
    fn load_collects_parse_and_template_warnings() {
        let loaded = load_molecule_from(
            &mut Cursor::new(ARG_FRAGMENT),
            MoleculeRole::Receptor,
            &TemplateRegistry::standard(),
            &PerceptionParams::default(),
        )
        .unwrap();
        let molecule = &loaded.molecule;
        assert_eq!(molecule.atom_count(), 5);
        assert_eq!(molecule.residue_count(), 1);

        let groups = molecule.charged_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].sign(), ChargeSign::Positive);

        let malformed = loaded
            .warnings
            .iter()
            .filter(|w| matches!(w, Warning::MalformedAtom { line: 6, .. }))
            .count();
        assert_eq!(malformed, 1);
        assert!(loaded
            .warnings
            .iter()
            .any(|w| matches!(w, Warning::MultiModel { discarded_records: 1, .. })));
        // N, CA, C, O, CB and CG are absent from the fragment.
        let missing = loaded
            .warnings
            .iter()
            .filter(|w| matches!(w, Warning::MissingAtom { .. }))
            .count();
        assert_eq!(missing, 6);
    }

    #[test]
    fn load_from_path_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "HETATM    1  O1  LIG L   1       0.000   0.000   0.000  1.00  0.00           O\n"
        )
        .unwrap();
        let loaded = load_molecule(
            file.path(),
            MoleculeRole::Ligand,
            &TemplateRegistry::standard(),
            &PerceptionParams::default(),
        )
        .unwrap();
        assert_eq!(loaded.molecule.role(), MoleculeRole::Ligand);
        assert_eq!(loaded.molecule.atom_count(), 1);
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_molecule(
            "/nonexistent/receptor.pdbqt",
            MoleculeRole::Receptor,
            &TemplateRegistry::standard(),
            &PerceptionParams::default(),
        );
        assert!(matches!(result, Err(ParseError::Io(_))));
    }
}
