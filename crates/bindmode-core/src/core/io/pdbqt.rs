use super::traits::StructureFile;
use crate::core::diagnostics::MalformedReason;
use crate::core::models::element::Element;
use crate::core::spatial::grid::SpatialError;
use crate::core::utils::identifiers::element_from_atom_name;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;

/// Atom records need every column up to and including the z coordinate.
const MIN_ATOM_LINE_LENGTH: usize = 54;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("No valid ATOM or HETATM records found")]
    NoAtoms,
    #[error("Failed to index atoms for perception: {0}")]
    Spatial(#[from] SpatialError),
}

/// One `ATOM`/`HETATM` record, tokenized but not yet placed in a molecule.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// 1-based line number in the source.
    pub line: usize,
    pub serial: usize,
    pub name: String,
    pub residue_name: String,
    pub chain_id: char,
    pub residue_number: isize,
    pub position: Point3<f64>,
    pub occupancy: Option<f64>,
    pub temperature_factor: Option<f64>,
    pub partial_charge: Option<f64>,
    pub type_code: Option<String>,
    pub element: Element,
    pub hetero: bool,
}

/// Records of the first model plus everything that was skipped on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawStructure {
    pub records: Vec<AtomRecord>,
    /// Atom lines that could not be parsed, with their line numbers.
    pub malformed: Vec<(usize, MalformedReason)>,
    /// Atom records found after the first model ended.
    pub discarded_records: usize,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

fn parse_int<T: std::str::FromStr>(line: &str, start: usize, end: usize) -> Result<T, MalformedReason> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| MalformedReason::InvalidInt {
        columns: format!("{}-{}", start + 1, end),
        value: value.to_string(),
    })
}

fn parse_coordinate(line: &str, start: usize, end: usize) -> Result<f64, MalformedReason> {
    let value = slice_and_trim(line, start, end);
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| MalformedReason::InvalidCoordinate {
            columns: format!("{}-{}", start + 1, end),
            value: value.to_string(),
        })
}

fn parse_optional(line: &str, start: usize, end: usize) -> Option<f64> {
    slice_and_trim(line, start, end)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Reader for fixed-column PDB and PDBQT atom records.
///
/// A line whose columns 71-76 hold a number is read as PDBQT (partial charge plus
/// AutoDock type in columns 78-79); otherwise columns 77-78 are taken as the PDB
/// element symbol.
pub struct PdbqtFile;

impl PdbqtFile {
    fn parse_atom_line(line: &str, line_num: usize, hetero: bool) -> Result<AtomRecord, MalformedReason> {
        if line.len() < MIN_ATOM_LINE_LENGTH {
            return Err(MalformedReason::LineTooShort { length: line.len() });
        }

        let serial: usize = parse_int(line, 6, 11)?;
        let name = slice_and_trim(line, 12, 16).to_string();
        let residue_name = slice_and_trim(line, 17, 20).to_string();
        let chain_id = line
            .get(21..22)
            .and_then(|s| s.chars().next())
            .filter(|c| !c.is_whitespace())
            .unwrap_or(' ');
        let residue_number: isize = parse_int(line, 22, 26)?;
        let x = parse_coordinate(line, 30, 38)?;
        let y = parse_coordinate(line, 38, 46)?;
        let z = parse_coordinate(line, 46, 54)?;
        let occupancy = parse_optional(line, 54, 60);
        let temperature_factor = parse_optional(line, 60, 66);

        let (partial_charge, type_code, element_symbol) = match parse_optional(line, 70, 76) {
            Some(charge) => {
                let code = slice_and_trim(line, 77, 79);
                let code = (!code.is_empty()).then(|| code.to_string());
                (Some(charge), code, None)
            }
            None => {
                let symbol = slice_and_trim(line, 76, 78);
                (None, None, (!symbol.is_empty()).then_some(symbol))
            }
        };

        let element = element_symbol
            .and_then(|symbol| symbol.parse::<Element>().ok())
            .or_else(|| type_code.as_deref().and_then(Element::from_autodock_type))
            .unwrap_or_else(|| element_from_atom_name(&name, &residue_name));

        Ok(AtomRecord {
            line: line_num,
            serial,
            name,
            residue_name,
            chain_id,
            residue_number,
            position: Point3::new(x, y, z),
            occupancy,
            temperature_factor,
            partial_charge,
            type_code,
            element,
            hetero,
        })
    }
}

impl StructureFile for PdbqtFile {
    type Error = ParseError;

    fn read_from(reader: &mut impl BufRead) -> Result<RawStructure, Self::Error> {
        let mut raw = RawStructure::default();
        let mut seen_atom_lines = false;
        let mut model_closed = false;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let record_type = slice_and_trim(&line, 0, 6);

            match record_type {
                "ATOM" | "HETATM" => {
                    if model_closed {
                        raw.discarded_records += 1;
                        continue;
                    }
                    seen_atom_lines = true;
                    match Self::parse_atom_line(&line, line_num, record_type == "HETATM") {
                        Ok(record) => raw.records.push(record),
                        Err(reason) => raw.malformed.push((line_num, reason)),
                    }
                }
                "ENDMDL" | "END" if seen_atom_lines => model_closed = true,
                _ => {}
            }
        }

        if raw.records.is_empty() {
            return Err(ParseError::NoAtoms);
        }
        Ok(raw)
    }
}
