use crate::core::models::element::Element;
use phf::{Set, phf_set};

static STANDARD_RESIDUE_NAMES: Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "CYX", "GLN", "GLU", "GLY", "HIS", "HID", "HIE",
    "HIP", "HSD", "HSE", "HSP", "ILE", "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR",
    "TRP", "TYR", "VAL",
};

static WATER_RESIDUE_NAMES: Set<&'static str> = phf_set! {
    "HOH", "WAT", "H2O", "TIP", "TIP3", "SOL", "DOD",
};

static TWO_LETTER_NAME_PREFIXES: Set<&'static str> = phf_set! {
    "CL", "BR",
};

pub fn is_standard_residue(residue_name: &str) -> bool {
    STANDARD_RESIDUE_NAMES.contains(residue_name.trim())
}

pub fn is_water_residue(residue_name: &str) -> bool {
    WATER_RESIDUE_NAMES.contains(residue_name.trim())
}

/// Infers an element from an atom name when no element column or type code is present.
///
/// Leading digits are ignored (`"1HB"` is a hydrogen). A name that equals its residue
/// name and spells a metal (e.g. atom `ZN` in residue `ZN`) is taken as that metal, and
/// `CL`/`BR` prefixes outside standard residues are read as halogens. Otherwise the first
/// letter decides.
pub fn element_from_atom_name(atom_name: &str, residue_name: &str) -> Element {
    let name = atom_name.trim().trim_start_matches(|c: char| c.is_ascii_digit());
    let residue = residue_name.trim();
    let upper = name.to_ascii_uppercase();

    if upper == residue.to_ascii_uppercase() {
        if let Ok(element) = upper.parse::<Element>() {
            if element.is_metal() || upper.len() == 2 {
                return element;
            }
        }
    }

    if !is_standard_residue(residue) && upper.len() >= 2 {
        if let Some(prefix) = upper.get(..2) {
            if TWO_LETTER_NAME_PREFIXES.contains(prefix) {
                if let Ok(element) = prefix.parse() {
                    return element;
                }
            }
        }
    }

    upper
        .chars()
        .find(|c| c.is_ascii_alphabetic())
        .and_then(|c| c.to_string().parse().ok())
        .unwrap_or(Element::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_residues_are_recognized() {
        assert!(is_standard_residue("ALA"));
        assert!(is_standard_residue(" HIP "));
        assert!(!is_standard_residue("UNL"));
        assert!(!is_standard_residue("HOH"));
    }

    #[test]
    fn waters_are_recognized() {
        assert!(is_water_residue("HOH"));
        assert!(is_water_residue("WAT"));
        assert!(!is_water_residue("LIG"));
    }

    #[test]
    fn protein_atom_names_use_first_letter() {
        assert_eq!(element_from_atom_name("CA", "ALA"), Element::C);
        assert_eq!(element_from_atom_name("OG1", "THR"), Element::O);
        assert_eq!(element_from_atom_name("1HB", "ALA"), Element::H);
        assert_eq!(element_from_atom_name("SG", "CYS"), Element::S);
    }

    #[test]
    fn ion_residues_resolve_to_metals() {
        assert_eq!(element_from_atom_name("ZN", "ZN"), Element::Zn);
        assert_eq!(element_from_atom_name("MG", "MG"), Element::Mg);
        assert_eq!(element_from_atom_name("CA", "CA"), Element::Ca);
    }

    #[test]
    fn ligand_halogens_use_two_letter_prefix() {
        assert_eq!(element_from_atom_name("CL1", "UNL"), Element::Cl);
        assert_eq!(element_from_atom_name("BR", "LIG"), Element::Br);
        assert_eq!(element_from_atom_name("C12", "UNL"), Element::C);
    }

    #[test]
    fn unreadable_names_are_unknown() {
        assert_eq!(element_from_atom_name("123", "UNL"), Element::Unknown);
        assert_eq!(element_from_atom_name("", "UNL"), Element::Unknown);
    }
}
