use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Chemical elements recognized by the structure loader.
///
/// Only elements that commonly occur in receptor-ligand complexes are modeled
/// explicitly; anything else is mapped to [`Element::Unknown`] and treated as a
/// generic heavy atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Element {
    H,
    C,
    N,
    O,
    S,
    P,
    F,
    Cl,
    Br,
    I,
    Se,
    Na,
    K,
    Mg,
    Ca,
    Mn,
    Fe,
    Co,
    Ni,
    Cu,
    Zn,
    Unknown,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown element symbol '{0}'")]
pub struct ParseElementError(pub String);

impl Element {
    /// Returns the conventional capitalized symbol (e.g. `"Zn"`).
    pub fn symbol(&self) -> &'static str {
        match self {
            Element::H => "H",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::S => "S",
            Element::P => "P",
            Element::F => "F",
            Element::Cl => "Cl",
            Element::Br => "Br",
            Element::I => "I",
            Element::Se => "Se",
            Element::Na => "Na",
            Element::K => "K",
            Element::Mg => "Mg",
            Element::Ca => "Ca",
            Element::Mn => "Mn",
            Element::Fe => "Fe",
            Element::Co => "Co",
            Element::Ni => "Ni",
            Element::Cu => "Cu",
            Element::Zn => "Zn",
            Element::Unknown => "X",
        }
    }

    /// Single-bond covalent radius in Angstroms.
    pub fn covalent_radius(&self) -> f64 {
        match self {
            Element::H => 0.31,
            Element::C => 0.76,
            Element::N => 0.71,
            Element::O => 0.66,
            Element::S => 1.05,
            Element::P => 1.07,
            Element::F => 0.57,
            Element::Cl => 1.02,
            Element::Br => 1.20,
            Element::I => 1.39,
            Element::Se => 1.20,
            Element::Na => 1.66,
            Element::K => 2.03,
            Element::Mg => 1.41,
            Element::Ca => 1.76,
            Element::Mn => 1.39,
            Element::Fe => 1.32,
            Element::Co => 1.26,
            Element::Ni => 1.24,
            Element::Cu => 1.32,
            Element::Zn => 1.22,
            Element::Unknown => 0.77,
        }
    }

    pub fn is_hydrogen(&self) -> bool {
        matches!(self, Element::H)
    }

    pub fn is_metal(&self) -> bool {
        matches!(
            self,
            Element::Na
                | Element::K
                | Element::Mg
                | Element::Ca
                | Element::Mn
                | Element::Fe
                | Element::Co
                | Element::Ni
                | Element::Cu
                | Element::Zn
        )
    }

    /// Heteroatoms that can donate or accept hydrogen bonds and coordinate metals.
    pub fn is_polar(&self) -> bool {
        matches!(self, Element::N | Element::O | Element::S)
    }

    /// Maps an AutoDock (PDBQT) atom type code to its element.
    ///
    /// Returns `None` for codes that carry no element information (e.g. the
    /// hydration-water pseudo atom `W`).
    pub fn from_autodock_type(code: &str) -> Option<Self> {
        match code.trim() {
            "A" | "C" | "CG0" | "CG1" | "CG2" | "CG3" | "G0" | "G1" | "G2" | "G3" => {
                Some(Element::C)
            }
            "N" | "NA" | "NS" => Some(Element::N),
            "O" | "OA" | "OS" => Some(Element::O),
            "S" | "SA" => Some(Element::S),
            "H" | "HD" | "HS" => Some(Element::H),
            "W" | "" => None,
            other => other.parse().ok(),
        }
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    /// Parses an element symbol case-insensitively (`"ZN"`, `"Zn"` and `"zn"` are equivalent).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let element = match s.trim().to_ascii_uppercase().as_str() {
            "H" | "D" => Element::H,
            "C" => Element::C,
            "N" => Element::N,
            "O" => Element::O,
            "S" => Element::S,
            "P" => Element::P,
            "F" => Element::F,
            "CL" => Element::Cl,
            "BR" => Element::Br,
            "I" => Element::I,
            "SE" => Element::Se,
            "NA" => Element::Na,
            "K" => Element::K,
            "MG" => Element::Mg,
            "CA" => Element::Ca,
            "MN" => Element::Mn,
            "FE" => Element::Fe,
            "CO" => Element::Co,
            "NI" => Element::Ni,
            "CU" => Element::Cu,
            "ZN" => Element::Zn,
            _ => return Err(ParseElementError(s.trim().to_string())),
        };
        Ok(element)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("ZN".parse::<Element>(), Ok(Element::Zn));
        assert_eq!("zn".parse::<Element>(), Ok(Element::Zn));
        assert_eq!(" Cl ".parse::<Element>(), Ok(Element::Cl));
        assert_eq!("D".parse::<Element>(), Ok(Element::H));
    }

    #[test]
    fn from_str_rejects_unknown_symbols() {
        assert_eq!(
            "Xx".parse::<Element>(),
            Err(ParseElementError("Xx".to_string()))
        );
        assert!("".parse::<Element>().is_err());
    }

    #[test]
    fn autodock_types_map_to_elements() {
        assert_eq!(Element::from_autodock_type("A"), Some(Element::C));
        assert_eq!(Element::from_autodock_type("OA"), Some(Element::O));
        assert_eq!(Element::from_autodock_type("NA"), Some(Element::N));
        assert_eq!(Element::from_autodock_type("SA"), Some(Element::S));
        assert_eq!(Element::from_autodock_type("HD"), Some(Element::H));
        assert_eq!(Element::from_autodock_type("Zn"), Some(Element::Zn));
        assert_eq!(Element::from_autodock_type("Cl"), Some(Element::Cl));
        assert_eq!(Element::from_autodock_type("W"), None);
    }

    #[test]
    fn metals_are_classified() {
        assert!(Element::Zn.is_metal());
        assert!(Element::Mg.is_metal());
        assert!(!Element::C.is_metal());
        assert!(!Element::Se.is_metal());
    }

    #[test]
    fn display_uses_symbol() {
        assert_eq!(Element::Fe.to_string(), "Fe");
        assert_eq!(Element::Unknown.to_string(), "X");
    }
}
