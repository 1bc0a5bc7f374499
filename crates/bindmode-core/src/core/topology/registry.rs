use super::templates::{BACKBONE_ATOMS, STANDARD_TEMPLATES, StaticTemplate, TERMINAL_OXYGEN};
use crate::core::utils::identifiers::is_water_residue;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

const WATER_TEMPLATE_NAME: &str = "HOH";

/// Chemistry of one residue type, keyed by atom name.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ResidueTemplate {
    /// Heavy atoms a complete residue carries; absent ones are reported as missing.
    pub heavy_atoms: Vec<String>,
    #[serde(default)]
    pub donors: Vec<String>,
    #[serde(default)]
    pub acceptors: Vec<String>,
    /// Atoms forming the residue's positive charged group, if any.
    #[serde(default)]
    pub positive: Vec<String>,
    /// Atoms forming the residue's negative charged group, if any.
    #[serde(default)]
    pub negative: Vec<String>,
    #[serde(default)]
    pub aromatic_rings: Vec<Vec<String>>,
}

impl ResidueTemplate {
    fn from_static(template: &StaticTemplate) -> Self {
        let owned = |names: &[&str]| names.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        let mut heavy_atoms = Vec::new();
        let mut donors = Vec::new();
        let mut acceptors = Vec::new();
        if template.amino_acid {
            heavy_atoms.extend(owned(BACKBONE_ATOMS));
            if template.backbone_donor {
                donors.push("N".to_string());
            }
            acceptors.push("O".to_string());
            acceptors.push(TERMINAL_OXYGEN.to_string());
        }
        heavy_atoms.extend(owned(template.sidechain));
        donors.extend(owned(template.donors));
        acceptors.extend(owned(template.acceptors));

        Self {
            heavy_atoms,
            donors,
            acceptors,
            positive: owned(template.positive),
            negative: owned(template.negative),
            aromatic_rings: template.aromatic_rings.iter().map(|r| owned(r)).collect(),
        }
    }

    pub fn is_donor(&self, atom_name: &str) -> bool {
        self.donors.iter().any(|n| n == atom_name)
    }

    pub fn is_acceptor(&self, atom_name: &str) -> bool {
        self.acceptors.iter().any(|n| n == atom_name)
    }

    pub fn is_aromatic(&self, atom_name: &str) -> bool {
        self.aromatic_rings.iter().flatten().any(|n| n == atom_name)
    }
}

/// Lookup table from residue name to [`ResidueTemplate`].
///
/// Names matching a known water residue fall back to the `HOH` template.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    registry: HashMap<String, ResidueTemplate>,
}

impl TemplateRegistry {
    /// The compiled-in templates for the standard amino acids and water.
    pub fn standard() -> Self {
        let registry = STANDARD_TEMPLATES
            .entries()
            .map(|(name, template)| (name.to_string(), ResidueTemplate::from_static(template)))
            .collect();
        Self { registry }
    }

    pub fn load(path: &Path) -> Result<Self, TemplateLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| TemplateLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| TemplateLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let registry: HashMap<String, ResidueTemplate> = toml::from_str(content)?;
        Ok(Self { registry })
    }

    /// Adds or replaces templates from `other`.
    pub fn merge(&mut self, other: TemplateRegistry) {
        self.registry.extend(other.registry);
    }

    pub fn get(&self, residue_name: &str) -> Option<&ResidueTemplate> {
        let name = residue_name.trim();
        self.registry.get(name).or_else(|| {
            if is_water_residue(name) {
                self.registry.get(WATER_TEMPLATE_NAME)
            } else {
                None
            }
        })
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum TemplateLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}
