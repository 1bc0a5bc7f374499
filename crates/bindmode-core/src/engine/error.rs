use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::pdbqt::ParseError;
use crate::core::models::molecule::MoleculeRole;
use crate::core::spatial::grid::SpatialError;
use crate::core::topology::registry::TemplateLoadError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to load the {role} structure: {source}")]
    Parse {
        role: MoleculeRole,
        #[source]
        source: ParseError,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load residue templates: {0}")]
    Template(#[from] TemplateLoadError),

    #[error("Failed to build the atom index: {0}")]
    Spatial(#[from] SpatialError),
}
