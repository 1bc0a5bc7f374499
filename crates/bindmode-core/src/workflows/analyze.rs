use crate::core::diagnostics::Warning;
use crate::core::io::{LoadedMolecule, load_molecule};
use crate::core::models::molecule::{Molecule, MoleculeRole};
use crate::core::spatial::build_atom_index;
use crate::core::topology::registry::TemplateRegistry;
use crate::engine::config::AnalysisConfig;
use crate::engine::context::AnalysisContext;
use crate::engine::error::AnalysisError;
use crate::engine::interaction::{InteractionKind, InteractionRecord};
use crate::engine::progress::{AnalysisStage, Progress, ProgressReporter};
use crate::engine::report::{InteractionReport, ReportBuilder};
use crate::engine::tasks::CLASSIFIERS;
use std::path::Path;
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub report: InteractionReport,
    /// Non-fatal loader warnings for both molecules, receptor first.
    pub warnings: Vec<Warning>,
}

/// Analyzes a receptor/ligand pair of structure files with the built-in residue templates.
///
/// # Errors
///
/// Returns [`AnalysisError`] if either file cannot be loaded, the configuration is
/// invalid, or the spatial index cannot be built. No partial report is produced.
pub fn run(
    receptor_path: &Path,
    ligand_path: &Path,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<AnalysisResult, AnalysisError> {
    run_with_registry(
        receptor_path,
        ligand_path,
        &TemplateRegistry::standard(),
        config,
        reporter,
    )
}

/// Builds the template registry for a run: the built-in templates, extended by the
/// residues of a user template file when one is given.
///
/// # Errors
///
/// Returns [`AnalysisError::Template`] if the file cannot be read or parsed.
pub fn load_templates(path: Option<&Path>) -> Result<TemplateRegistry, AnalysisError> {
    let mut registry = TemplateRegistry::standard();
    if let Some(path) = path {
        let extra = TemplateRegistry::load(path)?;
        info!(path = %path.display(), residues = extra.len(), "Loaded residue templates.");
        registry.merge(extra);
    }
    Ok(registry)
}

/// Same as [`run`] with a caller-supplied template registry.
#[instrument(skip_all, name = "analysis_workflow")]
pub fn run_with_registry(
    receptor_path: &Path,
    ligand_path: &Path,
    registry: &TemplateRegistry,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<AnalysisResult, AnalysisError> {
    reporter.report(Progress::StageReached(AnalysisStage::Unloaded));

    let result = load_pair(receptor_path, ligand_path, registry, config, reporter).and_then(
        |(receptor, ligand)| {
            let report = classify_and_aggregate(&receptor.molecule, &ligand.molecule, config, reporter)?;
            let mut warnings = receptor.warnings;
            warnings.extend(ligand.warnings);
            Ok(AnalysisResult { report, warnings })
        },
    );

    match &result {
        Ok(result) => info!(
            interactions = result.report.total(),
            warnings = result.warnings.len(),
            "Analysis complete."
        ),
        Err(e) => {
            warn!(error = %e, "Analysis failed.");
            reporter.report(Progress::StageReached(AnalysisStage::Failed));
        }
    }
    result
}

/// Runs the classifiers on molecules that have already been loaded.
///
/// # Errors
///
/// Returns [`AnalysisError::Config`] for an invalid configuration and
/// [`AnalysisError::Spatial`] if the atom index cannot be built.
#[instrument(skip_all, name = "analysis_workflow")]
pub fn analyze_molecules(
    receptor: &Molecule,
    ligand: &Molecule,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<InteractionReport, AnalysisError> {
    let result = config
        .validate()
        .map_err(AnalysisError::from)
        .and_then(|()| classify_and_aggregate(receptor, ligand, config, reporter));
    if result.is_err() {
        reporter.report(Progress::StageReached(AnalysisStage::Failed));
    }
    result
}

fn load_pair(
    receptor_path: &Path,
    ligand_path: &Path,
    registry: &TemplateRegistry,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<(LoadedMolecule, LoadedMolecule), AnalysisError> {
    config.validate()?;

    reporter.report(Progress::PhaseStart {
        name: "Loading Structures",
    });
    let perception = config.perception();
    let load = |path: &Path, role: MoleculeRole| {
        info!(%role, path = %path.display(), "Loading structure.");
        load_molecule(path, role, registry, &perception)
            .map_err(|source| AnalysisError::Parse { role, source })
    };
    let receptor = load(receptor_path, MoleculeRole::Receptor)?;
    let ligand = load(ligand_path, MoleculeRole::Ligand)?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::StageReached(AnalysisStage::Loaded));
    Ok((receptor, ligand))
}

fn classify_and_aggregate(
    receptor: &Molecule,
    ligand: &Molecule,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<InteractionReport, AnalysisError> {
    // === Indexing ===
    let index = build_atom_index(&[receptor, ligand], config.max_cutoff())?;
    info!(
        atoms = index.len(),
        cell_size = index.cell_size(),
        "Spatial index built."
    );
    reporter.report(Progress::StageReached(AnalysisStage::Indexed));

    // === Classification ===
    let context = AnalysisContext::new(receptor, ligand, &index, config);
    reporter.report(Progress::PhaseStart {
        name: "Classifying Interactions",
    });
    reporter.report(Progress::TaskStart {
        total_steps: CLASSIFIERS.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iter = CLASSIFIERS.iter();
    #[cfg(feature = "parallel")]
    let iter = CLASSIFIERS.par_iter();

    let outputs: Vec<(InteractionKind, Vec<InteractionRecord>)> = iter
        .map(|&(kind, classify)| {
            let records = classify(&context);
            reporter.report(Progress::Message(format!("{kind}: {} found", records.len())));
            reporter.report(Progress::TaskIncrement);
            (kind, records)
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    reporter.report(Progress::StageReached(AnalysisStage::Classified));

    // === Aggregation ===
    let mut builder = ReportBuilder::new();
    for (kind, records) in outputs {
        let merged = builder.merge(kind, records);
        info!(kind = %kind, count = merged, "Merged interactions.");
    }
    let report = builder.build();
    reporter.report(Progress::StageReached(AnalysisStage::Aggregated));

    Ok(report)
}
