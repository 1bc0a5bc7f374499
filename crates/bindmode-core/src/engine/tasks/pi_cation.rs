use super::{atom_refs, centroid_grid};
use crate::core::models::molecule::MoleculeRole;
use crate::core::models::ring::{ChargeSign, ChargedGroup, Ring};
use crate::core::utils::geometry::{angle_between, fold_to_acute};
use crate::engine::context::AnalysisContext;
use crate::engine::interaction::{
    AngleKind, InteractionKind, InteractionRecord, InteractionSubtype, Measurements,
};
use tracing::{debug, instrument};

/// Folded angle between the ring normal and the centroid-to-cation vector, or `None`
/// when the cation sits on the centroid.
fn normal_to_cation_angle(ring: &Ring, cation: &ChargedGroup) -> Option<f64> {
    let offset = cation.centroid() - ring.centroid();
    angle_between(ring.normal(), &offset).map(fold_to_acute)
}

/// Detects cations sitting over an aromatic face, in both directions: receptor rings
/// with ligand cations and ligand rings with receptor cations.
#[instrument(skip_all, name = "pi_cation_task")]
pub fn run(ctx: &AnalysisContext) -> Vec<InteractionRecord> {
    let cutoff = ctx.config.cation_pi_dist_cutoff;
    let tolerance = ctx.config.cation_pi_angle_tolerance;
    let mut records = Vec::new();

    for ring_role in [MoleculeRole::Receptor, MoleculeRole::Ligand] {
        let ring_molecule = ctx.molecule(ring_role);
        let cation_molecule = ctx.molecule(ring_role.other());
        let subtype = match ring_role {
            MoleculeRole::Receptor => InteractionSubtype::RingInReceptor,
            MoleculeRole::Ligand => InteractionSubtype::RingInLigand,
        };

        let cations: Vec<&ChargedGroup> = cation_molecule
            .charged_groups()
            .iter()
            .filter(|group| group.sign() == ChargeSign::Positive)
            .collect();
        if cations.is_empty() || ring_molecule.rings().is_empty() {
            continue;
        }
        let Some(grid) = centroid_grid(cations.iter().map(|c| c.centroid()), cutoff) else {
            continue;
        };

        for ring in ring_molecule.rings() {
            for neighbor in grid.neighbors(ring.centroid(), cutoff) {
                let cation = cations[neighbor.item];
                let Some(angle) = normal_to_cation_angle(ring, cation) else {
                    continue;
                };
                if angle > tolerance {
                    continue;
                }

                let ring_sites = ctx.sites(atom_refs(ring_molecule, ring.atoms()));
                let cation_sites = ctx.sites(atom_refs(cation_molecule, cation.atoms()));
                let (receptor_atoms, ligand_atoms) = match ring_role {
                    MoleculeRole::Receptor => (ring_sites, cation_sites),
                    MoleculeRole::Ligand => (cation_sites, ring_sites),
                };
                records.push(InteractionRecord::new(
                    InteractionKind::PiCation,
                    Some(subtype),
                    receptor_atoms,
                    ligand_atoms,
                    Measurements::distance(neighbor.distance)
                        .with_angle(AngleKind::NormalToCation, angle),
                    None,
                ));
            }
        }
    }

    debug!(count = records.len(), "Pi-cation detection complete.");
    records
}
