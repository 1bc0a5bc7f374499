use super::{atom_refs, centroid_grid};
use crate::core::utils::geometry::{angle_between, fold_to_acute};
use crate::engine::context::AnalysisContext;
use crate::engine::interaction::{
    AngleKind, InteractionKind, InteractionRecord, InteractionSubtype, Measurements,
};
use tracing::{debug, instrument};

/// Classifies the relative orientation of two rings from the folded angle between
/// their normals.
fn stacking_subtype(normal_angle: f64, stacking_tolerance: f64, t_tolerance: f64) -> Option<InteractionSubtype> {
    if normal_angle <= stacking_tolerance {
        Some(InteractionSubtype::Stacked)
    } else if normal_angle >= 90.0 - t_tolerance {
        Some(InteractionSubtype::TShaped)
    } else {
        None
    }
}

/// Detects face-to-face and edge-to-face stacking between receptor and ligand rings
/// whose centroids are within `pi_pi_interacting_dist_cutoff`.
#[instrument(skip_all, name = "pi_stacking_task")]
pub fn run(ctx: &AnalysisContext) -> Vec<InteractionRecord> {
    let cutoff = ctx.config.pi_pi_interacting_dist_cutoff;
    let receptor_rings = ctx.receptor.rings();
    if receptor_rings.is_empty() || ctx.ligand.rings().is_empty() {
        return Vec::new();
    }
    let Some(grid) = centroid_grid(receptor_rings.iter().map(|r| r.centroid()), cutoff) else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for ligand_ring in ctx.ligand.rings() {
        for neighbor in grid.neighbors(ligand_ring.centroid(), cutoff) {
            let receptor_ring = &receptor_rings[neighbor.item];
            let Some(normals) = angle_between(receptor_ring.normal(), ligand_ring.normal()) else {
                continue;
            };
            let angle = fold_to_acute(normals);
            let Some(subtype) = stacking_subtype(
                angle,
                ctx.config.pi_stacking_angle_tolerance,
                ctx.config.t_stacking_angle_tolerance,
            ) else {
                continue;
            };
            records.push(InteractionRecord::new(
                InteractionKind::PiPiStacking,
                Some(subtype),
                ctx.sites(atom_refs(ctx.receptor, receptor_ring.atoms())),
                ctx.sites(atom_refs(ctx.ligand, ligand_ring.atoms())),
                Measurements::distance(neighbor.distance).with_angle(AngleKind::RingNormals, angle),
                None,
            ));
        }
    }

    debug!(count = records.len(), "Pi-pi stacking detection complete.");
    records
}
