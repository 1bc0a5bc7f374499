use super::{atom_refs, centroid_grid};
use crate::engine::context::AnalysisContext;
use crate::engine::interaction::{InteractionKind, InteractionRecord, Measurements};
use tracing::{debug, instrument};

/// Pairs oppositely charged groups of the receptor and the ligand whose centroids lie
/// within `salt_bridge_dist_cutoff` of each other.
#[instrument(skip_all, name = "salt_bridge_task")]
pub fn run(ctx: &AnalysisContext) -> Vec<InteractionRecord> {
    let cutoff = ctx.config.salt_bridge_dist_cutoff;
    let receptor_groups = ctx.receptor.charged_groups();
    let ligand_groups = ctx.ligand.charged_groups();
    if receptor_groups.is_empty() || ligand_groups.is_empty() {
        return Vec::new();
    }
    let Some(grid) = centroid_grid(receptor_groups.iter().map(|g| g.centroid()), cutoff) else {
        return Vec::new();
    };

    let mut records = Vec::new();
    for ligand_group in ligand_groups {
        for neighbor in grid.neighbors(ligand_group.centroid(), cutoff) {
            let receptor_group = &receptor_groups[neighbor.item];
            if receptor_group.sign() != ligand_group.sign().opposite() {
                continue;
            }
            records.push(InteractionRecord::new(
                InteractionKind::SaltBridge,
                None,
                ctx.sites(atom_refs(ctx.receptor, receptor_group.atoms())),
                ctx.sites(atom_refs(ctx.ligand, ligand_group.atoms())),
                Measurements::distance(neighbor.distance),
                None,
            ));
        }
    }

    debug!(count = records.len(), "Salt bridge detection complete.");
    records
}
