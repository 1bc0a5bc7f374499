use crate::core::models::molecule::MoleculeRole;
use crate::engine::context::AnalysisContext;
use crate::engine::interaction::{InteractionKind, InteractionRecord, Measurements};
use tracing::{debug, instrument};

/// Reports every receptor-ligand atom pair within `close_contacts_dist_cutoff`,
/// regardless of element.
#[instrument(skip_all, name = "close_contact_task")]
pub fn run(ctx: &AnalysisContext) -> Vec<InteractionRecord> {
    let cutoff = ctx.config.close_contacts_dist_cutoff;
    let mut records = Vec::new();

    for (ligand_id, ligand_atom) in ctx.ligand.atoms_iter() {
        let ligand_ref = ctx.ligand.atom_ref(ligand_id);
        let receptor_neighbors = ctx
            .index
            .neighbors(&ligand_atom.position, cutoff)
            .into_iter()
            .filter(|n| n.item.role == MoleculeRole::Receptor);
        for neighbor in receptor_neighbors {
            records.push(InteractionRecord::new(
                InteractionKind::CloseContact,
                None,
                ctx.sites([neighbor.item]),
                ctx.sites([ligand_ref]),
                Measurements::distance(neighbor.distance),
                None,
            ));
        }
    }

    debug!(count = records.len(), "Close contact detection complete.");
    records
}
