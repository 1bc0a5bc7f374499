use crate::core::models::element::Element;
use crate::core::models::molecule::MoleculeRole;
use crate::engine::context::AnalysisContext;
use crate::engine::interaction::{InteractionKind, InteractionRecord, Measurements};
use tracing::{debug, instrument};

/// Reports receptor and ligand carbons closer than `hydrophobic_dist_cutoff`.
///
/// Pairs whose atoms carry the same residue identity are skipped; that happens when
/// the receptor file still contains a copy of the ligand.
#[instrument(skip_all, name = "hydrophobic_contact_task")]
pub fn run(ctx: &AnalysisContext) -> Vec<InteractionRecord> {
    let cutoff = ctx.config.hydrophobic_dist_cutoff;
    let mut records = Vec::new();

    for (ligand_id, ligand_atom) in ctx.ligand.atoms_iter() {
        if ligand_atom.element != Element::C {
            continue;
        }
        let Some(ligand_residue) = ctx.ligand.residue_of(ligand_id).map(|r| r.key()) else {
            continue;
        };
        let ligand_ref = ctx.ligand.atom_ref(ligand_id);

        for neighbor in ctx.index.neighbors(&ligand_atom.position, cutoff) {
            let receptor_ref = neighbor.item;
            if receptor_ref.role != MoleculeRole::Receptor {
                continue;
            }
            let is_carbon = ctx
                .atom(receptor_ref)
                .is_some_and(|atom| atom.element == Element::C);
            if !is_carbon {
                continue;
            }
            let same_residue = ctx
                .receptor
                .residue_of(receptor_ref.id)
                .is_some_and(|r| r.key() == ligand_residue);
            if same_residue {
                continue;
            }
            records.push(InteractionRecord::new(
                InteractionKind::HydrophobicContact,
                None,
                ctx.sites([receptor_ref]),
                ctx.sites([ligand_ref]),
                Measurements::distance(neighbor.distance),
                None,
            ));
        }
    }

    debug!(count = records.len(), "Hydrophobic contact detection complete.");
    records
}
