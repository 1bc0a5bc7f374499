use crate::core::models::element::Element;
use crate::core::models::molecule::MoleculeRole;
use crate::engine::context::AnalysisContext;
use crate::engine::interaction::{InteractionKind, InteractionRecord, Measurements};
use tracing::{debug, instrument};

fn is_coordinating(element: Element) -> bool {
    matches!(element, Element::N | Element::O | Element::S)
}

/// Pairs metal atoms with N, O or S atoms of the other molecule within
/// `metal_coordination_dist_cutoff`. Metals on either side are considered.
#[instrument(skip_all, name = "metal_complex_task")]
pub fn run(ctx: &AnalysisContext) -> Vec<InteractionRecord> {
    let cutoff = ctx.config.metal_coordination_dist_cutoff;
    let mut records = Vec::new();

    for metal_role in [MoleculeRole::Receptor, MoleculeRole::Ligand] {
        let metal_molecule = ctx.molecule(metal_role);
        for (metal_id, metal) in metal_molecule.atoms_iter() {
            if !metal.flags.metal {
                continue;
            }
            let metal_ref = metal_molecule.atom_ref(metal_id);
            for neighbor in ctx.index.neighbors(&metal.position, cutoff) {
                let partner_ref = neighbor.item;
                if partner_ref.role == metal_role {
                    continue;
                }
                let coordinating = ctx
                    .atom(partner_ref)
                    .is_some_and(|atom| is_coordinating(atom.element));
                if !coordinating {
                    continue;
                }
                let (receptor_ref, ligand_ref) = match metal_role {
                    MoleculeRole::Receptor => (metal_ref, partner_ref),
                    MoleculeRole::Ligand => (partner_ref, metal_ref),
                };
                records.push(InteractionRecord::new(
                    InteractionKind::MetalComplex,
                    None,
                    ctx.sites([receptor_ref]),
                    ctx.sites([ligand_ref]),
                    Measurements::distance(neighbor.distance),
                    None,
                ));
            }
        }
    }

    debug!(count = records.len(), "Metal complex detection complete.");
    records
}
