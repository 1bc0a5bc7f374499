use crate::core::models::atom::Atom;
use crate::core::models::ids::AtomId;
use crate::core::models::molecule::{AtomRef, Molecule, MoleculeRole};
use crate::core::utils::geometry::vertex_angle;
use crate::engine::context::AnalysisContext;
use crate::engine::interaction::{
    AngleKind, InteractionKind, InteractionRecord, InteractionSubtype, Measurements,
};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Geometry of an accepted donor/acceptor pair.
struct HydrogenBondGeometry {
    /// The hydrogen with the most linear donor-H-acceptor angle, if the donor has any.
    hydrogen: Option<(AtomId, f64)>,
}

/// Checks the angular criterion for `donor_id` donating to `acceptor`.
///
/// With explicit hydrogens the best hydrogen must bring the donor-H-acceptor angle
/// within `hydrogen_bond_angle_cutoff` of linear. Without hydrogens the pair is accepted
/// on distance alone unless `require_explicit_hydrogens` is set.
fn evaluate(
    ctx: &AnalysisContext,
    donors: &Molecule,
    donor_id: AtomId,
    donor: &Atom,
    acceptor: &Atom,
) -> Option<HydrogenBondGeometry> {
    let best = donors
        .bonded_hydrogens(donor_id)
        .filter_map(|(h_id, h)| {
            vertex_angle(&donor.position, &h.position, &acceptor.position).map(|angle| (h_id, angle))
        })
        .max_by(|a, b| a.1.total_cmp(&b.1));

    let has_hydrogens = donors.bonded_hydrogens(donor_id).next().is_some();
    match best {
        Some((h_id, angle)) if 180.0 - angle <= ctx.config.hydrogen_bond_angle_cutoff => {
            Some(HydrogenBondGeometry {
                hydrogen: Some((h_id, angle)),
            })
        }
        _ if has_hydrogens => None,
        _ if ctx.config.require_explicit_hydrogens => None,
        _ => Some(HydrogenBondGeometry { hydrogen: None }),
    }
}

/// Detects hydrogen bonds between the receptor and the ligand in both directions.
///
/// Each donor/acceptor heavy-atom pair is reported at most once; when both atoms could
/// donate, the receptor-donor direction is tried first.
#[instrument(skip_all, name = "hydrogen_bond_task")]
pub fn run(ctx: &AnalysisContext) -> Vec<InteractionRecord> {
    let cutoff = ctx.config.hydrogen_bond_dist_cutoff;
    let mut seen: HashSet<(AtomRef, AtomRef)> = HashSet::new();
    let mut records = Vec::new();

    for (ligand_id, ligand_atom) in ctx.ligand.atoms_iter() {
        let flags = ligand_atom.flags;
        if !(flags.hydrogen_donor || flags.hydrogen_acceptor) {
            continue;
        }
        let ligand_ref = ctx.ligand.atom_ref(ligand_id);

        for neighbor in ctx.index.neighbors(&ligand_atom.position, cutoff) {
            let receptor_ref = neighbor.item;
            if receptor_ref.role != MoleculeRole::Receptor || !seen.insert((receptor_ref, ligand_ref)) {
                continue;
            }

            let directions = [
                (InteractionSubtype::ReceptorDonor, receptor_ref, ligand_ref),
                (InteractionSubtype::LigandDonor, ligand_ref, receptor_ref),
            ];
            for (subtype, donor_ref, acceptor_ref) in directions {
                let (Some(donor), Some(acceptor)) = (ctx.atom(donor_ref), ctx.atom(acceptor_ref))
                else {
                    continue;
                };
                if !donor.flags.hydrogen_donor || !acceptor.flags.hydrogen_acceptor {
                    continue;
                }
                let donors = ctx.molecule(donor_ref.role);
                let Some(geometry) = evaluate(ctx, donors, donor_ref.id, donor, acceptor) else {
                    continue;
                };

                let mut measurements = Measurements::distance(neighbor.distance);
                let mut donor_side = vec![donor_ref];
                if let Some((h_id, angle)) = geometry.hydrogen {
                    donor_side.push(AtomRef::new(donor_ref.role, h_id));
                    measurements = measurements.with_angle(AngleKind::DonorHydrogenAcceptor, angle);
                }
                let (receptor_side, ligand_side) = match subtype {
                    InteractionSubtype::ReceptorDonor => (donor_side, vec![acceptor_ref]),
                    _ => (vec![acceptor_ref], donor_side),
                };

                records.push(InteractionRecord::new(
                    InteractionKind::HydrogenBond,
                    Some(subtype),
                    ctx.sites(receptor_side),
                    ctx.sites(ligand_side),
                    measurements,
                    Some(vec![donor_ref, acceptor_ref]),
                ));
                break;
            }
        }
    }

    debug!(count = records.len(), "Hydrogen bond detection complete.");
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::element::Element;
    use crate::engine::config::AnalysisConfig;
    use crate::engine::tasks::testing::{Fixture, molecule};

    /// Serine hydroxyl of the receptor with its hydrogen pointing along +x.
    fn serine(with_hydrogen: bool) -> Molecule {
        let mut atoms = vec![
            ("CB", Element::C, [-1.43, 0.0, 0.0]),
            ("OG", Element::O, [0.0, 0.0, 0.0]),
        ];
        if with_hydrogen {
            atoms.push(("HG", Element::H, [0.96, 0.0, 0.0]));
        }
        molecule(MoleculeRole::Receptor, vec![('A', 7, "SER", atoms)])
    }

    /// Carbonyl oxygen; the methine hydrogen keeps the oxygen from being read as a donor.
    fn ketone_oxygen(x: f64, y: f64) -> Molecule {
        molecule(
            MoleculeRole::Ligand,
            vec![(
                ' ',
                1,
                "UNL",
                vec![
                    ("O1", Element::O, [x, y, 0.0]),
                    ("C1", Element::C, [x + 1.22, y, 0.0]),
                    ("H1", Element::H, [x + 1.22, y + 1.0, 0.0]),
                ],
            )],
        )
    }

    #[test]
    fn linear_hydrogen_bond_at_3_2_angstroms_is_detected() {
        let fixture = Fixture::new(serine(true), ketone_oxygen(3.2, 0.0), AnalysisConfig::default());
        let records = run(&fixture.context());
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.subtype, Some(InteractionSubtype::ReceptorDonor));
        assert!((record.measurements.distance - 3.2).abs() < 1e-9);
        assert_eq!(record.receptor_atoms.len(), 2);
        assert_eq!(record.receptor_atoms[1].name, "HG");
        assert_eq!(record.ligand_atoms[0].name, "O1");
        let angle = record.measurements.angle(AngleKind::DonorHydrogenAcceptor).unwrap();
        assert!((angle - 180.0).abs() < 1e-6);
    }

    #[test]
    fn pair_beyond_distance_cutoff_is_ignored() {
        let fixture = Fixture::new(serine(true), ketone_oxygen(4.5, 0.0), AnalysisConfig::default());
        assert!(run(&fixture.context()).is_empty());
    }

    #[test]
    fn bent_geometry_fails_the_angle_criterion() {
        // Acceptor sits perpendicular to the O-H bond.
        let fixture = Fixture::new(serine(true), ketone_oxygen(0.0, 3.0), AnalysisConfig::default());
        assert!(run(&fixture.context()).is_empty());

        let relaxed = AnalysisConfig::builder()
            .hydrogen_bond_angle_cutoff(120.0)
            .build()
            .unwrap();
        let fixture = Fixture::new(serine(true), ketone_oxygen(0.0, 3.0), relaxed);
        assert_eq!(run(&fixture.context()).len(), 1);
    }

    #[test]
    fn missing_hydrogens_fall_back_to_distance_only() {
        let fixture = Fixture::new(serine(false), ketone_oxygen(0.0, 3.0), AnalysisConfig::default());
        let records = run(&fixture.context());
        assert_eq!(records.len(), 1);
        assert!(records[0].measurements.angles.is_empty());

        let strict = AnalysisConfig::builder()
            .require_explicit_hydrogens(true)
            .build()
            .unwrap();
        let fixture = Fixture::new(serine(false), ketone_oxygen(0.0, 3.0), strict);
        assert!(run(&fixture.context()).is_empty());
    }

    #[test]
    fn ligand_donor_is_labelled() {
        let receptor = molecule(
            MoleculeRole::Receptor,
            vec![(
                'A',
                3,
                "ASP",
                vec![
                    ("CG", Element::C, [1.25, 0.0, 0.0]),
                    ("OD1", Element::O, [0.0, 0.0, 0.0]),
                ],
            )],
        );
        let ligand = molecule(
            MoleculeRole::Ligand,
            vec![(
                ' ',
                1,
                "UNL",
                vec![
                    ("H1", Element::H, [-1.9, 0.0, 0.0]),
                    ("N1", Element::N, [-2.9, 0.0, 0.0]),
                    ("C1", Element::C, [-4.37, 0.0, 0.0]),
                ],
            )],
        );
        let fixture = Fixture::new(receptor, ligand, AnalysisConfig::default());
        let records = run(&fixture.context());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subtype, Some(InteractionSubtype::LigandDonor));
        assert_eq!(records[0].ligand_atoms.len(), 2);
        assert_eq!(records[0].receptor_atoms[0].name, "OD1");
    }
}
