use crate::core::chem::PerceptionParams;
use crate::core::models::atom::Atom;
use crate::core::models::builder::MoleculeBuilder;
use crate::core::models::element::Element;
use crate::core::models::ids::ResidueId;
use crate::core::models::molecule::{Molecule, MoleculeRole};
use crate::core::spatial::{AtomIndex, build_atom_index};
use crate::core::topology::registry::TemplateRegistry;
use crate::engine::config::AnalysisConfig;
use crate::engine::context::AnalysisContext;
use nalgebra::{Point3, Vector3};

pub(crate) type AtomDef<'a> = (&'a str, Element, [f64; 3]);

/// A residue given as `(chain, number, name, atoms)`.
pub(crate) type ResidueDef<'a> = (char, isize, &'a str, Vec<AtomDef<'a>>);

pub(crate) fn molecule(role: MoleculeRole, residues: Vec<ResidueDef<'_>>) -> Molecule {
    let mut builder = MoleculeBuilder::new(role);
    let mut serial = 0;
    for (chain, number, name, atoms) in residues {
        builder.start_residue(chain, number, name);
        for (atom_name, element, p) in atoms {
            serial += 1;
            let position = Point3::new(p[0], p[1], p[2]);
            builder.add_atom(Atom::new(serial, atom_name, element, ResidueId::default(), position));
        }
    }
    let (molecule, _) = builder
        .build(&TemplateRegistry::standard(), &PerceptionParams::default())
        .unwrap();
    molecule
}

/// Six carbons of a regular hexagon with bond length 1.39, centred on `center` and
/// lying in the plane perpendicular to `normal`.
pub(crate) fn benzene(center: [f64; 3], normal: [f64; 3]) -> Vec<AtomDef<'static>> {
    const NAMES: [&str; 6] = ["C1", "C2", "C3", "C4", "C5", "C6"];
    let n = Vector3::new(normal[0], normal[1], normal[2]).normalize();
    let helper = if n.x.abs() < 0.9 { Vector3::x() } else { Vector3::y() };
    let u = n.cross(&helper).normalize();
    let v = n.cross(&u);
    let c = Vector3::new(center[0], center[1], center[2]);
    (0..6)
        .map(|i| {
            let theta = (i as f64) * std::f64::consts::PI / 3.0;
            let p = c + (u * theta.cos() + v * theta.sin()) * 1.39;
            (NAMES[i], Element::C, [p.x, p.y, p.z])
        })
        .collect()
}

pub(crate) struct Fixture {
    pub receptor: Molecule,
    pub ligand: Molecule,
    pub index: AtomIndex,
    pub config: AnalysisConfig,
}

impl Fixture {
    pub(crate) fn new(receptor: Molecule, ligand: Molecule, config: AnalysisConfig) -> Self {
        let index = build_atom_index(&[&receptor, &ligand], config.max_cutoff()).unwrap();
        Self {
            receptor,
            ligand,
            index,
            config,
        }
    }

    pub(crate) fn context(&self) -> AnalysisContext<'_> {
        AnalysisContext::new(&self.receptor, &self.ligand, &self.index, &self.config)
    }
}
