use phf::{Map, phf_map};

/// Compiled-in chemistry of a residue type.
///
/// Amino acids list only their side-chain atoms; backbone atoms and their
/// donor/acceptor roles are added when the registry is built.
#[derive(Debug)]
pub(crate) struct StaticTemplate {
    pub amino_acid: bool,
    /// Whether the backbone nitrogen carries a hydrogen.
    pub backbone_donor: bool,
    pub sidechain: &'static [&'static str],
    pub donors: &'static [&'static str],
    pub acceptors: &'static [&'static str],
    pub positive: &'static [&'static str],
    pub negative: &'static [&'static str],
    pub aromatic_rings: &'static [&'static [&'static str]],
}

const NONE: &[&str] = &[];
const NO_RINGS: &[&[&str]] = &[];

pub(crate) const BACKBONE_ATOMS: &[&str] = &["N", "CA", "C", "O"];
pub(crate) const TERMINAL_OXYGEN: &str = "OXT";

const PHENYL: &[&str] = &["CG", "CD1", "CE1", "CZ", "CE2", "CD2"];
const IMIDAZOLE: &[&str] = &["CG", "ND1", "CE1", "NE2", "CD2"];
const HIS_SIDECHAIN: &[&str] = &["CB", "CG", "ND1", "CD2", "CE1", "NE2"];

const fn amino_acid(sidechain: &'static [&'static str]) -> StaticTemplate {
    StaticTemplate {
        amino_acid: true,
        backbone_donor: true,
        sidechain,
        donors: NONE,
        acceptors: NONE,
        positive: NONE,
        negative: NONE,
        aromatic_rings: NO_RINGS,
    }
}

const fn polar(
    sidechain: &'static [&'static str],
    donors: &'static [&'static str],
    acceptors: &'static [&'static str],
) -> StaticTemplate {
    StaticTemplate {
        amino_acid: true,
        backbone_donor: true,
        sidechain,
        donors,
        acceptors,
        positive: NONE,
        negative: NONE,
        aromatic_rings: NO_RINGS,
    }
}

const WATER: StaticTemplate = StaticTemplate {
    amino_acid: false,
    backbone_donor: false,
    sidechain: &["O"],
    donors: &["O"],
    acceptors: &["O"],
    positive: NONE,
    negative: NONE,
    aromatic_rings: NO_RINGS,
};

pub(crate) static STANDARD_TEMPLATES: Map<&'static str, StaticTemplate> = phf_map! {
    "ALA" => amino_acid(&["CB"]),
    "GLY" => amino_acid(NONE),
    "ILE" => amino_acid(&["CB", "CG1", "CG2", "CD1"]),
    "LEU" => amino_acid(&["CB", "CG", "CD1", "CD2"]),
    "VAL" => amino_acid(&["CB", "CG1", "CG2"]),
    "PRO" => StaticTemplate {
        backbone_donor: false,
        ..amino_acid(&["CB", "CG", "CD"])
    },
    "CYS" => amino_acid(&["CB", "SG"]),
    "CYX" => amino_acid(&["CB", "SG"]),
    "MET" => polar(&["CB", "CG", "SD", "CE"], NONE, &["SD"]),
    "SER" => polar(&["CB", "OG"], &["OG"], &["OG"]),
    "THR" => polar(&["CB", "OG1", "CG2"], &["OG1"], &["OG1"]),
    "ASN" => polar(&["CB", "CG", "OD1", "ND2"], &["ND2"], &["OD1"]),
    "GLN" => polar(&["CB", "CG", "CD", "OE1", "NE2"], &["NE2"], &["OE1"]),
    "ASP" => StaticTemplate {
        amino_acid: true,
        backbone_donor: true,
        sidechain: &["CB", "CG", "OD1", "OD2"],
        donors: NONE,
        acceptors: &["OD1", "OD2"],
        positive: NONE,
        negative: &["OD1", "OD2"],
        aromatic_rings: NO_RINGS,
    },
    "GLU" => StaticTemplate {
        amino_acid: true,
        backbone_donor: true,
        sidechain: &["CB", "CG", "CD", "OE1", "OE2"],
        donors: NONE,
        acceptors: &["OE1", "OE2"],
        positive: NONE,
        negative: &["OE1", "OE2"],
        aromatic_rings: NO_RINGS,
    },
    "LYS" => StaticTemplate {
        amino_acid: true,
        backbone_donor: true,
        sidechain: &["CB", "CG", "CD", "CE", "NZ"],
        donors: &["NZ"],
        acceptors: NONE,
        positive: &["NZ"],
        negative: NONE,
        aromatic_rings: NO_RINGS,
    },
    "ARG" => StaticTemplate {
        amino_acid: true,
        backbone_donor: true,
        sidechain: &["CB", "CG", "CD", "NE", "CZ", "NH1", "NH2"],
        donors: &["NE", "NH1", "NH2"],
        acceptors: NONE,
        positive: &["NE", "NH1", "NH2"],
        negative: NONE,
        aromatic_rings: NO_RINGS,
    },
    "PHE" => StaticTemplate {
        amino_acid: true,
        backbone_donor: true,
        sidechain: &["CB", "CG", "CD1", "CD2", "CE1", "CE2", "CZ"],
        donors: NONE,
        acceptors: NONE,
        positive: NONE,
        negative: NONE,
        aromatic_rings: &[PHENYL],
    },
    "TYR" => StaticTemplate {
        amino_acid: true,
        backbone_donor: true,
        sidechain: &["CB", "CG", "CD1", "CD2", "CE1", "CE2", "CZ", "OH"],
        donors: &["OH"],
        acceptors: &["OH"],
        positive: NONE,
        negative: NONE,
        aromatic_rings: &[PHENYL],
    },
    "TRP" => StaticTemplate {
        amino_acid: true,
        backbone_donor: true,
        sidechain: &["CB", "CG", "CD1", "CD2", "NE1", "CE2", "CE3", "CZ2", "CZ3", "CH2"],
        donors: &["NE1"],
        acceptors: NONE,
        positive: NONE,
        negative: NONE,
        aromatic_rings: &[
            &["CG", "CD1", "NE1", "CE2", "CD2"],
            &["CD2", "CE2", "CZ2", "CH2", "CZ3", "CE3"],
        ],
    },
    // Unspecified histidine tautomers are treated as neutral with both nitrogens
    // able to donate or accept.
    "HIS" => StaticTemplate {
        amino_acid: true,
        backbone_donor: true,
        sidechain: HIS_SIDECHAIN,
        donors: &["ND1", "NE2"],
        acceptors: &["ND1", "NE2"],
        positive: NONE,
        negative: NONE,
        aromatic_rings: &[IMIDAZOLE],
    },
    "HID" => StaticTemplate {
        amino_acid: true,
        backbone_donor: true,
        sidechain: HIS_SIDECHAIN,
        donors: &["ND1"],
        acceptors: &["NE2"],
        positive: NONE,
        negative: NONE,
        aromatic_rings: &[IMIDAZOLE],
    },
    "HSD" => StaticTemplate {
        amino_acid: true,
        backbone_donor: true,
        sidechain: HIS_SIDECHAIN,
        donors: &["ND1"],
        acceptors: &["NE2"],
        positive: NONE,
        negative: NONE,
        aromatic_rings: &[IMIDAZOLE],
    },
    "HIE" => StaticTemplate {
        amino_acid: true,
        backbone_donor: true,
        sidechain: HIS_SIDECHAIN,
        donors: &["NE2"],
        acceptors: &["ND1"],
        positive: NONE,
        negative: NONE,
        aromatic_rings: &[IMIDAZOLE],
    },
    "HSE" => StaticTemplate {
        amino_acid: true,
        backbone_donor: true,
        sidechain: HIS_SIDECHAIN,
        donors: &["NE2"],
        acceptors: &["ND1"],
        positive: NONE,
        negative: NONE,
        aromatic_rings: &[IMIDAZOLE],
    },
    "HIP" => StaticTemplate {
        amino_acid: true,
        backbone_donor: true,
        sidechain: HIS_SIDECHAIN,
        donors: &["ND1", "NE2"],
        acceptors: NONE,
        positive: &["ND1", "NE2"],
        negative: NONE,
        aromatic_rings: &[IMIDAZOLE],
    },
    "HSP" => StaticTemplate {
        amino_acid: true,
        backbone_donor: true,
        sidechain: HIS_SIDECHAIN,
        donors: &["ND1", "NE2"],
        acceptors: NONE,
        positive: &["ND1", "NE2"],
        negative: NONE,
        aromatic_rings: &[IMIDAZOLE],
    },
    "HOH" => WATER,
    "WAT" => WATER,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_references_only_its_own_atoms() {
        for (name, template) in STANDARD_TEMPLATES.entries() {
            let known = |atom: &&str| {
                template.sidechain.contains(atom)
                    || (template.amino_acid && BACKBONE_ATOMS.contains(atom))
            };
            for atom in template
                .donors
                .iter()
                .chain(template.acceptors)
                .chain(template.positive)
                .chain(template.negative)
                .chain(template.aromatic_rings.iter().flat_map(|r| r.iter()))
            {
                assert!(known(atom), "{name}: unknown atom {atom}");
            }
        }
    }

    #[test]
    fn aromatic_rings_have_five_or_six_members() {
        for (_, template) in STANDARD_TEMPLATES.entries() {
            for ring in template.aromatic_rings {
                assert!(ring.len() == 5 || ring.len() == 6);
            }
        }
    }

    #[test]
    fn histidine_protonation_states_differ_in_charge() {
        assert!(STANDARD_TEMPLATES["HIS"].positive.is_empty());
        assert!(STANDARD_TEMPLATES["HID"].positive.is_empty());
        assert_eq!(STANDARD_TEMPLATES["HIP"].positive, &["ND1", "NE2"]);
    }
}
