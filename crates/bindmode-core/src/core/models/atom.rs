use super::element::Element;
use super::ids::ResidueId;
use nalgebra::Point3;

/// Chemical capabilities assigned to an atom during structure perception.
///
/// The flags are derived once, when the owning [`Molecule`](super::molecule::Molecule)
/// is built, from residue templates for standard residues and from element and
/// connectivity heuristics for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtomFlags {
    /// The atom can donate a hydrogen bond (N/O/S carrying a polar hydrogen).
    pub hydrogen_donor: bool,
    /// The atom can accept a hydrogen bond.
    pub hydrogen_acceptor: bool,
    /// The atom belongs to at least one perceived aromatic ring.
    pub aromatic: bool,
    /// The atom belongs to a formally charged group.
    pub charged: bool,
    /// The atom is a metal ion.
    pub metal: bool,
}

/// A single atom of a parsed structure.
///
/// Atoms are owned by a [`Molecule`](super::molecule::Molecule), which only hands out
/// shared references once construction has finished.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Serial number from the source record.
    pub serial: usize,
    /// The atom name (e.g., "CA", "OG1", "C12").
    pub name: String,
    /// Element inferred from the element column, the atom type code, or the name.
    pub element: Element,
    /// Explicit atom type code from the source file (e.g. AutoDock "OA", "A", "HD").
    pub type_code: Option<String>,
    /// Partial charge in elementary charge units, when the format provides one.
    pub partial_charge: Option<f64>,
    pub occupancy: Option<f64>,
    pub temperature_factor: Option<f64>,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    pub chain_id: char,
    pub flags: AtomFlags,
}

impl Atom {
    /// Creates a new `Atom` with no optional data and cleared flags.
    ///
    /// # Arguments
    ///
    /// * `serial` - The serial number from the source record.
    /// * `name` - The atom name.
    /// * `element` - The atom's element.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(
        serial: usize,
        name: &str,
        element: Element,
        residue_id: ResidueId,
        position: Point3<f64>,
    ) -> Self {
        Self {
            serial,
            name: name.to_string(),
            element,
            type_code: None,
            partial_charge: None,
            occupancy: None,
            temperature_factor: None,
            position,
            residue_id,
            chain_id: ' ',
            flags: AtomFlags::default(),
        }
    }

    pub fn is_hydrogen(&self) -> bool {
        self.element.is_hydrogen()
    }

    pub fn is_heavy(&self) -> bool {
        !self.element.is_hydrogen()
    }

    pub fn distance_to(&self, other: &Atom) -> f64 {
        (self.position - other.position).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let residue_id = ResidueId::default();
        let atom = Atom::new(7, "CA", Element::C, residue_id, Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.serial, 7);
        assert_eq!(atom.name, "CA");
        assert_eq!(atom.element, Element::C);
        assert_eq!(atom.residue_id, residue_id);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert!(atom.type_code.is_none());
        assert!(atom.partial_charge.is_none());
        assert_eq!(atom.flags, AtomFlags::default());
    }

    #[test]
    fn hydrogen_and_heavy_classification_follows_element() {
        let residue_id = ResidueId::default();
        let h = Atom::new(1, "HG", Element::H, residue_id, Point3::origin());
        let o = Atom::new(2, "OG", Element::O, residue_id, Point3::origin());
        assert!(h.is_hydrogen());
        assert!(!h.is_heavy());
        assert!(o.is_heavy());
    }

    #[test]
    fn distance_to_is_euclidean() {
        let residue_id = ResidueId::default();
        let a = Atom::new(1, "C1", Element::C, residue_id, Point3::new(0.0, 0.0, 0.0));
        let b = Atom::new(2, "C2", Element::C, residue_id, Point3::new(3.0, 4.0, 0.0));
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }
}
