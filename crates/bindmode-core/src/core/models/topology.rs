use super::ids::AtomId;

/// A covalent bond inferred from interatomic distances.
///
/// Bonds are stored with the smaller atom ID first so that the same pair always
/// yields an identical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bond {
    pub atom1_id: AtomId, // ID of the first atom
    pub atom2_id: AtomId, // ID of the second atom
}

impl Bond {
    pub fn new(a: AtomId, b: AtomId) -> Self {
        let (atom1_id, atom2_id) = if a <= b { (a, b) } else { (b, a) };
        Self { atom1_id, atom2_id }
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.atom1_id == atom_id || self.atom2_id == atom_id
    }

    /// Returns the partner of `atom_id` in this bond, if `atom_id` is a member.
    pub fn other(&self, atom_id: AtomId) -> Option<AtomId> {
        if self.atom1_id == atom_id {
            Some(self.atom2_id)
        } else if self.atom2_id == atom_id {
            Some(self.atom1_id)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn bond_new_orders_atoms_canonically() {
        let a1 = dummy_atom_id(1);
        let a2 = dummy_atom_id(2);
        assert_eq!(Bond::new(a1, a2), Bond::new(a2, a1));
        assert_eq!(Bond::new(a2, a1).atom1_id, a1);
    }

    #[test]
    fn bond_contains_returns_true_for_both_atoms() {
        let a1 = dummy_atom_id(10);
        let a2 = dummy_atom_id(20);
        let bond = Bond::new(a1, a2);
        assert!(bond.contains(a1));
        assert!(bond.contains(a2));
        assert!(!bond.contains(dummy_atom_id(30)));
    }

    #[test]
    fn bond_other_returns_partner() {
        let a1 = dummy_atom_id(100);
        let a2 = dummy_atom_id(200);
        let bond = Bond::new(a1, a2);
        assert_eq!(bond.other(a1), Some(a2));
        assert_eq!(bond.other(a2), Some(a1));
        assert_eq!(bond.other(dummy_atom_id(300)), None);
    }
}
