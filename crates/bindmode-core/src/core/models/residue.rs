use super::ids::AtomId;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Identity of a residue independent of the molecule that owns it.
///
/// Keys order by chain, then sequence number, then name, and render as
/// `"A:ARG123"` (the chain prefix is empty for blank chain identifiers).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    pub chain_id: char,
    pub number: isize,
    pub name: String,
}

impl ResidueKey {
    pub fn new(chain_id: char, number: isize, name: &str) -> Self {
        Self {
            chain_id,
            number,
            name: name.to_string(),
        }
    }
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chain = if self.chain_id.is_whitespace() {
            String::new()
        } else {
            self.chain_id.to_string()
        };
        write!(f, "{}:{}{}", chain, self.name, self.number)
    }
}

impl Serialize for ResidueKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub name: String,                       // Name of the residue (e.g., "ALA", "UNL")
    pub chain_id: char,                     // Chain identifier from the source record
    pub number: isize,                      // Residue sequence number from source file
    pub(crate) atoms: Vec<AtomId>,          // Atoms in record order
    atom_name_map: HashMap<String, AtomId>, // First atom carrying each name
}

impl Residue {
    pub(crate) fn new(name: &str, chain_id: char, number: isize) -> Self {
        Self {
            name: name.to_string(),
            chain_id,
            number,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        self.atom_name_map
            .entry(atom_name.to_string())
            .or_insert(atom_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map.get(name).copied()
    }

    pub fn key(&self) -> ResidueKey {
        ResidueKey::new(self.chain_id, self.number, &self.name)
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
    fn new_residue_initializes_fields_correctly() {
        let residue = Residue::new("GLY", 'A', 10);
        assert_eq!(residue.number, 10);
        assert_eq!(residue.name, "GLY");
        assert_eq!(residue.chain_id, 'A');
        assert!(residue.atoms().is_empty());
        assert!(residue.atom_id_by_name("CA").is_none());
    }

    #[test]
    fn add_atom_keeps_order_and_first_name_mapping() {
        let mut residue = Residue::new("SER", 'A', 7);
        let first = dummy_atom_id(1);
        let second = dummy_atom_id(2);
        let alternate = dummy_atom_id(3);
        residue.add_atom("CA", first);
        residue.add_atom("CB", second);
        residue.add_atom("CA", alternate);
        assert_eq!(residue.atoms(), &[first, second, alternate]);
        assert_eq!(residue.atom_id_by_name("CA"), Some(first));
        assert_eq!(residue.atom_id_by_name("CB"), Some(second));
    }

    #[test]
    fn residue_key_display_includes_chain_name_and_number() {
        assert_eq!(ResidueKey::new('A', 123, "ARG").to_string(), "A:ARG123");
        assert_eq!(ResidueKey::new(' ', 1, "UNL").to_string(), ":UNL1");
        assert_eq!(ResidueKey::new('B', -2, "HOH").to_string(), "B:HOH-2");
    }

    #[test]
    fn residue_keys_order_by_chain_then_number() {
        let mut keys = vec![
            ResidueKey::new('B', 1, "ALA"),
            ResidueKey::new('A', 20, "GLY"),
            ResidueKey::new('A', 3, "TRP"),
        ];
        keys.sort();
        let rendered: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(rendered, vec!["A:TRP3", "A:GLY20", "B:ALA1"]);
    }
}
