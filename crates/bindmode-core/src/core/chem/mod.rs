//! Chemical perception run once while a molecule is built.
//!
//! The stages run in a fixed order because each consumes the previous one's output:
//!
//! 1. [`bonds`] infers covalent bonds from interatomic distances and covalent radii.
//! 2. [`rings`] finds planar five- and six-membered aromatic rings over the bond graph.
//! 3. [`typing`] flags hydrogen-bond donors and acceptors, aromatic atoms and metals.
//! 4. [`charges`] groups formally charged atoms into [`ChargedGroup`](crate::core::models::ring::ChargedGroup)s.

pub(crate) mod bonds;
pub(crate) mod charges;
pub(crate) mod rings;
pub(crate) mod typing;

/// Tolerances used by structure perception.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerceptionParams {
    /// Slack added to the sum of covalent radii when inferring bonds, in Angstroms.
    pub bond_tolerance: f64,
    /// Largest allowed deviation of a ring atom from the ring's fitted plane, in Angstroms.
    pub ring_planarity_tolerance: f64,
}

impl Default for PerceptionParams {
    fn default() -> Self {
        Self {
            bond_tolerance: 0.45,
            ring_planarity_tolerance: 0.1,
        }
    }
}
