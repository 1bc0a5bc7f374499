use super::ids::AtomId;
use crate::core::utils::geometry::fit_plane;
use nalgebra::{Point3, Unit, Vector3};
use serde::Serialize;
use std::fmt;

/// An aromatic ring perceived at load time.
///
/// The centroid, normal and planarity are derived once from the member positions and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    atoms: Vec<AtomId>,
    centroid: Point3<f64>,
    normal: Unit<Vector3<f64>>,
    max_deviation: f64,
}

impl Ring {
    /// Builds a ring from ordered member atoms and their positions.
    ///
    /// Returns `None` when fewer than three positions are supplied, when the
    /// slices differ in length, or when no plane can be fitted.
    pub fn from_members(atoms: Vec<AtomId>, positions: &[Point3<f64>]) -> Option<Self> {
        if atoms.len() != positions.len() {
            return None;
        }
        let plane = fit_plane(positions)?;
        Some(Self {
            atoms,
            centroid: plane.centroid,
            normal: plane.normal,
            max_deviation: plane.max_deviation,
        })
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn size(&self) -> usize {
        self.atoms.len()
    }

    pub fn centroid(&self) -> &Point3<f64> {
        &self.centroid
    }

    pub fn normal(&self) -> &Unit<Vector3<f64>> {
        &self.normal
    }

    /// Largest distance of a member atom from the fitted plane.
    pub fn max_deviation(&self) -> f64 {
        self.max_deviation
    }

    pub fn contains(&self, atom_id: AtomId) -> bool {
        self.atoms.contains(&atom_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeSign {
    Positive,
    Negative,
}

impl ChargeSign {
    pub fn opposite(&self) -> Self {
        match self {
            ChargeSign::Positive => ChargeSign::Negative,
            ChargeSign::Negative => ChargeSign::Positive,
        }
    }
}

impl fmt::Display for ChargeSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChargeSign::Positive => write!(f, "positive"),
            ChargeSign::Negative => write!(f, "negative"),
        }
    }
}

/// A formally charged functional group, represented by the centroid of its atoms
/// so that multi-atom groups (carboxylates, guanidinium) count once.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargedGroup {
    sign: ChargeSign,
    atoms: Vec<AtomId>,
    centroid: Point3<f64>,
}

impl ChargedGroup {
    pub fn new(sign: ChargeSign, atoms: Vec<AtomId>, centroid: Point3<f64>) -> Self {
        Self {
            sign,
            atoms,
            centroid,
        }
    }

    pub fn sign(&self) -> ChargeSign {
        self.sign
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn centroid(&self) -> &Point3<f64> {
        &self.centroid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn ids(n: u64) -> Vec<AtomId> {
        (1..=n).map(|i| AtomId::from(KeyData::from_ffi(i))).collect()
    }

    fn benzene_positions(z: f64) -> Vec<Point3<f64>> {
        (0..6)
            .map(|i| {
                let theta = (i as f64) * std::f64::consts::PI / 3.0;
                Point3::new(1.39 * theta.cos(), 1.39 * theta.sin(), z)
            })
            .collect()
    }

    #[test]
    fn ring_geometry_is_derived_from_members() {
        let ring = Ring::from_members(ids(6), &benzene_positions(1.0)).unwrap();
        assert_eq!(ring.size(), 6);
        assert!((ring.centroid() - Point3::new(0.0, 0.0, 1.0)).norm() < 1e-9);
        assert!((ring.normal().z.abs() - 1.0).abs() < 1e-9);
        assert!(ring.max_deviation() < 1e-9);
    }

    #[test]
    fn ring_rejects_mismatched_members() {
        assert!(Ring::from_members(ids(5), &benzene_positions(0.0)).is_none());
    }

    #[test]
    fn ring_contains_reports_membership() {
        let members = ids(6);
        let ring = Ring::from_members(members.clone(), &benzene_positions(0.0)).unwrap();
        assert!(ring.contains(members[3]));
        assert!(!ring.contains(AtomId::from(KeyData::from_ffi(99))));
    }

    #[test]
    fn charge_sign_opposite_flips() {
        assert_eq!(ChargeSign::Positive.opposite(), ChargeSign::Negative);
        assert_eq!(ChargeSign::Negative.opposite(), ChargeSign::Positive);
        assert_eq!(ChargeSign::Negative.to_string(), "negative");
    }
}
