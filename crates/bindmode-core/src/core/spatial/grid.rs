use itertools::iproduct;
use nalgebra::Point3;
use std::collections::HashMap;
use thiserror::Error;

type CellIndex = (i64, i64, i64);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpatialError {
    #[error("Cell size must be positive and finite (got {0})")]
    InvalidCellSize(f64),
    #[error("Entry {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },
}

/// A hit returned by [`CellGrid::neighbors`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<T> {
    /// Position of the entry in the slice the grid was built from.
    pub index: usize,
    pub item: T,
    pub distance: f64,
}

/// Uniform cell list over a fixed set of points.
///
/// Each entry is hashed into the cubic cell containing it. A radius query visits the
/// query cell plus `ceil(radius / cell_size)` shells of surrounding cells and keeps
/// entries whose exact distance is within the radius, so one grid serves every cutoff.
/// Cells are visited in a fixed order, which makes results deterministic for a given
/// input, but callers must not rely on any particular ordering.
#[derive(Debug, Clone)]
pub struct CellGrid<T: Copy> {
    cell_size: f64,
    cells: HashMap<CellIndex, Vec<usize>>,
    entries: Vec<(Point3<f64>, T)>,
}

impl<T: Copy> CellGrid<T> {
    /// Builds a grid over `entries`.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError`] for a non-positive cell size or a non-finite coordinate.
    pub fn new(entries: Vec<(Point3<f64>, T)>, cell_size: f64) -> Result<Self, SpatialError> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(SpatialError::InvalidCellSize(cell_size));
        }

        let mut cells: HashMap<CellIndex, Vec<usize>> = HashMap::new();
        for (index, (position, _)) in entries.iter().enumerate() {
            if !position.iter().all(|c| c.is_finite()) {
                return Err(SpatialError::NonFiniteCoordinate { index });
            }
            cells
                .entry(Self::cell_of(position, cell_size))
                .or_default()
                .push(index);
        }

        Ok(Self {
            cell_size,
            cells,
            entries,
        })
    }

    fn cell_of(position: &Point3<f64>, cell_size: f64) -> CellIndex {
        (
            (position.x / cell_size).floor() as i64,
            (position.y / cell_size).floor() as i64,
            (position.z / cell_size).floor() as i64,
        )
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(Point3<f64>, T)] {
        &self.entries
    }

    /// Returns every entry within `radius` of `point` (inclusive).
    pub fn neighbors(&self, point: &Point3<f64>, radius: f64) -> Vec<Neighbor<T>> {
        let mut found = Vec::new();
        if !(radius.is_finite() && radius >= 0.0) || self.entries.is_empty() {
            return found;
        }

        let reach = ((radius / self.cell_size).ceil() as i64).max(1);
        let (cx, cy, cz) = Self::cell_of(point, self.cell_size);
        let radius_sq = radius * radius;

        let shells = iproduct!(-reach..=reach, -reach..=reach, -reach..=reach);
        for (dx, dy, dz) in shells {
            let Some(indices) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) else {
                continue;
            };
            for &index in indices {
                let (position, item) = self.entries[index];
                let distance_sq = (position - point).norm_squared();
                if distance_sq <= radius_sq {
                    found.push(Neighbor {
                        index,
                        item,
                        distance: distance_sq.sqrt(),
                    });
                }
            }
        }
        found
    }
}
