use nalgebra::{Matrix3, Point3, Unit, Vector3};

/// Result of fitting a plane through a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneFit {
    pub centroid: Point3<f64>,
    pub normal: Unit<Vector3<f64>>,
    /// Largest absolute distance of any input point from the fitted plane.
    pub max_deviation: f64,
}

pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

/// Fits the least-squares plane through `points`.
///
/// The normal is the eigenvector of the coordinate covariance matrix with the
/// smallest eigenvalue. Returns `None` for fewer than three points or when the
/// points are collinear enough that no normal can be determined.
pub fn fit_plane(points: &[Point3<f64>]) -> Option<PlaneFit> {
    if points.len() < 3 {
        return None;
    }
    let center = centroid(points)?;
    let covariance = points.iter().fold(Matrix3::zeros(), |acc, p| {
        let d = p - center;
        acc + d * d.transpose()
    });

    let eigen = covariance.symmetric_eigen();
    let sorted = {
        let mut values: Vec<f64> = eigen.eigenvalues.iter().copied().collect();
        values.sort_by(|a, b| a.total_cmp(b));
        values
    };
    // Two vanishing eigenvalues mean the points lie on a line.
    if sorted[1] <= f64::EPSILON * sorted[2].max(1.0) {
        return None;
    }

    let normal_index = eigen.eigenvalues.imin();
    let normal = Unit::try_new(eigen.eigenvectors.column(normal_index).into_owned(), 1e-12)?;
    let max_deviation = points
        .iter()
        .map(|p| (p - center).dot(&normal).abs())
        .fold(0.0, f64::max);

    Some(PlaneFit {
        centroid: center,
        normal,
        max_deviation,
    })
}

/// Angle between two vectors in degrees, in `[0, 180]`.
pub fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> Option<f64> {
    let norms = a.norm() * b.norm();
    if norms <= f64::EPSILON {
        return None;
    }
    let cosine = (a.dot(b) / norms).clamp(-1.0, 1.0);
    Some(cosine.acos().to_degrees())
}

/// Angle at `vertex` formed by `a`-`vertex`-`b`, in degrees.
pub fn vertex_angle(a: &Point3<f64>, vertex: &Point3<f64>, b: &Point3<f64>) -> Option<f64> {
    angle_between(&(a - vertex), &(b - vertex))
}

/// Folds an angle in `[0, 180]` onto `[0, 90]`, treating antiparallel as parallel.
pub fn fold_to_acute(angle_degrees: f64) -> f64 {
    if angle_degrees > 90.0 {
        180.0 - angle_degrees
    } else {
        angle_degrees
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hexagon(radius: f64, z: f64) -> Vec<Point3<f64>> {
        (0..6)
            .map(|i| {
                let theta = (i as f64) * std::f64::consts::PI / 3.0;
                Point3::new(radius * theta.cos(), radius * theta.sin(), z)
            })
            .collect()
    }

    #[test]
    fn centroid_of_empty_slice_is_none() {
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn centroid_is_mean_position() {
        let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, -6.0)];
        assert_eq!(centroid(&points), Some(Point3::new(1.0, 2.0, -3.0)));
    }

    #[test]
    fn fit_plane_of_flat_hexagon_has_z_normal() {
        let fit = fit_plane(&hexagon(1.39, 2.0)).unwrap();
        assert!((fit.centroid - Point3::new(0.0, 0.0, 2.0)).norm() < 1e-9);
        assert!((fit.normal.z.abs() - 1.0).abs() < 1e-9);
        assert!(fit.max_deviation < 1e-9);
    }

    #[test]
    fn fit_plane_reports_deviation_of_puckered_ring() {
        let mut points = hexagon(1.5, 0.0);
        for (i, p) in points.iter_mut().enumerate() {
            p.z = if i % 2 == 0 { 0.25 } else { -0.25 };
        }
        let fit = fit_plane(&points).unwrap();
        assert!((fit.max_deviation - 0.25).abs() < 1e-9);
    }

    #[test]
    fn fit_plane_rejects_degenerate_input() {
        assert!(fit_plane(&[Point3::origin(), Point3::new(1.0, 0.0, 0.0)]).is_none());
        let collinear = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        assert!(fit_plane(&collinear).is_none());
    }

    #[test]
    fn angle_between_handles_orthogonal_and_zero_vectors() {
        let angle = angle_between(&Vector3::x(), &Vector3::y()).unwrap();
        assert!((angle - 90.0).abs() < 1e-9);
        assert!(angle_between(&Vector3::zeros(), &Vector3::y()).is_none());
    }

    #[test]
    fn vertex_angle_of_straight_line_is_180() {
        let angle = vertex_angle(
            &Point3::new(-1.0, 0.0, 0.0),
            &Point3::origin(),
            &Point3::new(2.0, 0.0, 0.0),
        )
        .unwrap();
        assert!((angle - 180.0).abs() < 1e-9);
    }

    #[test]
    fn fold_to_acute_mirrors_obtuse_angles() {
        assert_eq!(fold_to_acute(30.0), 30.0);
        assert_eq!(fold_to_acute(150.0), 30.0);
        assert_eq!(fold_to_acute(90.0), 90.0);
    }
}
