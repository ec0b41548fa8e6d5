use crate::error::{AcoError, Result};
use crate::matrix::SquareMatrix;

/// A point in the plane. Its index in the location set is its only identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    pub fn new(x: f64, y: f64) -> Self {
        Location { x, y }
    }
}

fn calc_euc_2d_dist(a: &Location, b: &Location) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Pairwise Euclidean distances together with their inverses (visibility).
///
/// Both matrices are symmetric with a zero diagonal. The diagonal of the
/// visibility matrix is never read by the solver.
#[derive(Debug, Clone)]
pub struct DistanceTable {
    distance: SquareMatrix,
    visibility: SquareMatrix,
}

impl DistanceTable {
    /// Fails if there are fewer than two locations, if a coordinate is not
    /// finite, or if two locations coincide.
    pub fn from_locations(locations: &[Location]) -> Result<Self> {
        let n = locations.len();
        if n < 2 {
            return Err(AcoError::InvalidInput(format!(
                "at least 2 locations are required, got {}",
                n
            )));
        }
        if let Some(i) = locations
            .iter()
            .position(|l| !l.x.is_finite() || !l.y.is_finite())
        {
            return Err(AcoError::InvalidInput(format!(
                "location {} has a non-finite coordinate",
                i
            )));
        }

        let mut distance = SquareMatrix::new(n);
        let mut visibility = SquareMatrix::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = calc_euc_2d_dist(&locations[i], &locations[j]);
                if d <= 0.0 {
                    return Err(AcoError::InvalidInput(format!(
                        "locations {} and {} coincide",
                        i, j
                    )));
                }
                distance.set(i, j, d);
                distance.set(j, i, d);
                visibility.set(i, j, 1.0 / d);
                visibility.set(j, i, 1.0 / d);
            }
        }

        Ok(DistanceTable {
            distance,
            visibility,
        })
    }

    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distance.get(from, to)
    }

    #[inline]
    pub fn visibility(&self, from: usize, to: usize) -> f64 {
        self.visibility.get(from, to)
    }

    pub fn distances(&self) -> &SquareMatrix {
        &self.distance
    }

    pub fn visibilities(&self) -> &SquareMatrix {
        &self.visibility
    }

    pub fn size(&self) -> usize {
        self.distance.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Location> {
        vec![
            Location::new(0.0, 0.0),
            Location::new(3.0, 4.0),
            Location::new(0.0, 8.0),
        ]
    }

    #[test]
    fn test_from_locations() {
        let table = DistanceTable::from_locations(&triangle()).unwrap();
        assert_eq!(table.size(), 3);
        assert!((table.distance(0, 1) - 5.0).abs() < 1e-12);
        assert!((table.distance(0, 2) - 8.0).abs() < 1e-12);
        assert!((table.visibility(0, 1) - 0.2).abs() < 1e-12);
        assert_eq!(table.distance(1, 1), 0.0);
    }

    #[test]
    fn test_symmetric_with_zero_diagonal() {
        let table = DistanceTable::from_locations(&triangle()).unwrap();
        assert!(table.distances().is_symmetric(0.0));
        assert!(table.visibilities().is_symmetric(0.0));
        for i in 0..3 {
            assert_eq!(table.distance(i, i), 0.0);
        }
    }

    #[test]
    fn test_rejects_single_location() {
        let err = DistanceTable::from_locations(&[Location::new(1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, AcoError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_coincident_points() {
        let locations = vec![
            Location::new(0.0, 0.0),
            Location::new(2.0, 2.0),
            Location::new(0.0, 0.0),
        ];
        let err = DistanceTable::from_locations(&locations).unwrap_err();
        assert!(err.to_string().contains("0 and 2"));
    }

    #[test]
    fn test_rejects_nan() {
        let locations = vec![Location::new(0.0, 0.0), Location::new(f64::NAN, 1.0)];
        assert!(DistanceTable::from_locations(&locations).is_err());
    }
}
