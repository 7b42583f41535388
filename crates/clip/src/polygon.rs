//! Watershed footprints in map coordinates.

use crate::error::ClipError;

/// A watershed footprint: one or more rings of `(x, y)` vertices.
///
/// Rings may be open or explicitly closed (first vertex repeated at the
/// end); both are accepted. Holes and disjoint parts are all passed as
/// further rings, since [`Polygon::contains`] uses even-odd parity: a
/// point is inside when a ray from it crosses an odd number of ring
/// edges in total.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    rings: Vec<Vec<(f64, f64)>>,
}

impl Polygon {
    /// Builds a footprint from its rings.
    ///
    /// # Errors
    ///
    /// Returns [`ClipError::EmptyPolygon`] when no ring is given,
    /// [`ClipError::ShortRing`] when a ring has fewer than three
    /// vertices, and [`ClipError::NonFiniteVertex`] when a coordinate is
    /// NaN or infinite.
    pub fn new(rings: Vec<Vec<(f64, f64)>>) -> Result<Self, ClipError> {
        if rings.is_empty() {
            return Err(ClipError::EmptyPolygon);
        }
        for (index, ring) in rings.iter().enumerate() {
            // An explicitly closed triangle still has 4 stored vertices,
            // so 3 is the right floor for both conventions.
            if ring.len() < 3 {
                return Err(ClipError::ShortRing {
                    index,
                    vertices: ring.len(),
                });
            }
            if ring
                .iter()
                .any(|&(x, y)| !x.is_finite() || !y.is_finite())
            {
                return Err(ClipError::NonFiniteVertex { index });
            }
        }
        Ok(Self { rings })
    }

    /// The footprint's rings.
    pub fn rings(&self) -> &[Vec<(f64, f64)>] {
        &self.rings
    }

    /// Bounding box `(min_x, min_y, max_x, max_y)` over all rings.
    pub fn bbox(&self) -> (f64, f64, f64, f64) {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for ring in &self.rings {
            for &(x, y) in ring {
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }
        (min_x, min_y, max_x, max_y)
    }

    /// Even-odd point-in-polygon test over all rings.
    ///
    /// Each ring is treated as implicitly closed; the duplicate edge of
    /// an explicitly closed ring is horizontal-degenerate and never
    /// crossed, so it does not disturb the parity.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let mut inside = false;
        for ring in &self.rings {
            let mut j = ring.len() - 1;
            for i in 0..ring.len() {
                let (xi, yi) = ring[i];
                let (xj, yj) = ring[j];
                if (yi > y) != (yj > y) {
                    let x_cross = xi + (y - yi) * (xj - xi) / (yj - yi);
                    if x < x_cross {
                        inside = !inside;
                    }
                }
                j = i;
            }
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, side: f64) -> Vec<(f64, f64)> {
        vec![
            (x0, y0),
            (x0 + side, y0),
            (x0 + side, y0 + side),
            (x0, y0 + side),
        ]
    }

    #[test]
    fn validation_rejects_bad_rings() {
        assert!(matches!(Polygon::new(vec![]), Err(ClipError::EmptyPolygon)));
        assert!(matches!(
            Polygon::new(vec![vec![(0.0, 0.0), (1.0, 1.0)]]),
            Err(ClipError::ShortRing { index: 0, vertices: 2 })
        ));
        assert!(matches!(
            Polygon::new(vec![square(0.0, 0.0, 1.0), vec![(0.0, 0.0), (f64::NAN, 1.0), (1.0, 1.0)]]),
            Err(ClipError::NonFiniteVertex { index: 1 })
        ));
    }

    #[test]
    fn contains_simple_square() {
        let poly = Polygon::new(vec![square(0.0, 0.0, 10.0)]).unwrap();
        assert!(poly.contains(5.0, 5.0));
        assert!(poly.contains(0.5, 9.5));
        assert!(!poly.contains(-1.0, 5.0));
        assert!(!poly.contains(5.0, 10.5));
    }

    #[test]
    fn explicitly_closed_rings_behave_the_same() {
        let mut ring = square(0.0, 0.0, 10.0);
        ring.push(ring[0]);
        let poly = Polygon::new(vec![ring]).unwrap();
        assert!(poly.contains(5.0, 5.0));
        assert!(!poly.contains(15.0, 5.0));
    }

    #[test]
    fn holes_are_carved_out_by_parity() {
        let poly = Polygon::new(vec![square(0.0, 0.0, 10.0), square(4.0, 4.0, 2.0)]).unwrap();
        assert!(poly.contains(1.0, 1.0));
        assert!(!poly.contains(5.0, 5.0), "inside the hole");
        assert!(poly.contains(7.0, 5.0), "east of the hole");
    }

    #[test]
    fn disjoint_parts_are_both_inside() {
        let poly = Polygon::new(vec![square(0.0, 0.0, 2.0), square(10.0, 0.0, 2.0)]).unwrap();
        assert!(poly.contains(1.0, 1.0));
        assert!(poly.contains(11.0, 1.0));
        assert!(!poly.contains(5.0, 1.0), "gap between the parts");
    }

    #[test]
    fn bbox_spans_all_rings() {
        let poly = Polygon::new(vec![square(0.0, 0.0, 2.0), square(10.0, -3.0, 2.0)]).unwrap();
        assert_eq!(poly.bbox(), (0.0, -3.0, 12.0, 2.0));
    }

    #[test]
    fn concave_outline_is_handled() {
        // An L-shape: the notch at the top-right is outside.
        let poly = Polygon::new(vec![vec![
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 4.0),
            (4.0, 4.0),
            (4.0, 10.0),
            (0.0, 10.0),
        ]])
        .unwrap();
        assert!(poly.contains(2.0, 8.0));
        assert!(poly.contains(8.0, 2.0));
        assert!(!poly.contains(8.0, 8.0), "the notch");
    }
}
