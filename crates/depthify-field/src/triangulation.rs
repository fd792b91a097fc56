use std::collections::HashSet;

use robust::Coord;

use crate::error::FieldError;

/// Vertex id of the point at infinity closing the convex hull.
const GHOST: usize = usize::MAX;

/// A Delaunay triangulation of a set of 2D points.
///
/// Built incrementally with the Bowyer-Watson algorithm. The convex hull is
/// closed with ghost triangles sharing a vertex at infinity, so points outside
/// the current hull are inserted like any other point and the final mesh covers
/// exactly the convex hull of the input.
///
/// The orientation and circumcircle tests are exact, so collinear and cocircular
/// inputs such as pixel positions never produce overlapping or flat triangles.
/// Coincident points are kept once (the first occurrence wins) and non-finite
/// points are ignored. Triangle vertices index into the input slice and are
/// ordered counter-clockwise in a y-up frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangulation {
    triangles: Vec<[usize; 3]>,
}

impl Triangulation {
    /// Triangulate the given `(x, y)` points.
    ///
    /// # Errors
    ///
    /// * [`FieldError::NotEnoughPoints`] with fewer than three distinct finite points.
    /// * [`FieldError::CollinearPoints`] when all the points lie on a line.
    ///
    /// # Example
    ///
    /// ```
    /// use depthify_field::Triangulation;
    ///
    /// let points = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
    /// let tri = Triangulation::new(&points).unwrap();
    /// assert_eq!(tri.len(), 2);
    /// ```
    pub fn new(points: &[(f64, f64)]) -> Result<Self, FieldError> {
        // keep the first occurrence of each finite position
        let mut seen = HashSet::with_capacity(points.len());
        let unique = points
            .iter()
            .enumerate()
            .filter(|(_, (x, y))| x.is_finite() && y.is_finite())
            .filter(|(_, (x, y))| seen.insert(((x + 0.0).to_bits(), (y + 0.0).to_bits())))
            .map(|(i, _)| i)
            .collect::<Vec<_>>();

        if unique.len() < 3 {
            return Err(FieldError::NotEnoughPoints(unique.len()));
        }

        let selected = unique.iter().map(|&i| points[i]).collect::<Vec<_>>();
        let triangles = bowyer_watson(&selected)?
            .into_iter()
            .map(|[a, b, c]| [unique[a], unique[b], unique[c]])
            .collect::<Vec<_>>();

        log::debug!(
            "triangulated {} points ({} distinct) into {} triangles",
            points.len(),
            unique.len(),
            triangles.len()
        );

        Ok(Self { triangles })
    }

    /// The triangles as triplets of indices into the input points.
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// The number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the triangulation has no triangle.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

#[inline]
fn coord(p: (f64, f64)) -> Coord<f64> {
    Coord { x: p.0, y: p.1 }
}

/// Twice the signed area of `abc`, positive when counter-clockwise. Exact in sign.
#[inline]
fn orient(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    robust::orient2d(coord(a), coord(b), coord(c))
}

/// Positive when `d` lies inside the circumcircle of the counter-clockwise `abc`.
/// Exact in sign.
#[inline]
fn in_circle(a: (f64, f64), b: (f64, f64), c: (f64, f64), d: (f64, f64)) -> f64 {
    robust::incircle(coord(a), coord(b), coord(c), coord(d))
}

/// Whether `p` lies strictly between `a` and `b`, assuming the three are collinear.
#[inline]
fn strictly_between(a: (f64, f64), b: (f64, f64), p: (f64, f64)) -> bool {
    let ab = (b.0 - a.0, b.1 - a.1);
    let from_a = (p.0 - a.0) * ab.0 + (p.1 - a.1) * ab.1;
    let from_b = (p.0 - b.0) * -ab.0 + (p.1 - b.1) * -ab.1;
    from_a > 0.0 && from_b > 0.0
}

/// Whether inserting `p` invalidates the triangle.
///
/// Ghost triangles `[a, b, GHOST]` stand for the outer half-plane left of `a -> b`
/// together with the open segment `ab`.
fn is_conflicting(tri: &[usize; 3], pts: &[(f64, f64)], p: (f64, f64)) -> bool {
    let [a, b, c] = *tri;
    if c == GHOST {
        let (pa, pb) = (pts[a], pts[b]);
        let o = orient(pa, pb, p);
        o > 0.0 || (o == 0.0 && strictly_between(pa, pb, p))
    } else {
        in_circle(pts[a], pts[b], pts[c], p) > 0.0
    }
}

/// Keep the ghost vertex in the last slot, preserving the winding.
#[inline]
fn canonical(tri: [usize; 3]) -> [usize; 3] {
    match tri {
        [GHOST, b, c] => [b, c, GHOST],
        [a, GHOST, c] => [c, a, GHOST],
        t => t,
    }
}

fn bowyer_watson(pts: &[(f64, f64)]) -> Result<Vec<[usize; 3]>, FieldError> {
    // seed with the first non collinear triplet
    let (a, b) = (0, 1);
    let c = (2..pts.len())
        .find(|&k| orient(pts[a], pts[b], pts[k]) != 0.0)
        .ok_or(FieldError::CollinearPoints(pts.len()))?;
    let (a, b) = if orient(pts[a], pts[b], pts[c]) > 0.0 {
        (a, b)
    } else {
        (b, a)
    };

    let mut triangles = vec![[a, b, c], [b, a, GHOST], [c, b, GHOST], [a, c, GHOST]];

    for p in (0..pts.len()).filter(|&k| k != a && k != b && k != c) {
        let point = pts[p];

        let (bad, good): (Vec<_>, Vec<_>) = triangles
            .into_iter()
            .partition(|tri| is_conflicting(tri, pts, point));
        triangles = good;

        if bad.is_empty() {
            log::warn!("point {p} does not conflict with any triangle, skipping it");
            continue;
        }

        let edges = bad
            .iter()
            .flat_map(|&[a, b, c]| [(a, b), (b, c), (c, a)])
            .collect::<Vec<_>>();
        let lookup = edges.iter().copied().collect::<HashSet<_>>();

        // the cavity boundary keeps the edges not shared by two bad triangles
        triangles.extend(
            edges
                .into_iter()
                .filter(|(e0, e1)| !lookup.contains(&(*e1, *e0)))
                .map(|(e0, e1)| canonical([e0, e1, p])),
        );
    }

    triangles.retain(|tri| tri[2] != GHOST);
    Ok(triangles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn signed_area(points: &[(f64, f64)], tri: &[usize; 3]) -> f64 {
        orient(points[tri[0]], points[tri[1]], points[tri[2]]) / 2.0
    }

    fn total_area(points: &[(f64, f64)], tri: &Triangulation) -> f64 {
        tri.triangles()
            .iter()
            .map(|t| signed_area(points, t))
            .sum()
    }

    #[test]
    fn square_two_triangles() -> Result<(), FieldError> {
        let points = [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
        let tri = Triangulation::new(&points)?;
        assert_eq!(tri.len(), 2);
        approx::assert_relative_eq!(total_area(&points, &tri), 16.0);
        Ok(())
    }

    #[test]
    fn triangles_are_counter_clockwise() -> Result<(), FieldError> {
        let points = [(0.0, 0.0), (10.0, 0.0), (5.0, 8.0), (5.0, 3.0), (2.0, 1.0)];
        let tri = Triangulation::new(&points)?;
        for t in tri.triangles() {
            assert!(signed_area(&points, t) > 0.0, "{t:?}");
        }
        // the hull is the outer triangle
        approx::assert_relative_eq!(total_area(&points, &tri), 40.0);
        Ok(())
    }

    #[test]
    fn point_on_hull_edge() -> Result<(), FieldError> {
        let points = [(0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (2.0, 0.0)];
        let tri = Triangulation::new(&points)?;
        assert_eq!(tri.len(), 2);
        approx::assert_relative_eq!(total_area(&points, &tri), 8.0);
        Ok(())
    }

    #[test]
    fn collinear_prefix() -> Result<(), FieldError> {
        // the first three points are collinear, one of them beyond the seed edge
        let points = [(0.0, 0.0), (1.0, 0.0), (3.0, 0.0), (1.0, 2.0)];
        let tri = Triangulation::new(&points)?;
        assert_eq!(tri.len(), 2);
        approx::assert_relative_eq!(total_area(&points, &tri), 3.0);
        Ok(())
    }

    #[test]
    fn duplicates_are_ignored() -> Result<(), FieldError> {
        let points = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 0.0), (-0.0, 0.0)];
        let tri = Triangulation::new(&points)?;
        assert_eq!(tri.triangles(), &[[0, 1, 2]]);
        Ok(())
    }

    #[test]
    fn degenerate_inputs() {
        let collinear = [(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (5.0, 5.0)];
        assert_eq!(
            Triangulation::new(&collinear),
            Err(FieldError::CollinearPoints(4))
        );

        let coincident = [(1.0, 1.0); 5];
        assert_eq!(
            Triangulation::new(&coincident),
            Err(FieldError::NotEnoughPoints(1))
        );

        let non_finite = [(0.0, 0.0), (f64::NAN, 1.0), (1.0, f64::INFINITY), (2.0, 0.0)];
        assert_eq!(
            Triangulation::new(&non_finite),
            Err(FieldError::NotEnoughPoints(2))
        );
    }

    #[test]
    fn grid_points_cover_hull() -> Result<(), FieldError> {
        // cocircular points everywhere
        let points = (0..5)
            .flat_map(|y| (0..5).map(move |x| (x as f64, y as f64)))
            .collect::<Vec<_>>();
        let tri = Triangulation::new(&points)?;
        assert_eq!(tri.len(), 32);
        approx::assert_relative_eq!(total_area(&points, &tri), 16.0, epsilon = 1e-9);
        Ok(())
    }

    /// Checks the mesh is a proper triangulation of `points`: every triangle strictly
    /// counter-clockwise, no edge used twice in the same direction, and the triangle
    /// count given by Euler's formula.
    fn assert_valid_mesh(points: &[(f64, f64)], tri: &Triangulation) {
        for t in tri.triangles() {
            let [a, b, c] = t.map(|i| points[i]);
            let area2 = (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0);
            assert!(area2 > 0.0, "{t:?} in {points:?}");
        }

        let edges = tri
            .triangles()
            .iter()
            .flat_map(|&[a, b, c]| [(a, b), (b, c), (c, a)])
            .collect::<Vec<_>>();
        let unique = edges.iter().copied().collect::<HashSet<_>>();
        assert_eq!(edges.len(), unique.len(), "{points:?}");

        // triangles = 2n - 2 - boundary vertices
        let boundary = edges
            .iter()
            .filter(|(a, b)| !unique.contains(&(*b, *a)))
            .count();
        assert_eq!(tri.len(), 2 * points.len() - 2 - boundary, "{points:?}");
    }

    #[test]
    fn odd_sized_grid() -> Result<(), FieldError> {
        // a 7 x 7 grid has no power of two extent
        let points = (0..7)
            .flat_map(|y| (0..7).map(move |x| (x as f64, y as f64)))
            .collect::<Vec<_>>();
        let tri = Triangulation::new(&points)?;
        assert_eq!(tri.len(), 72);
        assert_valid_mesh(&points, &tri);
        approx::assert_relative_eq!(total_area(&points, &tri), 36.0);
        Ok(())
    }

    #[test]
    fn dense_integer_points() -> Result<(), FieldError> {
        // small grids make collinear and cocircular subsets the common case
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..500 {
            let width = rng.random_range(3..31);
            let height = rng.random_range(3..31);
            let n = rng.random_range(4..41).min(width * height);

            let mut points: Vec<(f64, f64)> = Vec::with_capacity(n);
            while points.len() < n {
                let p = (
                    rng.random_range(0..width) as f64,
                    rng.random_range(0..height) as f64,
                );
                if !points.contains(&p) {
                    points.push(p);
                }
            }

            match Triangulation::new(&points) {
                Ok(tri) => assert_valid_mesh(&points, &tri),
                Err(FieldError::CollinearPoints(_)) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    #[test]
    fn random_points_satisfy_euler() -> Result<(), FieldError> {
        let mut rng = StdRng::seed_from_u64(42);
        let points = (0..200)
            .map(|_| (rng.random_range(0.0..640.0), rng.random_range(0.0..480.0)))
            .collect::<Vec<(f64, f64)>>();
        let tri = Triangulation::new(&points)?;

        // every interior edge is shared by exactly two triangles
        let edges = tri
            .triangles()
            .iter()
            .flat_map(|&[a, b, c]| [(a, b), (b, c), (c, a)])
            .collect::<Vec<_>>();
        let unique = edges.iter().copied().collect::<HashSet<_>>();
        assert_eq!(edges.len(), unique.len());

        // triangles = 2n - 2 - hull vertices
        let hull = edges
            .iter()
            .filter(|(a, b)| !unique.contains(&(*b, *a)))
            .count();
        assert_eq!(tri.len(), 2 * points.len() - 2 - hull);

        for t in tri.triangles() {
            assert!(signed_area(&points, t) > 0.0);
        }
        Ok(())
    }
}
