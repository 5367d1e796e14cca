use super::{RasterError, TriangleScanline};

/// Largest absolute value accepted for a vertex coordinate.
///
/// Differences of coordinates fit in 31 bits, so every edge function and slope product computed
/// on the triangle fits in an `i64`.
pub const MAX_COORDINATE: i64 = (1 << 30) - 1;

/// A pixel coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    /// Horizontal coordinate, growing to the right.
    pub x: i64,
    /// Vertical coordinate, growing downwards.
    pub y: i64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    fn in_range(&self) -> bool {
        let limit = MAX_COORDINATE as u64;
        self.x.unsigned_abs() <= limit && self.y.unsigned_abs() <= limit
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A non-degenerate triangle with integer vertices.
///
/// The vertices are kept in the order they were given; the traversal sorts its own copy.
///
/// # Examples
///
/// ```
/// use lowpoly_imgproc::raster::{Point, Triangle};
///
/// let triangle = Triangle::new(Point::new(0, 0), Point::new(4, 0), Point::new(0, 4)).unwrap();
/// assert_eq!(triangle.scanline().count(), 15);
///
/// assert!(Triangle::new(Point::new(0, 0), Point::new(2, 2), Point::new(4, 4)).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
    vertices: [Point; 3],
}

impl Triangle {
    /// Create a new triangle from its three vertices.
    ///
    /// # Errors
    ///
    /// * [`RasterError::CoordinateOutOfRange`] if a coordinate exceeds [`MAX_COORDINATE`] in
    ///   absolute value.
    /// * [`RasterError::DegenerateTriangle`] if the vertices are collinear.
    pub fn new(a: Point, b: Point, c: Point) -> Result<Self, RasterError> {
        if !(a.in_range() && b.in_range() && c.in_range()) {
            return Err(RasterError::CoordinateOutOfRange(a, b, c));
        }

        let triangle = Self {
            vertices: [a, b, c],
        };
        if triangle.cross() == 0 {
            return Err(RasterError::DegenerateTriangle(a, b, c));
        }
        Ok(triangle)
    }

    /// The vertices in construction order.
    pub fn vertices(&self) -> [Point; 3] {
        self.vertices
    }

    /// The 2-D cross product of the edge vectors `a - b` and `a - c`.
    ///
    /// Its sign gives the winding of the vertices, and twice the area is its magnitude.
    pub fn cross(&self) -> i64 {
        let [a, b, c] = self.vertices;
        (a.x - b.x) * (a.y - c.y) - (a.x - c.x) * (a.y - b.y)
    }

    /// Whether the point lies inside the triangle or on its boundary.
    pub fn contains(&self, p: Point) -> bool {
        // the triangle lies inside the coordinate range
        if !p.in_range() {
            return false;
        }
        let [a, b, c] = self.vertices;
        let edge = |u: Point, v: Point| (v.x - u.x) * (p.y - u.y) - (v.y - u.y) * (p.x - u.x);
        let (e0, e1, e2) = (edge(a, b), edge(b, c), edge(c, a));
        (e0 >= 0 && e1 >= 0 && e2 >= 0) || (e0 <= 0 && e1 <= 0 && e2 <= 0)
    }

    /// The inclusive axis aligned bounding box as (top left, bottom right).
    pub fn bounding_box(&self) -> (Point, Point) {
        let [a, b, c] = self.vertices;
        (
            Point::new(a.x.min(b.x).min(c.x), a.y.min(b.y).min(c.y)),
            Point::new(a.x.max(b.x).max(c.x), a.y.max(b.y).max(c.y)),
        )
    }

    /// Start a fresh traversal of the pixels covered by the triangle.
    pub fn scanline(&self) -> TriangleScanline {
        TriangleScanline::new(self)
    }

    /// Start a traversal limited to the inclusive rectangle from `top_left` to `bottom_right`.
    ///
    /// Yields the points of [`Triangle::scanline`] lying inside the rectangle, in the same
    /// order, without walking the scanlines and columns outside of it.
    pub fn scanline_within(&self, top_left: Point, bottom_right: Point) -> TriangleScanline {
        TriangleScanline::within(self, top_left, bottom_right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_display() {
        assert_eq!(Point::new(3, -2).to_string(), "(3,-2)");
        assert_eq!(Point::from((1, 2)), Point::new(1, 2));
    }

    #[test]
    fn test_degenerate_triangle() {
        let (a, b, c) = (Point::new(0, 0), Point::new(4, 0), Point::new(4, 0));
        assert_eq!(
            Triangle::new(a, b, c),
            Err(RasterError::DegenerateTriangle(a, b, c))
        );

        let res = Triangle::new(Point::new(1, 1), Point::new(3, 5), Point::new(5, 9));
        assert!(matches!(res, Err(RasterError::DegenerateTriangle(..))));
    }

    #[test]
    fn test_coordinate_out_of_range() {
        let (a, b, c) = (
            Point::new(0, 0),
            Point::new(4_000_000_000, 0),
            Point::new(0, 4_000_000_000),
        );
        assert_eq!(
            Triangle::new(a, b, c),
            Err(RasterError::CoordinateOutOfRange(a, b, c))
        );

        let (a, b, c) = (Point::new(i64::MIN, 0), Point::new(1, 0), Point::new(0, 1));
        assert_eq!(
            Triangle::new(a, b, c),
            Err(RasterError::CoordinateOutOfRange(a, b, c))
        );
    }

    #[test]
    fn test_extreme_coordinates() -> Result<(), RasterError> {
        let m = MAX_COORDINATE;
        let triangle = Triangle::new(Point::new(-m, -m), Point::new(m, -m), Point::new(-m, m))?;
        assert_eq!(triangle.cross().abs(), 4 * m * m);
        assert!(triangle.contains(Point::new(-m, m)));
        assert!(!triangle.contains(Point::new(m, m)));
        assert!(!triangle.contains(Point::new(i64::MAX, i64::MIN)));

        // collinear at the limits is still reported as degenerate
        let res = Triangle::new(Point::new(-m, -m), Point::new(0, 0), Point::new(m, m));
        assert!(matches!(res, Err(RasterError::DegenerateTriangle(..))));
        Ok(())
    }

    #[test]
    fn test_cross_winding() -> Result<(), RasterError> {
        let ccw = Triangle::new(Point::new(0, 0), Point::new(4, 0), Point::new(0, 4))?;
        let cw = Triangle::new(Point::new(0, 0), Point::new(0, 4), Point::new(4, 0))?;
        assert_eq!(ccw.cross(), -cw.cross());
        assert_eq!(ccw.cross().abs(), 16);
        Ok(())
    }

    #[test]
    fn test_contains() -> Result<(), RasterError> {
        let triangle = Triangle::new(Point::new(0, 0), Point::new(4, 0), Point::new(0, 4))?;
        assert!(triangle.contains(Point::new(0, 0)));
        assert!(triangle.contains(Point::new(2, 2)));
        assert!(triangle.contains(Point::new(1, 1)));
        assert!(!triangle.contains(Point::new(3, 2)));
        assert!(!triangle.contains(Point::new(-1, 0)));
        Ok(())
    }

    #[test]
    fn test_bounding_box() -> Result<(), RasterError> {
        let triangle = Triangle::new(Point::new(5, -1), Point::new(-2, 3), Point::new(1, 7))?;
        assert_eq!(
            triangle.bounding_box(),
            (Point::new(-2, -1), Point::new(5, 7))
        );
        Ok(())
    }
}
