use std::iter::FusedIterator;

use super::{Point, Triangle};

// floor(num / den) for den > 0
fn floor_div(num: i64, den: i64) -> i64 {
    num.div_euclid(den)
}

// ceil(num / den) for den > 0
fn ceil_div(num: i64, den: i64) -> i64 {
    -(-num).div_euclid(den)
}

/// A triangle edge leaving the apex of a span, as an exact slope of `dx` columns per `dy` rows.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Edge {
    dx: i64,
    dy: i64,
}

impl Edge {
    fn new(dx: i64, dy: i64) -> Self {
        debug_assert!(dy > 0);
        Self { dx, dy }
    }

    // dx / dy <= other.dx / other.dy, both denominators being positive
    fn is_left_of(&self, other: &Edge) -> bool {
        self.dx * other.dy <= other.dx * self.dy
    }
}

/// A flat-top or flat-bottom triangle walked one scanline at a time from its apex.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Span {
    apex: Point,
    left: Edge,
    right: Edge,
    /// first scanline to visit, the apex being scanline 0
    first: i64,
    /// one past the last scanline to visit
    end: i64,
    /// +1 walks towards increasing y, -1 towards decreasing y
    step: i64,
}

impl Span {
    fn new(apex: Point, e1: Edge, e2: Edge, rows: i64, step: i64) -> Self {
        let (left, right) = if e1.is_left_of(&e2) { (e1, e2) } else { (e2, e1) };
        Self {
            apex,
            left,
            right,
            first: 0,
            end: rows,
            step,
        }
    }

    /// Restrict the scanlines to those with `y_min <= y <= y_max`.
    fn clip_rows(self, y_min: i64, y_max: i64) -> Self {
        let (lo, hi) = if self.step > 0 {
            (y_min.saturating_sub(self.apex.y), y_max.saturating_sub(self.apex.y))
        } else {
            (self.apex.y.saturating_sub(y_max), self.apex.y.saturating_sub(y_min))
        };
        Self {
            first: self.first.max(lo),
            end: self.end.min(hi.saturating_add(1)),
            ..self
        }
    }

    /// The y coordinate and the inclusive [start, end] pixel columns of the k-th scanline.
    ///
    /// The start is the ceiling of the left edge and the end the floor of the right edge, both
    /// evaluated exactly.
    fn row_bounds(&self, k: i64) -> (i64, i64, i64) {
        let y = self.apex.y + self.step * k;
        let start = self.apex.x + ceil_div(self.left.dx * k, self.left.dy);
        let end = self.apex.x + floor_div(self.right.dx * k, self.right.dy);
        (y, start, end)
    }
}

/// Iterator over the pixels covered by a [`Triangle`].
///
/// Yields every integer point inside the triangle or on its boundary exactly once. Points come
/// scanline by scanline with increasing x inside each scanline. The triangle is split at its
/// middle vertex into a flat-bottom part walked downwards from the top vertex and a flat-top part
/// walked upwards from the bottom vertex; the scanline through the middle vertex belongs to the
/// first part only.
///
/// The traversal is deterministic: two traversals of the same triangle yield the same sequence.
#[derive(Clone, Debug)]
pub struct TriangleScanline {
    spans: [Option<Span>; 2],
    span_idx: usize,
    row: i64,
    y: i64,
    x: i64,
    x_end: i64,
    x_min: i64,
    x_max: i64,
}

impl TriangleScanline {
    pub(crate) fn new(triangle: &Triangle) -> Self {
        Self::from_spans(Self::spans(triangle))
    }

    /// Traversal restricted to the inclusive rectangle spanned by `top_left` and `bottom_right`.
    pub(crate) fn within(triangle: &Triangle, top_left: Point, bottom_right: Point) -> Self {
        let spans = Self::spans(triangle)
            .map(|span| span.map(|s| s.clip_rows(top_left.y, bottom_right.y)));
        Self {
            x_min: top_left.x,
            x_max: bottom_right.x,
            ..Self::from_spans(spans)
        }
    }

    fn spans(triangle: &Triangle) -> [Option<Span>; 2] {
        let mut v = triangle.vertices();
        v.sort_by_key(|p| p.y);
        let [top, mid, bottom] = v;

        if top.y == mid.y {
            // flat top, walk up from the bottom vertex
            let height = bottom.y - top.y;
            [
                Some(Span::new(
                    bottom,
                    Edge::new(top.x - bottom.x, height),
                    Edge::new(mid.x - bottom.x, height),
                    height + 1,
                    -1,
                )),
                None,
            ]
        } else if mid.y == bottom.y {
            // flat bottom, walk down from the top vertex
            let height = bottom.y - top.y;
            [
                Some(Span::new(
                    top,
                    Edge::new(mid.x - top.x, height),
                    Edge::new(bottom.x - top.x, height),
                    height + 1,
                    1,
                )),
                None,
            ]
        } else {
            let long_edge_height = bottom.y - top.y;
            let upper_height = mid.y - top.y;
            let lower_height = bottom.y - mid.y;
            [
                Some(Span::new(
                    top,
                    Edge::new(mid.x - top.x, upper_height),
                    Edge::new(bottom.x - top.x, long_edge_height),
                    upper_height + 1,
                    1,
                )),
                // one scanline short, the middle one was already visited
                Some(Span::new(
                    bottom,
                    Edge::new(mid.x - bottom.x, lower_height),
                    Edge::new(top.x - bottom.x, long_edge_height),
                    lower_height,
                    -1,
                )),
            ]
        }
    }

    fn from_spans(spans: [Option<Span>; 2]) -> Self {
        Self {
            spans,
            span_idx: 0,
            row: spans[0].map_or(0, |s| s.first),
            y: 0,
            x: 1,
            x_end: 0,
            x_min: i64::MIN,
            x_max: i64::MAX,
        }
    }
}

impl Iterator for TriangleScanline {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        loop {
            if self.x <= self.x_end {
                let p = Point::new(self.x, self.y);
                self.x += 1;
                return Some(p);
            }

            let span = self.spans.get(self.span_idx).copied().flatten()?;
            if self.row >= span.end {
                self.span_idx += 1;
                self.row = self.spans.get(self.span_idx).copied().flatten().map_or(0, |s| s.first);
                continue;
            }

            let (y, start, end) = span.row_bounds(self.row);
            (self.y, self.x, self.x_end) = (y, start.max(self.x_min), end.min(self.x_max));
            self.row += 1;
        }
    }
}

impl FusedIterator for TriangleScanline {}
