//! Raster primitives for the drawing tools.

use serde::{Deserialize, Serialize};

/// An integer pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Rasterize a line using Bresenham's line algorithm.
///
/// Points are ordered from `(x0, y0)` to `(x1, y1)`, both endpoints
/// included, and there are always `max(|dx|, |dy|) + 1` of them.
///
/// # Examples
///
/// ```
/// use zxpaint::shapes::{line_points, Point};
///
/// let points = line_points(0, 0, 3, 1);
/// assert_eq!(points.len(), 4);
/// assert_eq!(points[0], Point::new(0, 0));
/// assert_eq!(points[3], Point::new(3, 1));
/// ```
pub fn line_points(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<Point> {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut points = Vec::with_capacity(dx.max(-dy) as usize + 1);
    let (mut x, mut y) = (x0, y0);

    loop {
        points.push(Point::new(x, y));

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_line(x0: i32, y0: i32, x1: i32, y1: i32) {
        let points = line_points(x0, y0, x1, y1);
        let expected = (x1 - x0).abs().max((y1 - y0).abs()) as usize + 1;
        assert_eq!(points.len(), expected, "line ({x0},{y0})-({x1},{y1})");
        assert_eq!(points[0], Point::new(x0, y0));
        assert_eq!(*points.last().unwrap(), Point::new(x1, y1));
        for pair in points.windows(2) {
            assert!((pair[1].x - pair[0].x).abs() <= 1);
            assert!((pair[1].y - pair[0].y).abs() <= 1);
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_single_point() {
        assert_eq!(line_points(4, 5, 4, 5), vec![Point::new(4, 5)]);
    }

    #[test]
    fn test_horizontal() {
        let points = line_points(0, 0, 3, 0);
        assert_eq!(
            points,
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0), Point::new(3, 0)]
        );
    }

    #[test]
    fn test_vertical_reversed() {
        let points = line_points(2, 3, 2, 0);
        assert_eq!(
            points,
            vec![Point::new(2, 3), Point::new(2, 2), Point::new(2, 1), Point::new(2, 0)]
        );
    }

    #[test]
    fn test_diagonal() {
        let points = line_points(0, 0, 3, 3);
        assert_eq!(points.len(), 4);
        assert!(points.iter().all(|p| p.x == p.y));
    }

    #[test]
    fn test_all_octants() {
        let ends = [
            (7, 2),
            (2, 7),
            (-2, 7),
            (-7, 2),
            (-7, -2),
            (-2, -7),
            (2, -7),
            (7, -2),
        ];
        for (ex, ey) in ends {
            check_line(10, 10, 10 + ex, 10 + ey);
            check_line(10 + ex, 10 + ey, 10, 10);
        }
    }

    #[test]
    fn test_exhaustive_small_range() {
        for x1 in -6..=6 {
            for y1 in -6..=6 {
                check_line(0, 0, x1, y1);
            }
        }
    }
}
