//! Growing point chain shared by the player and bots.

use protocol::Point;

/// Ordered body points, head first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chain {
    points: Vec<Point>,
}

impl Chain {
    /// Build a chain from explicit points (head first).
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Lay out `length` points trailing behind `head`, opposite to `heading`.
    pub fn straight(head: Point, heading: f64, length: usize, spacing: f64) -> Self {
        let back = -Point::new(heading.cos(), heading.sin());
        let points = (0..length.max(1))
            .map(|i| head + back * (spacing * i as f64))
            .collect();
        Self { points }
    }

    #[inline]
    pub fn head(&self) -> Point {
        self.points.first().copied().unwrap_or(Point::ZERO)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Move the head `distance` units along `heading` (radians).
    pub fn advance_head(&mut self, heading: f64, distance: f64) {
        if let Some(head) = self.points.first_mut() {
            *head += Point::new(heading.cos(), heading.sin()) * distance;
        }
    }

    /// Append one tail point, continuing the direction of the last segment.
    ///
    /// A single point (or a degenerate last segment) extends straight down.
    pub fn grow(&mut self, spacing: f64) {
        let n = self.points.len();
        let Some(&last) = self.points.last() else {
            return;
        };
        let dir = if n >= 2 {
            let d = last - self.points[n - 2];
            let len = d.length();
            if len > f64::EPSILON { d / len } else { Point::Y }
        } else {
            Point::Y
        };
        self.points.push(last + dir * spacing);
    }

    /// Single forward pass pulling each point to within `max_distance` of its
    /// predecessor.
    pub fn relax(&mut self, max_distance: f64) {
        for i in 1..self.points.len() {
            let prev = self.points[i - 1];
            let delta = prev - self.points[i];
            let dist = delta.length();
            if dist > max_distance && dist > 0.0 {
                let ratio = (dist - max_distance) / dist;
                self.points[i] += delta * ratio;
            }
        }
    }

    /// Every other body point, starting with the head.
    pub fn alternate_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().step_by(2).copied()
    }
}
