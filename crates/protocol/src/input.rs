//! Frame input sampled once per tick.

use crate::{InputError, Point};

/// Input consumed by one simulation tick.
///
/// `pointer_offset` is the pointer position relative to the viewport centre.
/// `boost` is an edge: true only on the tick the activation key was pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub pointer_offset: Point,
    pub boost: bool,
}

impl FrameInput {
    pub fn new(pointer_offset: Point, boost: bool) -> Self {
        Self {
            pointer_offset,
            boost,
        }
    }

    /// Pointer-only input with no boost edge.
    pub fn pointer(x: f64, y: f64) -> Self {
        Self::new(Point::new(x, y), false)
    }

    /// Validated pointer offset.
    pub fn checked_pointer(&self) -> Result<Point, InputError> {
        let p = self.pointer_offset;
        if p.x.is_finite() && p.y.is_finite() {
            Ok(p)
        } else {
            Err(InputError::NonFinitePointer { x: p.x, y: p.y })
        }
    }

    /// Unit direction toward the pointer, or `None` when the pointer sits on the
    /// viewport centre or is malformed.
    ///
    /// Taken from the angle of the raw offset, so offsets whose length
    /// overflows still point the right way.
    pub fn heading(&self) -> Option<Point> {
        let p = self.checked_pointer().ok()?;
        if p.abs().max_element() <= f64::EPSILON {
            return None;
        }
        Some(Point::from_angle(p.y.atan2(p.x)))
    }
}
