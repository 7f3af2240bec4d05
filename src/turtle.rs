//! Turtle pose and operations for 2D interpretation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Heading (degrees) of a freshly created turtle: pointing along `+Y`.
pub const DEFAULT_HEADING: f32 = 90.0;

/// Position and heading of the turtle at one instant.
///
/// Headings are in degrees, measured counter-clockwise from `+X`, and kept in
/// `[0, 360)`. Poses are plain values: saving one onto the stack copies it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtlePose {
    /// Current position of the "pen".
    pub position: Vec2,

    /// Current heading in degrees.
    pub heading: f32,
}

impl Default for TurtlePose {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            heading: DEFAULT_HEADING,
        }
    }
}

impl TurtlePose {
    pub fn new(position: Vec2, heading: f32) -> Self {
        Self {
            position,
            heading: normalize_degrees(heading),
        }
    }

    /// Unit vector along the current heading.
    pub fn direction(&self) -> Vec2 {
        let (sin, cos) = self.heading.to_radians().sin_cos();
        Vec2::new(cos, sin)
    }

    /// The pose after travelling `distance` along the current heading.
    ///
    /// Zero and negative distances are allowed (degenerate or reversed moves).
    pub fn advanced(&self, distance: f32) -> Self {
        Self {
            position: self.position + self.direction() * distance,
            heading: self.heading,
        }
    }

    /// The pose after turning counter-clockwise by `degrees`.
    pub fn turned(&self, degrees: f32) -> Self {
        Self {
            position: self.position,
            heading: normalize_degrees(self.heading + degrees),
        }
    }

    /// Applies one emitted operation and returns the resulting pose.
    ///
    /// Because [`DrawOp::PopPose`] carries the restored pose, replaying a
    /// recorded op sequence from the initial pose needs no stack.
    pub fn apply(&self, op: &DrawOp) -> Self {
        match *op {
            DrawOp::MoveForward { distance, .. } => self.advanced(distance),
            DrawOp::TurnLeft(angle) => self.turned(angle),
            DrawOp::TurnRight(angle) => self.turned(-angle),
            DrawOp::PushPose(_) => *self,
            DrawOp::PopPose(restored) => restored,
        }
    }
}

fn normalize_degrees(degrees: f32) -> f32 {
    let d = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if d >= 360.0 { 0.0 } else { d }
}

/// Meaning of a symbol for the turtle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurtleOp {
    /// Advance one step drawing a line (`F`, `l`, `r`).
    Draw,
    /// Advance one step with the pen lifted (`f`).
    Move,
    /// Rotate counter-clockwise by the turn angle (`+`).
    TurnLeft,
    /// Rotate clockwise by the turn angle (`-`).
    TurnRight,
    /// Save the current pose (`[`).
    Push,
    /// Restore the most recently saved pose (`]`).
    Pop,
    /// No-op. Used for rewriting placeholders such as `L` and `R`.
    Ignore,
}

/// A drawing primitive emitted by the interpreter, in emission order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawOp {
    /// Travel `distance` along the heading; `drawing` tells whether the pen is down.
    MoveForward { distance: f32, drawing: bool },
    /// Counter-clockwise rotation in degrees.
    TurnLeft(f32),
    /// Clockwise rotation in degrees.
    TurnRight(f32),
    /// The pose that was saved.
    PushPose(TurtlePose),
    /// The pose restored from the stack; the turtle jumps there with the pen up.
    PopPose(TurtlePose),
}

impl DrawOp {
    /// Whether this op leaves a visible mark.
    pub fn is_visible(&self) -> bool {
        matches!(self, DrawOp::MoveForward { drawing: true, .. })
    }
}
