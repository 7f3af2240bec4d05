use crate::turtle::{DrawOp, TurtlePose};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A straight stretch of travel between two points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Axis-aligned bounding box over every point the turtle visited.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn around(point: Vec2) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    pub fn include(&mut self, point: Vec2) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// The complete, renderer-agnostic geometry of an interpreted L-System.
///
/// This is what an external rendering layer consumes: visible line segments in
/// drawing order, the pen-up moves between them (from `f` and from pose
/// restores), and the bounds needed to frame the picture.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathBlueprint {
    /// Lines drawn with the pen down, in emission order.
    pub segments: Vec<Segment>,

    /// Pen-up travel, in emission order.
    pub moves: Vec<Segment>,

    /// Bounds over segments and moves, including the starting point.
    pub bounds: Bounds,

    /// Pose of the turtle after the last op.
    pub final_pose: TurtlePose,
}

/// Seeded from [`TurtlePose::default`]. When interpreting with a custom
/// [`TurtleConfig::initial_pose`](crate::TurtleConfig::initial_pose), build the
/// sink with [`TurtleInterpreter::blueprint_sink`](crate::TurtleInterpreter::blueprint_sink)
/// instead.
impl Default for PathBlueprint {
    fn default() -> Self {
        Self::new(TurtlePose::default())
    }
}

impl PathBlueprint {
    pub fn new(start: TurtlePose) -> Self {
        Self {
            segments: Vec::new(),
            moves: Vec::new(),
            bounds: Bounds::around(start.position),
            final_pose: start,
        }
    }

    /// Rebuilds the geometry of a recorded op sequence, starting at `start`.
    pub fn from_ops<'a>(start: TurtlePose, ops: impl IntoIterator<Item = &'a DrawOp>) -> Self {
        let mut blueprint = Self::new(start);
        let mut pose = start;
        for op in ops {
            let next = pose.apply(op);
            blueprint.record(op, &pose, &next);
            pose = next;
        }
        blueprint
    }

    /// Records one op given the poses before and after it.
    pub fn record(&mut self, op: &DrawOp, from: &TurtlePose, to: &TurtlePose) {
        let segment = Segment {
            start: from.position,
            end: to.position,
        };
        match op {
            DrawOp::MoveForward { drawing: true, .. } => self.segments.push(segment),
            DrawOp::MoveForward { drawing: false, .. } | DrawOp::PopPose(_) => {
                self.moves.push(segment)
            }
            DrawOp::TurnLeft(_) | DrawOp::TurnRight(_) | DrawOp::PushPose(_) => {}
        }
        self.bounds.include(to.position);
        self.final_pose = *to;
    }

    /// Total length of all visible lines.
    pub fn drawn_length(&self) -> f32 {
        self.segments.iter().map(Segment::length).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
