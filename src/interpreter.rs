//! Interpreter that converts an L-System command string into [`DrawOp`]s.
//!
//! The entry point is [`TurtleInterpreter`]. Configure it with a [`TurtleConfig`],
//! register symbol-to-operation mappings via [`TurtleInterpreter::set_op`] or
//! [`TurtleInterpreter::populate_standard_symbols`], then call
//! [`TurtleInterpreter::interpret`] (buffered) or
//! [`TurtleInterpreter::interpret_into`] (streaming into a [`DrawSink`]).

use crate::blueprint::PathBlueprint;
use crate::error::InterpretError;
use crate::turtle::{DEFAULT_HEADING, DrawOp, TurtleOp, TurtlePose};
use glam::Vec2;
use log::debug;
use std::collections::HashMap;
use symbios::{SymbiosState, SymbolTable};

/// Configuration for turtle interpretation.
#[derive(Clone, Debug)]
pub struct TurtleConfig {
    /// Distance travelled by `Draw` and `Move` symbols.
    pub step_length: f32,
    /// Rotation (degrees) applied by `TurnLeft` / `TurnRight` symbols.
    pub turn_angle: f32,
    /// Pose the turtle starts in. Default: origin, heading 90 (up).
    pub initial_pose: TurtlePose,
}

impl Default for TurtleConfig {
    fn default() -> Self {
        Self {
            step_length: 1.0,
            turn_angle: 90.0,
            initial_pose: TurtlePose::new(Vec2::ZERO, DEFAULT_HEADING),
        }
    }
}

impl TurtleConfig {
    pub fn new(step_length: f32, turn_angle: f32) -> Self {
        Self {
            step_length,
            turn_angle,
            ..Default::default()
        }
    }
}

/// Receives drawing operations as the interpreter produces them.
///
/// `from` and `to` are the turtle poses immediately before and after `op`.
/// Implementations may block (e.g. drive a live canvas); the interpreter
/// makes no assumption about how long a call takes.
pub trait DrawSink {
    fn draw(&mut self, op: &DrawOp, from: &TurtlePose, to: &TurtlePose);
}

impl DrawSink for Vec<DrawOp> {
    fn draw(&mut self, op: &DrawOp, _from: &TurtlePose, _to: &TurtlePose) {
        self.push(*op);
    }
}

impl DrawSink for PathBlueprint {
    fn draw(&mut self, op: &DrawOp, from: &TurtlePose, to: &TurtlePose) {
        self.record(op, from, to);
    }
}

/// Interprets L-System output as 2D turtle graphics.
pub struct TurtleInterpreter {
    op_map: HashMap<char, TurtleOp>,
    config: TurtleConfig,
}

impl TurtleInterpreter {
    /// Creates a new interpreter with the given configuration and an empty symbol map.
    ///
    /// Register operations with [`set_op`](Self::set_op) or
    /// [`populate_standard_symbols`](Self::populate_standard_symbols) before
    /// interpreting; unmapped symbols are ignored.
    pub fn new(config: TurtleConfig) -> Self {
        Self {
            op_map: HashMap::new(),
            config,
        }
    }

    /// Creates an interpreter with the standard symbol table already registered.
    pub fn standard(config: TurtleConfig) -> Self {
        let mut interpreter = Self::new(config);
        interpreter.populate_standard_symbols();
        interpreter
    }

    /// Replaces the entire symbol-to-operation map in one step (builder pattern).
    pub fn with_map(mut self, map: HashMap<char, TurtleOp>) -> Self {
        self.op_map = map;
        self
    }

    /// Assigns a [`TurtleOp`] to a symbol, replacing any previous mapping.
    pub fn set_op(&mut self, symbol: char, op: TurtleOp) {
        self.op_map.insert(symbol, op);
    }

    /// The operation registered for `symbol`, or [`TurtleOp::Ignore`].
    pub fn op_for(&self, symbol: char) -> TurtleOp {
        self.op_map.get(&symbol).copied().unwrap_or(TurtleOp::Ignore)
    }

    pub fn config(&self) -> &TurtleConfig {
        &self.config
    }

    /// Registers the conventional symbol-to-operation mappings.
    ///
    /// | Symbol      | Operation   |
    /// |-------------|-------------|
    /// | `F` `l` `r` | Draw        |
    /// | `f`         | Move        |
    /// | `+` / `-`   | Turn left / right |
    /// | `[` / `]`   | Push / Pop  |
    /// | `L` `R`     | Ignore      |
    pub fn populate_standard_symbols(&mut self) {
        let mappings = [
            // Spatial
            ('F', TurtleOp::Draw),
            ('l', TurtleOp::Draw), // left branch tip
            ('r', TurtleOp::Draw), // right branch tip
            ('f', TurtleOp::Move),
            ('+', TurtleOp::TurnLeft),
            ('-', TurtleOp::TurnRight),
            // Rewriting placeholders
            ('L', TurtleOp::Ignore),
            ('R', TurtleOp::Ignore),
            // Flow
            ('[', TurtleOp::Push),
            (']', TurtleOp::Pop),
        ];

        for (symbol, op) in mappings {
            self.set_op(symbol, op);
        }
    }

    /// Interprets `commands` and returns every emitted operation.
    ///
    /// On an unbalanced `]` the error is returned and the partial output is
    /// discarded; use [`interpret_into`](Self::interpret_into) to keep it.
    pub fn interpret(&self, commands: &str) -> Result<Vec<DrawOp>, InterpretError> {
        let mut ops = Vec::new();
        self.interpret_into(commands, &mut ops)?;
        Ok(ops)
    }

    /// An empty [`PathBlueprint`] whose bounds start at this interpreter's
    /// initial pose, ready to pass to [`interpret_into`](Self::interpret_into).
    pub fn blueprint_sink(&self) -> PathBlueprint {
        PathBlueprint::new(self.config.initial_pose)
    }

    /// Interprets `commands` into a [`PathBlueprint`] of resolved segments.
    pub fn build_blueprint(&self, commands: &str) -> Result<PathBlueprint, InterpretError> {
        let mut blueprint = self.blueprint_sink();
        self.interpret_into(commands, &mut blueprint)?;
        Ok(blueprint)
    }

    /// Streams the interpretation of `commands` into `sink`, returning the final pose.
    ///
    /// The turtle starts at [`TurtleConfig::initial_pose`] with an empty pose
    /// stack. A `]` with nothing to pop stops interpretation with
    /// [`InterpretError::UnbalancedBracket`]; everything emitted before it has
    /// already reached the sink, and the result marks it as incomplete.
    pub fn interpret_into<S: DrawSink + ?Sized>(
        &self,
        commands: &str,
        sink: &mut S,
    ) -> Result<TurtlePose, InterpretError> {
        let mut run = Run::new(self.config.initial_pose);
        for (index, symbol) in commands.chars().enumerate() {
            run.step(
                index,
                self.op_for(symbol),
                self.config.step_length,
                self.config.turn_angle,
                sink,
            )?;
        }
        run.finish()
    }

    /// Interprets a derivation produced by the `symbios` engine.
    ///
    /// Module names are matched against this interpreter's symbol map through
    /// `interner` (single-character names only). The first module parameter,
    /// when present, overrides the step length of `Draw`/`Move` or the angle of
    /// a turn.
    pub fn interpret_state<S: DrawSink + ?Sized>(
        &self,
        state: &SymbiosState,
        interner: &SymbolTable,
        sink: &mut S,
    ) -> Result<TurtlePose, InterpretError> {
        let id_map = self.id_map(interner);
        let mut run = Run::new(self.config.initial_pose);

        for i in 0..state.len() {
            let view = match state.get_view(i) {
                Some(v) => v,
                None => break,
            };

            let op = id_map
                .get(view.sym as usize)
                .copied()
                .unwrap_or(TurtleOp::Ignore);

            let p0 = view.params.get(0).map(|&x| x as f32);
            let step = p0.unwrap_or(self.config.step_length);
            let angle = p0.unwrap_or(self.config.turn_angle);
            run.step(i, op, step, angle, sink)?;
        }
        run.finish()
    }

    /// Builds a symbol-ID-indexed operation table for `interner`.
    ///
    /// IDs that are not covered are treated as [`TurtleOp::Ignore`].
    fn id_map(&self, interner: &SymbolTable) -> Vec<TurtleOp> {
        let mut table = Vec::new();
        for (&symbol, &op) in &self.op_map {
            let name = symbol.to_string();
            if let Some(id) = interner.resolve_id(name.as_str()) {
                let idx = id as usize;
                if idx >= table.len() {
                    table.resize(idx + 1, TurtleOp::Ignore);
                }
                table[idx] = op;
            }
        }
        table
    }
}

/// Mutable state of one interpretation: the live pose and the pose stack.
struct Run {
    pose: TurtlePose,
    stack: Vec<TurtlePose>,
    emitted: usize,
}

impl Run {
    fn new(pose: TurtlePose) -> Self {
        Self {
            pose,
            stack: Vec::new(),
            emitted: 0,
        }
    }

    fn step<S: DrawSink + ?Sized>(
        &mut self,
        index: usize,
        op: TurtleOp,
        step: f32,
        angle: f32,
        sink: &mut S,
    ) -> Result<(), InterpretError> {
        let draw_op = match op {
            // --- SPATIAL ---
            TurtleOp::Draw => DrawOp::MoveForward {
                distance: step,
                drawing: true,
            },
            TurtleOp::Move => DrawOp::MoveForward {
                distance: step,
                drawing: false,
            },
            TurtleOp::TurnLeft => DrawOp::TurnLeft(angle),
            TurtleOp::TurnRight => DrawOp::TurnRight(angle),

            // --- FLOW ---
            TurtleOp::Push => {
                self.stack.push(self.pose);
                DrawOp::PushPose(self.pose)
            }
            TurtleOp::Pop => match self.stack.pop() {
                Some(saved) => DrawOp::PopPose(saved),
                None => {
                    debug!("pose stack underflow at symbol {index}");
                    return Err(InterpretError::UnbalancedBracket { index });
                }
            },
            TurtleOp::Ignore => return Ok(()),
        };

        let next = self.pose.apply(&draw_op);
        sink.draw(&draw_op, &self.pose, &next);
        self.pose = next;
        self.emitted += 1;
        Ok(())
    }

    fn finish(self) -> Result<TurtlePose, InterpretError> {
        if !self.stack.is_empty() {
            // Unclosed pushes are tolerated; only underflow is structural.
            debug!("interpretation ended with {} unclosed push(es)", self.stack.len());
        }
        debug!("interpreted {} draw ops", self.emitted);
        Ok(self.pose)
    }
}
