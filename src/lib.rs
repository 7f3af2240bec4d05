//! # symbios-turtle
//!
//! Generates and interprets Lindenmayer-system fractals in 2D.
//!
//! A [`grammar::LSystem`] expands an axiom by parallel rewriting into a command
//! string; a [`TurtleInterpreter`] walks that string as turtle-graphics
//! instructions and emits [`DrawOp`]s, or resolves them into a
//! [`PathBlueprint`] that any renderer (see [`render`]) can consume.
//!
//! ```rust,ignore
//! use symbios_turtle::*;
//!
//! let rules: ProductionRules = [('F', "FF-F")].into_iter().collect();
//! let commands = rewrite(3, "F-F-F-F", &rules);
//! let blueprint = TurtleInterpreter::standard(TurtleConfig::new(10.0, 90.0))
//!     .build_blueprint(&commands)?;
//! ```

pub mod blueprint;
pub mod error;
pub mod grammar;
pub mod interpreter;
pub mod params;
pub mod render;
pub mod turtle;

pub use blueprint::*;
pub use error::*;
pub use grammar::*;
pub use interpreter::*;
pub use params::*;
pub use turtle::*;
