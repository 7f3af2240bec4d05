//! Line-oriented L-System parameter files.
//!
//! ```text
//! 4           <- iterations
//! 10          <- step length
//! 90          <- turn angle (degrees)
//! F-F-F-F     <- axiom
//! F->FF-F     <- zero or more rules
//! ```

use crate::error::ConfigError;
use crate::grammar::{LSystem, ProductionRules};
use crate::interpreter::TurtleConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything needed to generate and draw one L-System.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LSystemParams {
    pub iterations: usize,
    pub step_length: f32,
    pub turn_angle: f32,
    pub axiom: String,
    pub rules: ProductionRules,
}

impl LSystemParams {
    /// Reads and parses a parameter file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Self::from_lines(text.lines())
    }

    /// Parses parameter lines; line numbers in errors are 1-based.
    pub fn from_lines<'a, I>(lines: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let lines: Vec<&str> = lines
            .into_iter()
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .collect();

        let raw = field(&lines, 0, "iterations")?.trim();
        let iterations = raw.parse::<usize>().map_err(|_| ConfigError::InvalidInteger {
            field: "iterations",
            line: 1,
            value: raw.to_string(),
        })?;

        let step_length = parse_number(field(&lines, 1, "step_length")?, "step_length", 2)?;
        let turn_angle = parse_number(field(&lines, 2, "turn_angle")?, "turn_angle", 3)?;
        let axiom = field(&lines, 3, "axiom")?.to_string();

        let rule_lines = lines.get(4..).unwrap_or_default();
        let rules = ProductionRules::from_lines(rule_lines.iter().copied(), 5)?;

        Ok(Self {
            iterations,
            step_length,
            turn_angle,
            axiom,
            rules,
        })
    }

    pub fn lsystem(&self) -> LSystem {
        LSystem::new(self.axiom.clone(), self.rules.clone())
    }

    pub fn turtle_config(&self) -> TurtleConfig {
        TurtleConfig::new(self.step_length, self.turn_angle)
    }
}

fn field<'a>(lines: &[&'a str], idx: usize, name: &'static str) -> Result<&'a str, ConfigError> {
    lines.get(idx).copied().ok_or(ConfigError::MissingField {
        field: name,
        line: idx + 1,
    })
}

fn parse_number(raw: &str, field: &'static str, line: usize) -> Result<f32, ConfigError> {
    let raw = raw.trim();
    raw.parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::InvalidNumber {
            field,
            line,
            value: raw.to_string(),
        })
}
