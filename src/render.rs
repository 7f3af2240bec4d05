//! Vector export of a [`PathBlueprint`].
//!
//! Renderers write to any [`io::Write`] sink; deciding where the bytes end up
//! (file, stdout, buffer) is the caller's business.

use crate::blueprint::{Bounds, PathBlueprint, Segment};
use glam::Vec2;
use std::io::{self, Write};

/// Page layout shared by all renderers.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Blank border around the drawing, in drawing units.
    pub margin: f32,
    /// Line width, in drawing units.
    pub stroke_width: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            margin: 10.0,
            stroke_width: 1.0,
        }
    }
}

/// Something that can serialize a blueprint as an image document.
pub trait Renderer {
    /// Conventional file extension, without the dot.
    fn extension(&self) -> &'static str;

    fn render(&self, blueprint: &PathBlueprint, out: &mut dyn Write) -> io::Result<()>;
}

/// Groups consecutive segments that share endpoints into polylines.
fn polylines(segments: &[Segment]) -> Vec<Vec<Vec2>> {
    let mut lines: Vec<Vec<Vec2>> = Vec::new();
    for seg in segments {
        match lines.last_mut() {
            Some(line) if line.last() == Some(&seg.start) => line.push(seg.end),
            _ => lines.push(vec![seg.start, seg.end]),
        }
    }
    lines
}

/// Page size (width, height) once the margin is added on every side.
fn page_size(bounds: &Bounds, margin: f32) -> Vec2 {
    bounds.size() + Vec2::splat(2.0 * margin)
}

/// Scalable Vector Graphics output. The Y axis is flipped so that the
/// turtle's "up" is up on screen.
#[derive(Clone, Debug, Default)]
pub struct SvgRenderer {
    pub config: RenderConfig,
}

impl SvgRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    fn to_page(&self, bounds: &Bounds, p: Vec2) -> Vec2 {
        let margin = self.config.margin;
        Vec2::new(p.x - bounds.min.x + margin, bounds.max.y - p.y + margin)
    }
}

impl Renderer for SvgRenderer {
    fn extension(&self) -> &'static str {
        "svg"
    }

    fn render(&self, blueprint: &PathBlueprint, out: &mut dyn Write) -> io::Result<()> {
        let bounds = &blueprint.bounds;
        let size = page_size(bounds, self.config.margin);

        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.2}" height="{h:.2}" viewBox="0 0 {w:.2} {h:.2}">"#,
            w = size.x,
            h = size.y
        )?;
        write!(
            out,
            r#"<path fill="none" stroke="black" stroke-width="{}" stroke-linecap="round" d=""#,
            self.config.stroke_width
        )?;
        for line in polylines(&blueprint.segments) {
            for (i, point) in line.into_iter().enumerate() {
                let p = self.to_page(bounds, point);
                let cmd = if i == 0 { 'M' } else { 'L' };
                write!(out, "{cmd}{:.3} {:.3} ", p.x, p.y)?;
            }
        }
        writeln!(out, r#""/>"#)?;
        writeln!(out, "</svg>")
    }
}

/// Encapsulated PostScript output.
#[derive(Clone, Debug, Default)]
pub struct EpsRenderer {
    pub config: RenderConfig,
}

impl EpsRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    fn to_page(&self, bounds: &Bounds, p: Vec2) -> Vec2 {
        p - bounds.min + Vec2::splat(self.config.margin)
    }
}

impl Renderer for EpsRenderer {
    fn extension(&self) -> &'static str {
        "eps"
    }

    fn render(&self, blueprint: &PathBlueprint, out: &mut dyn Write) -> io::Result<()> {
        let bounds = &blueprint.bounds;
        let size = page_size(bounds, self.config.margin);

        writeln!(out, "%!PS-Adobe-3.0 EPSF-3.0")?;
        writeln!(
            out,
            "%%BoundingBox: 0 0 {} {}",
            size.x.ceil() as i64,
            size.y.ceil() as i64
        )?;
        writeln!(out, "%%Creator: symbios-turtle")?;
        writeln!(out, "%%EndComments")?;
        writeln!(out, "{} setlinewidth 1 setlinecap", self.config.stroke_width)?;
        writeln!(out, "newpath")?;
        for line in polylines(&blueprint.segments) {
            for (i, point) in line.into_iter().enumerate() {
                let p = self.to_page(bounds, point);
                let cmd = if i == 0 { "moveto" } else { "lineto" };
                writeln!(out, "{:.3} {:.3} {cmd}", p.x, p.y)?;
            }
        }
        writeln!(out, "stroke")?;
        writeln!(out, "showpage")?;
        writeln!(out, "%%EOF")
    }
}
