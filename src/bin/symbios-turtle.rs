//! Command-line front end: parameter file in, vector image out.
//!
//! Usage:
//!   symbios-turtle <input> [--output <path>] [--format eps|svg|json]
//!                  [--max-symbols <n>] [--stroke-width <w>] [--margin <m>]

use clap::{Parser, ValueEnum};
use log::{error, info, warn};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use symbios_turtle::render::{EpsRenderer, RenderConfig, Renderer, SvgRenderer};
use symbios_turtle::{Error, LSystemParams, PathBlueprint, TurtleInterpreter, expanded_len};

#[derive(Debug, Parser)]
#[command(
    name = "symbios-turtle",
    version,
    about = "Expand an L-System and draw it with turtle graphics."
)]
struct Args {
    /// Parameter file: iterations, step, angle, axiom, then `X->...` rules.
    input: PathBuf,

    /// Output path. Defaults to the input path with the format's extension.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Eps)]
    format: Format,

    /// Refuse to expand past this many symbols.
    #[arg(long, default_value_t = 50_000_000)]
    max_symbols: u64,

    /// Line width in drawing units.
    #[arg(long, default_value_t = 1.0)]
    stroke_width: f32,

    /// Border around the drawing in drawing units.
    #[arg(long, default_value_t = 10.0)]
    margin: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Eps,
    Svg,
    /// The resolved path blueprint as JSON.
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Eps => "eps",
            Format::Svg => "svg",
            Format::Json => "json",
        }
    }
}

fn output_path(input: &Path, format: Format) -> PathBuf {
    input.with_extension(format.extension())
}

fn build(params: &LSystemParams, max_symbols: u64) -> Result<Option<PathBlueprint>, Error> {
    let predicted = expanded_len(params.iterations, &params.axiom, &params.rules);
    if predicted > max_symbols {
        warn!(
            "{} iterations would produce {predicted} symbols (limit {max_symbols}); aborting",
            params.iterations
        );
        return Ok(None);
    }

    let commands = params.lsystem().generate(params.iterations);
    info!(
        "expanded {} iterations into {} symbols",
        params.iterations,
        commands.chars().count()
    );

    let interpreter = TurtleInterpreter::standard(params.turtle_config());
    let blueprint = interpreter.build_blueprint(&commands)?;
    info!(
        "drew {} segments ({} pen-up moves)",
        blueprint.segments.len(),
        blueprint.moves.len()
    );
    Ok(Some(blueprint))
}

fn write_output(blueprint: &PathBlueprint, args: &Args, path: &Path) -> Result<(), Error> {
    let mut out = BufWriter::new(File::create(path)?);
    let config = RenderConfig {
        margin: args.margin,
        stroke_width: args.stroke_width,
    };
    match args.format {
        Format::Eps => EpsRenderer::new(config).render(blueprint, &mut out)?,
        Format::Svg => SvgRenderer::new(config).render(blueprint, &mut out)?,
        Format::Json => serde_json::to_writer_pretty(&mut out, blueprint)?,
    }
    out.flush()?;
    Ok(())
}

fn run(args: &Args) -> Result<bool, Error> {
    let params = LSystemParams::load(&args.input)?;
    let Some(blueprint) = build(&params, args.max_symbols)? else {
        return Ok(false);
    };

    let path = args
        .output
        .clone()
        .unwrap_or_else(|| output_path(&args.input, args.format));
    write_output(&blueprint, args, &path)?;
    info!("wrote {}", path.display());
    Ok(true)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
