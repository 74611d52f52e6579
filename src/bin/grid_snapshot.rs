use gridplot::api::{PlotEngine, PlotEngineConfig};
use gridplot::core::{FormatMode, Viewport};
use gridplot::render::NullRenderer;
use std::fs;
use std::path::PathBuf;

const USAGE: &str = "usage: grid_snapshot [--config <path>] [--width <px>] [--height <px>] [--zoom-percent <0..1>] [--normalized] [--output <path>] <dataset.txt>...";

#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
    zoom_percent: Option<f64>,
    normalized: bool,
    output: Option<PathBuf>,
    inputs: Vec<PathBuf>,
}

fn main() {
    let _ = gridplot::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            PlotEngineConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => PlotEngineConfig::new(Viewport::new(400, 300)),
    };
    if let Some(width) = args.width {
        config.viewport.width = width;
    }
    if let Some(height) = args.height {
        config.viewport.height = height;
    }
    if args.normalized {
        config.format = FormatMode::Normalized;
    }

    let mut engine =
        PlotEngine::new(NullRenderer::default(), config).map_err(|err| err.to_string())?;
    if let Some(percent) = args.zoom_percent {
        engine
            .set_zoom_percent(percent)
            .map_err(|err| err.to_string())?;
    }
    for input in &args.inputs {
        engine
            .ingest_file(input)
            .map_err(|err| format!("failed to ingest `{}`: {err}", input.display()))?;
    }
    engine.tick().map_err(|err| err.to_string())?;

    let json = engine.snapshot_json_pretty().map_err(|err| err.to_string())?;
    match &args.output {
        Some(path) => fs::write(path, json)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut parsed = CliArgs::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => parsed.config = Some(PathBuf::from(next_value(&mut args, "--config")?)),
            "--output" => parsed.output = Some(PathBuf::from(next_value(&mut args, "--output")?)),
            "--width" => parsed.width = Some(parse_value(&mut args, "--width")?),
            "--height" => parsed.height = Some(parse_value(&mut args, "--height")?),
            "--zoom-percent" => {
                parsed.zoom_percent = Some(parse_value(&mut args, "--zoom-percent")?);
            }
            "--normalized" => parsed.normalized = true,
            "-h" | "--help" => return Err(USAGE.to_owned()),
            flag if flag.starts_with("--") => {
                return Err(format!("unknown flag `{flag}`\n{USAGE}"));
            }
            _ => parsed.inputs.push(PathBuf::from(&arg)),
        }
    }

    Ok(parsed)
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next()
        .ok_or_else(|| format!("missing value for {flag}"))
}

fn parse_value<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<T, String> {
    let raw = next_value(args, flag)?;
    raw.parse()
        .map_err(|_| format!("invalid value `{raw}` for {flag}"))
}
