use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use labeldcm::image_io::FileImageSource;
use labeldcm::script::Script;
use labeldcm::{Config, Session};
use std::path::PathBuf;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("LABELDCM_GIT_HASH"), ")");

#[derive(Parser, Debug)]
#[command(name = "labeldcm")]
#[command(version = VERSION, about = "Point, line, angle and circle annotation for medical images")]
struct Cli {
    /// DICOM, JPEG or PNG image to annotate
    #[arg(value_name = "IMAGE")]
    image: PathBuf,

    /// TOML script of interaction steps to replay
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Write the annotated image (JPEG or PNG, by extension)
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Viewport size the script's coordinates refer to
    #[arg(long, value_name = "WxH", value_parser = parse_viewport)]
    viewport: Option<(u32, u32)>,

    /// Initial zoom in percent
    #[arg(long, value_name = "PCT")]
    zoom: Option<u32>,

    /// Print the image metadata block (DICOM only)
    #[arg(long, action = ArgAction::SetTrue)]
    info: bool,
}

fn parse_viewport(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<u32>()
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| format!("invalid dimension '{part}'"))
    };
    Ok((parse(width)?, parse(height)?))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::load().context("Failed to load configuration")?;

    let mut session = Session::new(config);
    session
        .load_image(&FileImageSource, &cli.image)
        .with_context(|| format!("Cannot open {}", cli.image.display()))?;

    if let Some(viewport) = cli.viewport {
        session.resize(viewport);
    }
    if let Some(zoom) = cli.zoom {
        session.set_zoom(zoom);
    }

    if let Some(path) = &cli.script {
        let script = Script::load(path)?;
        let report = script.run(&mut session);
        log::info!(
            "Replayed {} steps ({} skipped)",
            report.applied + report.skipped,
            report.skipped
        );
    }

    if cli.info {
        match session.metadata() {
            Some(metadata) => print!("{metadata}"),
            None => log::info!("{} carries no metadata", cli.image.display()),
        }
    }
    print!("{}", session.pivot_info());

    if let Some(output) = &cli.output {
        session
            .export(output)
            .with_context(|| format!("Failed to export {}", output.display()))?;
        log::info!("Exported {}", output.display());
    }

    Ok(())
}
