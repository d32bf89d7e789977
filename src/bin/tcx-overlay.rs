use std::{
    fs::File,
    io::{BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use tcx_overlay::{
    CpuTextRenderer, FrameRate, OverlayConfig, PngDirSink, SampleSequence, SpeedUnit, Synthesizer,
};

#[derive(Parser, Debug)]
#[command(
    name = "tcx-overlay",
    version,
    about = "Render speed and heart-rate overlay frames from a TCX activity"
)]
struct Cli {
    /// Input activity document (TCX). Prompted for with --interactive.
    #[arg(long = "in", required_unless_present = "interactive")]
    in_path: Option<PathBuf>,

    /// TrueType font used to draw the overlays (a bold sans-serif works best).
    #[arg(long)]
    font: PathBuf,

    /// JSON config file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Speed display unit.
    #[arg(long, value_enum)]
    unit: Option<UnitChoice>,

    /// Speed frames per second of activity time (0 for no frames).
    #[arg(long, value_parser = frame_rate_arg)]
    speed_fps: Option<FrameRate>,

    /// Heart-rate frames per second of activity time (0 for no frames).
    #[arg(long, value_parser = frame_rate_arg)]
    hr_fps: Option<FrameRate>,

    /// Font size in pixels.
    #[arg(long, value_parser = font_size_arg)]
    font_size: Option<u32>,

    /// Directory that receives `speed/` and `heart_rate/`.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Ask for the document and every setting on stdin.
    #[arg(long)]
    interactive: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum UnitChoice {
    Kmh,
    MinKm,
    Ms,
    Mph,
}

impl From<UnitChoice> for SpeedUnit {
    fn from(choice: UnitChoice) -> Self {
        match choice {
            UnitChoice::Kmh => SpeedUnit::KmH,
            UnitChoice::MinKm => SpeedUnit::MinKm,
            UnitChoice::Ms => SpeedUnit::Ms,
            UnitChoice::Mph => SpeedUnit::Mph,
        }
    }
}

// Flags have no "empty means default" form; an omitted flag already means that.
fn frame_rate_arg(s: &str) -> Result<FrameRate, String> {
    if s.trim().is_empty() {
        return Err("expected a non-negative integer".to_string());
    }
    tcx_overlay::parse_frame_rate(s, FrameRate(0)).map_err(|e| e.to_string())
}

fn font_size_arg(s: &str) -> Result<u32, String> {
    if s.trim().is_empty() {
        return Err("expected a positive integer".to_string());
    }
    tcx_overlay::parse_font_size(s, 0).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => read_config_json(path)?,
        None => OverlayConfig::default(),
    };
    apply_flags(&mut config, &cli);

    let samples = if cli.interactive {
        let mut input = std::io::stdin().lock();
        let samples = prompt_document(&mut input, cli.in_path.as_deref())?;
        prompt_settings(&mut input, &mut config)?;
        samples
    } else {
        let path = cli
            .in_path
            .as_deref()
            .context("--in is required without --interactive")?;
        tcx_overlay::read_tcx_file(path)
            .with_context(|| format!("parse activity '{}'", path.display()))?
    };
    config.validate()?;

    let mut renderer = CpuTextRenderer::from_file(&cli.font, config.font_size)?;
    let mut sink = PngDirSink::new(&cli.out_dir);
    let synth = Synthesizer::new(config)?;

    eprint!("Generating images, 0 % done");
    let stats = synth.run(&samples, &mut renderer, &mut sink, |percent| {
        eprint!("\rGenerating images, {percent} % done");
    })?;
    eprintln!();

    eprintln!(
        "wrote {} speed frames to {} and {} heart-rate frames to {}",
        stats.speed_frames,
        sink.stream_dir(tcx_overlay::StreamKind::Speed).display(),
        stats.heart_rate_frames,
        sink.stream_dir(tcx_overlay::StreamKind::HeartRate).display(),
    );
    Ok(())
}

fn read_config_json(path: &Path) -> anyhow::Result<OverlayConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let cfg = OverlayConfig::from_reader(BufReader::new(f))
        .with_context(|| format!("parse config '{}'", path.display()))?;
    Ok(cfg)
}

fn apply_flags(config: &mut OverlayConfig, cli: &Cli) {
    if let Some(unit) = cli.unit {
        config.speed_unit = unit.into();
    }
    if let Some(rate) = cli.speed_fps {
        config.speed_rate = rate;
    }
    if let Some(rate) = cli.hr_fps {
        config.heart_rate_rate = rate;
    }
    if let Some(size) = cli.font_size {
        config.font_size = size;
    }
}

/// Read one answer, re-asking until `parse` accepts it.
fn prompt<T>(
    input: &mut impl BufRead,
    question: &str,
    mut parse: impl FnMut(&str) -> tcx_overlay::OverlayResult<T>,
) -> anyhow::Result<T> {
    let mut line = String::new();
    loop {
        print!("{question}");
        std::io::stdout().flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("stdin closed while waiting for an answer");
        }
        match parse(&line) {
            Ok(v) => return Ok(v),
            Err(e) => {
                tracing::debug!(error = %e, "rejected answer");
                println!("Invalid value: {e}");
            }
        }
    }
}

fn prompt_document(
    input: &mut impl BufRead,
    preset: Option<&Path>,
) -> anyhow::Result<SampleSequence> {
    if let Some(path) = preset {
        return tcx_overlay::read_tcx_file(path)
            .with_context(|| format!("parse activity '{}'", path.display()));
    }
    prompt(input, "Path of the TCX file: ", |answer| {
        tcx_overlay::read_tcx_file(answer.trim())
    })
}

fn prompt_settings(input: &mut impl BufRead, config: &mut OverlayConfig) -> anyhow::Result<()> {
    let menu = SpeedUnit::ALL
        .iter()
        .map(|u| format!("{} = {}", u.menu_digit(), u.label()))
        .collect::<Vec<_>>()
        .join(", ");
    let unit_default = config.speed_unit;
    config.speed_unit = prompt(
        input,
        &format!("Choose speed unit ({menu}, default is {unit_default}): "),
        |answer| tcx_overlay::parse_speed_unit(answer, unit_default),
    )?;

    let speed_default = config.speed_rate;
    config.speed_rate = prompt(
        input,
        &format!(
            "Choose speed frame rate (0 for no frames, default: {}): ",
            speed_default.0
        ),
        |answer| tcx_overlay::parse_frame_rate(answer, speed_default),
    )?;

    let hr_default = config.heart_rate_rate;
    config.heart_rate_rate = prompt(
        input,
        &format!(
            "Choose heart rate frame rate (0 for no frames, default: {}): ",
            hr_default.0
        ),
        |answer| tcx_overlay::parse_frame_rate(answer, hr_default),
    )?;

    let size_default = config.font_size;
    config.font_size = prompt(
        input,
        &format!("Choose font size (default: {size_default}): "),
        |answer| tcx_overlay::parse_font_size(answer, size_default),
    )?;
    Ok(())
}
