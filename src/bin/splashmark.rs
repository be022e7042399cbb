use std::{
    cell::Cell,
    io::Write as _,
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use splashmark::{
    BoundingBox, Classified, Fps, FrameIndex, Illustration as _, Rect, ShapeId, SplashConfig,
    SplashPlayer, StaticHost, SvgIllustration, Zone, build_timeline, classify_shapes,
    extract_shapes,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "splashmark", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print how the shapes of an SVG are filtered, zoned and ordered.
    Inspect(SourceArgs),
    /// Print the stage timeline built for an SVG.
    Plan(SourceArgs),
    /// Simulate a full run at a fixed frame rate and print its events.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// Input SVG.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Optional JSON config; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the SVG canvas size as the view box instead of the configured one.
    #[arg(long, default_value_t = false)]
    view_box_from_svg: bool,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Frames per second of the simulated host loop.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Illustration container rectangle as `x,y,w,h`.
    #[arg(long, value_parser = parse_rect, default_value = "0,0,633.33,588")]
    container: Rect,

    /// Dock target rectangle as `x,y,w,h`; omit to exercise the fallback fade.
    #[arg(long, value_parser = parse_rect)]
    target: Option<Rect>,

    /// Write one JSON frame per line to this path.
    #[arg(long)]
    frames_out: Option<PathBuf>,

    /// Cancel the run once this many seconds have elapsed.
    #[arg(long)]
    cancel_at: Option<f64>,
}

#[derive(serde::Serialize)]
struct InspectReport {
    view_box: splashmark::ViewBox,
    tagged: usize,
    measured: usize,
    kept: usize,
    zones: Vec<ZoneReport>,
}

#[derive(serde::Serialize)]
struct ZoneReport {
    zone: Zone,
    ink: Vec<ShapeReport>,
    negative_space: Vec<ShapeReport>,
}

#[derive(serde::Serialize)]
struct ShapeReport {
    id: ShapeId,
    label: String,
    bbox: BoundingBox,
    path_length: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn load_source(args: &SourceArgs) -> anyhow::Result<(SplashConfig, SvgIllustration)> {
    let mut config = match &args.config {
        Some(path) => SplashConfig::load(path)?,
        None => SplashConfig::default(),
    };
    let illustration = SvgIllustration::load(&args.in_path, &config.palette)?;
    if args.view_box_from_svg {
        config.rules.view_box = illustration.view_box()?;
        config.validate()?;
    }
    Ok((config, illustration))
}

fn classify(config: &SplashConfig, illustration: &SvgIllustration) -> Classified {
    classify_shapes(&extract_shapes(illustration), &config.rules)
}

fn cmd_inspect(args: SourceArgs) -> anyhow::Result<()> {
    let (config, illustration) = load_source(&args)?;
    let extracted = extract_shapes(&illustration);
    let classified = classify_shapes(&extracted, &config.rules);

    let report_shape = |s: &splashmark::ClassifiedShape| ShapeReport {
        id: s.id,
        label: illustration.label(s.id).unwrap_or_default().to_string(),
        bbox: s.bbox,
        path_length: s.path_length,
    };
    let report = InspectReport {
        view_box: config.rules.view_box,
        tagged: illustration.shapes().len(),
        measured: extracted.len(),
        kept: classified.shapes().count(),
        zones: classified
            .groups()
            .map(|g| ZoneReport {
                zone: g.zone,
                ink: g.ink.iter().map(report_shape).collect(),
                negative_space: g.negative_space.iter().map(report_shape).collect(),
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_plan(args: SourceArgs) -> anyhow::Result<()> {
    let (config, illustration) = load_source(&args)?;
    let timeline = build_timeline(&classify(&config, &illustration), &config.choreography);
    println!("{}", serde_json::to_string_pretty(&timeline)?);
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let (config, illustration) = load_source(&args.source)?;
    let fps = Fps::new(args.fps, 1)?;
    let host = match args.target {
        Some(target) => StaticHost::with_target(args.container, config.dock.target_id.clone(), target),
        None => StaticHost::without_target(args.container),
    };

    let completed = Rc::new(Cell::new(0u32));
    let flag = completed.clone();
    let mut player = SplashPlayer::mount(&illustration, config, host, move || {
        flag.set(flag.get() + 1)
    })?;

    let mut frames_out = match &args.frames_out {
        Some(path) => Some(create_writer(path)?),
        None => None,
    };

    let dock = &player.config().dock;
    let budget = player.timeline().end
        + dock.move_duration.max(dock.backdrop_delay + dock.backdrop_duration)
        + dock.fade_duration
        + dock.fallback_duration
        + 1.0;
    let max_frames = fps.secs_to_frames_ceil(budget);

    let mut stdout = std::io::stdout().lock();
    let mut clock = 0.0;
    for frame in (0..=max_frames).map(FrameIndex) {
        let now = fps.frames_to_secs(frame);
        let step = now - clock;
        clock = now;
        if let Some(at) = args.cancel_at
            && player.elapsed() + step >= at
        {
            player.cancel();
        }
        for event in player.advance(step) {
            let line = serde_json::json!({ "time": player.elapsed(), "event": event });
            writeln!(stdout, "{line}")?;
        }
        if let Some(out) = frames_out.as_mut() {
            serde_json::to_writer(&mut *out, &player.frame())?;
            writeln!(out)?;
        }
        if player.is_finished() || player.is_cancelled() {
            break;
        }
    }

    if let Some(mut out) = frames_out {
        out.flush()?;
    }
    eprintln!(
        "completion fired {} time(s) after {:.3}s",
        completed.get(),
        player.elapsed()
    );
    Ok(())
}

fn create_writer(path: &Path) -> anyhow::Result<std::io::BufWriter<std::fs::File>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("create frames file '{}'", path.display()))?;
    Ok(std::io::BufWriter::new(file))
}

fn parse_rect(s: &str) -> Result<Rect, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("expected x,y,w,h: {e}"))?;
    let [x, y, w, h] = parts[..] else {
        return Err(format!("expected 4 comma-separated numbers, got {}", parts.len()));
    };
    if !(w >= 0.0 && h >= 0.0) {
        return Err("width and height must be >= 0".to_string());
    }
    Ok(Rect::new(x, y, x + w, y + h))
}
