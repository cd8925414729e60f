use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use scrollreel::{Engine, EngineOpts, Environment, PageSpec, Point, Viewport};

#[derive(Parser, Debug)]
#[command(name = "scrollreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write one frame snapshot as JSON.
    Frame(FrameArgs),
    /// Sweep the scroll offset and write snapshots as JSON lines.
    Simulate(SimulateArgs),
    /// Print the current section and the advance target.
    Nav(NavArgs),
    /// Write the built-in studio page as JSON.
    Preset(PresetArgs),
}

#[derive(Args, Debug)]
struct PageArgs {
    /// Input page JSON. Defaults to the built-in studio page.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Viewport width.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height.
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Emulate a reduced-motion preference.
    #[arg(long, default_value_t = false)]
    reduced_motion: bool,

    /// Emulate a coarse (touch) pointer.
    #[arg(long, default_value_t = false)]
    coarse_pointer: bool,

    /// Emulate a device without hover.
    #[arg(long, default_value_t = false)]
    no_hover: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Scroll offset in pixels.
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,

    /// Pointer position as `x,y` in viewport pixels.
    #[arg(long, value_parser = parse_point)]
    pointer: Option<Point>,

    /// Run the clock until animations settle before capturing.
    #[arg(long, default_value_t = false)]
    settle: bool,

    /// Output path. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    page: PageArgs,

    /// First scroll offset.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Last scroll offset.
    #[arg(long)]
    to: f64,

    /// Scroll distance between frames.
    #[arg(long, default_value_t = 50.0)]
    step: f64,

    /// Seconds of engine time per frame.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Drop frames whose content matches the previous written frame.
    #[arg(long, default_value_t = false)]
    skip_static: bool,

    /// Output path. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct NavArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Scroll offset in pixels.
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,
}

#[derive(Parser, Debug)]
struct PresetArgs {
    /// Output path. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

const SETTLE_DT: f64 = 1.0 / 60.0;
const SETTLE_MAX_SECS: f64 = 10.0;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Nav(args) => cmd_nav(args),
        Command::Preset(args) => cmd_preset(args),
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected 'x,y', got '{s}'"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("bad coordinate '{v}': {e}"))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

fn build_engine(args: &PageArgs) -> anyhow::Result<Engine> {
    let page = match &args.in_path {
        Some(path) => PageSpec::from_path(path)?,
        None => scrollreel::presets::studio_page(),
    };
    let env = Environment {
        viewport: Viewport::new(args.width, args.height)?,
        reduced_motion: args.reduced_motion,
        fine_pointer: !args.coarse_pointer,
        hover: !args.no_hover,
    };
    tracing::debug!(?env, sections = page.sections.len(), "page loaded");
    Ok(Engine::new(page, env, EngineOpts::default())?)
}

fn write_output(out: Option<&Path>, contents: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, contents)
                .with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(contents.as_bytes())
                .context("write stdout")?;
        }
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut engine = build_engine(&args.page)?;
    engine.scroll(args.scroll)?;
    if let Some(p) = args.pointer {
        engine.pointer_move(p);
    }
    if args.settle {
        let mut elapsed = 0.0;
        // ambient loops never settle, so the wait is bounded
        while elapsed < SETTLE_MAX_SECS {
            engine.tick(SETTLE_DT)?;
            elapsed += SETTLE_DT;
            if !engine.is_animating() && !engine.snapshot().nav.is_scrolling {
                break;
            }
        }
    }
    let json = serde_json::to_string_pretty(&engine.snapshot()).context("serialize snapshot")?;
    write_output(args.out.as_deref(), &(json + "\n"))
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.step.is_finite() && args.step > 0.0,
        "--step must be a positive number"
    );
    let mut engine = build_engine(&args.page)?;
    let direction = if args.to >= args.from { 1.0 } else { -1.0 };
    let frames = ((args.to - args.from).abs() / args.step).floor() as u64 + 1;

    let mut lines = String::new();
    let mut last: Option<u64> = None;
    let mut skipped = 0u64;
    for i in 0..frames {
        engine.scroll(args.from + direction * args.step * i as f64)?;
        engine.tick(args.dt)?;
        let snap = engine.snapshot();
        let fp = snap.fingerprint();
        if args.skip_static && last == Some(fp) {
            skipped += 1;
            continue;
        }
        last = Some(fp);
        lines.push_str(&serde_json::to_string(&snap).context("serialize snapshot")?);
        lines.push('\n');
    }
    tracing::info!(frames, skipped, "simulation finished");
    write_output(args.out.as_deref(), &lines)
}

fn cmd_nav(args: NavArgs) -> anyhow::Result<()> {
    let mut engine = build_engine(&args.page)?;
    engine.scroll(args.scroll)?;
    let current = engine.snapshot().nav.current;
    let target = engine.advance();
    let report = serde_json::json!({
        "scroll_y": engine.scroll_y(),
        "current": current,
        "advance_target": target,
        "at_end": engine.snapshot().nav.at_end,
        "sections": engine.section_bounds(),
    });
    let json = serde_json::to_string_pretty(&report).context("serialize nav report")?;
    write_output(None, &(json + "\n"))
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    let page = scrollreel::presets::studio_page();
    let json = page.to_json_pretty()?;
    write_output(args.out.as_deref(), &(json + "\n"))
}
