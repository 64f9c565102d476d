use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context as _;
use celtic::{
    Animator, AnimatorConfig, AnimatorState, LatticeKind, RasterCanvas, RecordingCanvas, Viewport,
};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "celtic", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw complete patterns and write each one as a PNG.
    Render(RenderArgs),
    /// Build one pattern and print a JSON summary of its lattice and ribbons.
    Inspect(PatternArgs),
    /// Animate in real time, honoring tick delays, and snapshot each finished pattern.
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct PatternArgs {
    /// Canvas width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// RNG seed. Overrides the config file; defaults to the current time.
    #[arg(long)]
    seed: Option<u64>,

    /// Animator config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pin the lattice kind (radial, grid, triangular, clustered).
    #[arg(long)]
    kind: Option<LatticeKind>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    pattern: PatternArgs,

    /// Output PNG path. With more than one pattern, `-<i>` is appended to the file stem.
    #[arg(long)]
    out: PathBuf,

    /// Number of patterns to draw.
    #[arg(long, default_value_t = 1)]
    patterns: u32,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    pattern: PatternArgs,

    /// Directory receiving one PNG per finished pattern.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Number of patterns to animate before exiting.
    #[arg(long, default_value_t = 1)]
    patterns: u32,
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
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Run(args) => cmd_run(args),
    }
}

fn load_config(args: &PatternArgs) -> anyhow::Result<(AnimatorConfig, u64, Viewport)> {
    let mut cfg = match &args.config {
        Some(path) => AnimatorConfig::from_path(path)?,
        None => AnimatorConfig::default(),
    };
    if args.kind.is_some() {
        cfg.lattice = args.kind;
    }
    let seed = args.seed.or(cfg.seed).unwrap_or_else(seed_from_clock);
    let viewport = Viewport::new(args.width, args.height)?;
    Ok((cfg, seed, viewport))
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn numbered_path(base: &Path, index: u32, count: u32) -> PathBuf {
    if count <= 1 {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "knot".to_owned());
    let ext = base
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_owned());
    base.with_file_name(format!("{stem}-{index}.{ext}"))
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (cfg, seed, viewport) = load_config(&args.pattern)?;
    let background = cfg.background_color();
    let mut anim = Animator::with_seed(cfg, seed)?;
    let mut canvas = RasterCanvas::new(viewport, background)?;

    for i in 0..args.patterns {
        anim.finish_pattern(&mut canvas)?;
        let out = numbered_path(&args.out, i, args.patterns);
        ensure_parent(&out)?;
        canvas.save_png(&out)?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

#[derive(serde::Serialize)]
struct PatternSummary {
    seed: u64,
    width: u32,
    height: u32,
    params: celtic::PatternParams,
    nodes: usize,
    edges: usize,
    loop_lengths: Vec<usize>,
    discarded_loops: usize,
    spline_segments: Vec<usize>,
    spline_colors: Vec<usize>,
}

fn cmd_inspect(args: PatternArgs) -> anyhow::Result<()> {
    let (cfg, seed, viewport) = load_config(&args)?;
    let mut anim = Animator::with_seed(cfg, seed)?;
    let mut canvas = RecordingCanvas::new(viewport);
    anim.tick(&mut canvas)?;

    let (Some(pattern), Some(params)) = (anim.pattern(), anim.params()) else {
        anyhow::bail!("animator did not build a pattern");
    };
    let summary = PatternSummary {
        seed,
        width: viewport.width,
        height: viewport.height,
        params: *params,
        nodes: pattern.graph().node_count(),
        edges: pattern.graph().edge_count(),
        loop_lengths: pattern.loops().iter().map(|l| l.len()).collect(),
        discarded_loops: pattern.discarded_loops().len(),
        spline_segments: pattern.splines().iter().map(|s| s.segments().len()).collect(),
        spline_colors: pattern.splines().iter().map(|s| s.color()).collect(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let (cfg, seed, viewport) = load_config(&args.pattern)?;
    let background = cfg.background_color();
    let mut anim = Animator::with_seed(cfg, seed)?;
    let mut canvas = RasterCanvas::new(viewport, background)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    while anim.patterns_completed() < u64::from(args.patterns) {
        let settling = anim.state() == AnimatorState::Settling;
        let delay = anim.tick(&mut canvas)?;
        if settling {
            let out = args
                .out_dir
                .join(format!("knot-{}.png", anim.patterns_completed()));
            canvas.save_png(&out)?;
            eprintln!(
                "wrote {} ({} strokes)",
                out.display(),
                canvas.stroke_count()
            );
            if anim.patterns_completed() >= u64::from(args.patterns) {
                break;
            }
        }
        std::thread::sleep(delay);
    }
    Ok(())
}
