use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "retime", version)]
struct Cli {
    /// Log verbosity (`-v` debug, `-vv` trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the instruction plan for a curve as JSON.
    Plan(PlanArgs),
    /// Retime a numbered image sequence and write the result.
    Deploy(DeployArgs),
    /// Play a retimed sequence headlessly, printing the source frame shown at each tick.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Retime config JSON. Without it, `--frames` is required.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame count (overrides the config).
    #[arg(long)]
    frames: Option<usize>,

    /// Curve preset (`linear`, `ease-in`, `ease-in-out`), overrides the config.
    #[arg(long)]
    curve: Option<String>,

    /// Include the angle profile in the output.
    #[arg(long, default_value_t = false)]
    profile: bool,
}

#[derive(Parser, Debug)]
struct DeployArgs {
    /// Retime config JSON with a `frames` section.
    #[arg(long)]
    config: PathBuf,

    /// Output directory for `{index}.png` files and `manifest.json`.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Retime config JSON with a `frames` section.
    #[arg(long)]
    config: PathBuf,

    /// Sleep `interval_ms` between ticks instead of running as fast as possible.
    #[arg(long, default_value_t = false)]
    realtime: bool,
}

#[derive(serde::Serialize)]
struct PlanOutput<'a> {
    curve: retime::CurveSpec,
    baseline_angle: f64,
    instructions: &'a [retime::Instruction],
    sample_indices: &'a [usize],
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<&'a [f64]>,
}

#[derive(serde::Serialize)]
struct ManifestSlot {
    index: usize,
    src_index: usize,
    delta: i32,
    overwritten: bool,
    file: String,
}

#[derive(serde::Serialize)]
struct Manifest {
    frame_count: usize,
    curve: retime::CurveSpec,
    fingerprint: String,
    terminated_early: bool,
    slots: Vec<ManifestSlot>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Deploy(args) => cmd_deploy(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => retime::RetimeConfig::from_path(path)?,
        None => {
            let frames = args
                .frames
                .context("either --config or --frames is required")?;
            retime::RetimeConfig::new(frames)
        }
    };
    if let Some(frames) = args.frames {
        cfg.frame_count = frames;
    }
    if let Some(name) = &args.curve {
        cfg.curve = retime::CurveSelection::Preset(retime::CurvePreset::parse(name)?);
    }

    let mut sess = retime::RetimeSession::from_config(&cfg)?;
    let spec = cfg.curve.spec();
    let (profile, plan) = sess.plan(spec)?;

    let out = PlanOutput {
        curve: spec,
        baseline_angle: plan.baseline_angle,
        instructions: &plan.instructions,
        sample_indices: &plan.sample_indices,
        profile: args.profile.then(|| profile.angles()),
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_deploy(args: DeployArgs) -> anyhow::Result<()> {
    let (cfg, src) = load_config_and_frames(&args.config)?;
    let mut dst = retime::identity_copies(&src);
    let mut sess = retime::RetimeSession::from_config(&cfg)?;
    let report = sess.deploy(cfg.curve.spec(), &src, &mut dst)?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let mut slots = Vec::with_capacity(dst.len());
    for f in &dst {
        let file = format!("{}.png", f.index());
        let path = args.out.join(&file);
        let bytes = retime::encode_png(f.image())?;
        std::fs::write(&path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
        slots.push(ManifestSlot {
            index: f.index(),
            src_index: f.src_index(),
            delta: f.delta(),
            overwritten: f.is_overwritten(),
            file,
        });
    }

    let manifest = Manifest {
        frame_count: dst.len(),
        curve: report.curve,
        fingerprint: format!("{:016x}", report.fingerprint),
        terminated_early: report.assign.terminated_early,
        slots,
    };
    let manifest_path = args.out.join("manifest.json");
    std::fs::write(&manifest_path, serde_json::to_vec_pretty(&manifest)?)
        .with_context(|| format!("write manifest '{}'", manifest_path.display()))?;

    eprintln!(
        "wrote {} frames to {} ({} copies)",
        dst.len(),
        args.out.display(),
        report.assign.copies
    );
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let (cfg, src) = load_config_and_frames(&args.config)?;
    let mut dst = retime::identity_copies(&src);
    let mut sess = retime::RetimeSession::from_config(&cfg)?;
    sess.deploy(cfg.curve.spec(), &src, &mut dst)?;

    let mut driver = retime::PlaybackDriver::new(
        dst.len(),
        std::time::Duration::from_millis(cfg.interval_ms),
    )?;
    driver.play();
    print_tick(&dst, driver.position());
    while let Some(pos) = driver.tick() {
        if args.realtime {
            std::thread::sleep(driver.interval());
        }
        print_tick(&dst, pos);
    }
    Ok(())
}

fn print_tick(frames: &[retime::Frame], pos: usize) {
    let f = &frames[pos];
    let mark = if f.is_overwritten() { "*" } else { "" };
    println!("{pos}\t{}{mark}\t{}", f.src_index(), f.delta());
}

fn load_config_and_frames(
    config_path: &Path,
) -> anyhow::Result<(retime::RetimeConfig, Vec<retime::Frame>)> {
    let cfg = retime::RetimeConfig::from_path(config_path)?;
    cfg.validate()?;
    let source = cfg
        .frames
        .as_ref()
        .with_context(|| format!("config '{}' has no frames section", config_path.display()))?;

    let config_dir = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."));
    let store = retime::DirImageStore::new(config_dir.join(&source.dir));
    let frames = retime::load_sequence(&store, &source.pattern, cfg.frame_count)?;
    Ok((cfg, frames))
}
