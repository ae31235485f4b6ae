use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "morphloop", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Write the SVG document for a single frame.
    Svg(SvgArgs),
    /// Print the step timeline (time, index, label).
    Steps(StepsArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct SetArgs {
    /// Shape set JSON. Defaults to the built-in hero set.
    #[arg(long = "set")]
    set_path: Option<PathBuf>,

    /// Frames per second used to step the cycle.
    #[arg(long, default_value_t = 60)]
    fps: u32,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    set: SetArgs,

    /// Time in seconds since the cycle started.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Frame width/height in pixels.
    #[arg(long, default_value_t = 300)]
    size: u32,

    /// Leave the background transparent instead of the dark hero backdrop.
    #[arg(long)]
    transparent: bool,
}

#[derive(Parser, Debug)]
struct SvgArgs {
    #[command(flatten)]
    set: SetArgs,

    /// Time in seconds since the cycle started.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Output SVG path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Width/height attribute in pixels.
    #[arg(long)]
    size: Option<u32>,
}

#[derive(Parser, Debug)]
struct StepsArgs {
    #[command(flatten)]
    set: SetArgs,

    /// Number of full cycles to simulate.
    #[arg(long, default_value_t = 1)]
    cycles: u32,

    /// Emit JSON lines instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    set: SetArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Video length in seconds. Defaults to one full cycle.
    #[arg(long)]
    seconds: Option<f64>,

    /// Frame width/height in pixels (must be even).
    #[arg(long, default_value_t = 300)]
    size: u32,
}

const BACKDROP: [u8; 4] = [18, 20, 28, 255];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Svg(args) => cmd_svg(args),
        Command::Steps(args) => cmd_steps(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn load_document(path: Option<&Path>) -> anyhow::Result<morphloop::MorphDocument> {
    match path {
        Some(p) => morphloop::MorphDocument::load(p)
            .with_context(|| format!("load shape set '{}'", p.display())),
        None => Ok(morphloop::MorphDocument::hero()?),
    }
}

fn make_player(args: &SetArgs) -> anyhow::Result<morphloop::CyclePlayer> {
    let doc = load_document(args.set_path.as_deref())?;
    let fps = morphloop::Fps::new(args.fps, 1)?;
    Ok(morphloop::CyclePlayer::new(&doc, fps)?)
}

fn player_at(args: &SetArgs, time: f64) -> anyhow::Result<morphloop::CyclePlayer> {
    let mut player = make_player(args)?;
    let frame = player.frame_at_secs(time)?;
    player.seek(frame)?;
    Ok(player)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let player = player_at(&args.set, args.time)?;
    let settings = morphloop::RenderSettings {
        clear_rgba: (!args.transparent).then_some(BACKDROP),
    };
    let mut renderer = morphloop::CpuRenderer::new(args.size, settings)?;
    let frame = renderer.render(&player.visual())?;

    morphloop::ensure_parent_dir(&args.out)?;
    let data = unpremultiply(&frame.data);
    image::save_buffer_with_format(
        &args.out,
        &data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    tracing::info!(label = player.current_label(), "wrote {}", args.out.display());
    Ok(())
}

fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    let player = player_at(&args.set, args.time)?;
    let svg = morphloop::render_svg(&player.visual(), args.size);
    match args.out {
        Some(out) => {
            morphloop::ensure_parent_dir(&out)?;
            std::fs::write(&out, svg).with_context(|| format!("write svg '{}'", out.display()))?;
            tracing::info!("wrote {}", out.display());
        }
        None => print!("{svg}"),
    }
    Ok(())
}

fn cmd_steps(args: StepsArgs) -> anyhow::Result<()> {
    let mut player = make_player(&args.set)?;
    let total = player.frames_per_cycle() * u64::from(args.cycles);
    let steps = player.seek(morphloop::FrameIndex(total))?;

    for step in &steps {
        if args.json {
            println!("{}", serde_json::to_string(step)?);
        } else {
            println!(
                "{:>9.3}s  #{:<3} {}",
                step.time_secs, step.index, step.label
            );
        }
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut player = make_player(&args.set)?;
    let count = match args.seconds {
        Some(seconds) => player.frame_at_secs(seconds)?.0.max(1),
        None => player.frames_per_cycle(),
    };

    let settings = morphloop::RenderSettings {
        clear_rgba: Some(BACKDROP),
    };
    let mut renderer = morphloop::CpuRenderer::new(args.size, settings)?;
    let mut cfg = morphloop::EncodeConfig::new(&args.out, args.size, player.fps());
    cfg.bg_rgba = BACKDROP;

    let steps = morphloop::render_to_mp4(&mut player, count, &mut renderer, cfg)?;
    tracing::info!(frames = count, steps = steps.len(), "wrote {}", args.out.display());
    Ok(())
}

/// PNG wants straight alpha; renderer output is premultiplied.
fn unpremultiply(premul: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(premul.len());
    for px in premul.chunks_exact(4) {
        let a = px[3];
        if a == 0 {
            out.extend_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        let un = |c: u8| -> u8 { ((u16::from(c) * 255 + u16::from(a) / 2) / u16::from(a)).min(255) as u8 };
        out.extend_from_slice(&[un(px[0]), un(px[1]), un(px[2]), a]);
    }
    out
}
