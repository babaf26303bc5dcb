use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "framewise", version)]
struct Cli {
    /// Log evaluation details to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a clip and print a summary.
    Check(SourceArgs),
    /// Print every channel value at one frame as JSON.
    Frame(FrameArgs),
    /// Evaluate a frame range and write the values as JSON.
    Frames(FramesArgs),
    /// Print a fingerprint of every frame of a clip.
    Digest(DigestArgs),
    /// Write a built-in clip definition as JSON.
    Preset(PresetArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Input clip JSON.
    #[arg(long = "in", conflicts_with = "preset")]
    in_path: Option<PathBuf>,

    /// Built-in preset name.
    #[arg(long)]
    preset: Option<String>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,
}

#[derive(Args, Debug)]
struct ThreadingArgs {
    /// Evaluate chunks on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Frames per parallel chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Worker threads (defaults to the number of CPUs).
    #[arg(long)]
    threads: Option<usize>,
}

impl ThreadingArgs {
    fn threading(&self, static_frame_detection: bool) -> framewise::EvalThreading {
        framewise::EvalThreading {
            parallel: self.parallel,
            chunk_size: self.chunk_size,
            threads: self.threads,
            static_frame_detection,
        }
    }
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    threading: ThreadingArgs,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last frame (exclusive). Defaults to the clip length.
    #[arg(long)]
    end: Option<u64>,

    /// Output JSON path. Prints to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DigestArgs {
    #[command(flatten)]
    source: SourceArgs,

    #[command(flatten)]
    threading: ThreadingArgs,

    /// Also print one fingerprint per frame.
    #[arg(long)]
    per_frame: bool,
}

#[derive(Args, Debug)]
struct PresetArgs {
    /// Preset name.
    #[arg(required_unless_present = "list")]
    name: Option<String>,

    /// List preset names.
    #[arg(long)]
    list: bool,

    /// Output JSON path. Prints to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Digest(args) => cmd_digest(args),
        Command::Preset(args) => cmd_preset(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn find_preset(name: &str) -> anyhow::Result<framewise::Preset> {
    framewise::Preset::from_name(name).with_context(|| {
        let known = framewise::Preset::ALL
            .iter()
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join(", ");
        format!("unknown preset '{name}' (known: {known})")
    })
}

fn load_clip(source: &SourceArgs) -> anyhow::Result<framewise::Clip> {
    match (&source.in_path, &source.preset) {
        (Some(path), _) => {
            let def = framewise::ClipDef::from_path(path)
                .with_context(|| format!("read clip '{}'", path.display()))?;
            framewise::Clip::new(def).with_context(|| format!("validate clip '{}'", path.display()))
        }
        (None, Some(name)) => Ok(find_preset(name)?.clip()?),
        (None, None) => anyhow::bail!("either --in or --preset is required"),
    }
}

fn write_output(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
            let mut w = BufWriter::new(f);
            w.write_all(text.as_bytes())
                .and_then(|()| w.write_all(b"\n"))
                .and_then(|()| w.flush())
                .with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn cmd_check(args: SourceArgs) -> anyhow::Result<()> {
    let clip = load_clip(&args)?;
    let tl = clip.timeline();
    println!(
        "ok: {} frames at {}/{} fps ({:.3}s)",
        tl.total_frames,
        tl.fps.num,
        tl.fps.den,
        tl.duration_secs()
    );
    for (name, stages) in &clip.def().stage_sets {
        let names = stages.iter().map(|s| s.name.as_str()).collect::<Vec<_>>();
        println!("stage set {name}: {}", names.join(" -> "));
    }
    for name in clip.channel_names() {
        println!("channel {name}");
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let clip = load_clip(&args.source)?;
    let values = framewise::Evaluator::eval_frame(&clip, framewise::FrameIndex(args.frame))?;
    let text = serde_json::to_string_pretty(&values).context("serialize frame values")?;
    println!("{text}");
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let clip = load_clip(&args.source)?;
    let end = args.end.unwrap_or(clip.timeline().total_frames);
    let range = framewise::FrameRange::new(
        framewise::FrameIndex(args.start),
        framewise::FrameIndex(end),
    )?;
    let (frames, stats) =
        framewise::eval_frames_with_stats(&clip, range, &args.threading.threading(true))?;
    let text = serde_json::to_string_pretty(&frames).context("serialize frame values")?;
    write_output(args.out.as_deref(), &text)?;
    eprintln!(
        "frames: {} total, {} unique, {} static",
        stats.frames_total, stats.frames_unique, stats.frames_static
    );
    Ok(())
}

fn cmd_digest(args: DigestArgs) -> anyhow::Result<()> {
    let clip = load_clip(&args.source)?;
    let (frames, stats) = framewise::eval_all(&clip, &args.threading.threading(true))?;
    if args.per_frame {
        for frame in &frames {
            let fp = framewise::fingerprint_values(frame);
            println!("{:>6} {fp}", frame.frame.0);
        }
    }
    println!("{}", framewise::fingerprint_sequence(&frames));
    eprintln!(
        "frames: {} total, {} unique, {} static",
        stats.frames_total, stats.frames_unique, stats.frames_static
    );
    Ok(())
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    if args.list {
        for preset in framewise::Preset::ALL {
            println!("{}", preset.name());
        }
        return Ok(());
    }
    let name = args.name.context("preset name is required")?;
    let def = find_preset(&name)?.def()?;
    write_output(args.out.as_deref(), &def.to_json_pretty()?)
}
