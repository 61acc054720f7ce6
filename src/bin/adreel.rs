use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "adreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List built-in compositions.
    List,
    /// Evaluate a single frame and write its visual tree as JSON.
    Frame(FrameArgs),
    /// Evaluate a frame range and write one JSON line per frame.
    Frames(FramesArgs),
    /// Print the combined fingerprint of every frame.
    Digest(DigestArgs),
}

#[derive(Parser, Debug)]
struct CompArgs {
    /// Composition id.
    #[arg(long)]
    id: String,

    /// Props overrides as a JSON object.
    #[arg(long)]
    props: Option<String>,

    /// Asset root; runs the asset pre-flight before evaluating.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Print resolved font faces (family, weight, SHA-256 of font bytes). Requires `--assets`.
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    comp: CompArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ThreadingArgs {
    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per work item (parallel mode only).
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

impl ThreadingArgs {
    fn to_threading(&self) -> adreel::EvalThreading {
        adreel::EvalThreading {
            parallel: self.parallel,
            chunk_size: self.chunk_size,
            threads: self.threads,
        }
    }
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    comp: CompArgs,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// End frame (exclusive); defaults to the composition duration.
    #[arg(long)]
    end: Option<u64>,

    #[command(flatten)]
    threading: ThreadingArgs,

    /// Output JSON-lines path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct DigestArgs {
    /// Composition id.
    #[arg(long)]
    id: String,

    /// Props overrides as a JSON object.
    #[arg(long)]
    props: Option<String>,

    #[command(flatten)]
    threading: ThreadingArgs,
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
    let registry = adreel::builtin_registry().context("build composition registry")?;
    match cli.cmd {
        Command::List => cmd_list(&registry),
        Command::Frame(args) => cmd_frame(&registry, args),
        Command::Frames(args) => cmd_frames(&registry, args),
        Command::Digest(args) => cmd_digest(&registry, args),
    }
}

fn parse_props(raw: Option<&str>) -> anyhow::Result<Option<serde_json::Value>> {
    raw.map(|s| serde_json::from_str(s).with_context(|| "parse --props JSON"))
        .transpose()
}

/// Look up the composition and, when an asset root is given, run the pre-flight.
fn prepare<'r>(
    registry: &'r adreel::Registry,
    args: &CompArgs,
    props: Option<&serde_json::Value>,
) -> anyhow::Result<&'r adreel::Composition> {
    let comp = registry.get(&args.id)?;
    match &args.assets {
        Some(root) => {
            let resolver = adreel::FsAssetResolver::new(root);
            let prepared = adreel::Preflight::run(comp, &resolver, props)
                .with_context(|| format!("asset pre-flight for '{}'", comp.id()))?;
            if args.dump_fonts {
                dump_font_diagnostics(&prepared)?;
            }
        }
        None if args.dump_fonts => anyhow::bail!("--dump-fonts requires --assets"),
        None => {}
    }
    Ok(comp)
}

fn cmd_list(registry: &adreel::Registry) -> anyhow::Result<()> {
    for comp in registry.iter() {
        let c = comp.config();
        println!(
            "{}\t{}x{}\t{}/{} fps\t{} frames",
            comp.id(),
            c.width,
            c.height,
            c.fps.num,
            c.fps.den,
            c.duration.0
        );
    }
    Ok(())
}

fn cmd_frame(registry: &adreel::Registry, args: FrameArgs) -> anyhow::Result<()> {
    let props = parse_props(args.comp.props.as_deref())?;
    let comp = prepare(registry, &args.comp, props.as_ref())?;
    let frame = adreel::eval_frame(comp, adreel::FrameIndex(args.frame), props.as_ref())?;
    let json = serde_json::to_string_pretty(&frame).with_context(|| "serialize frame")?;

    match &args.out {
        Some(out) => {
            create_parent(out)?;
            std::fs::write(out, json + "\n")
                .with_context(|| format!("write frame '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_frames(registry: &adreel::Registry, args: FramesArgs) -> anyhow::Result<()> {
    let props = parse_props(args.comp.props.as_deref())?;
    let comp = prepare(registry, &args.comp, props.as_ref())?;
    let end = args.end.unwrap_or(comp.config().duration.0);
    let range = adreel::FrameRange::new(adreel::FrameIndex(args.start), adreel::FrameIndex(end))?;

    let eval = adreel::Evaluator::new(comp, props.as_ref())?;
    let frames = adreel::eval_frames(&eval, range, &args.threading.to_threading())?;

    create_parent(&args.out)?;
    let f = File::create(&args.out)
        .with_context(|| format!("create output '{}'", args.out.display()))?;
    let mut w = BufWriter::new(f);
    for frame in &frames {
        serde_json::to_writer(&mut w, frame).with_context(|| "serialize frame")?;
        w.write_all(b"\n")?;
    }
    w.flush()
        .with_context(|| format!("write frames '{}'", args.out.display()))?;

    eprintln!("wrote {} frames to {}", frames.len(), args.out.display());
    Ok(())
}

fn cmd_digest(registry: &adreel::Registry, args: DigestArgs) -> anyhow::Result<()> {
    let props = parse_props(args.props.as_deref())?;
    let comp = registry.get(&args.id)?;
    let eval = adreel::Evaluator::new(comp, props.as_ref())?;
    let frames = adreel::eval_frames(
        &eval,
        comp.config().frame_range(),
        &args.threading.to_threading(),
    )?;

    let mut hasher = sha2::Sha256::new();
    for frame in &frames {
        hasher.update(serde_json::to_vec(frame).with_context(|| "serialize frame")?);
        hasher.update(b"\n");
    }

    println!("frames:      {}", frames.len());
    println!("fingerprint: {:016x}", adreel::fingerprint_frames(&frames)?);
    println!("sha256:      {}", hex(&hasher.finalize()));
    Ok(())
}

fn dump_font_diagnostics(prepared: &adreel::PreparedAssets) -> anyhow::Result<()> {
    eprintln!("font diagnostics ({}):", prepared.comp_id());
    for font in prepared.fonts() {
        let bytes = std::fs::read(&font.path)
            .with_context(|| format!("read font '{}'", font.path.display()))?;
        eprintln!("  {} {}:", font.face.family, font.face.weight);
        eprintln!("    src:    {}", font.face.src);
        eprintln!("    path:   {}", font.path.display());
        eprintln!("    sha256: {}", sha256_hex(&bytes));
    }
    Ok(())
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    hex(&sha2::Sha256::digest(bytes))
}

fn hex(digest: &[u8]) -> String {
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
