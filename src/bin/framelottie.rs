use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "framelottie",
    version,
    about = "Convert image sequences or a video into a Lottie animation"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert images, folders of images, or a single video into a Lottie JSON document.
    Convert(ConvertArgs),
    /// Validate a produced document and print a short summary.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Image files, folders of images, or one video file.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output JSON path.
    #[arg(long, short, default_value = "animation.json")]
    out: PathBuf,

    /// Output frame rate. Unparseable values fall back to 30.
    #[arg(long)]
    fps: Option<String>,

    /// Target resolution as `WxH`, `W,H` or `original`.
    #[arg(long, conflicts_with_all = ["width", "height"])]
    resolution: Option<String>,

    /// Target width in pixels (0 keeps the first frame's size).
    #[arg(long, requires = "height")]
    width: Option<i64>,

    /// Target height in pixels (0 keeps the first frame's size).
    #[arg(long, requires = "width")]
    height: Option<i64>,

    /// Document name stored in the output.
    #[arg(long)]
    name: Option<String>,

    /// JSON file with conversion settings; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Encode frames on a worker pool.
    #[arg(long)]
    parallel: bool,

    /// Worker count for `--parallel` (defaults to the number of CPUs).
    #[arg(long, requires = "parallel")]
    threads: Option<usize>,

    /// Frames scheduled per parallel chunk.
    #[arg(long, default_value_t = 16)]
    chunk_size: usize,

    /// Directory for temporary video frames (defaults to the system temp directory).
    #[arg(long)]
    scratch_dir: Option<PathBuf>,

    /// Fail instead of replacing an existing output file.
    #[arg(long)]
    no_overwrite: bool,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Lottie JSON document to check.
    file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("framelottie={level}")));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if let Err(e) = installed {
        eprintln!("logging disabled: {e}");
    }
}

fn read_config_json(path: &Path) -> anyhow::Result<framelottie::ConvertConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let r = BufReader::new(f);
    let cfg = serde_json::from_reader(r).with_context(|| "parse config JSON")?;
    Ok(cfg)
}

fn build_config(args: &ConvertArgs) -> anyhow::Result<framelottie::ConvertConfig> {
    let mut cfg = match &args.config {
        Some(path) => read_config_json(path)?,
        None => framelottie::ConvertConfig::default(),
    };
    if let Some(fps) = &args.fps {
        cfg.frame_rate = framelottie::parse_frame_rate_lenient(fps);
    }
    if let Some(res) = &args.resolution {
        let (w, h) = framelottie::parse_resolution(res)?;
        cfg = cfg.with_resolution(w, h);
    }
    if let (Some(w), Some(h)) = (args.width, args.height) {
        cfg = cfg.with_resolution(w, h);
    }
    if let Some(name) = &args.name {
        cfg = cfg.with_document_name(name.as_str());
    }
    Ok(cfg)
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let config = build_config(&args)?;
    let inputs = framelottie::discover(&args.inputs)?;

    let threading = framelottie::Threading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };
    let mut converter = framelottie::Converter::new().with_threading(threading);
    if let Some(dir) = &args.scratch_dir {
        converter = converter.with_scratch_dir(dir);
    }

    let progress = |fraction: f64| {
        tracing::debug!(percent = (fraction * 100.0).round(), "progress");
    };
    let control = framelottie::RunControl::new().with_progress(&progress);

    let output = converter.run(inputs, &config, &control)?;
    framelottie::write_file(&output.document, &args.out, !args.no_overwrite)?;

    eprintln!(
        "wrote {} ({} frames, {}, {} fps)",
        args.out.display(),
        output.frame_count,
        output.canvas,
        output.document.frame_rate
    );
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let doc = framelottie::read_file(&args.file)?;
    doc.validate()?;

    println!("version:  {}", doc.version);
    println!("name:     {}", doc.name.as_deref().unwrap_or("-"));
    println!("canvas:   {}x{}", doc.width, doc.height);
    println!("fps:      {}", doc.frame_rate);
    println!("frames:   {}", doc.frame_count());
    Ok(())
}
