use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "shimmer", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a shimmer for the document's current selection.
    Generate(GenerateArgs),
    /// Print the selection status event as JSON.
    Status(StatusArgs),
    /// Print sampled gradient positions over one loop.
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output document JSON. Defaults to overwriting the input.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Optional generator config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Placement mode (overrides the config file).
    #[arg(long, value_enum)]
    mode: Option<ModeChoice>,

    /// Target page name (overrides the config file).
    #[arg(long)]
    page_name: Option<String>,

    /// Escalate light text to a bolder style of the same family.
    #[arg(long)]
    auto_bold: bool,

    /// Replace the source text with an instance of the Start variant.
    #[arg(long)]
    replace: bool,
}

#[derive(Parser, Debug)]
struct StatusArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Placement mode used to judge the selection.
    #[arg(long, value_enum, default_value_t = ModeChoice::Page)]
    mode: ModeChoice,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Glyph box width in document units.
    #[arg(long, default_value_t = 200.0)]
    width: f64,

    /// Sampling step in milliseconds.
    #[arg(long, default_value_t = 100)]
    step_ms: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Legacy,
    Page,
}

impl From<ModeChoice> for shimmer::PlacementMode {
    fn from(choice: ModeChoice) -> Self {
        match choice {
            ModeChoice::Legacy => Self::Legacy,
            ModeChoice::Page => Self::Page,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Status(args) => cmd_status(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn read_doc_json(path: &Path) -> anyhow::Result<shimmer::Document> {
    let f = File::open(path).with_context(|| format!("open document '{}'", path.display()))?;
    let doc: shimmer::Document =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse document JSON")?;
    doc.validate()?;
    Ok(doc)
}

fn read_config(path: Option<&Path>) -> anyhow::Result<shimmer::ShimmerConfig> {
    let Some(path) = path else {
        return Ok(shimmer::ShimmerConfig::default());
    };
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let cfg = serde_json::from_reader(BufReader::new(f)).with_context(|| "parse config JSON")?;
    Ok(cfg)
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut doc = read_doc_json(&args.in_path)?;
    let mut cfg = read_config(args.config.as_deref())?;
    if let Some(mode) = args.mode {
        cfg.mode = mode.into();
    }
    if let Some(name) = args.page_name {
        cfg.target_page_name = name;
    }
    cfg.validate()?;

    let request = shimmer::CreateShimmerRequest {
        auto_font_weight: args.auto_bold,
        replace_text: args.replace,
    };
    let outcome = pollster::block_on(shimmer::handle_create_shimmer(&mut doc, request, &cfg));
    for note in doc.notifications() {
        let level = if note.is_error { "error" } else { "info" };
        eprintln!("{level}: {}", note.message);
    }

    let out_path = args.out.as_deref().unwrap_or(&args.in_path);
    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(out_path)
        .with_context(|| format!("create document '{}'", out_path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(f), &doc)
        .with_context(|| format!("write document '{}'", out_path.display()))?;

    match outcome {
        shimmer::RunOutcome::Created(outputs) => {
            eprintln!("wrote {} ({} shimmer(s))", out_path.display(), outputs.len());
            Ok(())
        }
        shimmer::RunOutcome::Rejected(rejection) => {
            anyhow::bail!("selection rejected: {}", rejection.message())
        }
        shimmer::RunOutcome::Failed(err) => anyhow::bail!("shimmer generation failed: {err}"),
    }
}

fn cmd_status(args: StatusArgs) -> anyhow::Result<()> {
    let doc = read_doc_json(&args.in_path)?;
    let status = shimmer::selection_status(&doc, args.mode.into());
    println!("{}", serde_json::to_string(&status)?);
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.step_ms > 0, "--step-ms must be > 0");
    let lp = shimmer::ShimmerLoop::new(shimmer::shimmer_rules(), args.width)?;
    println!("t_ms\tstate\tgradient_x");
    let mut t = 0;
    while t <= lp.period_ms() {
        let s = lp.sample(t as f64);
        println!("{t}\t{:?}\t{:.2}", s.state, s.gradient_x);
        t += args.step_ms;
    }
    Ok(())
}
