use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use w3d::printer::TreeDump;
use w3d::{
    load_model, parse_model, registry, save_model, ChunkTree, LoadedModel, ReadOptions,
    UnknownChunkPolicy,
};

#[derive(Parser)]
#[command(name = "w3d", version, about = "Inspect, validate and rewrite W3D model files")]
struct Cli {
    #[command(flatten)]
    read: ReadArgs,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

/// Read options. Flags given here override the `--config` file.
#[derive(Args)]
struct ReadArgs {
    /// JSON file with read options.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// What to do with chunks that have no registry entry: "preserve" or "discard".
    #[arg(long, global = true)]
    unknown_chunks: Option<UnknownChunkPolicy>,

    /// Deepest container nesting accepted.
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Fail on chunk size mismatches instead of warning.
    #[arg(long, global = true)]
    strict: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the chunk tree of a model file.
    Dump {
        file: PathBuf,
        /// Also print decoded struct fields.
        #[arg(long)]
        fields: bool,
    },
    /// Verify that a model file survives a parse/serialize round trip unchanged.
    Check { file: PathBuf },
    /// Parse a model file and write it back out through the engine.
    Rewrite { input: PathBuf, output: PathBuf },
    /// List the registered chunk types.
    Chunks,
}

impl ReadArgs {
    fn options(&self) -> Result<ReadOptions> {
        let mut options = match &self.config {
            Some(path) => ReadOptions::from_json(path)
                .with_context(|| format!("failed to load options from {}", path.display()))?,
            None => ReadOptions::default(),
        };
        if let Some(policy) = self.unknown_chunks {
            options.unknown_chunks = policy;
        }
        if let Some(depth) = self.max_depth {
            options.max_depth = depth;
        }
        if self.strict {
            options.strict_sizes = true;
        }
        Ok(options)
    }
}

fn init_logging(verbosity: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        let level = match verbosity {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn load(path: &Path, options: &ReadOptions) -> Result<LoadedModel> {
    load_model(path, options).with_context(|| format!("failed to load {}", path.display()))
}

fn cmd_dump(file: &Path, fields: bool, options: &ReadOptions) -> Result<()> {
    let model = load(file, options)?;
    print!("{}", TreeDump::new(&model.tree, registry()).verbose(fields));
    if !model.warnings.is_empty() {
        println!();
        println!("{} warning(s):", model.warnings.len());
        for warning in &model.warnings {
            println!("  {warning}");
        }
    }
    Ok(())
}

fn cmd_check(file: &Path, options: &ReadOptions) -> Result<()> {
    let original = fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let first = load(file, options)?;
    let rewritten = first
        .tree
        .to_bytes()
        .with_context(|| format!("failed to serialize {}", file.display()))?;
    let second = parse_model(&rewritten, options).context("failed to re-parse serialized output")?;

    let mut problems = Vec::new();
    for (depth, node) in second.tree.walk() {
        if node.declared_length as usize != node.body_len() {
            problems.push(format!(
                "{:indent$}{} {}: header says {} bytes, body is {}",
                "",
                registry().name_of(node.id),
                node.id,
                node.declared_length,
                node.body_len(),
                indent = depth * 2,
            ));
        }
    }
    if !second.tree.is_bit_identical(&first.tree) {
        problems.push("re-parsed tree differs from the first parse".to_string());
    }
    if let Some(offset) = first_difference(&original, &rewritten) {
        problems.push(format!(
            "output differs from input at offset {offset:#x} ({} vs {} bytes)",
            rewritten.len(),
            original.len()
        ));
    }

    for warning in &first.warnings {
        warn!("{warning}");
    }
    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("{problem}");
        }
        bail!("{} failed round-trip check", file.display());
    }
    info!(
        nodes = first.tree.node_count(),
        bytes = original.len(),
        warnings = first.warnings.len(),
        "round trip ok"
    );
    println!("{}: ok ({} chunks, {} bytes)", file.display(), first.tree.node_count(), original.len());
    Ok(())
}

fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    a.iter()
        .zip(b)
        .position(|(x, y)| x != y)
        .or_else(|| (a.len() != b.len()).then(|| a.len().min(b.len())))
}

fn cmd_rewrite(input: &Path, output: &Path, options: &ReadOptions) -> Result<()> {
    let model = load(input, options)?;
    report_dropped(&model.tree, options);
    save_model(&model.tree, output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    debug!(input = %input.display(), output = %output.display(), "rewrote model");
    Ok(())
}

fn report_dropped(tree: &ChunkTree, options: &ReadOptions) {
    if options.unknown_chunks != UnknownChunkPolicy::Discard {
        return;
    }
    let dropped = tree
        .walk()
        .filter(|(_, node)| registry().lookup(node.id).is_none() && !node.is_container())
        .count();
    if dropped > 0 {
        warn!(dropped, "unknown chunk bodies discarded; output is not byte-identical");
    }
}

fn cmd_chunks() -> Result<()> {
    for def in registry().entries() {
        println!("{} {:<44} {}", def.id, def.name, def.codec);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    let options = cli.read.options()?;
    match &cli.command {
        Command::Dump { file, fields } => cmd_dump(file, *fields, &options),
        Command::Check { file } => cmd_check(file, &options),
        Command::Rewrite { input, output } => cmd_rewrite(input, output, &options),
        Command::Chunks => cmd_chunks(),
    }
}
