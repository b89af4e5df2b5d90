use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use constraint_layout::Size;

#[derive(Parser, Debug)]
#[command(name = "constraint-layout", version)]
struct Cli {
    /// Log every resolved attribute to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a constraint program and print the frame table as JSON.
    Resolve(ResolveArgs),
    /// Resolve a constraint program and only report whether it is valid.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Input constraint program JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pretty-print the output JSON.
    #[arg(long)]
    pretty: bool,

    /// Space offered to the container as `WIDTHxHEIGHT`, overriding the program's `max`.
    #[arg(long, value_parser = parse_size)]
    max: Option<Size>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input constraint program JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Resolve(args) => cmd_resolve(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::TRACE
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|e| format!("width '{w}': {e}"))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("height '{h}': {e}"))?;
    Ok(Size::new(w, h))
}

fn read_program_json(path: &Path) -> anyhow::Result<constraint_layout::LayoutProgram> {
    let f = File::open(path).with_context(|| format!("open program '{}'", path.display()))?;
    let r = BufReader::new(f);
    let program: constraint_layout::LayoutProgram =
        serde_json::from_reader(r).with_context(|| "parse program JSON")?;
    Ok(program)
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let mut program = read_program_json(&args.in_path)?;
    if let Some(max) = args.max {
        program.max = Some(max);
    }
    let resolved = constraint_layout::resolve_program(&program)
        .with_context(|| format!("resolve '{}'", args.in_path.display()))?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&resolved)?
    } else {
        serde_json::to_string(&resolved)?
    };

    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, json)
                .with_context(|| format!("write frames '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let program = read_program_json(&args.in_path)?;
    let resolved = constraint_layout::resolve_program(&program)
        .with_context(|| format!("resolve '{}'", args.in_path.display()))?;
    eprintln!("ok: {} boxes", resolved.boxes.len());
    Ok(())
}
