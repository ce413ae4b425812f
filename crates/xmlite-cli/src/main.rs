use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use xmlite_parser::Element;

#[derive(Parser)]
#[command(name = "xmlite")]
#[command(about = "Parse simplified XML-like markup into an element tree")]
#[command(version)]
struct Cli {
    /// Log parser activity to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a document and print its element tree
    Parse {
        /// Input file, or `-` for stdin
        path: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Tree)]
        format: Format,

        /// Reject documents nested deeper than this many levels
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Check a document for errors without printing it
    Check {
        /// Input file, or `-` for stdin
        path: String,

        /// Reject documents nested deeper than this many levels
        #[arg(long)]
        max_depth: Option<usize>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Indented outline, one element per line
    Tree,
    /// Compact markup
    Markup,
    /// JSON object with name, attributes and children
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Parse {
            path,
            format,
            max_depth,
        } => cmd_parse(&path, format, max_depth),
        Command::Check { path, max_depth } => cmd_check(&path, max_depth),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &str) -> String {
    if path == "-" {
        let mut source = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut source) {
            eprintln!("Error reading stdin: {e}");
            std::process::exit(1);
        }
        return source;
    }

    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn parse_or_exit(source: &str, max_depth: Option<usize>) -> Element {
    let parser = match max_depth {
        Some(limit) => xmlite_parser::Parser::with_max_depth(limit),
        None => xmlite_parser::Parser::new(),
    };

    match parser.parse_document(source) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn cmd_parse(path: &str, format: Format, max_depth: Option<usize>) {
    let source = read_source(path);
    let root = parse_or_exit(&source, max_depth);

    match format {
        Format::Tree => print!("{}", render_tree(&root)),
        Format::Markup => println!("{root}"),
        Format::Json => match serde_json::to_string_pretty(&root) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing {path}: {e}");
                std::process::exit(1);
            }
        },
    }
}

fn cmd_check(path: &str, max_depth: Option<usize>) {
    let source = read_source(path);
    let root = parse_or_exit(&source, max_depth);

    tracing::info!(elements = root.descendants().count() + 1, "document ok");
    eprintln!("OK: {path}");
}

/// One line per element, indented two spaces per level.
fn render_tree(root: &Element) -> String {
    let mut out = String::new();
    let mut stack = vec![(root, 0usize)];

    while let Some((element, depth)) = stack.pop() {
        out.push_str(&"  ".repeat(depth));
        out.push_str(element.name());
        for (name, value) in element.attributes() {
            out.push_str(&format!(" {name}=\"{value}\""));
        }
        out.push('\n');

        for child in element.children().iter().rev() {
            stack.push((child, depth + 1));
        }
    }

    out
}
