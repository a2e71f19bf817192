use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use docnav::config::Config;
use docnav::document::node::{ArrayNode, Node};
use docnav::document::parser::{expect_map, DocumentFormat};
use docnav::document::render::render;
use docnav::document::{NodeError, Value};
use docnav::file::loader::{load_file_as, load_from_stdin};

/// docnav - read values out of JSON and YAML documents by key path
#[derive(Parser)]
#[command(name = "docnav")]
#[command(version)]
#[command(about = "Navigate JSON and YAML documents by key path", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Input format (default: from the file extension, then the config file)
    #[arg(long, global = true, value_enum)]
    format: Option<FormatArg>,

    /// Output format (default: from the config file)
    #[arg(long, global = true, value_enum)]
    output: Option<FormatArg>,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    compact: bool,

    /// Print scalar results as plain text
    #[arg(long, global = true)]
    raw: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a key path from the root map
    Get {
        /// Document to read ("-" for stdin)
        file: String,
        /// Keys, outermost first
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Print the first match of a key path at any depth
    Find {
        /// Document to read ("-" for stdin)
        file: String,
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Print every match of a key path at any depth
    FindAll {
        /// Document to read ("-" for stdin)
        file: String,
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// List the keys of the addressed map whose values are maps
    Entries {
        /// Document to read ("-" for stdin)
        file: String,
        /// Path of the map to list (empty for the root)
        keys: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for DocumentFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => DocumentFormat::Json,
            FormatArg::Yaml => DocumentFormat::Yaml,
        }
    }
}

struct OutputOptions {
    format: DocumentFormat,
    pretty: bool,
    raw: bool,
}

/// What a command found.
enum Outcome {
    Found,
    Absent,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli) {
        Ok(Outcome::Found) => ExitCode::SUCCESS,
        Ok(Outcome::Absent) => {
            eprintln!("No value at the given path");
            ExitCode::from(1)
        }
        Err(err) => {
            if let Some(node_err) = err.downcast_ref::<NodeError>() {
                if node_err.is_path_violation() {
                    eprintln!("Invalid path: {}", node_err);
                    return ExitCode::from(2);
                }
            }
            eprintln!("Error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<Outcome> {
    let config = Config::load();

    let output = OutputOptions {
        format: match cli.output {
            Some(arg) => arg.into(),
            None => config.output_format()?,
        },
        pretty: config.pretty && !cli.compact,
        raw: cli.raw || config.raw_scalars,
    };
    let forced_format = cli.format.map(DocumentFormat::from);

    match cli.command {
        Command::Get { file, keys } => {
            let root = expect_map(load(&file, forced_format, &config)?)?;
            match root.get(keys.as_slice())? {
                Some(node) => print_node(&node, &output),
                None => Ok(Outcome::Absent),
            }
        }
        Command::Find { file, keys } => {
            let root = load(&file, forced_format, &config)?;
            match root.find(keys.as_slice()) {
                Some(node) => print_node(&node, &output),
                None => Ok(Outcome::Absent),
            }
        }
        Command::FindAll { file, keys } => {
            let root = load(&file, forced_format, &config)?;
            let matches = root.find_all(keys.as_slice());
            if output.raw {
                for node in &matches {
                    print_node(node, &output)?;
                }
                return Ok(Outcome::Found);
            }
            let list = ArrayNode::new(matches.iter().map(Value::from).collect());
            print_node(&Node::Array(list), &output)
        }
        Command::Entries { file, keys } => {
            let root = expect_map(load(&file, forced_format, &config)?)?;
            let map = if keys.is_empty() {
                Some(root)
            } else {
                root.get_map(keys.as_slice())?
            };
            match map {
                Some(map) => {
                    for key in map.entries_as_map().keys() {
                        println!("{}", key);
                    }
                    Ok(Outcome::Found)
                }
                None => Ok(Outcome::Absent),
            }
        }
    }
}

/// Loads `file`, or stdin for "-". An explicit format wins over the file
/// extension, which wins over the config file.
fn load(file: &str, forced: Option<DocumentFormat>, config: &Config) -> Result<Node> {
    let from_name = if file == "-" {
        forced
    } else {
        forced.or_else(|| DocumentFormat::from_path(file))
    };
    // The config is only consulted when nothing on the command line decides.
    let format = match from_name {
        Some(format) => Some(format),
        None => config.input_format()?,
    };
    if file == "-" {
        return load_from_stdin(format);
    }
    load_file_as(file, format).with_context(|| format!("Could not open {}", file))
}

fn print_node(node: &Node, output: &OutputOptions) -> Result<Outcome> {
    if output.raw {
        if let Some(value) = node.as_value() {
            println!("{}", value);
            return Ok(Outcome::Found);
        }
    }
    println!("{}", render(node, output.format, output.pretty)?);
    Ok(Outcome::Found)
}
