use indexmap::IndexMap;
use narwhal::graphlib::{UndirectedGraph, alg};
use narwhal::{HdeOptions, layout};
use serde::Serialize;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Layout(narwhal::Error),
    Json(serde_json::Error),
    EdgeList { line: usize, text: String },
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::EdgeList { line, text } => {
                write!(f, "line {line}: expected `<from> <to>` or `<node>`, got `{text}`")
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<narwhal::Error> for CliError {
    fn from(value: narwhal::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    config: Option<String>,
    pivot_count: Option<usize>,
    dimensions: Option<usize>,
    seed: Option<u64>,
    largest_component: bool,
    pretty: bool,
}

#[derive(Serialize)]
struct LayoutOut<'a> {
    dimensions: usize,
    pivots: &'a [String],
    positions: IndexMap<&'a str, Vec<f64>>,
}

fn usage() -> &'static str {
    "narwhal-cli\n\
\n\
USAGE:\n\
  narwhal-cli [--pivots <n>] [--dimensions <d>] [--seed <s>] [--config <json>] [--largest-component] [--pretty] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the edge list is read from stdin.\n\
  - One link per line as `<from> <to>`; a single id declares a node; '#' starts a comment line.\n\
  - --config reads HdeOptions as JSON (pivotCount, dimensions, solver); flags override it.\n\
  - --largest-component lays out only the largest connected component.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--pretty" => args.pretty = true,
            "--largest-component" => args.largest_component = true,
            "--pivots" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.pivot_count = Some(parse_positive(n)?);
            }
            "--dimensions" => {
                let Some(d) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.dimensions = Some(parse_positive(d)?);
            }
            "--seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.seed = Some(seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn parse_positive(s: &str) -> Result<usize, CliError> {
    match s.parse::<usize>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(CliError::Usage(usage())),
    }
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn parse_edge_list(text: &str) -> Result<UndirectedGraph<String>, CliError> {
    let mut g = UndirectedGraph::new();
    for (i, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut parts = trimmed.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(id), None, None) => {
                g.add_node(id.to_string());
            }
            (Some(from), Some(to), None) => {
                g.add_link(from.to_string(), to.to_string());
            }
            _ => {
                return Err(CliError::EdgeList {
                    line: i + 1,
                    text: trimmed.to_string(),
                });
            }
        }
    }
    Ok(g)
}

fn load_options(args: &Args) -> Result<HdeOptions, CliError> {
    let mut opts = match args.config.as_deref() {
        Some(path) => serde_json::from_str::<HdeOptions>(&std::fs::read_to_string(path)?)?,
        None => HdeOptions::default(),
    };
    if let Some(n) = args.pivot_count {
        opts.pivot_count = n;
    }
    if let Some(d) = args.dimensions {
        opts.dimensions = d;
    }
    if let Some(seed) = args.seed {
        opts.solver.seed = seed;
    }
    Ok(opts)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let opts = load_options(&args)?;

    let mut graph = parse_edge_list(&text)?;
    if args.largest_component {
        graph = alg::largest_component(&graph);
    }

    let hde = layout(&graph, &opts)?;
    let mut positions: IndexMap<&str, Vec<f64>> = IndexMap::with_capacity(graph.node_count());
    for (id, pos) in hde.positions() {
        positions.insert(id.as_str(), pos?);
    }

    write_json(
        &LayoutOut {
            dimensions: hde.dimensions(),
            pivots: hde.pivot_nodes(),
            positions,
        },
        args.pretty,
    )
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
