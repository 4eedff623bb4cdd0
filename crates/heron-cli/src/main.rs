use heron::{EdgeMetrics, FruchtermanReingoldOptions, Graph, NodeIndex, SimulationStats};
use serde::Serialize;
use std::io::Write;
use tracing_subscriber::EnvFilter;

const DEFAULT_NODES: &str = "data/raw_nodes.json";
const DEFAULT_EDGES: &str = "data/raw_edges.json";
const DEFAULT_OUT: &str = "positions.json";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Layout(heron::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<heron::Error> for CliError {
    fn from(value: heron::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Command {
    #[default]
    Layout,
    Metrics,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    nodes: Option<String>,
    edges: Option<String>,
    out: Option<String>,
    raw_out: Option<String>,
    config: Option<String>,
    iterations: Option<usize>,
    cooling: Option<f64>,
    temperature: Option<f64>,
    epsilon: Option<f64>,
    converge: Option<f64>,
    json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOut {
    before: Option<EdgeMetrics>,
    after: Option<EdgeMetrics>,
    iterations_run: usize,
    converged: bool,
}

fn usage() -> &'static str {
    "heron-cli\n\
\n\
USAGE:\n\
  heron-cli [layout] [--nodes <path>] [--edges <path>] [--out <path>|-] [--raw-out <path>] [--config <path>] [--iterations <n>] [--cooling <f>] [--temperature <f>] [--epsilon <f>] [--converge <f>] [--json]\n\
  heron-cli metrics [--nodes <path>] [--edges <path>] [--config <path>] [--epsilon <f>] [--json]\n\
\n\
NOTES:\n\
  - Nodes default to data/raw_nodes.json, edges to data/raw_edges.json.\n\
  - layout writes the updated nodes to positions.json by default; --out - prints them to stdout\n\
    and moves the metric reports to stderr.\n\
  - --raw-out writes the unmodified input positions, pretty printed.\n\
  - --config reads layout options from a JSON object (iterations, cooling, initialTemperature,\n\
    epsilon, convergenceThreshold); flags override it.\n\
  - --converge enables the early exit; without it every iteration runs.\n\
  - Log verbosity is read from HERON_LOG (default: warn).\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> Result<T, CliError> {
    raw.parse::<T>().map_err(|_| CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "metrics" => args.command = Command::Metrics,
            "--json" => args.json = true,
            "--nodes" => args.nodes = Some(next_value(&mut it)?.clone()),
            "--edges" => args.edges = Some(next_value(&mut it)?.clone()),
            "--out" => args.out = Some(next_value(&mut it)?.clone()),
            "--raw-out" => args.raw_out = Some(next_value(&mut it)?.clone()),
            "--config" => args.config = Some(next_value(&mut it)?.clone()),
            "--iterations" => args.iterations = Some(parse_number(next_value(&mut it)?)?),
            "--cooling" => args.cooling = Some(parse_number(next_value(&mut it)?)?),
            "--temperature" => args.temperature = Some(parse_number(next_value(&mut it)?)?),
            "--epsilon" => args.epsilon = Some(parse_number(next_value(&mut it)?)?),
            "--converge" => args.converge = Some(parse_number(next_value(&mut it)?)?),
            _ => return Err(CliError::Usage(usage())),
        }
    }

    Ok(args)
}

/// Defaults, then the `--config` file, then individual flags.
fn resolve_options(args: &Args) -> Result<FruchtermanReingoldOptions, CliError> {
    let mut opts = match args.config.as_deref() {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => FruchtermanReingoldOptions::default(),
    };
    if let Some(v) = args.iterations {
        opts.iterations = v;
    }
    if let Some(v) = args.cooling {
        opts.cooling = v;
    }
    if let Some(v) = args.temperature {
        opts.initial_temperature = v;
    }
    if let Some(v) = args.epsilon {
        opts.epsilon = v;
    }
    if args.converge.is_some() {
        opts.convergence_threshold = args.converge;
    }
    opts.validate()?;
    Ok(opts)
}

fn load_graph(args: &Args) -> Result<Graph, CliError> {
    let nodes = args.nodes.as_deref().unwrap_or(DEFAULT_NODES);
    let edges = args.edges.as_deref().unwrap_or(DEFAULT_EDGES);
    tracing::debug!(nodes, edges, "loading graph");
    Ok(heron::io::load_graph(nodes, edges)?)
}

/// `None` when the graph has no edges; every other error is fatal.
fn edge_metrics(
    graph: &Graph,
    index: &NodeIndex,
    epsilon: f64,
) -> Result<Option<EdgeMetrics>, CliError> {
    match EdgeMetrics::compute(&graph.positions(), index.edges(), epsilon) {
        Ok(m) => Ok(Some(m)),
        Err(heron::Error::NoEdges) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn metrics_report(title: &str, metrics: Option<&EdgeMetrics>) -> String {
    match metrics {
        Some(m) => m.report(title),
        None => format!("{title}\n- no edges\n"),
    }
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn run_metrics(args: &Args) -> Result<(), CliError> {
    let opts = resolve_options(args)?;
    let graph = load_graph(args)?;
    let index = NodeIndex::build(&graph)?;
    let metrics = edge_metrics(&graph, &index, opts.epsilon)?;

    let mut stdout = std::io::stdout().lock();
    if args.json {
        write_json(&mut stdout, &metrics)?;
    } else {
        let report = metrics_report("Raw graph metrics:", metrics.as_ref());
        write!(stdout, "{report}")?;
    }
    Ok(())
}

fn run_layout(args: &Args) -> Result<(), CliError> {
    let opts = resolve_options(args)?;
    let mut graph = load_graph(args)?;
    let index = NodeIndex::build(&graph)?;
    let out = args.out.as_deref().unwrap_or(DEFAULT_OUT);
    let to_stdout = out == "-";

    let before = edge_metrics(&graph, &index, opts.epsilon)?;
    if let Some(path) = args.raw_out.as_deref() {
        heron::io::write_nodes(path, &graph.nodes)?;
    }

    let stats: SimulationStats = heron::layout(&mut graph, &opts)?;
    let after = edge_metrics(&graph, &index, opts.epsilon)?;

    let mut report = String::new();
    if !args.json {
        report.push_str(&metrics_report("Raw graph metrics:", before.as_ref()));
        if let Some(path) = args.raw_out.as_deref() {
            report.push_str(&format!("Raw node positions saved to {path}\n"));
        }
        report.push_str(&metrics_report("Optimized graph metrics:", after.as_ref()));
    }

    if to_stdout {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", heron::io::nodes_to_json_pretty(&graph.nodes)?)?;
        eprint!("{report}");
    } else {
        heron::io::write_nodes(out, &graph.nodes)?;
        if !args.json {
            report.push_str(&format!("Optimized node positions saved to {out}\n"));
        }
        print!("{report}");
    }

    if args.json {
        let summary = LayoutOut {
            before,
            after,
            iterations_run: stats.iterations_run,
            converged: stats.converged,
        };
        if to_stdout {
            write_json(&mut std::io::stderr().lock(), &summary)?;
        } else {
            write_json(&mut std::io::stdout().lock(), &summary)?;
        }
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Layout => run_layout(&args),
        Command::Metrics => run_metrics(&args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("HERON_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

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
