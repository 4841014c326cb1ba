use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use cfinder::config::{CFINDER_ENV, LICENCE_ENV};
use cfinder::{CFinder, CFinderResults, FindOptions, Tabular, ToolConfig, export, logging, synth};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "cfinder",
    version,
    about = "Run CFinder and read back its k-clique communities",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run CFinder on an edge list and summarise the result
    Find(FindArgs),
    /// Read an existing CFinder output directory
    Load(LoadArgs),
    /// Write a random weighted edge list
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct FindArgs {
    /// CFinder executable or installation directory
    #[arg(long, env = CFINDER_ENV)]
    cfinder: PathBuf,
    /// Licence file (default: licence.txt next to the executable)
    #[arg(long, env = LICENCE_ENV)]
    licence: Option<PathBuf>,
    /// Input edge list
    input: PathBuf,
    /// Output directory (default: <tool_dir>/output)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Upper link weight threshold (-W)
    #[arg(long)]
    upper_weight: Option<f64>,
    /// Lower link weight threshold (-w)
    #[arg(long)]
    lower_weight: Option<f64>,
    /// Digits in the thresholded output directory name (-d)
    #[arg(long)]
    digits: Option<u32>,
    /// Maximal clique search time per node (-t)
    #[arg(long)]
    time_max: Option<u64>,
    /// Directed mode (-D)
    #[arg(long)]
    directed: bool,
    /// Undirected mode (-U, the default)
    #[arg(long)]
    undirected: bool,
    /// Intensity method, needs --lower-weight (-I)
    #[arg(long)]
    intensity: bool,
    /// Only this clique size (-k)
    #[arg(short)]
    k: Option<u32>,
    /// Remove the output directory after parsing
    #[arg(long)]
    delete_output: bool,
    #[command(flatten)]
    report: ReportArgs,
}

#[derive(Args, Debug)]
struct LoadArgs {
    /// CFinder output directory
    dir: PathBuf,
    /// Read the directed_ variants of the per-k files
    #[arg(long)]
    directed: bool,
    #[command(flatten)]
    report: ReportArgs,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Destination file
    path: PathBuf,
    #[arg(long, default_value_t = 140)]
    vertices: usize,
    #[arg(long, default_value_t = 500)]
    edges: usize,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Print the full result set as JSON
    #[arg(long)]
    json: bool,
    /// Write every table as CSV under this directory
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,
    /// Write the input graph as DOT, coloured by the communities of --dot-k
    #[arg(long, value_name = "FILE", requires = "dot_k")]
    dot: Option<PathBuf>,
    #[arg(long, value_name = "K")]
    dot_k: Option<u32>,
    /// Render the DOT file to this PNG with Graphviz
    #[arg(long, value_name = "FILE", requires = "dot")]
    png: Option<PathBuf>,
}

fn report(results: &CFinderResults, args: &ReportArgs) -> Result<()> {
    if let Some(dir) = &args.export_dir {
        export::export_results(results, dir)
            .with_context(|| format!("exporting tables to {}", dir.display()))?;
    }

    if let (Some(dot), Some(k)) = (&args.dot, args.dot_k) {
        let Some(tables) = results.k(k) else {
            bail!("no communities for k={k}");
        };
        let Some(graph) = &results.graph else {
            bail!("the graph file is empty");
        };
        export::save_graph_dot(graph, &tables.communities, dot)?;
        if let Some(png) = &args.png {
            export::render_dot(dot, png)?;
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    println!("Found {} cliques", results.cliques.len());
    for (k, tables) in &results.by_k {
        println!(
            "k={k}: {} communities, {} community links",
            tables.communities.len(),
            tables.communities_graph.as_ref().map_or(0, |g| g.len())
        );
        for row in &tables.communities.rows {
            println!("  community {} ({} vertices)", row.id, row.members.len());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    logging::init_tracing_from_env("info");
    let cli = Cli::parse();

    match cli.command {
        Commands::Find(args) => {
            let config = ToolConfig::from_location(args.cfinder, args.licence);
            let opts = FindOptions {
                output: args.output,
                upper_weight: args.upper_weight,
                lower_weight: args.lower_weight,
                digits: args.digits,
                time_max: args.time_max,
                directed: args.directed,
                undirected: args.undirected,
                intensity: args.intensity,
                k: args.k,
            };
            let results = CFinder::new(config)
                .find(&args.input, &opts, args.delete_output)
                .with_context(|| format!("running CFinder on {}", args.input.display()))?;
            report(&results, &args.report)
        }
        Commands::Load(args) => {
            let results = cfinder::load(&args.dir, args.directed)
                .with_context(|| format!("loading {}", args.dir.display()))?;
            report(&results, &args.report)
        }
        Commands::Generate(args) => {
            let written = synth::generate_edge_list(args.vertices, args.edges, &args.path)?;
            println!("Wrote {written} edges to {}", args.path.display());
            Ok(())
        }
    }
}
