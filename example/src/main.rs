use std::process::ExitCode;

use clap::{
    Parser,
    ValueEnum,
};
use modgraph::{
    build_graph,
    compiler,
    module_graph,
    BorrowedModuleGraph,
    ModuleGraph,
};
use petgraph::dot::{
    Config,
    Dot,
};

/* M00001 glycolysis, first three stages */
static GLYCOLYSIS_HEAD: BorrowedModuleGraph<'static> = module_graph!(
    "(K00844,K12407,K00845,K00886,K08074,K00918) (K01810,K06859,K13810,K15916) (K00850,K16370,K21071,K00918)"
);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One "from -> to" line per edge
    Edges,
    /// Graphviz DOT
    Dot,
    /// JSON with node labels and edge kinds
    Json,
}

/// Print the graph of a KEGG module expression.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// The module expression, e.g. "K01657+K01658,K13503".
    /// Prints the first glycolysis stages if omitted.
    expression: Option<String>,

    #[arg(long, value_enum, default_value = "edges")]
    format: OutputFormat,

    /// Skip attaching the source and sink anchors
    #[arg(long)]
    raw: bool,
}

fn print_graph<G: ModuleGraph + serde::Serialize>(graph: &G, format: OutputFormat) {
    match format {
        OutputFormat::Edges => {
            for (from, to) in graph.labeled_edges() {
                println!("{} -> {}", from, to);
            }
        }
        OutputFormat::Dot => {
            let graph = graph.to_petgraph();
            println!("{}", Dot::with_config(&graph, &[Config::EdgeNoLabel]));
        }
        OutputFormat::Json => match serde_json::to_string_pretty(graph) {
            Ok(json) => println!("{}", json),
            Err(error) => eprintln!("failed to serialize graph: {}", error),
        },
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let Some(expression) = args.expression else {
        print_graph(&GLYCOLYSIS_HEAD, args.format);
        return ExitCode::SUCCESS;
    };

    let graph = if args.raw {
        compiler::parse_module(&expression)
    } else {
        build_graph(&expression)
    };

    match graph {
        Ok(graph) => {
            print_graph(&graph, args.format);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}", error);
            if let Some(error) = error.syntax() {
                eprintln!("  {}", expression);
                eprintln!(
                    "  {}{}",
                    " ".repeat(error.position().start),
                    "^".repeat(error.position().len().max(1))
                );
            }

            ExitCode::FAILURE
        }
    }
}
