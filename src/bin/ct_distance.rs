use clap::Parser;
use compact_newick::cli::{self, CliError};
use compact_newick::{
    DistanceMode, NodeSelection, ParseOptions, TreeError, distances,
};
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use std::str::FromStr;

/// Prints distances between nodes, following tree branches, in various ways.
#[derive(Parser, Debug)]
#[command(name = "ct_distance", version, about, arg_required_else_help = true)]
struct CliArgs {
    /// Mode, chosen by first letter: 'r' root (default), 'l' LCA,
    /// 'p' parent, 'm' matrix. '-mm', '-m matrix' and '-m mat' all select
    /// matrix mode.
    #[arg(short = 'm', value_name = "MODE", default_value = "root", value_parser = DistanceMode::from_str)]
    mode: DistanceMode,
    /// Print labels (or '' if empty) in addition to distances.
    #[arg(short = 'n')]
    print_labels: bool,
    /// Selection, chosen by first letter: 'd' labeled leaves (default),
    /// 'l' labeled nodes, 'a' all nodes, 'i' inner nodes, 'f' all leaves.
    #[arg(short = 's', value_name = "SELECTION", default_value = "d", value_parser = NodeSelection::from_str)]
    selection: NodeSelection,
    /// Print the values of each tree on one line, separated by TABs.
    #[arg(short = 't')]
    tabular: bool,
    /// NEWICK trees, one per line, or '-' for standard input.
    trees: String,
}

fn run(args: &CliArgs) -> Result<(), CliError> {
    if matches!(args.mode, DistanceMode::Lca | DistanceMode::Matrix) {
        return Err(TreeError::Unimplemented(args.mode).into());
    }

    let load_labels = args.print_labels || args.selection.needs_labels();
    let options = ParseOptions::default().with_labels(load_labels);
    let input = cli::open_input(&args.trees)?;
    let mut out = BufWriter::new(io::stdout().lock());

    cli::for_each_tree(input, &options, |tree| {
        let distances = distances(&tree, args.mode)?;
        let selected = args.selection.select(&tree)?;

        if args.tabular {
            if selected.is_empty() {
                return Ok(());
            }
            if args.print_labels {
                let labels = selected
                    .iter()
                    .map(|&node_id| tree.label(node_id))
                    .collect::<Result<Vec<&str>, TreeError>>()?;
                writeln!(out, "{}", labels.join("\t"))?;
            }
            let values: Vec<String> = selected
                .iter()
                .map(|&node_id| distances[node_id].to_string())
                .collect();
            writeln!(out, "{}", values.join("\t"))?;
        } else {
            for node_id in selected {
                if args.print_labels {
                    write!(out, "{}\t", tree.label(node_id)?)?;
                }
                writeln!(out, "{}", distances[node_id])?;
            }
        }
        Ok(())
    })?;

    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    cli::init_logging();
    let args: CliArgs = cli::parse_args();
    cli::finish(run(&args))
}
