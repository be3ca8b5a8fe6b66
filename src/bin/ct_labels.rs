use clap::Parser;
use compact_newick::cli::{self, CliError};
use compact_newick::{ParseOptions, ROOT_NODE};
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

/// Extracts the tree's labels.
#[derive(Parser, Debug)]
#[command(name = "ct_labels", version, about, arg_required_else_help = true)]
struct CliArgs {
    /// Don't print labels of inner nodes.
    #[arg(short = 'I')]
    exclude_internal: bool,
    /// Don't print leaf labels.
    #[arg(short = 'L')]
    exclude_leaves: bool,
    /// Print only the root's label.
    #[arg(short = 'r')]
    only_root: bool,
    /// Print the labels of each tree on a single line, separated by TABs.
    #[arg(short = 't')]
    tabular: bool,
    /// NEWICK trees, one per line, or '-' for standard input.
    trees: String,
}

fn run(args: &CliArgs) -> Result<(), CliError> {
    let options = ParseOptions::default().with_lengths(false);
    let input = cli::open_input(&args.trees)?;
    let mut out = BufWriter::new(io::stdout().lock());

    cli::for_each_tree(input, &options, |tree| {
        if args.only_root {
            writeln!(out, "{}", tree.label(ROOT_NODE)?)?;
            return Ok(());
        }

        let labels = tree.labels()?;
        let mut selected: Vec<&str> = Vec::new();
        for node_id in tree.node_ids() {
            let include = if tree.is_leaf(node_id)? {
                !args.exclude_leaves
            } else {
                !args.exclude_internal
            };
            if include {
                selected.push(&labels[node_id]);
            }
        }

        if args.tabular {
            if !selected.is_empty() {
                writeln!(out, "{}", selected.join("\t"))?;
            }
        } else {
            for label in selected {
                writeln!(out, "{label}")?;
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
