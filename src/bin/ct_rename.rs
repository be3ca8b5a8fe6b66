use clap::Parser;
use compact_newick::ParseOptions;
use compact_newick::cli::{self, CliError, LabelMap};
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

/// Renames nodes using a mapping.
///
/// The mapping is either a file with one "old new" pair per line, or a
/// single old label and new label given on the command line.
#[derive(Parser, Debug)]
#[command(name = "ct_rename", version, about, arg_required_else_help = true)]
struct CliArgs {
    /// Only replace leaf labels.
    #[arg(short = 'l')]
    leaves_only: bool,
    /// NEWICK trees, one per line, or '-' for standard input.
    trees: String,
    /// Map file, or an old label followed by its new label.
    #[arg(required = true, num_args = 1..=2, value_name = "MAP|OLD NEW")]
    mapping: Vec<String>,
}

fn label_map(mapping: &[String]) -> Result<LabelMap, CliError> {
    match mapping {
        [path] => cli::read_label_map(path),
        [old_label, new_label] => {
            let mut label_map = LabelMap::default();
            let _ = label_map.insert(old_label.clone(), new_label.clone());
            Ok(label_map)
        }
        _ => Err(CliError::Usage(
            "expected a map file or an old and a new label".to_string(),
        )),
    }
}

fn run(args: &CliArgs) -> Result<(), CliError> {
    let label_map = label_map(&args.mapping)?;
    let input = cli::open_input(&args.trees)?;
    let mut out = BufWriter::new(io::stdout().lock());

    cli::for_each_tree(input, &ParseOptions::default(), |mut tree| {
        let _ = tree.replace_labels(&label_map, !args.leaves_only)?;
        tree.print_newick(&mut out)?;
        writeln!(out)?;
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
