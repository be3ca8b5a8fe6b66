use compact_newick::{ParseOptions, Tree, parse_newick, root_distances};
use criterion::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};
use std::hint::black_box;
use std::path::PathBuf;

/// Balanced binary tree with `2^depth` labeled tips and unit branch lengths.
fn balanced_tree(depth: u32) -> String {
    let mut counter: usize = 0;
    let mut layer: Vec<String> = (0..1usize << depth)
        .map(|_| {
            counter += 1;
            format!("T{counter}:1")
        })
        .collect();
    while layer.len() > 1 {
        layer = layer
            .chunks(2)
            .map(|pair| format!("({}):1", pair.join(",")))
            .collect();
    }
    let mut newick = layer.pop().unwrap_or_default();
    newick.truncate(newick.len() - 2);
    newick.push(';');
    newick
}

/// Caterpillar tree: each internal node holds one tip and the next subtree.
fn caterpillar_tree(tip_count: usize) -> String {
    let mut newick = String::new();
    for idx in 1..tip_count {
        newick.push_str(&format!("('tip {idx}':0.5,"));
    }
    newick.push_str(&format!("'tip {tip_count}':0.5"));
    for _ in 1..tip_count {
        newick.push_str("):0.25");
    }
    newick.push(';');
    newick
}

fn prepare_test_data() -> Vec<(String, String)> {
    vec![
        ("balanced_2^12".to_string(), balanced_tree(12)),
        ("balanced_2^16".to_string(), balanced_tree(16)),
        ("caterpillar_10000".to_string(), caterpillar_tree(10_000)),
    ]
}

fn bench_newick_parser(c: &mut Criterion) {
    let test_data = prepare_test_data();
    let options = ParseOptions::default();

    let mut group = c.benchmark_group("newick_parser");
    let _ = group.sample_size(30);

    for (name, newick_string) in &test_data {
        let char_count = newick_string.len();
        let _ = group.throughput(Throughput::Bytes(char_count as u64));

        let _ = group.bench_with_input(
            BenchmarkId::new("parse_newick", name),
            newick_string,
            |b, newick| {
                b.iter(|| {
                    let _ = black_box(parse_newick(newick, &options));
                });
            },
        );

        let bare = ParseOptions::default().with_labels(false);
        let _ = group.bench_with_input(
            BenchmarkId::new("parse_newick_lengths_only", name),
            newick_string,
            |b, newick| {
                b.iter(|| {
                    let _ = black_box(Tree::from_newick(newick, &bare));
                });
            },
        );

        if let Ok(tree) = Tree::from_newick(newick_string, &options) {
            let _ = group.bench_with_input(
                BenchmarkId::new("to_newick", name),
                &tree,
                |b, tree| {
                    b.iter(|| {
                        let _ = black_box(tree.to_newick());
                    });
                },
            );
            let _ = group.bench_with_input(
                BenchmarkId::new("root_distances", name),
                &tree,
                |b, tree| {
                    b.iter(|| {
                        let _ = black_box(root_distances(tree));
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(
    name = benches;
    config = {
        let mut criterion = Criterion::default();
        let benchmark_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("benchmark_results");
        criterion = criterion.output_directory(&benchmark_dir);
        criterion = criterion.warm_up_time(std::time::Duration::from_millis(500));
        criterion = criterion.measurement_time(std::time::Duration::from_secs(5));
        criterion
    };
    targets = bench_newick_parser
);
criterion_main!(benches);
