use assert_cmd::cargo;
use rstest::rstest;
use std::io::Write;
use tempfile::NamedTempFile;

const EXAMPLE: &str = "(A:1,(B:2,C:3)D:4);\n";

fn create_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

#[rstest]
#[case::root_default(vec![], "1\n6\n7\n")]
#[case::parent(vec!["-m", "p"], "1\n2\n3\n")]
#[case::parent_attached(vec!["-mparent"], "1\n2\n3\n")]
#[case::labels(vec!["-n"], "A\t1\nB\t6\nC\t7\n")]
#[case::tabular(vec!["-t"], "1\t6\t7\n")]
#[case::tabular_labels(vec!["-n", "-t"], "A\tB\tC\n1\t6\t7\n")]
#[case::all(vec!["-s", "all"], "0\n1\n4\n6\n7\n")]
#[case::inner(vec!["-s", "i", "-n"], "\t0\nD\t4\n")]
#[case::labeled(vec!["-s", "l"], "1\n4\n6\n7\n")]
#[case::labeled_word(vec!["-s", "labeled"], "1\n4\n6\n7\n")]
#[case::leaves_word(vec!["-s", "leaves", "-n"], "A\t1\nB\t6\nC\t7\n")]
fn test_ct_distance(#[case] args: Vec<&str>, #[case] expected: &str) {
    let mut cmd = cargo::cargo_bin_cmd!("ct_distance");
    let assert = cmd.args(&args).arg("-").write_stdin(EXAMPLE).assert();
    assert.success().code(0).stdout(expected.to_string());
}

#[rstest]
#[case::lca("lca")]
#[case::matrix("m")]
fn test_ct_distance_unimplemented_modes(#[case] mode: &str) {
    let mut cmd = cargo::cargo_bin_cmd!("ct_distance");
    let assert =
        cmd.args(["-m", mode, "-"]).write_stdin(EXAMPLE).assert().failure();
    let output = assert.get_output();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(
        String::from_utf8_lossy(&output.stderr)
            .contains("mode is not yet implemented")
    );
}

#[test]
fn test_ct_distance_invalid_selection_is_usage_error() {
    let mut cmd = cargo::cargo_bin_cmd!("ct_distance");
    let _ = cmd.args(["-s", "zzz", "-"]).assert().failure().code(1);
}

#[rstest]
#[case::default(vec![], "\nA\nD\nB\nC\n")]
#[case::no_internal(vec!["-I"], "A\nB\nC\n")]
#[case::no_leaves(vec!["-L"], "\nD\n")]
#[case::nothing(vec!["-I", "-L"], "")]
#[case::nothing_bundled(vec!["-IL"], "")]
#[case::nothing_tabular(vec!["-I", "-L", "-t"], "")]
#[case::root_only(vec!["-r"], "\n")]
#[case::tabular(vec!["-t", "-I"], "A\tB\tC\n")]
fn test_ct_labels(#[case] args: Vec<&str>, #[case] expected: &str) {
    let mut cmd = cargo::cargo_bin_cmd!("ct_labels");
    let assert = cmd.args(&args).arg("-").write_stdin(EXAMPLE).assert();
    assert.success().code(0).stdout(expected.to_string());
}

#[test]
fn test_ct_labels_reads_file_line_by_line() {
    let file = create_file("(A,B)R;\n\n((C,D)E,F)G;\n");
    let mut cmd = cargo::cargo_bin_cmd!("ct_labels");
    let assert = cmd.arg("-t").arg(file.path()).assert();
    assert.success().stdout("R\tA\tB\nG\tE\tC\tD\tF\n");
}

#[test]
fn test_ct_rename_single_pair() {
    let mut cmd = cargo::cargo_bin_cmd!("ct_rename");
    let assert = cmd.args(["-", "B", "X"]).write_stdin(EXAMPLE).assert();
    assert.success().code(0).stdout("(A:1,(X:2,C:3)D:4);\n");
}

#[test]
fn test_ct_rename_map_file() {
    let map = create_file("A Alpha\nD Delta\n\nC\n");
    let mut cmd = cargo::cargo_bin_cmd!("ct_rename");
    let assert = cmd.arg("-").arg(map.path()).write_stdin(EXAMPLE).assert();
    assert.success().stdout("(Alpha:1,(B:2,:3)Delta:4);\n");
}

#[test]
fn test_ct_rename_first_duplicate_wins() {
    let map = create_file("B First\nB Second\n");
    let mut cmd = cargo::cargo_bin_cmd!("ct_rename");
    let assert = cmd.arg("-").arg(map.path()).write_stdin(EXAMPLE).assert();
    assert.success().stdout("(A:1,(First:2,C:3)D:4);\n");
}

#[test]
fn test_ct_rename_leaves_only() {
    let map = create_file("A Alpha\nD Delta\n");
    let mut cmd = cargo::cargo_bin_cmd!("ct_rename");
    let assert = cmd
        .arg("-l")
        .arg("-")
        .arg(map.path())
        .write_stdin(EXAMPLE)
        .assert();
    assert.success().stdout("(Alpha:1,(B:2,C:3)D:4);\n");
}

#[test]
fn test_ct_rename_quotes_new_labels() {
    let mut cmd = cargo::cargo_bin_cmd!("ct_rename");
    let assert =
        cmd.args(["-", "B", "it's here"]).write_stdin(EXAMPLE).assert();
    assert.success().stdout("(A:1,('it''s here':2,C:3)D:4);\n");
}

#[test]
fn test_no_arguments_is_usage_error() {
    let commands = [
        cargo::cargo_bin_cmd!("ct_distance"),
        cargo::cargo_bin_cmd!("ct_labels"),
        cargo::cargo_bin_cmd!("ct_rename"),
    ];
    for mut cmd in commands {
        let assert = cmd.assert().failure().code(1);
        assert!(!assert.get_output().stderr.is_empty());
    }
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let mut cmd = cargo::cargo_bin_cmd!("ct_labels");
    let _ = cmd.args(["-Q", "-"]).assert().failure().code(1);
}

#[test]
fn test_ct_rename_needs_mapping() {
    let mut cmd = cargo::cargo_bin_cmd!("ct_rename");
    let _ = cmd.arg("-").write_stdin(EXAMPLE).assert().failure().code(1);
}

#[test]
fn test_missing_input_file() {
    let mut cmd = cargo::cargo_bin_cmd!("ct_labels");
    let assert = cmd.arg("does-not-exist.tre").assert().failure().code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("Unable to open file: does-not-exist.tre"));
}

#[test]
fn test_missing_map_file() {
    let mut cmd = cargo::cargo_bin_cmd!("ct_rename");
    let assert = cmd
        .args(["-", "no-such-map.txt"])
        .write_stdin(EXAMPLE)
        .assert()
        .failure()
        .code(1);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert!(stderr.contains("Unable to open file: no-such-map.txt"));
}

#[test]
fn test_malformed_line_fails_without_partial_output() {
    let mut cmd = cargo::cargo_bin_cmd!("ct_labels");
    let assert = cmd
        .args(["-I", "-"])
        .write_stdin("(A:1,(B:2;\n")
        .assert()
        .failure()
        .code(1);
    let output = assert.get_output();
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    assert!(stderr.contains("Line 1"));
    assert!(stderr.contains("Unbalanced parentheses"));
}

#[test]
fn test_help_exits_successfully() {
    let mut cmd = cargo::cargo_bin_cmd!("ct_distance");
    let _ = cmd.arg("--help").assert().success();
}
