//! Command tests: parse arguments the way the binary does and check output

use clap::Parser;
use lopdf::{Dictionary, Document, Object};
use pretty_assertions::assert_eq;
use std::path::Path;
use toolbox_cli::config::Config;
use toolbox_cli::{run, Cli};

fn run_args(args: &[&str], config: &Config) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("toolbox").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    run(&cli, config, &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn text(args: &[&str]) -> String {
    run_args(args, &Config::default()).unwrap()
}

/// Minimal PDF whose pages carry a `Label` of "<prefix>-<page>"
fn write_pdf(path: &Path, num_pages: u32, prefix: &str) {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (0..num_pages)
        .map(|i| {
            let page = Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(pages_id)),
                (
                    "MediaBox",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(612),
                        Object::Integer(792),
                    ]),
                ),
                (
                    "Label",
                    Object::string_literal(format!("{}-{}", prefix, i + 1)),
                ),
            ]);
            Object::Reference(doc.add_object(page))
        })
        .collect();

    let pages = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(num_pages as i64)),
        ("Kids", Object::Array(kids)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.save(path).unwrap();
}

fn labels(path: &Path) -> Vec<String> {
    let doc = Document::load(path).unwrap();
    doc.get_pages()
        .values()
        .map(|&id| {
            let label = doc.get_dictionary(id).unwrap().get(b"Label").unwrap();
            String::from_utf8(label.as_str().unwrap().to_vec()).unwrap()
        })
        .collect()
}

// ============================================================
// PDF commands
// ============================================================

#[test]
fn merge_concatenates_in_argument_order() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.pdf");
    let b = dir.path().join("b.pdf");
    let out = dir.path().join("out.pdf");
    write_pdf(&a, 2, "a");
    write_pdf(&b, 1, "b");

    let printed = text(&[
        "merge",
        b.to_str().unwrap(),
        a.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);

    assert!(printed.starts_with("Wrote 3 pages"));
    assert_eq!(labels(&out), vec!["b-1", "a-1", "a-2"]);
}

#[test]
fn merge_needs_two_files() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.pdf");
    write_pdf(&a, 2, "a");

    let err = run_args(
        &["merge", a.to_str().unwrap(), "-o", "/nonexistent/out.pdf"],
        &Config::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("at least 2 PDF files"));
}

#[test]
fn reorder_reverse_and_moves() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.pdf");
    let out = dir.path().join("out.pdf");
    write_pdf(&input, 4, "p");

    text(&[
        "reorder",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "--reverse",
    ]);
    assert_eq!(labels(&out), vec!["p-4", "p-3", "p-2", "p-1"]);

    text(&[
        "reorder",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "--move",
        "4:1",
    ]);
    assert_eq!(labels(&out), vec!["p-4", "p-1", "p-2", "p-3"]);
}

#[test]
fn reorder_custom_order_must_cover_every_page() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.pdf");
    let out = dir.path().join("out.pdf");
    write_pdf(&input, 3, "p");

    let printed = run_args(
        &[
            "--json",
            "reorder",
            input.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--order",
            "2,3,1",
        ],
        &Config::default(),
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&printed).unwrap();
    assert_eq!(value["order"], serde_json::json!([2, 3, 1]));
    assert_eq!(labels(&out), vec!["p-2", "p-3", "p-1"]);

    let err = run_args(
        &[
            "reorder",
            input.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--order",
            "1,2",
        ],
        &Config::default(),
    )
    .unwrap_err();
    assert!(err
        .to_string()
        .contains("Order must list each of the 3 pages exactly once"));
}

#[cfg(target_os = "linux")]
#[test]
fn json_output_tolerates_non_utf8_paths() {
    use std::ffi::{OsStr, OsString};
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.pdf");
    let b = dir.path().join("b.pdf");
    write_pdf(&a, 1, "a");
    write_pdf(&b, 2, "b");
    let out = dir.path().join(OsStr::from_bytes(b"merged-\xff.pdf"));

    let args: Vec<OsString> = vec![
        "toolbox".into(),
        "--json".into(),
        "merge".into(),
        a.into_os_string(),
        b.into_os_string(),
        "-o".into(),
        out.clone().into_os_string(),
    ];
    let cli = Cli::try_parse_from(args).unwrap();
    let mut printed = Vec::new();
    run(&cli, &Config::default(), &mut printed).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&printed).unwrap();
    assert_eq!(value["pages"], serde_json::json!(3));
    assert!(value["output"].as_str().unwrap().ends_with(".pdf"));
    assert_eq!(labels(&out), vec!["a-1", "b-1", "b-2"]);
}

// ============================================================
// Calculators
// ============================================================

#[test]
fn triangle_both_modes() {
    assert_eq!(text(&["triangle", "--base", "4", "--height", "3"]), "Area: 6.0000\n");
    assert_eq!(
        text(&["triangle", "--sides", "3", "4", "5"]),
        "Area: 6.0000\nPerimeter: 12.0000\n"
    );
    assert!(run_args(&["triangle", "--sides", "1", "1", "5"], &Config::default()).is_err());
}

#[test]
fn exponent_operations() {
    assert_eq!(text(&["exp", "log", "100"]), "2.00000000\n");
    assert_eq!(text(&["exp", "log", "8", "--base", "2"]), "3.00000000\n");
    assert_eq!(text(&["exp", "power", "2", "10"]), "1024.00000000\n");
    assert!(run_args(&["exp", "sqrt", "-4"], &Config::default()).is_err());
}

#[test]
fn stats_summary_text() {
    let printed = text(&["stats", "1,2,3,4,5"]);
    assert!(printed.contains("Mean: 3.0000"));
    assert!(printed.contains("Median: 3.0000"));
    assert!(printed.contains("Variance: 2.0000"));
    assert!(printed.contains("Mode: No mode"));

    let printed = text(&["stats", "2", "4", "4", "6", "8", "8", "8"]);
    assert!(printed.contains("Mode: 8 (appears 3 times)"));

    let printed = text(&["stats", "50 52 53 54 55 200"]);
    assert!(printed.contains("Outliers: 200"));
}

#[test]
fn stats_precision_from_config() {
    let config = Config::from_str("[display]\nstats_precision = 1").unwrap();
    let printed = run_args(&["stats", "1,2"], &config).unwrap();
    assert!(printed.contains("Mean: 1.5\n"));
}

#[test]
fn words_systems_and_currency() {
    assert_eq!(text(&["words", "100000"]), "One Hundred Thousand\n");
    assert_eq!(text(&["words", "100000", "--system", "indian"]), "One Lakh\n");
    assert_eq!(
        text(&["words", "1.05", "--currency"]),
        "One Dollar and Five Cents\n"
    );
    assert_eq!(
        text(&["words", "2", "--currency", "--system", "indian"]),
        "Two Rupees\n"
    );

    let indian = Config::from_str("[words]\nsystem = \"indian\"").unwrap();
    assert_eq!(run_args(&["words", "10000000"], &indian).unwrap(), "One Crore\n");

    assert!(run_args(&["words", "1000000000000000"], &Config::default()).is_err());
}

#[test]
fn random_seeded_and_unique() {
    let first = text(&["random", "--min", "1", "--max", "10", "--count", "10", "--unique", "--sort", "--seed", "3"]);
    assert_eq!(first, "1, 2, 3, 4, 5, 6, 7, 8, 9, 10\n");

    let a = text(&["random", "--min", "1", "--max", "1000", "--count", "5", "--seed", "42"]);
    let b = text(&["random", "--min", "1", "--max", "1000", "--count", "5", "--seed", "42"]);
    assert_eq!(a, b);

    let err = run_args(
        &["random", "--min", "1", "--max", "5", "--count", "6", "--unique"],
        &Config::default(),
    )
    .unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn random_history_is_bounded_by_config() {
    let config = Config::from_str("[random]\nhistory_size = 2").unwrap();
    let printed = run_args(
        &["random", "--min", "1", "--max", "9", "--count", "3", "--runs", "4", "--seed", "1"],
        &config,
    )
    .unwrap();
    assert_eq!(printed.lines().count(), 2);
}

#[test]
fn random_count_limit_from_config() {
    let config = Config::from_str("[random]\nmax_count = 3").unwrap();
    assert!(run_args(&["random", "--min", "1", "--max", "9", "--count", "4"], &config).is_err());
}
