//! End-to-end smoke test: sample descriptions of every diagram family run
//! through decode → render → export.
//!
//! SVG export is asserted unconditionally. PNG export depends on system
//! fonts being present, so a `RasterizationUnavailable` failure skips the
//! PNG assertions rather than failing the suite.

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use vizier_cli::{Args, CliError, ExportStrategy, OutputFormat};

const MINDMAP: &str = r##"{
  "type": "mindmap",
  "title": "Learning Rust",
  "centerNode": {"id": "center", "text": "Rust", "x": 400, "y": 300},
  "nodes": [
    {"id": "1", "text": "Ownership", "x": 200, "y": 200, "parent": "center", "level": 1},
    {"id": "2", "text": "Traits", "x": 600, "y": 200, "parent": "center", "level": 1},
    {"id": "1-1", "text": "Borrowing", "x": 100, "y": 150, "parent": "1", "level": 2}
  ],
  "connections": [
    {"from": "center", "to": "1"},
    {"from": "center", "to": "2"},
    {"from": "1", "to": "1-1"}
  ],
  "style": {"backgroundColor": "#f5f5f5", "nodeColor": "#4a90e2", "lineColor": "#666"}
}"##;

const FLOWCHART: &str = r#"{
  "type": "flowchart",
  "title": "Release process",
  "nodes": [
    {"id": "start", "text": "Start", "type": "start", "x": 400, "y": 50},
    {"id": "build", "text": "Build", "type": "process", "x": 400, "y": 150},
    {"id": "test", "text": "Tests pass?", "type": "decision", "x": 400, "y": 250},
    {"id": "ship", "text": "Ship", "type": "process", "x": 400, "y": 350},
    {"id": "end", "text": "Done", "type": "end", "x": 400, "y": 450}
  ],
  "connections": [
    {"from": "start", "to": "build"},
    {"from": "build", "to": "test"},
    {"from": "test", "to": "ship", "label": "yes"},
    {"from": "ship", "to": "end"}
  ]
}"#;

const TIMELINE: &str = r##"{
  "type": "timeline",
  "title": "Project history",
  "events": [
    {"date": "2021", "title": "Kickoff", "description": "First commit and team assembled"},
    {"date": "2022", "title": "Beta", "description": "Public beta with early adopters"},
    {"date": "2023", "title": "1.0", "description": "General availability"},
    {"date": "2024", "title": "Scale", "description": "Multi-region rollout"}
  ],
  "style": {"lineColor": "#666", "eventColor": "#e74c3c"}
}"##;

const COMPARISON: &str = r##"{
  "type": "comparison",
  "title": "Product face-off",
  "items": [
    {"id": "a", "title": "Product A", "features": [
      {"name": "Performance", "value": "Fast", "score": 9},
      {"name": "Price", "value": "Premium", "score": 6},
      {"name": "Usability", "value": "Simple", "score": 8}
    ]},
    {"id": "b", "title": "Product B", "features": [
      {"name": "Performance", "value": "Average", "score": 7},
      {"name": "Price", "value": "Budget", "score": 9},
      {"name": "Usability", "value": "Cluttered", "score": 5}
    ]}
  ],
  "style": {"primaryColor": "#007bff", "secondaryColor": "#28a745"}
}"##;

const HIERARCHY: &str = r##"{
  "type": "hierarchy",
  "title": "Org chart",
  "nodes": [
    {"id": "ceo", "text": "CEO", "level": 0, "children": ["cto", "cfo"]},
    {"id": "cto", "text": "CTO", "level": 1, "parent": "ceo", "children": ["dev"]},
    {"id": "cfo", "text": "CFO", "level": 1, "parent": "ceo", "children": []},
    {"id": "dev", "text": "Engineering", "level": 2, "parent": "cto", "children": []}
  ],
  "style": {"nodeColor": "#2c3e50", "lineColor": "#666"}
}"##;

const INFOGRAPHIC: &str = r##"{
  "type": "infographic",
  "title": "Annual report",
  "sections": [
    {"type": "header", "content": "2024 in numbers",
     "style": {"backgroundColor": "#e74c3c", "color": "white"}},
    {"type": "stats", "items": [
      {"label": "Users", "value": 120, "unit": "k"},
      {"label": "Uptime", "value": "99.9", "unit": "%"},
      {"label": "Releases", "value": 14}
    ]},
    {"type": "chart", "chartType": "progress", "data": [
      {"label": "Roadmap", "value": 75},
      {"label": "Hiring", "value": 60}
    ]},
    {"type": "text", "content": "A steady year with growth across every metric we track."}
  ],
  "style": {"primaryColor": "#e74c3c", "secondaryColor": "#f8f9fa"}
}"##;

const UNKNOWN: &str = r#"{"type": "wordcloud", "words": ["alpha", "beta", "gamma"]}"#;

fn samples() -> Vec<(&'static str, &'static str)> {
    vec![
        ("mindmap", MINDMAP),
        ("flowchart", FLOWCHART),
        ("timeline", TIMELINE),
        ("comparison", COMPARISON),
        ("hierarchy", HIERARCHY),
        ("infographic", INFOGRAPHIC),
        ("unknown", UNKNOWN),
    ]
}

fn write_sample(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(format!("{name}.json"));
    fs::write(&path, body).expect("Failed to write sample description");
    path.to_string_lossy().to_string()
}

fn args(input: String, output: String, format: OutputFormat, strategy: ExportStrategy) -> Args {
    Args {
        input,
        output: Some(output),
        strategy,
        format,
        log_level: "off".to_string(),
    }
}

/// True when the failure is the documented no-system-fonts condition.
fn is_raster_unavailable(err: &CliError) -> bool {
    matches!(
        err,
        CliError::Export(vizier::export::Error::Raster(
            vizier::export::RasterizationError::Unavailable(_)
        ))
    )
}

#[test]
fn e2e_svg_export_for_all_sample_types() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let mut failures = Vec::new();

    for (name, body) in samples() {
        let input = write_sample(temp_dir.path(), name, body);
        let output = temp_dir
            .path()
            .join(format!("{name}.svg"))
            .to_string_lossy()
            .to_string();

        if let Err(err) = vizier_cli::run(&args(
            input,
            output.clone(),
            OutputFormat::Svg,
            ExportStrategy::Smart,
        )) {
            failures.push((name, err.to_string()));
            continue;
        }

        let markup = fs::read_to_string(&output).expect("Failed to read exported SVG");
        if !markup.contains("<svg") {
            failures.push((name, "output is not SVG markup".to_string()));
        }
    }

    assert!(failures.is_empty(), "SVG export failures: {failures:?}");
}

#[test]
fn e2e_png_smart_export() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    for (name, body) in samples() {
        let input = write_sample(temp_dir.path(), name, body);
        let output = temp_dir
            .path()
            .join(format!("{name}.png"))
            .to_string_lossy()
            .to_string();

        match vizier_cli::run(&args(
            input,
            output.clone(),
            OutputFormat::Png,
            ExportStrategy::Smart,
        )) {
            Ok(()) => {
                let bytes = fs::read(&output).expect("Failed to read exported PNG");
                assert!(!bytes.is_empty(), "{name}: PNG payload is empty");
                assert_eq!(&bytes[1..4], b"PNG", "{name}: missing PNG signature");
            }
            Err(err) if is_raster_unavailable(&err) => {
                eprintln!("skipping PNG assertions for {name}: {err}");
                return;
            }
            Err(err) => panic!("{name}: export failed: {err}"),
        }
    }
}

#[test]
fn e2e_isolated_clone_strategy_for_box_layouts() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    for (name, body) in [("timeline", TIMELINE), ("comparison", COMPARISON)] {
        let input = write_sample(temp_dir.path(), name, body);
        let output = temp_dir
            .path()
            .join(format!("{name}-clone.png"))
            .to_string_lossy()
            .to_string();

        match vizier_cli::run(&args(
            input,
            output.clone(),
            OutputFormat::Png,
            ExportStrategy::Clone,
        )) {
            Ok(()) => {
                let bytes = fs::read(&output).expect("Failed to read exported PNG");
                assert!(!bytes.is_empty());
            }
            Err(err) if is_raster_unavailable(&err) => {
                eprintln!("skipping clone-strategy assertions for {name}: {err}");
                return;
            }
            Err(err) => panic!("{name}: export failed: {err}"),
        }
    }
}

#[test]
fn e2e_vector_strategy_rejects_box_layout_scene() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = write_sample(temp_dir.path(), "timeline-vector", TIMELINE);
    let output = temp_dir
        .path()
        .join("timeline-vector.png")
        .to_string_lossy()
        .to_string();

    let err = vizier_cli::run(&args(
        input,
        output,
        OutputFormat::Png,
        ExportStrategy::Vector,
    ))
    .expect_err("vector strategy cannot export a panel scene");
    assert!(matches!(
        err,
        CliError::Export(vizier::export::Error::NoVectorContent)
    ));
}
