use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tasar::aggregate::{aggregate_runs, CiMethod};
use tasar::cli::{Cli, OutputFormat};
use tasar::csv_output::{AggregateCsvOutput, ScoreCsvOutput};
use tasar::error::AnalysisError;
use tasar::experiment::ExperimentDir;
use tasar::html_output::{HtmlReport, ReportStyle};
use tasar::json_output::JsonAnalysis;
use tasar::platform::platform_label;
use tasar::report::{extract_records, MetricRecord};
use tasar::score::{render_summary, score_records};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Read and extract every report file, in the order given on the command
/// line. An input with no well-formed blocks is a hard error.
fn load_runs(inputs: &[PathBuf]) -> Result<Vec<HashMap<String, MetricRecord>>> {
    let mut runs = Vec::with_capacity(inputs.len());
    for input in inputs {
        let text = fs::read_to_string(input)
            .with_context(|| format!("failed to read report {}", input.display()))?;
        let records = extract_records(&text);
        if records.is_empty() {
            return Err(AnalysisError::NoBlocksFound)
                .with_context(|| format!("no valid data in {}", input.display()));
        }
        println!(
            "Parsed {} test cases from {}",
            records.len(),
            input.display()
        );
        runs.push(records);
    }
    Ok(runs)
}

/// Single-run pipeline: score, archive, emit CSV/JSON and HTML, print the
/// ranked summary
fn analyze_single_run(args: &Cli, records: &HashMap<String, MetricRecord>) -> Result<()> {
    let scores = score_records(records)?;
    let experiment = ExperimentDir::create(&args.result_dir)?;
    let mut generated = Vec::new();

    if !args.no_archive {
        experiment.archive_raw_input(&args.inputs[0], None)?;
        generated.push(format!("benchmark_raw_{}.txt", experiment.timestamp()));
    }

    let analysis_path = match args.format {
        OutputFormat::Csv => experiment.file(&args.output.to_string_lossy()),
        OutputFormat::Json => experiment.file(
            &args
                .output
                .with_extension("json")
                .to_string_lossy(),
        ),
    };
    let analysis = match args.format {
        OutputFormat::Csv => ScoreCsvOutput::new(records, &scores).to_csv(),
        OutputFormat::Json => JsonAnalysis::new(platform_label(), records, &scores)
            .to_json()
            .context("failed to serialize analysis to JSON")?,
    };
    fs::write(&analysis_path, analysis)
        .with_context(|| format!("failed to write {}", analysis_path.display()))?;
    generated.push(file_name(&analysis_path));
    println!("Result exported to: {}", analysis_path.display());

    if !args.no_html {
        let html = HtmlReport::new(ReportStyle::default()).to_html(
            records,
            &scores,
            &platform_label(),
        );
        let html_path = experiment.file(&format!("rt_analysis_{}.html", experiment.timestamp()));
        fs::write(&html_path, html)
            .with_context(|| format!("failed to write {}", html_path.display()))?;
        generated.push(file_name(&html_path));
        println!("Report saved to: {}", html_path.display());
    }

    experiment.write_info(&args.inputs, records.len(), &generated)?;
    print!("{}", render_summary(records, &scores));
    println!("\nExperiment completed. All files saved to: {}", experiment.path().display());

    Ok(())
}

/// Multi-run pipeline: aggregate across runs and emit the aggregate CSV
fn aggregate_multi_run(
    args: &Cli,
    runs: &[HashMap<String, MetricRecord>],
    method: CiMethod,
) -> Result<()> {
    let aggregated = aggregate_runs(runs, method)?;
    let experiment = ExperimentDir::create(&args.result_dir)?;
    let mut generated = Vec::new();

    if !args.no_archive {
        for (index, input) in args.inputs.iter().enumerate() {
            experiment.archive_raw_input(input, Some(index))?;
            generated.push(format!(
                "benchmark_raw_{}_{}.txt",
                experiment.timestamp(),
                index + 1
            ));
        }
    }

    let csv_path = experiment.file(&args.output.to_string_lossy());
    let csv = AggregateCsvOutput::new(&aggregated, method).to_csv();
    fs::write(&csv_path, csv)
        .with_context(|| format!("failed to write {}", csv_path.display()))?;
    generated.push(file_name(&csv_path));

    experiment.write_info(&args.inputs, aggregated.len(), &generated)?;
    println!(
        "Aggregated {} test cases across {} runs (CI method: {})",
        aggregated.len(),
        runs.len(),
        method.label()
    );
    println!("Result exported to: {}", csv_path.display());
    println!("Experiment completed. All files saved to: {}", experiment.path().display());

    Ok(())
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    let runs = load_runs(&args.inputs)?;

    if runs.len() == 1 {
        analyze_single_run(&args, &runs[0])?;
    } else {
        let method = args.resolve_ci_method();
        aggregate_multi_run(&args, &runs, method)?;
    }

    Ok(())
}
