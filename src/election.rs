use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use voting_rules::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::election::config_reader::*;
use crate::election::io_common::simplify_file_name;

mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;

#[derive(Debug, Snafu)]
pub enum ElectionError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Worksheet {name} not found in {path}"))]
    MissingWorksheet { path: String, name: String },
    #[snafu(display("No worksheet found in {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Line {lineno}: expected a number, found {content}"))]
    WrongCellType { lineno: usize, content: String },
    #[snafu(display("Line {lineno}: missing value in column {column}"))]
    MissingValue { lineno: usize, column: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Invalid JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected a positive integer or a column name"))]
    ParsingJsonNumber {},
    #[snafu(display("Error opening file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Line {lineno}: could not read the line"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Provider {provider} is not supported (csv or excel)"))]
    UnknownProvider { provider: String },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The election could not be decided"))]
    Voting { source: VotingErrors },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ElectionResult<T> = Result<T, ElectionError>;
pub type BElectionResult<T> = Result<T, Box<ElectionError>>;

/// One line of valuations, as read from the input file.
#[derive(PartialEq, Debug, Clone)]
pub struct ParsedRow {
    /// The line in the file, starting at 1.
    pub lineno: usize,
    pub values: Vec<f64>,
}

// Every agent must value every alternative.
fn validate_rows(rows: &[ParsedRow]) -> ElectionResult<Vec<Vec<f64>>> {
    let first = match rows.first() {
        Some(row) => row,
        None => whatever!("No valuations found in the input"),
    };
    for row in rows.iter() {
        if row.values.len() != first.values.len() {
            whatever!(
                "Line {}: found {} values, but line {} has {}",
                row.lineno,
                row.values.len(),
                first.lineno,
                first.values.len()
            );
        }
    }
    Ok(rows.iter().map(|r| r.values.clone()).collect())
}

fn read_valuations(root_path: &Path, source: &ValuationSource) -> BElectionResult<Vec<ParsedRow>> {
    let p: PathBuf = root_path.join(&source.file_path);
    let path = p.as_path().display().to_string();
    info!("Attempting to read valuation file {:?}", path);
    match source.provider.as_str() {
        "csv" => io_csv::read_csv_valuations(&path, source),
        "excel" => io_excel::read_excel_valuations(&path, source),
        x => Err(Box::new(ElectionError::UnknownProvider {
            provider: x.to_string(),
        })),
    }
}

fn infer_provider(path: &str) -> ElectionResult<String> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("csv") => Ok("csv".to_string()),
        Some("xlsx") => Ok("excel".to_string()),
        _ => whatever!(
            "Cannot guess the type of {}, pass it with the input type option",
            path
        ),
    }
}

/// Merges the configuration file (if any) with the command line.
///
/// Returns the configuration and the directory that relative input paths refer to.
fn build_config(args: &Args) -> ElectionResult<(ElectionConfig, PathBuf)> {
    let (mut config, mut root_path) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root_path = Path::new(config_path)
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            (config, root_path)
        }
        None => {
            let input = match &args.input {
                Some(input) => input.clone(),
                None => whatever!("No input given: pass a valuation file or a configuration file"),
            };
            let config = ElectionConfig {
                output_settings: OutputSettings {
                    contest_name: simplify_file_name(&input),
                    output_file: None,
                },
                valuation_source: ValuationSource::new("", &input),
                rules: RuleSettings::default(),
            };
            (config, PathBuf::new())
        }
    };

    // Command line options take precedence over the configuration file.
    if let Some(input) = &args.input {
        config.valuation_source.file_path = input.clone();
        config.valuation_source.provider = String::new();
        root_path = PathBuf::new();
    }
    if let Some(input_type) = &args.input_type {
        config.valuation_source.provider = input_type.clone();
    }
    if config.valuation_source.provider.is_empty() {
        config.valuation_source.provider = infer_provider(&config.valuation_source.file_path)?;
    }
    if args.excel_worksheet_name.is_some() {
        config.valuation_source.excel_worksheet_name = args.excel_worksheet_name.clone();
    }
    if let Some(rule) = &args.rule {
        config.rules.voting_rule = rule.clone();
    }
    if args.tie_break.is_some() {
        config.rules.tiebreak_mode = args.tie_break.clone();
    }
    if args.dictator.is_some() {
        config.rules.dictator = args.dictator;
    }
    if args.score_vector.is_some() {
        config.rules.score_vector = args.score_vector.clone();
    }
    if args.out.is_some() {
        config.output_settings.output_file = args.out.clone();
    }
    if config.rules.voting_rule.trim().is_empty() {
        whatever!("No voting rule given");
    }
    Ok((config, root_path))
}

fn result_stats_to_json(round_stats: &[RoundStats]) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for round_stat in round_stats.iter() {
        let mut tally: JSMap<String, JSValue> = JSMap::new();
        for (alternative, count) in round_stat.tally.iter() {
            tally.insert(alternative.to_string(), json!(count));
        }
        l.push(json!({
            "round": round_stat.round,
            "tally": tally,
            "eliminated": round_stat.eliminated
        }));
    }
    l
}

fn build_summary_js(
    config: &ElectionConfig,
    rule: &VotingRule,
    tie_break: TieBreak,
    values: &[Vec<f64>],
    rv: &VotingResult,
) -> JSValue {
    let c = OutputConfig {
        contest: config.output_settings.contest_name.clone(),
        rule: rule.name().to_string(),
        tie_break: tie_break.to_string(),
        source: simplify_file_name(&config.valuation_source.file_path),
    };
    let mut results: JSMap<String, JSValue> = JSMap::new();
    results.insert("winner".to_string(), json!(rv.winner));
    results.insert("numAgents".to_string(), json!(values.len()));
    results.insert(
        "numAlternatives".to_string(),
        json!(values.first().map(|r| r.len()).unwrap_or(0)),
    );
    if let Some(profile) = &rv.profile {
        let mut prefs: JSMap<String, JSValue> = JSMap::new();
        for (agent, ranking) in profile.iter() {
            prefs.insert(agent.to_string(), json!(ranking));
        }
        results.insert("preferences".to_string(), JSValue::Object(prefs));
    }
    if !rv.round_stats.is_empty() {
        results.insert(
            "rounds".to_string(),
            JSValue::Array(result_stats_to_json(&rv.round_stats)),
        );
    }
    json!({
        "config": c,
        "results": results })
}

/// Runs a complete election: reads the configuration and the valuations, applies the rule and
/// reports the summary.
///
/// If a reference summary is given, the computed summary must match it.
pub fn run_election(args: &Args) -> BElectionResult<JSValue> {
    let (config, root_path) = build_config(args)?;
    info!("config: {:?}", config);

    let (rule, tie_break) = validate_rules(&config.rules)?;

    let rows = read_valuations(&root_path, &config.valuation_source)?;
    let values = validate_rows(&rows)?;
    debug!("run_election: {} rows of valuations", values.len());

    let result = run_rule(&values, &rule, tie_break).context(VotingSnafu {})?;
    info!("result: {:?}", result);

    // Assemble the final json
    let result_js = build_summary_js(&config, &rule, tie_break, &values, &result);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    match config.output_settings.output_file.as_deref() {
        None | Some("") | Some("stdout") => {
            println!("{}", pretty_js_stats);
        }
        Some(out_path) => {
            info!("Writing summary to {}", out_path);
            fs::write(out_path, &pretty_js_stats).context(WritingSummarySnafu { path: out_path })?;
        }
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        let summary_ref = read_summary(summary_p)?;
        debug!("summary: {:?}", summary_ref);
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            return Err(Box::new(ElectionError::ReferenceMismatch {}));
        }
    }

    Ok(result_js)
}

#[cfg(test)]
fn test_data(name: &str) -> String {
    format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), name)
}
