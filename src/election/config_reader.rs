use crate::election::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: String,
    /// A file path, or 'stdout'.
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    pub rule: String,
    #[serde(rename = "tieBreak")]
    pub tie_break: String,
    pub source: String,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ValuationSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "firstValueRowIndex")]
    _first_value_row_index: Option<JSValue>,
    #[serde(rename = "firstValueColumnIndex")]
    _first_value_column_index: Option<JSValue>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl ValuationSource {
    pub fn new(provider: &str, file_path: &str) -> ValuationSource {
        ValuationSource {
            provider: provider.to_string(),
            file_path: file_path.to_string(),
            _first_value_row_index: None,
            _first_value_column_index: None,
            excel_worksheet_name: None,
        }
    }

    /// The first row holding valuations, starting at 0.
    pub fn first_value_row_index(&self) -> ElectionResult<usize> {
        read_js_index(&self._first_value_row_index)
    }

    /// The first column holding valuations, starting at 0.
    pub fn first_value_column_index(&self) -> ElectionResult<usize> {
        read_js_index(&self._first_value_column_index)
    }
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct RuleSettings {
    #[serde(rename = "votingRule")]
    pub voting_rule: String,
    #[serde(rename = "tiebreakMode")]
    pub tiebreak_mode: Option<String>,
    pub dictator: Option<u32>,
    #[serde(rename = "scoreVector")]
    pub score_vector: Option<Vec<f64>>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "valuationSource")]
    pub valuation_source: ValuationSource,
    pub rules: RuleSettings,
}

pub fn read_config(path: &str) -> ElectionResult<ElectionConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: ElectionConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> ElectionResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

// 1-based indexes in the configuration, 0-based in the program. Missing means the first one.
fn read_js_index(x: &Option<JSValue>) -> ElectionResult<usize> {
    let idx = match x {
        None | Some(JSValue::Null) => 1,
        Some(JSValue::Number(n)) => n
            .as_u64()
            .map(|x| x as usize)
            .context(ParsingJsonNumberSnafu {})?,
        // Excel-style columns: A, B, ..., Z, AA, ...
        Some(JSValue::String(s)) if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) => {
            s.to_ascii_lowercase()
                .chars()
                .try_fold(0usize, |acc, c| {
                    acc.checked_mul(26)?
                        .checked_add(c as usize - 'a' as usize + 1)
                })
                .context(ParsingJsonNumberSnafu {})?
        }
        Some(JSValue::String(s)) => s
            .trim()
            .parse::<usize>()
            .ok()
            .context(ParsingJsonNumberSnafu {})?,
        _ => None.context(ParsingJsonNumberSnafu {})?,
    };
    if idx == 0 {
        whatever!("Indexes start at 1, got 0");
    }
    Ok(idx - 1)
}

/// Maps the textual rule settings to the rule and tie-break of the library.
pub fn validate_rules(rules: &RuleSettings) -> ElectionResult<(VotingRule, TieBreak)> {
    let rule = match rules.voting_rule.trim().to_lowercase().as_str() {
        "dictatorship" => match rules.dictator {
            Some(agent) => VotingRule::Dictatorship(agent),
            None => whatever!("The dictatorship rule needs a dictator"),
        },
        "scoring" => match rules.score_vector.clone() {
            Some(v) if v.iter().any(|x| !x.is_finite()) => {
                whatever!("The score vector must only hold finite numbers: {:?}", v)
            }
            Some(v) if !v.is_empty() => VotingRule::Scoring(v),
            _ => whatever!("The scoring rule needs a score vector"),
        },
        "plurality" => VotingRule::Plurality,
        "veto" => VotingRule::Veto,
        "borda" => VotingRule::Borda,
        "harmonic" => VotingRule::Harmonic,
        "stv" => VotingRule::Stv,
        "range" | "range_voting" => VotingRule::RangeVoting,
        x => whatever!("Cannot use voting rule {:?}: unknown rule", x),
    };
    let tie_break: TieBreak = rules
        .tiebreak_mode
        .as_deref()
        .unwrap_or("max")
        .parse()
        .context(VotingSnafu {})?;
    Ok((rule, tie_break))
}
