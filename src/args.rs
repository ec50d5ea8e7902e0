use clap::Parser;

/// This program computes the winner of an election under classical voting rules.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file containing the election description in JSON.
    /// The command line options below override the values of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing the outcome of an election in JSON format. If provided, vrules will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the election will be written in JSON format to the given
    /// location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) The file containing the valuation matrix: one row per agent, one column per alternative.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or excel) The type of the input. If not specified, it is guessed from the extension of the file.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// The voting rule: dictatorship, scoring, plurality, veto, borda, harmonic, stv or range.
    #[clap(long, value_parser)]
    pub rule: Option<String>,

    /// (default max) The tie-breaking mode: max, min or the number of an agent.
    #[clap(long, value_parser)]
    pub tie_break: Option<String>,

    /// The agent that decides for the dictatorship rule.
    #[clap(long, value_parser)]
    pub dictator: Option<u32>,

    /// (comma-separated numbers) The points for every position in a ranking, for the scoring rule.
    #[clap(long, value_parser, value_delimiter = ',')]
    pub score_vector: Option<Vec<f64>>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
