use clap::Parser;

/// This is a competitor positioning program for consulting firms.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON session file: input table, edits to apply, outputs and notes.
    /// See the manual of the firm_positioning crate for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The table of firms. Setting this option overrides the source that may be
    /// specified with the --config option. Defaults to firms.csv.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or xlsx) The type of the input. By default, it is guessed from the file extension.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use. Defaults to the first one.
    #[clap(long, value_parser)]
    pub worksheet: Option<String>,

    /// (file path, 'stdout' or empty) Where to write the JSON report. Standard output by default.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) If specified, the firms and their derived columns are exported in CSV to this location.
    #[clap(short, long, value_parser)]
    pub export: Option<String>,

    /// (file path) If specified, the notes of the session are written to this location.
    #[clap(long, value_parser)]
    pub notes_out: Option<String>,

    /// (file path) A reference CSV export. If provided, compmap will check that the exported
    /// CSV matches the reference and print the differences otherwise.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
