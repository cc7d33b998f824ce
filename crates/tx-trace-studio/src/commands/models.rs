use std::path::PathBuf;

/// Arguments for the replay command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReplayArgs {
    /// Recorded execution stream (JSON)
    pub input: PathBuf,

    /// JSON-lines trace store to append to
    pub output: PathBuf,

    /// Optional trace configuration file (TOML)
    pub config: Option<PathBuf>,

    /// Override for the session depth bound
    pub max_depth: Option<usize>,

    /// Omit the function trace from stored records
    pub no_function_trace: bool,

    /// Omit classification columns from event and transfer traces
    pub no_tags: bool,

    /// Print a human-readable summary to the terminal
    pub print_summary: bool,
}

impl Default for ReplayArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::from("artifacts/traces.jsonl"),
            config: None,
            max_depth: None,
            no_function_trace: false,
            no_tags: false,
            print_summary: false,
        }
    }
}
