const DEFAULT_AFTER_HELP: &str = "Refer to the crate's documentation for further help";

pub mod prelude {
    pub use super::{Args, Command};
}

/// CLI surface over a JSON topology document: the external CSV loader this
/// crate deliberately does not own already parsed the three tables into
/// `architecture`/`budgets`/`tasks` arrays nested under one file.
#[derive(clap::Parser, Debug)]
#[command(after_help = DEFAULT_AFTER_HELP)]
pub struct Args {
    /// Quiet mode / Exit code as run result
    ///
    /// When enabled, a zero exit code means every analysed or simulated
    /// core came back fully schedulable, a one means at least one did not,
    /// any other code means an error occurred.
    #[arg(short = 'q', default_value = "false", action = clap::ArgAction::SetTrue)]
    pub quiet: bool,

    /// Topology document (JSON: architecture/budgets/tasks tables)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Static schedulability analysis: core admission plus per-component
    /// RM/EDF tests, run once per core named in the document.
    Analyse,

    /// Discrete-event simulation, run once per core up to `max_sim_time`.
    Simulate {
        /// Simulated-time horizon to run each core for
        #[arg(value_name = "MAX_SIM_TIME")]
        max_sim_time: f64,
    },
}
