use crate::prelude::*;
use hss_sim::prelude::*;

pub mod prelude {
    pub use super::args::prelude::*;
    pub use super::document::prelude::*;
}

pub mod args;
pub mod document;

fn main() {
    let args = match <Args as clap::Parser>::try_parse() {
        Ok(args) => args,
        Err(err) => {
            use clap::error::ErrorKind::*;

            let exit_code = match err.kind() {
                DisplayHelp |
                DisplayHelpOnMissingArgumentOrSubcommand |
                DisplayVersion => 0,
                _ => 2,
            };

            err.print().unwrap();
            std::process::exit(exit_code);
        },
    };

    let quiet = args.quiet;
    match main_wo_exit_code(args) {
        Ok(success) => {
            if quiet {
                if success {
                    std::process::exit(0);
                } else {
                    std::process::exit(1);
                }
            }
        },
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        },
    };
}

/// Runs `args.command` over every core named in the topology document's
/// architecture table, printing one JSON result object per core. The
/// returned bool is the "success" the `-q` exit code reports: every core
/// fully schedulable (admitted, with every component/task schedulable).
fn main_wo_exit_code(args: Args) -> Result<bool, Box<dyn std::error::Error>> {
    let document = load_document(&args.input)?;

    let mut overall_success = true;

    for core_row in &document.architecture {
        let topology = Topology::build(
            &document.architecture,
            &document.budgets,
            &document.tasks,
            &core_row.core_id,
        ).map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            format!("core '{}' failed validation:\n  {}", core_row.core_id, messages.join("\n  "))
        })?;

        match &args.command {
            Command::Analyse => {
                let result = analyse_core(&topology);
                overall_success &= result.core_admitted
                    && result.components.iter().all(|c| c.schedulable);
                print_result(&core_row.core_id, &result)?;
            }
            Command::Simulate { max_sim_time } => {
                let report = Simulation::new(topology, Time::new(*max_sim_time)).run()?;
                overall_success &= report.tasks.iter().all(|t| t.task_schedulable);
                print_result(&core_row.core_id, &report)?;
            }
        }
    }

    Ok(overall_success)
}

#[derive(serde::Serialize)]
struct CoreResult<'a, T: serde::Serialize> {
    core_id: &'a str,
    result: &'a T,
}

fn print_result(core_id: &str, result: &impl serde::Serialize) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(&CoreResult { core_id, result })?);
    Ok(())
}
