use colored::Colorize;
use locality::commands::command_argument_builder;
use locality::handlers::{handle_classify, handle_scan, init_logging};

fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    init_logging(chosen_command.get_count("verbose"), quiet);

    let outcome = match chosen_command.subcommand() {
        Some(("classify", primary_command)) => handle_classify(primary_command),
        Some(("scan", primary_command)) => handle_scan(primary_command, quiet).map(|_| 0),
        _ => unreachable!("clap should ensure we don't get here"),
    };

    match outcome {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}
