use crate::CLAP_STYLING;
use clap::{ArgAction, arg, command};

fn match_mode_arg() -> clap::Arg {
    arg!(--"match-mode" <MODE>)
        .required(false)
        .help("How site and document boundaries are compared: whole path segments, or raw string prefixes")
        .value_parser(["segment", "prefix"])
        .default_value("segment")
}

fn scheme_detection_arg() -> clap::Arg {
    arg!(--"scheme-detection" <MODE>)
        .required(false)
        .help("How URLs are told apart from paths: a leading scheme, or any colon in the reference")
        .value_parser(["strict", "heuristic"])
        .default_value("strict")
}

fn base_url_arg() -> clap::Arg {
    arg!(-b --"base-url" <URL>)
        .required(false)
        .help("A URL prefix the site is published under. Repeat for equivalent prefixes.")
        .action(ArgAction::Append)
}

fn base_urls_file_arg() -> clap::Arg {
    arg!(-B --"base-urls-file" <PATH>)
        .required(false)
        .help("Path to a newline-delimited file of base site URLs")
}

fn format_arg() -> clap::Arg {
    arg!(-f --"format" <FORMAT>)
        .required(false)
        .help("Output format: text, json")
        .value_parser(["text", "json"])
        .default_value("text")
}

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("locality")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("locality")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress progress and non-essential output")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" "Increase log verbosity (-v debug, -vv trace)")
                .required(false)
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand_required(true)
        .subcommand(
            command!("classify")
                .about("Classify references as intrapage, internal or external to a site")
                .arg(
                    arg!(<REFERENCE> ... "The references (paths or URLs) to classify")
                        .required(true),
                )
                .arg(
                    arg!(-d --"base-dir" <DIR>)
                        .required(false)
                        .help("The site's base directory, for path references"),
                )
                .arg(base_url_arg())
                .arg(base_urls_file_arg())
                .arg(
                    arg!(-p --"source-path" <PATH>)
                        .required(false)
                        .help("Absolute path of the document containing the references"),
                )
                .arg(
                    arg!(-s --"source-url" <URL>)
                        .required(false)
                        .help("URL of the document containing the references"),
                )
                .arg(match_mode_arg())
                .arg(scheme_detection_arg())
                .arg(format_arg()),
        )
        .subcommand(
            command!("scan")
                .about(
                    "Walk a site directory and classify every reference in every document.",
                )
                .arg(
                    arg!(-d --"site-dir" <DIR>)
                        .required(true)
                        .help("The root directory of the site"),
                )
                .arg(base_url_arg())
                .arg(base_urls_file_arg())
                .arg(
                    arg!(-e --"extension" <EXT>)
                        .required(false)
                        .help("Document extensions to scan (default: html, htm, xhtml)")
                        .action(ArgAction::Append),
                )
                .arg(
                    arg!(--"only" <KIND>)
                        .required(false)
                        .help("Only list references of this kind")
                        .value_parser(["intrapage", "internal", "external"]),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)"),
                )
                .arg(match_mode_arg())
                .arg(scheme_detection_arg())
                .arg(format_arg()),
        )
}
