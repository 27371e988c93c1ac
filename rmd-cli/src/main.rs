// Command-line interface for rmd
//
// This binary converts R Markdown documents into Jupyter notebooks for the SoS kernel, and
// from there into HTML reports. The conversion itself lives in the rmd-babel crate; this crate
// only maps flags and configuration onto a conversion request.
//
// Converting:
//
// The target format comes from --to, else from the output file extension, else from the
// configuration (`convert.to`, "ipynb" by default).
// Usage:
//  rmd <input> [--to <format>] [-o <file>] [--execute]          - Convert (default)
//  rmd convert <input> [--to <format>] [-o <file>] [--execute]  - Same as above (explicit)
//  rmd <input> --to html [--template <name>] [--view]           - Render a report
//  rmd --list-formats                                           - List available formats
//
// Configuration:
//
// Defaults are layered with ./rmd.toml and --config <file>; flags win over both.

use clap::error::ErrorKind;
use clap::ArgMatches;
use log::{info, LevelFilter};
use rmd_babel::publish::{convert_file, ConvertRequest, PublishArtifact};
use rmd_babel::FormatRegistry;
use rmd_config::{Loader, RmdConfig, PROJECT_CONFIG_FILE};
use std::path::{Path, PathBuf};

mod cli;

use cli::build_cli;

const SUBCOMMANDS: &[&str] = &["convert", "help"];

/// Parse `args`, treating a leading file argument as an implicit `convert`.
fn parse_args(args: &[String]) -> Result<ArgMatches, clap::Error> {
    let cli = build_cli();
    match cli.clone().try_get_matches_from(args) {
        Ok(matches) => Ok(matches),
        Err(err) => {
            let displays_info = matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            );
            let names_subcommand = args
                .iter()
                .skip(1)
                .any(|arg| SUBCOMMANDS.contains(&arg.as_str()));
            if displays_info || names_subcommand || args.len() < 2 {
                return Err(err);
            }
            let mut with_convert = vec![args[0].clone(), "convert".to_string()];
            with_convert.extend_from_slice(&args[1..]);
            cli.try_get_matches_from(&with_convert)
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let matches = parse_args(&args).unwrap_or_else(|e| e.exit());

    init_logging(matches.get_count("verbose"));

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let request = convert_request(sub_matches, &config);
            handle_convert_command(&request);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbosity: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match verbosity {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Info);
        }
        _ => {
            builder.filter_level(LevelFilter::Debug);
        }
    }
    builder.format_timestamp(None).init();
}

/// Merge flags over configuration into a conversion request.
fn convert_request(matches: &ArgMatches, config: &RmdConfig) -> ConvertRequest {
    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    let output = matches.get_one::<String>("output").map(PathBuf::from);
    let to = matches
        .get_one::<String>("to")
        .cloned()
        .or_else(|| configured_target(output.as_deref(), config));
    let template = matches
        .get_one::<String>("template")
        .map(|t| t.to_string())
        .or_else(|| config.convert.html.template().map(str::to_string))
        .filter(|t| !t.is_empty());

    ConvertRequest {
        input: PathBuf::from(input),
        output,
        to,
        execute: matches.get_flag("execute") || config.convert.execute,
        collapse_single_kernel: matches.get_flag("collapse-single-kernel")
            || config.notebook.collapse_single_kernel,
        template,
        view: matches.get_flag("view") || config.convert.html.view,
    }
}

/// The configured target, used only when the output extension does not name a format.
fn configured_target(output: Option<&Path>, config: &RmdConfig) -> Option<String> {
    let registry = FormatRegistry::default();
    let detected = output
        .and_then(|path| path.to_str())
        .and_then(|name| registry.detect_format_from_filename(name))
        .filter(|name| {
            registry
                .get(name)
                .map(|f| f.supports_serialization())
                .unwrap_or(false)
        });
    match detected {
        Some(_) => None,
        None => Some(config.convert.to.clone()),
    }
}

fn handle_convert_command(request: &ConvertRequest) {
    let result = convert_file(request).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    match result.artifact {
        PublishArtifact::InMemory(text) => print!("{text}"),
        PublishArtifact::File(path) => info!("Output written to {}", path.display()),
        PublishArtifact::Viewed(path) => info!("Report opened from {}", path.display()),
    }
}

fn handle_list_formats_command() {
    println!("Available formats:\n");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        if let Ok(format) = registry.get(&format_name) {
            let direction = match (format.supports_parsing(), format.supports_serialization()) {
                (true, true) => "in/out",
                (true, false) => "in",
                (false, true) => "out",
                (false, false) => "-",
            };
            println!(
                "  {format_name:<10} {direction:<7} {}",
                format.description()
            );
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> RmdConfig {
    let loader = Loader::new().with_optional_file(PROJECT_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
