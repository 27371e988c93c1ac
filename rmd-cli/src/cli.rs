// Command definition for rmd, shared by the binary and build.rs (shell completions).
//
// build.rs pulls this file in with include!, so it may only depend on clap.

use clap::{Arg, ArgAction, Command, ValueHint};

pub fn build_cli() -> Command {
    Command::new("rmd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert R Markdown documents to Jupyter notebooks and reports")
        .long_about(
            "rmd converts R Markdown (.Rmd) documents into Jupyter notebooks that run\n\
            with the SoS kernel, one cell per chunk and prose block, each code cell\n\
            tagged with the kernel of its knitr engine.\n\n\
            Examples:\n  \
            rmd analysis.Rmd                         # Notebook JSON to stdout\n  \
            rmd analysis.Rmd -o analysis.ipynb       # Write the notebook\n  \
            rmd analysis.Rmd -o out.ipynb --execute  # Execute with papermill first\n  \
            rmd analysis.Rmd -o report.html          # Render an HTML report\n  \
            rmd analysis.Rmd --to html --view        # Open the report in a browser",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an rmd.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log more (-v for progress, -vv for debugging)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert an R Markdown document (default command)")
                .long_about(
                    "Convert an R Markdown document to a notebook or an HTML report.\n\n\
                    Supported targets:\n  \
                    - ipynb: Jupyter notebook for the SoS kernel (.ipynb)\n  \
                    - html:  report rendered by jupyter nbconvert (.html)\n\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\
                    Execution needs papermill with the SoS engine; reports need jupyter.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input .Rmd file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (detected from the output extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("execute")
                        .long("execute")
                        .help("Execute the notebook with papermill (SoS engine) before writing it")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("template")
                        .long("template")
                        .help("nbconvert template for HTML reports (e.g. sos-report)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("view")
                        .long("view")
                        .help("Open the HTML report in a browser instead of printing it")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("collapse-single-kernel")
                        .long("collapse-single-kernel")
                        .help("Write an R notebook instead of a SoS one when only R is used")
                        .action(ArgAction::SetTrue),
                ),
        )
}
