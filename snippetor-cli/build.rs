use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree in src/main.rs
// Build scripts can't access src/ modules, so the shape is repeated here
fn target_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("selector")
            .long("selector")
            .short('s')
            .help("CSS selector for the parts to extract")
            .value_hint(ValueHint::Other),
    )
    .arg(
        Arg::new("class")
            .long("class")
            .short('c')
            .help("Class name marking a part")
            .action(ArgAction::Append)
            .value_hint(ValueHint::Other),
    )
    .arg(
        Arg::new("file")
            .long("file")
            .short('f')
            .help("Markup file to read")
            .value_hint(ValueHint::FilePath),
    )
    .arg(
        Arg::new("prefix")
            .long("prefix")
            .short('p')
            .help("Namespace for snippet names")
            .value_hint(ValueHint::Other),
    )
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("snippetor")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Turn the parts of a markup file into editor snippets")
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a snippetor.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("workspace")
                .long("workspace")
                .short('w')
                .help("Workspace root")
                .value_hint(ValueHint::DirPath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            target_args(Command::new("extract").about("Extract snippets"))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .short('m')
                        .value_parser(clap::builder::PossibleValuesParser::new([
                            "structural",
                            "verbatim",
                        ])),
                )
                .arg(
                    Arg::new("no-escape")
                        .long("no-escape")
                        .action(ArgAction::SetTrue),
                )
                .arg(Arg::new("stdout").long("stdout").action(ArgAction::SetTrue)),
        )
        .subcommand(target_args(
            Command::new("list").about("Print the snippet names"),
        ))
        .subcommand(
            Command::new("generate-default-config").about("Output the built-in configuration"),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "snippetor", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "snippetor", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "snippetor", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
