// Command-line interface for snippetor
//
// snippetor turns the component instances of a markup file into editor snippets. The engine lives in
// the snippetor-engine crate; this binary resolves configuration, reads the target file, runs the
// engine and writes the snippet file. It is the on-demand trigger: run it after editing the
// pattern file (or hook it into a save/watch tool of your choice).
//
// Usage:
//  snippetor [--workspace <dir>] [--config <file>] [extract flags]   - Extract and write snippets (default)
//  snippetor extract [--selector <css>] [--class <name>]... [--stdout] - Same as above (explicit)
//  snippetor list                                                   - Print the snippet names only
//  snippetor generate-default-config                                - Print the built-in configuration
//
// Configuration layers, lowest to highest: built-in defaults, <workspace>/snippetor.toml,
// --config <file>, command-line flags.

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use snippetor::{extract_snippets, publish, PublishArtifact, PublishSpec, SnippetTable};
use snippetor_config::{ConfigError, Loader, SnippetorConfig};
use std::fs;
use std::path::{Path, PathBuf};

fn target_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("selector")
            .long("selector")
            .short('s')
            .value_name("CSS")
            .help("CSS selector for the parts to extract (overrides target.selector)")
            .value_hint(ValueHint::Other),
    )
    .arg(
        Arg::new("class")
            .long("class")
            .short('c')
            .value_name("NAME")
            .help("Class name marking a part; repeat to require several (overrides target.classes)")
            .action(ArgAction::Append)
            .value_hint(ValueHint::Other),
    )
    .arg(
        Arg::new("file")
            .long("file")
            .short('f')
            .value_name("PATH")
            .help("Markup file to read, relative to the workspace (overrides target.file)")
            .value_hint(ValueHint::FilePath),
    )
    .arg(
        Arg::new("prefix")
            .long("prefix")
            .short('p')
            .help("Namespace prepended to every snippet name as '<prefix>:'")
            .value_hint(ValueHint::Other),
    )
}

fn build_cli() -> Command {
    Command::new("snippetor")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Turn the parts of a markup file into editor snippets")
        .long_about(
            "snippetor selects component instances in a markup file with a CSS selector,\n\
            renders each one as an indented template and writes them all as a named\n\
            snippet file for the editor.\n\n\
            Names follow the part's classes: the first part with class 'card card--featured'\n\
            becomes 'card-01--featured', the next 'card' becomes 'card-02'.\n\n\
            Examples:\n  \
            snippetor --class card                         # Write .vscode/html.code-snippets\n  \
            snippetor extract --selector '.card' --stdout  # Print the JSON instead\n  \
            snippetor list --class card                    # Show the names that would be produced\n  \
            snippetor generate-default-config > snippetor.toml",
        )
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a snippetor.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("workspace")
                .long("workspace")
                .short('w')
                .value_name("DIR")
                .help("Workspace root (defaults to the current directory)")
                .value_hint(ValueHint::DirPath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log output (-v debug, -vv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            target_args(
                Command::new("extract")
                    .about("Extract snippets and write the snippet file (default command)"),
            )
            .arg(
                Arg::new("output")
                    .long("output")
                    .short('o')
                    .value_name("PATH")
                    .help("Snippet file to write, relative to the workspace (overrides snippets.output)")
                    .value_hint(ValueHint::FilePath),
            )
            .arg(
                Arg::new("mode")
                    .long("mode")
                    .short('m')
                    .help("How part bodies are rendered")
                    .long_help(
                        "How part bodies are rendered.\n\n\
                        structural: rebuild the markup with one indent unit per nesting level\n\
                        verbatim:   keep the part's inner markup as written, dedented",
                    )
                    .value_parser(clap::builder::PossibleValuesParser::new([
                        "structural",
                        "verbatim",
                    ])),
            )
            .arg(
                Arg::new("no-escape")
                    .long("no-escape")
                    .help("Leave '$' variable references unescaped")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("stdout")
                    .long("stdout")
                    .help("Print the snippet JSON instead of writing the snippet file")
                    .action(ArgAction::SetTrue),
            ),
        )
        .subcommand(target_args(
            Command::new("list").about("Print the snippet names in document order"),
        ))
        .subcommand(
            Command::new("generate-default-config")
                .about("Output the built-in configuration")
                .long_about(
                    "Outputs the default snippetor.toml with every setting and its default.\n\n\
                    Examples:\n  \
                    snippetor generate-default-config > snippetor.toml",
                ),
        )
}

/// Parse `args`, running `extract` when no command is named.
fn parse_with_default_command(cli: Command, args: &[String]) -> Result<ArgMatches, clap::Error> {
    let asks_for_info = args.get(1).is_some_and(|first| first == "help")
        || args
            .iter()
            .skip(1)
            .any(|arg| matches!(arg.as_str(), "-h" | "--help" | "-V" | "--version"));
    if asks_for_info {
        return cli.try_get_matches_from(args);
    }

    if let Ok(matches) = cli.clone().try_get_matches_from(args) {
        if matches.subcommand_name().is_some() {
            return Ok(matches);
        }
    }

    let mut injected = Vec::with_capacity(args.len() + 1);
    injected.extend(args.first().cloned());
    injected.push("extract".to_string());
    injected.extend(args.iter().skip(1).cloned());
    cli.try_get_matches_from(injected)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let matches = parse_with_default_command(build_cli(), &args).unwrap_or_else(|e| e.exit());

    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("generate-default-config", _)) => {
            print!("{}", snippetor_config::default_toml());
        }
        Some(("extract", sub_matches)) => {
            let workspace = resolve_workspace(&matches);
            let config = load_cli_config(&workspace, &matches, sub_matches);
            handle_extract_command(&workspace, &config, sub_matches.get_flag("stdout"));
        }
        Some(("list", sub_matches)) => {
            let workspace = resolve_workspace(&matches);
            let config = load_cli_config(&workspace, &matches, sub_matches);
            handle_list_command(&workspace, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn log_level(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn init_logging(verbosity: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbosity > 0 {
        builder.filter_level(log_level(verbosity));
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn resolve_workspace(matches: &ArgMatches) -> PathBuf {
    let workspace = matches
        .get_one::<String>("workspace")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    if !workspace.is_dir() {
        eprintln!(
            "Error: workspace '{}' is not a directory",
            workspace.display()
        );
        std::process::exit(1);
    }
    workspace
}

fn load_cli_config(workspace: &Path, matches: &ArgMatches, sub_matches: &ArgMatches) -> SnippetorConfig {
    let explicit = matches.get_one::<String>("config").map(|s| s.as_str());
    config_from_args(workspace, explicit, sub_matches).unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Layer workspace config, the explicit `--config` file and flag overrides.
fn config_from_args(
    workspace: &Path,
    explicit_path: Option<&str>,
    sub_matches: &ArgMatches,
) -> Result<SnippetorConfig, ConfigError> {
    let loader = Loader::new().with_workspace(workspace);
    let mut loader = match explicit_path {
        Some(path) => loader.with_file(path),
        None => loader,
    };

    let flag = |name: &str| -> Option<String> {
        sub_matches
            .try_get_one::<String>(name)
            .ok()
            .flatten()
            .cloned()
    };

    let classes: Vec<String> = sub_matches
        .get_many::<String>("class")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    if let Some(selector) = flag("selector") {
        loader = loader.set_override("target.selector", selector)?;
    } else if !classes.is_empty() {
        // Classes from the command line beat a selector from a config file.
        loader = loader.set_override("target.selector", "")?;
    }
    if !classes.is_empty() {
        loader = loader.set_override("target.classes", classes)?;
    }
    if let Some(file) = flag("file") {
        loader = loader.set_override("target.file", file)?;
    }
    if let Some(prefix) = flag("prefix") {
        loader = loader.set_override("snippets.prefix", prefix)?;
    }
    if let Some(output) = flag("output") {
        loader = loader.set_override("snippets.output", output)?;
    }
    if let Some(mode) = flag("mode") {
        loader = loader.set_override("render.mode", mode)?;
    }
    if matches!(sub_matches.try_get_one::<bool>("no-escape"), Ok(Some(true))) {
        loader = loader.set_override("render.escape_sigils", false)?;
    }

    loader.build()
}

/// Read the target file and run the engine over it.
fn run_extraction(workspace: &Path, config: &SnippetorConfig) -> SnippetTable {
    let options = config.extract_options().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
    let target = config.target_file().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let path = workspace.join(target);
    let source = fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {e}", path.display());
        std::process::exit(1);
    });

    extract_snippets(&source, &options).unwrap_or_else(|e| {
        eprintln!("Extraction error: {e}");
        std::process::exit(1);
    })
}

/// Handle the extract command
fn handle_extract_command(workspace: &Path, config: &SnippetorConfig, to_stdout: bool) {
    let table = run_extraction(workspace, config);

    let spec = PublishSpec::new(workspace);
    let spec = match (to_stdout, config.snippets.output.trim()) {
        (true, _) => spec,
        (false, "") => spec.to_default_file(),
        (false, output) => spec.with_output_path(output),
    };

    let result = publish(&table, &spec).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    match result.artifact {
        PublishArtifact::InMemory(json) => println!("{json}"),
        PublishArtifact::File { display_path, .. } => {
            println!(
                "Registered {} snippets to {display_path}",
                result.snippet_count
            );
        }
    }
}

/// Handle the list command
fn handle_list_command(workspace: &Path, config: &SnippetorConfig) {
    let table = run_extraction(workspace, config);
    for name in table.names() {
        println!("{name}");
    }
}
