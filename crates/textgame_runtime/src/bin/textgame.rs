//! textgame CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use log::{LevelFilter, info};
use textgame_engine::Game;
use textgame_runtime::{GameConfig, Repl, StateBuilder, load_game, load_resources};

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    world: Option<PathBuf>,
    settings: Option<PathBuf>,
    seed: Option<u64>,
    load: Option<PathBuf>,
    verbose: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn value_of(args: &[String], i: usize, flag: &str) -> Result<String, Box<dyn std::error::Error>> {
    args.get(i)
        .cloned()
        .ok_or_else(|| format!("{flag} requires a value").into())
}

fn parse_args(args: &[String]) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-v" | "--verbose" => config.verbose = true,
            "--world" => {
                i += 1;
                config.world = Some(PathBuf::from(value_of(args, i, "--world")?));
            }
            "--settings" => {
                i += 1;
                config.settings = Some(PathBuf::from(value_of(args, i, "--settings")?));
            }
            "--load" => {
                i += 1;
                config.load = Some(PathBuf::from(value_of(args, i, "--load")?));
            }
            "--seed" => {
                i += 1;
                let value = value_of(args, i, "--seed")?;
                config.seed = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid --seed value: {value}"))?,
                );
            }
            arg => return Err(format!("unknown option: {arg}").into()),
        }
        i += 1;
    }

    Ok(config)
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });
    // RUST_LOG overrides the default level
    builder.parse_default_env();
    builder.init();
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_args(&args)?;

    if cli.show_help {
        print_help();
        return Ok(());
    }

    if cli.show_version {
        println!("textgame {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_logging(cli.verbose);

    let Some(world) = cli.world else {
        return Err("--world is required, see --help".into());
    };

    let mut config = match &cli.settings {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    let registries = config.registries();
    let resources = load_resources(&world)?;
    let mut state = StateBuilder::new()
        .with_seed(config.seed())
        .build_resources(&resources, &registries.behaviours)?;
    config.apply(&mut state);
    info!("loaded world from {}", world.display());

    let mut game = Game::new(state, registries);
    if let Some(path) = &cli.load {
        load_game(&mut game, path)?;
    }

    let mut repl = Repl::new(game)?;
    repl.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mtextgame\x1b[0m - Play a text adventure

\x1b[1mUSAGE:\x1b[0m
    textgame --world <DIR> [OPTIONS]

\x1b[1mOPTIONS:\x1b[0m
    --world <DIR>       Directory with rooms.json, items.json, creatures.json
    --settings <FILE>   JSON settings file
    --seed <N>          Seed of the random source
    --load <FILE>       Resume a saved game
    -v, --verbose       Log debug output (RUST_LOG overrides)
    -h, --help          Print help information
    -V, --version       Print version information

\x1b[1mIN THE GAME:\x1b[0m
    save <FILE>         Save the game
    load <FILE>         Load a saved game
    Ctrl+D              Quit"
    );
}
