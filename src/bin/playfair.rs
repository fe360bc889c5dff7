//! Playfair CLI - keyed digraph cipher
//!
//! Command-line interface for encoding and decoding text files with a
//! Playfair grid described by a JSON configuration file.

use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{LevelFilter, debug};
use std::error::Error as StdError;
use std::path::{Path, PathBuf};
use std::process;

use playfair::config::{Config, DEFAULT_CONFIG_PATH};
use playfair::file_ops;
use playfair::key::{ConstantKeyReader, KeyReader, ReaderKeyReader, TerminalKeyReader};
use playfair::{ErrorCategory, ErrorKind, PlayfairError, Result};

#[derive(Parser)]
#[command(name = "playfair")]
#[command(version)]
#[command(about = "Playfair digraph cipher.", long_about = None)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(long, global = true, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Read the key from stdin instead of the configuration file
    #[arg(long, global = true, conflicts_with = "prompt_key")]
    key_stdin: bool,

    /// Prompt for the key on the terminal instead of using the configuration file
    #[arg(long, global = true)]
    prompt_key: bool,

    /// Log debug details to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a text file
    #[command(alias = "e")]
    Encode {
        /// Path to the file whose contents is to be encoded
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Path to the file to write the ciphertext to
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Decode a text file
    #[command(alias = "d")]
    Decode {
        /// Path to the file whose contents is to be decoded
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Path to the file to write the recovered plaintext to
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Print the grid built from the configuration
    Grid,

    /// Write a preset configuration file
    InitConfig {
        /// Which preset to write
        #[arg(long, value_enum, default_value = "english")]
        preset: Preset,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    English,
    Russian,
    Classic,
}

impl From<Preset> for Config {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::English => Config::english(),
            Preset::Russian => Config::russian(),
            Preset::Classic => Config::classic(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", error_chain(&e));
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Encode { input, output } => {
            let config = Config::load(&cli.config)?;
            let mut reader = get_key_reader(&config, cli.key_stdin, cli.prompt_key);
            file_ops::encode_file(&input, &output, &config, &mut *reader)
        }
        Commands::Decode { input, output } => {
            let config = Config::load(&cli.config)?;
            let mut reader = get_key_reader(&config, cli.key_stdin, cli.prompt_key);
            file_ops::decode_file(&input, &output, &config, &mut *reader)
        }
        Commands::Grid => {
            let config = Config::load(&cli.config)?;
            let mut reader = get_key_reader(&config, cli.key_stdin, cli.prompt_key);
            let key = reader.read_key()?;
            let grid = config.with_key(key.as_str()).build_grid()?;
            println!("{}", grid.render());
            Ok(())
        }
        Commands::InitConfig { preset, force } => init_config(&cli.config, preset, force),
    }
}

fn init_config(path: &Path, preset: Preset, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(PlayfairError::with_kind(
            ErrorCategory::Config,
            ErrorKind::Io,
            format!("{} already exists; use --force to overwrite", path.display()),
        ));
    }
    debug!("writing {:?} preset to {}", preset, path.display());
    Config::from(preset).save(path)
}

fn get_key_reader(config: &Config, use_stdin: bool, prompt: bool) -> Box<dyn KeyReader> {
    if use_stdin {
        Box::new(ReaderKeyReader::new(Box::new(std::io::stdin())))
    } else if prompt {
        Box::new(TerminalKeyReader::new())
    } else {
        Box::new(ConstantKeyReader::new(config.grid_config.key.clone()))
    }
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format_timestamp(None);
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    let _ = builder.try_init();
}

/// Render an error and its sources as `outer: inner: innermost`.
fn error_chain(err: &dyn StdError) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(e) = source {
        out.push_str(": ");
        out.push_str(&e.to_string());
        source = e.source();
    }
    out
}
