//! Command-line front end: analyze, cypher, and decypher modes.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use stegwave::{analysis, stego, WindowType};

#[derive(Parser)]
#[command(name = "stegwave")]
#[command(about = "Spectral analysis and steganography for mono 16-bit PCM WAV files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report the dominant frequencies of a carrier file
    Analyze {
        /// Input WAV file to analyze
        input: PathBuf,

        /// Number of top frequencies to display
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,

        /// Window applied before the transform
        #[arg(long, value_enum, default_value_t = WindowChoice::Hamming)]
        window: WindowChoice,
    },

    /// Hide a message in a carrier file
    Cypher {
        /// Input WAV file used as the carrier
        input: PathBuf,

        /// Output WAV file with the embedded message
        output: PathBuf,

        /// Message to hide (uppercase letters, digits, basic punctuation;
        /// at most 255 characters)
        message: String,
    },

    /// Look for a hidden message in a carrier file
    Decypher {
        /// Input WAV file to scan
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum WindowChoice {
    Hamming,
    Hann,
    Blackman,
    None,
}

impl From<WindowChoice> for Option<WindowType> {
    fn from(choice: WindowChoice) -> Self {
        match choice {
            WindowChoice::Hamming => Some(WindowType::Hamming),
            WindowChoice::Hann => Some(WindowType::Hann),
            WindowChoice::Blackman => Some(WindowType::Blackman),
            WindowChoice::None => None,
        }
    }
}

fn ensure_input_file(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("input file '{}' does not exist", path.display());
    }
    if path.is_dir() {
        bail!("input file '{}' is a directory, not a file", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            input,
            count,
            window,
        } => {
            ensure_input_file(&input)?;
            let report = analysis::analyze_file(&input, count as usize, window.into())
                .with_context(|| format!("failed to analyze '{}'", input.display()))?;
            print!("{report}");
        }

        Command::Cypher {
            input,
            output,
            message,
        } => {
            ensure_input_file(&input)?;
            stego::cypher_file(&input, &output, &message)
                .with_context(|| format!("failed to embed message into '{}'", input.display()))?;
            println!("Message embedded into '{}'", output.display());
        }

        Command::Decypher { input } => {
            ensure_input_file(&input)?;
            let found = stego::decypher_file(&input)
                .with_context(|| format!("failed to scan '{}'", input.display()))?;
            match found {
                Some(message) => {
                    println!("Message length: {}", message.length);
                    println!(
                        "Detected characters: {}",
                        message.characters.iter().collect::<String>()
                    );
                }
                None => println!("No hidden message detected"),
            }
        }
    }

    Ok(())
}
