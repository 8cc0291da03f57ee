//! Purpose: `b64img` CLI entry point.
//! Role: Binary crate root; parses args, installs logging, runs one batch conversion.
//! Invariants: Progress notices go to stdout; diagnostics and argument errors go to stderr.
//! Invariants: Exit code is 0 whenever the batch ran, even if individual files failed.
//! Invariants: Only argument errors produce a non-zero exit (via `to_exit_code`).
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Parser, ValueHint, error::ErrorKind as ClapErrorKind};
use tracing_subscriber::EnvFilter;

use b64img::convert::convert_folder;
use b64img::core::error::{Error, ErrorKind, to_exit_code};
use b64img::notice::{ConsoleReporter, NoticeFormat};

const DEFAULT_OUTPUT_DIR: &str = "decoded_images";

#[derive(Parser)]
#[command(
    name = "b64img",
    version,
    about = "Decode base64 images from JSON files into image files.",
    after_help = r#"EXAMPLES
  $ b64img ./responses
  $ b64img ./responses -o ~/Pictures/decoded
  $ RUST_LOG=debug b64img ./responses --json"#
)]
struct Cli {
    #[arg(
        value_name = "INPUT_DIR",
        help = "Folder containing JSON files with base64 images.",
        value_hint = ValueHint::DirPath
    )]
    input_dir: PathBuf,
    #[arg(
        short = 'o',
        long,
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Folder where decoded images will be stored.",
        value_hint = ValueHint::DirPath
    )]
    output_dir: PathBuf,
    #[arg(long, help = "Emit progress notices as JSON lines instead of tagged text")]
    json: bool,
}

fn main() {
    let exit_code = match run() {
        Ok(()) => 0,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<(), Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                return Ok(());
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Try `b64img --help`."));
            }
        },
    };

    init_tracing();

    let format = if cli.json {
        NoticeFormat::Json
    } else {
        NoticeFormat::Human
    };
    let mut reporter = ConsoleReporter::new(io::stdout().lock(), format);
    convert_folder(&cli.input_dir, &cli.output_dir, &mut reporter);
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .try_init();
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

fn emit_error(err: &Error) {
    eprintln!("error: {}", err.cause_text());
    if let Some(hint) = err.hint() {
        eprintln!("hint: {hint}");
    }
}
