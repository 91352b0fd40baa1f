//! Interactive command
//!
//! Each round tidies the logs directory, asks for a log type and two
//! versions, and prints the comparison. A bad menu entry ends the round
//! with a message; a file that fails to load is reported the same way.
//! End of input ends the loop cleanly.

use super::list::NO_LOGS_MESSAGE;
use super::organize::print_tidy_report;
use logdelta_core::config::Config;
use logdelta_core::loader::LoadOptions;
use logdelta_core::session::CompareSession;
use std::io::{self, BufRead, Write};

type CmdResult<T> = Result<T, Box<dyn std::error::Error>>;

const AGAIN_PROMPT: &str = "\nPress Enter to compare again, or type 'q' to quit: ";

pub fn execute(config: &Config) -> CmdResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(config, stdin.lock(), stdout.lock())
}

/// How a round ended
#[derive(Debug, PartialEq, Eq)]
enum Round {
    Done,
    EndOfInput,
}

/// Run comparison rounds until the user quits or input ends
pub fn run<R: BufRead, W: Write>(config: &Config, mut input: R, mut output: W) -> CmdResult<()> {
    let options = config.load_options()?;

    loop {
        if round(config, &options, &mut input, &mut output)? == Round::EndOfInput {
            break;
        }

        match prompt(AGAIN_PROMPT, &mut input, &mut output)? {
            Some(answer) if answer.trim().eq_ignore_ascii_case("q") => {
                writeln!(output, "Exiting.")?;
                break;
            }
            Some(_) => continue,
            None => break,
        }
    }

    Ok(())
}

fn round<R: BufRead, W: Write>(
    config: &Config,
    options: &LoadOptions,
    input: &mut R,
    output: &mut W,
) -> CmdResult<Round> {
    let (mut session, tidy) = CompareSession::open(&config.logs_dir)?;
    print_tidy_report(&tidy, output)?;

    if session.catalog().is_empty() {
        writeln!(output, "{}", NO_LOGS_MESSAGE)?;
        return Ok(Round::Done);
    }

    writeln!(output, "Available log types:")?;
    for (i, log_type) in session.catalog().log_types().enumerate() {
        writeln!(output, "{}. {}", i + 1, log_type)?;
    }

    let Some(choice) = prompt("\nSelect a log type by number: ", input, output)? else {
        return Ok(Round::EndOfInput);
    };
    let log_type = match session.select_log_type(&choice) {
        Ok(log_type) => log_type.to_string(),
        Err(e) => {
            writeln!(output, "Invalid selection: {}", e)?;
            return Ok(Round::Done);
        }
    };

    writeln!(output, "\nAvailable versions for '{}':", log_type)?;
    for (i, version) in session.versions().iter().enumerate() {
        writeln!(output, "{}. {} - {}", i + 1, version.stamp, version.file_name())?;
    }

    let Some(old_choice) = prompt("\nSelect OLD version number to compare: ", input, output)?
    else {
        return Ok(Round::EndOfInput);
    };
    let Some(new_choice) = prompt("Select NEW version number to compare: ", input, output)? else {
        return Ok(Round::EndOfInput);
    };
    match session.select_versions(&old_choice, &new_choice) {
        Ok((old, new)) => writeln!(
            output,
            "\nLoading files:\n  OLD: {}\n  NEW: {}",
            old.path.display(),
            new.path.display()
        )?,
        Err(e) => {
            writeln!(output, "Invalid version selection: {}", e)?;
            return Ok(Round::Done);
        }
    }

    match session.compare(options) {
        Ok(comparison) => {
            write!(output, "{}", comparison.report(options.delimiter_char()))?;
        }
        Err(e) => writeln!(output, "Error: {}", e)?,
    }
    Ok(Round::Done)
}

/// Write `text`, then read one line; `None` at end of input
fn prompt<R: BufRead, W: Write>(
    text: &str,
    input: &mut R,
    output: &mut W,
) -> CmdResult<Option<String>> {
    write!(output, "{}", text)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(None);
    }
    Ok(Some(line))
}
