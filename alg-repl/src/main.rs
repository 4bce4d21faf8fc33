mod error;
mod session;

use log::{debug, warn};
use rustyline::{error::ReadlineError, DefaultEditor};
use session::Session;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::{fs, io::{self, IsTerminal, Read}, process::ExitCode};

/// The environment variable that sets the log level, such as `ALG_LOG=debug`.
const LOG_VAR: &str = "ALG_LOG";

/// Installs the terminal logger at the level given by [`LOG_VAR`], or `warn` if it is not set.
fn init_logger() {
    let level = std::env::var(LOG_VAR).ok()
        .and_then(|value| value.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);

    if let Err(err) = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("could not install logger: {}", err);
    }
}

/// Processes one line and prints the result, or reports the error to stderr. Returns false if
/// the line failed.
fn run_line(session: &mut Session, line: &str) -> bool {
    match session.process(line) {
        Ok(out) => {
            if !out.is_empty() {
                println!("{}", out);
            }
            true
        },
        Err(err) => {
            error::report_to_stderr(&err, line);
            false
        },
    }
}

/// Runs every line of the input as if it were typed into the REPL.
fn run_script(input: &str) -> ExitCode {
    let mut session = Session::new();
    let failed = input.lines()
        .filter(|line| !run_line(&mut session, line))
        .count();
    debug!("script finished with {} failed lines", failed);

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> ExitCode {
    init_logger();

    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run source file
        match fs::read_to_string(&filename) {
            Ok(input) => run_script(&input),
            Err(err) => {
                eprintln!("could not read `{}`: {}", filename, err);
                ExitCode::FAILURE
            },
        }
    } else if !io::stdin().is_terminal() {
        // read source from stdin
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("could not read stdin: {}", err);
            return ExitCode::FAILURE;
        }
        run_script(&input)
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                return ExitCode::FAILURE;
            },
        };
        let mut session = Session::new();

        fn process_line(rl: &mut DefaultEditor, session: &mut Session) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            run_line(session, &input);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, &mut session) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => warn!("{}", err),
                }
                break;
            }
        }
        ExitCode::SUCCESS
    }
}
