//! One-shot stroke risk assessment from a JSON prediction form.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin assess -- --model "Support Vector Machine" [--form <path>] [--pretty]
//! ```
//!
//! The form is read from `--form` or, when omitted, from stdin. Missing form
//! keys take the interactive form's defaults. The assessment is printed as
//! JSON on stdout.
//!
//! Exit codes: `0` success or `--help`, `1` I/O or JSON error, `2` rejected
//! input (bad arguments, invalid field, no model).

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use strokesense::{AssessmentService, HeuristicScorer, ModelVariant, StrokeSenseError};

const EXIT_REJECTED: u8 = 2;

#[derive(Debug, Default)]
struct Args {
    form: Option<PathBuf>,
    model: Option<ModelVariant>,
    pretty: bool,
}

#[derive(Debug)]
enum Command {
    Help,
    Assess(Args),
}

fn usage() -> String {
    let models: Vec<&str> = ModelVariant::ALL.iter().map(|m| m.name()).collect();
    format!(
        "Usage: assess --model <name> [--form <path>] [--pretty]\n  models: {}",
        models.join(", ")
    )
}

fn parse_args<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut parsed = Args::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--form" => {
                let v = args.next().ok_or_else(usage)?;
                parsed.form = Some(PathBuf::from(v));
            }
            "--model" => {
                let v = args.next().ok_or_else(usage)?;
                let model = v
                    .parse::<ModelVariant>()
                    .map_err(|e| format!("{e}\n{}", usage()))?;
                parsed.model = Some(model);
            }
            "--pretty" => parsed.pretty = true,
            "-h" | "--help" => return Ok(Command::Help),
            _ => return Err(usage()),
        }
    }

    Ok(Command::Assess(parsed))
}

fn read_input(path: Option<&PathBuf>) -> Result<String, StrokeSenseError> {
    match path {
        Some(p) => Ok(fs::read_to_string(p)?),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Assess one JSON form and render the result as JSON.
fn run(args: &Args, input: &str) -> Result<String, StrokeSenseError> {
    let form = serde_json::from_str(input)?;
    let service = AssessmentService::new(Arc::new(HeuristicScorer::new()));
    let assessment = service.assess(&form, args.model)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&assessment)?
    } else {
        serde_json::to_string(&assessment)?
    };
    Ok(json)
}

fn exit_code(err: &StrokeSenseError) -> u8 {
    match err {
        StrokeSenseError::InvalidInput(_) | StrokeSenseError::ModelNotSelected => EXIT_REJECTED,
        _ => 1,
    }
}

fn main() -> ExitCode {
    let args = match parse_args(env::args().skip(1)) {
        Ok(Command::Assess(a)) => a,
        Ok(Command::Help) => {
            println!("{}", usage());
            return ExitCode::SUCCESS;
        }
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::from(EXIT_REJECTED);
        }
    };

    match read_input(args.form.as_ref()).and_then(|input| run(&args, &input)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(exit_code(&e))
        }
    }
}
