use std::{fs::read_to_string, path::PathBuf, process::exit, rc::Rc, time::Instant};

use clap::Parser;
use log::info;
use quack::{
    display_error, errors::errors::Error, lexer::lexer::tokenize, parser::parser::parse,
    type_checker::{report::Report, type_checker::type_check},
};

#[derive(Parser)]
#[command(name = "quack", version, about = "Type inference and checking for Quack programs")]
struct Cli {
    /// Quack source file to check
    file: PathBuf,
    /// Print the inferred tables as JSON
    #[arg(long)]
    json: bool,
    /// Print nothing on success
    #[arg(long)]
    quiet: bool,
}

fn analyse(source: &str, file_name: &str) -> Result<Report, Error> {
    let start = Instant::now();
    let tokens = tokenize(source.to_string(), Some(file_name.to_string()))?;
    info!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let program = parse(tokens, Rc::new(file_name.to_string()))?;
    info!("Parsed in {:?}", parse_start.elapsed());

    let check_start = Instant::now();
    let analysis = type_check(&program)?;
    info!("Type checked in {:?}", check_start.elapsed());

    info!("Total time: {:?}", start.elapsed());
    Ok(analysis.report())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.display().to_string());

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: could not read {}: {}", cli.file.display(), error);
            exit(1);
        }
    };

    let report = match analyse(&source, &file_name) {
        Ok(report) => report,
        Err(error) => {
            display_error(&error, &file_name, &source);
            exit(1);
        }
    };

    if cli.quiet {
        return;
    }

    if cli.json {
        match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(error) => {
                eprintln!("Error: could not serialize report: {}", error);
                exit(1);
            }
        }
    } else {
        print!("{}", report);
    }
}
