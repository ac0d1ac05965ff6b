//! Registrar CLI - validate university data files and print summaries
//!
//! # Commands
//!
//! ```bash
//! registrar report ./stevens           # Print major/student/instructor tables
//! registrar report ./stevens --json    # Same summaries as JSON
//! registrar check ./stevens            # Validate only, print table counts
//! registrar prompt                     # Loop reading directories from stdin
//! ```

use clap::{Parser, Subcommand};
use registrar::{RepositoryError, University, UniversityReport};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "registrar")]
#[command(about = "Validate university data files and derive student progress", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the repository and print the summary tables
    Report {
        /// Directory holding majors.txt, students.txt, instructors.txt, grades.txt
        directory: PathBuf,

        /// Emit the summaries as JSON instead of text tables
        #[arg(long)]
        json: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a data directory and print table counts
    Check {
        /// Directory holding the four data files
        directory: PathBuf,
    },

    /// Prompt for data directories on stdin, printing a report for each
    Prompt,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Report {
            directory,
            json,
            output,
        } => cmd_report(&directory, json, output.as_deref()),

        Commands::Check { directory } => cmd_check(&directory),

        Commands::Prompt => cmd_prompt(),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_report(
    directory: &Path,
    json: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Loading repository: {}", directory.display());

    let university = University::from_directory(directory)?;
    eprintln!(
        "✅ Loaded {} majors, {} students, {} instructors, {} courses",
        university.majors().len(),
        university.students().len(),
        university.instructors().len(),
        university.courses().len(),
    );

    let report = UniversityReport::build(&university);
    let rendered = if json {
        serde_json::to_string_pretty(&report)?
    } else {
        report.render()
    };
    write_output(&rendered, output)?;

    Ok(())
}

fn cmd_check(directory: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("✔️  Checking: {}", directory.display());

    match University::from_directory(directory) {
        Ok(university) => {
            eprintln!(
                "✅ All files consistent: {} majors, {} students, {} instructors, {} courses",
                university.majors().len(),
                university.students().len(),
                university.instructors().len(),
                university.courses().len(),
            );
            Ok(())
        }
        Err(RepositoryError::Setup(e)) => Err(format!("setup failure: {}", e).into()),
        Err(RepositoryError::Content(e)) => Err(format!("data failure: {}", e).into()),
    }
}

/// Read directories from stdin until end of input, printing a report for
/// each. Repository errors (both kinds) are printed and the loop keeps
/// going; unrelated I/O errors propagate and terminate.
fn cmd_prompt() -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        eprint!("Enter university data directory: ");
        io::stderr().flush()?;

        let Some(line) = lines.next() else {
            eprintln!();
            return Ok(());
        };
        let directory = line?;
        let directory = directory.trim();
        if directory.is_empty() {
            continue;
        }

        match University::from_directory(directory) {
            Ok(university) => {
                println!("{}", UniversityReport::build(&university).render());
            }
            Err(e) => eprintln!("❌ {}", e),
        }
    }
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
