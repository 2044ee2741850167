use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;
use kakomon::download::{Artifact, DirectorySink, FileSink};
use kakomon::{json, yomikomi, Error, Question};
use log::{error, info};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "入出力者 (Nyūshutsuryokusha)")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, default_value = "info")]
    log_level: String,
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Turn a JSON question array into a spreadsheet-friendly CSV file
    ExportCsv { json: PathBuf },
    /// Import a CSV file and write it out as a JSON share file
    ShareJson {
        csv: PathBuf,
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Import a CSV file and list what was recovered
    Inspect { csv: PathBuf },
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str())).init();

    if let Err(e) = run(args) {
        error!("{}", format!("{}", e).red());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Error> {
    let today = Utc::now().date_naive();
    let mut sink = DirectorySink::new(&args.out_dir);

    match args.command {
        Commands::ExportCsv { json: json_file } => {
            info!("{}", format!("Reading questions from {:?}", json_file).cyan());
            let questions = json::from_json(&std::fs::read_to_string(&json_file)?)?;
            info!(
                "{}",
                format!("Exporting {} questions to CSV...", questions.len()).blue()
            );
            let path = sink.deliver(&Artifact::csv(&questions, today))?;
            info!("{}", format!("✔ Saved {:?}", path).green());
        }
        Commands::ShareJson { csv, name } => {
            let questions = import(&csv)?;
            let name = name.unwrap_or_else(|| file_stem(&csv));
            let path = sink.deliver(&Artifact::json(&questions, &name, today)?)?;
            info!("{}", format!("✔ Saved {:?}", path).green());
        }
        Commands::Inspect { csv } => {
            let questions = import(&csv)?;
            questions.iter().for_each(|q| info!("{}", summary(q)));
        }
    }
    Ok(())
}

fn import(csv: &Path) -> Result<Vec<Question>, Error> {
    info!("{}", format!("Reading CSV from {:?}", csv).cyan());
    let questions = yomikomi::from_csv(&std::fs::read_to_string(csv)?);
    info!(
        "{}",
        format!("Imported {} questions.", questions.len()).blue()
    );
    Ok(questions)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "questions".to_string())
}

fn summary(q: &Question) -> String {
    let verified = if q.is_verified {
        "✔".green()
    } else {
        "✘".red()
    };
    format!(
        "├ {} {}. {} [{}] ({} choices, answer {}{})",
        verified,
        q.question_number.bold(),
        q.question_text.lines().next().unwrap_or(""),
        q.subject.cyan(),
        q.choices.filled(),
        q.correct_answer,
        q.question_image
            .as_deref()
            .map(|image| format!(", image {}", image))
            .unwrap_or_default()
    )
}
