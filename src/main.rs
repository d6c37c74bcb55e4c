mod catalog;
mod labels;
mod normalize;
mod parser;
mod record;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use catalog::Catalog;
use labels::{FieldId, LabelTable, Lang};
use record::ParseOutcome;

/// Pages are parsed in parallel within a chunk and merged in input order.
const PAGE_CHUNK: usize = 200;

#[derive(Parser)]
#[command(name = "syllabus_scraper", about = "Course syllabus extractor for saved portal pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse saved syllabus pages and write <out-dir>/<year>-<lang>.json
    Parse {
        /// Page responses, one course page per file (partial-response XML or HTML)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Academic year used for the output file name (default: current year)
        #[arg(short, long)]
        year: Option<i32>,
        /// Language the pages were rendered in
        #[arg(short, long, value_enum, default_value_t = Lang::Ja)]
        lang: Lang,
        /// Output directory
        #[arg(short, long, default_value = catalog::DEFAULT_OUT_DIR)]
        out_dir: PathBuf,
        /// Merge into an existing output file instead of replacing it
        #[arg(long)]
        append: bool,
    },
    /// Parse one page and print the result as JSON
    Inspect {
        file: PathBuf,
    },
    /// Print the label table
    Labels {
        /// Only show labels of this language
        #[arg(short, long, value_enum)]
        lang: Option<Lang>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let labels = LabelTable::new();

    let result = match cli.command {
        Commands::Parse {
            files,
            year,
            lang,
            out_dir,
            append,
        } => {
            let year = year.unwrap_or_else(|| chrono::Local::now().year());
            let path = catalog::output_path(&out_dir, year, lang);

            let mut catalog = if append && path.exists() {
                Catalog::load_json(&path)?
            } else {
                Catalog::new()
            };
            let existing = catalog.len();

            println!("Parsing {} pages ({}-{})...", files.len(), year, lang);
            let counts = process_files(&files, &labels, &mut catalog);
            catalog.write_json(&path)?;

            counts.print();
            if catalog.is_empty() {
                warn!("No course records were stored");
            }
            println!(
                "Wrote {} courses ({} new) to {}",
                catalog.len(),
                catalog.len().saturating_sub(existing),
                path.display()
            );
            Ok(())
        }
        Commands::Inspect { file } => {
            let outcome = parse_file(&file, &labels)?;
            if outcome.class_code().is_none() {
                warn!(
                    class_name = outcome.record().class_name().unwrap_or("-"),
                    "No class code found in {}",
                    file.display()
                );
            }
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(())
        }
        Commands::Labels { lang } => {
            for &id in FieldId::ALL {
                match lang {
                    Some(lang) => println!("{:<28} {}", id, labels.label(id, lang)),
                    None => {
                        let [ja, en] = id.labels();
                        println!("{:<28} {} | {}", id, ja, en);
                    }
                }
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

struct ParseCounts {
    pages: usize,
    stored: usize,
    unkeyed: usize,
    failed: usize,
}

impl ParseCounts {
    fn print(&self) {
        println!(
            "Parsed {} pages: {} stored, {} without class code, {} failed.",
            self.pages, self.stored, self.unkeyed, self.failed,
        );
    }
}

fn parse_file(path: &Path, labels: &LabelTable) -> Result<ParseOutcome> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parser::process_page(&raw, labels).with_context(|| format!("Failed to parse {}", path.display()))
}

fn process_files(files: &[PathBuf], labels: &LabelTable, catalog: &mut Catalog) -> ParseCounts {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let mut counts = ParseCounts {
        pages: 0,
        stored: 0,
        unkeyed: 0,
        failed: 0,
    };

    for chunk in files.chunks(PAGE_CHUNK) {
        let results: Vec<_> = chunk
            .par_iter()
            .map(|path| parse_file(path, labels))
            .collect();

        for (path, result) in chunk.iter().zip(results) {
            counts.pages += 1;
            match result {
                Ok(outcome) => {
                    if catalog.absorb(outcome) {
                        counts.stored += 1;
                    } else {
                        warn!("No class code in {}", path.display());
                    }
                }
                Err(e) => {
                    counts.failed += 1;
                    warn!("{:#}", e);
                }
            }
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    counts.unkeyed = catalog.unkeyed();
    info!(
        pages = counts.pages,
        stored = counts.stored,
        unkeyed = counts.unkeyed,
        failed = counts.failed,
        "Parse run finished"
    );
    counts
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
