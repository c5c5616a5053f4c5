use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cohort;
mod models;
mod quiz;
mod report;
mod store;

use models::{CohortFilter, Track};

#[derive(Parser)]
#[command(name = "careerlaunch-insights")]
#[command(version)]
#[command(about = "Cohort analytics and skills-check scoring for CareerLaunch", long_about = None)]
struct Cli {
    /// Student data file; the built-in demo cohort is used when absent
    #[arg(long, global = true, default_value = "students.json")]
    data: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the built-in demo cohort to the data file
    Seed,
    /// Import student rows from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Print the skills-check question bank
    Questions,
    /// Score a skills-check answer file and print the recommendation
    Score {
        /// JSON map of question-id to selected option index
        #[arg(long)]
        answers: PathBuf,
    },
    /// Print cohort KPIs, breakdowns and risk flags
    Analytics {
        #[arg(long)]
        track: Option<Track>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, default_value_t = cohort::DEFAULT_BENCHMARK)]
        benchmark: i32,
    },
    /// Generate a markdown report
    Report {
        #[arg(long)]
        track: Option<Track>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, default_value_t = cohort::DEFAULT_BENCHMARK)]
        benchmark: i32,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Seed => {
            let students = store::demo_students();
            store::save_students(&cli.data, &students)?;
            println!(
                "Wrote {} demo students to {}.",
                students.len(),
                cli.data.display()
            );
        }
        Commands::Import { csv } => {
            let mut students = store::load_students(&cli.data)?;
            let applied = store::import_csv(&csv, &mut students)?;
            store::save_students(&cli.data, &students)?;
            println!("Applied {applied} rows from {}.", csv.display());
        }
        Commands::Questions => {
            let questions = quiz::question_bank();
            for (number, question) in questions.iter().enumerate() {
                println!("{}. {} [{}]", number + 1, question.title, question.id);
                if let Some(help) = question.help {
                    println!("   ({help})");
                }
                for (index, option) in question.options.iter().enumerate() {
                    println!("   {index}: {}", option.label);
                }
            }
        }
        Commands::Score { answers } => {
            let answers = store::load_answers(&answers)?;
            let questions = quiz::question_bank();
            let result = quiz::score(&questions, &answers);

            println!("Best-fit track: {}", result.top_track.label());
            println!();
            println!("Track fit leaderboard:");
            for row in &result.leaderboard {
                println!(
                    "- {:<20} {:>3}%",
                    row.track.label(),
                    (row.score * 100.0).round() as i32
                );
            }
            println!();
            println!("Your strengths:");
            for strength in &result.strengths {
                println!("- {strength}");
            }
            println!();
            println!("Suggested starter projects:");
            for project in &result.suggestions.projects {
                println!("- {project}");
            }
            println!();
            println!("Next 2 weeks of checkpoints:");
            for checkpoint in &result.suggestions.checkpoints {
                println!("- {checkpoint}");
            }
        }
        Commands::Analytics {
            track,
            year,
            benchmark,
        } => {
            let students = store::load_students(&cli.data)?;
            let filter = CohortFilter {
                track,
                graduation_year: year,
            };
            let view = cohort::aggregate(&students, filter, benchmark);
            let summary = &view.summary;

            println!("Cohort: {} students", summary.total);
            println!(
                "Employment rate (6-mo): {}% ({:+}% vs {}% benchmark)",
                summary.employment_rate, summary.rate_delta, benchmark
            );
            println!("Average progress: {}%", summary.avg_progress);
            println!("Employment outcomes:");
            for (status, count) in view.employment.rows() {
                println!("- {}: {}", status.label(), count);
            }
            println!("Completion by career path:");
            if view.completion.is_empty() {
                println!("- no students in scope");
            }
            for row in &view.completion {
                println!("- {}: {}% complete", row.label, row.completed);
            }
            println!(
                "At-risk: {} | Stagnating: {}",
                view.at_risk.len(),
                view.stagnating.len()
            );
            for student in view.at_risk.iter().take(10) {
                println!("- at-risk: {} ({}% progress)", student.name, student.progress);
            }
            for student in view.stagnating.iter().take(10) {
                println!("- stagnating: {} ({}% progress)", student.name, student.progress);
            }
        }
        Commands::Report {
            track,
            year,
            benchmark,
            out,
        } => {
            let students = store::load_students(&cli.data)?;
            let filter = CohortFilter {
                track,
                graduation_year: year,
            };
            let view = cohort::aggregate(&students, filter, benchmark);
            let rendered = report::build_report(&view, filter, benchmark);
            std::fs::write(&out, rendered)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
