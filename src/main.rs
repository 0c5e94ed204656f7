//! RareDex CLI
//!
//! Command-line interface for RareDex:
//! - Run the guided symptom interview
//! - Analyze a free-text symptom description
//! - Browse conditions, disease statistics, categories and resources
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use raredex::catalog::{self, DiseaseStats};
use raredex::conditions::{analyze_text, ConditionCategory, ConditionTable, Vocabulary};
use raredex::config::{generate_default_config, Config, LoggingConfig};
use raredex::interview::{Intake, InterviewSession, Interviewer, NoDelay, Speaker, TurnOutcome};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "raredex")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rare disease information hub with a guided symptom interview")]
#[command(long_about = "RareDex walks you through a short symptom interview and suggests a \
possible condition.\nThis is not a medical diagnosis.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations, then environment)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format for listings
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the guided symptom interview
    Interview {
        /// Main complaint to start from (e.g., "joint pain")
        #[arg(long)]
        complaint: Option<String>,
        /// Severity of the complaint
        #[arg(long, default_value = "mild", requires = "complaint")]
        severity: String,
        /// Skip the pause before the diagnosis
        #[arg(long)]
        no_delay: bool,
        /// Write the finished session as JSON
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Analyze a free-text symptom description
    Analyze {
        /// Description of symptoms
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// List the conditions the interview scores against
    Conditions {
        /// Only rare or only common conditions
        #[arg(long)]
        category: Option<ConditionCategory>,
    },

    /// Show disease statistics
    Stats {
        /// Disease name (default: list all)
        disease: Option<String>,
    },

    /// Browse diseases by category
    Diseases {
        /// Category name (Neurological, Autoimmune, Genetic, Metabolic)
        #[arg(long)]
        category: Option<String>,
    },

    /// List support and research resources
    Resources {
        /// Only resources with this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };
    init_logging(&config.logging)?;

    tracing::debug!("RareDex v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Interview {
            complaint,
            severity,
            no_delay,
            export,
        } => {
            let mut interviewer = Interviewer::new(config.interview.clone());
            if no_delay {
                interviewer = interviewer.with_delay(Arc::new(NoDelay));
            }
            let intake = complaint.map(|c| Intake::new(c, severity));
            run_interview(&interviewer, intake, export).await?;
        }

        Commands::Analyze { text } => {
            let table = ConditionTable::standard();
            let vocabulary = Vocabulary::from_table(&table);
            let analysis = analyze_text(&text.join(" "), &table, &vocabulary);

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
                OutputFormat::Csv => {
                    let mut writer = csv::Writer::from_writer(std::io::stdout());
                    writer.write_record(["condition", "category", "confidence", "band"])?;
                    for c in &analysis.possible_conditions {
                        writer.write_record([
                            c.name.clone(),
                            c.category.to_string(),
                            format!("{:.1}", c.confidence),
                            c.band.to_string(),
                        ])?;
                    }
                    writer.flush()?;
                }
                OutputFormat::Table => {
                    if analysis.key_symptoms.is_empty() {
                        println!("Key symptoms: none recognized");
                    } else {
                        println!("Key symptoms: {}", analysis.key_symptoms.join(", "));
                    }
                    println!();
                    if !analysis.is_empty() {
                        println!("{:<28} {:<8} {:>10}  {}", "Condition", "Type", "Confidence", "Band");
                        println!("{}", "-".repeat(60));
                        for c in &analysis.possible_conditions {
                            println!(
                                "{:<28} {:<8} {:>9.1}%  {}",
                                c.name, c.category, c.confidence, c.band
                            );
                        }
                        println!();
                    }
                    println!("{}", analysis.recommendation);
                    println!();
                    println!("{}", raredex::interview::DISCLAIMER);
                }
            }
        }

        Commands::Conditions { category } => {
            let table = ConditionTable::standard();
            let conditions = match category {
                Some(category) => table.by_category(category),
                None => table.all(),
            };

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&conditions)?),
                OutputFormat::Csv => {
                    let mut writer = csv::Writer::from_writer(std::io::stdout());
                    writer.write_record(["name", "category", "symptoms"])?;
                    for c in &conditions {
                        writer.write_record([
                            c.name.clone(),
                            c.category.to_string(),
                            c.canonical_symptoms.join("; "),
                        ])?;
                    }
                    writer.flush()?;
                }
                OutputFormat::Table => {
                    println!("{:<24} {:<8} {}", "Name", "Type", "Symptoms");
                    println!("{}", "-".repeat(80));
                    for c in &conditions {
                        println!(
                            "{:<24} {:<8} {}",
                            c.name,
                            c.category,
                            c.canonical_symptoms.join(", ")
                        );
                    }
                }
            }
        }

        Commands::Stats { disease } => match disease {
            Some(name) => {
                let stats = catalog::find_stats(&name)?;
                match cli.format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(stats)?),
                    OutputFormat::Csv => print_stats_csv(stats)?,
                    OutputFormat::Table => print_stats(stats),
                }
            }
            None => {
                let all = catalog::disease_stats();
                match cli.format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(all)?),
                    OutputFormat::Csv => {
                        let mut writer = csv::Writer::from_writer(std::io::stdout());
                        writer.write_record(["name", "prevalence"])?;
                        for s in all {
                            writer.write_record([s.name, s.prevalence])?;
                        }
                        writer.flush()?;
                    }
                    OutputFormat::Table => {
                        println!("{:<24} {}", "Disease", "Prevalence");
                        println!("{}", "-".repeat(60));
                        for s in all {
                            println!("{:<24} {}", s.name, s.prevalence);
                        }
                    }
                }
            }
        },

        Commands::Diseases { category } => {
            let categories = match category {
                Some(name) => vec![catalog::find_category(&name)?],
                None => catalog::disease_categories().iter().collect(),
            };

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&categories)?),
                OutputFormat::Csv => {
                    let mut writer = csv::Writer::from_writer(std::io::stdout());
                    writer.write_record(["category", "disease"])?;
                    for c in &categories {
                        for d in c.diseases {
                            writer.write_record([c.name, *d])?;
                        }
                    }
                    writer.flush()?;
                }
                OutputFormat::Table => {
                    for c in &categories {
                        println!("{}", c.name);
                        for d in c.diseases {
                            println!("  - {}", d);
                        }
                        println!();
                    }
                }
            }
        }

        Commands::Resources { tag } => {
            let resources: Vec<&catalog::Resource> = match &tag {
                Some(tag) => catalog::resources_tagged(tag),
                None => catalog::resources().iter().collect(),
            };

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resources)?),
                OutputFormat::Csv => {
                    let mut writer = csv::Writer::from_writer(std::io::stdout());
                    writer.write_record(["title", "type", "url", "tags"])?;
                    for r in &resources {
                        writer.write_record([
                            r.title.to_string(),
                            r.resource_type.to_string(),
                            r.url.to_string(),
                            r.tags.join("; "),
                        ])?;
                    }
                    writer.flush()?;
                }
                OutputFormat::Table => {
                    if resources.is_empty() {
                        println!("No resources found.");
                    }
                    for r in &resources {
                        println!("{} [{}]", r.title, r.resource_type);
                        println!("  {}", r.description);
                        println!("  {}", r.url);
                        println!("  Tags: {}", r.tags.join(", "));
                        println!();
                    }
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Initialize tracing from the logging config; `RUST_LOG` wins when set
fn init_logging(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("raredex={}", logging.level).into());

    let writer = match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path))?;
            BoxMakeWriter::new(std::sync::Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(writer))
            .init();
    }

    Ok(())
}

async fn run_interview(
    interviewer: &Interviewer,
    intake: Option<Intake>,
    export: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut session = match intake {
        Some(intake) => interviewer.start_with_intake(intake),
        None => interviewer.start(),
    };

    println!("RareDex symptom interview (type 'quit' to leave)");
    println!();
    let mut shown = print_bot_turns(&session, 0);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !session.is_complete() {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }

        if interviewer.submit(&mut session, &line)? == TurnOutcome::AwaitingEvaluation {
            // Show the "reviewing" message before the pause
            shown = print_bot_turns(&session, shown);
            interviewer.conclude(&mut session).await?;
        }
        shown = print_bot_turns(&session, shown);
    }

    if !session.is_complete() {
        tracing::info!(session_id = %session.id(), phase = %session.phase(), "Interview abandoned");
    }

    if let Some(path) = export {
        let file = std::fs::File::create(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, &session)?;
        println!("Session written to {}", path.display());
    }

    Ok(())
}

/// Print bot turns appended since `from`; returns the new transcript length
fn print_bot_turns(session: &InterviewSession, from: usize) -> usize {
    for turn in session.transcript().since(from) {
        if turn.speaker == Speaker::Bot {
            println!("{}", turn);
        }
    }
    session.transcript().len()
}

fn print_stats(stats: &DiseaseStats) {
    println!("{}", stats.name);
    let categories = catalog::categories_of(stats.name);
    if !categories.is_empty() {
        println!("Category: {}", categories.join(", "));
    }
    println!("{}", stats.description);
    println!();
    println!("Prevalence: {}", stats.prevalence);
    println!();
    println!("Age distribution:");
    for bucket in stats.demographics {
        println!(
            "  {:<6} {:>3}% {}",
            bucket.age,
            bucket.count,
            "#".repeat((bucket.count / 2) as usize)
        );
    }
    println!();
    println!("Common symptoms:");
    for symptom in stats.symptoms {
        println!(
            "  {:<26} {:>3}% {}",
            symptom.name,
            symptom.percentage,
            "#".repeat((symptom.percentage / 4) as usize)
        );
    }
}

fn print_stats_csv(stats: &DiseaseStats) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record(["kind", "label", "value"])?;
    for bucket in stats.demographics {
        writer.write_record(["age", bucket.age, bucket.count.to_string().as_str()])?;
    }
    for symptom in stats.symptoms {
        writer.write_record([
            "symptom",
            symptom.name,
            symptom.percentage.to_string().as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
