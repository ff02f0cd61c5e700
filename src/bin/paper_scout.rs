#![forbid(unsafe_code)]

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use paper_scout::gateway::TracingUsageSink;
use paper_scout::present::{render_log, render_log_entry, render_progress, render_report};
use paper_scout::{LogEntry, Pipeline, RunObserver, RunResult, Session, Settings, Stage};

#[derive(Parser)]
#[command(
    name = "paper-scout",
    version,
    about = "Search → filter → summarize → compare research papers"
)]
struct Cli {
    /// Increase diagnostic output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline once and print the report
    Run {
        /// Research topic
        #[arg(long, default_value = paper_scout::DEFAULT_TOPIC)]
        topic: String,

        /// Model ID (overrides PAPER_SCOUT_MODEL)
        #[arg(long)]
        model: Option<String>,

        /// Also write the run result as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Prompt for topics and run the pipeline repeatedly
    ///
    /// Enter a topic to start a run, or press enter to rerun the current one.
    /// Commands: :clear, :logs, :show, :help, :quit
    Interactive {
        /// Initial topic
        #[arg(long, default_value = paper_scout::DEFAULT_TOPIC)]
        topic: String,

        /// Model ID (overrides PAPER_SCOUT_MODEL)
        #[arg(long)]
        model: Option<String>,
    },
    /// Render a saved run result (from `run --json`)
    Render {
        #[arg(long)]
        input: PathBuf,
    },
}

/// Streams log entries and summary progress to stderr as they happen.
struct TerminalObserver;

impl RunObserver for TerminalObserver {
    fn on_log(&self, entry: &LogEntry) {
        eprintln!("{}", render_log_entry(entry));
    }

    fn on_progress(&self, stage: Stage, fraction: Option<f32>) {
        if stage != Stage::Summarize {
            return;
        }
        match fraction {
            Some(f) => {
                eprint!("\r  summarizing {}", render_progress(f, 30));
                let _ = io::stderr().flush();
            }
            None => eprintln!(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run { topic, model, json } => {
            let pipeline = build_pipeline(model)?;
            let mut session = Session::new(topic);
            let result = session.start_run(&pipeline, &TerminalObserver).await?;

            println!("{}", render_report(result));
            if let Some(path) = json {
                write_json(&path, result)?;
                eprintln!("[paper-scout] result written to {}", path.display());
            }
        }
        Commands::Interactive { topic, model } => {
            let pipeline = build_pipeline(model)?;
            interactive(&pipeline, Session::new(topic)).await?;
        }
        Commands::Render { input } => {
            let raw = std::fs::read_to_string(&input)?;
            let result: RunResult = serde_json::from_str(&raw)?;
            println!("{}", render_report(&result));
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn build_pipeline(model: Option<String>) -> Result<Pipeline, Box<dyn std::error::Error>> {
    let mut settings = Settings::from_env()?;
    if let Some(model) = model {
        settings.model = model;
    }
    Ok(settings.build_pipeline(Arc::new(TracingUsageSink))?)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), io::Error> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)
}

async fn interactive(pipeline: &Pipeline, mut session: Session) -> Result<(), io::Error> {
    println!("paper-scout ({}), type :help for commands", pipeline.model_id());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("topic [{}]> ", session.topic());
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        match line {
            ":quit" | ":q" | ":exit" => break,
            ":help" => {
                println!("  <text>   set the topic and start a run");
                println!("  <enter>  rerun the current topic");
                println!("  :clear   clear the agent logs");
                println!("  :logs    show the agent logs");
                println!("  :show    show the last result");
                println!("  :quit    exit");
            }
            ":clear" => {
                session.clear_logs();
                println!("Logs cleared.");
            }
            ":logs" => print!("{}", render_log(session.logs())),
            ":show" => match session.last_result() {
                Some(result) => println!("{}", render_report(result)),
                None => println!("No results yet."),
            },
            _ => {
                if !line.is_empty() {
                    session.set_topic(line);
                }
                match session.start_run(pipeline, &TerminalObserver).await {
                    Ok(result) => println!("{}", render_report(result)),
                    Err(err) => eprintln!("[paper-scout] run failed: {err}"),
                }
            }
        }
    }

    Ok(())
}
