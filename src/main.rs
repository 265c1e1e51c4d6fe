use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parley::handle::{AgentHandle, ScriptedHandle};
use parley::scoring::{review_completed, score_transcript};
use parley::session::{Coordinator, OnboardingGate};
use parley::storage::{InMemoryStore, SubmissionStore};
use parley::types::Message;
use parley::Config;

#[derive(Parser)]
#[command(name = "parley")]
#[command(about = "Turn-based multi-agent dialogue session runner", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a demo session with scripted agents, then review the transcript
    Run {
        #[arg(long, default_value_t = 2, help = "Number of agents in the session")]
        agents: usize,
        #[arg(long, help = "Path to a TOML config file")]
        config: Option<PathBuf>,
    },
    /// Score a transcript file (a JSON list of {speaker, content} entries)
    Score {
        #[arg(help = "Path to the transcript JSON file")]
        transcript: PathBuf,
        #[arg(long, default_value = "Chat Agent 1", help = "Speaker label under review")]
        subject: String,
        #[arg(long, help = "Path to a TOML config file")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { agents, config } => {
            run_session(agents, load_config(config)?).await?;
        }
        Commands::Score {
            transcript,
            subject,
            config,
        } => {
            score_file(&transcript, &subject, &load_config(config)?)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}

async fn run_session(agent_count: usize, config: Config) -> Result<()> {
    let store = InMemoryStore::new();

    let mut handles: Vec<Arc<dyn AgentHandle>> = Vec::with_capacity(agent_count);
    for index in 0..agent_count {
        let mut lines = Vec::new();
        if config.require_onboarding {
            // The gate consumes the first scripted line
            lines.push(format!("Agent {} reporting for onboarding", index + 1));
        }
        for round in 1..=config.max_rounds {
            lines.push(format!(
                "Agent {} checking in for round {}",
                index + 1,
                round
            ));
        }
        handles.push(Arc::new(
            ScriptedHandle::new(lines).with_onboarding_success(true),
        ));
    }

    if config.require_onboarding {
        let gate = OnboardingGate::new(config.clone());
        for handle in &handles {
            gate.run(handle.as_ref()).await?;
        }
    }

    let mut coordinator = Coordinator::admit(handles, config.clone());
    println!(
        "Starting session {} with {} agents",
        coordinator.state().id,
        agent_count
    );

    let outcome = coordinator.run().await;
    let state = coordinator.shutdown().await;
    // Surface session errors only after every handle has been released
    outcome?;

    println!("Session completed after {} rounds", state.round);
    for message in &state.transcript {
        println!("  {}: {}", message.speaker, message.content);
    }

    let subject = state.agents[0].label.clone();
    store.save_submission(&state.into_record(subject)).await?;

    for (id, verdict) in review_completed(&store, &config).await? {
        match verdict.reason() {
            None => println!("Submission {}: approved and paid out.", id),
            Some(reason) => println!("Submission {}: rejected. {}", id, reason),
        }
    }

    Ok(())
}

fn score_file(path: &Path, subject: &str, config: &Config) -> Result<()> {
    let raw = std::fs::read_to_string(path)?;
    let messages: Vec<Message> = serde_json::from_str(&raw)?;

    let verdict = score_transcript(
        &messages,
        subject,
        config.max_duplicates,
        config.min_reply_length,
    );
    match verdict.reason() {
        None => println!("Approved."),
        Some(reason) => println!("Rejected. {}", reason),
    }

    Ok(())
}
