use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;

use pitchline::app::App;
use pitchline::config::Config;
use pitchline::generate::{GenerationService, ScriptRequest, ScriptStore, TemplateScriptService};
use pitchline::logging::init_logging;
use pitchline::wizard::{FieldKey, NavOutcome, StepDefinition, WizardSession};

#[derive(Parser)]
#[command(name = "pitchline")]
#[command(about = "Terminal cold-call script studio")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a script headlessly from a TOML answers file
    Generate {
        /// Path to the answers file
        answers: PathBuf,
    },
}

/// Answers file for headless generation; keys match the wizard fields.
#[derive(Debug, Deserialize)]
struct AnswerFile {
    product: String,
    persona: String,
    industry: String,
    goal: String,
    tone: String,
    objections: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        None => {
            let logging = init_logging(&config, true, cli.debug)?;
            if let Some(path) = &logging.log_file_path {
                tracing::info!(path = %path.display(), "logging to file");
            }
            App::new(config).run().await
        }
        Some(Commands::Generate { answers }) => {
            let _logging = init_logging(&config, false, cli.debug)?;
            run_generate(&config, &answers).await
        }
    }
}

/// Drive the same wizard state machine the TUI uses, with answers read
/// from a file, and print the generated script's path.
async fn run_generate(config: &Config, answers_path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(answers_path)
        .with_context(|| format!("Failed to read answers file {}", answers_path.display()))?;
    let answers: AnswerFile = toml::from_str(&text)
        .with_context(|| format!("Failed to parse answers file {}", answers_path.display()))?;

    let mut session = WizardSession::new();
    session.set_field(FieldKey::Product, answers.product);
    session.set_field(FieldKey::Persona, answers.persona);
    session.set_field(FieldKey::Industry, answers.industry);
    session.set_field(FieldKey::Goal, answers.goal);
    session.set_field(FieldKey::Tone, answers.tone);
    session.set_field(FieldKey::Objections, answers.objections);

    loop {
        match session.go_forward() {
            NavOutcome::Moved { .. } => {}
            NavOutcome::Submit => break,
            NavOutcome::Stay => {
                let step = session.current_step();
                let def = StepDefinition::for_step(step);
                anyhow::bail!(
                    "step {step} ({}) is incomplete or invalid in {}",
                    def.title,
                    answers_path.display()
                );
            }
        }
    }

    let service = TemplateScriptService::new(ScriptStore::new(config.scripts_path()));
    let request = ScriptRequest::from_form(session.form())?;
    match service.generate(&request).await {
        Ok(id) => {
            session.complete();
            println!("{}", service.store().path_for(&id).display());
            Ok(())
        }
        Err(err) => {
            session.fail(err.to_string());
            Err(err.into())
        }
    }
}
