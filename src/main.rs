// file: src/main.rs
// description: commandline chat front end with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use kepler_chatbot::utils::logging::{
    format_bot, format_error, format_info, format_success, format_user, format_warning,
};
use kepler_chatbot::{
    ChatEngine, Config, FallbackGenerator, FallbackStatus, GroqFallbackClient,
    KnowledgeBaseLoader, KnowledgeBaseStatus, MatchEngine, Readiness, ReadinessReport, Role,
    Session, TranscriptExporter, Validator,
};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "kepler_chatbot")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Kepler College question answering over a curated knowledge base", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single question
    Ask {
        /// Question text
        question: String,
    },

    /// Interactive chat session
    Chat {
        /// Write the conversation to this JSON file on exit
        #[arg(short, long, value_name = "FILE")]
        transcript: Option<PathBuf>,
    },

    /// Show the best scoring knowledge base questions without answering
    Match {
        question: String,

        #[arg(short, long, default_value_t = 5)]
        top: usize,
    },

    /// Knowledge base entry counts per category
    Stats,

    /// Check that the knowledge base and fallback are usable
    Verify,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    kepler_chatbot::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Kepler College Chatbot");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Ask { question } => {
            cmd_ask(&config, &question).await?;
        }
        Commands::Chat { transcript } => {
            cmd_chat(&config, transcript).await?;
        }
        Commands::Match { question, top } => {
            cmd_match(&config, &question, top)?;
        }
        Commands::Stats => {
            cmd_stats(&config)?;
        }
        Commands::Verify => {
            cmd_verify(&config)?;
        }
    }

    Ok(())
}

/// Loads the knowledge base and fallback once; both are read-only afterwards.
fn build_engine(config: &Config) -> ChatEngine {
    let knowledge_base = KnowledgeBaseLoader::new(config.knowledge_base.clone()).load_or_empty();
    if knowledge_base.is_empty() {
        warn!("Knowledge base is empty, every question will use the fallback");
    }

    let fallback = match GroqFallbackClient::from_config(&config.fallback) {
        Ok(client) => client.map(|c| Box::new(c) as Box<dyn FallbackGenerator>),
        Err(e) => {
            warn!("Fallback generator failed to initialize: {}", e);
            None
        }
    };

    ChatEngine::new(
        knowledge_base,
        MatchEngine::new(config.matching.threshold),
        fallback,
    )
}

async fn cmd_ask(config: &Config, question: &str) -> Result<()> {
    let engine = build_engine(config);
    let mut session = Session::new();

    let reply = session.ask(&engine, question).await;
    if reply.is_invalid() {
        println!("{}", format_warning(&reply.text));
    } else {
        println!("{}", format_bot(&reply.text));
    }

    Ok(())
}

async fn cmd_chat(config: &Config, transcript: Option<PathBuf>) -> Result<()> {
    let engine = build_engine(config);
    let mut session = Session::new();

    println!(
        "{}",
        format_info(
            "Ask me anything about Kepler College. Type /history to review the conversation, /quit to leave."
        )
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        match line.trim() {
            "/quit" | "/exit" => break,
            "/history" => {
                print_history(&session);
                continue;
            }
            _ => {}
        }

        let reply = session.ask(&engine, &line).await;
        if reply.is_invalid() {
            println!("{}", format_warning(&reply.text));
        } else {
            println!("{}", format_bot(&reply.text));
        }
    }

    if let Some(path) = transcript {
        let exporter = TranscriptExporter::new(path).context("Failed to prepare transcript")?;
        let turns = exporter
            .export(&session, true)
            .context("Failed to write transcript")?;
        println!(
            "{}",
            format_success(&format!(
                "Saved {} turns to {}",
                turns,
                exporter.output_path().display()
            ))
        );
    }

    Ok(())
}

fn print_history(session: &Session) {
    if session.history().is_empty() {
        println!("{}", format_info("No conversation yet"));
        return;
    }

    println!("\nConversation History\n{}", "=".repeat(40));
    for turn in session.history() {
        match turn.role {
            Role::User => println!("{}", format_user(&turn.message)),
            Role::Bot => println!("{}", format_bot(&turn.message)),
        }
    }
    println!();
}

fn cmd_match(config: &Config, question: &str, top: usize) -> Result<()> {
    let knowledge_base = KnowledgeBaseLoader::new(config.knowledge_base.clone())
        .load()
        .context("Failed to load knowledge base")?;
    let engine = MatchEngine::new(config.matching.threshold);

    let (best, score) = engine.find_best_match(question, &knowledge_base);
    let ranked = engine.rank(question, &knowledge_base, top);

    println!("\nCandidates for: \"{}\"\n", question);
    for (idx, candidate) in ranked.iter().enumerate() {
        println!("{}. {}", idx + 1, candidate.format_summary(80));
    }

    println!();
    match best {
        Some(best) if engine.accepts(Some(&best), score) => println!(
            "{}",
            format_success(&format!(
                "Accepted (score {} >= {}): {}",
                score,
                engine.threshold(),
                Validator::truncate_text(&best.attributed_answer(), 120)
            ))
        ),
        _ => println!(
            "{}",
            format_warning(&format!(
                "No match (best score {} < {}), the fallback would answer",
                score,
                engine.threshold()
            ))
        ),
    }

    Ok(())
}

fn cmd_stats(config: &Config) -> Result<()> {
    let knowledge_base = KnowledgeBaseLoader::new(config.knowledge_base.clone())
        .load()
        .context("Failed to load knowledge base")?;

    println!("\nKnowledge base: {}\n", config.knowledge_base.path.display());
    for (source, count) in knowledge_base.category_counts() {
        println!("  {:<20} {:>5}", source, count);
    }
    println!("  {:<20} {:>5}", "Total", knowledge_base.len());

    Ok(())
}

fn cmd_verify(config: &Config) -> Result<()> {
    let knowledge_base = KnowledgeBaseLoader::new(config.knowledge_base.clone()).load();
    let fallback = GroqFallbackClient::from_config(&config.fallback);

    let report = ReadinessReport::new(
        KnowledgeBaseStatus::from_load(&knowledge_base),
        FallbackStatus::from_client(&fallback, &config.fallback.model),
        config.matching.threshold,
    );
    print!("{}", report.format());

    if report.readiness() == Readiness::NotReady {
        println!("{}", format_error("Chatbot cannot answer any question"));
    }

    Ok(())
}
