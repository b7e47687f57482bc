//! `periscan chat` — Interactive or single-message chat mode.

use crate::commands::{build_logs, Logs};
use periscan_agent::ConversationAssembler;
use periscan_config::AppConfig;
use periscan_providers::GeminiClient;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for the API key early — give a clear error
    if config.require_api_key().is_err() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set the environment variable:");
        eprintln!("    GEMINI_API_KEY='...'");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::default_path().display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let logs = build_logs(&config.logs);
    let assembler = build_assembler(&config, &logs)?;

    if let Some(msg) = message {
        let reply = assembler.ask(&msg).await?;
        println!("{reply}");
    } else {
        interactive_loop(&assembler).await?;
    }

    Ok(())
}

pub fn build_assembler(
    config: &AppConfig,
    logs: &Logs,
) -> Result<ConversationAssembler, Box<dyn std::error::Error>> {
    let api_key = config.require_api_key()?;
    let client = GeminiClient::new(api_key).with_model(&config.model);
    Ok(ConversationAssembler::new(
        Arc::new(client),
        Arc::clone(&logs.dialogue),
        Arc::clone(&logs.hosts),
        Arc::clone(&logs.devices),
    ))
}

/// Read questions from stdin until EOF or `exit`.
pub async fn interactive_loop(
    assembler: &ConversationAssembler,
) -> Result<(), Box<dyn std::error::Error>> {
    println!();
    println!("  Periscan — ask about what the device has seen.");
    println!("  Type your question and press Enter. 'exit' to quit.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("  You > ");
        use std::io::Write;
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") {
            break;
        }

        match assembler.ask(line).await {
            Ok(reply) => {
                println!();
                for out in reply.lines() {
                    println!("  Assistant > {out}");
                }
                println!();
            }
            Err(e) => {
                eprintln!("  (no reply: {e})");
            }
        }
    }

    Ok(())
}
