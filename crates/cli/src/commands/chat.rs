//! `summit chat` — Interactive or single-message coaching session.

use std::io::Write;

use summit_config::AppConfig;
use summit_core::{ChatMessage, TurnRequest};

pub async fn run(message: Option<String>, user: String) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let engine = super::build_engine(&config)?;

    if let Some(msg) = message {
        let request = TurnRequest::new(msg).with_user(user);
        let reply = engine.respond(&request).await;
        println!("{}", reply.response);
        return Ok(());
    }

    println!();
    println!("  Summit — Interactive Coaching Session");
    println!();
    println!("  Model:   {}", config.model);
    println!("  User:    {user}");
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let mut history: Vec<ChatMessage> = Vec::new();
    let stdin = std::io::stdin();

    loop {
        print!("  You > ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }

        let request = TurnRequest::new(line)
            .with_user(user.clone())
            .with_history(history.clone());
        let reply = engine.respond(&request).await;

        println!();
        for text_line in reply.response.lines() {
            println!("  Coach > {text_line}");
        }
        println!();
        println!("  [style: {} | emotion: {} | goal: {}]",
            reply.style_used.as_str(),
            reply.emotion_detected,
            reply.goal_link.as_str(),
        );
        println!();

        history.push(ChatMessage::user(line));
        history.push(ChatMessage::assistant(&reply.response));
    }

    Ok(())
}
