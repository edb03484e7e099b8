//! `syllabus chat` — Grounded chat over one notebook, single-message or interactive.

use std::io::Write;

use syllabus_agent::{ChatSession, SUGGESTED_PROMPTS, StudyTool, StudyToolDispatcher};
use syllabus_core::error::ValidationError;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::tool::print_artifact;
use super::{CmdResult, assembler, gateway, load_config, open_store, resolve_notebook};

pub async fn run(notebook: &str, message: Option<String>) -> CmdResult {
    let config = load_config()?;
    let mut store = open_store(&config)?;
    let notebook_id = resolve_notebook(&store, notebook)?.id.clone();
    let active = store.select(&notebook_id)?.clone();

    let gateway = gateway(&config)?;
    let model = config.active_model();
    let session = ChatSession::new(&active.id, model, gateway.clone(), assembler(&config));
    let dispatcher = StudyToolDispatcher::new(model, gateway, assembler(&config));

    if let Some(msg) = message {
        eprint!("  Thinking...");
        let result = session.submit(Some(&active), &msg).await;
        eprint!("\r              \r");
        let reply = result.map_err(explain)?;
        println!("{}", reply.content);
        return Ok(());
    }

    println!();
    println!("  📓 {} [{}]", active.title, active.subject);
    println!("  Provider:   {}", config.default_provider);
    println!("  Model:      {model}");
    println!("  Materials:  {}", active.documents.len());
    println!();
    if active.has_documents() {
        println!("  Try asking:");
        for prompt in SUGGESTED_PROMPTS {
            println!("    • {prompt}");
        }
    } else {
        println!("  ⚠️  No materials yet. Add some with `syllabus docs add` before chatting.");
    }
    println!();
    println!("  Commands: /tool <summary|simple|notes|viva>, /clear, /exit");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();

        if input == "/exit" || input == "/quit" {
            break;
        } else if input == "/clear" {
            match session.clear().await {
                Ok(()) => println!("  Conversation cleared."),
                Err(e) => eprintln!("  [Error] {}", explain(e)),
            }
        } else if let Some(kind) = input.strip_prefix("/tool") {
            match kind.parse::<StudyTool>() {
                Ok(kind) => {
                    eprint!("  Generating {}...", kind.display_name());
                    let result = dispatcher.run(kind, &active.documents).await;
                    eprint!("\r{:width$}\r", "", width = kind.display_name().len() + 16);
                    match result {
                        Ok(artifact) => print_artifact(&artifact),
                        Err(e) => eprintln!("  [Error] {}", explain(e)),
                    }
                }
                Err(e) => eprintln!("  [Error] {e}"),
            }
        } else if !input.is_empty() {
            eprint!("  ...");
            let result = session.submit(Some(&active), input).await;
            eprint!("\r     \r");
            match result {
                Ok(reply) => {
                    println!();
                    for line in reply.content.lines() {
                        println!("  SyllabusGPT > {line}");
                    }
                    println!();
                }
                Err(e) => eprintln!("  [Error] {}", explain(e)),
            }
        }

        prompt()?;
    }

    println!();
    println!("  Goodbye! 📚");
    println!();

    Ok(())
}

fn prompt() -> std::io::Result<()> {
    print!("  You > ");
    std::io::stdout().flush()
}

/// User-facing wording for rejected input.
fn explain(e: ValidationError) -> String {
    match e {
        ValidationError::NoDocuments => {
            "This notebook has no materials. Add some with `syllabus docs add`.".into()
        }
        ValidationError::Busy(_) => "Still working on the previous request.".into(),
        other => other.to_string(),
    }
}
