use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use super::events::print_events;
use crate::ai::agents::CalendarAssistant;
use crate::calendar::EventStore;
use crate::core::{AppConfig, logging};

const HELP: &str = "Kommandoer: /events viser kalenderen, /delete <id> sletter en aftale, Ctrl-D afslutter.";

pub async fn run() -> Result<()> {
    // Keep the REPL readable, errors still show up
    logging::init("warn");

    let mut rl = DefaultEditor::new()?;
    let config = AppConfig::default();
    let mut assistant = CalendarAssistant::new(&config, EventStore::with_seed())?;

    if let Some(welcome) = assistant.messages().first() {
        println!("{}", welcome.text);
    }
    println!("{}", HELP);

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if line == "/events" {
                    print_events(&assistant.events());
                    continue;
                }
                if let Some(id) = line.strip_prefix("/delete ") {
                    if assistant.store().delete(id.trim()) {
                        println!("Slettet.");
                    } else {
                        println!("Fandt ingen aftale med ID {}", id.trim());
                    }
                    continue;
                }
                if line == "/help" {
                    println!("{}", HELP);
                    continue;
                }

                let reply = assistant.send_message(line).await?;
                println!("{}", reply.text);
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
