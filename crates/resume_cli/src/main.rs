//! Command-line driver for the resume store.
//!
//! # Responsibility
//! - Open the configured store and apply one command per invocation.
//! - Print results and pending notices; no state is kept between runs
//!   other than what the store persists.

use clap::{Parser, Subcommand};
use log::error;
use resume_core::{
    init_logging_from_config, open_adapter, AnyEntry, DocumentStore, PlainTextTemplate,
    RenderOptions, SectionName, StoreConfig, StoreOptions, TemplateRegistry,
};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "resume")]
#[command(version)]
#[command(about = "Edit and render resume documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List documents, most recently updated first
    List,
    /// Create an empty document and select it
    New { name: String },
    /// Select the active document
    Select { id: String },
    /// Rename a document
    Rename { id: String, name: String },
    /// Copy a document and select the copy
    Duplicate { id: String },
    /// Delete a document
    Delete { id: String },
    /// Set the template of the active document
    Template { id: String },
    /// Turn page wrap on or off
    PageWrap {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Print one section of the active document as JSON
    Show { section: SectionName },
    /// Append an entry (JSON record, empty entry when omitted)
    Add {
        section: SectionName,
        json: Option<String>,
    },
    /// Replace the entry at INDEX with a JSON record
    Set {
        section: SectionName,
        index: usize,
        json: String,
    },
    /// Remove the entry at INDEX
    Remove { section: SectionName, index: usize },
    /// Move an entry from one index to another
    Move {
        section: SectionName,
        from: usize,
        to: usize,
    },
    /// Hide the entry at INDEX from rendered output
    Hide { section: SectionName, index: usize },
    /// Show the entry at INDEX in rendered output
    Unhide { section: SectionName, index: usize },
    /// Render the active document with its template
    Render,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=cli_command module=cli status=error error={message}");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), String> {
    let config = StoreConfig::from_env().map_err(|err| err.to_string())?;
    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("warning: logging disabled: {err}");
    }
    let adapter = open_adapter(&config).map_err(|err| err.to_string())?;
    let mut store = DocumentStore::open(adapter, StoreOptions::from(&config));

    let result = apply(&mut store, command);
    for notice in store.notices() {
        eprintln!("notice[{}]: {}", notice.kind, notice.message);
    }
    result
}

fn apply(store: &mut DocumentStore, command: Command) -> Result<(), String> {
    match command {
        Command::List => {
            let current = store.current_resume_id().map(str::to_string);
            for doc in store.list_resumes() {
                let marker = if current.as_deref() == Some(doc.id()) {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{marker} {}  {}  [{}]",
                    doc.id(),
                    doc.metadata.name,
                    doc.metadata.template_id
                );
            }
        }
        Command::New { name } => println!("{}", store.create_resume(&name)),
        Command::Select { id } => store.set_current_resume_id(&id).map_err(to_message)?,
        Command::Rename { id, name } => store.rename_resume(&id, &name).map_err(to_message)?,
        Command::Duplicate { id } => {
            println!("{}", store.duplicate_resume(&id).map_err(to_message)?)
        }
        Command::Delete { id } => store.delete_resume(&id).map_err(to_message)?,
        Command::Template { id } => store.set_selected_template(&id).map_err(to_message)?,
        Command::PageWrap { enabled } => store.set_page_wrap(enabled),
        Command::Show { section } => {
            let data = store.data();
            let entries = data.sections.get(section);
            let json = serde_json::to_string_pretty(&entries).map_err(to_message)?;
            println!("{json}");
        }
        Command::Add { section, json } => {
            let entry = match json {
                Some(raw) => parse_entry(section, &raw)?,
                None => AnyEntry::empty(section),
            };
            store.append_any(entry).map_err(to_message)?;
            println!("{}", store.data().sections.len(section) - 1);
        }
        Command::Set {
            section,
            index,
            json,
        } => {
            let entry = parse_entry(section, &json)?;
            store
                .replace_section_item(section, index, entry)
                .map_err(to_message)?;
        }
        Command::Remove { section, index } => store
            .remove_item_by_name(section, index)
            .map_err(to_message)?,
        Command::Move { section, from, to } => store
            .move_item_by_name(section, from, to)
            .map_err(to_message)?,
        Command::Hide { section, index } => store
            .set_visible_by_name(section, index, false)
            .map_err(to_message)?,
        Command::Unhide { section, index } => store
            .set_visible_by_name(section, index, true)
            .map_err(to_message)?,
        Command::Render => {
            let mut registry = TemplateRegistry::with_builtin();
            let template_id = store.selected_template().to_string();
            if registry.get(&template_id).is_none() {
                // Unknown ids still get a readable preview.
                registry
                    .register(Arc::new(PlainTextTemplate::new(template_id)))
                    .map_err(to_message)?;
            }
            let rendered = registry
                .render(
                    &store.data(),
                    RenderOptions {
                        page_wrap: store.page_wrap(),
                    },
                )
                .map_err(to_message)?;
            println!("{}", rendered.to_text());
        }
    }
    Ok(())
}

fn parse_entry(section: SectionName, raw: &str) -> Result<AnyEntry, String> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|err| format!("invalid JSON: {err}"))?;
    AnyEntry::from_json(section, value)
        .map_err(|err| format!("not a valid {section} entry: {err}"))
}

fn to_message(err: impl std::fmt::Display) -> String {
    err.to_string()
}
