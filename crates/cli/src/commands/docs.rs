//! `syllabus docs` — Add and remove notebook materials.

use std::path::PathBuf;

use syllabus_core::collaborator::Ingestor;
use syllabus_local::{PlainTextIngestor, read_files};

use super::{CmdResult, load_config, open_store, resolve_notebook, short_id};

pub async fn add(notebook: &str, files: &[PathBuf], paste: Option<String>, name: &str) -> CmdResult {
    if files.is_empty() && paste.is_none() {
        return Err("Nothing to add: pass one or more files, or --paste <TEXT>".into());
    }

    let config = load_config()?;
    let mut store = open_store(&config)?;
    let notebook_id = resolve_notebook(&store, notebook)?.id.clone();

    let mut documents = Vec::new();
    if !files.is_empty() {
        let raw = read_files(files).await?;
        documents.extend(PlainTextIngestor::new().ingest(raw).await?);
    }
    if let Some(text) = paste {
        documents.push(PlainTextIngestor::paste(name, text)?);
    }

    let added: Vec<(String, String, String)> = documents
        .iter()
        .map(|d| (d.id.clone(), d.name.clone(), d.size.clone()))
        .collect();
    let updated = store.append_documents(&notebook_id, documents)?;
    tracing::info!(notebook_id = %notebook_id, added = added.len(), "Materials added");

    for (id, name, size) in added {
        println!("✅ Added {name} ({size}) [{}]", short_id(&id));
    }
    println!("   \"{}\" now has {} material(s).", updated.title, updated.documents.len());

    Ok(())
}

pub async fn remove(notebook: &str, document: &str) -> CmdResult {
    let config = load_config()?;
    let mut store = open_store(&config)?;
    let current = resolve_notebook(&store, notebook)?;
    let notebook_id = current.id.clone();

    let matches: Vec<_> = current
        .documents
        .iter()
        .filter(|d| d.id.starts_with(document))
        .map(|d| (d.id.clone(), d.name.clone()))
        .collect();
    let (doc_id, doc_name) = match matches.as_slice() {
        [one] => one.clone(),
        [] => return Err(format!("No material with id '{document}' in this notebook").into()),
        _ => return Err(format!("Id prefix '{document}' is ambiguous, use more characters").into()),
    };

    let updated = store.remove_document(&notebook_id, &doc_id)?;
    println!("🗑️  Removed {doc_name}. {} material(s) left.", updated.documents.len());

    Ok(())
}
