//! `syllabus notebook` — Create, list, inspect and delete notebooks.

use syllabus_core::notebook::{Notebook, Subject};

use super::{CmdResult, load_config, open_store, resolve_notebook, short_id};

pub async fn create(subject: Subject, title: &str) -> CmdResult {
    let config = load_config()?;
    let mut store = open_store(&config)?;

    let notebook = store.create(subject, title)?;
    println!("✅ Created notebook \"{}\" [{}]", notebook.title, notebook.subject);
    println!("   Id: {}", notebook.id);
    println!("   Add materials: syllabus docs add --notebook {} <files>", short_id(&notebook.id));

    Ok(())
}

pub async fn list() -> CmdResult {
    let config = load_config()?;
    let store = open_store(&config)?;

    if store.list().is_empty() {
        println!("   No notebooks yet. Create one with `syllabus notebook create`.");
        return Ok(());
    }

    println!("  {:<10} {:>5}  TITLE", "ID", "DOCS");
    for (subject, notebooks) in by_subject(store.list()) {
        println!("\n  {subject} ({})", notebooks.len());
        for notebook in notebooks {
            println!(
                "  {:<10} {:>5}  {}",
                short_id(&notebook.id),
                notebook.documents.len(),
                notebook.title
            );
        }
    }

    Ok(())
}

/// Group notebooks by subject in `Subject::ALL` order, keeping store order
/// within each group. Subjects with no notebooks are left out.
fn by_subject(notebooks: &[Notebook]) -> Vec<(Subject, Vec<&Notebook>)> {
    Subject::ALL
        .into_iter()
        .map(|subject| (subject, notebooks.iter().filter(|n| n.subject == subject).collect::<Vec<_>>()))
        .filter(|(_, group)| !group.is_empty())
        .collect()
}

pub async fn show(id: &str) -> CmdResult {
    let config = load_config()?;
    let store = open_store(&config)?;
    let notebook = resolve_notebook(&store, id)?;

    println!("📓 {}", notebook.title);
    println!("   Id:       {}", notebook.id);
    println!("   Subject:  {}", notebook.subject);
    println!("   Created:  {}", notebook.created_at.format("%Y-%m-%d %H:%M UTC"));
    println!();

    if notebook.documents.is_empty() {
        println!("   No materials. Chat and study tools stay disabled until you add some.");
        return Ok(());
    }

    println!("   Materials:");
    for doc in &notebook.documents {
        println!(
            "   - {:<10} {} ({}, {})",
            short_id(&doc.id),
            doc.name,
            doc.kind.as_str(),
            doc.size
        );
    }

    Ok(())
}

pub async fn delete(id: &str, confirm: bool) -> CmdResult {
    let config = load_config()?;
    let mut store = open_store(&config)?;
    let notebook = resolve_notebook(&store, id)?;
    let (id, title) = (notebook.id.clone(), notebook.title.clone());

    if !confirm {
        println!("⚠️  This will permanently delete \"{title}\" and its materials.");
        println!("   Run with --confirm to proceed:");
        println!("   syllabus notebook delete {} --confirm", short_id(&id));
        return Ok(());
    }

    store.delete(&id)?;
    tracing::debug!(notebook_id = %id, "Deleted from CLI");
    println!("🗑️  Deleted notebook \"{title}\".");

    Ok(())
}
