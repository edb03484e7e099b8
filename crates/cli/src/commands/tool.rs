//! `syllabus tool` — Run one study tool over a notebook's materials.

use syllabus_agent::{StudyTool, StudyToolDispatcher};
use syllabus_core::error::ValidationError;
use syllabus_core::message::StudyArtifact;

use super::{CmdResult, assembler, gateway, load_config, open_store, resolve_notebook};

pub async fn run(kind: StudyTool, notebook: &str) -> CmdResult {
    let config = load_config()?;
    let store = open_store(&config)?;
    let notebook = resolve_notebook(&store, notebook)?;

    let dispatcher = StudyToolDispatcher::new(config.active_model(), gateway(&config)?, assembler(&config));

    eprint!("  Generating {}...", kind.display_name());
    let result = dispatcher.run(kind, &notebook.documents).await;
    eprint!("\r{:width$}\r", "", width = kind.display_name().len() + 16);

    match result {
        Ok(artifact) => print_artifact(&artifact),
        Err(ValidationError::NoDocuments) => {
            return Err("This notebook has no materials. Add some with `syllabus docs add`.".into());
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

pub(crate) fn print_artifact(artifact: &StudyArtifact) {
    println!();
    println!("  ── {} ──", artifact.title);
    println!();
    for line in artifact.content.lines() {
        println!("  {line}");
    }
    println!();
}
