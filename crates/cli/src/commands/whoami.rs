//! `syllabus whoami` — Show the signed-in local profile.

use syllabus_core::collaborator::Authenticator;
use syllabus_local::LocalProfileAuthenticator;

use super::{CmdResult, load_config};

pub async fn run() -> CmdResult {
    let config = load_config()?;
    let auth = LocalProfileAuthenticator::from_config(&config.user);
    let user = auth.authenticate().await.map_err(|e| format!("Sign-in failed: {e}"))?;

    println!("  Name:   {}", user.name);
    println!("  Email:  {}", user.email);
    println!("  Id:     {}", user.id);
    if let Some(photo) = &user.photo_url {
        println!("  Photo:  {photo}");
    }

    Ok(())
}
