//! Local sign-in: the identity comes from the `[user]` config section,
//! falling back to the OS login name.

use async_trait::async_trait;
use syllabus_config::UserConfig;
use syllabus_core::collaborator::{Authenticator, User};
use syllabus_core::error::AuthError;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct LocalProfileAuthenticator {
    profile: UserConfig,
    login: Option<String>,
}

impl LocalProfileAuthenticator {
    /// Use `profile`, with the `USER` / `USERNAME` environment variable as
    /// the fallback login.
    pub fn from_config(profile: &UserConfig) -> Self {
        let login = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .ok()
            .filter(|l| !l.trim().is_empty());
        Self::new(profile.clone(), login)
    }

    pub fn new(profile: UserConfig, login: Option<String>) -> Self {
        Self { profile, login }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

#[async_trait]
impl Authenticator for LocalProfileAuthenticator {
    fn name(&self) -> &str {
        "local_profile"
    }

    async fn authenticate(&self) -> Result<User, AuthError> {
        let login = non_blank(&self.login);
        let name = non_blank(&self.profile.name)
            .or_else(|| login.clone())
            .ok_or_else(|| AuthError::IncompleteProfile("no [user] name and no OS login".into()))?;
        let email = match non_blank(&self.profile.email) {
            Some(email) => email,
            None => {
                let local = login.unwrap_or_else(|| name.to_lowercase().replace(' ', "."));
                format!("{local}@localhost")
            }
        };

        debug!(email = %email, "Local sign-in");
        Ok(User {
            id: format!("local:{email}"),
            email,
            name,
            photo_url: non_blank(&self.profile.photo_url),
        })
    }
}
