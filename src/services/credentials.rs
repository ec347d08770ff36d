//! Where login material comes from, and how it is used.
//!
//! Sources are consulted in order and the first non-empty value wins per
//! field: command-line flags, the settings file, `X_AUTH_TOKEN`, `AUTH_TOKEN`.

use crate::controller::Authenticator;
use crate::domain::constants::MAX_LOGIN_ATTEMPTS;
use crate::error::TaggerError;
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

pub const TOKEN_ENV_VARS: &[&str] = &["X_AUTH_TOKEN", "AUTH_TOKEN"];

/// `cloudgenix_settings.toml`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Settings {
    pub auth_token: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl Settings {
    /// A missing file is only an error when the path was asked for explicitly.
    pub fn load(path: &Path, required: bool) -> anyhow::Result<Option<Self>> {
        if !path.exists() && !required {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read settings file {}", path.display()))?;
        let settings = toml::from_str(&raw)
            .with_context(|| format!("parse settings file {}", path.display()))?;
        Ok(Some(settings))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Flags,
    Settings,
    Env(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialSource {
    pub origin: Origin,
    pub token: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl CredentialSource {
    pub fn from_flags(email: Option<String>, password: Option<String>) -> Self {
        Self {
            origin: Origin::Flags,
            token: None,
            email,
            password,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            origin: Origin::Settings,
            token: settings.auth_token.clone(),
            email: settings.user.clone(),
            password: settings.password.clone(),
        }
    }

    pub fn from_env(var: &'static str, value: Option<String>) -> Self {
        Self {
            origin: Origin::Env(var),
            token: value,
            email: None,
            password: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// `--email` or `--password` was given; a resolved token is then ignored.
    pub login_requested: bool,
}

fn first_non_empty<'a>(
    sources: &'a [CredentialSource],
    field: impl Fn(&'a CredentialSource) -> &'a Option<String>,
) -> Option<String> {
    sources
        .iter()
        .filter_map(|s| field(s).as_deref())
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn resolve_credentials(sources: &[CredentialSource]) -> Credentials {
    let login_requested = sources.iter().any(|s| {
        s.origin == Origin::Flags
            && (s.email.as_deref().is_some_and(|v| !v.is_empty())
                || s.password.as_deref().is_some_and(|v| !v.is_empty()))
    });
    Credentials {
        token: first_non_empty(sources, |s| &s.token),
        email: first_non_empty(sources, |s| &s.email),
        password: first_non_empty(sources, |s| &s.password),
        login_requested,
    }
}

/// Interactive fallback for missing login fields.
pub trait Prompt {
    fn email(&mut self) -> anyhow::Result<String>;
    fn password(&mut self) -> anyhow::Result<String>;
    fn login_failed(&mut self);
}

pub struct Terminal;

impl Prompt for Terminal {
    fn email(&mut self) -> anyhow::Result<String> {
        print!("email: ");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("read email")?;
        Ok(line.trim().to_string())
    }

    fn password(&mut self) -> anyhow::Result<String> {
        print!("password: ");
        io::stdout().flush()?;
        rpassword::read_password().context("read password")
    }

    fn login_failed(&mut self) {
        eprintln!("Login failed, please try again.");
    }
}

/// Establishes a session: token when one resolved and no login flags were
/// given, otherwise email/password with up to `MAX_LOGIN_ATTEMPTS` tries.
pub fn authenticate<A: Authenticator, P: Prompt>(
    auth: &mut A,
    creds: Credentials,
    prompt: &mut P,
) -> anyhow::Result<()> {
    if let Some(token) = creds.token.as_deref().filter(|_| !creds.login_requested) {
        if auth.use_token(token)? {
            tracing::info!("authenticated with token");
            return Ok(());
        }
        return Err(TaggerError::Authentication(
            "AUTH_TOKEN login failure, please check token.".to_string(),
        )
        .into());
    }

    let mut email = creds.email;
    let mut password = creds.password;
    for attempt in 1..=MAX_LOGIN_ATTEMPTS {
        // values are consumed here so a retry always prompts again
        let user = match email.take() {
            Some(v) => v,
            None => prompt.email()?,
        };
        let pass = match password.take() {
            Some(v) => v,
            None => prompt.password()?,
        };
        if auth.login(&user, &pass)? {
            tracing::info!(attempt, "logged in");
            return Ok(());
        }
        tracing::debug!(attempt, "login rejected");
        prompt.login_failed();
    }
    Err(TaggerError::Authentication(format!(
        "login failed after {} attempts",
        MAX_LOGIN_ATTEMPTS
    ))
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct ScriptedAuth {
        token_ok: bool,
        accept: Option<(String, String)>,
        tokens: Vec<String>,
        logins: Vec<(String, String)>,
    }

    impl Authenticator for ScriptedAuth {
        fn use_token(&mut self, token: &str) -> anyhow::Result<bool> {
            self.tokens.push(token.to_string());
            Ok(self.token_ok)
        }

        fn login(&mut self, email: &str, password: &str) -> anyhow::Result<bool> {
            self.logins.push((email.to_string(), password.to_string()));
            Ok(self
                .accept
                .as_ref()
                .is_some_and(|(e, p)| e == email && p == password))
        }
    }

    #[derive(Default)]
    struct ScriptedPrompt {
        emails: VecDeque<String>,
        passwords: VecDeque<String>,
        failures: usize,
    }

    impl Prompt for ScriptedPrompt {
        fn email(&mut self) -> anyhow::Result<String> {
            self.emails.pop_front().context("no scripted email")
        }

        fn password(&mut self) -> anyhow::Result<String> {
            self.passwords.pop_front().context("no scripted password")
        }

        fn login_failed(&mut self) {
            self.failures += 1;
        }
    }

    fn settings(token: Option<&str>, user: Option<&str>) -> Settings {
        Settings {
            auth_token: token.map(str::to_string),
            user: user.map(str::to_string),
            password: user.map(|_| "settings-pw".to_string()),
        }
    }

    #[test]
    fn first_non_empty_value_wins_per_field() {
        let sources = vec![
            CredentialSource::from_flags(None, Some(String::new())),
            CredentialSource::from_settings(&settings(Some(""), Some("ops@example.com"))),
            CredentialSource::from_env("X_AUTH_TOKEN", None),
            CredentialSource::from_env("AUTH_TOKEN", Some("env-token".into())),
        ];
        let creds = resolve_credentials(&sources);
        assert_eq!(creds.token.as_deref(), Some("env-token"));
        assert_eq!(creds.email.as_deref(), Some("ops@example.com"));
        assert_eq!(creds.password.as_deref(), Some("settings-pw"));
        assert!(!creds.login_requested);
    }

    #[test]
    fn flags_take_precedence_and_mark_login() {
        let sources = vec![
            CredentialSource::from_flags(Some("me@example.com".into()), None),
            CredentialSource::from_settings(&settings(Some("file-token"), Some("ops@example.com"))),
        ];
        let creds = resolve_credentials(&sources);
        assert_eq!(creds.email.as_deref(), Some("me@example.com"));
        assert_eq!(creds.token.as_deref(), Some("file-token"));
        assert!(creds.login_requested);
    }

    #[test]
    fn token_is_used_without_login_flags() {
        let mut auth = ScriptedAuth {
            token_ok: true,
            ..Default::default()
        };
        let creds = Credentials {
            token: Some("t0k".into()),
            ..Default::default()
        };
        authenticate(&mut auth, creds, &mut ScriptedPrompt::default()).unwrap();
        assert_eq!(auth.tokens, vec!["t0k"]);
        assert!(auth.logins.is_empty());
    }

    #[test]
    fn rejected_token_is_fatal() {
        let mut auth = ScriptedAuth::default();
        let creds = Credentials {
            token: Some("stale".into()),
            ..Default::default()
        };
        let err = authenticate(&mut auth, creds, &mut ScriptedPrompt::default()).unwrap_err();
        assert!(err.to_string().contains("AUTH_TOKEN login failure"));
        assert!(auth.logins.is_empty());
    }

    #[test]
    fn login_flags_bypass_token() {
        let mut auth = ScriptedAuth {
            token_ok: true,
            accept: Some(("me@example.com".into(), "pw".into())),
            ..Default::default()
        };
        let creds = Credentials {
            token: Some("t0k".into()),
            email: Some("me@example.com".into()),
            password: Some("pw".into()),
            login_requested: true,
        };
        authenticate(&mut auth, creds, &mut ScriptedPrompt::default()).unwrap();
        assert!(auth.tokens.is_empty());
        assert_eq!(auth.logins.len(), 1);
    }

    #[test]
    fn failed_login_clears_values_and_prompts() {
        let mut auth = ScriptedAuth {
            accept: Some(("me@example.com".into(), "right".into())),
            ..Default::default()
        };
        let mut prompt = ScriptedPrompt {
            emails: VecDeque::from(vec!["me@example.com".to_string()]),
            passwords: VecDeque::from(vec!["right".to_string()]),
            ..Default::default()
        };
        let creds = Credentials {
            email: Some("me@example.com".into()),
            password: Some("wrong".into()),
            ..Default::default()
        };
        authenticate(&mut auth, creds, &mut prompt).unwrap();
        assert_eq!(auth.logins.len(), 2);
        assert_eq!(prompt.failures, 1);
        assert!(prompt.emails.is_empty());
    }

    #[test]
    fn login_gives_up_after_max_attempts() {
        let mut auth = ScriptedAuth::default();
        let mut prompt = ScriptedPrompt {
            emails: vec!["a".to_string(); 5].into(),
            passwords: vec!["b".to_string(); 5].into(),
            ..Default::default()
        };
        let err = authenticate(&mut auth, Credentials::default(), &mut prompt).unwrap_err();
        assert_eq!(auth.logins.len(), MAX_LOGIN_ATTEMPTS);
        assert!(matches!(
            err.downcast_ref::<TaggerError>(),
            Some(TaggerError::Authentication(_))
        ));
    }

    #[test]
    fn settings_file_is_optional_unless_named() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("cloudgenix_settings.toml");
        assert!(Settings::load(&missing, false).unwrap().is_none());
        assert!(Settings::load(&missing, true).is_err());

        fs::write(&missing, "auth_token = \"abc\"\nuser = \"ops@example.com\"\n").unwrap();
        let loaded = Settings::load(&missing, false).unwrap().unwrap();
        assert_eq!(loaded.auth_token.as_deref(), Some("abc"));
        assert_eq!(loaded.password, None);
    }
}
