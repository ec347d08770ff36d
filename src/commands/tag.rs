use crate::cli::{Cli, ConnectionArgs};
use crate::controller::Controller;
use crate::domain::constants::SETTINGS_FILE;
use crate::domain::models::{FieldPattern, ObjectKind, ParentFilters, TagAction, TagRequest};
use crate::domain::report::Report;
use crate::error::TaggerError;
use crate::services::credentials::{
    resolve_credentials, CredentialSource, Credentials, Settings, TOKEN_ENV_VARS,
};
use crate::services::flat::process_flat;
use crate::services::interfaces::process_interfaces;
use crate::services::output::emit;
use crate::services::progress::working_on;
use std::path::{Path, PathBuf};

/// Everything needed to run once, validated before any network traffic.
#[derive(Debug, Clone)]
pub struct TagPlan {
    pub kind: ObjectKind,
    pub request: TagRequest,
    pub parents: Option<ParentFilters>,
    pub output: Option<PathBuf>,
}

fn action_from_flags(add: bool, remove: bool) -> Result<TagAction, TaggerError> {
    match (add, remove) {
        (true, false) => Ok(TagAction::Add),
        (false, true) => Ok(TagAction::Remove),
        (true, true) => Err(TaggerError::InvalidAction("add and remove".to_string())),
        (false, false) => Err(TaggerError::InvalidAction("none".to_string())),
    }
}

impl TagPlan {
    pub fn from_cli(cli: &Cli) -> Result<Self, TaggerError> {
        let kind: ObjectKind = cli.object.parse()?;
        let action = action_from_flags(cli.add, cli.remove)?;
        let object = FieldPattern::compile(&cli.key, &cli.pattern)?;
        let parents = if kind.is_hierarchical() {
            Some(ParentFilters {
                site: FieldPattern::compile(&cli.parents.site_key, &cli.parents.site_pattern)?,
                element: FieldPattern::compile(
                    &cli.parents.element_key,
                    &cli.parents.element_pattern,
                )?,
            })
        } else {
            None
        };
        Ok(Self {
            kind,
            request: TagRequest {
                tag: cli.tag.clone(),
                action,
                simulate: cli.simulate,
                object,
            },
            parents,
            output: cli.output.clone(),
        })
    }
}

/// Flags, then the settings file, then the token environment variables.
pub fn gather_credentials(conn: &ConnectionArgs) -> anyhow::Result<Credentials> {
    let settings = match &conn.settings {
        Some(path) => Settings::load(path, true)?,
        None => Settings::load(Path::new(SETTINGS_FILE), false)?,
    };

    let mut sources = vec![CredentialSource::from_flags(
        conn.email.clone(),
        conn.password.clone(),
    )];
    if let Some(settings) = &settings {
        sources.push(CredentialSource::from_settings(settings));
    }
    for &var in TOKEN_ENV_VARS {
        sources.push(CredentialSource::from_env(var, std::env::var(var).ok()));
    }
    Ok(resolve_credentials(&sources))
}

/// Runs the processor for the planned kind. Nothing is rendered here.
pub fn process<C: Controller>(api: &C, plan: &TagPlan) -> Result<Report, TaggerError> {
    let progress = working_on(plan.kind.label());
    match &plan.parents {
        Some(filters) => process_interfaces(api, &plan.request, filters, &progress),
        None => process_flat(api, plan.kind, &plan.request, &progress),
    }
}

pub fn handle_tag_command<C: Controller>(api: &C, plan: &TagPlan) -> anyhow::Result<()> {
    let report = process(api, plan)?;
    tracing::info!(
        rows = report.rows.len(),
        warnings = report.warnings.len(),
        "processing finished"
    );
    emit(&report, plan.output.as_deref())
}
