use crate::controller::{extract_items, Collection, Controller};
use crate::domain::models::{MatchResult, ObjectKind, TagRequest};
use crate::domain::report::{Cell, Report, ReportLayout};
use crate::error::{Outcome, TaggerError};
use crate::services::apply::apply_change;
use crate::services::diagnostics::warn;
use crate::services::matcher::{check_do_match, Mutation};
use indicatif::ProgressBar;

fn flat_row(req: &TagRequest, result: &MatchResult, detail: Option<String>) -> Vec<Cell> {
    vec![
        Some(req.tag.clone()),
        Some(req.action.to_string()),
        result.name.clone(),
        Some(req.object.key.clone()),
        Some(result.value.as_text()),
        Some(result.matched.to_string()),
        detail,
    ]
}

/// Tags sites, elements or circuit categories: one listing, one pass.
pub fn process_flat<C: Controller>(
    api: &C,
    kind: ObjectKind,
    req: &TagRequest,
    progress: &ProgressBar,
) -> Result<Report, TaggerError> {
    let Some(collection) = Collection::flat(kind) else {
        return Err(TaggerError::UnsupportedObject(kind.to_string()));
    };
    let objects = extract_items(api.list(&collection), kind.label())?;
    tracing::info!(kind = kind.label(), count = objects.len(), "listed objects");

    let mut report = Report::new(ReportLayout::Flat, req.simulate);
    progress.set_length(objects.len() as u64);

    for obj in &objects {
        progress.inc(1);
        let Mutation { result, mutated } =
            check_do_match(&req.tag, req.action, &req.object, obj);

        let detail = match mutated {
            None => None,
            Some(modified) => {
                match apply_change(api, &collection, kind, obj, &modified, req.simulate) {
                    Outcome::Done(detail) => Some(detail),
                    Outcome::Recoverable(warning) => {
                        warn(&mut report, progress, warning);
                        continue;
                    }
                }
            }
        };
        report.push_row(flat_row(req, &result, detail));
    }

    progress.finish_and_clear();
    Ok(report)
}
