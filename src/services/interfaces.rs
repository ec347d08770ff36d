use crate::controller::{extract_items, Collection, Controller};
use crate::domain::constants::{RESERVED_INTERFACE_NAME, UNASSIGNED_SITE_ID};
use crate::domain::models::{MatchResult, ObjectKind, ParentFilters, TagRequest};
use crate::domain::report::{Cell, Report, ReportLayout};
use crate::error::{Outcome, TaggerError, Warning};
use crate::services::apply::apply_change;
use crate::services::diagnostics::warn;
use crate::services::matcher::{check_do_match, check_match, Mutation};
use indicatif::ProgressBar;
use std::collections::HashMap;

/// Parent match results keyed by object id. Filled once, read-only after.
pub struct MatchLookup {
    pub sites: HashMap<String, MatchResult>,
    pub elements: HashMap<String, MatchResult>,
    /// (site id, element id) in element listing order.
    pub pairs: Vec<(String, String)>,
}

pub fn build_lookup<C: Controller>(
    api: &C,
    filters: &ParentFilters,
) -> Result<MatchLookup, TaggerError> {
    let sites = extract_items(api.list(&Collection::Sites), "sites")?;
    let elements = extract_items(api.list(&Collection::Elements), "elements")?;

    let site_matches = sites
        .iter()
        .filter_map(|site| {
            site.id()
                .map(|id| (id.to_string(), check_match(&filters.site, site)))
        })
        .collect();

    let mut element_matches = HashMap::new();
    let mut pairs = Vec::new();
    for element in &elements {
        let Some(element_id) = element.id() else {
            continue;
        };
        if let Some(site_id) = element.str_field("site_id") {
            pairs.push((site_id.to_string(), element_id.to_string()));
        }
        element_matches.insert(element_id.to_string(), check_match(&filters.element, element));
    }

    Ok(MatchLookup {
        sites: site_matches,
        elements: element_matches,
        pairs,
    })
}

fn parent_cells(key: &str, parent: &MatchResult) -> [Cell; 4] {
    [
        parent.name.clone(),
        Some(key.to_string()),
        Some(parent.value.as_text()),
        Some(parent.matched.to_string()),
    ]
}

fn interface_row(
    req: &TagRequest,
    filters: &ParentFilters,
    site: &MatchResult,
    element: &MatchResult,
    object: Option<&MatchResult>,
    detail: Option<String>,
) -> Vec<Cell> {
    let mut row = vec![Some(req.tag.clone()), Some(req.action.to_string())];
    row.extend(parent_cells(&filters.site.key, site));
    row.extend(parent_cells(&filters.element.key, element));
    match object {
        Some(result) => row.extend(parent_cells(&req.object.key, result)),
        None => row.extend([None, None, None, None]),
    }
    row.push(detail);
    row
}

/// Tags interfaces under every site/element pair whose site and element both
/// match their own predicates.
pub fn process_interfaces<C: Controller>(
    api: &C,
    req: &TagRequest,
    filters: &ParentFilters,
    progress: &ProgressBar,
) -> Result<Report, TaggerError> {
    let lookup = build_lookup(api, filters)?;
    tracing::info!(
        sites = lookup.sites.len(),
        pairs = lookup.pairs.len(),
        "built site/element match tables"
    );

    let mut report = Report::new(ReportLayout::Hierarchical, req.simulate);
    progress.set_length(lookup.pairs.len() as u64);

    for (site_id, element_id) in &lookup.pairs {
        progress.inc(1);
        if site_id == UNASSIGNED_SITE_ID {
            continue;
        }
        let Some(site) = lookup.sites.get(site_id) else {
            let warning = Warning::new(format!(
                "Unable to read site match data for site_id {}. Skipping.",
                site_id
            ));
            warn(&mut report, progress, warning);
            continue;
        };
        let Some(element) = lookup.elements.get(element_id) else {
            let warning = Warning::new(format!(
                "Unable to read element match data for element_id {}. Skipping.",
                element_id
            ));
            warn(&mut report, progress, warning);
            continue;
        };

        if !(site.matched && element.matched) {
            report.push_row(interface_row(req, filters, site, element, None, None));
            continue;
        }

        let collection = Collection::Interfaces {
            site_id: site_id.clone(),
            element_id: element_id.clone(),
        };
        let interfaces = extract_items(api.list(&collection), "interfaces")?;

        for interface in &interfaces {
            let Mutation { result, mutated } =
                check_do_match(&req.tag, req.action, &req.object, interface);
            if result.name.as_deref() == Some(RESERVED_INTERFACE_NAME) {
                continue;
            }

            let detail = match mutated {
                None => None,
                Some(modified) => match apply_change(
                    api,
                    &collection,
                    ObjectKind::Interfaces,
                    interface,
                    &modified,
                    req.simulate,
                ) {
                    Outcome::Done(detail) => Some(detail),
                    Outcome::Recoverable(warning) => {
                        warn(&mut report, progress, warning);
                        continue;
                    }
                },
            };
            report.push_row(interface_row(
                req,
                filters,
                site,
                element,
                Some(&result),
                detail,
            ));
        }
    }

    progress.finish_and_clear();
    Ok(report)
}
