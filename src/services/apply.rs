use crate::controller::{Collection, Controller};
use crate::domain::constants::{ELEMENT_NULL_FIELD, ELEMENT_PUT_FIELDS};
use crate::domain::models::{ObjectKind, TaggableObject};
use crate::error::{Outcome, Warning};
use crate::services::tags::{diff_tags, extract_tags, is_unchanged};
use serde_json::Value;

/// Element updates accept only the allow-listed fields, with `sw_obj` null.
pub fn element_payload(modified: &TaggableObject) -> TaggableObject {
    modified
        .retain_fields(ELEMENT_PUT_FIELDS)
        .with_field(ELEMENT_NULL_FIELD, Value::Null)
}

fn update_payload(kind: ObjectKind, modified: &TaggableObject) -> TaggableObject {
    match kind {
        ObjectKind::Elements => element_payload(modified),
        _ => modified.clone(),
    }
}

/// Decides and performs the write for one matched object; returns the change
/// detail for the report.
///
/// Simulated and no-op changes report the locally computed diff and never
/// call the controller. A real write reports the diff against the tags the
/// controller sent back.
pub fn apply_change<C: Controller>(
    api: &C,
    collection: &Collection,
    kind: ObjectKind,
    original: &TaggableObject,
    modified: &TaggableObject,
    simulate: bool,
) -> Outcome<String> {
    let before = extract_tags(original);
    let planned = diff_tags(&before, &extract_tags(modified));
    if simulate || is_unchanged(&planned) {
        return Outcome::Done(planned);
    }

    let name = original.name().unwrap_or_default();
    let Some(id) = original.id() else {
        return Outcome::Recoverable(Warning::new(format!(
            "'{}' has no id, tag change skipped.",
            name
        )));
    };

    let payload = update_payload(kind, modified);
    match api.update(collection, id, &payload.to_value()) {
        Ok(resp) if resp.is_success() => {
            let returned = TaggableObject::from_value(resp.body);
            Outcome::Done(diff_tags(&before, &extract_tags(&returned)))
        }
        Ok(resp) => Outcome::Recoverable(Warning::with_detail(
            format!("'{}' tag change failed:", name),
            resp.detail(),
        )),
        Err(e) => Outcome::Recoverable(Warning::with_detail(
            format!("'{}' tag change failed:", name),
            format!("{:#}", e),
        )),
    }
}
