use crate::domain::constants::NO_CHANGES;
use crate::domain::models::TaggableObject;
use std::collections::HashSet;

fn dedupe(tags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Unique tags of `obj`, first occurrence wins.
pub fn extract_tags(obj: &TaggableObject) -> Vec<String> {
    dedupe(obj.raw_tags())
}

/// Copy of `obj` with every tag in `new_tags` appended unless already present.
/// Stored duplicates collapse to their first occurrence.
pub fn put_tags(new_tags: &[String], obj: &TaggableObject) -> TaggableObject {
    let mut tags = extract_tags(obj);
    for tag in new_tags {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    obj.with_tags(tags)
}

/// Copy of `obj` without any tag in `remove_tags`; the result is deduplicated.
pub fn remove_tags(remove_tags: &[String], obj: &TaggableObject) -> TaggableObject {
    let tags = obj
        .raw_tags()
        .into_iter()
        .filter(|t| !remove_tags.contains(t))
        .collect();
    obj.with_tags(dedupe(tags))
}

pub fn diff_tags(before: &[String], after: &[String]) -> String {
    let added: Vec<&String> = after.iter().filter(|t| !before.contains(t)).collect();
    let removed: Vec<&String> = before.iter().filter(|t| !after.contains(t)).collect();

    match (added.is_empty(), removed.is_empty()) {
        (false, false) => format!("added: {:?} removed: {:?}", added, removed),
        (false, true) => format!("added: {:?}", added),
        (true, false) => format!("removed: {:?}", removed),
        (true, true) => NO_CHANGES.to_string(),
    }
}

pub fn is_unchanged(diff: &str) -> bool {
    diff == NO_CHANGES
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::HashSet;

    /// Small alphabet so duplicates and overlaps are common.
    fn tag() -> impl Strategy<Value = String> {
        "[a-d]{1,2}"
    }

    fn tag_list() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(tag(), 0..8)
    }

    fn tagged(tags: &[String]) -> TaggableObject {
        TaggableObject::from(json!({"id": "o1", "name": "obj", "tags": tags}))
    }

    fn is_unique(tags: &[String]) -> bool {
        let mut seen = HashSet::new();
        tags.iter().all(|t| seen.insert(t))
    }

    proptest! {
        #[test]
        fn diff_of_identical_sets_is_no_change(tags in tag_list()) {
            prop_assert_eq!(diff_tags(&tags, &tags), NO_CHANGES);
        }

        #[test]
        fn diff_names_a_single_added_or_removed_tag(tags in tag_list(), x in "[e-f]{1,2}") {
            let before = extract_tags(&tagged(&tags));
            let mut after = before.clone();
            after.push(x.clone());
            prop_assert_eq!(diff_tags(&before, &after), format!("added: {:?}", [&x]));
            prop_assert_eq!(diff_tags(&after, &before), format!("removed: {:?}", [&x]));
        }

        #[test]
        fn put_twice_equals_put_once(tags in tag_list(), new in tag_list()) {
            let once = put_tags(&new, &tagged(&tags));
            let twice = put_tags(&new, &once);
            prop_assert_eq!(once.raw_tags(), twice.raw_tags());
            prop_assert!(is_unique(&once.raw_tags()));
            for t in &new {
                prop_assert!(once.raw_tags().contains(t));
            }
        }

        #[test]
        fn removed_tags_never_come_back(tags in tag_list(), gone in tag_list()) {
            let out = extract_tags(&remove_tags(&gone, &tagged(&tags)));
            prop_assert!(out.iter().all(|t| !gone.contains(t)));
        }

        #[test]
        fn extract_has_no_duplicates_and_keeps_first_order(tags in tag_list()) {
            let out = extract_tags(&tagged(&tags));
            prop_assert!(is_unique(&out));
            let mut expected: Vec<String> = Vec::new();
            for t in &tags {
                if !expected.contains(t) {
                    expected.push(t.clone());
                }
            }
            prop_assert_eq!(out, expected);
        }
    }
}
