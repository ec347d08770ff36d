use crate::domain::models::{FieldPattern, MatchResult, TagAction, TaggableObject};
use crate::services::tags::{put_tags, remove_tags};

/// Match of one object against a field predicate, plus the copy to submit.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub result: MatchResult,
    pub mutated: Option<TaggableObject>,
}

pub fn check_match(predicate: &FieldPattern, obj: &TaggableObject) -> MatchResult {
    let value = obj.field(&predicate.key);
    MatchResult {
        matched: predicate.is_match(&value.as_text()),
        name: obj.name().map(str::to_string),
        value,
    }
}

pub fn check_do_match(
    tag: &str,
    action: TagAction,
    predicate: &FieldPattern,
    obj: &TaggableObject,
) -> Mutation {
    let result = check_match(predicate, obj);
    if !result.matched {
        return Mutation {
            result,
            mutated: None,
        };
    }
    let tags = [tag.to_string()];
    let mutated = match action {
        TagAction::Add => put_tags(&tags, obj),
        TagAction::Remove => remove_tags(&tags, obj),
    };
    Mutation {
        result,
        mutated: Some(mutated),
    }
}
