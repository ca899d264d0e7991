use serde_json::Value;

use crate::json::{field, is_populated, object_or_null, populated, render_cell, to_loose_json};

/// `(parent, key)` lookups tried in order when naming a review's author.
pub const AUTHOR_RULES: [(&str, &str); 5] = [
    ("user", "markupDisplayName"),
    ("user", "displayName"),
    ("author", "markupDisplayName"),
    ("author", "displayName"),
    ("author", "name"),
];

pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Top-level keys that may carry the review date.
pub const DATE_KEYS: [&str; 5] = [
    "localizedDateTimeForBusiness",
    "localizedDate",
    "createdAt",
    "timeCreated",
    "date",
];

/// Keys consulted when the date is a nested object.
pub const DATE_SUBKEYS: [&str; 4] = ["localeDateTimeForBusiness", "display", "value", "isoString"];

/// Outcome of a single resolver before defaults are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Found(&'a Value),
    /// An object none of the rules recognised; kept as its JSON text.
    Unrecognized(&'a Value),
    Absent,
}

impl Resolved<'_> {
    pub fn render_or(self, default: &str) -> String {
        match self {
            Resolved::Found(v) => render_cell(v),
            Resolved::Unrecognized(v) => to_loose_json(v),
            Resolved::Absent => default.to_string(),
        }
    }
}

pub fn resolve_author(node: &Value) -> Resolved<'_> {
    AUTHOR_RULES
        .iter()
        .find_map(|(parent, key)| populated(object_or_null(node, parent), key))
        .map_or(Resolved::Absent, Resolved::Found)
}

pub fn resolve_date(node: &Value) -> Resolved<'_> {
    let Some(raw) = DATE_KEYS.iter().find_map(|key| populated(node, key)) else {
        return Resolved::Absent;
    };

    if !raw.is_object() {
        return Resolved::Found(raw);
    }

    DATE_SUBKEYS
        .iter()
        .find_map(|key| populated(raw, key))
        .map_or(Resolved::Unrecognized(raw), Resolved::Found)
}

pub fn resolve_text(node: &Value) -> Resolved<'_> {
    match field(node, "text") {
        Some(text @ Value::String(_)) => Resolved::Found(text),
        Some(obj @ Value::Object(_)) => field(obj, "full")
            .filter(|full| is_populated(full))
            .map_or(Resolved::Absent, Resolved::Found),
        _ => Resolved::Absent,
    }
}

pub fn resolve_rating(node: &Value) -> Resolved<'_> {
    field(node, "rating").map_or(Resolved::Absent, Resolved::Found)
}

/// Display name of the reviewer, `"Unknown"` when no rule matches.
pub fn author_of(node: &Value) -> String {
    resolve_author(node).render_or(UNKNOWN_AUTHOR)
}

/// Best-effort date text. Unrecognised date objects come back as JSON so
/// the column is never silently blank.
pub fn date_of(node: &Value) -> String {
    resolve_date(node).render_or("")
}

pub fn text_of(node: &Value) -> String {
    resolve_text(node).render_or("")
}

pub fn rating_of(node: &Value) -> String {
    resolve_rating(node).render_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn author_prefers_markup_name() {
        let node = json!({"user": {"displayName": "plain", "markupDisplayName": "Markup"}});
        assert_eq!(author_of(&node), "Markup");
    }

    #[test]
    fn author_display_name_without_markup() {
        let node = json!({"user": {"displayName": "X"}});
        assert_eq!(author_of(&node), "X");
    }

    #[test]
    fn author_falls_through_to_author_name() {
        let node = json!({"user": {"displayName": ""}, "author": {"name": "Bob"}});
        assert_eq!(author_of(&node), "Bob");
    }

    #[test]
    fn author_object_rules_in_order() {
        let node = json!({"author": {"name": "n", "displayName": "d", "markupDisplayName": "m"}});
        assert_eq!(author_of(&node), "m");

        let node = json!({"author": {"name": "n", "displayName": "d"}});
        assert_eq!(author_of(&node), "d");

        let node = json!({"user": {}, "author": {"markupDisplayName": "m", "name": "n"}});
        assert_eq!(author_of(&node), "m");
    }

    #[test]
    fn author_user_beats_author() {
        let node = json!({"author": {"markupDisplayName": "a"}, "user": {"displayName": "u"}});
        assert_eq!(author_of(&node), "u");
    }

    #[test]
    fn author_skips_non_object_parents() {
        let node = json!({"user": "amy", "author": 7});
        assert_eq!(resolve_author(&node), Resolved::Absent);
        assert_eq!(author_of(&node), "Unknown");
    }

    #[test]
    fn author_unknown_when_nothing_usable() {
        assert_eq!(author_of(&json!({})), "Unknown");
        assert_eq!(author_of(&json!({"user": null, "author": {"name": null}})), "Unknown");
    }

    #[test]
    fn date_plain_string() {
        assert_eq!(date_of(&json!({"date": "2021-01-01"})), "2021-01-01");
    }

    #[test]
    fn date_key_priority() {
        let node = json!({"date": "late", "createdAt": "early"});
        assert_eq!(date_of(&node), "early");
    }

    #[test]
    fn date_skips_empty_key() {
        let node = json!({"localizedDate": "", "date": "2020-02-02"});
        assert_eq!(date_of(&node), "2020-02-02");
    }

    #[test]
    fn date_nested_subkey_priority() {
        let node = json!({"localizedDate": {"isoString": "2021-03-04T00:00:00Z", "display": "Mar 4, 2021"}});
        assert_eq!(date_of(&node), "Mar 4, 2021");
    }

    #[test]
    fn date_locale_subkey_beats_display() {
        let node = json!({"date": {"display": "a", "localeDateTimeForBusiness": "b"}});
        assert_eq!(date_of(&node), "b");
    }

    #[test]
    fn date_value_beats_iso_string() {
        let node = json!({"date": {"value": "v", "isoString": "i"}});
        assert_eq!(date_of(&node), "v");

        let node = json!({"date": {"isoString": "i", "value": ""}});
        assert_eq!(date_of(&node), "i");
    }

    #[test]
    fn date_top_level_keys_in_order() {
        let node = json!({
            "date": "5",
            "timeCreated": "4",
            "createdAt": "3",
            "localizedDate": "2",
            "localizedDateTimeForBusiness": "1"
        });
        assert_eq!(date_of(&node), "1");
        assert_eq!(date_of(&json!({"date": "5", "timeCreated": "4"})), "4");
        assert_eq!(date_of(&json!({"date": "5", "localizedDate": "2", "createdAt": "3"})), "2");
    }

    #[test]
    fn boolean_rating_uses_capitalised_text() {
        assert_eq!(rating_of(&json!({"rating": true})), "True");
        assert_eq!(rating_of(&json!({"rating": false})), "False");
    }

    #[test]
    fn date_unrecognized_object_is_serialized() {
        let node = json!({"timeCreated": {"epoch": 1614816000, "tz": "UTC"}});
        assert!(matches!(resolve_date(&node), Resolved::Unrecognized(_)));
        assert_eq!(date_of(&node), r#"{"epoch": 1614816000, "tz": "UTC"}"#);
    }

    #[test]
    fn date_numeric_scalar_passes_through() {
        assert_eq!(date_of(&json!({"createdAt": 1614816000})), "1614816000");
    }

    #[test]
    fn date_absent_is_empty() {
        assert_eq!(resolve_date(&json!({"rating": 5})), Resolved::Absent);
        assert_eq!(date_of(&json!({})), "");
    }

    #[test]
    fn text_from_full() {
        assert_eq!(text_of(&json!({"text": {"full": "great food"}})), "great food");
    }

    #[test]
    fn text_variants() {
        assert_eq!(text_of(&json!({"text": "Nice"})), "Nice");
        assert_eq!(text_of(&json!({})), "");
        assert_eq!(text_of(&json!({"text": null})), "");
        assert_eq!(text_of(&json!({"text": {"full": null}})), "");
        assert_eq!(text_of(&json!({"text": {"snippet": "cut"}})), "");
        assert_eq!(text_of(&json!({"text": 42})), "");
    }

    #[test]
    fn rating_copied_verbatim() {
        assert_eq!(rating_of(&json!({"rating": 5})), "5");
        assert_eq!(rating_of(&json!({"rating": 4.5})), "4.5");
        assert_eq!(rating_of(&json!({"rating": "four"})), "four");
        assert_eq!(rating_of(&json!({"rating": 0})), "0");
        assert_eq!(rating_of(&json!({})), "");
    }
}
