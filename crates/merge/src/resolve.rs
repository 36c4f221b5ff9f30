use crate::scanner::{Scanner, Token};
use crate::MergeError;
use folio_types::MergeFieldValues;

/// Replaces every known placeholder in `text` with its value.
///
/// Unknown placeholders stay verbatim. Malformed openings are copied through
/// unchanged and logged. Empty text or an empty value map returns the text
/// as is.
pub fn resolve_merge_fields(text: &str, values: &MergeFieldValues) -> String {
    if text.is_empty() || values.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    for token in Scanner::new(text) {
        match token {
            Token::Literal(literal) => out.push_str(literal),
            Token::Placeholder { token, .. } => match values.get(token) {
                Some(value) => out.push_str(value),
                None => {
                    log::debug!("No value for placeholder {token}, leaving it unresolved");
                    out.push_str(token);
                }
            },
            Token::Malformed { text, error } => {
                log::warn!("{error} Copying it verbatim.");
                out.push_str(text);
            }
        }
    }
    out
}

/// Strict variant of [`resolve_merge_fields`]: the text is validated even
/// when there is nothing to substitute, and the first malformed placeholder
/// is returned as an error.
pub fn try_resolve_merge_fields(
    text: &str,
    values: &MergeFieldValues,
) -> Result<String, MergeError> {
    let mut out = String::with_capacity(text.len());
    for token in Scanner::new(text) {
        match token {
            Token::Literal(literal) => out.push_str(literal),
            Token::Placeholder { token, .. } => {
                out.push_str(values.get(token).map(String::as_str).unwrap_or(token))
            }
            Token::Malformed { error, .. } => return Err(error),
        }
    }
    Ok(out)
}

/// True when `key` is exactly one well-formed placeholder.
pub fn is_placeholder(key: &str) -> bool {
    let mut scanner = Scanner::new(key);
    matches!(
        (scanner.next(), scanner.next()),
        (Some(Token::Placeholder { .. }), None)
    )
}

/// Every well-formed placeholder in `text`, in order of appearance.
pub fn find_placeholders(text: &str) -> Vec<&str> {
    Scanner::new(text)
        .filter_map(|token| match token {
            Token::Placeholder { token, .. } => Some(token),
            _ => None,
        })
        .collect()
}

/// Checks on an operator-supplied value map.
pub trait MergeValues {
    /// Keys that can never match because they are not well-formed
    /// placeholders, e.g. `Name` without delimiters.
    fn invalid_keys(&self) -> Vec<&str>;
}

impl MergeValues for MergeFieldValues {
    fn invalid_keys(&self) -> Vec<&str> {
        self.keys()
            .map(String::as_str)
            .filter(|key| !is_placeholder(key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(pairs: &[(&str, &str)]) -> MergeFieldValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_known_placeholder() {
        let vals = values(&[("{{Name}}", "Ana")]);
        assert_eq!(resolve_merge_fields("Hello {{Name}}", &vals), "Hello Ana");
    }

    #[test]
    fn replaces_every_occurrence() {
        let vals = values(&[("{{Name}}", "Ana"), ("{{Amount}}", "$5")]);
        assert_eq!(
            resolve_merge_fields("{{Name}} owes {{Amount}}. Thanks {{Name}}!", &vals),
            "Ana owes $5. Thanks Ana!"
        );
    }

    #[test]
    fn unknown_placeholder_stays_verbatim() {
        let vals = values(&[("{{Name}}", "Ana")]);
        assert_eq!(
            resolve_merge_fields("{{Name}} and {{Other}}", &vals),
            "Ana and {{Other}}"
        );
    }

    #[test]
    fn special_characters_match_literally() {
        let vals = values(&[("{{A.B}}", "dot")]);
        assert_eq!(resolve_merge_fields("{{A.B}} {{AxB}}", &vals), "dot {{AxB}}");

        let vals = values(&[("{{(.*)}}", "star")]);
        assert_eq!(resolve_merge_fields("x{{(.*)}}y {{abc}}", &vals), "xstary {{abc}}");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let vals = values(&[("{{A}}", "{{B}}"), ("{{B}}", "bee")]);
        assert_eq!(resolve_merge_fields("{{A}} {{B}}", &vals), "{{B}} bee");
    }

    #[test]
    fn empty_inputs_return_text_unchanged() {
        assert_eq!(resolve_merge_fields("", &values(&[("{{A}}", "x")])), "");
        assert_eq!(
            resolve_merge_fields("Keep {{A}} as is", &MergeFieldValues::new()),
            "Keep {{A}} as is"
        );
    }

    #[test]
    fn lenient_resolution_copies_malformed_text() {
        let vals = values(&[("{{Name}}", "Ana")]);
        assert_eq!(
            resolve_merge_fields("Hi {{Name}}, {{broken", &vals),
            "Hi Ana, {{broken"
        );
        assert_eq!(resolve_merge_fields("{{a{{Name}}", &vals), "{{aAna");
    }

    #[test]
    fn strict_resolution_rejects_malformed_text() {
        let vals = values(&[("{{Name}}", "Ana")]);
        assert_eq!(
            try_resolve_merge_fields("Hi {{Name}}, {{broken", &vals),
            Err(MergeError::Unterminated { offset: 13 })
        );
        assert_eq!(
            try_resolve_merge_fields("{{a{{Name}}}}", &vals),
            Err(MergeError::Nested { offset: 3 })
        );
        assert_eq!(
            try_resolve_merge_fields("Hi {{Name}}", &vals).as_deref(),
            Ok("Hi Ana")
        );
    }

    #[test]
    fn triple_braces_still_resolve_the_inner_placeholder() {
        let vals = values(&[("{{Name}}", "Ana")]);
        assert_eq!(resolve_merge_fields("x {{{Name}}} y", &vals), "x {Ana} y");
        assert_eq!(
            try_resolve_merge_fields("x {{{Name}}} y", &vals).as_deref(),
            Ok("x {Ana} y")
        );
    }

    #[test]
    fn keys_without_delimiters_never_match() {
        let vals = values(&[("Name", "Ana"), ("{{Ok}}", "fine"), ("{{a}}b}}", "x")]);
        assert_eq!(resolve_merge_fields("Name {{Ok}}", &vals), "Name fine");
        assert_eq!(vals.invalid_keys(), vec!["Name", "{{a}}b}}"]);
    }

    #[test]
    fn lists_placeholders_in_order() {
        assert_eq!(
            find_placeholders("{{B}} then {{A}} then {{B}}"),
            vec!["{{B}}", "{{A}}", "{{B}}"]
        );
        assert!(is_placeholder("{{ClientName}}"));
        assert!(!is_placeholder("{{}}"));
        assert!(!is_placeholder("x{{A}}"));
    }
}
