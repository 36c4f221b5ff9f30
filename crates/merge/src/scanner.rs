use crate::MergeError;
use folio_types::{PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN};

/// One piece of scanned template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Literal(&'a str),
    /// A well-formed placeholder; `token` includes both delimiters.
    Placeholder { token: &'a str, offset: usize },
    /// An opening delimiter that does not start a well-formed placeholder.
    /// `text` is just the delimiter; scanning resumes right after it.
    Malformed { text: &'a str, error: MergeError },
}

/// Splits text into literals and placeholders in a single forward pass.
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// End of the placeholder opened at `open`, or `None` for empty braces.
    fn close_of(&self, open: usize) -> Result<Option<usize>, MergeError> {
        let bytes = self.text.as_bytes();
        let body_start = open + PLACEHOLDER_OPEN.len();
        let mut i = body_start;

        while i < bytes.len() {
            match bytes[i] {
                b'}' if self.text[i..].starts_with(PLACEHOLDER_CLOSE) => {
                    return Ok((i > body_start).then_some(i + PLACEHOLDER_CLOSE.len()));
                }
                b'{' => return Err(MergeError::Nested { offset: i }),
                b'}' | b'\n' => break,
                _ => i += 1,
            }
        }
        Err(MergeError::Unterminated { offset: open })
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.text.len() {
            return None;
        }
        let rest = &self.text[self.pos..];

        match rest.find(PLACEHOLDER_OPEN) {
            None => {
                self.pos = self.text.len();
                Some(Token::Literal(rest))
            }
            Some(0) if rest[PLACEHOLDER_OPEN.len()..].starts_with('{') => {
                // A brace run longer than the delimiter opens at its last two braces.
                self.pos += 1;
                Some(Token::Literal(&rest[..1]))
            }
            Some(0) => {
                let open = self.pos;
                match self.close_of(open) {
                    Ok(Some(end)) => {
                        self.pos = end;
                        Some(Token::Placeholder {
                            token: &self.text[open..end],
                            offset: open,
                        })
                    }
                    Ok(None) => {
                        let end = open + PLACEHOLDER_OPEN.len() + PLACEHOLDER_CLOSE.len();
                        self.pos = end;
                        Some(Token::Literal(&self.text[open..end]))
                    }
                    Err(error) => {
                        let end = open + PLACEHOLDER_OPEN.len();
                        self.pos = end;
                        Some(Token::Malformed {
                            text: &self.text[open..end],
                            error,
                        })
                    }
                }
            }
            Some(start) => {
                self.pos += start;
                Some(Token::Literal(&rest[..start]))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<Token<'_>> {
        Scanner::new(text).collect()
    }

    #[test]
    fn splits_literals_and_placeholders() {
        assert_eq!(
            tokens("Dear {{Name}}, see {{A.B}}."),
            vec![
                Token::Literal("Dear "),
                Token::Placeholder { token: "{{Name}}", offset: 5 },
                Token::Literal(", see "),
                Token::Placeholder { token: "{{A.B}}", offset: 19 },
                Token::Literal("."),
            ]
        );
    }

    #[test]
    fn unterminated_opening_is_malformed() {
        assert_eq!(
            tokens("x {{Name"),
            vec![
                Token::Literal("x "),
                Token::Malformed {
                    text: "{{",
                    error: MergeError::Unterminated { offset: 2 },
                },
                Token::Literal("Name"),
            ]
        );
    }

    #[test]
    fn newline_ends_a_placeholder_body() {
        let scanned = tokens("{{Na\nme}}");
        assert_eq!(
            scanned[0],
            Token::Malformed {
                text: "{{",
                error: MergeError::Unterminated { offset: 0 },
            }
        );
    }

    #[test]
    fn nested_opening_is_reported_at_inner_brace() {
        let scanned = tokens("{{a{{b}}}}");
        assert_eq!(
            scanned[0],
            Token::Malformed {
                text: "{{",
                error: MergeError::Nested { offset: 3 },
            }
        );
    }

    #[test]
    fn extra_leading_braces_are_literal() {
        assert_eq!(
            tokens("x {{{Name}}} y"),
            vec![
                Token::Literal("x "),
                Token::Literal("{"),
                Token::Placeholder { token: "{{Name}}", offset: 3 },
                Token::Literal("} y"),
            ]
        );
        assert_eq!(
            tokens("{{{{A}}"),
            vec![
                Token::Literal("{"),
                Token::Literal("{"),
                Token::Placeholder { token: "{{A}}", offset: 2 },
            ]
        );
    }

    #[test]
    fn empty_braces_are_plain_text() {
        assert_eq!(tokens("{{}}"), vec![Token::Literal("{{}}")]);
    }

    #[test]
    fn multibyte_text_is_preserved() {
        let joined: String = tokens("Señor {{Nombre}} – ok")
            .into_iter()
            .map(|t| match t {
                Token::Literal(s) => s,
                Token::Placeholder { token, .. } => token,
                Token::Malformed { text, .. } => text,
            })
            .collect();
        assert_eq!(joined, "Señor {{Nombre}} – ok");
    }
}
