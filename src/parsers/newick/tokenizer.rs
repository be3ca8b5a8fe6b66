use super::options::ParseOptions;
use crate::TreeFloat;
use crate::TreeParseError;

use std::borrow::Cow;
use std::fmt::Display;

pub(crate) const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Checks if a character ends an unquoted label or a branch length.
fn is_delimiter(character: char) -> bool {
    matches!(character, '(' | ')' | ',' | ':' | ';' | '[' | ']')
        || character.is_whitespace()
}

fn is_quote(character: char) -> bool {
    matches!(character, '\'' | '"')
}

/// A structural token of a NEWICK statement.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token<'a> {
    Open,
    Close,
    Comma,
    End,
    Label(Cow<'a, str>),
    Length(TreeFloat),
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Open => write!(f, "'('"),
            Token::Close => write!(f, "')'"),
            Token::Comma => write!(f, "','"),
            Token::End => write!(f, "';'"),
            Token::Label(label) => write!(f, "label \"{label}\""),
            Token::Length(length) => write!(f, "branch length {length}"),
        }
    }
}

/// Lazily splits a NEWICK statement into [Token]s.
///
/// Each item carries the byte offset at which the token starts. The
/// iterator is fused after the first error.
pub(crate) struct Tokenizer<'a> {
    source: &'a str,
    position: usize,
    underscores_to_spaces: bool,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(source: &'a str, options: &ParseOptions) -> Self {
        let position = if options.lenient && source.starts_with(BYTE_ORDER_MARK)
        {
            BYTE_ORDER_MARK.len_utf8()
        } else {
            0
        };

        Self {
            source,
            position,
            underscores_to_spaces: options.underscores_to_spaces,
            failed: false,
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.position..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Skips whitespace and bracketed comments.
    fn skip_ignorable(&mut self) -> Result<(), TreeParseError> {
        while let Some(character) = self.peek() {
            if character.is_whitespace() {
                self.position += character.len_utf8();
            } else if character == '[' {
                let start = self.position;
                match self.rest().find(']') {
                    Some(end) => self.position += end + 1,
                    None => {
                        return Err(TreeParseError::UnterminatedComment {
                            position: start,
                        });
                    }
                }
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Reads a quoted label; a doubled quote character is an escaped quote.
    fn quoted_label(
        &mut self,
        quote: char,
    ) -> Result<Cow<'a, str>, TreeParseError> {
        let start = self.position;
        let body_start = start + quote.len_utf8();
        let mut label = String::new();
        let mut segment_start = body_start;
        let mut chars = self.source[body_start..].char_indices().peekable();

        while let Some((offset, character)) = chars.next() {
            if character != quote {
                continue;
            }
            let at = body_start + offset;
            label.push_str(&self.source[segment_start..at]);
            if let Some((_, next)) = chars.peek()
                && *next == quote
            {
                label.push(quote);
                let _ = chars.next();
                segment_start = at + 2 * quote.len_utf8();
                continue;
            }
            self.position = at + quote.len_utf8();
            return Ok(Cow::Owned(label));
        }

        Err(TreeParseError::UnterminatedQuote { position: start })
    }

    fn unquoted_label(&mut self) -> Result<Cow<'a, str>, TreeParseError> {
        let start = self.position;
        let rest = self.rest();
        let end = rest.find(is_delimiter).unwrap_or(rest.len());
        let text = &rest[..end];

        if let Some(offset) = text.find(is_quote) {
            return Err(TreeParseError::UnexpectedCharacter {
                position: start + offset,
                character: text[offset..].chars().next().unwrap_or('\''),
            });
        }

        self.position += end;
        if self.underscores_to_spaces && text.contains('_') {
            Ok(Cow::Owned(text.replace('_', " ")))
        } else {
            Ok(Cow::Borrowed(text))
        }
    }

    /// Reads the number following a ':'.
    fn branch_length(&mut self) -> Result<TreeFloat, TreeParseError> {
        self.skip_ignorable()?;
        let start = self.position;
        let rest = self.rest();
        let end = rest.find(is_delimiter).unwrap_or(rest.len());
        let text = &rest[..end];
        self.position += end;

        text.parse::<TreeFloat>().map_err(|_| {
            TreeParseError::InvalidBranchLength {
                position: start,
                text: text.to_string(),
            }
        })
    }

    fn next_token(
        &mut self,
    ) -> Result<Option<(usize, Token<'a>)>, TreeParseError> {
        self.skip_ignorable()?;
        let start = self.position;
        let Some(character) = self.peek() else {
            return Ok(None);
        };

        let token = match character {
            '(' => {
                self.position += 1;
                Token::Open
            }
            ')' => {
                self.position += 1;
                Token::Close
            }
            ',' => {
                self.position += 1;
                Token::Comma
            }
            ';' => {
                self.position += 1;
                Token::End
            }
            ':' => {
                self.position += 1;
                Token::Length(self.branch_length()?)
            }
            ']' | BYTE_ORDER_MARK => {
                return Err(TreeParseError::UnexpectedCharacter {
                    position: start,
                    character,
                });
            }
            quote if is_quote(quote) => Token::Label(self.quoted_label(quote)?),
            _ => Token::Label(self.unquoted_label()?),
        };

        Ok(Some((start, token)))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<(usize, Token<'a>), TreeParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
