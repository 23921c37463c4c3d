//! Selector text → [`SelectorList`]
//!
//! Hand-written recursive descent over the character stream. The grammar is the
//! structural subset of CSS selectors that part extraction needs:
//!
//! ```text
//! list      := complex ( "," complex )*
//! complex   := compound ( combinator compound )*
//! combinator:= whitespace | ">" | "+" | "~"
//! compound  := ( ident | "*" )? ( "." ident | "#" ident | attribute )*
//! attribute := "[" ident ( op value )? "]"
//! op        := "=" | "~=" | "|=" | "^=" | "$=" | "*="
//! ```
//!
//! Pseudo-classes, pseudo-elements and namespaces are rejected with a message
//! naming the construct rather than silently ignored.

use super::{AttrOperator, Combinator, ComplexSelector, Compound, SelectorList, SimpleSelector};
use crate::error::SnippetError;

pub(super) fn parse_selector_list(selector: &str) -> Result<SelectorList, SnippetError> {
    if selector.trim().is_empty() {
        return Err(SnippetError::EmptySelector);
    }
    let mut parser = Parser {
        source: selector,
        chars: selector.chars().collect(),
        pos: 0,
    };
    let list = parser.parse_list()?;
    log::trace!("parsed selector '{selector}' into {} alternative(s)", list.0.len());
    Ok(list)
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl Parser<'_> {
    fn parse_list(&mut self) -> Result<SelectorList, SnippetError> {
        let mut selectors = Vec::new();
        loop {
            self.skip_whitespace();
            selectors.push(self.parse_complex()?);
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(',') => {
                    self.pos += 1;
                }
                Some(other) => return Err(self.error(format!("unexpected '{other}'"))),
            }
        }
        Ok(SelectorList(selectors))
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, SnippetError> {
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_whitespace = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => Combinator::Child,
                Some('+') => Combinator::NextSibling,
                Some('~') => Combinator::SubsequentSibling,
                Some(_) if had_whitespace => Combinator::Descendant,
                Some(other) => return Err(self.error(format!("unexpected '{other}'"))),
            };
            if combinator != Combinator::Descendant {
                self.pos += 1;
                self.skip_whitespace();
            }
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }

        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    fn parse_compound(&mut self) -> Result<Compound, SnippetError> {
        let mut compound = Compound::default();
        let mut universal = false;

        match self.peek() {
            Some('*') => {
                self.pos += 1;
                universal = true;
            }
            Some(c) if is_ident_start(c) => {
                compound.tag = Some(self.parse_ident()?.to_ascii_lowercase());
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('.') => {
                    self.pos += 1;
                    compound.simple.push(SimpleSelector::Class(self.parse_ident()?));
                }
                Some('#') => {
                    self.pos += 1;
                    compound.simple.push(SimpleSelector::Id(self.parse_ident()?));
                }
                Some('[') => {
                    self.pos += 1;
                    compound.simple.push(self.parse_attribute()?);
                }
                Some(':') => return Err(self.error("pseudo-classes are not supported")),
                Some('|') => return Err(self.error("namespaces are not supported")),
                _ => break,
            }
        }

        if !universal && compound.tag.is_none() && compound.simple.is_empty() {
            return Err(match self.peek() {
                Some(c) => self.error(format!("expected a selector, found '{c}'")),
                None => self.error("expected a selector, found end of input"),
            });
        }
        Ok(compound)
    }

    fn parse_attribute(&mut self) -> Result<SimpleSelector, SnippetError> {
        self.skip_whitespace();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let operator = match self.peek() {
            Some(']') => {
                self.pos += 1;
                return Ok(SimpleSelector::Attribute { name, test: None });
            }
            Some('=') => {
                self.pos += 1;
                AttrOperator::Equals
            }
            Some(c @ ('~' | '|' | '^' | '$' | '*')) => {
                self.pos += 1;
                if self.peek() != Some('=') {
                    return Err(self.error(format!("expected '=' after '{c}'")));
                }
                self.pos += 1;
                match c {
                    '~' => AttrOperator::Includes,
                    '|' => AttrOperator::DashMatch,
                    '^' => AttrOperator::Prefix,
                    '$' => AttrOperator::Suffix,
                    _ => AttrOperator::Substring,
                }
            }
            Some(other) => return Err(self.error(format!("unexpected '{other}' in attribute"))),
            None => return Err(self.error("unterminated attribute selector")),
        };

        self.skip_whitespace();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                self.parse_quoted(quote)?
            }
            Some(_) => self.parse_ident()?,
            None => return Err(self.error("unterminated attribute selector")),
        };
        self.skip_whitespace();

        if self.peek() != Some(']') {
            return Err(self.error("expected ']' to close attribute selector"));
        }
        self.pos += 1;

        Ok(SimpleSelector::Attribute {
            name,
            test: Some((operator, value)),
        })
    }

    fn parse_quoted(&mut self, quote: char) -> Result<String, SnippetError> {
        let mut value = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(value),
                Some('\\') => match self.bump() {
                    Some(escaped) => value.push(escaped),
                    None => return Err(self.error("unterminated string")),
                },
                Some(c) => value.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn parse_ident(&mut self) -> Result<String, SnippetError> {
        let mut ident = String::new();
        match self.peek() {
            Some(c) if is_ident_start(c) => {}
            Some(c) => return Err(self.error(format!("expected an identifier, found '{c}'"))),
            None => return Err(self.error("expected an identifier, found end of input")),
        }
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.pos += 1;
                match self.bump() {
                    Some(escaped) => ident.push(escaped),
                    None => return Err(self.error("dangling escape")),
                }
            } else if is_ident_char(c) {
                ident.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        Ok(ident)
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn error(&self, reason: impl Into<String>) -> SnippetError {
        SnippetError::invalid_selector(
            self.source,
            format!("{} (at offset {})", reason.into(), self.pos),
        )
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-' || c == '\\' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}
