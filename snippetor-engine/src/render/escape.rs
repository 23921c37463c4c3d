//! Text clean-up for rendered markup.
//!
//! Two independent passes:
//! - comment unshielding: `<!--?php ... ?-->` back to `<?php ... ?>`, applied to a
//!   complete serialized chunk before it is split into lines
//! - sigil escaping: `$name` becomes `\$name` so the snippet engine inserts it
//!   literally, applied once per emitted line

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";

/// Undo the comment shielding the parser applies to `<?...?>` blocks.
///
/// Only a whole comment whose text starts and ends with `?` is turned back; every
/// other comment, including one that merely ends in `?`, is kept as written. A
/// shielded block may span lines, so pass the complete serialized text.
pub fn unshield_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(COMMENT_OPEN) {
        out.push_str(&rest[..start]);
        let comment = &rest[start..];
        let Some(close) = comment[COMMENT_OPEN.len()..].find(COMMENT_CLOSE) else {
            out.push_str(comment);
            return out;
        };
        let end = COMMENT_OPEN.len() + close + COMMENT_CLOSE.len();
        let inner = &comment[COMMENT_OPEN.len()..end - COMMENT_CLOSE.len()];
        match inner
            .strip_prefix('?')
            .and_then(|body| body.strip_suffix('?'))
        {
            Some(body) => {
                out.push_str("<?");
                out.push_str(body);
                out.push_str("?>");
            }
            None => out.push_str(&comment[..end]),
        }
        rest = &comment[end..];
    }
    out.push_str(rest);
    out
}

/// Insert `escape` before every `sigil` that starts a variable reference.
///
/// A reference is the sigil followed by an identifier start: an ASCII letter, `_`,
/// or any character at or above U+007F (PHP accepts bytes 0x7F-0xFF there, which
/// covers every non-ASCII character of UTF-8 source). A sigil followed by anything
/// else is left alone.
pub fn escape_sigils(text: &str, sigil: char, escape: char) -> String {
    let mut escaped = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == sigil && chars.peek().is_some_and(|&next| is_identifier_start(next)) {
            escaped.push(escape);
        }
        escaped.push(c);
    }
    escaped
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || u32::from(c) >= 0x7f
}
