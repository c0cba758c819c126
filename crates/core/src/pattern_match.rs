//! Pattern matching for pattern-matcher shorthands.
//!
//! A compact, `no_std`-compatible regular expression subset. Patterns are
//! compiled once into a token list and matched by backtracking.
//!
//! Supported syntax:
//! - `.`: any character
//! - `*`: zero or more (greedy)
//! - `+`: one or more (greedy)
//! - `?`: zero or one
//! - `^` / `$`: anchors
//! - `\d` `\D` `\w` `\W` `\s` `\S`: character classes
//! - `[abc]` `[a-z]` `[^abc]`: bracket classes
//! - `\.` `\\` `\n` `\t` etc.: escapes
//!
//! Groups, alternation and counted repetition are rejected at compile time.

use crate::error::{Error, Result};
use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Escape {
    Digit,
    NotDigit,
    Word,
    NotWord,
    Space,
    NotSpace,
}

impl Escape {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'd' => Some(Escape::Digit),
            'D' => Some(Escape::NotDigit),
            'w' => Some(Escape::Word),
            'W' => Some(Escape::NotWord),
            's' => Some(Escape::Space),
            'S' => Some(Escape::NotSpace),
            _ => None,
        }
    }

    fn matches(self, c: char) -> bool {
        match self {
            Escape::Digit => c.is_ascii_digit(),
            Escape::NotDigit => !c.is_ascii_digit(),
            Escape::Word => c.is_ascii_alphanumeric() || c == '_',
            Escape::NotWord => !(c.is_ascii_alphanumeric() || c == '_'),
            Escape::Space => c.is_whitespace(),
            Escape::NotSpace => !c.is_whitespace(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum ClassItem {
    Range(char, char),
    Escape(Escape),
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Atom {
    Any,
    Literal(char),
    Escape(Escape),
    Class { items: Vec<ClassItem>, negated: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Repeat {
    Once,
    ZeroOrOne,
    ZeroOrMore,
    OneOrMore,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Token {
    atom: Atom,
    repeat: Repeat,
}

/// A compiled pattern.
///
/// ```
/// use ordo_core::Pattern;
/// let p = Pattern::new("^[a-z]+\\d+$").unwrap();
/// assert!(p.is_match("abc123"));
/// assert!(!p.is_match("123abc"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    tokens: Vec<Token>,
    anchor_start: bool,
    anchor_end: bool,
    ignore_case: bool,
}

impl Pattern {
    /// Compiles a pattern.
    pub fn new(source: &str) -> Result<Self> {
        let chars: Vec<char> = source.chars().collect();
        let mut i = 0;
        let mut anchor_start = false;
        let mut anchor_end = false;
        let mut tokens = Vec::new();

        if chars.first() == Some(&'^') {
            anchor_start = true;
            i = 1;
        }

        while i < chars.len() {
            let atom = match chars[i] {
                '$' if i + 1 == chars.len() => {
                    anchor_end = true;
                    break;
                }
                '.' => {
                    i += 1;
                    Atom::Any
                }
                '\\' => {
                    let next = *chars
                        .get(i + 1)
                        .ok_or_else(|| Error::invalid_pattern(source, "trailing backslash"))?;
                    i += 2;
                    match Escape::from_char(next) {
                        Some(escape) => Atom::Escape(escape),
                        None => Atom::Literal(unescape(next)),
                    }
                }
                '[' => {
                    let (atom, next) = compile_class(source, &chars, i + 1)?;
                    i = next;
                    atom
                }
                '*' | '+' | '?' => {
                    return Err(Error::invalid_pattern(
                        source,
                        "quantifier without a preceding atom",
                    ));
                }
                '(' | ')' | '|' => {
                    return Err(Error::invalid_pattern(
                        source,
                        "groups and alternation are not supported",
                    ));
                }
                c => {
                    i += 1;
                    Atom::Literal(c)
                }
            };

            let repeat = match chars.get(i) {
                Some('*') => Repeat::ZeroOrMore,
                Some('+') => Repeat::OneOrMore,
                Some('?') => Repeat::ZeroOrOne,
                _ => Repeat::Once,
            };
            if repeat != Repeat::Once {
                i += 1;
                if matches!(chars.get(i), Some('*' | '+' | '?')) {
                    return Err(Error::invalid_pattern(source, "stacked quantifiers"));
                }
            }
            tokens.push(Token { atom, repeat });
        }

        Ok(Self {
            source: source.to_string(),
            tokens,
            anchor_start,
            anchor_end,
            ignore_case: false,
        })
    }

    /// Makes the pattern case-insensitive.
    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    /// Returns the source text the pattern was compiled from.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns true if the pattern matches anywhere in `text` (or at the
    /// anchored positions when `^`/`$` are present).
    pub fn is_match(&self, text: &str) -> bool {
        let chars: Vec<char> = text.chars().collect();
        let last_start = if self.anchor_start { 0 } else { chars.len() };
        (0..=last_start).any(|start| self.match_here(&self.tokens, &chars, start).is_some())
    }

    fn match_here(&self, tokens: &[Token], text: &[char], pos: usize) -> Option<usize> {
        let Some((token, rest)) = tokens.split_first() else {
            return if self.anchor_end && pos != text.len() {
                None
            } else {
                Some(pos)
            };
        };

        let hit = |at: usize| at < text.len() && self.atom_matches(&token.atom, text[at]);

        match token.repeat {
            Repeat::Once => {
                if hit(pos) {
                    self.match_here(rest, text, pos + 1)
                } else {
                    None
                }
            }
            Repeat::ZeroOrOne => {
                if hit(pos) {
                    if let Some(end) = self.match_here(rest, text, pos + 1) {
                        return Some(end);
                    }
                }
                self.match_here(rest, text, pos)
            }
            Repeat::ZeroOrMore | Repeat::OneOrMore => {
                let min = usize::from(token.repeat == Repeat::OneOrMore);
                let mut count = 0;
                while hit(pos + count) {
                    count += 1;
                }
                // greedy: give characters back one at a time
                while count >= min {
                    if let Some(end) = self.match_here(rest, text, pos + count) {
                        return Some(end);
                    }
                    if count == 0 {
                        break;
                    }
                    count -= 1;
                }
                None
            }
        }
    }

    fn atom_matches(&self, atom: &Atom, c: char) -> bool {
        match atom {
            Atom::Any => c != '\n',
            Atom::Literal(l) => *l == c || (self.ignore_case && fold(*l) == fold(c)),
            Atom::Escape(escape) => escape.matches(c),
            Atom::Class { items, negated } => {
                let found = items.iter().any(|item| self.class_item_matches(item, c));
                found != *negated
            }
        }
    }

    fn class_item_matches(&self, item: &ClassItem, c: char) -> bool {
        match item {
            ClassItem::Escape(escape) => escape.matches(c),
            ClassItem::Range(lo, hi) => {
                let within = |ch: char| *lo <= ch && ch <= *hi;
                if within(c) {
                    return true;
                }
                self.ignore_case
                    && (c.to_lowercase().any(within) || c.to_uppercase().any(within))
            }
        }
    }
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        other => other,
    }
}

/// Compiles a bracket class starting just after `[`; returns the atom and
/// the index just past the closing `]`.
fn compile_class(source: &str, chars: &[char], start: usize) -> Result<(Atom, usize)> {
    let unterminated = || Error::invalid_pattern(source, "unterminated character class");
    let mut i = start;
    let mut negated = false;
    let mut items = Vec::new();

    if chars.get(i) == Some(&'^') {
        negated = true;
        i += 1;
    }

    loop {
        let c = *chars.get(i).ok_or_else(unterminated)?;
        if c == ']' {
            return Ok((Atom::Class { items, negated }, i + 1));
        }

        let lo = if c == '\\' {
            let escaped = *chars.get(i + 1).ok_or_else(unterminated)?;
            i += 2;
            if let Some(escape) = Escape::from_char(escaped) {
                items.push(ClassItem::Escape(escape));
                continue;
            }
            unescape(escaped)
        } else {
            i += 1;
            c
        };

        let is_range = chars.get(i) == Some(&'-') && chars.get(i + 1).map_or(false, |&n| n != ']');
        if !is_range {
            items.push(ClassItem::Range(lo, lo));
            continue;
        }

        let hi = match chars[i + 1] {
            '\\' => {
                let escaped = *chars.get(i + 2).ok_or_else(unterminated)?;
                i += 3;
                unescape(escaped)
            }
            other => {
                i += 2;
                other
            }
        };
        if hi < lo {
            return Err(Error::invalid_pattern(source, "range out of order in character class"));
        }
        items.push(ClassItem::Range(lo, hi));
    }
}
