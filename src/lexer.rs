//! Profile-driven lexer: a comment/literal-aware state machine that emits
//! identifier tokens with precise `(line, col_start, col_end, byte_start,
//! byte_end)` spans. See SPEC_FULL.md §4.1.
//!
//! The lexer never fails at scan time — unterminated comments and literals
//! are tolerated and consume to end of input. Construction (regex
//! compilation, mode validation) is the only fallible step.

use regex::Regex;

use crate::errors::ConfigError;
use crate::model::{LanguageProfile, IdentifierMode, Token, TokenKind};

/// Tracks `(line, col, byte)` independently as the lexer advances.
/// CR, LF, and CRLF each advance `line` by exactly one and reset `col` to 1;
/// `col` counts Unicode scalars, `byte` counts UTF-8 bytes.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    byte: usize,
    line: usize,
    col: usize,
}

impl Cursor {
    fn new() -> Self {
        Self { byte: 0, line: 1, col: 1 }
    }

    fn eof(&self, text: &str) -> bool {
        self.byte >= text.len()
    }

    fn remaining<'a>(&self, text: &'a str) -> &'a str {
        &text[self.byte..]
    }

    fn peek(&self, text: &str) -> Option<char> {
        self.remaining(text).chars().next()
    }

    /// Advances past exactly one logical position. A `\r\n` pair is treated
    /// as a single newline event (one line increment, two bytes consumed).
    fn bump(&mut self, text: &str) {
        let mut chars = self.remaining(text).chars();
        let Some(c) = chars.next() else { return };
        if c == '\r' {
            if chars.next() == Some('\n') {
                self.byte += 2;
            } else {
                self.byte += 1;
            }
            self.line += 1;
            self.col = 1;
        } else if c == '\n' {
            self.byte += 1;
            self.line += 1;
            self.col = 1;
        } else {
            self.byte += c.len_utf8();
            self.col += 1;
        }
    }

    /// Advances char-by-char until reaching `target_byte` (used to replay a
    /// multi-byte marker or regex match while keeping counters correct).
    fn advance_to(&mut self, text: &str, target_byte: usize) {
        while self.byte < target_byte && !self.eof(text) {
            self.bump(text);
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum State {
    Default,
    LineComment,
    BlockComment(usize),
    Str(char),
    Char(char),
}

/// Compiled, reusable lexer for one [`LanguageProfile`].
pub struct Lexer {
    id_re: Regex,
    line_comment_starts: Vec<String>,
    block_comment_starts: Vec<String>,
    block_comment_ends: Vec<String>,
    exclude_literals: bool,
    string_delims: Vec<char>,
    char_delims: Vec<char>,
    escape_char: char,
    allow_multiline_strings: bool,
}

fn match_any_prefix_indexed<'a>(markers: &'a [String], rest: &str) -> Option<(usize, &'a str)> {
    markers
        .iter()
        .enumerate()
        .find(|(_, m)| !m.is_empty() && rest.starts_with(m.as_str()))
        .map(|(i, m)| (i, m.as_str()))
}

impl Lexer {
    /// Compiles a lexer from `profile`. Fails if `identifier_rule.mode` is
    /// not `regex`, the pattern is missing, the pattern doesn't compile, or
    /// `block_comment_starts`/`block_comment_ends` are misaligned.
    pub fn new(profile: &LanguageProfile) -> Result<Self, ConfigError> {
        if profile.identifier_rule.mode != IdentifierMode::Regex {
            return Err(ConfigError::UnknownIdentifierMode(format!(
                "{:?}",
                profile.identifier_rule.mode
            )));
        }
        let pattern = profile.identifier_rule.pattern.as_deref().ok_or_else(|| {
            ConfigError::InvalidProfile("identifier_rule.pattern is required in regex mode".into())
        })?;
        let id_re = Regex::new(pattern).map_err(ConfigError::UncompilableIdentifierRegex)?;

        let cs = &profile.comment_syntax;
        if cs.block_comment_starts.len() != cs.block_comment_ends.len() {
            return Err(ConfigError::InvalidProfile(
                "comment_syntax: block_comment_starts and block_comment_ends must be 1-to-1 aligned"
                    .into(),
            ));
        }

        let ls = &profile.literal_syntax;
        Ok(Self {
            id_re,
            line_comment_starts: cs.line_comment_starts.clone(),
            block_comment_starts: cs.block_comment_starts.clone(),
            block_comment_ends: cs.block_comment_ends.clone(),
            exclude_literals: ls.exclude_literals,
            string_delims: ls.string_delims.clone(),
            char_delims: ls.char_delims.clone(),
            escape_char: ls.escape_char,
            allow_multiline_strings: ls.allow_multiline_strings,
        })
    }

    /// The compiled identifier regex, exposed so the declaration-discovery
    /// pass can reuse it verbatim for `#include` path scanning (rule 5).
    pub fn identifier_regex(&self) -> &Regex {
        &self.id_re
    }

    /// Lexes `text` into a token stream. Infallible: malformed/unterminated
    /// constructs are tolerated per SPEC_FULL.md §4.1.
    pub fn lex(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut cur = Cursor::new();
        let mut state = State::Default;

        while !cur.eof(text) {
            match state {
                State::Default => {
                    let rest = cur.remaining(text);

                    if let Some((_, marker)) =
                        match_any_prefix_indexed(&self.line_comment_starts, rest)
                    {
                        let target = cur.byte + marker.len();
                        cur.advance_to(text, target);
                        state = State::LineComment;
                        continue;
                    }

                    if let Some((idx, marker)) =
                        match_any_prefix_indexed(&self.block_comment_starts, rest)
                    {
                        let target = cur.byte + marker.len();
                        cur.advance_to(text, target);
                        state = State::BlockComment(idx);
                        continue;
                    }

                    if self.exclude_literals {
                        if let Some(ch) = cur.peek(text) {
                            if self.string_delims.contains(&ch) {
                                cur.bump(text);
                                state = State::Str(ch);
                                continue;
                            }
                            if self.char_delims.contains(&ch) {
                                cur.bump(text);
                                state = State::Char(ch);
                                continue;
                            }
                        }
                    }

                    if let Some(m) = self.id_re.find_at(text, cur.byte) {
                        if m.start() == cur.byte && !m.as_str().is_empty() {
                            let start = cur;
                            cur.advance_to(text, m.end());
                            tokens.push(Token {
                                kind: TokenKind::Identifier,
                                text: m.as_str().to_string(),
                                line: start.line,
                                col_start: start.col,
                                col_end: cur.col,
                                byte_start: start.byte,
                                byte_end: cur.byte,
                            });
                            continue;
                        }
                    }

                    if rest.starts_with("::") {
                        let start = cur;
                        cur.bump(text);
                        cur.bump(text);
                        tokens.push(Token {
                            kind: TokenKind::Punct,
                            text: "::".to_string(),
                            line: start.line,
                            col_start: start.col,
                            col_end: cur.col,
                            byte_start: start.byte,
                            byte_end: cur.byte,
                        });
                        continue;
                    }

                    if rest.starts_with('.') {
                        let start = cur;
                        cur.bump(text);
                        tokens.push(Token {
                            kind: TokenKind::Punct,
                            text: ".".to_string(),
                            line: start.line,
                            col_start: start.col,
                            col_end: cur.col,
                            byte_start: start.byte,
                            byte_end: cur.byte,
                        });
                        continue;
                    }

                    cur.bump(text);
                }

                State::LineComment => {
                    match cur.peek(text) {
                        Some('\n') | Some('\r') => {
                            cur.bump(text);
                            state = State::Default;
                        }
                        Some(_) => cur.bump(text),
                        None => {}
                    }
                }

                State::BlockComment(idx) => {
                    let end_marker = &self.block_comment_ends[idx];
                    if cur.remaining(text).starts_with(end_marker.as_str()) {
                        let target = cur.byte + end_marker.len();
                        cur.advance_to(text, target);
                        state = State::Default;
                    } else {
                        cur.bump(text);
                    }
                }

                State::Str(delim) => match cur.peek(text) {
                    Some(ch) if ch == self.escape_char => {
                        cur.bump(text);
                        if !cur.eof(text) {
                            cur.bump(text);
                        }
                    }
                    Some(ch) if ch == delim => {
                        cur.bump(text);
                        state = State::Default;
                    }
                    Some('\n') | Some('\r') if !self.allow_multiline_strings => {
                        cur.bump(text);
                        state = State::Default;
                    }
                    Some(_) => cur.bump(text),
                    None => {}
                },

                State::Char(delim) => match cur.peek(text) {
                    Some(ch) if ch == self.escape_char => {
                        cur.bump(text);
                        if !cur.eof(text) {
                            cur.bump(text);
                        }
                    }
                    Some(ch) if ch == delim || ch == '\n' || ch == '\r' => {
                        cur.bump(text);
                        state = State::Default;
                    }
                    Some(_) => cur.bump(text),
                    None => {}
                },
            }
        }

        tokens
    }
}
