//! Table-driven lexer engine.
//!
//! A token grammar is an ordered table of [`Rule`]s, one per token kind.
//! Each rule is either a regular-language pattern anchored at the current
//! cursor or a procedural scanner. [`Lexer::next_token`] tries the rules in
//! table order and the first match wins, so specific rules (commands) must be
//! declared before catch-alls (words).
//!
//! Matching never backtracks into consumed input: patterns are compiled with
//! a `\A` anchor and scanners only see the unconsumed tail. Tokens are
//! zero-copy slices of the source with their absolute byte offset attached.

use std::marker::PhantomData;

use regex::Regex;

use crate::error::LexError;
use crate::green::{Token, TokenData};
use crate::line_index::LineIndex;

/// A closed set of token kinds with an ordered rule table.
pub trait TokenKind: Copy + Eq + std::fmt::Debug + std::fmt::Display + Sized + 'static {
    /// The rule table, in match-priority order.
    fn rules() -> &'static [Rule<Self>];

    /// Whether tokens of this kind are trivia (whitespace, line breaks,
    /// comments). Trivia is preserved in the tree but skipped by lookahead.
    fn is_trivia(self) -> bool;
}

/// Successful outcome of a procedural scanner: the number of bytes matched
/// and the payload to attach.
pub struct ScanHit<'s> {
    pub len: usize,
    pub data: Option<TokenData<'s>>,
}

/// Fault raised by a procedural scanner; the engine attaches the position.
pub struct ScanFault {
    pub message: String,
}

/// A procedural matcher. It receives the unconsumed tail of the source and
/// either matches a prefix of it, declines, or fails the whole lex.
pub type ScanFn = for<'s> fn(&'s str) -> Result<Option<ScanHit<'s>>, ScanFault>;

enum Matcher {
    Pattern(Regex),
    Scan(ScanFn),
}

/// One entry of a token grammar's rule table.
pub struct Rule<K> {
    kind: K,
    matcher: Matcher,
}

impl<K> Rule<K> {
    /// A rule matching the longest prefix accepted by `pattern`.
    ///
    /// `pattern` is compiled with a `\A` anchor so it can only match at the
    /// cursor.
    pub fn pattern(kind: K, pattern: &str) -> Self {
        let re = Regex::new(&format!(r"\A(?:{pattern})")).expect("rule pattern must compile");
        Self {
            kind,
            matcher: Matcher::Pattern(re),
        }
    }

    /// A rule delegating to a procedural scanner.
    pub fn scan(kind: K, scan: ScanFn) -> Self {
        Self {
            kind,
            matcher: Matcher::Scan(scan),
        }
    }
}

/// Cursor over a source buffer, producing tokens for the grammar `K`.
///
/// `index` and `offset` advance in lockstep today; they are kept as separate
/// fields so a preprocessing layer could decouple them later.
pub struct Lexer<'s, K: TokenKind> {
    source: &'s str,
    index: usize,
    offset: usize,
    _kind: PhantomData<K>,
}

impl<'s, K: TokenKind> Lexer<'s, K> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            index: 0,
            offset: 0,
            _kind: PhantomData,
        }
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    /// Whether every byte of the source has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.index == self.source.len()
    }

    /// The unconsumed tail of the source. Non-empty after `tokenize` only
    /// when the rule table stalled on a byte no rule matches.
    pub fn remainder(&self) -> &'s str {
        &self.source[self.index..]
    }

    /// Produces the next token, or `None` at end of input and on a stall.
    pub fn next_token(&mut self) -> Result<Option<Token<'s, K>>, LexError> {
        if self.is_at_end() {
            return Ok(None);
        }
        let rest = self.remainder();
        for rule in K::rules() {
            match &rule.matcher {
                Matcher::Pattern(re) => {
                    if let Some(m) = re.find(rest) {
                        if m.end() == 0 {
                            continue;
                        }
                        return Ok(Some(self.advance(rule.kind, m.end(), None)));
                    }
                }
                Matcher::Scan(scan) => match scan(rest) {
                    Ok(Some(hit)) => {
                        return Ok(Some(self.advance(rule.kind, hit.len, hit.data)));
                    }
                    Ok(None) => {}
                    Err(fault) => return Err(self.error(fault.message)),
                },
            }
        }
        Ok(None)
    }

    /// Lexes the whole source into an ordered token buffer.
    ///
    /// Stops early on a stall; check [`remainder`](Self::remainder) to see
    /// whether every byte was consumed.
    pub fn tokenize(&mut self) -> Result<Vec<Token<'s, K>>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        log::trace!(
            "lexed {} tokens, {} leftover bytes",
            tokens.len(),
            self.remainder().len()
        );
        Ok(tokens)
    }

    /// Error describing the first byte the rule table could not match.
    pub fn leftover_error(&self) -> LexError {
        let found = self
            .remainder()
            .chars()
            .next()
            .map(|c| format!("'{c}'"))
            .unwrap_or_else(|| "end of input".into());
        self.error(format!("Unexpected character {found}"))
    }

    fn advance(&mut self, kind: K, len: usize, data: Option<TokenData<'s>>) -> Token<'s, K> {
        let text = &self.source[self.index..self.index + len];
        let token = Token {
            kind,
            data,
            text,
            offset: self.offset,
        };
        self.index += len;
        self.offset += len;
        token
    }

    fn error(&self, message: String) -> LexError {
        let (row, col) = LineIndex::new(self.source)
            .locate(self.offset)
            .unwrap_or((1, 1));
        LexError { message, row, col }
    }
}
