//! FILENAME: parser/src/lexer.rs
//! PURPOSE: Scans a raw formula string and produces a stream of Tokens.
//! CONTEXT: This is the first stage of the parsing pipeline. It handles
//! whitespace skipping, identifier reading, and the three spellings of
//! every operator. Each token carries the byte offset where it starts.
//!
//! SUPPORTED OPERATORS:
//! - Unicode glyphs: ∀ ∃ ∧ ∨ ¬ → ↔
//! - ASCII symbols:  & | ~ ! -> <->
//! - Word forms:     forall exists and or not implies iff
//!
//! All three spellings of an operator lex to the same TokenKind, so the
//! parser is blind to which one was written.

use crate::error::FormulaError;
use crate::token::{Token, TokenKind};
use std::iter::Peekable;
use std::str::CharIndices;

pub struct Lexer<'a> {
    input: Peekable<CharIndices<'a>>,
    /// Total byte length of the input, used as the offset of the EOF token.
    len: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.char_indices().peekable(),
            len: input.len(),
        }
    }

    /// Advances the lexer and returns the next token.
    ///
    /// Characters that cannot start any token come back as
    /// `TokenKind::Illegal`; the parser turns those into lexical errors.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        match self.input.next() {
            Some((at, '(')) => Token::new(TokenKind::LParen, at),
            Some((at, ')')) => Token::new(TokenKind::RParen, at),
            Some((at, ',')) => Token::new(TokenKind::Comma, at),

            Some((at, '∀')) => Token::new(TokenKind::Forall, at),
            Some((at, '∃')) => Token::new(TokenKind::Exists, at),
            Some((at, '∧')) | Some((at, '&')) => Token::new(TokenKind::And, at),
            Some((at, '∨')) | Some((at, '|')) => Token::new(TokenKind::Or, at),
            Some((at, '¬')) | Some((at, '~')) | Some((at, '!')) => {
                Token::new(TokenKind::Not, at)
            }
            Some((at, '→')) => Token::new(TokenKind::Implies, at),
            Some((at, '↔')) => Token::new(TokenKind::Iff, at),

            // ASCII arrows: "->" and "<->"
            Some((at, '-')) => self.read_implies_arrow(at),
            Some((at, '<')) => self.read_iff_arrow(at),

            // Identifiers and word-form operators
            Some((at, ch)) if is_ident_char(ch) => self.read_word(at, ch),

            // End of input
            None => Token::new(TokenKind::Eof, self.len),

            // Unknown character
            Some((at, ch)) => Token::new(TokenKind::Illegal(ch), at),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, ch)) = self.input.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.input.next();
        }
    }

    /// Handles "->" after seeing '-'. A bare '-' is not a token.
    fn read_implies_arrow(&mut self, at: usize) -> Token {
        match self.input.peek() {
            Some(&(_, '>')) => {
                self.input.next();
                Token::new(TokenKind::Implies, at)
            }
            _ => Token::new(TokenKind::Illegal('-'), at),
        }
    }

    /// Handles "<->" after seeing '<'. A bare '<' is not a token.
    fn read_iff_arrow(&mut self, at: usize) -> Token {
        if let Some(&(_, '-')) = self.input.peek() {
            self.input.next();
            if let Some(&(_, '>')) = self.input.peek() {
                self.input.next();
                return Token::new(TokenKind::Iff, at);
            }
        }
        Token::new(TokenKind::Illegal('<'), at)
    }

    /// Reads a maximal run of identifier characters, then checks it against
    /// the reserved word-form operators. Identifier spelling is preserved
    /// exactly; keywords are matched case-sensitively in lowercase, so
    /// `Forall` is an ordinary identifier while `forall` is a quantifier.
    fn read_word(&mut self, at: usize, first_char: char) -> Token {
        let mut word = String::from(first_char);

        while let Some(&(_, ch)) = self.input.peek() {
            if is_ident_char(ch) {
                word.push(ch);
                self.input.next();
            } else {
                break;
            }
        }

        let kind = match word.as_str() {
            "forall" => TokenKind::Forall,
            "exists" => TokenKind::Exists,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            "implies" => TokenKind::Implies,
            "iff" => TokenKind::Iff,
            _ => TokenKind::Ident(word),
        };

        Token::new(kind, at)
    }
}

/// Returns true if `ch` can appear in an identifier.
/// Identifiers are maximal runs of alphanumeric characters and underscores.
fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Tokenizes the entire input up front, including the final EOF token.
///
/// Returns the first lexical error encountered, if any. The parser itself
/// pulls tokens lazily via [`Lexer::next_token`]; this function serves
/// callers that want the whole stream, and a fresh `Lexer` restarts the
/// sequence from the beginning.
pub fn tokenize(input: &str) -> Result<Vec<Token>, FormulaError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token();
        match token.kind {
            TokenKind::Illegal(character) => {
                return Err(FormulaError::Lex {
                    offset: token.offset,
                    character,
                });
            }
            TokenKind::Eof => {
                tokens.push(token);
                return Ok(tokens);
            }
            _ => tokens.push(token),
        }
    }
}
