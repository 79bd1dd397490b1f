//! FILENAME: parser/src/parser.rs
//! PURPOSE: Recursive descent parser that converts a stream of Tokens into
//! a Formula AST.
//! CONTEXT: This is the second stage of the parsing pipeline. It pulls
//! tokens from the Lexer one at a time (one-token lookahead, no
//! backtracking) and builds the tree bottom-up through one function per
//! precedence level.
//!
//! GRAMMAR (lowest to highest binding):
//!   formula     --> iff
//!   iff         --> implication ( "↔" implication )*    // left-associative
//!   implication --> disjunction ( "→" implication )?    // right-associative
//!   disjunction --> conjunction ( "∨" conjunction )*
//!   conjunction --> unit ( "∧" unit )*
//!   unit        --> "¬" unit | ("∀" | "∃") IDENT unit | atom
//!   atom        --> IDENT [ "(" term ( "," term )* ")" ] | "(" formula ")"
//!   term        --> IDENT [ "(" term ( "," term )* ")" ]
//!
//! A quantifier's body is the next unit-level formula only, so
//! `∀x P(x) ∧ Q` conjoins outside the quantifier while `∀x (P(x) ∧ Q)`
//! scopes the whole conjunction.

use crate::ast::{Connective, Formula, Quantifier, Term};
use crate::error::{FormulaError, ParseResult};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Default bound on grammar recursion depth. Nesting is data-controlled
/// (parentheses, negation chains, quantifier prefixes, function terms), so
/// the parser refuses inputs that would otherwise risk stack exhaustion.
pub const DEFAULT_DEPTH_LIMIT: usize = 256;

/// The Parser holds the lexer, the single lookahead token, and the
/// quantifier scope used to classify identifiers in term position.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    /// Variables bound by the quantifiers enclosing the current position,
    /// innermost last.
    scope: Vec<String>,
    depth: usize,
    depth_limit: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser from an input string.
    /// Automatically advances to the first token.
    pub fn new(input: &'a str) -> Self {
        Self::with_depth_limit(input, DEFAULT_DEPTH_LIMIT)
    }

    /// Creates a parser with a custom recursion depth limit.
    pub fn with_depth_limit(input: &'a str, depth_limit: usize) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Parser {
            lexer,
            current,
            scope: Vec::new(),
            depth: 0,
            depth_limit,
        }
    }

    /// Parses the entire input as one formula.
    ///
    /// Anything left over after a complete formula is a trailing-input
    /// error; a formula either parses completely or produces no tree.
    pub fn parse(&mut self) -> ParseResult<Formula> {
        let formula = self.parse_formula()?;

        match &self.current.kind {
            TokenKind::Eof => Ok(formula),
            TokenKind::Illegal(character) => Err(FormulaError::Lex {
                offset: self.current.offset,
                character: *character,
            }),
            kind => Err(FormulaError::TrailingInput {
                offset: self.current.offset,
                found: kind.to_string(),
            }),
        }
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// Checks that the current token matches and consumes it; `expected`
    /// names what this position accepts, for the error message.
    fn expect(&mut self, kind: TokenKind, expected: &str) -> ParseResult<()> {
        if self.current.kind == kind {
            self.advance();
            Ok(())
        } else {
            Err(self.error_expecting(expected))
        }
    }

    /// Builds the error for an unexpected current token. An illegal
    /// character surfaces as a lexical error rather than a syntax error.
    fn error_expecting(&self, expected: &str) -> FormulaError {
        match &self.current.kind {
            TokenKind::Illegal(character) => FormulaError::Lex {
                offset: self.current.offset,
                character: *character,
            },
            kind => FormulaError::Parse {
                offset: self.current.offset,
                expected: expected.to_string(),
                found: kind.to_string(),
            },
        }
    }

    /// Bumps the recursion depth, failing once the limit is exceeded.
    fn enter(&mut self) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.depth_limit {
            return Err(FormulaError::DepthLimitExceeded {
                offset: self.current.offset,
                limit: self.depth_limit,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Entry point for formula parsing.
    fn parse_formula(&mut self) -> ParseResult<Formula> {
        self.parse_iff()
    }

    /// Parses biconditionals (↔), the loosest level. Left-associative:
    /// A ↔ B ↔ C groups as (A ↔ B) ↔ C.
    fn parse_iff(&mut self) -> ParseResult<Formula> {
        let mut left = self.parse_implication()?;

        while self.current.kind == TokenKind::Iff {
            self.advance();
            let right = self.parse_implication()?;
            left = Formula::Binary {
                left: Box::new(left),
                op: Connective::Iff,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parses implications (→). Right-associative: A → B → C groups as
    /// A → (B → C), matching standard logical convention.
    fn parse_implication(&mut self) -> ParseResult<Formula> {
        self.enter()?;
        let left = self.parse_disjunction()?;

        let formula = if self.current.kind == TokenKind::Implies {
            self.advance();
            let right = self.parse_implication()?;
            Formula::Binary {
                left: Box::new(left),
                op: Connective::Implies,
                right: Box::new(right),
            }
        } else {
            left
        };

        self.leave();
        Ok(formula)
    }

    /// Parses disjunctions (∨). Left-associative.
    fn parse_disjunction(&mut self) -> ParseResult<Formula> {
        let mut left = self.parse_conjunction()?;

        while self.current.kind == TokenKind::Or {
            self.advance();
            let right = self.parse_conjunction()?;
            left = Formula::Binary {
                left: Box::new(left),
                op: Connective::Or,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parses conjunctions (∧). Left-associative, binds tighter than ∨.
    fn parse_conjunction(&mut self) -> ParseResult<Formula> {
        let mut left = self.parse_unit()?;

        while self.current.kind == TokenKind::And {
            self.advance();
            let right = self.parse_unit()?;
            left = Formula::Binary {
                left: Box::new(left),
                op: Connective::And,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    /// Parses a unit-level formula: a negation, a quantified formula, an
    /// atomic predicate, or a parenthesized formula. Prefix operators chain:
    /// ¬¬A and ∀x ∃y P(x, y) both nest through here.
    fn parse_unit(&mut self) -> ParseResult<Formula> {
        self.enter()?;

        let formula = match self.current.kind.clone() {
            TokenKind::Not => {
                self.advance();
                let operand = self.parse_unit()?;
                Formula::Negation {
                    operand: Box::new(operand),
                }
            }

            TokenKind::Forall => self.parse_quantified(Quantifier::Forall)?,
            TokenKind::Exists => self.parse_quantified(Quantifier::Exists)?,

            TokenKind::Ident(name) => {
                self.advance();
                self.parse_predicate(name)?
            }

            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_formula()?;
                self.expect(TokenKind::RParen, "')'")?;
                inner
            }

            _ => return Err(self.error_expecting("a quantifier, '¬', a predicate or '('")),
        };

        self.leave();
        Ok(formula)
    }

    /// Parses the variable and body after a quantifier token. The bound
    /// variable is in scope for the body only; shadowing an outer binding
    /// of the same name is allowed.
    fn parse_quantified(&mut self, quantifier: Quantifier) -> ParseResult<Formula> {
        // Consume the quantifier token
        self.advance();

        let variable = match self.current.kind.clone() {
            TokenKind::Ident(name) => {
                self.advance();
                name
            }
            _ => return Err(self.error_expecting("a variable name")),
        };

        self.scope.push(variable.clone());
        let body = self.parse_unit()?;
        self.scope.pop();

        Ok(Formula::Quantified {
            quantifier,
            variable,
            body: Box::new(body),
        })
    }

    /// Parses a predicate application after its name has been consumed.
    /// A name not followed by '(' is a nullary atom: `Raining`.
    fn parse_predicate(&mut self, name: String) -> ParseResult<Formula> {
        let args = if self.current.kind == TokenKind::LParen {
            self.parse_term_list()?
        } else {
            Vec::new()
        };

        Ok(Formula::Predicate { name, args })
    }

    /// Parses a parenthesized, comma-separated, non-empty term list.
    /// The current token is the opening '('.
    fn parse_term_list(&mut self) -> ParseResult<Vec<Term>> {
        // Consume the '('
        self.advance();

        let mut args = vec![self.parse_term()?];

        while self.current.kind == TokenKind::Comma {
            self.advance();
            args.push(self.parse_term()?);
        }

        self.expect(TokenKind::RParen, "',' or ')'")?;
        Ok(args)
    }

    /// Parses one term: a variable, a constant, or a function application.
    /// An identifier is a variable exactly when an enclosing quantifier
    /// binds its spelling at this point; otherwise it is a constant.
    fn parse_term(&mut self) -> ParseResult<Term> {
        self.enter()?;

        let term = match self.current.kind.clone() {
            TokenKind::Ident(name) => {
                self.advance();
                if self.current.kind == TokenKind::LParen {
                    let args = self.parse_term_list()?;
                    Term::Function { name, args }
                } else if self.is_bound(&name) {
                    Term::Variable(name)
                } else {
                    Term::Constant(name)
                }
            }
            _ => return Err(self.error_expecting("a term")),
        };

        self.leave();
        Ok(term)
    }

    fn is_bound(&self, name: &str) -> bool {
        self.scope.iter().any(|bound| bound == name)
    }
}

/// Convenience function to parse a single formula string.
pub fn parse(input: &str) -> ParseResult<Formula> {
    let mut parser = Parser::new(input);
    parser.parse()
}

/// Parses every string in the batch, preserving input order.
///
/// Never short-circuits: a malformed formula yields an error in its slot
/// while the remaining inputs are still parsed, so callers can report
/// partial success over a corpus.
pub fn parse_many<I, S>(inputs: I) -> Vec<ParseResult<Formula>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    inputs.into_iter().map(|s| parse(s.as_ref())).collect()
}
