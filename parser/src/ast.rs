//! FILENAME: parser/src/ast.rs
//! PURPOSE: Defines the Abstract Syntax Tree (AST) for first-order formulas.
//! CONTEXT: After the Lexer tokenizes a formula string, the Parser converts
//! those tokens into this tree structure. Downstream consumers (dataset
//! validators, comparators, printers) traverse it; nothing here is mutated
//! after construction.
//!
//! SUPPORTED FORMULAS:
//! - Atomic predicates: Student(rina), Raining (nullary, no parentheses)
//! - Negation: ¬Student(rina)
//! - Binary connectives: ∧, ∨, →, ↔
//! - Quantifiers: ∀x ..., ∃x ...
//! - Terms: variables (bound by a quantifier), constants, and function
//!   applications like mother(x)
//!
//! PRINTING: `Display` renders the canonical, minimally parenthesized form
//! using Unicode spellings. Parentheses appear exactly where the default
//! precedence and associativity rules would otherwise yield a different
//! tree, so parsing the printed form reproduces the original tree.

use serde::Serialize;
use std::fmt;

/// A parsed first-order formula. Children are owned exclusively by their
/// parent; the tree is finite and acyclic.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub enum Formula {
    /// An atomic formula: a predicate applied to zero or more terms.
    /// Nullary predicates are written without parentheses: `Raining`.
    Predicate { name: String, args: Vec<Term> },

    /// A negated formula: ¬φ.
    Negation { operand: Box<Formula> },

    /// Two formulas joined by a binary connective: φ ∧ ψ, φ → ψ, ...
    Binary {
        left: Box<Formula>,
        op: Connective,
        right: Box<Formula>,
    },

    /// A quantified formula: ∀x φ or ∃x φ. The variable spelling is
    /// preserved exactly; no alpha-renaming happens at parse time.
    Quantified {
        quantifier: Quantifier,
        variable: String,
        body: Box<Formula>,
    },
}

/// A term appearing as a predicate or function argument.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub enum Term {
    /// An identifier bound by an enclosing quantifier at its point of use.
    Variable(String),
    /// An identifier not bound by any enclosing quantifier.
    Constant(String),
    /// A function application: f(t1, ..., tn).
    Function { name: String, args: Vec<Term> },
}

/// Binary connectives, listed from loosest to tightest binding.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum Connective {
    Iff,     // ↔ (left-associative)
    Implies, // → (right-associative)
    Or,      // ∨ (left-associative)
    And,     // ∧ (left-associative, binds tightest)
}

/// The two quantifiers.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum Quantifier {
    Forall, // ∀
    Exists, // ∃
}

// ============================================================================
// PRETTY-PRINTING
// ============================================================================

// Binding strength ladder used by the printer. Higher binds tighter.
// Matches the parser's precedence levels exactly: iff < implies < or < and
// < unit (negation, quantifier, atom, parenthesized).
const IFF: u8 = 1;
const IMPLIES: u8 = 2;
const OR: u8 = 3;
const AND: u8 = 4;
const UNIT: u8 = 5;

impl Formula {
    /// The binding strength of this node's top-level construct.
    fn binding(&self) -> u8 {
        match self {
            Formula::Binary { op, .. } => match op {
                Connective::Iff => IFF,
                Connective::Implies => IMPLIES,
                Connective::Or => OR,
                Connective::And => AND,
            },
            _ => UNIT,
        }
    }

    /// Writes this formula, parenthesizing it if it binds looser than the
    /// position requires.
    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        if self.binding() < min {
            write!(f, "(")?;
            self.fmt_at(f, IFF)?;
            return write!(f, ")");
        }

        match self {
            Formula::Predicate { name, args } => {
                write!(f, "{}", name)?;
                if !args.is_empty() {
                    write!(f, "(")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg)?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }

            Formula::Negation { operand } => {
                write!(f, "¬")?;
                operand.fmt_at(f, UNIT)
            }

            Formula::Quantified {
                quantifier,
                variable,
                body,
            } => {
                write!(f, "{}{} ", quantifier, variable)?;
                body.fmt_at(f, UNIT)
            }

            Formula::Binary { left, op, right } => {
                // Each operand position requires the binding strength that
                // the parser would demand there: the associative side admits
                // the operator's own level, the other side the next tighter.
                let (left_min, right_min) = match op {
                    Connective::Iff => (IFF, IMPLIES),
                    Connective::Implies => (OR, IMPLIES),
                    Connective::Or => (OR, AND),
                    Connective::And => (AND, UNIT),
                };
                left.fmt_at(f, left_min)?;
                write!(f, " {} ", op)?;
                right.fmt_at(f, right_min)
            }
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at(f, IFF)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(name) => write!(f, "{}", name),
            Term::Constant(name) => write!(f, "{}", name),
            Term::Function { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connective::And => write!(f, "∧"),
            Connective::Or => write!(f, "∨"),
            Connective::Implies => write!(f, "→"),
            Connective::Iff => write!(f, "↔"),
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantifier::Forall => write!(f, "∀"),
            Quantifier::Exists => write!(f, "∃"),
        }
    }
}
