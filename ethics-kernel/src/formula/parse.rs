// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsing of the canonical text form.

use crate::{
    errors::ParseError,
    formula::{BinaryPredicate, Comparison, Formula, Term, UnaryPredicate},
};
use std::{fmt, iter::Peekable, str::CharIndices, str::FromStr};

impl FromStr for Formula {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new(s)?;
        let formula = parser.formula()?;
        parser.finish()?;
        Ok(formula)
    }
}

impl FromStr for Term {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new(s)?;
        let term = parser.term()?;
        parser.finish()?;
        Ok(term)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Ident(String),
    Quoted(String),
    Int(i64),
    Open,
    Close,
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Ident(ident) => f.write_str(ident),
            Token::Quoted(name) => write!(f, "'{}'", name),
            Token::Int(value) => write!(f, "{}", value),
            Token::Open => f.write_str("("),
            Token::Close => f.write_str(")"),
            Token::Comma => f.write_str(","),
        }
    }
}

fn tokenize(s: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = s.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        let token = match ch {
            ch if ch.is_whitespace() => {
                chars.next();
                continue;
            }
            '(' => {
                chars.next();
                Token::Open
            }
            ')' => {
                chars.next();
                Token::Close
            }
            ',' => {
                chars.next();
                Token::Comma
            }
            '\'' => {
                chars.next();
                Token::Quoted(quoted(&mut chars, offset)?)
            }
            '-' | '0'..='9' => {
                chars.next();
                let mut literal = ch.to_string();
                literal.push_str(&take_while(&mut chars, |c| c.is_ascii_digit()));
                let value = literal
                    .parse()
                    .map_err(|_| ParseError::InvalidInteger { literal, offset })?;
                Token::Int(value)
            }
            ch if ch.is_ascii_alphabetic() || ch == '_' => Token::Ident(take_while(
                &mut chars,
                |c| c.is_ascii_alphanumeric() || c == '_',
            )),
            other => {
                return Err(ParseError::UnexpectedToken {
                    found: other.to_string(),
                    expected: "a constructor, name, integer or punctuation",
                    offset,
                })
            }
        };
        tokens.push((token, offset));
    }

    Ok(tokens)
}

fn take_while(chars: &mut Peekable<CharIndices<'_>>, pred: impl Fn(char) -> bool) -> String {
    let mut out = String::new();
    while let Some(&(_, ch)) = chars.peek() {
        if !pred(ch) {
            break;
        }
        out.push(ch);
        chars.next();
    }
    out
}

/// Reads the rest of a quoted name, the opening quote already consumed.
fn quoted(chars: &mut Peekable<CharIndices<'_>>, start: usize) -> Result<String, ParseError> {
    let mut name = String::new();
    loop {
        match chars.next() {
            Some((_, '\'')) => return Ok(name),
            Some((_, '\\')) => match chars.next() {
                Some((_, escaped)) => name.push(escaped),
                None => return Err(ParseError::UnterminatedName(start)),
            },
            Some((_, ch)) => name.push(ch),
            None => return Err(ParseError::UnterminatedName(start)),
        }
    }
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser {
    fn new(s: &str) -> Result<Self, ParseError> {
        Ok(Self {
            tokens: tokenize(s)?,
            pos: 0,
        })
    }

    fn formula(&mut self) -> Result<Formula, ParseError> {
        let (token, offset) = self.next()?;
        let name = match token {
            Token::Quoted(name) => return Ok(Formula::Atom(name)),
            Token::Ident(name) => name,
            other => return Err(unexpected(other, "a formula", offset)),
        };

        self.expect(Token::Open, "`(`")?;
        let formula = match name.as_str() {
            "Atom" => match self.next()? {
                (Token::Quoted(name), _) => Formula::Atom(name),
                (other, offset) => return Err(unexpected(other, "a quoted name", offset)),
            },
            "Bool" => match self.next()? {
                (Token::Ident(value), _) if value == "true" => Formula::Bool(true),
                (Token::Ident(value), _) if value == "false" => Formula::Bool(false),
                (other, offset) => return Err(unexpected(other, "`true` or `false`", offset)),
            },
            "Not" => Formula::not(self.formula()?),
            "And" => {
                let (lhs, rhs) = self.formula_pair()?;
                Formula::and(lhs, rhs)
            }
            "Or" => {
                let (lhs, rhs) = self.formula_pair()?;
                Formula::or(lhs, rhs)
            }
            "Impl" => {
                let (lhs, rhs) = self.formula_pair()?;
                Formula::implies(lhs, rhs)
            }
            "BiImpl" => {
                let (lhs, rhs) = self.formula_pair()?;
                Formula::iff(lhs, rhs)
            }
            other => {
                if let Some(predicate) = UnaryPredicate::from_name(other) {
                    Formula::unary(predicate, self.formula()?)
                } else if let Some(predicate) = BinaryPredicate::from_name(other) {
                    let (lhs, rhs) = self.formula_pair()?;
                    Formula::binary(predicate, lhs, rhs)
                } else if let Some(comparison) = Comparison::from_name(other) {
                    let lhs = self.term()?;
                    self.expect(Token::Comma, "`,`")?;
                    let rhs = self.term()?;
                    Formula::Compare(comparison, lhs, rhs)
                } else {
                    return Err(ParseError::UnknownConstructor {
                        name: other.to_owned(),
                        offset,
                    });
                }
            }
        };
        self.expect(Token::Close, "`)`")?;
        Ok(formula)
    }

    fn formula_pair(&mut self) -> Result<(Formula, Formula), ParseError> {
        let lhs = self.formula()?;
        self.expect(Token::Comma, "`,`")?;
        let rhs = self.formula()?;
        Ok((lhs, rhs))
    }

    fn term(&mut self) -> Result<Term, ParseError> {
        let (token, offset) = self.next()?;
        let name = match token {
            Token::Int(value) => return Ok(Term::Int(value)),
            Token::Ident(name) => name,
            other => return Err(unexpected(other, "a term", offset)),
        };

        self.expect(Token::Open, "`(`")?;
        let term = match name.as_str() {
            "U" => Term::utility(self.formula()?),
            "Add" | "Sub" => {
                let lhs = self.term()?;
                self.expect(Token::Comma, "`,`")?;
                let rhs = self.term()?;
                if name == "Add" {
                    lhs + rhs
                } else {
                    lhs - rhs
                }
            }
            "Minus" => -self.term()?,
            other => {
                return Err(ParseError::UnknownConstructor {
                    name: other.to_owned(),
                    offset,
                })
            }
        };
        self.expect(Token::Close, "`)`")?;
        Ok(term)
    }

    fn next(&mut self) -> Result<(Token, usize), ParseError> {
        let next = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(ParseError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(next)
    }

    fn expect(&mut self, expected: Token, description: &'static str) -> Result<(), ParseError> {
        let (token, offset) = self.next()?;
        if token == expected {
            Ok(())
        } else {
            Err(unexpected(token, description, offset))
        }
    }

    fn finish(&self) -> Result<(), ParseError> {
        match self.tokens.get(self.pos) {
            Some((_, offset)) => Err(ParseError::TrailingInput(*offset)),
            None => Ok(()),
        }
    }
}

fn unexpected(found: Token, expected: &'static str, offset: usize) -> ParseError {
    ParseError::UnexpectedToken {
        found: found.to_string(),
        expected,
        offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormulaParams;
    use proptest::prelude::*;

    #[test]
    fn test_parse_canonical() {
        let a = Formula::atom("a");
        let b = Formula::atom("b");
        assert_eq!("Atom('a')".parse::<Formula>(), Ok(a.clone()));
        assert_eq!("'a'".parse::<Formula>(), Ok(a.clone()), "bare names are atoms");
        assert_eq!(
            "Causes('a', Not(Atom('b')))".parse::<Formula>(),
            Ok(Formula::causes(a.clone(), !b.clone()))
        );
        assert_eq!(
            " BiImpl( I('a') ,Bool(true) ) ".parse::<Formula>(),
            Ok(Formula::iff(Formula::intended(a.clone()), Formula::Bool(true)))
        );
        assert_eq!(
            "GEq(Sub(U('a'), -2), Minus(0))".parse::<Formula>(),
            Ok(Formula::geq(
                Term::utility(a.clone()) - Term::int(-2),
                -Term::int(0)
            ))
        );
        assert_eq!(
            "Gt(U('a'), -123)".parse::<Formula>(),
            Ok(Formula::gt(Term::utility(a.clone()), -123)),
            "multi-digit integers"
        );
        assert_eq!(
            "Atom('it\\'s')".parse::<Formula>(),
            Ok(Formula::atom("it's"))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Formula>(), Err(ParseError::UnexpectedEnd));
        assert_eq!("And('a',".parse::<Formula>(), Err(ParseError::UnexpectedEnd));
        assert_eq!(
            "Nope('a')".parse::<Formula>(),
            Err(ParseError::UnknownConstructor {
                name: "Nope".to_owned(),
                offset: 0
            })
        );
        assert_eq!(
            "Not('a' 'b')".parse::<Formula>(),
            Err(ParseError::UnexpectedToken {
                found: "'b'".to_owned(),
                expected: "`)`",
                offset: 8
            })
        );
        assert_eq!(
            "'a')".parse::<Formula>(),
            Err(ParseError::TrailingInput(3))
        );
        assert_eq!(
            "Atom('a".parse::<Formula>(),
            Err(ParseError::UnterminatedName(5))
        );
        assert!(matches!(
            "Gt(99999999999999999999, 0)".parse::<Formula>(),
            Err(ParseError::InvalidInteger { offset: 3, .. })
        ));
        assert!(matches!(
            "Good(U('a'))".parse::<Formula>(),
            Err(ParseError::UnknownConstructor { .. })
        ));
    }

    proptest! {
        #[test]
        fn proptest_display_parse_roundtrip(
            f in any_with::<Formula>(FormulaParams::default().with_predicates(true)),
        ) {
            let text = f.to_string();
            prop_assert_eq!(text.parse::<Formula>(), Ok(f));
        }
    }
}
