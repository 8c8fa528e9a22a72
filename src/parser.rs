//! Clause text grammar.
//!
//! ```text
//! clause  := [literal] "<-" [body]
//! body    := "" | literal ("^" literal)*
//! literal := name "(" arg ("," arg)* ")"
//! arg     := ["*"] name
//! ```
//!
//! Whitespace around tokens is ignored.

use nom::{
    bytes::complete::{tag, take_while1},
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, opt},
    multi::{separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

use crate::clause::Clause;
use crate::error::GrammarError;
use crate::literal::{Arg, Literal, UNIVERSAL_MARKER};

/// Separator between head and body
pub const IMPLIES: &str = "<-";
/// Separator between body literals
pub const CONJUNCTION: char = '^';

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

pub(crate) fn is_identifier(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_word_char)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(is_word_char)(input)
}

fn argument(input: &str) -> IResult<&str, Arg> {
    map(
        pair(opt(char(UNIVERSAL_MARKER)), identifier),
        |(marker, name)| match marker {
            Some(_) => Arg::universal(name),
            None => Arg::bound(name),
        },
    )(input)
}

fn literal(input: &str) -> IResult<&str, Literal> {
    map(
        tuple((
            delimited(multispace0, identifier, multispace0),
            delimited(
                char('('),
                separated_list1(char(','), delimited(multispace0, argument, multispace0)),
                char(')'),
            ),
            multispace0,
        )),
        |(name, args, _)| Literal::from_parts(name, args),
    )(input)
}

fn clause(input: &str) -> IResult<&str, Clause> {
    map(
        tuple((
            opt(literal),
            preceded(multispace0, tag(IMPLIES)),
            separated_list0(char(CONJUNCTION), literal),
            multispace0,
        )),
        |(head, _, body, _)| Clause::new(head, body),
    )(input)
}

pub(crate) fn parse_literal(text: &str) -> Result<Literal, GrammarError> {
    all_consuming(literal)(text)
        .map(|(_, literal)| literal)
        .map_err(|_| GrammarError::Literal {
            input: text.to_string(),
        })
}

pub(crate) fn parse_clause(text: &str) -> Result<Clause, GrammarError> {
    all_consuming(clause)(text)
        .map(|(_, clause)| clause)
        .map_err(|_| GrammarError::Clause {
            input: text.to_string(),
        })
}

/// Clause lines of a knowledge-base text: one clause per line, blank lines
/// and lines starting with `%` or `#` skipped.
pub fn clause_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('%') && !line.starts_with('#'))
}
