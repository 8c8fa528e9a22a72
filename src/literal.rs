use indexmap::IndexMap;
use smallvec::SmallVec;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::GrammarError;
use crate::parser;

/// Sigil marking a universal variable in clause text (e.g., `*x`)
pub const UNIVERSAL_MARKER: char = '*';

/// Argument list of a literal
pub type Args = SmallVec<[Arg; 4]>;

/// An argument of a literal.
///
/// Variant order matters: the derived `Ord` places every universal before
/// every bound symbol and then compares names. That is the byte order of the
/// canonical text, since `*` sorts below every word character.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Arg {
    /// A universal variable standing for any value (e.g., `*x`)
    Universal(String),
    /// A bound symbol/constant (e.g., `john`)
    Bound(String),
}

impl Arg {
    /// Create a universal variable
    #[must_use]
    pub fn universal(name: impl Into<String>) -> Self {
        Self::Universal(name.into())
    }

    /// Create a bound symbol
    #[must_use]
    pub fn bound(name: impl Into<String>) -> Self {
        Self::Bound(name.into())
    }

    /// Returns true for universal variables
    #[must_use]
    pub fn is_universal(&self) -> bool {
        matches!(self, Self::Universal(_))
    }

    /// The identifier without the universal marker
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Universal(name) | Self::Bound(name) => name,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Universal(name) => write!(f, "{UNIVERSAL_MARKER}{name}"),
            Self::Bound(name) => f.write_str(name),
        }
    }
}

/// A mapping from arguments to their replacements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    bindings: IndexMap<Arg, Arg>,
}

impl Substitution {
    /// Create an empty substitution
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `from` to `to`, returning the previous binding if any
    pub fn bind(&mut self, from: Arg, to: Arg) -> Option<Arg> {
        self.bindings.insert(from, to)
    }

    /// Bind `var` to `value` unless it is already bound to something else.
    /// Returns false on conflict.
    pub fn try_bind(&mut self, var: &Arg, value: &Arg) -> bool {
        match self.bindings.get(var) {
            Some(existing) => existing == value,
            None => {
                self.bindings.insert(var.clone(), value.clone());
                true
            }
        }
    }

    /// Look up the replacement for `arg`
    #[must_use]
    pub fn get(&self, arg: &Arg) -> Option<&Arg> {
        self.bindings.get(arg)
    }

    /// Replacement for `arg`, or `arg` itself when unmapped
    #[must_use]
    pub fn apply(&self, arg: &Arg) -> Arg {
        self.get(arg).cloned().unwrap_or_else(|| arg.clone())
    }

    /// Returns true when nothing is bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Number of bindings
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Iterate over bindings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Arg, &Arg)> {
        self.bindings.iter()
    }
}

impl FromIterator<(Arg, Arg)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (Arg, Arg)>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (from, to)) in self.bindings.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{from}/{to}")?;
        }
        f.write_str("}")
    }
}

/// The pair of substitutions produced by a successful [`Literal::unify`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unifier {
    /// Bindings for universal variables of the pattern (the receiver)
    pub pattern: Substitution,
    /// Bindings for universal variables of the instance (the argument)
    pub instance: Substitution,
}

/// An atomic predicate application (e.g., `pass(*x, history)`)
///
/// Name and arity are fixed at construction; substitution always yields a
/// new literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawLiteral"))]
pub struct Literal {
    name: String,
    args: Args,
}

/// Unchecked literal fields as read by serde, validated through [`Literal::new`]
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawLiteral {
    name: String,
    args: Vec<Arg>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawLiteral> for Literal {
    type Error = GrammarError;

    fn try_from(raw: RawLiteral) -> Result<Self, Self::Error> {
        Literal::new(raw.name, raw.args)
    }
}

impl Literal {
    /// Build a literal from parts, checking the name and argument grammar.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::Literal`] if the name or any argument is not an
    /// identifier, or if there are no arguments.
    pub fn new(
        name: impl Into<String>,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<Self, GrammarError> {
        let literal = Self {
            name: name.into(),
            args: args.into_iter().collect(),
        };
        let well_formed = parser::is_identifier(&literal.name)
            && !literal.args.is_empty()
            && literal.args.iter().all(|arg| parser::is_identifier(arg.name()));
        if well_formed {
            Ok(literal)
        } else {
            Err(GrammarError::Literal {
                input: literal.to_string(),
            })
        }
    }

    pub(crate) fn from_parts(name: &str, args: Vec<Arg>) -> Self {
        Self {
            name: name.to_string(),
            args: args.into_iter().collect(),
        }
    }

    /// Predicate name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Arguments in order
    #[must_use]
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// Number of arguments
    #[must_use]
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Returns true when no argument is a universal variable
    #[must_use]
    pub fn is_ground(&self) -> bool {
        !self.args.iter().any(Arg::is_universal)
    }

    /// Match `self` as a pattern onto the instance `other`.
    ///
    /// Universal variables of the pattern collect every argument they face.
    /// When a variable faces several candidates the greatest one under
    /// `Arg`'s ordering wins, and any losing candidate that is itself a
    /// universal of `other` is bound to the winner. Universal variables of
    /// `other` facing a bound symbol of the pattern are bound to it and must
    /// stay consistent across positions.
    ///
    /// Returns `None` when the literals do not unify.
    #[must_use]
    pub fn unify(&self, other: &Literal) -> Option<Unifier> {
        if self.name != other.name || self.arity() != other.arity() {
            log::trace!("{self} and {other} differ in name or arity");
            return None;
        }

        let mut candidates: IndexMap<&Arg, BTreeSet<&Arg>> = IndexMap::new();
        let mut instance = Substitution::new();

        for (mine, theirs) in self.args.iter().zip(&other.args) {
            match (mine, theirs) {
                (Arg::Universal(_), _) => {
                    candidates.entry(mine).or_default().insert(theirs);
                }
                (Arg::Bound(_), Arg::Universal(_)) => {
                    if !instance.try_bind(theirs, mine) {
                        log::trace!("{theirs} in {other} is bound twice against {self}");
                        return None;
                    }
                }
                (Arg::Bound(a), Arg::Bound(b)) => {
                    if a != b {
                        log::trace!("{self} and {other} disagree on {a} and {b}");
                        return None;
                    }
                }
            }
        }

        let mut pattern = Substitution::new();
        for (var, values) in candidates {
            let Some(&chosen) = values.last() else {
                continue;
            };
            for &value in values.iter().filter(|value| **value != chosen) {
                if value.is_universal() && !instance.try_bind(value, chosen) {
                    log::trace!("{value} in {other} cannot also take {chosen}");
                    return None;
                }
            }
            pattern.bind(var.clone(), chosen.clone());
        }

        Some(Unifier { pattern, instance })
    }

    /// Returns true if `self` is a specialisation of the pattern `other`
    #[must_use]
    pub fn is_subsumed_by(&self, other: &Literal) -> bool {
        other.unify(self).is_some()
    }

    /// Copy of `self` with every mapped argument replaced
    #[must_use]
    pub fn substitute(&self, mapping: &Substitution) -> Literal {
        Literal {
            name: self.name.clone(),
            args: self.args.iter().map(|arg| mapping.apply(arg)).collect(),
        }
    }
}

impl FromStr for Literal {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse_literal(s)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}
