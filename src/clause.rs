use std::fmt;
use std::str::FromStr;

use crate::error::GrammarError;
use crate::literal::{Literal, Substitution};
use crate::parser::{self, CONJUNCTION, IMPLIES};

/// The three shapes a Horn clause can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    /// Head and non-empty body (e.g., `happy(*x) <- lucky(*x)`)
    Rule,
    /// Head and empty body (e.g., `lucky(john) <-`)
    Fact,
    /// No head; a goal to refute (e.g., `<- happy(john)`)
    Denial,
}

/// A Horn clause `head <- body`, the body being a conjunction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clause {
    /// The conclusion, absent for denials
    pub head: Option<Literal>,
    /// The conditions, in order
    pub body: Vec<Literal>,
}

impl Clause {
    /// Create a clause from its parts
    #[must_use]
    pub fn new(head: Option<Literal>, body: Vec<Literal>) -> Self {
        Self { head, body }
    }

    /// Create a headless clause
    #[must_use]
    pub fn denial(body: Vec<Literal>) -> Self {
        Self { head: None, body }
    }

    /// Which of rule, fact or denial this clause is
    #[must_use]
    pub fn kind(&self) -> ClauseKind {
        match (&self.head, self.body.is_empty()) {
            (None, _) => ClauseKind::Denial,
            (Some(_), true) => ClauseKind::Fact,
            (Some(_), false) => ClauseKind::Rule,
        }
    }

    /// Returns true if the clause has no head
    #[must_use]
    pub fn is_denial(&self) -> bool {
        self.head.is_none()
    }

    /// Returns true for the empty denial, which ends a successful search
    #[must_use]
    pub fn is_proved(&self) -> bool {
        self.is_denial() && self.body.is_empty()
    }

    /// Copy of the clause with `mapping` applied to the head and every body literal
    #[must_use]
    pub fn substitute(&self, mapping: &Substitution) -> Clause {
        Clause {
            head: self.head.as_ref().map(|head| head.substitute(mapping)),
            body: self
                .body
                .iter()
                .map(|literal| literal.substitute(mapping))
                .collect(),
        }
    }

    /// Delete every body literal structurally equal to `literal`
    pub fn remove_all_matching(&mut self, literal: &Literal) {
        self.body.retain(|candidate| candidate != literal);
    }

    /// Resolve this denial against a rule or fact, producing the next denial.
    ///
    /// The first body literal matched by `other`'s head is replaced by
    /// `other`'s body. Failing that, if `other` is a fact, the first body
    /// literal that matches the fact is dropped. Returns `None` when `self`
    /// is not a denial, `other` has no head, or nothing applies.
    #[must_use]
    pub fn resolve(&self, other: &Clause) -> Option<Clause> {
        if !self.is_denial() {
            return None;
        }
        let other_head = other.head.as_ref()?;

        let expansion = self
            .body
            .iter()
            .find_map(|goal| other_head.unify(goal).map(|unifier| (goal, unifier)));
        if let Some((goal, unifier)) = expansion {
            let mut rest = self.clone();
            rest.remove_all_matching(goal);

            let mut body: Vec<Literal> = other
                .body
                .iter()
                .map(|literal| literal.substitute(&unifier.pattern))
                .collect();
            body.extend(
                rest.body
                    .iter()
                    .map(|literal| literal.substitute(&unifier.instance)),
            );
            return Some(Clause::denial(body));
        }

        if !other.body.is_empty() {
            return None;
        }

        let (goal, unifier) = self
            .body
            .iter()
            .find_map(|goal| goal.unify(other_head).map(|unifier| (goal, unifier)))?;
        let mut rest = self.clone();
        rest.remove_all_matching(goal);
        Some(rest.substitute(&unifier.pattern))
    }
}

impl FromStr for Clause {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse_clause(s)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(head) = &self.head {
            write!(f, "{head}")?;
        }
        f.write_str(IMPLIES)?;
        for (i, literal) in self.body.iter().enumerate() {
            if i > 0 {
                write!(f, "{CONJUNCTION}")?;
            }
            write!(f, "{literal}")?;
        }
        Ok(())
    }
}
