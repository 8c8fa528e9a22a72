use std::fmt;

use crate::clause::Clause;
use crate::error::{GrammarError, Result};
use crate::parser;

/// One resolution step of a proof: the library clause used and the denial it produced
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// The rule or fact resolved against
    pub rule: Clause,
    /// The denial left after the step
    pub resolvent: Clause,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} gives {}", self.rule, self.resolvent)
    }
}

/// The resolution steps refuting a query, first-applied step first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proof {
    steps: Vec<Step>,
}

impl Proof {
    /// The steps in order
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the query needed no step (its body was already empty)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The last denial produced, `None` for an empty proof
    #[must_use]
    pub fn conclusion(&self) -> Option<&Clause> {
        self.steps.last().map(|step| &step.resolvent)
    }

    /// Iterate over the steps
    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Serialize the proof to JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> IntoIterator for &'a Proof {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl IntoIterator for Proof {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl fmt::Display for Proof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "{:>3}. {step}", i + 1)?;
        }
        Ok(())
    }
}

/// The backward-chaining prover
#[derive(Debug, Clone, Default)]
pub struct Engine {
    /// Rules and facts in declaration order, which is also search order
    rules: Vec<Clause>,
    /// Denials given at construction. Kept but never consulted by the search.
    terminals: Vec<Clause>,
}

impl Engine {
    /// Build an engine from clause texts.
    ///
    /// Headed clauses become the rule library, in order; denials are kept aside
    /// as terminals.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError`] for the first clause text that does not parse.
    pub fn new<I, S>(clauses: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        clauses
            .into_iter()
            .map(|text| text.as_ref().parse::<Clause>())
            .collect()
    }

    /// Build an engine from a knowledge-base text holding one clause per line.
    /// Blank lines and lines starting with `%` or `#` are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError`] for the first line that does not parse.
    pub fn from_source(source: &str) -> Result<Self> {
        Self::new(parser::clause_lines(source))
    }

    /// The rule library in search order
    #[must_use]
    pub fn rules(&self) -> &[Clause] {
        &self.rules
    }

    /// Denials supplied at construction
    #[must_use]
    pub fn terminals(&self) -> &[Clause] {
        &self.terminals
    }

    /// Prove the denial given as text.
    ///
    /// Returns `Ok(None)` when no sequence of resolution steps empties the
    /// denial. The search is depth-first with no loop detection, so a library
    /// that can re-derive goals forever may not terminate.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError`] if the query does not parse or has a head.
    pub fn proof(&self, query: &str) -> Result<Option<Proof>> {
        let goal: Clause = query.parse()?;
        self.prove(&goal).map_err(|err| match err {
            GrammarError::HeadedQuery { .. } => GrammarError::HeadedQuery {
                query: query.to_string(),
            },
            other => other,
        })
    }

    /// Prove an already parsed denial.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::HeadedQuery`] if `goal` has a head.
    pub fn prove(&self, goal: &Clause) -> Result<Option<Proof>> {
        if !goal.is_denial() {
            return Err(GrammarError::HeadedQuery {
                query: goal.to_string(),
            });
        }

        log::debug!("proving {goal} against {} rules", self.rules.len());
        let proof = self.search(goal, 0).map(|steps| Proof { steps });
        match &proof {
            Some(proof) => log::debug!("proved {goal} in {} steps", proof.len()),
            None => log::debug!("no proof found for {goal}"),
        }
        Ok(proof)
    }

    /// Leftmost-rule depth-first search; the first successful branch wins
    fn search(&self, goal: &Clause, depth: usize) -> Option<Vec<Step>> {
        if goal.is_proved() {
            return Some(Vec::new());
        }

        for rule in &self.rules {
            let Some(resolvent) = goal.resolve(rule) else {
                continue;
            };
            log::debug!("[{depth}] {goal} with {rule} gives {resolvent}");

            if let Some(mut steps) = self.search(&resolvent, depth + 1) {
                steps.insert(0, Step {
                    rule: rule.clone(),
                    resolvent,
                });
                return Some(steps);
            }
            log::trace!("[{depth}] backtracking over {rule}");
        }

        None
    }
}

impl FromIterator<Clause> for Engine {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        let (terminals, rules) = iter.into_iter().partition(Clause::is_denial);
        Self { rules, terminals }
    }
}
