//! Model formula parsing.
//!
//! Formulas use the `response ~ term + term + ...` notation. Only additive
//! terms are supported; the intercept is implicit.

use std::fmt;
use std::str::FromStr;

/// A parsed model formula: one response, one or more additive terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    response: String,
    terms: Vec<String>,
}

/// Errors raised while parsing a formula string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    #[error("formula must contain exactly one `~`")]
    MalformedTilde,

    #[error("formula has an empty response")]
    EmptyResponse,

    #[error("formula has an empty term")]
    EmptyTerm,
}

impl Formula {
    /// The dependent variable's column name.
    pub fn response(&self) -> &str {
        &self.response
    }

    /// The independent variables' column names, in formula order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lhs, rhs) = s.split_once('~').ok_or(FormulaError::MalformedTilde)?;
        if rhs.contains('~') {
            return Err(FormulaError::MalformedTilde);
        }

        let response = lhs.trim();
        if response.is_empty() {
            return Err(FormulaError::EmptyResponse);
        }

        let mut terms = Vec::new();
        for term in rhs.split('+') {
            let term = term.trim();
            if term.is_empty() {
                return Err(FormulaError::EmptyTerm);
            }
            terms.push(term.to_owned());
        }

        Ok(Formula {
            response: response.to_owned(),
            terms,
        })
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.response, self.terms.join(" + "))
    }
}
