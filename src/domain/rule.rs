//! Field-projection rules.
//!
//! A rule string is a comma separated list of `source=output` tokens. A bare
//! token maps a field onto itself, so `"Title=t,GUID"` compiles to
//! `[(Title, t), (GUID, GUID)]`.

use std::fmt;
use std::str::FromStr;

use crate::app::{FeedsyncError, Result};

/// One `(source field, output field)` mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPair {
    pub source: String,
    pub output: String,
}

impl FieldPair {
    pub fn new(source: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
        }
    }
}

/// Ordered projection mapping compiled from a rule string.
///
/// Pairs are applied in order, so a later pair writing the same output key
/// wins over an earlier one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pairs: Vec<FieldPair>,
}

impl Rule {
    pub fn compile(rule: &str) -> Result<Self> {
        if rule.trim().is_empty() {
            return Err(FeedsyncError::EmptyRule);
        }

        let pairs: Vec<FieldPair> = rule
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| match token.split_once('=') {
                Some((source, output)) => FieldPair::new(source.trim(), output.trim()),
                None => FieldPair::new(token, token),
            })
            .collect();

        if pairs.is_empty() {
            return Err(FeedsyncError::EmptyRule);
        }

        Ok(Self { pairs })
    }

    pub fn pairs(&self) -> &[FieldPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromStr for Rule {
    type Err = FeedsyncError;

    fn from_str(s: &str) -> Result<Self> {
        Self::compile(s)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pair) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if pair.source == pair.output {
                write!(f, "{}", pair.source)?;
            } else {
                write!(f, "{}={}", pair.source, pair.output)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_alias_and_identity() {
        let rule = Rule::compile("Title=t,GUID").unwrap();
        assert_eq!(
            rule.pairs(),
            &[FieldPair::new("Title", "t"), FieldPair::new("GUID", "GUID")]
        );
    }

    #[test]
    fn test_compile_empty_is_rejected() {
        assert!(matches!(Rule::compile(""), Err(FeedsyncError::EmptyRule)));
        assert!(matches!(Rule::compile("   "), Err(FeedsyncError::EmptyRule)));
    }

    #[test]
    fn test_compile_only_separators_is_rejected() {
        assert!(matches!(Rule::compile(",,"), Err(FeedsyncError::EmptyRule)));
    }

    #[test]
    fn test_compile_splits_on_first_equals() {
        let rule = Rule::compile("Link=url=x").unwrap();
        assert_eq!(rule.pairs(), &[FieldPair::new("Link", "url=x")]);
    }

    #[test]
    fn test_compile_skips_empty_tokens_and_trims() {
        let rule = Rule::compile(" Title = t , ,Author,").unwrap();
        assert_eq!(
            rule.pairs(),
            &[FieldPair::new("Title", "t"), FieldPair::new("Author", "Author")]
        );
    }

    #[test]
    fn test_compile_keeps_order_of_duplicate_outputs() {
        let rule = Rule::compile("Title=t,GUID=t").unwrap();
        assert_eq!(rule.len(), 2);
        assert_eq!(rule.pairs()[1], FieldPair::new("GUID", "t"));
    }

    #[test]
    fn test_display_is_canonical() {
        let rule: Rule = "Title = t,GUID".parse().unwrap();
        assert_eq!(rule.to_string(), "Title=t,GUID");
    }
}
