//! Filter query builder
//!
//! Renders AND-combined filter criteria into the service's query dialect:
//! `status="Open"&&totalAmount>500`.

use std::fmt;
use std::str::FromStr;

use crate::config::api;
use crate::error::AcctError;

/// Comparison operator of a single criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Equals,
    Contains,
    GreaterThan,
    LessThan,
}

impl FilterOp {
    pub fn symbol(&self) -> char {
        match self {
            FilterOp::Equals => '=',
            FilterOp::Contains => '~',
            FilterOp::GreaterThan => '>',
            FilterOp::LessThan => '<',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            '=' => Some(FilterOp::Equals),
            '~' => Some(FilterOp::Contains),
            '>' => Some(FilterOp::GreaterThan),
            '<' => Some(FilterOp::LessThan),
            _ => None,
        }
    }
}

/// Right-hand side of a criterion
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Rendered inside double quotes, without escaping
    String(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "\"{}\"", s),
            Literal::Number(n) => write!(f, "{}", n),
            Literal::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Number(n.into())
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

/// A single `field<op>literal` comparison
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriterion {
    pub field: String,
    pub op: FilterOp,
    pub value: Literal,
}

impl FilterCriterion {
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<Literal>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }
}

impl fmt::Display for FilterCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field, self.op.symbol(), self.value)
    }
}

/// Parse the command-line form, e.g. `status=Paid` or `totalAmount>500`
impl FromStr for FilterCriterion {
    type Err = AcctError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (idx, op) = s
            .char_indices()
            .find_map(|(i, c)| FilterOp::from_symbol(c).map(|op| (i, op)))
            .ok_or_else(|| {
                AcctError::InvalidArgument(format!(
                    "filter '{}' has no operator (expected one of = ~ > <)",
                    s
                ))
            })?;

        let field = s[..idx].trim();
        let raw = s[idx + 1..].trim();
        if field.is_empty() || raw.is_empty() {
            return Err(AcctError::InvalidArgument(format!(
                "filter '{}' must look like field<op>value",
                s
            )));
        }

        Ok(FilterCriterion::new(field, op, parse_literal(raw)))
    }
}

fn parse_literal(raw: &str) -> Literal {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return Literal::String(raw[1..raw.len() - 1].to_string());
    }
    match raw {
        "true" => return Literal::Bool(true),
        "false" => return Literal::Bool(false),
        _ => {}
    }
    match serde_json::from_str::<serde_json::Number>(raw) {
        Ok(n) => Literal::Number(n),
        Err(_) => Literal::String(raw.to_string()),
    }
}

/// Build the filter expression; empty input yields an empty string
pub fn build_query(criteria: &[FilterCriterion]) -> String {
    criteria
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("&&")
}

/// Query parameters carrying the filter, or none when there is nothing to filter
pub fn query_params(criteria: &[FilterCriterion]) -> Vec<(String, String)> {
    let query = build_query(criteria);
    if query.is_empty() {
        Vec::new()
    } else {
        vec![(api::QUERY_PARAM.to_string(), query)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_criteria() {
        assert_eq!(build_query(&[]), "");
        assert!(query_params(&[]).is_empty());
    }

    #[test]
    fn test_single_string_criterion() {
        let q = build_query(&[FilterCriterion::new("status", FilterOp::Equals, "Paid")]);
        assert_eq!(q, "status=\"Paid\"");
    }

    #[test]
    fn test_string_and_number_criteria() {
        let q = build_query(&[
            FilterCriterion::new("status", FilterOp::Equals, "Open"),
            FilterCriterion::new("totalAmount", FilterOp::GreaterThan, 500),
        ]);
        assert_eq!(q, "status=\"Open\"&&totalAmount>500");
    }

    #[test]
    fn test_operator_symbols() {
        let q = build_query(&[
            FilterCriterion::new("name", FilterOp::Contains, "Acme"),
            FilterCriterion::new("balance", FilterOp::LessThan, 10),
            FilterCriterion::new("active", FilterOp::Equals, true),
        ]);
        assert_eq!(q, "name~\"Acme\"&&balance<10&&active=true");
    }

    #[test]
    fn test_separator_count_and_order_preserved() {
        let criteria: Vec<FilterCriterion> = ["z", "a", "m", "b"]
            .iter()
            .map(|f| FilterCriterion::new(*f, FilterOp::Equals, 1))
            .collect();
        let q = build_query(&criteria);
        assert_eq!(q.matches("&&").count(), criteria.len() - 1);
        assert_eq!(q, "z=1&&a=1&&m=1&&b=1");
    }

    #[test]
    fn test_embedded_quote_is_not_escaped() {
        let q = build_query(&[FilterCriterion::new("memo", FilterOp::Equals, "say \"hi\"")]);
        assert_eq!(q, "memo=\"say \"hi\"\"");
    }

    #[test]
    fn test_query_params_key() {
        let params = query_params(&[FilterCriterion::new("status", FilterOp::Equals, "Paid")]);
        assert_eq!(
            params,
            vec![("query".to_string(), "status=\"Paid\"".to_string())]
        );
    }

    #[test]
    fn test_parse_string_value() {
        let c: FilterCriterion = "status=Paid".parse().unwrap();
        assert_eq!(c, FilterCriterion::new("status", FilterOp::Equals, "Paid"));
    }

    #[test]
    fn test_parse_numeric_value() {
        let c: FilterCriterion = "totalAmount>500".parse().unwrap();
        assert_eq!(c.op, FilterOp::GreaterThan);
        assert_eq!(c.to_string(), "totalAmount>500");

        let c: FilterCriterion = "totalAmount<120.5".parse().unwrap();
        assert_eq!(c.to_string(), "totalAmount<120.5");
    }

    #[test]
    fn test_parse_quoted_number_stays_string() {
        let c: FilterCriterion = "reference=\"1001\"".parse().unwrap();
        assert_eq!(c.value, Literal::String("1001".to_string()));
    }

    #[test]
    fn test_parse_contains_and_bool() {
        let c: FilterCriterion = "name~Acme Corp".parse().unwrap();
        assert_eq!(c.to_string(), "name~\"Acme Corp\"");

        let c: FilterCriterion = "archived=false".parse().unwrap();
        assert_eq!(c.value, Literal::Bool(false));
    }

    #[test]
    fn test_parse_errors() {
        assert!("status".parse::<FilterCriterion>().is_err());
        assert!("=Paid".parse::<FilterCriterion>().is_err());
        assert!("status=".parse::<FilterCriterion>().is_err());
    }
}
