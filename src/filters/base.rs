//! Base predicate factories shared by all other filter modules.
//!
//! Each factory takes an accessor closure that extracts the field to test
//! from a candidate item, and returns a predicate usable with
//! [`Filterable`](crate::filters::Filterable) or
//! [`FilterCapsule`](crate::filters::FilterCapsule).

use std::fmt;
use std::str::FromStr;

/// Errors raised while constructing a filter predicate.
///
/// These are programmer-misuse errors and are surfaced before any item is
/// evaluated.
#[derive(Debug)]
pub enum FilterError {
    UnsupportedComparator(String),
    UnsupportedTimeUnit(String),
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FilterError::UnsupportedComparator(symbol) => write!(
                f,
                "the symbol {:?} is not one of the supported comparison \
                 symbols: <, >, <=, >=, ==, !=",
                symbol
            ),
            FilterError::UnsupportedTimeUnit(unit) => write!(
                f,
                "the time unit {:?} is not recognized; use one of the \
                 second/minute/hour/day/week/month/year aliases",
                unit
            ),
        }
    }
}

impl std::error::Error for FilterError {}

/// The supported comparison operators for numeric filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Less,
    Greater,
    LessOrEqual,
    GreaterOrEqual,
    Equal,
    NotEqual,
}

impl Comparator {
    /// Apply the comparison with `left` on the left-hand side.
    pub fn compare<N: PartialOrd>(self, left: &N, right: &N) -> bool {
        match self {
            Comparator::Less => left < right,
            Comparator::Greater => left > right,
            Comparator::LessOrEqual => left <= right,
            Comparator::GreaterOrEqual => left >= right,
            Comparator::Equal => left == right,
            Comparator::NotEqual => left != right,
        }
    }

    /// The textual symbol for this comparator.
    pub fn symbol(self) -> &'static str {
        match self {
            Comparator::Less => "<",
            Comparator::Greater => ">",
            Comparator::LessOrEqual => "<=",
            Comparator::GreaterOrEqual => ">=",
            Comparator::Equal => "==",
            Comparator::NotEqual => "!=",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Comparator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" => Ok(Comparator::Less),
            ">" => Ok(Comparator::Greater),
            "<=" => Ok(Comparator::LessOrEqual),
            ">=" => Ok(Comparator::GreaterOrEqual),
            "==" => Ok(Comparator::Equal),
            "!=" => Ok(Comparator::NotEqual),
            _ => Err(FilterError::UnsupportedComparator(s.to_string())),
        }
    }
}

/// Filter by equality on a field extracted by `accessor`.
///
/// For numerical comparisons such as score thresholds, use
/// [`filter_number`] instead.
pub fn filter_attribute<T, A, F>(accessor: F, value: A) -> impl Fn(&T) -> bool
where
    F: Fn(&T) -> A,
    A: PartialEq,
{
    move |item| accessor(item) == value
}

/// Filter by an ordered comparison on a field extracted by `accessor`.
pub fn filter_number<T, N, F>(accessor: F, comparator: Comparator, value: N) -> impl Fn(&T) -> bool
where
    F: Fn(&T) -> N,
    N: PartialOrd,
{
    move |item| comparator.compare(&accessor(item), &value)
}

/// Like [`filter_number`], but taking the comparator as its textual symbol.
///
/// An unrecognized symbol fails here, at construction time, before any item
/// is evaluated.
pub fn filter_number_symbol<T, N, F>(
    accessor: F,
    symbol: &str,
    value: N,
) -> Result<impl Fn(&T) -> bool, FilterError>
where
    F: Fn(&T) -> N,
    N: PartialOrd,
{
    let comparator: Comparator = symbol.parse()?;
    Ok(filter_number(accessor, comparator, value))
}

/// Filter by the truthiness of a boolean field extracted by `accessor`.
pub fn filter_true<T, F>(accessor: F) -> impl Fn(&T) -> bool
where
    F: Fn(&T) -> bool,
{
    move |item| accessor(item)
}

/// The opposite of [`filter_true`]: keep items whose field is false.
pub fn filter_false<T, F>(accessor: F) -> impl Fn(&T) -> bool
where
    F: Fn(&T) -> bool,
{
    move |item| !accessor(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        name: &'static str,
        value: i64,
        active: bool,
    }

    fn items() -> Vec<Item> {
        vec![
            Item { name: "foo", value: 3, active: true },
            Item { name: "bar", value: 5, active: false },
            Item { name: "baz", value: 7, active: true },
            Item { name: "qux", value: 9, active: false },
        ]
    }

    #[test]
    fn attribute_equality_matches_single_item() {
        let pred = filter_attribute(|i: &Item| i.name, "foo");
        let matched: Vec<_> = items().into_iter().filter(|i| pred(i)).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "foo");
    }

    #[test]
    fn greater_than_five_keeps_seven_and_nine() {
        let pred = filter_number(|i: &Item| i.value, Comparator::Greater, 5);
        let values: Vec<i64> = items()
            .into_iter()
            .filter(|i| pred(i))
            .map(|i| i.value)
            .collect();
        assert_eq!(values, vec![7, 9]);
    }

    #[test]
    fn symbol_form_parses_before_evaluation() {
        let pred = filter_number_symbol(|i: &Item| i.value, "<=", 5).unwrap();
        let values: Vec<i64> = items()
            .into_iter()
            .filter(|i| pred(i))
            .map(|i| i.value)
            .collect();
        assert_eq!(values, vec![3, 5]);
    }

    #[test]
    fn unsupported_symbol_fails_at_construction() {
        let err = filter_number_symbol(|i: &Item| i.value, "~=", 5)
            .err()
            .unwrap();
        assert!(matches!(err, FilterError::UnsupportedComparator(ref s) if s == "~="));
    }

    #[test]
    fn truthiness_filters() {
        let active = filter_true(|i: &Item| i.active);
        let inactive = filter_false(|i: &Item| i.active);
        assert_eq!(items().iter().filter(|i| active(i)).count(), 2);
        assert_eq!(items().iter().filter(|i| inactive(i)).count(), 2);
    }

    #[test]
    fn all_comparators_parse() {
        for symbol in ["<", ">", "<=", ">=", "==", "!="] {
            let comparator: Comparator = symbol.parse().unwrap();
            assert_eq!(comparator.symbol(), symbol);
        }
    }
}
