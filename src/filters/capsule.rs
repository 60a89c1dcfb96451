//! Filter capsules: a mini AND/OR filter usable as a single predicate.

use crate::filters::FilterFn;

/// A compound predicate built from an AND list and an OR list.
///
/// A capsule matches an item when every AND predicate passes and, if the OR
/// list is non-empty, at least one OR predicate passes. This allows a
/// [`Filterable`](crate::filters::Filterable) chain to contain compound
/// conditions without nesting another `Filterable`. For example, "posts
/// from accounts under 7 days old that are either self posts or above 200
/// score" becomes one capsule added with
/// [`Filterable::filter_capsule`](crate::filters::Filterable::filter_capsule).
#[derive(Default)]
pub struct FilterCapsule<T> {
    and_filters: Vec<FilterFn<T>>,
    or_filters: Vec<FilterFn<T>>,
}

/// Which predicate list a filter is added to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    And,
    Or,
}

impl<T> FilterCapsule<T> {
    pub fn new() -> Self {
        Self {
            and_filters: Vec::new(),
            or_filters: Vec::new(),
        }
    }

    /// Add a predicate to the list selected by `kind`.
    ///
    /// Returns the capsule so calls can be chained.
    pub fn add_filter(mut self, kind: FilterKind, filter_func: impl Fn(&T) -> bool + 'static) -> Self {
        let boxed: FilterFn<T> = Box::new(filter_func);
        match kind {
            FilterKind::And => self.and_filters.push(boxed),
            FilterKind::Or => self.or_filters.push(boxed),
        }
        self
    }

    /// Convenience function to add to the AND list.
    pub fn add_and_filter(self, filter_func: impl Fn(&T) -> bool + 'static) -> Self {
        self.add_filter(FilterKind::And, filter_func)
    }

    /// Convenience function to add to the OR list.
    pub fn add_or_filter(self, filter_func: impl Fn(&T) -> bool + 'static) -> Self {
        self.add_filter(FilterKind::Or, filter_func)
    }

    /// Total number of predicates across both lists.
    pub fn len(&self) -> usize {
        self.and_filters.len() + self.or_filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check an item against the capsule's rules.
    ///
    /// AND predicates are evaluated in registration order and evaluation
    /// stops at the first false.
    pub fn matches(&self, item: &T) -> bool {
        for filter_func in &self.and_filters {
            if !filter_func(item) {
                return false;
            }
        }
        if self.or_filters.is_empty() {
            return true;
        }
        self.or_filters.iter().any(|filter_func| filter_func(item))
    }

    /// Consume the capsule, producing a single predicate closure.
    pub fn into_filter(self) -> impl Fn(&T) -> bool {
        move |item| self.matches(item)
    }
}
