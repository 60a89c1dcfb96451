//! Filter items from a listing or stream with chainable predicates.

pub mod base;
pub mod capsule;
pub mod posts;

pub use base::{
    filter_attribute, filter_false, filter_number, filter_number_symbol, filter_true, Comparator,
    FilterError,
};
pub use capsule::{FilterCapsule, FilterKind};

/// A boxed filter predicate over items of type `T`.
pub type FilterFn<T> = Box<dyn Fn(&T) -> bool>;

/// A lazily filtered view over a source iterator.
///
/// There are two predicate lists: AND filters and OR filters. An item is
/// yielded when every AND filter and at least one OR filter (if any are
/// registered) return true. AND filters run in registration order and stop
/// at the first false, so later predicates never touch an item an earlier
/// one rejected. That matters when a predicate's accessor is expensive,
/// e.g. it triggers a lazy-loading fetch on the underlying object.
///
/// `Filterable` does not buffer: it is restartable only if the source is,
/// and it borrows nothing from the items it yields.
///
/// ```
/// use redditions::filters::Filterable;
///
/// let even_then_big = Filterable::new(0..20)
///     .filter(|n: &i32| n % 2 == 0)
///     .filter(|n: &i32| *n > 10);
/// let kept: Vec<i32> = even_then_big.collect();
/// assert_eq!(kept, vec![12, 14, 16, 18]);
/// ```
pub struct Filterable<I: Iterator> {
    source: I,
    and_filters: Vec<FilterFn<I::Item>>,
    or_filters: Vec<FilterFn<I::Item>>,
}

impl<I: Iterator> Filterable<I> {
    /// Wrap a source iterable with no predicates registered.
    pub fn new<S>(source: S) -> Self
    where
        S: IntoIterator<IntoIter = I, Item = I::Item>,
    {
        Self {
            source: source.into_iter(),
            and_filters: Vec::new(),
            or_filters: Vec::new(),
        }
    }

    /// Wrap a source iterable with an initial ordered list of AND filters.
    pub fn with_filters<S>(source: S, filters: Vec<FilterFn<I::Item>>) -> Self
    where
        S: IntoIterator<IntoIter = I, Item = I::Item>,
    {
        Self {
            source: source.into_iter(),
            and_filters: filters,
            or_filters: Vec::new(),
        }
    }

    /// Add a predicate that every yielded item must satisfy.
    ///
    /// Consumes and returns the `Filterable` so filters can be chained.
    pub fn filter(self, filter_func: impl Fn(&I::Item) -> bool + 'static) -> Self {
        self.add_filter(FilterKind::And, Box::new(filter_func))
    }

    /// Alias of [`filter`](Self::filter), mirroring [`filter_or`](Self::filter_or).
    pub fn filter_and(self, filter_func: impl Fn(&I::Item) -> bool + 'static) -> Self {
        self.filter(filter_func)
    }

    /// Add a predicate to the OR list; at least one OR predicate must pass
    /// once any are registered.
    pub fn filter_or(self, filter_func: impl Fn(&I::Item) -> bool + 'static) -> Self {
        self.add_filter(FilterKind::Or, Box::new(filter_func))
    }

    /// Add a compound [`FilterCapsule`] as a single AND predicate.
    pub fn filter_capsule(self, capsule: FilterCapsule<I::Item>) -> Self
    where
        I::Item: 'static,
    {
        self.filter(capsule.into_filter())
    }

    fn add_filter(mut self, kind: FilterKind, filter_func: FilterFn<I::Item>) -> Self {
        match kind {
            FilterKind::And => self.and_filters.push(filter_func),
            FilterKind::Or => self.or_filters.push(filter_func),
        }
        self
    }

    /// Total number of registered predicates across both lists.
    pub fn filter_count(&self) -> usize {
        self.and_filters.len() + self.or_filters.len()
    }

    /// Check a single item against the registered predicates.
    pub fn matches(&self, item: &I::Item) -> bool {
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
}

impl<I: Iterator> Iterator for Filterable<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.source.next()?;
            if self.matches(&item) {
                return Some(item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    struct Obj {
        name: &'static str,
        value: i64,
    }

    fn objects() -> Vec<Obj> {
        vec![
            Obj { name: "foo", value: 3 },
            Obj { name: "bar", value: 5 },
            Obj { name: "foo", value: 7 },
            Obj { name: "baz", value: 9 },
        ]
    }

    #[test]
    fn unfiltered_yields_everything() {
        let all: Vec<Obj> = Filterable::new(objects()).collect();
        assert_eq!(all, objects());
    }

    #[test]
    fn chained_filters_equal_constructor_filters() {
        let chained: Vec<Obj> = Filterable::new(objects())
            .filter(|o: &Obj| o.name == "foo")
            .filter(|o: &Obj| o.value > 3)
            .collect();

        let constructed: Vec<Obj> = Filterable::with_filters(
            objects(),
            vec![
                Box::new(|o: &Obj| o.name == "foo"),
                Box::new(|o: &Obj| o.value > 3),
            ],
        )
        .collect();

        assert_eq!(chained, constructed);
        assert_eq!(chained, vec![Obj { name: "foo", value: 7 }]);
    }

    #[test]
    fn and_filters_short_circuit_in_registration_order() {
        let spy_calls = Rc::new(Cell::new(0usize));
        let spy_calls_inner = Rc::clone(&spy_calls);

        let kept: Vec<Obj> = Filterable::new(objects())
            .filter(|_: &Obj| false)
            .filter(move |_: &Obj| {
                spy_calls_inner.set(spy_calls_inner.get() + 1);
                true
            })
            .collect();

        assert!(kept.is_empty());
        assert_eq!(spy_calls.get(), 0, "spy predicate ran after a false filter");
    }

    #[test]
    fn or_filters_require_at_least_one_match() {
        let kept: Vec<i64> = Filterable::new(objects())
            .filter_or(|o: &Obj| o.value < 4)
            .filter_or(|o: &Obj| o.value > 8)
            .map(|o| o.value)
            .collect();
        assert_eq!(kept, vec![3, 9]);
    }

    #[test]
    fn and_and_or_filters_combine() {
        let kept: Vec<Obj> = Filterable::new(objects())
            .filter(|o: &Obj| o.value > 3)
            .filter_or(|o: &Obj| o.name == "foo")
            .filter_or(|o: &Obj| o.name == "baz")
            .collect();
        assert_eq!(
            kept,
            vec![Obj { name: "foo", value: 7 }, Obj { name: "baz", value: 9 }]
        );
    }

    #[test]
    fn capsule_acts_as_single_and_predicate() {
        let capsule = FilterCapsule::new()
            .add_and_filter(|o: &Obj| o.value > 3)
            .add_or_filter(|o: &Obj| o.name == "bar")
            .add_or_filter(|o: &Obj| o.name == "baz");

        let kept: Vec<&'static str> = Filterable::new(objects())
            .filter_capsule(capsule)
            .map(|o| o.name)
            .collect();
        assert_eq!(kept, vec!["bar", "baz"]);
    }

    #[test]
    fn iteration_is_lazy() {
        // An infinite source terminates as soon as the caller stops pulling.
        let first: Vec<u64> = Filterable::new(0u64..)
            .filter(|n: &u64| n % 3 == 0)
            .take(4)
            .collect();
        assert_eq!(first, vec![0, 3, 6, 9]);
    }

    #[test]
    fn filter_count_spans_both_lists() {
        let filterable = Filterable::new(objects())
            .filter(|_: &Obj| true)
            .filter_or(|_: &Obj| true);
        assert_eq!(filterable.filter_count(), 2);
    }
}
