/*
 * iterate.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Progress-tracking iteration.
//!
//! [`iterate`] wraps any sequence and reports first/last/index/total for each
//! element via one-element lookahead, so `last` is correct even for lazy
//! sources whose length is unknown. [`interruptable`] is the companion
//! adapter used by the resource-block protocol: a `None` in the underlying
//! sequence ends iteration early.

/// One step of a tracked iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Iteration<T> {
    pub first: bool,
    pub last: bool,
    pub index: usize,
    /// Total element count, when the source exposes an exact length.
    pub total: Option<usize>,
    pub value: T,
}

/// Wrap a sequence, yielding an [`Iteration`] per element.
pub fn iterate<I: IntoIterator>(source: I) -> Iterate<I::IntoIter> {
    let iter = source.into_iter();
    let total = match iter.size_hint() {
        (lower, Some(upper)) if lower == upper => Some(upper),
        _ => None,
    };
    Iterate {
        iter,
        total,
        held: None,
        index: 0,
        started: false,
    }
}

/// Iterator state for [`iterate`].
#[derive(Debug)]
pub struct Iterate<I: Iterator> {
    iter: I,
    total: Option<usize>,
    held: Option<I::Item>,
    index: usize,
    started: bool,
}

impl<I: Iterator> Iterator for Iterate<I> {
    type Item = Iteration<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            self.held = self.iter.next();
        }

        let value = self.held.take()?;
        // Pull one element ahead so `last` is known before yielding.
        self.held = self.iter.next();

        let step = Iteration {
            first: self.index == 0,
            last: self.held.is_none(),
            index: self.index,
            total: self.total,
            value,
        };
        self.index += 1;
        Some(step)
    }
}

/// Stop at the first `None` in a sequence of optional values.
///
/// The resource-block enter/exit protocol yields either real output
/// fragments or a sentinel meaning "suppress"; this turns the sentinel into
/// an early stop.
pub fn interruptable<T, I>(source: I) -> impl Iterator<Item = T>
where
    I: IntoIterator<Item = Option<T>>,
{
    source.into_iter().take_while(Option::is_some).flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_yields_nothing() {
        let empty: Vec<i32> = vec![];
        assert_eq!(iterate(empty).count(), 0);
    }

    #[test]
    fn test_single_element() {
        let steps: Vec<_> = iterate(vec!["x"]).collect();
        assert_eq!(steps.len(), 1);
        let step = &steps[0];
        assert!(step.first);
        assert!(step.last);
        assert_eq!(step.index, 0);
        assert_eq!(step.total, Some(1));
        assert_eq!(step.value, "x");
    }

    #[test]
    fn test_first_last_index_total() {
        let steps: Vec<_> = iterate(vec![10, 20, 30]).collect();
        assert_eq!(
            steps.iter().map(|s| (s.first, s.last, s.index)).collect::<Vec<_>>(),
            vec![(true, false, 0), (false, false, 1), (false, true, 2)]
        );
        assert!(steps.iter().all(|s| s.total == Some(3)));
    }

    #[test]
    fn test_lazy_source_unknown_total_still_marks_last() {
        // `filter` destroys the exact size hint.
        let steps: Vec<_> = iterate((0..3).filter(|_| true)).collect();
        assert_eq!(steps.len(), 3);
        assert!(steps.iter().all(|s| s.total.is_none()));
        assert!(steps[2].last);
        assert!(!steps[1].last);
    }

    #[test]
    fn test_interruptable_stops_at_none() {
        let values = vec![Some(1), Some(2), None, Some(3)];
        let collected: Vec<_> = interruptable(values).collect();
        assert_eq!(collected, vec![1, 2]);
    }

    #[test]
    fn test_interruptable_without_sentinel() {
        let values = vec![Some("a"), Some("b")];
        let collected: Vec<_> = interruptable(values).collect();
        assert_eq!(collected, vec!["a", "b"]);
    }
}
