//! Textual rendering of a list through a caller-supplied formatter.

use std::fmt;
use std::iter::FusedIterator;

use crate::list::{Iter, LinkedList};

/// Lazy rendering returned by [`LinkedList::render`].
///
/// Yields one rendered segment per element, front to back, calling the
/// formatter only when advanced.
pub struct Render<'a, T, F> {
    iter: Iter<'a, T>,
    render: F,
}

impl<'a, T, F> Render<'a, T, F> {
    pub(crate) fn new(iter: Iter<'a, T>, render: F) -> Self {
        Self { iter, render }
    }
}

impl<T, F> Iterator for Render<'_, T, F>
where
    F: Fn(&T) -> String,
{
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.iter.next().map(&self.render)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T, F> ExactSizeIterator for Render<'_, T, F> where F: Fn(&T) -> String {}

impl<T, F> FusedIterator for Render<'_, T, F> where F: Fn(&T) -> String {}

/// `Display` adapter returned by [`LinkedList::display_with`].
pub struct DisplayWith<'a, T, F> {
    list: &'a LinkedList<T>,
    render: F,
}

impl<'a, T, F> DisplayWith<'a, T, F> {
    pub(crate) fn new(list: &'a LinkedList<T>, render: F) -> Self {
        Self { list, render }
    }
}

impl<T, F> fmt::Display for DisplayWith<'_, T, F>
where
    F: Fn(&T) -> String,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[head]")?;
        for data in self.list {
            write!(f, "->[{}]", (self.render)(data))?;
        }
        f.write_str("->[tail]")
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::LinkedList;

    #[test]
    fn test_empty_list_shows_only_sentinels() {
        let list: LinkedList<i32> = LinkedList::new();
        assert_eq!(list.display_with(|n| n.to_string()).to_string(), "[head]->[tail]");
        assert_eq!(list.render(|n| n.to_string()).next(), None);
    }

    #[test]
    fn test_display_follows_chain_order() {
        let mut list: LinkedList<i32> = [10, 30].into_iter().collect();
        list.insert(1, 20).unwrap();
        assert_eq!(
            list.display_with(|n| format!("{n:>3}")).to_string(),
            "[head]->[ 10]->[ 20]->[ 30]->[tail]"
        );
    }

    #[test]
    fn test_render_is_lazy_and_visits_each_element_once() {
        let list: LinkedList<char> = "abcd".chars().collect();
        let calls = Cell::new(0);
        let mut parts = list.render(|c| {
            calls.set(calls.get() + 1);
            c.to_string()
        });

        assert_eq!(calls.get(), 0);
        assert_eq!(parts.len(), 4);
        assert_eq!(parts.next().as_deref(), Some("a"));
        assert_eq!(calls.get(), 1);

        let rest: Vec<String> = parts.by_ref().collect();
        assert_eq!(rest, ["b", "c", "d"]);
        assert_eq!(parts.next(), None);
        assert_eq!(calls.get(), 4);
    }
}
