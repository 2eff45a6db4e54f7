use std::collections::VecDeque;

#[derive(Debug, Clone)]
struct Entry<T, C> {
    cost: C,
    item: T,
}

/// Cost-ordered search frontier.
///
/// Entries are kept sorted ascending by cost. Entries of equal cost keep
/// their insertion order, so popping the cheapest entry is stable and
/// searches expand ties first-come first-served.
#[derive(Debug, Clone)]
pub struct OpenList<T, C = u32> {
    entries: VecDeque<Entry<T, C>>,
}

impl<T, C> Default for OpenList<T, C> {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }
}

impl<T, C> OpenList<T, C>
where
    C: PartialOrd + Copy,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert after every entry whose cost is `<= cost`.
    pub fn add(&mut self, cost: C, item: T) {
        let at = self.entries.partition_point(|e| e.cost <= cost);
        self.entries.insert(at, Entry { cost, item });
    }

    pub fn pop_lowest(&mut self) -> Option<(C, T)> {
        self.entries.pop_front().map(|e| (e.cost, e.item))
    }

    pub fn peek_lowest(&self) -> Option<(C, &T)> {
        self.entries.front().map(|e| (e.cost, &e.item))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in expansion order.
    pub fn iter(&self) -> impl Iterator<Item = (C, &T)> + '_ {
        self.entries.iter().map(|e| (e.cost, &e.item))
    }
}
