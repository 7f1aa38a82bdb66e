//! Ordered set of chosen items.

use indexmap::IndexSet;

/// Items picked by the user, in insertion order and without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    items: IndexSet<String>,
}

impl Selection {
    /// Appends the item, returns false if it was already selected
    pub fn insert(&mut self, item: &str) -> bool {
        if self.items.contains(item) {
            return false;
        }
        self.items.insert(item.to_owned())
    }

    /// Removes the item and keeps the order of the others, returns false if it was not selected
    pub fn remove(&mut self, item: &str) -> bool {
        self.items.shift_remove(item)
    }

    /// Whether the item is selected
    pub fn contains(&self, item: &str) -> bool {
        self.items.contains(item)
    }

    /// Most recently added item
    pub fn last(&self) -> Option<&str> {
        self.items.last().map(String::as_str)
    }

    /// Number of selected items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Selected items in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Owned copy of the selected items
    pub fn to_vec(&self) -> Vec<String> {
        self.items.iter().cloned().collect()
    }
}

impl<'a> FromIterator<&'a str> for Selection {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut res = Self::default();
        for item in iter {
            res.insert(item);
        }
        res
    }
}
