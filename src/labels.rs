//! Item labels.
//!
//! A label is read before its command and stays pending until a drawing
//! command binds it to the item it creates.

use crate::scene::ItemId;

#[derive(Debug, Default)]
pub struct LabelTable {
    bound: Vec<(String, ItemId)>,
    pending: Vec<String>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a bound label. Pending labels are not visible.
    pub fn find(&self, name: &str) -> Option<ItemId> {
        self.bound.iter().find(|(n, _)| n == name).map(|&(_, id)| id)
    }

    pub fn add_pending(&mut self, name: impl Into<String>) {
        self.pending.push(name.into());
    }

    /// Attach every pending label to `item`.
    pub fn bind_pending(&mut self, item: ItemId) {
        for name in self.pending.drain(..) {
            self.bound.push((name, item));
        }
    }

    /// Drop and return the labels no drawing command consumed.
    pub fn take_pending(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ItemId)> {
        self.bound.iter().map(|(n, id)| (n.as_str(), *id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_labels_bind_to_next_item() {
        let mut labels = LabelTable::new();
        labels.add_pending("A");
        labels.add_pending("B");
        assert_eq!(labels.find("A"), None);
        labels.bind_pending(3);
        assert_eq!(labels.find("A"), Some(3));
        assert_eq!(labels.find("B"), Some(3));
        assert!(!labels.has_pending());
    }

    #[test]
    fn unconsumed_labels_are_returned() {
        let mut labels = LabelTable::new();
        labels.add_pending("X");
        assert_eq!(labels.take_pending(), vec!["X".to_string()]);
        assert_eq!(labels.iter().count(), 0);
    }
}
