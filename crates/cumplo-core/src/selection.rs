//! Selected record identifiers for bulk actions.

use std::collections::BTreeSet;

/// A set of record ids ticked in a list view. Iteration is in id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
  ids: BTreeSet<String>,
}

impl SelectionTracker {
  pub fn new() -> Self { Self::default() }

  /// Flip membership of `id`. Returns `true` if it is now selected.
  pub fn toggle(&mut self, id: &str) -> bool {
    if self.ids.remove(id) {
      false
    } else {
      self.ids.insert(id.to_owned());
      true
    }
  }

  pub fn select(&mut self, id: &str) -> bool { self.ids.insert(id.to_owned()) }

  pub fn deselect(&mut self, id: &str) -> bool { self.ids.remove(id) }

  pub fn contains(&self, id: &str) -> bool { self.ids.contains(id) }

  pub fn len(&self) -> usize { self.ids.len() }

  pub fn is_empty(&self) -> bool { self.ids.is_empty() }

  pub fn iter(&self) -> impl Iterator<Item = &str> { self.ids.iter().map(String::as_str) }

  pub fn clear(&mut self) { self.ids.clear(); }

  /// The selected ids, in id order.
  pub fn to_vec(&self) -> Vec<String> { self.ids.iter().cloned().collect() }

  /// Drop every id not in `visible`. Returns how many were dropped.
  pub fn retain_visible<'a>(&mut self, visible: impl IntoIterator<Item = &'a str>) -> usize {
    let visible: BTreeSet<&str> = visible.into_iter().collect();
    let before = self.ids.len();
    self.ids.retain(|id| visible.contains(id.as_str()));
    before - self.ids.len()
  }
}
