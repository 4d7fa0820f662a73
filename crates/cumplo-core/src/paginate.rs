//! Fixed-size pagination over a filtered sequence.
//!
//! Pages are 1-based. There is always at least one page, even for an empty
//! sequence, and every page number handed out is clamped into
//! `[1, total_pages]`.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// `max(1, ceil(total_items / page_size))`. A zero page size counts as one.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
  total_items.div_ceil(page_size.max(1)).max(1)
}

/// Index range of `page` (clamped) within a sequence of `total_items`.
fn page_range(total_items: usize, page: usize, page_size: usize) -> Range<usize> {
  let page_size = page_size.max(1);
  let page = page.clamp(1, total_pages(total_items, page_size));
  let start = ((page - 1) * page_size).min(total_items);
  let end = (page * page_size).min(total_items);
  start..end
}

// ─── Page ────────────────────────────────────────────────────────────────────

/// One page of records together with the paging metadata a list view needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
  pub items:       Vec<T>,
  pub page:        usize,
  pub page_size:   usize,
  pub total_items: usize,
  pub total_pages: usize,
}

impl<T> Page<T> {
  pub fn has_next(&self) -> bool { self.page < self.total_pages }

  pub fn has_previous(&self) -> bool { self.page > 1 }

  pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
    Page {
      items:       self.items.into_iter().map(f).collect(),
      page:        self.page,
      page_size:   self.page_size,
      total_items: self.total_items,
      total_pages: self.total_pages,
    }
  }
}

/// Slice `items` into the requested page. Out-of-range page numbers are
/// clamped rather than rejected.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
  let total = total_pages(items.len(), page_size);
  Page {
    items:       items[page_range(items.len(), page, page_size)].to_vec(),
    page:        page.clamp(1, total),
    page_size:   page_size.max(1),
    total_items: items.len(),
    total_pages: total,
  }
}

// ─── Paginator ───────────────────────────────────────────────────────────────

/// Current-page cursor over a sequence whose length may change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
  page_size:   usize,
  current:     usize,
  total_items: usize,
}

impl Paginator {
  /// A zero page size counts as one, as in [`total_pages`].
  pub fn new(page_size: usize) -> Self {
    Self { page_size: page_size.max(1), current: 1, total_items: 0 }
  }

  /// Paginator sized for a record kind's list view.
  pub fn for_record<R: Record>() -> Self { Self::new(R::PAGE_SIZE) }

  pub fn page_size(&self) -> usize { self.page_size }

  pub fn current_page(&self) -> usize { self.current }

  pub fn total_items(&self) -> usize { self.total_items }

  pub fn total_pages(&self) -> usize { total_pages(self.total_items, self.page_size) }

  /// Record a new sequence length and return to page 1.
  pub fn reset(&mut self, total_items: usize) {
    self.total_items = total_items;
    self.current = 1;
  }

  /// Advance one page. Returns `false` (and stays put) on the last page.
  pub fn next(&mut self) -> bool {
    if self.current < self.total_pages() {
      self.current += 1;
      true
    } else {
      false
    }
  }

  /// Go back one page. Returns `false` (and stays put) on page 1.
  pub fn previous(&mut self) -> bool {
    if self.current > 1 {
      self.current -= 1;
      true
    } else {
      false
    }
  }

  /// Jump to `page`, clamped into range. Returns the page actually selected.
  pub fn go_to(&mut self, page: usize) -> usize {
    self.current = page.clamp(1, self.total_pages());
    self.current
  }

  /// Index range of the current page.
  pub fn range(&self) -> Range<usize> {
    page_range(self.total_items, self.current, self.page_size)
  }

  /// The current page's slice of `items`. `items` should be the sequence the
  /// paginator was last reset with; a shorter slice is clamped.
  pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
    let range = self.range();
    &items[range.start.min(items.len())..range.end.min(items.len())]
  }

  /// Build a [`Page`] view of `items` for the current page.
  pub fn page<'a, T>(&self, items: &'a [T]) -> Page<&'a T> {
    Page {
      items:       self.slice(items).iter().collect(),
      page:        self.current,
      page_size:   self.page_size,
      total_items: self.total_items,
      total_pages: self.total_pages(),
    }
  }
}
