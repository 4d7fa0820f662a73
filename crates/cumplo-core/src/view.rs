//! `ViewPage`: one list view's session state over an injected store.
//!
//! A view page holds the active clause set, the filtered snapshot, the page
//! cursor, and the bulk-selection set. Filtering and the return to page 1 are
//! a single operation ([`ViewPage::apply_filters`]), and every mutation made
//! through the page re-runs the filter afterwards, so the snapshot never goes
//! stale relative to the store.

use std::{marker::PhantomData, sync::Arc};

use crate::{
  filter::ClauseSet,
  paginate::{Page, Paginator},
  record::{Flagged, Record},
  selection::SelectionTracker,
  store::{FlagStore, RecordStore},
};

/// What a filter pass produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOutcome {
  pub total_items: usize,
  /// Always 1: a filter pass returns the view to its first page.
  pub page:        usize,
  /// Selected ids dropped because they are no longer visible.
  pub pruned:      usize,
}

pub struct ViewPage<R: Record, S: RecordStore<R>> {
  store:     Arc<S>,
  clauses:   ClauseSet<R::Field>,
  visible:   Vec<R>,
  paginator: Paginator,
  selection: SelectionTracker,
  _record:   PhantomData<fn() -> R>,
}

impl<R: Record, S: RecordStore<R>> ViewPage<R, S> {
  /// Open a view over the whole collection, on page 1, nothing selected.
  pub async fn open(store: Arc<S>) -> Result<Self, S::Error> {
    let mut page = Self {
      store,
      clauses: ClauseSet::new(),
      visible: Vec::new(),
      paginator: Paginator::for_record::<R>(),
      selection: SelectionTracker::new(),
      _record: PhantomData,
    };
    page.refresh().await?;
    Ok(page)
  }

  /// Replace the clause set, re-filter, return to page 1, and drop selected
  /// ids that the new filter hides.
  pub async fn apply_filters(
    &mut self,
    clauses: ClauseSet<R::Field>,
  ) -> Result<FilterOutcome, S::Error> {
    self.clauses = clauses;
    self.refresh().await
  }

  /// Re-run the current clause set against the store.
  pub async fn refresh(&mut self) -> Result<FilterOutcome, S::Error> {
    self.visible = self.store.filter(&self.clauses).await?;
    self.paginator.reset(self.visible.len());
    let pruned = self
      .selection
      .retain_visible(self.visible.iter().map(R::id));
    Ok(FilterOutcome {
      total_items: self.visible.len(),
      page: self.paginator.current_page(),
      pruned,
    })
  }

  pub fn clauses(&self) -> &ClauseSet<R::Field> { &self.clauses }

  /// The full filtered snapshot, in source order.
  pub fn visible(&self) -> &[R] { &self.visible }

  pub fn page(&self) -> Page<&R> { self.paginator.page(&self.visible) }

  pub fn current_page(&self) -> usize { self.paginator.current_page() }

  pub fn total_pages(&self) -> usize { self.paginator.total_pages() }

  pub fn next_page(&mut self) -> bool { self.paginator.next() }

  pub fn previous_page(&mut self) -> bool { self.paginator.previous() }

  pub fn go_to_page(&mut self, page: usize) -> usize { self.paginator.go_to(page) }

  pub fn selection(&self) -> &SelectionTracker { &self.selection }

  /// Tick or untick one record. Only records in the filtered snapshot can be
  /// ticked. Returns `true` if it is now selected.
  pub fn toggle_selected(&mut self, id: &str) -> bool {
    if self.selection.deselect(id) {
      return false;
    }
    if !self.visible.iter().any(|r| r.id() == id) {
      return false;
    }
    self.selection.select(id)
  }

  /// Set the status of one record, then re-filter.
  pub async fn set_status(
    &mut self,
    id: &str,
    status: R::Status,
  ) -> Result<Option<R>, S::Error> {
    let updated = self.store.set_status(id, status).await?;
    self.refresh().await?;
    Ok(updated)
  }

  /// Apply `status` to every selected record, clear the selection, then
  /// re-filter. Returns the ids that were updated. If the store fails the
  /// selection is kept.
  pub async fn apply_to_selection(
    &mut self,
    status: R::Status,
  ) -> Result<Vec<String>, S::Error> {
    let ids = self.selection.to_vec();
    let updated = self.store.set_status_many(&ids, status).await?;
    self.selection.clear();
    self.refresh().await?;
    Ok(updated)
  }
}

impl<R: Flagged, S: FlagStore<R>> ViewPage<R, S> {
  /// Flip one flag on one record, then re-filter.
  pub async fn toggle_flag(&mut self, id: &str, flag: R::Flag) -> Result<Option<R>, S::Error> {
    let updated = self.store.toggle_flag(id, flag).await?;
    self.refresh().await?;
    Ok(updated)
  }
}
