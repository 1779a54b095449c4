//! Ordered history of visited destinations.
//!
//! The stack is seeded with a root entry and can never become empty. Only
//! [`NavController`](crate::controller::NavController) mutates it; everything
//! else sees it through `&BackStack`.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crate::{
    error::NavError,
    matcher::{RouteMatch, TemplateId},
    route::{RouteParams, RouteTemplate},
};

static NEXT_ENTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of one pushed entry.
///
/// Ids increase monotonically and are never reused, even across stacks, so
/// two visits to the same path remain distinguishable.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EntryId(u64);

impl EntryId {
    fn new() -> Self {
        Self(NEXT_ENTRY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// One visit to a destination.
#[derive(Clone, Debug)]
pub struct BackStackEntry {
    id: EntryId,
    path: String,
    template_id: TemplateId,
    template: Arc<RouteTemplate>,
    params: RouteParams,
}

impl BackStackEntry {
    /// Identity of this visit.
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// The concrete path that was navigated to.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Registry id of the matched template.
    pub fn template_id(&self) -> TemplateId {
        self.template_id
    }

    /// The matched template.
    pub fn template(&self) -> &RouteTemplate {
        &self.template
    }

    /// Parameters extracted from [`Self::path`].
    pub fn params(&self) -> &RouteParams {
        &self.params
    }
}

/// Entries compare by identity, not by route content.
impl PartialEq for BackStackEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for BackStackEntry {}

/// Non-empty LIFO stack of [`BackStackEntry`] values, oldest first.
#[derive(Debug)]
pub struct BackStack {
    entries: Vec<BackStackEntry>,
}

#[allow(clippy::len_without_is_empty)]
impl BackStack {
    pub(crate) fn with_root(root: RouteMatch, path: &str) -> Self {
        let mut stack = Self {
            entries: Vec::new(),
        };
        stack.push(root, path);
        stack
    }

    /// Append a fresh entry on top and return it.
    pub(crate) fn push(&mut self, matched: RouteMatch, path: &str) -> &BackStackEntry {
        self.entries.push(BackStackEntry {
            id: EntryId::new(),
            path: path.to_owned(),
            template_id: matched.template_id,
            template: matched.template,
            params: matched.params,
        });
        self.peek()
    }

    /// Remove the top entry.
    ///
    /// Fails with [`NavError::CannotPopRoot`] when only the root remains.
    pub(crate) fn pop(&mut self) -> Result<BackStackEntry, NavError> {
        if self.is_root() {
            return Err(NavError::CannotPopRoot);
        }
        self.entries.pop().ok_or(NavError::CannotPopRoot)
    }

    /// Top entry.
    pub fn peek(&self) -> &BackStackEntry {
        // Seeded in `with_root` and never popped below one entry.
        &self.entries[self.entries.len() - 1]
    }

    /// Entry directly below the top.
    pub fn previous(&self) -> Option<&BackStackEntry> {
        self.entries.iter().rev().nth(1)
    }

    /// The start destination.
    pub fn root(&self) -> &BackStackEntry {
        &self.entries[0]
    }

    /// Whether only the root entry remains.
    pub fn is_root(&self) -> bool {
        self.entries.len() == 1
    }

    /// Number of entries, at least one.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entry with `id`, if it is still on this stack.
    pub fn get(&self, id: EntryId) -> Option<&BackStackEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Entries from root to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &BackStackEntry> {
        self.entries.iter()
    }
}
