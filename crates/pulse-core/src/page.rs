//! One page of a cursor-paginated feed.

use crate::types::Cursor;

/// A page of items plus the server's continuation state.
///
/// `next_cursor` is only meaningful while `has_next` is true; use
/// [`Page::continuation`] rather than reading it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// The items in this page, in server order.
    pub items: Vec<T>,
    /// Whether the server reports more pages after this one.
    pub has_next: bool,
    /// Cursor for the next page.
    pub next_cursor: Option<Cursor>,
}

/// What the paginator should do after consuming a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation<'a> {
    /// The feed is exhausted.
    Done,
    /// Fetch the next page after this cursor.
    After(&'a Cursor),
    /// The server claimed more pages but sent no cursor to reach them.
    MissingCursor,
}

impl<T> Page<T> {
    /// A final page.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            has_next: false,
            next_cursor: None,
        }
    }

    /// Decide how pagination continues after this page.
    pub fn continuation(&self) -> Continuation<'_> {
        match (self.has_next, self.next_cursor.as_ref()) {
            (false, _) => Continuation::Done,
            (true, Some(cursor)) => Continuation::After(cursor),
            (true, None) => Continuation::MissingCursor,
        }
    }
}
