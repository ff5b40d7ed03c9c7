//! Terminal escape sequence handlers.
//!
//! Organized by category, each adding methods to the screen grid:
//! - cursor: Cursor movement, printing and DEC private modes
//! - scroll: Scroll region and scrolling operations
//! - editing: Erase, insert and delete operations
//! - style: SGR (Select Graphic Rendition) handling

mod cursor;
mod editing;
mod scroll;
mod style;
