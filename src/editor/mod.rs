//! Editor binding layer
//!
//! Presents the active template-or-grade tree as editable bindings and
//! writes user edits back into the configuration in place. Re-resolution
//! after an edit goes through a single-slot debounce cell; a small set of
//! live controls bypass it and write custom properties directly.

mod bindings;
mod debounce;
mod session;

pub use bindings::{
    live_write, read_style, update_layout, write_asset, write_style, BindingScope, EditError,
};
pub use debounce::Debouncer;
pub use session::{EditingRef, EditorSession};
