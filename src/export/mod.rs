//! Standalone HTML snapshots
//!
//! A saved card already carries everything its visual needs: the full
//! custom-property map and the captured per-field layout. The exporter
//! turns that into a single self-contained HTML document.

mod html;

pub use html::{render_card, render_card_with_config, HtmlConfig};
