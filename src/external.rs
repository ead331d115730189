//! Interfaces to external collaborators
//!
//! The physics logo generator, the notification surface and the asset
//! backends live outside this crate. Resolution only consumes their
//! outputs as opaque values, so they appear here as traits.

use tracing::{error, info};

/// Produces a capturable snapshot of rendered label text.
///
/// The output is an opaque data-URI string; the card stores it and later
/// re-injects it as a static image. `None` means nothing was rendered.
pub trait LogoGenerator {
    fn generate(&mut self, text: &str, font: &str) -> Option<String>;
}

/// A generator that always returns the same snapshot; stands in for the
/// physics renderer wherever one is not available.
#[derive(Debug, Clone, Default)]
pub struct StaticLogo {
    pub snapshot: Option<String>,
}

impl LogoGenerator for StaticLogo {
    fn generate(&mut self, _text: &str, _font: &str) -> Option<String> {
        self.snapshot.clone()
    }
}

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// Fire-and-forget notification surface; callers never block on dismissal
pub trait Notifier {
    fn notify(&self, kind: NoticeKind, message: &str);
}

/// Routes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Error => error!("{message}"),
            _ => info!("{message}"),
        }
    }
}
