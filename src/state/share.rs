//! Spoiler-free result summary and the clipboard capability used to share it.
//!
//! Over HTTP the summary is returned as text and the client does the copy.
//! [`Clipboard`], [`FallbackClipboard`] and [`copy_share_summary`] are for hosts
//! that embed the library and own a clipboard themselves.

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    dao::models::ANSWER_COUNT,
    state::game::{GameSession, Rank, STARTING_LIVES},
};

/// Title line prefix of the share summary.
pub const SHARE_TITLE: &str = "Daily Top Ten";

const FOUND_GLYPH: &str = "✅";
const MISSING_GLYPH: &str = "⬜";

impl GameSession {
    /// Result block listing progress and a found/not-found grid. Answer text is
    /// never included.
    pub fn share_summary(&self) -> String {
        let mut text = format!(
            "{SHARE_TITLE} - {}\n\n\
             Found {}/{ANSWER_COUNT} answers\n\
             Guesses: {} | Lives used: {}/{STARTING_LIVES}\n\n",
            self.prompt().question,
            self.found_count(),
            self.guess_count(),
            self.lives_used()
        );

        for rank in 1..=ANSWER_COUNT as Rank {
            let glyph = if self.revealed().contains_key(&rank) {
                FOUND_GLYPH
            } else {
                MISSING_GLYPH
            };
            text.push_str(&format!("{rank}. {glyph}\n"));
        }

        if self.is_won() {
            text.push_str("\n🎉 Perfect!");
        } else if self.is_over() {
            text.push_str("\n💔 Game Over");
        }

        text
    }
}

/// Failure to place text on a clipboard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("clipboard unavailable: {reason}")]
pub struct ClipboardError {
    /// Human readable cause.
    pub reason: String,
}

impl ClipboardError {
    /// Build an error from any displayable cause.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Capability to write text to a clipboard.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Tries `primary` and falls back to `legacy` when it fails.
#[derive(Debug, Clone)]
pub struct FallbackClipboard<P, L> {
    primary: P,
    legacy: L,
}

impl<P, L> FallbackClipboard<P, L> {
    /// Compose a primary clipboard with a legacy fallback.
    pub fn new(primary: P, legacy: L) -> Self {
        Self { primary, legacy }
    }
}

impl<P: Clipboard, L: Clipboard> Clipboard for FallbackClipboard<P, L> {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        match self.primary.write_text(text) {
            Ok(()) => Ok(()),
            Err(err) => {
                debug!(error = %err, "primary clipboard failed; trying legacy copy");
                self.legacy.write_text(text)
            }
        }
    }
}

/// Copy the session's share summary, returning the copied text.
///
/// A failure is reported to the caller and never touches the session.
pub fn copy_share_summary(
    session: &GameSession,
    clipboard: &impl Clipboard,
) -> Result<String, ClipboardError> {
    let text = session.share_summary();
    clipboard
        .write_text(&text)
        .inspect_err(|err| warn!(error = %err, "failed to copy share summary"))?;
    Ok(text)
}
