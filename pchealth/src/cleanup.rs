//! Cache cleanup controller: idle → cleaning → {result, idle}.

use tracing::{info, warn};

use crate::api::{ApiError, CleanupResponse};
use crate::format::format_byte_size;
use crate::render::{ElementId, RenderTarget, Tone};

pub const SERVER_ERROR_FALLBACK: &str = "An error occurred during cleanup";
pub const CONNECT_ERROR_FALLBACK: &str = "Failed to connect to server";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CleanupState {
    #[default]
    Idle,
    Cleaning,
    Done(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub success: bool,
}

#[derive(Debug, Default)]
pub struct CleanupController {
    state: CleanupState,
}

impl CleanupController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CleanupState {
        &self.state
    }

    /// Enters `Cleaning`. Returns false (and changes nothing) when a request is already
    /// outstanding; the caller issues the request only on true.
    pub fn begin<T: RenderTarget + ?Sized>(&mut self, target: &mut T) -> bool {
        if self.state == CleanupState::Cleaning {
            return false;
        }
        self.state = CleanupState::Cleaning;
        self.sync(target);
        true
    }

    pub fn finish<T: RenderTarget + ?Sized>(
        &mut self,
        outcome: Result<CleanupResponse, ApiError>,
        target: &mut T,
    ) -> Notification {
        let note = match outcome {
            Ok(resp) if resp.is_success() => {
                let message = resp.message.clone().unwrap_or_default();
                info!("cache cleanup succeeded: {message}");
                target.set_text(ElementId::CleanupResultMessage, &result_text(&resp));
                self.state = CleanupState::Done(message.clone());
                Notification {
                    title: "Cleanup Complete".into(),
                    message,
                    success: true,
                }
            }
            Ok(resp) => {
                warn!("cache cleanup rejected: {:?}", resp.message);
                self.state = CleanupState::Idle;
                Notification {
                    title: "Cleanup Failed".into(),
                    message: resp
                        .message
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| SERVER_ERROR_FALLBACK.into()),
                    success: false,
                }
            }
            Err(e) => {
                warn!("cache cleanup request failed: {e}");
                self.state = CleanupState::Idle;
                Notification {
                    title: "Cleanup Failed".into(),
                    message: CONNECT_ERROR_FALLBACK.into(),
                    success: false,
                }
            }
        };
        self.sync(target);
        notify(target, &note);
        note
    }

    /// Result panel back to the info view. No request is made.
    pub fn back<T: RenderTarget + ?Sized>(&mut self, target: &mut T) {
        if matches!(self.state, CleanupState::Done(_)) {
            self.state = CleanupState::Idle;
            self.sync(target);
        }
    }

    /// Pushes the view visibility for the current state into `target`.
    pub fn sync<T: RenderTarget + ?Sized>(&self, target: &mut T) {
        let (info, cleaning, result) = match self.state {
            CleanupState::Idle => (true, false, false),
            CleanupState::Cleaning => (false, true, false),
            CleanupState::Done(_) => (false, false, true),
        };
        target.set_visible(ElementId::CacheInfoView, info);
        target.set_visible(ElementId::CleaningView, cleaning);
        target.set_visible(ElementId::CleanupResultView, result);
        if cleaning {
            target.set_text(ElementId::CleanButton, "Cleaning...");
            target.set_tone(ElementId::CleanButton, Some(Tone::Muted));
        } else {
            target.set_text(ElementId::CleanButton, "[c] Clean cache");
            target.set_tone(ElementId::CleanButton, None);
        }
    }
}

fn result_text(resp: &CleanupResponse) -> String {
    let message = resp.message.clone().unwrap_or_default();
    match (resp.space_freed, resp.files_removed) {
        (Some(bytes), Some(files)) => format!(
            "{message}\nFreed {} across {} files",
            format_byte_size(bytes.max(0) as u64),
            files.max(0)
        ),
        _ => message,
    }
}

pub fn notify<T: RenderTarget + ?Sized>(target: &mut T, note: &Notification) {
    target.set_text(ElementId::ToastTitle, &note.title);
    target.set_text(ElementId::ToastMessage, &note.message);
    target.set_tone(
        ElementId::Toast,
        Some(if note.success { Tone::Success } else { Tone::Danger }),
    );
    target.set_visible(ElementId::Toast, true);
}
