//! Contains panics raised while rendering a view.
//!
//! A fault replaces the view with a fallback until the user asks for a reset;
//! the next render after a reset either recovers or faults again.

use std::panic::{self, AssertUnwindSafe};

pub const FALLBACK_TEXT: &str =
    "Something went wrong while displaying this view. An unexpected error occurred, please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderState {
    Normal,
    Faulted { error: String },
    /// Reset requested; the next render retries the view.
    ResetPending,
}

#[derive(Debug)]
pub struct RenderSupervisor {
    state: RenderState,
    fallback: String,
}

impl Default for RenderSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSupervisor {
    pub fn new() -> Self {
        Self::with_fallback(FALLBACK_TEXT)
    }

    pub fn with_fallback(fallback: impl Into<String>) -> Self {
        Self {
            state: RenderState::Normal,
            fallback: fallback.into(),
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn is_faulted(&self) -> bool {
        matches!(self.state(), RenderState::Faulted { .. })
    }

    /// Runs `view` unless a fault is still standing, in which case the
    /// fallback is returned without calling it.
    pub fn render<F>(&mut self, view: F) -> String
    where
        F: FnOnce() -> String,
    {
        if self.is_faulted() {
            return self.fallback.clone();
        }

        match panic::catch_unwind(AssertUnwindSafe(view)) {
            Ok(output) => {
                self.state = RenderState::Normal;
                output
            }
            Err(payload) => {
                let error = panic_message(payload.as_ref());
                tracing::error!(error = %error, "View failed to render");
                self.state = RenderState::Faulted { error };
                self.fallback.clone()
            }
        }
    }

    /// Clears a fault so the next render tries the view again.
    pub fn reset(&mut self) {
        if self.is_faulted() {
            self.state = RenderState::ResetPending;
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown error".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_render_passes_through() {
        let mut supervisor = RenderSupervisor::new();
        assert_eq!(supervisor.render(|| "view".to_string()), "view");
        assert_eq!(supervisor.state(), &RenderState::Normal);
    }

    #[test]
    fn test_panic_shows_fallback() {
        let mut supervisor = RenderSupervisor::with_fallback("oops");
        let output = supervisor.render(|| panic!("bad data"));
        assert_eq!(output, "oops");
        assert_eq!(
            supervisor.state(),
            &RenderState::Faulted {
                error: "bad data".to_string()
            }
        );
    }

    #[test]
    fn test_fault_sticks_until_reset() {
        let mut supervisor = RenderSupervisor::with_fallback("oops");
        supervisor.render(|| panic!("bad data"));

        let mut called = false;
        let output = supervisor.render(|| {
            called = true;
            "view".to_string()
        });
        assert_eq!(output, "oops");
        assert!(!called);

        supervisor.reset();
        assert_eq!(supervisor.state(), &RenderState::ResetPending);
        assert_eq!(supervisor.render(|| "view".to_string()), "view");
        assert_eq!(supervisor.state(), &RenderState::Normal);
    }

    #[test]
    fn test_reset_then_fault_again() {
        let mut supervisor = RenderSupervisor::new();
        supervisor.render(|| panic!("first"));
        supervisor.reset();
        supervisor.render(|| panic!("{}", "second"));
        assert_eq!(
            supervisor.state(),
            &RenderState::Faulted {
                error: "second".to_string()
            }
        );
    }

    #[test]
    fn test_reset_when_normal_is_noop() {
        let mut supervisor = RenderSupervisor::new();
        supervisor.reset();
        assert_eq!(supervisor.state(), &RenderState::Normal);
    }
}
