use log::{debug, error};
use rand::Rng;

use crate::error::FetchError;
use crate::model::RecipeDetail;
use crate::render::{render_detail, DetailView};
use crate::view::{Ticket, TicketCounter};

/// Downward touch swipe, in pixels, that dismisses the overlay
pub const SWIPE_CLOSE_THRESHOLD: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    Button,
    Swipe,
    Escape,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailPane {
    Loading { id: String },
    Ready(DetailView),
    Failed { id: String, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayState {
    Closed,
    Open(DetailPane),
}

/// Request to load the record behind an opened card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailCommand {
    pub ticket: Ticket,
    pub id: String,
}

/// Open/closed state of the detail overlay and the page scroll lock
#[derive(Debug)]
pub struct OverlayController {
    state: OverlayState,
    scroll_locked: bool,
    tickets: TicketCounter,
}

impl Default for OverlayController {
    fn default() -> Self {
        Self {
            state: OverlayState::Closed,
            scroll_locked: false,
            tickets: TicketCounter::default(),
        }
    }
}

impl OverlayController {
    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, OverlayState::Open(_))
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    fn load(&mut self, id: String) -> DetailCommand {
        let ticket = self.tickets.issue();
        self.state = OverlayState::Open(DetailPane::Loading { id: id.clone() });
        self.scroll_locked = true;
        DetailCommand { ticket, id }
    }

    /// Card click: show the loading pane and lock page scroll
    pub fn open(&mut self, id: impl Into<String>) -> DetailCommand {
        self.load(id.into())
    }

    /// Returns false if the overlay was already closed
    pub fn close(&mut self, trigger: CloseTrigger) -> bool {
        if !self.is_open() {
            return false;
        }
        debug!("Closing overlay via {:?}", trigger);
        self.state = OverlayState::Closed;
        self.scroll_locked = false;
        self.tickets.invalidate();
        true
    }

    pub fn escape(&mut self) -> bool {
        self.close(CloseTrigger::Escape)
    }

    /// Touch gesture: closes only on a downward move beyond the threshold
    pub fn swipe(&mut self, start_y: f32, end_y: f32) -> bool {
        if end_y - start_y > SWIPE_CLOSE_THRESHOLD {
            self.close(CloseTrigger::Swipe)
        } else {
            false
        }
    }

    /// Retry button inside the overlay's error pane
    pub fn retry(&mut self) -> Option<DetailCommand> {
        let OverlayState::Open(DetailPane::Failed { id, .. }) = &self.state else {
            return None;
        };
        let id = id.clone();
        Some(self.load(id))
    }

    /// Apply a lookup response. Ignored once the overlay is closed or a
    /// newer lookup has started.
    pub fn complete<R: Rng + ?Sized>(
        &mut self,
        ticket: Ticket,
        result: Result<RecipeDetail, FetchError>,
        rng: &mut R,
    ) -> bool {
        if !self.tickets.is_current(ticket) {
            debug!("Dropping stale detail response for {:?}", ticket);
            return false;
        }
        let OverlayState::Open(DetailPane::Loading { id }) = &self.state else {
            return false;
        };

        let pane = match result {
            Ok(detail) => DetailPane::Ready(render_detail(&detail, rng)),
            Err(e) => {
                error!("Error fetching recipe details for {}: {}", id, e);
                DetailPane::Failed {
                    id: id.clone(),
                    message: "Could not load recipe details. Please try again.".to_string(),
                }
            }
        };
        self.state = OverlayState::Open(pane);
        true
    }

    /// "Start Cooking": the directions of the loaded recipe
    pub fn start_cooking(&self) -> Option<String> {
        match &self.state {
            OverlayState::Open(DetailPane::Ready(view)) => Some(view.directions()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn detail(id: &str) -> RecipeDetail {
        RecipeDetail {
            id: id.to_string(),
            title: "Kumpir".to_string(),
            thumbnail_url: String::new(),
            category: Some("Side".to_string()),
            region: Some("Turkish".to_string()),
            ingredients: vec![("2 large".to_string(), "Potatoes".to_string())],
            instructions: "Bake the potatoes. Fill them.".to_string(),
        }
    }

    #[test]
    fn test_open_locks_scroll_and_shows_loading() {
        let mut overlay = OverlayController::default();
        let command = overlay.open("52978");

        assert_eq!(command.id, "52978");
        assert!(overlay.scroll_locked());
        assert_eq!(
            overlay.state(),
            &OverlayState::Open(DetailPane::Loading { id: "52978".into() })
        );
    }

    #[test]
    fn test_close_while_loading_unlocks_and_ignores_late_response() {
        let mut overlay = OverlayController::default();
        let command = overlay.open("1");
        assert!(overlay.close(CloseTrigger::Button));
        assert!(!overlay.scroll_locked());

        let applied = overlay.complete(command.ticket, Ok(detail("1")), &mut StdRng::seed_from_u64(0));

        assert!(!applied);
        assert_eq!(overlay.state(), &OverlayState::Closed);
        assert!(!overlay.scroll_locked());
    }

    #[test]
    fn test_detail_ready() {
        let mut overlay = OverlayController::default();
        let command = overlay.open("1");
        assert!(overlay.complete(command.ticket, Ok(detail("1")), &mut StdRng::seed_from_u64(0)));

        match overlay.state() {
            OverlayState::Open(DetailPane::Ready(view)) => {
                assert_eq!(view.steps, vec!["Bake the potatoes.", "Fill them."]);
            }
            other => panic!("Expected ready pane, got {:?}", other),
        }
        assert!(overlay.start_cooking().unwrap().contains("1. Bake the potatoes."));
    }

    #[test]
    fn test_failure_then_local_retry() {
        let mut overlay = OverlayController::default();
        let command = overlay.open("9");
        overlay.complete(
            command.ticket,
            Err(FetchError::Status(500)),
            &mut StdRng::seed_from_u64(0),
        );
        assert!(matches!(overlay.state(), OverlayState::Open(DetailPane::Failed { .. })));
        assert!(overlay.scroll_locked());

        let retry = overlay.retry().unwrap();
        assert_eq!(retry.id, "9");
        assert_ne!(retry.ticket, command.ticket);
    }

    #[test]
    fn test_swipe_threshold() {
        let mut overlay = OverlayController::default();
        overlay.open("1");

        assert!(!overlay.swipe(200.0, 300.0));
        assert!(!overlay.swipe(300.0, 100.0));
        assert!(overlay.is_open());

        assert!(overlay.swipe(200.0, 300.5));
        assert!(!overlay.is_open());
        assert!(!overlay.scroll_locked());
    }

    #[test]
    fn test_escape_only_when_open() {
        let mut overlay = OverlayController::default();
        assert!(!overlay.escape());
        overlay.open("1");
        assert!(overlay.escape());
        assert!(!overlay.scroll_locked());
    }

    #[test]
    fn test_reopen_supersedes_previous_lookup() {
        let mut overlay = OverlayController::default();
        let first = overlay.open("1");
        let second = overlay.open("2");
        let mut rng = StdRng::seed_from_u64(0);

        assert!(!overlay.complete(first.ticket, Ok(detail("1")), &mut rng));
        assert!(overlay.complete(second.ticket, Ok(detail("2")), &mut rng));
        match overlay.state() {
            OverlayState::Open(DetailPane::Ready(view)) => assert_eq!(view.id, "2"),
            other => panic!("Expected ready pane, got {:?}", other),
        }
    }
}
