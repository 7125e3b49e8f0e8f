use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::{fetch_detail_by_id, fetch_random_batch, search_by_ingredient_or_name, RecipeSource};
use crate::error::FetchError;
use crate::model::RecipeDetail;
use crate::view::{
    CloseTrigger, DetailCommand, Outcome, OverlayController, Request, SearchCommand,
    SearchController, Ticket,
};

/// Everything the user can do on the page
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// First load: fetch the initial random batch
    PageLoaded,
    /// Enter key in the search bar
    EnterPressed(String),
    /// Primary search button; empty input reloads random recipes
    SubmitClicked(String),
    /// Ingredient tag: fills the search bar and searches
    TagClicked(String),
    /// Suggestion button on the empty-results view
    SuggestionClicked,
    /// Retry button on the results error view
    RetryClicked,
    /// Card click, carrying the meal id
    CardClicked(String),
    CloseClicked,
    EscapePressed,
    /// Touch gesture on the overlay, screen Y at start and end
    TouchSwipe { start_y: f32, end_y: f32 },
    /// Retry button inside the overlay
    DetailRetryClicked,
}

/// Work an event asks for
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(SearchCommand),
    Detail(DetailCommand),
}

/// Result of running a [`Command`], to be fed back through [`App::apply`]
#[derive(Debug)]
pub enum Completion {
    Search { ticket: Ticket, outcome: Outcome },
    Detail { ticket: Ticket, result: Result<RecipeDetail, FetchError> },
}

/// Page state plus the source it loads from
///
/// Requests run off to the side: [`App::execute`] returns a future that owns
/// its own handle on the source, so events keep flowing through
/// [`App::handle`] while it is pending.
pub struct App<S: RecipeSource> {
    source: Arc<S>,
    search_input: String,
    search: SearchController,
    overlay: OverlayController,
    rng: StdRng,
}

impl<S: RecipeSource + 'static> App<S> {
    pub fn new(source: S, random_batch_size: usize) -> Self {
        Self::with_rng(source, random_batch_size, StdRng::from_os_rng())
    }

    /// Use a fixed RNG so cosmetic card and detail fields are reproducible
    pub fn with_rng(source: S, random_batch_size: usize, rng: StdRng) -> Self {
        Self {
            source: Arc::new(source),
            search_input: String::new(),
            search: SearchController::new(random_batch_size),
            overlay: OverlayController::default(),
            rng,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn results(&self) -> &SearchController {
        &self.search
    }

    pub fn overlay(&self) -> &OverlayController {
        &self.overlay
    }

    /// Apply an event to the page state and return the request it needs, if any
    pub fn handle(&mut self, event: UiEvent) -> Option<Command> {
        debug!("Handling {:?}", event);
        match event {
            UiEvent::PageLoaded => Some(Command::Search(self.search.load_random())),
            UiEvent::EnterPressed(text) => {
                self.search_input = text;
                self.search.search(&self.search_input).map(Command::Search)
            }
            UiEvent::SubmitClicked(text) => {
                self.search_input = text;
                Some(Command::Search(self.search.submit(&self.search_input)))
            }
            UiEvent::TagClicked(tag) => {
                self.search_input = tag;
                self.search.search(&self.search_input).map(Command::Search)
            }
            UiEvent::SuggestionClicked => {
                let (term, command) = self.search.suggest(&mut self.rng)?;
                self.search_input = term;
                Some(Command::Search(command))
            }
            UiEvent::RetryClicked => self.search.retry().map(Command::Search),
            UiEvent::CardClicked(id) => Some(Command::Detail(self.overlay.open(id))),
            UiEvent::CloseClicked => {
                self.overlay.close(CloseTrigger::Button);
                None
            }
            UiEvent::EscapePressed => {
                self.overlay.escape();
                None
            }
            UiEvent::TouchSwipe { start_y, end_y } => {
                self.overlay.swipe(start_y, end_y);
                None
            }
            UiEvent::DetailRetryClicked => self.overlay.retry().map(Command::Detail),
        }
    }

    /// Run a command against the source. Does not touch page state.
    pub fn execute(&self, command: Command) -> BoxFuture<'static, Completion> {
        let source = Arc::clone(&self.source);
        async move {
            match command {
                Command::Search(SearchCommand { ticket, request }) => {
                    let outcome = match request {
                        Request::Search { query } => Outcome::Search(
                            search_by_ingredient_or_name(source.as_ref(), &query).await,
                        ),
                        Request::Random { count } => {
                            Outcome::Random(fetch_random_batch(source.as_ref(), count).await)
                        }
                    };
                    Completion::Search { ticket, outcome }
                }
                Command::Detail(DetailCommand { ticket, id }) => Completion::Detail {
                    ticket,
                    result: fetch_detail_by_id(source.as_ref(), &id).await,
                },
            }
        }
        .boxed()
    }

    /// Run a command on the tokio runtime and send its completion back
    pub fn spawn(&self, command: Command, completions: mpsc::Sender<Completion>) -> JoinHandle<()> {
        let request = self.execute(command);
        tokio::spawn(async move {
            if completions.send(request.await).await.is_err() {
                debug!("Completion dropped, receiver is gone");
            }
        })
    }

    /// Feed a completion back. Returns false if it was stale.
    pub fn apply(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::Search { ticket, outcome } => {
                self.search.complete(ticket, outcome, &mut self.rng)
            }
            Completion::Detail { ticket, result } => {
                self.overlay.complete(ticket, result, &mut self.rng)
            }
        }
    }

    /// Handle an event and wait for its request, for one-shot use
    pub async fn dispatch(&mut self, event: UiEvent) {
        if let Some(command) = self.handle(event) {
            let completion = self.execute(command).await;
            self.apply(completion);
        }
    }
}
