use std::time::Duration;

use log::{debug, error, info, warn};
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::model::{RecipeSummary, SearchResult};
use crate::render::{render_cards, Card};
use crate::view::{Ticket, TicketCounter};

/// Terms offered when a search comes back empty
pub const SUGGESTIONS: [&str; 5] = ["chicken", "pasta", "vegetarian", "dessert", "breakfast"];

pub const HEADING_FEATURED: &str = "Featured Recipes";
pub const HEADING_SURPRISES: &str = "Chef's Surprises";

const PLACEHOLDER_COUNT: usize = 6;
const PLACEHOLDER_STAGGER: Duration = Duration::from_millis(200);

/// A request the results area wants run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Search { query: String },
    Random { count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCommand {
    pub ticket: Ticket,
    pub request: Request,
}

/// Response to a [`SearchCommand`]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Search(SearchResult),
    Random(Vec<RecipeSummary>),
}

/// Shimmer block shown while a request is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingPlaceholder {
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchView {
    Idle,
    Loading {
        placeholders: Vec<LoadingPlaceholder>,
    },
    Results {
        cards: Vec<Card>,
    },
    /// Nothing matched; the suggestion button picks one of [`SUGGESTIONS`]
    Empty {
        query: String,
    },
    /// Request failed; `retry` re-issues the same kind of request
    Error {
        title: &'static str,
        hint: &'static str,
        retry: Request,
    },
}

fn placeholders() -> Vec<LoadingPlaceholder> {
    (0..PLACEHOLDER_COUNT)
        .map(|i| LoadingPlaceholder {
            delay: PLACEHOLDER_STAGGER * i as u32,
        })
        .collect()
}

/// Drives the results area: Idle, Loading, Results, Empty, Error
#[derive(Debug)]
pub struct SearchController {
    view: SearchView,
    heading: String,
    random_batch_size: usize,
    tickets: TicketCounter,
    in_flight: Option<Request>,
}

impl SearchController {
    pub fn new(random_batch_size: usize) -> Self {
        Self {
            view: SearchView::Idle,
            heading: HEADING_FEATURED.to_string(),
            random_batch_size,
            tickets: TicketCounter::default(),
            in_flight: None,
        }
    }

    pub fn view(&self) -> &SearchView {
        &self.view
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    /// Cards currently on screen, empty unless showing results
    pub fn cards(&self) -> &[Card] {
        match &self.view {
            SearchView::Results { cards } => cards,
            _ => &[],
        }
    }

    fn start(&mut self, request: Request) -> SearchCommand {
        let ticket = self.tickets.issue();
        debug!("Starting {:?} ({:?})", request, ticket);
        self.view = SearchView::Loading {
            placeholders: placeholders(),
        };
        self.in_flight = Some(request.clone());
        SearchCommand { ticket, request }
    }

    /// Search for `query`. A blank query issues nothing and leaves the view as it is.
    pub fn search(&mut self, query: &str) -> Option<SearchCommand> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(self.start(Request::Search {
            query: query.to_string(),
        }))
    }

    /// Primary button: search when there is input, otherwise reload random recipes
    pub fn submit(&mut self, input: &str) -> SearchCommand {
        match self.search(input) {
            Some(command) => command,
            None => {
                self.heading = HEADING_SURPRISES.to_string();
                self.load_random()
            }
        }
    }

    pub fn load_random(&mut self) -> SearchCommand {
        self.start(Request::Random {
            count: self.random_batch_size,
        })
    }

    /// Suggestion button on the empty view. Returns the chosen term so the
    /// search input can be filled with it.
    pub fn suggest<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<(String, SearchCommand)> {
        if !matches!(self.view, SearchView::Empty { .. }) {
            return None;
        }
        let term = SUGGESTIONS.choose(rng)?.to_string();
        let command = self.search(&term)?;
        Some((term, command))
    }

    /// Retry button on the error view
    pub fn retry(&mut self) -> Option<SearchCommand> {
        let SearchView::Error { retry, .. } = &self.view else {
            return None;
        };
        let request = retry.clone();
        Some(self.start(request))
    }

    /// Apply a response. Returns false when it was stale and ignored.
    pub fn complete<R: Rng + ?Sized>(&mut self, ticket: Ticket, outcome: Outcome, rng: &mut R) -> bool {
        if !self.tickets.is_current(ticket) {
            debug!("Dropping stale response for {:?}", ticket);
            return false;
        }
        let Some(request) = self.in_flight.take() else {
            debug!("No request in flight for {:?}", ticket);
            return false;
        };

        self.view = match (request, outcome) {
            (Request::Search { query }, Outcome::Search(SearchResult::Found(found))) => {
                info!("Found {} recipes for {:?}", found.len(), query);
                self.heading = format!("Results for \"{}\"", query);
                SearchView::Results {
                    cards: render_cards(&found, rng),
                }
            }
            (Request::Search { query }, Outcome::Search(SearchResult::Empty)) => {
                info!("No recipes found for {:?}", query);
                self.heading = format!("No recipes found for \"{}\"", query);
                SearchView::Empty { query }
            }
            (Request::Search { query }, Outcome::Search(SearchResult::Failed(reason))) => {
                error!("Error fetching recipes for {:?}: {}", query, reason);
                SearchView::Error {
                    title: "Something went wrong",
                    hint: "Please try again later",
                    retry: Request::Search { query },
                }
            }
            (request @ Request::Random { .. }, Outcome::Random(batch)) if batch.is_empty() => {
                error!("Error fetching random recipes: every slot failed");
                SearchView::Error {
                    title: "Couldn't fetch recipes",
                    hint: "Please check your connection and try again",
                    retry: request,
                }
            }
            (Request::Random { .. }, Outcome::Random(batch)) => SearchView::Results {
                cards: render_cards(&batch, rng),
            },
            (request, outcome) => {
                warn!("Response {:?} does not match request {:?}", outcome, request);
                self.in_flight = Some(request);
                return false;
            }
        };
        true
    }
}
