use std::io::Write;

use clap::{Parser, Subcommand};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use recipe_finder::render::{Card, DetailAction};
use recipe_finder::view::{DetailPane, OverlayState, SearchView};
use recipe_finder::{
    App, Completion, FinderError, MealDbClient, MealDbClientBuilder, Settings, UiEvent,
};

/// Ingredient tags offered in the browse session
const TAGS: [&str; 8] = [
    "chicken", "beef", "pasta", "rice", "eggs", "salmon", "potato", "tomato",
];

#[derive(Parser)]
#[command(name = "recipe-finder", version, about = "Find recipes by ingredient or dish name")]
struct Cli {
    /// Seed for cosmetic fields (cook time, rating, nutrition)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search by ingredient, then by dish name
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Show a batch of random recipes
    Random {
        #[arg(short, long)]
        count: Option<usize>,
    },
    /// Show full details for a meal id
    Show { id: String },
    /// Interactive session (default)
    Browse,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let settings = Settings::load()?;
    debug!("Loaded settings: {:?}", settings);
    let client = MealDbClientBuilder::from_settings(&settings).build()?;

    let batch_size = match &cli.command {
        Some(Commands::Random { count: Some(count) }) => *count,
        _ => settings.random_batch_size,
    };
    let mut app = match cli.seed {
        Some(seed) => App::with_rng(client, batch_size, StdRng::seed_from_u64(seed)),
        None => App::new(client, batch_size),
    };

    match cli.command {
        Some(Commands::Search { query }) => {
            app.dispatch(UiEvent::EnterPressed(query.join(" "))).await;
            print_results(&app);
        }
        Some(Commands::Random { .. }) => {
            app.dispatch(UiEvent::PageLoaded).await;
            print_results(&app);
        }
        Some(Commands::Show { id }) => {
            app.dispatch(UiEvent::CardClicked(id)).await;
            print_overlay(&app);
        }
        Some(Commands::Browse) | None => browse(&mut app).await?,
    }

    Ok(())
}

enum Input {
    Event(UiEvent),
    Cook,
    Action(DetailAction),
    Help,
    Quit,
    Unknown(String),
}

fn parse_line(line: &str, cards: &[Card]) -> Input {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.strip_prefix('/') else {
        return Input::Event(UiEvent::EnterPressed(line.to_string()));
    };

    let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
    let rest = rest.trim();
    match name {
        "go" => Input::Event(UiEvent::SubmitClicked(rest.to_string())),
        "tag" if !rest.is_empty() => Input::Event(UiEvent::TagClicked(rest.to_string())),
        "suggest" => Input::Event(UiEvent::SuggestionClicked),
        "retry" => Input::Event(UiEvent::RetryClicked),
        "open" if !rest.is_empty() => {
            let id = match rest.parse::<usize>() {
                Ok(n) if (1..=cards.len()).contains(&n) => cards[n - 1].id.clone(),
                _ => rest.to_string(),
            };
            Input::Event(UiEvent::CardClicked(id))
        }
        "close" => Input::Event(UiEvent::CloseClicked),
        "esc" => Input::Event(UiEvent::EscapePressed),
        "swipe" => {
            let mut ys = rest.split_whitespace().map(str::parse::<f32>);
            match (ys.next(), ys.next()) {
                (Some(Ok(start_y)), Some(Ok(end_y))) => {
                    Input::Event(UiEvent::TouchSwipe { start_y, end_y })
                }
                _ => Input::Unknown(line.to_string()),
            }
        }
        "detail-retry" => Input::Event(UiEvent::DetailRetryClicked),
        "cook" => Input::Cook,
        "help" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => match DetailAction::parse(other) {
            Some(action) => Input::Action(action),
            None => Input::Unknown(line.to_string()),
        },
    }
}

fn is_overlay_event(event: &UiEvent) -> bool {
    matches!(
        event,
        UiEvent::CardClicked(_)
            | UiEvent::CloseClicked
            | UiEvent::EscapePressed
            | UiEvent::TouchSwipe { .. }
            | UiEvent::DetailRetryClicked
    )
}

fn prompt() -> std::io::Result<()> {
    print!("> ");
    std::io::stdout().flush()
}

/// Line-driven session. Requests run as tasks and report back over a
/// channel, so input keeps being read while they are in flight.
async fn browse(app: &mut App<MealDbClient>) -> Result<(), FinderError> {
    println!("Tags: {}", TAGS.join(", "));
    println!("Type an ingredient or dish and press Enter. /help lists commands.");

    let (completions, mut arrived) = mpsc::channel::<Completion>(16);
    if let Some(command) = app.handle(UiEvent::PageLoaded) {
        app.spawn(command, completions.clone());
    }
    print_results(app);
    prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                match parse_line(&line, app.results().cards()) {
                    Input::Event(event) => {
                        let overlay_event = is_overlay_event(&event);
                        if let Some(command) = app.handle(event) {
                            app.spawn(command, completions.clone());
                        }
                        if overlay_event {
                            print_overlay(app);
                        } else {
                            print_results(app);
                        }
                    }
                    Input::Cook => match app.overlay().start_cooking() {
                        Some(directions) => println!("{}", directions),
                        None => println!("Open a recipe first."),
                    },
                    Input::Action(action) => {
                        if app.overlay().is_open() {
                            println!("{}", action.feedback());
                        }
                    }
                    Input::Help => print_help(),
                    Input::Quit => break,
                    Input::Unknown(text) => println!("Unknown command: {}", text),
                }
                prompt()?;
            }
            Some(completion) = arrived.recv() => {
                let detail = matches!(completion, Completion::Detail { .. });
                if !app.apply(completion) {
                    debug!("Ignored a stale response");
                    continue;
                }
                if detail {
                    print_overlay(app);
                } else {
                    print_results(app);
                }
                prompt()?;
            }
        }
    }
    Ok(())
}

fn print_help() {
    println!("  <text>              search (Enter)");
    println!("  /go [text]          search button; empty reloads random recipes");
    println!("  /tag <name>         search an ingredient tag");
    println!("  /suggest            try a suggestion after an empty search");
    println!("  /retry              retry a failed load");
    println!("  /open <n|id>        open card n or a meal id");
    println!("  /close /esc         close the recipe");
    println!("  /swipe <y0> <y1>    touch swipe on the recipe");
    println!("  /detail-retry       retry a failed recipe load");
    println!("  /cook               jump to the directions");
    println!("  /share /save /print /comment");
    println!("  /quit");
}

fn print_results(app: &App<MealDbClient>) {
    let results = app.results();
    println!("\n== {} ==", results.heading());
    match results.view() {
        SearchView::Idle => {}
        SearchView::Loading { placeholders } => {
            println!("Loading {} recipes...", placeholders.len())
        }
        SearchView::Results { cards } => {
            for (n, card) in cards.iter().enumerate() {
                println!("{}. {}", n + 1, card);
            }
        }
        SearchView::Empty { .. } => {
            println!("No recipes found");
            println!("Try another ingredient or dish name, or /suggest");
        }
        SearchView::Error { title, hint, .. } => {
            println!("{}", title);
            println!("{} (/retry)", hint);
        }
    }
}

fn print_overlay(app: &App<MealDbClient>) {
    match app.overlay().state() {
        OverlayState::Closed => println!("(recipe closed)"),
        OverlayState::Open(DetailPane::Loading { id }) => {
            println!("Loading recipe details for {}...", id)
        }
        OverlayState::Open(DetailPane::Ready(view)) => println!("\n{}", view),
        OverlayState::Open(DetailPane::Failed { message, .. }) => {
            println!("Something went wrong");
            println!("{} (/detail-retry)", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_enter() {
        assert!(matches!(
            parse_line("chicken", &[]),
            Input::Event(UiEvent::EnterPressed(ref q)) if q == "chicken"
        ));
    }

    #[test]
    fn test_go_without_text_submits_empty() {
        assert!(matches!(
            parse_line("/go", &[]),
            Input::Event(UiEvent::SubmitClicked(ref q)) if q.is_empty()
        ));
    }

    #[test]
    fn test_swipe_parses_coordinates() {
        assert!(matches!(
            parse_line("/swipe 10 150", &[]),
            Input::Event(UiEvent::TouchSwipe { start_y, end_y }) if start_y == 10.0 && end_y == 150.0
        ));
        assert!(matches!(parse_line("/swipe 10", &[]), Input::Unknown(_)));
    }

    #[test]
    fn test_overlay_events() {
        assert!(is_overlay_event(&UiEvent::EscapePressed));
        assert!(is_overlay_event(&UiEvent::CardClicked("1".into())));
        assert!(!is_overlay_event(&UiEvent::RetryClicked));
    }

    #[test]
    fn test_actions_and_unknown() {
        assert!(matches!(parse_line("/print", &[]), Input::Action(DetailAction::Print)));
        assert!(matches!(parse_line("/dance", &[]), Input::Unknown(_)));
    }
}
