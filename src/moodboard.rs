//! The mood board view-model: the selected mood and the article list that
//! belongs to it.
//!
//! Selecting a mood hands back a [`FetchTicket`]; the caller runs the fetch
//! and feeds the [`FetchOutcome`] to [`MoodBoard::apply`].  Only the outcome
//! of the most recent ticket may replace the list, so a slow response for an
//! earlier selection can never overwrite a newer one.

use chrono::{DateTime, Local};

use crate::api::{Article, FetchOutcome, FetchTicket};
use crate::chart::Tally;
use crate::mood::Mood;

/// What [`MoodBoard::apply`] did with an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// The article list was replaced.
    Replaced { count: usize, skipped: usize },
    /// The fetch failed; the previous list is still shown.
    Failed(String),
    /// The outcome belonged to a superseded selection and was dropped.
    Stale,
}

#[derive(Debug)]
pub struct MoodBoard {
    selected_mood: Mood,
    articles: Vec<Article>,
    /// Generation of the most recently issued ticket.
    generation: u64,
    /// Set while the latest ticket has not been answered.
    in_flight: Option<FetchTicket>,
    last_error: Option<String>,
    last_skipped: usize,
    fetched_at: Option<DateTime<Local>>,
    tally: Tally,
}

impl MoodBoard {
    pub fn new(initial_mood: Mood) -> Self {
        Self {
            selected_mood: initial_mood,
            articles: Vec::new(),
            generation: 0,
            in_flight: None,
            last_error: None,
            last_skipped: 0,
            fetched_at: None,
            tally: Tally::default(),
        }
    }

    /// Select `mood` and return the ticket for the fetch it requires.
    ///
    /// Every call issues a new ticket, including re-selecting the current
    /// mood.  The current list stays in place until the fetch answers.
    pub fn select_mood(&mut self, mood: Mood) -> FetchTicket {
        self.selected_mood = mood;
        self.generation += 1;
        let ticket = FetchTicket {
            generation: self.generation,
            mood,
        };
        self.in_flight = Some(ticket);
        ticket
    }

    /// Re-issue the fetch for the current mood.
    pub fn refresh(&mut self) -> FetchTicket {
        self.select_mood(self.selected_mood)
    }

    /// Apply the outcome of a fetch.
    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        let FetchOutcome { ticket, result } = outcome;

        // An older selection may still be the newest answer for its mood.
        if let Ok(batch) = &result {
            self.tally
                .record(ticket.mood, ticket.generation, batch.articles.len());
        }

        if ticket.generation != self.generation {
            tracing::warn!(
                generation = ticket.generation,
                current = self.generation,
                mood = %ticket.mood,
                "dropping stale fetch result"
            );
            return Applied::Stale;
        }

        self.in_flight = None;

        match result {
            Ok(batch) => {
                let count = batch.articles.len();
                self.articles = batch.articles;
                self.last_skipped = batch.skipped;
                self.last_error = None;
                self.fetched_at = Some(Local::now());
                Applied::Replaced {
                    count,
                    skipped: batch.skipped,
                }
            }
            Err(e) => {
                let message = e.to_string();
                self.last_error = Some(message.clone());
                Applied::Failed(message)
            }
        }
    }

    pub fn selected_mood(&self) -> Mood {
        self.selected_mood
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Whether the latest selection is still waiting for its response.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Malformed entries dropped from the last applied response.
    pub fn last_skipped(&self) -> usize {
        self.last_skipped
    }

    pub fn fetched_at(&self) -> Option<DateTime<Local>> {
        self.fetched_at
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }
}
