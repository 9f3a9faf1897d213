//! Scripted swipe sessions.
//!
//! A simulated user swipes every presented dish at random (like, dislike
//! or skip) until the manager reports completion, then asks for results.

use anyhow::{bail, Result};
use catalog::{CuisineFilter, DishDetail};
use rand::rngs::StdRng;
use rand::Rng;
use scoring::ScoredDish;
use session::{SessionManager, SessionStep, SwipeBatch, UserId};

/// Stops a runaway loop if a policy never terminates
const MAX_ROUNDS: usize = 100;

/// Percentages for each swipe direction; the rest is skipped
#[derive(Debug, Clone, Copy)]
pub struct SwipeOdds {
    pub like: u32,
    pub dislike: u32,
}

impl Default for SwipeOdds {
    fn default() -> Self {
        Self {
            like: 30,
            dislike: 30,
        }
    }
}

impl SwipeOdds {
    fn swipe(&self, rng: &mut StdRng, dish: DishDetail, batch: &mut SwipeBatch) {
        let roll = rng.random_range(0..100);
        if roll < self.like {
            batch.liked.push(dish);
        } else if roll < self.like + self.dislike {
            batch.disliked.push(dish);
        } else {
            batch.skipped.push(dish);
        }
    }
}

/// Everything a finished simulated session produced
#[derive(Debug, Clone)]
pub struct SimulatedSession {
    pub rounds: usize,
    pub liked: Vec<DishDetail>,
    pub disliked: Vec<DishDetail>,
    pub skipped: Vec<DishDetail>,
    pub results: Vec<ScoredDish>,
}

impl SimulatedSession {
    pub fn swipe_count(&self) -> usize {
        self.liked.len() + self.disliked.len() + self.skipped.len()
    }
}

pub fn run_session(
    manager: &SessionManager,
    user: &UserId,
    cuisine: &CuisineFilter,
    odds: SwipeOdds,
    rng: &mut StdRng,
) -> Result<SimulatedSession> {
    let mut presented = manager.start_session(user, cuisine)?;
    let mut history = SwipeBatch::default();

    for round in 1..=MAX_ROUNDS {
        let mut batch = SwipeBatch::default();
        for dish in presented {
            odds.swipe(rng, dish, &mut batch);
        }
        history.liked.extend(batch.liked.iter().cloned());
        history.disliked.extend(batch.disliked.iter().cloned());
        history.skipped.extend(batch.skipped.iter().cloned());

        match manager.continue_session(user, batch)? {
            SessionStep::Batch(next) => presented = next,
            SessionStep::Complete { .. } => {
                let results = manager.session_results_scored(user)?;
                return Ok(SimulatedSession {
                    rounds: round,
                    liked: history.liked,
                    disliked: history.disliked,
                    skipped: history.skipped,
                    results,
                });
            }
        }
    }

    bail!("session for {user} did not complete after {MAX_ROUNDS} rounds")
}
