//! Aggregate metrics over the population state.
//!
//! All functions are pure reads of the current population. The two
//! zero-denominator policies are deliberately different:
//!
//! - [`percentage_meme`] is `0.0` when no node has been touched yet.
//! - [`bored_susceptible_ratio`] is `f64::INFINITY` when no node is
//!   susceptible any more.

use serde::{Deserialize, Serialize};

use crate::agent::{State, Track};
use crate::model::Population;

/// Number of nodes holding `state`
pub fn count(population: &Population, state: State) -> usize {
    population.iter().filter(|n| n.has(state)).count()
}

/// Number of nodes holding both `first` and `second`
pub fn count_both(population: &Population, first: State, second: State) -> usize {
    population
        .iter()
        .filter(|n| n.has(first) && n.has(second))
        .count()
}

/// Number of nodes holding at least one of `states`
pub fn count_any(population: &Population, states: &[State]) -> usize {
    population
        .iter()
        .filter(|n| n.state().contains_any(states))
        .count()
}

/// Nodes interested in or bored of either meme
pub fn touched(population: &Population) -> usize {
    population.iter().filter(|n| n.state().is_touched()).count()
}

/// Share of the population that has been touched by any meme
pub fn percentage_spread(population: &Population) -> f64 {
    if population.is_empty() {
        return 0.0;
    }
    touched(population) as f64 / population.len() as f64
}

/// Share of the touched population that is interested in or bored of `track`.
///
/// Defined as `0.0` while nothing has been touched.
pub fn percentage_meme(population: &Population, track: Track) -> f64 {
    let touched = touched(population);
    if touched == 0 {
        return 0.0;
    }
    count_any(population, &[track.bored(), track.interested()]) as f64 / touched as f64
}

/// Legacy diagnostic: nodes bored of any meme over susceptible nodes.
///
/// Defined as `f64::INFINITY` when no node is susceptible.
pub fn bored_susceptible_ratio(population: &Population) -> f64 {
    let susceptible = count(population, State::Susceptible);
    if susceptible == 0 {
        return f64::INFINITY;
    }
    count_any(population, &[State::BoredA, State::BoredB]) as f64 / susceptible as f64
}

/// Metrics recorded for one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub step: u64,
    pub susceptible: usize,
    pub interested_a: usize,
    pub interested_b: usize,
    pub interested_both: usize,
    pub bored_a: usize,
    pub bored_b: usize,
    pub bored_both: usize,
    pub touched: usize,
    pub percentage_spread: f64,
    pub percentage_meme_a: f64,
    pub percentage_meme_b: f64,
}

impl MetricsSnapshot {
    /// Collects every metric for the population at `step`
    pub fn collect(population: &Population, step: u64) -> Self {
        Self {
            step,
            susceptible: count(population, State::Susceptible),
            interested_a: count(population, State::InterestedA),
            interested_b: count(population, State::InterestedB),
            interested_both: count_both(population, State::InterestedA, State::InterestedB),
            bored_a: count(population, State::BoredA),
            bored_b: count(population, State::BoredB),
            bored_both: count_both(population, State::BoredA, State::BoredB),
            touched: touched(population),
            percentage_spread: percentage_spread(population),
            percentage_meme_a: percentage_meme(population, Track::A),
            percentage_meme_b: percentage_meme(population, Track::B),
        }
    }

    pub fn interested(&self, track: Track) -> usize {
        match track {
            Track::A => self.interested_a,
            Track::B => self.interested_b,
        }
    }

    /// Nodes still actively spreading either meme
    pub fn active(&self) -> usize {
        self.interested_a + self.interested_b
    }
}
