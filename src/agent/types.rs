//! Node state tags and the per-node tag set.
//!
//! A node holds a set of tags; several may co-exist (a node can be
//! interested in both memes, or bored of one and interested in the other).
//! Only membership is meaningful, never order.

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};

/// A single state tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    /// Untouched by either meme on either track
    Susceptible,
    InterestedA,
    InterestedB,
    BoredA,
    BoredB,
    /// Predisposed towards meme A; assigned at creation, never removed
    InterestA,
    /// Predisposed towards meme B; assigned at creation, never removed
    InterestB,
    /// Assigned at creation, never removed
    Influencer,
}

impl State {
    /// All tags, in declaration order
    pub const ALL: [State; 8] = [
        State::Susceptible,
        State::InterestedA,
        State::InterestedB,
        State::BoredA,
        State::BoredB,
        State::InterestA,
        State::InterestB,
        State::Influencer,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Returns a string representation of the tag
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Susceptible => "SUSCEPTIBLE",
            State::InterestedA => "INTERESTED_A",
            State::InterestedB => "INTERESTED_B",
            State::BoredA => "BORED_A",
            State::BoredB => "BORED_B",
            State::InterestA => "INTEREST_A",
            State::InterestB => "INTEREST_B",
            State::Influencer => "INFLUENCER",
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two competing memes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Track {
    A,
    B,
}

impl Track {
    pub const BOTH: [Track; 2] = [Track::A, Track::B];

    pub fn interested(self) -> State {
        match self {
            Track::A => State::InterestedA,
            Track::B => State::InterestedB,
        }
    }

    pub fn bored(self) -> State {
        match self {
            Track::A => State::BoredA,
            Track::B => State::BoredB,
        }
    }

    pub fn interest(self) -> State {
        match self {
            Track::A => State::InterestA,
            Track::B => State::InterestB,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Track::A => 0,
            Track::B => 1,
        }
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Track::A => write!(f, "A"),
            Track::B => write!(f, "B"),
        }
    }
}

/// Fixed-size set of [`State`] tags backed by a bitmask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StateSet(u8);

impl StateSet {
    const TOUCHED: u8 = (1 << State::InterestedA as u8)
        | (1 << State::InterestedB as u8)
        | (1 << State::BoredA as u8)
        | (1 << State::BoredB as u8);

    pub fn new() -> Self {
        Self(0)
    }

    pub fn contains(&self, state: State) -> bool {
        self.0 & state.bit() != 0
    }

    /// Adds a tag; returns whether it was newly inserted
    pub fn insert(&mut self, state: State) -> bool {
        let fresh = !self.contains(state);
        self.0 |= state.bit();
        fresh
    }

    /// Removes a tag; returns whether it was present
    pub fn remove(&mut self, state: State) -> bool {
        let present = self.contains(state);
        self.0 &= !state.bit();
        present
    }

    pub fn contains_all(&self, states: &[State]) -> bool {
        states.iter().all(|&s| self.contains(s))
    }

    pub fn contains_any(&self, states: &[State]) -> bool {
        states.iter().any(|&s| self.contains(s))
    }

    /// Interested in or bored of at least one meme
    pub fn is_touched(&self) -> bool {
        self.0 & Self::TOUCHED != 0
    }

    /// Bored of at least one meme
    pub fn is_bored_any(&self) -> bool {
        self.contains(State::BoredA) || self.contains(State::BoredB)
    }

    /// Whether the susceptible tag agrees with the interested/bored tags
    pub fn is_consistent(&self) -> bool {
        self.contains(State::Susceptible) != self.is_touched()
    }

    pub fn iter(&self) -> impl Iterator<Item = State> + '_ {
        State::ALL.into_iter().filter(move |&s| self.contains(s))
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<State> for StateSet {
    fn from_iter<I: IntoIterator<Item = State>>(iter: I) -> Self {
        let mut set = StateSet::new();
        for state in iter {
            set.insert(state);
        }
        set
    }
}

impl std::fmt::Debug for StateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for StateSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for state in self.iter() {
            seq.serialize_element(&state)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove() {
        let mut set = StateSet::new();
        assert!(set.is_empty());
        assert!(set.insert(State::Susceptible));
        assert!(!set.insert(State::Susceptible));
        assert!(set.insert(State::InterestA));
        assert_eq!(set.len(), 2);
        assert!(set.remove(State::Susceptible));
        assert!(!set.remove(State::Susceptible));
        assert!(set.contains(State::InterestA));
        assert!(!set.contains(State::Susceptible));
    }

    #[test]
    fn test_touched_and_consistency() {
        let fresh: StateSet = [State::Susceptible, State::InterestB].into_iter().collect();
        assert!(!fresh.is_touched());
        assert!(fresh.is_consistent());

        let bored: StateSet = [State::BoredA, State::InterestedB].into_iter().collect();
        assert!(bored.is_touched());
        assert!(bored.is_bored_any());
        assert!(bored.is_consistent());

        let broken: StateSet = [State::Susceptible, State::InterestedA].into_iter().collect();
        assert!(!broken.is_consistent());

        let nothing: StateSet = [State::Influencer].into_iter().collect();
        assert!(!nothing.is_consistent());
    }

    #[test]
    fn test_track_tags() {
        assert_eq!(Track::A.interested(), State::InterestedA);
        assert_eq!(Track::B.bored(), State::BoredB);
        assert_eq!(Track::B.interest(), State::InterestB);
        assert_eq!(Track::A.to_string(), "A");
    }

    #[test]
    fn test_serializes_as_tag_names() {
        let set: StateSet = [State::Influencer, State::InterestedA].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["INTERESTED_A","INFLUENCER"]"#);
        assert_eq!(State::BoredB.to_string(), "BORED_B");
    }
}
