// Set-membership filtering over the categorical columns.

use std::collections::HashSet;

use serde::Serialize;

use crate::dataset::{distinct, Dataset, Player};

/// Accepted positions and teams. A player passes when both its position and
/// its team are accepted; an empty set accepts nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerFilter {
    pub positions: HashSet<String>,
    pub teams: HashSet<String>,
}

impl PlayerFilter {
    pub fn new<P, T>(positions: P, teams: T) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        PlayerFilter {
            positions: positions.into_iter().map(Into::into).collect(),
            teams: teams.into_iter().map(Into::into).collect(),
        }
    }

    /// Every position and team present in the dataset.
    pub fn all(dataset: &Dataset) -> Self {
        PlayerFilter::new(dataset.positions(), dataset.teams())
    }

    pub fn accepts(&self, player: &Player) -> bool {
        self.positions.contains(&player.position) && self.teams.contains(&player.team)
    }
}

/// A read-only, order-preserving subset of the player table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilteredView<'a> {
    players: Vec<&'a Player>,
}

impl<'a> FilteredView<'a> {
    pub fn players(&self) -> &[&'a Player] {
        &self.players
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Player> + '_ {
        self.players.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Distinct player names in view order (the options of the player picker).
    pub fn names(&self) -> Vec<&'a str> {
        distinct(self.iter().map(|p| p.name.as_str()))
    }

    /// First player in the view with the given name.
    pub fn find(&self, name: &str) -> Option<&'a Player> {
        self.iter().find(|p| p.name == name)
    }
}

/// Keep the players accepted by `filter`, preserving source order.
pub fn filter_players<'a>(players: &'a [Player], filter: &PlayerFilter) -> FilteredView<'a> {
    FilteredView {
        players: players.iter().filter(|p| filter.accepts(p)).collect(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
