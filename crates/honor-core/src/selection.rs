// Player selection for radar comparisons.
//
// The picker accepts at most `MAX_SELECTION` players. Anything past the cap,
// repeated names and names that are not in the current view are dropped here,
// at the boundary, so the chart builders only ever see a valid selection.

use tracing::warn;

use crate::analytics::filter::FilteredView;
use crate::dataset::Player;

/// Maximum number of players compared on one radar chart.
pub const MAX_SELECTION: usize = 5;

/// Why a requested name did not make it into the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoredReason {
    /// The cap was already reached.
    OverCap,
    /// The name was already selected.
    Duplicate,
    /// No player with that name in the filtered view.
    NotInView,
}

#[derive(Debug, Clone)]
pub struct Selection<'a> {
    players: Vec<&'a Player>,
    comparison_position: Option<&'a str>,
    ignored: Vec<(String, IgnoredReason)>,
}

impl<'a> Selection<'a> {
    /// Resolve picker names against the filtered view, in the order given.
    pub fn resolve<S: AsRef<str>>(names: &[S], view: &FilteredView<'a>) -> Self {
        let mut players: Vec<&'a Player> = Vec::new();
        let mut ignored = Vec::new();

        for name in names {
            let name: &str = name.as_ref();
            let reason = if players.iter().any(|p| p.name == name) {
                IgnoredReason::Duplicate
            } else if players.len() >= MAX_SELECTION {
                IgnoredReason::OverCap
            } else if let Some(player) = view.find(name) {
                players.push(player);
                continue;
            } else {
                IgnoredReason::NotInView
            };
            warn!("ignoring selected player '{}': {:?}", name, reason);
            ignored.push((name.to_string(), reason));
        }

        // The comparison baseline follows the selected player that comes
        // first in the view, not the first one picked.
        let comparison_position = view
            .iter()
            .find(|v| players.iter().any(|p| std::ptr::eq(*p, *v)))
            .map(|p| p.position.as_str());

        Selection {
            players,
            comparison_position,
            ignored,
        }
    }

    /// Selected players in picker order.
    pub fn players(&self) -> &[&'a Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Position whose mean is drawn next to the selection. `None` when
    /// nothing is selected.
    pub fn comparison_position(&self) -> Option<&'a str> {
        self.comparison_position
    }

    pub fn ignored(&self) -> &[(String, IgnoredReason)] {
        &self.ignored
    }
}
