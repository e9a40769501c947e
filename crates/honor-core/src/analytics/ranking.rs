// Top-N ranking by Impacto_Total.

use std::cmp::Ordering;

use crate::dataset::Player;

/// Number of players shown in the dashboard's leaderboard.
pub const DEFAULT_TOP_N: usize = 10;

/// The `n` players with the highest Impacto_Total, best first.
///
/// The sort is stable, so ties keep their input order. Feeding the result
/// back in with the same or smaller `n` returns the same players.
pub fn top_by_impact<'a, I>(players: I, n: usize) -> Vec<&'a Player>
where
    I: IntoIterator<Item = &'a Player>,
{
    let mut ranked: Vec<&Player> = players.into_iter().collect();
    ranked.sort_by(|a, b| {
        b.total_impact
            .partial_cmp(&a.total_impact)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}
