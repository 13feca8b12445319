//! Game-state transition rules shared by the three mutation operations.
//!
//! Everything in this module is pure over [`GameStateEntity`]; the service
//! layer owns storage I/O and runs these rules inside the per-game gate.

pub mod awards;

use tracing::warn;

use crate::{
    clues::ClueDef,
    dao::models::GameStateEntity,
};

/// Tokens debited when a hint is purchased.
pub const HINT_TOKEN_COST: i64 = 1;
/// Tokens debited when a solution is revealed.
pub const REVEAL_TOKEN_COST: i64 = 3;

/// Apply a solve transition to the game counters and recompute awards.
///
/// The category incremented is always the one from the static catalog
/// definition, never the persisted record's mirror.
pub fn apply_solve(game: &mut GameStateEntity, def: &ClueDef) -> awards::AwardOutcome {
    game.total_solved += 1;

    match game.category_stats.get_mut(&def.category) {
        Some(stats) if stats.solved < stats.total => stats.solved += 1,
        Some(stats) => warn!(
            clue_id = def.id,
            category = def.category.as_str(),
            solved = stats.solved,
            total = stats.total,
            "category counter already saturated; skipping increment"
        ),
        None => warn!(
            clue_id = def.id,
            category = def.category.as_str(),
            "category missing from game stats; skipping increment"
        ),
    }

    awards::recompute(game)
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use super::*;
    use crate::clues;

    fn fresh_game() -> GameStateEntity {
        let now = SystemTime::now();
        GameStateEntity::new("test".into(), now, now)
    }

    #[test]
    fn solve_bumps_total_and_static_category() {
        let mut game = fresh_game();
        let def = clues::lookup(2).unwrap(); // category app

        apply_solve(&mut game, def);

        assert_eq!(game.total_solved, 1);
        assert_eq!(game.category_stats[&def.category].solved, 1);
    }

    #[test]
    fn category_counter_never_exceeds_total() {
        let mut game = fresh_game();
        let def = clues::lookup(37).unwrap(); // jira, total 4

        for _ in 0..6 {
            apply_solve(&mut game, def);
        }

        let stats = game.category_stats[&def.category];
        assert_eq!(stats.solved, stats.total);
    }
}
