//! Payment-award recomputation: the token payouts triggered by solves.
//!
//! Two independent rules, both of which may fire in the same invocation:
//! a milestone bonus every 10th cumulative solve, and a one-time bonus for
//! completing every clue in a category. Re-running the recomputation at the
//! same `total_solved` value must never pay twice; the milestone watermark
//! and the completed-category set make it idempotent.

use crate::{clues::Category, dao::models::GameStateEntity};

/// Number of cumulative solves between milestone payouts.
pub const MILESTONE_INTERVAL: u32 = 10;

/// What a recomputation pass changed, if anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwardOutcome {
    /// Tokens credited by this pass (0, 1, or 2).
    pub tokens_awarded: i64,
    /// Milestone index paid out, when the milestone rule fired.
    pub milestone: Option<u32>,
    /// Categories that completed (and paid out) during this pass.
    pub newly_completed: Vec<Category>,
}

impl AwardOutcome {
    /// Whether the pass changed the game state at all.
    pub fn fired(&self) -> bool {
        self.tokens_awarded > 0 || !self.newly_completed.is_empty()
    }
}

/// Recompute awards against the current counters, mutating `game` in place.
///
/// Callers that did not otherwise touch the game document can skip the
/// write-back when the returned outcome did not fire.
pub fn recompute(game: &mut GameStateEntity) -> AwardOutcome {
    let mut outcome = AwardOutcome::default();

    let milestone = game.total_solved / MILESTONE_INTERVAL;
    let paid_milestone = game.previous_milestone_solved / MILESTONE_INTERVAL;
    if milestone > paid_milestone {
        game.tokens += 1;
        game.previous_milestone_solved = game.total_solved;
        outcome.tokens_awarded += 1;
        outcome.milestone = Some(milestone);
    }

    for category in Category::ALL {
        let Some(stats) = game.category_stats.get(&category) else {
            continue;
        };
        if stats.total > 0
            && stats.solved == stats.total
            && !game.completed_categories.contains(&category)
        {
            game.tokens += 1;
            game.completed_categories.push(category);
            outcome.tokens_awarded += 1;
            outcome.newly_completed.push(category);
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use super::*;

    fn game_with(total_solved: u32) -> GameStateEntity {
        let now = SystemTime::now();
        let mut game = GameStateEntity::new("test".into(), now, now);
        game.total_solved = total_solved;
        game
    }

    #[test]
    fn no_award_below_first_milestone() {
        let mut game = game_with(9);
        let outcome = recompute(&mut game);
        assert!(!outcome.fired());
        assert_eq!(game.tokens, 0);
    }

    #[test]
    fn milestone_pays_one_token_at_ten() {
        let mut game = game_with(10);
        let outcome = recompute(&mut game);
        assert_eq!(outcome.tokens_awarded, 1);
        assert_eq!(outcome.milestone, Some(1));
        assert_eq!(game.tokens, 1);
        assert_eq!(game.previous_milestone_solved, 10);
    }

    #[test]
    fn repeated_recompute_at_same_total_pays_once() {
        let mut game = game_with(10);
        recompute(&mut game);
        let second = recompute(&mut game);
        assert!(!second.fired());
        assert_eq!(game.tokens, 1);
    }

    #[test]
    fn milestone_fires_again_at_next_threshold() {
        let mut game = game_with(10);
        recompute(&mut game);
        game.total_solved = 20;
        let outcome = recompute(&mut game);
        assert_eq!(outcome.milestone, Some(2));
        assert_eq!(game.tokens, 2);
    }

    #[test]
    fn skipped_milestones_pay_a_single_token() {
        // Watermark comparison is on the floor value, so jumping from 9 to
        // 21 solved between recomputations pays once, not twice.
        let mut game = game_with(9);
        recompute(&mut game);
        game.total_solved = 21;
        let outcome = recompute(&mut game);
        assert_eq!(outcome.tokens_awarded, 1);
        assert_eq!(game.previous_milestone_solved, 21);
    }

    #[test]
    fn category_completion_awards_exactly_once() {
        let mut game = game_with(4);
        let stats = game.category_stats.get_mut(&Category::Jira).unwrap();
        stats.solved = stats.total;

        let first = recompute(&mut game);
        assert_eq!(first.newly_completed, vec![Category::Jira]);
        assert_eq!(game.tokens, 1);
        assert_eq!(game.completed_categories, vec![Category::Jira]);

        let second = recompute(&mut game);
        assert!(!second.fired());
        assert_eq!(game.tokens, 1);
    }

    #[test]
    fn milestone_and_completion_can_both_fire() {
        let mut game = game_with(10);
        let stats = game.category_stats.get_mut(&Category::Jira).unwrap();
        stats.solved = stats.total;

        let outcome = recompute(&mut game);
        assert_eq!(outcome.tokens_awarded, 2);
        assert_eq!(outcome.milestone, Some(1));
        assert_eq!(outcome.newly_completed, vec![Category::Jira]);
        assert_eq!(game.tokens, 2);
    }

    #[test]
    fn empty_category_never_counts_as_complete() {
        let mut game = game_with(0);
        let stats = game.category_stats.get_mut(&Category::Misc).unwrap();
        stats.total = 0;
        stats.solved = 0;

        let outcome = recompute(&mut game);
        assert!(!outcome.fired());
        assert!(game.completed_categories.is_empty());
    }
}
