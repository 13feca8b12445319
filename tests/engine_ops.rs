//! End-to-end tests for the three game operations, running against the
//! in-memory store with a provisioned 50-clue game.

use std::sync::Arc;

use escape_room_back::{
    clues::Category,
    config::{AppConfig, TokenPolicy},
    dao::game_store::memory::MemoryGameStore,
    dto::{
        admin::ProvisionGameRequest,
        game::{GuessRequest, PurchaseRequest},
    },
    error::ServiceError,
    services::{admin_service, game_service, public_service},
    state::{AppState, SharedState},
};

async fn provisioned_state_with(policy: TokenPolicy) -> SharedState {
    let state = AppState::new(AppConfig::with_token_policy(policy));
    state
        .set_game_store(Arc::new(MemoryGameStore::new()))
        .await;
    admin_service::provision_game(
        &state,
        ProvisionGameRequest {
            title: "Engineering Escape Room".into(),
            start_time: None,
            end_time: None,
        },
    )
    .await
    .expect("provisioning succeeds");
    state
}

async fn provisioned_state() -> SharedState {
    provisioned_state_with(TokenPolicy::default()).await
}

fn guess(clue_id: u8, text: &str, player: &str) -> GuessRequest {
    GuessRequest {
        clue_id,
        guess: text.into(),
        player_name: player.into(),
    }
}

fn purchase(clue_id: u8, player: &str) -> PurchaseRequest {
    PurchaseRequest {
        clue_id,
        player_name: player.into(),
    }
}

async fn tokens(state: &SharedState) -> i64 {
    public_service::game_snapshot(state).await.unwrap().tokens
}

#[tokio::test]
async fn unknown_clue_id_fails_not_found_on_every_operation() {
    let state = provisioned_state().await;

    for clue_id in [0u8, 51, 200] {
        let err = game_service::submit_guess(&state, guess(clue_id, "anything", "alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)), "guess {clue_id}");

        let err = game_service::use_hint(&state, purchase(clue_id, "alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)), "hint {clue_id}");

        let err = game_service::reveal_solution(&state, purchase(clue_id, "alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)), "reveal {clue_id}");
    }
}

#[tokio::test]
async fn blank_fields_fail_before_any_storage_access() {
    // No store installed: reaching storage would surface a degraded error,
    // so getting InvalidArgument proves validation runs first.
    let state = AppState::new(AppConfig::default());

    let err = game_service::submit_guess(&state, guess(1, "   ", "alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    let err = game_service::submit_guess(&state, guess(1, "init", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    let err = game_service::use_hint(&state, purchase(1, " "))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    let err = game_service::reveal_solution(&state, purchase(1, ""))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    // Unknown clue ids are also rejected before storage is touched.
    let err = game_service::use_hint(&state, purchase(99, "alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn correct_guess_solves_and_bumps_counters() {
    let state = provisioned_state().await;

    // Clue 1 answer is "init", category misc; match is case-insensitive
    // and trimmed.
    let result = game_service::submit_guess(&state, guess(1, "  INIT ", "alice"))
        .await
        .unwrap();
    assert!(result.correct);
    assert_eq!(result.already_solved, None);

    let snapshot = public_service::game_snapshot(&state).await.unwrap();
    assert_eq!(snapshot.total_solved, 1);
    assert_eq!(snapshot.tokens, 0);
    let misc = snapshot
        .category_stats
        .iter()
        .find(|row| row.category == Category::Misc)
        .unwrap();
    assert_eq!(misc.solved, 1);

    let board = public_service::clue_board(&state).await.unwrap();
    let clue = board.clues.iter().find(|c| c.clue_id == 1).unwrap();
    assert!(clue.is_solved);
    assert_eq!(clue.answer.as_deref(), Some("init"));
    assert_eq!(clue.solved_by.as_deref(), Some("alice"));
    assert!(clue.solved_at.is_some());
}

#[tokio::test]
async fn case_variants_all_evaluate_correct() {
    for variant in ["Clown", "clown ", "CLOWN"] {
        let state = provisioned_state().await;
        let result = game_service::submit_guess(&state, guess(2, variant, "bob"))
            .await
            .unwrap();
        assert!(result.correct, "variant {variant:?}");
    }
}

#[tokio::test]
async fn wrong_guess_debits_one_token_without_floor() {
    let state = provisioned_state().await;

    let result = game_service::submit_guess(&state, guess(1, "nope", "alice"))
        .await
        .unwrap();
    assert!(!result.correct);
    assert_eq!(tokens(&state).await, -1);

    game_service::submit_guess(&state, guess(1, "still nope", "alice"))
        .await
        .unwrap();
    assert_eq!(tokens(&state).await, -2);
}

#[tokio::test]
async fn wrong_guess_penalty_can_be_disabled() {
    let state = provisioned_state_with(TokenPolicy {
        enforce_min_balance: false,
        wrong_guess_penalty: 0,
    })
    .await;

    game_service::submit_guess(&state, guess(1, "nope", "alice"))
        .await
        .unwrap();
    assert_eq!(tokens(&state).await, 0);
}

#[tokio::test]
async fn guess_on_solved_clue_is_logged_but_mutates_nothing() {
    let state = provisioned_state().await;

    game_service::submit_guess(&state, guess(1, "init", "alice"))
        .await
        .unwrap();
    let before = public_service::game_snapshot(&state).await.unwrap();

    // Even the canonical answer counts as a false entry once solved.
    let result = game_service::submit_guess(&state, guess(1, "init", "bob"))
        .await
        .unwrap();
    assert!(!result.correct);
    assert_eq!(result.already_solved, Some(true));

    let after = public_service::game_snapshot(&state).await.unwrap();
    assert_eq!(after.total_solved, before.total_solved);
    assert_eq!(after.tokens, before.tokens);

    let feed = public_service::recent_feed(&state).await.unwrap();
    assert_eq!(feed.guesses.len(), 2);
    assert_eq!(feed.guesses[0].player_name, "bob");
    assert!(!feed.guesses[0].correct);
}

#[tokio::test]
async fn hint_purchase_is_idempotent_and_has_no_floor() {
    let state = provisioned_state().await;

    let first = game_service::use_hint(&state, purchase(3, "alice"))
        .await
        .unwrap();
    assert!(first.success);
    assert_eq!(first.already_unlocked, None);

    let snapshot = public_service::game_snapshot(&state).await.unwrap();
    assert_eq!(snapshot.tokens, -1);
    assert_eq!(snapshot.tokens_spent, 1);

    let board = public_service::clue_board(&state).await.unwrap();
    let clue = board.clues.iter().find(|c| c.clue_id == 3).unwrap();
    assert!(clue.hint_unlocked);
    assert_eq!(clue.hint.as_deref(), Some("Hint for clue 3"));

    let second = game_service::use_hint(&state, purchase(3, "bob"))
        .await
        .unwrap();
    assert!(second.success);
    assert_eq!(second.already_unlocked, Some(true));

    // No extra debit on the repeat call.
    let snapshot = public_service::game_snapshot(&state).await.unwrap();
    assert_eq!(snapshot.tokens, -1);
    assert_eq!(snapshot.tokens_spent, 1);
}

#[tokio::test]
async fn reveal_solves_at_zero_balance_and_forces_hint_unlocked() {
    let state = provisioned_state().await;

    let result = game_service::reveal_solution(&state, purchase(4, "carol"))
        .await
        .unwrap();
    assert!(result.success);
    assert_eq!(result.already_solved, None);

    let snapshot = public_service::game_snapshot(&state).await.unwrap();
    assert_eq!(snapshot.tokens, -3);
    assert_eq!(snapshot.tokens_spent, 3);
    assert_eq!(snapshot.total_solved, 1);

    let board = public_service::clue_board(&state).await.unwrap();
    let clue = board.clues.iter().find(|c| c.clue_id == 4).unwrap();
    assert!(clue.is_solved);
    assert!(clue.hint_unlocked);
    assert_eq!(clue.answer.as_deref(), Some("new"));
    assert_eq!(clue.solved_by.as_deref(), Some("carol"));
}

#[tokio::test]
async fn reveal_on_solved_clue_is_a_detectable_no_op() {
    let state = provisioned_state().await;

    game_service::reveal_solution(&state, purchase(4, "carol"))
        .await
        .unwrap();
    let before = public_service::game_snapshot(&state).await.unwrap();

    let second = game_service::reveal_solution(&state, purchase(4, "dave"))
        .await
        .unwrap();
    assert!(second.success);
    assert_eq!(second.already_solved, Some(true));

    let after = public_service::game_snapshot(&state).await.unwrap();
    assert_eq!(after.tokens, before.tokens);
    assert_eq!(after.tokens_spent, before.tokens_spent);
    assert_eq!(after.total_solved, before.total_solved);

    let board = public_service::clue_board(&state).await.unwrap();
    let clue = board.clues.iter().find(|c| c.clue_id == 4).unwrap();
    assert_eq!(clue.solved_by.as_deref(), Some("carol"));
}

#[tokio::test]
async fn min_balance_policy_blocks_purchases_at_zero() {
    let state = provisioned_state_with(TokenPolicy {
        enforce_min_balance: true,
        wrong_guess_penalty: 1,
    })
    .await;

    let err = game_service::use_hint(&state, purchase(3, "alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InsufficientTokens { .. }));

    let err = game_service::reveal_solution(&state, purchase(4, "alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InsufficientTokens { .. }));

    // Nothing was mutated by the rejected purchases.
    let snapshot = public_service::game_snapshot(&state).await.unwrap();
    assert_eq!(snapshot.tokens, 0);
    assert_eq!(snapshot.tokens_spent, 0);
    let board = public_service::clue_board(&state).await.unwrap();
    assert!(!board.clues.iter().any(|c| c.hint_unlocked || c.is_solved));
}

#[tokio::test]
async fn tenth_solve_awards_exactly_one_milestone_token() {
    let state = provisioned_state().await;

    // Ten misc clues out of thirteen: no category completes along the way.
    let misc: [(u8, &str); 10] = [
        (1, "init"),
        (4, "new"),
        (9, "crop"),
        (17, "catch"),
        (25, "sport"),
        (41, "crawl"),
        (42, "toad"),
        (44, "let"),
        (46, "steak"),
        (47, "true"),
    ];

    for (clue_id, answer) in misc.iter().take(9) {
        let result = game_service::submit_guess(&state, guess(*clue_id, answer, "alice"))
            .await
            .unwrap();
        assert!(result.correct);
    }
    assert_eq!(tokens(&state).await, 0);

    let (clue_id, answer) = misc[9];
    game_service::submit_guess(&state, guess(clue_id, answer, "alice"))
        .await
        .unwrap();
    assert_eq!(tokens(&state).await, 1);

    let snapshot = public_service::game_snapshot(&state).await.unwrap();
    assert_eq!(snapshot.total_solved, 10);
    assert!(snapshot.completed_categories.is_empty());
}

#[tokio::test]
async fn completing_a_category_awards_once() {
    let state = provisioned_state().await;

    // Jira is the smallest category: clues 37-40.
    let jira: [(u8, &str); 4] = [
        (37, "submit"),
        (38, "update"),
        (39, "bottom"),
        (40, "emit"),
    ];
    for (clue_id, answer) in jira {
        game_service::submit_guess(&state, guess(clue_id, answer, "team"))
            .await
            .unwrap();
    }

    let snapshot = public_service::game_snapshot(&state).await.unwrap();
    assert_eq!(snapshot.tokens, 1);
    assert_eq!(snapshot.completed_categories, vec![Category::Jira]);

    // Further solves re-run the recomputation but never re-award.
    game_service::submit_guess(&state, guess(1, "init", "team"))
        .await
        .unwrap();
    let snapshot = public_service::game_snapshot(&state).await.unwrap();
    assert_eq!(snapshot.tokens, 1);
    assert_eq!(snapshot.completed_categories, vec![Category::Jira]);
}

#[tokio::test]
async fn feed_is_newest_first_and_capped_at_25() {
    let state = provisioned_state_with(TokenPolicy {
        enforce_min_balance: false,
        wrong_guess_penalty: 0,
    })
    .await;

    for index in 0..30 {
        game_service::submit_guess(&state, guess(5, &format!("attempt-{index}"), "alice"))
            .await
            .unwrap();
    }

    let feed = public_service::recent_feed(&state).await.unwrap();
    assert_eq!(feed.guesses.len(), 25);
    assert_eq!(feed.guesses[0].guess, "attempt-29");
    assert_eq!(feed.guesses[24].guess, "attempt-5");
}

#[tokio::test]
async fn category_counters_never_exceed_totals() {
    let state = provisioned_state().await;

    let jira: [(u8, &str); 4] = [
        (37, "submit"),
        (38, "update"),
        (39, "bottom"),
        (40, "emit"),
    ];
    for (clue_id, answer) in jira {
        game_service::submit_guess(&state, guess(clue_id, answer, "team"))
            .await
            .unwrap();
    }

    let snapshot = public_service::game_snapshot(&state).await.unwrap();
    for row in snapshot.category_stats {
        assert!(row.solved <= row.total, "{:?}", row.category);
    }
}

#[tokio::test]
async fn reprovisioning_resets_the_aggregate() {
    let state = provisioned_state().await;

    game_service::submit_guess(&state, guess(1, "init", "alice"))
        .await
        .unwrap();
    game_service::use_hint(&state, purchase(3, "alice"))
        .await
        .unwrap();

    admin_service::provision_game(
        &state,
        ProvisionGameRequest {
            title: "Round Two".into(),
            start_time: None,
            end_time: None,
        },
    )
    .await
    .unwrap();

    let snapshot = public_service::game_snapshot(&state).await.unwrap();
    assert_eq!(snapshot.title, "Round Two");
    assert_eq!(snapshot.total_solved, 0);
    assert_eq!(snapshot.tokens, 0);

    let board = public_service::clue_board(&state).await.unwrap();
    assert_eq!(board.clues.len(), 50);
    assert!(!board.clues.iter().any(|c| c.is_solved || c.hint_unlocked));
}

#[tokio::test]
async fn concurrent_solves_lose_no_updates() {
    let state = provisioned_state().await;

    // Ten concurrent correct guesses on distinct clues: the aggregate gate
    // serializes the read-modify-write windows, so every increment lands.
    let jobs: [(u8, &str); 10] = [
        (37, "submit"),
        (38, "update"),
        (39, "bottom"),
        (40, "emit"),
        (1, "init"),
        (4, "new"),
        (9, "crop"),
        (17, "catch"),
        (25, "sport"),
        (41, "crawl"),
    ];

    let mut handles = Vec::new();
    for (clue_id, answer) in jobs {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            game_service::submit_guess(&state, guess(clue_id, answer, "racer"))
                .await
                .unwrap()
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().correct);
    }

    let snapshot = public_service::game_snapshot(&state).await.unwrap();
    assert_eq!(snapshot.total_solved, 10);
    // Milestone at ten solves plus the jira completion bonus.
    assert_eq!(snapshot.tokens, 2);
    assert_eq!(snapshot.completed_categories, vec![Category::Jira]);
}

#[tokio::test]
async fn clue_board_withholds_answers_and_hints_until_earned() {
    let state = provisioned_state().await;

    let board = public_service::clue_board(&state).await.unwrap();
    assert!(
        board
            .clues
            .iter()
            .all(|c| c.answer.is_none() && c.hint.is_none())
    );

    game_service::use_hint(&state, purchase(7, "alice"))
        .await
        .unwrap();
    game_service::submit_guess(&state, guess(7, "duck", "alice"))
        .await
        .unwrap();

    let board = public_service::clue_board(&state).await.unwrap();
    let clue = board.clues.iter().find(|c| c.clue_id == 7).unwrap();
    assert_eq!(clue.answer.as_deref(), Some("duck"));
    assert_eq!(clue.hint.as_deref(), Some("Hint for clue 7"));
}
