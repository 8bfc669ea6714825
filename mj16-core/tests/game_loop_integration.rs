//! Integration tests for the game_loop and simulator modules (public API).

use mj16_core::game_loop::{FirstChoiceInput, GameRunner, TokenInput};
use mj16_core::seeding::SessionRng;
use mj16_core::simulator::{BatchConfig, BatchSimulator, BatchSummary};
use mj16_engine::{EndType, GameEvent, GameRule, Prompt};

#[test]
fn game_runner_accessible_and_completes() {
    let mut runner = GameRunner::new(Some(42), GameRule::default_taiwan());
    runner.run_to_completion(&mut FirstChoiceInput);
    assert!(runner.is_done());
    let result = runner.result();
    assert!(result.end_type.is_some());
    assert_eq!(result.turns, runner.game().turn_count());
}

#[test]
fn skip_tokens_never_claim_for_the_interactive_seat() {
    let mut runner = GameRunner::new(Some(5), GameRule::default_taiwan());
    // Empty lines: discard index 0 after the list is drained, skip every claim.
    let mut input = TokenInput::default();
    let mut claimed_by_zero = false;
    while !runner.is_done() && runner.total_steps() < 10_000 {
        for event in runner.step_once(&mut input) {
            if let GameEvent::Claimed { seat: 0, .. } = event {
                claimed_by_zero = true;
            }
        }
    }
    assert!(!claimed_by_zero);
    assert!(runner.game().hand(0).melds().is_empty());
}

#[test]
fn runner_answers_every_prompt_kind() {
    let mut session = SessionRng::new([7u8; 32]);
    let rule = GameRule {
        interactive_seats: [true; 4],
        ..GameRule::default_taiwan()
    };
    for _ in 0..10 {
        let mut runner = GameRunner::new_with_session(&mut session, rule);
        while !runner.is_done() && runner.total_steps() < 10_000 {
            runner.step_once(&mut FirstChoiceInput);
            if let Some(Prompt::Discard { seat }) = runner.game().pending() {
                assert_eq!(*seat, runner.game().active_seat());
            }
        }
        assert_eq!(runner.rejected(), 0);
        runner.game().check_conservation().unwrap();
    }
}

#[test]
fn batch_summary_accounts_for_every_game() {
    let config = BatchConfig {
        num_games: 12,
        base_seed: Some(2024),
        num_threads: Some(2),
        ..Default::default()
    };
    let sim = BatchSimulator::for_config(&config).unwrap();
    let results = sim.run_batch(&config);
    let summary = BatchSummary::from_results(&results);
    let wins: usize = summary.wins_by_seat.iter().sum();
    assert_eq!(wins + summary.draws, 12);
    assert_eq!(
        summary.self_draw_wins + summary.kong_draw_wins + summary.discard_wins,
        wins
    );
    for r in results.iter().filter(|r| r.end_type == Some(EndType::Draw)) {
        assert_eq!(r.wall_remaining, 0);
    }
}
