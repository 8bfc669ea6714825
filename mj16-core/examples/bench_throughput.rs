use std::time::Instant;

use mj16_core::simulator::{simulate_single_game, BatchConfig, BatchSimulator, BatchSummary};
use mj16_engine::GameRule;

fn print_summary(summary: &BatchSummary) {
    println!("Wins by seat:     {:?}", summary.wins_by_seat);
    println!(
        "Self/kong/discard: {}/{}/{}",
        summary.self_draw_wins, summary.kong_draw_wins, summary.discard_wins
    );
    println!("Draws:            {}", summary.draws);
    println!("Avg turns/game:   {:.1}", summary.mean_turns);
}

fn main() -> anyhow::Result<()> {
    let num_cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);
    let rule = GameRule::all_autonomous();

    // --- Single-core warmup + benchmark ---
    let _ = simulate_single_game(Some(0), rule);

    let n_single = 1000u64;
    let start = Instant::now();
    let results: Vec<_> = (0..n_single)
        .map(|i| simulate_single_game(Some(i), rule))
        .collect();
    let elapsed = start.elapsed();
    let gps = n_single as f64 / elapsed.as_secs_f64();

    println!("=== SINGLE CORE ({} games) ===", n_single);
    println!("Time:             {:.2?}", elapsed);
    println!("Games/sec:        {:.1}", gps);
    print_summary(&BatchSummary::from_results(&results));
    println!();

    // --- Multi-core benchmark ---
    let config = BatchConfig {
        num_games: 20_000,
        base_seed: Some(90_000),
        num_threads: Some(num_cpus),
        rule,
    };
    let sim = BatchSimulator::for_config(&config)?;

    let start = Instant::now();
    let results = sim.run_batch(&config);
    let elapsed = start.elapsed();
    let gps = results.len() as f64 / elapsed.as_secs_f64();

    println!(
        "=== ALL CORES ({} threads, {} games) ===",
        num_cpus, config.num_games
    );
    println!("Time:             {:.2?}", elapsed);
    println!("Games/sec:        {:.1}", gps);
    println!("Per-core/sec:     {:.1}", gps / num_cpus as f64);
    print_summary(&BatchSummary::from_results(&results));
    Ok(())
}
