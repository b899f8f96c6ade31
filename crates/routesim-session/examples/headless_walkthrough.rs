//! Headless walkthrough: runs the sample network, prints every step, and
//! verifies determinism.
//!
//! Run with: `cargo run --package routesim-session --example headless_walkthrough`

use routesim_core::simulate::simulate;
use routesim_core::step::StepRecord;
use routesim_core::validation::{compare_runs, run_hash};
use routesim_session::{Session, sample_network};

fn print_step(index: usize, step: &StepRecord) {
    println!("--- step {} ---", index + 1);
    println!("    {}", step.description);
    println!("    {:>12} | {}", "Traversed", step.table.columns.join(" | "));
    for row in &step.table.rows {
        let cells: Vec<String> = row.cells.iter().map(|c| c.to_string()).collect();
        println!("    {:>12} | {}", row.traversed, cells.join(" | "));
    }
}

fn main() {
    let network = sample_network().expect("sample network should load");
    let start = network
        .nodes()
        .find(|(_, data)| data.label == "B")
        .map(|(id, _)| id)
        .expect("sample network has a node B");

    let mut session = Session::with_network(network);
    session.start(start).expect("sample network should simulate");

    let count = session.step_count().expect("run is active");
    println!("=== Link-state walkthrough: {count} steps from B ===\n");

    print_step(0, session.current().expect("run is active"));
    for i in 1..count {
        let step = session.next().expect("run is active");
        print_step(i, step);
    }

    // Determinism check: a second engine run over the same graph must match
    // the recorded sequence exactly.
    let rerun = simulate(session.graph(), start).expect("rerun succeeds");
    let mut replay_session = Session::with_network(session.graph().clone());
    replay_session.start(start).expect("rerun succeeds");
    let hash1 = run_hash(&rerun);

    let diff = compare_runs(
        &rerun,
        &(0..count)
            .map(|i| replay_session.jump_to(i).expect("index in range").clone())
            .collect::<Vec<_>>(),
    );
    if diff.is_identical {
        println!("\nDeterminism: PASS (run hash = {hash1:#018x})");
    } else {
        println!("\nDeterminism: FAIL! {:?}", diff.first_divergence);
        std::process::exit(1);
    }
}
