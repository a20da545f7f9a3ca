use std::io::{self, BufRead};

use tracing::info;
use tracing_subscriber::EnvFilter;

use client::{parse_click, run_click_cycle, ClientConfig, Clock, NearbyClient};
use overlay::state::MapState;
use pipeline::cycle::Orchestrator;
use pipeline::panel::StatusPanel;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ClientConfig::from_env();
    info!(
        "analysis backend: {}, datasets: {}",
        config.backend_url, config.data_url
    );

    let client = NearbyClient::new(config);
    let clock = Clock::new();
    let mut orchestrator = Orchestrator::new();
    let mut state = MapState::new();
    let mut panel = StatusPanel::new();

    println!("{}", panel.render_text());
    println!("Enter a coordinate as \"lat lng\" (blank line to quit):");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }

        // Revert a lingering terminal panel before the next interaction.
        orchestrator.tick(clock.now(), &mut panel);

        let Some(origin) = parse_click(trimmed) else {
            eprintln!("could not parse {trimmed:?}; expected \"lat lng\"");
            continue;
        };

        let outcome = run_click_cycle(
            &client,
            &mut orchestrator,
            &mut state,
            &mut panel,
            &clock,
            origin,
        )
        .await;
        info!(
            "cycle finished: {outcome:?} ({} markers, {} routes)",
            state.markers.len(),
            state.routes.len()
        );

        println!("{}", panel.render_text());
    }
}
