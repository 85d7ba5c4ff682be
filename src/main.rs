use dca_dashboard::config::DashboardConfig;
use dca_dashboard::core::http::build_state;
use dca_dashboard::logging;
use dca_dashboard::models::snapshot::DashboardSnapshot;
use dca_dashboard::signals::engine::EngineParams;
use dotenvy::dotenv;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let config = DashboardConfig::from_env()?;
    let params = EngineParams {
        threshold_pct: config.threshold_pct,
        pool_pct: config.pool_pct,
        equity_share_pct: config.equity_share_pct,
    };

    let state = build_state(config)?;
    let data = state.cache.get().await;
    let mut session = state.session.write().await;
    let snapshot = state.engine.snapshot(&data, &mut session, params);

    print_snapshot(&snapshot);
    Ok(())
}

fn print_snapshot(snapshot: &DashboardSnapshot) {
    println!("DCA Dashboard (threshold {:.0}%)", snapshot.threshold_pct);
    println!("  Score shift: {:+.2}", snapshot.shift);
    println!();

    for card in &snapshot.instruments {
        match card.last_price {
            Some(price) => println!("{}: {:.2} ({:+.2}%)", card.name, price, card.delta_pct),
            None => println!("{}: no data", card.name),
        }
        let badges: Vec<String> = card
            .timeframes
            .iter()
            .map(|b| match b.score {
                Some(score) => format!("{} {} {:+.1}", b.label, b.arrow, score),
                None => format!("{} {}", b.label, b.arrow),
            })
            .collect();
        println!("  {}", badges.join(" | "));
        println!(
            "  raw={:+.2} adj={:.2} origin={:.2}% reco={:.2}% dca={:.1}%",
            card.raw_score,
            card.adjusted_score,
            card.origin_pct,
            card.recommended_pct,
            card.dca_allocation_pct
        );
    }

    println!();
    for reading in &snapshot.macro_indicators {
        match reading.latest {
            Some(value) => println!("  {}: {:.2}", reading.label, value),
            None => println!("  {}: N/A", reading.label),
        }
    }
    for warning in &snapshot.warnings {
        println!("warning: {}", warning);
    }
}
