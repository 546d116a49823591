use datadiff_telemetry::prelude::*;
use serde_json::json;
use std::time::Instant;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // One client per host application; honors DATADIFF_NO_ANALYTICS
    let client = TelemetryClient::new()?;
    println!("Installation id: {}", client.anonymous_id()?);

    // Report that a run started
    let start = client.start_event(&json!({
        "bisection_factor": 32,
        "threads": 4,
        "stats": true,
    }))?;
    client.send(&start).await?;

    // ... the host tool would diff its two tables here ...
    let started = Instant::now();

    // Report how it went
    let end = client.end_event(
        true,
        started.elapsed().as_secs_f64(),
        "mysql",
        "postgresql",
        1_000_000,
        1_000_000,
        0,
        None,
    )?;
    client.send(&end).await?;

    println!("Done.");

    Ok(())
}
