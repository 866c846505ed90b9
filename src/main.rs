use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use logdash::client::SourceClient;
use logdash::config::Config;
use logdash::datasets::DashboardData;
use logdash::logging;
use logdash::pipeline;
use logdash::types::TelemetrySource;

#[derive(Parser)]
#[command(name = "logdash")]
#[command(about = "Telemetry aggregation engine for the two-server operator dashboard")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one dashboard load and print the chart-ready datasets
    Load {
        /// Emit the datasets as JSON instead of a text summary
        #[arg(long)]
        json: bool,
    },
    /// Probe every telemetry resource once and report reachability
    Check,
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();

    let config = Config::load()?;
    let (source_a, source_b) = SourceClient::pair(&config);

    match cli.command {
        Commands::Load { json } => match pipeline::load_dashboard(&source_a, &source_b).await {
            Ok(data) => {
                info!("Dashboard load finished");
                if json {
                    println!("{}", serde_json::to_string_pretty(&data)?);
                } else {
                    print_summary(&data);
                }
            }
            Err(e) => {
                error!("Dashboard load failed: {}", e);
                eprintln!("❌ Dashboard load failed: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Check => {
            if !run_checks(&source_a, &source_b).await {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn print_summary(data: &DashboardData) {
    println!("\n📊 Dashboard load complete");

    println!("\n   Log levels ({}):", data.log_levels.labels.join("/"));
    for series in &data.log_levels.series {
        let counts: Vec<String> = series.data.iter().map(|c| c.to_string()).collect();
        println!("      {}: {}", series.label, counts.join(" "));
    }

    println!("\n   Latency axis: {} points", data.latency.labels.len());
    if let (Some(first), Some(last)) = (data.latency.labels.first(), data.latency.labels.last()) {
        println!("      {} .. {}", first, last);
    }

    println!("\n   Top endpoints by combined requests:");
    for endpoint in &data.top_endpoints {
        println!(
            "      {:<15} A={} B={}",
            endpoint.display_label, endpoint.count_a, endpoint.count_b
        );
    }
    println!();
}

/// Fetches every resource the dashboard depends on and reports each one.
/// Returns false when any critical resource is unreachable; the source-A
/// latency probe only warns, matching its best-effort role in the load.
async fn run_checks(source_a: &SourceClient, source_b: &SourceClient) -> bool {
    println!("🔎 Probing telemetry sources...");
    let mut healthy = true;

    match source_b.fetch_logs().await {
        Ok(records) => println!("   ✅ source B logs: {} records", records.len()),
        Err(e) => {
            error!("Logs probe failed: {}", e);
            println!("   ❌ source B logs: {}", e);
            healthy = false;
        }
    }

    match source_b.fetch_endpoint_counts().await {
        Ok(counts) => println!("   ✅ source B endpoint counts: {} endpoints", counts.len()),
        Err(e) => {
            error!("Endpoint-count probe failed: {}", e);
            println!("   ❌ source B endpoint counts: {}", e);
            healthy = false;
        }
    }

    match source_b.fetch_latency().await {
        Ok(samples) => println!("   ✅ source B latency: {} samples", samples.len()),
        Err(e) => {
            error!("Source B latency probe failed: {}", e);
            println!("   ❌ source B latency: {}", e);
            healthy = false;
        }
    }

    match source_a.fetch_latency().await {
        Ok(samples) => println!("   ✅ source A latency: {} samples", samples.len()),
        Err(e) => {
            warn!("Source A latency probe failed (best-effort): {}", e);
            println!("   ⚠️  source A latency (best-effort): {}", e);
        }
    }

    healthy
}
