use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
struct Options {
    /// Path to the Humminbird waypoint (.hwr) or track (.ht) file
    input: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = Options::parse();

    let data = std::fs::read(&options.input)?;
    let decoded = humminbird::decode_file(&data)?;
    let file = &decoded.file;

    println!("Waypoints: {}", file.waypoints.len());
    for waypoint in file.waypoints.iter().take(5) {
        println!(
            "  {:<11} {:>11.6} {:>11.6} depth={:?} icon={:?} status={:?}",
            waypoint.name,
            waypoint.latitude,
            waypoint.longitude,
            waypoint.depth,
            waypoint.icon,
            waypoint.status
        );
    }

    println!("Routes: {}", file.routes.len());
    for route in &file.routes {
        println!("  {} ({} points)", route.name, route.points.len());
    }

    for track in &file.tracks {
        println!(
            "Track: {} #{} ({:?}, {} points)",
            track.name,
            track.number,
            track.format,
            track.points.len()
        );
        if let (Some(first), Some(last)) = (track.points.first(), track.points.last()) {
            println!("  from {:.6},{:.6}", first.latitude, first.longitude);
            println!("  to   {:.6},{:.6}", last.latitude, last.longitude);
        }
    }

    if !decoded.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &decoded.warnings {
            println!("  {}", warning);
        }
    }

    Ok(())
}
