use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use swingline::{
    BarLoader, Const, SwingConfig, SwingPoint, SwingSide, TickLoader, init_logging,
    swing_transitions,
};
use tracing::info;

#[derive(Debug, Serialize)]
struct ExportPayload {
    source: String,
    strength: i64,
    bars: usize,
    points: Vec<PointRow>,
    high_transitions: Vec<Transition>,
    low_transitions: Vec<Transition>,
}

#[derive(Debug, Serialize)]
struct PointRow {
    time: i64,
    swing_high: Option<f64>,
    swing_low: Option<f64>,
}

#[derive(Debug, Serialize)]
struct Transition {
    index: usize,
    time: i64,
    value: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let mut args: Vec<String> = std::env::args().collect();
    let from_ticks = match args.iter().position(|x| x == "--ticks") {
        Some(pos) => {
            args.remove(pos);
            true
        }
        None => false,
    };
    if args.len() < 2 {
        eprintln!(
            "usage: cargo run -p replay --bin export_swing_points -- <csv_path> [strength] [output_json] [--ticks]"
        );
        std::process::exit(2);
    }

    let csv_path = PathBuf::from(&args[1]);
    let strength = if args.len() >= 3 {
        args[2].parse::<i64>()?
    } else {
        Const::DEFAULT_STRENGTH
    };
    let output = if args.len() >= 4 {
        PathBuf::from(&args[3])
    } else {
        csv_path.with_extension("swing.json")
    };

    let config = SwingConfig::new(strength);
    config.validate()?;

    let bars = if from_ticks {
        TickLoader::load_minute_bars(&csv_path)?
    } else {
        BarLoader::load(&csv_path)?
    };
    info!(bars = bars.len(), strength, from_ticks, "running swing scan");
    let points = config.compute(&bars)?;

    let payload = ExportPayload {
        source: csv_path.display().to_string(),
        strength,
        bars: bars.len(),
        high_transitions: transitions(&points, SwingSide::High),
        low_transitions: transitions(&points, SwingSide::Low),
        points: points
            .iter()
            .map(|x| PointRow {
                time: x.datetime.timestamp(),
                swing_high: x.swing_high,
                swing_low: x.swing_low,
            })
            .collect(),
    };

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output, serde_json::to_vec_pretty(&payload)?)?;

    println!(
        "exported {} swing points to {} (strength={}, highs={}, lows={})",
        payload.points.len(),
        output.display(),
        payload.strength,
        payload.high_transitions.len(),
        payload.low_transitions.len(),
    );

    Ok(())
}

fn transitions(points: &[SwingPoint], side: SwingSide) -> Vec<Transition> {
    swing_transitions(points, side)
        .into_iter()
        .map(|(index, value)| Transition {
            index,
            time: points[index].datetime.timestamp(),
            value,
        })
        .collect()
}
