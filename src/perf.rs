use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use color_eyre::eyre::{Result, eyre};
use serde_json::Value;

const TRACKED_SPANS: [&str; 2] = ["sampler.sample", "ui.draw"];

pub fn init_tracing_json(output_path: &Path) -> Result<()> {
    use tracing_subscriber::fmt::format::FmtSpan;

    ensure_parent_dir(output_path)?;
    let file = File::create(output_path)?;
    let make_writer = move || {
        file.try_clone()
            .expect("failed to clone perf tracing output file")
    };

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(make_writer)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}

/// Per-span count/mean/max over the JSON-lines span log, as a printable
/// report.
pub fn summarize_span_log(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut samples: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for &name in &TRACKED_SPANS {
        samples.insert(name, Vec::new());
    }

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let Ok(value) = serde_json::from_str::<Value>(&line) else {
            continue;
        };
        let Some(span_name) = value
            .get("span")
            .and_then(|span| span.get("name"))
            .and_then(Value::as_str)
        else {
            continue;
        };
        let Some(bucket) = samples.get_mut(span_name) else {
            continue;
        };
        let Some(busy) = value
            .get("fields")
            .and_then(|fields| fields.get("time.busy"))
            .and_then(Value::as_str)
            .and_then(parse_duration_to_us)
        else {
            continue;
        };
        bucket.push(busy);
    }

    let mut report = String::from("span                 count      mean_us       max_us\n");
    for (name, values) in &samples {
        let count = values.len();
        let mean = if count > 0 {
            values.iter().sum::<f64>() / count as f64
        } else {
            0.0
        };
        let max = values.iter().copied().fold(0.0_f64, f64::max);
        report.push_str(&format!("{name:<20} {count:>6} {mean:>12.2} {max:>12.2}\n"));
    }
    Ok(report)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

// tracing-subscriber renders busy times as e.g. "12.3µs", "4.56ms", "1.2s".
fn parse_duration_to_us(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    for (suffix, factor) in [("µs", 1.0), ("us", 1.0), ("ms", 1_000.0), ("ns", 0.001)] {
        if let Some(num) = raw.strip_suffix(suffix) {
            return num.trim().parse::<f64>().ok().map(|v| v * factor);
        }
    }
    raw.strip_suffix('s')
        .and_then(|num| num.trim().parse::<f64>().ok())
        .map(|v| v * 1_000_000.0)
}
