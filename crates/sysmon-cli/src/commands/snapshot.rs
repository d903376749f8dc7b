use std::time::{Duration, Instant};

use sysmon_core::MetricsEngine;

use super::{SamplingArgs, format_kb};

/// Longest wait for the second CPU observation.
const WARMUP_TIMEOUT: Duration = Duration::from_secs(5);

pub fn run(args: &SamplingArgs, json: bool, processes: usize) {
    let mut engine = super::make_engine(args);
    warm_up(&mut engine);

    if json {
        let mut snapshot = engine.snapshot();
        snapshot.top_processes = engine.top_processes(processes).to_vec();
        match serde_json::to_string_pretty(&snapshot) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Failed to serialize snapshot: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", render_text(&engine, processes));
    }
}

/// Tick until the CPU family has two observations, bounded by
/// [`WARMUP_TIMEOUT`].
fn warm_up(engine: &mut MetricsEngine) {
    let step = engine
        .intervals()
        .get(sysmon_core::MetricFamily::Cpu)
        .max(Duration::from_millis(50));
    let start = Instant::now();
    while !engine.cpu_stats().has_valid_measurement && start.elapsed() < WARMUP_TIMEOUT {
        std::thread::sleep(step.min(WARMUP_TIMEOUT));
        engine.tick();
    }
    if !engine.cpu_stats().has_valid_measurement {
        log::warn!("no CPU measurement after {WARMUP_TIMEOUT:?}");
    }
}

fn render_text(engine: &MetricsEngine, processes: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", engine.distro_info().name));

    let cpu = engine.cpu_stats();
    if cpu.has_valid_measurement {
        out.push_str(&format!("  CPU:         {:.1}%\n", cpu.usage_percent));
    } else {
        out.push_str("  CPU:         n/a\n");
    }

    let mem = engine.memory_stats();
    out.push_str(&format!(
        "  Memory:      {:.1}%  ({} / {})\n",
        mem.usage_percent,
        format_kb(mem.used_kb),
        format_kb(mem.total_kb)
    ));

    match engine.cpu_temperature() {
        Some(c) => out.push_str(&format!("  Temperature: {c:.1}°C\n")),
        None => out.push_str("  Temperature: n/a\n"),
    }

    let battery = engine.battery_stats();
    if battery.present {
        out.push_str(&format!(
            "  Battery:     {:.0}% ({})\n",
            battery.percentage, battery.status
        ));
    } else {
        out.push_str(&format!("  Battery:     {}\n", battery.status));
    }

    out.push_str("  Processes:\n");
    for name in engine.top_processes(processes) {
        out.push_str(&format!("    {name}\n"));
    }
    out
}
