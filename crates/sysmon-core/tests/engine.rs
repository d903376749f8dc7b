//! Integration tests for sysmon-core.
//!
//! Each test lays out a fake host (procfs, sysfs, os-release) in a temporary
//! directory and drives the engine against it:
//! fixture files → tick → accessors.

use std::fs;
use std::path::Path;
use std::time::Duration;

use sysmon_core::{HostPaths, MetricFamily, MetricsEngine, RefreshIntervals};
use tempfile::TempDir;

struct FakeHost {
    _dir: TempDir,
    paths: HostPaths,
}

impl FakeHost {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let paths = HostPaths::rooted(dir.path());
        fs::create_dir_all(&paths.proc_root).unwrap();
        Self { _dir: dir, paths }
    }

    fn write(&self, path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn stat(&self, user: u64, nice: u64, system: u64, idle: u64) {
        self.write(
            &self.paths.stat(),
            &format!(
                "cpu  {user} {nice} {system} {idle} 0 0 0 0 0 0\ncpu0 {user} {nice} {system} {idle} 0 0 0 0 0 0\n"
            ),
        );
    }

    fn meminfo(&self, total: u64, free: u64, buffers: u64, cached: u64) {
        self.write(
            &self.paths.meminfo(),
            &format!(
                "MemTotal: {total} kB\nMemFree: {free} kB\nMemAvailable: 0 kB\nBuffers: {buffers} kB\nCached: {cached} kB\n"
            ),
        );
    }

    fn process(&self, pid: u32, comm: &str) {
        self.write(
            &self.paths.proc_root.join(pid.to_string()).join("comm"),
            &format!("{comm}\n"),
        );
    }

    fn engine(&self, intervals: RefreshIntervals) -> MetricsEngine {
        MetricsEngine::with_intervals(self.paths.clone(), intervals)
    }
}

#[test]
fn first_cpu_sample_is_not_a_measurement() {
    let host = FakeHost::new();
    host.stat(100, 0, 100, 800);
    let mut engine = host.engine(RefreshIntervals::EVERY_TICK);

    let cpu = engine.cpu_stats();
    assert!(!cpu.has_valid_measurement);
    assert_eq!(cpu.usage_percent, 0.0);
    assert_eq!(cpu.counters.idle, 800);

    host.stat(160, 0, 120, 820);
    engine.tick();
    let cpu = engine.cpu_stats();
    assert!(cpu.has_valid_measurement);
    // total delta 100, idle delta 20
    assert!((cpu.usage_percent - 80.0).abs() < 1e-3);
}

#[test]
fn unchanged_counters_keep_previous_usage() {
    let host = FakeHost::new();
    host.stat(100, 0, 100, 800);
    let mut engine = host.engine(RefreshIntervals::EVERY_TICK);
    host.stat(150, 0, 150, 900);
    engine.tick();
    let before = engine.cpu_stats().usage_percent;

    engine.tick();
    let after = engine.cpu_stats();
    assert!(after.has_valid_measurement);
    assert_eq!(after.usage_percent, before);
    assert!(after.usage_percent.is_finite());
}

#[test]
fn unreadable_stat_keeps_previous_usage() {
    let host = FakeHost::new();
    host.stat(100, 0, 100, 800);
    let mut engine = host.engine(RefreshIntervals::EVERY_TICK);
    host.stat(150, 0, 150, 900);
    engine.tick();
    let before = engine.cpu_stats();

    fs::remove_file(host.paths.stat()).unwrap();
    engine.tick();
    assert_eq!(engine.cpu_stats(), before);
}

#[test]
fn memory_folds_reclaimable_into_free() {
    let host = FakeHost::new();
    host.meminfo(1_000_000, 200_000, 50_000, 150_000);
    let engine = host.engine(RefreshIntervals::default());

    let mem = engine.memory_stats();
    assert_eq!(mem.total_kb, 1_000_000);
    assert_eq!(mem.used_kb, 600_000);
    assert_eq!(mem.free_kb, 400_000);
    assert!((mem.usage_percent - 60.0).abs() < 1e-3);
}

#[test]
fn zero_memory_total_keeps_previous_values() {
    let host = FakeHost::new();
    host.meminfo(1_000_000, 200_000, 50_000, 150_000);
    let mut engine = host.engine(RefreshIntervals::EVERY_TICK);
    let before = engine.memory_stats();

    host.meminfo(0, 10, 10, 10);
    engine.tick();
    let after = engine.memory_stats();
    assert_eq!(after, before);
    assert!(after.usage_percent.is_finite());
}

#[test]
fn missing_battery_is_a_defined_state() {
    let host = FakeHost::new();
    let engine = host.engine(RefreshIntervals::default());
    let battery = engine.battery_stats();
    assert!(!battery.present);
    assert!(!battery.charging);
    assert_eq!(battery.percentage, 0.0);
    assert_eq!(battery.status, "No Battery");
}

#[test]
fn battery_appears_and_disappears() {
    let host = FakeHost::new();
    let mut engine = host.engine(RefreshIntervals::EVERY_TICK);
    assert!(!engine.battery_stats().present);

    host.write(&host.paths.battery_status(), "Charging\n");
    host.write(&host.paths.battery_capacity(), "73\n");
    engine.tick();
    let battery = engine.battery_stats();
    assert!(battery.present);
    assert!(battery.charging);
    assert_eq!(battery.percentage, 73.0);
    assert_eq!(battery.status, "Charging");

    fs::remove_file(host.paths.battery_capacity()).unwrap();
    engine.tick();
    assert!(!engine.battery_stats().present);
    assert_eq!(engine.battery_stats().status, "No Battery");
}

#[test]
fn empty_battery_capacity_is_present_at_zero() {
    let host = FakeHost::new();
    host.write(&host.paths.battery_status(), "Discharging\n");
    host.write(&host.paths.battery_capacity(), "");
    let engine = host.engine(RefreshIntervals::default());

    let battery = engine.battery_stats();
    assert!(battery.present);
    assert!(!battery.charging);
    assert_eq!(battery.percentage, 0.0);
    assert_eq!(battery.status, "Discharging");
}

#[test]
fn temperature_survives_a_vanished_zone() {
    let host = FakeHost::new();
    let mut engine = host.engine(RefreshIntervals::EVERY_TICK);
    assert_eq!(engine.cpu_temperature(), None);

    host.write(&host.paths.thermal_zone, "52000\n");
    engine.tick();
    assert_eq!(engine.cpu_temperature(), Some(52.0));

    fs::remove_file(&host.paths.thermal_zone).unwrap();
    engine.tick();
    assert_eq!(engine.cpu_temperature(), Some(52.0));
}

#[test]
fn top_processes_are_sorted_and_capped() {
    let host = FakeHost::new();
    let names = [
        "systemd", "sshd", "bash", "cron", "nginx", "agetty", "dbus-daemon", "udevd",
    ];
    for (i, name) in names.iter().enumerate() {
        host.process(i as u32 + 1, name);
    }
    host.write(&host.paths.proc_root.join("self").join("comm"), "ignored\n");
    let engine = host.engine(RefreshIntervals::default());

    assert_eq!(
        engine.top_processes(5),
        ["agetty", "bash", "cron", "dbus-daemon", "nginx"]
    );
    assert_eq!(engine.top_processes(10).len(), 5);
    assert_eq!(engine.top_processes(2), ["agetty", "bash"]);
    assert!(engine.top_processes(0).is_empty());
}

#[test]
fn non_utf8_process_names_are_listed() {
    let host = FakeHost::new();
    host.process(1, "init");
    let worker = host.paths.proc_root.join("2");
    fs::create_dir_all(&worker).unwrap();
    fs::write(worker.join("comm"), b"w\xffrker\n").unwrap();
    let engine = host.engine(RefreshIntervals::default());

    assert_eq!(engine.top_processes(5), ["init", "w\u{FFFD}rker"]);
}

#[test]
fn one_resample_per_interval() {
    let host = FakeHost::new();
    host.stat(100, 0, 100, 800);
    let mut engine = host.engine(RefreshIntervals {
        cpu_ms: 1000,
        ..RefreshIntervals::default()
    });
    let t0 = engine.last_refreshed(MetricFamily::Cpu).unwrap();

    host.stat(200, 0, 200, 900);
    let refreshed = engine.tick_at(t0 + Duration::from_millis(400));
    assert!(!refreshed.contains(&MetricFamily::Cpu));
    let refreshed = engine.tick_at(t0 + Duration::from_millis(800));
    assert!(!refreshed.contains(&MetricFamily::Cpu));
    assert_eq!(engine.cpu_stats().counters.user, 100);
    assert_eq!(engine.last_refreshed(MetricFamily::Cpu), Some(t0));

    let refreshed = engine.tick_at(t0 + Duration::from_millis(1000));
    assert!(refreshed.contains(&MetricFamily::Cpu));
    assert_eq!(engine.cpu_stats().counters.user, 200);
    assert!(engine.cpu_stats().has_valid_measurement);
}

#[test]
fn configure_applies_on_next_tick() {
    let host = FakeHost::new();
    host.stat(100, 0, 100, 800);
    let mut engine = host.engine(RefreshIntervals {
        cpu_ms: 60_000,
        ..RefreshIntervals::default()
    });
    let t0 = engine.last_refreshed(MetricFamily::Cpu).unwrap();
    assert!(!engine
        .tick_at(t0 + Duration::from_millis(10))
        .contains(&MetricFamily::Cpu));

    engine.configure(RefreshIntervals {
        cpu_ms: 0,
        ..RefreshIntervals::default()
    });
    assert!(engine
        .tick_at(t0 + Duration::from_millis(10))
        .contains(&MetricFamily::Cpu));
}

#[test]
fn distro_pretty_name_and_fallback() {
    let host = FakeHost::new();
    let engine = host.engine(RefreshIntervals::default());
    assert_eq!(engine.distro_info().name, "Linux");

    host.write(
        &host.paths.os_release,
        "NAME=\"Ubuntu\"\nPRETTY_NAME=\"Ubuntu 22.04\"\nID=ubuntu\n",
    );
    let mut engine = host.engine(RefreshIntervals::default());
    assert_eq!(engine.distro_info().name, "Ubuntu 22.04");

    // Read once at construction; later edits need an explicit refresh.
    host.write(&host.paths.os_release, "PRETTY_NAME=\"Fedora Linux 40\"\n");
    engine.tick();
    assert_eq!(engine.distro_info().name, "Ubuntu 22.04");
    engine.refresh_distro();
    assert_eq!(engine.distro_info().name, "Fedora Linux 40");
}

#[test]
fn snapshot_serializes() {
    let host = FakeHost::new();
    host.stat(1, 2, 3, 4);
    host.meminfo(2048, 1024, 0, 0);
    host.process(1, "init");
    let engine = host.engine(RefreshIntervals::default());

    let snap = engine.snapshot();
    assert_eq!(snap.top_processes, vec!["init".to_string()]);
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["memory"]["used_kb"], 1024);
    assert_eq!(json["cpu"]["has_valid_measurement"], false);
    assert!(json["cpu_temperature_c"].is_null());
    assert_eq!(json["battery"]["status"], "No Battery");
    assert_eq!(json["distro"]["name"], "Linux");
}
