use std::collections::HashMap;

use super::source::{CpuTicks, ProcSource};

/// One process observed during the current tick. The name is stored
/// untruncated; display-width trimming happens at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub mem_percent: f32,
}

/// Everything a single tick produces: the per-process records in
/// enumeration order plus the two system-wide aggregates.
#[derive(Debug, Clone, Default)]
pub struct TickSample {
    pub processes: Vec<ProcessSample>,
    pub cpu_percent: f32,
    pub mem_percent: f32,
}

/// Converts cumulative OS counters into per-interval utilization.
///
/// Holds the previous readings between ticks: one total-tick baseline for
/// the per-process shares, a separate idle/total pair for the aggregate
/// busy percentage, and the per-pid tick map. The pid map is rebuilt from
/// scratch every tick so a recycled pid never inherits the baseline of a
/// dead process.
pub struct Sampler<S> {
    source: S,
    prev_total_ticks: u64,
    prev_proc_ticks: HashMap<u32, u64>,
    prev_system: CpuTicks,
}

impl<S: ProcSource> Sampler<S> {
    /// Primes both counter baselines with one initial read so the first
    /// tick has a real interval instead of counters-since-boot.
    pub fn new(source: S) -> Self {
        let first = source.system_cpu_ticks();
        Sampler {
            source,
            prev_total_ticks: first.total,
            prev_proc_ticks: HashMap::new(),
            prev_system: first,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sample(&mut self) -> TickSample {
        #[cfg(feature = "perf-tracing")]
        let _sample_span = tracing::debug_span!("sampler.sample").entered();

        let now = self.source.system_cpu_ticks();
        let pids = self.source.pids();
        let mem = self.source.system_memory_kb();

        // Floor of 1: a wrapped or reset total counter reads as "epsilon
        // elapsed" instead of corrupting every share below with a division
        // by zero or a negative interval.
        let total_delta = now.total.saturating_sub(self.prev_total_ticks).max(1);

        let mut next_prev = HashMap::with_capacity(pids.len());
        let mut processes = Vec::with_capacity(pids.len());

        for pid in pids {
            // Vanished between enumeration and read: normal churn, skip.
            let Some(name) = self.source.process_name(pid) else {
                continue;
            };
            let cur = self.source.process_cpu_ticks(pid);
            // An unseen pid gets `cur` as its baseline, so the first
            // observation reports 0% rather than a spike from an
            // undefined starting point.
            let prev = self.prev_proc_ticks.get(&pid).copied().unwrap_or(cur);
            next_prev.insert(pid, cur);

            // saturating_sub clamps a backwards counter to a zero delta.
            let delta = cur.saturating_sub(prev);
            let cpu_percent = delta as f32 / total_delta as f32 * 100.0;
            let mem_percent = if mem.total > 0 {
                (self.source.process_resident_kb(pid) / mem.total as f64 * 100.0) as f32
            } else {
                0.0
            };

            processes.push(ProcessSample {
                pid,
                name,
                cpu_percent,
                mem_percent,
            });
        }

        // Wholesale replacement: after this the map holds exactly the pids
        // sampled this tick, no stale survivors.
        self.prev_proc_ticks = next_prev;
        self.prev_total_ticks = now.total;

        TickSample {
            processes,
            cpu_percent: self.system_busy_percent(now),
            mem_percent: system_mem_percent(mem.total, mem.available),
        }
    }

    /// Aggregate busy share from the idle/total counter family, tracked
    /// with its own baseline pair. This is not the sum of the per-process
    /// deltas and the two are expected to diverge slightly.
    fn system_busy_percent(&mut self, now: CpuTicks) -> f32 {
        let d_total = now.total.saturating_sub(self.prev_system.total);
        let d_idle = now.idle.saturating_sub(self.prev_system.idle);
        self.prev_system = now;
        if d_total == 0 {
            return 0.0;
        }
        d_total.saturating_sub(d_idle) as f32 / d_total as f32 * 100.0
    }

    #[cfg(test)]
    fn tracked_pids(&self) -> Vec<u32> {
        let mut pids: Vec<u32> = self.prev_proc_ticks.keys().copied().collect();
        pids.sort_unstable();
        pids
    }
}

fn system_mem_percent(total_kb: u64, available_kb: u64) -> f32 {
    if total_kb == 0 {
        return 0.0;
    }
    total_kb.saturating_sub(available_kb) as f32 / total_kb as f32 * 100.0
}
