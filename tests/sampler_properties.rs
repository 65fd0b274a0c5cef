use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;

use proptest::prelude::*;

use procwatch::system::sampler::Sampler;
use procwatch::system::source::{CpuTicks, MemoryKb, ProcSource};

/// Minimal scripted source: tests mutate the cells between ticks while the
/// sampler reads through a shared reference.
#[derive(Default)]
struct ScriptedSource {
    system: Cell<CpuTicks>,
    memory: Cell<MemoryKb>,
    order: RefCell<Vec<u32>>,
    ticks: RefCell<HashMap<u32, u64>>,
    resident: RefCell<HashMap<u32, f64>>,
}

impl ScriptedSource {
    fn put(&self, pid: u32, ticks: u64, resident_kb: f64) {
        let mut order = self.order.borrow_mut();
        if !order.contains(&pid) {
            order.push(pid);
        }
        self.ticks.borrow_mut().insert(pid, ticks);
        self.resident.borrow_mut().insert(pid, resident_kb);
    }

    fn drop_pid(&self, pid: u32) {
        self.order.borrow_mut().retain(|&p| p != pid);
        self.ticks.borrow_mut().remove(&pid);
        self.resident.borrow_mut().remove(&pid);
    }
}

impl ProcSource for ScriptedSource {
    fn pids(&self) -> Vec<u32> {
        self.order.borrow().clone()
    }

    fn process_name(&self, pid: u32) -> Option<String> {
        self.ticks.borrow().contains_key(&pid).then(|| format!("proc-{pid}"))
    }

    fn process_cpu_ticks(&self, pid: u32) -> u64 {
        self.ticks.borrow().get(&pid).copied().unwrap_or(0)
    }

    fn process_resident_kb(&self, pid: u32) -> f64 {
        self.resident.borrow().get(&pid).copied().unwrap_or(0.0)
    }

    fn system_cpu_ticks(&self) -> CpuTicks {
        self.system.get()
    }

    fn system_memory_kb(&self) -> MemoryKb {
        self.memory.get()
    }

    fn send_sigterm(&self, _pid: u32) -> io::Result<()> {
        Ok(())
    }
}

proptest! {
    /// The per-process share is exactly the tick-delta ratio whenever the
    /// counters move forwards.
    #[test]
    fn cpu_share_matches_delta_ratio(
        base in 0u64..1_000_000,
        prev_ticks in 0u64..100_000,
        proc_delta in 0u64..10_000,
        total_delta in 0u64..100_000,
    ) {
        let source = ScriptedSource::default();
        source.system.set(CpuTicks { total: base, idle: 0 });
        source.memory.set(MemoryKb { total: 1, available: 0 });
        source.put(10, prev_ticks, 0.0);

        let mut sampler = Sampler::new(&source);
        sampler.sample();

        source.system.set(CpuTicks { total: base + total_delta, idle: 0 });
        source.put(10, prev_ticks + proc_delta, 0.0);

        let tick = sampler.sample();
        let expected = proc_delta as f32 / total_delta.max(1) as f32 * 100.0;
        prop_assert_eq!(tick.processes[0].cpu_percent, expected);
    }

    /// A pid observed for the first time always reports 0%, however large
    /// its cumulative counter already is.
    #[test]
    fn first_observation_is_always_zero(
        proc_ticks in 0u64..u64::MAX / 2,
        total_delta in 1u64..100_000,
    ) {
        let source = ScriptedSource::default();
        source.system.set(CpuTicks { total: 5_000, idle: 0 });
        source.memory.set(MemoryKb { total: 1, available: 0 });

        let mut sampler = Sampler::new(&source);

        source.system.set(CpuTicks { total: 5_000 + total_delta, idle: 0 });
        source.put(77, proc_ticks, 0.0);

        let tick = sampler.sample();
        prop_assert_eq!(tick.processes[0].cpu_percent, 0.0);
    }

    /// A recycled pid never inherits the dead process's baseline: after
    /// the pid was absent for a tick, any counter value reads as a fresh
    /// first observation.
    #[test]
    fn recycled_pid_starts_fresh(
        old_ticks in 1_000u64..1_000_000,
        new_ticks in 0u64..1_000,
    ) {
        let source = ScriptedSource::default();
        source.system.set(CpuTicks { total: 1_000, idle: 0 });
        source.memory.set(MemoryKb { total: 1, available: 0 });
        source.put(20, old_ticks, 0.0);

        let mut sampler = Sampler::new(&source);
        sampler.sample();

        source.system.set(CpuTicks { total: 2_000, idle: 0 });
        source.drop_pid(20);
        sampler.sample();

        source.system.set(CpuTicks { total: 3_000, idle: 0 });
        source.put(20, new_ticks, 0.0);

        let tick = sampler.sample();
        prop_assert_eq!(tick.processes[0].cpu_percent, 0.0);
    }

    /// Memory shares stay within [0, 100] whenever resident <= total.
    #[test]
    fn mem_share_is_bounded(
        total_kb in 1u64..100_000_000,
        resident_ratio in 0.0f64..=1.0,
    ) {
        let source = ScriptedSource::default();
        source.system.set(CpuTicks { total: 1_000, idle: 0 });
        source.memory.set(MemoryKb { total: total_kb, available: 0 });
        source.put(5, 0, total_kb as f64 * resident_ratio);

        let mut sampler = Sampler::new(&source);
        let tick = sampler.sample();

        let mem = tick.processes[0].mem_percent;
        prop_assert!((0.0..=100.0).contains(&mem));
    }

    /// The aggregate busy percentage reproduces the idle/total delta
    /// formula for any pair of forward-moving readings.
    #[test]
    fn busy_percent_matches_idle_total_deltas(
        total0 in 0u64..1_000_000,
        idle0 in 0u64..1_000_000,
        d_total in 1u64..100_000,
        idle_ratio in 0.0f64..=1.0,
    ) {
        let d_idle = (d_total as f64 * idle_ratio) as u64;
        let source = ScriptedSource::default();
        source.system.set(CpuTicks { total: total0, idle: idle0 });
        source.memory.set(MemoryKb { total: 1, available: 0 });

        let mut sampler = Sampler::new(&source);
        source.system.set(CpuTicks {
            total: total0 + d_total,
            idle: idle0 + d_idle,
        });

        let tick = sampler.sample();
        let expected = (d_total - d_idle) as f32 / d_total as f32 * 100.0;
        prop_assert_eq!(tick.cpu_percent, expected);
    }
}
