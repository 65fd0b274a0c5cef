use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;

use insta::assert_debug_snapshot;

use procwatch::system::sampler::{Sampler, TickSample};
use procwatch::system::source::{CpuTicks, MemoryKb, ProcSource};

#[derive(Default)]
struct ScriptedSource {
    system: Cell<CpuTicks>,
    memory: Cell<MemoryKb>,
    order: RefCell<Vec<u32>>,
    procs: RefCell<HashMap<u32, (String, u64, f64)>>,
}

impl ScriptedSource {
    fn put(&self, pid: u32, name: &str, ticks: u64, resident_kb: f64) {
        let mut order = self.order.borrow_mut();
        if !order.contains(&pid) {
            order.push(pid);
        }
        self.procs
            .borrow_mut()
            .insert(pid, (name.to_string(), ticks, resident_kb));
    }
}

impl ProcSource for ScriptedSource {
    fn pids(&self) -> Vec<u32> {
        self.order.borrow().clone()
    }

    fn process_name(&self, pid: u32) -> Option<String> {
        self.procs.borrow().get(&pid).map(|(name, _, _)| name.clone())
    }

    fn process_cpu_ticks(&self, pid: u32) -> u64 {
        self.procs.borrow().get(&pid).map(|&(_, t, _)| t).unwrap_or(0)
    }

    fn process_resident_kb(&self, pid: u32) -> f64 {
        self.procs.borrow().get(&pid).map(|&(_, _, r)| r).unwrap_or(0.0)
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

fn normalize(tick: &TickSample) -> Vec<String> {
    let mut rows = vec![format!(
        "tick cpu={:.1} mem={:.1}",
        tick.cpu_percent, tick.mem_percent
    )];
    rows.extend(tick.processes.iter().map(|p| {
        format!(
            "pid={} name={} cpu={:.1} mem={:.1}",
            p.pid, p.name, p.cpu_percent, p.mem_percent
        )
    }));
    rows
}

#[test]
fn two_tick_sequence_is_deterministic() {
    let source = ScriptedSource::default();
    source.system.set(CpuTicks {
        total: 1_000,
        idle: 800,
    });
    source.memory.set(MemoryKb {
        total: 1_000_000,
        available: 500_000,
    });
    source.put(42, "alpha", 100, 50_000.0);
    source.put(43, "beta", 40, 250_000.0);

    let mut sampler = Sampler::new(&source);
    let mut rows = normalize(&sampler.sample());

    // One interval elapses: 200 total ticks, 100 idle; alpha burns 100.
    source.system.set(CpuTicks {
        total: 1_200,
        idle: 900,
    });
    source.put(42, "alpha", 200, 50_000.0);
    source.put(43, "beta", 40, 250_000.0);

    rows.extend(normalize(&sampler.sample()));

    assert_debug_snapshot!(rows, @r#"
    [
        "tick cpu=0.0 mem=50.0",
        "pid=42 name=alpha cpu=0.0 mem=5.0",
        "pid=43 name=beta cpu=0.0 mem=25.0",
        "tick cpu=50.0 mem=50.0",
        "pid=42 name=alpha cpu=50.0 mem=5.0",
        "pid=43 name=beta cpu=0.0 mem=25.0",
    ]
    "#);
}
