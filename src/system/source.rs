use std::io;

/// Cumulative system CPU tick counters as exposed by the OS. Both values
/// only ever grow during normal operation; wraps are handled by the sampler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTicks {
    pub total: u64,
    pub idle: u64,
}

/// Physical memory totals in kilobytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryKb {
    pub total: u64,
    pub available: u64,
}

/// Raw process-information interface the sampler reads from.
///
/// Reads never fail loudly: a process that vanishes between enumeration and
/// read yields `None` (name) or zero (counters) and is dropped from the
/// current tick. Only `send_sigterm` surfaces an error, which the session
/// loop reports as a status line.
pub trait ProcSource {
    fn pids(&self) -> Vec<u32>;

    /// `None` when the name cannot be read anymore.
    fn process_name(&self, pid: u32) -> Option<String>;

    /// Cumulative CPU time consumed by the process, in clock ticks.
    fn process_cpu_ticks(&self, pid: u32) -> u64;

    fn process_resident_kb(&self, pid: u32) -> f64;

    fn system_cpu_ticks(&self) -> CpuTicks;

    fn system_memory_kb(&self) -> MemoryKb;

    fn send_sigterm(&self, pid: u32) -> io::Result<()>;
}

impl<S: ProcSource> ProcSource for &S {
    fn pids(&self) -> Vec<u32> {
        (**self).pids()
    }

    fn process_name(&self, pid: u32) -> Option<String> {
        (**self).process_name(pid)
    }

    fn process_cpu_ticks(&self, pid: u32) -> u64 {
        (**self).process_cpu_ticks(pid)
    }

    fn process_resident_kb(&self, pid: u32) -> f64 {
        (**self).process_resident_kb(pid)
    }

    fn system_cpu_ticks(&self) -> CpuTicks {
        (**self).system_cpu_ticks()
    }

    fn system_memory_kb(&self) -> MemoryKb {
        (**self).system_memory_kb()
    }

    fn send_sigterm(&self, pid: u32) -> io::Result<()> {
        (**self).send_sigterm(pid)
    }
}
