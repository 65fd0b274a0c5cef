use std::io;

use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;

use super::source::{CpuTicks, MemoryKb, ProcSource};

/// `ProcSource` backed by the Linux procfs.
pub struct ProcfsSource {
    page_kb: u64,
}

impl Default for ProcfsSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcfsSource {
    pub fn new() -> Self {
        let page_kb = nix::unistd::sysconf(nix::unistd::SysconfVar::PAGE_SIZE)
            .ok()
            .flatten()
            .map(|size| size as u64 / 1024)
            .filter(|&kb| kb > 0)
            .unwrap_or(4);
        ProcfsSource { page_kb }
    }
}

impl ProcSource for ProcfsSource {
    fn pids(&self) -> Vec<u32> {
        let entries = match std::fs::read_dir("/proc") {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };
        let mut pids: Vec<u32> = entries
            .flatten()
            .filter_map(|entry| entry.file_name().to_str()?.parse().ok())
            .collect();
        pids.sort_unstable();
        pids
    }

    fn process_name(&self, pid: u32) -> Option<String> {
        let raw = std::fs::read_to_string(format!("/proc/{pid}/comm")).ok()?;
        let name = raw.trim_end_matches(['\n', '\r']);
        if name.is_empty() {
            // Readable but blank comm: fall back to the pid itself.
            Some(pid.to_string())
        } else {
            Some(name.to_string())
        }
    }

    fn process_cpu_ticks(&self, pid: u32) -> u64 {
        std::fs::read_to_string(format!("/proc/{pid}/stat"))
            .ok()
            .and_then(|contents| parse_stat_ticks(&contents))
            .unwrap_or(0)
    }

    fn process_resident_kb(&self, pid: u32) -> f64 {
        let contents = match std::fs::read_to_string(format!("/proc/{pid}/statm")) {
            Ok(contents) => contents,
            Err(_) => return 0.0,
        };
        parse_statm_resident_pages(&contents)
            .map(|pages| pages as f64 * self.page_kb as f64)
            .unwrap_or(0.0)
    }

    fn system_cpu_ticks(&self) -> CpuTicks {
        std::fs::read_to_string("/proc/stat")
            .ok()
            .and_then(|contents| parse_system_ticks(&contents))
            .unwrap_or_default()
    }

    fn system_memory_kb(&self) -> MemoryKb {
        std::fs::read_to_string("/proc/meminfo")
            .ok()
            .map(|contents| parse_meminfo(&contents))
            .unwrap_or_default()
    }

    fn send_sigterm(&self, pid: u32) -> io::Result<()> {
        kill(Pid::from_raw(pid as i32), Signal::SIGTERM)
            .map_err(|errno| io::Error::from_raw_os_error(errno as i32))
    }
}

/// Sum of utime and stime from `/proc/<pid>/stat`. The comm field may
/// contain spaces and parens, so fields are counted after the last `)`.
fn parse_stat_ticks(contents: &str) -> Option<u64> {
    let after_comm = contents.rfind(')')? + 1;
    let mut fields = contents[after_comm..].split_whitespace();
    // Fields after comm: state(0) ppid(1) pgrp(2) session(3) tty_nr(4)
    // tpgid(5) flags(6) minflt(7) cminflt(8) majflt(9) cmajflt(10)
    // utime(11) stime(12)
    let utime: u64 = fields.nth(11)?.parse().ok()?;
    let stime: u64 = fields.next()?.parse().ok()?;
    Some(utime + stime)
}

/// First field of `/proc/<pid>/statm` is total program size; resident set
/// size is the second, in pages.
fn parse_statm_resident_pages(contents: &str) -> Option<u64> {
    contents.split_whitespace().nth(1)?.parse().ok()
}

/// Aggregate `cpu` line of `/proc/stat`: user nice system idle iowait irq
/// softirq steal. Total is the sum of all eight; idle counts idle + iowait.
fn parse_system_ticks(contents: &str) -> Option<CpuTicks> {
    let line = contents.lines().next()?;
    let rest = line.strip_prefix("cpu")?;
    let fields: Vec<u64> = rest
        .split_whitespace()
        .take(8)
        .map(|tok| tok.parse().ok())
        .collect::<Option<Vec<u64>>>()?;
    if fields.len() < 8 {
        return None;
    }
    Some(CpuTicks {
        total: fields.iter().sum(),
        idle: fields[3] + fields[4],
    })
}

fn parse_meminfo(contents: &str) -> MemoryKb {
    let mut mem = MemoryKb::default();
    for line in contents.lines() {
        if let Some(rest) = line.strip_prefix("MemTotal:") {
            mem.total = parse_meminfo_kb(rest);
        } else if let Some(rest) = line.strip_prefix("MemAvailable:") {
            mem.available = parse_meminfo_kb(rest);
        }
        if mem.total > 0 && mem.available > 0 {
            break;
        }
    }
    mem
}

fn parse_meminfo_kb(rest: &str) -> u64 {
    rest.split_whitespace()
        .next()
        .and_then(|tok| tok.parse().ok())
        .unwrap_or(0)
}
