use eyre::Result;
use regex::Regex;
use tracing::{debug, warn};

use crate::record::RecordSet;

pub const THREADS_PATTERN: &str = r"Gol/(\d+)x\d+x\d+-\d+-\d+";
pub const CPU_CORES_PATTERN: &str = r"Gol/\d+x\d+x\d+-(\d+)-\d+";

/// Pulls `threads` and `cpu_cores` out of benchmark names.
///
/// Both patterns are searched independently and unanchored. A name that does
/// not match (or whose capture does not fit a `u64`) yields `None` for that
/// field, never an error.
#[derive(Debug, Clone)]
pub struct ParamExtractor {
    threads: Regex,
    cpu_cores: Regex,
}

impl ParamExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            threads: Regex::new(THREADS_PATTERN)?,
            cpu_cores: Regex::new(CPU_CORES_PATTERN)?,
        })
    }

    /// Returns `(threads, cpu_cores)` for a benchmark name
    pub fn extract(&self, name: &str) -> (Option<u64>, Option<u64>) {
        (capture(&self.threads, name), capture(&self.cpu_cores, name))
    }

    /// Fills the derived columns of every record, `name` is left as is
    pub fn apply(&self, records: &mut RecordSet) {
        let mut unmatched = 0;
        for record in records.iter_mut() {
            let (threads, cpu_cores) = self.extract(&record.name);
            if threads.is_none() || cpu_cores.is_none() {
                unmatched += 1;
            }
            record.threads = threads;
            record.cpu_cores = cpu_cores;
        }
        if unmatched > 0 {
            warn!("{unmatched} benchmark names did not match, their threads/cores are missing");
        }
        debug!("Extracted parameters for {} records", records.len());
    }
}

fn capture(re: &Regex, name: &str) -> Option<u64> {
    re.captures(name)
        .and_then(|cap| cap.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
