use std::fs;
use std::path::Path;

use rustc_hash::FxHashSet;

use super::job::Job;
use crate::error::{Result, SimError};

/// Reads a workload file. See [`parse_workload`] for the format.
pub fn load_workload(path: impl AsRef<Path>) -> Result<Vec<Job>> {
    let text = fs::read_to_string(path)?;
    parse_workload(&text)
}

/// One `pid:arrival:service:priority` line per process. Blank lines and `#`
/// comments are skipped. The result is sorted by pid and validated.
pub fn parse_workload(text: &str) -> Result<Vec<Job>> {
    let mut jobs = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let job = line.parse::<Job>().map_err(|reason| SimError::Parse {
            line: idx + 1,
            reason,
        })?;
        jobs.push(job);
    }

    jobs.sort_by_key(|job| job.pid);
    validate(&jobs)?;
    Ok(jobs)
}

/// Rejects zero service times and duplicate pids.
pub fn validate(jobs: &[Job]) -> Result<()> {
    let mut seen = FxHashSet::default();
    for job in jobs {
        if job.service_time == 0 {
            return Err(SimError::ZeroServiceTime { pid: job.pid });
        }
        if !seen.insert(job.pid) {
            return Err(SimError::DuplicatePid { pid: job.pid });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_by_pid_and_skips_comments() {
        let text = "# pid:arrival:service:priority\n3:0:4:1\n\n1:2:6:0\n2:1:1:5\n";
        let pids: Vec<_> = parse_workload(text).unwrap().iter().map(|j| j.pid).collect();
        assert_eq!(pids, vec![1, 2, 3]);
    }

    #[test]
    fn reports_line_of_bad_entry() {
        let err = parse_workload("1:0:4:0\n2:x:4:0\n").unwrap_err();
        assert!(matches!(err, SimError::Parse { line: 2, .. }));
    }

    #[test]
    fn rejects_zero_service_and_duplicates() {
        assert!(matches!(
            parse_workload("1:0:0:0"),
            Err(SimError::ZeroServiceTime { pid: 1 })
        ));
        assert!(matches!(
            parse_workload("4:0:3:0\n4:5:3:0"),
            Err(SimError::DuplicatePid { pid: 4 })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_workload("/nonexistent/workload.txt").unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}
