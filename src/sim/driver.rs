use log::{info, trace};

use super::{Algorithm, config::SimConfig, job::Job, report::Report, workload};
use crate::{
    core::{SchedCore, SchedEvent},
    error::Result,
    scheduler::{MlfqScheduler, RoundRobinScheduler, Scheduler, SjfScheduler},
};

pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    // Sorted by arrival, then pid
    jobs: Vec<Job>,
    job_cursor: usize,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(mut jobs: Vec<Job>, config: &SimConfig) -> Result<Self> {
        config.validate()?;
        workload::validate(&jobs)?;
        jobs.sort_by(|a, b| {
            a.arrival_time
                .cmp(&b.arrival_time)
                .then_with(|| a.pid.cmp(&b.pid))
        });

        Ok(Self {
            core: SchedCore::<S>::new(config, jobs.len()),
            jobs,
            job_cursor: 0,
        })
    }

    /// Admits this tick's arrivals and runs one tick.
    pub fn step(&mut self) -> Vec<SchedEvent> {
        let now = self.core.now();
        let mut events = self.handle_arrivals();
        let new_arrivals = events.len();
        events.extend(self.core.tick(new_arrivals));

        for event in &events {
            trace!("t={now} {event:?}");
        }
        events
    }

    fn handle_arrivals(&mut self) -> Vec<SchedEvent> {
        let now = self.core.now();
        let mut admitted = Vec::new();

        // Contiguous, since jobs are sorted by arrival
        while let Some(job) = self.jobs.get(self.job_cursor) {
            if job.arrival_time != now {
                debug_assert!(job.arrival_time > now, "Job {} missed its arrival", job.pid);
                break;
            }
            let task = self.core.admit(job.pid, job.arrival_time, job.service_time, job.priority);
            admitted.push(SchedEvent::Admitted { task });
            self.job_cursor += 1;
        }

        admitted
    }

    pub fn all_jobs_completed(&self) -> bool {
        self.core.completed() == self.jobs.len()
    }

    /// Steps until every process has completed.
    pub fn run(&mut self) -> Report {
        info!("simulating {} process(es)", self.jobs.len());
        while !self.all_jobs_completed() {
            self.step();
        }
        info!(
            "all processes completed after {} tick(s)",
            self.core.now()
        );
        self.report()
    }

    pub fn report(&self) -> Report {
        Report::new(&self.core.ctx, &self.core.stats)
    }
}

/// Runs `jobs` to completion under `algorithm`.
pub fn simulate(algorithm: Algorithm, jobs: Vec<Job>, config: &SimConfig) -> Result<Report> {
    info!("algorithm {algorithm}, seed {}", config.seed);
    let report = match algorithm {
        Algorithm::PreemptiveSjf => Sim::<SjfScheduler>::new(jobs, config)?.run(),
        Algorithm::RoundRobin => Sim::<RoundRobinScheduler>::new(jobs, config)?.run(),
        Algorithm::Mlfq => Sim::<MlfqScheduler>::new(jobs, config)?.run(),
    };
    Ok(report)
}
