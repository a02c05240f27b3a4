//! Background worker for consistency checks
//!
//! Checks are pure reads, so running one on a background task only moves
//! the work off the caller's thread. Completion is delivered through the
//! returned future; nothing sleeps to simulate progress.

use crate::{AuditConfig, AuditError, AuditMetrics, ConsistencyChecker, ConsistencyReport};
use brandgraph_domain::{AnchorRules, EntityRegistry, RelationshipStore};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::{interval, Duration};

/// Background worker that runs consistency checks on a schedule
///
/// # Examples
///
/// ```no_run
/// use brandgraph_auditor::{AuditConfig, AuditWorker};
/// use brandgraph_domain::EntityRegistry;
/// use brandgraph_store::SharedRelationshipStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = SharedRelationshipStore::default();
///     let registry = EntityRegistry::default();
///     let mut worker = AuditWorker::new(AuditConfig::default())?;
///
///     // Run indefinitely (until Ctrl+C)
///     worker.run(&store, &registry).await?;
///     Ok(())
/// }
/// ```
pub struct AuditWorker {
    config: AuditConfig,
    anchors: AnchorRules,
    metrics: AuditMetrics,
    interval: Duration,
}

impl AuditWorker {
    /// Create a worker, validating the configuration
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Config`] if the configuration is invalid.
    pub fn new(config: AuditConfig) -> Result<Self, AuditError> {
        config.validate()?;
        let interval = config.check_interval();
        Ok(Self {
            config,
            anchors: AnchorRules::default(),
            metrics: AuditMetrics::new(),
            interval,
        })
    }

    /// Use custom anchor rules
    pub fn with_anchors(mut self, anchors: AnchorRules) -> Self {
        self.anchors = anchors;
        self
    }

    /// Override the scheduling interval
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Config`] for a zero interval.
    pub fn with_interval(mut self, interval: Duration) -> Result<Self, AuditError> {
        if interval.is_zero() {
            return Err(AuditError::Config("interval must be non-zero".to_string()));
        }
        self.interval = interval;
        Ok(self)
    }

    /// Run a single check now and record it
    pub fn check_once<S: RelationshipStore>(
        &mut self,
        store: &S,
        registry: &EntityRegistry,
    ) -> ConsistencyReport {
        let start = Instant::now();
        let report = ConsistencyChecker::new(store, registry)
            .with_config(self.config.clone())
            .with_anchors(self.anchors.clone())
            .check();
        self.metrics.total_runtime_ms += start.elapsed().as_millis() as u64;
        self.metrics.record_check(&report);
        report
    }

    /// Run one check on a blocking task and deliver the report via a future
    ///
    /// The store is moved into the task; pass a clone of a shared store
    /// or an owned snapshot.
    pub fn spawn_check<S>(
        &self,
        store: S,
        registry: Arc<EntityRegistry>,
    ) -> impl Future<Output = Result<ConsistencyReport, AuditError>>
    where
        S: RelationshipStore + Send + 'static,
    {
        let config = self.config.clone();
        let anchors = self.anchors.clone();
        let handle = tokio::task::spawn_blocking(move || {
            ConsistencyChecker::new(&store, &registry)
                .with_config(config)
                .with_anchors(anchors)
                .check()
        });
        async move { handle.await.map_err(|e| AuditError::Worker(e.to_string())) }
    }

    /// Run the worker until a shutdown signal (Ctrl+C) is received
    ///
    /// # Errors
    ///
    /// Currently infallible once started; the `Result` mirrors
    /// [`AuditWorker::run_cycles`].
    pub async fn run<S: RelationshipStore>(
        &mut self,
        store: &S,
        registry: &EntityRegistry,
    ) -> Result<(), AuditError> {
        let mut ticker = interval(self.interval);

        tracing::info!("Audit worker started (interval: {:?})", self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let report = self.check_once(store, registry);
                    tracing::info!(
                        "Check completed: score {}, {} issues",
                        report.overall_score,
                        report.total_issues
                    );
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received, stopping audit worker");
                    break;
                }
            }
        }

        tracing::info!("Audit worker stopped. Final metrics:\n{}", self.metrics.summary());
        Ok(())
    }

    /// Run for a specific number of cycles, returning the last report
    pub async fn run_cycles<S: RelationshipStore>(
        &mut self,
        store: &S,
        registry: &EntityRegistry,
        cycles: usize,
    ) -> Result<Option<ConsistencyReport>, AuditError> {
        let mut ticker = interval(self.interval);
        let mut last = None;

        tracing::info!(
            "Audit worker started for {} cycles (interval: {:?})",
            cycles,
            self.interval
        );

        for cycle in 0..cycles {
            ticker.tick().await;
            let report = self.check_once(store, registry);
            tracing::info!(
                "Check {}/{} completed: score {}, {} issues",
                cycle + 1,
                cycles,
                report.overall_score,
                report.total_issues
            );
            last = Some(report);
        }

        tracing::info!(
            "Audit worker finished {} cycles. Final metrics:\n{}",
            cycles,
            self.metrics.summary()
        );

        Ok(last)
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &AuditMetrics {
        &self.metrics
    }

    /// Reset the metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}
