//! Check command implementation.

use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::workspace::Workspace;
use brandgraph_auditor::{AuditWorker, ConsistencyChecker};
use std::time::Duration;

/// Execute the check command.
///
/// Without `--cycles` a single check runs inline. With it, the audit
/// worker re-runs the check on its interval and the last report is shown
/// together with the accumulated metrics.
pub async fn execute_check(
    args: CheckArgs,
    workspace: &Workspace,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let Some(cycles) = args.cycles else {
        let report = ConsistencyChecker::new(&workspace.store, &workspace.registry)
            .with_config(config.audit.clone())
            .with_anchors(config.anchors.clone())
            .check();
        println!("{}", formatter.format_report(&report)?);
        return Ok(());
    };

    let mut worker = AuditWorker::new(config.audit.clone())?.with_anchors(config.anchors.clone());
    if let Some(secs) = args.every {
        worker = worker.with_interval(Duration::from_secs(secs))?;
    }

    match worker
        .run_cycles(&workspace.store, &workspace.registry, cycles)
        .await?
    {
        Some(report) => {
            println!("{}", formatter.format_report(&report)?);
            eprintln!("{}", worker.metrics().summary());
        }
        None => println!("{}", formatter.info("No checks were run")),
    }
    Ok(())
}
