use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::{network_status::NetworkStatusService, proxy::ProxyService},
    state::AppState,
};

/// Starts the network status scheduler
///
/// Two independent repeated jobs:
/// - the fleet cycle, every `poll_interval`
/// - the proxy refresh, every `proxy_interval`
///
/// A fleet tick that fires while the previous cycle is still running is dropped by the
/// cycle guard.
///
/// # Arguments
/// - `state`: Application state cloned into each job
///
/// # Returns
/// - `Ok(JobScheduler)` - Running scheduler; it stops when dropped together with its jobs
/// - `Err(AppError::SchedulerErr)` - Scheduler could not be created or started
pub async fn start_scheduler(state: AppState) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let fleet_state = state.clone();
    let fleet_job = Job::new_repeated_async(state.settings.poll_interval, move |_uuid, _lock| {
        let state = fleet_state.clone();

        Box::pin(async move {
            if let Err(e) = NetworkStatusService::new(&state).run_cycle().await {
                tracing::error!("Error updating network status: {}", e);
            }
        })
    })?;

    let proxy_state = state.clone();
    let proxy_job = Job::new_repeated_async(state.settings.proxy_interval, move |_uuid, _lock| {
        let state = proxy_state.clone();

        Box::pin(async move {
            ProxyService::new(&state).refresh().await;
        })
    })?;

    scheduler.add(proxy_job).await?;
    scheduler.add(fleet_job).await?;
    scheduler.start().await?;

    tracing::info!(
        "Network status scheduler started (fleet every {}s, proxies every {}s)",
        state.settings.poll_interval.as_secs(),
        state.settings.proxy_interval.as_secs()
    );

    Ok(scheduler)
}
