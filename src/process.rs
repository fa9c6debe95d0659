use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tokio::{sync::Semaphore, task::JoinSet, time::sleep};

use crate::request::PageSource;
use crate::writer::write_rows;
use crate::{
    info_time, ReviewRow, Result, DEFAULT_JOBS, DEFAULT_LIMIT, DEFAULT_RATE_DELAY_MS, START_CURSOR,
};

/// Knobs for a scraping run. Every value is passed down explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Maximum reviews per app. Zero means nothing is requested.
    pub limit: usize,
    /// Pause between two requests for the same app.
    pub rate_delay: Duration,
    /// How many apps are fetched at the same time.
    pub jobs: usize,
}

impl FetchOptions {
    /// Takes the limit as a signed number, the way the command line does.
    /// Negative limits clamp to zero.
    pub fn new(limit: i64, rate_delay: Duration, jobs: usize) -> Self {
        FetchOptions {
            limit: usize::try_from(limit).unwrap_or(0),
            rate_delay,
            jobs: jobs.max(1),
        }
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchOptions::new(
            DEFAULT_LIMIT,
            Duration::from_millis(DEFAULT_RATE_DELAY_MS),
            DEFAULT_JOBS,
        )
    }
}

/// Scrapes every app in `apps` and writes all the rows to `outfile` at the end.
/// Returns the number of rows written.
pub async fn run<S>(source: &S, apps: &[u32], opts: &FetchOptions, outfile: &Path) -> Result<usize>
where
    S: PageSource + Clone + 'static,
{
    let start_time = Local::now();
    info_time!("Started scraping {} apps", apps.len());

    let rows = scrape_apps(source, apps, opts).await?;
    info_time!(start_time, "Finished fetching ALL apps.");

    let local_now = Local::now();
    let total = rows.len();
    let path = outfile.to_path_buf();
    tokio::task::spawn_blocking(move || write_rows(&rows, path)).await??;
    info_time!(local_now, "Done! Total rows written: {total}");
    info_time!("CSV saved to: {}", outfile.display());

    Ok(total)
}

/// Fetches every app and concatenates the results in the order of `apps`.
///
/// With `jobs == 1` apps are fetched one after the other.
/// Otherwise up to `jobs` apps are in flight at once, each on its own task,
/// and each task waits `rate_delay * jobs` between its requests so Steam sees
/// the same overall request rate as a sequential run.
/// Either way the first error aborts the whole run.
pub async fn scrape_apps<S>(source: &S, apps: &[u32], opts: &FetchOptions) -> Result<Vec<ReviewRow>>
where
    S: PageSource + Clone + 'static,
{
    if opts.jobs <= 1 || apps.len() <= 1 {
        let mut all_rows = Vec::new();
        for &app_id in apps {
            let app_rows = fetch_app(source, app_id, opts.limit, opts.rate_delay).await?;
            all_rows.extend(app_rows);
        }
        return Ok(all_rows);
    }

    let in_flight = opts.jobs.min(apps.len());
    let per_app_delay = pool_rate_delay(opts.rate_delay, in_flight);
    let permits = Arc::new(Semaphore::new(in_flight));
    let mut task_set = JoinSet::new();
    for (idx, &app_id) in apps.iter().enumerate() {
        task_set.spawn({
            let source = source.clone();
            let permits = Arc::clone(&permits);
            let (limit, rate_delay) = (opts.limit, per_app_delay);

            async move {
                let _permit = permits.acquire_owned().await?;
                let app_rows = fetch_app(&source, app_id, limit, rate_delay).await?;
                Ok::<_, crate::Error>((idx, app_rows))
            }
        });
    }

    // Slot per app so the output keeps the input order no matter who finishes first.
    let mut slots: Vec<Option<Vec<ReviewRow>>> = (0..apps.len()).map(|_| None).collect();
    // Returning early drops the set, which aborts whatever is still running.
    while let Some(task) = task_set.join_next().await {
        let (idx, app_rows) = task??;
        slots[idx] = Some(app_rows);
    }

    Ok(slots.into_iter().flatten().flatten().collect())
}

/// Delay each of `in_flight` workers waits between its own requests.
fn pool_rate_delay(rate_delay: Duration, in_flight: usize) -> Duration {
    rate_delay.saturating_mul(u32::try_from(in_flight).unwrap_or(u32::MAX))
}

/// `fetch_reviews` with the per-app progress lines around it.
async fn fetch_app<S: PageSource>(
    source: &S,
    app_id: u32,
    limit: usize,
    rate_delay: Duration,
) -> Result<Vec<ReviewRow>> {
    let start_time = Local::now();
    info_time!("Fetching up to {limit} reviews for app {app_id}");
    let app_rows = fetch_reviews(source, app_id, limit, rate_delay).await?;
    info_time!(start_time, "App {app_id}: retrieved {} rows", app_rows.len());
    Ok(app_rows)
}

/// Pages through the reviews of a single app until `limit` rows are collected
/// or Steam runs out of reviews.
///
/// A page with `success != 1` or without reviews ends the loop normally.
/// Any request error is returned as is and the rows gathered so far are dropped.
/// `rate_delay` is slept between two consecutive requests, never after the last one.
pub async fn fetch_reviews<S: PageSource>(
    source: &S,
    app_id: u32,
    limit: usize,
    rate_delay: Duration,
) -> Result<Vec<ReviewRow>> {
    let mut rows = Vec::new();
    let mut cursor = START_CURSOR.to_string();

    while rows.len() < limit {
        let page = source.request_page(app_id, &cursor).await?;
        if !page.is_success() || page.reviews.is_empty() {
            break;
        }

        let room = limit - rows.len();
        rows.extend(page.reviews.into_iter().take(room).map(ReviewRow::from));

        match page.cursor {
            Some(next) if rows.len() < limit => cursor = next,
            // Either full or Steam gave us nowhere to go.
            _ => break,
        }

        if !rate_delay.is_zero() {
            sleep(rate_delay).await;
        }
    }

    Ok(rows)
}
