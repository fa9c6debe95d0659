use chrono::{DateTime, Local};

/// Timestamped progress line on stdout, the scraper's only log sink.
/// Pass a start time first to get the elapsed seconds appended on a second line.
/// ```
/// use steam_reviews::info_time;
///
/// info_time!("app {}, page {}", 730, 2);
/// let started = chrono::Local::now();
/// info_time!(started, "app {} done", 730);
/// ```
#[macro_export]
macro_rules! info_time {
    ($strfm:literal $(,)? $($arg:expr),*) => {
        println!("{:<30} : {}", ::chrono::Local::now(), format!($strfm, $($arg),*))
    };
    ($since:expr, $strfm:literal $(,)? $($arg:expr),*) => {{
        let (now, secs) = $crate::elapsed_since($since);
        println!("{:<30} : {}\nRUNTIME: {} sec", now, format!($strfm, $($arg),*), secs);
    }};
}

/// Current local time and the seconds elapsed since `since`.
/// Falls back to zero if the span overflows microseconds.
#[doc(hidden)]
pub fn elapsed_since(since: DateTime<Local>) -> (DateTime<Local>, f64) {
    let now = Local::now();
    let secs = (now - since)
        .num_microseconds()
        .map(|n| n as f64 / 1_000_000.0)
        .unwrap_or(0.0);
    (now, secs)
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn elapsed_counts_from_start() {
        let since = Local::now() - Duration::milliseconds(1_500);
        let (now, secs) = elapsed_since(since);
        assert!(now > since);
        assert!((1.5..60.0).contains(&secs), "{secs}");
    }

    #[test]
    fn future_start_is_negative_not_zero() {
        let since = Local::now() + Duration::seconds(10);
        let (_, secs) = elapsed_since(since);
        assert!(secs < 0.0);
    }
}
