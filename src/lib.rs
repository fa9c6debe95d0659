//! Steam review scraper.
//! Pages through the store `appreviews` endpoint for a list of app ids
//! and dumps every review into a single CSV file.

mod error;
mod macros;
pub mod parse;
pub mod process;
pub mod request;
pub mod writer;

pub use error::{Error, Result};
#[doc(hidden)]
pub use macros::elapsed_since;
pub use parse::ReviewRow;
pub use process::{fetch_reviews, scrape_apps, FetchOptions};
pub use request::{PageSource, SteamClient};

pub const STEAM_STORE_URL: &str = "https://store.steampowered.com";
/// Steam caps `num_per_page` at 100.
pub const PAGE_SIZE: usize = 100;
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
/// Cursor value that asks for the first page.
pub const START_CURSOR: &str = "*";

pub const DEFAULT_LIMIT: i64 = 10_000;
pub const DEFAULT_RATE_DELAY_MS: u64 = 400;
pub const DEFAULT_JOBS: usize = 1;
pub const FILE_PATH: &str = "steam_reviews.csv";
