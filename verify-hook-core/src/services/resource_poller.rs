//! Bounded polling
//!
//! Lists a paginated source until an item matches, sleeping between full
//! listings. The deadline becomes an iteration budget of
//! `floor(deadline / interval)` sleeps.

use std::future::Future;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};
use crate::types::Page;

/// Polls a paginated source at a fixed interval.
#[derive(Debug, Clone, Copy)]
pub struct ResourcePoller {
    interval: Duration,
    deadline: Option<Duration>,
}

impl ResourcePoller {
    /// `deadline = None` polls until a match or an error.
    #[must_use]
    pub fn new(interval: Duration, deadline: Option<Duration>) -> Self {
        Self { interval, deadline }
    }

    /// Number of sleeps allowed before giving up, `None` when unbounded.
    pub fn budget(&self) -> Option<u64> {
        self.deadline.map(|deadline| {
            let interval = self.interval.as_millis().max(1);
            u64::try_from(deadline.as_millis() / interval).unwrap_or(u64::MAX)
        })
    }

    /// Returns the first item matching `predicate`.
    ///
    /// Each round drains every page of `fetch_page` (called with the previous
    /// page's token, `None` first) before testing the items. A fetch error ends
    /// the poll immediately.
    pub async fn poll_until_found<T, E, F, Fut, P>(
        &self,
        what: &str,
        mut fetch_page: F,
        predicate: P,
    ) -> CoreResult<T>
    where
        F: FnMut(Option<String>) -> Fut,
        Fut: Future<Output = Result<Page<T>, E>>,
        E: Into<CoreError>,
        P: Fn(&T) -> bool,
    {
        let mut budget = self.budget();
        let mut attempts: u64 = 0;

        loop {
            attempts += 1;

            let mut items = Vec::new();
            let mut token = None;
            loop {
                let page = fetch_page(token.take()).await.map_err(Into::into)?;
                items.extend(page.items);
                match page.next_token {
                    Some(next) => token = Some(next),
                    None => break,
                }
            }

            if let Some(found) = items.into_iter().find(|item| predicate(item)) {
                log::debug!("Found {what} after {attempts} lookup(s)");
                return Ok(found);
            }

            match budget.as_mut() {
                Some(0) => {
                    log::warn!("Gave up waiting for {what} after {attempts} lookup(s)");
                    return Err(CoreError::LookupTimedOut {
                        what: what.to_string(),
                        attempts,
                    });
                }
                Some(remaining) => *remaining -= 1,
                None => {}
            }

            log::debug!(
                "{what} not found yet (lookup {attempts}), retrying in {:.1}s",
                self.interval.as_secs_f32()
            );
            tokio::time::sleep(self.interval).await;
        }
    }
}
