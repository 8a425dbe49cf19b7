use folio_contact::client::{RetryPolicy, Transient, retry_with_backoff};
use std::cell::Cell;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug)]
struct Flaky(bool);

impl std::fmt::Display for Flaky {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(if self.0 { "flaky" } else { "broken" })
    }
}

impl Transient for Flaky {
    fn is_transient(&self) -> bool {
        self.0
    }
}

#[tokio::test(start_paused = true)]
async fn exhausts_default_schedule() {
    let calls = Cell::new(0u32);
    let mut seen = Vec::new();
    let started = Instant::now();

    let result: Result<(), Flaky> = retry_with_backoff(
        &RetryPolicy::default(),
        || {
            calls.set(calls.get() + 1);
            async { Err(Flaky(true)) }
        },
        |event| seen.push((event.attempt, event.delay.as_millis())),
    )
    .await;

    assert!(result.is_err());
    assert_eq!(calls.get(), 6);
    assert_eq!(seen, vec![(1, 2000), (2, 3000), (3, 4500), (4, 6750), (5, 10_000)]);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(26_250), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(26_300), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn permanent_error_stops_immediately() {
    let calls = Cell::new(0u32);
    let mut retries = 0;
    let started = Instant::now();

    let result: Result<(), Flaky> = retry_with_backoff(
        &RetryPolicy::default(),
        || {
            calls.set(calls.get() + 1);
            async { Err(Flaky(false)) }
        },
        |_| retries += 1,
    )
    .await;

    assert!(result.is_err());
    assert_eq!(calls.get(), 1);
    assert_eq!(retries, 0);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn succeeds_after_transient_failures() {
    let calls = Cell::new(0u32);

    let result = retry_with_backoff(
        &RetryPolicy::default(),
        || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move { if n < 3 { Err(Flaky(true)) } else { Ok(n) } }
        },
        |_| {},
    )
    .await;

    assert_eq!(result.ok(), Some(3));
}

#[tokio::test(start_paused = true)]
async fn dropping_the_future_cancels_pending_retries() {
    let calls = Cell::new(0u32);

    let sequence = retry_with_backoff(
        &RetryPolicy::default(),
        || {
            calls.set(calls.get() + 1);
            async { Err::<(), _>(Flaky(true)) }
        },
        |_| {},
    );

    // Long enough for attempts 1 and 2 (2 s wait), too short for attempt 3 (another 3 s).
    let outcome = tokio::time::timeout(Duration::from_secs(4), sequence).await;

    assert!(outcome.is_err());
    assert_eq!(calls.get(), 2);

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(calls.get(), 2);
}
