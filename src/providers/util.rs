use anyhow::Error;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Retries an async request while it fails at the transport level.
///
/// `retries` counts extra attempts after the first one; `delay_ms` is the
/// pause between attempts. The last error is returned once all are spent.
pub async fn with_retry<F, Fut, T, E>(mut operation: F, retries: usize, delay_ms: u64) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<Error>,
{
    let mut attempt = 1;
    loop {
        match operation().await.map_err(Into::into) {
            Ok(val) => return Ok(val),
            Err(err) => {
                if attempt > retries {
                    return Err(err);
                }
                debug!(
                    "Attempt {}/{} failed: {}. Retrying...",
                    attempt, retries, err
                );
                attempt += 1;
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_retry_until_success() {
        let calls = AtomicUsize::new(0);
        let calls = &calls;
        let result = with_retry(
            || async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(anyhow!("connection reset"))
                } else {
                    Ok(7)
                }
            },
            3,
            1,
        )
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up() {
        let calls = AtomicUsize::new(0);
        let calls = &calls;
        let result: Result<(), Error> = with_retry(
            || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(anyhow!("connection refused"))
            },
            2,
            1,
        )
        .await;

        assert!(result.unwrap_err().to_string().contains("connection refused"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
