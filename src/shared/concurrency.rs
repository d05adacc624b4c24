use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use futures::future::try_join_all;

/// Apply an async transform to every item with at most `limit` calls in
/// flight, returning results in input order regardless of completion order.
///
/// A shared cursor hands out indices to `min(limit, items.len())` worker
/// futures driven concurrently inside the calling task; each worker claims
/// the next unclaimed index, runs the transform, and records the result
/// against that index. The first transform error aborts the remaining
/// workers and becomes the overall error; partial output is discarded.
pub async fn map_bounded<T, R, E, F, Fut>(
    items: Vec<T>,
    limit: usize,
    transform: F,
) -> Result<Vec<R>, E>
where
    F: Fn(usize, T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    let total = items.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let workers = limit.clamp(1, total);
    let cursor = AtomicUsize::new(0);
    let slots: Vec<Mutex<Option<T>>> = items.into_iter().map(|item| Mutex::new(Some(item))).collect();

    let cursor = &cursor;
    let slots = &slots;
    let transform = &transform;

    let produced = try_join_all((0..workers).map(|_| async move {
        let mut local: Vec<(usize, R)> = Vec::new();
        loop {
            let index = cursor.fetch_add(1, Ordering::Relaxed);
            if index >= total {
                break;
            }
            // Each index is claimed exactly once, so the slot lock is never
            // contended and the guard is released before the await.
            let item = match slots[index].lock() {
                Ok(mut slot) => slot.take(),
                Err(_) => None,
            };
            let Some(item) = item else { break };
            let value = transform(index, item).await?;
            local.push((index, value));
        }
        Ok::<_, E>(local)
    }))
    .await?;

    let mut indexed: Vec<(usize, R)> = produced.into_iter().flatten().collect();
    indexed.sort_unstable_by_key(|(index, _)| *index);
    Ok(indexed.into_iter().map(|(_, value)| value).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_output_order_is_input_order() {
        // Earlier items sleep longer, so completion order is reversed.
        let items: Vec<usize> = (0..20).collect();
        let result = map_bounded(items, 4, |index, item| async move {
            tokio::time::sleep(Duration::from_millis(100 - index as u64)).await;
            Ok::<_, ()>(item * 10)
        })
        .await
        .unwrap();

        assert_eq!(result, (0..20).map(|i| i * 10).collect::<Vec<_>>());
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_never_exceeds_limit() {
        static IN_FLIGHT: AtomicUsize = AtomicUsize::new(0);
        static HIGH_WATER: AtomicUsize = AtomicUsize::new(0);

        let items: Vec<usize> = (0..32).collect();
        map_bounded(items, 8, |_, item| async move {
            let now = IN_FLIGHT.fetch_add(1, Ordering::SeqCst) + 1;
            HIGH_WATER.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            IN_FLIGHT.fetch_sub(1, Ordering::SeqCst);
            Ok::<_, ()>(item)
        })
        .await
        .unwrap();

        let high_water = HIGH_WATER.load(Ordering::SeqCst);
        assert!(high_water <= 8, "saw {} transforms in flight", high_water);
        assert_eq!(high_water, 8, "workers did not run concurrently");
    }

    #[tokio::test]
    async fn test_first_error_propagates() {
        let items: Vec<usize> = (0..10).collect();
        let result = map_bounded(items, 3, |index, item| async move {
            if index == 4 {
                Err("transform failed")
            } else {
                Ok(item)
            }
        })
        .await;

        assert_eq!(result, Err("transform failed"));
    }

    #[test]
    fn test_empty_input() {
        let result = tokio_test::block_on(map_bounded(
            Vec::<u8>::new(),
            8,
            |_, item| async move { Ok::<_, ()>(item) },
        ));
        assert_eq!(result, Ok(Vec::new()));
    }

    #[test]
    fn test_limit_larger_than_input() {
        let result = tokio_test::block_on(map_bounded(vec![1, 2, 3], 100, |_, item| async move {
            Ok::<_, ()>(item + 1)
        }));
        assert_eq!(result, Ok(vec![2, 3, 4]));
    }

    #[tokio::test]
    async fn test_limit_one_is_sequential() {
        let order = std::sync::Arc::new(Mutex::new(Vec::new()));
        let seen = order.clone();
        let result = map_bounded(vec!["a", "b", "c"], 1, move |index, item| {
            let seen = seen.clone();
            async move {
                seen.lock().unwrap().push(index);
                Ok::<_, ()>(item)
            }
        })
        .await
        .unwrap();

        assert_eq!(result, vec!["a", "b", "c"]);
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }
}
