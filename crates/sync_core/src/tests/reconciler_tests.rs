use super::*;
use std::sync::{
    atomic::{AtomicBool, AtomicU32, Ordering},
    Arc, Mutex,
};

fn collector() -> (Arc<Mutex<Vec<u32>>>, impl FnMut(&u32) + Send + 'static) {
    let delivered = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&delivered);
    (delivered, move |view: &u32| {
        sink.lock().expect("sink lock").push(*view);
    })
}

#[tokio::test(start_paused = true)]
async fn initial_view_is_delivered_immediately() {
    let (delivered, on_change) = collector();
    let source = Arc::new(AtomicU32::new(7));
    let derive_source = Arc::clone(&source);

    let handle = spawn(
        move || {
            let source = Arc::clone(&derive_source);
            async move { Ok(source.load(Ordering::SeqCst)) }
        },
        on_change,
        Duration::from_secs(1),
    );

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(*delivered.lock().expect("sink lock"), vec![7]);
    handle.stop();
}

#[tokio::test(start_paused = true)]
async fn on_change_fires_once_per_distinct_view() {
    let (delivered, on_change) = collector();
    let source = Arc::new(AtomicU32::new(1));
    let derive_source = Arc::clone(&source);

    let handle = spawn(
        move || {
            let source = Arc::clone(&derive_source);
            async move { Ok(source.load(Ordering::SeqCst)) }
        },
        on_change,
        Duration::from_secs(1),
    );

    tokio::time::sleep(Duration::from_millis(10)).await;
    source.store(2, Ordering::SeqCst);
    // Several further ticks with an unchanged view must stay silent.
    tokio::time::sleep(Duration::from_secs(4)).await;

    assert_eq!(*delivered.lock().expect("sink lock"), vec![1, 2]);
    handle.stop();
}

#[tokio::test(start_paused = true)]
async fn failed_tick_retains_previous_view_and_recovers() {
    let (delivered, on_change) = collector();
    let source = Arc::new(AtomicU32::new(1));
    let failing = Arc::new(AtomicBool::new(false));
    let derive_source = Arc::clone(&source);
    let derive_failing = Arc::clone(&failing);

    let handle = spawn(
        move || {
            let source = Arc::clone(&derive_source);
            let failing = Arc::clone(&derive_failing);
            async move {
                if failing.load(Ordering::SeqCst) {
                    anyhow::bail!("stored value unreadable");
                }
                Ok(source.load(Ordering::SeqCst))
            }
        },
        on_change,
        Duration::from_secs(1),
    );

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(*delivered.lock().expect("sink lock"), vec![1]);

    // A bad read must not stop polling or emit a value.
    failing.store(true, Ordering::SeqCst);
    source.store(2, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(*delivered.lock().expect("sink lock"), vec![1]);

    failing.store(false, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(*delivered.lock().expect("sink lock"), vec![1, 2]);

    handle.stop();
}

#[tokio::test(start_paused = true)]
async fn stop_halts_all_future_deliveries() {
    let (delivered, on_change) = collector();
    let source = Arc::new(AtomicU32::new(1));
    let derive_source = Arc::clone(&source);

    let handle = spawn(
        move || {
            let source = Arc::clone(&derive_source);
            async move { Ok(source.load(Ordering::SeqCst)) }
        },
        on_change,
        Duration::from_secs(1),
    );

    tokio::time::sleep(Duration::from_millis(10)).await;
    handle.stop();
    // stop is idempotent.
    handle.stop();

    source.store(99, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(*delivered.lock().expect("sink lock"), vec![1]);
}
