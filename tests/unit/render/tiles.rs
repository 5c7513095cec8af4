use super::*;

#[test]
fn cancel_token_is_shared_between_clones() {
    let a = CancelToken::new();
    let b = a.clone();
    assert!(!b.is_cancelled());
    a.cancel();
    assert!(b.is_cancelled());
    b.reset();
    assert!(!a.is_cancelled());
}

#[test]
fn never_cancel_never_fires() {
    assert!(!NeverCancel.is_cancelled());
}

#[test]
fn stats_record_outcomes() {
    let mut stats = RenderStats::default();
    stats.record(TileOutcome::Completed);
    stats.record(TileOutcome::Cancelled { rows_written: 3 });
    stats.record(TileOutcome::Completed);
    assert_eq!(
        stats,
        RenderStats {
            tiles_total: 3,
            tiles_completed: 2,
            tiles_cancelled: 1,
        }
    );
    assert!(stats.was_cancelled());
}

#[test]
fn zero_threads_is_rejected() {
    let err = build_thread_pool(Some(0)).unwrap_err();
    assert!(err.to_string().contains("threads"));
    assert!(build_thread_pool(Some(2)).is_ok());
}

#[test]
fn pool_cache_reuses_pool_for_same_thread_count() {
    let cache = ThreadPoolCache::default();
    let a = cache.get(Some(2)).unwrap();
    let b = cache.get(Some(2)).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.current_num_threads(), 2);

    let c = cache.get(Some(3)).unwrap();
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(c.current_num_threads(), 3);
    assert!(Arc::ptr_eq(&c, &cache.get(Some(3)).unwrap()));

    assert!(cache.get(Some(0)).is_err());
    assert!(Arc::ptr_eq(&c, &cache.get(Some(3)).unwrap()));
}
