use super::*;

#[test]
fn default_is_sequential() {
    let t = Threading::default();
    assert!(!t.parallel);
    assert_eq!(t, Threading::sequential());
    assert!(Threading::parallel(Some(2)).parallel);
}

#[test]
fn zero_threads_is_rejected() {
    assert!(matches!(
        build_thread_pool(Some(0)),
        Err(ConvertError::InvalidConfig(_))
    ));
    let pool = build_thread_pool(Some(2)).unwrap();
    assert_eq!(pool.current_num_threads(), 2);
}

#[test]
fn chunk_size_is_at_least_one() {
    assert_eq!(normalized_chunk_size(0), 1);
    assert_eq!(normalized_chunk_size(8), 8);
}
