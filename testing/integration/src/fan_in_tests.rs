//! N:1 composition: no loss, no premature completion, fault aggregation.

use crate::common::{emitted_by, feed_source, labeled, Recorder};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::{timeout, Duration};
use weir_core::block::{Block, DynPropagator, DynSource, Target};
use weir_core::error::Error;
use weir_core::options::BlockOptions;
use weir_engine::transform::TransformBlock;
use weir_flow::fan_in::{merge, merge_through};
use weir_flow::link::LinkConfig;

/// The distilled scenario: two sources, three items each, one accumulating
/// consumer; the union must hold all six items with per-source order
/// preserved, and the composite settles only after both sources have.
#[tokio::test]
async fn two_sources_drain_into_one_consumer_without_loss() {
    let (first, first_source) = feed_source(labeled("first", 3)).await;
    let (second, second_source) = feed_source(labeled("second", 3)).await;
    let recorder = Recorder::new();
    let flow = merge(vec![first_source, second_source], LinkConfig::to(recorder.target())).unwrap();

    first.complete();
    second.complete();
    flow.completion().await.unwrap();

    let seen = recorder.seen();
    assert_eq!(seen.len(), 6, "the consumer must hold the full union, not one source's share");
    assert_eq!(seen.iter().collect::<HashSet<_>>().len(), 6);
    assert_eq!(emitted_by(&seen, "first"), labeled("first", 3));
    assert_eq!(emitted_by(&seen, "second"), labeled("second", 3));
}

#[tokio::test]
async fn no_loss_across_many_sources() {
    let mut handles = Vec::new();
    let mut sources: Vec<DynSource<String>> = Vec::new();
    for i in 0..5 {
        let (handle, source) = feed_source(labeled(&format!("s{i}"), 10)).await;
        handles.push(handle);
        sources.push(source);
    }
    let recorder = Recorder::new();
    let flow = merge(sources, LinkConfig::to(recorder.target())).unwrap();

    flow.complete();
    flow.completion().await.unwrap();
    assert_eq!(recorder.count(), 50);
}

#[tokio::test]
async fn completion_waits_for_the_source_held_open() {
    let (fast, fast_source) = feed_source(labeled("fast", 1)).await;
    let (slow, slow_source) = feed_source::<String>(Vec::new()).await;
    let recorder = Recorder::new();
    let flow = merge(vec![fast_source, slow_source], LinkConfig::to(recorder.target())).unwrap();

    fast.complete();
    fast.completion().await.unwrap();
    let premature = timeout(Duration::from_millis(30), flow.completion()).await;
    assert!(premature.is_err(), "one settled source must not complete the union");

    slow.post("slow-0".to_string()).await.unwrap();
    slow.complete();
    flow.completion().await.unwrap();
    assert_eq!(recorder.count(), 2, "the late item still arrived");
}

#[tokio::test]
async fn one_faulted_source_poisons_the_union_after_all_settle() {
    let (healthy, healthy_source) = feed_source(labeled("ok", 2)).await;
    let (broken, broken_source) = feed_source::<String>(Vec::new()).await;
    let recorder = Recorder::new();
    let flow =
        merge(vec![healthy_source, broken_source], LinkConfig::to(recorder.target())).unwrap();

    broken.fault(Error::General("source died".into()));
    healthy.complete();
    let outcome = flow.completion().await;
    assert!(matches!(outcome, Err(Error::General(_))));
    assert!(matches!(recorder.block().completion().await, Err(Error::General(_))));
    assert_eq!(recorder.count(), 2, "messages of the healthy source are not retroactively discarded");
}

#[tokio::test]
async fn composite_shutdown_reaches_every_source() {
    let (first, first_source) = feed_source(labeled("a", 1)).await;
    let (second, second_source) = feed_source(labeled("b", 1)).await;
    let recorder = Recorder::new();
    let flow = merge(vec![first_source, second_source], LinkConfig::to(recorder.target())).unwrap();

    flow.complete();
    flow.completion().await.unwrap();
    first.completion().await.unwrap();
    second.completion().await.unwrap();
    assert_eq!(recorder.count(), 2);
}

#[tokio::test]
async fn merged_sources_stay_linkable_through_a_propagator() {
    let (first, first_source) = feed_source(vec![1u32, 2]).await;
    let (second, second_source) = feed_source(vec![10u32, 20]).await;
    let stamp: DynPropagator<u32, u32> =
        Arc::new(TransformBlock::new(BlockOptions::default(), |item: u32| Ok(item + 100)));
    let staged = Arc::new(
        merge_through(vec![first_source, second_source], stamp, LinkConfig::default()).unwrap(),
    );

    let recorder = Recorder::new();
    let staged_source: DynSource<u32> = staged.clone();
    let flow = weir_flow::edge::chain(staged_source, LinkConfig::to(recorder.target())).unwrap();

    first.complete();
    second.complete();
    flow.completion().await.unwrap();

    let mut seen = recorder.seen();
    seen.sort_unstable();
    assert_eq!(seen, vec![101, 102, 110, 120]);
}
