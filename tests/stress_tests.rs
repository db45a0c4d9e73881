//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - No message is lost or interleaved when many threads share a logger
//! - Async dispatch keeps each thread's order under load
//! - Muting state stays consistent with concurrent callers

mod common;

use common::SharedBuf;
use rust_frame_logger::prelude::*;
use rust_frame_logger::codec;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const PER_THREAD: usize = 500;

fn spawn_writers(logger: &Arc<Logger>) {
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.log(LogLevel::Info, &format!("t{}", t), format!("{}", i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("writer thread panicked");
    }
}

/// Each group's messages must appear once each, in increasing order
fn assert_per_thread_order(messages: &[LogMessage]) {
    let mut next: HashMap<&str, usize> = HashMap::new();
    for msg in messages {
        let expected = next.entry(msg.group.as_str()).or_insert(0);
        assert_eq!(msg.message, expected.to_string(), "group {}", msg.group);
        *expected += 1;
    }
    assert_eq!(next.len(), THREADS);
    assert!(next.values().all(|&n| n == PER_THREAD));
}

fn decode_all(bytes: &[u8]) -> Vec<LogMessage> {
    let mut reader = bytes;
    let mut messages = Vec::new();
    while !reader.is_empty() {
        messages.push(codec::decode(&mut reader).expect("well-formed frame"));
    }
    messages
}

#[test]
fn test_concurrent_sync_logging() {
    let buf = SharedBuf::default();
    let logger = Arc::new(Logger::new(Sink::bytes(buf.clone()), false));
    logger.set_mute(0);

    spawn_writers(&logger);

    let messages = decode_all(&buf.contents());
    assert_eq!(messages.len(), THREADS * PER_THREAD);
    assert_per_thread_order(&messages);
    assert_eq!(logger.metrics().written_count(), (THREADS * PER_THREAD) as u64);
}

#[test]
fn test_concurrent_async_logging() {
    let buf = SharedBuf::default();
    let logger = Arc::new(
        Logger::builder()
            .output(Sink::bytes(buf.clone()))
            .async_mode(true)
            .mute(0)
            .build(),
    );

    spawn_writers(&logger);
    logger.flush().expect("flush");

    let messages = decode_all(&buf.contents());
    assert_eq!(messages.len(), THREADS * PER_THREAD);
    assert_per_thread_order(&messages);
}

#[test]
fn test_concurrent_text_lines_not_interleaved() {
    let buf = SharedBuf::default();
    let logger = Arc::new(Logger::new(Writer::text(buf.clone()), true));
    logger.set_mute(0);

    spawn_writers(&logger);

    let out = buf.text();
    assert_eq!(out.lines().count(), THREADS * PER_THREAD);
    assert!(out
        .lines()
        .all(|line| line.contains("[INFO ] [t") && line.contains("stress_tests.rs:")));
}

#[test]
fn test_muting_under_contention() {
    let buf = SharedBuf::default();
    let logger = Arc::new(Logger::new(Writer::text(buf.clone()), false));
    logger.set_mute(2);

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    logger.warn("heartbeat missed");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("writer thread panicked");
    }

    // Identical messages from every thread: only the first is written.
    assert_eq!(buf.text().lines().count(), 1);
    let metrics = logger.metrics();
    assert_eq!(metrics.written_count(), 1);
    assert_eq!(metrics.muted_count(), (THREADS * PER_THREAD - 1) as u64);
}

#[test]
fn test_level_changes_while_logging() {
    let buf = SharedBuf::default();
    let logger = Arc::new(Logger::new(Sink::bytes(buf.clone()), false));
    logger.set_mute(0);

    let toggler = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for i in 0..1000 {
                let level = if i % 2 == 0 { LogLevel::Error } else { LogLevel::Debug };
                logger.set_level(level);
            }
        })
    };
    spawn_writers(&logger);
    toggler.join().expect("toggler panicked");

    let metrics = logger.metrics();
    let written = decode_all(&buf.contents()).len() as u64;
    assert_eq!(written, metrics.written_count());
    assert_eq!(
        metrics.written_count() + metrics.filtered_count(),
        (THREADS * PER_THREAD) as u64
    );
}
