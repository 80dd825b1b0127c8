//! Concurrency stress tests
//!
//! These tests verify:
//! - Concurrent create_logger calls agree on one router per category
//! - Concurrent logging through a shared router loses no messages
//! - add_provider racing with logging leaves every router fully bound

use rust_log_router::prelude::*;
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;
const MESSAGES_PER_THREAD: usize = 500;

#[test]
fn test_concurrent_create_logger_identity() {
    let memory = Arc::new(MemoryProvider::new(1).unwrap());
    let factory = Arc::new(LoggerFactory::builder().provider(memory).build());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let factory = Arc::clone(&factory);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..20)
                    .map(|i| Arc::as_ptr(&factory.create_logger(&format!("cat{}", i))) as usize)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<Vec<usize>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for result in &results[1..] {
        assert_eq!(result, &results[0]);
    }
    assert_eq!(factory.logger_count(), 20);
}

#[test]
fn test_concurrent_logging_delivers_everything() {
    let total = THREADS * MESSAGES_PER_THREAD;
    let memory = Arc::new(MemoryProvider::new(total).unwrap());
    let factory = LoggerFactory::builder().provider(memory.clone()).build();
    let logger = factory.create_logger("stress");

    thread::scope(|s| {
        for t in 0..THREADS {
            let logger = Arc::clone(&logger);
            s.spawn(move || {
                for i in 0..MESSAGES_PER_THREAD {
                    logger.info(format!("t{} m{}", t, i));
                }
            });
        }
    });

    let lines = memory.drain();
    assert_eq!(lines.len(), total);
    let unique: HashSet<_> = lines.iter().collect();
    assert_eq!(unique.len(), total);
    assert_eq!(logger.metrics().delivered(), total as u64);
}

#[test]
fn test_add_provider_while_logging() {
    let factory = Arc::new(LoggerFactory::new());
    let categories: Vec<String> = (0..10).map(|i| format!("cat{}", i)).collect();
    for category in &categories {
        factory.create_logger(category);
    }

    let late: Vec<Arc<MemoryProvider>> = (0..4)
        .map(|_| Arc::new(MemoryProvider::new(10_000).unwrap()))
        .collect();

    thread::scope(|s| {
        for category in &categories {
            let factory = Arc::clone(&factory);
            s.spawn(move || {
                let logger = factory.create_logger(category);
                for i in 0..200 {
                    logger.debug(format!("{}", i));
                }
            });
        }

        let factory = Arc::clone(&factory);
        let late = late.clone();
        s.spawn(move || {
            for provider in late {
                factory.add_provider(provider);
            }
        });
    });

    assert_eq!(factory.provider_count(), 4);
    for category in &categories {
        assert_eq!(factory.create_logger(category).binding_count(), 4);
    }

    // After registration settles, every provider sees every new message
    for category in &categories {
        factory.create_logger(category).error("final");
    }
    for provider in &late {
        let finals = provider
            .drain()
            .into_iter()
            .filter(|line| line.ends_with(": final\n"))
            .count();
        assert_eq!(finals, categories.len());
    }
}
