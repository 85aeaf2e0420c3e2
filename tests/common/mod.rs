#![allow(dead_code)]

use std::path::Path;

use health_explorer::data::{
    dataset::Dataset,
    record::{Record, RecordBuilder},
};
use tracing::{info, subscriber::set_default};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;

pub struct TracingGuards {
    _subscriber_guard: tracing::subscriber::DefaultGuard,
    _worker_guard: WorkerGuard,
}

pub fn setup_test_tracing(test_name: &str) -> TracingGuards {
    let log_dir = Path::new("tests/logs");
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir).unwrap();
    }

    let file_appender = tracing_appender::rolling::never(log_dir, format!("{}.log", test_name));
    let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = fmt::Subscriber::builder()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    // Set as default subscriber for this thread
    let subscriber_guard = set_default(subscriber);

    TracingGuards {
        _subscriber_guard: subscriber_guard,
        _worker_guard: worker_guard,
    }
}

const GENDERS: [&str; 2] = ["female", "male"];
const RACES: [&str; 4] = ["White", "Black", "Mexican", "Other"];

/// 100 records with ages spread evenly over 0..=80.
///
/// Every 7th record lacks BMI, every 9th lacks a gender, every 10th lacks a race.
pub fn synthetic_records() -> Vec<Record> {
    (0..100u64)
        .map(|i| {
            let mut builder = RecordBuilder::default();
            builder
                .id(1000 + i)
                .age((i as f64 * 80.0 / 99.0).round())
                .weight(50.0 + (i % 40) as f64)
                .height(150.0 + (i % 35) as f64);
            if i % 7 != 3 {
                builder.bmi(18.0 + (i % 17) as f64);
            }
            if i % 9 != 4 {
                builder.gender(GENDERS[(i % 2) as usize]);
            }
            if i % 10 != 6 {
                builder.race(RACES[(i % 4) as usize]);
            }
            builder.build().unwrap()
        })
        .collect()
}

pub fn setup_default_data(test_name: &str) -> (Dataset, TracingGuards) {
    let guards = setup_test_tracing(test_name);
    info!("-----------------");
    info!("Test: {}", test_name);
    info!("-----------------");
    (Dataset::new(synthetic_records()), guards)
}
