//! Fixed-iteration timing loops.
//!
//! Each iteration builds a fresh sample and passes it through the codec under test, so build
//! cost and codec cost are measured together. Cases run one after the other in
//! [`Case::ALL`] order without a warm-up.

use std::hint::black_box;
use std::time::{Duration, Instant};

use log::{debug, info};
use prost::Message;
use prost_reflect::MessageDescriptor;

use crate::config::Config;
use crate::error::Error;
use crate::json;
use crate::report::{Case, Report, Timing};
use crate::sample::{dynamic_person, now_millis, static_person};

/// Runs every case against `descriptor`.
pub fn run(config: &Config, descriptor: &MessageDescriptor) -> Result<Report, Error> {
    let iterations = config.get_iterations();
    info!("running {} iterations of each case", iterations);

    let mut timings = Vec::with_capacity(Case::ALL.len());
    for case in Case::ALL {
        let elapsed = run_case(case, iterations, descriptor)?;
        debug!("{}: {:?}", case, elapsed);
        timings.push(Timing { case, elapsed });
    }

    Ok(Report::new(iterations, timings))
}

/// Runs a single case.
pub fn run_case(
    case: Case,
    iterations: usize,
    descriptor: &MessageDescriptor,
) -> Result<Duration, Error> {
    match case {
        Case::StaticBinary => measure(iterations, || {
            let person = static_person(now_millis());
            black_box(person.encode_to_vec());
            Ok(())
        }),
        Case::DynamicBinary => measure(iterations, || {
            let person = dynamic_person(descriptor, now_millis())?;
            black_box(person.encode_to_vec());
            Ok(())
        }),
        Case::StaticJson => measure(iterations, || {
            let person = static_person(now_millis());
            black_box(json::round_trip_static(&person)?);
            Ok(())
        }),
        Case::DynamicJson => measure(iterations, || {
            let person = dynamic_person(descriptor, now_millis())?;
            black_box(json::round_trip_dynamic(descriptor, &person)?);
            Ok(())
        }),
    }
}

fn measure<F>(iterations: usize, mut iteration: F) -> Result<Duration, Error>
where
    F: FnMut() -> Result<(), Error>,
{
    let start = Instant::now();
    for _ in 0..iterations {
        iteration()?;
    }
    Ok(start.elapsed())
}
