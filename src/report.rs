use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

/// One timed benchmark case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Case {
    /// Generated types, binary encoding.
    StaticBinary,
    /// Descriptor-driven messages, binary encoding.
    DynamicBinary,
    /// Generated types, JSON encode then decode.
    StaticJson,
    /// Descriptor-driven messages, JSON encode then decode.
    DynamicJson,
}

impl Case {
    /// Every case, in the order they run and are reported.
    pub const ALL: [Case; 4] = [
        Case::StaticBinary,
        Case::DynamicBinary,
        Case::StaticJson,
        Case::DynamicJson,
    ];

    /// The label printed in front of the case's timing.
    ///
    /// The JSON cases say "deserialization" although they time an encode followed by a decode.
    pub fn label(self) -> &'static str {
        match self {
            Case::StaticBinary => "Normal Protobuf serialization",
            Case::DynamicBinary => "Dynamic Protobuf serialization",
            Case::StaticJson => "Normal Protobuf deserialization",
            Case::DynamicJson => "Dynamic Protobuf deserialization",
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Wall-clock time of one case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub case: Case,
    pub elapsed: Duration,
}

/// The outcome of a full benchmark run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    iterations: usize,
    timings: Vec<Timing>,
}

impl Report {
    pub fn new(iterations: usize, timings: Vec<Timing>) -> Report {
        Report {
            iterations,
            timings,
        }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn timings(&self) -> &[Timing] {
        &self.timings
    }

    /// Returns the time taken by `case`, if it ran.
    pub fn elapsed(&self, case: Case) -> Option<Duration> {
        self.timings
            .iter()
            .find(|timing| timing.case == case)
            .map(|timing| timing.elapsed)
    }

    /// Writes the header line followed by one line per case, in whole milliseconds.
    pub fn write_to<W>(&self, mut out: W) -> io::Result<()>
    where
        W: Write,
    {
        writeln!(
            out,
            "Running {} iterations of each type of Protobuf operation",
            self.iterations
        )?;
        for timing in &self.timings {
            writeln!(
                out,
                "{} time: {} ms",
                timing.case,
                timing.elapsed.as_millis()
            )?;
        }
        out.flush()
    }
}
