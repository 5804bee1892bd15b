//! Destinations for a finished walk: the configuration trace and the action statistics.

use crate::action::{ActionCounts, ActionStats};
use crate::configuration::Configuration;
use crate::error::Result;
use std::io::Write;

/// Receives the configuration trace of a successful walk.
pub trait TraceSink {
    /// `pad` is the pad built from modules, printed alongside every snapshot.
    fn write_trace(&mut self, pad: &Configuration, trace: &[Configuration]) -> Result<()>;
}

/// Receives both action tallies of a successful walk.
pub trait StatisticsSink {
    fn write_statistics(&mut self, stats: &ActionStats) -> Result<()>;
}

/// Writes each snapshot as a `C` block: the pad, the robot, then a blank line.
pub struct TextTraceWriter<W: Write> {
    out: W,
}

impl<W: Write> TextTraceWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TraceSink for TextTraceWriter<W> {
    fn write_trace(&mut self, pad: &Configuration, trace: &[Configuration]) -> Result<()> {
        for config in trace {
            writeln!(self.out, "C")?;
            if !pad.is_empty() {
                writeln!(self.out, "{pad}")?;
            }
            writeln!(self.out, "{config}")?;
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Writes `NAME: count` listings of both tallies and the energy cost of all actions.
pub struct TextStatisticsWriter<W: Write> {
    out: W,
}

impl<W: Write> TextStatisticsWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_counts(&mut self, counts: &ActionCounts) -> Result<()> {
        for (action, count) in counts.iter() {
            writeln!(self.out, "{action}: {count}")?;
        }
        Ok(())
    }
}

impl<W: Write> StatisticsSink for TextStatisticsWriter<W> {
    fn write_statistics(&mut self, stats: &ActionStats) -> Result<()> {
        writeln!(self.out, "All actions:")?;
        self.write_counts(&stats.all)?;
        let (cost, _) = stats.all.total_energy();
        writeln!(self.out, "Cost: {cost}")?;
        writeln!(self.out)?;
        writeln!(self.out, "Non concurent actions:")?;
        self.write_counts(&stats.non_concurrent)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Drops everything it is given.
#[derive(Clone, Copy, Debug, Default)]
pub struct Discard;

impl TraceSink for Discard {
    fn write_trace(&mut self, _pad: &Configuration, _trace: &[Configuration]) -> Result<()> {
        Ok(())
    }
}

impl StatisticsSink for Discard {
    fn write_statistics(&mut self, _stats: &ActionStats) -> Result<()> {
        Ok(())
    }
}

impl TraceSink for Vec<Configuration> {
    fn write_trace(&mut self, _pad: &Configuration, trace: &[Configuration]) -> Result<()> {
        self.extend_from_slice(trace);
        Ok(())
    }
}

impl StatisticsSink for Vec<ActionStats> {
    fn write_statistics(&mut self, stats: &ActionStats) -> Result<()> {
        self.push(*stats);
        Ok(())
    }
}
