use std::{cell::RefCell, fmt, io::Write, rc::Rc};

use crate::{population::NonDominatedPopulation, solution::Solution};

/// Summary of a population after one initialize/iterate step.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// 0 after `initialize`, then the number of completed iterations.
    pub step: usize,
    pub gamma: f64,
    pub evaluations: usize,
    pub population_size: usize,
    pub ideal: Option<Vec<f64>>,
    pub nadir: Option<Vec<f64>>,
}

impl Snapshot {
    pub fn of_population<S: Solution>(
        step: usize,
        gamma: f64,
        evaluations: usize,
        population: &NonDominatedPopulation<S>,
    ) -> Self {
        Self {
            step,
            gamma,
            evaluations,
            population_size: population.len(),
            ideal: population.ideal_point(),
            nadir: population.nadir_point(),
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step={} gamma={:.6} evaluations={} size={}",
            self.step, self.gamma, self.evaluations, self.population_size
        )?;
        if let (Some(ideal), Some(nadir)) = (&self.ideal, &self.nadir) {
            write!(f, " ideal={:?} nadir={:?}", ideal, nadir)?;
        }
        Ok(())
    }
}

/// Receives one formatted snapshot line per completed step.
///
/// Errors are reported back to the optimizer, which logs and counts them but never
/// aborts the run because of them.
pub trait MetricsSink {
    fn record(&mut self, line: &str) -> std::io::Result<()>;
}

/// Writes each snapshot as a line to any `io::Write` (file, stderr, buffer...).
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MetricsSink for WriterSink<W> {
    fn record(&mut self, line: &str) -> std::io::Result<()> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()
    }
}

/// Keeps every snapshot line in memory. Clones share the same history, so a clone can
/// be handed to the optimizer and this handle inspected afterwards.
#[derive(Clone, Default)]
pub struct SnapshotHistory {
    lines: Rc<RefCell<Vec<String>>>,
}

impl SnapshotHistory {
    pub fn new() -> Self {
        Self {
            lines: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }
}

impl MetricsSink for SnapshotHistory {
    fn record(&mut self, line: &str) -> std::io::Result<()> {
        self.lines.borrow_mut().push(line.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::VecSolution;

    #[test]
    fn snapshot_line_includes_front_bounds() {
        let mut pop = NonDominatedPopulation::new();
        pop.add_all(vec![
            VecSolution::with_objectives(vec![0u8], vec![1.0, 4.0]),
            VecSolution::with_objectives(vec![1u8], vec![3.0, 2.0]),
        ]);

        let snapshot = Snapshot::of_population(2, 0.5, 12, &pop);

        assert_eq!(
            snapshot.to_string(),
            "step=2 gamma=0.500000 evaluations=12 size=2 ideal=[1.0, 2.0] nadir=[3.0, 4.0]"
        );
    }

    #[test]
    fn empty_population_omits_bounds() {
        let pop: NonDominatedPopulation<VecSolution<u8>> = NonDominatedPopulation::new();
        let snapshot = Snapshot::of_population(0, 0.6, 0, &pop);
        assert_eq!(
            snapshot.to_string(),
            "step=0 gamma=0.600000 evaluations=0 size=0"
        );
    }

    #[test]
    fn writer_sink_writes_lines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.record("a").unwrap();
        sink.record("b").unwrap();
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "a\nb\n");
    }

    #[test]
    fn history_clones_share_lines() {
        let history = SnapshotHistory::new();
        let mut handle = history.clone();
        handle.record("x").unwrap();
        assert_eq!(history.lines(), vec!["x".to_string()]);
    }
}
