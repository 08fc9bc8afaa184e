//! CSV trace writer
//!
//! Dumps one line per processed sample of a single voice, for plotting a
//! glide after the fact.

use crate::synth::{TraceEvent, VoiceObserver};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const HEADER: &str = "index, start, target, in_state, out_state, lfo, shaped, computed, frequency, output";

/// Observer that writes every event to a CSV file
///
/// Observers cannot fail, so the first I/O error is kept and reported by
/// [`CsvTrace::finish`]. Nothing more is written after an error.
pub struct CsvTrace<W: Write = BufWriter<File>> {
    writer: W,
    lines: u64,
    error: Option<io::Error>,
}

impl CsvTrace<BufWriter<File>> {
    /// Create the trace file and write the header
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("failed to create trace file: {:?}", path))?;
        Self::new(BufWriter::new(file)).context("failed to write trace header")
    }
}

impl<W: Write> CsvTrace<W> {
    /// Wrap a writer and write the header
    pub fn new(mut writer: W) -> io::Result<Self> {
        writeln!(writer, "{}", HEADER)?;
        Ok(Self {
            writer,
            lines: 0,
            error: None,
        })
    }

    /// Number of event lines written
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Flush and hand back the writer, or the first error seen
    pub fn finish(mut self) -> Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e).context("failed to write trace");
        }
        self.writer.flush().context("failed to flush trace")?;
        Ok(self.writer)
    }

    fn write_event(&mut self, event: &TraceEvent) -> io::Result<()> {
        writeln!(
            self.writer,
            "{}, {}, {}, {}, {}, {}, {}, {}, {}, {}",
            self.lines,
            event.start_frequency,
            event.target_frequency,
            event.in_state.code(),
            event.out_state.code(),
            event.lfo_value,
            event.shaped_value,
            event.computed_frequency,
            event.frequency,
            event.output
        )
    }
}

impl<W: Write> VoiceObserver for CsvTrace<W> {
    fn observe(&mut self, event: &TraceEvent) {
        if self.error.is_some() {
            return;
        }
        match self.write_event(event) {
            Ok(()) => self.lines += 1,
            Err(e) => {
                log::warn!("trace write failed after {} lines: {}", self.lines, e);
                self.error = Some(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::VoiceState;
    use tempfile::NamedTempFile;

    fn event() -> TraceEvent {
        TraceEvent {
            start_frequency: 400.0,
            target_frequency: 800.0,
            in_state: VoiceState::PendingTransitToTarget,
            out_state: VoiceState::InTransitToTarget,
            lfo_value: 0.0,
            shaped_value: 0.0,
            computed_frequency: 400.0,
            frequency: 400.0,
            output: 0.5,
        }
    }

    /// Accepts `lines` complete lines, then fails every write
    struct FailingWriter {
        lines: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.lines == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            let newlines = buf.iter().filter(|&&b| b == b'\n').count();
            self.lines = self.lines.saturating_sub(newlines);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_trace_lines() {
        let mut trace = CsvTrace::new(Vec::new()).unwrap();
        trace.observe(&event());
        trace.observe(&event());
        assert_eq!(trace.lines(), 2);

        let bytes = trace.finish().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "0, 400, 800, 0, 1, 0, 0, 400, 400, 0.5");
        assert!(lines[2].starts_with("1, "));
    }

    #[test]
    fn test_trace_file() {
        let file = NamedTempFile::new().unwrap();
        let mut trace = CsvTrace::create(file.path()).unwrap();
        trace.observe(&event());
        trace.finish().unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_trace_latches_first_error() {
        // Header plus one event get through, then writes fail
        let mut trace = CsvTrace::new(FailingWriter { lines: 2 }).unwrap();
        for _ in 0..5 {
            trace.observe(&event());
        }

        assert_eq!(trace.lines(), 1);
        assert!(trace.finish().is_err());
    }

    #[test]
    fn test_trace_from_voice() {
        use crate::synth::init_voice;
        use crate::types::{AnimationMultiplier, ControlPoint1, ControlPoint2, OscillatorFrequency, SampleRate};

        let mut voice = init_voice(
            2,
            OscillatorFrequency::new(400.0),
            SampleRate::new(48000.0),
            OscillatorFrequency::new(1.0),
        )
        .unwrap();
        voice.set_target_frequency(OscillatorFrequency::new(800.0)).unwrap();

        let mut trace = CsvTrace::new(Vec::new()).unwrap();
        for _ in 0..100 {
            voice.process_observed(
                AnimationMultiplier::new(1.0),
                ControlPoint1::new(0.08),
                ControlPoint2::new(0.5),
                &mut trace,
            );
        }

        let text = String::from_utf8(trace.finish().unwrap()).unwrap();
        assert_eq!(text.lines().count(), 101);
    }
}
