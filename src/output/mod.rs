//! CSV output for the CLI frontend.
//!
//! Results go to any [`Write`] sink (stdout in the CLI) as comma-separated
//! rows with a header line. Numbers use `{:e}` so that round-tripping loses
//! nothing.

use std::io::{self, Write};

use crate::error::{JunctionError, Result};
use crate::solver::IvCurve;

/// Buffered CSV writer.
pub struct CsvWriter<W: Write> {
    inner: io::BufWriter<W>,
}

impl CsvWriter<io::Stdout> {
    /// Writer on standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> CsvWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: io::BufWriter::new(inner),
        }
    }

    /// Write one row of already formatted fields.
    pub fn write_row<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<()> {
        let mut line = String::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            line.push_str(field.as_ref());
        }
        line.push('\n');
        self.inner.write_all(line.as_bytes()).map_err(output_error)
    }

    /// Write a header followed by one row per tuple of values.
    pub fn write_table<R>(&mut self, header: &[&str], rows: R) -> Result<()>
    where
        R: IntoIterator<Item = Vec<f64>>,
    {
        self.write_row(header)?;
        for row in rows {
            let fields: Vec<String> = row.iter().map(|v| format!("{v:e}")).collect();
            self.write_row(&fields)?;
        }
        Ok(())
    }

    /// `voltage,current_density` rows of one curve.
    pub fn write_curve(&mut self, curve: &IvCurve) -> Result<()> {
        self.write_table(
            &["voltage", "current_density"],
            curve.pairs().map(|(v, j)| vec![v, j]),
        )
    }

    /// One voltage column and one current column per curve.
    ///
    /// All curves must come from the same voltage grid.
    pub fn write_family(&mut self, labels: &[String], curves: &[IvCurve]) -> Result<()> {
        if labels.len() != curves.len() {
            return Err(JunctionError::OutputError {
                message: format!("{} labels for {} curves", labels.len(), curves.len()),
            });
        }
        let rows = curves.first().map_or(0, IvCurve::len);
        if curves.iter().any(|c| c.len() != rows) {
            return Err(JunctionError::OutputError {
                message: "curves have different lengths".to_string(),
            });
        }

        let mut header = vec!["voltage"];
        header.extend(labels.iter().map(String::as_str));
        self.write_table(
            &header,
            (0..rows).map(|i| {
                let mut row = vec![curves[0].points()[i].voltage];
                row.extend(curves.iter().map(|c| c.points()[i].current_density));
                row
            }),
        )
    }

    /// Flush the output stream.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(output_error)
    }

    /// Flush and return the underlying sink.
    pub fn into_inner(self) -> Result<W> {
        self.inner.into_inner().map_err(|e| output_error(e.into_error()))
    }
}

fn output_error(e: io::Error) -> JunctionError {
    JunctionError::OutputError {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::IvPoint;

    fn curve(currents: &[f64]) -> IvCurve {
        IvCurve::new(
            currents
                .iter()
                .enumerate()
                .map(|(i, &j)| IvPoint {
                    voltage: i as f64 * 0.5,
                    current_density: j,
                })
                .collect(),
        )
    }

    #[test]
    fn test_write_curve() {
        let mut writer = CsvWriter::new(Vec::new());
        writer.write_curve(&curve(&[-0.001, 0.25])).unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(text, "voltage,current_density\n0e0,-1e-3\n5e-1,2.5e-1\n");
    }

    #[test]
    fn test_write_family_columns() {
        let mut writer = CsvWriter::new(Vec::new());
        let labels = vec!["rs=0.1".to_string(), "rs=1".to_string()];
        writer
            .write_family(&labels, &[curve(&[1.0, 2.0]), curve(&[3.0, 4.0])])
            .unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["voltage,rs=0.1,rs=1", "0e0,1e0,3e0", "5e-1,2e0,4e0"]);
    }

    #[test]
    fn test_mismatched_family_is_rejected() {
        let mut writer = CsvWriter::new(Vec::new());
        let labels = vec!["a".to_string(), "b".to_string()];
        let err = writer
            .write_family(&labels, &[curve(&[1.0]), curve(&[1.0, 2.0])])
            .unwrap_err();
        assert!(matches!(err, JunctionError::OutputError { .. }));
    }
}
