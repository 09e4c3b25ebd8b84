//! Two-column measurement files.

use std::path::Path;

use crate::error::{JunctionError, Result};

use super::{MeasuredCurve, MeasuredSample};

/// Parse measurement text.
///
/// The first line is a header and is discarded. Lines with fewer than two
/// whitespace-separated fields are skipped. The first two fields are read
/// as voltage and current with ',' accepted as the decimal separator;
/// anything that still fails to parse aborts the read.
pub fn parse_measurements(input: &str) -> Result<MeasuredCurve> {
    let mut samples = Vec::new();

    for (index, line) in input.lines().enumerate().skip(1) {
        let line_number = index + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            if !line.trim().is_empty() {
                tracing::warn!(line = line_number, content = line, "skipping measurement line with fewer than two fields");
            }
            continue;
        }

        samples.push(MeasuredSample {
            voltage: parse_field(fields[0], line_number)?,
            current: parse_field(fields[1], line_number)?,
        });
    }

    tracing::debug!(samples = samples.len(), "parsed measurements");
    Ok(MeasuredCurve::new(samples))
}

/// Parse raw measurement bytes.
///
/// Instrument exports are often Latin-1; bytes that are not UTF-8 become
/// U+FFFD. Only a number containing one fails, as a `MalformedSample`.
pub fn parse_measurement_bytes(bytes: &[u8]) -> Result<MeasuredCurve> {
    parse_measurements(&String::from_utf8_lossy(bytes))
}

/// Read and parse a measurement file.
pub fn read_measurements(path: &Path) -> Result<MeasuredCurve> {
    let bytes = std::fs::read(path).map_err(|e| JunctionError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_measurement_bytes(&bytes)
}

fn parse_field(field: &str, line: usize) -> Result<f64> {
    field
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|e| JunctionError::malformed_sample(line, field, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_comma_is_normalized() {
        let curve = parse_measurements("V I\n0,5 0,002\n").unwrap();
        assert_eq!(curve.samples(), &[MeasuredSample { voltage: 0.5, current: 0.002 }]);
    }

    #[test]
    fn test_header_is_discarded_even_if_numeric() {
        let curve = parse_measurements("1.0 2.0\n3.0 4.0\n").unwrap();
        assert_eq!(curve.len(), 1);
        assert_eq!(curve.voltages(), vec![3.0]);
    }

    #[test]
    fn test_short_lines_are_skipped() {
        let input = "Tension\tCourant\n-0.1\t-1e-5\n\n0.42\n0.2\t3.5E-4\textra\n";
        let curve = parse_measurements(input).unwrap();
        assert_eq!(curve.voltages(), vec![-0.1, 0.2]);
        assert_eq!(curve.currents(), vec![-1e-5, 3.5e-4]);
    }

    #[test]
    fn test_unparseable_field_fails_the_read() {
        let err = parse_measurements("V I\n0.1 0.2\n0,1,5 0.3\n").unwrap_err();
        match err {
            JunctionError::MalformedSample { line, field, .. } => {
                assert_eq!(line, 3);
                assert_eq!(field, "0,1,5");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_measurements("").unwrap().is_empty());
        assert!(parse_measurements("header only").unwrap().is_empty());
    }

    #[test]
    fn test_latin1_header_is_tolerated() {
        let curve = parse_measurement_bytes(b"Tension (V)\tCourant (\xb5A)\n0,5 0,002\n").unwrap();
        assert_eq!(curve.samples(), &[MeasuredSample { voltage: 0.5, current: 0.002 }]);
    }

    #[test]
    fn test_undecodable_number_is_malformed() {
        let err = parse_measurement_bytes(b"V I\n0,5 0,0\xb52\n").unwrap_err();
        assert!(matches!(err, JunctionError::MalformedSample { line: 2, .. }));
    }

    #[test]
    fn test_read_latin1_file() {
        let path = std::env::temp_dir().join(format!("pnj-latin1-{}.txt", std::process::id()));
        std::fs::write(&path, b"Tension (V)\tCourant (\xb5A)\n-0,1 -1,5E-3\n0,5 0,002\n").unwrap();
        let curve = read_measurements(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(curve.unwrap().voltages(), vec![-0.1, 0.5]);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = read_measurements(Path::new("/nonexistent/measurement.txt")).unwrap_err();
        assert!(matches!(err, JunctionError::FileReadError { .. }));
    }
}
