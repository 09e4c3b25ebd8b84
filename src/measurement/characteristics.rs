//! Solar-cell figures of merit from a sampled I-V curve.
//!
//! Sign convention: generated current is negative, so the cell delivers
//! power where V > 0 and I < 0.

/// The sample delivering the most power.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxPowerPoint {
    /// Position of the sample in the input sequence
    pub index: usize,
    pub voltage: f64,
    pub current: f64,
    /// |V * I| in mW/cm² when the current is in A/cm²
    pub power: f64,
}

/// Linear scan for the sample with the largest |V * I| in the generating
/// quadrant. `None` if no sample has V > 0 and I < 0.
pub fn max_power_point<I>(samples: I) -> Option<MaxPowerPoint>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut best: Option<MaxPowerPoint> = None;
    for (index, (voltage, current)) in samples.into_iter().enumerate() {
        if !(voltage > 0.0 && current < 0.0) {
            continue;
        }
        let power = (voltage * current).abs() * 1e3;
        if best.map_or(true, |b| power > b.power) {
            best = Some(MaxPowerPoint {
                index,
                voltage,
                current,
                power,
            });
        }
    }
    best
}

/// Voltage where the current first goes from negative to non-negative with
/// increasing voltage, by linear interpolation between neighbouring samples.
///
/// Neighbours are compared by voltage, so ascending and descending
/// recordings give the same result.
pub fn open_circuit_voltage<I>(samples: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut previous: Option<(f64, f64)> = None;
    for sample in samples {
        if let Some(prev) = previous {
            let ((v0, i0), (v1, i1)) = if prev.0 <= sample.0 { (prev, sample) } else { (sample, prev) };
            if i0 < 0.0 && i1 == 0.0 {
                return Some(v1);
            }
            if i0 < 0.0 && i1 > 0.0 {
                return Some(v0 - i0 * (v1 - v0) / (i1 - i0));
            }
        }
        previous = Some(sample);
    }
    None
}

/// Current at V = 0, interpolated between the samples bracketing it.
pub fn short_circuit_current<I>(samples: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut previous: Option<(f64, f64)> = None;
    for (v, i) in samples {
        if v == 0.0 {
            return Some(i);
        }
        if let Some((v0, i0)) = previous {
            if (v0 < 0.0) != (v < 0.0) {
                return Some(i0 + (i - i0) * (0.0 - v0) / (v - v0));
            }
        }
        previous = Some((v, i));
    }
    None
}

/// Summary of a curve's power-generating behaviour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellCharacteristics {
    pub max_power: MaxPowerPoint,
    pub open_circuit_voltage: f64,
    /// Negative under illumination
    pub short_circuit_current: f64,
    /// Pmax / (Voc * |Jsc|), between 0 and 1
    pub fill_factor: f64,
}

impl CellCharacteristics {
    /// `None` unless the curve has a generating quadrant and crosses both axes.
    pub fn from_samples<I>(samples: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
        I::IntoIter: Clone,
    {
        let samples = samples.into_iter();
        let max_power = max_power_point(samples.clone())?;
        let voc = open_circuit_voltage(samples.clone())?;
        let jsc = short_circuit_current(samples)?;

        let ideal = voc * jsc.abs() * 1e3;
        if ideal <= 0.0 {
            return None;
        }
        Some(Self {
            max_power,
            open_circuit_voltage: voc,
            short_circuit_current: jsc,
            fill_factor: max_power.power / ideal,
        })
    }
}
