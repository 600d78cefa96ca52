use crate::error::RenderError;
use crate::sample::Sample;

/// A row-major table indexed by [cycle, dof].
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesTable {
    rows: usize,
    dofs: usize,
    data: Vec<f64>,
}

impl SeriesTable {
    /// Creates a zero-filled table.
    pub fn zeros(rows: usize, dofs: usize) -> Self {
        Self {
            rows,
            dofs,
            data: vec![0.0; rows * dofs],
        }
    }

    /// Stacks one row per sample using `field` to pick the per-dof values.
    /// Callers must have checked that every row has `dofs` entries.
    pub fn stack<F>(samples: &[Sample], dofs: usize, field: F) -> Self
    where
        F: Fn(&Sample) -> &[f64],
    {
        let mut data = Vec::with_capacity(samples.len() * dofs);
        for sample in samples {
            data.extend_from_slice(&field(sample)[..dofs]);
        }
        Self {
            rows: samples.len(),
            dofs,
            data,
        }
    }

    /// Builds a table from explicit rows. Every row must be as long as the first.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, RenderError> {
        let dofs = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * dofs);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != dofs {
                return Err(RenderError::ShapeMismatch {
                    what: "row",
                    index,
                    expected: dofs,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            dofs,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn dofs(&self) -> usize {
        self.dofs
    }

    pub fn get(&self, row: usize, dof: usize) -> f64 {
        self.data[row * self.dofs + dof]
    }

    pub fn set(&mut self, row: usize, dof: usize, value: f64) {
        self.data[row * self.dofs + dof] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.dofs..(row + 1) * self.dofs]
    }

    /// Copies one dof out as a time series.
    pub fn column(&self, dof: usize) -> Vec<f64> {
        (0..self.rows).map(|row| self.get(row, dof)).collect()
    }

    pub fn column_max(&self, dof: usize) -> f64 {
        (0..self.rows)
            .map(|row| self.get(row, dof))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn column_min(&self, dof: usize) -> f64 {
        (0..self.rows)
            .map(|row| self.get(row, dof))
            .fold(f64::INFINITY, f64::min)
    }

    fn fill_row(&mut self, row: usize, value: f64) {
        for dof in 0..self.dofs {
            self.set(row, dof, value);
        }
    }
}

/// The stacked per-cycle tables of one render call. All four share the
/// sample count as row count and the dof count as column count.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionSeries {
    pub position: SeriesTable,
    pub velocity: SeriesTable,
    pub acceleration: SeriesTable,
    pub jerk: SeriesTable,
}

impl MotionSeries {
    /// Stacks the sampled axes and derives jerk at `cycle_time`.
    pub fn from_samples(samples: &[Sample], dofs: usize, cycle_time: f64) -> Self {
        let position = SeriesTable::stack(samples, dofs, |s| s.position.as_slice());
        let velocity = SeriesTable::stack(samples, dofs, |s| s.velocity.as_slice());
        let acceleration = SeriesTable::stack(samples, dofs, |s| s.acceleration.as_slice());
        let jerk = derive_jerk(&acceleration, cycle_time);
        Self {
            position,
            velocity,
            acceleration,
            jerk,
        }
    }

    pub fn rows(&self) -> usize {
        self.position.rows()
    }

    pub fn dofs(&self) -> usize {
        self.position.dofs()
    }
}

/// Derives jerk from an acceleration table by backward differencing.
///
/// The first difference uses the scalar `acc[0][0]` as its baseline for
/// every dof. The result is divided by `cycle_time` and then the first and
/// last rows are overwritten with zeros, in that order.
pub fn derive_jerk(acceleration: &SeriesTable, cycle_time: f64) -> SeriesTable {
    let rows = acceleration.rows();
    let dofs = acceleration.dofs();
    let mut jerk = SeriesTable::zeros(rows, dofs);
    if rows == 0 || dofs == 0 {
        return jerk;
    }

    let baseline = acceleration.get(0, 0);
    for dof in 0..dofs {
        jerk.set(0, dof, (acceleration.get(0, dof) - baseline) / cycle_time);
    }
    for row in 1..rows {
        for dof in 0..dofs {
            let diff = acceleration.get(row, dof) - acceleration.get(row - 1, dof);
            jerk.set(row, dof, diff / cycle_time);
        }
    }

    jerk.fill_row(0, 0.0);
    jerk.fill_row(rows - 1, 0.0);
    jerk
}
