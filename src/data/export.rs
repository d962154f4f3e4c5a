use std::io::Write;
use std::path::Path;

use crate::data::series_view::Series;
use crate::data::x_formatter::format_axis_label;
use crate::error::{Result, SensorPlotError};

/// Write `series` as `timestamp,time,<channel>` CSV rows.
///
/// Missing readings (`NaN`) become empty fields.
pub fn write_series_csv<W: Write>(mut w: W, series: &Series) -> std::io::Result<()> {
    let column = series.channel.map(|c| c.as_str()).unwrap_or("value");
    writeln!(w, "timestamp,time,{}", column)?;
    for p in &series.points {
        if p[1].is_nan() {
            writeln!(w, "{:.3},{},", p[0], format_axis_label(p[0]))?;
        } else {
            writeln!(w, "{:.3},{},{}", p[0], format_axis_label(p[0]), p[1])?;
        }
    }
    Ok(())
}

pub fn save_series_csv<P: AsRef<Path>>(path: P, series: &Series) -> Result<()> {
    let path = path.as_ref();
    let io_err = |source| SensorPlotError::Io {
        path: path.to_path_buf(),
        source,
    };
    let f = std::fs::File::create(path).map_err(io_err)?;
    let mut w = std::io::BufWriter::new(f);
    write_series_csv(&mut w, series).map_err(io_err)?;
    w.flush().map_err(io_err)?;
    log::info!("wrote {} rows to {:?}", series.len(), path);
    Ok(())
}
