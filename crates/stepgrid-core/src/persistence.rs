//! Binary grid state: `i16` bar count followed by one `f32` per bar, little-endian

use std::io::{ErrorKind, Read, Write};

use crate::error::{GridError, Result};
use crate::grid::{GridState, MAX_BAR_COUNT, MIN_BAR_COUNT, is_valid_count};

/// Write the bar count and every bar value
pub fn write_state<W: Write>(grid: &GridState, writer: &mut W) -> Result<()> {
    let count = i16::try_from(grid.bar_count()).map_err(|_| {
        GridError::MalformedState(format!("bar count {} does not fit in i16", grid.bar_count()))
    })?;
    writer.write_all(&count.to_le_bytes())?;
    for index in 0..grid.bar_count() {
        writer.write_all(&grid.value_at(index)?.to_le_bytes())?;
    }
    Ok(())
}

/// Decode a bar sequence without touching any grid
pub fn read_bars<R: Read>(reader: &mut R) -> Result<Vec<f32>> {
    let mut count_bytes = [0u8; 2];
    read_exact(reader, &mut count_bytes, "bar count")?;
    let declared = i16::from_le_bytes(count_bytes);

    if declared <= 0 {
        return Err(GridError::MalformedState(format!("declared bar count {declared}")));
    }
    let count = declared as usize;
    if !is_valid_count(count, MIN_BAR_COUNT, MAX_BAR_COUNT) {
        return Err(GridError::MalformedState(format!(
            "bar count {count} is not a power of two in {MIN_BAR_COUNT}..={MAX_BAR_COUNT}"
        )));
    }

    let mut bars = Vec::with_capacity(count);
    for index in 0..count {
        let mut value_bytes = [0u8; 4];
        read_exact(reader, &mut value_bytes, &format!("bar {index} of {count}"))?;
        bars.push(f32::from_le_bytes(value_bytes));
    }
    Ok(bars)
}

/// Replace the grid's bars from `reader`. On error the grid is left unchanged.
pub fn read_state<R: Read>(grid: &mut GridState, reader: &mut R) -> Result<()> {
    let bars = read_bars(reader)?;
    grid.replace_bars(bars);
    Ok(())
}

fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => {
            GridError::MalformedState(format!("stream ended reading {what}"))
        }
        _ => GridError::Io(e),
    })
}
