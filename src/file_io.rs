use crate::error::FormatError;
use crate::transcoder::Grid;

/// Read standard CSV text into a grid
pub fn read_csv(text: &str) -> Result<Grid, FormatError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut grid = Grid::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        for (col_idx, field) in record.iter().enumerate() {
            grid.set_text(row_idx, col_idx, field);
        }
    }

    Ok(grid)
}

/// Write a grid as standard CSV text, trimmed to the used bounds
pub fn write_csv(grid: &Grid) -> Result<String, FormatError> {
    let Some((max_row, max_col)) = grid.used_bounds() else {
        return Ok(String::new());
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    for row in 0..=max_row {
        let row_data: Vec<&str> = (0..=max_col).map(|col| grid.text(row, col)).collect();
        writer.write_record(&row_data)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FormatError::Csv(e.into_error().into()))?;
    String::from_utf8(bytes).map_err(|_| FormatError::Utf8)
}
