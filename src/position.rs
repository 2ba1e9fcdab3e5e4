use crate::error::CellRefError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Parse an A1-style reference (`B5`, `aa10`) into zero-based indexes.
    pub fn parse(input: &str) -> Result<Self, CellRefError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CellRefError::Empty);
        }

        let split = input
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(input.len());
        let (letters, digits) = input.split_at(split);
        if letters.is_empty() || digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(CellRefError::Invalid(input.to_string()));
        }

        let col = letters.chars().try_fold(0usize, |acc, c| {
            let value = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
            acc.checked_mul(26)?.checked_add(value)
        });
        let row: Option<usize> = digits.parse().ok();

        match (row, col) {
            (Some(row), Some(col)) if row > 0 => Ok(Self::new(row - 1, col - 1)),
            _ => Err(CellRefError::Invalid(input.to_string())),
        }
    }

    /// Convert to Excel-style cell reference (A1, B5, etc.)
    pub fn to_reference(&self) -> String {
        let col_letter = Self::col_to_letter(self.col);
        format!("{}{}", col_letter, self.row + 1)
    }

    fn col_to_letter(col: usize) -> String {
        let mut result = String::new();
        let mut n = col;
        loop {
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            if n < 26 {
                break;
            }
            n = n / 26 - 1;
        }
        result
    }
}
