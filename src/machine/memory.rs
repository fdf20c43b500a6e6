use super::error::RuntimeError;
use std::convert::TryFrom;

/// Fixed-size array of cells, addressed from zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Memory {
    cells: Vec<i64>,
}

impl Memory {
    /// `None` if `size` cells cannot be allocated.
    pub fn new(size: usize) -> Option<Self> {
        let mut cells = Vec::new();
        cells.try_reserve_exact(size).ok()?;
        cells.resize(size, 0);
        Some(Self { cells })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    fn index(&self, address: i64) -> Result<usize, RuntimeError> {
        usize::try_from(address)
            .ok()
            .filter(|&index| index < self.cells.len())
            .ok_or(RuntimeError::AddressOutOfRange {
                address,
                size: self.cells.len(),
            })
    }

    pub fn check(&self, address: i64) -> Result<(), RuntimeError> {
        self.index(address).map(|_| ())
    }

    pub fn load(&self, address: i64) -> Result<i64, RuntimeError> {
        Ok(self.cells[self.index(address)?])
    }

    pub fn store(&mut self, address: i64, val: i64) -> Result<(), RuntimeError> {
        let index = self.index(address)?;
        self.cells[index] = val;
        Ok(())
    }

    pub fn cells(&self) -> &[i64] {
        &self.cells
    }
}
