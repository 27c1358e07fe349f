//! Table allocation: round-robin over the tournament's tables.

use crate::models::{TableId, TournamentError};

/// Table for the `index`-th allocated match: `tables[index % len]`.
pub fn next_table(index: usize, tables: &[TableId]) -> Result<&TableId, TournamentError> {
    if tables.is_empty() {
        return Err(TournamentError::NoTablesAvailable);
    }
    Ok(&tables[index % tables.len()])
}

/// Cursor over a table list. Only two-player matches take a table.
#[derive(Debug)]
pub struct TableAllocator<'a> {
    tables: &'a [TableId],
    cursor: usize,
}

impl<'a> TableAllocator<'a> {
    pub fn new(tables: &'a [TableId]) -> Result<Self, TournamentError> {
        Self::starting_at(tables, 0)
    }

    /// Resume from a cursor saved on the tournament.
    pub fn starting_at(tables: &'a [TableId], cursor: usize) -> Result<Self, TournamentError> {
        if tables.is_empty() {
            return Err(TournamentError::NoTablesAvailable);
        }
        Ok(Self { tables, cursor })
    }

    pub fn allocate(&mut self) -> TableId {
        let table = self.tables[self.cursor % self.tables.len()].clone();
        self.cursor += 1;
        table
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables(n: usize) -> Vec<TableId> {
        (1..=n).map(|i| format!("T{i}")).collect()
    }

    #[test]
    fn wraps_around() {
        let t = tables(3);
        let picked: Vec<_> = (0..7).map(|i| next_table(i, &t).unwrap().as_str()).collect();
        assert_eq!(picked, ["T1", "T2", "T3", "T1", "T2", "T3", "T1"]);
    }

    #[test]
    fn empty_pool_is_an_error() {
        assert_eq!(next_table(0, &[]), Err(TournamentError::NoTablesAvailable));
        assert!(TableAllocator::new(&[]).is_err());
    }

    #[test]
    fn allocator_resumes_from_cursor() {
        let t = tables(2);
        let mut alloc = TableAllocator::starting_at(&t, 3).unwrap();
        assert_eq!(alloc.allocate(), "T2");
        assert_eq!(alloc.allocate(), "T1");
        assert_eq!(alloc.cursor(), 5);
    }
}
