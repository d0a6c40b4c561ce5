use std::collections::HashSet;
use std::path::PathBuf;

use tracing::info;

use crate::error::Result;
use crate::importer::{coerce, normalize_columns, read_table};
use crate::models::Booking;
use crate::schema::ALL_COLUMNS;

/// Where the master table lives between runs.
pub trait MasterStore {
    /// Every persisted booking, in stored order. An absent store is empty.
    fn load(&self) -> Result<Vec<Booking>>;

    /// Replace the persisted table with `bookings`.
    fn persist(&mut self, bookings: &[Booking]) -> Result<()>;
}

// ---------------------------------------------------------------------------
// CSV file store
// ---------------------------------------------------------------------------

pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl MasterStore for CsvFileStore {
    fn load(&self) -> Result<Vec<Booking>> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no master file yet, starting empty");
            return Ok(Vec::new());
        }
        // Stored files go through the same normalizer as uploads so older
        // header spellings still load.
        let table = normalize_columns(read_table(&self.path)?);
        let bookings = coerce(&table);
        info!(path = %self.path.display(), bookings = bookings.len(), "loaded master table");
        Ok(bookings)
    }

    fn persist(&mut self, bookings: &[Booking]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.temp_path();
        {
            let mut wtr = csv::Writer::from_path(&tmp)?;
            wtr.write_record(ALL_COLUMNS.iter().map(|c| c.canonical_name()))?;
            for booking in bookings {
                wtr.write_record(booking.to_record())?;
            }
            wtr.flush()?;
        }
        std::fs::rename(&tmp, &self.path)?;
        info!(path = %self.path.display(), bookings = bookings.len(), "persisted master table");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    saved: Vec<Booking>,
    persist_count: usize,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_bookings(bookings: Vec<Booking>) -> Self {
        Self {
            saved: bookings,
            persist_count: 0,
        }
    }

    pub fn saved(&self) -> &[Booking] {
        &self.saved
    }

    pub fn persist_count(&self) -> usize {
        self.persist_count
    }
}

#[cfg(test)]
impl MasterStore for MemoryStore {
    fn load(&self) -> Result<Vec<Booking>> {
        Ok(self.saved.clone())
    }

    fn persist(&mut self, bookings: &[Booking]) -> Result<()> {
        self.saved = bookings.to_vec();
        self.persist_count += 1;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Master table
// ---------------------------------------------------------------------------

/// The in-memory master table plus the store it is persisted to.
pub struct Master<S: MasterStore> {
    store: S,
    bookings: Vec<Booking>,
}

impl<S: MasterStore> Master<S> {
    pub fn open(store: S) -> Result<Self> {
        let bookings = store.load()?;
        Ok(Self { store, bookings })
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Confirmation codes currently in the table.
    pub fn codes(&self) -> HashSet<String> {
        self.bookings
            .iter()
            .filter_map(|b| b.code())
            .map(str::to_string)
            .collect()
    }

    /// Append `unique` after the existing rows and rewrite the store. On a
    /// failed write the in-memory table is left as it was.
    pub fn append_and_persist(&mut self, unique: Vec<Booking>) -> Result<()> {
        let mut next = Vec::with_capacity(self.bookings.len() + unique.len());
        next.extend_from_slice(&self.bookings);
        next.extend(unique);
        self.store.persist(&next)?;
        self.bookings = next;
        Ok(())
    }
}
