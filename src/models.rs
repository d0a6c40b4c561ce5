use chrono::NaiveDate;
use serde::Serialize;

use crate::schema::{Column, ValueKind, ALL_COLUMNS};

/// A CSV file as read, before any header normalization or typing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell at `row` under header `name`; missing cells read as empty.
    pub fn cell(&self, row: usize, name: &str) -> Option<&str> {
        let idx = self.column_index(name)?;
        Some(self.rows.get(row)?.get(idx).map(String::as_str).unwrap_or(""))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One booking in canonical form. Unparseable values are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Booking {
    pub reservation_date: Option<NaiveDate>,
    pub arrival_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
    pub gross_revenue: Option<f64>,
    pub confirmation_code: Option<String>,
}

impl Booking {
    /// Length of stay in days.
    pub fn nights(&self) -> Option<i64> {
        Some((self.departure_date? - self.arrival_date?).num_days())
    }

    /// Days between booking and arrival.
    pub fn lead_time(&self) -> Option<i64> {
        Some((self.arrival_date? - self.reservation_date?).num_days())
    }

    pub fn code(&self) -> Option<&str> {
        self.confirmation_code.as_deref()
    }

    /// Render one column the way the master file stores it. Nulls are empty.
    pub fn field(&self, column: Column) -> String {
        match column.kind() {
            ValueKind::Date => {
                let date = match column {
                    Column::ReservationDate => self.reservation_date,
                    Column::ArrivalDate => self.arrival_date,
                    _ => self.departure_date,
                };
                date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
            }
            ValueKind::Decimal => self.gross_revenue.map(|v| v.to_string()).unwrap_or_default(),
            ValueKind::Text => self.confirmation_code.clone().unwrap_or_default(),
        }
    }

    /// All canonical fields in master-file column order.
    pub fn to_record(&self) -> Vec<String> {
        ALL_COLUMNS.iter().map(|c| self.field(*c)).collect()
    }
}
