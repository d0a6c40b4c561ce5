use serde::Serialize;

/// The kind of value a canonical column holds once coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Date,
    Decimal,
    Text,
}

/// Canonical booking columns. Every export variant is normalized onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    ReservationDate,
    ArrivalDate,
    DepartureDate,
    GrossRevenue,
    ConfirmationCode,
}

/// Required columns, in the order they are written to the master file.
pub const ALL_COLUMNS: &[Column] = &[
    Column::ReservationDate,
    Column::ArrivalDate,
    Column::DepartureDate,
    Column::GrossRevenue,
    Column::ConfirmationCode,
];

impl Column {
    pub fn canonical_name(&self) -> &'static str {
        match self {
            Self::ReservationDate => "reservation_date",
            Self::ArrivalDate => "arrival_date",
            Self::DepartureDate => "departure_date",
            Self::GrossRevenue => "gross_revenue",
            Self::ConfirmationCode => "confirmation_code",
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::ReservationDate | Self::ArrivalDate | Self::DepartureDate => ValueKind::Date,
            Self::GrossRevenue => ValueKind::Decimal,
            Self::ConfirmationCode => ValueKind::Text,
        }
    }

    /// Known header spellings, checked in order. The canonical name comes first
    /// so an already-normalized file maps onto itself.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::ReservationDate => &[
                "reservation_date",
                "Date de réservation",
                "Booking date",
                "Reservation Date",
                "Date Réservation",
            ],
            Self::ArrivalDate => &[
                "arrival_date",
                "Date de début",
                "Start date",
                "Arrival Date",
                "Check-in Date",
                "Date début",
            ],
            Self::DepartureDate => &[
                "departure_date",
                "Date de fin",
                "End date",
                "Departure Date",
                "Check-out Date",
                "Date fin",
            ],
            Self::GrossRevenue => &[
                "gross_revenue",
                "Revenus bruts",
                "Gross earnings",
                "Gross Revenue",
                "Revenue",
                "Revenus",
            ],
            Self::ConfirmationCode => &[
                "confirmation_code",
                "Code de confirmation",
                "Confirmation Code",
                "Booking ID",
                "Reservation Code",
                "Reference code",
            ],
        }
    }

    /// Does `header` match one of this column's aliases (case-insensitive)?
    pub fn matches(&self, header: &str) -> bool {
        let needle = header.trim().to_lowercase();
        self.aliases().iter().any(|a| a.to_lowercase() == needle)
    }

    /// Resolve a raw header spelling to its canonical column.
    pub fn from_header(header: &str) -> Option<Column> {
        ALL_COLUMNS.iter().find(|c| c.matches(header)).copied()
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.canonical_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_alias_resolves_to_its_column() {
        for col in ALL_COLUMNS {
            for alias in col.aliases() {
                assert_eq!(Column::from_header(alias), Some(*col), "alias {alias}");
                assert_eq!(Column::from_header(&alias.to_uppercase()), Some(*col), "alias {alias}");
                assert_eq!(Column::from_header(&alias.to_lowercase()), Some(*col), "alias {alias}");
            }
        }
    }

    #[test]
    fn test_alias_lists_are_disjoint() {
        for a in ALL_COLUMNS {
            for b in ALL_COLUMNS.iter().filter(|b| *b != a) {
                for alias in a.aliases() {
                    assert!(!b.matches(alias), "{alias} claimed by both {a} and {b}");
                }
            }
        }
    }

    #[test]
    fn test_unknown_header_has_no_column() {
        assert_eq!(Column::from_header("Guest name"), None);
        assert_eq!(Column::from_header(""), None);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(Column::from_header("  Gross earnings "), Some(Column::GrossRevenue));
    }

    #[test]
    fn test_value_kinds() {
        assert_eq!(Column::ArrivalDate.kind(), ValueKind::Date);
        assert_eq!(Column::GrossRevenue.kind(), ValueKind::Decimal);
        assert_eq!(Column::ConfirmationCode.kind(), ValueKind::Text);
    }
}
