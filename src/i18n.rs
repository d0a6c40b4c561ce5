use serde::{Deserialize, Serialize};

use crate::schema::Column;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub fn labels(&self) -> &'static Labels {
        match self {
            Self::En => &EN,
            Self::Fr => &FR,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Fr => "Français",
        }
    }
}

/// User-facing strings for one language. The data behind them never changes.
#[derive(Debug)]
pub struct Labels {
    pub title: &'static str,
    pub duplicates: &'static str,
    pub no_duplicates: &'static str,
    pub new_bookings: &'static str,
    added_count: &'static str,
    dry_run_count: &'static str,
    pub repeats: &'static str,
    pub no_new: &'static str,
    pub kpi_header: &'static str,
    pub total_rev: &'static str,
    pub monthly_rev: &'static str,
    pub monthly_nights: &'static str,
    pub avg_nights: &'static str,
    pub lead_dist: &'static str,
    pub recent_bookings: &'static str,
    missing_cols: &'static str,
    pub month: &'static str,
    pub share: &'static str,
    pub reservation_date: &'static str,
    pub arrival: &'static str,
    pub departure: &'static str,
    pub gross_revenue: &'static str,
    pub confirmation_code: &'static str,
}

impl Labels {
    pub fn added_count(&self, count: usize) -> String {
        self.added_count.replace("{count}", &count.to_string())
    }

    pub fn dry_run_count(&self, count: usize) -> String {
        self.dry_run_count.replace("{count}", &count.to_string())
    }

    pub fn missing_cols(&self, columns: &[Column]) -> String {
        let names: Vec<&str> = columns.iter().map(|c| self.column(*c)).collect();
        self.missing_cols.replace("{cols}", &names.join(", "))
    }

    pub fn column(&self, column: Column) -> &'static str {
        match column {
            Column::ReservationDate => self.reservation_date,
            Column::ArrivalDate => self.arrival,
            Column::DepartureDate => self.departure,
            Column::GrossRevenue => self.gross_revenue,
            Column::ConfirmationCode => self.confirmation_code,
        }
    }
}

static EN: Labels = Labels {
    title: "Airbnb Revenue Dashboard",
    duplicates: "Potential Duplicates",
    no_duplicates: "No duplicates.",
    new_bookings: "New Bookings Added",
    added_count: "Added {count} new bookings.",
    dry_run_count: "Dry run: {count} bookings would be added.",
    repeats: "Repeated in this file (kept first)",
    no_new: "No new bookings to add.",
    kpi_header: "Key Metrics",
    total_rev: "Total Gross Revenue",
    monthly_rev: "Monthly Gross Revenue",
    monthly_nights: "Monthly Occupancy Nights",
    avg_nights: "Average Nights per Booking (Monthly)",
    lead_dist: "Lead Time Distribution (%)",
    recent_bookings: "Recent Bookings Preview",
    missing_cols: "Missing expected columns: {cols}. Please check your export headers.",
    month: "Month",
    share: "Share",
    reservation_date: "Reservation Date",
    arrival: "Arrival Date",
    departure: "Departure Date",
    gross_revenue: "Gross Revenue",
    confirmation_code: "Confirmation Code",
};

static FR: Labels = Labels {
    title: "Tableau de Bord Revenu Airbnb",
    duplicates: "Doublons potentiels",
    no_duplicates: "Aucun doublon.",
    new_bookings: "Nouvelles Réservations Ajoutées",
    added_count: "{count} nouvelles réservations ajoutées.",
    dry_run_count: "Simulation : {count} réservations seraient ajoutées.",
    repeats: "Répétées dans ce fichier (première conservée)",
    no_new: "Aucune nouvelle réservation à ajouter.",
    kpi_header: "Principaux indicateurs",
    total_rev: "Revenu Brut Total",
    monthly_rev: "Revenu Brut Mensuel",
    monthly_nights: "Nuits Occupées Mensuelles",
    avg_nights: "Nuits Moyennes par Réservation (Mensuel)",
    lead_dist: "Distribution du Délai de Réservation (%)",
    recent_bookings: "Aperçu des Réservations Récentes",
    missing_cols: "Colonnes manquantes: {cols}. Veuillez vérifier vos en-têtes.",
    month: "Mois",
    share: "Part",
    reservation_date: "Date de réservation",
    arrival: "Date de début",
    departure: "Date de fin",
    gross_revenue: "Revenus bruts",
    confirmation_code: "Code de confirmation",
};
