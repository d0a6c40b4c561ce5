use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};
use serde::Serialize;

use crate::cli::{Context, ReportCommands};
use crate::error::Result;
use crate::fmt::{date, money};
use crate::i18n::Labels;
use crate::models::Booking;
use crate::reports::{self, Dashboard, LeadTimeDistribution, MonthlyBucket};

pub fn run(ctx: &Context, cmd: ReportCommands) -> Result<()> {
    let master = ctx.open_master()?;
    let bookings = master.bookings();
    let labels = ctx.labels();
    let currency = ctx.currency.as_str();

    if master.is_empty() && !cmd.is_json() {
        println!("{}", labels.no_new);
        return Ok(());
    }

    let out = match cmd {
        ReportCommands::Summary { json } => {
            let total = reports::total_revenue(bookings);
            if json {
                to_json(&serde_json::json!({ "bookings": bookings.len(), "total_revenue": total }))?
            } else {
                format_total(total, labels, currency)
            }
        }
        ReportCommands::Monthly { json } => {
            let months = reports::get_monthly(bookings);
            if json {
                to_json(&months)?
            } else {
                format_monthly(&months, labels, currency)
            }
        }
        ReportCommands::LeadTime { json } => {
            let dist = reports::get_lead_time_distribution(bookings);
            if json {
                to_json(&dist)?
            } else {
                format_lead_time(&dist, labels)
            }
        }
        ReportCommands::Recent { limit, json } => {
            let recent = reports::get_recent(bookings, limit);
            if json {
                to_json(&recent)?
            } else {
                format!(
                    "{}\n{}",
                    labels.recent_bookings.bold(),
                    booking_table(&recent, labels, currency)
                )
            }
        }
        ReportCommands::Dashboard { json } => {
            let dash = reports::get_dashboard(bookings);
            if json {
                to_json(&dash)?
            } else {
                format_dashboard(&dash, labels, currency)
            }
        }
    };
    println!("{out}");
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

// ---------------------------------------------------------------------------
// Pure formatting functions (report data → String)
// ---------------------------------------------------------------------------

pub(crate) fn booking_table(bookings: &[Booking], labels: &Labels, currency: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        labels.confirmation_code,
        labels.reservation_date,
        labels.arrival,
        labels.departure,
        labels.gross_revenue,
    ]);
    for b in bookings {
        table.add_row(vec![
            Cell::new(b.code().unwrap_or("—")),
            Cell::new(date(b.reservation_date)),
            Cell::new(date(b.arrival_date)),
            Cell::new(date(b.departure_date)),
            Cell::new(b.gross_revenue.map(|v| money(v, currency)).unwrap_or_else(|| "—".into()))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn format_total(total: f64, labels: &Labels, currency: &str) -> String {
    format!("{}: {}", labels.total_rev.bold(), money(total, currency).green())
}

pub fn format_monthly(months: &[MonthlyBucket], labels: &Labels, currency: &str) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        labels.month,
        labels.monthly_rev,
        labels.monthly_nights,
        labels.avg_nights,
    ]);
    for m in months {
        table.add_row(vec![
            Cell::new(&m.month),
            Cell::new(money(m.revenue, currency)).set_alignment(CellAlignment::Right),
            Cell::new(m.nights).set_alignment(CellAlignment::Right),
            Cell::new(
                m.average_nights
                    .map(|a| format!("{a:.1}"))
                    .unwrap_or_else(|| "—".into()),
            )
            .set_alignment(CellAlignment::Right),
        ]);
    }
    table.to_string()
}

pub fn format_lead_time(dist: &LeadTimeDistribution, labels: &Labels) -> String {
    let mut table = Table::new();
    table.set_header(vec!["", labels.share]);
    for share in &dist.buckets {
        let bar = "█".repeat((share.pct / 5.0).round() as usize);
        table.add_row(vec![
            Cell::new(share.label),
            Cell::new(format!("{:>5.1}% {bar}", share.pct)),
        ]);
    }
    format!("{}\n{table}", labels.lead_dist.bold())
}

pub fn format_dashboard(dash: &Dashboard, labels: &Labels, currency: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", labels.title.bold()));
    out.push_str(&format!("{}\n\n", labels.kpi_header.underline()));
    out.push_str(&format_total(dash.total_revenue, labels, currency));
    out.push_str("\n\n");
    out.push_str(&format_monthly(&dash.monthly, labels, currency));
    out.push_str("\n\n");
    out.push_str(&format_lead_time(&dash.lead_time, labels));
    out.push_str("\n\n");
    out.push_str(&format!(
        "{}\n{}",
        labels.recent_bookings.bold(),
        booking_table(&dash.recent, labels, currency)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::importer::parse_date;

    fn sample() -> Vec<Booking> {
        vec![
            Booking {
                reservation_date: parse_date("2025-01-01"),
                arrival_date: parse_date("2025-01-11"),
                departure_date: parse_date("2025-01-14"),
                gross_revenue: Some(1234.5),
                confirmation_code: Some("HMAAA".into()),
            },
            Booking {
                reservation_date: parse_date("2025-01-01"),
                arrival_date: parse_date("2025-02-11"),
                departure_date: None,
                gross_revenue: None,
                confirmation_code: Some("HMBBB".into()),
            },
        ]
    }

    #[test]
    fn test_format_total_uses_currency() {
        let s = format_total(1234.5, Language::En.labels(), "€");
        assert!(s.contains("Total Gross Revenue"));
        assert!(s.contains("€1,234.50"));
    }

    #[test]
    fn test_format_monthly_lists_each_month() {
        let months = reports::get_monthly(&sample());
        let s = format_monthly(&months, Language::En.labels(), "$");
        assert!(s.contains("2025-01"));
        assert!(s.contains("2025-02"));
        assert!(s.contains("$1,234.50"));
        assert!(s.contains("3.0"));
    }

    #[test]
    fn test_format_lead_time_shows_all_buckets() {
        let dist = reports::get_lead_time_distribution(&sample());
        let s = format_lead_time(&dist, Language::En.labels());
        for label in ["0-7 days", "8-30 days", "31-90 days", ">90 days"] {
            assert!(s.contains(label), "missing {label}");
        }
        assert!(s.contains("50.0%"));
    }

    #[test]
    fn test_booking_table_uses_localized_headers() {
        let s = booking_table(&sample(), Language::Fr.labels(), "€").to_string();
        assert!(s.contains("Code de confirmation"));
        assert!(s.contains("Date de début"));
        assert!(s.contains("HMBBB"));
        assert!(s.contains("—"));
    }

    #[test]
    fn test_format_dashboard_contains_every_section() {
        let dash = reports::get_dashboard(&sample());
        let labels = Language::En.labels();
        let s = format_dashboard(&dash, labels, "€");
        for heading in [
            labels.kpi_header,
            labels.total_rev,
            labels.monthly_rev,
            labels.lead_dist,
            labels.recent_bookings,
        ] {
            assert!(s.contains(heading), "missing {heading}");
        }
    }
}
