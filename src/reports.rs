use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use crate::models::Booking;

pub const RECENT_LIMIT: usize = 20;

// ---------------------------------------------------------------------------
// Revenue
// ---------------------------------------------------------------------------

pub fn total_revenue(bookings: &[Booking]) -> f64 {
    bookings.iter().map(|b| b.gross_revenue.unwrap_or(0.0)).sum()
}

// ---------------------------------------------------------------------------
// Monthly buckets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBucket {
    /// Arrival month, `YYYY-MM`.
    pub month: String,
    pub bookings: usize,
    pub revenue: f64,
    pub nights: i64,
    /// Mean stay over bookings whose length is known.
    pub average_nights: Option<f64>,
}

#[derive(Default)]
struct MonthAcc {
    bookings: usize,
    revenue: f64,
    nights: i64,
    known_stays: usize,
}

/// One bucket per arrival month that has at least one booking, oldest first.
/// Bookings without an arrival date are not bucketed.
pub fn get_monthly(bookings: &[Booking]) -> Vec<MonthlyBucket> {
    let mut months: BTreeMap<(i32, u32), MonthAcc> = BTreeMap::new();
    for b in bookings {
        let Some(arrival) = b.arrival_date else {
            continue;
        };
        let acc = months.entry((arrival.year(), arrival.month())).or_default();
        acc.bookings += 1;
        acc.revenue += b.gross_revenue.unwrap_or(0.0);
        if let Some(n) = b.nights() {
            acc.nights += n;
            acc.known_stays += 1;
        }
    }
    months
        .into_iter()
        .map(|((y, m), acc)| MonthlyBucket {
            month: format!("{y:04}-{m:02}"),
            bookings: acc.bookings,
            revenue: acc.revenue,
            nights: acc.nights,
            average_nights: (acc.known_stays > 0)
                .then(|| acc.nights as f64 / acc.known_stays as f64),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Lead time
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadBucket {
    Week,
    Month,
    Quarter,
    Beyond,
}

pub const LEAD_BUCKETS: &[LeadBucket] = &[
    LeadBucket::Week,
    LeadBucket::Month,
    LeadBucket::Quarter,
    LeadBucket::Beyond,
];

impl LeadBucket {
    /// Bins are [0,7], (7,30], (30,90] and everything above 90 days.
    pub fn for_days(days: i64) -> Option<LeadBucket> {
        match days {
            0..=7 => Some(Self::Week),
            8..=30 => Some(Self::Month),
            31..=90 => Some(Self::Quarter),
            d if d > 90 => Some(Self::Beyond),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Week => "0-7 days",
            Self::Month => "8-30 days",
            Self::Quarter => "31-90 days",
            Self::Beyond => ">90 days",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadShare {
    pub bucket: LeadBucket,
    pub label: &'static str,
    pub count: usize,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadTimeDistribution {
    pub buckets: Vec<LeadShare>,
    /// Bookings with a lead time that fell in some bucket.
    pub total: usize,
}

pub fn get_lead_time_distribution(bookings: &[Booking]) -> LeadTimeDistribution {
    let mut counts = [0usize; 4];
    for bucket in bookings
        .iter()
        .filter_map(|b| b.lead_time())
        .filter_map(LeadBucket::for_days)
    {
        counts[bucket as usize] += 1;
    }
    let total: usize = counts.iter().sum();
    let buckets = LEAD_BUCKETS
        .iter()
        .zip(counts)
        .map(|(bucket, count)| LeadShare {
            bucket: *bucket,
            label: bucket.label(),
            count,
            pct: if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();
    LeadTimeDistribution { buckets, total }
}

// ---------------------------------------------------------------------------
// Recent bookings
// ---------------------------------------------------------------------------

/// Latest arrivals first; undated bookings sort last and ties keep table order.
pub fn get_recent(bookings: &[Booking], limit: usize) -> Vec<Booking> {
    let mut sorted: Vec<&Booking> = bookings.iter().collect();
    sorted.sort_by(|a, b| match (a.arrival_date, b.arrival_date) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    sorted.into_iter().take(limit).cloned().collect()
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub bookings: usize,
    pub total_revenue: f64,
    pub monthly: Vec<MonthlyBucket>,
    pub lead_time: LeadTimeDistribution,
    pub recent: Vec<Booking>,
}

pub fn get_dashboard(bookings: &[Booking]) -> Dashboard {
    Dashboard {
        bookings: bookings.len(),
        total_revenue: total_revenue(bookings),
        monthly: get_monthly(bookings),
        lead_time: get_lead_time_distribution(bookings),
        recent: get_recent(bookings, RECENT_LIMIT),
    }
}
