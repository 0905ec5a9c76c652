use itertools::Itertools;
use strum_macros::Display;

use crate::analysis::Tally;
use crate::visualize::table::{HackathonTable, MONTH_TABLE};

/// Themes shown in the popularity chart.
pub const CHART_THEME_COUNT: usize = 15;
/// Themes listed in the report.
pub const REPORT_THEME_COUNT: usize = 5;
/// Theme pairs shown in the combinations chart.
pub const THEME_PAIR_COUNT: usize = 10;

/// Direction of the yearly counts, judged on the first and last year only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Trend {
    Growing,
    Declining,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YearlyTrend {
    /// Counts per year, oldest first.
    pub counts: Vec<(i32, usize)>,
    pub peak_year: i32,
    pub peak_count: usize,
    pub trend: Trend,
}

impl YearlyTrend {
    /// `None` when no record has a year.
    pub fn compute(table: &HackathonTable) -> Option<Self> {
        let counts = table
            .rows
            .iter()
            .filter_map(|row| row.year)
            .counts()
            .into_iter()
            .sorted()
            .collect_vec();

        let (&first, &last) = (counts.first()?, counts.last()?);
        let (peak_year, peak_count) = first_max(&counts)?;
        let trend = if last.1 > first.1 {
            Trend::Growing
        } else {
            Trend::Declining
        };

        Some(Self {
            peak_year,
            peak_count,
            trend,
            counts,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPattern {
    /// Counts per month label in calendar order; months without records are left out.
    pub counts: Vec<(&'static str, usize)>,
    pub peak_month: &'static str,
    pub peak_count: usize,
    pub slowest_month: &'static str,
}

impl MonthlyPattern {
    /// `None` when no record names a month.
    pub fn compute(table: &HackathonTable) -> Option<Self> {
        let per_month = table
            .rows
            .iter()
            .filter(|row| row.month.is_some())
            .map(|row| row.month_name)
            .counts();
        let counts = MONTH_TABLE
            .iter()
            .filter_map(|(name, _)| per_month.get(name).map(|&count| (*name, count)))
            .collect_vec();

        let (peak_month, peak_count) = first_max(&counts)?;
        let (slowest_month, _) = first_min(&counts)?;
        Some(Self {
            counts,
            peak_month,
            peak_count,
            slowest_month,
        })
    }
}

/// Online versus in-person split and the places named in `location`.
#[derive(Debug, Clone)]
pub struct GeographicInsights {
    pub online_count: usize,
    pub in_person_count: usize,
    /// Share of all records that are online, rounded to one decimal.
    pub online_percentage: f64,
    pub countries: Tally,
    pub cities: Tally,
}

impl GeographicInsights {
    /// A location of "online" counts as online; any other non-empty location
    /// counts as in person. "City, ..., Country" locations feed the city and
    /// country tallies, single-part locations only the country tally.
    pub fn compute(table: &HackathonTable) -> Self {
        let mut online_count = 0;
        let mut in_person_count = 0;
        let mut countries = Tally::default();
        let mut cities = Tally::default();

        for row in &table.rows {
            let location = row.location.trim();
            let lowered = location.to_lowercase();
            if lowered == "online" {
                online_count += 1;
            } else if !location.is_empty() {
                in_person_count += 1;
                if lowered != "in-person" {
                    let parts = location.split(',').map(str::trim).collect_vec();
                    match parts.as_slice() {
                        [only] => countries.add(*only),
                        [city, .., country] => {
                            countries.add(*country);
                            cities.add(*city);
                        }
                        [] => {}
                    }
                }
            }
        }

        Self {
            online_count,
            in_person_count,
            online_percentage: percentage(online_count, table.len()),
            countries,
            cities,
        }
    }

    pub fn top_country(&self) -> Option<(&str, usize)> {
        self.countries
            .top(1)
            .first()
            .map(|(country, count)| (country.as_str(), *count))
    }
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total: usize,
    pub unique_themes: usize,
    pub average_themes: f64,
}

/// Everything the charts and the report are built from.
#[derive(Debug, Clone)]
pub struct Insights {
    pub total_hackathons: usize,
    pub theme_counts: Tally,
    pub yearly: Option<YearlyTrend>,
    pub monthly: Option<MonthlyPattern>,
    pub geographic: GeographicInsights,
    pub theme_pairs: Tally<(String, String)>,
    pub dashboard: DashboardSummary,
}

impl Insights {
    pub fn compute(table: &HackathonTable) -> Self {
        let theme_counts: Tally = table
            .rows
            .iter()
            .flat_map(|row| row.themes.iter())
            .collect();

        let average_themes = if table.is_empty() {
            0.0
        } else {
            table.rows.iter().map(|row| row.num_themes).sum::<usize>() as f64 / table.len() as f64
        };

        Self {
            total_hackathons: table.len(),
            dashboard: DashboardSummary {
                total: table.len(),
                unique_themes: theme_counts.len(),
                average_themes,
            },
            theme_counts,
            yearly: YearlyTrend::compute(table),
            monthly: MonthlyPattern::compute(table),
            geographic: GeographicInsights::compute(table),
            theme_pairs: theme_pairs(table),
        }
    }

    /// The `n` most frequent themes.
    pub fn top_themes(&self, n: usize) -> Vec<(&str, usize)> {
        self.theme_counts
            .top(n)
            .into_iter()
            .map(|(theme, count)| (theme.as_str(), count))
            .collect_vec()
    }

    /// The `n` most frequent theme pairs.
    pub fn top_pairs(&self, n: usize) -> Vec<((&str, &str), usize)> {
        self.theme_pairs
            .top(n)
            .into_iter()
            .map(|((a, b), count)| ((a.as_str(), b.as_str()), count))
            .collect_vec()
    }
}

/// Every unordered pair of themes within a record, as a sorted tuple.
fn theme_pairs(table: &HackathonTable) -> Tally<(String, String)> {
    table
        .rows
        .iter()
        .flat_map(|row| row.themes.iter().tuple_combinations())
        .map(|(a, b): (&String, &String)| {
            if a <= b {
                (a.clone(), b.clone())
            } else {
                (b.clone(), a.clone())
            }
        })
        .collect()
}

/// Share in percent to one decimal, halves going to the even digit.
fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round_ties_even() / 10.0
}

/// First entry with the highest count.
fn first_max<K: Copy>(counts: &[(K, usize)]) -> Option<(K, usize)> {
    counts
        .iter()
        .copied()
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
}

/// First entry with the lowest count.
fn first_min<K: Copy>(counts: &[(K, usize)]) -> Option<(K, usize)> {
    counts
        .iter()
        .copied()
        .reduce(|best, next| if next.1 < best.1 { next } else { best })
}
