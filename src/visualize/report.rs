use std::fmt;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{HackathonError, Result};
use crate::visualize::insights::{Insights, REPORT_THEME_COUNT};

pub const REPORT_FILE: &str = "insights_report.txt";

const WIDTH: usize = 70;

/// Plain-text summary of a set of insights, ending with the list of charts
/// written.
///
/// Sections without data (no dated records, no months, ...) are left out.
#[derive(Debug, Clone, Copy)]
pub struct InsightsReport<'a> {
    pub insights: &'a Insights,
    pub charts: &'a [String],
}

impl fmt::Display for InsightsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let insights = self.insights;
        let rule = "=".repeat(WIDTH);
        writeln!(f, "{rule}\nHACKATHON DATA INSIGHTS REPORT\n{rule}\n")?;
        writeln!(
            f,
            "Total Hackathons Analyzed: {}\n",
            insights.total_hackathons
        )?;

        section(f, "TOP THEMES")?;
        for (rank, (theme, count)) in insights.top_themes(REPORT_THEME_COUNT).iter().enumerate() {
            writeln!(f, "  {}. {}: {count} hackathons", rank + 1, title_case(theme))?;
        }
        writeln!(f)?;

        if let Some(yearly) = &insights.yearly {
            section(f, "YEARLY TRENDS")?;
            writeln!(
                f,
                "  Peak Year: {} ({} hackathons)",
                yearly.peak_year, yearly.peak_count
            )?;
            writeln!(
                f,
                "  Overall Trend: {}\n",
                title_case(&yearly.trend.to_string())
            )?;
        }

        if let Some(monthly) = &insights.monthly {
            section(f, "SEASONAL PATTERNS")?;
            writeln!(
                f,
                "  Busiest Month: {} ({} hackathons)",
                monthly.peak_month, monthly.peak_count
            )?;
            writeln!(f, "  Slowest Month: {}\n", monthly.slowest_month)?;
        }

        let geo = &insights.geographic;
        section(f, "GEOGRAPHIC DISTRIBUTION")?;
        writeln!(
            f,
            "  Online: {} ({:.1}%)",
            geo.online_count, geo.online_percentage
        )?;
        writeln!(f, "  In-Person: {}", geo.in_person_count)?;
        writeln!(f, "  Countries Represented: {}", geo.countries.len())?;
        writeln!(f, "  Cities Represented: {}\n", geo.cities.len())?;

        section(f, "KEY INSIGHTS")?;
        for (number, [first, second]) in key_insights(insights).iter().enumerate() {
            writeln!(f, "  {}. {first}\n     {second}", number + 1)?;
        }
        writeln!(f)?;

        section(f, "Generated Charts:")?;
        for chart in self.charts {
            writeln!(f, "  - {chart}")?;
        }
        write!(f, "\n{rule}")
    }
}

/// Render the report for `insights` and the `charts` written.
pub fn render_report(insights: &Insights, charts: &[String]) -> String {
    InsightsReport { insights, charts }.to_string()
}

/// Write `report` to [`REPORT_FILE`] inside `dir`, creating the directory if needed.
pub fn save_report(report: &str, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| HackathonError::io(dir, e))?;
    let path = dir.join(REPORT_FILE);
    fs::write(&path, report).map_err(|e| HackathonError::io(&path, e))?;
    info!(path = %path.display(), "insights report saved");
    Ok(())
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{title}\n{}", "-".repeat(WIDTH))
}

/// Two-line sentences, one per insight that has data behind it.
fn key_insights(insights: &Insights) -> Vec<[String; 2]> {
    let mut sentences = vec![];

    if let Some((theme, count)) = insights.top_themes(1).first() {
        sentences.push([
            format!(
                "'{}' is the most popular theme, appearing in",
                title_case(theme)
            ),
            format!("{count} hackathons."),
        ]);
    }
    if let Some(yearly) = &insights.yearly {
        sentences.push([
            format!("Hackathon activity peaked in {}, showing", yearly.peak_year),
            format!("a {} trend overall.", yearly.trend),
        ]);
    }
    if let Some(monthly) = &insights.monthly {
        sentences.push([
            format!(
                "{} is the busiest month for hackathons,",
                monthly.peak_month
            ),
            format!("while {} sees the least activity.", monthly.slowest_month),
        ]);
    }
    let geo = &insights.geographic;
    sentences.push([
        format!(
            "{:.1}% of hackathons are online, spanning",
            geo.online_percentage
        ),
        format!(
            "{} countries and increasing global accessibility.",
            geo.countries.len()
        ),
    ]);

    sentences
}

/// Upper-cases the first letter of every alphabetic run, lower-cases the rest.
pub fn title_case(text: &str) -> String {
    let mut previous_alphabetic = false;
    text.chars()
        .flat_map(|c| {
            let mapped: Vec<char> = if previous_alphabetic {
                c.to_lowercase().collect()
            } else {
                c.to_uppercase().collect()
            };
            previous_alphabetic = c.is_alphabetic();
            mapped
        })
        .collect()
}
