use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::{debug, info};

use crate::config::RenderConfig;
use crate::error::{HackathonError, Result};
use crate::visualize::insights::{
    GeographicInsights, Insights, MonthlyPattern, YearlyTrend, CHART_THEME_COUNT,
    THEME_PAIR_COUNT,
};

pub const THEME_POPULARITY_CHART: &str = "01_theme_popularity.png";
pub const YEARLY_TRENDS_CHART: &str = "02_yearly_trends.png";
pub const MONTHLY_DISTRIBUTION_CHART: &str = "03_monthly_distribution.png";
pub const GEOGRAPHIC_DISTRIBUTION_CHART: &str = "04_geographic_distribution.png";
pub const THEME_COMBINATIONS_CHART: &str = "05_theme_combinations.png";
pub const DASHBOARD_CHART: &str = "06_dashboard.png";

const PRIMARY: RGBColor = RGBColor(0x2E, 0x86, 0xAB);
const SECONDARY: RGBColor = RGBColor(0xA2, 0x3B, 0x72);
const ACCENT: RGBColor = RGBColor(0xF1, 0x8F, 0x01);

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Draws the chart set for a batch of insights into the configured directory.
pub struct ChartRenderer {
    config: RenderConfig,
}

impl ChartRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render every chart that has data. Returns the file names written, in order.
    pub fn render_all(&self, insights: &Insights) -> Result<Vec<String>> {
        let dir = &self.config.output_dir;
        fs::create_dir_all(dir).map_err(|e| HackathonError::io(dir, e))?;

        let mut generated = vec![];
        let mut record = |name: &str, written: bool| {
            if written {
                debug!(chart = name, "chart written");
                generated.push(name.to_string());
            } else {
                debug!(chart = name, "no data, chart skipped");
            }
        };

        record(
            THEME_POPULARITY_CHART,
            self.theme_popularity(&dir.join(THEME_POPULARITY_CHART), insights)?,
        );
        record(
            YEARLY_TRENDS_CHART,
            self.yearly_trends(&dir.join(YEARLY_TRENDS_CHART), insights.yearly.as_ref())?,
        );
        record(
            MONTHLY_DISTRIBUTION_CHART,
            self.monthly_distribution(
                &dir.join(MONTHLY_DISTRIBUTION_CHART),
                insights.monthly.as_ref(),
            )?,
        );
        record(
            GEOGRAPHIC_DISTRIBUTION_CHART,
            self.geographic_distribution(&dir.join(GEOGRAPHIC_DISTRIBUTION_CHART), insights)?,
        );
        record(
            THEME_COMBINATIONS_CHART,
            self.theme_combinations(&dir.join(THEME_COMBINATIONS_CHART), insights)?,
        );
        record(DASHBOARD_CHART, self.dashboard(&dir.join(DASHBOARD_CHART), insights)?);

        info!(count = generated.len(), dir = %dir.display(), "charts rendered");
        Ok(generated)
    }

    fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn font(&self, size: u32) -> TextStyle<'_> {
        TextStyle::from((self.config.font_family.as_str(), size).into_font())
    }

    fn theme_popularity(&self, path: &Path, insights: &Insights) -> Result<bool> {
        let themes = labeled(insights.top_themes(CHART_THEME_COUNT));
        if themes.is_empty() {
            return Ok(false);
        }
        let root = BitMapBackend::new(path, self.size()).into_drawing_area();
        root.fill(&WHITE)?;
        self.horizontal_bars(
            &root,
            &format!("Top {CHART_THEME_COUNT} Most Popular Hackathon Themes"),
            &themes,
        )?;
        root.present()?;
        Ok(true)
    }

    fn yearly_trends(&self, path: &Path, yearly: Option<&YearlyTrend>) -> Result<bool> {
        let Some(yearly) = yearly else {
            return Ok(false);
        };
        let root = BitMapBackend::new(path, self.size()).into_drawing_area();
        root.fill(&WHITE)?;
        self.year_line(&root, "Hackathon Trends Over Time", yearly)?;
        root.present()?;
        Ok(true)
    }

    fn monthly_distribution(
        &self,
        path: &Path,
        monthly: Option<&MonthlyPattern>,
    ) -> Result<bool> {
        let Some(monthly) = monthly else {
            return Ok(false);
        };
        let bars = monthly
            .counts
            .iter()
            .map(|(month, count)| (month.to_string(), *count))
            .collect::<Vec<_>>();
        let root = BitMapBackend::new(path, self.size()).into_drawing_area();
        root.fill(&WHITE)?;
        self.vertical_bars(&root, "Hackathon Distribution by Month", &bars)?;
        root.present()?;
        Ok(true)
    }

    fn geographic_distribution(&self, path: &Path, insights: &Insights) -> Result<bool> {
        let geo = &insights.geographic;
        let (width, height) = self.size();
        let root = BitMapBackend::new(path, (width, height * 5 / 3)).into_drawing_area();
        root.fill(&WHITE)?;

        let panels = root.split_evenly((2, 2));
        self.pie(
            &panels[0],
            "Online vs In-Person Distribution",
            &[
                ("Online", geo.online_count, PRIMARY),
                ("In-Person", geo.in_person_count, SECONDARY),
            ],
        )?;

        let countries = labeled(geo.countries.top(10).into_iter().map(|(c, n)| (c.as_str(), n)));
        if !countries.is_empty() {
            self.horizontal_bars(&panels[1], "Top 10 Countries", &countries)?;
        }
        let cities = labeled(geo.cities.top(10).into_iter().map(|(c, n)| (c.as_str(), n)));
        if !cities.is_empty() {
            self.horizontal_bars(&panels[2], "Top 10 Cities", &cities)?;
        }

        self.text_panel(&panels[3], &geographic_summary(insights.total_hackathons, geo))?;
        root.present()?;
        Ok(true)
    }

    fn theme_combinations(&self, path: &Path, insights: &Insights) -> Result<bool> {
        let pairs = insights
            .top_pairs(THEME_PAIR_COUNT)
            .into_iter()
            .map(|((a, b), count)| (format!("{a} + {b}"), count))
            .collect::<Vec<_>>();
        if pairs.is_empty() {
            return Ok(false);
        }
        let root = BitMapBackend::new(path, self.size()).into_drawing_area();
        root.fill(&WHITE)?;
        self.horizontal_bars(
            &root,
            &format!("Top {THEME_PAIR_COUNT} Theme Combinations"),
            &pairs,
        )?;
        root.present()?;
        Ok(true)
    }

    fn dashboard(&self, path: &Path, insights: &Insights) -> Result<bool> {
        let (width, height) = self.size();
        let root = BitMapBackend::new(path, (width * 4 / 3, height * 5 / 3)).into_drawing_area();
        root.fill(&WHITE)?;
        let root = root.titled("Hackathon Data Dashboard", self.font(32))?;

        let (_, area_height) = root.dim_in_pixel();
        let (headline, rest) = root.split_vertically(area_height / 3);
        let (middle, bottom) = rest.split_vertically(area_height / 3);

        let summary = &insights.dashboard;
        let numbers = headline.split_evenly((1, 3));
        self.big_number(&numbers[0], &summary.total.to_string(), "Total Hackathons", PRIMARY)?;
        self.big_number(
            &numbers[1],
            &summary.unique_themes.to_string(),
            "Unique Themes",
            SECONDARY,
        )?;
        self.big_number(
            &numbers[2],
            &format!("{:.1}", summary.average_themes),
            "Avg Themes/Hackathon",
            ACCENT,
        )?;

        let top_ten = labeled(insights.top_themes(10));
        if !top_ten.is_empty() {
            self.vertical_bars(&middle, "Top 10 Themes", &top_ten)?;
        }

        let (bottom_width, _) = bottom.dim_in_pixel();
        let (trend_area, split_area) = bottom.split_horizontally(bottom_width * 2 / 3);
        if let Some(yearly) = &insights.yearly {
            self.year_line(&trend_area, "Yearly Trends", yearly)?;
        }
        let geo = &insights.geographic;
        self.pie(
            &split_area,
            "Format Distribution",
            &[
                ("Online", geo.online_count, PRIMARY),
                ("In-Person", geo.in_person_count, SECONDARY),
            ],
        )?;

        root.present()?;
        Ok(true)
    }

    /// Bars growing to the right, first entry on top, each labeled with its
    /// name and count.
    fn horizontal_bars(&self, area: &Area, title: &str, bars: &[(String, usize)]) -> Result<()> {
        let rows = bars.len() as f64;
        let max = bars.iter().map(|(_, count)| *count).max().unwrap_or(0).max(1) as f64;

        let mut chart = ChartBuilder::on(area)
            .caption(title, self.font(22))
            .margin(15)
            .x_label_area_size(35)
            .build_cartesian_2d(0f64..max * 1.6, 0f64..rows)?;
        chart
            .configure_mesh()
            .disable_y_mesh()
            .disable_y_axis()
            .x_desc("Number of Hackathons")
            .label_style(self.font(12))
            .draw()?;

        let row_bottom = |index: usize| rows - index as f64 - 1.0;
        chart.draw_series(bars.iter().enumerate().map(|(index, (_, count))| {
            Rectangle::new(
                [
                    (0.0, row_bottom(index) + 0.15),
                    (*count as f64, row_bottom(index) + 0.85),
                ],
                Palette99::pick(index).filled(),
            )
        }))?;
        let label_style = self.font(12).pos(Pos::new(HPos::Left, VPos::Center));
        chart.draw_series(bars.iter().enumerate().map(|(index, (label, count))| {
            Text::new(
                format!("{label} ({count})"),
                (*count as f64 + max * 0.02, row_bottom(index) + 0.5),
                label_style.clone(),
            )
        }))?;
        Ok(())
    }

    /// Bars growing upwards in the given order, each labeled above.
    fn vertical_bars(&self, area: &Area, title: &str, bars: &[(String, usize)]) -> Result<()> {
        let columns = bars.len() as f64;
        let max = bars.iter().map(|(_, count)| *count).max().unwrap_or(0).max(1) as f64;

        let mut chart = ChartBuilder::on(area)
            .caption(title, self.font(22))
            .margin(15)
            .y_label_area_size(45)
            .build_cartesian_2d(0f64..columns, 0f64..max * 1.3)?;
        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_x_axis()
            .y_desc("Number of Hackathons")
            .label_style(self.font(12))
            .draw()?;

        chart.draw_series(bars.iter().enumerate().map(|(index, (_, count))| {
            Rectangle::new(
                [
                    (index as f64 + 0.15, 0.0),
                    (index as f64 + 0.85, *count as f64),
                ],
                Palette99::pick(index).filled(),
            )
        }))?;
        let label_style = self.font(11).pos(Pos::new(HPos::Center, VPos::Bottom));
        chart.draw_series(bars.iter().enumerate().map(|(index, (label, count))| {
            Text::new(
                format!("{label}: {count}"),
                (index as f64 + 0.5, *count as f64 + max * 0.03),
                label_style.clone(),
            )
        }))?;
        Ok(())
    }

    fn year_line(&self, area: &Area, title: &str, yearly: &YearlyTrend) -> Result<()> {
        let points = yearly
            .counts
            .iter()
            .map(|&(year, count)| (f64::from(year), count as f64))
            .collect::<Vec<_>>();
        let first = points.first().map_or(0.0, |p| p.0);
        let last = points.last().map_or(0.0, |p| p.0);
        let top = yearly.peak_count.max(1) as f64 * 1.25;

        let mut chart = ChartBuilder::on(area)
            .caption(title, self.font(22))
            .margin(15)
            .x_label_area_size(35)
            .y_label_area_size(45)
            .build_cartesian_2d(first - 0.5..last + 0.5, 0f64..top)?;
        chart
            .configure_mesh()
            .x_labels(points.len().max(2))
            .x_label_formatter(&|year| format!("{year:.0}"))
            .x_desc("Year")
            .y_desc("Number of Hackathons")
            .label_style(self.font(12))
            .draw()?;

        chart.draw_series(AreaSeries::new(points.clone(), 0.0, PRIMARY.mix(0.3)))?;
        chart.draw_series(LineSeries::new(points.clone(), PRIMARY.stroke_width(3)))?;
        chart.draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, 5, PRIMARY.filled())),
        )?;
        let label_style = self.font(12).pos(Pos::new(HPos::Center, VPos::Bottom));
        chart.draw_series(points.iter().map(|&(year, count)| {
            Text::new(
                format!("{count:.0}"),
                (year, count + top * 0.03),
                label_style.clone(),
            )
        }))?;
        Ok(())
    }

    /// Pie starting at twelve o'clock, slices labeled with their share.
    fn pie(&self, area: &Area, title: &str, slices: &[(&str, usize, RGBColor)]) -> Result<()> {
        let area = area.titled(title, self.font(20))?;
        let total: usize = slices.iter().map(|(_, value, _)| value).sum();
        if total == 0 {
            return Ok(());
        }

        let (width, height) = area.dim_in_pixel();
        let center = (width as i32 / 2, height as i32 / 2);
        let radius = f64::from(width.min(height)) * 0.35;
        let at = |angle: f64, distance: f64| {
            (
                center.0 + (distance * angle.cos()) as i32,
                center.1 + (distance * angle.sin()) as i32,
            )
        };
        let label_style = self.font(14).pos(Pos::new(HPos::Center, VPos::Center));

        let mut start = -PI / 2.0;
        for &(label, value, color) in slices.iter().filter(|(_, value, _)| *value > 0) {
            let share = value as f64 / total as f64;
            let sweep = 2.0 * PI * share;
            let steps = ((share * 120.0).ceil() as usize).max(2);

            let mut outline = vec![center];
            outline.extend(
                (0..=steps).map(|step| at(start + sweep * step as f64 / steps as f64, radius)),
            );
            area.draw(&Polygon::new(outline, color.filled()))?;

            let label_at = at(start + sweep / 2.0, radius * 1.2);
            area.draw(&Text::new(
                format!("{label} {:.1}%", share * 100.0),
                label_at,
                label_style.clone(),
            ))?;
            start += sweep;
        }
        Ok(())
    }

    fn big_number(&self, area: &Area, value: &str, caption: &str, color: RGBColor) -> Result<()> {
        let (width, height) = area.dim_in_pixel();
        let x = width as i32 / 2;
        let value_style = self
            .font(60)
            .color(&color)
            .pos(Pos::new(HPos::Center, VPos::Center));
        let caption_style = self
            .font(16)
            .color(&RGBColor(0x80, 0x80, 0x80))
            .pos(Pos::new(HPos::Center, VPos::Center));
        area.draw(&Text::new(value.to_string(), (x, height as i32 / 2), value_style))?;
        area.draw(&Text::new(caption.to_string(), (x, height as i32 * 4 / 5), caption_style))?;
        Ok(())
    }

    fn text_panel(&self, area: &Area, lines: &[String]) -> Result<()> {
        let style = TextStyle::from(("monospace", 15).into_font());
        for (index, line) in lines.iter().enumerate() {
            area.draw(&Text::new(line.clone(), (30, 40 + index as i32 * 24), style.clone()))?;
        }
        Ok(())
    }
}

fn labeled<'a>(entries: impl IntoIterator<Item = (&'a str, usize)>) -> Vec<(String, usize)> {
    entries
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect()
}

fn share(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

fn geographic_summary(total: usize, geo: &GeographicInsights) -> Vec<String> {
    let reach = if geo.online_count > geo.in_person_count {
        "Global reach via online format"
    } else {
        "Primarily in-person events"
    };
    vec![
        "GLOBAL REACH STATISTICS".to_string(),
        String::new(),
        format!("Total Hackathons: {total}"),
        String::new(),
        "Format Split:".to_string(),
        format!(
            "  Online: {} ({:.1}%)",
            geo.online_count,
            share(geo.online_count, total)
        ),
        format!(
            "  In-Person: {} ({:.1}%)",
            geo.in_person_count,
            share(geo.in_person_count, total)
        ),
        String::new(),
        "Geographic Coverage:".to_string(),
        format!("  Countries: {}", geo.countries.len()),
        format!("  Cities: {}", geo.cities.len()),
        String::new(),
        "Accessibility:".to_string(),
        format!("  {reach}"),
    ]
}
