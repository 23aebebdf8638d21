//! Plain-text rendering of a [`DashboardView`].

use std::fmt::Write;

use crate::{
    config::AppConfig,
    dashboard::{DashboardData, DashboardView},
    models::period::Period,
};

pub const NO_DATA_NOTICE: &str = "No stock data available. Please try again later.";

pub fn render_text(view: &DashboardView) -> String {
    match view {
        DashboardView::NoData { .. } => format!("{NO_DATA_NOTICE}\n"),
        DashboardView::Ready(data) => render_data(data),
    }
}

fn render_data(data: &DashboardData) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Stock Data for {} ({})", data.symbol, data.period);
    let _ = writeln!(
        out,
        "{:<10}  {:>10}  {:>10}  {:>10}  {:>10}  {:>12}",
        "Date", "Open", "High", "Low", "Close", "Volume"
    );
    for row in &data.table {
        let _ = writeln!(
            out,
            "{:<10}  {:>10.2}  {:>10.2}  {:>10.2}  {:>10.2}  {:>12}",
            row.date, row.open, row.high, row.low, row.close, row.volume
        );
    }

    let chart = &data.moving_averages;
    let _ = writeln!(out);
    let names: Vec<&str> = chart.lines.iter().map(|line| line.name.as_str()).collect();
    let _ = writeln!(out, "Moving Averages ({})", names.join(", "));
    let _ = write!(out, "{:<10}  {:>10}", "Date", "Close");
    for name in &names {
        let _ = write!(out, "  {name:>10}");
    }
    let _ = writeln!(out);
    for (i, date) in chart.dates.iter().enumerate() {
        let _ = write!(out, "{:<10}  {:>10.2}", date, chart.close[i]);
        for line in &chart.lines {
            match line.values.get(i).copied().flatten() {
                Some(value) => {
                    let _ = write!(out, "  {value:>10.2}");
                }
                None => {
                    let _ = write!(out, "  {:>10}", "-");
                }
            }
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Closing Price Above {:.2} ({} records)",
        data.threshold,
        data.filtered.len()
    );
    let _ = writeln!(out, "{:<10}  {:>10}", "Date", "Close");
    for row in &data.filtered {
        let _ = writeln!(out, "{:<10}  {:>10.2}", row.date, row.close);
    }
    out
}

/// The choices offered by `config`.
pub fn render_choices(config: &AppConfig) -> String {
    let periods: Vec<&str> = Period::ALL.iter().map(Period::as_str).collect();
    let windows: Vec<String> = config
        .dashboard
        .ma_windows
        .iter()
        .map(|w| w.to_string())
        .collect();
    format!(
        "Symbols:   {} (default {})\nPeriods:   {} (default {})\nThreshold: {} to {} (default {})\nMA windows: {}\n",
        config.dashboard.symbols.join(", "),
        config.dashboard.default_symbol,
        periods.join(", "),
        config.dashboard.default_period,
        config.threshold.min,
        config.threshold.max,
        config.threshold.default,
        windows.join(", "),
    )
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;
    use crate::{
        dashboard::build_view,
        models::bar::RawBar,
        normalize::normalize,
    };

    #[test]
    fn no_data_prints_notice() {
        let view = DashboardView::NoData {
            symbol: "AAPL".into(),
            period: Period::OneMonth,
        };
        assert_eq!(render_text(&view), format!("{NO_DATA_NOTICE}\n"));
    }

    #[test]
    fn data_prints_all_sections() {
        let series = normalize(
            "AAPL",
            Period::ThreeMonths,
            Ok(vec![
                RawBar::new("2024-01-01", 1.0, 2.0, 0.5, 100.0, 10.0),
                RawBar::new("2024-01-02", 1.0, 2.0, 0.5, 600.0, 20.0),
            ]),
        );
        let view = build_view(&series, &[NonZeroUsize::new(2).unwrap()], 500.0);
        let text = render_text(&view);

        assert!(text.starts_with("Stock Data for AAPL (3mo)\n"));
        assert!(text.contains("Moving Averages (MA2)"));
        assert!(text.contains("Closing Price Above 500.00 (1 records)"));
        assert!(text.contains("2024-01-02      600.00"));
        // first MA2 slot has no history yet
        assert!(text.contains("2024-01-01      100.00           -"));
        assert!(text.contains("350.00"));
    }

    #[test]
    fn choices_list_configuration() {
        let text = render_choices(&AppConfig::default());
        assert!(text.contains("AAPL, GOOGL, TSLA, MSFT, AMZN (default AAPL)"));
        assert!(text.contains("1mo, 3mo, 6mo, 1y (default 1mo)"));
        assert!(text.contains("MA windows: 7, 30"));
    }
}
