//! Text rendering for alerts, scraped records and price trends

use std::fmt::Write;

use crate::domain::{Price, PricedRecord, PricingStrategy, PricingSummary, ProductRecord, format_price};

/// Default number of rows in a trend chart
pub const DEFAULT_CHART_HEIGHT: usize = 10;

const LABEL_WIDTH: usize = 10;

/// Body of a price variation alert, one block per observed source
pub fn alert_message(product: &str, observations: &[PricedRecord]) -> String {
    let mut message = format!("Price variation alert for {product}:\n\n");
    for observation in observations {
        let _ = write!(
            message,
            "Product: {}\nPrice: {}\n\n",
            observation.record.name, observation.record.price_text
        );
    }
    message
}

/// All fields of one scraped record
pub fn render_record(record: &ProductRecord) -> String {
    format!(
        "Product: {}\nPrice: {}\nDescription: {}\nAvailability: {}\nSource: {}\n",
        record.name, record.price_text, record.description, record.availability, record.url
    )
}

pub fn render_summary(product: &str, summary: &PricingSummary, strategy: PricingStrategy) -> String {
    format!(
        "{product}\n  average: {}\n  lowest:  {}\n  highest: {}\n  spread:  {}\n  strategy: {} ({})\n",
        format_price(summary.mean),
        format_price(summary.min),
        format_price(summary.max),
        format_price(summary.spread()),
        strategy.as_str(),
        strategy.recommendation(),
    )
}

/// Plot `prices` against observation order as a text chart
pub fn render_trend_chart(title: &str, prices: &[Price], height: usize) -> String {
    let mut chart = format!("{title}\n");

    let Some(first) = prices.first() else {
        chart.push_str(PricingStrategy::NoData.recommendation());
        chart.push('\n');
        return chart;
    };

    let values: Vec<f64> = prices.iter().map(|p| p.value()).collect();
    let (min, max) = values
        .iter()
        .fold((first.value(), first.value()), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let spread = max - min;
    let rows = if spread > 0.0 { height.max(2) } else { 1 };
    let steps = (rows - 1).max(1);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let row_of = |value: f64| -> usize {
        if spread > 0.0 {
            (((value - min) / spread) * steps as f64).round() as usize
        } else {
            0
        }
    };
    let point_rows: Vec<usize> = values.iter().map(|v| row_of(*v)).collect();

    let _ = writeln!(chart, "{:>LABEL_WIDTH$}", "Price");
    for row in (0..rows).rev() {
        #[allow(clippy::cast_precision_loss)]
        let level = min + spread * row as f64 / steps as f64;
        let cells: String = point_rows
            .iter()
            .map(|point_row| if *point_row == row { "  *" } else { "   " })
            .collect();
        let _ = writeln!(chart, "{:>LABEL_WIDTH$} |{}", format_price(level), cells.trim_end());
    }
    let _ = writeln!(chart, "{:>LABEL_WIDTH$} +{}", "", "---".repeat(values.len()));
    let _ = writeln!(chart, "{:>LABEL_WIDTH$}  Time (observations 1..{})", "", values.len());

    chart
}
