//! Plain-text rendering of a [`DashboardView`].

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use stockledger_infra::{DashboardView, Notice, NoticeLevel};
use stockledger_reporting::ChartBar;

/// Widest bar in the sales chart, in characters.
pub const CHART_WIDTH: u64 = 40;

pub fn dashboard(view: &DashboardView) -> String {
    let mut out = String::new();

    out.push_str("Sales Data\n");
    out.push_str(&table(
        &["Date", "Product", "Category", "Sales", "Quantity"],
        view.sales
            .iter()
            .map(|r| {
                vec![
                    r.date().to_string(),
                    r.product().to_string(),
                    r.category().to_string(),
                    r.sales().to_string(),
                    r.quantity().to_string(),
                ]
            })
            .collect(),
    ));

    out.push_str("\nInventory Data\n");
    out.push_str(&table(
        &["Product", "Category", "Quantity"],
        view.inventory
            .iter()
            .map(|r| {
                vec![
                    r.product().to_string(),
                    r.category().to_string(),
                    r.quantity().to_string(),
                ]
            })
            .collect(),
    ));

    if !view.notices.is_empty() {
        out.push('\n');
        for notice in &view.notices {
            out.push_str(&notice_line(notice));
        }
    }

    if let Some(warning) = &view.restock_warning {
        out.push_str(&format!("\n[warning] {warning}\n"));
    }

    if let Some(report) = &view.report {
        out.push_str("\nSales vs Products\n");
        out.push_str(&bar_chart(&report.chart, CHART_WIDTH));

        out.push_str("\nProducts, Total Sales, and Total Quantity\n");
        out.push_str(&table(
            &["Product", "Sales", "Quantity"],
            report
                .summary
                .iter()
                .map(|s| {
                    vec![
                        s.product.clone(),
                        s.total_sales.to_string(),
                        s.total_quantity.to_string(),
                    ]
                })
                .collect(),
        ));
    }

    out
}

fn notice_line(notice: &Notice) -> String {
    let tag = match notice.level {
        NoticeLevel::Success => "success",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    };
    format!("[{tag}] {}\n", notice.message)
}

/// Left-aligned columns separated by two spaces.
pub fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    if rows.is_empty() {
        return format!("{}\n(no rows)\n", headers.join("  "));
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut out = line(headers.to_vec());
    for row in &rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out
}

/// Horizontal bars scaled so the largest total spans `width` characters.
pub fn bar_chart(bars: &[ChartBar], width: u64) -> String {
    if bars.is_empty() {
        return "(no sales)\n".to_string();
    }

    let max = bars.iter().map(|b| b.total_sales).max().unwrap_or(Decimal::ZERO);
    let label_width = bars.iter().map(|b| b.product.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for bar in bars {
        let len = bar_length(bar.total_sales, max, width);
        out.push_str(&format!(
            "{:<label_width$} | {} {}\n",
            bar.product,
            "#".repeat(len as usize),
            bar.total_sales
        ));
    }
    out
}

/// `total / max` of `width`, rounded. The ratio is taken first so that
/// totals near `Decimal::MAX` cannot overflow.
fn bar_length(total: Decimal, max: Decimal, width: u64) -> u64 {
    if max.is_zero() {
        return 0;
    }
    total
        .checked_div(max)
        .and_then(|ratio| ratio.checked_mul(Decimal::from(width)))
        .and_then(|len| len.round().to_u64())
        .map_or(width, |len| len.min(width))
}
