//! Report display formatting

use std::collections::BTreeMap;

use tabled::Tabled;

use crate::models::{Bucket, Money};
use crate::reports::monthly::WEEKDAY_LABELS;
use crate::reports::{CalendarHeatmap, FinancialSummary, MonthlyReport, YearlyReport};

use super::render_table;

#[derive(Tabled)]
struct BudgetVsActualRow {
    #[tabled(rename = "Kategori")]
    category: String,
    #[tabled(rename = "Anggaran")]
    budget: String,
    #[tabled(rename = "Realisasi")]
    actual: String,
    #[tabled(rename = "Sisa")]
    remaining: String,
}

#[derive(Tabled)]
struct DistributionRow {
    #[tabled(rename = "Sub-kategori")]
    category: String,
    #[tabled(rename = "Jumlah")]
    amount: String,
    #[tabled(rename = "%")]
    percentage: String,
}

#[derive(Tabled)]
struct CashFlowRow {
    #[tabled(rename = "Bulan")]
    month: String,
    #[tabled(rename = "Pendapatan")]
    income: String,
    #[tabled(rename = "Pengeluaran")]
    expense: String,
    #[tabled(rename = "Alur Kas")]
    net: String,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Kategori")]
    category: String,
    #[tabled(rename = "Rata-rata")]
    average: String,
}

fn format_summary(summary: &FinancialSummary, symbol: &str) -> String {
    format!(
        "Total Pendapatan:  {}\nTotal Pengeluaran: {}\nSaldo:             {}\n",
        summary.total_income.format_with_symbol(symbol),
        summary.total_expense.format_with_symbol(symbol),
        summary.balance.format_with_symbol(symbol)
    )
}

/// Format the monthly analysis: summary, budget vs actual, distribution
/// and the calendar heatmap
pub fn format_monthly_report(report: &MonthlyReport, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Analisis Keuangan: {}\n", report.period.label()));
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format_summary(&report.summary, symbol));

    output.push_str("\nAnggaran vs Pengeluaran Aktual\n");
    let rows = report
        .budget_vs_actual
        .iter()
        .map(|line| BudgetVsActualRow {
            category: line.category.clone(),
            budget: line.budget.format_with_symbol(symbol),
            actual: line.actual.format_with_symbol(symbol),
            remaining: line.remaining().format_with_symbol(symbol),
        })
        .collect();
    output.push_str(&render_table(rows));

    output.push_str("\nDistribusi Pengeluaran\n");
    if report.distribution.is_empty() {
        output.push_str("Belum ada data pengeluaran untuk bulan ini.\n");
    } else {
        let rows = report
            .distribution
            .iter()
            .map(|slice| DistributionRow {
                category: slice.category.clone(),
                amount: slice.amount.format_with_symbol(symbol),
                percentage: format!("{:.1}%", slice.percentage),
            })
            .collect();
        output.push_str(&render_table(rows));
    }

    output.push_str("\nKalender Pengeluaran Harian\n");
    output.push_str(&format_heatmap(&report.heatmap));

    output
}

/// One line per week; each day shows its number and the amount spent
fn format_heatmap(heatmap: &CalendarHeatmap) -> String {
    const CELL: usize = 12;
    let mut output = String::new();

    for label in WEEKDAY_LABELS {
        output.push_str(&format!("{:>width$}", label, width = CELL));
    }
    output.push('\n');

    for week in &heatmap.weeks {
        for slot in week {
            match slot {
                Some(cell) if cell.amount.is_zero() => {
                    output.push_str(&format!("{:>width$}", format!("{}:-", cell.day), width = CELL))
                }
                Some(cell) => output.push_str(&format!(
                    "{:>width$}",
                    format!("{}:{}", cell.day, compact(cell.amount)),
                    width = CELL
                )),
                None => output.push_str(&" ".repeat(CELL)),
            }
        }
        output.push('\n');
    }

    if let Some(peak) = heatmap.peak() {
        output.push_str(&format!(
            "Pengeluaran tertinggi: tanggal {} ({})\n",
            peak.day,
            Money::from_units(peak.amount.units())
        ));
    }

    output
}

/// 1500000 -> "1.5jt", 45000 -> "45rb"
fn compact(amount: Money) -> String {
    let units = amount.units();
    if units >= 1_000_000 {
        format!("{:.1}jt", units as f64 / 1_000_000.0)
    } else if units >= 1_000 {
        format!("{}rb", units / 1_000)
    } else {
        units.to_string()
    }
}

/// Format the yearly analysis: cash flow and spending per category
pub fn format_yearly_report(report: &YearlyReport, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Analisis Keuangan Tahun {}\n", report.year));
    output.push_str(&"=".repeat(60));
    output.push('\n');

    if report.cash_flow.is_empty() {
        output.push_str("Belum ada data transaksi untuk tahun ini.\n");
        return output;
    }

    output.push_str(&format_summary(&report.summary, symbol));

    output.push_str("\nRekapitulasi Bulanan\n");
    let rows = report
        .cash_flow
        .iter()
        .map(|flow| CashFlowRow {
            month: flow.period.label(),
            income: flow.income.format_with_symbol(symbol),
            expense: flow.expense.format_with_symbol(symbol),
            net: flow.net().format_with_symbol(symbol),
        })
        .collect();
    output.push_str(&render_table(rows));

    output.push_str("\nPengeluaran per Kategori\n");
    if report.spending.is_empty() {
        output.push_str("Belum ada data pengeluaran untuk tahun ini.\n");
        return output;
    }

    let mut builder = tabled::builder::Builder::default();
    let mut header = vec!["Bulan".to_string()];
    header.extend(report.categories.iter().cloned());
    builder.push_record(header);
    for month in &report.spending {
        let mut record = vec![month.period.label()];
        record.extend(month.amounts.iter().map(|a| a.format_with_symbol(symbol)));
        builder.push_record(record);
    }
    let mut totals = vec!["Total".to_string()];
    totals.extend(
        report
            .category_totals()
            .iter()
            .map(|a| a.format_with_symbol(symbol)),
    );
    builder.push_record(totals);

    let mut table = builder.build();
    table.with(tabled::settings::Style::rounded());
    output.push_str(&format!("{}\n", table));

    output
}

/// Format historical averages used for budget suggestions
pub fn format_history(
    averages: &BTreeMap<Bucket, f64>,
    monthly_income: f64,
    months_back: usize,
    symbol: &str,
) -> String {
    let window = if months_back == 0 {
        "seluruh data".to_string()
    } else {
        format!("{} bulan terakhir", months_back)
    };

    let mut output = format!("Rata-rata pengeluaran per transaksi ({})\n", window);
    let rows = averages
        .iter()
        .map(|(bucket, average)| HistoryRow {
            category: bucket.label().to_string(),
            average: Money::from_f64(*average).format_with_symbol(symbol),
        })
        .collect();
    output.push_str(&render_table(rows));
    output.push_str(&format!(
        "Perkiraan pendapatan bulanan: {}\n",
        Money::from_f64(monthly_income).format_with_symbol(symbol)
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, BudgetPeriod, EntryKind, PaymentMethod, Subcategory, Transaction};
    use chrono::NaiveDate;

    fn spend(day: u32, units: i64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 8, day).unwrap(),
            "x",
            Money::from_units(units),
            EntryKind::Expense,
            Subcategory::Spending(Bucket::Food),
            PaymentMethod::Cash,
        )
    }

    #[test]
    fn test_monthly_report_sections() {
        let txns = vec![spend(1, 45_000), spend(2, 1_500_000)];
        let report = MonthlyReport::generate(&txns, &Budget::default_buckets(), BudgetPeriod::monthly(2024, 8));

        let out = format_monthly_report(&report, "Rp");
        assert!(out.contains("Analisis Keuangan: Agustus 2024"));
        assert!(out.contains("Realisasi"));
        assert!(out.contains("100.0%"));
        assert!(out.contains("Sen"));
        assert!(out.contains("1:45rb"));
        assert!(out.contains("2:1.5jt"));
        assert!(out.contains("tanggal 2"));
    }

    #[test]
    fn test_yearly_report_without_data() {
        let report = YearlyReport::generate(&[], &Budget::new(), 2024);
        let out = format_yearly_report(&report, "Rp");
        assert!(out.contains("Belum ada data transaksi"));
    }

    #[test]
    fn test_yearly_report_tables() {
        let report = YearlyReport::generate(&[spend(3, 10_000)], &Budget::new(), 2024);
        let out = format_yearly_report(&report, "Rp");
        assert!(out.contains("Alur Kas"));
        assert!(out.contains("Agustus 2024"));
        assert!(out.contains("Lainnya"));
        assert!(out.contains("Total"));
    }

    #[test]
    fn test_history() {
        let mut averages = BTreeMap::new();
        averages.insert(Bucket::Food, 250_000.0);
        let out = format_history(&averages, 5_000_000.0, 0, "Rp");
        assert!(out.contains("seluruh data"));
        assert!(out.contains("Rp250,000"));
        assert!(out.contains("Rp5,000,000"));
    }
}
