//! The financial report document
//!
//! A fixed sequence of sections, each falling back to a short paragraph when
//! its data is missing. Everything is read from the export envelope.

use tracing::debug;

use crate::config::Settings;
use crate::display::format::{
    format_count, format_currency, format_currency_opt, format_datetime, format_percent,
    format_percent_opt, format_signed_currency, truncate, PLACEHOLDER,
};
use crate::error::{ReportError, ReportResult};
use crate::export::envelope::ExportEnvelope;
use crate::models::{RawRecordSet, RecordKind};
use crate::reports::{insights, narrative, next_steps, selection, DatasetCounts, SummaryMetrics};

use super::blocks::{
    BulletList, Column, KeyValue, MetricCard, MetricCardGrid, Paragraph, SectionTitle, Table,
};
use super::layout::{Block, PageChrome, PageGeometry, Paginator};
use super::surface::SurfaceFactory;

/// Section headings, in document order
pub const SECTION_TITLES: [&str; 11] = [
    "Executive Summary",
    "Client Overview",
    "Narrative Overview",
    "Data Coverage",
    "Debt Portfolio",
    "Budget Snapshot",
    "Savings Progress",
    "Net Worth Trend",
    "Recent Activity",
    "Insights & Recommendations",
    "Next Steps",
];

const SMALL_TEXT: f64 = 9.0;
const ACTIVITY_TEXT_LIMIT: usize = 160;

/// Render the report for `envelope` on a surface from `factory`
///
/// # Errors
///
/// Any failure to obtain a surface is reported as `RenderingUnavailable`.
pub fn render_document(
    envelope: &ExportEnvelope,
    settings: &Settings,
    factory: &dyn SurfaceFactory,
) -> ReportResult<Vec<u8>> {
    let geometry = PageGeometry::from(settings.page);
    let surface = factory
        .create(geometry.width, geometry.height)
        .map_err(|e| match e {
            ReportError::RenderingUnavailable(_) => e,
            other => ReportError::RenderingUnavailable(other.to_string()),
        })?;

    let sections = ReportSections::new(envelope, settings);
    let mut page = Paginator::new(surface, geometry, sections.chrome())?;
    for block in sections.blocks() {
        page.draw_block(block.as_ref());
    }

    debug!(pages = page.page_number(), "document laid out");
    page.finish()
}

struct ReportSections<'a> {
    envelope: &'a ExportEnvelope,
    settings: &'a Settings,
    symbol: &'a str,
}

impl<'a> ReportSections<'a> {
    fn new(envelope: &'a ExportEnvelope, settings: &'a Settings) -> Self {
        Self {
            envelope,
            settings,
            symbol: envelope.currency_symbol(),
        }
    }

    fn records(&self) -> &RawRecordSet {
        &self.envelope.financial_data
    }

    fn metrics(&self) -> &SummaryMetrics {
        &self.envelope.summary.metrics
    }

    fn counts(&self) -> &DatasetCounts {
        &self.envelope.summary.dataset_counts
    }

    fn top_n(&self) -> usize {
        self.settings.effective_top_n()
    }

    fn generated_on(&self) -> String {
        format_datetime(
            &self.envelope.export_info.generated_at.naive_utc(),
            &self.settings.date_format,
        )
    }

    fn chrome(&self) -> PageChrome {
        PageChrome {
            title: format!("{} Financial Report", self.envelope.export_info.product),
            subtitle: format!("Prepared for {}", self.envelope.account.display_name),
            footer_note: format!("Generated {}", self.generated_on()),
        }
    }

    fn blocks(&self) -> Vec<Box<dyn Block>> {
        let mut out: Vec<Box<dyn Block>> = Vec::new();
        self.executive_summary(&mut out);
        self.client_overview(&mut out);
        self.narrative_overview(&mut out);
        self.data_coverage(&mut out);
        self.debt_portfolio(&mut out);
        self.budget_snapshot(&mut out);
        self.savings_progress(&mut out);
        self.net_worth_trend(&mut out);
        self.recent_activity(&mut out);
        self.insights(&mut out);
        self.next_steps(&mut out);
        out
    }

    /// A card shows the placeholder unless its dataset has records
    fn card(&self, label: &str, value: String, kind: RecordKind, caption: String) -> MetricCard {
        if self.counts().has(kind) {
            MetricCard::new(label, value).with_caption(caption)
        } else {
            MetricCard::new(label, PLACEHOLDER).with_caption("No data yet")
        }
    }

    fn executive_summary(&self, out: &mut Vec<Box<dyn Block>>) {
        let m = self.metrics();
        let counts = self.counts();
        let s = self.symbol;

        out.push(Box::new(SectionTitle::with_subtitle(
            SECTION_TITLES[0],
            format!("Key figures as of {}", self.generated_on()),
        )));

        let change_caption = m
            .net_worth_change
            .map(|c| format!("{} vs previous snapshot", format_signed_currency(c, s)))
            .unwrap_or_else(|| "Single snapshot".to_string());

        let cards = vec![
            self.card(
                "Net Worth",
                format_currency_opt(m.net_worth, s),
                RecordKind::NetWorthHistory,
                change_caption,
            ),
            self.card(
                "Total Debt",
                format_currency(m.total_debt, s),
                RecordKind::Debts,
                format_count(counts.debts, "debt", "debts"),
            ),
            self.card(
                "Credit Utilization",
                format_percent(m.credit_utilization),
                RecordKind::Debts,
                format!("of {} in credit limits", format_currency(m.credit_limit, s)),
            ),
            self.card(
                "Net Cash Flow",
                format_signed_currency(m.net_cash_flow, s),
                RecordKind::Budgets,
                format!("Income {}", format_currency(m.income_total, s)),
            ),
            self.card(
                "Goals Funded",
                format_percent_opt(m.savings_progress),
                RecordKind::SavingsGoals,
                format!(
                    "{} of {}",
                    format_currency(m.savings_saved, s),
                    format_currency(m.savings_target, s)
                ),
            ),
            self.card(
                "Savings Rate",
                format_percent_opt(m.savings_rate),
                RecordKind::Budgets,
                "of income left after spending".to_string(),
            ),
        ];
        out.push(Box::new(MetricCardGrid::new(cards)));
    }

    fn client_overview(&self, out: &mut Vec<Box<dyn Block>>) {
        let account = &self.envelope.account;
        let counts = self.counts();
        let covered = RecordKind::ALL.iter().filter(|k| counts.has(**k)).count();
        let or_placeholder = |value: &str| {
            if value.trim().is_empty() {
                PLACEHOLDER.to_string()
            } else {
                value.to_string()
            }
        };

        out.push(Box::new(SectionTitle::new(SECTION_TITLES[1])));
        for (label, value) in [
            ("Name", account.display_name.clone()),
            ("Email", or_placeholder(&account.email)),
            ("Account ID", or_placeholder(&account.uid)),
            ("Report generated", self.generated_on()),
            ("Export ID", self.envelope.export_info.export_id.to_string()),
            (
                "Data coverage",
                format!(
                    "{} across {} of {} datasets",
                    format_count(counts.total_datasets, "record", "records"),
                    covered,
                    RecordKind::ALL.len()
                ),
            ),
        ] {
            out.push(Box::new(KeyValue::new(label, value)));
        }
    }

    fn narrative_overview(&self, out: &mut Vec<Box<dyn Block>>) {
        out.push(Box::new(SectionTitle::new(SECTION_TITLES[2])));

        let lines = narrative(self.metrics(), self.counts(), self.symbol);
        if lines.is_empty() {
            out.push(Box::new(Paragraph::new(
                "No financial records are available yet. Add debts, budgets, savings goals \
                 or net worth snapshots to build this overview.",
            )));
        } else {
            out.push(Box::new(BulletList::new(lines)));
        }
    }

    fn data_coverage(&self, out: &mut Vec<Box<dyn Block>>) {
        let counts = self.counts();
        out.push(Box::new(SectionTitle::with_subtitle(
            SECTION_TITLES[3],
            "Records available per dataset",
        )));

        if counts.total_datasets == 0 {
            out.push(Box::new(Paragraph::new(
                "No datasets have been synced yet, so every section below shows its empty state.",
            )));
            return;
        }

        let items = RecordKind::ALL
            .iter()
            .map(|kind| match counts.get(*kind) {
                0 => format!("{}: no data yet", kind.label()),
                n => format!("{}: {}", kind.label(), format_count(n, "record", "records")),
            })
            .collect();
        out.push(Box::new(BulletList::new(items)));
    }

    fn debt_portfolio(&self, out: &mut Vec<Box<dyn Block>>) {
        let m = self.metrics();
        let s = self.symbol;
        let total = self.counts().debts;

        out.push(Box::new(SectionTitle::with_subtitle(
            SECTION_TITLES[4],
            "Largest balances first",
        )));

        if total == 0 {
            out.push(Box::new(Paragraph::new("No debts recorded yet.")));
            return;
        }

        out.push(Box::new(Paragraph::new(format!(
            "Total debt of {} across {}, with minimum payments of {} per month.",
            format_currency(m.total_debt, s),
            format_count(total, "debt", "debts"),
            format_currency(m.minimum_payment_total, s)
        ))));

        let debts = selection::top_debts(self.records(), self.top_n());
        let shown = debts.len();
        let rows = debts
            .into_iter()
            .map(|debt| {
                vec![
                    debt.name.clone(),
                    debt.type_label(),
                    format_currency(debt.balance, s),
                    format_percent_opt(debt.interest_rate),
                    format_currency_opt(debt.minimum_payment, s),
                    format_currency_opt(debt.credit_limit, s),
                ]
            })
            .collect();
        out.push(Box::new(Table::new(
            vec![
                Column::left("Debt", 3.0),
                Column::left("Type", 2.0),
                Column::right("Balance", 2.0),
                Column::right("APR", 1.4),
                Column::right("Minimum", 1.8),
                Column::right("Limit", 1.8),
            ],
            rows,
        )));

        if shown < total {
            out.push(Box::new(Paragraph::sized(
                format!("Showing the {} largest of {} debts.", shown, total),
                SMALL_TEXT,
            )));
        }
    }

    fn budget_snapshot(&self, out: &mut Vec<Box<dyn Block>>) {
        let m = self.metrics();
        let s = self.symbol;
        let plans = self.counts().budgets;

        out.push(Box::new(SectionTitle::with_subtitle(
            SECTION_TITLES[5],
            "Income, spending and the largest categories",
        )));

        if plans == 0 {
            out.push(Box::new(Paragraph::new("No budgets recorded yet.")));
            return;
        }

        out.push(Box::new(Paragraph::new(format!(
            "Across {}, income totals {} and actual spending {} against {} budgeted, \
             leaving net cash flow of {}.",
            format_count(plans, "budget plan", "budget plans"),
            format_currency(m.income_total, s),
            format_currency(m.expense_actual, s),
            format_currency(m.expense_budgeted, s),
            format_signed_currency(m.net_cash_flow, s)
        ))));

        let expenses = selection::top_expenses(self.records(), self.top_n());
        if expenses.is_empty() {
            out.push(Box::new(Paragraph::new("No expense categories recorded.")));
            return;
        }

        let rows = expenses
            .iter()
            .map(|line| {
                vec![
                    line.category.clone(),
                    format_currency(line.planned(), s),
                    format_currency(line.actual(), s),
                    format_signed_currency(line.variance(), s),
                ]
            })
            .collect();
        out.push(Box::new(Table::new(
            vec![
                Column::left("Category", 3.0),
                Column::right("Budgeted", 2.0),
                Column::right("Spent", 2.0),
                Column::right("Variance", 2.0),
            ],
            rows,
        )));
    }

    fn savings_progress(&self, out: &mut Vec<Box<dyn Block>>) {
        let s = self.symbol;
        out.push(Box::new(SectionTitle::with_subtitle(
            SECTION_TITLES[6],
            "Goals closest to completion first",
        )));

        if !self.counts().has(RecordKind::SavingsGoals) {
            out.push(Box::new(Paragraph::new("No savings goals recorded yet.")));
            return;
        }

        let rows = selection::top_goals(self.records(), self.top_n())
            .into_iter()
            .map(|goal| {
                vec![
                    goal.name.clone(),
                    format_currency(goal.saved, s),
                    format_currency(goal.target, s),
                    format_percent(goal.completion_ratio() * 100.0),
                    goal.target_date.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
                ]
            })
            .collect();
        out.push(Box::new(Table::new(
            vec![
                Column::left("Goal", 3.0),
                Column::right("Saved", 2.0),
                Column::right("Target", 2.0),
                Column::right("Progress", 1.6),
                Column::right("Target date", 2.0),
            ],
            rows,
        )));
    }

    fn net_worth_trend(&self, out: &mut Vec<Box<dyn Block>>) {
        let s = self.symbol;
        let limit = self.settings.history_limit.max(1);
        out.push(Box::new(SectionTitle::with_subtitle(
            SECTION_TITLES[7],
            format!("Most recent {} snapshots", limit),
        )));

        // One extra entry so the oldest shown row still has a change
        let window = selection::latest_history(self.records(), limit + 1);
        if window.is_empty() {
            out.push(Box::new(Paragraph::new("No net worth history recorded yet.")));
            return;
        }

        let mut previous: Option<f64> = None;
        let mut rows = Vec::with_capacity(window.len());
        for entry in &window {
            let change = previous
                .map(|p| format_signed_currency(entry.net_worth - p, s))
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            previous = Some(entry.net_worth);

            let date = entry
                .recorded_at
                .map(|at| format_datetime(&at, &self.settings.date_format))
                .unwrap_or_else(|| entry.date_label());
            rows.push(vec![
                date,
                format_currency(entry.net_worth, s),
                format_currency_opt(entry.assets, s),
                format_currency_opt(entry.liabilities, s),
                change,
            ]);
        }
        if window.len() > limit {
            rows.remove(0);
        }

        out.push(Box::new(Table::new(
            vec![
                Column::left("Date", 2.0),
                Column::right("Net worth", 2.0),
                Column::right("Assets", 2.0),
                Column::right("Liabilities", 2.0),
                Column::right("Change", 2.0),
            ],
            rows,
        )));
    }

    fn recent_activity(&self, out: &mut Vec<Box<dyn Block>>) {
        let limit = self.settings.activity_limit.max(1);
        out.push(Box::new(SectionTitle::with_subtitle(
            SECTION_TITLES[8],
            "Newest first",
        )));

        let events = selection::latest_activity(self.records(), limit);
        if events.is_empty() {
            out.push(Box::new(Paragraph::new("No activity recorded yet.")));
            return;
        }

        let rows = events
            .into_iter()
            .map(|event| {
                let date = event
                    .occurred_at
                    .map(|at| format_datetime(&at, &self.settings.date_format))
                    .unwrap_or_else(|| event.date_label());
                vec![
                    date,
                    event.event_type.replace('_', " "),
                    truncate(&event.text, ACTIVITY_TEXT_LIMIT),
                ]
            })
            .collect();
        out.push(Box::new(Table::new(
            vec![
                Column::left("Date", 2.0),
                Column::left("Type", 2.0),
                Column::left("Description", 6.0),
            ],
            rows,
        )));
    }

    fn insights(&self, out: &mut Vec<Box<dyn Block>>) {
        out.push(Box::new(SectionTitle::with_subtitle(
            SECTION_TITLES[9],
            "Generated from your current metrics",
        )));
        let items = insights(self.metrics(), self.counts(), self.symbol)
            .iter()
            .map(|insight| insight.labeled())
            .collect();
        out.push(Box::new(BulletList::new(items)));
    }

    fn next_steps(&self, out: &mut Vec<Box<dyn Block>>) {
        out.push(Box::new(SectionTitle::new(SECTION_TITLES[10])));
        out.push(Box::new(BulletList::new(next_steps())));
    }
}
