use std::io::{self, IsTerminal, Write};

use chrono::{Datelike, NaiveDate};
use unicode_width::UnicodeWidthStr;

use crate::calendar::CalendarCell;
use crate::config::Config;
use crate::entry::{Entry, Status};
use crate::range::{DateRange, is_in_range, is_today};

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> Self {
        Self { color: cfg.color }
    }

    #[tracing::instrument(skip(self, entries))]
    pub fn print_timeline(&mut self, label: &str, entries: &[&Entry]) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", self.paint(label, "1"))?;

        if entries.is_empty() {
            writeln!(out, "No entries in this range.")?;
            return Ok(());
        }

        let headers = vec![
            "Date".to_string(),
            "Time".to_string(),
            "Category".to_string(),
            "Title".to_string(),
            "Metrics".to_string(),
            "Status".to_string(),
        ];

        let mut rows = Vec::with_capacity(entries.len());
        for entry in entries {
            let metrics = entry
                .metrics
                .iter()
                .map(|metric| format!("{} {}", metric.label, metric.value))
                .collect::<Vec<_>>()
                .join(", ");

            rows.push(vec![
                entry.occurred_at.format("%Y-%m-%d").to_string(),
                entry.occurred_at.format("%H:%M").to_string(),
                entry.category.to_string(),
                entry.title.clone(),
                metrics,
                self.paint_status(entry.assessment.status),
            ]);
        }

        write_table(&mut out, headers, rows)?;
        Ok(())
    }

    /// Prints the 42-cell picker grid. Padding cells are dimmed, cells
    /// inside the active range are highlighted, and today is marked.
    #[tracing::instrument(skip(self, cells, range))]
    pub fn print_calendar(
        &mut self,
        title: &str,
        cells: &[CalendarCell],
        range: &DateRange,
        today: NaiveDate,
    ) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", self.paint(title, "1"))?;
        writeln!(out, "  Su  Mo  Tu  We  Th  Fr  Sa")?;

        for week in cells.chunks(7) {
            for cell in week {
                let day = format!("{:>3}", cell.date.day());
                let painted = if is_today(cell.date, today) {
                    self.paint(&day, "7")
                } else if !cell.in_reference_month {
                    self.paint(&day, "90")
                } else if is_in_range(cell.date, range) {
                    self.paint(&day, "36")
                } else {
                    day
                };
                write!(out, " {painted}")?;
            }
            writeln!(out)?;
        }

        Ok(())
    }

    #[tracing::instrument(skip(self, entry))]
    pub fn print_entry_info(&mut self, entry: &Entry) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        writeln!(out, "id        {}", entry.id)?;
        writeln!(out, "category  {}", entry.category)?;
        writeln!(out, "occurred  {}", entry.occurred_at.format("%Y-%m-%d %H:%M"))?;
        writeln!(out, "title     {}", entry.title)?;
        if !entry.details.is_empty() {
            writeln!(out, "details   {}", entry.details)?;
        }
        for metric in &entry.metrics {
            writeln!(out, "metric    {}: {}", metric.label, metric.value)?;
        }
        writeln!(
            out,
            "status    {}",
            self.paint_status(entry.assessment.status)
        )?;
        if !entry.assessment.note.is_empty() {
            writeln!(out, "note      {}", entry.assessment.note)?;
        }

        Ok(())
    }

    fn paint_status(&self, status: Status) -> String {
        let code = match status {
            Status::Favorable => "32",
            Status::Neutral => "0",
            Status::Cautionary => "33",
            Status::Adverse => "31",
        };
        self.paint(status.label(), code)
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color || !io::stdout().is_terminal() {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
