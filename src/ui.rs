//! Terminal output helpers.
//!
//! [`Table`] draws an auto-sized box table that shrinks its widest columns to
//! fit the terminal. [`print_results`] renders a batch of mutation results.

use crate::batch::MutationResult;
use colored::*;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Rows with the wrong number of cells are dropped.
    pub fn add_row(&mut self, row: Vec<String>) {
        if row.len() == self.headers.len() {
            self.rows.push(row);
        }
    }

    /// Column widths after fitting into `max_width` terminal columns.
    fn column_widths(&self, max_width: usize) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(console::measure_text_width(&flatten(cell)));
            }
        }

        // Each column costs 3 chars of padding and border, plus the indent.
        let overhead = 3 + 3 * widths.len();
        let budget = max_width.saturating_sub(overhead);
        while widths.iter().sum::<usize>() > budget {
            let (idx, &widest) = match widths.iter().enumerate().max_by_key(|(_, w)| **w) {
                Some(found) => found,
                None => break,
            };
            if widest <= 8 {
                break;
            }
            widths[idx] -= 1;
        }
        widths
    }

    pub fn render(&self, max_width: usize) -> String {
        if self.headers.is_empty() {
            return String::new();
        }
        let widths = self.column_widths(max_width);

        let rule = |left: &str, mid: &str, right: &str| -> String {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("  {}{}{}", left, segments.join(mid), right)
        };
        let line = |cells: &[String], bold: bool| -> String {
            let mut s = String::from("  │");
            for (cell, &width) in cells.iter().zip(&widths) {
                let text = console::truncate_str(&flatten(cell), width, "...").to_string();
                let pad = width.saturating_sub(console::measure_text_width(&text));
                let text = if bold { text.bold().to_string() } else { text };
                s.push_str(&format!(" {}{} │", text, " ".repeat(pad)));
            }
            s
        };

        let mut out = vec![
            rule("┌", "┬", "┐"),
            line(&self.headers, true),
            rule("├", "┼", "┤"),
        ];
        out.extend(self.rows.iter().map(|row| line(row, false)));
        out.push(rule("└", "┴", "┘"));
        out.join("\n")
    }

    pub fn print(&self) {
        let (_, term_width) = console::Term::stdout().size();
        println!("{}", self.render(term_width as usize));
    }
}

fn flatten(s: &str) -> String {
    s.chars()
        .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .collect()
}

/// Prints a result table followed by a one-line summary.
pub fn print_results(results: &[MutationResult], dry_run: bool) {
    let mut table = Table::new(&["File", "Old", "New", "Status"]);
    for r in results {
        let status = match (&r.error, r.changed) {
            (Some(e), _) => e.kind.red().to_string(),
            (None, true) if dry_run => "would change".cyan().to_string(),
            (None, true) => "updated".green().to_string(),
            (None, false) => "unchanged".yellow().to_string(),
        };
        table.add_row(vec![
            r.file.display().to_string(),
            r.old_value.clone().unwrap_or_else(|| "-".into()),
            r.new_value.clone().unwrap_or_else(|| "-".into()),
            status,
        ]);
    }
    table.print();

    let failed = results.iter().filter(|r| !r.success).count();
    if failed == 0 {
        println!("{} {} file(s) processed.", "✓".green(), results.len());
    } else {
        println!(
            "{} {} of {} file(s) failed.",
            "x".red(),
            failed,
            results.len()
        );
        for r in results.iter().filter(|r| !r.success) {
            if let Some(e) = &r.error {
                println!("   {} {}", "-".red(), e.message);
            }
        }
    }
}
