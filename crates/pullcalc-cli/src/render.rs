//! Presenter: turns evaluated grids into a text table, CSV or JSON.

use anyhow::Result;
use pullcalc_eval::{DistributionEngine, GridOutput, ResultGrid};
use serde::Serialize;

use crate::cli::Mode;

const PULLS_HEADER: &str = "Number of Pulls";
const COLUMN_SEPARATOR: &str = " | ";

/// One titled grid of formatted results.
#[derive(Debug)]
pub(crate) struct Block {
    pub(crate) title: &'static str,
    pub(crate) key: &'static str,
    pub(crate) grid: ResultGrid<String>,
}

#[derive(Debug)]
pub(crate) struct Report {
    pub(crate) success_probability: String,
    pub(crate) blocks: Vec<Block>,
}

impl Report {
    /// Exact results are computed before at-least ones so the sums reuse
    /// cached exact terms.
    pub(crate) fn evaluate(
        engine: &mut DistributionEngine,
        mode: Mode,
        output: GridOutput,
    ) -> Self {
        let mut blocks = Vec::with_capacity(2);
        if mode.includes_exact() {
            blocks.push(Block {
                title: "Exact Copies",
                key: "exact",
                grid: engine.exact_distribution(output),
            });
        }
        if mode.includes_at_least() {
            blocks.push(Block {
                title: "At Least Copies",
                key: "at_least",
                grid: engine.at_least_distribution(output),
            });
        }
        Self {
            success_probability: engine.success_probability().to_string(),
            blocks,
        }
    }

    fn pull_amounts(&self) -> Vec<u64> {
        self.blocks
            .first()
            .map(|block| block.grid.pull_amounts().collect())
            .unwrap_or_default()
    }

    /// Aligned table: a title row per block, a copies header row, then one
    /// row per pull amount.
    pub(crate) fn to_table(&self) -> String {
        let pulls = self.pull_amounts();
        let pulls_width = pulls
            .iter()
            .map(|n| n.to_string().len())
            .chain([PULLS_HEADER.len()])
            .max()
            .unwrap_or(PULLS_HEADER.len());

        let widths: Vec<Vec<usize>> = self.blocks.iter().map(column_widths).collect();

        let mut title_cells = vec![" ".repeat(pulls_width)];
        let mut header_cells = vec![format!("{PULLS_HEADER:<pulls_width$}")];
        for (block, widths) in self.blocks.iter().zip(&widths) {
            let block_width = widths.iter().sum::<usize>()
                + COLUMN_SEPARATOR.len() * widths.len().saturating_sub(1);
            let block_width = block_width.max(block.title.len());
            title_cells.push(format!("{:<block_width$}", block.title));

            let copies = block.grid.desired_copies();
            let mut cells: Vec<String> = copies
                .iter()
                .zip(widths)
                .map(|(k, &w)| format!("{k:>w$}"))
                .collect();
            pad_last(&mut cells, block_width, widths);
            header_cells.push(cells.join(COLUMN_SEPARATOR));
        }

        let mut lines = vec![
            title_cells.join(COLUMN_SEPARATOR).trim_end().to_string(),
            header_cells.join(COLUMN_SEPARATOR),
        ];
        let rule = "-".repeat(lines[1].len());
        lines.push(rule);

        for (index, n) in pulls.iter().enumerate() {
            let mut row = vec![format!("{n:<pulls_width$}")];
            for (block, widths) in self.blocks.iter().zip(&widths) {
                let Some(grid_row) = block.grid.rows().get(index) else {
                    continue;
                };
                let cells: Vec<String> = grid_row
                    .iter()
                    .zip(widths)
                    .map(|((_, value), &w)| format!("{value:>w$}"))
                    .collect();
                row.push(cells.join(COLUMN_SEPARATOR));
            }
            lines.push(row.join(COLUMN_SEPARATOR).trim_end().to_string());
        }
        lines.join("\n")
    }

    /// Header `pulls,exact_1,...,at_least_1,...`, one line per pull amount.
    pub(crate) fn to_csv(&self) -> String {
        let mut header = vec!["pulls".to_string()];
        for block in &self.blocks {
            header.extend(
                block
                    .grid
                    .desired_copies()
                    .iter()
                    .map(|k| format!("{}_{k}", block.key)),
            );
        }

        let mut lines = vec![header.join(",")];
        for (index, n) in self.pull_amounts().iter().enumerate() {
            let mut record = vec![n.to_string()];
            for block in &self.blocks {
                if let Some(row) = block.grid.rows().get(index) {
                    record.extend(row.iter().map(|(_, value)| value.clone()));
                }
            }
            lines.push(record.join(","));
        }
        lines.join("\n")
    }

    /// `{"success_probability": ..., "exact": {pulls: {copies: value}}, ...}`,
    /// with pulls and copies in configured order.
    pub(crate) fn to_json(&self) -> Result<String> {
        let grid = |key: &str| {
            self.blocks
                .iter()
                .find(|block| block.key == key)
                .map(|block| &block.grid)
        };
        let report = JsonReport {
            success_probability: &self.success_probability,
            exact: grid("exact"),
            at_least: grid("at_least"),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    success_probability: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    exact: Option<&'a ResultGrid<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    at_least: Option<&'a ResultGrid<String>>,
}

fn column_widths(block: &Block) -> Vec<usize> {
    block
        .grid
        .desired_copies()
        .iter()
        .enumerate()
        .map(|(col, k)| {
            block
                .grid
                .rows()
                .iter()
                .filter_map(|row| row.cells.get(col).map(|(_, value)| value.len()))
                .chain([k.to_string().len()])
                .max()
                .unwrap_or(1)
        })
        .collect()
}

/// Widen the last column so a block is never narrower than its title.
fn pad_last(cells: &mut [String], block_width: usize, widths: &[usize]) {
    let used = widths.iter().sum::<usize>()
        + COLUMN_SEPARATOR.len() * widths.len().saturating_sub(1);
    if let Some(last) = cells.last_mut() {
        if block_width > used {
            *last = format!("{last:<width$}", width = last.len() + block_width - used);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    fn engine() -> DistributionEngine {
        let mut engine = DistributionEngine::new();
        engine.set_success_probability(50.0, 100.0).unwrap();
        engine.set_desired_copies_amounts(&[1, 2]).unwrap();
        engine.set_pull_amounts(&[1, 2]).unwrap();
        engine
    }

    #[test]
    fn csv_lists_both_blocks_per_pull_amount() {
        let mut engine = engine();
        let report = Report::evaluate(&mut engine, Mode::Both, GridOutput::Percentage);
        let csv = report.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "pulls,exact_1,exact_2,at_least_1,at_least_2");
        assert_eq!(lines[1], "1,50.0000%,0.0000%,50.0000%,0.0000%");
        assert_eq!(lines[2], "2,50.0000%,25.0000%,75.0000%,25.0000%");
    }

    #[test]
    fn table_has_titles_header_and_rows() {
        let mut engine = engine();
        let report = Report::evaluate(&mut engine, Mode::Both, GridOutput::Percentage);
        let table = report.to_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("Exact Copies"));
        assert!(lines[0].contains("At Least Copies"));
        assert!(lines[1].starts_with(PULLS_HEADER));
        assert!(lines[2].chars().all(|c| c == '-'));
        assert!(lines[4].starts_with("2 "));
        assert!(lines[4].contains("75.0000%"));
    }

    #[test]
    fn single_mode_json_carries_one_grid() {
        let mut engine = engine();
        let report = Report::evaluate(&mut engine, Mode::AtLeast, GridOutput::Percentage);
        let value: Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert!(value.get("exact").is_none());
        assert_eq!(value["at_least"]["2"]["1"], "75.0000%");
        assert_eq!(value["at_least"]["2"]["2"], "25.0000%");
        assert_eq!(value["at_least"]["1"]["2"], "0.0000%");
        assert_eq!(value["success_probability"], "0.50000000000000000000");
    }

    #[test]
    fn json_keeps_configured_pull_and_copy_order() {
        let mut engine = engine();
        engine.set_desired_copies_amounts(&[3, 1]).unwrap();
        engine.set_pull_amounts(&[22, 110, 11]).unwrap();
        let report = Report::evaluate(&mut engine, Mode::Exact, GridOutput::Percentage);
        let json = report.to_json().unwrap();

        let position = |needle: &str| json.find(needle).unwrap();
        assert!(position("\"22\"") < position("\"110\""));
        assert!(position("\"110\"") < position("\"11\": {"));

        let row_22 = &json[position("\"22\"")..position("\"110\"")];
        assert!(row_22.find("\"3\"").unwrap() < row_22.find("\"1\"").unwrap());
        assert!(!json.contains("at_least"));
    }
}
