use std::path::PathBuf;

use ecomgen_core::TableName;

/// Rows inserted into one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLoad {
    pub table: TableName,
    pub rows: u64,
}

/// Post-load row count check for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableValidation {
    pub table: TableName,
    pub expected: u64,
    pub in_db: u64,
}

impl TableValidation {
    pub fn passed(&self) -> bool {
        self.expected == self.in_db
    }
}

/// Outcome of a load run. A failed validation is data, not an error.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub database_path: PathBuf,
    pub tables: Vec<TableLoad>,
    pub validations: Vec<TableValidation>,
}

impl LoadReport {
    pub fn all_passed(&self) -> bool {
        self.validations.iter().all(TableValidation::passed)
    }

    pub fn validation(&self, table: TableName) -> Option<&TableValidation> {
        self.validations.iter().find(|check| check.table == table)
    }

    /// Human-readable summary, one line per step.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(format!(
            "Created database at {} (or opened existing)",
            self.database_path.display()
        ));
        for load in &self.tables {
            lines.push(format!(
                "Loaded {} ({} rows) into SQLite table '{}'",
                load.table, load.rows, load.table
            ));
        }
        for check in &self.validations {
            lines.push(format!(
                "Validate {}: expected={}, in_db={} -> {}",
                check.table,
                check.expected,
                check.in_db,
                if check.passed() { "PASS" } else { "FAIL" }
            ));
        }
        if self.all_passed() {
            lines.push("All tables validated successfully.".to_string());
        } else {
            lines.push("Validation failed for one or more tables. Check logs.".to_string());
        }
        lines
    }
}
