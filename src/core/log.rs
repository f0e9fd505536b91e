use crate::db::log::AuditOp;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use ansi_term::Colour;
use regex::Regex;

const MAX_OP_WIDTH: usize = 60;

fn strip_ansi(re: &Regex, s: &str) -> String {
    re.replace_all(s, "").into_owned()
}

/// Restituisce il colore ANSI in base all'operazione
fn color_for_operation(op: &str) -> Colour {
    match AuditOp::from_db_str(op) {
        Some(AuditOp::Record) => Colour::Green,
        Some(AuditOp::Del) => Colour::Red,
        Some(AuditOp::Export) => Colour::Cyan,
        Some(AuditOp::MigrationApplied) => Colour::Purple,
        Some(AuditOp::Backup) => Colour::Blue,
        Some(AuditOp::Vacuum) => Colour::Yellow,
        Some(AuditOp::Init) => Colour::RGB(255, 153, 51), // arancione
        None => Colour::White,
    }
}

pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub struct LogLogic;

impl LogLogic {
    /// Audit rows in insertion order, optionally only those of `op`.
    pub fn load(pool: &mut DbPool, op: Option<AuditOp>) -> AppResult<Vec<LogEntry>> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, IFNULL(target, ''), message FROM log
             WHERE ?1 IS NULL OR operation = ?1
             ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([op.map(|o| o.as_str())], |row| {
            let raw_date: String = row.get(1)?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok(LogEntry {
                id: row.get(0)?,
                date,
                operation: row.get(2)?,
                target: row.get(3)?,
                message: row.get(4)?,
            })
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }
        Ok(entries)
    }

    pub fn print_log(pool: &mut DbPool, op: Option<AuditOp>) -> AppResult<()> {
        let entries = Self::load(pool, op)?;

        if entries.is_empty() {
            match op {
                Some(o) => info(format!("No '{o}' entries in the internal log.")),
                None => info("Internal log is empty."),
            }
            return Ok(());
        }

        let ansi = Regex::new(r"\x1B\[[0-9;]*[mK]")
            .map_err(|e| crate::errors::AppError::Other(e.to_string()))?;

        let op_targets: Vec<String> = entries
            .iter()
            .map(|e| {
                if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                }
            })
            .collect();

        let op_w = op_targets
            .iter()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(0);

        println!("📜 Internal log:\n");

        for (e, op_target) in entries.iter().zip(&op_targets) {
            let color = color_for_operation(&e.operation);

            // tronca a MAX_OP_WIDTH caratteri visibili
            let visible = if op_target.chars().count() > MAX_OP_WIDTH {
                let mut s: String = op_target.chars().take(MAX_OP_WIDTH - 3).collect();
                s.push_str("...");
                s
            } else {
                op_target.clone()
            };

            // solo la prima parola (operation) resta colorata
            let colored = match visible.split_once(' ') {
                Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&ansi, &colored).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                e.date,
                colored,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
