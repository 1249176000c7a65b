use std::collections::HashSet;
use std::path::PathBuf;

use csv_async::AsyncReaderBuilder;
use futures::StreamExt;
use serde::Deserialize;
use tokio::fs;
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing::{info, warn};

use crate::error::{DashboardError, DashboardResult};
use crate::integrations::is_known;
use crate::tickets::{parse_date, Ticket, TicketDraft};

pub const REQUIRED_COLUMNS: &[&str] = &[
    "name",
    "date_created",
    "date_progress",
    "date_closed",
    "priority_num",
    "integrations",
    "assigned_dev_new",
    "open_closed",
];

#[derive(Debug, Deserialize)]
struct TicketCsvRow {
    name: Option<String>,
    date_created: Option<String>,
    date_progress: Option<String>,
    date_closed: Option<String>,
    priority_num: Option<String>,
    integrations: Option<String>,
    assigned_dev_new: Option<String>,
    open_closed: Option<String>,
}

impl TryFrom<TicketCsvRow> for TicketDraft {
    type Error = DashboardError;

    fn try_from(row: TicketCsvRow) -> Result<Self, Self::Error> {
        let name = row.name.unwrap_or_default();

        Ok(Self {
            date_created: parse_cell(row.date_created)?,
            date_progress: parse_cell(row.date_progress)?,
            date_closed: parse_cell(row.date_closed)?,
            priority_num: row
                .priority_num
                .as_deref()
                .map(|raw| parse_priority(&name, raw))
                .transpose()?,
            integration: row.integrations,
            assigned_dev: row.assigned_dev_new,
            status: row.open_closed,
            name,
        })
    }
}

/// Tickets kept from a load plus how many rows were rejected.
#[derive(Debug, Clone)]
pub struct TicketImport {
    pub source: PathBuf,
    pub tickets: Vec<Ticket>,
    pub dropped: usize,
}

/// Reads the whole ticket table. A missing column fails the load; rows that
/// cannot become a valid ticket, or name an integration outside the catalog,
/// are logged and skipped.
pub async fn read_ticket_csv(path: PathBuf) -> DashboardResult<TicketImport> {
    let file = fs::File::open(&path).await?;

    let mut reader = AsyncReaderBuilder::new()
        .trim(csv_async::Trim::All)
        .create_deserializer(file.compat());

    let headers = reader.headers().await?.clone();
    check_schema(headers.iter())?;

    let mut rows = reader.deserialize::<TicketCsvRow>();
    let mut tickets = Vec::new();
    let mut seen = HashSet::new();
    let mut dropped = 0;
    let mut line = 1;

    while let Some(result) = rows.next().await {
        line += 1;
        let row = result?;

        match TicketDraft::try_from(row).and_then(Ticket::try_from) {
            Ok(ticket) => {
                if !seen.insert(ticket.name.clone()) {
                    warn!(line, name = %ticket.name, "dropping duplicate ticket");
                    dropped += 1;
                    continue;
                }
                if !is_known(&ticket.integration) {
                    warn!(line, integration = %ticket.integration, "dropping ticket outside integration catalog");
                    dropped += 1;
                    continue;
                }
                tickets.push(ticket);
            }
            Err(err) if err.is_row_local() => {
                warn!(line, error = %err, "dropping ticket row");
                dropped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    info!(
        path = %path.display(),
        kept = tickets.len(),
        dropped,
        "loaded ticket table"
    );

    Ok(TicketImport {
        source: path,
        tickets,
        dropped,
    })
}

fn check_schema<'a>(headers: impl Iterator<Item = &'a str>) -> DashboardResult<()> {
    let present: HashSet<&str> = headers.collect();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !present.contains(column))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DashboardError::Schema(format!(
            "missing column(s): {}",
            missing.join(", ")
        )))
    }
}

fn parse_cell(
    value: Option<String>,
) -> DashboardResult<Option<chrono::DateTime<chrono::Utc>>> {
    match value {
        Some(raw) => parse_date(&raw),
        None => Ok(None),
    }
}

fn parse_priority(name: &str, raw: &str) -> DashboardResult<i64> {
    let value = raw.trim();
    if let Ok(num) = value.parse::<i64>() {
        return Ok(num);
    }

    match value.parse::<f64>() {
        Ok(num) if num.fract() == 0.0 => Ok(num as i64),
        _ => Err(DashboardError::invalid_row(
            name,
            format!("priority_num {value:?} is not a whole number"),
        )),
    }
}
