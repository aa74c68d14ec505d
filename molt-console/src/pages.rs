pub mod configure_task;
pub mod fetch_detail;
pub mod setup_connection;
pub mod task_list;
pub mod verify_detail;

pub use configure_task::ConfigureTask;
pub use fetch_detail::FetchDetail;
pub use setup_connection::SetupConnection;
pub use task_list::TaskList;
pub use verify_detail::VerifyDetail;

use crate::components::{Cell, ColumnHeader, TableRow};
use crate::routes::Route;
use crate::view_model::{format_epoch, status_label, ChipVariant, FetchListRow, VerifyListRow};

pub(crate) const RUN_COLUMNS: [ColumnHeader; 6] = [
    ColumnHeader::sortable("id", "ID"),
    ColumnHeader::sortable("name", "Name"),
    ColumnHeader::sortable("status", "Status"),
    ColumnHeader::sortable("duration", "Duration"),
    ColumnHeader::sortable("started_at", "Started"),
    ColumnHeader::sortable("finished_at", "Finished"),
];

pub(crate) const VERIFY_COLUMNS: [ColumnHeader; 7] = [
    ColumnHeader::sortable("id", "ID"),
    ColumnHeader::sortable("fetch_id", "Fetch"),
    ColumnHeader::sortable("name", "Name"),
    ColumnHeader::sortable("status", "Status"),
    ColumnHeader::sortable("duration", "Duration"),
    ColumnHeader::sortable("started_at", "Started"),
    ColumnHeader::sortable("finished_at", "Finished"),
];

pub(crate) fn fetch_table_rows(rows: &[FetchListRow]) -> Vec<TableRow> {
    rows.iter()
        .map(|row| TableRow {
            key: row.id.to_string(),
            cells: vec![
                Cell::Link {
                    label: row.id.to_string(),
                    to: Route::FetchDetail { id: row.id },
                },
                Cell::Text(row.name.clone()),
                Cell::Chip {
                    label: status_label(row.status).to_string(),
                    variant: ChipVariant::for_status(row.status),
                },
                Cell::Text(row.duration.clone()),
                Cell::Text(format_epoch(row.started_at)),
                Cell::Text(format_epoch(row.finished_at)),
            ],
        })
        .collect()
}

pub(crate) fn verify_table_rows(rows: &[VerifyListRow]) -> Vec<TableRow> {
    rows.iter()
        .map(|row| TableRow {
            key: row.id.to_string(),
            cells: vec![
                Cell::Link {
                    label: row.id.to_string(),
                    to: Route::VerifyDetail { id: row.id },
                },
                Cell::Link {
                    label: row.fetch_id.to_string(),
                    to: Route::FetchDetail { id: row.fetch_id },
                },
                Cell::Text(row.name.clone()),
                Cell::Chip {
                    label: status_label(row.status).to_string(),
                    variant: ChipVariant::for_status(row.status),
                },
                Cell::Text(row.duration.clone()),
                Cell::Text(format_epoch(row.started_at)),
                Cell::Text(format_epoch(row.finished_at)),
            ],
        })
        .collect()
}
