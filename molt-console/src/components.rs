pub mod chip;
pub mod guide;
pub mod header;
pub mod inputs;
pub mod select_card;
pub mod stats;
pub mod styles;
pub mod table;

pub use chip::{Chip, ErrorBanner, StatusChip};
pub use guide::{GuideSection, SetupGuide};
pub use header::Header;
pub use inputs::{FieldInput, SelectInput, SelectOption, Toggle};
pub use select_card::{CardOption, SelectCardGroup};
pub use stats::StatsPanel;
pub use table::{Cell, ColumnHeader, DataTable, TableRow};
