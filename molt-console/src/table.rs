use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

/// Comparable cell value for a single sort column
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum SortValue {
    None,
    Int(i64),
    Text(String),
}

pub trait SortableRow {
    fn sort_value(&self, column: &str) -> SortValue;
}

/// Single-column client-side sort state.
#[derive(Debug, Clone, PartialEq)]
pub struct SortState {
    pub column: Option<&'static str>,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: None,
            direction: SortDirection::Asc,
        }
    }
}

impl SortState {
    pub fn by(column: &'static str, direction: SortDirection) -> Self {
        Self {
            column: Some(column),
            direction,
        }
    }

    /// Header click: the active ascending column flips to descending,
    /// anything else becomes ascending on the clicked column.
    pub fn toggle(&mut self, column: &'static str) {
        let is_asc = self.column == Some(column) && self.direction == SortDirection::Asc;
        self.direction = if is_asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        self.column = Some(column);
    }

    pub fn direction_for(&self, column: &str) -> Option<SortDirection> {
        (self.column == Some(column)).then_some(self.direction)
    }
}

/// Stable sort on the selected column. Ties keep their input order.
pub fn sort_rows<T: SortableRow>(rows: &mut [T], state: &SortState) {
    let Some(column) = state.column else {
        return;
    };

    rows.sort_by(|a, b| {
        let ordering = a
            .sort_value(column)
            .partial_cmp(&b.sort_value(column))
            .unwrap_or(Ordering::Equal);
        match state.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        name: &'static str,
    }

    impl SortableRow for Row {
        fn sort_value(&self, column: &str) -> SortValue {
            match column {
                "id" => SortValue::Int(self.id),
                "name" => SortValue::Text(self.name.to_string()),
                _ => SortValue::None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 3, name: "gamma" },
            Row { id: 1, name: "alpha" },
            Row { id: 7, name: "delta" },
            Row { id: 2, name: "beta" },
        ]
    }

    #[test]
    fn ascending_is_non_decreasing() {
        let mut data = rows();
        sort_rows(&mut data, &SortState::by("id", SortDirection::Asc));
        assert!(data.windows(2).all(|w| w[0].id <= w[1].id));
    }

    #[test]
    fn toggling_reverses_exactly() {
        let mut state = SortState::default();
        state.toggle("name");
        assert_eq!(state.direction, SortDirection::Asc);

        let mut asc = rows();
        sort_rows(&mut asc, &state);

        state.toggle("name");
        assert_eq!(state.direction, SortDirection::Desc);
        let mut desc = rows();
        sort_rows(&mut desc, &state);

        asc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn switching_column_resets_to_ascending() {
        let mut state = SortState::by("id", SortDirection::Desc);
        state.toggle("name");
        assert_eq!(state, SortState::by("name", SortDirection::Asc));
        assert_eq!(state.direction_for("name"), Some(SortDirection::Asc));
        assert_eq!(state.direction_for("id"), None);
    }

    #[test]
    fn no_column_leaves_order_untouched() {
        let mut data = rows();
        sort_rows(&mut data, &SortState::default());
        assert_eq!(data, rows());
    }
}
