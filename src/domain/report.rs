use crate::error::Warning;

pub type Cell = Option<String>;

const FLAT_COLUMNS: &[&str] = &[
    "Tag",
    "Action",
    "Object Name",
    "Object Key",
    "Object Key Value",
    "Object Match",
];

const HIERARCHICAL_COLUMNS: &[&str] = &[
    "Tag",
    "Action",
    "Site Name",
    "Site Key",
    "Site Key Value",
    "Site Match",
    "Element Name",
    "Element Key",
    "Element Key Value",
    "Element Match",
    "Object Name",
    "Object Key",
    "Object Key Value",
    "Object Match",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLayout {
    Flat,
    Hierarchical,
}

/// Rows produced by one run, header excluded. Rendered once, then dropped.
#[derive(Debug, Clone)]
pub struct Report {
    pub layout: ReportLayout,
    pub simulate: bool,
    pub rows: Vec<Vec<Cell>>,
    pub warnings: Vec<Warning>,
}

impl Report {
    pub fn new(layout: ReportLayout, simulate: bool) -> Self {
        Self {
            layout,
            simulate,
            rows: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn header(&self) -> Vec<&'static str> {
        let mut cols = match self.layout {
            ReportLayout::Flat => FLAT_COLUMNS.to_vec(),
            ReportLayout::Hierarchical => HIERARCHICAL_COLUMNS.to_vec(),
        };
        cols.push(if self.simulate {
            "Change Detail (Simulated)"
        } else {
            "Change Detail"
        });
        cols
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.header().len());
        self.rows.push(row);
    }
}
