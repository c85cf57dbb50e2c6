//! HeaderResolver — maps a raw header row onto the five canonical fields.
//!
//! Two passes over the header: exact label match first, then a
//! case-insensitive alias substring match for whatever is still unbound.
//! A column bound to one field is never offered to another.

use crate::coerce;
use crate::config::HeaderTable;
use crate::error::{Error, Result};
use crate::types::{CanonicalField, CellValue};

/// Canonical field → zero-based column position.
///
/// No two fields share a column. Built once per sheet, read-only afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderMap {
    columns: [Option<usize>; 5],
}

impl HeaderMap {
    pub fn column(&self, field: CanonicalField) -> Option<usize> {
        self.columns[field.slot()]
    }

    /// Bound `(field, column)` pairs in declared field order.
    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, usize)> + '_ {
        CanonicalField::ALL
            .into_iter()
            .filter_map(|field| self.column(field).map(|col| (field, col)))
    }

    fn bind(&mut self, field: CanonicalField, column: usize) {
        self.columns[field.slot()] = Some(column);
    }
}

/// Outcome of resolving one header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub map: HeaderMap,
    /// Fields left unbound after both passes, in declared order.
    pub missing: Vec<CanonicalField>,
}

impl Resolution {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// The map, or [`Error::MissingColumns`] naming `sheet` if any field is
    /// unbound. Partial maps are never handed out.
    pub fn into_complete(self, sheet: &str) -> Result<HeaderMap> {
        if self.is_complete() {
            Ok(self.map)
        } else {
            Err(Error::MissingColumns {
                sheet: sheet.to_string(),
                missing: self.missing,
            })
        }
    }
}

/// Resolves header rows against a keyword table.
#[derive(Debug, Clone)]
pub struct HeaderResolver {
    table: HeaderTable,
    /// Lowercased aliases per field, same order as [`CanonicalField::ALL`].
    aliases: [Vec<String>; 5],
}

impl HeaderResolver {
    pub fn new(table: HeaderTable) -> Self {
        let aliases: [Vec<String>; 5] = CanonicalField::ALL.map(|field| {
            table
                .get(field)
                .aliases
                .iter()
                .map(|a| a.to_lowercase())
                .collect()
        });
        Self { table, aliases }
    }

    pub fn resolve(&self, header: &[CellValue]) -> Resolution {
        let cells: Vec<String> = header.iter().map(coerce::plain_text).collect();
        let lowered: Vec<String> = cells.iter().map(|c| c.to_lowercase()).collect();
        let mut used = vec![false; cells.len()];
        let mut map = HeaderMap::default();

        for field in CanonicalField::ALL {
            let label = self.table.get(field).label.trim();
            if let Some(col) = (0..cells.len()).find(|&i| !used[i] && cells[i] == label) {
                map.bind(field, col);
                used[col] = true;
            }
        }

        for field in CanonicalField::ALL {
            if map.column(field).is_some() {
                continue;
            }
            let aliases = &self.aliases[field.slot()];
            let found = (0..lowered.len()).find(|&i| {
                !used[i] && aliases.iter().any(|alias| lowered[i].contains(alias.as_str()))
            });
            if let Some(col) = found {
                map.bind(field, col);
                used[col] = true;
            }
        }

        let missing = CanonicalField::ALL
            .into_iter()
            .filter(|&field| map.column(field).is_none())
            .collect();
        Resolution { map, missing }
    }
}
