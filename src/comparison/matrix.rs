//! Method × version tables.
//!
//! All matrices share one traversal: rows are methods in alphabetical order,
//! columns are versions in ascending order, and a cell is either the
//! selector's symbol or the N/A marker when the method does not exist in
//! that version. Only the row set and the selector differ per matrix.

use crate::core::{CloneCode, MethodRecord, Version};
use crate::formatting::SymbolSet;
use crate::io::ResultStore;

/// Matrices rendered in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixKind {
    Purity,
    ImmutableReturn,
    ReturnClone,
    CallbackClone,
    CallbackArgImmutable,
    FinisherPreservesJoins,
}

impl MatrixKind {
    pub const ALL: [MatrixKind; 6] = [
        MatrixKind::Purity,
        MatrixKind::ImmutableReturn,
        MatrixKind::ReturnClone,
        MatrixKind::CallbackClone,
        MatrixKind::CallbackArgImmutable,
        MatrixKind::FinisherPreservesJoins,
    ];

    /// Whether `record` carries this matrix's attribute. The purity matrix
    /// covers every listed method.
    pub fn carries(self, record: &MethodRecord) -> bool {
        match self {
            Self::Purity => true,
            Self::ImmutableReturn => record.immutable_return.as_bool().is_some(),
            Self::ReturnClone => record.return_clone != CloneCode::Absent,
            Self::CallbackClone => record.callback_clone != CloneCode::Absent,
            Self::CallbackArgImmutable => record.callback_arg_immutable.as_bool().is_some(),
            Self::FinisherPreservesJoins => record.finisher_preserves_joins.as_bool().is_some(),
        }
    }

    pub fn cell(self, symbols: &SymbolSet, record: &MethodRecord) -> String {
        match self {
            Self::Purity => symbols.purity(record.pure, record.impure_mode).to_string(),
            Self::ImmutableReturn => symbols.tristate(record.immutable_return).to_string(),
            Self::ReturnClone => symbols.clone_code(record.return_clone),
            Self::CallbackClone => symbols.clone_code(record.callback_clone),
            Self::CallbackArgImmutable => symbols.tristate(record.callback_arg_immutable).to_string(),
            Self::FinisherPreservesJoins => {
                symbols.tristate(record.finisher_preserves_joins).to_string()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    pub method: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMatrix {
    pub columns: Vec<Version>,
    pub rows: Vec<MatrixRow>,
}

impl AttributeMatrix {
    pub fn row(&self, method: &str) -> Option<&MatrixRow> {
        self.rows.iter().find(|row| row.method == method)
    }
}

pub struct MatrixBuilder<'a> {
    store: &'a ResultStore,
    symbols: &'a SymbolSet,
}

impl<'a> MatrixBuilder<'a> {
    pub fn new(store: &'a ResultStore, symbols: &'a SymbolSet) -> Self {
        Self { store, symbols }
    }

    /// Build a table over `methods` with an arbitrary cell selector.
    pub fn build(
        &self,
        methods: &[String],
        cell: impl Fn(&MethodRecord) -> String,
    ) -> AttributeMatrix {
        let results = self.store.results();
        let rows = methods
            .iter()
            .map(|method| MatrixRow {
                method: method.clone(),
                cells: results
                    .iter()
                    .map(|result| match result.method(method) {
                        Some(record) if record.exists => cell(record),
                        _ => self.symbols.not_applicable.to_string(),
                    })
                    .collect(),
            })
            .collect();

        AttributeMatrix {
            columns: results.iter().map(|result| result.version.clone()).collect(),
            rows,
        }
    }

    /// Build a table over the methods that carry an attribute in at least
    /// one version; `None` when no method does.
    pub fn build_carried(
        &self,
        carries: impl Fn(&MethodRecord) -> bool,
        cell: impl Fn(&MethodRecord) -> String,
    ) -> Option<AttributeMatrix> {
        let methods = self
            .store
            .methods_with(|record| carries(record).then_some(()));
        if methods.is_empty() {
            return None;
        }
        Some(self.build(&methods, cell))
    }

    pub fn build_kind(&self, kind: MatrixKind) -> Option<AttributeMatrix> {
        if kind == MatrixKind::Purity {
            return Some(self.build(self.store.methods(), |record| {
                kind.cell(self.symbols, record)
            }));
        }
        self.build_carried(
            |record| kind.carries(record),
            |record| kind.cell(self.symbols, record),
        )
    }
}
