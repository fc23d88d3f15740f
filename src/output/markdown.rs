//! Markdown report assembly.
//!
//! The renderer only composes: every table, change log and range list is
//! computed by the comparison components and turned into a section string
//! here. Sections are collected in order and joined once.

use crate::comparison::changes::{self, Direction};
use crate::comparison::{
    compress_group, AttributeMatrix, ChangeDetector, MatrixBuilder, MatrixKind, Range,
    VersionChanges,
};
use crate::config::{RangeGroup, ReportConfig};
use crate::core::{common_major_prefix, AttributeValue, Version};
use crate::formatting::SymbolSet;
use crate::io::ResultStore;
use crate::output::formatters::{bullet, markdown_table, single_line};
use std::io::Write;
use tracing::debug;

pub struct ReportRenderer<'a> {
    store: &'a ResultStore,
    config: &'a ReportConfig,
    symbols: SymbolSet,
}

impl<'a> ReportRenderer<'a> {
    pub fn new(store: &'a ResultStore, config: &'a ReportConfig, symbols: SymbolSet) -> Self {
        Self {
            store,
            config,
            symbols,
        }
    }

    /// Rendered sections in document order. Sections without data are
    /// left out rather than rendered empty.
    pub fn sections(&self) -> Vec<String> {
        let mut sections = vec![self.header(), self.overview(), self.summary_table()];

        let builder = MatrixBuilder::new(self.store, &self.symbols);
        sections.extend(MatrixKind::ALL.iter().filter_map(|&kind| {
            let matrix = builder.build_kind(kind);
            if matrix.is_none() {
                debug!(?kind, "No method carries the attribute, omitting matrix");
            }
            matrix.map(|matrix| self.matrix_section(kind, &matrix))
        }));

        let detector = ChangeDetector::new(self.store);
        sections.push(self.purity_changes(&detector.detect(&[changes::PURITY])));
        sections.push(self.clone_changes(&detector.detect(&changes::CLONE_CODES)));

        sections.extend(
            self.config
                .range_groups
                .iter()
                .map(|group| self.range_section(group, &compress_group(self.store, group))),
        );
        sections.extend(self.errors_section());
        sections.push(self.footer());

        sections
    }

    pub fn render(&self) -> String {
        let mut document = self.sections().join("\n\n");
        document.push('\n');
        document
    }

    pub fn write_report<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(self.render().as_bytes())?;
        writer.flush()
    }

    fn header(&self) -> String {
        let s = &self.symbols;
        let subject = &self.config.subject;
        [
            format!("# {}", self.config.title),
            String::new(),
            format!(
                "This document summarizes the purity behavior of `{subject}` methods across all surveyed GORM versions."
            ),
            String::new(),
            "## Legend".to_string(),
            String::new(),
            format!("- {} **Pure**: Method does NOT pollute the receiver/argument", s.pure),
            format!(
                "- {} **Impure (overwrite)**: Method pollutes the receiver; repeated calls replace prior state",
                s.impure_overwrite
            ),
            format!(
                "- {} **Impure (accumulate)**: Method pollutes the receiver; repeated calls compound",
                s.impure_accumulate
            ),
            format!(
                "- {} **Impure (mode unknown)**: Method pollutes the receiver; accumulation not determined",
                s.impure_unknown
            ),
            format!(
                "- {} **Immutable-return**: Returned `{subject}` can be safely reused/branched",
                s.yes
            ),
            format!(
                "- {} **Mutable-return**: Returned `{subject}` is mutable (branches interfere)",
                s.no
            ),
            format!(
                "- {} **N/A**: Method does not exist in that version, or was not tested",
                s.not_applicable
            ),
            format!(
                "- **Clone values**: 0 = no clone (shared), 1 = statement clone, 2 = full clone, {} = unknown",
                s.unknown_code
            ),
        ]
        .join("\n")
    }

    fn overview(&self) -> String {
        let versions = self.store.versions();
        let range = match (versions.first(), versions.last()) {
            (Some(first), Some(last)) => format!("{first} ~ {last}"),
            _ => self.symbols.not_applicable.to_string(),
        };
        [
            "## Overview".to_string(),
            String::new(),
            format!("- **Versions surveyed**: {}", versions.len()),
            format!("- **Version range**: {range}"),
        ]
        .join("\n")
    }

    fn summary_table(&self) -> String {
        let rows = self.store.results().iter().map(|result| {
            let summary = &result.summary;
            vec![
                result.version.to_string(),
                summary.total_methods.to_string(),
                summary.pure_methods.to_string(),
                summary.impure_methods.to_string(),
                summary.immutable_count.to_string(),
            ]
        });
        format!(
            "## Summary by Version\n\n{}",
            markdown_table(
                &["Version", "Total", "Pure", "Impure", "Immutable-return"],
                rows
            )
        )
    }

    fn matrix_section(&self, kind: MatrixKind, matrix: &AttributeMatrix) -> String {
        let (title, description) = self.matrix_text(kind);
        let mut headers = vec!["Method".to_string()];
        headers.extend(column_labels(&matrix.columns));

        let rows = matrix.rows.iter().map(|row| {
            std::iter::once(row.method.clone())
                .chain(row.cells.iter().cloned())
                .collect::<Vec<_>>()
        });

        format!(
            "## {title}\n\n{description}\n\n{}",
            markdown_table(&headers, rows)
        )
    }

    fn matrix_text(&self, kind: MatrixKind) -> (&'static str, String) {
        let s = &self.symbols;
        let subject = &self.config.subject;
        let na = s.not_applicable;
        match kind {
            MatrixKind::Purity => (
                "Method Purity Matrix",
                format!(
                    "Purity behavior for each method across versions ({}=pure, {}=impure (overwrite), {}=impure (accumulate), {}=impure (mode unknown), {na}=N/A):",
                    s.pure, s.impure_overwrite, s.impure_accumulate, s.impure_unknown
                ),
            ),
            MatrixKind::ImmutableReturn => (
                "Immutable-Return Matrix",
                format!(
                    "Whether returned `{subject}` is immutable ({}=immutable, {}=mutable, {na}=N/A):",
                    s.yes, s.no
                ),
            ),
            MatrixKind::ReturnClone => (
                "Return Clone Value Matrix",
                format!(
                    "Clone value of the returned `{subject}` (0=no clone, 1=statement clone, 2=full clone, {}=unknown, {na}=N/A):",
                    s.unknown_code
                ),
            ),
            MatrixKind::CallbackClone => (
                "Callback Clone Value Matrix",
                format!(
                    "Clone value of the `{subject}` passed to callbacks (0=no clone, 1=statement clone, 2=full clone, {}=unknown, {na}=N/A):",
                    s.unknown_code
                ),
            ),
            MatrixKind::CallbackArgImmutable => (
                "Callback Argument Immutability Matrix",
                format!(
                    "Whether the `{subject}` passed to callbacks is isolated ({}=immutable, {}=mutable, {na}=N/A):",
                    s.yes, s.no
                ),
            ),
            MatrixKind::FinisherPreservesJoins => (
                "Finisher Join Preservation Matrix",
                format!(
                    "Whether finishers keep `Joins` clauses after execution ({}=preserved, {}=lost, {na}=N/A):",
                    s.yes, s.no
                ),
            ),
        }
    }

    fn purity_changes(&self, changes: &[VersionChanges<bool>]) -> String {
        let entries = changes.iter().map(|pair| {
            let lines = pair.changes.iter().map(|change| {
                let label = match change.direction {
                    Direction::Falling => "became impure",
                    Direction::Rising => "became pure",
                };
                bullet(
                    &change.method,
                    &format!(
                        "{} → {} ({label})",
                        self.symbols.purity_flag(change.from),
                        self.symbols.purity_flag(change.to)
                    ),
                )
            });
            change_subsection(pair, lines)
        });

        change_log(
            "Purity Changes Between Versions",
            "Methods whose purity behavior changed between versions:",
            entries,
        )
    }

    fn clone_changes(&self, changes: &[VersionChanges<i64>]) -> String {
        let entries = changes.iter().map(|pair| {
            let lines = pair.changes.iter().map(|change| {
                bullet(
                    &change.method,
                    &format!("{} {} → {}", change.field, change.from, change.to),
                )
            });
            change_subsection(pair, lines)
        });

        change_log(
            "Clone Value Changes Between Versions",
            "Methods whose `return_clone` or `callback_clone` value changed between versions:",
            entries,
        )
    }

    fn range_section(&self, group: &RangeGroup, ranges: &[Range<Vec<AttributeValue>>]) -> String {
        let mut headers = vec!["Versions".to_string()];
        headers.extend(group.fields.iter().map(|field| field.header().to_string()));

        let rows = ranges.iter().map(|range| {
            std::iter::once(range.label())
                .chain(range.value.iter().map(|value| self.symbols.value(*value)))
                .collect::<Vec<_>>()
        });

        let mut section = format!("## {}\n\n", group.title);
        if let Some(description) = &group.description {
            section.push_str(description);
            section.push_str("\n\n");
        }
        section.push_str(&markdown_table(&headers, rows));
        section
    }

    fn errors_section(&self) -> Option<String> {
        let entries: Vec<String> = self
            .store
            .results()
            .iter()
            .filter_map(|result| {
                let lines: Vec<String> = result
                    .methods
                    .iter()
                    .filter_map(|(name, record)| {
                        record
                            .error
                            .as_deref()
                            .map(|error| bullet(name, &single_line(error)))
                    })
                    .collect();
                (!lines.is_empty()).then(|| format!("### {}\n\n{}", result.version, lines.join("\n")))
            })
            .collect();

        if entries.is_empty() {
            return None;
        }
        Some(format!(
            "## Survey Errors\n\nProbe failures recorded by the survey run:\n\n{}",
            entries.join("\n\n")
        ))
    }

    fn footer(&self) -> String {
        format!("---\n\n*Generated by {}*", self.config.generator)
    }
}

fn change_subsection<T>(pair: &VersionChanges<T>, lines: impl Iterator<Item = String>) -> String {
    format!("### {}\n\n{}", pair.heading(), lines.collect::<Vec<_>>().join("\n"))
}

fn change_log(title: &str, description: &str, entries: impl Iterator<Item = String>) -> String {
    let mut section = format!("## {title}\n\n{description}");
    for entry in entries {
        section.push_str("\n\n");
        section.push_str(&entry);
    }
    section
}

/// Render the report for `store` into a string.
pub fn render_report(store: &ResultStore, config: &ReportConfig, symbols: SymbolSet) -> String {
    ReportRenderer::new(store, config, symbols).render()
}

/// Matrix column labels: versions with their shared `v<major>.` removed.
pub fn column_labels(versions: &[Version]) -> Vec<String> {
    let prefix = common_major_prefix(versions);
    versions.iter().map(|v| v.short_label(&prefix)).collect()
}
