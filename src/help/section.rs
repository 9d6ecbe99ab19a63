use log::debug;

use crate::help::error::FormatError;
use crate::help::formatter::{HelpFormatter, TextFormat};
use crate::help::group::CommandSpec;

/// One rendering-ready help unit: a heading, its definition rows, and an
/// optional free-text description shown before the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpSection {
    pub heading: String,
    pub definitions: Vec<(String, String)>,
    pub description: Option<String>,
}

/// Knobs for [`render_help`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOpts {
    /// Align the definition columns of every section to one boundary.
    pub aligned: bool,
    /// Cut descriptions to a single line instead of wrapping them.
    pub truncate_descriptions: bool,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            aligned: true,
            truncate_descriptions: false,
        }
    }
}

impl HelpFormatter {
    /// Writes one section: heading, optional description, definition rows.
    /// `col1_width` overrides the section-local column computation.
    pub fn write_section(&mut self, section: &HelpSection, col1_width: Option<usize>, truncate_col2: bool) {
        let row_sep = self.row_sep().cloned();
        self.section(&section.heading, |fmt| {
            if let Some(description) = &section.description {
                fmt.write_text(description);
                if let Some(sep) = &row_sep {
                    fmt.write(sep);
                }
            }
            fmt.write_dl(&section.definitions, col1_width, truncate_col2);
        });
    }

    /// Writes multiple sections with one column boundary computed over the
    /// union of their rows, so descriptions line up across sections.
    pub fn write_aligned_sections(&mut self, sections: &[HelpSection], truncate_col2: bool) {
        let all_rows = sections.iter().flat_map(|s| s.definitions.iter());
        let col1_width = self.compute_col1_width(all_rows, self.col1_max_width());
        for section in sections {
            self.write_section(section, Some(col1_width), truncate_col2);
        }
    }

    pub fn write_many_sections(&mut self, sections: &[HelpSection], aligned: bool, truncate_col2: bool) {
        if aligned {
            self.write_aligned_sections(sections, truncate_col2);
            return;
        }
        for section in sections {
            self.write_section(section, None, truncate_col2);
        }
    }
}

/// Builds the visible sections of `cmd`: one per named group, then the
/// ungrouped options last.
fn visible_sections(cmd: &CommandSpec) -> Vec<HelpSection> {
    let mut sections: Vec<HelpSection> = Vec::new();

    for group in cmd.groups() {
        if group.is_hidden(cmd.params()) {
            continue;
        }
        sections.push(HelpSection {
            heading: group.name().to_string(),
            definitions: group.help_records(cmd.params()),
            description: group.help().map(str::to_string),
        });
    }

    let ungrouped = cmd.ungrouped_records();
    if !ungrouped.is_empty() {
        let heading = if cmd.groups().is_empty() { "Options" } else { "Other options" };
        sections.push(HelpSection {
            heading: heading.to_string(),
            definitions: ungrouped,
            description: None,
        });
    }

    sections
}

/// Renders the full help body of `cmd` into `fmt` and returns the buffer
/// contents. Fails before producing any output when `fmt` is not a
/// [`HelpFormatter`], since nothing else carries the aligned-column
/// algorithm.
pub fn render_help(
    cmd: &CommandSpec,
    fmt: &mut dyn TextFormat,
    opts: &RenderOpts,
) -> Result<String, FormatError> {
    let fmt = fmt
        .as_any_mut()
        .downcast_mut::<HelpFormatter>()
        .ok_or(FormatError::TypeMismatch)?;

    let sections = visible_sections(cmd);
    debug!(
        "rendering {} section(s) for '{}' (aligned={})",
        sections.len(),
        cmd.name(),
        opts.aligned
    );
    fmt.write_many_sections(&sections, opts.aligned, opts.truncate_descriptions);
    Ok(fmt.getvalue())
}
