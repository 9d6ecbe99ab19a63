use std::any::Any;

use console::Term;
use log::debug;

use crate::help::error::ConfigError;
use crate::help::text;

/// The base contract every help output target satisfies. Rendering entry
/// points accept `&mut dyn TextFormat` and downcast to [`HelpFormatter`];
/// the `Any` hook exists for that check.
pub trait TextFormat: Any {
    fn write(&mut self, fragment: &str);
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Layout knobs for [`HelpFormatter`]. All fields have working defaults;
/// `width` overrides terminal detection when set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterOpts {
    pub width: Option<usize>,
    pub max_width: usize,
    pub indent_increment: usize,
    pub col1_max_width: usize,
    pub col2_min_width: usize,
    pub col_spacing: usize,
    pub row_sep: Option<String>,
}

impl Default for FormatterOpts {
    fn default() -> Self {
        Self {
            width: None,
            max_width: 80,
            indent_increment: 2,
            col1_max_width: 30,
            col2_min_width: 20,
            col_spacing: 2,
            row_sep: None,
        }
    }
}

/// A mutable, sequentially-accessed help-text accumulator. Definition lists
/// are rendered as a two-column table when the second column keeps at least
/// `col2_min_width` columns, and in a stacked narrow form otherwise.
///
/// |<----------------------- width ------------------------>|
/// |                |<---------- available_width ---------->|
/// | current_indent | col1_width | col_spacing | col2_width |
pub struct HelpFormatter {
    width: usize,
    indent_increment: usize,
    current_indent: usize,
    col1_max_width: usize,
    col2_min_width: usize,
    col_spacing: usize,
    row_sep: Option<String>,
    buffer: Vec<String>,
}

fn check_positive(value: usize, name: &str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::NonPositiveOption { name: name.to_string() });
    }
    Ok(())
}

fn detected_terminal_width() -> usize {
    // (rows, cols); console falls back to 80 columns off-tty
    let (_rows, cols) = Term::stdout().size();
    if cols == 0 { 80 } else { cols as usize }
}

impl HelpFormatter {
    pub fn new(opts: FormatterOpts) -> Result<Self, ConfigError> {
        check_positive(opts.max_width, "max_width")?;
        check_positive(opts.indent_increment, "indent_increment")?;
        check_positive(opts.col1_max_width, "col1_max_width")?;
        check_positive(opts.col2_min_width, "col2_min_width")?;
        check_positive(opts.col_spacing, "col_spacing")?;
        if let Some(width) = opts.width {
            check_positive(width, "width")?;
        }

        let width = opts.width.unwrap_or_else(|| opts.max_width.min(detected_terminal_width()));

        Ok(Self {
            width,
            indent_increment: opts.indent_increment,
            current_indent: 0,
            col1_max_width: opts.col1_max_width,
            col2_min_width: opts.col2_min_width,
            col_spacing: opts.col_spacing,
            row_sep: opts.row_sep,
            buffer: Vec::new(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn current_indent(&self) -> usize {
        self.current_indent
    }

    pub fn col1_max_width(&self) -> usize {
        self.col1_max_width
    }

    pub fn row_sep(&self) -> Option<&String> {
        self.row_sep.as_ref()
    }

    pub fn available_width(&self) -> usize {
        self.width.saturating_sub(self.current_indent)
    }

    /// Returns the buffer contents.
    pub fn getvalue(&self) -> String {
        self.buffer.concat()
    }

    pub fn write(&mut self, fragment: &str) {
        self.buffer.push(fragment.to_string());
    }

    /// Writes a blank separator line unless the buffer is still empty.
    pub fn write_paragraph(&mut self) {
        if !self.buffer.is_empty() {
            self.write("\n");
        }
    }

    pub fn write_heading(&mut self, heading: &str) {
        let indentation = " ".repeat(self.current_indent);
        self.write(&format!("{indentation}{heading}:\n"));
    }

    /// Word-wraps `text` into the available width, each line prefixed with
    /// the current indentation.
    pub fn write_text(&mut self, text: &str) {
        let indentation = " ".repeat(self.current_indent);
        let wrapped = text::wrap(text, self.available_width());
        for line in wrapped.lines() {
            if line.is_empty() {
                self.write("\n");
            } else {
                self.write(&format!("{indentation}{line}\n"));
            }
        }
    }

    /// Runs `body` with the indentation increased by `amount`, restoring the
    /// previous indentation afterwards.
    pub fn with_indent<T>(&mut self, amount: usize, body: impl FnOnce(&mut Self) -> T) -> T {
        self.current_indent += amount;
        let out = body(self);
        self.current_indent -= amount;
        out
    }

    /// Writes a section heading and runs `body` one indentation level deeper.
    pub fn section(&mut self, heading: &str, body: impl FnOnce(&mut Self)) {
        self.write_paragraph();
        self.write_heading(heading);
        self.with_indent(self.indent_increment, body);
    }

    /// Like [`HelpFormatter::section`] for fallible bodies: the indentation
    /// is restored before an `Err` propagates.
    pub fn try_section<T, E>(
        &mut self,
        heading: &str,
        body: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, E> {
        self.write_paragraph();
        self.write_heading(heading);
        self.with_indent(self.indent_increment, body)
    }

    /// The first-column width for `rows`: the longest term that still fits
    /// within `max_width`, or 0 when every term overflows. A single
    /// unusually long term must not blow out the column for the other rows.
    pub fn compute_col1_width<'a, I>(&self, rows: I, max_width: usize) -> usize
    where
        I: IntoIterator<Item = &'a (String, String)>,
    {
        rows.into_iter()
            .map(|(term, _)| text::display_width(term))
            .filter(|&length| length <= max_width)
            .max()
            .unwrap_or(0)
    }

    /// Writes a definition list into the buffer. `col1_width` overrides the
    /// per-list width computation; pass the same value to several lists to
    /// align them. With `truncate_col2` descriptions are cut to one line.
    pub fn write_dl(&mut self, rows: &[(String, String)], col1_width: Option<usize>, truncate_col2: bool) {
        let col1_max_width = self.col1_max_width.min(self.available_width());
        let col1_width = col1_width
            .unwrap_or_else(|| self.compute_col1_width(rows, col1_max_width))
            .min(col1_max_width);

        let needed = col1_width + self.col_spacing + self.col2_min_width;
        if self.available_width() < needed {
            debug!(
                "narrow layout: available={} col1={} spacing={} col2_min={}",
                self.available_width(),
                col1_width,
                self.col_spacing,
                self.col2_min_width
            );
            self.write_narrow_dl(rows, truncate_col2);
        } else {
            let col2_width = self.available_width() - col1_width - self.col_spacing;
            self.write_wide_dl(rows, col1_width, col2_width, truncate_col2);
        }
    }

    fn write_wide_dl(
        &mut self,
        rows: &[(String, String)],
        col1_width: usize,
        col2_width: usize,
        truncate_col2: bool,
    ) {
        let col1_plus_spacing = col1_width + self.col_spacing;
        let col2_indentation =
            " ".repeat(self.current_indent + self.indent_increment.max(col1_plus_spacing));
        let current_indentation = " ".repeat(self.current_indent);
        let row_sep = self.row_sep.clone();

        for (term, description) in rows {
            self.write(&current_indentation);
            self.write(term);
            if description.is_empty() {
                self.write("\n");
                if let Some(sep) = &row_sep {
                    self.write(sep);
                }
                continue;
            }

            let term_display_length = text::display_width(term);
            if term_display_length <= col1_width {
                self.write(&" ".repeat(col1_plus_spacing - term_display_length));
            } else {
                // overflowing term: description starts on the next line at
                // the column-2 boundary
                self.write("\n");
                self.write(&col2_indentation);
            }

            if truncate_col2 {
                self.write(&text::truncate(description, col2_width));
                self.write("\n");
            } else {
                let wrapped = text::wrap(description, col2_width);
                let mut lines = wrapped.lines();
                if let Some(first) = lines.next() {
                    self.write(&format!("{first}\n"));
                }
                for line in lines {
                    if line.is_empty() {
                        self.write("\n");
                    } else {
                        self.write(&format!("{col2_indentation}{line}\n"));
                    }
                }
            }
            if let Some(sep) = &row_sep {
                self.write(sep);
            }
        }
    }

    fn write_narrow_dl(&mut self, rows: &[(String, String)], truncate_descr: bool) {
        let descr_extra_indent = 3.max(self.indent_increment);
        let descr_total_indent = self.current_indent + descr_extra_indent;
        let descr_max_width = self.width.saturating_sub(descr_total_indent);
        let current_indentation = " ".repeat(self.current_indent);
        let descr_indentation = " ".repeat(descr_total_indent);

        for (term, description) in rows {
            self.write(&format!("{current_indentation}{term}\n"));
            if !description.is_empty() {
                if truncate_descr {
                    let truncated = text::truncate(description, descr_max_width);
                    self.write(&format!("{descr_indentation}{truncated}\n"));
                } else {
                    self.with_indent(descr_extra_indent, |fmt| fmt.write_text(description));
                }
            }
            self.write("\n");
        }
        // drop the blank line after the final row
        self.buffer.pop();
    }
}

impl TextFormat for HelpFormatter {
    fn write(&mut self, fragment: &str) {
        HelpFormatter::write(self, fragment);
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
