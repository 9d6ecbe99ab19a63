pub mod error;
pub mod formatter;
pub mod group;
pub mod section;
pub mod text;

pub use error::{ConfigError, FormatError};
pub use formatter::{FormatterOpts, HelpFormatter, TextFormat};
pub use group::{CommandBuilder, CommandSpec, GroupSpec, HelpRecord, OptSpec, OptionGroup};
pub use section::{HelpSection, RenderOpts, render_help};
