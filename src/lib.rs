pub mod help;

pub use help::error::{ConfigError, FormatError};
pub use help::formatter::{FormatterOpts, HelpFormatter, TextFormat};
pub use help::group::{CommandBuilder, CommandSpec, GroupSpec, HelpRecord, OptSpec, OptionGroup};
pub use help::section::{HelpSection, RenderOpts, render_help};
