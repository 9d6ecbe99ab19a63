use std::collections::HashMap;

use log::debug;

use crate::help::error::ConfigError;

/// The narrow capability every option-like value must satisfy to appear in
/// rendered help.
pub trait HelpRecord {
    /// `(term, description)` for one definition-list row, or `None` when the
    /// option is hidden.
    fn help_record(&self) -> Option<(String, String)>;

    fn is_hidden(&self) -> bool;
}

/// A declared CLI parameter: the metadata the help renderer consumes. The
/// parsing engine owns everything else about an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptSpec {
    pub name: String,
    pub short: Option<char>,
    pub long: Option<String>,
    pub metavar: Option<String>,
    pub help: Option<String>,
    pub hidden: bool,
    pub positional: bool,
    group: Option<String>,
}

/// Split a declaration title like `-q|--quality` into (name, short, long).
/// A title with no leading dash declares a positional parameter.
fn divine(title: &str) -> (String, Option<char>, Option<String>) {
    let flags: Vec<String> = title.split('|').map(std::string::ToString::to_string).collect();
    let short = flags
        .iter()
        .filter(|&i| i.starts_with('-') && i.len() == 2)
        .cloned()
        .collect::<String>()
        .trim_matches('-')
        .chars()
        .next();

    let long = Some(String::from(
        flags
            .iter()
            .filter(|&i| i.starts_with("--") && i.len() > 2)
            .cloned()
            .collect::<String>()
            .trim_matches('-'),
    ))
    .filter(|s| !s.is_empty());

    let name = long
        .clone()
        .unwrap_or_else(|| short.map_or_else(|| title.to_string(), |c| c.to_string()));

    (name, short, long)
}

impl OptSpec {
    pub fn new(title: &str) -> Self {
        let (name, short, long) = divine(title);
        let positional = short.is_none() && long.is_none();
        Self {
            name,
            short,
            long,
            metavar: None,
            help: None,
            hidden: false,
            positional,
            group: None,
        }
    }

    pub fn help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    pub fn metavar(mut self, metavar: &str) -> Self {
        self.metavar = Some(metavar.to_string());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn group_name(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// The first-column text for this option, e.g. `-q, --quality <LEVEL>`.
    pub fn term(&self) -> String {
        if self.positional {
            return self
                .metavar
                .clone()
                .unwrap_or_else(|| self.name.to_uppercase());
        }
        let mut parts: Vec<String> = Vec::new();
        if let Some(short) = self.short {
            parts.push(format!("-{short}"));
        }
        if let Some(long) = &self.long {
            parts.push(format!("--{long}"));
        }
        let mut term = parts.join(", ");
        if let Some(metavar) = &self.metavar {
            term.push_str(&format!(" <{metavar}>"));
        }
        term
    }

    fn help_option() -> Self {
        OptSpec::new("-h|--help").help("Show this message and exit.")
    }
}

impl HelpRecord for OptSpec {
    fn help_record(&self) -> Option<(String, String)> {
        if self.hidden {
            return None;
        }
        Some((self.term(), self.help.clone().unwrap_or_default()))
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// A group declaration: the name and group-level attributes supplied when a
/// command associates options with a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpec {
    name: String,
    help: Option<String>,
    hidden: bool,
}

impl GroupSpec {
    pub fn new(name: &str) -> Result<Self, ConfigError> {
        if name.is_empty() {
            return Err(ConfigError::EmptyGroupName);
        }
        Ok(Self {
            name: name.to_string(),
            help: None,
            hidden: false,
        })
    }

    pub fn help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A resolved option group: member positions into the owning command's flat
/// parameter list, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup {
    name: String,
    help: Option<String>,
    hidden: bool,
    members: Vec<usize>,
}

impl OptionGroup {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// A group is hidden when its flag is set or when it has no visible
    /// member left to render.
    pub fn is_hidden(&self, params: &[OptSpec]) -> bool {
        self.hidden || self.members.iter().all(|&i| params[i].hidden)
    }

    /// Definition-list rows for the visible members, in declaration order.
    pub fn help_records(&self, params: &[OptSpec]) -> Vec<(String, String)> {
        self.members.iter().filter_map(|&i| params[i].help_record()).collect()
    }
}

/// A command's help-relevant declaration: the flat ordered parameter list
/// plus the groups resolved from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    name: String,
    about: Option<String>,
    params: Vec<OptSpec>,
    groups: Vec<OptionGroup>,
    ungrouped: Vec<usize>,
}

pub struct CommandBuilder {
    name: String,
    about: Option<String>,
    params: Vec<OptSpec>,
    group_specs: Vec<GroupSpec>,
}

impl CommandSpec {
    pub fn new(name: &str) -> CommandBuilder {
        CommandBuilder {
            name: name.to_string(),
            about: None,
            params: Vec::new(),
            group_specs: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn about(&self) -> Option<&str> {
        self.about.as_deref()
    }

    pub fn params(&self) -> &[OptSpec] {
        &self.params
    }

    pub fn groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    /// Rows for the ungrouped options (help option included), skipping
    /// hidden ones.
    pub fn ungrouped_records(&self) -> Vec<(String, String)> {
        self.ungrouped
            .iter()
            .filter_map(|&i| self.params[i].help_record())
            .collect()
    }
}

impl CommandBuilder {
    pub fn about(mut self, about: &str) -> Self {
        self.about = Some(about.to_string());
        self
    }

    /// Declares an ungrouped parameter.
    pub fn option(mut self, opt: OptSpec) -> Self {
        self.params.push(opt);
        self
    }

    /// Declares a named group of options. The group's hidden flag cascades
    /// onto every member here, at assignment time, and never again.
    pub fn group(mut self, spec: GroupSpec, options: Vec<OptSpec>) -> Result<Self, ConfigError> {
        if options.is_empty() {
            return Err(ConfigError::EmptyGroup { group: spec.name.clone() });
        }
        for mut opt in options {
            if let Some(first) = &opt.group {
                return Err(ConfigError::AlreadyGrouped {
                    option: opt.name.clone(),
                    first: first.clone(),
                    second: spec.name.clone(),
                });
            }
            if let Some(existing) = self
                .params
                .iter()
                .find(|p| p.name == opt.name && p.group.is_some())
            {
                return Err(ConfigError::AlreadyGrouped {
                    option: opt.name.clone(),
                    first: existing.group.clone().unwrap_or_default(),
                    second: spec.name.clone(),
                });
            }
            opt.group = Some(spec.name.clone());
            if spec.hidden {
                opt.hidden = true;
            }
            self.params.push(opt);
        }
        self.group_specs.push(spec);
        Ok(self)
    }

    /// Partitions the flat parameter list into groups (first-seen order) and
    /// the ungrouped residue, then appends the help option to the latter.
    pub fn build(mut self) -> CommandSpec {
        let mut order: Vec<String> = Vec::new();
        let mut buckets: HashMap<String, Vec<usize>> = HashMap::new();
        let mut ungrouped: Vec<usize> = Vec::new();

        for (i, param) in self.params.iter().enumerate() {
            if param.positional {
                continue;
            }
            match &param.group {
                Some(group) => {
                    if !buckets.contains_key(group) {
                        order.push(group.clone());
                    }
                    buckets.entry(group.clone()).or_default().push(i);
                }
                None => ungrouped.push(i),
            }
        }

        self.params.push(OptSpec::help_option());
        ungrouped.push(self.params.len() - 1);

        let groups = order
            .into_iter()
            .map(|name| {
                let members = buckets.remove(&name).unwrap_or_default();
                let spec = self.group_specs.iter().find(|s| s.name == name);
                OptionGroup {
                    name,
                    help: spec.and_then(|s| s.help.clone()),
                    hidden: spec.map(|s| s.hidden).unwrap_or(false),
                    members,
                }
            })
            .collect();

        debug!("resolved command '{}' with {} params", self.name, self.params.len());

        CommandSpec {
            name: self.name,
            about: self.about,
            params: self.params,
            groups,
            ungrouped,
        }
    }
}
