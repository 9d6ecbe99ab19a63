use optgroup::{
    CommandSpec, FormatError, FormatterOpts, GroupSpec, HelpFormatter, OptSpec, RenderOpts, render_help,
};

fn formatter(width: usize) -> HelpFormatter {
    HelpFormatter::new(FormatterOpts {
        width: Some(width),
        ..FormatterOpts::default()
    })
    .unwrap()
}

fn two_group_command() -> CommandSpec {
    CommandSpec::new("tool")
        .group(
            GroupSpec::new("First").unwrap(),
            vec![OptSpec::new("--opt").metavar("TEXT").help("first option")],
        )
        .unwrap()
        .group(
            GroupSpec::new("Second").unwrap(),
            vec![OptSpec::new("--much-longer-opt").metavar("TEXT").help("second option")],
        )
        .unwrap()
        .build()
}

/// Column where the description starts on the line containing `term`.
fn description_column(output: &str, term: &str, description: &str) -> usize {
    let line = output
        .lines()
        .find(|l| l.contains(term))
        .unwrap_or_else(|| panic!("no line with term {term:?} in:\n{output}"));
    line.find(description)
        .unwrap_or_else(|| panic!("description {description:?} not on line {line:?}"))
}

#[test]
fn test_aligned_sections_share_one_description_column() {
    let cmd = two_group_command();
    let mut fmt = formatter(80);
    let output = render_help(&cmd, &mut fmt, &RenderOpts::default()).unwrap();

    // union col1 width = len("--much-longer-opt <TEXT>") = 24, spacing 2,
    // section indent 2 -> descriptions start at column 28 everywhere
    assert_eq!(description_column(&output, "--opt <TEXT>", "first option"), 28);
    assert_eq!(description_column(&output, "--much-longer-opt <TEXT>", "second option"), 28);
    assert_eq!(
        description_column(&output, "-h, --help", "Show this message and exit."),
        28
    );
}

#[test]
fn test_unaligned_sections_align_independently() {
    let cmd = two_group_command();
    let mut fmt = formatter(80);
    let opts = RenderOpts {
        aligned: false,
        ..RenderOpts::default()
    };
    let output = render_help(&cmd, &mut fmt, &opts).unwrap();

    // each section uses its own col1 width: 12 and 24
    assert_eq!(description_column(&output, "--opt <TEXT>", "first option"), 16);
    assert_eq!(description_column(&output, "--much-longer-opt <TEXT>", "second option"), 28);
}

#[test]
fn test_full_wide_rendering() {
    let cmd = CommandSpec::new("demo")
        .option(OptSpec::new("-v|--verbose").help("more output"))
        .group(
            GroupSpec::new("Tuning").unwrap().help("Knobs."),
            vec![OptSpec::new("--depth").metavar("N").help("search depth")],
        )
        .unwrap()
        .build();

    let mut fmt = formatter(60);
    let output = render_help(&cmd, &mut fmt, &RenderOpts::default()).unwrap();

    let expected = "\
Tuning:
  Knobs.
  --depth <N>    search depth

Other options:
  -v, --verbose  more output
  -h, --help     Show this message and exit.
";
    assert_eq!(output, expected);
}

#[test]
fn test_full_narrow_rendering() {
    let cmd = CommandSpec::new("demo")
        .option(OptSpec::new("-v|--verbose").help("more output"))
        .group(
            GroupSpec::new("Tuning").unwrap().help("Knobs."),
            vec![OptSpec::new("--depth").metavar("N").help("search depth")],
        )
        .unwrap()
        .build();

    let mut fmt = formatter(30);
    let output = render_help(&cmd, &mut fmt, &RenderOpts::default()).unwrap();

    let expected = "\
Tuning:
  Knobs.
  --depth <N>
     search depth

Other options:
  -v, --verbose
     more output

  -h, --help
     Show this message and
     exit.
";
    assert_eq!(output, expected);
}

#[test]
fn test_hidden_group_fully_suppressed() {
    let cmd = CommandSpec::new("tool")
        .group(
            GroupSpec::new("Visible").unwrap(),
            vec![OptSpec::new("--shown").help("a visible option")],
        )
        .unwrap()
        .group(
            GroupSpec::new("Secret").unwrap().hidden(true),
            vec![OptSpec::new("--hidden-knob").help("never printed")],
        )
        .unwrap()
        .build();

    let mut fmt = formatter(80);
    let output = render_help(&cmd, &mut fmt, &RenderOpts::default()).unwrap();

    assert!(output.contains("Visible:"));
    assert!(!output.contains("Secret"));
    assert!(!output.contains("--hidden-knob"));
}

#[test]
fn test_group_of_individually_hidden_options_suppressed() {
    let cmd = CommandSpec::new("tool")
        .group(
            GroupSpec::new("Ghost").unwrap(),
            vec![
                OptSpec::new("--a").hidden(true),
                OptSpec::new("--b").hidden(true),
            ],
        )
        .unwrap()
        .build();

    let mut fmt = formatter(80);
    let output = render_help(&cmd, &mut fmt, &RenderOpts::default()).unwrap();

    assert!(!output.contains("Ghost"));
    // the declared group still demotes the residue heading
    assert!(output.contains("Other options:"));
}

#[test]
fn test_heading_without_groups_is_options() {
    let cmd = CommandSpec::new("tool").option(OptSpec::new("--flag")).build();
    let mut fmt = formatter(80);
    let output = render_help(&cmd, &mut fmt, &RenderOpts::default()).unwrap();
    assert!(output.starts_with("Options:\n"));
    assert!(!output.contains("Other options"));
}

#[test]
fn test_truncated_descriptions_stay_on_one_line() {
    let long_help = "a very long description that would certainly wrap onto \
                     several lines at this terminal width without truncation";
    let cmd = CommandSpec::new("tool")
        .option(OptSpec::new("--wordy").help(long_help))
        .build();

    let mut fmt = formatter(40);
    let opts = RenderOpts {
        truncate_descriptions: true,
        ..RenderOpts::default()
    };
    let output = render_help(&cmd, &mut fmt, &opts).unwrap();

    let wordy_lines: Vec<&str> = output.lines().filter(|l| l.contains("a very long")).collect();
    assert_eq!(wordy_lines.len(), 1);
    assert!(wordy_lines[0].trim_end().ends_with("..."));
}

#[test]
fn test_render_requires_help_formatter() {
    struct PlainSink;
    impl optgroup::TextFormat for PlainSink {
        fn write(&mut self, _fragment: &str) {}
        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    }

    let cmd = CommandSpec::new("tool").build();
    let mut sink = PlainSink;
    let result = render_help(&cmd, &mut sink, &RenderOpts::default());
    assert_eq!(result, Err(FormatError::TypeMismatch));
}
