use std::env;

use eyre::Result;
use log::info;
use optgroup::{CommandSpec, FormatterOpts, GroupSpec, HelpFormatter, OptSpec, RenderOpts, render_help};

fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "warn")).init();
}

/// A representative command declaration exercising groups, hidden options,
/// positionals and the ungrouped residue.
fn sample_command() -> Result<CommandSpec> {
    let cmd = CommandSpec::new("convert")
        .about("Convert images between formats")
        .option(OptSpec::new("source").metavar("SOURCE").help("input image"))
        .option(OptSpec::new("-q|--quality").metavar("LEVEL").help("output quality, 1 to 100"))
        .option(OptSpec::new("--keep-metadata").help("copy EXIF data into the output"))
        .group(
            GroupSpec::new("Input options")?.help("How the source image is read."),
            vec![
                OptSpec::new("-f|--format").metavar("FMT").help("force the input format instead of sniffing it"),
                OptSpec::new("--dpi").metavar("N").help("density to assume for vector sources"),
                OptSpec::new("--unsafe-decode").help("skip decoder sanity limits").hidden(true),
            ],
        )?
        .group(
            GroupSpec::new("Output options")?,
            vec![
                OptSpec::new("-o|--output").metavar("PATH").help("where to write the result"),
                OptSpec::new("--overwrite").help("replace the output file if it already exists"),
            ],
        )?
        .build();
    Ok(cmd)
}

fn run(width: Option<usize>, aligned: bool) -> Result<String> {
    let cmd = sample_command()?;
    let mut formatter = HelpFormatter::new(FormatterOpts {
        width,
        ..FormatterOpts::default()
    })?;
    info!("rendering help at width {}", formatter.width());

    let opts = RenderOpts {
        aligned,
        ..RenderOpts::default()
    };
    let body = render_help(&cmd, &mut formatter, &opts)?;

    let mut out = String::new();
    out.push_str(&format!("Usage: {} [OPTIONS] SOURCE\n", cmd.name()));
    if let Some(about) = cmd.about() {
        out.push_str(&format!("\n{about}\n"));
    }
    out.push('\n');
    out.push_str(&body);
    Ok(out)
}

fn main() {
    setup_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let width = if args.iter().any(|a| a == "--narrow") { Some(30) } else { None };
    let aligned = !args.iter().any(|a| a == "--no-align");

    match run(width, aligned) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
