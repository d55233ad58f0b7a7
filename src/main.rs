mod options;

use anyhow::Context;
use clap::Parser;
use selfpath::inspect;
use selfpath::platform;
use selfpath::selftest;
use selfpath::{Access, Config, LazyConfig};
use std::path::Path;
use std::process;
use term_table::row;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use options::Command;

/// The record every command runs against; filled from the command line once
static PROCESS: LazyConfig = LazyConfig::process();

fn render_images(images : &[String]) {
    let mut table = term_table::Table::new();
    table.add_row(row::Row::new(vec!["Index", "Name", "Path"]));
    for (idx, image) in images.iter().enumerate() {
        let name = if image.is_empty() { "<unnamed>" } else { platform::base_name(image) };
        table.add_row(row::Row::new(vec![idx.to_string(), name.to_string(), image.clone()]));
    }
    println!("{}", table.render());
}

fn render_summary(summary : &inspect::ImageSummary) {
    println!("File {} is a {} bit {} endian {:?} image for {:?}",
             summary.filename.display(),
             summary.bit_size,
             inspect::endian_as_str(summary.endianness),
             summary.format,
             summary.architecture);
}

fn render_checks(checks : &[selftest::Check]) -> bool {
    let mut table = term_table::Table::new();
    table.add_row(row::Row::new(vec!["Check", "Result", "Detail"]));
    for check in checks {
        let verdict = if check.passed { "ok" } else { "FAILED" };
        table.add_row(row::Row::new(vec![check.name.clone(), verdict.to_string(), check.detail.clone()]));
    }
    println!("{}", table.render());
    checks.iter().all(|c| c.passed)
}

fn run(config : &Config, command : Command) -> anyhow::Result<()> {
    match command {
        Command::Locate { name } => {
            debug!(?name, "locating image");
            let path = config.locate_image(name.as_deref())
                .with_context(|| format!("Could not locate {}", name.as_deref().unwrap_or("the executable")))?;
            println!("{}", path);
        },
        Command::Images => {
            let images = config.loaded_images().context("Could not list loaded images")?;
            render_images(&images);
        },
        Command::Describe { name } => {
            let path = config.locate_image(name.as_deref())
                .with_context(|| format!("Could not locate {}", name.as_deref().unwrap_or("the executable")))?;
            let summary = inspect::summarize_image(Path::new(&path))
                .with_context(|| format!("Could not read {}", path))?;
            render_summary(&summary);
        },
        Command::Expand { template, reference } => {
            let reference = match reference {
                Some(r) => r,
                None => config.locate_image(None).context("Could not locate the executable")?
            };
            debug!(%template, %reference, "expanding template");
            println!("{}", config.expand(&template, &reference)?);
        },
        Command::Which { name, path, any } => {
            let path_list = match path {
                Some(p) => p,
                None => config.default_path_list()?
            };
            let access = if any { Access::Exists } else { Access::Execute };
            debug!(%name, %path_list, ?access, "searching path list");
            let resolved = config.find_in_path(&path_list, &name, access)?;
            println!("{}", resolved);
            if resolved == name {
                // The unchanged name is a usable fallback, not a hit
                warn!("{} was not found on the search path", name);
                process::exit(1);
            }
        },
        Command::Env { name } => {
            println!("{}", config.read_env(&name)?);
        },
        Command::Dup { text, max } => {
            println!("{}", selfpath::dup_bounded(&text, max)?);
        },
        Command::Selftest => {
            if !render_checks(&selftest::run(config)) {
                anyhow::bail!("Self-test failed");
            }
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env("SELFPATH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = options::Options::parse();
    let config = PROCESS.get_or_init_with(|| {
        Config::process()
            .with_enabled(!args.disabled)
            .with_wide_encoding(args.wide_encoding.unwrap_or_default())
    });
    debug!(?config, "configuration ready");

    run(config, args.command)
}
