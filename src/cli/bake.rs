//! `bake` command: walk, compress, fingerprint, write the artifact.

use anyhow::{Context, Result, bail};
use clap::CommandFactory;
use std::path::Path;
use std::time::Instant;

use assetbake::config::Config;
use assetbake::logger::human_bytes;
use assetbake::{AssetTable, BakeOptions, Format, bake, debug, emit, log};

use super::{BakeArgs, Cli};

/// Merge command-line overrides into `config.bake`.
pub fn apply_overrides(config: &mut Config, args: &BakeArgs) {
    Config::update_option(&mut config.bake.input, args.input.as_ref());
    Config::update_option(&mut config.bake.output, args.output.as_ref());
    Config::update_option(&mut config.bake.tag, args.tag.as_ref());
    Config::update_option(&mut config.bake.format, args.format.as_ref());
}

/// Run the bake command.
pub fn run(mut config: Config, args: &BakeArgs) -> Result<()> {
    apply_overrides(&mut config, args);
    config.validate()?;

    let (Some(input), Some(output)) = (&config.bake.input, &config.bake.output) else {
        println!("{}", bake_usage());
        bail!("both an input directory and an output path are required (flags or [bake] in config)");
    };
    let format = config.bake.format();
    let tag = config.bake.tag.as_deref();

    let start = Instant::now();
    let table = bake(input, &BakeOptions { progress: true })
        .with_context(|| format!("failed to bake {}", input.display()))?;
    emit::write_artifact(&table, output, format, tag)
        .with_context(|| format!("failed to write {}", output.display()))?;

    report(&table, output, format, start);
    Ok(())
}

/// Help text of the `bake` subcommand alone.
fn bake_usage() -> String {
    let mut cli = Cli::command();
    cli.build();
    cli.find_subcommand_mut("bake")
        .map(|bake| bake.render_help().to_string())
        .unwrap_or_default()
}

fn report(table: &AssetTable, output: &Path, format: Format, start: Instant) {
    log!(
        "bake";
        "{} assets ({} compressed) → {} in {:.2?}",
        table.len(),
        human_bytes(table.payload_bytes()),
        output.display(),
        start.elapsed()
    );
    debug!("bake"; "format {format:?}, fallback token {}", table.fallback_token());
    if table.get("/index.html").is_none() {
        log!("warning"; "no /index.html in the table, unknown paths will resolve to an empty page");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args(input: Option<PathBuf>, output: Option<PathBuf>) -> BakeArgs {
        BakeArgs {
            input,
            output,
            tag: None,
            format: None,
        }
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config = Config::from_str("[bake]\ninput = \"web\"\ntag = \"embed\"").unwrap();
        apply_overrides(&mut config, &args(Some("dist".into()), Some("out.pack".into())));

        assert_eq!(config.bake.input, Some(PathBuf::from("dist")));
        assert_eq!(config.bake.tag.as_deref(), Some("embed"));
        assert_eq!(config.bake.format(), Format::Pack);
    }

    #[test]
    fn test_run_writes_artifact() {
        let dir = TempDir::new().unwrap();
        let web = dir.path().join("web");
        fs::create_dir(&web).unwrap();
        fs::write(web.join("index.html"), "A").unwrap();
        let output = dir.path().join("gen/assets.rs");

        run(Config::default(), &args(Some(web), Some(output.clone()))).unwrap();
        let module = fs::read_to_string(output).unwrap();
        assert!(module.contains("\"/index.html\""));
    }

    #[test]
    fn test_bake_usage_lists_bake_flags() {
        let usage = bake_usage();
        for flag in ["--input", "--output", "--tag", "--format"] {
            assert!(usage.contains(flag), "missing {flag} in:\n{usage}");
        }
        assert!(!usage.contains("--pack"));
    }

    #[test]
    fn test_run_requires_paths() {
        assert!(run(Config::default(), &args(None, None)).is_err());
    }
}
