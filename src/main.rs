//! lvconf CLI - copy lv_conf.h into the PlatformIO LVGL source tree

use clap::Parser;
use lvconf::config::{CliArgs, CopierConfig, OutputFormat};
use lvconf::core::{error_json_line, resolve_project_root, ConfigCopier};
use lvconf::error::{LvConfError, Result};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = CliArgs::parse();

    // Initialize logging; RUST_LOG overrides -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&args) {
        report_error(&e, args.format);
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<()> {
    let root = resolve_project_root(args.project_dir.as_deref())?;
    let copier = ConfigCopier::new(CopierConfig::from_cli(args))?;

    // JSON mode keeps stdout to the single report object
    if args.verbose > 1 && args.format == OutputFormat::Text {
        print_config(&root, copier.config());
    }

    let report = copier.copy_config(&root)?;

    match args.format {
        OutputFormat::Json => println!("{}", report.to_json_line()),
        OutputFormat::Text if !args.quiet => {
            println!("{}", report.status_line());
            if args.verbose > 0 {
                report.print_summary();
            }
        }
        OutputFormat::Text => {}
    }

    Ok(())
}

fn report_error(err: &LvConfError, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!("{}", error_json_line(err)),
        OutputFormat::Text => eprintln!("{}", err.status_line()),
    }
}

fn print_config(root: &std::path::Path, config: &CopierConfig) {
    println!("=== Configuration ===");
    println!("Project:     {}", root.display());
    println!("Source:      {}", config.layout.source_path(root).display());
    println!("Pattern:     {}", config.layout.display_pattern());
    println!("Selection:   {:?}", config.selection);
    println!("Dry run:     {}", config.dry_run);
    println!("Verify:      {}", config.verify);
    println!();
}
