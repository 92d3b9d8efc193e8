use anyhow::Result;
use kmpmap::cli::{init_logging, parse_args, Commands};
use kmpmap::commands::{classify, init, migrate, report};

fn main() -> Result<()> {
    let cli = parse_args();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Migrate {
            source,
            output_dir,
            ast_graphs,
            no_clean,
        } => {
            migrate::handle_migrate(migrate::MigrateConfig {
                config_path: cli.config,
                source,
                output_dir,
                ast_graphs,
                no_clean,
                quiet: cli.quiet,
                verbosity: cli.verbosity,
            })?;
            Ok(())
        }
        Commands::Report { source, output_dir } => {
            report::handle_report(report::ReportConfig {
                config_path: cli.config,
                source,
                output_dir,
                quiet: cli.quiet,
                verbosity: cli.verbosity,
            })?;
            Ok(())
        }
        Commands::Classify {
            source,
            coarse,
            format,
        } => classify::handle_classify(classify::ClassifyConfig {
            config_path: cli.config,
            source,
            coarse,
            format,
            quiet: cli.quiet,
            verbosity: cli.verbosity,
        }),
        Commands::Init { force } => init::init_config(force),
    }
}
