// CLI binary entry point for tonearm

use clap::Parser;
use std::process;

use tonearm::cli::{commands, Commands, Config, OutputFormatter};

fn main() {
    let config = Config::parse();
    let formatter = OutputFormatter::new(config.format, config.quiet);

    let result = match &config.command {
        Commands::Read { files, output } => {
            commands::command_read(files, output.as_deref(), &formatter)
        }
        Commands::Import {
            library,
            files,
            directory,
            pattern,
            probe_timeout,
        } => commands::command_import(
            library,
            files,
            directory.as_deref(),
            pattern,
            *probe_timeout,
            &formatter,
        ),
        Commands::Detect { files } => commands::command_detect(files, &formatter),
        Commands::ExportCover { file, output } => {
            commands::command_export_cover(file, output, &formatter)
        }
    };

    if let Err(e) = result {
        formatter.print_error(&format!("{:#}", e));
        process::exit(1);
    }
}
