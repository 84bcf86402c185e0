// Import required dependencies
use anyhow::{Context, Result}; // For error handling
use indicatif::{ProgressBar, ProgressStyle}; // For merge progress
use log::info; // For logging
use std::path::Path; // For file path operations

// Import local modules
use crate::{
    cli::{CheckArgs, CombineArgs, Commands, ConcatArgs, GenerateConfigArgs, MergeArgs, ReadArgs}, // CLI arguments
    config::Config,                          // Configuration handling
    display::{Painter, Tint},                // Colored status lines
    policy::ProcessorPolicy,                 // Default or encoding-aware behavior
    processor::{combine_paths, is_text_file, FileProcessor}, // Core operations
};

// Command handler for processing CLI commands
pub struct CommandHandler {
    painter: Painter,         // Status line output
    encoding: Option<String>, // Encoding from the config file, if any
}

impl CommandHandler {
    pub fn new(config: &Config, no_color: bool) -> Self {
        Self {
            painter: Painter::new(config.color && !no_color),
            encoding: config.encoding.clone(),
        }
    }

    // A command-line --encoding wins over the configured one
    fn processor(&self, path: &Path, encoding: Option<&str>) -> Result<FileProcessor> {
        match encoding.or(self.encoding.as_deref()) {
            Some(label) => FileProcessor::with_encoding(path, label)
                .with_context(|| format!("Cannot use encoding '{}'", label)),
            None => Ok(FileProcessor::new(path)),
        }
    }

    // Run the selected subcommand
    pub fn dispatch(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Read(args) => self.handle_read(args),
            Commands::Concat(args) => self.handle_concat(args),
            Commands::Merge(args) => self.handle_merge(args),
            Commands::Combine(args) => self.handle_combine(args),
            Commands::Check(args) => self.handle_check(args),
            Commands::GenerateConfig(args) => Self::handle_generate_config(args),
        }
    }

    // Handle the read command - print every trimmed line
    pub fn handle_read(&self, args: ReadArgs) -> Result<()> {
        let processor = self.processor(&args.file, args.encoding.as_deref())?;
        info!("Reading {} ({} policy)", processor, processor.policy());

        self.painter
            .line(&format!("Reading {}:", args.file.display()), Tint::Yellow)?;
        self.painter.blank()?;

        let reader = processor
            .read_lines()
            .with_context(|| format!("Failed to open {}", args.file.display()))?;
        for line in reader {
            let line = line.with_context(|| format!("Failed to read {}", args.file.display()))?;
            self.painter.line(&line, Tint::Blue)?;
        }

        Ok(())
    }

    // Handle the concat command - join two files
    pub fn handle_concat(&self, args: ConcatArgs) -> Result<()> {
        let processor = self.processor(&args.first, args.encoding.as_deref())?;

        self.painter.line(
            &format!(
                "Reading from: {} and {}",
                args.first.display(),
                args.second.display()
            ),
            Tint::Yellow,
        )?;
        self.painter
            .line(&format!("Writing to: {}", args.output.display()), Tint::Yellow)?;

        processor
            .concat_files(&args.second, &args.output)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;

        let done = match processor.policy() {
            ProcessorPolicy::Default => "File concatenated successfully.",
            ProcessorPolicy::EncodingAware(_) => "Advanced merging completed with separator.",
        };
        self.painter.line(done, Tint::Green)?;
        self.painter.line(processor.success_message(), Tint::Green)?;
        Ok(())
    }

    // Handle the merge command - concatenate every file in order
    pub fn handle_merge(&self, args: MergeArgs) -> Result<()> {
        let processor = self.processor(&args.output, args.encoding.as_deref())?;

        self.painter.line(
            &format!("Merging multiple files into: {}", args.output.display()),
            Tint::Yellow,
        )?;

        let progress = ProgressBar::new(args.files.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
                .progress_chars("=> "),
        );

        let result = processor.concat_multiple_files_observed(&args.output, &args.files, |_, path| {
            progress.set_message(path.display().to_string());
            progress.inc(1);
        });
        progress.finish_and_clear();
        result.with_context(|| format!("Failed to merge into {}", args.output.display()))?;

        self.painter
            .line("Multiple files merged successfully.", Tint::Green)?;
        Ok(())
    }

    // Handle the combine command - no file is read or written
    pub fn handle_combine(&self, args: CombineArgs) -> Result<()> {
        let combined = combine_paths(&args.first, &args.second);
        self.painter
            .line(&combined.display().to_string(), Tint::Cyan)?;
        Ok(())
    }

    // Handle the check command - classify each name
    pub fn handle_check(&self, args: CheckArgs) -> Result<()> {
        for name in &args.names {
            let (verdict, tint) = if is_text_file(name) {
                ("text file", Tint::Green)
            } else {
                ("not a text file", Tint::Red)
            };
            self.painter.line(&format!("{}: {}", name, verdict), tint)?;
        }
        Ok(())
    }

    // Handle configuration file generation
    pub fn handle_generate_config(args: GenerateConfigArgs) -> Result<()> {
        info!("Generating configuration file");

        Config::template()
            .save(&args.output)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;

        info!("Configuration file generated at: {:?}", args.output);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn quiet_handler(encoding: Option<&str>) -> CommandHandler {
        let config = Config {
            encoding: encoding.map(str::to_string),
            ..Config::default()
        };
        CommandHandler::new(&config, true)
    }

    #[test]
    fn test_concat_command() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a.txt"), "A\n")?;
        fs::write(dir.path().join("b.txt"), "B\n")?;

        quiet_handler(None).handle_concat(ConcatArgs {
            first: dir.path().join("a.txt"),
            second: dir.path().join("b.txt"),
            output: dir.path().join("out.txt"),
            encoding: None,
        })?;
        assert_eq!(fs::read_to_string(dir.path().join("out.txt"))?, "A\nB");
        Ok(())
    }

    #[test]
    fn test_configured_encoding_selects_marker_join() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a.txt"), "A\n")?;
        fs::write(dir.path().join("b.txt"), "B\n")?;

        quiet_handler(Some("utf-8")).handle_concat(ConcatArgs {
            first: dir.path().join("a.txt"),
            second: dir.path().join("b.txt"),
            output: dir.path().join("out.txt"),
            encoding: None,
        })?;
        assert_eq!(
            fs::read_to_string(dir.path().join("out.txt"))?,
            "A\n\n---MERGED---\nB\n"
        );
        Ok(())
    }

    #[test]
    fn test_merge_command_reports_missing_file() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("x.txt"), "X")?;

        let err = quiet_handler(None)
            .handle_merge(MergeArgs {
                output: dir.path().join("out.txt"),
                files: vec![dir.path().join("x.txt"), dir.path().join("gone.txt")],
                encoding: None,
            })
            .unwrap_err();
        assert!(format!("{:#}", err).contains("File not found"));
        assert_eq!(fs::read_to_string(dir.path().join("out.txt"))?, "X\n");
        Ok(())
    }

    #[test]
    fn test_dispatch_returns_failure_with_context() -> Result<()> {
        let dir = tempdir()?;
        let missing = dir.path().join("missing.txt");

        let err = quiet_handler(None)
            .dispatch(Commands::Read(ReadArgs {
                file: missing.clone(),
                encoding: None,
            }))
            .unwrap_err();
        let report = format!("{:#}", err);
        assert!(report.starts_with("Failed to open"));
        assert!(report.contains("File not found"));
        Ok(())
    }

    #[test]
    fn test_dispatch_runs_combine() -> Result<()> {
        quiet_handler(None).dispatch(Commands::Combine(CombineArgs {
            first: "a.txt".into(),
            second: "b.txt".into(),
        }))
    }

    #[test]
    fn test_bad_encoding_label() {
        let handler = quiet_handler(None);
        let err = handler
            .processor(Path::new("a.txt"), Some("bogus"))
            .unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_generate_config() -> Result<()> {
        let dir = tempdir()?;
        let output = dir.path().join("txtmerge.json");

        CommandHandler::handle_generate_config(GenerateConfigArgs {
            output: output.clone(),
        })?;
        assert_eq!(Config::load(&output)?, Config::template());
        Ok(())
    }
}
