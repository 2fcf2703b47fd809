use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tidyname_core::RenameConfig;

use super::types::{CapitalizationArg, OutputFormat};

/// Rename batches of files with simple rules, preview first, undo later
#[derive(Parser, Debug)]
#[command(name = "tidyname")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Run as if started in <path> instead of the current working directory
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Assume yes for all prompts
    #[arg(short = 'y', long = "yes", global = true, env = "TIDYNAME_YES")]
    pub yes: bool,

    /// Log debug details to stderr (overridden by TIDYNAME_LOG)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

/// Rename rules shared by preview and apply. Anything not given falls back to
/// the `[rules]` table of the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// Replace underscores with spaces
    #[arg(long, conflicts_with = "keep_underscores")]
    pub replace_underscores: bool,

    /// Keep underscores even if the config replaces them
    #[arg(long)]
    pub keep_underscores: bool,

    /// Remove every occurrence of this text from the name
    #[arg(long, value_name = "KEYWORD")]
    pub remove: Option<String>,

    /// Match the removed keyword case-sensitively
    #[arg(long, conflicts_with = "ignore_case")]
    pub case_sensitive: bool,

    /// Match the removed keyword ignoring case, even if the config says otherwise
    #[arg(long)]
    pub ignore_case: bool,

    /// Capitalization applied to the name (the extension is never changed)
    #[arg(long, value_enum)]
    pub capitalization: Option<CapitalizationArg>,
}

impl RuleArgs {
    /// Layer the command-line rules over the configured defaults
    pub fn resolve(&self, defaults: &RenameConfig) -> RenameConfig {
        let mut config = defaults.clone();
        if self.replace_underscores {
            config.replace_underscores = true;
        }
        if self.keep_underscores {
            config.replace_underscores = false;
        }
        if let Some(keyword) = &self.remove {
            config.remove_keyword.clone_from(keyword);
        }
        if self.case_sensitive {
            config.case_sensitive_keyword = true;
        }
        if self.ignore_case {
            config.case_sensitive_keyword = false;
        }
        if let Some(capitalization) = self.capitalization {
            config.capitalization = capitalization.into();
        }
        config
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show what the selected files would be renamed to
    Preview {
        /// Files to rename
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        rules: RuleArgs,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Rename the selected files
    Apply {
        /// Files to rename
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        rules: RuleArgs,

        /// Apply even when new names collide or come out empty
        #[arg(long)]
        force_with_conflicts: bool,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Skip the preview table
        #[arg(long)]
        quiet: bool,
    },

    /// Undo the most recent rename
    Undo {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Show recorded renames, most recent first
    History {
        /// Limit number of entries shown
        #[arg(long)]
        limit: Option<usize>,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Show version information
    Version {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },
}
