use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::OptionOverrides;

#[derive(Parser)]
#[command(name = "diorama")]
#[command(author, version, about)]
#[command(long_about = "A slide deck presenter with a separate presenter-notes window.\n\n\
    Decks are YAML files listing text, image, quote and video slides.\n\n\
    Examples:\n  \
    diorama talk.yaml                      Present fullscreen\n  \
    diorama talk.yaml --windowed           Present in a window\n  \
    diorama talk.yaml --url http://localhost/3   Start on slide 3\n  \
    diorama talk.yaml --presenter-notes    Open the notes window on start")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Deck file to present
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Starting location, e.g. http://localhost:3000/2 starts on slide 2
    #[arg(long, global = false)]
    pub url: Option<String>,

    /// Show previous/next buttons
    #[arg(long, global = false)]
    pub navigation: bool,

    /// Disable swipe navigation
    #[arg(long, global = false)]
    pub no_swipe: bool,

    /// Open the presenter notes window on start
    #[arg(long, global = false)]
    pub presenter_notes: bool,

    /// Extra deck classes; `dark` or `light` picks the theme
    #[arg(long = "class", value_name = "NAME", global = false)]
    pub class_name: Option<String>,

    /// Footer text shown on every slide
    #[arg(long, global = false)]
    pub footer: Option<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.navigation, defaults.footer)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    /// Deck options given on the command line. Flags that were not passed
    /// leave the lower layers alone.
    pub fn option_overrides(&self) -> OptionOverrides {
        OptionOverrides {
            class_name: self.class_name.clone(),
            footer: self.footer.clone(),
            navigation: self.navigation.then_some(true),
            swipe_to_change: self.no_swipe.then_some(false),
            presenter_notes: self.presenter_notes.then_some(true),
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::commands::version::run();
                Ok(())
            }
            None => {
                let overrides = self.option_overrides();
                if let Some(file) = self.file {
                    if !file.exists() {
                        anyhow::bail!("File not found: {}", file.display());
                    }
                    crate::app::run(file, self.windowed, self.url, overrides)
                } else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_become_overrides() {
        let cli = Cli::parse_from([
            "diorama",
            "talk.yaml",
            "--no-swipe",
            "--presenter-notes",
            "--class",
            "dark",
            "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.file, Some(PathBuf::from("talk.yaml")));

        let overrides = cli.option_overrides();
        assert_eq!(overrides.swipe_to_change, Some(false));
        assert_eq!(overrides.presenter_notes, Some(true));
        assert_eq!(overrides.navigation, None);
        assert_eq!(overrides.class_name.as_deref(), Some("dark"));
        assert_eq!(overrides.footer, None);
    }

    #[test]
    fn test_subcommand() {
        let cli = Cli::parse_from(["diorama", "config", "set", "defaults.theme", "dark"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: ConfigCommands::Set { .. }
            })
        ));
    }
}
