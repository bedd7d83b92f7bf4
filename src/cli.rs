use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::controller::Guid;

/// Dance collaboratively the cat to catch the mouse.
#[derive(Parser, Debug)]
#[command(name = "dance-cat-to-mouse", version)]
pub struct Cli {
    /// List joystick GUIDs and exit
    #[arg(long, alias = "list_joysticks")]
    pub list_joysticks: bool,

    /// Joystick to use for the game, by GUID (see --list-joysticks)
    #[arg(long, value_name = "GUID")]
    pub joystick: Option<Guid>,

    /// Configuration file to use instead of the default one
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Let the arrow keys stand in for the dance mat
    #[arg(long)]
    pub allow_arrow_keys: bool,

    /// Run in a window instead of fullscreen
    #[arg(long)]
    pub windowed: bool,

    /// Seed for the wandering of mice and dogs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Let the command line override the configuration file.
    pub fn apply(&self, config: &mut Config) {
        if let Some(joystick) = &self.joystick {
            config.joystick = Some(joystick.to_string());
        }
        if self.allow_arrow_keys {
            config.allow_arrow_keys = true;
        }
        if self.windowed {
            config.fullscreen = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUID: &str = "030000007900000011000000100100ab";

    #[test]
    fn no_flags_uses_the_first_joystick() {
        let cli = Cli::try_parse_from(["dance-cat-to-mouse"]).unwrap();
        assert!(!cli.list_joysticks);
        assert_eq!(cli.joystick, None);
    }

    #[test]
    fn accepts_both_spellings_of_list_joysticks() {
        for flag in ["--list-joysticks", "--list_joysticks"] {
            let cli = Cli::try_parse_from(["dance-cat-to-mouse", flag]).unwrap();
            assert!(cli.list_joysticks, "{flag}");
        }
    }

    #[test]
    fn parses_the_joystick_guid() {
        let cli = Cli::try_parse_from(["dance-cat-to-mouse", "--joystick", GUID]).unwrap();
        assert_eq!(cli.joystick, Some(GUID.parse().unwrap()));
    }

    #[test]
    fn rejects_malformed_guids() {
        assert!(Cli::try_parse_from(["dance-cat-to-mouse", "--joystick", "nope"]).is_err());
    }

    #[test]
    fn flags_override_the_config() {
        let cli = Cli::try_parse_from([
            "dance-cat-to-mouse",
            "--joystick",
            GUID,
            "--allow-arrow-keys",
            "--windowed",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.joystick.as_deref(), Some(GUID));
        assert!(config.allow_arrow_keys);
        assert!(!config.fullscreen);
    }
}
