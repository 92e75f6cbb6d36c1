/*
 * Launch Configuration Module
 *
 * Command line flags picked up once at startup:
 *   --variant <name>   preset to run (classic, rain, pile, snow, sprite)
 *   --count <n>        particle count override
 *   --seed <u64>       seed for a reproducible run
 *   --sprite <path>    image used as the point sprite
 */

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::params::SimulationParams;
use crate::variant::{Variant, VariantSettings};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchConfig {
    pub variant: Variant,
    pub num_particles: Option<usize>,
    pub seed: Option<u64>,
    pub sprite: Option<PathBuf>,
}

fn parse_value<T: FromStr>(flag: &str, value: Option<String>) -> Result<T, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingValue(flag.to_string()))?;
    value.parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value,
    })
}

impl LaunchConfig {
    /// Parse flags, not including the program name.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = LaunchConfig::default();
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            match flag.as_str() {
                "--variant" => {
                    let value = args.next().ok_or_else(|| ConfigError::MissingValue(flag.clone()))?;
                    config.variant = value.parse()?;
                }
                "--count" => config.num_particles = Some(parse_value(&flag, args.next())?),
                "--seed" => config.seed = Some(parse_value(&flag, args.next())?),
                "--sprite" => config.sprite = Some(parse_value(&flag, args.next())?),
                _ => return Err(ConfigError::UnknownFlag(flag)),
            }
        }

        Ok(config)
    }

    /// The variant's settings with the command line overrides applied.
    pub fn settings(&self) -> VariantSettings {
        let mut settings = self.variant.settings();

        if let Some(count) = self.num_particles {
            let range = SimulationParams::get_num_particles_range();
            settings.num_particles = count.clamp(*range.start(), *range.end());
        }
        if self.sprite.is_some() {
            settings.wants_sprite = true;
        }

        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_flags_gives_classic() {
        let config = LaunchConfig::from_args(Vec::new()).unwrap();
        assert_eq!(config, LaunchConfig::default());
        assert_eq!(config.variant, Variant::Classic);
    }

    #[test]
    fn parses_every_flag() {
        let config = LaunchConfig::from_args(args(&[
            "--variant", "snow", "--count", "250", "--seed", "42", "--sprite", "disc.png",
        ]))
        .unwrap();

        assert_eq!(config.variant, Variant::Snow);
        assert_eq!(config.num_particles, Some(250));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.sprite, Some(PathBuf::from("disc.png")));
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!(
            LaunchConfig::from_args(args(&["--count", "lots"])),
            Err(ConfigError::InvalidValue {
                flag: "--count".to_string(),
                value: "lots".to_string()
            })
        );
        assert_eq!(
            LaunchConfig::from_args(args(&["--seed"])),
            Err(ConfigError::MissingValue("--seed".to_string()))
        );
        assert_eq!(
            LaunchConfig::from_args(args(&["--fast"])),
            Err(ConfigError::UnknownFlag("--fast".to_string()))
        );
        assert!(matches!(
            LaunchConfig::from_args(args(&["--variant", "hail"])),
            Err(ConfigError::UnknownVariant(_))
        ));
    }

    #[test]
    fn count_override_is_clamped() {
        let config = LaunchConfig::from_args(args(&["--count", "0"])).unwrap();
        assert_eq!(config.settings().num_particles, 1);

        let config = LaunchConfig::from_args(args(&["--count", "5000000"])).unwrap();
        assert_eq!(config.settings().num_particles, 100_000);
    }

    #[test]
    fn sprite_path_turns_on_sprite_rendering() {
        let config = LaunchConfig::from_args(args(&["--sprite", "disc.png"])).unwrap();
        assert!(config.settings().wants_sprite);
    }
}
