//! Command-line definition for randrctl.
//!
//! Repeated flags are last-write-wins, and malformed values are rejected at
//! parse time so the library only ever sees a well-formed [`Options`].

use clap::Parser;
use randr_client::Options;
use randr_model::{Reflection, Rotation, SizeSpec};

/// Query and change the X screen configuration via the RandR extension.
#[derive(Parser, Debug, Clone)]
#[command(name = "randrctl")]
#[command(about = "Query and change the X screen configuration via RandR")]
#[command(disable_version_flag = true, args_override_self = true)]
pub struct Args {
    /// X display to connect to (defaults to the environment's display)
    #[arg(short = 'd', long, value_name = "DISPLAY")]
    pub display: Option<String>,

    /// Screen index (defaults to the connection's default screen)
    #[arg(long, value_name = "SCREEN")]
    pub screen: Option<usize>,

    /// Verbose output (implies a query)
    #[arg(long)]
    pub verbose: bool,

    /// Print the current screen resources
    #[arg(short = 'q', long)]
    pub query: bool,

    /// Orientation: normal, left, inverted, right, or 0-3
    #[arg(short = 'o', long = "orientation", value_name = "ORIENTATION")]
    pub orientation: Option<Rotation>,

    /// Reflect in x
    #[arg(short = 'x')]
    pub reflect_x: bool,

    /// Reflect in y
    #[arg(short = 'y')]
    pub reflect_y: bool,

    /// Target size: an index into the size table, or <width>x<height>
    #[arg(short = 's', long, value_name = "SIZE")]
    pub size: Option<SizeSpec>,

    /// Target refresh rate in Hz
    #[arg(short = 'r', long, value_name = "RATE")]
    pub rate: Option<u16>,

    /// Print the RandR protocol version reported by the server
    #[arg(short = 'v', long = "version")]
    pub version: bool,
}

impl From<Args> for Options {
    fn from(args: Args) -> Self {
        let mut reflection = Reflection::empty();
        if args.reflect_x {
            reflection |= Reflection::X;
        }
        if args.reflect_y {
            reflection |= Reflection::Y;
        }
        Options {
            display: args.display,
            screen: args.screen,
            verbose: args.verbose,
            query: args.query,
            rotation: args.orientation,
            reflection,
            size: args.size,
            rate: args.rate,
            show_version: args.version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("randrctl").chain(argv.iter().copied()))
    }

    #[test]
    fn test_zero_args_is_a_query() {
        let options = Options::from(parse(&[]).unwrap());
        assert!(!options.is_set());
        assert!(options.wants_query());
    }

    #[test]
    fn test_orientation_name_and_index_agree() {
        let by_name = parse(&["-o", "left"]).unwrap();
        let by_index = parse(&["-o", "1"]).unwrap();
        assert_eq!(by_name.orientation, Some(Rotation::Left));
        assert_eq!(by_name.orientation, by_index.orientation);
    }

    #[test]
    fn test_orientation_rejects_unknown_token() {
        assert!(parse(&["-o", "sideways"]).is_err());
        assert!(parse(&["-o", "4"]).is_err());
    }

    #[test]
    fn test_repeated_flags_last_write_wins() {
        let args = parse(&["-o", "left", "-o", "right"]).unwrap();
        assert_eq!(args.orientation, Some(Rotation::Right));

        let args = parse(&["-s", "2", "-s", "800x600"]).unwrap();
        assert_eq!(
            args.size,
            Some(SizeSpec::Pixels {
                width: 800,
                height: 600
            })
        );
    }

    #[test]
    fn test_size_modes_are_exclusive() {
        let args = parse(&["-s", "800x600"]).unwrap();
        assert_eq!(
            args.size,
            Some(SizeSpec::Pixels {
                width: 800,
                height: 600
            })
        );

        let args = parse(&["-s", "2"]).unwrap();
        assert_eq!(args.size, Some(SizeSpec::Index(2)));
    }

    #[test]
    fn test_missing_value_is_an_error() {
        assert!(parse(&["-s"]).is_err());
        assert!(parse(&["-r"]).is_err());
        assert!(parse(&["-d"]).is_err());
        assert!(parse(&["--screen"]).is_err());
    }

    #[test]
    fn test_malformed_values_are_errors() {
        assert!(parse(&["-r", "fast"]).is_err());
        assert!(parse(&["-r", "-1"]).is_err());
        assert!(parse(&["--screen", "-1"]).is_err());
        assert!(parse(&["-s", "800x"]).is_err());
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        assert!(parse(&["--bogus"]).is_err());
    }

    #[test]
    fn test_reflection_flags_are_independent_bits() {
        let options = Options::from(parse(&["-x"]).unwrap());
        assert_eq!(options.reflection, Reflection::X);

        let options = Options::from(parse(&["-x", "-y"]).unwrap());
        assert_eq!(options.reflection, Reflection::X | Reflection::Y);
        assert!(options.is_set());
    }

    #[test]
    fn test_mutating_flags_mark_a_set_run() {
        for argv in [&["-s", "1"][..], &["-r", "75"], &["-o", "inverted"]] {
            let options = Options::from(parse(argv).unwrap());
            assert!(options.is_set(), "{argv:?} should request a set");
            assert!(!options.wants_query());
        }
    }

    #[test]
    fn test_query_and_display_selection() {
        let args = parse(&["-d", ":1", "--screen", "0", "-q"]).unwrap();
        assert_eq!(args.display.as_deref(), Some(":1"));
        assert_eq!(args.screen, Some(0));
        assert!(args.query);
    }

    #[test]
    fn test_version_flag_is_not_a_mutator() {
        let options = Options::from(parse(&["-v"]).unwrap());
        assert!(options.show_version);
        assert!(!options.is_set());
        assert!(options.wants_query());
    }
}
