use crate::transformer::{ResamplingFilter, MAX_OUTPUT_SIZE};
use crate::{Arguments, DEFAULT_JPEG_QUALITY, DEFAULT_OUTPUT_SIZE};
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_output_file_argument(command);
        let command = Self::register_output_size_argument(command);
        let command = Self::register_offset_arguments(command);
        let command = Self::register_crop_size_argument(command);
        let command = Self::register_quality_argument(command);
        Self::register_resampling_filter_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_output_size_argument(command: Command) -> Command {
        command.arg(Self::create_output_size_argument())
    }

    fn register_offset_arguments(command: Command) -> Command {
        command
            .arg(Self::create_offset_argument("x", "Left offset for crop"))
            .arg(Self::create_offset_argument("y", "Top offset for crop"))
    }

    fn register_crop_size_argument(command: Command) -> Command {
        command.arg(Self::create_crop_size_argument())
    }

    fn register_quality_argument(command: Command) -> Command {
        command.arg(Self::create_quality_argument())
    }

    fn register_resampling_filter_argument(command: Command) -> Command {
        command.arg(Self::create_resampling_filter_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        arg!(input_file: --input <PATH> "Path to input image")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_file_argument() -> Arg {
        arg!(output_file: --output <PATH> "Path to output image")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_size_argument() -> Arg {
        arg!(output_size: --size <PIXELS> "Square output size in pixels")
            .default_value(DEFAULT_OUTPUT_SIZE.to_string())
            .required(false)
            .value_parser(value_parser!(u32).range(1..=i64::from(MAX_OUTPUT_SIZE)))
    }

    fn create_offset_argument(name: &'static str, help: &'static str) -> Arg {
        Arg::new(name)
            .long(name)
            .value_name("PIXELS")
            .help(help)
            .default_value("0")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(i64))
    }

    fn create_crop_size_argument() -> Arg {
        Arg::new("crop_size")
            .long("crop-size")
            .value_name("PIXELS")
            .help("Square crop size in pixels (defaults to min(width, height))")
            .required(false)
            .value_parser(value_parser!(u32).range(1..))
    }

    fn create_quality_argument() -> Arg {
        arg!(quality: -q --quality <QUALITY> "Encoding quality for JPEG output")
            .default_value(DEFAULT_JPEG_QUALITY.to_string())
            .required(false)
            .value_parser(value_parser!(u8).range(1..=100))
    }

    fn create_resampling_filter_argument() -> Arg {
        arg!(resampling_filter: -f --filter <FILTER> "Resampling filter used for resizing")
            .default_value("lanczos3")
            .required(false)
            .value_parser(value_parser!(ResamplingFilter))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            output_file: Self::extract_output_file_argument(matches),
            output_size: Self::extract_output_size_argument(matches),
            x: Self::extract_offset_argument(matches, "x"),
            y: Self::extract_offset_argument(matches, "y"),
            crop_size: Self::extract_crop_size_argument(matches),
            quality: Self::extract_quality_argument(matches),
            resampling_filter: Self::extract_resampling_filter_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_file")
            .expect("Required argument output_file not provided")
            .clone()
    }

    fn extract_output_size_argument(matches: &ArgMatches) -> u32 {
        matches
            .get_one::<u32>("output_size")
            .expect("Output size must be provided, but was unset.")
            .to_owned()
    }

    fn extract_offset_argument(matches: &ArgMatches, name: &str) -> i64 {
        matches
            .get_one::<i64>(name)
            .expect("Offsets default to zero, but were unset.")
            .to_owned()
    }

    fn extract_crop_size_argument(matches: &ArgMatches) -> Option<u32> {
        matches.get_one::<u32>("crop_size").copied()
    }

    fn extract_quality_argument(matches: &ArgMatches) -> u8 {
        matches
            .get_one::<u8>("quality")
            .expect("Quality must be provided, but was unset.")
            .to_owned()
    }

    fn extract_resampling_filter_argument(matches: &ArgMatches) -> ResamplingFilter {
        matches
            .get_one::<ResamplingFilter>("resampling_filter")
            .expect("Resampling filter must be provided, but was unset.")
            .to_owned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}
