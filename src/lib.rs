use std::{
    fmt::Display,
    fs::{self, File, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

pub use cli::CLIParser;
pub use cropper::{compute_crop_rect, CropError, CropRect};
pub use error::Error;
pub use transformer::{CropTransformer, ResamplingFilter, TransformationOptions};

mod cli;
pub mod codec;
pub mod cropper;
mod error;
mod logger;
pub mod transformer;

pub type Result<T> = std::result::Result<T, error::Error>;

pub const DEFAULT_OUTPUT_SIZE: u32 = 250;
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

pub struct Arguments {
    input_file: PathBuf,
    output_file: PathBuf,
    output_size: u32,
    x: i64,
    y: i64,
    crop_size: Option<u32>,
    quality: u8,
    resampling_filter: ResamplingFilter,
}

/// What a successful run produced.
#[derive(Debug)]
pub struct CropSummary {
    pub output_file: PathBuf,
    pub output_size: u32,
    pub crop_rect: CropRect,
}

impl Display for CropSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Saved {} ({}x{}), crop={}",
            self.output_file.display(),
            self.output_size,
            self.output_size,
            self.crop_rect
        )
    }
}

fn ensure_input_file_exists(file_path: &Path) -> Result<()> {
    if file_path.exists() {
        Ok(())
    } else {
        Err(Error::InputFileNotFound(file_path.display().to_string()))
    }
}

fn create_output_directory(file_path: &Path) -> Result<()> {
    match file_path.parent() {
        Some(directory) if !directory.as_os_str().is_empty() => {
            fs::create_dir_all(directory).map_err(|e| {
                Error::UnableToCreateOutputDirectory(directory.display().to_string(), e)
            })
        }
        _ => Ok(()),
    }
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| Error::UnableToOpenOutputFileForWriting(file_path.display().to_string(), e))
}

fn write_output_file(file_path: &Path, bytes: &[u8]) -> Result<()> {
    write_output_file_with(file_path, bytes, open_output_file)
}

fn write_output_file_with<W, F>(file_path: &Path, bytes: &[u8], open: F) -> Result<()>
where
    W: Write,
    F: FnOnce(&Path) -> Result<W>,
{
    create_output_directory(file_path)?;
    let mut output_file_writer = BufWriter::new(open(file_path)?);
    let written = output_file_writer
        .write_all(bytes)
        .and_then(|_| output_file_writer.flush());
    drop(output_file_writer);
    written.map_err(|e| {
        // a truncated output must not outlive the failed run
        if let Err(remove_error) = fs::remove_file(file_path) {
            log::warn!(
                "Unable to remove incomplete output '{}': {}",
                file_path.display(),
                remove_error
            );
        }
        Error::FailedToWriteOutputFile(file_path.display().to_string(), e)
    })
}

/// Loads the input image, cuts out the square crop window and writes the
/// resized result. Nothing is written unless every earlier step succeeded.
pub fn crop_portrait(arguments: &Arguments) -> Result<CropSummary> {
    ensure_input_file_exists(&arguments.input_file)?;
    // fail on an unusable output extension before decoding
    codec::output_format(&arguments.output_file)?;

    let image = codec::decode_rgb(&arguments.input_file)?;
    log::info!(
        "Loaded {} ({}x{})",
        arguments.input_file.display(),
        image.width(),
        image.height()
    );

    let crop_rect = compute_crop_rect(
        image.width(),
        image.height(),
        arguments.x,
        arguments.y,
        arguments.crop_size,
    )?;
    log::info!("Crop window {}", crop_rect);

    let transformation_options = TransformationOptions::from(arguments);
    let transformer = CropTransformer::new(&transformation_options);
    let output_image = transformer.apply(&image, &crop_rect)?;

    let bytes = codec::encode_rgb(&output_image, &arguments.output_file, arguments.quality)?;
    write_output_file(&arguments.output_file, &bytes)?;
    log::info!(
        "Wrote {} bytes to {}",
        bytes.len(),
        arguments.output_file.display()
    );

    Ok(CropSummary {
        output_file: arguments.output_file.clone(),
        output_size: arguments.output_size,
        crop_rect,
    })
}
