use std::fmt::Display;

use image::ImageError;

use crate::cropper::{CropError, CropRect};

#[derive(Debug)]
pub enum Error {
    InputFileNotFound(String),
    NoReadPermissionForInputFile(String),
    UnableToOpenInputFileForReading(String, std::io::Error),
    FailedToDecodeInputImage(String, ImageError),
    CropWindowOutOfBounds(CropError),
    CropRectOutsideImage(CropRect, u32, u32),
    EmptyCropWindow,
    EmptyOutputSize,
    OutputTooLarge(u32, u32),
    UnsupportedOutputFormat(String),
    FailedToEncodeOutputImage(String, ImageError),
    UnableToCreateOutputDirectory(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToWriteOutputFile(String, std::io::Error),
}

impl From<CropError> for Error {
    fn from(value: CropError) -> Self {
        Self::CropWindowOutOfBounds(value)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputFileNotFound(path) => {
                write!(f, "Input not found: {}", path)
            }
            Self::NoReadPermissionForInputFile(path) => {
                write!(
                    f,
                    "Unable open file '{}' for reading. Permission denied.",
                    path
                )
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::FailedToDecodeInputImage(path, error) => {
                write!(f, "Failed to decode input image '{}': {}", path, error)
            }
            Self::CropWindowOutOfBounds(error) => write!(f, "{}", error),
            Self::CropRectOutsideImage(rect, width, height) => {
                write!(
                    f,
                    "Crop rectangle {} does not lie inside the {}x{} image",
                    rect, width, height
                )
            }
            Self::EmptyCropWindow => write!(f, "Crop window must not be empty"),
            Self::EmptyOutputSize => write!(f, "Output size must be at least one pixel"),
            Self::OutputTooLarge(size, limit) => {
                write!(
                    f,
                    "Output size {} exceeds the maximum of {} pixels. Reduce --size.",
                    size, limit
                )
            }
            Self::UnsupportedOutputFormat(path) => {
                write!(
                    f,
                    "Unable to determine an image format from output path '{}'",
                    path
                )
            }
            Self::FailedToEncodeOutputImage(path, error) => {
                write!(f, "Failed to encode output image '{}': {}", path, error)
            }
            Self::UnableToCreateOutputDirectory(path, error) => {
                write!(
                    f,
                    "Unable to create output directory '{}': {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToWriteOutputFile(path, error) => {
                write!(f, "Failed to write output file '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for Error {}
