use std::io::{self, Cursor};
use std::path::Path;

use image::{codecs::jpeg::JpegEncoder, ImageFormat, ImageReader, RgbImage};

use crate::error::Error;
use crate::Result;

fn path_string(path: &Path) -> String {
    path.display().to_string()
}

fn map_open_error(path: &Path, error: io::Error) -> Error {
    match error.kind() {
        io::ErrorKind::NotFound => Error::InputFileNotFound(path_string(path)),
        io::ErrorKind::PermissionDenied => Error::NoReadPermissionForInputFile(path_string(path)),
        _ => Error::UnableToOpenInputFileForReading(path_string(path), error),
    }
}

/// Decodes the image at `path` into 8-bit RGB. Alpha is discarded, not blended.
pub fn decode_rgb(path: &Path) -> Result<RgbImage> {
    let reader = ImageReader::open(path)
        .map_err(|e| map_open_error(path, e))?
        .with_guessed_format()
        .map_err(|e| map_open_error(path, e))?;
    log::debug!("Detected input format {:?}", reader.format());
    let image = reader
        .decode()
        .map_err(|e| Error::FailedToDecodeInputImage(path_string(path), e))?;
    log::debug!("Decoded color type {:?}", image.color());
    Ok(image.to_rgb8())
}

/// Picks the output codec from the file extension of `path`.
pub fn output_format(path: &Path) -> Result<ImageFormat> {
    ImageFormat::from_path(path).map_err(|_| Error::UnsupportedOutputFormat(path_string(path)))
}

/// Encodes `image` into memory in the format implied by `path`.
/// `quality` only applies to JPEG output.
pub fn encode_rgb(image: &RgbImage, path: &Path, quality: u8) -> Result<Vec<u8>> {
    let format = output_format(path)?;
    log::debug!("Encoding output as {:?}", format);
    let mut bytes = Vec::new();
    let result = match format {
        ImageFormat::Jpeg => {
            image.write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, quality))
        }
        _ => image.write_to(&mut Cursor::new(&mut bytes), format),
    };
    result.map_err(|e| Error::FailedToEncodeOutputImage(path_string(path), e))?;
    Ok(bytes)
}
