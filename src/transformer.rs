use clap::{builder::PossibleValue, ValueEnum};
use image::{imageops, imageops::FilterType, GenericImageView, RgbImage};

use crate::cropper::CropRect;
use crate::error::Error;
use crate::{Arguments, Result};

/// Largest accepted output edge. Resampling allocates intermediate buffers
/// proportional to the output size, so larger requests are refused up front.
pub const MAX_OUTPUT_SIZE: u32 = 16384;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ResamplingFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl ValueEnum for ResamplingFilter {
    fn value_variants<'a>() -> &'a [Self] {
        &[
            Self::Nearest,
            Self::Triangle,
            Self::CatmullRom,
            Self::Gaussian,
            Self::Lanczos3,
        ]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Nearest => Some(PossibleValue::new("nearest")),
            Self::Triangle => Some(PossibleValue::new("triangle")),
            Self::CatmullRom => Some(PossibleValue::new("catmull-rom")),
            Self::Gaussian => Some(PossibleValue::new("gaussian")),
            Self::Lanczos3 => Some(PossibleValue::new("lanczos3")),
        }
    }
}

impl From<ResamplingFilter> for FilterType {
    fn from(value: ResamplingFilter) -> Self {
        match value {
            ResamplingFilter::Nearest => FilterType::Nearest,
            ResamplingFilter::Triangle => FilterType::Triangle,
            ResamplingFilter::CatmullRom => FilterType::CatmullRom,
            ResamplingFilter::Gaussian => FilterType::Gaussian,
            ResamplingFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

pub struct TransformationOptions {
    pub output_size: u32,
    pub resampling_filter: ResamplingFilter,
}

impl TransformationOptions {
    pub fn new(output_size: u32, resampling_filter: ResamplingFilter) -> Self {
        Self {
            output_size,
            resampling_filter,
        }
    }
}

impl From<&Arguments> for TransformationOptions {
    fn from(value: &Arguments) -> Self {
        Self {
            output_size: value.output_size,
            resampling_filter: value.resampling_filter,
        }
    }
}

pub struct CropTransformer<'a> {
    options: &'a TransformationOptions,
}

impl<'a> CropTransformer<'a> {
    pub fn new(options: &'a TransformationOptions) -> Self {
        CropTransformer { options }
    }

    /// Cuts `rect` out of `image` and scales it to an `output_size` square.
    /// The source buffer is left untouched.
    pub fn apply(&self, image: &RgbImage, rect: &CropRect) -> Result<RgbImage> {
        let (width, height) = image.dimensions();
        if !rect.fits_within(width, height) {
            return Err(Error::CropRectOutsideImage(*rect, width, height));
        }
        if rect.is_empty() {
            return Err(Error::EmptyCropWindow);
        }
        if self.options.output_size == 0 {
            return Err(Error::EmptyOutputSize);
        }
        if self.options.output_size > MAX_OUTPUT_SIZE {
            return Err(Error::OutputTooLarge(self.options.output_size, MAX_OUTPUT_SIZE));
        }

        let cropped = image
            .view(rect.left, rect.top, rect.width(), rect.height())
            .to_image();
        log::debug!(
            "Resizing {}x{} crop to {}x{} using {:?}",
            cropped.width(),
            cropped.height(),
            self.options.output_size,
            self.options.output_size,
            self.options.resampling_filter
        );
        Ok(imageops::resize(
            &cropped,
            self.options.output_size,
            self.options.output_size,
            self.options.resampling_filter.into(),
        ))
    }
}
