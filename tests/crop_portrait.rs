use image::{ColorType, GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};
use portrait_crop::{crop_portrait, CLIParser, CropRect, Error};
use std::fs;
use std::path::{Path, PathBuf};

fn get_scratch_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_TARGET_TMPDIR"));
    path.push("crop_portrait");
    path.push(name);
    path
}

fn cleanup(path: &Path) {
    if path.exists() {
        if path.is_dir() {
            fs::remove_dir_all(path).expect("Deletion of output directory failed");
        } else {
            fs::remove_file(path).expect("Deletion of output file failed");
        }
    }
}

fn write_input_image(name: &str, width: u32, height: u32) -> PathBuf {
    let path = get_scratch_path(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
    .save(&path)
    .expect("Writing input image failed");
    path
}

fn run(arguments: &[&str]) -> portrait_crop::Result<portrait_crop::CropSummary> {
    let mut cli_parser = CLIParser::new();
    let mut full_arguments = vec!["test"];
    full_arguments.extend_from_slice(arguments);
    let arguments = cli_parser.parse(full_arguments);
    crop_portrait(&arguments)
}

#[test]
fn test_crop_portrait_with_vertical_offset() {
    let input_path = write_input_image("portrait_500x800.png", 500, 800);
    let output_path = get_scratch_path("portrait_500x800_cropped.jpg");
    cleanup(&output_path);

    let summary = run(&[
        "--input",
        input_path.to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
        "--size",
        "250",
        "--x",
        "0",
        "--y",
        "100",
    ])
    .expect("Cropping failed");

    assert_eq!(
        summary.crop_rect,
        CropRect {
            left: 0,
            top: 100,
            right: 500,
            bottom: 600
        }
    );
    assert!(summary.to_string().contains("(0, 100, 500, 600)"));
    assert!(summary.to_string().contains("(250x250)"));
    assert!(output_path.exists(), "Output file was not created");
    let output = image::open(&output_path).expect("Output is not a readable image");
    assert_eq!(output.dimensions(), (250, 250));
}

#[test]
fn test_crop_larger_than_image_writes_nothing() {
    let input_path = write_input_image("square_200x200.png", 200, 200);
    let output_path = get_scratch_path("square_200x200_cropped.jpg");
    cleanup(&output_path);

    let result = run(&[
        "--input",
        input_path.to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
        "--crop-size",
        "250",
    ]);

    match result {
        Err(Error::CropWindowOutOfBounds(error)) => {
            assert!(error.to_string().contains("exceeds image bounds"))
        }
        other => panic!("Expected out of bounds error, got {:?}", other),
    }
    assert!(!output_path.exists(), "Output file must not be created");
}

#[test]
fn test_missing_input_is_reported() {
    let input_path = get_scratch_path("does_not_exist.png");
    let output_path = get_scratch_path("does_not_exist_cropped.png");
    cleanup(&output_path);

    let result = run(&[
        "--input",
        input_path.to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
    ]);

    assert!(matches!(result, Err(Error::InputFileNotFound(_))));
    assert!(!output_path.exists(), "Output file must not be created");
}

#[test]
fn test_output_directories_are_created() {
    let input_path = write_input_image("landscape_120x90.png", 120, 90);
    let output_directory = get_scratch_path("nested");
    cleanup(&output_directory);
    let output_path = output_directory.join("deeper").join("thumb.png");

    let summary = run(&[
        "--input",
        input_path.to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
        "--size",
        "32",
        "--x=-40",
        "--y",
        "-5",
        "--filter",
        "triangle",
    ])
    .expect("Cropping failed");

    assert_eq!(
        summary.crop_rect,
        CropRect {
            left: 0,
            top: 0,
            right: 90,
            bottom: 90
        }
    );
    let output = image::open(&output_path).expect("Output is not a readable image");
    assert_eq!(output.dimensions(), (32, 32));
}

#[test]
fn test_alpha_channel_is_dropped() {
    let input_path = get_scratch_path("transparent_64x64.png");
    fs::create_dir_all(input_path.parent().unwrap()).unwrap();
    RgbaImage::from_pixel(64, 64, Rgba([10, 200, 30, 0]))
        .save(&input_path)
        .unwrap();
    let output_path = get_scratch_path("transparent_64x64_cropped.png");
    cleanup(&output_path);

    run(&[
        "--input",
        input_path.to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
        "--size",
        "16",
        "--filter",
        "nearest",
    ])
    .expect("Cropping failed");

    let output = image::open(&output_path).unwrap();
    assert_eq!(output.color(), ColorType::Rgb8);
    assert!(output
        .to_rgb8()
        .pixels()
        .all(|pixel| *pixel == Rgb([10, 200, 30])));
}

#[test]
fn test_unsupported_output_extension_writes_nothing() {
    let input_path = write_input_image("small_40x40.png", 40, 40);
    let output_path = get_scratch_path("small_40x40_cropped.notanimage");
    cleanup(&output_path);

    let result = run(&[
        "--input",
        input_path.to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
    ]);

    assert!(matches!(result, Err(Error::UnsupportedOutputFormat(_))));
    assert!(!output_path.exists());
}

#[test]
fn test_undecodable_input_is_reported() {
    let input_path = get_scratch_path("garbage.png");
    fs::create_dir_all(input_path.parent().unwrap()).unwrap();
    fs::write(&input_path, b"this is not an image").unwrap();
    let output_path = get_scratch_path("garbage_cropped.png");
    cleanup(&output_path);

    let result = run(&[
        "--input",
        input_path.to_str().unwrap(),
        "--output",
        output_path.to_str().unwrap(),
    ]);

    assert!(matches!(result, Err(Error::FailedToDecodeInputImage(_, _))));
    assert!(!output_path.exists());
}
