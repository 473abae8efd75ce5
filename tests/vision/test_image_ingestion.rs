// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Image decoding and the decode-then-recognize entry points

use fabstir_ocr_node::vision::{
    decode_and_validate, decode_image_bytes,
    ocr::{run_ocr_from_bytes, run_ocr_from_path, EngineGuard, OcrError},
    ImageError,
};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::{Cursor, Write};
use std::path::Path;

use crate::common::{encode_image, png, DimensionsEngine};

#[test]
fn test_decode_formats_to_rgb() {
    for format in [
        ImageFormat::Png,
        ImageFormat::Jpeg,
        ImageFormat::Gif,
        ImageFormat::Bmp,
        ImageFormat::Pnm,
    ] {
        let pixels = decode_and_validate(&encode_image(9, 5, format)).unwrap();
        assert_eq!(pixels.dimensions(), (9, 5), "{:?}", format);
    }
}

#[test]
fn test_decode_drops_alpha() {
    let rgba = RgbaImage::from_pixel(3, 3, Rgba([10, 20, 30, 0]));
    let mut buf = Cursor::new(Vec::new());
    rgba.write_to(&mut buf, ImageFormat::Png).unwrap();

    let pixels = decode_and_validate(buf.get_ref()).unwrap();
    assert_eq!(pixels.get_pixel(1, 1).0, [10, 20, 30]);
}

#[test]
fn test_decode_rejections() {
    assert!(matches!(decode_and_validate(b""), Err(ImageError::EmptyData)));
    assert!(matches!(
        decode_and_validate(b"plain text, not pixels"),
        Err(ImageError::DecodeFailed(_))
    ));
    assert!(matches!(
        decode_image_bytes(&png(4, 4), 10),
        Err(ImageError::TooLarge(_, 10))
    ));
}

#[tokio::test]
async fn test_run_ocr_from_bytes() {
    let guard = EngineGuard::new(Box::new(DimensionsEngine::new()), None);

    let detections = run_ocr_from_bytes(&guard, &png(6, 3), 1024 * 1024)
        .await
        .unwrap();
    assert_eq!(detections[0].text, "6x3");

    let err = run_ocr_from_bytes(&guard, b"", 1024).await.unwrap_err();
    assert!(matches!(err, OcrError::InvalidInput(ImageError::EmptyData)));

    let err = run_ocr_from_bytes(&guard, b"nope", 1024).await.unwrap_err();
    assert!(matches!(err, OcrError::Decode(_)));
}

#[tokio::test]
async fn test_run_ocr_from_path() {
    let guard = EngineGuard::new(Box::new(DimensionsEngine::new()), None);

    let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    file.write_all(&png(15, 5)).unwrap();
    file.flush().unwrap();

    let detections = run_ocr_from_path(&guard, file.path()).await.unwrap();
    assert_eq!(detections.len(), 1);
    assert_eq!(detections[0].text, "15x5");
}

#[tokio::test]
async fn test_run_ocr_from_missing_path() {
    let guard = EngineGuard::new(Box::new(DimensionsEngine::new()), None);

    let err = run_ocr_from_path(&guard, Path::new("/nonexistent/sample.png"))
        .await
        .unwrap_err();
    assert!(matches!(err, OcrError::NotFound(_)));
    assert_eq!(err.to_string(), "Image not found: /nonexistent/sample.png");
}
