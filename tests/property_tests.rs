mod common;

use common::gradient;
use image::{GenericImageView, ImageFormat};
use img_squeeze_api::{resize_to_fit, select_output_format, OutputFormat};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn resize_to_fit_stays_inside_bounds(
        width in 1u32..=200u32,
        height in 1u32..=200u32,
        max_width in 1u32..=200u32,
        max_height in 1u32..=200u32
    ) {
        let img = gradient(width, height);
        let (new_w, new_h) = resize_to_fit(img, max_width, max_height).dimensions();

        // Never larger than the bounds or the original
        prop_assert!(new_w <= max_width && new_h <= max_height);
        prop_assert!(new_w <= width && new_h <= height);
    }

    #[test]
    fn resize_to_fit_preserves_aspect_ratio(
        width in 1u32..=200u32,
        height in 1u32..=200u32,
        max_width in 1u32..=200u32,
        max_height in 1u32..=200u32
    ) {
        let img = gradient(width, height);
        let (new_w, new_h) = resize_to_fit(img, max_width, max_height).dimensions();

        // Rounding can shift either side by at most one pixel
        let skew = (new_w as i64 * height as i64 - new_h as i64 * width as i64).abs();
        prop_assert!(skew <= width.max(height) as i64);
    }

    #[test]
    fn resize_to_fit_is_identity_for_own_dimensions(
        width in 1u32..=300u32,
        height in 1u32..=300u32
    ) {
        let img = gradient(width, height);
        prop_assert_eq!(resize_to_fit(img, width, height).dimensions(), (width, height));
    }

    #[test]
    fn output_format_is_webp_or_jpeg(
        format in prop::sample::select(vec![
            ImageFormat::Png,
            ImageFormat::Jpeg,
            ImageFormat::Gif,
            ImageFormat::WebP,
            ImageFormat::Bmp,
            ImageFormat::Tiff,
            ImageFormat::Ico,
            ImageFormat::Avif,
            ImageFormat::Qoi,
        ])
    ) {
        let output = select_output_format(format);
        let expected = if matches!(format, ImageFormat::Png | ImageFormat::WebP | ImageFormat::Gif) {
            OutputFormat::WebP
        } else {
            OutputFormat::Jpeg
        };
        prop_assert_eq!(output, expected);
    }
}
