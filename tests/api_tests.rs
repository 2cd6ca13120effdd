mod common;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::{encode, gradient, sample_bytes};
use image::{GenericImageView, ImageFormat};
use img_squeeze_api::{build_router, CompressResponse, ErrorBody, OutputFormat, ServerConfig};

fn test_server() -> TestServer {
    test_server_with(ServerConfig::default())
}

fn test_server_with(config: ServerConfig) -> TestServer {
    TestServer::new(build_router(&config)).expect("Failed to create test server")
}

fn image_form(data: Vec<u8>, file_name: &str) -> MultipartForm {
    MultipartForm::new().add_part("image", Part::bytes(data).file_name(file_name))
}

async fn compress_ok(server: &TestServer, data: Vec<u8>, file_name: &str) -> CompressResponse {
    let response = server
        .post("/api/compress")
        .multipart(image_form(data, file_name))
        .await;
    response.assert_status_ok();
    response.json::<CompressResponse>()
}

async fn compress_err(server: &TestServer, form: MultipartForm) -> (StatusCode, ErrorBody) {
    let response = server.post("/api/compress").multipart(form).await;
    (response.status_code(), response.json::<ErrorBody>())
}

#[tokio::test]
async fn test_healthz() {
    let server = test_server();
    let response = server.get("/healthz").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_png_webp_gif_become_webp() {
    let server = test_server();

    for (format, name) in [
        (ImageFormat::Png, "a.png"),
        (ImageFormat::WebP, "a.webp"),
        (ImageFormat::Gif, "a.gif"),
    ] {
        let body = compress_ok(&server, sample_bytes(64, 40, format), name).await;
        assert_eq!(body.format, OutputFormat::WebP, "input {}", name);
        assert_eq!(body.mime_type, "image/webp", "input {}", name);
    }
}

#[tokio::test]
async fn test_other_formats_become_jpeg() {
    let server = test_server();

    for (format, name) in [
        (ImageFormat::Jpeg, "a.jpg"),
        (ImageFormat::Bmp, "a.bmp"),
        (ImageFormat::Tiff, "a.tiff"),
    ] {
        let body = compress_ok(&server, sample_bytes(64, 40, format), name).await;
        assert_eq!(body.format, OutputFormat::Jpeg, "input {}", name);
        assert_eq!(body.mime_type, "image/jpeg", "input {}", name);
    }
}

#[tokio::test]
async fn test_payload_round_trip() {
    let server = test_server();
    let input = sample_bytes(120, 90, ImageFormat::Png);
    let input_len = input.len();

    let body = compress_ok(&server, input, "photo.png").await;
    assert_eq!(body.original_size, input_len);

    let decoded = STANDARD.decode(&body.compressed).unwrap();
    assert_eq!(decoded.len(), body.size);
    assert_eq!(body.format, OutputFormat::WebP);
    assert_eq!(image::guess_format(&decoded).unwrap(), ImageFormat::WebP);

    let img = image::load_from_memory(&decoded).unwrap();
    assert_eq!(img.dimensions(), (120, 90));
}

#[tokio::test]
async fn test_bmp_output_is_smaller() {
    let server = test_server();
    let input = sample_bytes(200, 150, ImageFormat::Bmp);
    let input_len = input.len();

    let body = compress_ok(&server, input, "scan.bmp").await;
    assert!(body.size <= body.original_size);
    assert_eq!(body.original_size, input_len);
}

#[tokio::test]
async fn test_recompressing_output_is_well_formed() {
    let server = test_server();

    for (format, name) in [(ImageFormat::Png, "a.png"), (ImageFormat::Jpeg, "a.jpg")] {
        let first = compress_ok(&server, sample_bytes(80, 60, format), name).await;
        let first_bytes = STANDARD.decode(&first.compressed).unwrap();

        let second = compress_ok(&server, first_bytes.clone(), "again").await;
        assert_eq!(second.format, first.format);
        assert_eq!(second.original_size, first_bytes.len());

        let second_bytes = STANDARD.decode(&second.compressed).unwrap();
        let img = image::load_from_memory(&second_bytes).unwrap();
        assert_eq!(img.dimensions(), (80, 60));
    }
}

#[tokio::test]
async fn test_alpha_png_is_accepted() {
    let server = test_server();
    let mut img = gradient(32, 32).to_rgba8();
    img.get_pixel_mut(0, 0).0[3] = 0;
    let data = encode(&image::DynamicImage::ImageRgba8(img), ImageFormat::Png);

    let body = compress_ok(&server, data, "alpha.png").await;
    assert_eq!(body.format, OutputFormat::WebP);
}

#[tokio::test]
async fn test_missing_image_field() {
    let server = test_server();
    let form = MultipartForm::new().add_text("purpose", "compress");

    let (status, body) = compress_err(&server, form).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.status_code, 400);
    assert_eq!(body.message, "No image file provided");
}

#[tokio::test]
async fn test_empty_image_field() {
    let server = test_server();
    let (status, body) = compress_err(&server, image_form(Vec::new(), "empty.png")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.message, "Empty file provided");
}

#[tokio::test]
async fn test_text_is_invalid_image() {
    let server = test_server();
    let form = image_form(b"hello, I am not a picture".to_vec(), "notes.txt");

    let (status, body) = compress_err(&server, form).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.message,
        "Invalid image file. Please ensure the file is a valid image format."
    );
}

#[tokio::test]
async fn test_random_bytes_are_invalid_image() {
    let server = test_server();
    let data: Vec<u8> = (0..512u32).map(|i| (i * 7919 % 251) as u8).collect();

    let (status, body) = compress_err(&server, image_form(data, "blob.bin")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.status_code, 400);
}

#[tokio::test]
async fn test_truncated_image_is_processing_error() {
    let server = test_server();
    let data = sample_bytes(128, 128, ImageFormat::Png);
    let truncated = data[..data.len() / 2].to_vec();

    let (status, body) = compress_err(&server, image_form(truncated, "cut.png")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.status_code, 500);
    assert!(body.message.starts_with("Failed to compress image: "));
}

#[tokio::test]
async fn test_oversized_dimensions_rejected() {
    let mut config = ServerConfig::default();
    config.options.max_dimension = 32;
    let server = test_server_with(config);

    let (status, body) =
        compress_err(&server, image_form(sample_bytes(64, 16, ImageFormat::Png), "wide.png")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.message.contains("64x16"));
}

#[tokio::test]
async fn test_body_limit_rejected() {
    let mut config = ServerConfig::default();
    config.max_upload_size = 1024;
    config.options.max_file_size = 1024;
    let server = test_server_with(config);

    let (status, body) =
        compress_err(&server, image_form(sample_bytes(128, 128, ImageFormat::Bmp), "big.bmp")).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body.status_code, 413);
}

#[tokio::test]
async fn test_non_multipart_body_rejected() {
    let server = test_server();
    let response = server
        .post("/api/compress")
        .json(&serde_json::json!({ "image": "nope" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<ErrorBody>();
    assert_eq!(body.status_code, 400);
}

#[tokio::test]
async fn test_first_image_field_wins() {
    let server = test_server();
    let form = MultipartForm::new()
        .add_text("note", "ignored")
        .add_part(
            "image",
            Part::bytes(sample_bytes(20, 10, ImageFormat::Jpeg)).file_name("first.jpg"),
        )
        .add_part(
            "image",
            Part::bytes(sample_bytes(20, 10, ImageFormat::Png)).file_name("second.png"),
        );

    let response = server.post("/api/compress").multipart(form).await;
    response.assert_status_ok();
    let body = response.json::<CompressResponse>();
    assert_eq!(body.format, OutputFormat::Jpeg);
}
