use flowlab_core::flow::{FlowField, FlowVector};
use flowlab_core::io::flow_io::{save_flow, write_flow_csv};
use flowlab_core::io::image_io::{load_gray_frame, load_gray_frames};

fn sample_field() -> FlowField {
    FlowField::new(vec![
        FlowVector {
            x: 8,
            y: 8,
            u: 1.5,
            v: -0.25,
        },
        FlowVector {
            x: 16,
            y: 8,
            u: 0.0,
            v: 2.0,
        },
    ])
}

#[test]
fn test_csv_layout() {
    let mut buf = Vec::new();
    write_flow_csv(&sample_field(), &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["x,y,u,v", "8,8,1.5,-0.25", "16,8,0,2"]);
}

#[test]
fn test_save_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let field = sample_field();

    let csv_path = dir.path().join("flow.csv");
    save_flow(&field, &csv_path).unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("x,y,u,v"));

    let json_path = dir.path().join("flow.json");
    save_flow(&field, &json_path).unwrap();
    let json = std::fs::read_to_string(&json_path).unwrap();
    let parsed: FlowField = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, field);
    assert!(json.trim_start().starts_with('['));
}

#[test]
fn test_empty_field_writes_header_only() {
    let mut buf = Vec::new();
    write_flow_csv(&FlowField::default(), &mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "x,y,u,v\n");
}

#[test]
fn test_load_gray_frame_from_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");

    let mut img = image::RgbImage::new(4, 3);
    img.put_pixel(1, 2, image::Rgb([255, 0, 0]));
    img.put_pixel(3, 0, image::Rgb([200, 200, 200]));
    img.save(&path).unwrap();

    let frame = load_gray_frame(&path).unwrap();
    assert_eq!(frame.dims(), (4, 3));
    // 0.299 * 255 = 76.245 rounds to a whole level.
    assert_eq!(frame.data[[2, 1]], 76.0);
    assert_eq!(frame.data[[0, 3]], 200.0);
    assert_eq!(frame.data[[0, 0]], 0.0);

    let frames = load_gray_frames(&[&path, &path]).unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0], frames[1]);
}

#[test]
fn test_loaded_levels_are_whole_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("colors.png");

    let mut img = image::RgbImage::new(3, 1);
    img.put_pixel(0, 0, image::Rgb([0, 255, 0]));
    img.put_pixel(1, 0, image::Rgb([0, 0, 255]));
    img.put_pixel(2, 0, image::Rgb([255, 255, 255]));
    img.save(&path).unwrap();

    let frame = load_gray_frame(&path).unwrap();
    // 149.685, 29.07, 255.0
    assert_eq!(frame.data[[0, 0]], 150.0);
    assert_eq!(frame.data[[0, 1]], 29.0);
    assert_eq!(frame.data[[0, 2]], 255.0);
    assert!(frame.data.iter().all(|v| v.fract() == 0.0));
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_gray_frame(&dir.path().join("missing.png")).is_err());
}
