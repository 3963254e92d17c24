//! Tests for the SVG vector renderer.
//!
//! Documents are parsed back with quick-xml so assertions run against
//! elements and attributes rather than raw text.

use obstruction_renderer::{build_svg, render_vector, ImageFormat, RenderConfig, RenderError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use test_utils::fixtures::reference_grid;
use test_utils::{create_dish_grid, create_gradient_grid, output_path, temp_test_dir};

// ============================================================================
// Helper functions
// ============================================================================

#[derive(Debug, Default)]
struct ParsedSvg {
    width: String,
    height: String,
    style: String,
    rects: Vec<Rect>,
    labels: Vec<Label>,
}

#[derive(Debug)]
struct Rect {
    x: u32,
    y: u32,
    size: u32,
    fill: String,
    shape_rendering: String,
}

#[derive(Debug)]
struct Label {
    text: String,
    x: String,
    y: String,
    anchor: String,
    fill: String,
}

fn attr(e: &BytesStart, name: &str) -> String {
    e.try_get_attribute(name)
        .unwrap()
        .map(|a| a.unescape_value().unwrap().into_owned())
        .unwrap_or_default()
}

fn parse_svg(svg: &str) -> ParsedSvg {
    let mut reader = Reader::from_str(svg);
    reader.trim_text(true);

    let mut parsed = ParsedSvg::default();
    let mut in_style = false;
    let mut pending_label: Option<Label> = None;

    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) => match e.name().as_ref() {
                b"svg" => {
                    assert_eq!(attr(&e, "xmlns"), "http://www.w3.org/2000/svg");
                    parsed.width = attr(&e, "width");
                    parsed.height = attr(&e, "height");
                }
                b"style" => in_style = true,
                b"text" => {
                    pending_label = Some(Label {
                        text: String::new(),
                        x: attr(&e, "x"),
                        y: attr(&e, "y"),
                        anchor: attr(&e, "text-anchor"),
                        fill: attr(&e, "fill"),
                    })
                }
                other => panic!("unexpected element {:?}", String::from_utf8_lossy(other)),
            },
            Event::Empty(e) => {
                assert_eq!(e.name().as_ref(), b"rect");
                let width: u32 = attr(&e, "width").parse().unwrap();
                let height: u32 = attr(&e, "height").parse().unwrap();
                assert_eq!(width, height);
                parsed.rects.push(Rect {
                    x: attr(&e, "x").parse().unwrap(),
                    y: attr(&e, "y").parse().unwrap(),
                    size: width,
                    fill: attr(&e, "fill"),
                    shape_rendering: attr(&e, "shape-rendering"),
                });
            }
            Event::Text(t) => {
                let text = t.unescape().unwrap().into_owned();
                if in_style {
                    parsed.style.push_str(&text);
                } else if let Some(label) = pending_label.as_mut() {
                    label.text.push_str(&text);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"style" => in_style = false,
                b"text" => parsed.labels.extend(pending_label.take()),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    parsed
}

fn label<'a>(parsed: &'a ParsedSvg, text: &str) -> &'a Label {
    parsed
        .labels
        .iter()
        .find(|l| l.text == text)
        .unwrap_or_else(|| panic!("missing label {}", text))
}

// ============================================================================
// Reference scenario
// ============================================================================

#[test]
fn test_reference_grid_document() {
    let svg = build_svg(&reference_grid(), &RenderConfig::default()).unwrap();
    let parsed = parse_svg(&svg);

    assert_eq!(parsed.width, "8");
    assert_eq!(parsed.height, "8");
    assert_eq!(parsed.rects.len(), 4);

    let fills: Vec<(u32, u32, &str)> = parsed
        .rects
        .iter()
        .map(|r| (r.x, r.y, r.fill.as_str()))
        .collect();
    assert_eq!(
        fills,
        vec![
            (0, 0, "rgb(62,128,224)"),
            (4, 0, "rgb(237,82,74)"),
            (0, 4, "rgb(0,0,0)"),
            (4, 4, "rgb(150,105,149)"),
        ]
    );
    assert!(parsed.rects.iter().all(|r| r.size == 4));
    assert!(parsed.rects.iter().all(|r| r.shape_rendering == "crispEdges"));
    assert_eq!(parsed.labels.len(), 4);
}

#[test]
fn test_compass_labels() {
    let svg = build_svg(&reference_grid(), &RenderConfig::default()).unwrap();
    let parsed = parse_svg(&svg);

    // 8x8 image with the default 24px font
    let n = label(&parsed, "N");
    assert_eq!((n.x.as_str(), n.y.as_str()), ("4", "24"));
    let s = label(&parsed, "S");
    assert_eq!((s.x.as_str(), s.y.as_str()), ("4", "-4"));
    let w = label(&parsed, "W");
    assert_eq!((w.x.as_str(), w.y.as_str()), ("12", "4"));
    let e = label(&parsed, "E");
    assert_eq!((e.x.as_str(), e.y.as_str()), ("-4", "4"));

    for l in &parsed.labels {
        assert_eq!(l.anchor, "middle");
        assert_eq!(l.fill, "white");
    }
}

#[test]
fn test_style_block_uses_font_settings() {
    let config = RenderConfig {
        font_family: "DejaVu Sans".to_string(),
        font_size: 12.5,
        ..Default::default()
    };
    let parsed = parse_svg(&build_svg(&reference_grid(), &config).unwrap());
    assert!(parsed.style.contains("font-family: DejaVu Sans;"));
    assert!(parsed.style.contains("font-size: 12.5px;"));
}

#[test]
fn test_font_family_is_escaped() {
    let config = RenderConfig {
        font_family: "</style><script>".to_string(),
        ..Default::default()
    };
    let svg = build_svg(&reference_grid(), &config).unwrap();
    assert!(!svg.contains("<script>"));
    let parsed = parse_svg(&svg);
    assert!(parsed.style.contains("</style><script>"));
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_shape_scales_with_upscale_factor() {
    let grid = create_gradient_grid(7, 3);
    for factor in [1, 2, 5, 10] {
        let config = RenderConfig {
            upscale_factor: factor,
            compass_labels: false,
            ..Default::default()
        };
        let parsed = parse_svg(&build_svg(&grid, &config).unwrap());
        assert_eq!(parsed.width, (7 * factor).to_string());
        assert_eq!(parsed.height, (3 * factor).to_string());
        assert_eq!(parsed.rects.len(), 21);

        let last = parsed.rects.last().unwrap();
        assert_eq!((last.x, last.y), (6 * factor, 2 * factor));
    }
}

#[test]
fn test_clamped_values_render_like_one() {
    let config = RenderConfig::default();
    let clamped = build_svg(&[vec![1.0, 2.0, 100.0]], &config).unwrap();
    let exact = build_svg(&[vec![1.0, 1.0, 1.0]], &config).unwrap();
    assert_eq!(clamped, exact);
}

#[test]
fn test_no_data_uses_configured_rgb() {
    let mut config = RenderConfig::default();
    config.colors.no_data = "7F102030".parse().unwrap();
    let parsed = parse_svg(&build_svg(&[vec![-5.0]], &config).unwrap());
    assert_eq!(parsed.rects[0].fill, "rgb(16,32,48)");
}

#[test]
fn test_greyscale_fills() {
    let config = RenderConfig {
        greyscale: true,
        ..Default::default()
    };
    let parsed = parse_svg(&build_svg(&reference_grid(), &config).unwrap());
    let fills: Vec<&str> = parsed.rects.iter().map(|r| r.fill.as_str()).collect();
    assert_eq!(
        fills,
        vec!["rgb(128,128,128)", "rgb(82,82,82)", "rgb(0,0,0)", "rgb(105,105,105)"]
    );
}

// ============================================================================
// Rejection, files and determinism
// ============================================================================

#[test]
fn test_empty_grid_creates_no_file() {
    let dir = temp_test_dir();
    let config = RenderConfig::default().with_output_path(output_path(dir.path(), "empty.svg"));

    for rows in [Vec::new(), vec![Vec::new()]] {
        assert!(matches!(
            render_vector(&rows, &config),
            Err(RenderError::InvalidGrid(_))
        ));
        assert!(!config.vector_path().exists());
    }
}

#[test]
fn test_zero_upscale_rejected_before_write() {
    let dir = temp_test_dir();
    let config = RenderConfig {
        upscale_factor: 0,
        ..RenderConfig::default().with_output_path(output_path(dir.path(), "zero.svg"))
    };
    assert!(matches!(
        render_vector(&reference_grid(), &config),
        Err(RenderError::InvalidConfig { .. })
    ));
    assert!(!config.vector_path().exists());
}

#[test]
fn test_css_breaking_font_family_rejected_before_write() {
    let dir = temp_test_dir();
    let config = RenderConfig {
        font_family: "Arial; } rect { fill: red".to_string(),
        ..RenderConfig::default().with_output_path(output_path(dir.path(), "style.svg"))
    };
    assert!(matches!(
        build_svg(&reference_grid(), &config),
        Err(RenderError::InvalidConfig { field: "font_family", .. })
    ));
    assert!(matches!(
        render_vector(&reference_grid(), &config),
        Err(RenderError::InvalidConfig { field: "font_family", .. })
    ));
    assert!(!config.vector_path().exists());
}

#[test]
fn test_render_vector_writes_document() {
    let dir = temp_test_dir();
    let config = RenderConfig::default().with_output_path(output_path(dir.path(), "dish.svg"));
    let grid = create_dish_grid(61);

    let summary = render_vector(&grid, &config).unwrap();
    assert_eq!(summary.format, ImageFormat::Svg);
    assert_eq!((summary.width, summary.height), (244, 244));

    let on_disk = std::fs::read_to_string(&summary.path).unwrap();
    assert_eq!(on_disk.len() as u64, summary.bytes_written);
    assert_eq!(on_disk, build_svg(&grid, &config).unwrap());

    let parsed = parse_svg(&on_disk);
    assert_eq!(parsed.rects.len(), 61 * 61);
    assert_eq!(parsed.labels.len(), 4);
}

#[test]
fn test_output_is_deterministic() {
    let grid = create_dish_grid(41);
    let config = RenderConfig::default();
    assert_eq!(
        build_svg(&grid, &config).unwrap(),
        build_svg(&grid, &config).unwrap()
    );
}
