use mib_core::{LoadOptions, MibError, PixelType, ScanShape};
use mib_io::{inspect, load, load_buffer, load_file, FrameView, Source};
use proptest::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const WIDTH: usize = 6;
const HEIGHT: usize = 4;

fn header(sentinel: &str, code: &str, geometry: &str) -> Vec<u8> {
    let size = if sentinel == "00768" { 768 } else { 384 };
    let mut bytes = format!(
        "MQ1,000001,{sentinel},01,{WIDTH:04},{HEIGHT:04},{code},{geometry},01,2020-01-01 00:00:00.000000,0.001000,0,0,0"
    )
    .into_bytes();
    bytes.resize(size, 0);
    bytes
}

/// `frames` records whose pixel `p` of frame `f` holds `f * 1000 + p`.
fn create_test_mib(sentinel: &str, code: &str, frames: usize) -> Vec<u8> {
    let head = header(sentinel, code, "   1x1");
    let mut data = Vec::new();
    for f in 0..frames {
        data.extend_from_slice(&head);
        for p in 0..WIDTH * HEIGHT {
            let value = (f * 1000 + p) as u32;
            match code {
                "U08" => data.push(value as u8),
                "U16" => data.extend_from_slice(&(value as u16).to_be_bytes()),
                _ => data.extend_from_slice(&value.to_be_bytes()),
            }
        }
    }
    data
}

fn write_temp(data: &[u8]) -> NamedTempFile {
    let mut temp = NamedTempFile::new().unwrap();
    temp.write_all(data).unwrap();
    temp.flush().unwrap();
    temp
}

#[test]
fn test_single_record_buffer() {
    let data = create_test_mib("00384", "U16", 1);
    let mib = load_buffer(&data, &LoadOptions::default()).unwrap();
    let frames = mib.frames().unwrap();

    assert_eq!(frames.shape(), &[1, 1, HEIGHT, WIDTH]);
    assert_eq!(frames.pixel_type(), PixelType::U16Be);
    assert_eq!(mib.descriptor().dyn_range(), Some("12-bit"));
    assert_eq!(frames.get(&[0, 0, 0, 0]), Some(0));
    assert_eq!(frames.get(&[0, 0, 3, 5]), Some(23));
}

#[test]
fn test_exact_frame_count_and_overrun() {
    let k = 5;
    let data = create_test_mib("00384", "U16", k);

    let mib = load_buffer(&data, &LoadOptions::new(k)).unwrap();
    assert_eq!(mib.frames().unwrap().shape(), &[k, HEIGHT, WIDTH]);

    let err = load_buffer(&data, &LoadOptions::new(k + 1)).err().unwrap();
    assert!(matches!(
        err,
        MibError::ShapeMismatch {
            requested: 6,
            available: 5
        }
    ));

    let err = load_buffer(&data, &LoadOptions::new(ScanShape::Grid(2, 3))).err().unwrap();
    assert!(matches!(err, MibError::ShapeMismatch { requested: 6, .. }));
}

#[test]
fn test_raw_refused_for_any_shape() {
    let mut data = header("00384", "R64", "   1x1");
    data.extend_from_slice(&[0u8; 4096]);

    for shape in [ScanShape::Grid(1, 1), ScanShape::Stack(1), ScanShape::Grid(100, 100)] {
        let err = load_buffer(&data, &LoadOptions::new(shape)).err().unwrap();
        assert!(matches!(err, MibError::UnsupportedEncoding), "{shape}");
    }
}

#[test]
fn test_source_too_short() {
    let mut data = header("00384", "U32", "   1x1");
    data.extend_from_slice(&[0u8; 10]);
    let err = load_buffer(&data, &LoadOptions::default()).err().unwrap();
    assert!(matches!(err, MibError::SourceTooShort { .. }));
}

#[test]
fn test_source_shorter_than_header_block() {
    let data = header("00384", "U16", "   1x1")[..200].to_vec();

    let err = load_buffer(&data, &LoadOptions::default()).err().unwrap();
    assert!(matches!(
        err,
        MibError::SourceTooShort {
            size: 200,
            record_size: 432
        }
    ));

    let temp = write_temp(&data);
    let err = load_file(temp.path(), &LoadOptions::default()).err().unwrap();
    assert!(matches!(err, MibError::SourceTooShort { size: 200, .. }));
}

#[test]
fn test_quad_source_shorter_than_header_block() {
    let data = header("00768", "U08", "   2x2")[..500].to_vec();
    let err = load_buffer(&data, &LoadOptions::default()).err().unwrap();
    assert!(matches!(
        err,
        MibError::SourceTooShort {
            size: 500,
            record_size: 792
        }
    ));
}

#[test]
fn test_missing_header() {
    let data = vec![0xFFu8; 2048];
    let err = load_buffer(&data, &LoadOptions::default()).err().unwrap();
    assert!(matches!(err, MibError::Format(_)));

    let err = load_buffer(b"MQ1,000001", &LoadOptions::default()).err().unwrap();
    assert!(matches!(err, MibError::Format(_)));
}

#[test]
fn test_file_and_buffer_agree() {
    for code in ["U08", "U16", "U32"] {
        let data = create_test_mib("00384", code, 6);
        let temp = write_temp(&data);
        let options = LoadOptions::new(ScanShape::Grid(3, 2));

        let from_file = load_file(temp.path(), &options).unwrap();
        let from_buffer = load_buffer(&data, &options).unwrap();
        assert!(from_file.is_mapped());
        assert_eq!(from_file.path(), Some(temp.path()));

        let a = from_file.frames().unwrap().to_u32();
        let b = from_buffer.frames().unwrap().to_u32();
        assert_eq!(a.shape(), &[3, 2, HEIGHT, WIDTH]);
        assert_eq!(a, b, "{code}");
    }
}

#[test]
fn test_file_missing() {
    let err = load_file("/nonexistent/scan.mib", &LoadOptions::default())
        .err()
        .unwrap();
    assert!(matches!(err, MibError::Io(_)));
}

#[test]
fn test_quad_header_from_buffer() {
    let data = create_test_mib("00768", "U08", 2);
    let mib = load_buffer(&data, &LoadOptions::new(ScanShape::Stack(2))).unwrap();

    assert!(mib.descriptor().is_quad());
    assert_eq!(mib.descriptor().header_byte_size(), 768);
    assert_eq!(mib.layout().record_size(), 768 + WIDTH * HEIGHT);

    let frames = mib.frames().unwrap();
    assert_eq!(frames.get(&[1, 0, 0]), Some(1000 % 256));
    assert_eq!(frames.get(&[1, 3, 5]), Some((1000 + 23) % 256));
}

#[test]
fn test_quad_header_from_file() {
    let data = create_test_mib("00768", "U16", 3);
    let temp = write_temp(&data);
    let mib = load_file(temp.path(), &LoadOptions::new(ScanShape::Stack(3))).unwrap();

    assert_eq!(mib.descriptor().header_byte_size(), 768);
    let frames = mib.frames().unwrap();
    assert_eq!(frames.get(&[2, 0, 1]), Some(2001));
}

#[test]
fn test_byte_offset_skips_records() {
    let data = create_test_mib("00384", "U32", 4);
    let record = 384 + WIDTH * HEIGHT * 4;
    let options = LoadOptions::new(ScanShape::Stack(2)).with_byte_offset(2 * record as u64);

    let mib = load_buffer(&data, &options).unwrap();
    assert_eq!(mib.layout().frames_available(), 2);
    let frames = mib.frames().unwrap();
    assert_eq!(frames.get(&[0, 0, 0]), Some(2000));
    assert_eq!(frames.get(&[1, 0, 0]), Some(3000));

    let err = load_buffer(&data, &options.with_shape(ScanShape::Stack(3))).err().unwrap();
    assert!(matches!(err, MibError::ShapeMismatch { available: 2, .. }));
}

#[test]
fn test_unaligned_byte_offset() {
    let mut data = vec![0u8; 3];
    data.extend_from_slice(&create_test_mib("00384", "U16", 2));
    let mut shifted = create_test_mib("00384", "U16", 1);
    shifted.extend_from_slice(&data);

    let options = LoadOptions::new(ScanShape::Stack(2)).with_byte_offset((384 + WIDTH * HEIGHT * 2 + 3) as u64);
    let mib = load_buffer(&shifted, &options).unwrap();
    let frames = mib.frames().unwrap();
    assert!(matches!(frames, FrameView::U16(_)));
    assert_eq!(frames.get(&[0, 1, 0]), Some(6));
    assert_eq!(frames.get(&[1, 1, 0]), Some(1006));
}

#[test]
fn test_inspect_file() {
    let data = create_test_mib("00384", "U08", 7);
    let temp = write_temp(&data);

    let summary = inspect(temp.path(), 0).unwrap();
    assert_eq!(summary.frames_available, Some(7));
    assert_eq!(summary.source_size, data.len() as u64);
    assert!(summary.to_string().starts_with("Path: "));
}

#[test]
fn test_source_variants() {
    let data = create_test_mib("00384", "U08", 1);
    assert!(matches!(Source::from(&data), Source::Buffer(_)));
    assert!(matches!(Source::from("scan.mib"), Source::File(_)));

    let mib = load(Source::Buffer(&data), &LoadOptions::default()).unwrap();
    assert_eq!(mib.summary().frames_requested, Some(1));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn file_and_buffer_agree_for_any_stack(frames in 1usize..8, take in 1usize..8) {
        let data = create_test_mib("00384", "U16", frames);
        let temp = write_temp(&data);
        let options = LoadOptions::new(take);

        match (load_file(temp.path(), &options), load_buffer(&data, &options)) {
            (Ok(a), Ok(b)) => {
                prop_assert!(take <= frames);
                prop_assert_eq!(a.frames().unwrap().to_u32(), b.frames().unwrap().to_u32());
            }
            (Err(MibError::ShapeMismatch { .. }), Err(MibError::ShapeMismatch { .. })) => {
                prop_assert!(take > frames);
            }
            _ => prop_assert!(false, "file and buffer loads disagree"),
        }
    }
}
