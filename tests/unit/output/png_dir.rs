use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_png_dir").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn opaque_white(width: u32, height: u32) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: vec![255; (width * height * 4) as usize],
        premultiplied: true,
    }
}

#[test]
fn begin_clears_stale_frames() {
    let root = scratch("clears");
    let stale = root.join("speed").join("speed.99.png");
    std::fs::create_dir_all(stale.parent().unwrap()).unwrap();
    std::fs::write(&stale, b"old").unwrap();

    let mut sink = PngDirSink::new(&root);
    sink.begin(&StreamKind::ALL).unwrap();

    assert!(!stale.exists());
    assert!(root.join("speed").is_dir());
    assert!(root.join("heart_rate").is_dir());
}

#[test]
fn push_frame_writes_named_png_without_temp_leftovers() {
    let root = scratch("writes");
    let mut sink = PngDirSink::new(&root);
    sink.begin(&[StreamKind::HeartRate]).unwrap();
    sink.push_frame(StreamKind::HeartRate, FrameIndex(3), &opaque_white(2, 3))
        .unwrap();
    sink.end().unwrap();

    let path = root.join("heart_rate").join("heart_rate.3.png");
    assert_eq!(sink.frame_path(StreamKind::HeartRate, FrameIndex(3)), path);
    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (2, 3));
    assert_eq!(img.get_pixel(1, 2).0, [255, 255, 255, 255]);
    assert_eq!(sink.frames_written(), 1);

    let leftovers = std::fs::read_dir(root.join("heart_rate"))
        .unwrap()
        .filter(|e| {
            e.as_ref()
                .unwrap()
                .file_name()
                .to_string_lossy()
                .ends_with(".tmp")
        })
        .count();
    assert_eq!(leftovers, 0);
}

#[test]
fn rewriting_a_frame_overwrites_it() {
    let root = scratch("overwrite");
    let mut sink = PngDirSink::new(&root);
    sink.begin(&[StreamKind::Speed]).unwrap();
    sink.push_frame(StreamKind::Speed, FrameIndex(0), &opaque_white(4, 4))
        .unwrap();
    sink.push_frame(StreamKind::Speed, FrameIndex(0), &opaque_white(1, 1))
        .unwrap();

    let img = image::open(root.join("speed").join("speed.0.png")).unwrap();
    assert_eq!((img.width(), img.height()), (1, 1));
}

#[test]
fn mismatched_buffer_is_a_render_error() {
    let root = scratch("mismatch");
    let mut sink = PngDirSink::new(&root);
    sink.begin(&[StreamKind::Speed]).unwrap();
    let bad = FrameRGBA {
        width: 4,
        height: 4,
        data: vec![0; 3],
        premultiplied: true,
    };
    let err = sink
        .push_frame(StreamKind::Speed, FrameIndex(0), &bad)
        .unwrap_err();
    assert!(matches!(err, OverlayError::Render(_)));
}
