use spotcount_algorithms::{
    detect_spots, detect_spots_batch, NoiseReducer, PipelineConfig, RadiusRange, RingMask,
    SpotDetector,
};
use spotcount_core::{Error, Raster, BACKGROUND, EDGE};

/// Dark disks (intensity 60) on a bright background (200).
fn disk_image() -> Raster {
    let disks = [(14i64, 14i64, 4i64), (40, 12, 5), (20, 34, 6), (48, 34, 4)];
    Raster::from_fn(64, 48, |x, y| {
        let (x, y) = (x as i64, y as i64);
        let inside = disks
            .iter()
            .any(|&(cx, cy, r)| (x - cx) * (x - cx) + (y - cy) * (y - cy) <= r * r);
        if inside {
            60
        } else {
            200
        }
    })
}

fn config(lower: u32, upper: u32) -> PipelineConfig {
    PipelineConfig::new()
        .with_epsilon(50)
        .with_bounds(lower, upper)
        .unwrap()
}

#[test]
fn test_disks_counted_across_radii() {
    let output = detect_spots(&disk_image(), &config(4, 11)).unwrap();
    assert_eq!(output.spot_count(), 4, "found {}", output.spot_count());
    let radii: Vec<_> = output.detection.spots.iter().map(|s| s.radius).collect();
    assert_eq!(radii, vec![4, 4, 6, 7]);
}

#[test]
fn test_single_radius_finds_small_disks() {
    let output = detect_spots(&disk_image(), &config(4, 4)).unwrap();
    assert_eq!(output.spot_count(), 2);
}

#[test]
fn test_pipeline_is_deterministic() {
    let image = disk_image();
    let first = detect_spots(&image, &config(4, 11)).unwrap();
    let second = detect_spots(&image, &config(4, 11)).unwrap();
    assert_eq!(first.spot_count(), second.spot_count());
    assert_eq!(first.detection.spot_map, second.detection.spot_map);
    assert_eq!(first.detection.spots, second.detection.spots);
}

#[test]
fn test_batch_matches_sequential() {
    let images = vec![disk_image(), Raster::filled(30, 30, 128), disk_image()];
    let cfg = config(4, 11);
    let batch = detect_spots_batch(&images, &cfg).unwrap();
    for (image, result) in images.iter().zip(batch) {
        let sequential = detect_spots(image, &cfg).unwrap();
        let parallel = result.unwrap();
        assert_eq!(parallel.spot_count(), sequential.spot_count());
        assert_eq!(parallel.detection.spot_map, sequential.detection.spot_map);
    }
}

#[test]
fn test_noise_reducer_preserves_border() {
    let image = Raster::from_fn(17, 11, |x, y| ((x * 31 + y * 17) % 256) as u8);
    let reduced = NoiseReducer::new().reduce(&image);
    assert_eq!(reduced.dimensions(), image.dimensions());
    for x in 0..17 {
        assert_eq!(reduced.get(x, 0), image.get(x, 0));
        assert_eq!(reduced.get(x, 10), image.get(x, 10));
    }
    for y in 0..11 {
        assert_eq!(reduced.get(0, y), image.get(0, y));
        assert_eq!(reduced.get(16, y), image.get(16, y));
    }
}

#[test]
fn test_exact_ring_scenario() {
    let mask = RingMask::new(4).unwrap();
    let mut edges = Raster::new(30, 30);
    for i in 0..mask.side() {
        for j in 0..mask.side() {
            edges.set(11 + i, 11 + j, mask.get(i, j));
        }
    }

    let detection = SpotDetector::new(RadiusRange::single(4).unwrap())
        .detect(&edges)
        .unwrap();
    assert_eq!(detection.spot_count, 1);
    assert_eq!(detection.spot_map, edges);
    assert!(detection.spot_map.pixels().contains(&EDGE));
}

#[test]
fn test_empty_scenario() {
    let detection = SpotDetector::new(RadiusRange::single(4).unwrap())
        .detect(&Raster::new(30, 30))
        .unwrap();
    assert_eq!(detection.spot_count, 0);
    assert!(detection.spot_map.all_equal(BACKGROUND));
}

#[test]
fn test_out_of_range_radius_rejected_before_work() {
    assert!(matches!(
        PipelineConfig::new().with_bounds(2, 5),
        Err(Error::RadiusOutOfRange { radius: 2, .. })
    ));
    assert!(matches!(
        SpotDetector::from_bounds(4, 15),
        Err(Error::RadiusOutOfRange { radius: 15, .. })
    ));
}
