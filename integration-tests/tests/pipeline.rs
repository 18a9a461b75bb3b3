use std::{fs, io::Cursor};

use approx::assert_relative_eq;
use image::{AnimationDecoder, codecs::gif::GifDecoder};
use pipeflow_core::snapshot;
use pipeflow_physics::{
    FlowParameters, FlowRegime, RegimeClassifier, classify,
    controls::ControlValues,
    particles::{Animation, FRAME_COUNT, PIPE_LENGTH, WALL_BOTTOM, WALL_TOP},
    streamlines::{CURVE_COUNT, SAMPLE_COUNT, render_streamlines},
};
use pipeflow_plot::{GifSettings, encode_gif, regime_banner, write_gif};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Density, velocity, diameter, viscosity, expected Re, expected regime.
const SCENARIOS: [(f64, f64, f64, f64, f64, FlowRegime); 3] = [
    (1000.0, 1.0, 0.1, 0.01, 10_000.0, FlowRegime::Turbulent),
    (1000.0, 0.02, 0.1, 0.01, 200.0, FlowRegime::Laminar),
    (1000.0, 0.3, 0.1, 0.01, 3000.0, FlowRegime::Transitional),
];

fn decode_frames(bytes: Vec<u8>) -> Vec<image::Frame> {
    GifDecoder::new(Cursor::new(bytes))
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap()
}

#[test]
fn scenarios_classify_as_expected() {
    for (density, velocity, diameter, viscosity, re, regime) in SCENARIOS {
        let params = FlowParameters::from_si(velocity, viscosity, density, diameter).unwrap();
        let Ok(snap) = snapshot(&RegimeClassifier, params);

        assert_relative_eq!(snap.output.reynolds.value(), re, max_relative = 1e-9);
        assert_eq!(snap.output.regime, regime);
        assert_eq!(snap.output, classify(&snap.input));
    }
}

#[test]
fn default_controls_run_end_to_end() {
    let controls = ControlValues::default();
    let classification = classify(&controls.flow_parameters().unwrap());
    assert_eq!(classification.regime, FlowRegime::Turbulent);
    assert_eq!(
        regime_banner(classification.regime).text(),
        "The flow is Turbulent Flow (Re > 4000)."
    );

    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let plot = render_streamlines(classification.regime, &mut rng);
    assert_eq!(plot.curves.len(), CURVE_COUNT);
    assert!(plot.curves.iter().all(|c| c.points.len() == SAMPLE_COUNT));

    let animation = Animation::record(
        classification,
        controls.particle_count,
        controls.animation_speed,
        FRAME_COUNT,
        &mut rng,
    );
    assert_eq!(animation.len(), FRAME_COUNT);
    for frame in animation.frames() {
        assert_eq!(frame.particles.len(), controls.particle_count);
        for p in frame.particles.iter() {
            assert!((WALL_BOTTOM..=WALL_TOP).contains(&p.y));
            assert!((0.0..PIPE_LENGTH).contains(&p.x));
        }
    }

    let dir = std::env::temp_dir().join(format!("pipeflow-pipeline-{}", std::process::id()));
    let path = dir.join("particle_animation.gif");
    let settings = GifSettings {
        width: 150,
        height: 100,
    };
    write_gif(&animation, &path, settings).unwrap();

    let frames = decode_frames(fs::read(&path).unwrap());
    assert_eq!(frames.len(), FRAME_COUNT);
    assert_eq!(frames[0].buffer().dimensions(), (150, 100));

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn empty_animation_still_exports() {
    let controls = ControlValues {
        velocity: 0.02,
        ..ControlValues::default()
    };
    let classification = classify(&controls.flow_parameters().unwrap());
    assert_eq!(classification.regime, FlowRegime::Laminar);

    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let animation = Animation::record(classification, 0, 5, 10, &mut rng);
    assert!(animation.frames().iter().all(|f| f.particles.is_empty()));

    let bytes = encode_gif(&animation, GifSettings::default()).unwrap();
    assert_eq!(decode_frames(bytes).len(), 10);
}
