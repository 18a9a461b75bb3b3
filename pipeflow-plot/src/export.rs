//! Persists a particle animation as a looping GIF.

use std::{
    fs,
    path::{Path, PathBuf},
};

use image::{
    Delay, Frame, ImageError, Rgba, RgbaImage,
    codecs::gif::{GifEncoder, Repeat},
};
use pipeflow_physics::particles::{
    Animation, FRAME_INTERVAL, PIPE_HEIGHT, PIPE_LENGTH, ParticleSet,
};
use thiserror::Error;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const AXES: Rgba<u8> = Rgba([160, 160, 160, 255]);
const PARTICLE: Rgba<u8> = Rgba([0, 0, 255, 255]);

/// Quantizer speed passed to the GIF encoder (1 is slowest, 30 fastest).
const ENCODER_SPEED: i32 = 10;

/// Errors that may occur while exporting an animation.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot export a {width}x{height} animation")]
    InvalidSize { width: u32, height: u32 },

    #[error("failed to encode animation: {0}")]
    Encode(#[from] ImageError),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Pixel dimensions of exported frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GifSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for GifSettings {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
        }
    }
}

/// Encodes every frame of `animation` into an infinitely looping GIF.
///
/// Frames are spaced by the nominal frame interval, not by how long the
/// simulation took to compute.
///
/// # Errors
///
/// Returns [`ExportError::InvalidSize`] for a zero-sized canvas and
/// [`ExportError::Encode`] if the encoder fails.
pub fn encode_gif(animation: &Animation, settings: GifSettings) -> Result<Vec<u8>, ExportError> {
    let GifSettings { width, height } = settings;
    if width == 0 || height == 0 {
        return Err(ExportError::InvalidSize { width, height });
    }

    let delay = Delay::from_saturating_duration(FRAME_INTERVAL);
    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut bytes, ENCODER_SPEED);
        encoder.set_repeat(Repeat::Infinite)?;
        encoder.encode_frames(animation.frames().iter().map(|frame| {
            Frame::from_parts(rasterize(&frame.particles, settings), 0, 0, delay)
        }))?;
    }

    Ok(bytes)
}

/// Encodes `animation` and writes it to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an [`ExportError`] if encoding fails or the file cannot be written.
pub fn write_gif(
    animation: &Animation,
    path: &Path,
    settings: GifSettings,
) -> Result<(), ExportError> {
    let bytes = encode_gif(animation, settings)?;

    let write_error = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, &bytes).map_err(write_error)?;

    log::info!(
        "wrote {} frames ({} bytes) to {}",
        animation.len(),
        bytes.len(),
        path.display()
    );
    Ok(())
}

/// Plot-area margins, in pixels: left, right, top, bottom.
fn margins(settings: GifSettings) -> (u32, u32, u32, u32) {
    let GifSettings { width, height } = settings;
    (width / 12, width / 30, height / 20, height / 10)
}

/// Draws one frame: a white canvas, the pipe outline and a disc per particle.
fn rasterize(particles: &ParticleSet, settings: GifSettings) -> RgbaImage {
    let GifSettings { width, height } = settings;
    let mut image = RgbaImage::from_pixel(width, height, BACKGROUND);

    let (left, right, top, bottom) = margins(settings);
    let plot_width = width.saturating_sub(left + right).max(1);
    let plot_height = height.saturating_sub(top + bottom).max(1);

    draw_rectangle(&mut image, left, top, plot_width, plot_height);

    let radius = (plot_height / 60).max(2);
    for particle in particles.iter() {
        let px = f64::from(left) + particle.x / PIPE_LENGTH * f64::from(plot_width);
        let py = f64::from(top) + (1.0 - particle.y / PIPE_HEIGHT) * f64::from(plot_height);
        draw_disc(&mut image, px.round() as i64, py.round() as i64, i64::from(radius));
    }

    image
}

fn draw_rectangle(image: &mut RgbaImage, left: u32, top: u32, width: u32, height: u32) {
    let right = (left + width).min(image.width() - 1);
    let bottom = (top + height).min(image.height() - 1);

    for x in left..=right {
        image.put_pixel(x, top, AXES);
        image.put_pixel(x, bottom, AXES);
    }
    for y in top..=bottom {
        image.put_pixel(left, y, AXES);
        image.put_pixel(right, y, AXES);
    }
}

fn draw_disc(image: &mut RgbaImage, cx: i64, cy: i64, radius: i64) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            let (Ok(x), Ok(y)) = (u32::try_from(cx + dx), u32::try_from(cy + dy)) else {
                continue;
            };
            if x < image.width() && y < image.height() {
                image.put_pixel(x, y, PARTICLE);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use image::{AnimationDecoder, codecs::gif::GifDecoder};
    use pipeflow_physics::{
        Classification, FlowRegime, ReynoldsNumber,
        particles::Particle,
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn animation(frames: usize, particles: usize) -> Animation {
        let classification = Classification {
            reynolds: ReynoldsNumber::new(6000.0),
            regime: FlowRegime::Turbulent,
        };
        Animation::record(
            classification,
            particles,
            5,
            frames,
            &mut ChaCha8Rng::seed_from_u64(1),
        )
    }

    fn decode(bytes: Vec<u8>) -> Vec<image::Frame> {
        GifDecoder::new(Cursor::new(bytes))
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap()
    }

    #[test]
    fn encodes_one_gif_frame_per_animation_frame() {
        let settings = GifSettings {
            width: 120,
            height: 80,
        };
        let frames = decode(encode_gif(&animation(12, 10), settings).unwrap());

        assert_eq!(frames.len(), 12);
        for frame in &frames {
            assert_eq!(frame.buffer().dimensions(), (120, 80));
            let (numer, denom) = frame.delay().numer_denom_ms();
            assert_eq!(numer / denom, 50);
        }
    }

    #[test]
    fn empty_particle_set_still_encodes() {
        let bytes = encode_gif(&animation(3, 0), GifSettings::default()).unwrap();
        assert_eq!(decode(bytes).len(), 3);
    }

    #[test]
    fn zero_sized_canvas_is_rejected() {
        let result = encode_gif(
            &animation(1, 1),
            GifSettings {
                width: 0,
                height: 400,
            },
        );
        assert!(matches!(
            result,
            Err(ExportError::InvalidSize {
                width: 0,
                height: 400
            })
        ));
    }

    #[test]
    fn particles_are_drawn_where_they_are() {
        let settings = GifSettings::default();
        let set: ParticleSet = [Particle { x: 5.0, y: 2.5 }].into_iter().collect();
        let image = rasterize(&set, settings);

        let (left, right, top, bottom) = margins(settings);
        let cx = left + (600 - left - right) / 2;
        let cy = top + (400 - top - bottom) / 2;

        assert_eq!(*image.get_pixel(cx, cy), PARTICLE);
        assert_eq!(*image.get_pixel(cx + 40, cy), BACKGROUND);
        assert_eq!(*image.get_pixel(left, cy), AXES);
    }

    #[test]
    fn write_gif_creates_the_file() {
        let dir = std::env::temp_dir().join(format!("pipeflow-export-{}", std::process::id()));
        let path = dir.join("nested").join("particles.gif");

        write_gif(&animation(4, 5), &path, GifSettings::default()).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"GIF89a"));
        assert_eq!(decode(bytes).len(), 4);

        fs::remove_dir_all(dir).unwrap();
    }
}
