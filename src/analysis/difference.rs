use rayon::prelude::*;

use crate::error::ExtractError;
use crate::frame::FrameBuffer;

/// Normalized mean per-pixel Euclidean RGB distance between two equal-sized
/// buffers. 0.0 for identical buffers, 1.0 for maximal contrast (all-black vs
/// all-white). Alpha is ignored.
///
/// Rows are accumulated in parallel but combined in row order, so the result
/// is reproducible for identical inputs.
pub fn frame_difference(a: &FrameBuffer, b: &FrameBuffer) -> Result<f64, ExtractError> {
    if a.dimensions() != b.dimensions() {
        return Err(ExtractError::DimensionMismatch {
            a_width: a.width,
            a_height: a.height,
            b_width: b.width,
            b_height: b.height,
        });
    }

    let pixels = a.pixel_count();
    if pixels == 0 {
        return Ok(0.0);
    }

    // sqrt(255^2 * 3): the largest possible per-pixel RGB distance.
    let max_pixel_distance = (255.0_f64 * 255.0 * 3.0).sqrt();

    let row_len = a.width as usize * 4;
    let row_sums: Vec<f64> = a
        .data
        .par_chunks(row_len)
        .zip(b.data.par_chunks(row_len))
        .map(|(row_a, row_b)| {
            let mut sum = 0.0;
            for (pa, pb) in row_a.chunks_exact(4).zip(row_b.chunks_exact(4)) {
                let r = pa[0] as f64 - pb[0] as f64;
                let g = pa[1] as f64 - pb[1] as f64;
                let b = pa[2] as f64 - pb[2] as f64;
                sum += (r * r + g * g + b * b).sqrt() / max_pixel_distance;
            }
            sum
        })
        .collect();

    Ok(row_sums.iter().sum::<f64>() / pixels as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(rgb: [u8; 3]) -> FrameBuffer {
        FrameBuffer::filled(160, 90, [rgb[0], rgb[1], rgb[2], 255])
    }

    #[test]
    fn test_identical_buffers_are_zero() {
        let a = solid([128, 64, 32]);
        assert_eq!(frame_difference(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn test_black_vs_white_is_one() {
        let black = solid([0, 0, 0]);
        let white = solid([255, 255, 255]);
        assert_eq!(frame_difference(&black, &white).unwrap(), 1.0);
    }

    #[test]
    fn test_symmetry() {
        let a = solid([10, 200, 55]);
        let b = solid([240, 13, 99]);
        let ab = frame_difference(&a, &b).unwrap();
        let ba = frame_difference(&b, &a).unwrap();
        assert_eq!(ab, ba);
        assert!(ab > 0.0 && ab < 1.0);
    }

    #[test]
    fn test_alpha_is_ignored() {
        let opaque = FrameBuffer::filled(8, 8, [50, 50, 50, 255]);
        let transparent = FrameBuffer::filled(8, 8, [50, 50, 50, 0]);
        assert_eq!(frame_difference(&opaque, &transparent).unwrap(), 0.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = FrameBuffer::filled(160, 90, [0, 0, 0, 255]);
        let b = FrameBuffer::filled(320, 180, [0, 0, 0, 255]);
        let err = frame_difference(&a, &b).unwrap_err();
        assert!(matches!(err, ExtractError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_reproducible_across_calls() {
        let a = FrameBuffer::from_rgba(
            64,
            64,
            (0..64u32 * 64 * 4).map(|i| (i * 7 % 251) as u8).collect(),
        )
        .unwrap();
        let b = FrameBuffer::from_rgba(
            64,
            64,
            (0..64u32 * 64 * 4).map(|i| (i * 13 % 251) as u8).collect(),
        )
        .unwrap();

        let first = frame_difference(&a, &b).unwrap();
        for _ in 0..4 {
            assert_eq!(frame_difference(&a, &b).unwrap(), first);
        }
    }

    #[test]
    fn test_partial_change_is_proportional() {
        // half the pixels flipped to full contrast -> score 0.5
        let mut data = vec![0u8; 160 * 90 * 4];
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        let black = FrameBuffer::from_rgba(160, 90, data.clone()).unwrap();

        for px in data.chunks_exact_mut(4).take(160 * 90 / 2) {
            px[0] = 255;
            px[1] = 255;
            px[2] = 255;
        }
        let half = FrameBuffer::from_rgba(160, 90, data).unwrap();

        let score = frame_difference(&black, &half).unwrap();
        assert!((score - 0.5).abs() < 1e-12);
    }
}
