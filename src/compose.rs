//! Premultiplied RGBA8 pixel math shared by the compositing strategies.

use crate::foundation::error::{RoundelError, RoundelResult};
use crate::foundation::math::{add_sat_u8, mul_div255_u8};

/// Source-in: keep `src` only where the mask has coverage.
///
/// All four channels are scaled by the mask alpha, which is the premultiplied
/// form of the rule. `mask_a8` holds one alpha byte per pixel.
pub(crate) fn source_in_rgba8_premul(
    src: &[u8],
    mask_a8: &[u8],
    dst: &mut [u8],
) -> RoundelResult<()> {
    if src.len() != dst.len() || !src.len().is_multiple_of(4) {
        return Err(RoundelError::raster(
            "source_in expects equal-length rgba8 buffers",
        ));
    }
    if src.len() / 4 != mask_a8.len() {
        return Err(RoundelError::raster(
            "source_in mask length does not match pixel count",
        ));
    }
    for ((s, &m), d) in src
        .chunks_exact(4)
        .zip(mask_a8.iter())
        .zip(dst.chunks_exact_mut(4))
    {
        let m16 = u16::from(m);
        d[0] = mul_div255_u8(u16::from(s[0]), m16);
        d[1] = mul_div255_u8(u16::from(s[1]), m16);
        d[2] = mul_div255_u8(u16::from(s[2]), m16);
        d[3] = mul_div255_u8(u16::from(s[3]), m16);
    }
    Ok(())
}

/// Promote an alpha-only mask to premultiplied RGBA: `[0, 0, 0, a]` per pixel.
pub(crate) fn promote_alpha8(mask_a8: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; mask_a8.len() * 4];
    for (px, &a) in out.chunks_exact_mut(4).zip(mask_a8.iter()) {
        px[3] = a;
    }
    out
}

/// Premultiplied source-over of `src` onto `dst`, in place.
pub(crate) fn over_rgba8_premul(dst: &mut [u8], src: &[u8]) -> RoundelResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(RoundelError::raster(
            "over expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = u16::from(s[3]);
        if sa == 0 {
            continue;
        }
        let inv = 255u16 - sa;
        d[3] = add_sat_u8(s[3], mul_div255_u8(u16::from(d[3]), inv));
        for c in 0..3 {
            let dc = mul_div255_u8(u16::from(d[c]), inv);
            d[c] = add_sat_u8(s[c], dc);
        }
    }
    Ok(())
}

/// Premultiplied source-over blit of a `src_w x src_h` tile onto a
/// `dst_w x dst_h` target at `origin`, clipped to the target bounds.
pub(crate) fn blit_over_rgba8_premul(
    dst: &mut [u8],
    dst_w: u32,
    dst_h: u32,
    src: &[u8],
    src_w: u32,
    src_h: u32,
    origin: (i32, i32),
) -> RoundelResult<()> {
    if dst.len() != (dst_w as usize) * (dst_h as usize) * 4 {
        return Err(RoundelError::raster("blit target length mismatch"));
    }
    if src.len() != (src_w as usize) * (src_h as usize) * 4 {
        return Err(RoundelError::raster("blit source length mismatch"));
    }
    let (ox, oy) = origin;
    for sy in 0..src_h as i32 {
        let ty = oy + sy;
        if ty < 0 || ty >= dst_h as i32 {
            continue;
        }
        let tx0 = ox.max(0);
        let tx1 = (ox + src_w as i32).min(dst_w as i32);
        if tx0 >= tx1 {
            continue;
        }
        let sx0 = (tx0 - ox) as usize;
        let n = (tx1 - tx0) as usize;
        let s_off = ((sy as usize) * (src_w as usize) + sx0) * 4;
        let d_off = ((ty as usize) * (dst_w as usize) + tx0 as usize) * 4;
        over_rgba8_premul(&mut dst[d_off..d_off + n * 4], &src[s_off..s_off + n * 4])?;
    }
    Ok(())
}
