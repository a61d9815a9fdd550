//! Image snapshots
//!
//! Writing masks and pixmaps as PNG files and comparing them, used to
//! check rendering results against each other.

use std::path::Path;

use crate::buffer::Pixmap;
use crate::errors::Result;
use crate::mask::{Mask, MaskFormat};
use crate::pixfmt::unpack_argb32;

/// Read an image as 8 bit gray, returning the data, width and height
pub fn read_gray<P: AsRef<Path>>(filename: P) -> Result<(Vec<u8>, usize, usize)> {
    let img = image::open(filename)?.to_luma8();
    let (w, h) = img.dimensions();
    Ok((img.into_raw(), w as usize, h as usize))
}

/// Read an image as 8 bit RGBA, returning the data, width and height
pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<(Vec<u8>, usize, usize)> {
    let img = image::open(filename)?.to_rgba8();
    let (w, h) = img.dimensions();
    Ok((img.into_raw(), w as usize, h as usize))
}

/// Write 8 bit gray data
pub fn write_gray<P: AsRef<Path>>(buf: &[u8], width: usize, height: usize, filename: P) -> Result<()> {
    image::save_buffer(filename, buf, width as u32, height as u32, image::ColorType::L8)?;
    Ok(())
}

/// Write the coverage of a mask as a gray image
///
/// ThreeD masks write their alpha plane. A mask without pixels is
/// written as a single black pixel.
pub fn write_mask<P: AsRef<Path>>(mask: &Mask, filename: P) -> Result<()> {
    let b = mask.bounds;
    if b.is_empty() || mask.image.is_empty() {
        return write_gray(&[0], 1, 1, filename);
    }
    let buf: Vec<u8> = match mask.format {
        MaskFormat::A8 | MaskFormat::ThreeD => mask.image[.. mask.plane_size().unwrap_or(0)].to_vec(),
        MaskFormat::Bw => (b.y1 .. b.y2)
            .flat_map(|y| (b.x1 .. b.x2).map(move |x| (x, y)))
            .map(|(x, y)| mask.alpha_at(x, y))
            .collect(),
    };
    write_gray(&buf, b.width() as usize, b.height() as usize, filename)
}

/// Write a pixmap as an RGBA image, undoing premultiplication
pub fn write_pixmap<P: AsRef<Path>>(pix: &Pixmap, filename: P) -> Result<()> {
    let mut buf = Vec::with_capacity(pix.width * pix.height * 4);
    for y in 0 .. pix.height {
        for x in 0 .. pix.width {
            let (a, r, g, b) = unpack_argb32(pix.pixel(x, y));
            let c = crate::color::PremultipliedColor { r, g, b, a }.demultiply();
            buf.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
    }
    image::save_buffer(filename, &buf, pix.width as u32, pix.height as u32,
                       image::ColorType::Rgba8)?;
    Ok(())
}

/// Images have the same size and pixels
///
/// Differences are logged, one line per byte.
pub fn img_diff<P: AsRef<Path>>(f1: P, f2: P) -> Result<bool> {
    let (d1, w1, h1) = read_file(f1)?;
    let (d2, w2, h2) = read_file(f2)?;
    if w1 != w2 || h1 != h2 {
        log::info!("IMG DIFF: sizes differ {}x{} {}x{}", w1, h1, w2, h2);
        return Ok(false);
    }
    let mut flag = true;
    for (i, (v1, v2)) in d1.iter().zip(d2.iter()).enumerate() {
        if v1 != v2 {
            log::info!("IMG DIFF: {} [{},{},{}]: {} {}", i, (i / 4) % w1, (i / 4) / w1, i % 4, v1, v2);
            flag = false;
        }
    }
    Ok(flag)
}
