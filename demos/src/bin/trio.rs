//! Three overlapping squares at different depths, tilted so that the side
//! view shows them apart.

use std::{env, path::PathBuf};

use anyhow::Context as _;
use log::info;

use dv::prelude::*;
use dv::render::{Light, Lighting};
use dv::util::ppm::save_ppm;

const DIMS: Dims = (384, 256);

/// A square of side `2 * r` centered at `(x, y, z)`, tilted about the
/// vertical axis by `tilt` units of depth per unit of x.
fn square(x: f32, y: f32, z: f32, r: f32, tilt: f32) -> Vec<Point3<Model>> {
    [(-r, -r), (r, -r), (r, r), (-r, r)]
        .into_iter()
        .map(|(dx, dy)| pt3(x + dx, y + dy, z + tilt * dx))
        .collect()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let out_dir = env::args().nth(1).map_or(PathBuf::from("."), PathBuf::from);

    let renderer = ViewRenderer::builder()
        .dims(DIMS)
        .focal_length(400.0)
        .faces([[0usize, 1, 2], [0, 2, 3]])
        .lighting(Lighting::Flat(Light::new(vec3(-1.0, 1.0, 2.0))))
        .build()?;

    let meshes = [
        square(140.0, 110.0, -40.0, 60.0, 0.3),
        square(190.0, 130.0, 0.0, 60.0, 0.0),
        square(240.0, 150.0, 40.0, 60.0, -0.3),
    ];

    let mut dev = Headless::new(DIMS);
    let front = renderer.render_front_view(
        &mut dev,
        &meshes,
        None,
        rgba(0x20, 0x20, 0x20, 0xFF),
    )?;
    let side = renderer.render_side_view(&mut dev, &meshes)?;

    for (name, img) in [("trio_front.ppm", &front), ("trio_side.ppm", &side)] {
        let path = out_dir.join(name);
        save_ppm(&path, img)
            .with_context(|| format!("saving {}", path.display()))?;
        info!("saved {}", path.display());
    }

    #[cfg(feature = "minifb")]
    dv_front::minifb::Window::builder()
        .title("duoview//trio")
        .dims((DIMS.0 * 2, DIMS.1))
        .build()?
        .show(&[front, side])?;

    Ok(())
}
