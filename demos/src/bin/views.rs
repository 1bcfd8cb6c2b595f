use std::{env, path::PathBuf};

use anyhow::Context as _;
use log::info;

use dv::prelude::*;
use dv::util::ppm::save_ppm;

const FOCAL_LENGTH: f32 = 600.0;
const DIMS: Dims = (512, 512);

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let out_dir = env::args().nth(1).map_or(PathBuf::from("."), PathBuf::from);

    let faces: [[usize; 3]; 2] = [[0, 1, 2], [0, 2, 3]];
    let renderer = ViewRenderer::new(FOCAL_LENGTH, DIMS, faces, false)?;

    // A 2×2 unit square around the model origin, which is the top left
    // corner of the image
    let verts: [[Point3<Model>; 4]; 1] = [[
        pt3(-1.0, -1.0, 0.0),
        pt3(1.0, -1.0, 0.0),
        pt3(1.0, 1.0, 0.0),
        pt3(-1.0, 1.0, 0.0),
    ]];
    let white = Buf2::new_with(DIMS, |_, _| rgb(0xFF, 0xFF, 0xFF));

    #[cfg(feature = "minifb")]
    let mut dev = dv_front::minifb::Window::builder()
        .title("duoview//views")
        .dims(DIMS)
        .build()?;
    #[cfg(not(feature = "minifb"))]
    let mut dev = Headless::new(DIMS);

    let front = renderer.render_front_view(
        &mut dev,
        &verts,
        Some(&white),
        rgba(0, 0, 0, 0),
    )?;
    let side = renderer.render_side_view(&mut dev, &verts)?;

    for (name, img) in [("front.ppm", &front), ("side.ppm", &side)] {
        let path = out_dir.join(name);
        save_ppm(&path, img)
            .with_context(|| format!("saving {}", path.display()))?;
        info!("saved {}", path.display());
    }

    #[cfg(feature = "minifb")]
    dev.show(&[front, side])?;

    Ok(())
}
