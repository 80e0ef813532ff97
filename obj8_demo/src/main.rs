//! OBJ8 Builder Demo
//!
//! Builds a small hangar door object with two LODs, a sliding door animation,
//! a beacon and a pair of taxi lights, then logs the resulting stream.
//!
//! Usage: `obj8_demo [config.toml|config.ron] [--dump]`
//!
//! `--dump` prints the finished scene as RON on stdout.

use obj8_builder::prelude::*;

const DOOR_WIDTH: f32 = 12.0;
const DOOR_HEIGHT: f32 = 6.0;
const DOOR_TRAVEL: f32 = 11.0;
const FAR_LOD: f32 = 2000.0;

fn quad(x0: f32, x1: f32, y0: f32, y1: f32, z: f32) -> [[TriVertex; 3]; 2] {
    let normal = [0.0, 0.0, 1.0];
    let v = |x: f32, y: f32, s: f32, t: f32| TriVertex::new([x, y, z], normal, [s, t]);
    let a = v(x0, y0, 0.0, 0.0);
    let b = v(x1, y0, 1.0, 0.0);
    let c = v(x1, y1, 1.0, 1.0);
    let d = v(x0, y1, 0.0, 1.0);
    [[a, b, c], [a, c, d]]
}

fn build_hangar(builder: &mut ObjBuilder<'_>) {
    // High detail: frame, sliding door, lights.
    builder.begin_lod(0.0, 500.0);
    builder.set_hard(Some("object"));
    for triangle in quad(-DOOR_WIDTH, DOOR_WIDTH, 0.0, DOOR_HEIGHT, 0.0) {
        builder.accumulate_triangle(triangle);
    }

    builder.begin_animation();
    builder.translate(
        [0.0, 0.0, 0.0],
        [DOOR_TRAVEL, 0.0, 0.0],
        0.0,
        1.0,
        "sim/hangar/door_ratio",
    );
    builder.set_hard(None);
    builder.set_shininess(0.4);
    builder.set_texture_mapping(TextureMapping::new(4.0, 2.0, 0.0, 0.0));
    for triangle in quad(0.0, DOOR_WIDTH, 0.0, DOOR_HEIGHT, 0.1) {
        builder.accumulate_triangle(triangle);
    }
    builder.end_animation();
    builder.set_texture_mapping(TextureMapping::IDENTITY);

    builder.begin_animation();
    builder.show(0.01, 1.0, "sim/hangar/door_ratio");
    builder.named_light([0.0, DOOR_HEIGHT + 0.5, 0.2], "airplane_beacon");
    builder.end_animation();

    builder.reset_material();
    for x in [-DOOR_WIDTH, DOOR_WIDTH] {
        builder.accumulate_light(LightVertex::new(
            [x, 0.2, 1.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 1.0],
            1.0,
        ));
    }

    // Low detail: the frame only.
    builder.begin_lod(500.0, FAR_LOD);
    builder.set_flat_shading(true);
    for triangle in quad(-DOOR_WIDTH, DOOR_WIDTH, 0.0, DOOR_HEIGHT, 0.0) {
        builder.accumulate_triangle(triangle);
    }
    builder.end_lod();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut config_path = None;
    let mut dump = false;
    for arg in std::env::args().skip(1) {
        if arg == "--dump" {
            dump = true;
        } else {
            config_path = Some(arg);
        }
    }

    let config = match config_path {
        Some(path) => {
            log::info!("Loading builder config from {path}");
            BuilderConfig::load_from_file(&path)?
        }
        None => BuilderConfig::default().with_layer_group("objects", 0),
    };

    let mut obj = Obj8::new();
    {
        let mut builder = ObjBuilder::with_config(&mut obj, &config);
        build_hangar(&mut builder);
        builder.finish();
    }

    log::info!("Built hangar: {}", obj.stats());
    for (index, lod) in obj.lods.iter().enumerate() {
        log::info!(
            "LOD {index} ({}..{}): {} commands",
            lod.near,
            lod.far,
            lod.commands.len()
        );
        for command in &lod.commands {
            log::debug!("  {command:?}");
        }
    }

    if dump {
        println!("{}", ron::ser::to_string_pretty(&obj, ron::ser::PrettyConfig::default())?);
    }

    Ok(())
}
