use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use image::{Rgba, RgbaImage};
use layerloop_engine::core::{DesktopEngine, EngineConfig};
use layerloop_engine::input::{Key, KeyState};
use layerloop_engine::logging::{init_logging, LoggingConfig};
use layerloop_engine::scene::DrawItem;

const LAYER_BACKDROP: i32 = -10;
const LAYER_SPRITES: i32 = 0;
const LAYER_CURSOR: i32 = 10;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut engine = DesktopEngine::new(
        EngineConfig::default()
            .with_title("layerloop demo")
            .with_size(960.0, 600.0),
    )?;

    let backdrop = engine.create_bitmap(&checkerboard(256, 32))?;
    let sprite = engine.create_bitmap(&disc(48, Rgba([240, 120, 40, 255])))?;
    let cursor = engine.create_bitmap(&disc(16, Rgba([250, 250, 250, 220])))?;

    // Space toggles the animation.
    let paused = Rc::new(Cell::new(false));
    let toggle = paused.clone();
    engine.set_key_callback(Box::new(move |ev| {
        if ev.key == Key::Space && ev.state == KeyState::Pressed && !ev.repeat {
            toggle.set(!toggle.get());
        }
    }));

    engine.start();

    let mut t = 0.0f32;
    loop {
        for row in 0..3 {
            for col in 0..4 {
                let pos = (col as f32 * 256.0, row as f32 * 256.0);
                engine.draw(LAYER_BACKDROP, DrawItem::new(backdrop.clone(), pos));
            }
        }

        for i in 0..6 {
            let phase = t + i as f32 * 0.9;
            let x = 80.0 + i as f32 * 130.0;
            let y = 260.0 + phase.sin() * 120.0;
            engine.draw(LAYER_SPRITES, DrawItem::new(sprite.clone(), (x, y)));
        }

        let orbit = (480.0 + (t * 1.7).cos() * 200.0, 300.0 + (t * 1.7).sin() * 200.0);
        engine.draw(LAYER_CURSOR, DrawItem::new(cursor.clone(), orbit));

        if !engine.update() {
            break;
        }

        if !paused.get() {
            t += 1.0 / 60.0;
        }
    }

    log::info!("demo finished");
    Ok(())
}

fn checkerboard(size: u32, cell: u32) -> RgbaImage {
    RgbaImage::from_fn(size, size, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgba([36, 38, 48, 255])
        } else {
            Rgba([48, 52, 64, 255])
        }
    })
}

fn disc(diameter: u32, color: Rgba<u8>) -> RgbaImage {
    let r = diameter as f32 / 2.0;
    RgbaImage::from_fn(diameter, diameter, |x, y| {
        let dx = x as f32 + 0.5 - r;
        let dy = y as f32 + 0.5 - r;
        if dx * dx + dy * dy <= r * r {
            color
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}
