//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `quire_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use quire_core::storage::SqliteSlotStore;
use quire_core::tool::{PointerButton, PointerEvent};
use quire_core::{open_db_in_memory, EditorSession, RecordingSurface, Surface};

fn main() {
    println!("quire_core version={}", quire_core::core_version());

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("quire_cli: failed to open slot database: {err}");
            std::process::exit(1);
        }
    };
    let mut session = match EditorSession::new(SqliteSlotStore::new(&conn)) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("quire_cli: failed to start editor session: {err}");
            std::process::exit(1);
        }
    };

    let mut surface = RecordingSurface::new(0, 0);
    session.area_mut().redraw(&mut surface);
    let (width, height) = surface.size();
    println!("quire_core page={width}x{height}");

    let events = [
        PointerEvent::Down {
            x: 10.0,
            y: 10.0,
            button: PointerButton::Primary,
        },
        PointerEvent::Move { x: 40.0, y: 30.0 },
        PointerEvent::Up { x: 80.0, y: 60.0 },
    ];
    for event in events {
        if let Err(err) = session.pointer_event(event, &mut surface) {
            eprintln!("quire_cli: failed to persist stroke: {err}");
            std::process::exit(1);
        }
    }

    let strokes = session
        .area()
        .current_page()
        .and_then(|page| page.layer(0))
        .map_or(0, |layer| layer.item_count());
    println!(
        "quire_core strokes={strokes} saved={}",
        session.mtime() > 0
    );
}
