//! Solo Pong entry point
//!
//! Native builds play in the terminal. The web build starts from
//! `platform::web::wasm_main` in the library.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Solo Pong (native) starting...");

    let settings = solo_pong::Settings::load();
    if let Err(e) = solo_pong::platform::native::run(&settings) {
        log::error!("Solo Pong failed: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
