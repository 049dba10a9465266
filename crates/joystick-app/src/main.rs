//! Scripted joystick demo (native).

#[cfg(feature = "native")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use joystick_core::JoystickConfig;

    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading config from {}", path);
            JoystickConfig::from_json(&std::fs::read_to_string(&path)?)?
        }
        None => JoystickConfig::from_json(joystick_app::DEMO_CONFIG)?,
    };

    for status in joystick_app::run_demo(config)? {
        println!("{}", serde_json::to_string(&status)?);
    }
    Ok(())
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
