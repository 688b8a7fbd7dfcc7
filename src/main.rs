// PPU Core - headless runner
//
// Loads `ppu_config.toml` (or the path given as the first argument), drives
// the PPU for the configured number of frames while acting as the CPU side
// of the NMI line, and reports what happened.

use ppu_core::config::{CoreConfig, CONFIG_FILE};
use ppu_core::{
    save_screenshot, FrameBuffer, InterruptFlags, MemoryMappedDevice, Ppu, PpuState,
    SharedInterruptFlags,
};
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| CONFIG_FILE.to_string());
    let config = match CoreConfig::load_or_default(&config_path) {
        Ok(config) => config,
        Err(e) => {
            // Tracing is configured from this file, so report directly
            eprintln!("Failed to load configuration '{}': {}", config_path, e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log.level);
    info!("PPU Core v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded from '{}'", config_path);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn init_tracing(level: &str) {
    let level = level.parse::<Level>().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    // Only fails if a subscriber is already installed
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(config: &CoreConfig) -> Result<(), u8> {
    let nmi = SharedInterruptFlags::new();

    let ppu = if config.video.headless {
        Ppu::init(config.video.mirroring, nmi.clone())
    } else {
        let surface = FrameBuffer::try_new_shared().map_err(|e| {
            error!("Failed to allocate presentation buffer: {}", e);
            1u8
        })?;
        Ppu::init_with_surface(config.video.mirroring, nmi.clone(), surface)
    };
    let mut ppu = ppu.map_err(|e| {
        error!("PpuInit: {}", e);
        e.code() as u8
    })?;

    if config.run.nmi_enabled {
        // $2000 through the CPU bus, bit 7 = NMI on VBlank
        ppu.write(0x2000, 0x80);
    }

    let mut nmi_count = 0u32;
    for _ in 0..config.run.frames {
        while !ppu.step() {
            if nmi.pending().contains(InterruptFlags::NMI) {
                nmi.clear(InterruptFlags::NMI);
                nmi_count += 1;
            }
        }
    }

    info!(
        "Ran {} frames ({} PPU cycles), {} NMIs serviced",
        ppu.frame_count(),
        ppu.cycles(),
        nmi_count
    );

    if config.run.screenshot {
        let saved = ppu.with_frame(|frame| save_screenshot(frame, &config.run.screenshot_directory));
        match saved {
            Ok(path) => info!("Screenshot saved to {}", path.display()),
            Err(e) => error!("Screenshot failed: {}", e),
        }
    }

    let state = PpuState::capture(&ppu);
    if config.log.json_state {
        match state.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to encode state: {}", e),
        }
    } else {
        print!("{}", state.format());
    }

    Ok(())
}
