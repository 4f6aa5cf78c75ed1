pub mod settings;

// Re-export commonly used types
pub use settings::{
    BoxSettings, ConfigError, ConfigResult, SimulationSettings, WorldSettings,
    load_simulation_settings, load_simulation_settings_from, save_simulation_settings,
    save_simulation_settings_to,
};
