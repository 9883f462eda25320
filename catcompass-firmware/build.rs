//! Build script for catcompass-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates face.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use catcompass_core::config::FaceConfig;

/// Keys accepted in each table of face.toml
const ROOT_KEYS: &[&str] = &["heading_smoothing", "bezel_sensitivity"];
const SECTION_KEYS: &[(&str, &[&str])] = &[
    ("gesture", &["long_press_ms", "double_tap_ms", "confirm_slack_ms"]),
    (
        "chase",
        &[
            "catch_threshold",
            "motion_epsilon",
            "idle_timeout_ms",
            "evader_speed_factor",
            "reference_tick_ms",
            "evader_start_fraction",
            "timeout_ms",
        ],
    ),
    (
        "burst",
        &[
            "duration_ms",
            "particle_count",
            "min_speed",
            "max_speed",
            "gravity",
            "drag",
        ],
    ),
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate face.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=face.toml");

    let config_path = Path::new("face.toml");

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read face.toml", &[e.to_string()]),
    };

    // Parse and validate TOML syntax
    let value: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail("Invalid TOML syntax in face.toml", &[e.message().to_string()]),
    };

    let errors = unknown_keys(&value);
    if !errors.is_empty() {
        fail("Unknown keys in face.toml", &errors);
    }

    // Type check every value against FaceConfig
    let config: FaceConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => fail("Invalid value in face.toml", &[e.message().to_string()]),
    };

    if let Err(e) = config.validate() {
        fail("Inconsistent face configuration", &[format!("{:?}", e)]);
    }
}

/// Keys the firmware parser would reject
fn unknown_keys(value: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(root) = value.as_table() else {
        errors.push("top level must be a table".to_string());
        return errors;
    };

    for (key, item) in root {
        if ROOT_KEYS.contains(&key.as_str()) {
            continue;
        }

        let Some((_, allowed)) = SECTION_KEYS.iter().find(|(name, _)| *name == key) else {
            errors.push(format!("unknown key '{}'", key));
            continue;
        };

        let Some(table) = item.as_table() else {
            errors.push(format!("[{}] must be a table", key));
            continue;
        };

        for field in table.keys() {
            if !allowed.contains(&field.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", key, field));
            }
        }
    }

    errors
}

fn fail(title: &str, details: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        details
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
