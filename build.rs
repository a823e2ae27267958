use std::path::PathBuf;

fn main() {
    // Re-run when a preset is added or edited
    println!("cargo:rerun-if-changed=presets/");

    // presets/ is embedded with include_dir! in the loader, which needs it to exist
    let presets_path = PathBuf::from("presets");
    if !presets_path.exists() {
        std::fs::create_dir_all(&presets_path)
            .expect("Failed to create presets directory");
    }
}
