use std::path::PathBuf;

#[test]
fn demo_design_files_load() {
    let crate_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let root = crate_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root");

    let path = root.join("demos/ethanol_demo.yaml");
    let file = rp_project::load_yaml(&path)
        .unwrap_or_else(|e| panic!("demo failed to load: {} => {e}", path.display()));

    assert_eq!(file.designs.len(), 2);
    assert!(file.sweep("mr").is_some());
    for sweep in &file.sweeps {
        sweep.to_definition().unwrap();
    }
}
