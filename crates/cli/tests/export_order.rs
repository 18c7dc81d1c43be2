use std::fs;
use std::path::{Path, PathBuf};

use tillbook_cli::{Settings, export_order};

fn demos() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos")
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tillbook-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn demo_order_is_written_as_html_and_pdf() {
    let out_dir = scratch_dir("demo");
    let settings = Settings {
        profile: Some(demos().join("profile.json")),
        catalog: Some(demos().join("price_list.json")),
        font: None,
        out_dir: out_dir.clone(),
    };

    let exported = export_order(&settings, &demos().join("order.json")).unwrap();

    assert_eq!(exported.html, out_dir.join("SR-20250307-007.html"));
    let html = fs::read_to_string(&exported.html).unwrap();
    assert!(html.contains("SR Markt"));
    assert!(html.contains("Crème fraîche"));
    assert!(html.contains("Fish &amp; Chips Lane 3"));
    assert!(html.contains("<td>Flowers</td>"));

    let pdf = fs::read(&exported.pdf).unwrap();
    assert!(pdf.starts_with(b"%PDF"));

    let _ = fs::remove_dir_all(&out_dir);
}

#[test]
fn missing_profile_is_reported_with_its_path() {
    let settings = Settings {
        profile: Some(PathBuf::from("/nonexistent/profile.json")),
        catalog: None,
        font: None,
        out_dir: scratch_dir("missing"),
    };

    let err = export_order(&settings, &demos().join("order.json")).unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/profile.json"));
}
