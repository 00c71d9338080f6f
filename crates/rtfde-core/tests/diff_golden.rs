use std::fs;
use std::path::Path;

use rtfde_core::{tree_diff, tree_value_diff, Tree};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Fixture {
    original: Tree,
    revised: Tree,
    tree_diff: String,
    value_diff: String,
}

fn load_fixture(path: &Path) -> Fixture {
    let data = fs::read_to_string(path).expect("fixture should be readable");
    serde_json::from_str(&data).expect("fixture should deserialize")
}

#[test]
fn tree_diff_golden_parity() {
    let fixtures_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/tree_diff");
    let mut entries: Vec<_> = fs::read_dir(&fixtures_root)
        .expect("fixtures directory must exist")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    entries.sort();

    assert!(
        !entries.is_empty(),
        "expected at least one diff fixture under tests/fixtures/tree_diff",
    );

    for path in entries {
        let fixture = load_fixture(&path);
        assert_eq!(tree_diff(&fixture.original, &fixture.revised), fixture.tree_diff, "{path:?}");
        assert_eq!(
            tree_value_diff(&fixture.original, &fixture.revised),
            fixture.value_diff,
            "{path:?}"
        );
        assert_eq!(tree_diff(&fixture.revised, &fixture.revised), "", "{path:?}");
    }
}
