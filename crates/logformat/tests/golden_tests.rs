use logformat::{Options, Recorder};
use std::fs;
use std::path::Path;

#[test]
fn run_golden_tests() {
    let fixtures_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let mut checked = 0;

    for entry in fs::read_dir(&fixtures_dir).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().is_none_or(|ext| ext != "fmt") {
            continue;
        }

        let content = fs::read_to_string(&path).expect("Failed to read format");
        let format = content.trim_end_matches(['\r', '\n']);

        let mut recorder = Recorder::new();
        logformat::parse(format, &mut recorder, &Options::default())
            .unwrap_or_else(|e| panic!("{:?} failed to parse: {}", path, e));
        let actual = serde_json::to_value(recorder.events()).expect("Failed to serialize events");

        let golden_path = path.with_extension("golden.json");
        if std::env::var("UPDATE_GOLDEN").is_ok() {
            let json = serde_json::to_string_pretty(&actual).unwrap();
            fs::write(&golden_path, json).expect("Failed to update golden file");
        } else {
            let expected = fs::read_to_string(&golden_path)
                .expect("Failed to read golden file (run with UPDATE_GOLDEN=1 to create)");
            let expected: serde_json::Value =
                serde_json::from_str(&expected).expect("Golden file is not JSON");
            assert_eq!(actual, expected, "Golden test failed for {:?}", path);
        }
        checked += 1;
    }

    assert!(checked > 0, "no fixtures under {:?}", fixtures_dir);
}
