// tests/log_path.rs

use std::path::{Path, PathBuf};

use proptest::prelude::*;
use surfigures::exec::log_path_for;

#[test]
fn replaces_extension_with_log() {
    assert_eq!(log_path_for(Path::new("out.obj")), PathBuf::from("out.log"));
    assert_eq!(log_path_for(Path::new("out")), PathBuf::from("out.log"));
    assert_eq!(log_path_for(Path::new("a.b.obj")), PathBuf::from("a.b.log"));
    assert_eq!(
        log_path_for(Path::new("results/bunny.ply")),
        PathBuf::from("results/bunny.log")
    );
}

proptest! {
    #[test]
    fn log_sits_next_to_output_with_same_stem(
        dirs in proptest::collection::vec("[a-z][a-z0-9_]{0,6}", 0..3),
        stem in "[a-zA-Z][a-zA-Z0-9_-]{0,10}",
        ext in proptest::option::of("[a-z0-9]{1,4}"),
    ) {
        let mut output: PathBuf = dirs.iter().collect();
        let file_name = match &ext {
            Some(ext) => format!("{stem}.{ext}"),
            None => stem.clone(),
        };
        output.push(&file_name);

        let log = log_path_for(&output);

        prop_assert_eq!(log.parent(), output.parent());
        prop_assert_eq!(log.file_stem(), output.file_stem());
        prop_assert_eq!(log.extension().and_then(|e| e.to_str()), Some("log"));
        let expected_name = format!("{stem}.log");
        prop_assert_eq!(log.file_name().and_then(|n| n.to_str()), Some(expected_name.as_str()));
    }
}
