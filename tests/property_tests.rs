use labelproj::manifest::{ImageEntry, Manifest};
use labelproj::reconcile;
use labelproj::scanner::is_image_name;
use proptest::prelude::*;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

fn file_name() -> impl Strategy<Value = String> {
    ("[a-z]{1,6}", prop::sample::select(vec!["png", "JPG", "gif", "txt", "webp"]))
        .prop_map(|(stem, ext)| format!("{stem}.{ext}"))
}

fn json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::from),
    ]
}

fn extra_fields() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::vec(("[a-z]{1,8}", json_leaf()), 0..5).prop_map(|pairs| {
        pairs
            .into_iter()
            .filter(|(key, _)| key != "images" && key != "fileName")
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_cleanup_restores_invariant(
        listed in prop::collection::btree_set(file_name(), 0..8),
        on_disk in prop::collection::btree_set(file_name(), 0..8),
    ) {
        // Invariant after cleanup: manifest names == image files on disk
        let dir = TempDir::new().unwrap();
        let mut manifest = Manifest::new();
        for name in &listed {
            manifest.push_image(ImageEntry::new(name.clone()));
        }
        manifest.save(dir.path()).unwrap();
        for name in &on_disk {
            fs::write(dir.path().join(name), name.as_bytes()).unwrap();
        }

        reconcile::cleanup(dir.path()).unwrap();

        let kept: BTreeSet<String> = Manifest::load(dir.path())
            .unwrap()
            .images
            .into_iter()
            .map(|img| img.file_name)
            .collect();
        let expected: BTreeSet<String> = listed.intersection(&on_disk).cloned().collect();
        prop_assert_eq!(&kept, &expected);

        for name in &on_disk {
            let present = dir.path().join(name).exists();
            let should_remain = listed.contains(name) || !is_image_name(name);
            prop_assert_eq!(present, should_remain, "{}", name);
        }

        let second = reconcile::cleanup(dir.path()).unwrap();
        prop_assert!(!second.changed());
    }

    #[test]
    fn test_save_load_preserves_fields(
        names in prop::collection::vec(file_name(), 0..6),
        top in extra_fields(),
        per_entry in extra_fields(),
    ) {
        let dir = TempDir::new().unwrap();
        let manifest = Manifest {
            images: names
                .iter()
                .map(|name| ImageEntry {
                    file_name: name.clone(),
                    extra: per_entry.clone(),
                })
                .collect(),
            extra: top,
        };

        manifest.save(dir.path()).unwrap();
        let loaded = Manifest::load(dir.path()).unwrap();
        prop_assert_eq!(loaded, manifest);
    }
}
