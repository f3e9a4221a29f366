use booth_nav::{SlideList, discover_assets, discover_assets_sync};
use std::fs;

#[tokio::test]
async fn test_discover_assets_filters_directory() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["slide10.jpg", "slide2.png", "slide1.webp", ".hidden.jpg", "notes.txt"] {
        fs::write(dir.path().join(name), b"not really an image").unwrap();
    }
    fs::create_dir(dir.path().join("nested.jpg")).unwrap();

    let assets = discover_assets(dir.path()).await;

    assert_eq!(assets.len(), 3);
    let list = SlideList::build(&assets, 1);
    let ids: Vec<_> = list.slides().iter().map(|slide| slide.id()).collect();
    assert_eq!(ids, vec!["slide1.webp", "slide2.png", "slide10.jpg"]);
}

#[test]
fn test_missing_directory_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let assets = discover_assets_sync(&missing);

    assert!(assets.is_empty());
    assert!(SlideList::build(&assets, 1).is_placeholder());
}

#[test]
fn test_sources_are_absolute_paths() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("promo.jpg"), b"x").unwrap();

    let assets = discover_assets_sync(dir.path());
    let src = assets.values().next().unwrap();

    assert!(std::path::Path::new(src).is_absolute());
    assert!(src.ends_with("promo.jpg"));
}
