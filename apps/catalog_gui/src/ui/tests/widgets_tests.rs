use super::*;

#[test]
fn logo_urls_are_requested_once() {
    let mut cache = LogoCache::default();
    assert!(cache.texture("https://cdn/a.png").is_none());
    assert!(cache.texture("https://cdn/a.png").is_none());
    assert!(cache.texture("").is_none());
    assert_eq!(cache.take_requests(), vec!["https://cdn/a.png".to_string()]);
    assert!(cache.take_requests().is_empty());
    assert!(cache.is_pending("https://cdn/a.png"));
}

#[test]
fn failed_logos_stay_quiet_until_forgotten() {
    let mut cache = LogoCache::default();
    let _ = cache.texture("https://cdn/b.png");
    let _ = cache.take_requests();
    cache.mark_failed("https://cdn/b.png".to_string());
    assert!(cache.texture("https://cdn/b.png").is_none());
    assert!(cache.take_requests().is_empty());

    cache.forget_failures();
    let _ = cache.texture("https://cdn/b.png");
    assert_eq!(cache.take_requests(), vec!["https://cdn/b.png".to_string()]);
}

#[test]
fn loaded_logo_becomes_a_texture() {
    let ctx = egui::Context::default();
    let mut cache = LogoCache::default();
    let image = LogoImage {
        width: 1,
        height: 1,
        rgba: vec![0, 0, 0, 255],
    };
    cache.insert_loaded(&ctx, "https://cdn/c.png".to_string(), &image);
    let texture = cache.texture("https://cdn/c.png").expect("texture");
    assert_eq!(texture.size(), [1, 1]);
}

#[test]
fn toast_expires() {
    let mut toast = Toast::default();
    toast.show_message("Copied port to clipboard", 10.0);
    assert_eq!(toast.message(11.0), Some("Copied port to clipboard"));
    assert_eq!(toast.message(12.5), None);
}
