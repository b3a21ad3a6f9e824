//! End-to-end behavior of the store, registry and components together.

use std::cell::Cell;
use std::rc::Rc;

use evolution_theme::prelude::*;
use evolution_theme::{
    install_style_sheet, register_theme, uninstall_style_sheet, with_style_sheet, RegistryError,
};
use proptest::prelude::*;
use serial_test::serial;

fn store_over(storage: MemoryStorage, root: DocumentRoot) -> ThemeStore {
    ThemeStore::builder()
        .storage(storage)
        .surface(root)
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn set_then_get_returns_key(key in "[a-z][a-z0-9-]{0,15}") {
        let store = ThemeStore::builder().build().unwrap();
        store.set_theme(&key).unwrap();
        let theme = store.theme();
        prop_assert_eq!(theme.as_str(), key.as_str());
    }

    #[test]
    fn fresh_store_reads_persisted_key(key in "[a-z][a-z0-9-]{0,15}") {
        let storage = MemoryStorage::new();
        store_over(storage.clone(), DocumentRoot::new()).set_theme(&key).unwrap();

        let reloaded = store_over(storage, DocumentRoot::new());
        let theme = reloaded.theme();
        prop_assert_eq!(theme.as_str(), key.as_str());
    }
}

#[test]
fn persisted_key_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings").join("theme.json");

    let first = ThemeStore::builder()
        .storage(JsonFileStorage::new(&path))
        .build()
        .unwrap();
    first.set_theme("midnight").unwrap();
    drop(first);

    let second = ThemeStore::builder()
        .storage(JsonFileStorage::new(&path))
        .build()
        .unwrap();
    assert_eq!(second.theme(), "midnight");
}

#[test]
fn default_applies_without_persisted_value() {
    let root = DocumentRoot::new();
    let store = ThemeStore::builder()
        .default_theme("dark")
        .surface(root.clone())
        .build()
        .unwrap();

    assert_eq!(store.theme(), "dark");
    assert_eq!(root.attribute("data-theme").as_deref(), Some("dark"));
}

#[test]
fn storage_key_isolates_stores() {
    let storage = MemoryStorage::new();
    let admin = ThemeStore::builder()
        .storage_key("admin-theme")
        .storage(storage.clone())
        .build()
        .unwrap();
    admin.set_theme("tron").unwrap();

    let site = ThemeStore::builder()
        .storage_key("site-theme")
        .default_theme("forest")
        .storage(storage)
        .build()
        .unwrap();
    assert_eq!(site.theme(), "forest");
}

#[test]
fn reregistering_replaces_rule() {
    let store = ThemeStore::builder().build().unwrap();
    let mut provider = ThemeProvider::new(store).unwrap();

    provider.register_theme("ocean", [("color-bg", "#000")]).unwrap();
    provider.register_theme("ocean", [("color-bg", "#111")]).unwrap();

    let sheet = provider.registry().sheet();
    assert_eq!(sheet.len(), 1);
    assert_eq!(
        provider.registry().rule_for("ocean"),
        Some("[data-theme=\"ocean\"] {\n  --color-bg: #111;\n}")
    );
}

#[test]
#[serial]
fn global_registration_replaces_rule() {
    install_style_sheet(HeadStyleSheet::new());

    register_theme("ocean", [("color-bg", "#000")]).unwrap();
    register_theme("ocean", [("color-bg", "#111")]).unwrap();

    let rule = with_style_sheet(|sheet| sheet.rule("etn-theme-ocean").map(str::to_string));
    assert_eq!(
        rule.flatten().as_deref(),
        Some("[data-theme=\"ocean\"] {\n  --color-bg: #111;\n}")
    );
    uninstall_style_sheet();
}

#[test]
#[serial]
fn global_registration_without_sheet_fails() {
    uninstall_style_sheet();
    let result = register_theme("ocean", [("color-bg", "#000")]);
    assert!(matches!(result, Err(RegistryError::SurfaceUnavailable)));
}

#[test]
fn selector_marks_active_option() {
    let store = ThemeStore::builder().default_theme("dark").build().unwrap();
    let provider = ThemeProvider::new(store).unwrap();
    let selector = ThemeSelector::new()
        .themes(ThemeOptions::from_pairs([("Light", "light"), ("Dark", "dark")]).unwrap());

    let html = provider.render_selector(&selector).unwrap();
    assert!(html.contains(r#"<option value="light">Light</option>"#));
    assert!(html.contains(r#"<option value="dark" selected>Dark</option>"#));
}

#[test]
fn selector_change_rerenders_with_new_selection() {
    let store = ThemeStore::builder().build().unwrap();
    let provider = ThemeProvider::new(store).unwrap();
    let selector = ThemeSelector::new();

    selector.on_change(provider.store(), "forest").unwrap();

    let html = provider.render_selector(&selector).unwrap();
    assert!(html.contains(r#"<option value="forest" selected>Forest</option>"#));
    assert!(html.contains(r#"<option value="light">Light Theme</option>"#));
}

#[test]
fn navbar_click_handler_suppresses_navigation() {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let navbar = ThemeNavBar::new().links(vec![
        NavLink::new("Home", "/").on_click(move || counter.set(counter.get() + 1))
    ]);

    assert_eq!(navbar.click(LinkTarget::Link(0)), Some(Navigation::Handled));
    assert_eq!(calls.get(), 1);
}

#[test]
fn navbar_link_without_handler_navigates() {
    let navbar = ThemeNavBar::new().links(vec![NavLink::new("Home", "/")]);
    assert_eq!(
        navbar.click(LinkTarget::Link(0)),
        Some(Navigation::Follow("/".to_string()))
    );
}

#[test]
fn navbar_embeds_selector_bound_to_store() {
    let store = ThemeStore::builder().default_theme("midnight").build().unwrap();
    let provider = ThemeProvider::new(store).unwrap();

    let html = provider
        .render_navbar(&ThemeNavBar::new().title("Atlas"))
        .unwrap();
    assert!(html.contains(r#"<span class="etn-navbar-brand">Atlas</span>"#));
    assert!(html.contains(r#"<option value="midnight" selected>Midnight</option>"#));
}

#[test]
fn propagation_is_idempotent() {
    let root = DocumentRoot::new();
    let store = store_over(MemoryStorage::new(), root.clone());
    assert_eq!(root.writes(), 1);

    assert!(!store.apply());
    assert!(!store.apply());
    assert_eq!(root.writes(), 1);
    assert_eq!(root.attribute("data-theme").as_deref(), Some("light"));
}

#[test]
fn setting_active_theme_again_changes_nothing_visible() {
    let root = DocumentRoot::new();
    let store = store_over(MemoryStorage::new(), root.clone());
    let notified = Rc::new(Cell::new(0));
    let counter = notified.clone();
    store.subscribe(move |_| counter.set(counter.get() + 1));

    store.set_theme("dark").unwrap();
    store.set_theme("dark").unwrap();

    assert_eq!(notified.get(), 1);
    assert_eq!(root.writes(), 2);
}

#[test]
fn blank_key_is_rejected() {
    let storage = MemoryStorage::new();
    let store = store_over(storage.clone(), DocumentRoot::new());
    store.set_theme("forest").unwrap();

    assert_eq!(store.set_theme("  "), Err(ThemeError::EmptyKey));
    assert_eq!(store.theme(), "forest");
    assert_eq!(storage.get("etn-theme").unwrap().as_deref(), Some("forest"));
}

#[test]
fn stores_sharing_a_key_last_write_wins() {
    let storage = MemoryStorage::new();
    let a = store_over(storage.clone(), DocumentRoot::new());
    let b = store_over(storage.clone(), DocumentRoot::new());

    a.set_theme("tron").unwrap();
    b.set_theme("forest").unwrap();

    assert_eq!(store_over(storage, DocumentRoot::new()).theme(), "forest");
}
