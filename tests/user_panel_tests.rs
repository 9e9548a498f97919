/// User panel tests
///
/// Create, duplicate guard, toggle, removal and bulk clear for the admin panel
/// Run with: cargo test --test user_panel_tests

use panelstore::model::validate::USERNAME_MESSAGE;
use panelstore::storage::EXTERNAL_WRITER;
use panelstore::{
    PanelConfig, RecordStore, Role, StorageArea, StatusFilter, User, UserEdit, UserForm,
    UserPanel, UserStatus,
};

fn setup_panel() -> UserPanel {
    UserPanel::open(StorageArea::in_memory(), &PanelConfig::default()).unwrap()
}

#[test]
fn test_create_then_load_puts_user_first() {
    let area = StorageArea::in_memory();
    let config = PanelConfig::default();
    let mut panel = UserPanel::open(area.clone(), &config).unwrap();

    let created = panel
        .add_user(&UserForm::new(" alice@nexoria.com", "alice", "Editor"))
        .unwrap();

    let store: RecordStore<User> = RecordStore::open(area, &config.users_key);
    let loaded = store.load();
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded[0], created);
    assert_eq!(loaded[0].email, "alice@nexoria.com");
    assert_eq!(loaded[0].role, Role::Editor);
    assert_eq!(loaded[0].status, UserStatus::Pending);
}

#[test]
fn test_duplicate_email_rejected() {
    let mut panel = setup_panel();
    let before = panel.records().to_vec();

    let err = panel
        .add_user(&UserForm::new("admin@nexoria.com", "another", "User"))
        .unwrap_err();

    let errors = err.field_errors().unwrap();
    assert_eq!(errors.message_for("email"), Some("Email already exists."));
    assert_eq!(panel.records(), before.as_slice());
}

#[test]
fn test_invalid_form_leaves_store_unchanged() {
    let mut panel = setup_panel();
    let err = panel
        .add_user(&UserForm::new("bad", "a b", "superuser"))
        .unwrap_err();

    assert_eq!(err.field_errors().unwrap().len(), 3);
    assert_eq!(panel.len(), 2);
}

#[test]
fn test_update_rejects_invalid_fields() {
    let area = StorageArea::in_memory();
    let config = PanelConfig::default();
    let mut panel = UserPanel::open(area.clone(), &config).unwrap();
    let raw_before = area.get_item(&config.users_key).unwrap();

    let err = panel
        .update_user("user@nexoria.com", &UserEdit::new("a b", "nope"))
        .unwrap_err();

    let errors = err.field_errors().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.message_for("username"), Some(USERNAME_MESSAGE));
    assert_eq!(errors.message_for("role"), Some("Select a role."));

    let user = panel.find("user@nexoria.com").unwrap();
    assert_eq!(user.username, "user01");
    assert_eq!(user.role, Role::User);
    assert_eq!(area.get_item(&config.users_key).unwrap(), raw_before);
}

#[test]
fn test_unknown_role_skips_only_that_user() {
    let area = StorageArea::in_memory();
    let config = PanelConfig::default();
    let raw = r#"[
        {"email":"keep@nexoria.com","username":"keeper","role":"Admin","status":"Active"},
        {"email":"odd@nexoria.com","username":"oddone","role":"Viewer","status":"Pending"}
    ]"#;
    area.set_item(&config.users_key, raw, EXTERNAL_WRITER).unwrap();

    let panel = UserPanel::open(area.clone(), &config).unwrap();
    let emails: Vec<&str> = panel.records().iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, vec!["keep@nexoria.com"]);

    // Not reseeded: the slot still holds what was written.
    assert_eq!(area.get_item(&config.users_key).unwrap().as_deref(), Some(raw));
}

#[test]
fn test_toggle_flips_status() {
    let mut panel = setup_panel();

    let status = panel.toggle_status("admin@nexoria.com").unwrap();
    assert_eq!(status, Some(UserStatus::Pending));

    let status = panel.toggle_status("user@nexoria.com").unwrap();
    assert_eq!(status, Some(UserStatus::Active));

    assert_eq!(panel.toggle_status("ghost@nexoria.com").unwrap(), None);
}

#[test]
fn test_remove_missing_email_is_noop() {
    let area = StorageArea::in_memory();
    let config = PanelConfig::default();
    let mut panel = UserPanel::open(area.clone(), &config).unwrap();
    let raw_before = area.get_item(&config.users_key).unwrap();

    assert!(!panel.remove_user("ghost@nexoria.com").unwrap());
    assert_eq!(area.get_item(&config.users_key).unwrap(), raw_before);

    assert!(panel.remove_user("user@nexoria.com").unwrap());
    assert!(!panel.remove_user("user@nexoria.com").unwrap());
    assert_eq!(panel.len(), 1);
}

#[test]
fn test_clear_all_persists_empty_list() {
    let area = StorageArea::in_memory();
    let config = PanelConfig::default();
    let mut panel = UserPanel::open(area.clone(), &config).unwrap();

    panel.clear_all().unwrap();
    assert!(panel.is_empty());
    assert_eq!(area.get_item(&config.users_key).unwrap().as_deref(), Some("[]"));

    let page = panel.render();
    assert_eq!(page.placeholder, Some("No users match this filter."));
}

#[test]
fn test_cleared_store_is_reseeded_on_next_open() {
    let area = StorageArea::in_memory();
    let config = PanelConfig::default();
    UserPanel::open(area.clone(), &config).unwrap().clear_all().unwrap();

    let reopened = UserPanel::open(area, &config).unwrap();
    assert_eq!(reopened.len(), 2);
}

#[test]
fn test_status_filter_and_search() {
    let mut panel = setup_panel();
    panel.add_user(&UserForm::new("ops@nexoria.com", "ops_team", "Admin")).unwrap();

    panel.set_filter(StatusFilter::Only(UserStatus::Pending));
    let pending: Vec<String> = panel.render().items.into_iter().map(|u| u.username).collect();
    assert_eq!(pending, vec!["ops_team".to_string(), "user01".to_string()]);

    panel.set_search("ADMIN");
    let page = panel.render();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].username, "ops_team");

    panel.set_filter(StatusFilter::All);
    assert_eq!(panel.render().items.len(), 2);
}
