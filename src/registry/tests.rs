use super::*;
use crate::credentials::GoogleCredentials;
use crate::testing::default_service_account_json;

fn options() -> FirebaseOptions {
    let credentials = GoogleCredentials::from_json(&default_service_account_json()).unwrap();
    FirebaseOptions::builder()
        .set_credentials(credentials)
        .build()
        .unwrap()
}

#[test]
fn test_initialize_default_app() {
    let registry = AppRegistry::new();
    assert!(registry.is_empty());

    let app = registry.initialize_app(options()).unwrap();
    assert_eq!(app.name(), DEFAULT_APP_NAME);
    assert!(app.is_default_app());
    assert_eq!(registry.len(), 1);
    assert!(registry.default_app().unwrap().ptr_eq(&app));
}

#[test]
fn test_duplicate_names_are_rejected() {
    let registry = AppRegistry::new();
    registry.initialize_app(options()).unwrap();

    let err = registry.initialize_app(options()).unwrap_err();
    assert!(matches!(err, FiretorError::DuplicateApp(ref name) if name == DEFAULT_APP_NAME));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_named_apps() {
    let registry = AppRegistry::new();
    registry.initialize_app_with_name(options(), " secondary ").unwrap();
    registry.initialize_app(options()).unwrap();

    let names: Vec<String> = registry.apps().iter().map(|a| a.name().to_string()).collect();
    assert_eq!(names, vec![DEFAULT_APP_NAME.to_string(), "secondary".to_string()]);
    assert!(!registry.get_app("secondary").unwrap().is_default_app());

    assert!(matches!(
        registry.initialize_app_with_name(options(), "  "),
        Err(FiretorError::InvalidAppName)
    ));
    assert!(matches!(registry.get_app("missing"), Err(FiretorError::AppNotFound(_))));
}

#[test]
fn test_initialize_if_empty_is_a_no_op_when_populated() {
    let registry = AppRegistry::new();
    let first = registry.initialize_if_empty(options()).unwrap();
    assert!(registry.initialize_if_empty(options()).is_none());

    assert_eq!(registry.len(), 1);
    assert!(registry.default_app().unwrap().ptr_eq(&first));

    // Any registered app counts, not only the default one.
    let other = AppRegistry::new();
    other.initialize_app_with_name(options(), "named").unwrap();
    assert!(other.initialize_if_empty(options()).is_none());
    assert!(other.default_app().is_err());
}

#[test]
fn test_initialize_if_empty_concurrently() {
    let registry = Arc::new(AppRegistry::new());

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let registry = registry.clone();
            std::thread::spawn(move || registry.initialize_if_empty(options()).is_some())
        })
        .collect();

    let initialized = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|created| *created)
        .count();

    assert_eq!(initialized, 1);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_delete_and_reset() {
    let registry = AppRegistry::new();
    registry.initialize_app(options()).unwrap();
    registry.initialize_app_with_name(options(), "other").unwrap();

    registry.delete_app("other").unwrap();
    assert!(matches!(registry.delete_app("other"), Err(FiretorError::AppNotFound(_))));
    assert_eq!(registry.len(), 1);

    registry.reset();
    assert!(registry.is_empty());
    assert!(registry.initialize_app(options()).is_ok());
}

#[test]
fn test_global_registry_is_shared() {
    assert!(Arc::ptr_eq(&AppRegistry::global(), &AppRegistry::global()));
}
