// End-to-end console flows against the in-memory backend

use std::sync::Arc;

use rust_decimal::Decimal;

use oea_admin::AdminApp;
use oea_admin::core::navigation::{RecordingNavigator, Route};
use oea_admin::core::notify::RecordingNotifier;
use oea_backend_mock::{MockAuthApi, MockImageStorage, MockProductApi};
use oea_client::types::UploadFile;
use shared::models::Variant;

struct Console {
    products: Arc<MockProductApi>,
    storage: Arc<MockImageStorage>,
    notifier: Arc<RecordingNotifier>,
    navigator: Arc<RecordingNavigator>,
    app: AdminApp,
}

fn console() -> Console {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let auth = Arc::new(MockAuthApi::new().with_user("admin@oea.io", "secret"));
    let products = Arc::new(MockProductApi::new());
    let storage = Arc::new(MockImageStorage::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let navigator = Arc::new(RecordingNavigator::new());

    let app = AdminApp::new(
        auth,
        products.clone(),
        storage.clone(),
        notifier.clone(),
        navigator.clone(),
    );

    Console {
        products,
        storage,
        notifier,
        navigator,
        app,
    }
}

fn image(name: &str) -> UploadFile {
    UploadFile::new(name, "image/jpeg", vec![0xFF, 0xD8, 0xFF])
}

#[tokio::test]
async fn test_login_create_edit_delete_round_trip() {
    let c = console();

    // login lands on the product list
    c.app.auth.login("admin@oea.io", "secret").await.unwrap();
    assert_eq!(c.navigator.last(), Some(Route::Products { page: 0 }));

    let mut list = c.app.product_list();
    assert!(list.refresh().await.unwrap().items.is_empty());

    // the create screen keeps fast and normal drafts isolated
    let mut forms = c.app.create_forms();
    forms.fast.set_product_name("快速商品");
    assert_eq!(forms.normal.draft().product_name, "");

    // fill the normal form: one image, one variant
    let form = &mut forms.normal;
    form.set_product_name("Widget");
    form.set_product_tags("toys");
    form.select_images(vec![image("front.jpg")]).unwrap();
    form.add_variant(Variant::new("One size", 5, Decimal::new(990, 2)));

    // the user had browsed to page 2 before creating
    list.set_page(2);

    let created = c.app.orchestrator.submit(form).await.unwrap();
    assert_eq!(c.storage.uploads(), vec!["front.jpg".to_string()]);
    assert_eq!(c.navigator.last(), Some(Route::Products { page: 2 }));
    assert!(list.is_stale());

    list.set_page(0);
    let page = list.refresh().await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].product_name, "Widget");
    assert_eq!(page.items[0].inventory_quantity, 5);
    assert_eq!(
        page.items[0].product_images,
        vec![MockImageStorage::url_for("front.jpg")]
    );

    // edit: load the record, rename, submit
    let snapshot = Arc::new(page.items[0].clone());
    let mut edit = c.app.edit_form(snapshot.id.clone());
    edit.initialize(&snapshot);
    edit.set_product_name("Widget v2");

    c.app.orchestrator.submit(&mut edit).await.unwrap();
    let page = list.refresh().await.unwrap();
    assert_eq!(page.items[0].product_name, "Widget v2");

    // delete: list goes stale and empties, no navigation happens
    let routes_before = c.navigator.routes().len();
    c.app.orchestrator.delete(&created.id).await.unwrap();
    assert_eq!(c.navigator.routes().len(), routes_before);
    assert!(list.is_stale());
    assert!(list.refresh().await.unwrap().items.is_empty());

    // every terminal outcome produced exactly one toast
    assert_eq!(c.notifier.toasts().len(), 4); // login, create, update, delete
    assert!(c.notifier.errors().is_empty());
    assert_eq!(c.products.mutation_calls().len(), 3);
}

#[tokio::test]
async fn test_failed_create_leaves_console_reusable() {
    let c = console();
    c.products.fail_create_with("insert rejected");

    let mut forms = c.app.create_forms();
    let form = &mut forms.normal;
    form.set_product_name("Widget");
    form.set_product_tags("toys");
    form.select_images(vec![image("front.jpg")]).unwrap();

    assert!(c.app.orchestrator.submit(form).await.is_err());

    // draft intact, flags down: the same form can retry and succeed
    assert_eq!(form.pending_uploads().len(), 1);
    assert!(!form.is_submitting());

    c.app.orchestrator.submit(form).await.unwrap();
    assert_eq!(c.notifier.errors().len(), 1);
    assert_eq!(c.notifier.successes().len(), 1);

    // the retry re-uploaded the still-pending file
    assert_eq!(c.storage.uploads().len(), 2);
}
