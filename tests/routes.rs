use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpResponse, test, web};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::{FlashMessagesFramework, IncomingFlashMessages, Level};
use nahla_admin::i18n::{Catalog, Locale};
use nahla_admin::routes::{
    alert_level_to_str, base_context, collect_alerts, flash_error, flash_success, redirect,
};
use serde_json::{Value, json};

async fn delete_failed(catalog: web::Data<Catalog>) -> HttpResponse {
    flash_error(&catalog, Locale::Fr, "error_backend");
    flash_success(&catalog, Locale::Fr, "notice_customer_deleted");
    redirect("/alerts")
}

async fn show_alerts(flash_messages: IncomingFlashMessages) -> HttpResponse {
    HttpResponse::Ok().json(collect_alerts(&flash_messages))
}

#[::core::prelude::v1::test]
fn alert_levels_map_to_css_classes() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[actix_web::test]
async fn flashed_notices_come_back_localized_with_their_class() {
    let key = actix_web::cookie::Key::generate();
    let app = test::init_service(
        App::new()
            .wrap(FlashMessagesFramework::builder(CookieMessageStore::builder(key).build()).build())
            .app_data(web::Data::new(Catalog::load().expect("catalog")))
            .route("/delete", web::post().to(delete_failed))
            .route("/alerts", web::get().to(show_alerts)),
    )
    .await;

    let req = test::TestRequest::post().uri("/delete").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/alerts");
    let mut req = test::TestRequest::get().uri("/alerts");
    for cookie in resp.response().cookies() {
        req = req.cookie(cookie.into_owned());
    }

    let alerts: Value = test::call_and_read_body_json(&app, req.to_request()).await;

    assert_eq!(
        alerts,
        json!([
            [
                "Impossible de charger les clients. La liste affiche les dernières données chargées.",
                "danger"
            ],
            ["Client supprimé.", "success"]
        ])
    );
}

#[::core::prelude::v1::test]
fn base_context_sets_direction_and_messages() {
    let catalog = Catalog::load().expect("catalog");
    let alerts = vec![("Client supprimé.".to_string(), "success")];

    let context = base_context(&alerts, &catalog, Locale::Ar, "customers");

    assert_eq!(context.get("dir"), Some(&json!("rtl")));
    assert_eq!(context.get("locale"), Some(&json!("ar")));
    assert_eq!(context.get("t").and_then(|t| t.get("nav_logout")), Some(&json!("تسجيل الخروج")));
    assert_eq!(context.get("alerts"), Some(&json!([["Client supprimé.", "success"]])));
}
