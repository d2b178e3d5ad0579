// src/handlers/inventory.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        flash::{self, Notice},
        i18n::Locale,
        item_id::ItemId,
    },
    models::inventory::ItemForm,
    views::{self, FormMode, FormView},
};

// Erros esperados viram mensagem + redirect para a listagem.
// Falhas de backend sobem e terminam a requisição com 500.
fn recover(jar: SignedCookieJar, err: AppError) -> Result<Response, AppError> {
    match Notice::for_error(&err) {
        Some(notice) => Ok(flash::redirect_with(jar, notice, "/")),
        None => Err(err),
    }
}

// ---
// Handler: list_items (GET /)
// ---
pub async fn list_items(
    State(app_state): State<AppState>,
    locale: Locale,
    jar: SignedCookieJar,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state.inventory_service.list_inventory().await?;

    let (jar, notice) = flash::take(jar);
    Ok((jar, Html(views::inventory_page(locale, notice, &items)?)))
}

// ---
// Handler: new_item_form (GET /add)
// ---
pub async fn new_item_form(
    State(app_state): State<AppState>,
    locale: Locale,
    jar: SignedCookieJar,
) -> Result<impl IntoResponse, AppError> {
    let item_types = app_state.inventory_service.list_types().await?;

    let (jar, notice) = flash::take(jar);
    let html = views::item_form_page(
        locale,
        &FormView {
            mode: FormMode::Add,
            values: &ItemForm::default(),
            item_types: &item_types,
            notice,
        },
    )?;
    Ok((jar, Html(html)))
}

// ---
// Handler: create_item (POST /add)
// ---
pub async fn create_item(
    State(app_state): State<AppState>,
    locale: Locale,
    jar: SignedCookieJar,
    Form(form): Form<ItemForm>,
) -> Result<Response, AppError> {
    let input = match form.parse() {
        Ok(input) => input,
        Err(err) => {
            tracing::warn!("Formulário de criação recusado: {}", err);
            // Re-renderiza com o que o usuário digitou
            let item_types = app_state.inventory_service.list_types().await?;
            let html = views::item_form_page(
                locale,
                &FormView {
                    mode: FormMode::Add,
                    values: &form,
                    item_types: &item_types,
                    notice: Notice::for_error(&err),
                },
            )?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response());
        }
    };

    app_state.inventory_service.add_item(&input).await?;

    Ok(flash::redirect_with(jar, Notice::ItemAdded, "/"))
}

// ---
// Handler: edit_item_form (GET /edit/{id})
// ---
pub async fn edit_item_form(
    State(app_state): State<AppState>,
    locale: Locale,
    jar: SignedCookieJar,
    ItemId(item_id): ItemId,
) -> Result<Response, AppError> {
    let item = match app_state.inventory_service.get_item(item_id).await {
        Ok(item) => item,
        Err(err) => return recover(jar, err),
    };
    let item_types = app_state.inventory_service.list_types().await?;

    let (jar, notice) = flash::take(jar);
    let html = views::item_form_page(
        locale,
        &FormView {
            mode: FormMode::Edit(&item),
            values: &ItemForm::from(&item),
            item_types: &item_types,
            notice,
        },
    )?;
    Ok((jar, Html(html)).into_response())
}

// ---
// Handler: update_item (POST /edit/{id})
// ---
pub async fn update_item(
    State(app_state): State<AppState>,
    locale: Locale,
    jar: SignedCookieJar,
    ItemId(item_id): ItemId,
    Form(form): Form<ItemForm>,
) -> Result<Response, AppError> {
    let item = match app_state.inventory_service.get_item(item_id).await {
        Ok(item) => item,
        Err(err) => return recover(jar, err),
    };

    let input = match form.parse() {
        Ok(input) => input,
        Err(err) => {
            tracing::warn!(item_id, "Formulário de edição recusado: {}", err);
            let item_types = app_state.inventory_service.list_types().await?;
            let html = views::item_form_page(
                locale,
                &FormView {
                    mode: FormMode::Edit(&item),
                    values: &form,
                    item_types: &item_types,
                    notice: Notice::for_error(&err),
                },
            )?;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response());
        }
    };

    // O objeto pode ter sido removido entre a leitura e a escrita
    if let Err(err) = app_state.inventory_service.update_item(item_id, &input).await {
        return recover(jar, err);
    }

    Ok(flash::redirect_with(jar, Notice::ItemUpdated, "/"))
}

// ---
// Handler: delete_item (POST /delete/{id})
// ---
pub async fn delete_item(
    State(app_state): State<AppState>,
    jar: SignedCookieJar,
    ItemId(item_id): ItemId,
) -> Result<Response, AppError> {
    app_state.inventory_service.delete_item(item_id).await?;

    Ok(flash::redirect_with(jar, Notice::ItemDeleted, "/"))
}

// ---
// Handler: consume_item (POST /consume/{id})
// ---
pub async fn consume_item(
    State(app_state): State<AppState>,
    jar: SignedCookieJar,
    ItemId(item_id): ItemId,
) -> Result<Response, AppError> {
    match app_state.inventory_service.consume_item(item_id).await {
        Ok(_) => Ok(flash::redirect_with(jar, Notice::ItemConsumed, "/")),
        // Objeto inexistente e estoque zerado dão a mesma mensagem
        Err(AppError::ItemNotFound(_) | AppError::InsufficientQuantity(_)) => Ok(
            flash::redirect_with(jar, Notice::InsufficientQuantity, "/"),
        ),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::SqliteInventoryRepository, middleware::flash::FLASH_COOKIE,
        services::inventory_service::InventoryService,
    };
    use axum::http::header;
    use axum_extra::extract::cookie::Key;
    use std::sync::Arc;

    async fn state() -> AppState {
        let repo = SqliteInventoryRepository::in_memory(false).await.unwrap();
        AppState {
            inventory_service: InventoryService::new(Arc::new(repo)),
            cookie_key: Key::generate(),
        }
    }

    fn jar(state: &AppState) -> SignedCookieJar {
        SignedCookieJar::new(state.cookie_key.clone())
    }

    fn form(name: &str, type_id: &str, quantity: &str) -> Form<ItemForm> {
        Form(ItemForm {
            name: name.into(),
            type_id: type_id.into(),
            quantity: quantity.into(),
        })
    }

    fn location(response: &Response) -> &str {
        response.headers()[header::LOCATION].to_str().unwrap()
    }

    fn flashed(response: &Response) -> String {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(FLASH_COOKIE))
            .unwrap_or_default()
            .to_string()
    }

    async fn body(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn add_then_list_shows_the_new_row() {
        let state = state().await;

        let response = create_item(
            State(state.clone()),
            Locale::En,
            jar(&state),
            form("Health Flask", "1", "3"),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
        assert!(flashed(&response).contains("item_added"));

        let rows = state.inventory_service.list_inventory().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].item_name, "Health Flask");
        assert_eq!(rows[0].item_type.as_deref(), Some("potion"));
        assert_eq!(rows[0].item_quantity, 3);

        let page = list_items(State(state.clone()), Locale::En, jar(&state))
            .await
            .unwrap()
            .into_response();
        assert_eq!(page.status(), StatusCode::OK);
        let html = body(page).await;
        assert!(html.contains("Health Flask"));
        assert!(html.contains("<td>potion</td>"));
    }

    #[tokio::test]
    async fn invalid_quantities_never_create_rows() {
        let state = state().await;

        for bad in ["", "-1", "three"] {
            let response = create_item(
                State(state.clone()),
                Locale::En,
                jar(&state),
                form("Health Flask", "1", bad),
            )
            .await
            .unwrap();
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
            let html = body(response).await;
            assert!(html.contains("value=\"Health Flask\""));
        }

        assert!(state.inventory_service.list_inventory().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_form_reports_validation_message() {
        let state = state().await;
        let response = create_item(
            State(state.clone()),
            Locale::Fr,
            jar(&state),
            form("", "1", "1"),
        )
        .await
        .unwrap();
        let html = body(response).await;
        assert!(html.contains("Tous les champs sont obligatoires!"));
        assert!(html.contains("alert-danger"));
    }

    #[tokio::test]
    async fn list_shows_pending_notice_once() {
        let state = state().await;
        // O navegador devolve o cookie assinado recebido no redirect
        let redirect = flash::redirect_with(jar(&state), Notice::ItemDeleted, "/");
        let set_cookie = flashed(&redirect);
        let pair = set_cookie.split(';').next().unwrap();
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(header::COOKIE, pair.parse().unwrap());
        let with_notice = SignedCookieJar::from_headers(&headers, state.cookie_key.clone());

        let page = list_items(State(state.clone()), Locale::En, with_notice)
            .await
            .unwrap()
            .into_response();
        // A página apaga o cookie da mensagem
        assert!(flashed(&page).starts_with(&format!("{FLASH_COOKIE}=;")));
        assert!(body(page).await.contains("Item deleted successfully!"));
    }

    #[tokio::test]
    async fn tampered_notice_cookie_is_ignored() {
        let state = state().await;
        // Cookie sem assinatura válida
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(
            header::COOKIE,
            format!("{FLASH_COOKIE}=item_added").parse().unwrap(),
        );
        let jar = SignedCookieJar::from_headers(&headers, state.cookie_key.clone());

        let page = list_items(State(state.clone()), Locale::En, jar)
            .await
            .unwrap()
            .into_response();
        assert!(!body(page).await.contains("alert"));
    }

    #[tokio::test]
    async fn edit_form_of_missing_item_redirects_with_not_found() {
        let state = state().await;
        let response = edit_item_form(State(state.clone()), Locale::En, jar(&state), ItemId(404))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(flashed(&response).contains("item_not_found"));
    }

    #[tokio::test]
    async fn edit_form_is_prefilled() {
        let state = state().await;
        let id = add(&state, "Iron Key", "4", "1").await;

        let response = edit_item_form(State(state.clone()), Locale::En, jar(&state), ItemId(id))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body(response).await;
        assert!(html.contains("value=\"Iron Key\""));
        assert!(html.contains("<option value=\"4\" selected>clé</option>"));
    }

    #[tokio::test]
    async fn edit_updates_the_item() {
        let state = state().await;
        let id = add(&state, "Iron Key", "4", "1").await;

        let response = update_item(
            State(state.clone()),
            Locale::En,
            jar(&state),
            ItemId(id),
            form("Gold Key", "4", "2"),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(flashed(&response).contains("item_updated"));

        let item = state.inventory_service.get_item(id).await.unwrap();
        assert_eq!(item.name, "Gold Key");
        assert_eq!(item.quantity, 2);
    }

    #[tokio::test]
    async fn failed_edit_keeps_entered_values_and_stored_row() {
        let state = state().await;
        let id = add(&state, "Iron Key", "4", "1").await;

        let response = update_item(
            State(state.clone()),
            Locale::En,
            jar(&state),
            ItemId(id),
            form("Gold Key", "0", "2"),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body(response).await;
        assert!(html.contains("Edit item : Iron Key"));
        assert!(html.contains("value=\"Gold Key\""));
        assert!(html.contains("Invalid item type!"));

        let item = state.inventory_service.get_item(id).await.unwrap();
        assert_eq!(item.name, "Iron Key");
    }

    #[tokio::test]
    async fn edit_of_missing_item_redirects_with_not_found() {
        let state = state().await;
        let response = update_item(
            State(state.clone()),
            Locale::En,
            jar(&state),
            ItemId(77),
            form("Ghost", "1", "1"),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(flashed(&response).contains("item_not_found"));
    }

    #[tokio::test]
    async fn delete_reports_success_even_for_missing_ids() {
        let state = state().await;
        let keep = add(&state, "Shield", "5", "1").await;

        for _ in 0..2 {
            let response = delete_item(State(state.clone()), jar(&state), ItemId(keep + 1))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert!(flashed(&response).contains("item_deleted"));
        }

        let rows = state.inventory_service.list_inventory().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].item_id, keep);
    }

    #[tokio::test]
    async fn consume_decrements_then_refuses_at_zero() {
        let state = state().await;
        let id = add(&state, "Herb", "2", "1").await;

        let response = consume_item(State(state.clone()), jar(&state), ItemId(id))
            .await
            .unwrap();
        assert!(flashed(&response).contains("item_consumed"));
        assert_eq!(state.inventory_service.get_item(id).await.unwrap().quantity, 0);

        let response = consume_item(State(state.clone()), jar(&state), ItemId(id))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(flashed(&response).contains("insufficient_quantity"));
        assert_eq!(state.inventory_service.get_item(id).await.unwrap().quantity, 0);
    }

    #[tokio::test]
    async fn consume_of_missing_item_is_insufficient() {
        let state = state().await;
        let response = consume_item(State(state.clone()), jar(&state), ItemId(12))
            .await
            .unwrap();
        assert_eq!(location(&response), "/");
        assert!(flashed(&response).contains("insufficient_quantity"));
    }

    #[tokio::test]
    async fn health_flask_scenario() {
        let state = state().await;
        let id = add(&state, "Health Flask", "1", "3").await;

        for _ in 0..2 {
            consume_item(State(state.clone()), jar(&state), ItemId(id))
                .await
                .unwrap();
        }
        assert_eq!(state.inventory_service.get_item(id).await.unwrap().quantity, 1);

        delete_item(State(state.clone()), jar(&state), ItemId(id))
            .await
            .unwrap();
        let html = body(
            list_items(State(state.clone()), Locale::En, jar(&state))
                .await
                .unwrap()
                .into_response(),
        )
        .await;
        assert!(!html.contains("Health Flask"));
    }

    async fn add(state: &AppState, name: &str, type_id: &str, quantity: &str) -> i64 {
        create_item(
            State(state.clone()),
            Locale::En,
            jar(state),
            form(name, type_id, quantity),
        )
        .await
        .unwrap();
        state
            .inventory_service
            .list_inventory()
            .await
            .unwrap()
            .into_iter()
            .filter(|row| row.item_name == name)
            .map(|row| row.item_id)
            .max()
            .unwrap()
    }
}
