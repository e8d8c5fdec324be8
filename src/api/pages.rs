use axum::response::Html;

use super::SessionUser;
use crate::views;

pub async fn index() -> Html<String> {
    views::login_page()
}

pub async fn home(user: Option<SessionUser>) -> Html<String> {
    views::home_page(user.as_ref().map(|SessionUser(name)| name.as_str()))
}

pub async fn corporate() -> Html<String> {
    views::corporate_page()
}

pub async fn nri() -> Html<String> {
    views::nri_page()
}

pub async fn contact() -> Html<String> {
    views::contact_page()
}
