use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;

use super::{AppState, SessionUser};
use crate::error::Result;
use crate::services::{self, parse_amount};
use crate::views;

pub async fn dashboard(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Html<String>> {
    let account = state.store.ensure_profile(&user).await?;
    Ok(views::dashboard_page(&account))
}

pub async fn personal_banking(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Html<String>> {
    let account = state.store.ensure_profile(&user).await?;
    let summary = services::summarize(&account.transactions);
    Ok(views::personal_banking_page(&user, &account, &summary))
}

pub async fn transactions(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Html<String>> {
    let account = state.store.ensure_profile(&user).await?;
    Ok(views::transactions_page(&user, &account.transactions))
}

#[derive(Deserialize)]
pub struct AmountForm {
    pub amount: String,
}

pub async fn deposit(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Form(form): Form<AmountForm>,
) -> Result<Redirect> {
    let amount = parse_amount(&form.amount)?;
    state.banking.deposit(&user, amount).await?;
    Ok(Redirect::to("/personal-banking"))
}

pub async fn withdraw(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    Form(form): Form<AmountForm>,
) -> Result<Redirect> {
    let amount = parse_amount(&form.amount)?;
    state.banking.withdraw(&user, amount).await?;
    Ok(Redirect::to("/personal-banking"))
}
