//! User-facing HTTP surface of the dispatch plane.
//!
//! All endpoints are form-encoded POSTs. Missing fields default to empty
//! strings — the reference contract performs no validation here. Failures
//! reply 400 with the plain reason text; successes reply 200 with an
//! empty body, except `/DUMPLOG/` which streams the dump file's bytes.

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde::Deserialize;

use tradewire_types::{CommandKind, OrderKind, Result};

use crate::dispatcher::CommandDispatcher;

type Dispatcher = Arc<CommandDispatcher>;

/// Union of the form fields any command may carry.
#[derive(Debug, Default, Deserialize)]
pub struct CommandForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub stock: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub filename: String,
}

fn reply(result: Result<()>) -> Response {
    match result {
        Ok(()) => StatusCode::OK.into_response(),
        Err(err) => (StatusCode::BAD_REQUEST, err.user_message()).into_response(),
    }
}

async fn login(State(d): State<Dispatcher>, Form(f): Form<CommandForm>) -> Response {
    reply(d.login(&f.username).await)
}

async fn add(State(d): State<Dispatcher>, Form(f): Form<CommandForm>) -> Response {
    reply(
        d.forward(CommandKind::Add, &f.username, &f.stock, &f.amount)
            .await
            .map(|_| ()),
    )
}

async fn quote(State(d): State<Dispatcher>, Form(f): Form<CommandForm>) -> Response {
    reply(
        d.forward(CommandKind::Quote, &f.username, &f.stock, &f.amount)
            .await
            .map(|_| ()),
    )
}

async fn buy(State(d): State<Dispatcher>, Form(f): Form<CommandForm>) -> Response {
    reply(
        d.place_order(OrderKind::Buy, &f.username, &f.stock, &f.amount)
            .await,
    )
}

async fn commit_buy(State(d): State<Dispatcher>, Form(f): Form<CommandForm>) -> Response {
    reply(d.commit_order(OrderKind::Buy, &f.username).await)
}

async fn cancel_buy(State(d): State<Dispatcher>, Form(f): Form<CommandForm>) -> Response {
    reply(d.cancel_order(OrderKind::Buy, &f.username).await)
}

async fn sell(State(d): State<Dispatcher>, Form(f): Form<CommandForm>) -> Response {
    reply(
        d.place_order(OrderKind::Sell, &f.username, &f.stock, &f.amount)
            .await,
    )
}

async fn commit_sell(State(d): State<Dispatcher>, Form(f): Form<CommandForm>) -> Response {
    reply(d.commit_order(OrderKind::Sell, &f.username).await)
}

async fn cancel_sell(State(d): State<Dispatcher>, Form(f): Form<CommandForm>) -> Response {
    reply(d.cancel_order(OrderKind::Sell, &f.username).await)
}

macro_rules! forward_handler {
    ($name:ident, $kind:expr) => {
        async fn $name(State(d): State<Dispatcher>, Form(f): Form<CommandForm>) -> Response {
            reply(
                d.forward($kind, &f.username, &f.stock, &f.amount)
                    .await
                    .map(|_| ()),
            )
        }
    };
}

forward_handler!(set_buy_amount, CommandKind::SetBuyAmount);
forward_handler!(cancel_set_buy, CommandKind::CancelSetBuy);
forward_handler!(set_buy_trigger, CommandKind::SetBuyTrigger);
forward_handler!(set_sell_amount, CommandKind::SetSellAmount);
forward_handler!(set_sell_trigger, CommandKind::SetSellTrigger);
forward_handler!(cancel_set_sell, CommandKind::CancelSetSell);
forward_handler!(display_summary, CommandKind::DisplaySummary);

async fn dumplog(State(d): State<Dispatcher>, Form(f): Form<CommandForm>) -> Response {
    match d.dumplog(&f.username, &f.filename).await {
        Ok(bytes) => bytes.into_response(),
        Err(err) => (StatusCode::BAD_REQUEST, err.user_message()).into_response(),
    }
}

/// Build the dispatch-plane router over a shared dispatcher.
#[must_use]
pub fn router(dispatcher: Dispatcher) -> Router {
    Router::new()
        .route("/LOGIN/", post(login))
        .route("/ADD/", post(add))
        .route("/QUOTE/", post(quote))
        .route("/BUY/", post(buy))
        .route("/COMMIT_BUY/", post(commit_buy))
        .route("/CANCEL_BUY/", post(cancel_buy))
        .route("/SELL/", post(sell))
        .route("/COMMIT_SELL/", post(commit_sell))
        .route("/CANCEL_SELL/", post(cancel_sell))
        .route("/SET_BUY_AMOUNT/", post(set_buy_amount))
        .route("/CANCEL_SET_BUY/", post(cancel_set_buy))
        .route("/SET_BUY_TRIGGER/", post(set_buy_trigger))
        .route("/SET_SELL_AMOUNT/", post(set_sell_amount))
        .route("/SET_SELL_TRIGGER/", post(set_sell_trigger))
        .route("/CANCEL_SET_SELL/", post(cancel_set_sell))
        .route("/DUMPLOG/", post(dumplog))
        .route("/DISPLAY_SUMMARY/", post(display_summary))
        .with_state(dispatcher)
}
