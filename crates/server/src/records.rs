//! Daily record, sale and purchase endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use api_types::{
    daily::{DailyRecordNew, DailyRecordView},
    purchase::{PurchaseNew, PurchaseView},
    sale::{SaleNew, SaleView},
};
use engine::{DailyRecord, Purchase, PurchaseCmd, Sale, SaleCmd};

use crate::{
    ServerError,
    server::{Caller, ServerState},
};

fn daily_view(record: DailyRecord) -> DailyRecordView {
    DailyRecordView {
        date: record.date,
        category: record.category,
        description: record.description,
        amount: record.amount,
    }
}

fn sale_view(sale: Sale) -> SaleView {
    SaleView {
        date: sale.date,
        item_name: sale.item_name,
        quantity: sale.quantity,
        unit_price: sale.unit_price,
        total_amount: sale.total_amount,
        customer_name: sale.customer_name,
    }
}

fn purchase_view(purchase: Purchase) -> PurchaseView {
    PurchaseView {
        date: purchase.date,
        item_name: purchase.item_name,
        quantity: purchase.quantity,
        unit_cost: purchase.unit_cost,
        total_cost: purchase.total_cost,
        supplier_name: purchase.supplier_name,
    }
}

pub async fn income_new(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
    Json(payload): Json<DailyRecordNew>,
) -> Result<(StatusCode, Json<DailyRecordView>), ServerError> {
    let record = state
        .engine
        .add_income_record(
            payload.amount,
            &payload.category,
            payload.description.as_deref().unwrap_or_default(),
            &user_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(daily_view(record))))
}

pub async fn expense_new(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
    Json(payload): Json<DailyRecordNew>,
) -> Result<(StatusCode, Json<DailyRecordView>), ServerError> {
    let record = state
        .engine
        .add_expense_record(
            payload.amount,
            &payload.category,
            payload.description.as_deref().unwrap_or_default(),
            &user_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(daily_view(record))))
}

/// List daily records of one kind. Unknown kinds answer with an empty list.
pub async fn daily_list(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
    Path(kind): Path<String>,
) -> Result<Json<Vec<DailyRecordView>>, ServerError> {
    let records = state.engine.daily_records(&kind, &user_id).await?;
    Ok(Json(records.into_iter().map(daily_view).collect()))
}

pub async fn daily_delete(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_daily_records(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn sale_new(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
    Json(payload): Json<SaleNew>,
) -> Result<(StatusCode, Json<SaleView>), ServerError> {
    let mut cmd = SaleCmd::new(
        user_id,
        payload.item_name,
        payload.quantity,
        payload.unit_price,
    );
    if let Some(customer_name) = payload.customer_name {
        cmd = cmd.customer_name(customer_name);
    }

    let sale = state.engine.add_sale(cmd).await?;
    Ok((StatusCode::CREATED, Json(sale_view(sale))))
}

pub async fn sale_list(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<SaleView>>, ServerError> {
    let sales = state.engine.sales(&user_id).await?;
    Ok(Json(sales.into_iter().map(sale_view).collect()))
}

pub async fn sale_delete(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_sales(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn purchase_new(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
    Json(payload): Json<PurchaseNew>,
) -> Result<(StatusCode, Json<PurchaseView>), ServerError> {
    let mut cmd = PurchaseCmd::new(
        user_id,
        payload.item_name,
        payload.quantity,
        payload.unit_cost,
    );
    if let Some(supplier_name) = payload.supplier_name {
        cmd = cmd.supplier_name(supplier_name);
    }

    let purchase = state.engine.add_purchase(cmd).await?;
    Ok((StatusCode::CREATED, Json(purchase_view(purchase))))
}

pub async fn purchase_list(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<PurchaseView>>, ServerError> {
    let purchases = state.engine.purchases(&user_id).await?;
    Ok(Json(purchases.into_iter().map(purchase_view).collect()))
}

pub async fn purchase_delete(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_purchases(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
