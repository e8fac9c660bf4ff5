//! Supplier loan and advance payment endpoints, including settlement.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use api_types::liability::{AdvancePaymentView, LiabilityNew, SettleResponse, SupplierLoanView};
use engine::{AdvancePayment, SupplierLoan};

use crate::{
    ServerError,
    server::{Caller, ServerState},
};

fn loan_view(loan: SupplierLoan) -> SupplierLoanView {
    SupplierLoanView {
        date: loan.date,
        supplier_name: loan.supplier_name,
        amount: loan.amount,
        purpose: loan.purpose,
        repaid: loan.repaid,
    }
}

fn advance_view(payment: AdvancePayment) -> AdvancePaymentView {
    AdvancePaymentView {
        date: payment.date,
        supplier_name: payment.supplier_name,
        amount: payment.amount,
        purpose: payment.purpose,
        settled: payment.settled,
    }
}

fn parse_index(index: &str) -> Result<u64, ServerError> {
    index
        .parse()
        .map_err(|_| ServerError::Generic(format!("invalid index: {index}")))
}

pub async fn loan_new(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
    Json(payload): Json<LiabilityNew>,
) -> Result<(StatusCode, Json<SupplierLoanView>), ServerError> {
    let loan = state
        .engine
        .add_supplier_loan(
            payload.amount,
            &payload.supplier_name,
            payload.purpose.as_deref().unwrap_or_default(),
            &user_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(loan_view(loan))))
}

pub async fn loan_list(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<SupplierLoanView>>, ServerError> {
    let loans = state.engine.supplier_loans(&user_id).await?;
    Ok(Json(loans.into_iter().map(loan_view).collect()))
}

pub async fn loan_delete(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_supplier_loans(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Repay the loan at `index`. A `false` answer is not an error.
pub async fn loan_repay(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
    Path(index): Path<String>,
) -> Result<Json<SettleResponse>, ServerError> {
    let index = parse_index(&index)?;
    let settled = state.engine.repay_supplier_loan(index, &user_id).await?;
    Ok(Json(SettleResponse { settled }))
}

pub async fn advance_new(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
    Json(payload): Json<LiabilityNew>,
) -> Result<(StatusCode, Json<AdvancePaymentView>), ServerError> {
    let payment = state
        .engine
        .add_advance_payment(
            payload.amount,
            &payload.supplier_name,
            payload.purpose.as_deref().unwrap_or_default(),
            &user_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(advance_view(payment))))
}

pub async fn advance_list(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<AdvancePaymentView>>, ServerError> {
    let payments = state.engine.advance_payments(&user_id).await?;
    Ok(Json(payments.into_iter().map(advance_view).collect()))
}

pub async fn advance_delete(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_advance_payments(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn advance_settle(
    Extension(Caller(user_id)): Extension<Caller>,
    State(state): State<ServerState>,
    Path(index): Path<String>,
) -> Result<Json<SettleResponse>, ServerError> {
    let index = parse_index(&index)?;
    let settled = state.engine.settle_advance_payment(index, &user_id).await?;
    Ok(Json(SettleResponse { settled }))
}
