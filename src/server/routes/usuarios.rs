//! Account administration endpoints

use super::{MessageResponse, Pagination, PaginationQuery, parse_id};
use crate::auth::{AuthenticatedContext, require_owner_or_admin, require_role};
use crate::core::models::{AccountWithProfile, Role};
use crate::server::middleware::AuthMiddleware;
use crate::server::state::AppState;
use crate::storage::database::AccountFilter;
use crate::utils::error::ApiError;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::{Deserialize, Serialize};
use tracing::info;

const NOT_FOUND: &str = "Usuário não encontrado";

/// Configure account routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/usuarios")
            .wrap(AuthMiddleware)
            .route("", web::get().to(list_accounts))
            .route("/{id}", web::get().to(get_account))
            .route("/{id}", web::put().to(update_account))
            .route("/{id}", web::delete().to(delete_account)),
    );
}

/// Query parameters of the account listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAccountsQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub tipo: Option<String>,
    pub ativo: Option<bool>,
}

impl ListAccountsQuery {
    fn pagination(&self) -> PaginationQuery {
        let defaults = PaginationQuery::default();
        PaginationQuery {
            page: self.page.unwrap_or(defaults.page),
            limit: self.limit.unwrap_or(defaults.limit),
        }
    }

    fn filter(&self) -> Result<AccountFilter, ApiError> {
        let role = match self.tipo.as_deref().filter(|t| !t.is_empty()) {
            Some(tipo) => Some(tipo.parse::<Role>().map_err(|_| {
                ApiError::invalid_choice(
                    "Tipo de usuário inválido",
                    Role::ALL.iter().map(Role::as_str).collect(),
                )
            })?),
            None => None,
        };

        Ok(AccountFilter {
            role,
            active: self.ativo,
        })
    }
}

/// One page of accounts
#[derive(Debug, Serialize)]
pub struct ListAccountsResponse {
    pub usuarios: Vec<AccountWithProfile>,
    pub pagination: Pagination,
}

/// Update body. Only the active flag is mutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAccountRequest {
    #[serde(rename = "ativo")]
    pub active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct UpdateAccountResponse {
    pub message: &'static str,
    pub usuario: AccountWithProfile,
}

/// List accounts, newest first (ADMIN)
pub async fn list_accounts(
    state: web::Data<AppState>,
    ctx: AuthenticatedContext,
    query: web::Query<ListAccountsQuery>,
) -> ActixResult<HttpResponse> {
    require_role(Some(&ctx), &[Role::Admin])?;

    let pagination = query.pagination();
    pagination.validate()?;
    let filter = query.filter()?;

    let page = state
        .storage
        .db()
        .list_accounts(&filter, pagination.page, pagination.limit)
        .await?;

    Ok(HttpResponse::Ok().json(ListAccountsResponse {
        usuarios: page.items,
        pagination: Pagination::new(page.total, pagination.page, pagination.limit),
    }))
}

/// Fetch one account with its profile (owner or ADMIN)
pub async fn get_account(
    state: web::Data<AppState>,
    ctx: AuthenticatedContext,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let account_id = parse_id(&path, NOT_FOUND)?;
    require_owner_or_admin(Some(&ctx), account_id)?;

    let identity = state
        .storage
        .db()
        .find_account_by_id(account_id)
        .await?
        .ok_or(ApiError::not_found(NOT_FOUND))?;

    Ok(HttpResponse::Ok().json(identity))
}

/// Activate or deactivate an account (ADMIN)
pub async fn update_account(
    state: web::Data<AppState>,
    ctx: AuthenticatedContext,
    path: web::Path<String>,
    request: web::Json<UpdateAccountRequest>,
) -> ActixResult<HttpResponse> {
    require_role(Some(&ctx), &[Role::Admin])?;
    let account_id = parse_id(&path, NOT_FOUND)?;
    let db = state.storage.db();

    let updated = match request.active {
        Some(active) => {
            let updated = db.set_account_active(account_id, active).await?;
            if updated.is_some() {
                info!(
                    "Account {} set active={} by {}",
                    account_id,
                    active,
                    ctx.account_id()
                );
            }
            updated
        }
        None => db.find_account_by_id(account_id).await?,
    };
    let usuario = updated.ok_or(ApiError::not_found(NOT_FOUND))?;

    Ok(HttpResponse::Ok().json(UpdateAccountResponse {
        message: "Usuário atualizado com sucesso",
        usuario,
    }))
}

/// Delete an account and its profile (ADMIN). Deleting oneself is refused.
pub async fn delete_account(
    state: web::Data<AppState>,
    ctx: AuthenticatedContext,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    require_role(Some(&ctx), &[Role::Admin])?;
    let account_id = parse_id(&path, NOT_FOUND)?;

    if account_id == ctx.account_id() {
        return Err(ApiError::validation("Você não pode deletar sua própria conta").into());
    }

    if !state.storage.db().delete_account(account_id).await? {
        return Err(ApiError::not_found(NOT_FOUND).into());
    }
    info!("Account {} deleted by {}", account_id, ctx.account_id());

    Ok(HttpResponse::Ok().json(MessageResponse::new("Usuário deletado com sucesso")))
}
