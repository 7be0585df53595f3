//! Vendor quote template and portfolio handlers.
//!
//! ```text
//! GET /api/vendor/quotes
//! POST /api/vendor/quotes {"title":"Gold package","price":150000,"inclusions":["Stage"]}
//! DELETE /api/vendor/quotes/{id}
//! GET /api/vendor/portfolio
//! POST /api/vendor/portfolio {"title":"Reception","mediaUrl":"https://cdn.example.com/a.jpg"}
//! DELETE /api/vendor/portfolio/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::text::limits;
use crate::domain::{
    BoundedText, Error, MediaType, MediaUrl, NewPortfolioItem, NewQuoteTemplate, PortfolioItemId,
    Price, QuoteTemplateId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{PortfolioItemResponse, QuoteTemplateResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_field_error, optional_text, parse_id, parse_optional, parse_required,
    require, required_text,
};

const ID: FieldName = FieldName::new("id");
const TITLE: FieldName = FieldName::new("title");
const DESCRIPTION: FieldName = FieldName::new("description");
const PRICE: FieldName = FieldName::new("price");
const INCLUSIONS: FieldName = FieldName::new("inclusions");
const VALID_DAYS: FieldName = FieldName::new("validDays");
const MEDIA_URL: FieldName = FieldName::new("mediaUrl");
const MEDIA_TYPE: FieldName = FieldName::new("mediaType");

/// Body for `POST /api/vendor/quotes`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuoteRequest {
    /// Package name.
    pub title: Option<String>,
    /// Package description.
    pub description: Option<String>,
    /// Price in whole currency units.
    pub price: Option<i64>,
    /// Included services; blank entries are dropped.
    pub inclusions: Option<Vec<String>>,
    /// Days the quote stays valid.
    pub valid_days: Option<i64>,
}

/// Body for `POST /api/vendor/portfolio`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortfolioItemRequest {
    /// Caption.
    pub title: Option<String>,
    /// Absolute http(s) URL of the hosted media.
    pub media_url: Option<String>,
    /// `image` (default) or `video`.
    pub media_type: Option<String>,
    /// Longer description.
    pub description: Option<String>,
}

fn parse_inclusions(values: Option<Vec<String>>) -> Result<Vec<BoundedText>, Error> {
    values
        .unwrap_or_default()
        .into_iter()
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| {
            BoundedText::new(raw, limits::LINE).map_err(|err| invalid_field_error(INCLUSIONS, err))
        })
        .collect()
}

fn parse_quote(payload: CreateQuoteRequest) -> Result<NewQuoteTemplate, Error> {
    let price = require(payload.price, PRICE)?;
    Ok(NewQuoteTemplate {
        title: required_text(payload.title, TITLE, limits::LABEL)?,
        description: optional_text(payload.description, DESCRIPTION, limits::PARAGRAPH)?,
        price: Price::new(price).map_err(|err| invalid_field_error(PRICE, err))?,
        inclusions: parse_inclusions(payload.inclusions)?,
        valid_days: payload
            .valid_days
            .map(|days| {
                u16::try_from(days)
                    .map_err(|_| invalid_field_error(VALID_DAYS, "must be between 0 and 65535"))
            })
            .transpose()?,
    })
}

fn parse_portfolio_item(payload: CreatePortfolioItemRequest) -> Result<NewPortfolioItem, Error> {
    Ok(NewPortfolioItem {
        title: required_text(payload.title, TITLE, limits::LABEL)?,
        media_url: parse_required(payload.media_url, MEDIA_URL, |raw| MediaUrl::new(raw))?,
        media_type: parse_optional(payload.media_type, MEDIA_TYPE, str::parse::<MediaType>)?
            .unwrap_or_default(),
        description: optional_text(payload.description, DESCRIPTION, limits::PARAGRAPH)?,
    })
}

/// List the caller's quote templates, newest first.
#[utoipa::path(
    get,
    path = "/api/vendor/quotes",
    responses(
        (status = 200, description = "Quote templates", body = [QuoteTemplateResponse]),
        (status = 401, description = "Vendor session required", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listQuotes"
)]
#[get("/vendor/quotes")]
pub async fn list_quotes(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<QuoteTemplateResponse>>> {
    let user_id = session.require_vendor()?;
    let quotes = state.catalogue.list_quotes(&user_id).await?;
    Ok(web::Json(quotes.iter().map(QuoteTemplateResponse::from).collect()))
}

/// Create a quote template.
#[utoipa::path(
    post,
    path = "/api/vendor/quotes",
    request_body = CreateQuoteRequest,
    responses(
        (status = 201, description = "Quote template created", body = QuoteTemplateResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Vendor session required", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "createQuote"
)]
#[post("/vendor/quotes")]
pub async fn create_quote(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateQuoteRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_vendor()?;
    let template = parse_quote(payload.into_inner())?;
    let created = state.catalogue.create_quote(&user_id, template).await?;
    Ok(HttpResponse::Created().json(QuoteTemplateResponse::from(&created)))
}

/// Delete one of the caller's quote templates.
#[utoipa::path(
    delete,
    path = "/api/vendor/quotes/{id}",
    params(("id" = String, Path, description = "Quote template id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Vendor session required", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "deleteQuote"
)]
#[delete("/vendor/quotes/{id}")]
pub async fn delete_quote(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_vendor()?;
    let id = parse_id::<QuoteTemplateId>(&path.into_inner(), ID)?;
    state.catalogue.delete_quote(&user_id, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// List the caller's portfolio, newest first.
#[utoipa::path(
    get,
    path = "/api/vendor/portfolio",
    responses(
        (status = 200, description = "Portfolio entries", body = [PortfolioItemResponse]),
        (status = 401, description = "Vendor session required", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listPortfolio"
)]
#[get("/vendor/portfolio")]
pub async fn list_portfolio(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<PortfolioItemResponse>>> {
    let user_id = session.require_vendor()?;
    let items = state.catalogue.list_portfolio(&user_id).await?;
    Ok(web::Json(items.iter().map(PortfolioItemResponse::from).collect()))
}

/// Add a portfolio entry.
#[utoipa::path(
    post,
    path = "/api/vendor/portfolio",
    request_body = CreatePortfolioItemRequest,
    responses(
        (status = 201, description = "Entry added", body = PortfolioItemResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Vendor session required", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "addPortfolioItem"
)]
#[post("/vendor/portfolio")]
pub async fn add_portfolio_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreatePortfolioItemRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_vendor()?;
    let item = parse_portfolio_item(payload.into_inner())?;
    let created = state.catalogue.add_portfolio_item(&user_id, item).await?;
    Ok(HttpResponse::Created().json(PortfolioItemResponse::from(&created)))
}

/// Delete one of the caller's portfolio entries.
#[utoipa::path(
    delete,
    path = "/api/vendor/portfolio/{id}",
    params(("id" = String, Path, description = "Portfolio entry id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Vendor session required", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "deletePortfolioItem"
)]
#[delete("/vendor/portfolio/{id}")]
pub async fn delete_portfolio_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_vendor()?;
    let id = parse_id::<PortfolioItemId>(&path.into_inner(), ID)?;
    state.catalogue.delete_portfolio_item(&user_id, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}
