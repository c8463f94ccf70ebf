use std::sync::Arc;

use poem_openapi::{
    OpenApi,
    param::{Path, Query},
    payload::Json,
};

use business::domain::sweet::model::Sweet;
use business::domain::sweet::use_cases::create::{CreateSweetParams, CreateSweetUseCase};
use business::domain::sweet::use_cases::delete::{DeleteSweetParams, DeleteSweetUseCase};
use business::domain::sweet::use_cases::get_all::GetAllSweetsUseCase;
use business::domain::sweet::use_cases::get_by_id::{GetSweetByIdParams, GetSweetByIdUseCase};
use business::domain::sweet::use_cases::get_paginated::{
    GetSweetsPageParams, GetSweetsPageUseCase,
};
use business::domain::sweet::use_cases::purchase::{PurchaseSweetParams, PurchaseSweetUseCase};
use business::domain::sweet::use_cases::restock::{RestockSweetParams, RestockSweetUseCase};
use business::domain::sweet::use_cases::search::{SearchSweetsParams, SearchSweetsUseCase};
use business::domain::sweet::use_cases::update::{UpdateSweetParams, UpdateSweetUseCase};

use crate::api::error::{ErrorResponse, IntoErrorResponse, validation_error};
use crate::api::security::JwtBearer;
use crate::api::sweet::dto::{
    CreateSweetRequest, DeletedSweetResponse, StockMovementRequest, SweetPageResponse,
    SweetResponse, UpdateSweetRequest, to_decimal,
};
use crate::api::tags::ApiTags;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;

pub struct SweetApi {
    create_use_case: Arc<dyn CreateSweetUseCase>,
    get_all_use_case: Arc<dyn GetAllSweetsUseCase>,
    get_page_use_case: Arc<dyn GetSweetsPageUseCase>,
    search_use_case: Arc<dyn SearchSweetsUseCase>,
    get_by_id_use_case: Arc<dyn GetSweetByIdUseCase>,
    update_use_case: Arc<dyn UpdateSweetUseCase>,
    delete_use_case: Arc<dyn DeleteSweetUseCase>,
    purchase_use_case: Arc<dyn PurchaseSweetUseCase>,
    restock_use_case: Arc<dyn RestockSweetUseCase>,
}

impl SweetApi {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        create_use_case: Arc<dyn CreateSweetUseCase>,
        get_all_use_case: Arc<dyn GetAllSweetsUseCase>,
        get_page_use_case: Arc<dyn GetSweetsPageUseCase>,
        search_use_case: Arc<dyn SearchSweetsUseCase>,
        get_by_id_use_case: Arc<dyn GetSweetByIdUseCase>,
        update_use_case: Arc<dyn UpdateSweetUseCase>,
        delete_use_case: Arc<dyn DeleteSweetUseCase>,
        purchase_use_case: Arc<dyn PurchaseSweetUseCase>,
        restock_use_case: Arc<dyn RestockSweetUseCase>,
    ) -> Self {
        Self {
            create_use_case,
            get_all_use_case,
            get_page_use_case,
            search_use_case,
            get_by_id_use_case,
            update_use_case,
            delete_use_case,
            purchase_use_case,
            restock_use_case,
        }
    }
}

/// Sweet catalog API
///
/// Public reads; mutations require an admin token, purchase any valid token.
#[OpenApi]
impl SweetApi {
    /// Create a sweet
    ///
    /// Admin only.
    #[oai(path = "/sweets", method = "post", tag = "ApiTags::Sweets")]
    async fn create_sweet(
        &self,
        auth: JwtBearer,
        body: Json<CreateSweetRequest>,
    ) -> CreateSweetResponse {
        let Some(price) = to_decimal(body.0.price) else {
            return CreateSweetResponse::BadRequest(validation_error("sweet.price_invalid"));
        };

        let params = CreateSweetParams {
            caller: auth.0,
            name: body.0.name,
            category: body.0.category,
            price,
            quantity: body.0.quantity,
            description: body.0.description,
            image_url: body.0.image_url,
        };

        match self.create_use_case.execute(params).await {
            Ok(sweet) => CreateSweetResponse::Created(Json(sweet.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => CreateSweetResponse::BadRequest(json),
                    403 => CreateSweetResponse::Forbidden(json),
                    _ => CreateSweetResponse::InternalError(json),
                }
            }
        }
    }

    /// List all sweets
    ///
    /// Newest first.
    #[oai(path = "/sweets", method = "get", tag = "ApiTags::Sweets")]
    async fn get_all_sweets(&self) -> GetAllSweetsResponse {
        match self.get_all_use_case.execute().await {
            Ok(sweets) => {
                GetAllSweetsResponse::Ok(Json(sweets.into_iter().map(Into::into).collect()))
            }
            Err(err) => {
                let (_status, json) = err.into_error_response();
                GetAllSweetsResponse::InternalError(json)
            }
        }
    }

    /// List sweets one page at a time
    ///
    /// Pages are 1-based; `limit` is between 1 and 100.
    #[oai(path = "/sweets/page", method = "get", tag = "ApiTags::Sweets")]
    async fn get_sweets_page(
        &self,
        page: Query<Option<i64>>,
        limit: Query<Option<i64>>,
    ) -> GetSweetsPageResponse {
        let params = GetSweetsPageParams {
            page: page.0.unwrap_or(DEFAULT_PAGE),
            limit: limit.0.unwrap_or(DEFAULT_LIMIT),
        };

        match self.get_page_use_case.execute(params).await {
            Ok(page) => GetSweetsPageResponse::Ok(Json(page.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => GetSweetsPageResponse::BadRequest(json),
                    _ => GetSweetsPageResponse::InternalError(json),
                }
            }
        }
    }

    /// Search sweets
    ///
    /// Full-text match on name, category and description, combined with an
    /// inclusive price range.
    #[oai(path = "/sweets/search", method = "get", tag = "ApiTags::Sweets")]
    async fn search_sweets(
        &self,
        q: Query<Option<String>>,
        #[oai(name = "priceMin")] price_min: Query<Option<f64>>,
        #[oai(name = "priceMax")] price_max: Query<Option<f64>>,
    ) -> SearchSweetsResponse {
        let bound = |value: Option<f64>| match value {
            Some(v) => to_decimal(v).map(Some),
            None => Some(None),
        };
        let (Some(price_min), Some(price_max)) = (bound(price_min.0), bound(price_max.0)) else {
            return SearchSweetsResponse::BadRequest(validation_error("sweet.invalid_price_range"));
        };

        let params = SearchSweetsParams {
            query: q.0,
            price_min,
            price_max,
        };

        match self.search_use_case.execute(params).await {
            Ok(sweets) => {
                SearchSweetsResponse::Ok(Json(sweets.into_iter().map(Into::into).collect()))
            }
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => SearchSweetsResponse::BadRequest(json),
                    _ => SearchSweetsResponse::InternalError(json),
                }
            }
        }
    }

    /// Get a sweet by id
    #[oai(path = "/sweets/:id", method = "get", tag = "ApiTags::Sweets")]
    async fn get_sweet_by_id(&self, id: Path<String>) -> GetSweetByIdResponse {
        match self
            .get_by_id_use_case
            .execute(GetSweetByIdParams { id: id.0 })
            .await
        {
            Ok(sweet) => GetSweetByIdResponse::Ok(Json(sweet.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => GetSweetByIdResponse::BadRequest(json),
                    404 => GetSweetByIdResponse::NotFound(json),
                    _ => GetSweetByIdResponse::InternalError(json),
                }
            }
        }
    }

    /// Update a sweet
    ///
    /// Admin only. Omitted fields are left as they are.
    #[oai(path = "/sweets/:id", method = "put", tag = "ApiTags::Sweets")]
    async fn update_sweet(
        &self,
        auth: JwtBearer,
        id: Path<String>,
        body: Json<UpdateSweetRequest>,
    ) -> UpdateSweetResponse {
        let Some(changes) = body.0.into_changes() else {
            return UpdateSweetResponse::BadRequest(validation_error("sweet.price_invalid"));
        };

        let params = UpdateSweetParams {
            caller: auth.0,
            id: id.0,
            changes,
        };

        match self.update_use_case.execute(params).await {
            Ok(sweet) => UpdateSweetResponse::Ok(Json(sweet.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => UpdateSweetResponse::BadRequest(json),
                    403 => UpdateSweetResponse::Forbidden(json),
                    404 => UpdateSweetResponse::NotFound(json),
                    _ => UpdateSweetResponse::InternalError(json),
                }
            }
        }
    }

    /// Delete a sweet
    ///
    /// Admin only. Cart lines pointing at it are kept and shown as unavailable.
    #[oai(path = "/sweets/:id", method = "delete", tag = "ApiTags::Sweets")]
    async fn delete_sweet(&self, auth: JwtBearer, id: Path<String>) -> DeleteSweetResponse {
        let params = DeleteSweetParams {
            caller: auth.0,
            id: id.0,
        };

        match self.delete_use_case.execute(params).await {
            Ok(sweet) => DeleteSweetResponse::Ok(Json(DeletedSweetResponse {
                message: "Sweet deleted successfully".to_string(),
                sweet: sweet.into(),
            })),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => DeleteSweetResponse::BadRequest(json),
                    403 => DeleteSweetResponse::Forbidden(json),
                    404 => DeleteSweetResponse::NotFound(json),
                    _ => DeleteSweetResponse::InternalError(json),
                }
            }
        }
    }

    /// Purchase a sweet
    ///
    /// Any authenticated user. Fails with `InsufficientStock` when fewer
    /// units remain than requested.
    #[oai(path = "/sweets/:id/purchase", method = "post", tag = "ApiTags::Sweets")]
    async fn purchase_sweet(
        &self,
        auth: JwtBearer,
        id: Path<String>,
        body: Json<StockMovementRequest>,
    ) -> StockMovementResponse {
        let params = PurchaseSweetParams {
            caller: auth.0,
            id: id.0,
            quantity: body.0.quantity,
        };

        StockMovementResponse::from_result(self.purchase_use_case.execute(params).await)
    }

    /// Restock a sweet
    ///
    /// Admin only.
    #[oai(path = "/sweets/:id/restock", method = "post", tag = "ApiTags::Sweets")]
    async fn restock_sweet(
        &self,
        auth: JwtBearer,
        id: Path<String>,
        body: Json<StockMovementRequest>,
    ) -> StockMovementResponse {
        let params = RestockSweetParams {
            caller: auth.0,
            id: id.0,
            quantity: body.0.quantity,
        };

        StockMovementResponse::from_result(self.restock_use_case.execute(params).await)
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CreateSweetResponse {
    #[oai(status = 201)]
    Created(Json<SweetResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetAllSweetsResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<SweetResponse>>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetSweetsPageResponse {
    #[oai(status = 200)]
    Ok(Json<SweetPageResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum SearchSweetsResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<SweetResponse>>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetSweetByIdResponse {
    #[oai(status = 200)]
    Ok(Json<SweetResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum UpdateSweetResponse {
    #[oai(status = 200)]
    Ok(Json<SweetResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum DeleteSweetResponse {
    #[oai(status = 200)]
    Ok(Json<DeletedSweetResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum StockMovementResponse {
    #[oai(status = 200)]
    Ok(Json<SweetResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 403)]
    Forbidden(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl StockMovementResponse {
    fn from_result<E: IntoErrorResponse>(
        result: Result<Sweet, E>,
    ) -> Self {
        match result {
            Ok(sweet) => StockMovementResponse::Ok(Json(sweet.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => StockMovementResponse::BadRequest(json),
                    403 => StockMovementResponse::Forbidden(json),
                    404 => StockMovementResponse::NotFound(json),
                    _ => StockMovementResponse::InternalError(json),
                }
            }
        }
    }
}
