use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, payload::Json};

use business::domain::cart::errors::CartError;
use business::domain::cart::model::CartView;
use business::domain::cart::use_cases::add_item::{AddCartItemParams, AddCartItemUseCase};
use business::domain::cart::use_cases::checkout::{CheckoutParams, CheckoutUseCase};
use business::domain::cart::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use business::domain::cart::use_cases::get::{GetCartParams, GetCartUseCase};
use business::domain::cart::use_cases::get_orders::{GetOrdersParams, GetOrdersUseCase};
use business::domain::cart::use_cases::remove_item::{RemoveCartItemParams, RemoveCartItemUseCase};
use business::domain::cart::use_cases::summary::{GetCartSummaryParams, GetCartSummaryUseCase};
use business::domain::cart::use_cases::update_item::{
    UpdateCartItemParams, UpdateCartItemUseCase,
};

use crate::api::cart::dto::{
    AddCartItemRequest, CartSummaryResponse, CartViewResponse, OrderResponse,
    UpdateCartItemRequest,
};
use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::security::JwtBearer;
use crate::api::tags::ApiTags;

pub struct CartApi {
    get_use_case: Arc<dyn GetCartUseCase>,
    summary_use_case: Arc<dyn GetCartSummaryUseCase>,
    add_item_use_case: Arc<dyn AddCartItemUseCase>,
    update_item_use_case: Arc<dyn UpdateCartItemUseCase>,
    remove_item_use_case: Arc<dyn RemoveCartItemUseCase>,
    clear_use_case: Arc<dyn ClearCartUseCase>,
    checkout_use_case: Arc<dyn CheckoutUseCase>,
    get_orders_use_case: Arc<dyn GetOrdersUseCase>,
}

impl CartApi {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        get_use_case: Arc<dyn GetCartUseCase>,
        summary_use_case: Arc<dyn GetCartSummaryUseCase>,
        add_item_use_case: Arc<dyn AddCartItemUseCase>,
        update_item_use_case: Arc<dyn UpdateCartItemUseCase>,
        remove_item_use_case: Arc<dyn RemoveCartItemUseCase>,
        clear_use_case: Arc<dyn ClearCartUseCase>,
        checkout_use_case: Arc<dyn CheckoutUseCase>,
        get_orders_use_case: Arc<dyn GetOrdersUseCase>,
    ) -> Self {
        Self {
            get_use_case,
            summary_use_case,
            add_item_use_case,
            update_item_use_case,
            remove_item_use_case,
            clear_use_case,
            checkout_use_case,
            get_orders_use_case,
        }
    }
}

/// Shopping cart API
///
/// Every endpoint works on the cart of the authenticated caller.
#[OpenApi]
impl CartApi {
    /// Get the current cart
    ///
    /// `cart` is null when the caller has not added anything yet.
    #[oai(path = "/cart", method = "get", tag = "ApiTags::Cart")]
    async fn get_cart(&self, auth: JwtBearer) -> CartViewResult {
        let params = GetCartParams {
            user_id: auth.0.user_id,
        };
        CartViewResult::from_result(self.get_use_case.execute(params).await)
    }

    /// Get cart totals
    #[oai(path = "/cart/summary", method = "get", tag = "ApiTags::Cart")]
    async fn get_summary(&self, auth: JwtBearer) -> CartSummaryResult {
        let params = GetCartSummaryParams {
            user_id: auth.0.user_id,
        };

        match self.summary_use_case.execute(params).await {
            Ok(summary) => CartSummaryResult::Ok(Json(summary.into())),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                CartSummaryResult::InternalError(json)
            }
        }
    }

    /// Add a sweet to the cart
    ///
    /// Creates the cart on first use. Adding a sweet already in the cart
    /// increases that line's quantity and keeps its original price.
    #[oai(path = "/cart/items", method = "post", tag = "ApiTags::Cart")]
    async fn add_item(&self, auth: JwtBearer, body: Json<AddCartItemRequest>) -> CartViewResult {
        let params = AddCartItemParams {
            user_id: auth.0.user_id,
            sweet_id: body.0.sweet_id,
            quantity: body.0.quantity,
        };
        CartViewResult::from_result(self.add_item_use_case.execute(params).await)
    }

    /// Change the quantity of a cart line
    #[oai(path = "/cart/items/:item_id", method = "put", tag = "ApiTags::Cart")]
    async fn update_item(
        &self,
        auth: JwtBearer,
        item_id: Path<String>,
        body: Json<UpdateCartItemRequest>,
    ) -> CartViewResult {
        let params = UpdateCartItemParams {
            user_id: auth.0.user_id,
            item_id: item_id.0,
            quantity: body.0.quantity,
        };
        CartViewResult::from_result(self.update_item_use_case.execute(params).await)
    }

    /// Remove a cart line
    ///
    /// Returns 404 when the line is not in the caller's cart.
    #[oai(path = "/cart/items/:item_id", method = "delete", tag = "ApiTags::Cart")]
    async fn remove_item(&self, auth: JwtBearer, item_id: Path<String>) -> CartViewResult {
        let params = RemoveCartItemParams {
            user_id: auth.0.user_id,
            item_id: item_id.0,
        };
        CartViewResult::from_result(self.remove_item_use_case.execute(params).await)
    }

    /// Empty the cart
    #[oai(path = "/cart", method = "delete", tag = "ApiTags::Cart")]
    async fn clear_cart(&self, auth: JwtBearer) -> CartViewResult {
        let params = ClearCartParams {
            user_id: auth.0.user_id,
        };
        CartViewResult::from_result(self.clear_use_case.execute(params).await)
    }

    /// Check out the cart
    ///
    /// Takes stock for every line and records an order, all or nothing.
    #[oai(path = "/cart/checkout", method = "post", tag = "ApiTags::Cart")]
    async fn checkout(&self, auth: JwtBearer) -> CheckoutResult {
        let params = CheckoutParams {
            user_id: auth.0.user_id,
        };

        match self.checkout_use_case.execute(params).await {
            Ok(order) => CheckoutResult::Ok(Json(order.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => CheckoutResult::BadRequest(json),
                    _ => CheckoutResult::InternalError(json),
                }
            }
        }
    }

    /// List the caller's orders
    ///
    /// Newest first.
    #[oai(path = "/orders", method = "get", tag = "ApiTags::Orders")]
    async fn get_orders(&self, auth: JwtBearer) -> GetOrdersResult {
        let params = GetOrdersParams {
            user_id: auth.0.user_id,
        };

        match self.get_orders_use_case.execute(params).await {
            Ok(orders) => GetOrdersResult::Ok(Json(orders.into_iter().map(Into::into).collect())),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                GetOrdersResult::InternalError(json)
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CartViewResult {
    #[oai(status = 200)]
    Ok(Json<CartViewResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl CartViewResult {
    fn from_result(result: Result<CartView, CartError>) -> Self {
        match result {
            Ok(view) => CartViewResult::Ok(Json(view.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => CartViewResult::BadRequest(json),
                    404 => CartViewResult::NotFound(json),
                    _ => CartViewResult::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CartSummaryResult {
    #[oai(status = 200)]
    Ok(Json<CartSummaryResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum CheckoutResult {
    #[oai(status = 200)]
    Ok(Json<OrderResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetOrdersResult {
    #[oai(status = 200)]
    Ok(Json<Vec<OrderResponse>>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
