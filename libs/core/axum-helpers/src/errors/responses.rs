//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 1100,
        "error": "INTERNAL_ERROR",
        "status": "INTERNAL_SERVER_ERROR",
        "reason": "Unexpected error.",
        "message": "An internal server error occurred",
        "timestamp": "2025-03-01 12:00:00"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "status": "BAD_REQUEST",
        "reason": "Incorrectly made request.",
        "message": "title: length is less than 3",
        "timestamp": "2025-03-01 12:00:00",
        "details": {
            "title": [{"code": "length", "message": null, "params": {"min": 3, "value": "ab"}}]
        }
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "code": 1004,
        "error": "NOT_FOUND",
        "status": "NOT_FOUND",
        "reason": "The required object was not found.",
        "message": "Event with id=7 was not found",
        "timestamp": "2025-03-01 12:00:00"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict with the current state",
    content_type = "application/json",
    example = json!({
        "code": 1005,
        "error": "CONFLICT",
        "status": "CONFLICT",
        "reason": "For the requested operation the conditions are not met.",
        "message": "The participant limit has been reached",
        "timestamp": "2025-03-01 12:00:00"
    })
)]
pub struct ConflictResponse(pub ErrorResponse);
