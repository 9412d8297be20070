use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::member_service::MemberService;
use crate::domain::address::Address;
use crate::domain::member::Member;
use crate::errors::AppError;
use crate::infrastructure::AppStore;

use super::CreatedResponse;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateMemberRequest {
    pub name: String,
    pub city: String,
    pub street: String,
    pub zipcode: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddressResponse {
    pub city: String,
    pub street: String,
    pub zipcode: String,
}

impl From<&Address> for AddressResponse {
    fn from(a: &Address) -> Self {
        AddressResponse {
            city: a.city().to_string(),
            street: a.street().to_string(),
            zipcode: a.zipcode().to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MemberResponse {
    pub id: Uuid,
    pub name: String,
    pub address: AddressResponse,
}

impl From<&Member> for MemberResponse {
    fn from(m: &Member) -> Self {
        MemberResponse {
            id: m.id(),
            name: m.name().to_string(),
            address: m.address().into(),
        }
    }
}

/// POST /members
#[utoipa::path(
    post,
    path = "/members",
    request_body = CreateMemberRequest,
    responses(
        (status = 201, description = "Member joined", body = CreatedResponse),
        (status = 400, description = "Blank name"),
        (status = 409, description = "Name already taken"),
    ),
    tag = "members"
)]
pub async fn create_member(
    service: web::Data<MemberService<AppStore>>,
    body: web::Json<CreateMemberRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let id = web::block(move || {
        let address = Address::new(body.city, body.street, body.zipcode);
        service.join(&body.name, address)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(CreatedResponse { id }))
}

/// GET /members
#[utoipa::path(
    get,
    path = "/members",
    responses(
        (status = 200, description = "All members", body = Vec<MemberResponse>),
    ),
    tag = "members"
)]
pub async fn list_members(
    service: web::Data<MemberService<AppStore>>,
) -> Result<HttpResponse, AppError> {
    let members = web::block(move || service.find_members())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<MemberResponse> = members.iter().map(MemberResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /members/{id}
#[utoipa::path(
    get,
    path = "/members/{id}",
    params(
        ("id" = Uuid, Path, description = "Member UUID"),
    ),
    responses(
        (status = 200, description = "Member found", body = MemberResponse),
        (status = 404, description = "Member not found"),
    ),
    tag = "members"
)]
pub async fn get_member(
    service: web::Data<MemberService<AppStore>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let member_id = path.into_inner();

    let member = web::block(move || service.find_one(member_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(MemberResponse::from(&member)))
}
