use actix_web::{HttpResponse, Responder};

use crate::models::trip::PERSONA_OPTIONS;

/*
    /api/personas
*/
pub async fn get_personas() -> impl Responder {
    HttpResponse::Ok().json(PERSONA_OPTIONS)
}
