use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use tower::ServiceExt;

use crate::workflows::backend::{course_router, CourseBackend};
use crate::workflows::catalog_data::CourseCatalog;

pub(super) const COURSES: &str = "\
code,title,description,credits,terms,prerequisites
CS135,Designing Functional Programs,Introductory programming with functions,0.5,1A;1B,
CS145,Advanced Functional Programs,Programming for strong students,0.5,1A,
ME101,Statics,Forces and moments on rigid bodies,,,
ME202,Dynamics,Motion of particles and rigid bodies,0.5,2A,ME101
ME305,Heat Transfer,Conduction and convection,,3A,ME202
";

pub(super) const REQUIREMENTS: &str = "\
id,course,parent_id,kind,req_type,operator,value,position
1,CS135,,CONDITION,LEVEL,>=,1A,0
2,CS145,,CONDITION,PROGRAM,=,Software Engineering,0
3,ME101,,AND,,,,0
4,ME202,,AND,,,,0
5,ME202,4,CONDITION,PROGRAM,=,Mechanical Engineering,0
6,ME202,4,CONDITION,LEVEL,>=,2A,1
7,ME305,,OR,,,,0
8,ME305,7,CONDITION,PROGRAM,=,Mechanical Engineering,0
9,ME305,7,CONDITION,MINOR,=,Mechatronics,1
";

pub(super) fn backend() -> CourseBackend {
    let catalog = CourseCatalog::from_readers(COURSES.as_bytes(), REQUIREMENTS.as_bytes())
        .expect("fixture catalog parses");
    CourseBackend::new(catalog, 20)
}

pub(super) async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response: Response = course_router(Arc::new(backend()))
        .oneshot(request)
        .await
        .expect("router responds");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let body = serde_json::from_slice(&bytes).expect("body is JSON");
    (status, body)
}

pub(super) fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}
