use super::model::Product;
use super::service::ProductService;
use crate::controller::Controller;
use crate::di::{Container, Injectable};
use crate::error::{ContainerError, ProductError, Result};
use crate::pipe::{FieldMap, IdRule, JsonProductPipe, ParseIntPipe, Pipe, ProductFieldsPipe};
use axum::{
    Form, Json, Router,
    body::Bytes,
    extract::{
        Multipart, Path, Query, State, multipart::MultipartRejection, rejection::FormRejection,
    },
    routing::{delete, get, post, put},
};
use std::sync::Arc;

type Fields = Vec<(String, String)>;

/// A form that axum refused (wrong content type, bad encoding) is a binding
/// failure like any other.
fn form_fields(form: std::result::Result<Form<Fields>, FormRejection>) -> Result<FieldMap> {
    let Form(fields) =
        form.map_err(|rejection| ProductError::binding("body", rejection.body_text()))?;
    Ok(FieldMap::from(fields))
}

pub struct ProductController {
    service: Arc<ProductService>,
}

impl Injectable for ProductController {
    fn inject(container: &Container) -> std::result::Result<Self, ContainerError> {
        Ok(Self::new(container.resolve::<ProductService>()?))
    }
}

impl Controller for ProductController {
    fn base_path() -> &'static str {
        "/product"
    }

    fn router(self: Arc<Self>) -> Router {
        Router::new()
            .route("/get_product1", get(Self::get_product1))
            .route("/get_product2", get(Self::get_product2))
            .route("/get_product3", get(Self::get_product3))
            .route("/post_product1", post(Self::post_product1))
            .route("/post_product2", post(Self::post_product2))
            .route("/delete/{id}", delete(Self::delete))
            .route("/update", put(Self::update))
            .route("/upload", post(Self::upload))
            .with_state(self)
    }
}

impl ProductController {
    pub fn new(service: Arc<ProductService>) -> Self {
        Self { service }
    }

    async fn get_product1(State(controller): State<Arc<Self>>) -> Json<Product> {
        Json(controller.service.fetch_fixed())
    }

    async fn get_product2(
        State(controller): State<Arc<Self>>,
        Query(fields): Query<Fields>,
    ) -> Result<Json<Product>> {
        let fields = FieldMap::from(fields);
        let id = match fields.present("id") {
            Some(raw) => Some(ParseIntPipe::new("id").transform(raw.to_string()).await?),
            None => None,
        };
        Ok(Json(controller.service.fetch_by_id(id)?))
    }

    async fn get_product3(
        State(controller): State<Arc<Self>>,
        Query(fields): Query<Fields>,
    ) -> Result<String> {
        let product = ProductFieldsPipe::new(IdRule::Optional)
            .transform(fields.into())
            .await?;
        Ok(controller.service.describe(&product))
    }

    async fn post_product1(
        State(controller): State<Arc<Self>>,
        form: std::result::Result<Form<Fields>, FormRejection>,
    ) -> Result<String> {
        let product = ProductFieldsPipe::new(IdRule::Optional)
            .transform(form_fields(form)?)
            .await?;
        Ok(controller.service.create(&product))
    }

    async fn post_product2(State(controller): State<Arc<Self>>, body: Bytes) -> Result<String> {
        let product = JsonProductPipe::new(IdRule::Optional).transform(body).await?;
        Ok(controller.service.create(&product))
    }

    async fn delete(State(controller): State<Arc<Self>>, Path(id): Path<String>) -> Result<String> {
        let id = ParseIntPipe::new("id").transform(id).await?;
        Ok(controller.service.delete(id))
    }

    async fn update(
        State(controller): State<Arc<Self>>,
        form: std::result::Result<Form<Fields>, FormRejection>,
    ) -> Result<String> {
        let product = ProductFieldsPipe::new(IdRule::Required)
            .transform(form_fields(form)?)
            .await?;
        Ok(controller.service.update(&product))
    }

    /// Answers with the filename of the first part named `file`; other parts
    /// are skipped unread.
    async fn upload(
        State(controller): State<Arc<Self>>,
        multipart: std::result::Result<Multipart, MultipartRejection>,
    ) -> Result<String> {
        let mut multipart =
            multipart.map_err(|rejection| ProductError::Parse(rejection.body_text()))?;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ProductError::Parse(e.body_text()))?
        {
            if field.name() != Some("file") {
                continue;
            }
            let filename = field
                .file_name()
                .map(str::to_owned)
                .ok_or_else(|| ProductError::binding("file", "part carries no filename"))?;
            let content = field
                .bytes()
                .await
                .map_err(|e| ProductError::Parse(e.body_text()))?;
            tracing::debug!(%filename, size = content.len(), "Received upload");

            return Ok(controller.service.upload(&filename));
        }

        Err(ProductError::MissingPart("file".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::RecordingDiagnostics;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::Response,
    };
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    fn router() -> (Router, Arc<RecordingDiagnostics>) {
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let service = Arc::new(ProductService::new(diagnostics.clone()));
        (Arc::new(ProductController::new(service)).router(), diagnostics)
    }

    async fn send(request: Request<Body>) -> (StatusCode, String) {
        let (router, _) = router();
        read(router.oneshot(request).await.unwrap()).await
    }

    async fn read(response: Response) -> (StatusCode, String) {
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn form(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart(body: &str) -> Request<Body> {
        Request::post("/upload")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_product1_returns_fixed_document() {
        let (status, body) = send(get("/get_product1")).await;
        assert_eq!(status, StatusCode::OK);
        let product: Product = serde_json::from_str(&body).unwrap();
        assert_eq!(product.id, Some(1));
        assert_eq!(product.name, "ProductA");
        assert_eq!(product.price, Decimal::from(6666));
    }

    #[tokio::test]
    async fn test_get_product2_echoes_id() {
        let (status, body) = send(get("/get_product2?id=101")).await;
        assert_eq!(status, StatusCode::OK);
        let product: Product = serde_json::from_str(&body).unwrap();
        assert_eq!(product.id, Some(101));
        assert_eq!(product.name, "ProductC");
    }

    #[tokio::test]
    async fn test_get_product2_without_id_is_invalid() {
        let (status, body) = send(get("/get_product2")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(error["error"], "InvalidInput");

        let (status, _) = send(get("/get_product2?id=abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_product2_blank_id_is_invalid() {
        for uri in ["/get_product2?id=", "/get_product2?id=%20"] {
            let (status, body) = send(get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            let error: serde_json::Value = serde_json::from_str(&body).unwrap();
            assert_eq!(error["error"], "InvalidInput");
        }
    }

    #[tokio::test]
    async fn test_get_product3_renders_query_fields() {
        let (status, body) = send(get("/get_product3?id=3&name=Kindle&price=99.5")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Product(id=3, name=Kindle, price=99.5)");
    }

    #[tokio::test]
    async fn test_post_product1_binds_form() {
        let request = form("POST", "/post_product1", "id=201&name=Macbook&price=10000");
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Product(id=201, name=Macbook, price=10000)");
    }

    #[tokio::test]
    async fn test_post_product1_missing_price_is_binding_error() {
        let (status, body) = send(form("POST", "/post_product1", "id=201&name=Macbook")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(error["error"], "BindingError");
    }

    #[tokio::test]
    async fn test_form_with_wrong_content_type_is_binding_error() {
        for (method, uri) in [("POST", "/post_product1"), ("PUT", "/update")] {
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from("id=1&name=Macbook&price=10000"))
                .unwrap();
            let (status, body) = send(request).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            let error: serde_json::Value = serde_json::from_str(&body).unwrap();
            assert_eq!(error["error"], "BindingError");
            assert_eq!(error["status"], 400);
        }
    }

    #[tokio::test]
    async fn test_post_product1_keeps_long_price_exact() {
        let request = form("POST", "/post_product1", "name=Macbook&price=12345678901234567.89");
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Product(id=null, name=Macbook, price=12345678901234567.89)");
    }

    #[tokio::test]
    async fn test_post_product2_renders_json_body() {
        let request = Request::post("/post_product2")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"id":2,"name":"Macbook","price":10000}"#))
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        let echoed: Product = body.parse().unwrap();
        assert_eq!(echoed, Product::new(Some(2), "Macbook", Decimal::from(10000)));
    }

    #[tokio::test]
    async fn test_post_product2_malformed_body_is_parse_error() {
        let request = Request::post("/post_product2")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"id":2,"name":"#))
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(error["error"], "ParseError");
    }

    #[tokio::test]
    async fn test_delete_confirms_and_reports() {
        let (router, diagnostics) = router();
        let request = Request::delete("/delete/101").body(Body::empty()).unwrap();
        let (status, body) = read(router.oneshot(request).await.unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("101"));
        assert_eq!(diagnostics.messages(), vec![body]);
    }

    #[tokio::test]
    async fn test_delete_rejects_non_integer_id() {
        let request = Request::delete("/delete/abc").body(Body::empty()).unwrap();
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_appends_suffix_and_reports() {
        let (router, diagnostics) = router();
        let request = form("PUT", "/update", "id=101&name=iWatch&price=2333");
        let (status, body) = read(router.oneshot(request).await.unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Product(id=101, name=iWatch, price=2333) updated successfully");
        assert_eq!(diagnostics.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_update_requires_id() {
        let (router, diagnostics) = router();
        let request = form("PUT", "/update", "name=iWatch&price=2333");
        let (status, _) = read(router.oneshot(request).await.unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(diagnostics.messages().is_empty());
    }

    #[tokio::test]
    async fn test_upload_names_file() {
        let body = "--XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"note\"\r\n\r\n\
            ignored\r\n\
            --XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"file\"; filename=\"b.txt\"\r\n\
            Content-Type: text/plain\r\n\r\n\
            hello\r\n\
            --XBOUNDARY--\r\n";
        let (status, body) = send(multipart(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "upload success filename: b.txt");
    }

    #[tokio::test]
    async fn test_upload_without_file_part_fails() {
        let body = "--XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"note\"\r\n\r\n\
            no file here\r\n\
            --XBOUNDARY--\r\n";
        let (status, body) = send(multipart(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(error["error"], "MissingPart");
    }
}
